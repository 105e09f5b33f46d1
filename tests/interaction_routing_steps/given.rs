//! Given steps for interaction routing BDD scenarios.

use super::world::RoutingWorld;
use rstest_bdd_macros::given;

#[given(r#"a command "{name}" replying "{reply}""#)]
fn a_command_replying(world: &mut RoutingWorld, name: String, reply: String) {
    world.add_command(&name, reply);
}

#[given(r#"a deferred command "{name}" replying "{reply}""#)]
fn a_deferred_command_replying(world: &mut RoutingWorld, name: String, reply: String) {
    world.add_deferred_command(&name, reply);
}
