//! When steps for interaction routing BDD scenarios.

use super::world::{RoutingWorld, command_payload, component_payload, ping_payload, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("Discord sends a signed ping")]
fn signed_ping(world: &mut RoutingWorld) -> Result<(), eyre::Report> {
    world
        .send(&ping_payload(), true)
        .wrap_err("send signed ping")
}

#[when("an unsigned ping arrives")]
fn unsigned_ping(world: &mut RoutingWorld) -> Result<(), eyre::Report> {
    world
        .send(&ping_payload(), false)
        .wrap_err("send unsigned ping")
}

#[when(r#"Discord sends a signed invocation of "{name}""#)]
fn signed_invocation(world: &mut RoutingWorld, name: String) -> Result<(), eyre::Report> {
    world
        .send(&command_payload(&name), true)
        .wrap_err_with(|| format!("send invocation of '{name}'"))
}

#[when("Discord sends a signed component interaction")]
fn signed_component(world: &mut RoutingWorld) -> Result<(), eyre::Report> {
    world
        .send(&component_payload(), true)
        .wrap_err("send component interaction")
}

#[when("the deferred worker runs the next job")]
fn worker_runs_next_job(world: &mut RoutingWorld) -> Result<(), eyre::Report> {
    let worker = world
        .worker
        .as_mut()
        .ok_or_else(|| eyre::eyre!("no deferred worker in scenario world"))?;
    let outcome = run_async(worker.process_next())
        .ok_or_else(|| eyre::eyre!("deferred queue closed before a job arrived"))?;
    tracing::debug!(?outcome, "deferred job processed");
    Ok(())
}
