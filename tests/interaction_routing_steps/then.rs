//! Then steps for interaction routing BDD scenarios.

use super::world::{INTERACTION_TOKEN, RoutingWorld};
use serde_json::json;
use serverless_discord::interaction::adapters::memory::{ApiOperation, RecordedCall};
use rstest_bdd_macros::then;

#[then("the response status is {status:u16}")]
fn response_status(world: &RoutingWorld, status: u16) -> Result<(), eyre::Report> {
    let response = world.response()?;
    if response.status != status {
        return Err(eyre::eyre!(
            "expected status {status}, got {} with body {:?}",
            response.status,
            response.body
        ));
    }
    Ok(())
}

#[then("the response is a pong")]
fn response_is_pong(world: &RoutingWorld) -> Result<(), eyre::Report> {
    let body = world.response_json()?;
    if body != json!({"type": 1}) {
        return Err(eyre::eyre!("expected pong, got {body}"));
    }
    Ok(())
}

#[then(r#"the response message reads "{content}""#)]
fn response_message_reads(world: &RoutingWorld, content: String) -> Result<(), eyre::Report> {
    let body = world.response_json()?;
    if body != json!({"type": 4, "data": {"content": &content}}) {
        return Err(eyre::eyre!("expected message '{content}', got {body}"));
    }
    Ok(())
}

#[then("the response is a deferred acknowledgement")]
fn response_is_deferred(world: &RoutingWorld) -> Result<(), eyre::Report> {
    let body = world.response_json()?;
    if body != json!({"type": 5, "data": {"content": "..."}}) {
        return Err(eyre::eyre!("expected deferred acknowledgement, got {body}"));
    }
    Ok(())
}

#[then(r#"the response body is "{body}""#)]
fn response_body_is(world: &RoutingWorld, body: String) -> Result<(), eyre::Report> {
    let response = world.response()?;
    if response.body != body {
        return Err(eyre::eyre!("expected body '{body}', got '{}'", response.body));
    }
    Ok(())
}

#[then("no follow-up edit was sent")]
fn no_follow_up(world: &RoutingWorld) -> Result<(), eyre::Report> {
    let edits = world
        .api
        .calls_of(ApiOperation::EditOriginalInteractionResponse);
    if !edits.is_empty() {
        return Err(eyre::eyre!("expected no follow-up edits, got {edits:?}"));
    }
    Ok(())
}

#[then(r#"the original response is edited to "{content}""#)]
fn original_edited(world: &RoutingWorld, content: String) -> Result<(), eyre::Report> {
    let edits = world
        .api
        .calls_of(ApiOperation::EditOriginalInteractionResponse);
    let edited = edits.iter().any(|call| {
        matches!(
            call,
            RecordedCall::EditOriginalInteractionResponse { interaction_token, body, .. }
                if interaction_token == INTERACTION_TOKEN
                    && body.content.as_deref() == Some(content.as_str())
        )
    });
    if !edited {
        return Err(eyre::eyre!("expected an edit to '{content}', got {edits:?}"));
    }
    Ok(())
}
