//! Generation action routes.
//!
//! Both actions always answer HTTP 200 with an [`ActionResult`] body. Any
//! failure (bad body, missing LLM, provider error, unusable reply) is logged
//! here and reported in-band with the flow's generic message.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Json;
use prompts::actions::{CAPTIONS_FAILED_MESSAGE, POST_FAILED_MESSAGE};
use prompts::{ActionResult, Flow, GenerateCaptionPrompts, SuggestPostPrompts};

use crate::services::generation::run_flow;
use crate::state::AppState;

pub async fn generate_captions(
    State(state): State<AppState>,
    body: Result<Json<<GenerateCaptionPrompts as Flow>::Input>, JsonRejection>,
) -> Json<ActionResult<Vec<String>>> {
    let result = run_action::<GenerateCaptionPrompts>(&state, body, CAPTIONS_FAILED_MESSAGE).await;
    Json(result.map(|output| output.prompts))
}

pub async fn suggest_post(
    State(state): State<AppState>,
    body: Result<Json<<SuggestPostPrompts as Flow>::Input>, JsonRejection>,
) -> Json<ActionResult<String>> {
    let result = run_action::<SuggestPostPrompts>(&state, body, POST_FAILED_MESSAGE).await;
    Json(result.map(|output| output.prompt))
}

async fn run_action<F: Flow>(
    state: &AppState,
    body: Result<Json<F::Input>, JsonRejection>,
    failure: &str,
) -> ActionResult<F::Output> {
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => {
            tracing::warn!(flow = F::NAME, error = %rejection, "action: rejected request body");
            return ActionResult::failed(failure);
        }
    };

    match run_flow::<F>(state.llm(), state.generation, &input).await {
        Ok(output) => ActionResult::ok(output),
        Err(e) => {
            tracing::error!(flow = F::NAME, error = %e, "action: generation failed");
            ActionResult::failed(failure)
        }
    }
}

#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;
