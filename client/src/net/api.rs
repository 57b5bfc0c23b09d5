//! Request action helpers for the two generation endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning the failure message since these
//! endpoints are only called from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure collapses to the action's generic message so panels can
//! show one toast without knowing whether transport, server, or model failed.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use prompts::actions::{CAPTIONS_FAILED_MESSAGE, POST_FAILED_MESSAGE};
use prompts::{ActionResult, CaptionRequest, PostRequest};

#[cfg(feature = "hydrate")]
use prompts::actions::{GENERATE_CAPTIONS_PATH, SUGGEST_POST_PATH};

/// Collapse a transport outcome and the in-band result into one `Result`.
fn settle<T>(response: Result<ActionResult<T>, String>, fallback: &str) -> Result<T, String> {
    match response {
        Ok(result) => result.into_result(fallback),
        Err(e) => {
            leptos::logging::warn!("action request failed: {e}");
            Err(fallback.to_owned())
        }
    }
}

#[cfg(feature = "hydrate")]
async fn post_action<B, T>(path: &str, body: &B) -> Result<ActionResult<T>, String>
where
    B: serde::Serialize,
    T: serde::de::DeserializeOwned,
{
    let resp = gloo_net::http::Request::post(path)
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(format!("{path} failed: {}", resp.status()));
    }
    resp.json::<ActionResult<T>>().await.map_err(|e| e.to_string())
}

/// Generate caption prompts via `POST /api/actions/generate-captions`.
///
/// # Errors
///
/// Returns the user-facing failure message.
pub async fn generate_captions(request: &CaptionRequest) -> Result<Vec<String>, String> {
    #[cfg(feature = "hydrate")]
    {
        settle(post_action(GENERATE_CAPTIONS_PATH, request).await, CAPTIONS_FAILED_MESSAGE)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        settle(Err("not available on server".to_owned()), CAPTIONS_FAILED_MESSAGE)
    }
}

/// Suggest a post prompt via `POST /api/actions/suggest-post`.
///
/// # Errors
///
/// Returns the user-facing failure message.
pub async fn suggest_post(request: &PostRequest) -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        settle(post_action(SUGGEST_POST_PATH, request).await, POST_FAILED_MESSAGE)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        settle(Err("not available on server".to_owned()), POST_FAILED_MESSAGE)
    }
}
