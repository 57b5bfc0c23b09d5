//! Generation service: flow input → LLM → typed flow output.
//!
//! DESIGN
//! ======
//! Each flow is one round trip: the system prompt pins the reply to the
//! flow's JSON schema, the user message is the flow's rendered template, and
//! the reply is parsed back into the flow's output type. No retries; any
//! failure surfaces as a [`FlowError`] for the route to report in-band.

use std::time::Instant;

use prompts::Flow;
use prompts::flows::{InputError, OutputError, parse_output};
use tracing::{info, warn};

use crate::llm::LlmChat;
use crate::llm::types::{ChatRequest, LlmError, Message};

pub const DEFAULT_GENERATION_MAX_TOKENS: u32 = 1024;

// =============================================================================
// SETTINGS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSettings {
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self { max_tokens: DEFAULT_GENERATION_MAX_TOKENS }
    }
}

impl GenerationSettings {
    /// Read `GENERATION_MAX_TOKENS`, falling back to the default on absence
    /// or parse failure.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    #[must_use]
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let max_tokens = var("GENERATION_MAX_TOKENS")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_GENERATION_MAX_TOKENS);
        Self { max_tokens }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("LLM not configured")]
    NotConfigured,
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("model returned no structured output")]
    MissingOutput,
    #[error("model output does not match schema: {0}")]
    MalformedOutput(String),
}

impl From<OutputError> for FlowError {
    fn from(e: OutputError) -> Self {
        match e {
            OutputError::Missing => Self::MissingOutput,
            OutputError::Malformed(detail) => Self::MalformedOutput(detail),
        }
    }
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Run flow `F` once against `llm`.
///
/// # Errors
///
/// Returns [`FlowError::NotConfigured`] without an LLM, otherwise the first
/// input, transport, or output failure.
pub async fn run_flow<F: Flow>(
    llm: Option<&dyn LlmChat>,
    settings: GenerationSettings,
    input: &F::Input,
) -> Result<F::Output, FlowError> {
    let llm = llm.ok_or(FlowError::NotConfigured)?;
    F::check_input(input)?;

    let system = build_system_prompt::<F>();
    let messages = [Message::user(F::render_prompt(input))];
    let request = ChatRequest { max_tokens: settings.max_tokens, system: &system, messages: &messages, json_output: true };

    let started = Instant::now();
    let response = llm.chat(request).await?;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(
        flow = F::NAME,
        model = %response.model,
        stop_reason = %response.stop_reason,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        elapsed_ms,
        "generation: reply received"
    );

    let Some(text) = response.text() else {
        warn!(flow = F::NAME, "generation: reply had no text");
        return Err(FlowError::MissingOutput);
    };
    parse_output::<F>(&text).map_err(|e| {
        warn!(flow = F::NAME, error = %e, "generation: reply rejected");
        e.into()
    })
}

pub(crate) fn build_system_prompt<F: Flow>() -> String {
    format!(
        "You are a social media content assistant.\n\
         Respond with a single JSON object and nothing else.\n\
         The object must conform to this JSON schema:\n{}",
        F::output_schema()
    )
}

#[cfg(test)]
#[path = "generation_test.rs"]
mod tests;
