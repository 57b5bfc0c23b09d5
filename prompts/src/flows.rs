//! Generation flows: typed input, output schema, and prompt template.
//!
//! DESIGN
//! ======
//! A flow is a named contract against the language model: the input record
//! the caller supplies, the JSON shape the model must answer with, and a
//! plain template function that renders the user prompt. Optional fields
//! are included in the prompt only when present and non-empty. Dispatch is
//! static through the [`Flow`] trait; the server runs any flow with one
//! generic function.
//!
//! Model replies are parsed leniently: a Markdown code fence or stray prose
//! around the outermost JSON object is tolerated, anything else is an
//! [`OutputError`].

use std::fmt::Write;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[cfg(test)]
#[path = "flows_test.rs"]
mod flows_test;

pub const DEFAULT_NUM_PROMPTS: u32 = 3;

// =============================================================================
// ERRORS
// =============================================================================

/// A flow input that cannot be sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),
    #[error("`numPrompts` must be between 1 and {max}, got {got}")]
    PromptCount { got: u32, max: u32 },
}

/// A model reply that does not satisfy the flow's output shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutputError {
    #[error("model returned no structured output")]
    Missing,
    #[error("model output does not match schema: {0}")]
    Malformed(String),
}

// =============================================================================
// FLOW TRAIT
// =============================================================================

pub trait Flow {
    /// Stable flow name, used in logs.
    const NAME: &'static str;

    type Input: Serialize + DeserializeOwned + Send + Sync;
    type Output: Serialize + DeserializeOwned + Send;

    /// JSON schema the model's reply must conform to.
    fn output_schema() -> Value;

    /// Render the user prompt for `input`.
    fn render_prompt(input: &Self::Input) -> String;

    /// Reject inputs the model should never see.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] naming the offending field.
    fn check_input(input: &Self::Input) -> Result<(), InputError>;

    /// Reject replies that parse but carry nothing usable.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Missing`] for empty output.
    fn check_output(_output: &Self::Output) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Parse and check a raw model reply against flow `F`.
///
/// The reply may wrap the object in a code fence or prose, braces included:
/// each `{` is tried in turn and the first value that decodes as the output
/// type wins, ignoring whatever follows it.
///
/// # Errors
///
/// Returns [`OutputError::Missing`] when the reply holds no `{` at all and
/// [`OutputError::Malformed`] when no candidate matches the schema.
pub fn parse_output<F: Flow>(reply: &str) -> Result<F::Output, OutputError> {
    let output: F::Output = first_json_object(reply)?;
    F::check_output(&output)?;
    Ok(output)
}

fn first_json_object<T: DeserializeOwned>(reply: &str) -> Result<T, OutputError> {
    let mut first_error = None;
    for (start, _) in reply.match_indices('{') {
        let mut values = serde_json::Deserializer::from_str(&reply[start..]).into_iter::<T>();
        match values.next() {
            Some(Ok(value)) => return Ok(value),
            Some(Err(e)) => {
                first_error.get_or_insert_with(|| e.to_string());
            }
            None => {}
        }
    }
    Err(first_error.map_or(OutputError::Missing, OutputError::Malformed))
}

fn present(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).filter(|v| !v.trim().is_empty())
}

// =============================================================================
// CAPTION FLOW
// =============================================================================

/// Upper bound on prompts per caption request.
pub const MAX_NUM_PROMPTS: u32 = 10;

/// Input to [`GenerateCaptionPrompts`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionRequest {
    /// The topic or theme to write caption prompts for.
    pub topic: String,
    /// Desired tone, e.g. funny, serious, inspirational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    /// Desired length, e.g. short, medium, long.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    /// Desired style, e.g. poetic, informative, engaging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Target platform, e.g. Instagram, Twitter, Facebook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default = "default_num_prompts")]
    pub num_prompts: u32,
}

fn default_num_prompts() -> u32 {
    DEFAULT_NUM_PROMPTS
}

impl CaptionRequest {
    /// A request for `topic` with every optional field absent.
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            tone: None,
            length: None,
            style: None,
            platform: None,
            num_prompts: DEFAULT_NUM_PROMPTS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionOutput {
    pub prompts: Vec<String>,
}

pub struct GenerateCaptionPrompts;

impl Flow for GenerateCaptionPrompts {
    const NAME: &'static str = "generateCaptionPrompts";

    type Input = CaptionRequest;
    type Output = CaptionOutput;

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "prompts": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "An array of generated caption prompts."
                }
            },
            "required": ["prompts"]
        })
    }

    fn render_prompt(input: &CaptionRequest) -> String {
        let mut out = format!(
            "You are a social media expert. Generate {} creative and engaging caption prompts for the following topic or theme:\n\nTopic: {}\n\n",
            input.num_prompts, input.topic
        );
        let optional = [
            ("Tone", present(input.tone.as_ref())),
            ("Length", present(input.length.as_ref())),
            ("Style", present(input.style.as_ref())),
            ("Platform", present(input.platform.as_ref())),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                let _ = writeln!(out, "{label}: {value}");
            }
        }
        out.push_str(
            "\nFormat the response as a JSON object with a \"prompts\" key containing an array of strings. Each string should be a caption prompt.\n",
        );
        out
    }

    fn check_input(input: &CaptionRequest) -> Result<(), InputError> {
        if input.topic.trim().is_empty() {
            return Err(InputError::MissingField("topic"));
        }
        if input.num_prompts == 0 || input.num_prompts > MAX_NUM_PROMPTS {
            return Err(InputError::PromptCount { got: input.num_prompts, max: MAX_NUM_PROMPTS });
        }
        Ok(())
    }
}

// =============================================================================
// POST FLOW
// =============================================================================

/// Input to [`SuggestPostPrompts`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRequest {
    /// The category of the post prompt.
    pub category: String,
    /// Free-text preferences such as tone, length, and style.
    pub preferences: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOutput {
    pub prompt: String,
}

pub struct SuggestPostPrompts;

impl Flow for SuggestPostPrompts {
    const NAME: &'static str = "suggestPostPrompts";

    type Input = PostRequest;
    type Output = PostOutput;

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "prompt": { "type": "string", "description": "The suggested post prompt." }
            },
            "required": ["prompt"]
        })
    }

    fn render_prompt(input: &PostRequest) -> String {
        format!(
            "Suggest a post prompt based on the following category and preferences:\n\nCategory: {}\nPreferences: {}\n\nFormat the response as a JSON object with a \"prompt\" key containing the suggested post prompt.\n",
            input.category, input.preferences
        )
    }

    fn check_input(input: &PostRequest) -> Result<(), InputError> {
        if input.category.trim().is_empty() {
            return Err(InputError::MissingField("category"));
        }
        if input.preferences.trim().is_empty() {
            return Err(InputError::MissingField("preferences"));
        }
        Ok(())
    }

    fn check_output(output: &PostOutput) -> Result<(), OutputError> {
        if output.prompt.trim().is_empty() {
            return Err(OutputError::Missing);
        }
        Ok(())
    }
}
