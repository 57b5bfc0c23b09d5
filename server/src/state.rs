//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the optional LLM client and generation settings. Nothing in it
//! is mutable after startup.

use std::sync::Arc;

use crate::llm::LlmChat;
use crate::services::generation::GenerationSettings;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    pub generation: GenerationSettings,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmChat>>, generation: GenerationSettings) -> Self {
        Self { llm, generation }
    }

    #[must_use]
    pub fn llm(&self) -> Option<&dyn LlmChat> {
        self.llm.as_deref()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Mutex;

    use super::*;
    use crate::llm::types::{ChatRequest, ChatResponse, ContentBlock, LlmError, Message};

    /// What a [`MockLlm`] saw on one call.
    #[derive(Debug, Clone)]
    pub struct RecordedCall {
        pub max_tokens: u32,
        pub system: String,
        pub messages: Vec<Message>,
        pub json_output: bool,
    }

    /// Scripted LLM: pops one reply per call and records every request.
    pub struct MockLlm {
        replies: Mutex<Vec<Result<ChatResponse, LlmError>>>,
        pub calls: Mutex<Vec<RecordedCall>>,
    }

    impl MockLlm {
        #[must_use]
        pub fn new(replies: Vec<Result<ChatResponse, LlmError>>) -> Self {
            Self { replies: Mutex::new(replies), calls: Mutex::new(Vec::new()) }
        }

        /// A mock that answers every call with `text`.
        #[must_use]
        pub fn replying(text: &str) -> Self {
            Self::new(vec![Ok(text_response(text))])
        }

        #[must_use]
        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl LlmChat for MockLlm {
        async fn chat(&self, request: ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
            self.calls.lock().unwrap().push(RecordedCall {
                max_tokens: request.max_tokens,
                system: request.system.to_string(),
                messages: request.messages.to_vec(),
                json_output: request.json_output,
            });
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                Err(LlmError::ApiRequest("mock exhausted".into()))
            } else {
                replies.remove(0)
            }
        }
    }

    #[must_use]
    pub fn text_response(text: &str) -> ChatResponse {
        ChatResponse {
            content: vec![ContentBlock::Text { text: text.into() }],
            model: "mock".into(),
            stop_reason: "end_turn".into(),
            input_tokens: 0,
            output_tokens: 0,
        }
    }

    /// Create a test `AppState` with no LLM.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(None, GenerationSettings::default())
    }

    /// Create a test `AppState` with a mock LLM.
    #[must_use]
    pub fn test_app_state_with_llm(llm: Arc<dyn LlmChat>) -> AppState {
        AppState::new(Some(llm), GenerationSettings::default())
    }
}
