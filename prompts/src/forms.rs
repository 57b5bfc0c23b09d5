//! Form models and client-side validation for the two generator panels.
//!
//! Validation runs before any request is issued; a form that fails it never
//! leaves the browser. Lengths count UTF-16 code units, the unit browsers
//! use for string length, and are measured on the raw input.

use crate::flows::{CaptionRequest, PostRequest};

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

pub const MIN_TOPIC_CHARS: usize = 3;
pub const MIN_CATEGORY_CHARS: usize = 3;
pub const MIN_PREFERENCES_CHARS: usize = 10;

/// Number of caption prompts the caption panel asks for.
pub const CAPTION_FORM_NUM_PROMPTS: u32 = 5;

pub const TONE_OPTIONS: &[(&str, &str)] = &[
    ("funny", "Funny"),
    ("inspirational", "Inspirational"),
    ("professional", "Professional"),
    ("casual", "Casual"),
    ("engaging", "Engaging"),
];

pub const LENGTH_OPTIONS: &[(&str, &str)] = &[
    ("short", "Short (1-2 sentences)"),
    ("medium", "Medium (3-4 sentences)"),
    ("long", "Long (5+ sentences)"),
];

pub const STYLE_OPTIONS: &[(&str, &str)] = &[
    ("creative", "Creative"),
    ("informative", "Informative"),
    ("question", "Question-based"),
    ("storytelling", "Storytelling"),
];

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Per-field validation messages for one form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message for `field`, if it failed validation.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    fn check_min_chars(&mut self, field: &'static str, value: &str, min: usize, message: &'static str) {
        if value.encode_utf16().count() < min {
            self.0.push(FieldError { field, message });
        }
    }

    fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

// =============================================================================
// CAPTION FORM
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptionForm {
    pub topic: String,
    pub tone: String,
    pub length: String,
    pub style: String,
    pub platform: String,
}

impl Default for CaptionForm {
    fn default() -> Self {
        Self {
            topic: String::new(),
            tone: "engaging".to_owned(),
            length: "short".to_owned(),
            style: "creative".to_owned(),
            platform: "instagram".to_owned(),
        }
    }
}

impl CaptionForm {
    /// Validate and build the request the caption panel submits.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when the topic is too short.
    pub fn validate(&self) -> Result<CaptionRequest, FormErrors> {
        let mut errors = FormErrors::default();
        errors.check_min_chars("topic", &self.topic, MIN_TOPIC_CHARS, "Topic must be at least 3 characters long.");
        errors.into_result(CaptionRequest {
            topic: self.topic.clone(),
            tone: non_empty(&self.tone),
            length: non_empty(&self.length),
            style: non_empty(&self.style),
            platform: non_empty(&self.platform),
            num_prompts: CAPTION_FORM_NUM_PROMPTS,
        })
    }
}

// =============================================================================
// POST FORM
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostForm {
    pub category: String,
    pub preferences: String,
}

impl PostForm {
    /// Validate and build the request the post panel submits.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages for every field that is too short.
    pub fn validate(&self) -> Result<PostRequest, FormErrors> {
        let mut errors = FormErrors::default();
        errors.check_min_chars(
            "category",
            &self.category,
            MIN_CATEGORY_CHARS,
            "Category must be at least 3 characters long.",
        );
        errors.check_min_chars(
            "preferences",
            &self.preferences,
            MIN_PREFERENCES_CHARS,
            "Preferences must be at least 10 characters long.",
        );
        errors.into_result(PostRequest { category: self.category.clone(), preferences: self.preferences.clone() })
    }
}
