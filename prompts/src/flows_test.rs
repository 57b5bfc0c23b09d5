use super::*;

fn summer_request() -> CaptionRequest {
    CaptionRequest { tone: Some("funny".into()), ..CaptionRequest::new("Summer vacation") }
}

// =============================================================
// Caption template
// =============================================================

#[test]
fn caption_prompt_includes_topic_and_count() {
    let prompt = GenerateCaptionPrompts::render_prompt(&summer_request());
    assert!(prompt.starts_with("You are a social media expert. Generate 3 creative"));
    assert!(prompt.contains("Topic: Summer vacation\n"));
}

#[test]
fn caption_prompt_includes_only_present_optional_fields() {
    let prompt = GenerateCaptionPrompts::render_prompt(&summer_request());
    assert!(prompt.contains("Tone: funny\n"));
    assert!(!prompt.contains("Length:"));
    assert!(!prompt.contains("Style:"));
    assert!(!prompt.contains("Platform:"));
}

#[test]
fn caption_prompt_skips_blank_optional_fields() {
    let request = CaptionRequest { style: Some("   ".into()), platform: Some("instagram".into()), ..summer_request() };
    let prompt = GenerateCaptionPrompts::render_prompt(&request);
    assert!(!prompt.contains("Style:"));
    assert!(prompt.contains("Platform: instagram\n"));
}

#[test]
fn caption_prompt_orders_optional_fields() {
    let request = CaptionRequest {
        tone: Some("casual".into()),
        length: Some("short".into()),
        style: Some("creative".into()),
        platform: Some("instagram".into()),
        num_prompts: 5,
        ..CaptionRequest::new("Dogs")
    };
    let prompt = GenerateCaptionPrompts::render_prompt(&request);
    assert!(prompt.contains("Tone: casual\nLength: short\nStyle: creative\nPlatform: instagram\n"));
    assert!(prompt.contains("Generate 5 creative"));
    assert!(prompt.trim_end().ends_with("Each string should be a caption prompt."));
}

#[test]
fn caption_request_deserializes_with_default_count() {
    let request: CaptionRequest = serde_json::from_str(r#"{"topic":"Summer vacation","tone":"funny"}"#).unwrap();
    assert_eq!(request, summer_request());
}

#[test]
fn caption_request_uses_camel_case_count() {
    let json = serde_json::to_value(CaptionRequest { num_prompts: 5, ..CaptionRequest::new("x") }).unwrap();
    assert_eq!(json, serde_json::json!({ "topic": "x", "numPrompts": 5 }));
}

#[test]
fn caption_input_rejects_blank_topic() {
    let err = GenerateCaptionPrompts::check_input(&CaptionRequest::new("  ")).unwrap_err();
    assert_eq!(err, InputError::MissingField("topic"));
}

#[test]
fn caption_input_rejects_count_above_max() {
    let request = CaptionRequest { num_prompts: MAX_NUM_PROMPTS + 1, ..summer_request() };
    assert_eq!(
        GenerateCaptionPrompts::check_input(&request),
        Err(InputError::PromptCount { got: MAX_NUM_PROMPTS + 1, max: MAX_NUM_PROMPTS })
    );
    let at_max = CaptionRequest { num_prompts: MAX_NUM_PROMPTS, ..summer_request() };
    assert_eq!(GenerateCaptionPrompts::check_input(&at_max), Ok(()));
}

#[test]
fn caption_input_rejects_zero_count() {
    let request = CaptionRequest { num_prompts: 0, ..summer_request() };
    assert!(matches!(GenerateCaptionPrompts::check_input(&request), Err(InputError::PromptCount { got: 0, .. })));
}

// =============================================================
// Post template
// =============================================================

#[test]
fn post_prompt_renders_category_and_preferences() {
    let request = PostRequest { category: "Tech".into(), preferences: "A short, witty post".into() };
    let prompt = SuggestPostPrompts::render_prompt(&request);
    assert!(prompt.starts_with(
        "Suggest a post prompt based on the following category and preferences:\n\nCategory: Tech\nPreferences: A short, witty post\n"
    ));
    assert!(prompt.contains("\"prompt\""));
}

#[test]
fn post_input_rejects_blank_preferences() {
    let request = PostRequest { category: "Tech".into(), preferences: String::new() };
    assert_eq!(SuggestPostPrompts::check_input(&request), Err(InputError::MissingField("preferences")));
}

// =============================================================
// Output parsing
// =============================================================

#[test]
fn parse_caption_output_plain_json() {
    let output = parse_output::<GenerateCaptionPrompts>(r#"{"prompts":["one","two"]}"#).unwrap();
    assert_eq!(output.prompts, vec!["one", "two"]);
}

#[test]
fn parse_caption_output_inside_code_fence() {
    let reply = "Here you go:\n```json\n{\"prompts\": [\"a\"]}\n```\n";
    let output = parse_output::<GenerateCaptionPrompts>(reply).unwrap();
    assert_eq!(output.prompts, vec!["a"]);
}

#[test]
fn parse_output_ignores_braces_in_trailing_prose() {
    let reply = "Sure! {\"prompts\":[\"a\",\"b\"]} Let me know if you want more {variations}.";
    let output = parse_output::<GenerateCaptionPrompts>(reply).unwrap();
    assert_eq!(output.prompts, vec!["a", "b"]);
}

#[test]
fn parse_output_skips_braces_in_leading_prose() {
    let reply = "Use {topic} as a hint: {\"prompt\":\"x\"}";
    let output = parse_output::<SuggestPostPrompts>(reply).unwrap();
    assert_eq!(output.prompt, "x");
}

#[test]
fn parse_output_with_only_prose_braces_is_malformed() {
    let err = parse_output::<SuggestPostPrompts>("Try {something} else.").unwrap_err();
    assert!(matches!(err, OutputError::Malformed(_)));
}

#[test]
fn parse_output_without_object_is_missing() {
    let err = parse_output::<GenerateCaptionPrompts>("I cannot help with that.").unwrap_err();
    assert_eq!(err, OutputError::Missing);
}

#[test]
fn parse_output_with_wrong_shape_is_malformed() {
    let err = parse_output::<GenerateCaptionPrompts>(r#"{"captions":["a"]}"#).unwrap_err();
    assert!(matches!(err, OutputError::Malformed(_)));
}

#[test]
fn parse_post_output_rejects_blank_prompt() {
    let err = parse_output::<SuggestPostPrompts>(r#"{"prompt":"  "}"#).unwrap_err();
    assert_eq!(err, OutputError::Missing);
}

#[test]
fn output_schemas_name_required_keys() {
    assert_eq!(GenerateCaptionPrompts::output_schema()["required"], serde_json::json!(["prompts"]));
    assert_eq!(SuggestPostPrompts::output_schema()["required"], serde_json::json!(["prompt"]));
}
