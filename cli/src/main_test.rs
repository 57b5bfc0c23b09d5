use super::*;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn caption_args(topic: &str) -> CaptionArgs {
    CaptionArgs {
        topic: topic.to_owned(),
        tone: "funny".to_owned(),
        length: "short".to_owned(),
        style: "creative".to_owned(),
        platform: "instagram".to_owned(),
        count: 5,
    }
}

fn temp_history(dir: &tempfile::TempDir) -> RecentQueries {
    let file = dir.path().join("history.json");
    open_history(Some(file)).unwrap()
}

// =============================================================================
// caption
// =============================================================================

#[tokio::test]
async fn caption_sends_form_and_returns_prompts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_CAPTIONS_PATH))
        .and(body_json(serde_json::json!({
            "topic": "Summer vacation",
            "tone": "funny",
            "length": "short",
            "style": "creative",
            "platform": "instagram",
            "numPrompts": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": ["a", "b"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut history = temp_history(&dir);
    let ctx = CliContext::new(server.uri());

    let prompts = run_caption(&ctx, &mut history, &caption_args("Summer vacation")).await.unwrap();
    assert_eq!(prompts, vec!["a".to_owned(), "b".to_owned()]);
    assert_eq!(history.items().len(), 1);
    assert_eq!(history.items()[0].kind, HistoryKind::Caption);
    assert_eq!(history.items()[0].query, "Summer vacation");
}

#[tokio::test]
async fn caption_failure_surfaces_server_message_and_keeps_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_CAPTIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "error": CAPTIONS_FAILED_MESSAGE
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut history = temp_history(&dir);
    let ctx = CliContext::new(server.uri());

    let err = run_caption(&ctx, &mut history, &caption_args("Summer vacation")).await.unwrap_err();
    assert!(matches!(err, CliError::Action(ref m) if m == CAPTIONS_FAILED_MESSAGE));
    assert_eq!(history.items().len(), 1);
}

#[tokio::test]
async fn caption_short_topic_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let mut history = temp_history(&dir);
    let ctx = CliContext::new(server.uri());

    let err = run_caption(&ctx, &mut history, &caption_args("ab")).await.unwrap_err();
    match err {
        CliError::Invalid(message) => assert!(message.starts_with("topic: ")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(history.items().is_empty());
}

#[tokio::test]
async fn http_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUGGEST_POST_PATH))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut history = temp_history(&dir);
    let ctx = CliContext::new(server.uri());
    let args = PostArgs { category: "Travel".to_owned(), preferences: "short and upbeat".to_owned() };

    let err = run_post(&ctx, &mut history, &args).await.unwrap_err();
    assert!(matches!(err, CliError::Status { status: 502 }));
}

// =============================================================================
// post
// =============================================================================

#[tokio::test]
async fn post_returns_prompt_and_records_category() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUGGEST_POST_PATH))
        .and(body_json(serde_json::json!({
            "category": "Travel",
            "preferences": "short and upbeat"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": "Share your favourite hidden beach."
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut history = temp_history(&dir);
    let ctx = CliContext::new(server.uri());
    let args = PostArgs { category: "Travel".to_owned(), preferences: "short and upbeat".to_owned() };

    let prompt = run_post(&ctx, &mut history, &args).await.unwrap();
    assert_eq!(prompt, "Share your favourite hidden beach.");
    assert_eq!(history.items()[0].kind, HistoryKind::Post);
    assert_eq!(history.items()[0].query, "Travel");
}

#[tokio::test]
async fn post_short_preferences_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = temp_history(&dir);
    let ctx = CliContext::new("http://127.0.0.1:9");
    let args = PostArgs { category: "Travel".to_owned(), preferences: "short".to_owned() };

    let err = run_post(&ctx, &mut history, &args).await.unwrap_err();
    match err {
        CliError::Invalid(message) => assert!(message.contains("preferences: ")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

// =============================================================================
// history
// =============================================================================

#[tokio::test]
async fn replay_caption_reruns_with_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_CAPTIONS_PATH))
        .and(body_json(serde_json::json!({
            "topic": "Autumn hikes",
            "tone": "engaging",
            "length": "short",
            "style": "creative",
            "platform": "instagram",
            "numPrompts": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": ["x"]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut history = temp_history(&dir);
    history.add(HistoryKind::Caption, "Autumn hikes", OffsetDateTime::now_utc());
    let ctx = CliContext::new(server.uri());

    let replayed = replay(&ctx, &mut history, 1, None).await.unwrap();
    assert_eq!(replayed, Replayed::Captions(vec!["x".to_owned()]));
    assert_eq!(history.items().len(), 2);
}

#[tokio::test]
async fn replay_post_requires_preferences() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = temp_history(&dir);
    history.add(HistoryKind::Post, "Fitness", OffsetDateTime::now_utc());
    let ctx = CliContext::new("http://127.0.0.1:9");

    let err = replay(&ctx, &mut history, 1, None).await.unwrap_err();
    assert!(matches!(err, CliError::MissingPreferences));
}

#[tokio::test]
async fn replay_out_of_range_is_unknown_entry() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = temp_history(&dir);
    let ctx = CliContext::new("http://127.0.0.1:9");

    assert!(matches!(replay(&ctx, &mut history, 0, None).await, Err(CliError::UnknownEntry(0))));
    assert!(matches!(replay(&ctx, &mut history, 3, None).await, Err(CliError::UnknownEntry(3))));
}

#[test]
fn history_file_persists_between_opens() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("nested").join("history.json");

    let mut first = open_history(Some(file.clone())).unwrap();
    first.add(HistoryKind::Caption, "Summer vacation", OffsetDateTime::now_utc());

    let second = open_history(Some(file.clone())).unwrap();
    assert_eq!(second.items().len(), 1);
    assert_eq!(second.items()[0].query, "Summer vacation");

    let mut third = open_history(Some(file.clone())).unwrap();
    third.clear();
    assert!(!file.exists());
}

#[test]
fn render_history_lists_most_recent_first() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = temp_history(&dir);
    history.add(HistoryKind::Caption, "first", OffsetDateTime::now_utc());
    history.add(HistoryKind::Post, "second", OffsetDateTime::now_utc());

    let rendered = render_history(history.items());
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines, vec![" 1  post     second", " 2  caption  first"]);
}

#[test]
fn render_history_empty() {
    assert_eq!(render_history(&[]), "No history yet.\n");
}

// =============================================================================
// args
// =============================================================================

#[test]
fn caption_count_is_bounded() {
    let ok = Cli::try_parse_from(["captioncraft", "caption", "--topic", "Beach", "--count", "10"]);
    assert!(ok.is_ok());
    let too_many = Cli::try_parse_from(["captioncraft", "caption", "--topic", "Beach", "--count", "11"]);
    assert!(too_many.is_err());
    let zero = Cli::try_parse_from(["captioncraft", "caption", "--topic", "Beach", "--count", "0"]);
    assert!(zero.is_err());
}

#[test]
fn form_errors_join_per_field() {
    let form = PostForm { category: "a".to_owned(), preferences: "b".to_owned() };
    let err = CliError::from(form.validate().unwrap_err());
    let CliError::Invalid(message) = err else {
        panic!("expected Invalid");
    };
    assert_eq!(message.lines().count(), 2);
}
