use super::*;
use crate::state::panel::PanelState;

fn item(kind: HistoryKind, query: &str) -> HistoryItem {
    HistoryItem { id: "2024-05-01T12:00:00.000Z".to_owned(), kind, query: query.to_owned() }
}

#[test]
fn ui_state_default_is_caption_tab() {
    let ui = UiState::default();
    assert_eq!(ui.active_tab, ActiveTab::Caption);
    assert_eq!(ui.selected_history, None);
    assert!(!ui.sidebar_open);
}

#[test]
fn select_caption_entry_prefills_topic() {
    let mut ui = UiState { active_tab: ActiveTab::Post, ..UiState::default() };
    let mut caption = CaptionPanel::default();
    let mut post = PostPanel::default();

    select_history(&item(HistoryKind::Caption, "Summer vacation"), &mut ui, &mut caption, &mut post);

    assert_eq!(ui.active_tab, ActiveTab::Caption);
    assert_eq!(ui.selected_history.as_deref(), Some("2024-05-01T12:00:00.000Z"));
    assert_eq!(caption.form.topic, "Summer vacation");
    assert_eq!(post, PostPanel::default());
}

#[test]
fn select_post_entry_prefills_category_only() {
    let mut ui = UiState { sidebar_open: true, ..UiState::default() };
    let mut caption = CaptionPanel::default();
    let mut post = PostPanel::default();
    post.form.preferences = "left over preferences".to_owned();

    select_history(&item(HistoryKind::Post, "Tech"), &mut ui, &mut caption, &mut post);

    assert_eq!(ui.active_tab, ActiveTab::Post);
    assert!(!ui.sidebar_open);
    assert_eq!(post.form.category, "Tech");
    assert!(post.form.preferences.is_empty());
    assert_eq!(post.results.state(), &PanelState::Idle);
    assert!(caption.form.topic.is_empty());
}
