use super::*;
use time::macros::datetime;

fn at(ms: i64) -> OffsetDateTime {
    datetime!(2024-05-01 12:00:00 UTC) + time::Duration::milliseconds(ms)
}

fn memory() -> Arc<MemoryHistoryStore> {
    Arc::new(MemoryHistoryStore::default())
}

// =============================================================
// History model
// =============================================================

#[test]
fn timestamp_id_is_iso_with_millis() {
    assert_eq!(timestamp_id(at(7)), "2024-05-01T12:00:00.007Z");
}

#[test]
fn push_prepends_most_recent_first() {
    let mut history = History::default();
    history.push(HistoryKind::Caption, "first", at(0));
    history.push(HistoryKind::Post, "second", at(1));
    let queries: Vec<_> = history.items().iter().map(|i| i.query.as_str()).collect();
    assert_eq!(queries, vec!["second", "first"]);
    assert_eq!(history.items()[0].kind, HistoryKind::Post);
}

#[test]
fn push_never_exceeds_cap() {
    let mut history = History::default();
    for n in 0..50 {
        history.push(HistoryKind::Caption, format!("query {n}"), at(n));
    }
    assert_eq!(history.len(), MAX_HISTORY_ITEMS);
    assert_eq!(history.items()[0].query, "query 49");
    assert_eq!(history.items()[MAX_HISTORY_ITEMS - 1].query, "query 30");
}

#[test]
fn push_within_same_millisecond_gets_unique_ids() {
    let mut history = History::default();
    history.push(HistoryKind::Caption, "a", at(0));
    history.push(HistoryKind::Caption, "b", at(0));
    history.push(HistoryKind::Caption, "c", at(0));
    let ids: Vec<_> = history.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["2024-05-01T12:00:00.000Z-2", "2024-05-01T12:00:00.000Z-1", "2024-05-01T12:00:00.000Z"]);
}

#[test]
fn item_serializes_kind_under_type_key() {
    let item = HistoryItem { id: "x".into(), kind: HistoryKind::Caption, query: "dogs".into() };
    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json, serde_json::json!({ "id": "x", "type": "caption", "query": "dogs" }));
}

#[test]
fn parse_drops_unrecognized_types() {
    let raw = r#"[
        {"id":"1","type":"caption","query":"beach"},
        {"id":"2","type":"video","query":"ignored"},
        {"id":"3","type":"post","query":"tech"},
        {"id":"4"}
    ]"#;
    let history = History::parse(raw);
    let ids: Vec<_> = history.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[test]
fn parse_garbage_is_empty() {
    assert!(History::parse("not json").is_empty());
    assert!(History::parse(r#"{"id":"1"}"#).is_empty());
}

#[test]
fn parse_truncates_oversized_lists() {
    let items: Vec<_> = (0..30)
        .map(|n| serde_json::json!({ "id": n.to_string(), "type": "post", "query": "q" }))
        .collect();
    let history = History::parse(&serde_json::to_string(&items).unwrap());
    assert_eq!(history.len(), MAX_HISTORY_ITEMS);
    assert_eq!(history.items()[0].id, "0");
}

// =============================================================
// RecentQueries
// =============================================================

#[test]
fn add_persists_to_store() {
    let store = memory();
    let mut recent = RecentQueries::open(store.clone());
    let item = recent.add(HistoryKind::Caption, "Summer vacation", at(0));

    let stored = History::parse(&store.raw().unwrap());
    assert_eq!(stored.items(), &[item]);
}

#[test]
fn open_reloads_previous_session() {
    let store = memory();
    {
        let mut recent = RecentQueries::open(store.clone());
        recent.add(HistoryKind::Post, "Tech", at(0));
        recent.add(HistoryKind::Caption, "Dogs", at(1));
    }
    let reopened = RecentQueries::open(store);
    let queries: Vec<_> = reopened.items().iter().map(|i| i.query.as_str()).collect();
    assert_eq!(queries, vec!["Dogs", "Tech"]);
}

#[test]
fn clear_empties_memory_and_storage() {
    let store = memory();
    let mut recent = RecentQueries::open(store.clone());
    recent.add(HistoryKind::Caption, "Dogs", at(0));
    recent.clear();
    assert!(recent.items().is_empty());
    assert_eq!(store.raw(), None);
}

#[test]
fn open_filters_stored_unknown_kinds() {
    let store = Arc::new(MemoryHistoryStore::with_raw(
        r#"[{"id":"a","type":"reel","query":"x"},{"id":"b","type":"caption","query":"y"}]"#,
    ));
    let recent = RecentQueries::open(store);
    assert_eq!(recent.items().len(), 1);
    assert!(recent.get("b").is_some());
}

struct FailingStore;

impl HistoryStore for FailingStore {
    fn load(&self) -> Result<Option<String>, HistoryStoreError> {
        Err(HistoryStoreError::Unavailable("offline".into()))
    }

    fn save(&self, _raw: &str) -> Result<(), HistoryStoreError> {
        Err(HistoryStoreError::Unavailable("offline".into()))
    }

    fn clear(&self) -> Result<(), HistoryStoreError> {
        Err(HistoryStoreError::Unavailable("offline".into()))
    }
}

#[test]
fn store_failures_do_not_affect_in_memory_state() {
    let mut recent = RecentQueries::open(Arc::new(FailingStore));
    recent.add(HistoryKind::Post, "Travel", at(0));
    assert_eq!(recent.items().len(), 1);
    recent.clear();
    assert!(recent.items().is_empty());
}

// =============================================================
// FileHistoryStore
// =============================================================

#[test]
fn file_store_round_trips_and_clears() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileHistoryStore::new(dir.path().join("nested").join("history.json")));

    let mut recent = RecentQueries::open(store.clone());
    recent.add(HistoryKind::Caption, "Mountains", at(0));
    assert!(store.path().exists());

    let reopened = RecentQueries::open(store.clone());
    assert_eq!(reopened.items()[0].query, "Mountains");

    recent.clear();
    assert!(!store.path().exists());
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn file_store_missing_file_loads_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileHistoryStore::new(dir.path().join("absent.json"));
    assert_eq!(store.load().unwrap(), None);
    assert!(store.clear().is_ok());
}
