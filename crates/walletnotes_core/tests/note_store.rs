use walletnotes_core::{
    MemoryStorage, Note, NotePatch, NoteStore, NoteValidationError, StoreError,
    DEFAULT_STORAGE_KEY,
};

fn empty_store() -> NoteStore<MemoryStorage> {
    NoteStore::load(MemoryStorage::new(), DEFAULT_STORAGE_KEY)
}

fn patch(title: &str, content: &str, tags: &[&str]) -> NotePatch {
    NotePatch {
        title: title.to_string(),
        content: content.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    }
}

#[test]
fn create_edit_delete_scenario() {
    let mut store = empty_store();
    let id = store
        .add(Note::new(
            "lum1abc",
            "Check",
            "remember seed phrase location",
            Vec::new(),
        ))
        .unwrap();
    assert_eq!(store.len(), 1);
    let created = store.get(&id).unwrap().clone();
    assert_eq!(created.created_at, created.updated_at);

    let updated = store
        .update(&id, patch("Check", "updated", &[]))
        .unwrap()
        .expect("note should exist")
        .clone();
    assert_eq!(store.len(), 1);
    assert_eq!(updated.id, id);
    assert_eq!(updated.content, "updated");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > updated.created_at);

    let removed = store.remove(&id, |_| true).unwrap();
    assert_eq!(removed.map(|note| note.id), Some(id));
    assert!(store.is_empty());
}

#[test]
fn persisted_collection_round_trips_through_load() {
    let mut store = empty_store();
    let first = store
        .add(Note::new("lum1abc", "one", "first", vec!["a".into(), "a".into()]))
        .unwrap();
    let second = store.add(Note::new("LUM1XYZ", "two", "second", Vec::new())).unwrap();
    store.add(Note::new("lum1abc", "three", "third", Vec::new())).unwrap();
    store.update(&second, patch("two!", "second edit", &["x"])).unwrap();
    store.remove(&first, |_| true).unwrap();

    let expected = store.notes().to_vec();
    let storage = store.storage().clone();
    let reloaded = NoteStore::load(storage, DEFAULT_STORAGE_KEY);
    assert_eq!(reloaded.notes(), expected.as_slice());
}

#[test]
fn add_then_remove_restores_previous_collection() {
    let mut store = empty_store();
    store.add(Note::new("lum1abc", "keep", "body", Vec::new())).unwrap();
    let before = store.notes().to_vec();

    let id = store.add(Note::new("lum1abc", "temp", "body", Vec::new())).unwrap();
    store.remove(&id, |_| true).unwrap();
    assert_eq!(store.notes(), before.as_slice());
}

#[test]
fn malformed_payload_loads_as_empty_collection() {
    for raw in ["not json", "{\"id\":\"1\"}", "[{\"id\":1}]"] {
        let storage = MemoryStorage::new().with_slot(DEFAULT_STORAGE_KEY, raw);
        let store = NoteStore::load(storage, DEFAULT_STORAGE_KEY);
        assert!(store.is_empty(), "payload `{raw}` should degrade to empty");
    }
}

#[test]
fn payload_with_blank_title_loads_as_empty_collection() {
    let raw = r#"[{"id":"1","address":"lum1abc","title":"  ","content":"c",
        "createdAt":"2024-01-01T00:00:00.000Z","updatedAt":"2024-01-01T00:00:00.000Z","tags":[]}]"#;
    let storage = MemoryStorage::new().with_slot(DEFAULT_STORAGE_KEY, raw);
    assert!(NoteStore::load(storage, DEFAULT_STORAGE_KEY).is_empty());
}

#[test]
fn legacy_timestamp_ids_load_unchanged() {
    let raw = r#"[{"id":"1700000000000","address":"lum1abc","title":"Check","content":"c",
        "createdAt":"2024-01-01T00:00:00.000Z","updatedAt":"2024-01-02T10:30:00.000Z","tags":["seed"]}]"#;
    let storage = MemoryStorage::new().with_slot(DEFAULT_STORAGE_KEY, raw);
    let store = NoteStore::load(storage, DEFAULT_STORAGE_KEY);
    assert_eq!(store.len(), 1);
    assert!(store.get("1700000000000").is_some());
}

#[test]
fn add_rejects_blank_fields_and_duplicate_ids() {
    let mut store = empty_store();
    let err = store.add(Note::new("lum1abc", "  ", "body", Vec::new())).unwrap_err();
    assert!(matches!(err, StoreError::Validation(NoteValidationError::EmptyTitle)));
    let err = store.add(Note::new("lum1abc", "t", "\t", Vec::new())).unwrap_err();
    assert!(matches!(err, StoreError::Validation(NoteValidationError::EmptyContent)));
    let err = store.add(Note::new(" ", "t", "c", Vec::new())).unwrap_err();
    assert!(matches!(err, StoreError::Validation(NoteValidationError::EmptyAddress)));

    store.add(Note::with_id("same", "a", "t", "c", Vec::new())).unwrap();
    let err = store
        .add(Note::with_id("same", "b", "t", "c", Vec::new()))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(NoteValidationError::DuplicateId(_))
    ));
    assert_eq!(store.len(), 1);
}

#[test]
fn update_and_remove_of_unknown_ids_are_no_ops() {
    let mut store = empty_store();
    store.add(Note::new("lum1abc", "t", "c", Vec::new())).unwrap();
    let raw_before = store.storage().raw(DEFAULT_STORAGE_KEY).map(str::to_string);

    assert!(store.update("missing", patch("t", "c", &[])).unwrap().is_none());
    let mut asked = false;
    let removed = store
        .remove("missing", |_| {
            asked = true;
            true
        })
        .unwrap();
    assert!(removed.is_none());
    assert!(!asked, "confirmation must not be requested for unknown ids");
    assert_eq!(
        store.storage().raw(DEFAULT_STORAGE_KEY).map(str::to_string),
        raw_before
    );
}

#[test]
fn declined_confirmation_keeps_note() {
    let mut store = empty_store();
    let id = store.add(Note::new("lum1abc", "t", "c", Vec::new())).unwrap();
    let removed = store.remove(&id, |note| note.title != "t").unwrap();
    assert!(removed.is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn rejected_write_rolls_back_memory() {
    let mut store = empty_store();
    let id = store.add(Note::new("lum1abc", "t", "c", Vec::new())).unwrap();
    store.storage_mut().set_reject_writes(true);

    let err = store.add(Note::new("lum1abc", "t2", "c2", Vec::new())).unwrap_err();
    assert!(matches!(err, StoreError::Storage(_)));
    assert_eq!(store.len(), 1);

    let err = store.update(&id, patch("t", "changed", &[])).unwrap_err();
    assert!(matches!(err, StoreError::Storage(_)));
    assert_eq!(store.get(&id).unwrap().content, "c");

    assert!(store.remove(&id, |_| true).is_err());
    assert_eq!(store.len(), 1);
}

#[test]
fn invalid_patch_is_rejected_before_lookup() {
    let mut store = empty_store();
    let id = store.add(Note::new("lum1abc", "t", "c", Vec::new())).unwrap();
    let err = store.update(&id, patch(" ", "c", &[])).unwrap_err();
    assert!(matches!(err, StoreError::Validation(NoteValidationError::EmptyTitle)));
    assert_eq!(store.get(&id).unwrap().title, "t");
}

#[test]
fn stored_payload_is_a_camel_case_json_array() {
    let mut store = empty_store();
    store
        .add(Note::new("lum1abc", "t", "c", vec!["seed".to_string()]))
        .unwrap();
    let raw = store.storage().raw(DEFAULT_STORAGE_KEY).unwrap();
    let value: serde_json::Value = serde_json::from_str(raw).unwrap();
    let first = &value.as_array().expect("payload should be an array")[0];
    for field in ["id", "address", "title", "content", "createdAt", "updatedAt", "tags"] {
        assert!(first.get(field).is_some(), "missing field {field}");
    }
}
