use walletnotes_core::{
    CommitOutcome, EditorMode, MemoryStorage, NoteStore, WalletNotesSession,
    DEFAULT_STORAGE_KEY,
};

fn session() -> WalletNotesSession<MemoryStorage> {
    WalletNotesSession::new(NoteStore::load(MemoryStorage::new(), DEFAULT_STORAGE_KEY))
}

fn create(session: &mut WalletNotesSession<MemoryStorage>, title: &str, content: &str, tags: &str) -> String {
    session.start_create();
    let draft = session.editor_mut().draft_mut();
    draft.title = title.to_string();
    draft.content = content.to_string();
    draft.tags = tags.to_string();
    match session.commit().unwrap() {
        CommitOutcome::Created(id) => id,
        other => panic!("expected Created, got {other:?}"),
    }
}

#[test]
fn connected_wallet_is_auto_selected_only_when_nothing_is_selected() {
    let mut session = session();
    session.on_wallet_connected(Some("lum1me".to_string()));
    assert_eq!(session.filter().selected_address, "lum1me");

    session.select_address("lum1other");
    session.on_wallet_connected(Some("lum1me".to_string()));
    assert_eq!(session.filter().selected_address, "lum1other");
    assert_eq!(session.connected_address(), Some("lum1me"));
}

#[test]
fn use_connected_wallet_opens_create_session_for_it() {
    let mut session = session();
    assert!(!session.use_connected_wallet());

    session.on_wallet_connected(Some("lum1me".to_string()));
    session.select_address("lum1other");
    assert!(session.use_connected_wallet());
    assert_eq!(session.filter().selected_address, "lum1me");
    assert_eq!(session.editor().mode(), &EditorMode::Creating);
    assert_eq!(session.editor().draft().address, "lum1me");
}

#[test]
fn visible_notes_follow_filters_while_selectors_list_everything() {
    let mut session = session();
    session.select_address("lum1abc");
    create(&mut session, "Check", "remember seed phrase location", "security");
    session.select_address("LUM1ABC");
    create(&mut session, "Staking", "validator", "defi");
    session.select_address("lum1xyz");
    create(&mut session, "Airdrop", "claim", "defi");

    session.select_address("lum1abc");
    assert_eq!(session.visible_notes().len(), 2);

    session.set_search_query("seed");
    let visible = session.visible_notes();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Check");

    session.set_search_query("");
    session.set_filter_tag(Some("defi".to_string()));
    assert_eq!(session.visible_notes().len(), 1);

    assert_eq!(session.all_addresses().len(), 3);
    assert_eq!(session.all_tags(), vec!["security", "defi"]);
    assert_eq!(session.stats().total_notes, 3);

    session.set_filter_tag(Some(String::new()));
    assert_eq!(session.filter().filter_tag, None);
}

#[test]
fn edit_and_delete_through_session() {
    let mut session = session();
    session.select_address("lum1abc");
    let id = create(&mut session, "Check", "body", "");

    assert!(session.start_edit(&id));
    session.editor_mut().draft_mut().content = "updated".to_string();
    assert_eq!(session.commit().unwrap(), CommitOutcome::Updated(id.clone()));
    assert_eq!(session.store().get(&id).unwrap().content, "updated");

    assert!(!session.start_edit("missing"));
    assert!(!session.delete(&id, |_| false).unwrap());
    assert!(session.delete(&id, |_| true).unwrap());
    assert!(session.store().is_empty());
}

#[test]
fn cancel_edit_leaves_store_untouched() {
    let mut session = session();
    session.select_address("lum1abc");
    let id = create(&mut session, "Check", "body", "");
    assert!(session.start_edit(&id));
    session.editor_mut().draft_mut().title = "changed".to_string();
    session.cancel_edit();
    assert_eq!(session.store().get(&id).unwrap().title, "Check");
    assert!(!session.editor().is_open());
}
