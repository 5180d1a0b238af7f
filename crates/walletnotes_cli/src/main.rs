//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `walletnotes_core` linkage.
//! - Run one create/filter/delete pass against in-memory storage.

use walletnotes_core::{open_store, NotesConfig, WalletNotesSession};

fn main() {
    println!("walletnotes_core ping={}", walletnotes_core::ping());
    println!("walletnotes_core version={}", walletnotes_core::core_version());

    let store = match open_store(&NotesConfig::default()) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("walletnotes_core store=error {err}");
            std::process::exit(1);
        }
    };
    let mut session = WalletNotesSession::new(store);
    session.on_wallet_connected(Some("lum1smoke".to_string()));
    session.start_create();
    {
        let draft = session.editor_mut().draft_mut();
        draft.title = "smoke".to_string();
        draft.content = "probe".to_string();
        draft.tags = "cli, smoke".to_string();
    }
    let committed = session.commit().is_ok();
    println!(
        "walletnotes_core commit={} visible={} tags={}",
        committed,
        session.visible_notes().len(),
        session.all_tags().len()
    );
}
