use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tempfile::TempDir;

use memo_core::gate::GateConfig;
use memo_core::provider::{
    IdentityProvider, ProviderError, VerificationLevel, VerifyPayload, VerifyRequest,
    VerifyResponse,
};
use memo_core::storage::{FileStore, KeyValueStore, NOTES_KEY, VERIFIED_KEY};
use memo_core::{EditView, Note, NoteSession, NoteStore, Screen, VerificationGate, VerificationState};

fn store_in(dir: &TempDir) -> FileStore {
    FileStore::open(dir.path().join("storage.json"))
}

fn stored_notes(dir: &TempDir) -> Vec<Note> {
    NoteStore::new(store_in(dir)).load()
}

#[test]
fn test_create_edit_delete_scenario() {
    let dir = TempDir::new().expect("tempdir");
    let mut session = NoteSession::load(store_in(&dir));

    let older = session.create().expect("create").id.clone();
    session.update(&older, "Older note").expect("update");

    let id = session.create().expect("create").id.clone();
    assert_eq!(session.screen(), Screen::Edit);
    session.update(&id, "Hello\nWorld").expect("update");

    let note = session.get(&id).expect("note exists");
    assert_eq!(note.title, "Hello");
    assert_eq!(note.content, "Hello\nWorld");
    assert_eq!(session.list()[0].id, id);
    assert_eq!(stored_notes(&dir), session.list());

    session.update(&id, "").expect("update");
    assert_eq!(session.get(&id).expect("note exists").title, "Untitled");
    assert_eq!(stored_notes(&dir), session.list());

    session.request_delete(&id);
    session.confirm_delete().expect("confirm");
    assert!(session.get(&id).is_none());
    assert_eq!(session.edit_view(), EditView::Empty);
    assert_eq!(stored_notes(&dir), session.list());

    session.open(&older).expect("open");
    session.request_delete(&older);
    session.confirm_delete().expect("confirm");
    assert!(stored_notes(&dir).is_empty());

    let raw = store_in(&dir).get(NOTES_KEY).expect("read").expect("key present");
    assert_eq!(raw, "[]");
}

#[test]
fn test_session_reloads_from_disk() {
    let dir = TempDir::new().expect("tempdir");
    let id = {
        let mut session = NoteSession::load(store_in(&dir));
        let id = session.create().expect("create").id.clone();
        session.update(&id, "Persisted\nbody").expect("update");
        id
    };

    let session = NoteSession::load(store_in(&dir));
    assert_eq!(session.list().len(), 1);
    assert_eq!(session.list()[0].id, id);
    assert_eq!(session.screen(), Screen::List);
    assert!(session.selected().is_none());
}

#[test]
fn test_corrupt_notes_start_empty_and_recover() {
    let dir = TempDir::new().expect("tempdir");
    store_in(&dir).set(NOTES_KEY, "[{broken").expect("seed");

    let mut session = NoteSession::load(store_in(&dir));
    assert!(session.list().is_empty());

    session.create().expect("create");
    assert_eq!(stored_notes(&dir).len(), 1);
}

struct ApprovingProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl IdentityProvider for ApprovingProvider {
    fn is_installed(&self) -> bool {
        true
    }

    async fn verify(&self, request: &VerifyRequest) -> Result<VerifyResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(VerifyResponse::success(&VerifyPayload {
            proof: "0xproof".to_string(),
            merkle_root: "0xroot".to_string(),
            nullifier_hash: format!("0x{}", request.action_id),
            verification_level: request.level,
        }))
    }
}

#[tokio::test]
async fn test_gate_and_notes_share_one_store() {
    let dir = TempDir::new().expect("tempdir");
    let config = GateConfig {
        app_id: Some("app_test".to_string()),
        action_id: Some("memo".to_string()),
        level: VerificationLevel::Device,
        signal: None,
    };

    let mut notes = NoteSession::load(store_in(&dir));
    notes.create().expect("create");

    let provider = ApprovingProvider {
        calls: AtomicUsize::new(0),
    };
    let mut gate = VerificationGate::new(store_in(&dir), provider, config.clone());
    assert_eq!(gate.mount(), &VerificationState::Need);
    assert_eq!(gate.verify().await, &VerificationState::Ok);
    assert_eq!(gate.identity().expect("identity").nullifier_hash, "0xmemo");

    // The flag write kept the notes, and the next load opens directly.
    assert_eq!(stored_notes(&dir).len(), 1);
    assert_eq!(
        store_in(&dir).get(VERIFIED_KEY).expect("read").as_deref(),
        Some("true")
    );

    let fresh = ApprovingProvider {
        calls: AtomicUsize::new(0),
    };
    let mut reloaded = VerificationGate::new(store_in(&dir), fresh, config);
    assert_eq!(reloaded.mount(), &VerificationState::Ok);
    assert_eq!(reloaded.provider().calls.load(Ordering::SeqCst), 0);
}
