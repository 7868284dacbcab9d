//! Verification gate guarding access to the notes.
//!
//! The gate starts in `checking`, reads the persisted verified flag once on
//! mount, and moves to `ok` or `need`. From `need` (or after a failure) the
//! user starts verification, which is delegated to an [`IdentityProvider`].
//! Only `ok` lets protected content through; it is terminal for the session.
//!
//! ```text
//! checking --flag set--> ok
//! checking --no flag---> need --verify--> verifying --success--> ok
//!                          |                  \------failure--> error --verify--> verifying
//!                          \--not installed--> unavailable
//! ```

mod state;

use serde::{Deserialize, Serialize};

use crate::note::now_millis;
use crate::provider::{
    IdentityProvider, ProviderError, VerificationLevel, VerifyPayload, VerifyRequest,
    VerifyResponse, VerifyStatus,
};
use crate::storage::{KeyValueStore, IDENTITY_KEY, VERIFIED_KEY};

pub use state::{
    GateView, VerificationState, VerifyFailure, PROMPT_ACTION, PROMPT_TITLE, UNAVAILABLE_BODY,
    UNAVAILABLE_TITLE, VERIFYING_TEXT,
};

/// Identifiers the provider call needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateConfig {
    pub app_id: Option<String>,
    pub action_id: Option<String>,
    pub level: VerificationLevel,
    pub signal: Option<String>,
}

impl GateConfig {
    /// Build the provider request, or name the missing identifier.
    pub fn request(&self) -> Result<VerifyRequest, VerifyFailure> {
        let app_id = required(&self.app_id, "app_id")?;
        let action_id = required(&self.action_id, "action_id")?;
        Ok(VerifyRequest {
            app_id,
            action_id,
            level: self.level,
            signal: self.signal.clone(),
        })
    }
}

fn required(value: &Option<String>, name: &str) -> Result<String, VerifyFailure> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .ok_or_else(|| VerifyFailure::Configuration(name.to_string()))
}

/// Identity attributes kept after a successful verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedIdentity {
    pub nullifier_hash: String,
    pub merkle_root: String,
    pub verification_level: VerificationLevel,
    /// Milliseconds since the Unix epoch
    pub verified_at: i64,
}

/// Whether a stored flag value means "verified".
pub fn is_verified_flag(value: &str) -> bool {
    matches!(value.trim(), "true" | "1")
}

/// Access-control state machine in front of protected content.
pub struct VerificationGate<S: KeyValueStore, P: IdentityProvider> {
    store: S,
    provider: P,
    config: GateConfig,
    state: VerificationState,
    mounted: bool,
}

impl<S: KeyValueStore, P: IdentityProvider> VerificationGate<S, P> {
    pub fn new(store: S, provider: P, config: GateConfig) -> Self {
        Self {
            store,
            provider,
            config,
            state: VerificationState::Checking,
            mounted: false,
        }
    }

    /// Read the persisted flag and settle on `ok` or `need`.
    ///
    /// Only the first call reads storage; later calls return the current
    /// state.
    pub fn mount(&mut self) -> &VerificationState {
        if self.mounted {
            return &self.state;
        }
        self.mounted = true;

        let verified = match self.store.get(VERIFIED_KEY) {
            Ok(value) => value.as_deref().is_some_and(is_verified_flag),
            Err(err) => {
                tracing::warn!(error = %err, "could not read verified flag");
                false
            }
        };
        let next = if verified {
            VerificationState::Ok
        } else {
            VerificationState::Need
        };
        self.transition(next);
        &self.state
    }

    pub fn state(&self) -> &VerificationState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == VerificationState::Ok
    }

    pub fn view(&self) -> GateView<'_> {
        GateView::for_state(&self.state)
    }

    /// Run `content` only when the gate is open.
    pub fn protect<T>(&self, content: impl FnOnce() -> T) -> Option<T> {
        self.is_open().then(content)
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Identity stored by the last successful verification, if readable.
    pub fn identity(&self) -> Option<VerifiedIdentity> {
        let raw = self.store.get(IDENTITY_KEY).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }

    /// User-initiated verification.
    ///
    /// Does nothing unless the gate is in `need` or `error`. Every failure is
    /// captured in the resulting state; none is returned to the caller.
    pub async fn verify(&mut self) -> &VerificationState {
        if !self.state.accepts_verify() {
            tracing::debug!(state = %self.state, "verify ignored in current state");
            return &self.state;
        }

        let request = match self.config.request() {
            Ok(request) => request,
            Err(failure) => {
                self.transition(VerificationState::Error(failure));
                return &self.state;
            }
        };

        if !self.provider.is_installed() {
            self.transition(VerificationState::Unavailable);
            return &self.state;
        }

        self.transition(VerificationState::Verifying);
        let outcome = match self.provider.verify(&request).await {
            Ok(response) => accept(response),
            Err(ProviderError::Failed(reason)) => Err(VerifyFailure::Provider(reason)),
            Err(ProviderError::Malformed(reason)) => Err(VerifyFailure::Malformed(reason)),
        };

        let next = match outcome.and_then(|payload| self.remember(&payload)) {
            Ok(()) => VerificationState::Ok,
            Err(failure) => VerificationState::Error(failure),
        };
        self.transition(next);
        &self.state
    }

    fn remember(&mut self, payload: &VerifyPayload) -> Result<(), VerifyFailure> {
        let identity = VerifiedIdentity {
            nullifier_hash: payload.nullifier_hash.clone(),
            merkle_root: payload.merkle_root.clone(),
            verification_level: payload.verification_level,
            verified_at: now_millis(),
        };
        let encoded = serde_json::to_string(&identity)
            .map_err(|e| VerifyFailure::Storage(e.to_string()))?;
        // The flag commits the verification and must be written last.
        self.store
            .set(IDENTITY_KEY, &encoded)
            .and_then(|_| self.store.set(VERIFIED_KEY, "true"))
            .map_err(|e| VerifyFailure::Storage(e.to_string()))
    }

    fn transition(&mut self, next: VerificationState) {
        match &next {
            VerificationState::Error(failure) => {
                tracing::warn!(from = %self.state, failure = %failure, "verification failed");
            }
            _ => tracing::info!(from = %self.state, to = %next, "gate transition"),
        }
        self.state = next;
    }
}

/// Turn a provider response into a proof payload or a failure.
fn accept(response: VerifyResponse) -> Result<VerifyPayload, VerifyFailure> {
    match response.status {
        VerifyStatus::Error => Err(VerifyFailure::Rejected {
            code: response.error_code,
            details: response.details,
        }),
        VerifyStatus::Success => {
            let payload = response
                .final_payload
                .ok_or_else(|| VerifyFailure::Malformed("missing finalPayload".to_string()))?;
            serde_json::from_value(payload).map_err(|e| VerifyFailure::Malformed(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::storage::MemoryStore;

    /// Provider double returning scripted responses in order.
    struct FakeProvider {
        installed: bool,
        responses: Mutex<VecDeque<Result<VerifyResponse, ProviderError>>>,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn new(installed: bool) -> Self {
            Self {
                installed,
                responses: Mutex::new(VecDeque::new()),
                calls: AtomicUsize::new(0),
            }
        }

        fn then(self, response: Result<VerifyResponse, ProviderError>) -> Self {
            self.responses.lock().unwrap().push_back(response);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IdentityProvider for FakeProvider {
        fn is_installed(&self) -> bool {
            self.installed
        }

        async fn verify(&self, _request: &VerifyRequest) -> Result<VerifyResponse, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::Failed("no scripted response".into())))
        }
    }

    fn payload() -> VerifyPayload {
        VerifyPayload {
            proof: "0xproof".to_string(),
            merkle_root: "0xroot".to_string(),
            nullifier_hash: "0xnullifier".to_string(),
            verification_level: VerificationLevel::Orb,
        }
    }

    fn config() -> GateConfig {
        GateConfig {
            app_id: Some("app_staging_123".to_string()),
            action_id: Some("memo-access".to_string()),
            ..GateConfig::default()
        }
    }

    #[test]
    fn test_starts_checking_and_closed() {
        let gate = VerificationGate::new(MemoryStore::new(), FakeProvider::new(true), config());
        assert_eq!(gate.state(), &VerificationState::Checking);
        assert_eq!(gate.view(), GateView::Progress);
        assert!(gate.protect(|| "notes").is_none());
    }

    #[test]
    fn test_persisted_flag_opens_directly() {
        for flag in ["true", "1"] {
            let store = MemoryStore::new().with(VERIFIED_KEY, flag);
            let mut gate = VerificationGate::new(store, FakeProvider::new(true), config());
            assert_eq!(gate.mount(), &VerificationState::Ok);
            assert_eq!(gate.protect(|| "notes"), Some("notes"));
            assert_eq!(gate.provider().calls(), 0);
        }
    }

    #[test]
    fn test_missing_or_other_flag_needs_verification() {
        let mut gate = VerificationGate::new(MemoryStore::new(), FakeProvider::new(true), config());
        assert_eq!(gate.mount(), &VerificationState::Need);

        let store = MemoryStore::new().with(VERIFIED_KEY, "false");
        let mut gate = VerificationGate::new(store, FakeProvider::new(true), config());
        assert_eq!(gate.mount(), &VerificationState::Need);
        assert_eq!(gate.view(), GateView::Prompt { failure: None });
    }

    #[tokio::test]
    async fn test_not_installed_is_unavailable_without_calls() {
        let mut gate = VerificationGate::new(MemoryStore::new(), FakeProvider::new(false), config());
        gate.mount();

        assert_eq!(gate.verify().await, &VerificationState::Unavailable);
        assert_eq!(gate.view(), GateView::Unavailable);
        assert_eq!(gate.provider().calls(), 0);

        // terminal: no retry path
        assert_eq!(gate.verify().await, &VerificationState::Unavailable);
        assert_eq!(gate.provider().calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_config_fails_before_provider() {
        let provider = FakeProvider::new(true).then(Ok(VerifyResponse::success(&payload())));
        let mut gate = VerificationGate::new(MemoryStore::new(), provider, GateConfig::default());
        gate.mount();

        let state = gate.verify().await.clone();
        assert_eq!(
            state,
            VerificationState::Error(VerifyFailure::Configuration("app_id".to_string()))
        );
        assert_eq!(gate.provider().calls(), 0);

        let blank_action = GateConfig {
            action_id: Some("  ".to_string()),
            ..config()
        };
        assert_eq!(
            blank_action.request(),
            Err(VerifyFailure::Configuration("action_id".to_string()))
        );
    }

    #[tokio::test]
    async fn test_success_persists_flag_and_identity() {
        let provider = FakeProvider::new(true).then(Ok(VerifyResponse::success(&payload())));
        let mut gate = VerificationGate::new(MemoryStore::new(), provider, config());
        gate.mount();

        assert_eq!(gate.verify().await, &VerificationState::Ok);
        assert_eq!(gate.provider().calls(), 1);
        assert_eq!(gate.store.get(VERIFIED_KEY).unwrap().as_deref(), Some("true"));

        let identity = gate.identity().expect("identity stored");
        assert_eq!(identity.nullifier_hash, "0xnullifier");
        assert_eq!(identity.verification_level, VerificationLevel::Orb);

        // ok is terminal
        assert_eq!(gate.verify().await, &VerificationState::Ok);
        assert_eq!(gate.provider().calls(), 1);
    }

    #[tokio::test]
    async fn test_rejection_then_retry_reissues_call() {
        let provider = FakeProvider::new(true)
            .then(Err(ProviderError::Failed("user closed the drawer".into())))
            .then(Ok(VerifyResponse::success(&payload())));
        let mut gate = VerificationGate::new(MemoryStore::new(), provider, config());
        gate.mount();

        let state = gate.verify().await.clone();
        let failure = state.failure().expect("error state");
        assert!(failure.message().contains("user closed the drawer"));
        assert!(matches!(gate.view(), GateView::Prompt { failure: Some(_) }));
        assert!(gate.store.get(VERIFIED_KEY).unwrap().is_none());

        assert_eq!(gate.verify().await, &VerificationState::Ok);
        assert_eq!(gate.provider().calls(), 2);
    }

    #[tokio::test]
    async fn test_error_status_and_malformed_payloads_fail() {
        let provider = FakeProvider::new(true)
            .then(Ok(VerifyResponse::error(
                "verification_rejected",
                Some("declined".into()),
            )))
            .then(Ok(VerifyResponse {
                status: VerifyStatus::Success,
                final_payload: None,
                error_code: None,
                details: None,
            }))
            .then(Ok(VerifyResponse {
                status: VerifyStatus::Success,
                final_payload: Some(serde_json::json!({"proof": "0x1"})),
                error_code: None,
                details: None,
            }));
        let mut gate = VerificationGate::new(MemoryStore::new(), provider, config());
        gate.mount();

        let first = gate.verify().await.clone();
        assert!(matches!(
            first.failure(),
            Some(VerifyFailure::Rejected { code: Some(c), .. }) if c == "verification_rejected"
        ));

        let second = gate.verify().await.clone();
        assert!(matches!(second.failure(), Some(VerifyFailure::Malformed(_))));

        let third = gate.verify().await.clone();
        assert!(matches!(third.failure(), Some(VerifyFailure::Malformed(_))));
        assert_eq!(gate.provider().calls(), 3);
        assert!(!gate.is_open());
    }

    #[tokio::test]
    async fn test_verify_before_mount_is_ignored() {
        let provider = FakeProvider::new(true).then(Ok(VerifyResponse::success(&payload())));
        let mut gate = VerificationGate::new(MemoryStore::new(), provider, config());
        assert_eq!(gate.verify().await, &VerificationState::Checking);
        assert_eq!(gate.provider().calls(), 0);
    }

    /// Store that refuses writes to one key.
    struct FailingStore {
        inner: MemoryStore,
        refuse: &'static str,
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> crate::error::Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> crate::error::Result<()> {
            if key == self.refuse {
                return Err(crate::error::MemoError::Storage("disk full".to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> crate::error::Result<()> {
            self.inner.remove(key)
        }
    }

    #[tokio::test]
    async fn test_identity_write_failure_leaves_gate_locked() {
        let store = FailingStore {
            inner: MemoryStore::new(),
            refuse: IDENTITY_KEY,
        };
        let provider = FakeProvider::new(true).then(Ok(VerifyResponse::success(&payload())));
        let mut gate = VerificationGate::new(store, provider, config());
        gate.mount();

        let state = gate.verify().await.clone();
        assert!(matches!(state.failure(), Some(VerifyFailure::Storage(_))));
        assert!(gate.store.get(VERIFIED_KEY).unwrap().is_none());

        let store = gate.store;
        let mut remounted = VerificationGate::new(store, FakeProvider::new(true), config());
        assert_eq!(remounted.mount(), &VerificationState::Need);
    }

    #[test]
    fn test_mount_reads_flag_only_once() {
        let mut gate = VerificationGate::new(MemoryStore::new(), FakeProvider::new(true), config());
        assert_eq!(gate.mount(), &VerificationState::Need);

        gate.store.set(VERIFIED_KEY, "true").unwrap();
        assert_eq!(gate.mount(), &VerificationState::Need);
        assert!(!gate.is_open());
    }

    #[test]
    fn test_flag_values() {
        assert!(is_verified_flag("true"));
        assert!(is_verified_flag("1"));
        assert!(!is_verified_flag("yes"));
        assert!(!is_verified_flag(""));
    }
}
