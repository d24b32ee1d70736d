use crate::generator::Generator;
use async_trait::async_trait;
use codemint_core::{
    Code, CodeIssuer, CodeRecord, CodeStore, CreationRequest, IssueError, StoreError,
};
use jiff::Timestamp;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maximum candidate/insert cycles before a `create` call gives up.
///
/// A safety valve against a systematically exhausted or corrupted key space,
/// not an expected outcome: at the default length the candidate space is
/// 36^8, so five consecutive collisions under normal load do not happen by
/// chance.
pub const ATTEMPT_LIMIT: u32 = 5;

/// A concrete implementation of the [`CodeIssuer`] trait.
///
/// The service wraps a [`CodeStore`] and a [`Generator`] and negotiates
/// uniqueness with the store: generate a candidate, attempt a conditional
/// insert, retry on conflict with a fresh candidate. The store's atomic
/// insert is the only uniqueness mechanism; the service holds no lock and
/// keeps no state between calls, so concurrent `create` calls are
/// independent.
#[derive(Debug, Clone)]
pub struct IssuerService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
}

impl<S: CodeStore, G: Generator> IssuerService<S, G> {
    /// Creates a new `IssuerService` over the given store and generator.
    pub fn new(store: S, generator: G) -> Self {
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
        }
    }
}

#[async_trait]
impl<S: CodeStore, G: Generator> CodeIssuer for IssuerService<S, G> {
    async fn create(&self, request: CreationRequest) -> Result<Code, IssueError> {
        // One timestamp per logical request; retried attempts share it.
        let created_on = Timestamp::now();
        let record = CodeRecord::from_request(&request, created_on);

        for attempt in 1..=ATTEMPT_LIMIT {
            debug!(attempt, limit = ATTEMPT_LIMIT, "creating unique code");

            let candidate = self.generator.generate(request.length)?;

            // Attempts are strictly sequential: a conflict must be observed
            // before the next candidate is generated, so at most one write is
            // in flight per request.
            match self.store.put_if_absent(&candidate, record.clone()).await {
                Ok(()) => {
                    debug!(
                        code = %candidate,
                        attempt,
                        limit = ATTEMPT_LIMIT,
                        "unique code created"
                    );
                    return Ok(candidate);
                }
                Err(StoreError::Conflict(_)) => {
                    warn!(attempt, limit = ATTEMPT_LIMIT, "candidate code already exists");
                }
                Err(err) => return Err(IssueError::Store(err)),
            }
        }

        Err(IssueError::Exhausted {
            attempts: ATTEMPT_LIMIT,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::random::RandomGenerator;
    use codemint_core::CodeError;
    use codemint_storage::InMemoryStore;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Store that rejects the first `conflicts` inserts as taken, then
    /// accepts. Clones share counters and captured records.
    #[derive(Clone, Default)]
    struct ScriptedStore {
        conflicts: u32,
        calls: Arc<AtomicU32>,
        offered: Arc<Mutex<Vec<CodeRecord>>>,
        accepted: Arc<Mutex<Vec<(Code, CodeRecord)>>>,
    }

    impl ScriptedStore {
        fn conflicting(conflicts: u32) -> Self {
            Self {
                conflicts,
                ..Self::default()
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }

        fn offered(&self) -> Vec<CodeRecord> {
            self.offered.lock().unwrap().clone()
        }

        fn accepted(&self) -> Vec<(Code, CodeRecord)> {
            self.accepted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CodeStore for ScriptedStore {
        async fn put_if_absent(
            &self,
            code: &Code,
            record: CodeRecord,
        ) -> Result<(), StoreError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.offered.lock().unwrap().push(record.clone());

            if call < self.conflicts {
                return Err(StoreError::Conflict(code.as_str().to_owned()));
            }

            self.accepted.lock().unwrap().push((code.clone(), record));
            Ok(())
        }
    }

    /// Store whose every insert fails with a transport error.
    #[derive(Clone, Default)]
    struct UnavailableStore {
        calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl CodeStore for UnavailableStore {
        async fn put_if_absent(
            &self,
            _code: &Code,
            _record: CodeRecord,
        ) -> Result<(), StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    /// Counts generator calls, delegating to [`RandomGenerator`].
    #[derive(Clone, Default)]
    struct CountingGenerator {
        inner: RandomGenerator,
        calls: Arc<AtomicU32>,
    }

    impl CountingGenerator {
        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Generator for CountingGenerator {
        fn generate(&self, length: usize) -> Result<Code, CodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.generate(length)
        }
    }

    #[tokio::test]
    async fn first_attempt_wins_without_retry() {
        let store = ScriptedStore::conflicting(0);
        let generator = CountingGenerator::default();
        let service = IssuerService::new(store.clone(), generator.clone());

        let code = service.create(CreationRequest::default()).await.unwrap();

        assert_eq!(code.as_str().len(), 8);
        assert_eq!(store.calls(), 1);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn retries_until_first_accepted_candidate() {
        let store = ScriptedStore::conflicting(3);
        let generator = CountingGenerator::default();
        let service = IssuerService::new(store.clone(), generator.clone());

        let code = service.create(CreationRequest::default()).await.unwrap();

        assert_eq!(store.calls(), 4);
        assert_eq!(generator.calls(), 4);

        let accepted = store.accepted();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].0, code);
    }

    #[tokio::test]
    async fn exhausts_after_five_collisions() {
        let store = ScriptedStore::conflicting(ATTEMPT_LIMIT);
        let generator = CountingGenerator::default();
        let service = IssuerService::new(store.clone(), generator.clone());

        let err = service
            .create(CreationRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, IssueError::Exhausted { attempts: 5 }));
        assert_eq!(store.calls(), 5);
        assert_eq!(generator.calls(), 5);
        assert!(store.accepted().is_empty());
    }

    #[tokio::test]
    async fn all_attempts_share_one_timestamp() {
        let store = ScriptedStore::conflicting(4);
        let service = IssuerService::new(store.clone(), RandomGenerator::new());

        service.create(CreationRequest::default()).await.unwrap();

        let offered = store.offered();
        assert_eq!(offered.len(), 5);
        assert!(offered
            .iter()
            .all(|record| record.created_on == offered[0].created_on));
    }

    #[tokio::test]
    async fn invalid_length_reaches_no_store() {
        for length in [0, 257] {
            let store = ScriptedStore::conflicting(0);
            let generator = CountingGenerator::default();
            let service = IssuerService::new(store.clone(), generator.clone());

            let err = service
                .create(CreationRequest::with_length(length))
                .await
                .unwrap_err();

            assert!(matches!(err, IssueError::InvalidCode(_)));
            assert_eq!(store.calls(), 0);
        }
    }

    #[tokio::test]
    async fn transport_error_aborts_immediately() {
        let store = UnavailableStore::default();
        let generator = CountingGenerator::default();
        let service = IssuerService::new(store.clone(), generator.clone());

        let err = service
            .create(CreationRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            IssueError::Store(StoreError::Unavailable(_))
        ));
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn blank_request_persists_bare_record() {
        let store = InMemoryStore::new();
        let service = IssuerService::new(store.clone(), RandomGenerator::new());

        let code = service.create(CreationRequest::default()).await.unwrap();

        let record = store.get(&code).unwrap();
        assert!(record.used_by.is_none());
        assert!(record.reference.is_none());
        assert!(record.description.is_none());
    }

    #[tokio::test]
    async fn populated_request_persists_all_attributes() {
        let store = InMemoryStore::new();
        let service = IssuerService::new(store.clone(), RandomGenerator::new());

        let request = CreationRequest {
            length: 12,
            used_by: Some("checkout".to_string()),
            reference: Some("order-4821".to_string()),
            description: Some("gift voucher".to_string()),
        };

        let code = service.create(request).await.unwrap();
        assert_eq!(code.as_str().len(), 12);

        let record = store.get(&code).unwrap();
        assert_eq!(record.used_by.as_deref(), Some("checkout"));
        assert_eq!(record.reference.as_deref(), Some("order-4821"));
        assert_eq!(record.description.as_deref(), Some("gift voucher"));
    }

    #[tokio::test]
    async fn concurrent_creates_issue_distinct_codes() {
        let store = InMemoryStore::new();
        let service = Arc::new(IssuerService::new(store.clone(), RandomGenerator::new()));

        let mut handles = Vec::new();
        for _ in 0..50 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service.create(CreationRequest::default()).await.unwrap()
            }));
        }

        let mut codes = std::collections::HashSet::new();
        for handle in handles {
            codes.insert(handle.await.unwrap().as_str().to_owned());
        }

        assert_eq!(codes.len(), 50);
        assert_eq!(store.len(), 50);
    }
}
