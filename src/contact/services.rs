use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::contact::dto::ContactRequestCreate;
use crate::error::ApiError;
use crate::notify;
use crate::state::AppState;
use crate::store::{ContactRequest, ContactStatus};

/// Fixed cap on the listing endpoint.
pub const LIST_LIMIT: i64 = 100;

#[derive(Debug)]
pub struct SubmitOutcome {
    pub id: Uuid,
}

/// Intake pipeline: validate, persist, then notify. Validation failures stop
/// everything; a persistence failure aborts the operation; a notification
/// failure is logged and the stored record stands.
pub async fn submit(
    state: &AppState,
    input: ContactRequestCreate,
) -> Result<SubmitOutcome, ApiError> {
    let input = input.validate()?;

    let record = ContactRequest {
        id: Uuid::new_v4(),
        name: input.name,
        email: input.email,
        phone: input.phone,
        company: input.company,
        project_type: input.project_type,
        budget: input.budget,
        timeline: input.timeline,
        description: input.description,
        created_at: OffsetDateTime::now_utc(),
        status: ContactStatus::Pending,
    };

    state.store.insert_contact(&record).await?;
    info!(id = %record.id, "contact request stored");

    if !notify::notify_new_request(state.mailer.as_ref(), &record).await {
        warn!(id = %record.id, "notification not delivered for stored request");
    }

    Ok(SubmitOutcome { id: record.id })
}

pub async fn list(state: &AppState) -> Result<Vec<ContactRequest>, ApiError> {
    Ok(state.store.list_contacts(LIST_LIMIT).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Mailer;
    use crate::store::memory::MemoryStore;
    use crate::store::{Credential, Store, StoreError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use time::Duration;

    struct CountingMailer {
        sent: AtomicUsize,
        fail: bool,
    }

    impl CountingMailer {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                sent: AtomicUsize::new(0),
                fail,
            })
        }

        fn sent(&self) -> usize {
            self.sent.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Mailer for CountingMailer {
        async fn send(&self, _subject: &str, _html_body: &str) -> anyhow::Result<()> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("smtp unavailable");
            }
            Ok(())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl Store for FailingStore {
        async fn insert_contact(&self, _record: &ContactRequest) -> Result<(), StoreError> {
            Err(StoreError::Rejected { status: 503 })
        }
        async fn list_contacts(&self, _limit: i64) -> Result<Vec<ContactRequest>, StoreError> {
            Err(StoreError::Rejected { status: 503 })
        }
        async fn find_credential_by_email(
            &self,
            _email: &str,
        ) -> Result<Option<Credential>, StoreError> {
            Ok(None)
        }
        async fn insert_credential(&self, _credential: &Credential) -> Result<(), StoreError> {
            Err(StoreError::Rejected { status: 503 })
        }
    }

    fn valid_input() -> ContactRequestCreate {
        ContactRequestCreate {
            name: "  Ana Gomez  ".into(),
            email: "ana@x.com".into(),
            phone: None,
            company: None,
            project_type: "landing-page".into(),
            budget: None,
            timeline: None,
            description: "Necesito una landing page para mi negocio".into(),
        }
    }

    fn state_with(store: Arc<MemoryStore>, mailer: Arc<CountingMailer>) -> AppState {
        let mut state = AppState::fake();
        state.store = store;
        state.mailer = mailer;
        state
    }

    #[tokio::test]
    async fn submit_persists_one_trimmed_record_and_returns_its_id() {
        let store = Arc::new(MemoryStore::new());
        let mailer = CountingMailer::new(false);
        let state = state_with(store.clone(), mailer.clone());

        let outcome = submit(&state, valid_input()).await.expect("submit");

        let stored = store.contacts();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, outcome.id);
        assert_eq!(stored[0].name, "Ana Gomez");
        assert_eq!(stored[0].email, "ana@x.com");
        assert_eq!(stored[0].project_type, "landing-page");
        assert_eq!(stored[0].status, ContactStatus::Pending);
        assert_eq!(mailer.sent(), 1);
    }

    #[tokio::test]
    async fn invalid_input_touches_neither_store_nor_mailer() {
        let store = Arc::new(MemoryStore::new());
        let mailer = CountingMailer::new(false);
        let state = state_with(store.clone(), mailer.clone());

        let mut input = valid_input();
        input.name = "A".into();
        input.description = "corto".into();

        let err = submit(&state, input).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(store.contacts().is_empty());
        assert_eq!(mailer.sent(), 0);
    }

    #[tokio::test]
    async fn notification_failure_does_not_undo_the_stored_record() {
        let store = Arc::new(MemoryStore::new());
        let mailer = CountingMailer::new(true);
        let state = state_with(store.clone(), mailer.clone());

        let outcome = submit(&state, valid_input()).await.expect("submit");
        assert_eq!(store.contacts().len(), 1);
        assert_eq!(store.contacts()[0].id, outcome.id);
        assert_eq!(mailer.sent(), 1);
    }

    #[tokio::test]
    async fn persistence_failure_aborts_before_notification() {
        let mailer = CountingMailer::new(false);
        let mut state = AppState::fake();
        state.store = Arc::new(FailingStore);
        state.mailer = mailer.clone();

        let err = submit(&state, valid_input()).await.unwrap_err();
        assert!(matches!(err, ApiError::Storage(_)));
        assert_eq!(mailer.sent(), 0);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let store = Arc::new(MemoryStore::new());
        let mailer = CountingMailer::new(false);
        let state = state_with(store.clone(), mailer);

        let base = OffsetDateTime::now_utc();
        for offset in [5i64, 1, 3] {
            let record = ContactRequest {
                id: Uuid::new_v4(),
                name: "Ana Gomez".into(),
                email: "ana@x.com".into(),
                phone: None,
                company: None,
                project_type: "landing-page".into(),
                budget: None,
                timeline: None,
                description: "Necesito una landing page para mi negocio".into(),
                created_at: base - Duration::seconds(offset),
                status: ContactStatus::Pending,
            };
            store.insert_contact(&record).await.expect("insert");
        }

        let listed = list(&state).await.expect("list");
        assert_eq!(listed.len(), 3);
        assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }
}
