use std::sync::Mutex;

use async_trait::async_trait;

use super::{ContactRequest, Credential, Store, StoreError};

/// In-process [`Store`] backed by plain vectors. Satisfies the same contract
/// as the real backends (descending order, cap, unique credential emails)
/// and exposes its contents for assertions in unit tests.
#[derive(Default)]
pub struct MemoryStore {
    contacts: Mutex<Vec<ContactRequest>>,
    credentials: Mutex<Vec<Credential>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contacts(&self) -> Vec<ContactRequest> {
        self.contacts.lock().unwrap().clone()
    }

    pub fn credentials(&self) -> Vec<Credential> {
        self.credentials.lock().unwrap().clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_contact(&self, record: &ContactRequest) -> Result<(), StoreError> {
        let mut rows = self.contacts.lock().unwrap();
        if rows.iter().any(|r| r.id == record.id) {
            return Err(StoreError::Rejected { status: 409 });
        }
        rows.push(record.clone());
        Ok(())
    }

    async fn list_contacts(&self, limit: i64) -> Result<Vec<ContactRequest>, StoreError> {
        let mut rows = self.contacts.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Credential>, StoreError> {
        let rows = self.credentials.lock().unwrap();
        Ok(rows.iter().find(|c| c.email == email).cloned())
    }

    async fn insert_credential(&self, credential: &Credential) -> Result<(), StoreError> {
        let mut rows = self.credentials.lock().unwrap();
        if rows.iter().any(|c| c.email == credential.email) {
            return Err(StoreError::Rejected { status: 409 });
        }
        rows.push(credential.clone());
        Ok(())
    }
}
