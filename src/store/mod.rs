use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

pub mod memory;
pub mod mongo;
pub mod supabase;

pub const USERS_TABLE: &str = "users";
pub const CONTACT_REQUESTS_TABLE: &str = "contact_requests";

/// Workflow state of a contact request. New submissions always start as
/// `Pending`; the later states are set by the dashboard, not by intake.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ContactStatus {
    Pending,
    InProgress,
    Completed,
}

/// A stored contact-form submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactRequest {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub project_type: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub status: ContactStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
}

/// An admin credential. The password is only ever stored as an argon2
/// PHC hash string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend request failed: {0}")]
    Backend(#[source] anyhow::Error),
    #[error("storage backend rejected the operation (status {status})")]
    Rejected { status: u16 },
    #[error("stored record is malformed: {0}")]
    Corrupt(#[source] anyhow::Error),
}

/// Persistence capability set shared by every backend. `AppState` holds one
/// of these behind an `Arc`, so either backend (or a test double) can be
/// plugged in at startup.
#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts a contact request. Either the record is retrievable afterward
    /// or an error is returned; there is no partial success.
    async fn insert_contact(&self, record: &ContactRequest) -> Result<(), StoreError>;

    /// Returns contact requests ordered by `created_at` descending, capped
    /// at `limit`.
    async fn list_contacts(&self, limit: i64) -> Result<Vec<ContactRequest>, StoreError>;

    async fn find_credential_by_email(&self, email: &str)
        -> Result<Option<Credential>, StoreError>;

    /// Inserts a credential. Email uniqueness is enforced by the backend.
    async fn insert_credential(&self, credential: &Credential) -> Result<(), StoreError>;
}
