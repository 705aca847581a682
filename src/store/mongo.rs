use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime as BsonDateTime},
    options::IndexOptions,
    Client, Collection, IndexModel,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    ContactRequest, ContactStatus, Credential, Role, Store, StoreError, CONTACT_REQUESTS_TABLE,
    USERS_TABLE,
};

/// Document-database backend. Listing relies on a native sort over the BSON
/// `created_at` date, so documents carry their own timestamp representation
/// instead of the wire-level RFC 3339 string.
pub struct MongoStore {
    contacts: Collection<ContactDocument>,
    users: Collection<CredentialDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContactDocument {
    id: String,
    name: String,
    email: String,
    phone: Option<String>,
    company: Option<String>,
    project_type: String,
    budget: Option<String>,
    timeline: Option<String>,
    description: String,
    created_at: BsonDateTime,
    status: ContactStatus,
}

#[derive(Debug, Serialize, Deserialize)]
struct CredentialDocument {
    id: String,
    email: String,
    password_hash: String,
    role: Role,
    created_at: BsonDateTime,
}

impl MongoStore {
    pub async fn connect(url: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url).await?;
        let db = client.database(database);
        let store = Self {
            contacts: db.collection(CONTACT_REQUESTS_TABLE),
            users: db.collection(USERS_TABLE),
        };
        store.ensure_indexes().await?;
        Ok(store)
    }

    // Credential emails are a unique key; the database enforces it rather
    // than application-level coordination.
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.users.create_index(index).await?;
        Ok(())
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(error: mongodb::error::Error) -> Self {
        StoreError::Backend(error.into())
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn insert_contact(&self, record: &ContactRequest) -> Result<(), StoreError> {
        self.contacts
            .insert_one(ContactDocument::from(record))
            .await?;
        Ok(())
    }

    async fn list_contacts(&self, limit: i64) -> Result<Vec<ContactRequest>, StoreError> {
        let documents: Vec<ContactDocument> = self
            .contacts
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        documents.into_iter().map(ContactRequest::try_from).collect()
    }

    async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Credential>, StoreError> {
        let document = self.users.find_one(doc! { "email": email }).await?;
        document.map(Credential::try_from).transpose()
    }

    async fn insert_credential(&self, credential: &Credential) -> Result<(), StoreError> {
        self.users
            .insert_one(CredentialDocument::from(credential))
            .await?;
        Ok(())
    }
}

impl From<&ContactRequest> for ContactDocument {
    fn from(record: &ContactRequest) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            company: record.company.clone(),
            project_type: record.project_type.clone(),
            budget: record.budget.clone(),
            timeline: record.timeline.clone(),
            description: record.description.clone(),
            created_at: to_bson_datetime(record.created_at),
            status: record.status,
        }
    }
}

impl TryFrom<ContactDocument> for ContactRequest {
    type Error = StoreError;

    fn try_from(document: ContactDocument) -> Result<Self, StoreError> {
        Ok(Self {
            id: parse_id(&document.id)?,
            name: document.name,
            email: document.email,
            phone: document.phone,
            company: document.company,
            project_type: document.project_type,
            budget: document.budget,
            timeline: document.timeline,
            description: document.description,
            created_at: from_bson_datetime(document.created_at)?,
            status: document.status,
        })
    }
}

impl From<&Credential> for CredentialDocument {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id.to_string(),
            email: credential.email.clone(),
            password_hash: credential.password_hash.clone(),
            role: credential.role,
            created_at: to_bson_datetime(credential.created_at),
        }
    }
}

impl TryFrom<CredentialDocument> for Credential {
    type Error = StoreError;

    fn try_from(document: CredentialDocument) -> Result<Self, StoreError> {
        Ok(Self {
            id: parse_id(&document.id)?,
            email: document.email,
            password_hash: document.password_hash,
            role: document.role,
            created_at: from_bson_datetime(document.created_at)?,
        })
    }
}

fn parse_id(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw).map_err(|e| StoreError::Corrupt(e.into()))
}

// BSON dates are millisecond-precision; sub-millisecond detail is dropped
// on the way in.
fn to_bson_datetime(timestamp: OffsetDateTime) -> BsonDateTime {
    BsonDateTime::from_millis((timestamp.unix_timestamp_nanos() / 1_000_000) as i64)
}

fn from_bson_datetime(timestamp: BsonDateTime) -> Result<OffsetDateTime, StoreError> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(timestamp.timestamp_millis()) * 1_000_000)
        .map_err(|e| StoreError::Corrupt(e.into()))
}
