use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use super::{
    ContactRequest, Credential, Store, StoreError, CONTACT_REQUESTS_TABLE, USERS_TABLE,
};

/// REST backend speaking the Supabase PostgREST dialect. Every operation is
/// one outbound HTTP call; the `apikey` and bearer headers ride on the
/// shared client. Timestamps cross the wire as RFC 3339 strings since the
/// transport has no native temporal type.
pub struct SupabaseStore {
    http: reqwest::Client,
    base_url: String,
}

impl SupabaseStore {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key).map_err(|e| StoreError::Backend(e.into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| StoreError::Backend(e.into()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn check_status(response: &reqwest::Response) -> Result<(), StoreError> {
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(error: reqwest::Error) -> Self {
        StoreError::Backend(error.into())
    }
}

#[async_trait]
impl Store for SupabaseStore {
    async fn insert_contact(&self, record: &ContactRequest) -> Result<(), StoreError> {
        let response = self
            .http
            .post(self.table_url(CONTACT_REQUESTS_TABLE))
            .json(record)
            .send()
            .await?;
        Self::check_status(&response)
    }

    async fn list_contacts(&self, limit: i64) -> Result<Vec<ContactRequest>, StoreError> {
        let limit = limit.to_string();
        let response = self
            .http
            .get(self.table_url(CONTACT_REQUESTS_TABLE))
            .query(&[("order", "created_at.desc"), ("limit", limit.as_str())])
            .send()
            .await?;
        Self::check_status(&response)?;
        Ok(response.json().await?)
    }

    async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Credential>, StoreError> {
        let filter = format!("eq.{email}");
        let response = self
            .http
            .get(self.table_url(USERS_TABLE))
            .query(&[("email", filter.as_str()), ("limit", "1")])
            .send()
            .await?;
        Self::check_status(&response)?;
        let mut rows: Vec<Credential> = response.json().await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }

    async fn insert_credential(&self, credential: &Credential) -> Result<(), StoreError> {
        let response = self
            .http
            .post(self.table_url(USERS_TABLE))
            .json(credential)
            .send()
            .await?;
        Self::check_status(&response)
    }
}
