use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::auth::services::hash_password;
use crate::error::ApiError;
use crate::store::{Credential, Role, Store};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@lsweb.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Makes sure the default admin credential exists. Returns `true` when a
/// new credential was created. An existing record is never overwritten, so
/// running this any number of times leaves exactly one admin.
pub async fn ensure_default_admin(store: &dyn Store) -> Result<bool, ApiError> {
    if store
        .find_credential_by_email(DEFAULT_ADMIN_EMAIL)
        .await?
        .is_some()
    {
        return Ok(false);
    }

    let credential = Credential {
        id: Uuid::new_v4(),
        email: DEFAULT_ADMIN_EMAIL.to_owned(),
        password_hash: hash_password(DEFAULT_ADMIN_PASSWORD)?,
        role: Role::Admin,
        created_at: OffsetDateTime::now_utc(),
    };
    store.insert_credential(&credential).await?;
    info!(email = DEFAULT_ADMIN_EMAIL, "default admin credential created");
    Ok(true)
}
