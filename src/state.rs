use std::sync::Arc;

use crate::config::{AppConfig, StoreConfig};
use crate::notify::{Mailer, SmtpMailer};
use crate::store::{mongo::MongoStore, supabase::SupabaseStore, Store};

/// Shared application state: the selected store backend and the mail channel
/// behind trait objects, so either real adapter or a test double can be
/// injected.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub mailer: Arc<dyn Mailer>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store: Arc<dyn Store> = match &config.store {
            StoreConfig::Mongo { url, database } => {
                Arc::new(MongoStore::connect(url, database).await?)
            }
            StoreConfig::Supabase { url, api_key } => Arc::new(SupabaseStore::new(url, api_key)?),
        };

        let mailer = Arc::new(SmtpMailer::new(config.smtp.clone())) as Arc<dyn Mailer>;

        Ok(Self {
            store,
            mailer,
            config,
        })
    }

    pub fn from_parts(
        store: Arc<dyn Store>,
        mailer: Arc<dyn Mailer>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            store,
            mailer,
            config,
        }
    }

    pub fn fake() -> Self {
        use crate::config::{JwtConfig, SmtpConfig};
        use crate::store::memory::MemoryStore;
        use async_trait::async_trait;

        struct NullMailer;

        #[async_trait]
        impl Mailer for NullMailer {
            async fn send(&self, _subject: &str, _html_body: &str) -> anyhow::Result<()> {
                Ok(())
            }
        }

        let config = Arc::new(AppConfig {
            store: StoreConfig::Mongo {
                url: "mongodb://localhost:27017".into(),
                database: "lsweb-test".into(),
            },
            jwt: JwtConfig {
                secret: "test-secret".into(),
                ttl_hours: 24,
            },
            smtp: SmtpConfig {
                host: "localhost".into(),
                port: 587,
                username: String::new(),
                password: String::new(),
                recipient: String::new(),
            },
        });

        Self {
            store: Arc::new(MemoryStore::new()),
            mailer: Arc::new(NullMailer),
            config,
        }
    }
}
