use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub recipient: String,
}

/// Which persistence backend to run against. Exactly one is active per
/// deployment.
#[derive(Debug, Clone, Deserialize)]
pub enum StoreConfig {
    Mongo { url: String, database: String },
    Supabase { url: String, api_key: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub jwt: JwtConfig,
    pub smtp: SmtpConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let store = match std::env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "mongo".into())
            .as_str()
        {
            "mongo" => StoreConfig::Mongo {
                url: std::env::var("MONGO_URL")?,
                database: std::env::var("DB_NAME").unwrap_or_else(|_| "lsweb".into()),
            },
            "supabase" => StoreConfig::Supabase {
                url: std::env::var("SUPABASE_URL")?,
                api_key: std::env::var("SUPABASE_KEY")?,
            },
            other => anyhow::bail!("unknown STORE_BACKEND: {other}"),
        };

        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            ttl_hours: std::env::var("JWT_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(24),
        };

        let smtp = SmtpConfig {
            host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".into()),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(587),
            username: std::env::var("SMTP_USER").unwrap_or_default(),
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            recipient: std::env::var("EMAIL_TO").unwrap_or_default(),
        };

        Ok(Self { store, jwt, smtp })
    }
}
