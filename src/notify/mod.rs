use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{error, info};

use crate::config::SmtpConfig;
use crate::store::ContactRequest;

pub mod template;

/// Outbound mail channel: takes a rendered subject and HTML body, delivers
/// them to the configured recipient.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, subject: &str, html_body: &str) -> anyhow::Result<()>;
}

/// SMTP mailer over STARTTLS. The connection is opened per send; intake
/// volume is a handful of messages a day, not a queue.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, subject: &str, html_body: &str) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(self.config.username.parse()?)
            .to(self.config.recipient.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_owned())?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .build();

        transport.send(message).await?;
        Ok(())
    }
}

/// Renders and dispatches the new-request notification. Best-effort: every
/// failure is logged and reported as `false`, never raised to the caller.
pub async fn notify_new_request(mailer: &dyn Mailer, record: &ContactRequest) -> bool {
    let subject = format!("Nueva Solicitud de Web - {}", record.name);
    let body = template::render_notification(record);
    match mailer.send(&subject, &body).await {
        Ok(()) => {
            info!(id = %record.id, "notification sent");
            true
        }
        Err(e) => {
            error!(error = %e, id = %record.id, "notification failed");
            false
        }
    }
}
