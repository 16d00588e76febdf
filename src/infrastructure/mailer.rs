use crate::config::MailConfig;
use crate::domain::ports::{NotificationSender, TemplateKind};
use crate::error::Result;
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

const PAYMENT_SUBJECT: &str = "Payment Successful! ✔";
const PAYMENT_BODY: &str = "<h2>Thank you for your payment.</h2>\
<p>Your funding program checkout has been received and is being processed.</p>";

/// Sends transactional mail over SMTP with service credentials.
///
/// The transport is long-lived and reused across requests; connections are
/// established lazily on send.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .credentials(Credentials::new(
                config.smtp_user.clone(),
                config.smtp_password.clone(),
            ))
            .build();
        let from = config.from_address.parse::<Mailbox>()?;
        Ok(Self { transport, from })
    }
}

#[async_trait]
impl NotificationSender for SmtpNotifier {
    async fn send(&self, to: &str, template: TemplateKind) -> Result<()> {
        let (subject, body) = match template {
            TemplateKind::PaymentConfirmation => (PAYMENT_SUBJECT, PAYMENT_BODY),
        };

        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse::<Mailbox>()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body.to_string())?;

        self.transport.send(message).await?;
        Ok(())
    }
}
