//! Transactional email delivery via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport to send the
//! three customer-facing notices: order confirmation, payment receipt, and
//! delivery notice. Configuration is loaded from environment variables; if
//! `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns `None` and no
//! mailer should be constructed.

use sagedo_core::events::{
    EVENT_ORDER_CREATED, EVENT_ORDER_STATUS_CHANGED, EVENT_PAYMENT_CAPTURED,
};

use crate::bus::PlatformEvent;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@sagedo.in";

/// Configuration for the SMTP email delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable        | Required | Default              |
    /// |-----------------|----------|----------------------|
    /// | `SMTP_HOST`     | yes      | --                   |
    /// | `SMTP_PORT`     | no       | `587`                |
    /// | `SMTP_FROM`     | no       | `noreply@sagedo.in`  |
    /// | `SMTP_USER`     | no       | --                   |
    /// | `SMTP_PASSWORD` | no       | --                   |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends customer notices for order lifecycle events via SMTP.
pub struct EmailDelivery {
    config: EmailConfig,
}

impl EmailDelivery {
    /// Create a new email delivery service with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Run the delivery loop.
    ///
    /// Subscribes to the event bus via `receiver` and sends a notice for
    /// every event that warrants one. The loop exits when the channel is
    /// closed (i.e. the [`EventBus`](crate::bus::EventBus) is dropped).
    pub async fn run(
        self,
        mut receiver: tokio::sync::broadcast::Receiver<PlatformEvent>,
    ) {
        use tokio::sync::broadcast::error::RecvError;

        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.handle(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to send notice email"
                        );
                    }
                }
                Err(RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Email delivery lagged");
                }
                Err(RecvError::Closed) => {
                    tracing::info!("Event bus closed, email delivery shutting down");
                    break;
                }
            }
        }
    }

    /// Send the notice for an order lifecycle event, if it warrants one.
    ///
    /// The recipient and order details are read from the event payload
    /// (`customer_email`, `service_name`, `amount`, `status`). Returns
    /// `Ok(false)` when the event kind is not emailed or the payload
    /// carries no customer email.
    pub async fn handle(&self, event: &PlatformEvent) -> Result<bool, EmailError> {
        let Some(to_email) = event.payload.get("customer_email").and_then(|v| v.as_str()) else {
            return Ok(false);
        };
        let order_id = event.source_entity_id.unwrap_or_default();
        let service_name = event
            .payload
            .get("service_name")
            .and_then(|v| v.as_str())
            .unwrap_or("your order");

        let (subject, body) = match event.event_type.as_str() {
            EVENT_ORDER_CREATED => (
                format!("Order #{order_id} received - SAGE DO"),
                format!(
                    "Thank you for your order!\n\n\
                     Service: {service_name}\n\
                     Order ID: #{order_id}\n\n\
                     We have started reviewing your requirements and will be in\n\
                     touch shortly."
                ),
            ),
            EVENT_PAYMENT_CAPTURED => {
                let amount = event
                    .payload
                    .get("amount")
                    .and_then(|v| v.as_i64())
                    .unwrap_or(0);
                (
                    format!("Payment received for order #{order_id} - SAGE DO"),
                    format!(
                        "We have received your payment of ₹{amount}.\n\n\
                         Service: {service_name}\n\
                         Order ID: #{order_id}\n\n\
                         Your order is now being processed."
                    ),
                )
            }
            EVENT_ORDER_STATUS_CHANGED => {
                let status = event
                    .payload
                    .get("status")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                if status != "delivered" {
                    // Intermediate status changes go out over WebSocket only.
                    return Ok(false);
                }
                (
                    format!("Order #{order_id} delivered - SAGE DO"),
                    format!(
                        "Good news! Your order has been delivered!\n\n\
                         Service: {service_name}\n\
                         Order ID: #{order_id}\n\n\
                         Log in to your dashboard to review the delivery."
                    ),
                )
            }
            _ => return Ok(false),
        };

        self.send(to_email, &subject, &body).await?;
        Ok(true)
    }

    /// Send a plain-text email over the configured SMTP transport.
    async fn send(&self, to_email: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(password)) = (&self.config.smtp_user, &self.config.smtp_password)
        {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        let mailer = builder.build();
        mailer.send(email).await?;

        tracing::info!(to = %to_email, subject = %subject, "Notice email sent");
        Ok(())
    }
}
