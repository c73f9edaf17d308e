//! HTTP client for the payment gateway's order API.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::PaymentConfig;

/// A gateway-side order, created before presenting the checkout to the client.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    /// Gateway-assigned order id (e.g. `order_Nxq...`).
    pub id: String,
    /// Amount in the smallest currency unit (paise).
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
    /// Our receipt reference, set to the internal order id.
    pub receipt: Option<String>,
    /// Gateway order status (e.g. `created`).
    pub status: String,
}

#[derive(Debug, Serialize)]
struct CreateGatewayOrderRequest {
    amount: i64,
    currency: &'static str,
    receipt: String,
}

/// Client for creating orders on the payment gateway.
pub struct PaymentClient {
    config: PaymentConfig,
    http: reqwest::Client,
}

impl PaymentClient {
    pub fn new(config: PaymentConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// The public key id, needed by the frontend checkout widget.
    pub fn key_id(&self) -> &str {
        &self.config.key_id
    }

    /// The secret key, used to verify checkout signatures.
    pub fn key_secret(&self) -> &str {
        &self.config.key_secret
    }

    /// Create a gateway order for the given rupee amount.
    ///
    /// The gateway expects amounts in paise, so `amount_rupees` is multiplied
    /// by 100. `receipt` is our internal order id, echoed back by the gateway.
    pub async fn create_order(
        &self,
        amount_rupees: i64,
        receipt: String,
    ) -> Result<GatewayOrder, AppError> {
        let url = format!("{}/v1/orders", self.config.base_url);
        let body = CreateGatewayOrderRequest {
            amount: amount_rupees * 100,
            currency: "INR",
            receipt,
        };

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::InternalError(format!("Payment gateway request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %text, "Payment gateway returned an error");
            return Err(AppError::InternalError(format!(
                "Payment gateway returned status {status}"
            )));
        }

        response
            .json::<GatewayOrder>()
            .await
            .map_err(|e| AppError::InternalError(format!("Invalid gateway response: {e}")))
    }
}
