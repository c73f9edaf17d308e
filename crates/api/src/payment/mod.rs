//! Payment gateway integration.
//!
//! Creates gateway orders over HTTP and verifies payment signatures locally
//! with HMAC-SHA256. The gateway is optional: when credentials are not
//! configured the API runs with payment endpoints returning 503.

mod client;

pub use client::{GatewayOrder, PaymentClient};

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Default base URL of the payment gateway REST API.
const DEFAULT_GATEWAY_BASE_URL: &str = "https://api.razorpay.com";

/// Payment gateway credentials and endpoint configuration.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Public API key id, used as the HTTP basic-auth username.
    pub key_id: String,
    /// Secret API key, used for basic auth and signature verification.
    pub key_secret: String,
    /// Gateway REST API base URL.
    pub base_url: String,
}

impl PaymentConfig {
    /// Load payment configuration from environment variables.
    ///
    /// Returns `None` when `PAYMENT_KEY_ID` or `PAYMENT_KEY_SECRET` is unset,
    /// in which case payment endpoints are disabled.
    ///
    /// | Env Var              | Required | Default                    |
    /// |----------------------|----------|----------------------------|
    /// | `PAYMENT_KEY_ID`     | yes      | --                         |
    /// | `PAYMENT_KEY_SECRET` | yes      | --                         |
    /// | `PAYMENT_BASE_URL`   | no       | `https://api.razorpay.com` |
    pub fn from_env() -> Option<Self> {
        let key_id = std::env::var("PAYMENT_KEY_ID").ok()?;
        let key_secret = std::env::var("PAYMENT_KEY_SECRET").ok()?;
        let base_url = std::env::var("PAYMENT_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GATEWAY_BASE_URL.to_string());
        Some(Self {
            key_id,
            key_secret,
            base_url,
        })
    }
}

type HmacSha256 = Hmac<Sha256>;

/// Verify a payment signature returned by the gateway checkout.
///
/// The gateway signs the string `"{gateway_order_id}|{gateway_payment_id}"`
/// with HMAC-SHA256 using the key secret; the signature is hex-encoded.
pub fn verify_payment_signature(
    gateway_order_id: &str,
    gateway_payment_id: &str,
    signature: &str,
    key_secret: &str,
) -> bool {
    let payload = format!("{gateway_order_id}|{gateway_payment_id}");
    let Ok(mut mac) = HmacSha256::new_from_slice(key_secret.as_bytes()) else {
        return false;
    };
    mac.update(payload.as_bytes());
    let expected = hex_encode(&mac.finalize().into_bytes());
    expected == signature
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
