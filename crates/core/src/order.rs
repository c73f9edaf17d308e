//! Order lifecycle and payment status state machines.
//!
//! The string values must match the CHECK constraints in
//! `20260301000003_create_orders_table.sql`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Order fulfilment status.
///
/// Orders only ever move forward: pending → processing → finalizing →
/// delivered. Skipping ahead is allowed (an admin may deliver straight
/// from pending); moving backwards is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Finalizing,
    Delivered,
}

impl OrderStatus {
    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Finalizing => "finalizing",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Parse the database representation.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "finalizing" => Ok(OrderStatus::Finalizing),
            "delivered" => Ok(OrderStatus::Delivered),
            other => Err(CoreError::Validation(format!(
                "Unknown order status '{other}'"
            ))),
        }
    }

    /// Whether moving from `self` to `next` is a legal forward transition.
    ///
    /// Repeating the current status is not a transition and is rejected,
    /// as is any move backwards. Delivered is terminal.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        self < next
    }
}

/// External payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }

    /// Parse the database representation.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(CoreError::Validation(format!(
                "Unknown payment status '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_allowed() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Pending.can_transition_to(Delivered));
        assert!(Processing.can_transition_to(Finalizing));
        assert!(Finalizing.can_transition_to(Delivered));
    }

    #[test]
    fn test_backward_and_identity_transitions_rejected() {
        use OrderStatus::*;
        assert!(!Delivered.can_transition_to(Pending));
        assert!(!Finalizing.can_transition_to(Processing));
        assert!(!Processing.can_transition_to(Processing));
        assert!(!Delivered.can_transition_to(Delivered));
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Finalizing,
            OrderStatus::Delivered,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(OrderStatus::parse("shipped").is_err());
    }

    #[test]
    fn test_payment_status_parse() {
        assert_eq!(
            PaymentStatus::parse("paid").unwrap(),
            PaymentStatus::Paid
        );
        assert!(PaymentStatus::parse("refunded").is_err());
    }
}
