//! Well-known platform event name constants.
//!
//! These are the `event_type` values published on the event bus and
//! stored in the `events` table. The notification router and email
//! delivery match on them, so add new names here rather than inlining
//! string literals.

/// A new customer account was created.
pub const EVENT_USER_REGISTERED: &str = "user.registered";

/// A customer placed an order.
pub const EVENT_ORDER_CREATED: &str = "order.created";

/// An admin moved an order to a new fulfilment status.
pub const EVENT_ORDER_STATUS_CHANGED: &str = "order.status_changed";

/// A gateway payment for an order was verified and captured.
pub const EVENT_PAYMENT_CAPTURED: &str = "payment.captured";

/// A visitor or customer submitted feedback.
pub const EVENT_FEEDBACK_SUBMITTED: &str = "feedback.submitted";
