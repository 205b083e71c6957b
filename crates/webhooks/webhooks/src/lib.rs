//! # SMS Relay Webhooks
//!
//! Validation for inbound SMS-forwarding webhooks:
//! - Allowed-method check
//! - JSON payload decoding
//! - Shared-secret verification
//!
//! ## Example
//!
//! ```rust,ignore
//! use sms_relay_webhooks::SmsReceiver;
//!
//! let receiver = SmsReceiver::new().with_methods(["POST"]).with_secret("s1");
//! receiver.check_method("POST")?;
//! let sms = receiver.receive(body)?;
//! store.append(sms).await?;
//! ```

mod error;
mod receiver;

pub use error::{WebhookError, WebhookResult};
pub use receiver::{SmsReceiver, DEFAULT_METHOD};
