//! Webhook receiver for validating incoming SMS notifications.

use sms_relay_core::{Sms, SmsPayload};

use crate::error::{WebhookError, WebhookResult};

/// Method accepted when none are configured.
pub const DEFAULT_METHOD: &str = "POST";

/// Validates webhook requests before their message is stored.
///
/// Checks run in a fixed order: method, payload, secret. The method check
/// is an exact, case-sensitive match against the configured set. The secret
/// check is skipped when no secret is configured.
#[derive(Debug, Clone)]
pub struct SmsReceiver {
    methods: Vec<String>,
    secret: Option<String>,
}

impl SmsReceiver {
    /// Creates a receiver accepting only `POST` with no secret.
    pub fn new() -> Self {
        Self {
            methods: vec![DEFAULT_METHOD.to_string()],
            secret: None,
        }
    }

    /// Sets the shared secret. An empty string disables validation.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        self.secret = (!secret.is_empty()).then_some(secret);
        self
    }

    /// Sets the allowed methods. An empty list keeps the current set.
    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let methods: Vec<String> = methods.into_iter().map(Into::into).collect();
        if !methods.is_empty() {
            self.methods = methods;
        }
        self
    }

    /// Returns the allowed methods.
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Returns true if a shared secret is enforced.
    pub fn requires_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Checks the request method against the allowed set.
    pub fn check_method(&self, method: &str) -> WebhookResult<()> {
        if self.methods.iter().any(|m| m == method) {
            Ok(())
        } else {
            Err(WebhookError::MethodNotAllowed(method.to_string()))
        }
    }

    /// Decodes a request body into a payload.
    pub fn parse(&self, body: &[u8]) -> WebhookResult<SmsPayload> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Checks the payload secret against the configured one.
    pub fn verify_secret(&self, payload: &SmsPayload) -> WebhookResult<()> {
        match &self.secret {
            Some(expected) if payload.secret != *expected => Err(WebhookError::InvalidSecret),
            _ => Ok(()),
        }
    }

    /// Parses and authenticates a body, returning the message to store.
    pub fn receive(&self, body: &[u8]) -> WebhookResult<Sms> {
        let payload = self.parse(body)?;
        self.verify_secret(&payload)?;
        Ok(payload.into_sms())
    }
}

impl Default for SmsReceiver {
    fn default() -> Self {
        Self::new()
    }
}
