//! Core data types for SMS Relay.
//!
//! `SmsPayload` is the wire shape a forwarding device posts to the webhook.
//! `Sms` is what the store keeps and what the query surface returns; it is
//! the payload minus the shared secret.

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// An inbound webhook body as posted by the forwarding device.
///
/// Decoding is lenient in the way forwarding apps expect:
/// - every field is optional and defaults to an empty string;
/// - a `null` field leaves the field as it was, and a `null` body is an
///   empty payload;
/// - keys match field names ASCII case-insensitively (`From` sets `from`);
/// - unknown keys are ignored, and for repeated keys the last one wins.
///
/// A field holding anything other than a string or `null` is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SmsPayload {
    /// Shared secret used to authenticate the sender.
    pub secret: String,

    /// Receive time, `YYYY-MM-DD HH:MM:SS` by convention. Not validated.
    pub time: String,

    /// Sender identifier (phone number or short code).
    pub from: String,

    /// Message text.
    pub content: String,

    /// Identifier of the device that forwarded the message.
    pub device: String,
}

impl SmsPayload {
    /// Drops the secret and returns the storable message.
    pub fn into_sms(self) -> Sms {
        Sms {
            time: self.time,
            from: self.from,
            content: self.content,
            device: self.device,
        }
    }
}

impl<'de> Deserialize<'de> for SmsPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PayloadVisitor)
    }
}

struct PayloadVisitor;

impl<'de> Visitor<'de> for PayloadVisitor {
    type Value = SmsPayload;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an SMS payload object or null")
    }

    fn visit_unit<E: de::Error>(self) -> Result<SmsPayload, E> {
        Ok(SmsPayload::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<SmsPayload, E> {
        Ok(SmsPayload::default())
    }

    fn visit_map<A>(self, mut map: A) -> Result<SmsPayload, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut payload = SmsPayload::default();

        while let Some(key) = map.next_key::<String>()? {
            let slot = match key.to_ascii_lowercase().as_str() {
                "secret" => &mut payload.secret,
                "time" => &mut payload.time,
                "from" => &mut payload.from,
                "content" => &mut payload.content,
                "device" => &mut payload.device,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };
            if let Some(value) = map.next_value::<Option<String>>()? {
                *slot = value;
            }
        }

        Ok(payload)
    }
}

/// A received SMS as stored and served.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sms {
    /// Receive time as reported by the device.
    pub time: String,

    /// Sender identifier.
    pub from: String,

    /// Message text.
    pub content: String,

    /// Forwarding device identifier.
    pub device: String,
}

impl Sms {
    /// Creates a new message.
    pub fn new(
        time: impl Into<String>,
        from: impl Into<String>,
        content: impl Into<String>,
        device: impl Into<String>,
    ) -> Self {
        Self {
            time: time.into(),
            from: from.into(),
            content: content.into(),
            device: device.into(),
        }
    }
}

impl From<SmsPayload> for Sms {
    fn from(payload: SmsPayload) -> Self {
        payload.into_sms()
    }
}
