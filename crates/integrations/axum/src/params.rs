//! Query-string parsing shared by the web UI and the JSON API.

use sms_relay_core::query::{MessageQuery, DEFAULT_LIMIT};

/// Raw listing parameters as they appear in the query string.
///
/// Only the first occurrence of each key is used. Numeric values that do
/// not parse, or fall outside their range, are replaced by defaults rather
/// than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub from: Option<String>,
    pub time: Option<String>,
}

impl ListParams {
    /// Parses a raw (still percent-encoded) query string.
    pub fn from_query_string(raw: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(raw) = raw else {
            return params;
        };

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let slot = match &*key {
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                "from" => &mut params.from,
                "time" => &mut params.time,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        params
    }

    /// Converts to a store query, applying defaults.
    ///
    /// `limit` must be a positive integer (default 10); `offset` a
    /// non-negative integer (default 0). Both are read as signed 64-bit
    /// integers, so values beyond `i64::MAX` count as invalid.
    pub fn into_query(self) -> MessageQuery {
        let limit = self
            .limit
            .as_deref()
            .and_then(parse_int)
            .filter(|v| *v > 0)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(DEFAULT_LIMIT);
        let offset = self
            .offset
            .as_deref()
            .and_then(parse_int)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(0);

        MessageQuery::page(limit, offset)
            .with_from(self.from.unwrap_or_default())
            .with_date(self.time.unwrap_or_default())
    }
}

fn parse_int(value: &str) -> Option<i64> {
    value.parse::<i64>().ok()
}
