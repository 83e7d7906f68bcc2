//! Meeting date normalization
//!
//! The meetings API expects ISO-8601 timestamps. Callers may hand over either
//! text or an already-parsed instant; both end up as
//! `YYYY-MM-DDTHH:MM:SS±HH:MM` with whole seconds and the input's offset.
//!
//! Two modes exist. Scheduling a meeting needs both ends of the interval, so
//! it normalizes strictly and a missing or unparseable date is
//! [`Error::BadInputDate`]. Updating a meeting allows partial bodies, so it
//! normalizes leniently and anything unusable simply becomes absent.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::error::{Error, Result};

/// Offset-aware formats tried after RFC 3339, colon and colon-less offsets.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M%z",
    "%Y%m%dT%H%M%S%z",
];

/// Formats read as UTC: no offset at all, or a literal `Z`.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%d %H:%M:%S%.fZ",
    "%Y-%m-%d %H:%MZ",
    "%Y%m%dT%H%M%SZ",
    "%Y%m%dT%H%M%S",
];

/// A meeting start or end as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Text still to be parsed, e.g. `"2024-01-15T10:00:00Z"`.
    Text(String),
    /// A calendar instant that needs no parsing.
    Instant(DateTime<FixedOffset>),
}

/// How to treat input that cannot be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Missing or unparseable input is an error.
    Strict,
    /// Missing or unparseable input yields `None`.
    Lenient,
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<DateTime<FixedOffset>> for DateInput {
    fn from(instant: DateTime<FixedOffset>) -> Self {
        Self::Instant(instant)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Instant(instant.fixed_offset())
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(instant: NaiveDateTime) -> Self {
        Self::Instant(instant.and_utc().fixed_offset())
    }
}

/// Normalize `input` to its canonical ISO-8601 form.
///
/// In [`Strictness::Strict`] mode the result is never `Ok(None)`.
pub fn normalize(input: Option<&DateInput>, strictness: Strictness) -> Result<Option<String>> {
    match (canonical(input), strictness) {
        (Some(iso), _) => Ok(Some(iso)),
        (None, Strictness::Lenient) => Ok(None),
        (None, Strictness::Strict) => Err(Error::BadInputDate(describe(input))),
    }
}

/// Strict normalization: a usable date or [`Error::BadInputDate`].
pub fn normalize_strict(input: Option<&DateInput>) -> Result<String> {
    canonical(input).ok_or_else(|| Error::BadInputDate(describe(input)))
}

/// Lenient normalization: never fails.
pub fn normalize_lenient(input: Option<&DateInput>) -> Option<String> {
    canonical(input)
}

fn canonical(input: Option<&DateInput>) -> Option<String> {
    let instant = match input? {
        DateInput::Text(text) => parse_text(text)?,
        DateInput::Instant(instant) => *instant,
    };
    Some(instant.to_rfc3339_opts(SecondsFormat::Secs, false))
}

fn parse_text(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant);
    }
    for format in OFFSET_FORMATS {
        if let Ok(instant) = DateTime::parse_from_str(text, format) {
            return Some(instant);
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

fn describe(input: Option<&DateInput>) -> String {
    match input {
        None => "missing date".to_string(),
        Some(DateInput::Text(text)) => format!("unparseable date {text:?}"),
        // Instants always normalize
        Some(DateInput::Instant(instant)) => format!("unexpected instant {instant}"),
    }
}
