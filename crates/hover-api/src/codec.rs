//! Scalar wire codecs.
//!
//! Hover's JSON mixes several scalar encodings: identifiers and record types
//! as quoted strings, dates as `"YYYY-MM-DD"`, card expiry as `"YYYY/MM"`, and
//! TTLs as bare integers. Each scalar type implements [`WireScalar`], and its
//! `Deserialize` impl hands the raw JSON token to `decode_wire`, so the same
//! rules apply wherever the type appears in a response.

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DecodeError;

/// Decode and encode rules for a scalar as it appears on the wire.
pub trait WireScalar: Sized {
    /// Type name reported in [`DecodeError`]s.
    const TYPE_NAME: &'static str;

    /// Decode from the raw JSON token, quotes included.
    fn decode_wire(raw: &str) -> Result<Self, DecodeError>;

    /// Encode as the plain text used in request parameters.
    fn encode_wire(&self) -> String;
}

/// Strips the surrounding quotes of a JSON string token and unescapes it.
fn unquote(raw: &str, target: &'static str) -> Result<String, DecodeError> {
    if raw.len() < 2 || !raw.starts_with('"') || !raw.ends_with('"') {
        return Err(DecodeError::new(target, raw, "expected a quoted string"));
    }
    serde_json::from_str::<String>(raw).map_err(|e| DecodeError::new(target, raw, e.to_string()))
}

/// Implements `Deserialize` by capturing the raw JSON token and running the
/// type's `WireScalar::decode_wire` on it.
macro_rules! deserialize_from_wire {
    ($ty:ty) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = Box::<serde_json::value::RawValue>::deserialize(deserializer)?;
                <$ty as WireScalar>::decode_wire(raw.get()).map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Opaque identifiers
// ---------------------------------------------------------------------------

macro_rules! opaque_id {
    (
        $(#[$attr:meta])*
        $name:ident, $wire_name:literal
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Decoding accepts `""`, so an identifier may be empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl WireScalar for $name {
            const TYPE_NAME: &'static str = $wire_name;

            fn decode_wire(raw: &str) -> Result<Self, DecodeError> {
                unquote(raw, Self::TYPE_NAME).map(Self)
            }

            fn encode_wire(&self) -> String {
                self.0.clone()
            }
        }

        deserialize_from_wire!($name);

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }
    };
}

opaque_id! {
    /// Identifies a domain in the Hover account.
    DomainId, "DomainID"
}

opaque_id! {
    /// Identifies a single DNS record of a domain.
    DnsRecordId, "DNSRecordID"
}

// ---------------------------------------------------------------------------
// Record type
// ---------------------------------------------------------------------------

/// Name of a DNS record type.
///
/// The associated constants cover the common types, but the API accepts any
/// string and unknown types are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordType(Cow<'static, str>);

impl RecordType {
    pub const A: RecordType = RecordType(Cow::Borrowed("A"));
    pub const AAAA: RecordType = RecordType(Cow::Borrowed("AAAA"));
    pub const CAA: RecordType = RecordType(Cow::Borrowed("CAA"));
    pub const CNAME: RecordType = RecordType(Cow::Borrowed("CNAME"));
    pub const MX: RecordType = RecordType(Cow::Borrowed("MX"));
    pub const SRV: RecordType = RecordType(Cow::Borrowed("SRV"));
    pub const TXT: RecordType = RecordType(Cow::Borrowed("TXT"));

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecordType {
    fn default() -> Self {
        Self(Cow::Borrowed(""))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for RecordType {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl WireScalar for RecordType {
    const TYPE_NAME: &'static str = "RecordType";

    fn decode_wire(raw: &str) -> Result<Self, DecodeError> {
        unquote(raw, Self::TYPE_NAME).map(Self::new)
    }

    fn encode_wire(&self) -> String {
        self.0.to_string()
    }
}

deserialize_from_wire!(RecordType);

impl Serialize for RecordType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date sent as `"YYYY-MM-DD"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl WireScalar for Date {
    const TYPE_NAME: &'static str = "Date";

    fn decode_wire(raw: &str) -> Result<Self, DecodeError> {
        let text = unquote(raw, Self::TYPE_NAME)?;
        if text.len() != "YYYY-MM-DD".len() {
            return Err(DecodeError::new(Self::TYPE_NAME, raw, "expected YYYY-MM-DD"));
        }
        NaiveDate::parse_from_str(&text, DATE_FORMAT)
            .map(Self)
            .map_err(|e| DecodeError::new(Self::TYPE_NAME, raw, e.to_string()))
    }

    fn encode_wire(&self) -> String {
        self.to_string()
    }
}

deserialize_from_wire!(Date);

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A year and month sent as `"YYYY/MM"`, used for card expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}", self.year, self.month)
    }
}

impl WireScalar for YearMonth {
    const TYPE_NAME: &'static str = "YearMonth";

    fn decode_wire(raw: &str) -> Result<Self, DecodeError> {
        let text = unquote(raw, Self::TYPE_NAME)?;
        if text.len() != "YYYY/MM".len() {
            return Err(DecodeError::new(Self::TYPE_NAME, raw, "expected YYYY/MM"));
        }
        // chrono needs a day to build a date; pin it to the first.
        let date = NaiveDate::parse_from_str(&format!("{text}/01"), "%Y/%m/%d")
            .map_err(|e| DecodeError::new(Self::TYPE_NAME, raw, e.to_string()))?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
        })
    }

    fn encode_wire(&self) -> String {
        self.to_string()
    }
}

deserialize_from_wire!(YearMonth);

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// TTL
// ---------------------------------------------------------------------------

/// Time-to-live of a DNS record, sent as a bare integer of seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ttl(Duration);

impl Ttl {
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    /// Whole seconds; sub-second precision is dropped.
    pub fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

impl From<Duration> for Ttl {
    fn from(duration: Duration) -> Self {
        Self(Duration::from_secs(duration.as_secs()))
    }
}

impl From<Ttl> for Duration {
    fn from(ttl: Ttl) -> Self {
        ttl.0
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_secs())
    }
}

impl WireScalar for Ttl {
    const TYPE_NAME: &'static str = "TTL";

    fn decode_wire(raw: &str) -> Result<Self, DecodeError> {
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DecodeError::new(
                Self::TYPE_NAME,
                raw,
                "expected a non-negative integer number of seconds",
            ));
        }
        raw.parse::<u64>()
            .map(Self::from_secs)
            .map_err(|e| DecodeError::new(Self::TYPE_NAME, raw, e.to_string()))
    }

    fn encode_wire(&self) -> String {
        self.as_secs().to_string()
    }
}

deserialize_from_wire!(Ttl);

impl Serialize for Ttl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.as_secs())
    }
}
