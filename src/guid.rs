//! The sorted guid value type and its construction/parsing entry points.

use crate::codec::{self, MAX_TICKS};
use crate::{SortedGuidError, SortedGuidResult};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// An immutable composite identifier made of a timestamp and a UUID.
///
/// The timestamp is stored as a count of 100-nanosecond ticks since the
/// year-1 epoch, capped at [`MAX_TICKS`] (the end of year 9999). Constructors
/// enforce the cap, so every `SortedGuid` has a canonical string encoding.
///
/// # Construction
/// - [`SortedGuid::now`] stamps the current UTC time with a fresh random UUID.
/// - [`SortedGuid::new`] / [`SortedGuid::from_ticks`] build a value from
///   caller-supplied parts; tests use these to inject deterministic
///   clock/UUID values.
/// - [`SortedGuid::parse`] / [`SortedGuid::try_parse`] decode the canonical
///   string form.
///
/// # Ordering
/// `Ord` is **chronological**: a later timestamp compares as greater, and
/// equal timestamps fall through to the UUID's byte order. The encoded string
/// sorts the opposite way (most recent first); use
/// [`SortedGuid::lexical_cmp`] when you need that order without rendering the
/// strings.
///
/// # Display format
/// `Display` and `to_string` produce the canonical 52-character encoding
/// described in the crate docs. `Parse(to_string())` round-trips exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SortedGuid {
    ticks: u64,
    uuid: Uuid,
}

impl SortedGuid {
    /// The all-zeros value: epoch timestamp and nil UUID.
    pub const EMPTY: SortedGuid = SortedGuid {
        ticks: 0,
        uuid: Uuid::nil(),
    };

    /// Creates a sorted guid from a UTC timestamp and a UUID.
    ///
    /// The timestamp is truncated to tick (100 ns) precision, so the stored
    /// value is exactly what the string encoding can represent.
    ///
    /// # Errors
    ///
    /// Returns [`SortedGuidError::OutOfRange`] for instants before year 1 or
    /// after year 9999.
    pub fn new(timestamp: DateTime<Utc>, uuid: Uuid) -> SortedGuidResult<Self> {
        let ticks = codec::datetime_to_ticks(timestamp)?;
        Ok(Self { ticks, uuid })
    }

    /// Creates a sorted guid directly from a tick count and a UUID.
    ///
    /// # Errors
    ///
    /// Returns [`SortedGuidError::OutOfRange`] if `ticks` exceeds
    /// [`MAX_TICKS`].
    pub fn from_ticks(ticks: u64, uuid: Uuid) -> SortedGuidResult<Self> {
        if ticks > MAX_TICKS {
            return Err(SortedGuidError::OutOfRange);
        }
        Ok(Self { ticks, uuid })
    }

    /// Creates a sorted guid stamped with the current UTC time and a fresh
    /// random (v4) UUID.
    pub fn now() -> Self {
        // The wall clock sits far inside the representable year 1..=9999 range.
        Self::new(Utc::now(), Uuid::new_v4()).expect("current time is within the tick range")
    }

    /// Parses the canonical string form.
    ///
    /// Expects exactly `<19 digits>_<32 lowercase hex digits>`, e.g.
    /// `3155378975999999999_00000000000000000000000000000000`.
    ///
    /// # Errors
    ///
    /// - [`SortedGuidError::Blank`] if `input` is empty or whitespace-only.
    /// - [`SortedGuidError::InvalidFormat`] if `input` fails the shape check.
    /// - [`SortedGuidError::OutOfRange`] if the digit segment exceeds
    ///   [`MAX_TICKS`].
    pub fn parse(input: &str) -> SortedGuidResult<Self> {
        if input.trim().is_empty() {
            return Err(SortedGuidError::Blank);
        }
        let (ticks, uuid) = codec::unformat(input)?;
        Ok(Self { ticks, uuid })
    }

    /// Parses the canonical string form, collapsing every failure to `None`.
    ///
    /// This never panics, for any input. The underlying [`SortedGuid::parse`]
    /// error is discarded at this boundary; callers who need the cause should
    /// call `parse` instead. `try_parse(s).unwrap_or_default()` yields
    /// [`SortedGuid::EMPTY`] on failure.
    pub fn try_parse(input: &str) -> Option<Self> {
        Self::parse(input).ok()
    }

    /// Returns the timestamp component as a UTC instant.
    pub fn timestamp(&self) -> DateTime<Utc> {
        codec::ticks_to_datetime(self.ticks)
    }

    /// Returns the timestamp component as a raw tick count.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns the UUID component.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Compares two values in encoded-string order: most recent first.
    ///
    /// Agrees with byte comparison of the [`Display`](fmt::Display) forms
    /// without rendering them; equal timestamps fall through to the UUID's
    /// byte order. This is the inverse of `Ord` with respect to recency.
    pub fn lexical_cmp(&self, other: &Self) -> Ordering {
        other
            .ticks
            .cmp(&self.ticks)
            .then_with(|| self.uuid.cmp(&other.uuid))
    }
}

/// The default value is [`SortedGuid::EMPTY`], matching the decoded form of
/// the all-zeros-timestamp encoding.
impl Default for SortedGuid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for SortedGuid {
    /// Formats in the canonical descending-sort form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", codec::format(self.ticks, &self.uuid))
    }
}

impl FromStr for SortedGuid {
    type Err = SortedGuidError;

    /// Equivalent to [`SortedGuid::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortedGuid::parse(s)
    }
}

impl Ord for SortedGuid {
    /// Chronological order: the later timestamp is the greater value.
    fn cmp(&self, other: &Self) -> Ordering {
        self.ticks
            .cmp(&other.ticks)
            .then_with(|| self.uuid.cmp(&other.uuid))
    }
}

impl PartialOrd for SortedGuid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SortedGuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SortedGuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SortedGuid::parse(&s).map_err(serde::de::Error::custom)
    }
}
