//! Canonical string codec for sorted guids.
//!
//! The encoded form is `<inverted ticks, 19 digits>_<uuid, 32 lowercase hex>`.
//! The digit segment holds `MAX_TICKS - ticks`, zero-padded on the left to a
//! fixed width, so byte comparison of two encoded strings orders them by
//! descending timestamp: a later instant yields a smaller inverted value,
//! hence a smaller digit string, hence it sorts first.

use crate::{SortedGuidError, SortedGuidResult};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Maximum representable tick count (9999-12-31T23:59:59.9999999 UTC).
pub const MAX_TICKS: u64 = 3_155_378_975_999_999_999;

/// Separator between the digit segment and the hex segment.
pub const SEPARATOR: char = '_';

/// Fixed width of the inverted-ticks decimal field.
const TICKS_WIDTH: usize = 19;

/// Fixed width of the UUID hex field (simple form, no hyphens).
const UUID_WIDTH: usize = 32;

const ENCODED_LEN: usize = TICKS_WIDTH + 1 + UUID_WIDTH;

/// Ticks elapsed between the year-1 epoch and the Unix epoch.
const UNIX_EPOCH_TICKS: i128 = 621_355_968_000_000_000;

const TICKS_PER_SECOND: i128 = 10_000_000;
const NANOS_PER_TICK: i128 = 100;

/// Encodes a (ticks, uuid) pair into the canonical string form.
///
/// `ticks` must not exceed [`MAX_TICKS`]; the value-type constructors
/// guarantee this before calling in.
pub fn format(ticks: u64, uuid: &Uuid) -> String {
    debug_assert!(ticks <= MAX_TICKS);
    let inverted = MAX_TICKS - ticks;
    format!("{inverted:019}{SEPARATOR}{}", uuid.simple())
}

/// Decodes a canonical string back into its (ticks, uuid) pair.
///
/// # Errors
///
/// Returns [`SortedGuidError::InvalidFormat`] when `input` fails the shape
/// check, and [`SortedGuidError::OutOfRange`] when the digit segment exceeds
/// [`MAX_TICKS`].
pub fn unformat(input: &str) -> SortedGuidResult<(u64, Uuid)> {
    if !is_sorted_guid(input) {
        return Err(SortedGuidError::InvalidFormat(input.to_owned()));
    }

    let (digits, hex) = input
        .split_once(SEPARATOR)
        .expect("is_sorted_guid guarantees a separator");

    // 19 decimal digits always fit in a u64 (u64::MAX has 20).
    let inverted: u64 = digits
        .parse()
        .expect("is_sorted_guid guarantees a pure-decimal segment");
    if inverted > MAX_TICKS {
        return Err(SortedGuidError::OutOfRange);
    }

    let uuid = Uuid::parse_str(hex).expect("is_sorted_guid guarantees 32 hex digits");

    Ok((MAX_TICKS - inverted, uuid))
}

/// Returns true if `input` has the canonical sorted guid shape.
///
/// This is a purely syntactic check:
/// - exactly 52 bytes long
/// - 19 ASCII decimal digits, then `'_'`, then 32 lowercase hex characters
///
/// Uppercase hex and hyphenated UUIDs are rejected; the canonical encoding of
/// a value is unique.
pub fn is_sorted_guid(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == ENCODED_LEN
        && bytes[..TICKS_WIDTH].iter().all(u8::is_ascii_digit)
        && bytes[TICKS_WIDTH] == SEPARATOR as u8
        && bytes[TICKS_WIDTH + 1..]
            .iter()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Converts a UTC instant to its tick count, truncating to 100 ns precision.
///
/// # Errors
///
/// Returns [`SortedGuidError::OutOfRange`] for instants before year 1 or
/// after year 9999.
pub fn datetime_to_ticks(timestamp: DateTime<Utc>) -> SortedGuidResult<u64> {
    let secs = i128::from(timestamp.timestamp());
    let subsec_ticks = i128::from(timestamp.timestamp_subsec_nanos()) / NANOS_PER_TICK;
    let ticks = UNIX_EPOCH_TICKS + secs * TICKS_PER_SECOND + subsec_ticks;
    if !(0..=i128::from(MAX_TICKS)).contains(&ticks) {
        return Err(SortedGuidError::OutOfRange);
    }
    Ok(ticks as u64)
}

/// Converts a tick count (at most [`MAX_TICKS`]) back to a UTC instant.
pub fn ticks_to_datetime(ticks: u64) -> DateTime<Utc> {
    debug_assert!(ticks <= MAX_TICKS);
    let delta = i128::from(ticks) - UNIX_EPOCH_TICKS;
    let secs = delta.div_euclid(TICKS_PER_SECOND) as i64;
    let nanos = (delta.rem_euclid(TICKS_PER_SECOND) * NANOS_PER_TICK) as u32;
    DateTime::from_timestamp(secs, nanos).expect("any tick count up to MAX_TICKS is year 9999 or earlier")
}

#[cfg(test)]
mod tests {
    use super::*;

    const NIL_HEX: &str = "00000000000000000000000000000000";

    #[test]
    fn test_format_epoch_is_all_max_digits() {
        let encoded = format(0, &Uuid::nil());
        assert_eq!(encoded, "3155378975999999999_00000000000000000000000000000000");
    }

    #[test]
    fn test_format_max_ticks_is_all_zero_digits() {
        let encoded = format(MAX_TICKS, &Uuid::nil());
        assert_eq!(encoded, "0000000000000000000_00000000000000000000000000000000");
    }

    #[test]
    fn test_format_pads_inverted_ticks_to_19_digits() {
        // MAX_TICKS - ticks = 5 here, which needs padding up to width 19.
        let encoded = format(MAX_TICKS - 5, &Uuid::nil());
        assert_eq!(encoded, "0000000000000000005_00000000000000000000000000000000");
    }

    #[test]
    fn test_unformat_round_trips_format() {
        let uuid = Uuid::parse_str("550e8400e29b41d4a716446655440000").unwrap();
        let ticks = 638_712_000_000_000_000;

        let (parsed_ticks, parsed_uuid) = unformat(&format(ticks, &uuid)).unwrap();

        assert_eq!(parsed_ticks, ticks);
        assert_eq!(parsed_uuid, uuid);
    }

    #[test]
    fn test_unformat_rejects_overflowing_digit_segment() {
        // 19 nines is a well-formed digit segment but exceeds MAX_TICKS.
        let input = format!("9999999999999999999_{NIL_HEX}");
        let result = unformat(&input);

        assert!(matches!(result, Err(SortedGuidError::OutOfRange)));
    }

    #[test]
    fn test_unformat_rejects_malformed_input() {
        let result = unformat("not-a-sorted-id");

        assert!(matches!(result, Err(SortedGuidError::InvalidFormat(_))));
    }

    #[test]
    fn test_is_sorted_guid_valid() {
        assert!(is_sorted_guid(
            "3155378975999999999_00000000000000000000000000000000"
        ));
        assert!(is_sorted_guid(
            "0000000000000000000_550e8400e29b41d4a716446655440000"
        ));
        assert!(is_sorted_guid(
            "0000000000000000000_ffffffffffffffffffffffffffffffff"
        ));
    }

    #[test]
    fn test_is_sorted_guid_invalid() {
        // Wrong separator
        assert!(!is_sorted_guid(
            "3155378975999999999-00000000000000000000000000000000"
        ));

        // Missing separator
        assert!(!is_sorted_guid(
            "315537897599999999900000000000000000000000000000000"
        ));

        // Digit segment too short
        assert!(!is_sorted_guid(
            "315537897599999999_00000000000000000000000000000000"
        ));

        // Hex segment too long
        assert!(!is_sorted_guid(
            "3155378975999999999_000000000000000000000000000000000"
        ));

        // Uppercase hex
        assert!(!is_sorted_guid(
            "3155378975999999999_550E8400E29B41D4A716446655440000"
        ));

        // Hyphenated UUID
        assert!(!is_sorted_guid(
            "3155378975999999999_550e8400-e29b-41d4-a716-446655440000"
        ));

        // Non-digit in the tick segment
        assert!(!is_sorted_guid(
            "315537897599999999x_00000000000000000000000000000000"
        ));

        // Empty string
        assert!(!is_sorted_guid(""));
    }

    #[test]
    fn test_unix_epoch_tick_count() {
        let unix_epoch = DateTime::from_timestamp(0, 0).unwrap();
        assert_eq!(datetime_to_ticks(unix_epoch).unwrap(), 621_355_968_000_000_000);
    }

    #[test]
    fn test_datetime_to_ticks_truncates_to_100ns() {
        let base = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let skewed = DateTime::from_timestamp(1_700_000_000, 99).unwrap();

        assert_eq!(
            datetime_to_ticks(base).unwrap(),
            datetime_to_ticks(skewed).unwrap()
        );
    }

    #[test]
    fn test_datetime_to_ticks_rejects_pre_epoch_instants() {
        // Far enough before the Unix epoch to land before year 1.
        let ancient = DateTime::from_timestamp(-63_000_000_000, 0).unwrap();
        let result = datetime_to_ticks(ancient);

        assert!(matches!(result, Err(SortedGuidError::OutOfRange)));
    }

    #[test]
    fn test_ticks_datetime_round_trip() {
        for ticks in [0, 1, 621_355_968_000_000_000, MAX_TICKS - 1, MAX_TICKS] {
            let instant = ticks_to_datetime(ticks);
            assert_eq!(datetime_to_ticks(instant).unwrap(), ticks);
        }
    }

    #[test]
    fn test_max_ticks_is_end_of_year_9999() {
        let end = ticks_to_datetime(MAX_TICKS);
        assert_eq!(end.to_rfc3339(), "9999-12-31T23:59:59.999999900+00:00");
    }
}
