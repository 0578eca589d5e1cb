//! Sortable composite identifiers built from a timestamp and a UUID.
//!
//! A [`SortedGuid`] pairs a UTC timestamp (stored as a count of 100-nanosecond
//! *ticks* since the year-1 epoch) with a random UUID, and encodes the pair as
//! a fixed-width string whose plain byte ordering puts the **most recent**
//! value first:
//!
//! ```text
//! <19 decimal digits>_<32 lowercase hex digits>
//! 3155355983999999999_550e8400e29b41d4a716446655440000
//! ```
//!
//! The digit segment is the *inverted* tick count (`MAX_TICKS - ticks`),
//! left-padded with zeros to a fixed width of 19. Inverting makes later
//! timestamps encode as smaller numbers; the fixed width makes numeric order
//! and byte order agree. This is the classic trick for descending range scans
//! over lexicographically ordered keys.
//!
//! ## Two orderings
//!
//! The crate deliberately exposes two comparison conventions and names them
//! apart so callers cannot confuse them:
//!
//! - [`Ord`] on `SortedGuid` is **chronological**: a later timestamp compares
//!   as *greater* (`newer > older`), with equal timestamps falling through to
//!   the UUID's byte order.
//! - [`SortedGuid::lexical_cmp`] is the **string-key** order: a later
//!   timestamp compares as *lesser*, matching byte comparison of the encoded
//!   form. `a.lexical_cmp(&b)` always agrees with
//!   `a.to_string().cmp(&b.to_string())`.
//!
//! ## Example
//!
//! ```
//! use sorted_guid::SortedGuid;
//!
//! let id = SortedGuid::now();
//! let encoded = id.to_string();
//! let parsed = SortedGuid::parse(&encoded)?;
//! assert_eq!(parsed, id);
//! # Ok::<(), sorted_guid::SortedGuidError>(())
//! ```

pub mod codec;
mod guid;

pub use codec::{MAX_TICKS, SEPARATOR};
pub use guid::SortedGuid;

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Error type for sorted guid operations.
#[derive(Debug, thiserror::Error)]
pub enum SortedGuidError {
    /// The input was empty or contained only whitespace.
    #[error("input is empty or whitespace-only")]
    Blank,
    /// The input does not match `<19 digits>_<32 lowercase hex digits>`.
    #[error("not a valid sorted guid: '{0}'")]
    InvalidFormat(String),
    /// A tick count or timestamp falls outside `0..=MAX_TICKS`.
    #[error("timestamp is outside the representable tick range")]
    OutOfRange,
}

/// Result type for sorted guid operations.
pub type SortedGuidResult<T> = Result<T, SortedGuidError>;
