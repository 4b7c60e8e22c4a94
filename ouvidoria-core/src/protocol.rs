//! Protocol code generation.
//!
//! A protocol is the human-facing lookup key handed to the citizen at
//! submission time: `PDF` + the creation date (`YYYYMMDD`) + a random 6-digit
//! suffix, e.g. `PDF20250101-123456`. The 6-digit space makes collisions
//! possible in principle; the store retries a few times on collision (see
//! [`crate::store`]).

use chrono::NaiveDate;
use rand::Rng;

/// Fixed prefix of every protocol code.
pub const PROTOCOL_PREFIX: &str = "PDF";

/// Generate a protocol code for the given date.
pub fn generate_protocol<R: Rng>(date: NaiveDate, rng: &mut R) -> String {
    let suffix: u32 = rng.gen_range(100_000..=999_999);
    format!("{}{}-{}", PROTOCOL_PREFIX, date.format("%Y%m%d"), suffix)
}

/// Case-insensitive protocol comparison used by lookups.
pub fn protocol_matches(stored: &str, query: &str) -> bool {
    stored.eq_ignore_ascii_case(query)
}
