//! Human-readable order numbers.

use jiff::{Timestamp, tz::TimeZone};
use rand::{Rng, distributions::Alphanumeric};

const PREFIX: &str = "ATR";
const SUFFIX_LEN: usize = 6;

/// Generate an order number such as `ATR-20260314-7KQ2ZD`.
///
/// The date is the UTC placement date; the suffix is random uppercase alphanumerics.
pub fn generate_order_number<R: Rng + ?Sized>(now: Timestamp, rng: &mut R) -> String {
    let date = now.to_zoned(TimeZone::UTC).strftime("%Y%m%d");

    let suffix: String = rng
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|byte| char::from(byte).to_ascii_uppercase())
        .collect();

    format!("{PREFIX}-{date}-{suffix}")
}
