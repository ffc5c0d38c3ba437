//! Column conversions for money and counts.
//!
//! Amounts are unsigned minor units in Rust and `BIGINT` in `PostgreSQL`; stock and
//! quantities are unsigned in Rust and `INTEGER` in `PostgreSQL`.

use sqlx::Error;

/// Convert an amount for binding.
pub(crate) fn encode_amount(amount: u64, column: &str) -> Result<i64, Error> {
    i64::try_from(amount).map_err(|e| Error::Encode(format!("{column}: {e}").into()))
}

/// Convert a count for binding.
pub(crate) fn encode_count(count: u32, column: &str) -> Result<i32, Error> {
    i32::try_from(count).map_err(|e| Error::Encode(format!("{column}: {e}").into()))
}

/// Convert a decoded `BIGINT` amount.
pub(crate) fn decode_amount(amount: i64, column: &str) -> Result<u64, Error> {
    u64::try_from(amount).map_err(|e| Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Convert a decoded `INTEGER` count.
pub(crate) fn decode_count(count: i32, column: &str) -> Result<u32, Error> {
    u32::try_from(count).map_err(|e| Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_columns_fail_to_decode() {
        assert!(decode_amount(-1, "price").is_err());
        assert!(decode_count(-1, "stock").is_err());
    }

    #[test]
    fn oversized_values_fail_to_encode() {
        assert!(encode_amount(u64::MAX, "price").is_err());
        assert!(encode_count(u32::MAX, "stock").is_err());
        assert_eq!(encode_amount(12_50, "price").ok(), Some(12_50));
    }
}
