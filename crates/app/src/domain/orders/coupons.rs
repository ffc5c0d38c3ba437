//! Coupon rules.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Coupon UUID
pub type CouponUuid = TypedUuid<CouponRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponKind {
    /// `value` is a whole percentage of the subtotal.
    Percentage,

    /// `value` is an amount in minor units.
    Fixed,
}

impl CouponKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown coupon kind: {0}")]
pub struct UnknownCouponKind(pub String);

impl FromStr for CouponKind {
    type Err = UnknownCouponKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "percentage" => Ok(Self::Percentage),
            "fixed" => Ok(Self::Fixed),
            other => Err(UnknownCouponKind(other.to_string())),
        }
    }
}

/// Why a coupon cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CouponRejection {
    #[error("coupon does not exist")]
    Unknown,

    #[error("coupon is not active")]
    Inactive,

    #[error("coupon has expired")]
    Expired,

    #[error("coupon has been fully redeemed")]
    UsageExhausted,

    #[error("order subtotal is below the coupon minimum of {minimum}")]
    BelowMinimum { minimum: u64 },
}

impl CouponRejection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Inactive => "inactive",
            Self::Expired => "expired",
            Self::UsageExhausted => "usage_exhausted",
            Self::BelowMinimum { .. } => "below_minimum",
        }
    }
}

/// Coupon Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponRecord {
    pub uuid: CouponUuid,
    pub code: String,
    pub kind: CouponKind,
    pub value: u64,
    pub min_subtotal: u64,
    pub max_discount: Option<u64>,
    pub usage_limit: Option<u32>,
    pub used_count: u32,
    pub active: bool,
    pub expires_at: Option<Timestamp>,
}

impl CouponRecord {
    /// Discount this coupon grants on `subtotal` at `now`.
    ///
    /// The result never exceeds the subtotal or `max_discount`.
    ///
    /// # Errors
    ///
    /// Returns the reason the coupon cannot be applied.
    pub fn discount_for(&self, subtotal: u64, now: Timestamp) -> Result<u64, CouponRejection> {
        if !self.active {
            return Err(CouponRejection::Inactive);
        }

        if self.expires_at.is_some_and(|expires_at| expires_at <= now) {
            return Err(CouponRejection::Expired);
        }

        if self
            .usage_limit
            .is_some_and(|limit| self.used_count >= limit)
        {
            return Err(CouponRejection::UsageExhausted);
        }

        if subtotal < self.min_subtotal {
            return Err(CouponRejection::BelowMinimum {
                minimum: self.min_subtotal,
            });
        }

        let discount = match self.kind {
            CouponKind::Percentage => {
                let percent = u128::from(self.value.min(100));

                // Floors so the customer is never over-credited.
                u64::try_from(u128::from(subtotal) * percent / 100).unwrap_or(subtotal)
            }
            CouponKind::Fixed => self.value,
        };

        let discount = self
            .max_discount
            .map_or(discount, |max_discount| discount.min(max_discount));

        Ok(discount.min(subtotal))
    }
}

impl fmt::Display for CouponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
