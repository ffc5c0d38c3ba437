//! Order totals.

/// Basis points in one whole.
const BPS_SCALE: u64 = 10_000;

/// Tax and shipping rules applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Tax rate in basis points, applied to the discounted subtotal.
    pub tax_rate_bps: u32,

    /// Flat shipping charge in minor units.
    pub shipping_flat: u64,

    /// Discounted subtotal at or above which shipping is free.
    pub free_shipping_threshold: Option<u64>,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate_bps: 0,
            shipping_flat: 0,
            free_shipping_threshold: None,
        }
    }
}

/// Monetary breakdown of an order, in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderTotals {
    pub subtotal: u64,
    pub discount_amount: u64,
    pub tax_amount: u64,
    pub shipping_amount: u64,
    pub total_amount: u64,
}

impl PricingPolicy {
    /// Compute totals so that `total = subtotal - discount + tax + shipping`.
    ///
    /// The discount is capped at the subtotal. Tax rounds half up. Returns `None` on
    /// overflow.
    #[must_use]
    pub fn totals(&self, subtotal: u64, discount: u64) -> Option<OrderTotals> {
        let discount_amount = discount.min(subtotal);
        let taxable = subtotal - discount_amount;

        let tax_amount = u64::try_from(
            (u128::from(taxable) * u128::from(self.tax_rate_bps) + u128::from(BPS_SCALE / 2))
                / u128::from(BPS_SCALE),
        )
        .ok()?;

        let shipping_amount = match self.free_shipping_threshold {
            Some(threshold) if taxable >= threshold => 0,
            _ => self.shipping_flat,
        };

        let total_amount = taxable
            .checked_add(tax_amount)?
            .checked_add(shipping_amount)?;

        Some(OrderTotals {
            subtotal,
            discount_amount,
            tax_amount,
            shipping_amount,
            total_amount,
        })
    }
}
