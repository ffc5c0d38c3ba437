//! Pricing Config

use clap::Args;

use attar_app::domain::orders::pricing::PricingPolicy;

/// Checkout pricing settings, in minor currency units.
#[derive(Debug, Args)]
pub struct PricingConfig {
    /// Tax rate in basis points (1800 = 18%)
    #[arg(long, env = "TAX_RATE_BPS", default_value_t = 0)]
    pub tax_rate_bps: u32,

    /// Flat shipping charge per order
    #[arg(long, env = "SHIPPING_FLAT", default_value_t = 0)]
    pub shipping_flat: u64,

    /// Discounted subtotal at or above which shipping is free
    #[arg(long, env = "FREE_SHIPPING_THRESHOLD")]
    pub free_shipping_threshold: Option<u64>,
}

impl PricingConfig {
    #[must_use]
    pub fn policy(&self) -> PricingPolicy {
        PricingPolicy {
            tax_rate_bps: self.tax_rate_bps,
            shipping_flat: self.shipping_flat,
            free_shipping_threshold: self.free_shipping_threshold,
        }
    }
}
