//! Pricing policy: the floor and market signals handed to the reasoner.
//!
//! These values are advisory. The reasoner is trusted to respect the floor
//! and its counter price is not re-validated against it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Price, Timestamp};
use crate::domain::item::Item;

/// Share of the asking price used as floor when the seller set none.
pub const DEFAULT_FLOOR_PERCENT: u8 = 75;

/// Demand signals for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketContext {
    pub view_count: u32,
    pub days_listed: u32,
}

/// Computes negotiation bounds for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    default_floor_percent: u8,
}

impl PricingPolicy {
    pub fn new(default_floor_percent: u8) -> Self {
        Self {
            default_floor_percent: default_floor_percent.min(100),
        }
    }

    /// Seller floor if set, else a fixed share of the current price.
    pub fn effective_floor(&self, item: &Item) -> Price {
        item.min_price()
            .unwrap_or_else(|| item.price().percent(self.default_floor_percent))
    }

    /// View count and whole days since listing, measured at `now`.
    pub fn market_context(&self, item: &Item, now: &Timestamp) -> MarketContext {
        MarketContext {
            view_count: item.view_count(),
            days_listed: now.whole_days_since(item.created_at()),
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FLOOR_PERCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ItemId, UserId};
    use crate::domain::item::ItemStatus;
    use proptest::prelude::*;

    fn item(price: i64, min_price: Option<i64>, views: u32, created_at: Timestamp) -> Item {
        Item::reconstitute(
            ItemId::new(),
            "Camera".to_string(),
            String::new(),
            Price::new(price).unwrap(),
            Price::new(price).unwrap(),
            min_price.map(|p| Price::new(p).unwrap()),
            ItemStatus::OnSale,
            UserId::new("seller").unwrap(),
            None,
            views,
            true,
            None,
            created_at,
            created_at,
            0,
        )
    }

    #[test]
    fn seller_floor_wins() {
        let policy = PricingPolicy::default();
        let it = item(10000, Some(8000), 0, Timestamp::now());
        assert_eq!(policy.effective_floor(&it).amount(), 8000);
    }

    #[test]
    fn default_floor_is_three_quarters_of_price() {
        let policy = PricingPolicy::default();
        let it = item(10000, None, 0, Timestamp::now());
        assert_eq!(policy.effective_floor(&it).amount(), 7500);
    }

    #[test]
    fn market_context_counts_whole_days() {
        let now = Timestamp::now();
        let it = item(10000, None, 42, now.minus_days(6).minus_hours(12));
        let ctx = PricingPolicy::default().market_context(&it, &now);
        assert_eq!(ctx.view_count, 42);
        assert_eq!(ctx.days_listed, 6);
    }

    #[test]
    fn percent_is_capped_at_one_hundred() {
        let policy = PricingPolicy::new(150);
        let it = item(1000, None, 0, Timestamp::now());
        assert_eq!(policy.effective_floor(&it).amount(), 1000);
    }

    proptest! {
        #[test]
        fn default_floor_never_exceeds_price(price in 0i64..=i64::MAX, percent in 1u8..=100) {
            let policy = PricingPolicy::new(percent);
            let it = item(price, None, 0, Timestamp::now());
            let floor = policy.effective_floor(&it).amount();
            prop_assert!(floor <= price);
            prop_assert!(floor >= 0);
        }

        #[test]
        fn explicit_floor_is_returned_verbatim(price in 1i64..10_000_000, ratio in 0.0f64..=1.0) {
            let min = (price as f64 * ratio) as i64;
            let it = item(price, Some(min), 0, Timestamp::now());
            prop_assert_eq!(PricingPolicy::default().effective_floor(&it).amount(), min);
        }
    }
}
