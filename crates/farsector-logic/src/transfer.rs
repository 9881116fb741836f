//! Quantity arithmetic for cargo transfers.
//!
//! A transfer between two spacecraft is capped three ways: by what the
//! caller asked for, by what the paying company can afford at the unit
//! price, and by the space left in the destination bays. The functions
//! here compute those caps; moving the cargo and the money is the
//! sector's job.

/// Reputation granted to each party of a completed cross-company trade.
pub const TRADE_REPUTATION_GAIN: f32 = 0.5;

/// How many units a company with `money` credits can buy at `unit_price`.
///
/// A unit price of zero puts no bound on the quantity.
pub fn affordable_quantity(money: u64, unit_price: u64) -> u32 {
    if unit_price == 0 {
        return u32::MAX;
    }
    let affordable = money / unit_price;
    affordable.min(u32::MAX as u64) as u32
}

/// Final quantity to move, given the requested amount and both caps.
pub fn transfer_quota(requested: u32, affordable: u32, free_space: u32) -> u32 {
    requested.min(affordable).min(free_space)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affordable_quantity_divides() {
        assert_eq!(affordable_quantity(10_000, 250), 40);
        assert_eq!(affordable_quantity(50, 10), 5);
        assert_eq!(affordable_quantity(249, 250), 0);
        assert_eq!(affordable_quantity(0, 250), 0);
    }

    #[test]
    fn test_free_transfers_are_unbounded_by_money() {
        assert_eq!(affordable_quantity(0, 0), u32::MAX);
        assert_eq!(affordable_quantity(5, 0), u32::MAX);
    }

    #[test]
    fn test_affordable_quantity_saturates_at_u32() {
        assert_eq!(affordable_quantity(u64::MAX, 1), u32::MAX);
    }

    #[test]
    fn test_quota_takes_the_smallest_cap() {
        assert_eq!(transfer_quota(100, 40, 60), 40);
        assert_eq!(transfer_quota(100, 90, 60), 60);
        assert_eq!(transfer_quota(30, 90, 60), 30);
        assert_eq!(transfer_quota(0, 90, 60), 0);
    }
}
