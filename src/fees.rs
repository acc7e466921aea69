//! Platform fee computation in basis points.
//!
//! All arithmetic is exact integer floor division; the only rounding is
//! truncation toward zero in `compute_fee`.

use crate::error::{EscrowError, Result};

/// 10000 bps = 100%.
pub const MAX_FEE_BPS: u16 = 10_000;

/// Global fee applied when a merchant has no override: 100 bps = 1%.
pub const DEFAULT_FEE_BPS: u16 = 100;

/// Validates that a fee lies in the [0, 10000] bps domain.
///
/// Callers must reject out-of-range values before storing them.
pub fn validate_fee_bps(bps: u16) -> Result<()> {
    if bps > MAX_FEE_BPS {
        return Err(EscrowError::InvalidFeeValue(bps));
    }
    Ok(())
}

/// Computes `floor(amount * bps / 10000)`.
///
/// The intermediate product is widened to u128 so it cannot overflow for any
/// u64 amount. For bps in [0, 10000] the result never exceeds `amount`.
pub fn compute_fee(amount: u64, bps: u16) -> u64 {
    (u128::from(amount) * u128::from(bps) / u128::from(MAX_FEE_BPS)) as u64
}

/// Computes the merchant's net proceeds: `amount - compute_fee(amount, bps)`.
pub fn net_amount(amount: u64, bps: u16) -> u64 {
    amount - compute_fee(amount, bps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_at_default_rate() {
        // 1% of 2_000_000
        assert_eq!(compute_fee(2_000_000, DEFAULT_FEE_BPS), 20_000);
        assert_eq!(net_amount(2_000_000, DEFAULT_FEE_BPS), 1_980_000);
    }

    #[test]
    fn test_fee_floors_toward_zero() {
        // 2.5% of 99 = 2.475, floors to 2
        assert_eq!(compute_fee(99, 250), 2);
        assert_eq!(net_amount(99, 250), 97);
    }

    #[test]
    fn test_zero_bps_takes_no_fee() {
        assert_eq!(compute_fee(1_000_000, 0), 0);
        assert_eq!(net_amount(1_000_000, 0), 1_000_000);
    }

    #[test]
    fn test_full_fee_takes_everything() {
        assert_eq!(compute_fee(1_000_000, MAX_FEE_BPS), 1_000_000);
        assert_eq!(net_amount(1_000_000, MAX_FEE_BPS), 0);
    }

    #[test]
    fn test_small_amounts_round_to_zero_fee() {
        // floor(99 * 100 / 10000) = 0
        assert_eq!(compute_fee(99, DEFAULT_FEE_BPS), 0);
        assert_eq!(net_amount(99, DEFAULT_FEE_BPS), 99);
    }

    #[test]
    fn test_no_overflow_at_u64_max() {
        assert_eq!(compute_fee(u64::MAX, MAX_FEE_BPS), u64::MAX);
        assert_eq!(net_amount(u64::MAX, MAX_FEE_BPS), 0);
    }

    #[test]
    fn test_validate_fee_bps_bounds() {
        assert!(validate_fee_bps(0).is_ok());
        assert!(validate_fee_bps(MAX_FEE_BPS).is_ok());
        assert_eq!(
            validate_fee_bps(MAX_FEE_BPS + 1),
            Err(EscrowError::InvalidFeeValue(10_001))
        );
    }
}
