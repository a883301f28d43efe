use crate::errors::SwapError;
use crate::math;
use anchor_lang::prelude::*;

/// Output for `amount_in` (already net of fees) against the pool reserves.
///
/// - k = reserve_in * reserve_out
/// - reserve_in' = reserve_in + amount_in
/// - reserve_out' = ceil(k / reserve_in')
/// - amount_out = reserve_out - reserve_out'
///
/// Rounding the new output reserve up floors what the trader receives, so
/// `reserve_in' * reserve_out' >= k` holds exactly.
pub fn swap(reserve_in: u64, reserve_out: u64, amount_in: u64) -> Result<u64> {
    require!(
        reserve_in > 0 && reserve_out > 0,
        SwapError::InsufficientLiquidity
    );

    let new_reserve_in = reserve_in as u128 + amount_in as u128;
    let invariant = invariant(reserve_in, reserve_out);
    let new_reserve_out = math::ceil_div(invariant, new_reserve_in)?;

    // reserve_out' <= reserve_out because reserve_in' >= reserve_in
    let amount_out = reserve_out as u128 - new_reserve_out;
    require!(
        amount_out < reserve_out as u128,
        SwapError::InsufficientLiquidity
    );
    math::to_u64(amount_out)
}

/// The product the curve preserves.
pub fn invariant(reserve_a: u64, reserve_b: u64) -> u128 {
    reserve_a as u128 * reserve_b as u128
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_swap_error;
    use proptest::prelude::*;

    #[test]
    fn test_reference_pool_output() {
        // 10000 A / 1000 B, 12 A in
        assert_eq!(swap(10_000, 1_000, 12).unwrap(), 1);
    }

    #[test]
    fn test_output_matches_closed_form() {
        // floor(dx * y / (x + dx))
        assert_eq!(swap(1_000_000, 1_000_000, 1_000).unwrap(), 999);
        assert_eq!(swap(5_000, 20_000, 5_000).unwrap(), 10_000);
    }

    #[test]
    fn test_zero_input_gives_zero_output() {
        assert_eq!(swap(1_000, 1_000, 0).unwrap(), 0);
    }

    #[test]
    fn test_pool_cannot_be_drained() {
        // even an enormous input leaves the last unit behind
        let out = swap(1, 1, u64::MAX).unwrap();
        assert_eq!(out, 0);
        assert_swap_error(swap(0, 1_000, 10), SwapError::InsufficientLiquidity);
        assert_swap_error(swap(1_000, 0, 10), SwapError::InsufficientLiquidity);
    }

    #[test]
    fn test_invariant_of_reference_pool() {
        assert_eq!(invariant(10_000, 1_000), 10_000_000);
    }

    proptest! {
        #[test]
        fn invariant_never_decreases(
            reserve_in in 1u64..1_000_000_000_000,
            reserve_out in 1u64..1_000_000_000_000,
            amount_in in 0u64..1_000_000_000_000,
        ) {
            let out = swap(reserve_in, reserve_out, amount_in).unwrap();
            let before = invariant(reserve_in, reserve_out);
            let after = invariant(reserve_in + amount_in, reserve_out - out);
            prop_assert!(after >= before);
        }

        #[test]
        fn output_stays_below_reserve(
            reserve_in in 1u64..u64::MAX,
            reserve_out in 1u64..u64::MAX,
            amount_in in 0u64..u64::MAX,
        ) {
            let out = swap(reserve_in, reserve_out, amount_in).unwrap();
            prop_assert!(out < reserve_out);
        }
    }
}
