use crate::errors::SwapError;
use crate::math;
use anchor_lang::prelude::*;

/// Converts `amount_in` at `numerator / denominator` output tokens per input
/// token, floored. The result must leave part of `reserve_out` behind.
pub fn swap(reserve_out: u64, amount_in: u64, numerator: u64, denominator: u64) -> Result<u64> {
    require!(denominator > 0, SwapError::InvalidRatio);
    let amount_out = math::mul_div_floor(amount_in, numerator, denominator)?;
    require!(amount_out < reserve_out, SwapError::InsufficientLiquidity);
    Ok(amount_out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_swap_error;

    #[test]
    fn test_fixed_rate() {
        // 3 B per 2 A
        assert_eq!(swap(1_000, 10, 3, 2).unwrap(), 15);
        assert_eq!(swap(1_000, 11, 3, 2).unwrap(), 16);
        // and the inverse direction
        assert_eq!(swap(1_000, 15, 2, 3).unwrap(), 10);
    }

    #[test]
    fn test_bounded_by_reserve() {
        assert_swap_error(swap(15, 10, 3, 2), SwapError::InsufficientLiquidity);
        assert_eq!(swap(16, 10, 3, 2).unwrap(), 15);
    }

    #[test]
    fn test_zero_rate_denominator() {
        assert_swap_error(swap(1_000, 10, 1, 0), SwapError::InvalidRatio);
    }
}
