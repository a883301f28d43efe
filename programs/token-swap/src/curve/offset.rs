use super::constant_product;
use crate::errors::SwapError;
use crate::math;
use anchor_lang::prelude::*;

/// Constant product over `(reserve_a, reserve_b + token_b_offset)`.
///
/// `a_to_b` selects which side the offset applies to. The output is still
/// bounded by the real `reserve_out`.
pub fn swap(
    reserve_in: u64,
    reserve_out: u64,
    amount_in: u64,
    token_b_offset: u64,
    a_to_b: bool,
) -> Result<u64> {
    let (virtual_in, virtual_out) = if a_to_b {
        (reserve_in, math::checked_add(reserve_out, token_b_offset)?)
    } else {
        (math::checked_add(reserve_in, token_b_offset)?, reserve_out)
    };

    let amount_out = constant_product::swap(virtual_in, virtual_out, amount_in)?;
    require!(amount_out < reserve_out, SwapError::InsufficientLiquidity);
    Ok(amount_out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_swap_error;

    #[test]
    fn test_offset_prices_against_virtual_reserve() {
        // 1000 A against 10 real + 990 virtual B prices like 1000/1000
        assert_eq!(swap(1_000, 10, 5, 990, true).unwrap(), 4);
    }

    #[test]
    fn test_offset_cannot_pay_out_virtual_tokens() {
        assert_swap_error(swap(1_000, 10, 100, 990, true), SwapError::InsufficientLiquidity);
    }

    #[test]
    fn test_offset_b_to_a_uses_virtual_input_reserve() {
        // 1000 virtual B in, 1000 A out side
        assert_eq!(swap(10, 1_000, 5, 990, false).unwrap(), 4);
    }

    #[test]
    fn test_zero_offset_matches_constant_product() {
        assert_eq!(
            swap(10_000, 1_000, 12, 0, true).unwrap(),
            constant_product::swap(10_000, 1_000, 12).unwrap()
        );
    }
}
