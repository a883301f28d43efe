use crate::errors::SwapError;
use anchor_lang::prelude::*;

/// `floor(a * b / c)`
pub fn mul_div_floor(a: u64, b: u64, c: u64) -> Result<u64> {
    let value = (a as u128)
        .checked_mul(b as u128)
        .and_then(|v| v.checked_div(c as u128))
        .ok_or(SwapError::OverflowError)?;
    to_u64(value)
}

/// `ceil(numerator / denominator)` on widened values.
pub fn ceil_div(numerator: u128, denominator: u128) -> Result<u128> {
    require!(denominator > 0, SwapError::OverflowError);
    let quotient = numerator / denominator;
    if numerator % denominator == 0 {
        Ok(quotient)
    } else {
        Ok(quotient + 1)
    }
}

pub fn checked_add(a: u64, b: u64) -> Result<u64> {
    Ok(a.checked_add(b).ok_or(SwapError::OverflowError)?)
}

pub fn checked_sub(a: u64, b: u64) -> Result<u64> {
    Ok(a.checked_sub(b).ok_or(SwapError::OverflowError)?)
}

/// Narrows a widened intermediate back to a token amount.
pub fn to_u64(value: u128) -> Result<u64> {
    Ok(u64::try_from(value).map_err(|_| SwapError::OverflowError)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_swap_error;

    #[test]
    fn test_mul_div_floor_truncates() {
        assert_eq!(mul_div_floor(10, 3, 4).unwrap(), 7);
        assert_eq!(mul_div_floor(12, 1000, 10012).unwrap(), 1);
    }

    #[test]
    fn test_ceil_div_rounds_up_only_on_remainder() {
        assert_eq!(ceil_div(30, 4).unwrap(), 8);
        assert_eq!(ceil_div(24, 4).unwrap(), 6);
        // 10000 * 1000 / 10012
        assert_eq!(ceil_div(10_000_000, 10_012).unwrap(), 999);
    }

    #[test]
    fn test_wide_intermediate_does_not_overflow() {
        // u64::MAX * u64::MAX fits in u128, the quotient fits back in u64
        assert_eq!(mul_div_floor(u64::MAX, u64::MAX, u64::MAX).unwrap(), u64::MAX);
    }

    #[test]
    fn test_narrowing_overflow_is_an_error() {
        assert_swap_error(mul_div_floor(u64::MAX, 2, 1), SwapError::OverflowError);
        assert!(to_u64(u64::MAX as u128 + 1).is_err());
    }

    #[test]
    fn test_zero_divisor_is_an_error() {
        assert_swap_error(mul_div_floor(1, 1, 0), SwapError::OverflowError);
        assert!(ceil_div(1, 0).is_err());
    }

    #[test]
    fn test_checked_add_sub() {
        assert_eq!(checked_add(1, 2).unwrap(), 3);
        assert!(checked_add(u64::MAX, 1).is_err());
        assert!(checked_sub(1, 2).is_err());
    }
}
