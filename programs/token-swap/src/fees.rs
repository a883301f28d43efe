use crate::errors::SwapError;
use crate::math;
use anchor_lang::prelude::*;

/// A fee expressed as `numerator / denominator`.
///
/// A zero denominator disables the fee.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeFraction {
    pub numerator: u64,
    pub denominator: u64,
}

impl FeeFraction {
    pub const LEN: usize = 8 + 8;

    pub const fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.denominator == 0 {
            require!(self.numerator == 0, SwapError::InvalidFeeFraction);
        } else {
            require!(
                self.numerator <= self.denominator,
                SwapError::InvalidFeeFraction
            );
        }
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.denominator != 0 && self.numerator != 0
    }
}

/// `floor(amount * numerator / denominator)`, or 0 when the fee is disabled.
pub fn compute_fee(fraction: &FeeFraction, amount: u64) -> Result<u64> {
    if fraction.denominator == 0 {
        return Ok(0);
    }
    math::mul_div_floor(amount, fraction.numerator, fraction.denominator)
}

/// Fee configuration fixed at pool creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSchedule {
    /// Kept in the pool, accrues to liquidity providers
    pub trade: FeeFraction,
    /// Carved out of each trade for the pool owner
    pub owner_trade: FeeFraction,
    /// Taken from pool tokens on every withdrawal
    pub owner_withdraw: FeeFraction,
    /// Share of the owner trade fee paid to a host, if one is supplied
    pub host: FeeFraction,
}

/// Fee amounts charged on a single trade, all in source-token units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TradeFees {
    pub trade_fee: u64,
    /// Owner share after the host fee has been deducted
    pub owner_fee: u64,
    pub host_fee: u64,
}

impl TradeFees {
    pub fn total(&self) -> Result<u64> {
        let owner_total = math::checked_add(self.owner_fee, self.host_fee)?;
        math::checked_add(self.trade_fee, owner_total)
    }
}

/// Pool tokens worth a trade fee that has been added to one reserve.
///
/// The fee only grows one side of the pool, so it is valued at half of its
/// proportional share: `floor(fee * supply / reserve) / 2`, with `reserve`
/// already including the fee.
pub fn fee_pool_tokens(fee: u64, reserve: u64, supply: u64) -> Result<u64> {
    if fee == 0 {
        return Ok(0);
    }
    Ok(math::mul_div_floor(fee, supply, reserve)? / 2)
}

impl FeeSchedule {
    pub const LEN: usize = FeeFraction::LEN * 4;

    /// A schedule that never charges anything.
    pub const fn disabled() -> Self {
        Self {
            trade: FeeFraction::new(0, 0),
            owner_trade: FeeFraction::new(0, 0),
            owner_withdraw: FeeFraction::new(0, 0),
            host: FeeFraction::new(0, 0),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.trade.validate()?;
        self.owner_trade.validate()?;
        self.owner_withdraw.validate()?;
        self.host.validate()
    }

    pub fn trading_fee(&self, amount: u64) -> Result<u64> {
        compute_fee(&self.trade, amount)
    }

    pub fn owner_trading_fee(&self, amount: u64) -> Result<u64> {
        compute_fee(&self.owner_trade, amount)
    }

    /// Host share of an owner trade fee.
    pub fn host_fee(&self, owner_fee: u64) -> Result<u64> {
        compute_fee(&self.host, owner_fee)
    }

    pub fn owner_withdraw_fee(&self, pool_tokens: u64) -> Result<u64> {
        compute_fee(&self.owner_withdraw, pool_tokens)
    }

    /// Splits the fees owed on a gross trade amount.
    ///
    /// Trade and owner fees are both taken from `amount_in`, never compounded.
    /// The host fee comes out of the owner fee, so the trader pays the same
    /// total whether or not a host is present.
    pub fn trade_fees(&self, amount_in: u64, with_host: bool) -> Result<TradeFees> {
        let trade_fee = self.trading_fee(amount_in)?;
        let owner_gross = self.owner_trading_fee(amount_in)?;
        let host_fee = if with_host {
            self.host_fee(owner_gross)?
        } else {
            0
        };
        Ok(TradeFees {
            trade_fee,
            owner_fee: math::checked_sub(owner_gross, host_fee)?,
            host_fee,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_swap_error;
    use proptest::prelude::*;

    fn schedule() -> FeeSchedule {
        FeeSchedule {
            trade: FeeFraction::new(25, 10_000),
            owner_trade: FeeFraction::new(5, 10_000),
            owner_withdraw: FeeFraction::new(1, 6),
            host: FeeFraction::new(20, 100),
        }
    }

    #[test]
    fn test_compute_fee_floors() {
        let fraction = FeeFraction::new(3, 1000);
        assert_eq!(compute_fee(&fraction, 1000).unwrap(), 3);
        assert_eq!(compute_fee(&fraction, 999).unwrap(), 2);
        assert_eq!(compute_fee(&fraction, 333).unwrap(), 0);
    }

    #[test]
    fn test_zero_denominator_disables_fee() {
        let fraction = FeeFraction::new(0, 0);
        assert_eq!(compute_fee(&fraction, u64::MAX).unwrap(), 0);
        assert!(!fraction.is_enabled());
    }

    #[test]
    fn test_validate_rejects_numerator_above_denominator() {
        assert_swap_error(FeeFraction::new(11, 10).validate(), SwapError::InvalidFeeFraction);
        assert_swap_error(FeeFraction::new(1, 0).validate(), SwapError::InvalidFeeFraction);
        assert!(FeeFraction::new(10, 10).validate().is_ok());
        assert!(FeeFraction::new(0, 0).validate().is_ok());

        let mut fees = schedule();
        fees.host = FeeFraction::new(101, 100);
        assert_swap_error(fees.validate(), SwapError::InvalidFeeFraction);
    }

    #[test]
    fn test_trade_and_owner_fees_are_not_compounded() {
        let fees = schedule().trade_fees(100_000, false).unwrap();
        assert_eq!(fees.trade_fee, 250);
        assert_eq!(fees.owner_fee, 50);
        assert_eq!(fees.host_fee, 0);
        assert_eq!(fees.total().unwrap(), 300);
    }

    #[test]
    fn test_fee_pool_tokens_values_half_the_share() {
        // 40 out of a 1_100_000 reserve against a supply of 1e9
        assert_eq!(fee_pool_tokens(40, 1_100_000, 1_000_000_000).unwrap(), 18_181);
        assert_eq!(fee_pool_tokens(10, 1_100_000, 1_000_000_000).unwrap(), 4_545);
        assert_eq!(fee_pool_tokens(0, 0, 1_000_000_000).unwrap(), 0);
        assert_swap_error(fee_pool_tokens(1, 0, 1), SwapError::OverflowError);
    }

    #[test]
    fn test_host_fee_comes_out_of_owner_fee() {
        let without_host = schedule().trade_fees(100_000, false).unwrap();
        let with_host = schedule().trade_fees(100_000, true).unwrap();

        assert_eq!(with_host.host_fee, 10);
        assert_eq!(with_host.owner_fee, 40);
        assert_eq!(with_host.total().unwrap(), without_host.total().unwrap());
    }

    #[test]
    fn test_disabled_schedule_charges_nothing() {
        let fees = FeeSchedule::disabled();
        for amount in [0, 1, 12, 10_000, u64::MAX] {
            assert_eq!(fees.trade_fees(amount, true).unwrap(), TradeFees::default());
            assert_eq!(fees.owner_withdraw_fee(amount).unwrap(), 0);
        }
    }

    proptest! {
        #[test]
        fn fee_is_monotonic(amount in 0u64..u64::MAX, num in 0u64..10_000, den in 1u64..10_000) {
            let fraction = FeeFraction::new(num.min(den), den);
            let lower = compute_fee(&fraction, amount).unwrap();
            let upper = compute_fee(&fraction, amount + 1).unwrap();
            prop_assert!(lower <= upper);
        }

        #[test]
        fn fee_is_linear_without_remainder(k in 0u64..1_000_000, num in 0u64..10_000, den in 1u64..10_000) {
            let fraction = FeeFraction::new(num.min(den), den);
            // a multiple of the denominator never leaves a flooring remainder
            let amount = k * den;
            prop_assert_eq!(
                compute_fee(&fraction, 2 * amount).unwrap(),
                2 * compute_fee(&fraction, amount).unwrap()
            );
        }

        #[test]
        fn fee_never_exceeds_amount(amount in 0u64..u64::MAX, num in 0u64..10_000, den in 1u64..10_000) {
            let fraction = FeeFraction::new(num.min(den), den);
            prop_assert!(compute_fee(&fraction, amount).unwrap() <= amount);
        }
    }
}
