pub mod constant_price;
pub mod constant_product;
pub mod offset;

use crate::errors::SwapError;
use crate::math;
use anchor_lang::prelude::*;

/// Curve chosen when the pool is created.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CurveVariant {
    /// reserve_a * reserve_b = k
    #[default]
    ConstantProduct,
    /// Fixed rate of `numerator / denominator` token B per token A
    ConstantPrice { numerator: u64, denominator: u64 },
    /// Constant product with a virtual token B reserve added on top
    Offset { token_b_offset: u64 },
}

/// Side of the pool the trader pays into.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradeDirection {
    AtoB,
    BtoA,
}

/// A pair of token A and token B amounts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TradingTokens {
    pub token_a: u64,
    pub token_b: u64,
}

impl CurveVariant {
    /// Borsh tag plus the widest variant
    pub const LEN: usize = 1 + 8 + 8;

    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::ConstantProduct => Ok(()),
            Self::ConstantPrice {
                numerator,
                denominator,
            } => {
                require!(numerator > 0 && denominator > 0, SwapError::InvalidRatio);
                Ok(())
            }
            Self::Offset { token_b_offset } => {
                require!(token_b_offset > 0, SwapError::InvalidRatio);
                Ok(())
            }
        }
    }

    /// Amount of the destination token paid for `amount_in`, which must
    /// already be net of trading fees.
    pub fn swap(
        &self,
        direction: TradeDirection,
        reserve_in: u64,
        reserve_out: u64,
        amount_in: u64,
    ) -> Result<u64> {
        match (*self, direction) {
            (Self::ConstantProduct, _) => constant_product::swap(reserve_in, reserve_out, amount_in),
            (
                Self::ConstantPrice {
                    numerator,
                    denominator,
                },
                TradeDirection::AtoB,
            ) => constant_price::swap(reserve_out, amount_in, numerator, denominator),
            (
                Self::ConstantPrice {
                    numerator,
                    denominator,
                },
                TradeDirection::BtoA,
            ) => constant_price::swap(reserve_out, amount_in, denominator, numerator),
            (Self::Offset { token_b_offset }, direction) => offset::swap(
                reserve_in,
                reserve_out,
                amount_in,
                token_b_offset,
                direction == TradeDirection::AtoB,
            ),
        }
    }

    /// Trading tokens a depositor owes for `pool_tokens` new pool tokens.
    pub fn deposit_amounts(
        &self,
        pool_tokens: u64,
        pool_token_supply: u64,
        reserve_a: u64,
        reserve_b: u64,
    ) -> Result<TradingTokens> {
        require!(pool_token_supply > 0, SwapError::InsufficientLiquidity);
        let amounts = proportional(pool_tokens, pool_token_supply, reserve_a, reserve_b)?;
        require!(
            amounts.token_a > 0 && amounts.token_b > 0,
            SwapError::ZeroTradingTokens
        );
        Ok(amounts)
    }

    /// Trading tokens released when `pool_tokens` pool tokens are burned.
    pub fn withdraw_amounts(
        &self,
        pool_tokens: u64,
        pool_token_supply: u64,
        reserve_a: u64,
        reserve_b: u64,
    ) -> Result<TradingTokens> {
        require!(
            pool_tokens <= pool_token_supply,
            SwapError::InsufficientLiquidity
        );
        proportional(pool_tokens, pool_token_supply, reserve_a, reserve_b)
    }

    /// Seeds an empty pool at initialize. The creator's amounts set the
    /// starting price and earn the fixed bootstrap supply.
    pub fn bootstrap_deposit(
        &self,
        token_a: u64,
        token_b: u64,
        bootstrap_supply: u64,
    ) -> Result<(TradingTokens, u64)> {
        require!(token_a > 0 && token_b > 0, SwapError::ZeroTradingTokens);
        require!(bootstrap_supply > 0, SwapError::ZeroTradingTokens);
        Ok((TradingTokens { token_a, token_b }, bootstrap_supply))
    }
}

/// Floors `reserve * pool_tokens / supply` on both sides.
fn proportional(
    pool_tokens: u64,
    pool_token_supply: u64,
    reserve_a: u64,
    reserve_b: u64,
) -> Result<TradingTokens> {
    Ok(TradingTokens {
        token_a: math::mul_div_floor(reserve_a, pool_tokens, pool_token_supply)?,
        token_b: math::mul_div_floor(reserve_b, pool_tokens, pool_token_supply)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_swap_error;
    use proptest::prelude::*;

    #[test]
    fn test_validate_rejects_degenerate_parameters() {
        assert!(CurveVariant::ConstantProduct.validate().is_ok());
        assert_swap_error(
            CurveVariant::ConstantPrice {
                numerator: 0,
                denominator: 1,
            }
            .validate(),
            SwapError::InvalidRatio,
        );
        assert_swap_error(
            CurveVariant::Offset { token_b_offset: 0 }.validate(),
            SwapError::InvalidRatio,
        );
    }

    #[test]
    fn test_constant_price_direction_inverts_rate() {
        let curve = CurveVariant::ConstantPrice {
            numerator: 2,
            denominator: 1,
        };
        assert_eq!(curve.swap(TradeDirection::AtoB, 1_000, 1_000, 10).unwrap(), 20);
        assert_eq!(curve.swap(TradeDirection::BtoA, 1_000, 1_000, 10).unwrap(), 5);
    }

    #[test]
    fn test_deposit_amounts_are_proportional() {
        let amounts = CurveVariant::ConstantProduct
            .deposit_amounts(100, 1_000, 10_000, 1_000)
            .unwrap();
        assert_eq!(amounts, TradingTokens { token_a: 1_000, token_b: 100 });
    }

    #[test]
    fn test_deposit_too_small_to_cost_anything() {
        assert_swap_error(
            CurveVariant::ConstantProduct.deposit_amounts(1, 1_000_000, 10_000, 1_000),
            SwapError::ZeroTradingTokens,
        );
    }

    #[test]
    fn test_deposit_into_empty_pool_requires_bootstrap() {
        assert_swap_error(
            CurveVariant::ConstantProduct.deposit_amounts(10, 0, 0, 0),
            SwapError::InsufficientLiquidity,
        );
        let (amounts, minted) = CurveVariant::ConstantProduct
            .bootstrap_deposit(10_000, 1_000, 1_000_000_000)
            .unwrap();
        assert_eq!(amounts, TradingTokens { token_a: 10_000, token_b: 1_000 });
        assert_eq!(minted, 1_000_000_000);
    }

    #[test]
    fn test_withdraw_more_than_supply() {
        assert_swap_error(
            CurveVariant::ConstantProduct.withdraw_amounts(11, 10, 100, 100),
            SwapError::InsufficientLiquidity,
        );
    }

    proptest! {
        #[test]
        fn deposit_then_withdraw_round_trips(
            reserve_a in 1_000u64..1_000_000_000,
            reserve_b in 1_000u64..1_000_000_000,
            supply in 1_000u64..1_000_000_000,
            pool_tokens in 1u64..1_000_000_000,
        ) {
            let curve = CurveVariant::ConstantProduct;
            let paid = curve.deposit_amounts(pool_tokens, supply, reserve_a, reserve_b);
            prop_assume!(paid.is_ok());
            let paid = paid.unwrap();

            let returned = curve
                .withdraw_amounts(
                    pool_tokens,
                    supply + pool_tokens,
                    reserve_a + paid.token_a,
                    reserve_b + paid.token_b,
                )
                .unwrap();
            // both legs floor the same ratio, so nothing is gained or lost
            prop_assert_eq!(returned, paid);
        }
    }
}
