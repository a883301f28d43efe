use anchor_lang::prelude::*;

pub mod curve;
pub mod engine;
pub mod errors;
pub mod events;
pub mod fees;
pub mod instructions;
pub mod math;
pub mod registry;
pub mod state;

use curve::CurveVariant;
use fees::FeeSchedule;
use instructions::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod token_swap {
    use super::*;

    /// Create a pool, seed it with the creator's reserves and mint the
    /// bootstrap pool token supply to the creator
    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        curve: CurveVariant,
        fee_schedule: FeeSchedule,
        initial_token_a_amount: u64,
        initial_token_b_amount: u64,
    ) -> Result<()> {
        instructions::initialize_pool::process(
            ctx,
            curve,
            fee_schedule,
            initial_token_a_amount,
            initial_token_b_amount,
        )
    }

    /// Add liquidity to the pool and receive pool tokens
    pub fn deposit_liquidity(
        ctx: Context<ManageLiquidity>,
        pool_token_amount: u64,
        maximum_token_a_amount: u64,
        maximum_token_b_amount: u64,
    ) -> Result<()> {
        instructions::manage_liquidity::deposit(
            ctx,
            pool_token_amount,
            maximum_token_a_amount,
            maximum_token_b_amount,
        )
    }

    /// Remove liquidity from the pool by burning pool tokens
    pub fn withdraw_liquidity(
        ctx: Context<ManageLiquidity>,
        pool_token_amount: u64,
        minimum_token_a_amount: u64,
        minimum_token_b_amount: u64,
    ) -> Result<()> {
        instructions::manage_liquidity::withdraw(
            ctx,
            pool_token_amount,
            minimum_token_a_amount,
            minimum_token_b_amount,
        )
    }

    /// Swap tokens along the pool's curve
    pub fn swap_tokens(
        ctx: Context<SwapTokens>,
        amount_in: u64,
        minimum_amount_out: u64,
    ) -> Result<()> {
        instructions::swap::process(ctx, amount_in, minimum_amount_out)
    }

    /// Mint the owner and host trade fees accrued by swaps
    pub fn collect_fees(ctx: Context<CollectFees>) -> Result<()> {
        instructions::collect_fees::process(ctx)
    }
}
