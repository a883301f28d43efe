use crate::curve::CurveVariant;
use anchor_lang::prelude::*;

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub curve: CurveVariant,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub pool_tokens_minted: u64,
}

#[event]
pub struct SwapExecuted {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub a_to_b: bool,
    pub amount_in: u64,
    pub amount_out: u64,
    pub trade_fee: u64,
    pub owner_fee: u64,
    pub host_fee: u64,
    /// Host pool token account named by the trade, if any
    pub host: Option<Pubkey>,
    pub owner_fee_pool_tokens: u64,
    pub host_fee_pool_tokens: u64,
}

#[event]
pub struct LiquidityDeposited {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub token_a_amount: u64,
    pub token_b_amount: u64,
    pub pool_tokens_minted: u64,
}

#[event]
pub struct LiquidityWithdrawn {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub token_a_amount: u64,
    pub token_b_amount: u64,
    pub pool_tokens_burned: u64,
    pub withdraw_fee: u64,
}

#[event]
pub struct FeesCollected {
    pub pool: Pubkey,
    pub owner_pool_tokens: u64,
    pub host_pool_tokens: u64,
}
