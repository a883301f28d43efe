use crate::curve::{CurveVariant, TradeDirection};
use crate::errors::SwapError;
use crate::fees::FeeSchedule;
use anchor_lang::prelude::*;

/// Authoritative record of a single swap pool
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct SwapPool {
    /// Set once by initialize, never cleared
    pub is_initialized: bool,

    /// Incremented on every committed state transition
    pub version: u64,

    /// PDA that owns the vaults and mints pool tokens
    pub authority: Pubkey,

    /// Bump seed for `authority`
    pub bump: u8,

    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub token_a_vault: Pubkey,
    pub token_b_vault: Pubkey,
    pub pool_mint: Pubkey,

    /// Wallet whose pool token accounts collect owner trade and withdrawal fees
    pub fee_owner: Pubkey,

    pub reserve_a: u64,
    pub reserve_b: u64,

    /// Outstanding pool tokens across all liquidity providers
    pub pool_token_supply: u64,

    /// Owner trade fees earned by swaps, in pool tokens not yet minted
    pub owner_fee_pool_tokens: u64,

    /// Host trade fees earned by swaps, in pool tokens not yet minted
    pub host_fee_pool_tokens: u64,

    pub fee_schedule: FeeSchedule,
    pub curve: CurveVariant,
}

impl SwapPool {
    /// Size calculation for account allocation (without the discriminator)
    pub const ACCOUNT_SIZE: usize = 1
        + 8
        + 32
        + 1
        + 32 * 6
        + 8 * 5
        + FeeSchedule::LEN
        + CurveVariant::LEN;

    pub fn is_active(&self) -> bool {
        self.is_initialized
    }

    /// `(reserve_in, reserve_out)` for a trade in `direction`.
    pub fn reserves(&self, direction: TradeDirection) -> (u64, u64) {
        match direction {
            TradeDirection::AtoB => (self.reserve_a, self.reserve_b),
            TradeDirection::BtoA => (self.reserve_b, self.reserve_a),
        }
    }

    /// Direction of a trade paying into `source_vault`.
    pub fn direction_for_source_vault(&self, source_vault: &Pubkey) -> Result<TradeDirection> {
        if *source_vault == self.token_a_vault {
            Ok(TradeDirection::AtoB)
        } else if *source_vault == self.token_b_vault {
            Ok(TradeDirection::BtoA)
        } else {
            err!(SwapError::IncorrectSwapAccount)
        }
    }

    /// Vault pair `(source, destination)` for a trade in `direction`.
    pub fn vaults(&self, direction: TradeDirection) -> (Pubkey, Pubkey) {
        match direction {
            TradeDirection::AtoB => (self.token_a_vault, self.token_b_vault),
            TradeDirection::BtoA => (self.token_b_vault, self.token_a_vault),
        }
    }
}
