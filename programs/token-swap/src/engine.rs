use crate::curve::{CurveVariant, TradeDirection, TradingTokens};
use crate::errors::SwapError;
use crate::fees::{fee_pool_tokens, FeeSchedule};
use crate::math;
use crate::state::SwapPool;
use anchor_lang::prelude::*;

/// Pool tokens minted to the creator of a pool
pub const INITIAL_SWAP_POOL_AMOUNT: u64 = 1_000_000_000;

/// Seed prefix of the PDA that owns a pool's vaults
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority";

/// Engine-wide settings, passed in instead of read from globals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Program that owns pool accounts and derives their authorities
    pub program_id: Pubkey,
    /// Pool tokens minted by the bootstrap deposit
    pub bootstrap_supply: u64,
}

impl EngineConfig {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            bootstrap_supply: INITIAL_SWAP_POOL_AMOUNT,
        }
    }
}

/// Token a movement applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Asset {
    TokenA,
    TokenB,
    PoolToken,
}

impl Asset {
    /// `(source, destination)` assets of a trade.
    pub fn trading(direction: TradeDirection) -> (Self, Self) {
        match direction {
            TradeDirection::AtoB => (Self::TokenA, Self::TokenB),
            TradeDirection::BtoA => (Self::TokenB, Self::TokenA),
        }
    }
}

/// Participant in a token movement.
///
/// For pool tokens, a movement out of `Pool` is a mint and a movement into
/// `Pool` is a burn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Party {
    User,
    Pool,
    Owner,
    Host,
}

/// One token movement the ledger must perform to commit a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub asset: Asset,
    pub from: Party,
    pub to: Party,
    pub amount: u64,
}

impl Transfer {
    pub fn is_mint(&self) -> bool {
        self.asset == Asset::PoolToken && self.from == Party::Pool
    }

    pub fn is_burn(&self) -> bool {
        self.asset == Asset::PoolToken && self.to == Party::Pool
    }
}

/// The next pool snapshot, the operation's result, and the movements that
/// realize it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition<R> {
    pub pool: SwapPool,
    pub result: R,
    pub transfers: Vec<Transfer>,
}

/// Account keys recorded on the pool at creation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolAccounts {
    pub authority: Pubkey,
    pub bump: u8,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub token_a_vault: Pubkey,
    pub token_b_vault: Pubkey,
    pub pool_mint: Pubkey,
    pub fee_owner: Pubkey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitializeParams {
    pub accounts: PoolAccounts,
    pub curve: CurveVariant,
    pub fee_schedule: FeeSchedule,
    pub initial_reserve_a: u64,
    pub initial_reserve_b: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapRequest {
    pub direction: TradeDirection,
    pub amount_in: u64,
    pub minimum_amount_out: u64,
    /// Whether a host fee account takes part in the trade
    pub with_host: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapResult {
    pub amount_in: u64,
    pub amount_out: u64,
    pub trade_fee: u64,
    pub owner_fee: u64,
    pub host_fee: u64,
    /// Pool-token value of `owner_fee`, accrued on the pool
    pub owner_fee_pool_tokens: u64,
    /// Pool-token value of `host_fee`, accrued on the pool
    pub host_fee_pool_tokens: u64,
    pub new_reserve_a: u64,
    pub new_reserve_b: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositRequest {
    pub pool_token_amount: u64,
    pub maximum_token_a_amount: u64,
    pub maximum_token_b_amount: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositResult {
    pub token_a_amount: u64,
    pub token_b_amount: u64,
    pub pool_token_amount: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawRequest {
    pub pool_token_amount: u64,
    pub minimum_token_a_amount: u64,
    pub minimum_token_b_amount: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawResult {
    pub token_a_amount: u64,
    pub token_b_amount: u64,
    pub pool_tokens_burned: u64,
    /// Pool tokens moved to the owner instead of burned
    pub withdraw_fee: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollectResult {
    pub owner_pool_tokens: u64,
    pub host_pool_tokens: u64,
}

pub struct PoolEngine {
    config: EngineConfig,
}

impl PoolEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// PDA that owns the vaults of `pool_key`.
    pub fn pool_authority(&self, pool_key: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[POOL_AUTHORITY_SEED, pool_key.as_ref()],
            &self.config.program_id,
        )
    }

    /// Activates an empty pool with the creator's reserves and mints the
    /// bootstrap supply to the creator.
    pub fn initialize(
        &self,
        pool: &SwapPool,
        params: &InitializeParams,
    ) -> Result<Transition<DepositResult>> {
        require!(!pool.is_active(), SwapError::AlreadyInitialized);
        params.fee_schedule.validate()?;
        params.curve.validate()?;

        let (amounts, minted) = params.curve.bootstrap_deposit(
            params.initial_reserve_a,
            params.initial_reserve_b,
            self.config.bootstrap_supply,
        )?;

        let accounts = &params.accounts;
        let next = SwapPool {
            is_initialized: true,
            version: math::checked_add(pool.version, 1)?,
            authority: accounts.authority,
            bump: accounts.bump,
            token_a_mint: accounts.token_a_mint,
            token_b_mint: accounts.token_b_mint,
            token_a_vault: accounts.token_a_vault,
            token_b_vault: accounts.token_b_vault,
            pool_mint: accounts.pool_mint,
            fee_owner: accounts.fee_owner,
            reserve_a: amounts.token_a,
            reserve_b: amounts.token_b,
            pool_token_supply: minted,
            owner_fee_pool_tokens: 0,
            host_fee_pool_tokens: 0,
            fee_schedule: params.fee_schedule,
            curve: params.curve,
        };

        Ok(Transition {
            pool: next,
            result: DepositResult {
                token_a_amount: amounts.token_a,
                token_b_amount: amounts.token_b,
                pool_token_amount: minted,
            },
            transfers: deposit_transfers(amounts, minted),
        })
    }

    /// Prices a swap against the current reserves without building a
    /// transition.
    pub fn quote_swap(&self, pool: &SwapPool, request: &SwapRequest) -> Result<SwapResult> {
        require!(pool.is_active(), SwapError::Uninitialized);
        require!(request.amount_in > 0, SwapError::ZeroTradingTokens);

        let fees = pool
            .fee_schedule
            .trade_fees(request.amount_in, request.with_host)?;
        let net_amount_in = math::checked_sub(request.amount_in, fees.total()?)?;

        let (reserve_in, reserve_out) = pool.reserves(request.direction);
        let amount_out = pool
            .curve
            .swap(request.direction, reserve_in, reserve_out, net_amount_in)?;

        require!(
            amount_out >= request.minimum_amount_out,
            SwapError::SlippageExceeded
        );
        require!(amount_out > 0, SwapError::ZeroTradingTokens);

        // every fee stays in the reserve; owner and host are owed pool tokens
        let new_reserve_in = math::checked_add(reserve_in, request.amount_in)?;
        let new_reserve_out = math::checked_sub(reserve_out, amount_out)?;
        let (new_reserve_a, new_reserve_b) = match request.direction {
            TradeDirection::AtoB => (new_reserve_in, new_reserve_out),
            TradeDirection::BtoA => (new_reserve_out, new_reserve_in),
        };

        Ok(SwapResult {
            amount_in: request.amount_in,
            amount_out,
            trade_fee: fees.trade_fee,
            owner_fee: fees.owner_fee,
            host_fee: fees.host_fee,
            owner_fee_pool_tokens: fee_pool_tokens(
                fees.owner_fee,
                new_reserve_in,
                pool.pool_token_supply,
            )?,
            host_fee_pool_tokens: fee_pool_tokens(
                fees.host_fee,
                new_reserve_in,
                pool.pool_token_supply,
            )?,
            new_reserve_a,
            new_reserve_b,
        })
    }

    pub fn swap(&self, pool: &SwapPool, request: &SwapRequest) -> Result<Transition<SwapResult>> {
        let result = self.quote_swap(pool, request)?;

        let mut next = pool.clone();
        next.reserve_a = result.new_reserve_a;
        next.reserve_b = result.new_reserve_b;
        next.owner_fee_pool_tokens =
            math::checked_add(pool.owner_fee_pool_tokens, result.owner_fee_pool_tokens)?;
        next.host_fee_pool_tokens =
            math::checked_add(pool.host_fee_pool_tokens, result.host_fee_pool_tokens)?;
        next.version = math::checked_add(pool.version, 1)?;

        let (source, destination) = Asset::trading(request.direction);
        let transfers = vec![
            Transfer {
                asset: source,
                from: Party::User,
                to: Party::Pool,
                amount: result.amount_in,
            },
            Transfer {
                asset: destination,
                from: Party::Pool,
                to: Party::User,
                amount: result.amount_out,
            },
        ];
        Ok(Transition {
            pool: next,
            result,
            transfers,
        })
    }

    /// Mints `pool_token_amount` pool tokens against a proportional deposit
    /// of both trading tokens.
    pub fn deposit(
        &self,
        pool: &SwapPool,
        request: &DepositRequest,
    ) -> Result<Transition<DepositResult>> {
        require!(pool.is_active(), SwapError::Uninitialized);
        require!(request.pool_token_amount > 0, SwapError::ZeroTradingTokens);

        let amounts = pool.curve.deposit_amounts(
            request.pool_token_amount,
            pool.pool_token_supply,
            pool.reserve_a,
            pool.reserve_b,
        )?;
        let minted = request.pool_token_amount;

        require!(
            amounts.token_a <= request.maximum_token_a_amount
                && amounts.token_b <= request.maximum_token_b_amount,
            SwapError::InvalidRatio
        );

        let mut next = pool.clone();
        next.reserve_a = math::checked_add(pool.reserve_a, amounts.token_a)?;
        next.reserve_b = math::checked_add(pool.reserve_b, amounts.token_b)?;
        next.pool_token_supply = math::checked_add(pool.pool_token_supply, minted)?;
        next.version = math::checked_add(pool.version, 1)?;

        Ok(Transition {
            pool: next,
            result: DepositResult {
                token_a_amount: amounts.token_a,
                token_b_amount: amounts.token_b,
                pool_token_amount: minted,
            },
            transfers: deposit_transfers(amounts, minted),
        })
    }

    /// Burns pool tokens for a proportional share of both reserves, less the
    /// owner withdrawal fee taken in pool tokens.
    pub fn withdraw(
        &self,
        pool: &SwapPool,
        request: &WithdrawRequest,
    ) -> Result<Transition<WithdrawResult>> {
        require!(pool.is_active(), SwapError::Uninitialized);
        require!(request.pool_token_amount > 0, SwapError::ZeroTradingTokens);
        require!(
            request.pool_token_amount <= pool.pool_token_supply,
            SwapError::InsufficientLiquidity
        );

        let withdraw_fee = pool
            .fee_schedule
            .owner_withdraw_fee(request.pool_token_amount)?;
        let burned = math::checked_sub(request.pool_token_amount, withdraw_fee)?;

        let amounts = pool.curve.withdraw_amounts(
            burned,
            pool.pool_token_supply,
            pool.reserve_a,
            pool.reserve_b,
        )?;
        require!(
            amounts.token_a >= request.minimum_token_a_amount
                && amounts.token_b >= request.minimum_token_b_amount,
            SwapError::SlippageExceeded
        );
        require!(
            amounts.token_a > 0 || amounts.token_b > 0,
            SwapError::ZeroTradingTokens
        );

        let reserve_a = math::checked_sub(pool.reserve_a, amounts.token_a)?;
        let reserve_b = math::checked_sub(pool.reserve_b, amounts.token_b)?;
        require!(
            reserve_a > 0 && reserve_b > 0,
            SwapError::InsufficientLiquidity
        );

        let mut next = pool.clone();
        next.reserve_a = reserve_a;
        next.reserve_b = reserve_b;
        next.pool_token_supply = math::checked_sub(pool.pool_token_supply, burned)?;
        next.version = math::checked_add(pool.version, 1)?;

        let mut transfers = Vec::with_capacity(4);
        if withdraw_fee > 0 {
            transfers.push(Transfer {
                asset: Asset::PoolToken,
                from: Party::User,
                to: Party::Owner,
                amount: withdraw_fee,
            });
        }
        transfers.push(Transfer {
            asset: Asset::PoolToken,
            from: Party::User,
            to: Party::Pool,
            amount: burned,
        });
        for (asset, amount) in [
            (Asset::TokenA, amounts.token_a),
            (Asset::TokenB, amounts.token_b),
        ] {
            if amount > 0 {
                transfers.push(Transfer {
                    asset,
                    from: Party::Pool,
                    to: Party::User,
                    amount,
                });
            }
        }

        Ok(Transition {
            pool: next,
            result: WithdrawResult {
                token_a_amount: amounts.token_a,
                token_b_amount: amounts.token_b,
                pool_tokens_burned: burned,
                withdraw_fee,
            },
            transfers,
        })
    }

    /// Mints the owner and host trade fees accrued by swaps.
    ///
    /// Reserves are untouched since the fees already sit in them.
    pub fn collect_fees(&self, pool: &SwapPool) -> Result<Transition<CollectResult>> {
        require!(pool.is_active(), SwapError::Uninitialized);
        let owner_pool_tokens = pool.owner_fee_pool_tokens;
        let host_pool_tokens = pool.host_fee_pool_tokens;
        require!(
            owner_pool_tokens > 0 || host_pool_tokens > 0,
            SwapError::ZeroTradingTokens
        );

        let mut next = pool.clone();
        next.pool_token_supply = math::checked_add(
            pool.pool_token_supply,
            math::checked_add(owner_pool_tokens, host_pool_tokens)?,
        )?;
        next.owner_fee_pool_tokens = 0;
        next.host_fee_pool_tokens = 0;
        next.version = math::checked_add(pool.version, 1)?;

        let transfers = [(Party::Owner, owner_pool_tokens), (Party::Host, host_pool_tokens)]
            .into_iter()
            .filter(|(_, amount)| *amount > 0)
            .map(|(to, amount)| Transfer {
                asset: Asset::PoolToken,
                from: Party::Pool,
                to,
                amount,
            })
            .collect();

        Ok(Transition {
            pool: next,
            result: CollectResult {
                owner_pool_tokens,
                host_pool_tokens,
            },
            transfers,
        })
    }
}

fn deposit_transfers(amounts: TradingTokens, minted: u64) -> Vec<Transfer> {
    vec![
        Transfer {
            asset: Asset::TokenA,
            from: Party::User,
            to: Party::Pool,
            amount: amounts.token_a,
        },
        Transfer {
            asset: Asset::TokenB,
            from: Party::User,
            to: Party::Pool,
            amount: amounts.token_b,
        },
        Transfer {
            asset: Asset::PoolToken,
            from: Party::Pool,
            to: Party::User,
            amount: minted,
        },
    ]
}
