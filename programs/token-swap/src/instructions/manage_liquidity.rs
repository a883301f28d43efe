use super::ledger::Ledger;
use crate::engine::{
    Asset, DepositRequest, EngineConfig, Party, PoolEngine, WithdrawRequest, POOL_AUTHORITY_SEED,
};
use crate::errors::SwapError;
use crate::events::{LiquidityDeposited, LiquidityWithdrawn};
use crate::state::SwapPool;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Add liquidity to the pool in exchange for `pool_token_amount` pool tokens
pub fn deposit(
    ctx: Context<ManageLiquidity>,
    pool_token_amount: u64,
    maximum_token_a_amount: u64,
    maximum_token_b_amount: u64,
) -> Result<()> {
    msg!(
        "Current reserves - Token A: {}, Token B: {}, pool tokens: {}",
        ctx.accounts.swap_pool.reserve_a,
        ctx.accounts.swap_pool.reserve_b,
        ctx.accounts.swap_pool.pool_token_supply
    );

    let engine = PoolEngine::new(EngineConfig::new(crate::ID));
    let request = DepositRequest {
        pool_token_amount,
        maximum_token_a_amount,
        maximum_token_b_amount,
    };
    let transition = engine.deposit(&ctx.accounts.swap_pool, &request)?;
    let result = transition.result;

    let pool_key = ctx.accounts.swap_pool.key();
    let authority_seeds: &[&[u8]] = &[
        POOL_AUTHORITY_SEED,
        pool_key.as_ref(),
        &[ctx.accounts.swap_pool.bump],
    ];
    let signer_seeds = &[authority_seeds];

    ctx.accounts.ledger(signer_seeds).execute(&transition.transfers)?;
    ctx.accounts.swap_pool.set_inner(transition.pool);

    emit!(LiquidityDeposited {
        pool: pool_key,
        user: ctx.accounts.user.key(),
        token_a_amount: result.token_a_amount,
        token_b_amount: result.token_b_amount,
        pool_tokens_minted: result.pool_token_amount,
    });
    msg!(
        "Liquidity added - Token A: {}, Token B: {}, pool tokens: {}",
        result.token_a_amount,
        result.token_b_amount,
        result.pool_token_amount
    );

    Ok(())
}

/// Remove liquidity from the pool by burning pool tokens
pub fn withdraw(
    ctx: Context<ManageLiquidity>,
    pool_token_amount: u64,
    minimum_token_a_amount: u64,
    minimum_token_b_amount: u64,
) -> Result<()> {
    let engine = PoolEngine::new(EngineConfig::new(crate::ID));
    let request = WithdrawRequest {
        pool_token_amount,
        minimum_token_a_amount,
        minimum_token_b_amount,
    };
    let transition = engine.withdraw(&ctx.accounts.swap_pool, &request)?;
    let result = transition.result;

    if result.withdraw_fee > 0 {
        require!(
            ctx.accounts.owner_pool_token_account.is_some(),
            SwapError::IncorrectSwapAccount
        );
        msg!("Withdrawal fee: {} pool tokens", result.withdraw_fee);
    }

    let pool_key = ctx.accounts.swap_pool.key();
    let authority_seeds: &[&[u8]] = &[
        POOL_AUTHORITY_SEED,
        pool_key.as_ref(),
        &[ctx.accounts.swap_pool.bump],
    ];
    let signer_seeds = &[authority_seeds];

    ctx.accounts.ledger(signer_seeds).execute(&transition.transfers)?;
    ctx.accounts.swap_pool.set_inner(transition.pool);

    emit!(LiquidityWithdrawn {
        pool: pool_key,
        user: ctx.accounts.user.key(),
        token_a_amount: result.token_a_amount,
        token_b_amount: result.token_b_amount,
        pool_tokens_burned: result.pool_tokens_burned,
        withdraw_fee: result.withdraw_fee,
    });
    msg!(
        "Liquidity removed - Token A: {}, Token B: {}, pool tokens burned: {}",
        result.token_a_amount,
        result.token_b_amount,
        result.pool_tokens_burned
    );

    Ok(())
}

#[derive(Accounts)]
pub struct ManageLiquidity<'info> {
    /// Pool state account
    #[account(mut)]
    pub swap_pool: Box<Account<'info, SwapPool>>,

    /// Pool authority PDA
    #[account(
        seeds = [POOL_AUTHORITY_SEED, swap_pool.key().as_ref()],
        bump = swap_pool.bump
    )]
    pub pool_authority: SystemAccount<'info>,

    /// Token A vault - must match user's token A mint
    #[account(
        mut,
        constraint = token_a_vault.mint == user_token_a_account.mint,
        seeds = [b"token_a_vault", swap_pool.key().as_ref()],
        bump
    )]
    pub token_a_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token B vault - must match user's token B mint
    #[account(
        mut,
        constraint = token_b_vault.mint == user_token_b_account.mint,
        seeds = [b"token_b_vault", swap_pool.key().as_ref()],
        bump
    )]
    pub token_b_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Pool token mint
    #[account(
        mut,
        constraint = pool_mint.key() == user_pool_token_account.mint,
        seeds = [b"pool_mint", swap_pool.key().as_ref()],
        bump
    )]
    pub pool_mint: Box<InterfaceAccount<'info, Mint>>,

    /// User's token A account
    #[account(mut)]
    pub user_token_a_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// User's token B account
    #[account(mut)]
    pub user_token_b_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// User's pool token account
    #[account(mut)]
    pub user_pool_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Owner's pool token account, receives withdrawal fees
    #[account(
        mut,
        constraint = owner_pool_token_account.owner == swap_pool.fee_owner @ SwapError::IncorrectSwapAccount,
        constraint = owner_pool_token_account.mint == pool_mint.key(),
    )]
    pub owner_pool_token_account: Option<InterfaceAccount<'info, TokenAccount>>,

    /// User authority
    pub user: Signer<'info>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> ManageLiquidity<'info> {
    fn ledger<'a>(&self, signer_seeds: &'a [&'a [&'a [u8]]]) -> Ledger<'a, 'info> {
        let mut ledger = Ledger::new(
            self.token_program.to_account_info(),
            self.pool_authority.to_account_info(),
            self.user.to_account_info(),
            signer_seeds,
        )
        .with(Asset::TokenA, Party::Pool, self.token_a_vault.to_account_info())
        .with(Asset::TokenB, Party::Pool, self.token_b_vault.to_account_info())
        .with(Asset::PoolToken, Party::Pool, self.pool_mint.to_account_info())
        .with(Asset::TokenA, Party::User, self.user_token_a_account.to_account_info())
        .with(Asset::TokenB, Party::User, self.user_token_b_account.to_account_info())
        .with(Asset::PoolToken, Party::User, self.user_pool_token_account.to_account_info());
        if let Some(owner_pool_token_account) = &self.owner_pool_token_account {
            ledger = ledger.with(
                Asset::PoolToken,
                Party::Owner,
                owner_pool_token_account.to_account_info(),
            );
        }
        ledger
    }
}
