use super::ledger::Ledger;
use crate::engine::{Asset, EngineConfig, Party, PoolEngine, POOL_AUTHORITY_SEED};
use crate::errors::SwapError;
use crate::events::FeesCollected;
use crate::state::SwapPool;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Mint the owner and host trade fees accrued by swaps
pub fn process(ctx: Context<CollectFees>) -> Result<()> {
    let engine = PoolEngine::new(EngineConfig::new(crate::ID));
    let transition = engine.collect_fees(&ctx.accounts.swap_pool)?;
    let result = transition.result;

    msg!(
        "Collecting fees - Owner: {} pool tokens, Host: {} pool tokens",
        result.owner_pool_tokens,
        result.host_pool_tokens
    );

    let pool_key = ctx.accounts.swap_pool.key();
    let authority_seeds: &[&[u8]] = &[
        POOL_AUTHORITY_SEED,
        pool_key.as_ref(),
        &[ctx.accounts.swap_pool.bump],
    ];
    let signer_seeds = &[authority_seeds];

    let accounts = &ctx.accounts;
    let mut ledger = Ledger::new(
        accounts.token_program.to_account_info(),
        accounts.pool_authority.to_account_info(),
        accounts.fee_owner.to_account_info(),
        signer_seeds,
    )
    .with(Asset::PoolToken, Party::Pool, accounts.pool_mint.to_account_info())
    .with(
        Asset::PoolToken,
        Party::Owner,
        accounts.owner_pool_token_account.to_account_info(),
    );
    if let Some(host_pool_token_account) = &accounts.host_pool_token_account {
        ledger = ledger.with(
            Asset::PoolToken,
            Party::Host,
            host_pool_token_account.to_account_info(),
        );
    }
    ledger.execute(&transition.transfers)?;

    ctx.accounts.swap_pool.set_inner(transition.pool);

    emit!(FeesCollected {
        pool: pool_key,
        owner_pool_tokens: result.owner_pool_tokens,
        host_pool_tokens: result.host_pool_tokens,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CollectFees<'info> {
    /// Pool state account
    #[account(
        mut,
        has_one = fee_owner @ SwapError::IncorrectSwapAccount,
        has_one = pool_mint @ SwapError::IncorrectSwapAccount,
    )]
    pub swap_pool: Box<Account<'info, SwapPool>>,

    /// Pool authority PDA
    #[account(
        seeds = [POOL_AUTHORITY_SEED, swap_pool.key().as_ref()],
        bump = swap_pool.bump
    )]
    pub pool_authority: SystemAccount<'info>,

    /// Pool token mint
    #[account(mut)]
    pub pool_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Owner's pool token account, receives the owner share
    #[account(
        mut,
        constraint = owner_pool_token_account.owner == fee_owner.key() @ SwapError::IncorrectSwapAccount,
        constraint = owner_pool_token_account.mint == pool_mint.key(),
    )]
    pub owner_pool_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Host's pool token account, required while host fees are owed
    #[account(
        mut,
        constraint = host_pool_token_account.mint == pool_mint.key(),
    )]
    pub host_pool_token_account: Option<InterfaceAccount<'info, TokenAccount>>,

    /// Pool fee owner
    pub fee_owner: Signer<'info>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
}
