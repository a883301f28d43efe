use super::ledger::Ledger;
use crate::curve::CurveVariant;
use crate::engine::{
    Asset, EngineConfig, InitializeParams, Party, PoolAccounts, PoolEngine, POOL_AUTHORITY_SEED,
};
use crate::events::PoolInitialized;
use crate::fees::FeeSchedule;
use crate::state::SwapPool;
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

/// Initialize a new swap pool seeded with the creator's reserves
pub fn process(
    ctx: Context<InitializePool>,
    curve: CurveVariant,
    fee_schedule: FeeSchedule,
    initial_token_a_amount: u64,
    initial_token_b_amount: u64,
) -> Result<()> {
    let engine = PoolEngine::new(EngineConfig::new(crate::ID));
    let params = InitializeParams {
        accounts: PoolAccounts {
            authority: ctx.accounts.pool_authority.key(),
            bump: ctx.bumps.pool_authority,
            token_a_mint: ctx.accounts.token_a_mint.key(),
            token_b_mint: ctx.accounts.token_b_mint.key(),
            token_a_vault: ctx.accounts.token_a_vault.key(),
            token_b_vault: ctx.accounts.token_b_vault.key(),
            pool_mint: ctx.accounts.pool_mint.key(),
            fee_owner: ctx.accounts.fee_owner.key(),
        },
        curve,
        fee_schedule,
        initial_reserve_a: initial_token_a_amount,
        initial_reserve_b: initial_token_b_amount,
    };
    let transition = engine.initialize(&ctx.accounts.swap_pool, &params)?;

    msg!(
        "Initializing pool with reserves A: {}, B: {}, curve: {:?}",
        initial_token_a_amount,
        initial_token_b_amount,
        curve
    );

    // Setup PDA signer
    let pool_key = ctx.accounts.swap_pool.key();
    let authority_bump = ctx.bumps.pool_authority;
    let authority_seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &[authority_bump]];
    let signer_seeds = &[authority_seeds];

    let accounts = &ctx.accounts;
    Ledger::new(
        accounts.token_program.to_account_info(),
        accounts.pool_authority.to_account_info(),
        accounts.payer.to_account_info(),
        signer_seeds,
    )
    .with(Asset::TokenA, Party::Pool, accounts.token_a_vault.to_account_info())
    .with(Asset::TokenB, Party::Pool, accounts.token_b_vault.to_account_info())
    .with(Asset::PoolToken, Party::Pool, accounts.pool_mint.to_account_info())
    .with(Asset::TokenA, Party::User, accounts.payer_token_a_account.to_account_info())
    .with(Asset::TokenB, Party::User, accounts.payer_token_b_account.to_account_info())
    .with(Asset::PoolToken, Party::User, accounts.payer_pool_token_account.to_account_info())
    .execute(&transition.transfers)?;

    let minted = transition.result.pool_token_amount;
    ctx.accounts.swap_pool.set_inner(transition.pool);

    emit!(PoolInitialized {
        pool: pool_key,
        curve,
        reserve_a: initial_token_a_amount,
        reserve_b: initial_token_b_amount,
        pool_tokens_minted: minted,
    });
    msg!("Pool initialized, {} pool tokens minted to creator", minted);
    Ok(())
}

#[derive(Accounts)]
pub struct InitializePool<'info> {
    /// First token mint in the trading pair
    pub token_a_mint: InterfaceAccount<'info, Mint>,

    /// Second token mint in the trading pair
    pub token_b_mint: InterfaceAccount<'info, Mint>,

    /// PDA account that stores pool configuration and reserves
    #[account(
        init,
        space = 8 + SwapPool::ACCOUNT_SIZE,
        payer = payer,
        seeds = [
            b"swap_pool",
            token_a_mint.key().as_ref(),
            token_b_mint.key().as_ref()
        ],
        bump,
    )]
    pub swap_pool: Box<Account<'info, SwapPool>>,

    /// PDA authority that controls the pool's vaults and pool token minting
    #[account(
        seeds = [POOL_AUTHORITY_SEED, swap_pool.key().as_ref()],
        bump
    )]
    pub pool_authority: SystemAccount<'info>,

    /// Vault to hold token A reserves
    #[account(
        init,
        payer = payer,
        seeds = [b"token_a_vault", swap_pool.key().as_ref()],
        bump,
        token::mint = token_a_mint,
        token::authority = pool_authority,
    )]
    pub token_a_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Vault to hold token B reserves
    #[account(
        init,
        payer = payer,
        seeds = [b"token_b_vault", swap_pool.key().as_ref()],
        bump,
        token::mint = token_b_mint,
        token::authority = pool_authority,
    )]
    pub token_b_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Pool token mint - represents shares of the pool
    #[account(
        init,
        payer = payer,
        seeds = [b"pool_mint", swap_pool.key().as_ref()],
        bump,
        mint::decimals = 2,
        mint::authority = pool_authority,
    )]
    pub pool_mint: Box<InterfaceAccount<'info, Mint>>,

    /// CHECK: wallet collecting owner fees, only its key is recorded
    pub fee_owner: UncheckedAccount<'info>,

    /// Creator's token A account, source of the initial reserve
    #[account(mut, token::mint = token_a_mint)]
    pub payer_token_a_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Creator's token B account, source of the initial reserve
    #[account(mut, token::mint = token_b_mint)]
    pub payer_token_b_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives the bootstrap pool token supply
    #[account(
        init,
        payer = payer,
        associated_token::mint = pool_mint,
        associated_token::authority = payer,
        associated_token::token_program = token_program,
    )]
    pub payer_pool_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Account that pays for initialization and provides the reserves
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Required system programs
    pub system_program: Program<'info, System>,
    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}
