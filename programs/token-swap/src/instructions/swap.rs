use super::ledger::Ledger;
use crate::curve::TradeDirection;
use crate::engine::{Asset, EngineConfig, Party, PoolEngine, SwapRequest, POOL_AUTHORITY_SEED};
use crate::errors::SwapError;
use crate::events::SwapExecuted;
use crate::state::SwapPool;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{TokenAccount, TokenInterface};

/// Swap tokens along the pool's curve
pub fn process(ctx: Context<SwapTokens>, amount_in: u64, minimum_amount_out: u64) -> Result<()> {
    let pool = &ctx.accounts.swap_pool;
    let direction = pool.direction_for_source_vault(&ctx.accounts.input_token_vault.key())?;
    let (_, expected_output_vault) = pool.vaults(direction);
    require_keys_eq!(
        ctx.accounts.output_token_vault.key(),
        expected_output_vault,
        SwapError::IncorrectSwapAccount
    );

    let engine = PoolEngine::new(EngineConfig::new(crate::ID));
    let request = SwapRequest {
        direction,
        amount_in,
        minimum_amount_out,
        with_host: ctx.accounts.host_fee_account.is_some(),
    };
    let transition = engine.swap(pool, &request)?;
    let result = transition.result;

    msg!(
        "Swap details - Input: {}, Trade fee: {}, Owner fee: {}, Host fee: {}",
        result.amount_in,
        result.trade_fee,
        result.owner_fee,
        result.host_fee
    );
    msg!("Calculated output amount: {}", result.amount_out);
    msg!(
        "Accrued fees - Owner: {} pool tokens, Host: {} pool tokens",
        result.owner_fee_pool_tokens,
        result.host_fee_pool_tokens
    );

    // Setup PDA signer
    let pool_key = ctx.accounts.swap_pool.key();
    let authority_seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &[pool.bump]];
    let signer_seeds = &[authority_seeds];

    let (source, destination) = Asset::trading(direction);
    let accounts = &ctx.accounts;
    let host = accounts.host_fee_account.as_ref().map(|account| account.key());
    Ledger::new(
        accounts.token_program.to_account_info(),
        accounts.pool_authority.to_account_info(),
        accounts.user.to_account_info(),
        signer_seeds,
    )
    .with(source, Party::Pool, accounts.input_token_vault.to_account_info())
    .with(destination, Party::Pool, accounts.output_token_vault.to_account_info())
    .with(source, Party::User, accounts.user_input_token_account.to_account_info())
    .with(destination, Party::User, accounts.user_output_token_account.to_account_info())
    .execute(&transition.transfers)?;

    ctx.accounts.swap_pool.set_inner(transition.pool);

    emit!(SwapExecuted {
        pool: pool_key,
        user: ctx.accounts.user.key(),
        a_to_b: direction == TradeDirection::AtoB,
        amount_in: result.amount_in,
        amount_out: result.amount_out,
        trade_fee: result.trade_fee,
        owner_fee: result.owner_fee,
        host_fee: result.host_fee,
        host,
        owner_fee_pool_tokens: result.owner_fee_pool_tokens,
        host_fee_pool_tokens: result.host_fee_pool_tokens,
    });
    msg!(
        "Swap completed - Input: {}, Output: {}",
        result.amount_in,
        result.amount_out
    );

    Ok(())
}

#[derive(Accounts)]
pub struct SwapTokens<'info> {
    /// Pool state account
    #[account(mut)]
    pub swap_pool: Box<Account<'info, SwapPool>>,

    /// Pool authority PDA
    #[account(
        seeds = [POOL_AUTHORITY_SEED, swap_pool.key().as_ref()],
        bump = swap_pool.bump
    )]
    pub pool_authority: SystemAccount<'info>,

    /// Vault for input token (token being sold)
    #[account(
        mut,
        constraint = input_token_vault.owner == pool_authority.key(),
        constraint = input_token_vault.mint == user_input_token_account.mint,
    )]
    pub input_token_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Vault for output token (token being bought)
    #[account(
        mut,
        constraint = output_token_vault.owner == pool_authority.key(),
        constraint = output_token_vault.mint == user_output_token_account.mint,
    )]
    pub output_token_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// User's input token account (source)
    #[account(mut)]
    pub user_input_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// User's output token account (destination)
    #[account(mut)]
    pub user_output_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Front end's pool token account, credited with the host fee when fees
    /// are collected
    #[account(
        constraint = host_fee_account.mint == swap_pool.pool_mint @ SwapError::IncorrectSwapAccount,
    )]
    pub host_fee_account: Option<InterfaceAccount<'info, TokenAccount>>,

    /// User authority
    pub user: Signer<'info>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
}
