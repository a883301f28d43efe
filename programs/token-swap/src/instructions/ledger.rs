use crate::engine::{Asset, Party, Transfer};
use crate::errors::SwapError;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Burn, MintTo};

/// Token accounts taking part in one instruction, keyed by asset and party.
///
/// `(asset, Party::Pool)` is the pool vault for trading tokens and the pool
/// mint for pool tokens.
pub struct Ledger<'a, 'info> {
    token_program: AccountInfo<'info>,
    pool_authority: AccountInfo<'info>,
    user: AccountInfo<'info>,
    signer_seeds: &'a [&'a [&'a [u8]]],
    accounts: Vec<(Asset, Party, AccountInfo<'info>)>,
}

impl<'a, 'info> Ledger<'a, 'info> {
    pub fn new(
        token_program: AccountInfo<'info>,
        pool_authority: AccountInfo<'info>,
        user: AccountInfo<'info>,
        signer_seeds: &'a [&'a [&'a [u8]]],
    ) -> Self {
        Self {
            token_program,
            pool_authority,
            user,
            signer_seeds,
            accounts: Vec::new(),
        }
    }

    pub fn with(mut self, asset: Asset, party: Party, account: AccountInfo<'info>) -> Self {
        self.accounts.push((asset, party, account));
        self
    }

    fn account(&self, asset: Asset, party: Party) -> Result<AccountInfo<'info>> {
        self.accounts
            .iter()
            .find(|(a, p, _)| *a == asset && *p == party)
            .map(|(_, _, info)| info.clone())
            .ok_or_else(|| error!(SwapError::IncorrectSwapAccount))
    }

    pub fn execute(&self, transfers: &[Transfer]) -> Result<()> {
        for transfer in transfers.iter().filter(|t| t.amount > 0) {
            match (transfer.asset, transfer.from, transfer.to) {
                (Asset::PoolToken, Party::Pool, to) => token_interface::mint_to(
                    CpiContext::new_with_signer(
                        self.token_program.clone(),
                        MintTo {
                            mint: self.account(Asset::PoolToken, Party::Pool)?,
                            to: self.account(Asset::PoolToken, to)?,
                            authority: self.pool_authority.clone(),
                        },
                        self.signer_seeds,
                    ),
                    transfer.amount,
                )?,
                (Asset::PoolToken, from, Party::Pool) => token_interface::burn(
                    CpiContext::new(
                        self.token_program.clone(),
                        Burn {
                            mint: self.account(Asset::PoolToken, Party::Pool)?,
                            from: self.account(Asset::PoolToken, from)?,
                            authority: self.user.clone(),
                        },
                    ),
                    transfer.amount,
                )?,
                (asset, Party::Pool, to) => token_interface::transfer(
                    CpiContext::new_with_signer(
                        self.token_program.clone(),
                        token_interface::Transfer {
                            from: self.account(asset, Party::Pool)?,
                            to: self.account(asset, to)?,
                            authority: self.pool_authority.clone(),
                        },
                        self.signer_seeds,
                    ),
                    transfer.amount,
                )?,
                (asset, from, to) => token_interface::transfer(
                    CpiContext::new(
                        self.token_program.clone(),
                        token_interface::Transfer {
                            from: self.account(asset, from)?,
                            to: self.account(asset, to)?,
                            authority: self.user.clone(),
                        },
                    ),
                    transfer.amount,
                )?,
            }
        }
        Ok(())
    }
}
