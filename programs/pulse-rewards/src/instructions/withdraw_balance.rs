use crate::error::ErrorCode;
use crate::state::{RewardLedger, UserAccount};
use crate::{LEDGER_SEED_PREFIX, USER_SEED_PREFIX};
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

/// Moves spendable balance back out of the treasury. Deliberately open to
/// banned users: a ban forfeits pending earnings, never deposited funds.
#[derive(Accounts)]
pub struct WithdrawBalance<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [LEDGER_SEED_PREFIX],
        bump = ledger.bump,
        has_one = treasury @ ErrorCode::TreasuryMismatch,
        constraint = !ledger.paused @ ErrorCode::LedgerPaused,
    )]
    pub ledger: Account<'info, RewardLedger>,

    #[account(
        mut,
        seeds = [USER_SEED_PREFIX, authority.key().as_ref()],
        bump = user_account.bump,
        has_one = authority @ ErrorCode::UserAccountMismatch,
    )]
    pub user_account: Account<'info, UserAccount>,

    #[account(mut)]
    pub treasury: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.mint == ledger.treasury_mint @ ErrorCode::TreasuryMintMismatch,
    )]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct BalanceWithdrawn {
    pub user_account: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
    pub new_balance: u64,
}

pub fn handle_withdraw_balance(ctx: Context<WithdrawBalance>, amount: u64) -> Result<()> {
    require!(amount > 0, ErrorCode::InvalidAmount);

    let user_account = &mut ctx.accounts.user_account;
    require!(
        amount <= user_account.balance,
        ErrorCode::InsufficientBalance
    );

    user_account.balance = user_account
        .balance
        .checked_sub(amount)
        .ok_or(ErrorCode::NumericOverflow)?;

    let ledger = &ctx.accounts.ledger;
    let ledger_seeds = &[LEDGER_SEED_PREFIX, &[ledger.bump]];
    let signer_seeds = &[&ledger_seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.treasury.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: ledger.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(BalanceWithdrawn {
        user_account: user_account.key(),
        destination: ctx.accounts.destination.key(),
        amount,
        new_balance: user_account.balance,
    });

    Ok(())
}
