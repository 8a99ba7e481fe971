use crate::error::ErrorCode;
use crate::state::{RewardLedger, UserAccount};
use crate::{LEDGER_SEED_PREFIX, USER_SEED_PREFIX};
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

#[derive(Accounts)]
pub struct DepositBalance<'info> {
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
        constraint = !user_account.is_banned() @ ErrorCode::UserBanned,
    )]
    pub user_account: Account<'info, UserAccount>,

    /// Depositor's settlement token account.
    #[account(
        mut,
        constraint = source.mint == ledger.treasury_mint @ ErrorCode::TreasuryMintMismatch,
    )]
    pub source: Account<'info, TokenAccount>,

    #[account(mut)]
    pub treasury: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct BalanceDeposited {
    pub user_account: Pubkey,
    pub amount: u64,
    pub new_balance: u64,
}

pub fn handle_deposit_balance(ctx: Context<DepositBalance>, amount: u64) -> Result<()> {
    require!(amount > 0, ErrorCode::InvalidAmount);

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.source.to_account_info(),
                to: ctx.accounts.treasury.to_account_info(),
                authority: ctx.accounts.authority.to_account_info(),
            },
        ),
        amount,
    )?;

    let user_account = &mut ctx.accounts.user_account;
    user_account.balance = user_account
        .balance
        .checked_add(amount)
        .ok_or(ErrorCode::NumericOverflow)?;

    emit!(BalanceDeposited {
        user_account: user_account.key(),
        amount,
        new_balance: user_account.balance,
    });

    Ok(())
}
