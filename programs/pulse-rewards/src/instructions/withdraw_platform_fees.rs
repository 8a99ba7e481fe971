use crate::error::ErrorCode;
use crate::state::RewardLedger;
use crate::LEDGER_SEED_PREFIX;
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

#[derive(Accounts)]
pub struct WithdrawPlatformFees<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED_PREFIX],
        bump = ledger.bump,
        has_one = admin @ ErrorCode::AdminMismatch,
        has_one = treasury @ ErrorCode::TreasuryMismatch,
    )]
    pub ledger: Account<'info, RewardLedger>,

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
pub struct PlatformFeesWithdrawn {
    pub ledger: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
    pub fees_remaining: u64,
}

pub fn handle_withdraw_platform_fees(ctx: Context<WithdrawPlatformFees>, amount: u64) -> Result<()> {
    require!(amount > 0, ErrorCode::InvalidAmount);

    let ledger = &mut ctx.accounts.ledger;
    require!(
        amount <= ledger.platform_fees_accrued,
        ErrorCode::InsufficientAccruedFees
    );

    ledger.platform_fees_accrued = ledger
        .platform_fees_accrued
        .checked_sub(amount)
        .ok_or(ErrorCode::NumericOverflow)?;

    // Treasury is owned by the ledger PDA
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

    emit!(PlatformFeesWithdrawn {
        ledger: ledger.key(),
        destination: ctx.accounts.destination.key(),
        amount,
        fees_remaining: ledger.platform_fees_accrued,
    });

    Ok(())
}
