use crate::constants::REPUTATION_DEFAULT;
use crate::error::ErrorCode;
use crate::state::{AccountStatus, RewardLedger, UserAccount};
use crate::{LEDGER_SEED_PREFIX, USER_SEED_PREFIX};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct RegisterUser<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED_PREFIX],
        bump = ledger.bump,
        constraint = !ledger.paused @ ErrorCode::LedgerPaused,
    )]
    pub ledger: Account<'info, RewardLedger>,

    #[account(
        init,
        payer = authority,
        space = 8 + UserAccount::INIT_SPACE,
        seeds = [USER_SEED_PREFIX, authority.key().as_ref()],
        bump
    )]
    pub user_account: Account<'info, UserAccount>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct UserRegistered {
    pub user_account: Pubkey,
    pub authority: Pubkey,
}

pub fn handle_register_user(ctx: Context<RegisterUser>) -> Result<()> {
    let user_account = &mut ctx.accounts.user_account;
    user_account.set_inner(UserAccount {
        authority: ctx.accounts.authority.key(),
        status: AccountStatus::Active,
        balance: 0,
        earnings: 0,
        pending_earnings: 0,
        reputation: REPUTATION_DEFAULT,
        fraud_count: 0,
        payout_address: Pubkey::default(), // set later via set_payout_address
        payout_requests_total: 0,
        has_pending_payout: false,
        campaigns_joined: 0,
        registered_at: Clock::get()?.unix_timestamp,
        bump: ctx.bumps.user_account,
    });

    let ledger = &mut ctx.accounts.ledger;
    ledger.total_users = ledger
        .total_users
        .checked_add(1)
        .ok_or(ErrorCode::NumericOverflow)?;

    emit!(UserRegistered {
        user_account: user_account.key(),
        authority: user_account.authority,
    });

    Ok(())
}
