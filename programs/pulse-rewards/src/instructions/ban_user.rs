use crate::error::ErrorCode;
use crate::state::{AccountStatus, RewardLedger, UserAccount};
use crate::LEDGER_SEED_PREFIX;
use anchor_lang::prelude::*;

/// Administrative ban outside the automatic fraud-threshold path.
/// Pending earnings are forfeited to the platform, never refunded to any
/// campaign. The transition is irreversible.
#[derive(Accounts)]
pub struct BanUser<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED_PREFIX],
        bump = ledger.bump,
        has_one = admin @ ErrorCode::AdminMismatch,
    )]
    pub ledger: Account<'info, RewardLedger>,

    #[account(
        mut,
        constraint = !user_account.is_banned() @ ErrorCode::UserAlreadyBanned,
    )]
    pub user_account: Account<'info, UserAccount>,
}

#[event]
pub struct UserBanned {
    pub user_account: Pubkey,
    pub forfeited_earnings: u64,
    pub fraud_count: u8,
}

pub fn handle_ban_user(ctx: Context<BanUser>) -> Result<()> {
    let user_account = &mut ctx.accounts.user_account;
    let ledger = &mut ctx.accounts.ledger;

    let forfeited = user_account.pending_earnings;
    user_account.pending_earnings = 0;
    user_account.status = AccountStatus::Banned;

    ledger.platform_fees_accrued = ledger
        .platform_fees_accrued
        .checked_add(forfeited)
        .ok_or(ErrorCode::NumericOverflow)?;
    ledger.forfeited_earnings = ledger
        .forfeited_earnings
        .checked_add(forfeited)
        .ok_or(ErrorCode::NumericOverflow)?;

    emit!(UserBanned {
        user_account: user_account.key(),
        forfeited_earnings: forfeited,
        fraud_count: user_account.fraud_count,
    });

    msg!(
        "User {} banned, {} micro-USD forfeited",
        user_account.authority,
        forfeited
    );

    Ok(())
}
