use crate::constants::REPUTATION_PAYOUT_BONUS;
use crate::error::ErrorCode;
use crate::state::{PayoutRequest, PayoutStatus, RewardLedger, UserAccount};
use crate::{LEDGER_SEED_PREFIX, PAYOUT_SEED_PREFIX, USER_SEED_PREFIX};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct RequestPayout<'info> {
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
        mut,
        seeds = [USER_SEED_PREFIX, authority.key().as_ref()],
        bump = user_account.bump,
        has_one = authority @ ErrorCode::UserAccountMismatch,
    )]
    pub user_account: Account<'info, UserAccount>,

    /// Seeded by the user's lifetime request count, so each request gets
    /// a fresh address while the pending-flag keeps at most one open.
    #[account(
        init,
        payer = authority,
        space = 8 + PayoutRequest::INIT_SPACE,
        seeds = [
            PAYOUT_SEED_PREFIX,
            authority.key().as_ref(),
            user_account.payout_requests_total.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub payout_request: Account<'info, PayoutRequest>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct PayoutRequested {
    pub payout_request: Pubkey,
    pub user: Pubkey,
    pub index: u32,
    pub amount: u64,
    pub pending_earnings_remaining: u64,
}

pub fn handle_request_payout(ctx: Context<RequestPayout>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let ledger = &mut ctx.accounts.ledger;
    let user_account = &mut ctx.accounts.user_account;

    // Preconditions, checked in order, each with its own outcome
    require!(
        amount >= ledger.min_payout_amount,
        ErrorCode::PayoutBelowMinimum
    );
    require!(!user_account.is_banned(), ErrorCode::UserBanned);
    require!(
        user_account.payout_address != Pubkey::default(),
        ErrorCode::InvalidPayoutAddress
    );
    require!(
        amount <= user_account.pending_earnings,
        ErrorCode::InsufficientPendingEarnings
    );
    require!(
        !user_account.has_pending_payout,
        ErrorCode::PayoutAlreadyPending
    );

    user_account.pending_earnings = user_account
        .pending_earnings
        .checked_sub(amount)
        .ok_or(ErrorCode::NumericOverflow)?;

    let index = user_account.payout_requests_total;

    let payout_request = &mut ctx.accounts.payout_request;
    payout_request.set_inner(PayoutRequest {
        user: ctx.accounts.authority.key(),
        index,
        amount,
        status: PayoutStatus::Pending,
        payout_address: user_account.payout_address, // captured, not re-read later
        requested_at: now,
        resolved_at: 0,
        bump: ctx.bumps.payout_request,
    });

    user_account.payout_requests_total = index
        .checked_add(1)
        .ok_or(ErrorCode::NumericOverflow)?;
    user_account.has_pending_payout = true;
    user_account.apply_reputation_delta(REPUTATION_PAYOUT_BONUS);

    ledger.total_payout_requests = ledger
        .total_payout_requests
        .checked_add(1)
        .ok_or(ErrorCode::NumericOverflow)?;

    emit!(PayoutRequested {
        payout_request: payout_request.key(),
        user: payout_request.user,
        index,
        amount,
        pending_earnings_remaining: user_account.pending_earnings,
    });

    Ok(())
}
