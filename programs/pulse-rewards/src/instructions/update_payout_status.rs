use crate::error::ErrorCode;
use crate::state::{PayoutRequest, PayoutStatus, RewardLedger, UserAccount};
use crate::LEDGER_SEED_PREFIX;
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

#[derive(Accounts)]
pub struct UpdatePayoutStatus<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [LEDGER_SEED_PREFIX],
        bump = ledger.bump,
        has_one = admin @ ErrorCode::AdminMismatch,
        has_one = treasury @ ErrorCode::TreasuryMismatch,
    )]
    pub ledger: Account<'info, RewardLedger>,

    #[account(
        mut,
        constraint = user_account.authority == payout_request.user @ ErrorCode::UserAccountMismatch,
    )]
    pub user_account: Account<'info, UserAccount>,

    #[account(mut)]
    pub payout_request: Account<'info, PayoutRequest>,

    #[account(mut)]
    pub treasury: Account<'info, TokenAccount>,

    /// Settlement destination fixed when the request was opened.
    #[account(
        mut,
        constraint = recipient.key() == payout_request.payout_address
            @ ErrorCode::InvalidPayoutAddress,
        constraint = recipient.mint == ledger.treasury_mint @ ErrorCode::TreasuryMintMismatch,
    )]
    pub recipient: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct PayoutStatusChanged {
    pub payout_request: Pubkey,
    pub user: Pubkey,
    pub previous_status: PayoutStatus,
    pub new_status: PayoutStatus,
    pub amount: u64,
}

pub fn handle_update_payout_status(
    ctx: Context<UpdatePayoutStatus>,
    new_status: PayoutStatus,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let ledger = &ctx.accounts.ledger;
    let user_account = &mut ctx.accounts.user_account;
    let payout_request = &mut ctx.accounts.payout_request;

    let previous_status = payout_request.status;

    require!(
        !previous_status.is_terminal(),
        ErrorCode::PayoutRequestTerminal
    );
    require!(
        previous_status.can_transition_to(new_status),
        ErrorCode::InvalidPayoutTransition
    );

    match new_status {
        PayoutStatus::Approved => {}
        PayoutStatus::Rejected => {
            // Rejection returns the escrowed amount to pending earnings
            user_account.pending_earnings = user_account
                .pending_earnings
                .checked_add(payout_request.amount)
                .ok_or(ErrorCode::NumericOverflow)?;
        }
        PayoutStatus::Completed => {
            let ledger_seeds = &[LEDGER_SEED_PREFIX, &[ledger.bump]];
            let signer_seeds = &[&ledger_seeds[..]];

            token::transfer(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    Transfer {
                        from: ctx.accounts.treasury.to_account_info(),
                        to: ctx.accounts.recipient.to_account_info(),
                        authority: ledger.to_account_info(),
                    },
                    signer_seeds,
                ),
                payout_request.amount,
            )?;
        }
        PayoutStatus::Pending => return err!(ErrorCode::InvalidPayoutTransition),
    }

    if previous_status == PayoutStatus::Pending {
        user_account.has_pending_payout = false;
    }

    payout_request.status = new_status;
    if new_status.is_terminal() {
        payout_request.resolved_at = now;
    }

    emit!(PayoutStatusChanged {
        payout_request: payout_request.key(),
        user: payout_request.user,
        previous_status,
        new_status,
        amount: payout_request.amount,
    });

    Ok(())
}
