use crate::error::ErrorCode;
use crate::state::{Campaign, CampaignStatus, RewardLedger, UserAccount};
use crate::{CAMPAIGN_SEED_PREFIX, LEDGER_SEED_PREFIX, USER_SEED_PREFIX};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct ReclaimCampaignFunds<'info> {
    pub creator: Signer<'info>,

    #[account(
        seeds = [LEDGER_SEED_PREFIX],
        bump = ledger.bump,
        constraint = !ledger.paused @ ErrorCode::LedgerPaused,
    )]
    pub ledger: Account<'info, RewardLedger>,

    #[account(
        mut,
        seeds = [USER_SEED_PREFIX, creator.key().as_ref()],
        bump = user_account.bump,
    )]
    pub user_account: Account<'info, UserAccount>,

    #[account(
        mut,
        seeds = [
            CAMPAIGN_SEED_PREFIX,
            creator.key().as_ref(),
            campaign.seed.to_le_bytes().as_ref(),
        ],
        bump = campaign.bump,
        has_one = creator @ ErrorCode::CreatorMismatch,
        constraint = matches!(
            campaign.status,
            CampaignStatus::Completed | CampaignStatus::Cancelled | CampaignStatus::Ended
        ) @ ErrorCode::CampaignNotReclaimable,
    )]
    pub campaign: Account<'info, Campaign>,
}

#[event]
pub struct CampaignFundsReclaimed {
    pub campaign: Pubkey,
    pub pool_refund: u64,
    pub fee_refund: u64,
    pub reclaimed_at: i64,
}

/// Sweeps every undistributed micro-USD of a closed campaign back to the
/// creator's spendable balance. Distributed rewards and any indivisible
/// remainder of floor division both live in `current_reward_pool_balance`,
/// so the sweep needs no dust bookkeeping of its own.
pub fn handle_reclaim_campaign_funds(ctx: Context<ReclaimCampaignFunds>) -> Result<()> {
    let campaign = &mut ctx.accounts.campaign;

    let pool_refund = campaign.current_reward_pool_balance;

    // The platform fee was never earned if the campaign never went live
    let fee_refund = if campaign.activated_at == 0 {
        campaign.platform_fee_amount
    } else {
        0
    };

    let total_refund = pool_refund
        .checked_add(fee_refund)
        .ok_or(ErrorCode::NumericOverflow)?;

    let user_account = &mut ctx.accounts.user_account;
    user_account.balance = user_account
        .balance
        .checked_add(total_refund)
        .ok_or(ErrorCode::NumericOverflow)?;

    campaign.current_reward_pool_balance = 0;
    campaign.status = CampaignStatus::Refunded;

    emit!(CampaignFundsReclaimed {
        campaign: campaign.key(),
        pool_refund,
        fee_refund,
        reclaimed_at: Clock::get()?.unix_timestamp,
    });

    msg!(
        "Reclaimed {} micro-USD to creator {}",
        total_refund,
        campaign.creator
    );

    Ok(())
}
