use crate::error::ErrorCode;
use crate::state::{Campaign, CampaignStatus};
use crate::CAMPAIGN_SEED_PREFIX;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct CancelCampaign<'info> {
    pub creator: Signer<'info>,

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
            CampaignStatus::Draft | CampaignStatus::Active | CampaignStatus::Paused
        ) @ ErrorCode::CampaignNotCancellable,
    )]
    pub campaign: Account<'info, Campaign>,
}

#[event]
pub struct CampaignCancelled {
    pub campaign: Pubkey,
    pub undistributed_pool: u64,
    pub cancelled_at: i64,
}

/// Stops a campaign for good. Funds stay escrowed until the creator runs
/// reclaim_campaign_funds.
pub fn handle_cancel_campaign(ctx: Context<CancelCampaign>) -> Result<()> {
    let campaign = &mut ctx.accounts.campaign;
    campaign.status = CampaignStatus::Cancelled;

    emit!(CampaignCancelled {
        campaign: campaign.key(),
        undistributed_pool: campaign.current_reward_pool_balance,
        cancelled_at: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
