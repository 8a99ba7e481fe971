use crate::error::ErrorCode;
use crate::state::{Campaign, CampaignStatus};
use crate::CAMPAIGN_SEED_PREFIX;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct FinalizeCampaign<'info> {
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
            CampaignStatus::Active | CampaignStatus::Paused
        ) @ ErrorCode::CampaignNotActive,
    )]
    pub campaign: Account<'info, Campaign>,
}

#[event]
pub struct CampaignFinalized {
    pub campaign: Pubkey,
    pub status: CampaignStatus,
    pub total_units_verified: u64,
    pub finalized_at: i64,
}

/// Closes out a campaign whose run is over. Target completion normally
/// happens inline during verification; this covers time expiry and the
/// case where the final verification raced a pause.
pub fn handle_finalize_campaign(ctx: Context<FinalizeCampaign>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let campaign = &mut ctx.accounts.campaign;

    let status = if campaign.has_reached_target() {
        CampaignStatus::Completed
    } else if campaign.has_expired(now) {
        CampaignStatus::Ended
    } else {
        return err!(ErrorCode::CampaignStillRunning);
    };

    campaign.status = status;
    campaign.completed_at = now;

    emit!(CampaignFinalized {
        campaign: campaign.key(),
        status,
        total_units_verified: campaign.total_units_verified,
        finalized_at: now,
    });

    Ok(())
}
