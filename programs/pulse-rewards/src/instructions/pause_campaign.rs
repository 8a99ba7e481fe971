use crate::error::ErrorCode;
use crate::state::{Campaign, CampaignStatus};
use crate::CAMPAIGN_SEED_PREFIX;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct PauseCampaign<'info> {
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
        constraint = campaign.status == CampaignStatus::Active @ ErrorCode::CampaignNotActive,
    )]
    pub campaign: Account<'info, Campaign>,
}

#[event]
pub struct CampaignPaused {
    pub campaign: Pubkey,
    pub paused_at: i64,
}

pub fn handle_pause_campaign(ctx: Context<PauseCampaign>) -> Result<()> {
    let campaign = &mut ctx.accounts.campaign;
    campaign.status = CampaignStatus::Paused;

    emit!(CampaignPaused {
        campaign: campaign.key(),
        paused_at: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
