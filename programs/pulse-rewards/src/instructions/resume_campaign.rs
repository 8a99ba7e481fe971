use crate::error::ErrorCode;
use crate::state::{Campaign, CampaignStatus};
use crate::CAMPAIGN_SEED_PREFIX;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct ResumeCampaign<'info> {
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
        constraint = campaign.status == CampaignStatus::Paused @ ErrorCode::CampaignNotPaused,
    )]
    pub campaign: Account<'info, Campaign>,
}

#[event]
pub struct CampaignResumed {
    pub campaign: Pubkey,
    pub resumed_at: i64,
}

/// Returns a paused campaign to Active. Expiry is not re-checked here:
/// the verification gate re-evaluates it on every action, so an expired
/// campaign resumes into a state where nothing can accrue.
pub fn handle_resume_campaign(ctx: Context<ResumeCampaign>) -> Result<()> {
    let campaign = &mut ctx.accounts.campaign;
    campaign.status = CampaignStatus::Active;

    emit!(CampaignResumed {
        campaign: campaign.key(),
        resumed_at: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
