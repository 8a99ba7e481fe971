use crate::error::ErrorCode;
use crate::state::{Campaign, CampaignStatus, RewardLedger};
use crate::{CAMPAIGN_SEED_PREFIX, LEDGER_SEED_PREFIX};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct ActivateCampaign<'info> {
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED_PREFIX],
        bump = ledger.bump,
        constraint = !ledger.paused @ ErrorCode::LedgerPaused,
    )]
    pub ledger: Account<'info, RewardLedger>,

    #[account(
        mut,
        seeds = [
            CAMPAIGN_SEED_PREFIX,
            creator.key().as_ref(),
            campaign.seed.to_le_bytes().as_ref(),
        ],
        bump = campaign.bump,
        has_one = creator @ ErrorCode::CreatorMismatch,
        constraint = campaign.status == CampaignStatus::Draft @ ErrorCode::CampaignNotDraft,
    )]
    pub campaign: Account<'info, Campaign>,
}

#[event]
pub struct CampaignActivated {
    pub campaign: Pubkey,
    pub platform_fee_amount: u64,
    pub activated_at: i64,
}

pub fn handle_activate_campaign(ctx: Context<ActivateCampaign>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let campaign = &mut ctx.accounts.campaign;

    require!(
        campaign.ends_at == 0 || campaign.ends_at > now,
        ErrorCode::CampaignExpired
    );

    // The platform earns its fee the moment the campaign goes live
    let ledger = &mut ctx.accounts.ledger;
    ledger.platform_fees_accrued = ledger
        .platform_fees_accrued
        .checked_add(campaign.platform_fee_amount)
        .ok_or(ErrorCode::NumericOverflow)?;

    campaign.status = CampaignStatus::Active;
    campaign.activated_at = now;

    emit!(CampaignActivated {
        campaign: campaign.key(),
        platform_fee_amount: campaign.platform_fee_amount,
        activated_at: now,
    });

    msg!("Campaign {} activated", campaign.key());

    Ok(())
}
