use crate::error::ErrorCode;
use crate::state::{
    Campaign, CampaignStatus, Participation, ParticipationStatus, RewardLedger, UserAccount,
};
use crate::{LEDGER_SEED_PREFIX, PARTICIPATION_SEED_PREFIX, USER_SEED_PREFIX};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct JoinCampaign<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
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
        constraint = !user_account.is_banned() @ ErrorCode::UserBanned,
    )]
    pub user_account: Account<'info, UserAccount>,

    #[account(
        mut,
        constraint = campaign.status == CampaignStatus::Active @ ErrorCode::CampaignNotActive,
    )]
    pub campaign: Account<'info, Campaign>,

    /// The init constraint makes a second participation on the same
    /// (campaign, user) pair fail at account creation.
    #[account(
        init,
        payer = authority,
        space = 8 + Participation::INIT_SPACE,
        seeds = [
            PARTICIPATION_SEED_PREFIX,
            campaign.key().as_ref(),
            authority.key().as_ref(),
        ],
        bump
    )]
    pub participation: Account<'info, Participation>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct CampaignJoined {
    pub campaign: Pubkey,
    pub participation: Pubkey,
    pub user: Pubkey,
    pub unique_participants: u32,
}

pub fn handle_join_campaign(ctx: Context<JoinCampaign>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let campaign = &mut ctx.accounts.campaign;

    require!(!campaign.has_expired(now), ErrorCode::CampaignExpired);
    require!(
        !campaign.has_reached_target(),
        ErrorCode::CampaignTargetReached
    );

    let participation = &mut ctx.accounts.participation;
    participation.set_inner(Participation {
        campaign: campaign.key(),
        user: ctx.accounts.authority.key(),
        status: ParticipationStatus::Active,
        units_verified: 0,
        total_earned: 0,
        actions_done: 0,
        fraud_flags: 0,
        last_verified_at: [0; crate::constants::ACTION_KIND_COUNT],
        joined_at: now,
        completed_at: 0,
        bump: ctx.bumps.participation,
    });

    campaign.unique_participants = campaign
        .unique_participants
        .checked_add(1)
        .ok_or(ErrorCode::NumericOverflow)?;

    let user_account = &mut ctx.accounts.user_account;
    user_account.campaigns_joined = user_account
        .campaigns_joined
        .checked_add(1)
        .ok_or(ErrorCode::NumericOverflow)?;

    emit!(CampaignJoined {
        campaign: campaign.key(),
        participation: participation.key(),
        user: participation.user,
        unique_participants: campaign.unique_participants,
    });

    Ok(())
}
