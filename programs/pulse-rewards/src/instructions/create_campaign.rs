use crate::error::ErrorCode;
use crate::state::{
    Campaign, CampaignKind, CampaignStatus, RewardLedger, UserAccount, ALL_ENGAGEMENT_BITS,
};
use crate::{CAMPAIGN_SEED_PREFIX, LEDGER_SEED_PREFIX, USER_SEED_PREFIX};
use anchor_lang::prelude::*;

#[derive(Accounts)]
#[instruction(seed: u64)]
pub struct CreateCampaign<'info> {
    #[account(mut)]
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
        seeds = [USER_SEED_PREFIX, creator.key().as_ref()],
        bump = user_account.bump,
        constraint = !user_account.is_banned() @ ErrorCode::UserBanned,
    )]
    pub user_account: Account<'info, UserAccount>,

    #[account(
        init,
        payer = creator,
        space = 8 + Campaign::INIT_SPACE,
        seeds = [
            CAMPAIGN_SEED_PREFIX,
            creator.key().as_ref(),
            seed.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub campaign: Account<'info, Campaign>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct CampaignCreated {
    pub campaign: Pubkey,
    pub creator: Pubkey,
    pub kind: CampaignKind,
    pub budget: u64,
    pub user_reward_pool: u64,
    pub platform_fee_amount: u64,
    pub target_units: u64,
}

pub fn handle_create_campaign(
    ctx: Context<CreateCampaign>,
    seed: u64,
    kind: CampaignKind,
    budget: u64,
    target_units: u64,
    max_units_per_user: u64,
    required_actions: u8,
    ends_at: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    // 0. Basic argument validation
    require!(budget > 0, ErrorCode::InvalidBudget);
    require!(ends_at == 0 || ends_at > now, ErrorCode::InvalidSchedule);

    // 1. Kind-specific shape validation
    let max_units_per_user = match kind {
        CampaignKind::Spark => {
            // Spark pays fixed per-action rates; a unit target is an
            // optional cap and the required-action mask is meaningless.
            require!(required_actions == 0, ErrorCode::InvalidRequiredActions);
            max_units_per_user
        }
        CampaignKind::BoostVolume => {
            require!(target_units > 0, ErrorCode::InvalidTargetUnits);
            require!(
                max_units_per_user > 0 && max_units_per_user <= target_units,
                ErrorCode::InvalidUserCap
            );
            require!(required_actions == 0, ErrorCode::InvalidRequiredActions);
            max_units_per_user
        }
        CampaignKind::Drip => {
            require!(target_units > 0, ErrorCode::InvalidTargetUnits);
            require!(
                required_actions != 0 && required_actions & !ALL_ENGAGEMENT_BITS == 0,
                ErrorCode::InvalidRequiredActions
            );
            // Each participant completes each required engagement once.
            required_actions.count_ones() as u64
        }
    };

    // 2. Escrow the budget out of the creator's spendable balance
    let user_account = &mut ctx.accounts.user_account;
    require!(
        budget <= user_account.balance,
        ErrorCode::InsufficientBalance
    );
    user_account.balance = user_account
        .balance
        .checked_sub(budget)
        .ok_or(ErrorCode::NumericOverflow)?;

    // 3. Derive the split once, at construction
    let ledger = &mut ctx.accounts.ledger;
    let (user_reward_pool, platform_fee_amount) =
        Campaign::split_budget(budget, ledger.platform_fee_bps)?;

    let campaign = &mut ctx.accounts.campaign;
    campaign.set_inner(Campaign {
        creator: ctx.accounts.creator.key(),
        seed,
        kind,
        status: CampaignStatus::Draft,
        budget,
        user_reward_pool,
        platform_fee_amount,
        current_reward_pool_balance: user_reward_pool,
        target_units,
        max_units_per_user,
        required_actions,
        total_units_verified: 0,
        unique_participants: 0,
        ends_at,
        created_at: now,
        activated_at: 0, // set on activation, gates the fee accrual
        completed_at: 0,
        bump: ctx.bumps.campaign,
    });

    ledger.total_campaigns = ledger
        .total_campaigns
        .checked_add(1)
        .ok_or(ErrorCode::NumericOverflow)?;

    emit!(CampaignCreated {
        campaign: campaign.key(),
        creator: campaign.creator,
        kind,
        budget,
        user_reward_pool,
        platform_fee_amount,
        target_units,
    });

    Ok(())
}
