use crate::constants::REPUTATION_VERIFIED_BONUS;
use crate::error::ErrorCode;
use crate::state::{
    ActionKind, ActionReceipt, ActionVerdict, Campaign, CampaignStatus, Participation,
    ParticipationStatus, RewardLedger, UserAccount,
};
use crate::{LEDGER_SEED_PREFIX, RECEIPT_SEED_PREFIX};
use anchor_lang::prelude::*;

#[derive(Accounts)]
#[instruction(action: ActionKind, evidence_hash: [u8; 32])]
pub struct VerifyAction<'info> {
    /// Verification authority; pays rent for the evidence receipt.
    #[account(
        mut,
        constraint = operator.key() == ledger.operator || operator.key() == ledger.admin
            @ ErrorCode::OperatorMismatch,
    )]
    pub operator: Signer<'info>,

    #[account(
        seeds = [LEDGER_SEED_PREFIX],
        bump = ledger.bump,
        constraint = !ledger.paused @ ErrorCode::LedgerPaused,
    )]
    pub ledger: Account<'info, RewardLedger>,

    #[account(mut)]
    pub campaign: Box<Account<'info, Campaign>>,

    #[account(
        mut,
        constraint = user_account.authority == participation.user @ ErrorCode::UserAccountMismatch,
    )]
    pub user_account: Box<Account<'info, UserAccount>>,

    #[account(
        mut,
        has_one = campaign @ ErrorCode::UserAccountMismatch,
    )]
    pub participation: Box<Account<'info, Participation>>,

    /// init_if_needed instead of init so duplicate evidence reaches the
    /// handler and fails there, after the earlier precondition checks, with
    /// its own error code.
    #[account(
        init_if_needed,
        payer = operator,
        space = 8 + ActionReceipt::INIT_SPACE,
        seeds = [
            RECEIPT_SEED_PREFIX,
            campaign.key().as_ref(),
            evidence_hash.as_ref(),
        ],
        bump
    )]
    pub receipt: Box<Account<'info, ActionReceipt>>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct ActionVerified {
    pub campaign: Pubkey,
    pub participation: Pubkey,
    pub user: Pubkey,
    pub action: ActionKind,
    pub reward: u64,
    pub pool_remaining: u64,
    pub total_units_verified: u64,
}

pub fn handle_verify_action(
    ctx: Context<VerifyAction>,
    action: ActionKind,
    evidence_hash: [u8; 32],
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let ledger = &ctx.accounts.ledger;
    let campaign = &mut ctx.accounts.campaign;
    let user_account = &mut ctx.accounts.user_account;
    let participation = &mut ctx.accounts.participation;
    let receipt = &mut ctx.accounts.receipt;

    // 0. Basic argument validation
    require!(evidence_hash != [0; 32], ErrorCode::InvalidEvidence);
    require!(campaign.accepts(action), ErrorCode::InvalidActionKind);

    // 1. Campaign must be live
    require!(
        campaign.status == CampaignStatus::Active,
        ErrorCode::CampaignNotActive
    );

    // 2. Neither finished nor expired. Status alone proves nothing here:
    //    Spark campaigns deplete and expire without ever flipping status.
    require!(
        !campaign.has_reached_target(),
        ErrorCode::CampaignTargetReached
    );
    require!(!campaign.has_expired(now), ErrorCode::CampaignExpired);

    // 3. The pool must cover this specific reward in full, no partial pay
    let reward = campaign.reward_per_unit(action)?;
    require!(
        reward <= campaign.current_reward_pool_balance,
        ErrorCode::RewardPoolDepleted
    );

    // 4. The acting user must be in good standing
    require!(!user_account.is_banned(), ErrorCode::UserBanned);
    require!(
        participation.status == ParticipationStatus::Active,
        ErrorCode::ParticipationNotActive
    );

    // 5. Per-kind cooldown
    let remaining = participation.cooldown_remaining(action, now, ledger.action_cooldown_secs);
    if remaining > 0 {
        msg!("Cooldown active, {}s remaining", remaining);
        return err!(ErrorCode::CooldownActive);
    }

    // 6. Fresh evidence only; a reused hash arrives here already stamped
    require!(
        receipt.verdict == ActionVerdict::Unprocessed,
        ErrorCode::EvidenceAlreadyProcessed
    );

    // 7. Per-user cap
    require!(
        !campaign.user_cap_reached(participation, action),
        ErrorCode::UserActionCapReached
    );

    // All preconditions hold. The runtime applies everything below
    // atomically with the checks above.
    campaign.current_reward_pool_balance = campaign
        .current_reward_pool_balance
        .checked_sub(reward)
        .ok_or(ErrorCode::NumericOverflow)?;
    campaign.total_units_verified = campaign
        .total_units_verified
        .checked_add(1)
        .ok_or(ErrorCode::NumericOverflow)?;

    participation.record_verified(action, reward, now)?;
    user_account.credit_reward(reward)?;
    user_account.apply_reputation_delta(REPUTATION_VERIFIED_BONUS);

    receipt.set_inner(ActionReceipt {
        campaign: campaign.key(),
        user: participation.user,
        action,
        verdict: ActionVerdict::Verified,
        reward,
        evidence_hash,
        processed_at: now,
        bump: ctx.bumps.receipt,
    });

    if let Some(capped) = campaign.capped_participation_status(participation) {
        participation.status = capped;
        participation.completed_at = now;
        msg!("Participation {} reached its cap", participation.key());
    }

    if campaign.has_reached_target() {
        campaign.status = CampaignStatus::Completed;
        campaign.completed_at = now;
        msg!("Campaign {} completed", campaign.key());
    }

    emit!(ActionVerified {
        campaign: campaign.key(),
        participation: participation.key(),
        user: participation.user,
        action,
        reward,
        pool_remaining: campaign.current_reward_pool_balance,
        total_units_verified: campaign.total_units_verified,
    });

    Ok(())
}
