use crate::constants::{REPUTATION_FRAUD_PENALTY, REPUTATION_REJECTED_PENALTY};
use crate::error::ErrorCode;
use crate::state::{
    AccountStatus, ActionKind, ActionReceipt, ActionVerdict, Campaign, CampaignStatus,
    Participation, ParticipationStatus, RewardLedger, UserAccount,
};
use crate::{LEDGER_SEED_PREFIX, RECEIPT_SEED_PREFIX};
use anchor_lang::prelude::*;

#[derive(Accounts)]
#[instruction(action: ActionKind, evidence_hash: [u8; 32])]
pub struct RejectAction<'info> {
    #[account(
        mut,
        constraint = operator.key() == ledger.operator || operator.key() == ledger.admin
            @ ErrorCode::OperatorMismatch,
    )]
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED_PREFIX],
        bump = ledger.bump,
    )]
    pub ledger: Account<'info, RewardLedger>,

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

    /// Stamping a rejection receipt makes the verdict final: the same
    /// evidence can never be re-submitted for verification.
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
pub struct ActionRejected {
    pub campaign: Pubkey,
    pub participation: Pubkey,
    pub user: Pubkey,
    pub action: ActionKind,
    pub fraud: bool,
    pub user_banned: bool,
}

pub fn handle_reject_action(
    ctx: Context<RejectAction>,
    action: ActionKind,
    evidence_hash: [u8; 32],
    fraud: bool,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let ledger = &mut ctx.accounts.ledger;
    let campaign = &ctx.accounts.campaign;
    let user_account = &mut ctx.accounts.user_account;
    let participation = &mut ctx.accounts.participation;
    let receipt = &mut ctx.accounts.receipt;

    require!(evidence_hash != [0; 32], ErrorCode::InvalidEvidence);
    require!(
        receipt.verdict == ActionVerdict::Unprocessed,
        ErrorCode::EvidenceAlreadyProcessed
    );

    receipt.set_inner(ActionReceipt {
        campaign: campaign.key(),
        user: participation.user,
        action,
        verdict: ActionVerdict::Rejected,
        reward: 0,
        evidence_hash,
        processed_at: now,
        bump: ctx.bumps.receipt,
    });

    let mut user_banned = false;

    if fraud {
        // Fraudulent submissions take the whole participation out of play
        participation.status = ParticipationStatus::Rejected;
        participation.fraud_flags = participation
            .fraud_flags
            .checked_add(1)
            .ok_or(ErrorCode::NumericOverflow)?;

        user_account.fraud_count = user_account
            .fraud_count
            .checked_add(1)
            .ok_or(ErrorCode::NumericOverflow)?;
        user_account.apply_reputation_delta(REPUTATION_FRAUD_PENALTY);

        if user_account.fraud_count >= ledger.fraud_ban_threshold && !user_account.is_banned() {
            let forfeited = user_account.pending_earnings;
            user_account.pending_earnings = 0;
            user_account.status = AccountStatus::Banned;

            ledger.platform_fees_accrued = ledger
                .platform_fees_accrued
                .checked_add(forfeited)
                .ok_or(ErrorCode::NumericOverflow)?;
            ledger.forfeited_earnings = ledger
                .forfeited_earnings
                .checked_add(forfeited)
                .ok_or(ErrorCode::NumericOverflow)?;

            user_banned = true;
            msg!(
                "Fraud threshold reached, user {} banned, {} micro-USD forfeited",
                user_account.authority,
                forfeited
            );
        }
    } else {
        user_account.apply_reputation_delta(REPUTATION_REJECTED_PENALTY);

        // A rejection against a closed campaign can strand an honest
        // participant below their cap with nothing left to verify.
        if participation.status == ParticipationStatus::Active
            && campaign.status != CampaignStatus::Active
        {
            participation.status = ParticipationStatus::Stalled;
            msg!("Participation {} stalled", participation.key());
        }
    }

    emit!(ActionRejected {
        campaign: campaign.key(),
        participation: participation.key(),
        user: participation.user,
        action,
        fraud,
        user_banned,
    });

    Ok(())
}
