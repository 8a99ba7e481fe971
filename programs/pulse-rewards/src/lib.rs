pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

pub use constants::{
    CAMPAIGN_SEED_PREFIX, LEDGER_SEED_PREFIX, PARTICIPATION_SEED_PREFIX, PAYOUT_SEED_PREFIX,
    RECEIPT_SEED_PREFIX, TREASURY_SEED_PREFIX, USER_SEED_PREFIX,
};
pub use instructions::*;
pub use state::*;

use anchor_lang::prelude::*;

declare_id!("3ShHXBWMqSFQL4etZ8EXQvLA1hTzG9C1u9iyAkqV7tz8");

#[program]
pub mod pulse_rewards {
    use super::instructions;
    use super::*;

    // admin
    pub fn initialize_ledger(
        ctx: Context<InitializeLedger>,
        operator: Pubkey,
        platform_fee_bps: u16,
        min_payout_amount: u64,
        action_cooldown_secs: i64,
        fraud_ban_threshold: u8,
    ) -> Result<()> {
        instructions::handle_initialize_ledger(
            ctx,
            operator,
            platform_fee_bps,
            min_payout_amount,
            action_cooldown_secs,
            fraud_ban_threshold,
        )
    }

    // admin
    pub fn set_ledger_paused(ctx: Context<SetLedgerPaused>, paused: bool) -> Result<()> {
        instructions::handle_set_ledger_paused(ctx, paused)
    }

    // admin
    pub fn update_operator(ctx: Context<UpdateOperator>, new_operator: Pubkey) -> Result<()> {
        instructions::handle_update_operator(ctx, new_operator)
    }

    // admin
    pub fn withdraw_platform_fees(ctx: Context<WithdrawPlatformFees>, amount: u64) -> Result<()> {
        instructions::handle_withdraw_platform_fees(ctx, amount)
    }

    // admin
    pub fn ban_user(ctx: Context<BanUser>) -> Result<()> {
        instructions::handle_ban_user(ctx)
    }

    // user
    pub fn register_user(ctx: Context<RegisterUser>) -> Result<()> {
        instructions::handle_register_user(ctx)
    }

    // user
    pub fn set_payout_address(
        ctx: Context<SetPayoutAddress>,
        payout_address: Pubkey,
    ) -> Result<()> {
        instructions::handle_set_payout_address(ctx, payout_address)
    }

    // user
    pub fn deposit_balance(ctx: Context<DepositBalance>, amount: u64) -> Result<()> {
        instructions::handle_deposit_balance(ctx, amount)
    }

    // user
    pub fn withdraw_balance(ctx: Context<WithdrawBalance>, amount: u64) -> Result<()> {
        instructions::handle_withdraw_balance(ctx, amount)
    }

    // creator
    pub fn create_campaign(
        ctx: Context<CreateCampaign>,
        seed: u64,
        kind: CampaignKind,
        budget: u64,
        target_units: u64,
        max_units_per_user: u64,
        required_actions: u8,
        ends_at: i64,
    ) -> Result<()> {
        instructions::handle_create_campaign(
            ctx,
            seed,
            kind,
            budget,
            target_units,
            max_units_per_user,
            required_actions,
            ends_at,
        )
    }

    // creator
    pub fn activate_campaign(ctx: Context<ActivateCampaign>) -> Result<()> {
        instructions::handle_activate_campaign(ctx)
    }

    // creator
    pub fn pause_campaign(ctx: Context<PauseCampaign>) -> Result<()> {
        instructions::handle_pause_campaign(ctx)
    }

    // creator
    pub fn resume_campaign(ctx: Context<ResumeCampaign>) -> Result<()> {
        instructions::handle_resume_campaign(ctx)
    }

    // creator
    pub fn cancel_campaign(ctx: Context<CancelCampaign>) -> Result<()> {
        instructions::handle_cancel_campaign(ctx)
    }

    // creator
    pub fn finalize_campaign(ctx: Context<FinalizeCampaign>) -> Result<()> {
        instructions::handle_finalize_campaign(ctx)
    }

    // creator
    pub fn reclaim_campaign_funds(ctx: Context<ReclaimCampaignFunds>) -> Result<()> {
        instructions::handle_reclaim_campaign_funds(ctx)
    }

    // participant
    pub fn join_campaign(ctx: Context<JoinCampaign>) -> Result<()> {
        instructions::handle_join_campaign(ctx)
    }

    // operator
    pub fn verify_action(
        ctx: Context<VerifyAction>,
        action: ActionKind,
        evidence_hash: [u8; 32],
    ) -> Result<()> {
        instructions::handle_verify_action(ctx, action, evidence_hash)
    }

    // operator
    pub fn reject_action(
        ctx: Context<RejectAction>,
        action: ActionKind,
        evidence_hash: [u8; 32],
        fraud: bool,
    ) -> Result<()> {
        instructions::handle_reject_action(ctx, action, evidence_hash, fraud)
    }

    // participant
    pub fn request_payout(ctx: Context<RequestPayout>, amount: u64) -> Result<()> {
        instructions::handle_request_payout(ctx, amount)
    }

    // admin
    pub fn update_payout_status(
        ctx: Context<UpdatePayoutStatus>,
        new_status: PayoutStatus,
    ) -> Result<()> {
        instructions::handle_update_payout_status(ctx, new_status)
    }
}
