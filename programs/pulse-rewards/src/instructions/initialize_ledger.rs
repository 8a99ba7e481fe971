use crate::constants::BPS_DENOMINATOR;
use crate::error::ErrorCode;
use crate::state::RewardLedger;
use crate::{LEDGER_SEED_PREFIX, TREASURY_SEED_PREFIX};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct InitializeLedger<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = 8 + RewardLedger::INIT_SPACE,
        seeds = [LEDGER_SEED_PREFIX],
        bump
    )]
    pub ledger: Account<'info, RewardLedger>,

    /// Settlement mint for every balance held by the ledger.
    pub treasury_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = admin,
        seeds = [TREASURY_SEED_PREFIX, ledger.key().as_ref()],
        bump,
        token::mint = treasury_mint,
        token::authority = ledger,
    )]
    pub treasury: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct LedgerInitialized {
    pub ledger: Pubkey,
    pub admin: Pubkey,
    pub operator: Pubkey,
    pub treasury_mint: Pubkey,
    pub platform_fee_bps: u16,
    pub min_payout_amount: u64,
}

pub fn handle_initialize_ledger(
    ctx: Context<InitializeLedger>,
    operator: Pubkey,
    platform_fee_bps: u16,
    min_payout_amount: u64,
    action_cooldown_secs: i64,
    fraud_ban_threshold: u8,
) -> Result<()> {
    require!(platform_fee_bps <= BPS_DENOMINATOR, ErrorCode::InvalidFeeBps);
    require!(min_payout_amount > 0, ErrorCode::InvalidAmount);
    require!(action_cooldown_secs >= 0, ErrorCode::InvalidAmount);
    require!(fraud_ban_threshold > 0, ErrorCode::InvalidAmount);

    let ledger = &mut ctx.accounts.ledger;
    ledger.set_inner(RewardLedger {
        admin: ctx.accounts.admin.key(),
        operator,
        treasury_mint: ctx.accounts.treasury_mint.key(),
        treasury: ctx.accounts.treasury.key(),
        platform_fee_bps,
        min_payout_amount,
        action_cooldown_secs,
        fraud_ban_threshold,
        paused: false,
        platform_fees_accrued: 0,
        forfeited_earnings: 0,
        total_campaigns: 0,
        total_users: 0,
        total_payout_requests: 0,
        bump: ctx.bumps.ledger,
        treasury_bump: ctx.bumps.treasury,
    });

    emit!(LedgerInitialized {
        ledger: ledger.key(),
        admin: ledger.admin,
        operator: ledger.operator,
        treasury_mint: ledger.treasury_mint,
        platform_fee_bps,
        min_payout_amount,
    });

    Ok(())
}
