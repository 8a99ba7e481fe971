use crate::error::ErrorCode;
use crate::state::RewardLedger;
use crate::LEDGER_SEED_PREFIX;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct SetLedgerPaused<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED_PREFIX],
        bump = ledger.bump,
        has_one = admin @ ErrorCode::AdminMismatch,
    )]
    pub ledger: Account<'info, RewardLedger>,
}

#[event]
pub struct LedgerPauseToggled {
    pub ledger: Pubkey,
    pub paused: bool,
}

pub fn handle_set_ledger_paused(ctx: Context<SetLedgerPaused>, paused: bool) -> Result<()> {
    let ledger = &mut ctx.accounts.ledger;
    ledger.paused = paused;

    emit!(LedgerPauseToggled {
        ledger: ledger.key(),
        paused,
    });

    msg!("Ledger paused: {}", paused);

    Ok(())
}
