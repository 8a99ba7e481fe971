use crate::error::ErrorCode;
use crate::state::RewardLedger;
use crate::LEDGER_SEED_PREFIX;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct UpdateOperator<'info> {
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
pub struct OperatorUpdated {
    pub ledger: Pubkey,
    pub previous_operator: Pubkey,
    pub new_operator: Pubkey,
}

pub fn handle_update_operator(ctx: Context<UpdateOperator>, new_operator: Pubkey) -> Result<()> {
    let ledger = &mut ctx.accounts.ledger;
    let previous_operator = ledger.operator;
    ledger.operator = new_operator;

    emit!(OperatorUpdated {
        ledger: ledger.key(),
        previous_operator,
        new_operator,
    });

    Ok(())
}
