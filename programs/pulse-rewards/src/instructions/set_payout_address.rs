use crate::error::ErrorCode;
use crate::state::UserAccount;
use crate::USER_SEED_PREFIX;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct SetPayoutAddress<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [USER_SEED_PREFIX, authority.key().as_ref()],
        bump = user_account.bump,
        has_one = authority @ ErrorCode::UserAccountMismatch,
        constraint = !user_account.is_banned() @ ErrorCode::UserBanned,
    )]
    pub user_account: Account<'info, UserAccount>,
}

#[event]
pub struct PayoutAddressUpdated {
    pub user_account: Pubkey,
    pub payout_address: Pubkey,
}

pub fn handle_set_payout_address(
    ctx: Context<SetPayoutAddress>,
    payout_address: Pubkey,
) -> Result<()> {
    require!(
        payout_address != Pubkey::default(),
        ErrorCode::InvalidPayoutAddress
    );

    let user_account = &mut ctx.accounts.user_account;
    user_account.payout_address = payout_address;

    emit!(PayoutAddressUpdated {
        user_account: user_account.key(),
        payout_address,
    });

    Ok(())
}
