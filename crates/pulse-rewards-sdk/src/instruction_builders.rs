use crate::AddressFinder;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{InstructionData as _, prelude::*};
use pulse_rewards::state::{ActionKind, CampaignKind, PayoutStatus};

pub fn build_initialize_ledger_ix(
    address_finder: &AddressFinder,
    admin: Pubkey,
    treasury_mint: Pubkey,
    operator: Pubkey,
    platform_fee_bps: u16,
    min_payout_amount: u64,
    action_cooldown_secs: i64,
    fraud_ban_threshold: u8,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::InitializeLedger,
    pulse_rewards::instruction::InitializeLedger,
)> {
    let (ledger, _) = address_finder.find_ledger_address();
    let (treasury, _) = address_finder.find_treasury_address(&ledger);

    let ix_accounts = pulse_rewards::accounts::InitializeLedger {
        admin,
        ledger,
        treasury_mint,
        treasury,
        token_program: address_finder.token_program_id,
        system_program: address_finder.system_program_id,
    };

    let ix_data = pulse_rewards::instruction::InitializeLedger {
        operator,
        platform_fee_bps,
        min_payout_amount,
        action_cooldown_secs,
        fraud_ban_threshold,
    };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_set_ledger_paused_ix(
    address_finder: &AddressFinder,
    admin: Pubkey,
    paused: bool,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::SetLedgerPaused,
    pulse_rewards::instruction::SetLedgerPaused,
)> {
    let (ledger, _) = address_finder.find_ledger_address();

    let ix_accounts = pulse_rewards::accounts::SetLedgerPaused { admin, ledger };

    let ix_data = pulse_rewards::instruction::SetLedgerPaused { paused };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_update_operator_ix(
    address_finder: &AddressFinder,
    admin: Pubkey,
    new_operator: Pubkey,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::UpdateOperator,
    pulse_rewards::instruction::UpdateOperator,
)> {
    let (ledger, _) = address_finder.find_ledger_address();

    let ix_accounts = pulse_rewards::accounts::UpdateOperator { admin, ledger };

    let ix_data = pulse_rewards::instruction::UpdateOperator { new_operator };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_withdraw_platform_fees_ix(
    address_finder: &AddressFinder,
    admin: Pubkey,
    destination: Pubkey,
    amount: u64,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::WithdrawPlatformFees,
    pulse_rewards::instruction::WithdrawPlatformFees,
)> {
    let (ledger, _) = address_finder.find_ledger_address();
    let (treasury, _) = address_finder.find_treasury_address(&ledger);

    let ix_accounts = pulse_rewards::accounts::WithdrawPlatformFees {
        admin,
        ledger,
        treasury,
        destination,
        token_program: address_finder.token_program_id,
    };

    let ix_data = pulse_rewards::instruction::WithdrawPlatformFees { amount };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_ban_user_ix(
    address_finder: &AddressFinder,
    admin: Pubkey,
    user_authority: Pubkey,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::BanUser,
    pulse_rewards::instruction::BanUser,
)> {
    let (ledger, _) = address_finder.find_ledger_address();
    let (user_account, _) = address_finder.find_user_account_address(&user_authority);

    let ix_accounts = pulse_rewards::accounts::BanUser {
        admin,
        ledger,
        user_account,
    };

    let ix_data = pulse_rewards::instruction::BanUser {};

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_register_user_ix(
    address_finder: &AddressFinder,
    authority: Pubkey,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::RegisterUser,
    pulse_rewards::instruction::RegisterUser,
)> {
    let (ledger, _) = address_finder.find_ledger_address();
    let (user_account, _) = address_finder.find_user_account_address(&authority);

    let ix_accounts = pulse_rewards::accounts::RegisterUser {
        authority,
        ledger,
        user_account,
        system_program: address_finder.system_program_id,
    };

    let ix_data = pulse_rewards::instruction::RegisterUser {};

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_set_payout_address_ix(
    address_finder: &AddressFinder,
    authority: Pubkey,
    payout_address: Pubkey,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::SetPayoutAddress,
    pulse_rewards::instruction::SetPayoutAddress,
)> {
    let (user_account, _) = address_finder.find_user_account_address(&authority);

    let ix_accounts = pulse_rewards::accounts::SetPayoutAddress {
        authority,
        user_account,
    };

    let ix_data = pulse_rewards::instruction::SetPayoutAddress { payout_address };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_deposit_balance_ix(
    address_finder: &AddressFinder,
    authority: Pubkey,
    source: Pubkey,
    amount: u64,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::DepositBalance,
    pulse_rewards::instruction::DepositBalance,
)> {
    let (ledger, _) = address_finder.find_ledger_address();
    let (user_account, _) = address_finder.find_user_account_address(&authority);
    let (treasury, _) = address_finder.find_treasury_address(&ledger);

    let ix_accounts = pulse_rewards::accounts::DepositBalance {
        authority,
        ledger,
        user_account,
        source,
        treasury,
        token_program: address_finder.token_program_id,
    };

    let ix_data = pulse_rewards::instruction::DepositBalance { amount };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_withdraw_balance_ix(
    address_finder: &AddressFinder,
    authority: Pubkey,
    destination: Pubkey,
    amount: u64,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::WithdrawBalance,
    pulse_rewards::instruction::WithdrawBalance,
)> {
    let (ledger, _) = address_finder.find_ledger_address();
    let (user_account, _) = address_finder.find_user_account_address(&authority);
    let (treasury, _) = address_finder.find_treasury_address(&ledger);

    let ix_accounts = pulse_rewards::accounts::WithdrawBalance {
        authority,
        ledger,
        user_account,
        treasury,
        destination,
        token_program: address_finder.token_program_id,
    };

    let ix_data = pulse_rewards::instruction::WithdrawBalance { amount };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

#[allow(clippy::too_many_arguments)]
pub fn build_create_campaign_ix(
    address_finder: &AddressFinder,
    creator: Pubkey,
    seed: u64,
    kind: CampaignKind,
    budget: u64,
    target_units: u64,
    max_units_per_user: u64,
    required_actions: u8,
    ends_at: i64,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::CreateCampaign,
    pulse_rewards::instruction::CreateCampaign,
)> {
    let (ledger, _) = address_finder.find_ledger_address();
    let (user_account, _) = address_finder.find_user_account_address(&creator);
    let (campaign, _) = address_finder.find_campaign_address(&creator, seed);

    let ix_accounts = pulse_rewards::accounts::CreateCampaign {
        creator,
        ledger,
        user_account,
        campaign,
        system_program: address_finder.system_program_id,
    };

    let ix_data = pulse_rewards::instruction::CreateCampaign {
        seed,
        kind,
        budget,
        target_units,
        max_units_per_user,
        required_actions,
        ends_at,
    };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_activate_campaign_ix(
    address_finder: &AddressFinder,
    creator: Pubkey,
    seed: u64,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::ActivateCampaign,
    pulse_rewards::instruction::ActivateCampaign,
)> {
    let (ledger, _) = address_finder.find_ledger_address();
    let (campaign, _) = address_finder.find_campaign_address(&creator, seed);

    let ix_accounts = pulse_rewards::accounts::ActivateCampaign {
        creator,
        ledger,
        campaign,
    };

    let ix_data = pulse_rewards::instruction::ActivateCampaign {};

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_pause_campaign_ix(
    address_finder: &AddressFinder,
    creator: Pubkey,
    seed: u64,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::PauseCampaign,
    pulse_rewards::instruction::PauseCampaign,
)> {
    let (campaign, _) = address_finder.find_campaign_address(&creator, seed);

    let ix_accounts = pulse_rewards::accounts::PauseCampaign { creator, campaign };

    let ix_data = pulse_rewards::instruction::PauseCampaign {};

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_resume_campaign_ix(
    address_finder: &AddressFinder,
    creator: Pubkey,
    seed: u64,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::ResumeCampaign,
    pulse_rewards::instruction::ResumeCampaign,
)> {
    let (campaign, _) = address_finder.find_campaign_address(&creator, seed);

    let ix_accounts = pulse_rewards::accounts::ResumeCampaign { creator, campaign };

    let ix_data = pulse_rewards::instruction::ResumeCampaign {};

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_cancel_campaign_ix(
    address_finder: &AddressFinder,
    creator: Pubkey,
    seed: u64,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::CancelCampaign,
    pulse_rewards::instruction::CancelCampaign,
)> {
    let (campaign, _) = address_finder.find_campaign_address(&creator, seed);

    let ix_accounts = pulse_rewards::accounts::CancelCampaign { creator, campaign };

    let ix_data = pulse_rewards::instruction::CancelCampaign {};

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_finalize_campaign_ix(
    address_finder: &AddressFinder,
    creator: Pubkey,
    seed: u64,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::FinalizeCampaign,
    pulse_rewards::instruction::FinalizeCampaign,
)> {
    let (campaign, _) = address_finder.find_campaign_address(&creator, seed);

    let ix_accounts = pulse_rewards::accounts::FinalizeCampaign { creator, campaign };

    let ix_data = pulse_rewards::instruction::FinalizeCampaign {};

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_reclaim_campaign_funds_ix(
    address_finder: &AddressFinder,
    creator: Pubkey,
    seed: u64,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::ReclaimCampaignFunds,
    pulse_rewards::instruction::ReclaimCampaignFunds,
)> {
    let (ledger, _) = address_finder.find_ledger_address();
    let (user_account, _) = address_finder.find_user_account_address(&creator);
    let (campaign, _) = address_finder.find_campaign_address(&creator, seed);

    let ix_accounts = pulse_rewards::accounts::ReclaimCampaignFunds {
        creator,
        ledger,
        user_account,
        campaign,
    };

    let ix_data = pulse_rewards::instruction::ReclaimCampaignFunds {};

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_join_campaign_ix(
    address_finder: &AddressFinder,
    authority: Pubkey,
    campaign: Pubkey,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::JoinCampaign,
    pulse_rewards::instruction::JoinCampaign,
)> {
    let (ledger, _) = address_finder.find_ledger_address();
    let (user_account, _) = address_finder.find_user_account_address(&authority);
    let (participation, _) = address_finder.find_participation_address(&campaign, &authority);

    let ix_accounts = pulse_rewards::accounts::JoinCampaign {
        authority,
        ledger,
        user_account,
        campaign,
        participation,
        system_program: address_finder.system_program_id,
    };

    let ix_data = pulse_rewards::instruction::JoinCampaign {};

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_verify_action_ix(
    address_finder: &AddressFinder,
    operator: Pubkey,
    campaign: Pubkey,
    user_authority: Pubkey,
    action: ActionKind,
    evidence_hash: [u8; 32],
) -> Result<(
    Instruction,
    pulse_rewards::accounts::VerifyAction,
    pulse_rewards::instruction::VerifyAction,
)> {
    let (ledger, _) = address_finder.find_ledger_address();
    let (user_account, _) = address_finder.find_user_account_address(&user_authority);
    let (participation, _) = address_finder.find_participation_address(&campaign, &user_authority);
    let (receipt, _) = address_finder.find_receipt_address(&campaign, &evidence_hash);

    let ix_accounts = pulse_rewards::accounts::VerifyAction {
        operator,
        ledger,
        campaign,
        user_account,
        participation,
        receipt,
        system_program: address_finder.system_program_id,
    };

    let ix_data = pulse_rewards::instruction::VerifyAction {
        action,
        evidence_hash,
    };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_reject_action_ix(
    address_finder: &AddressFinder,
    operator: Pubkey,
    campaign: Pubkey,
    user_authority: Pubkey,
    action: ActionKind,
    evidence_hash: [u8; 32],
    fraud: bool,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::RejectAction,
    pulse_rewards::instruction::RejectAction,
)> {
    let (ledger, _) = address_finder.find_ledger_address();
    let (user_account, _) = address_finder.find_user_account_address(&user_authority);
    let (participation, _) = address_finder.find_participation_address(&campaign, &user_authority);
    let (receipt, _) = address_finder.find_receipt_address(&campaign, &evidence_hash);

    let ix_accounts = pulse_rewards::accounts::RejectAction {
        operator,
        ledger,
        campaign,
        user_account,
        participation,
        receipt,
        system_program: address_finder.system_program_id,
    };

    let ix_data = pulse_rewards::instruction::RejectAction {
        action,
        evidence_hash,
        fraud,
    };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_request_payout_ix(
    address_finder: &AddressFinder,
    authority: Pubkey,
    payout_index: u32,
    amount: u64,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::RequestPayout,
    pulse_rewards::instruction::RequestPayout,
)> {
    let (ledger, _) = address_finder.find_ledger_address();
    let (user_account, _) = address_finder.find_user_account_address(&authority);
    let (payout_request, _) = address_finder.find_payout_request_address(&authority, payout_index);

    let ix_accounts = pulse_rewards::accounts::RequestPayout {
        authority,
        ledger,
        user_account,
        payout_request,
        system_program: address_finder.system_program_id,
    };

    let ix_data = pulse_rewards::instruction::RequestPayout { amount };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_update_payout_status_ix(
    address_finder: &AddressFinder,
    admin: Pubkey,
    user_authority: Pubkey,
    payout_index: u32,
    recipient: Pubkey,
    new_status: PayoutStatus,
) -> Result<(
    Instruction,
    pulse_rewards::accounts::UpdatePayoutStatus,
    pulse_rewards::instruction::UpdatePayoutStatus,
)> {
    let (ledger, _) = address_finder.find_ledger_address();
    let (user_account, _) = address_finder.find_user_account_address(&user_authority);
    let (payout_request, _) =
        address_finder.find_payout_request_address(&user_authority, payout_index);
    let (treasury, _) = address_finder.find_treasury_address(&ledger);

    let ix_accounts = pulse_rewards::accounts::UpdatePayoutStatus {
        admin,
        ledger,
        user_account,
        payout_request,
        treasury,
        recipient,
        token_program: address_finder.token_program_id,
    };

    let ix_data = pulse_rewards::instruction::UpdatePayoutStatus { new_status };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}
