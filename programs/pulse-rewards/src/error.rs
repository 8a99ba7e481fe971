use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Amount must be greater than zero.")]
    InvalidAmount,
    #[msg("Campaign budget must be greater than zero.")]
    InvalidBudget,
    #[msg("Campaign end time must be in the future.")]
    InvalidSchedule,
    #[msg("Target units must be greater than zero for this campaign kind.")]
    InvalidTargetUnits,
    #[msg("Per-user cap must be between 1 and the campaign target.")]
    InvalidUserCap,
    #[msg("Required action set is invalid for this campaign kind.")]
    InvalidRequiredActions,
    #[msg("This action kind is not rewarded by this campaign.")]
    InvalidActionKind,
    #[msg("Evidence hash must be non-zero.")]
    InvalidEvidence,
    #[msg("Payout address has not been registered or is invalid.")]
    InvalidPayoutAddress,
    #[msg("Platform fee must not exceed 100%.")]
    InvalidFeeBps,

    #[msg("The ledger is paused.")]
    LedgerPaused,
    #[msg("The campaign is not currently active.")]
    CampaignNotActive,
    #[msg("The campaign has already reached its target.")]
    CampaignTargetReached,
    #[msg("The campaign has expired.")]
    CampaignExpired,
    #[msg("The reward pool cannot cover this reward.")]
    RewardPoolDepleted,
    #[msg("The user account is banned.")]
    UserBanned,
    #[msg("The participation is not active.")]
    ParticipationNotActive,
    #[msg("Cooldown has not elapsed since the last verified action of this kind.")]
    CooldownActive,
    #[msg("This evidence has already been processed.")]
    EvidenceAlreadyProcessed,
    #[msg("The user has reached their cap for this campaign.")]
    UserActionCapReached,

    #[msg("The campaign is not in draft.")]
    CampaignNotDraft,
    #[msg("The campaign is not paused.")]
    CampaignNotPaused,
    #[msg("The campaign can no longer be cancelled.")]
    CampaignNotCancellable,
    #[msg("The campaign has neither expired nor reached its target.")]
    CampaignStillRunning,
    #[msg("Campaign funds are not reclaimable in this status.")]
    CampaignNotReclaimable,

    #[msg("Requested amount is below the minimum payout.")]
    PayoutBelowMinimum,
    #[msg("Requested amount exceeds pending earnings.")]
    InsufficientPendingEarnings,
    #[msg("A payout request is already pending for this user.")]
    PayoutAlreadyPending,
    #[msg("Cannot change the status of a completed or rejected payout request.")]
    PayoutRequestTerminal,
    #[msg("Illegal payout status transition.")]
    InvalidPayoutTransition,

    #[msg("Insufficient spendable balance.")]
    InsufficientBalance,
    #[msg("Insufficient accrued platform fees.")]
    InsufficientAccruedFees,
    #[msg("A calculation resulted in a numeric overflow.")]
    NumericOverflow,

    #[msg("Signer is not the ledger admin.")]
    AdminMismatch,
    #[msg("Signer is not an authorized verification operator.")]
    OperatorMismatch,
    #[msg("Signer is not the campaign creator.")]
    CreatorMismatch,
    #[msg("User account does not belong to this authority.")]
    UserAccountMismatch,
    #[msg("Treasury token account mismatch.")]
    TreasuryMismatch,
    #[msg("Token account mint does not match the treasury mint.")]
    TreasuryMintMismatch,

    #[msg("The user is already banned.")]
    UserAlreadyBanned,
}
