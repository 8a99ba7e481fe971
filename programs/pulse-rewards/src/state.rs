use anchor_lang::prelude::*;

use crate::constants::{
    ACTION_KIND_COUNT, BPS_DENOMINATOR, REPUTATION_MAX, SPARK_MESSAGE_REWARD,
    SPARK_REACTION_REWARD,
};
use crate::error::ErrorCode;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum AccountStatus {
    Active,
    Banned, // Terminal; pending earnings were forfeited at the transition
}

impl Default for AccountStatus {
    fn default() -> Self {
        AccountStatus::Active
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum CampaignStatus {
    Draft,     // Funded but not yet accepting actions
    Active,    // Live, the only status in which rewards accrue
    Paused,    // Temporarily halted by the creator, resumable
    Completed, // Target reached
    Cancelled, // Explicitly stopped by the creator
    Ended,     // Finalized after time expiry
    Refunded,  // Remaining funds swept back to the creator, fully terminal
}

impl Default for CampaignStatus {
    fn default() -> Self {
        CampaignStatus::Draft
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum CampaignKind {
    /// Chat-engagement campaign: fixed micro-reward per verified message
    /// or reaction, no unit target, cooldown-limited.
    Spark,
    /// Trade-volume campaign: a fixed number of loops, each loop paying
    /// `user_reward_pool / target_units`, capped per user.
    BoostVolume,
    /// Social-task campaign: a required set of engagement kinds, each
    /// completed once per user, paying `user_reward_pool / target_units`.
    Drip,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum ParticipationStatus {
    Active,
    AwaitingPayout, // Per-user cap reached (BoostVolume)
    Completed,      // Required action set finished (Drip)
    Rejected,       // Fraud-flagged, excluded from all future counting
    Stalled,        // Campaign closed before the user could finish; no further accrual
}

impl Default for ParticipationStatus {
    fn default() -> Self {
        ParticipationStatus::Active
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum PayoutStatus {
    Pending,
    Approved,
    Rejected,  // Terminal; amount was refunded to pending earnings
    Completed, // Terminal; amount was paid out from the treasury
}

impl Default for PayoutStatus {
    fn default() -> Self {
        PayoutStatus::Pending
    }
}

impl PayoutStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PayoutStatus::Rejected | PayoutStatus::Completed)
    }

    /// Legal transitions: Pending moves anywhere, Approved only completes.
    pub fn can_transition_to(&self, next: PayoutStatus) -> bool {
        match self {
            PayoutStatus::Pending => matches!(
                next,
                PayoutStatus::Approved | PayoutStatus::Rejected | PayoutStatus::Completed
            ),
            PayoutStatus::Approved => matches!(next, PayoutStatus::Completed),
            PayoutStatus::Rejected | PayoutStatus::Completed => false,
        }
    }
}

/// One unit of verifiable work. The discriminant doubles as the index into
/// `Participation::last_verified_at`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum ActionKind {
    Message,
    Reaction,
    TradeLoop,
    Like,
    Repost,
    Comment,
    Quote,
    Follow,
}

impl ActionKind {
    pub fn index(&self) -> usize {
        match self {
            ActionKind::Message => 0,
            ActionKind::Reaction => 1,
            ActionKind::TradeLoop => 2,
            ActionKind::Like => 3,
            ActionKind::Repost => 4,
            ActionKind::Comment => 5,
            ActionKind::Quote => 6,
            ActionKind::Follow => 7,
        }
    }

    /// Bit position in a Drip campaign's required-action mask.
    /// Zero for kinds that are not Drip engagements.
    pub fn engagement_bit(&self) -> u8 {
        match self {
            ActionKind::Like => 1 << 0,
            ActionKind::Repost => 1 << 1,
            ActionKind::Comment => 1 << 2,
            ActionKind::Quote => 1 << 3,
            ActionKind::Follow => 1 << 4,
            _ => 0,
        }
    }
}

/// Every engagement bit a Drip campaign may require.
pub const ALL_ENGAGEMENT_BITS: u8 = 0b0001_1111;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum ActionVerdict {
    /// Zero value of a freshly initialized receipt; never persisted past
    /// the instruction that created the receipt.
    Unprocessed,
    Verified,
    Rejected,
}

impl Default for ActionVerdict {
    fn default() -> Self {
        ActionVerdict::Unprocessed
    }
}

#[account] // seed [LEDGER_SEED_PREFIX]
#[derive(InitSpace)]
pub struct RewardLedger {
    /// Platform admin: configures the ledger, resolves payouts, bans users.
    pub admin: Pubkey,

    /// Verification operator (bot/backend key) allowed to submit
    /// verify/reject decisions alongside the admin.
    pub operator: Pubkey,

    /// Mint of the settlement token (6-decimal stablecoin).
    pub treasury_mint: Pubkey,

    /// Ledger-owned token account holding every deposited balance,
    /// escrowed campaign budget and accrued fee.
    pub treasury: Pubkey,

    /// Platform cut of each campaign budget, in basis points.
    pub platform_fee_bps: u16,

    /// Minimum amount for a payout request, micro-USD.
    pub min_payout_amount: u64,

    /// Per-action-kind cooldown between verified actions, seconds.
    pub action_cooldown_secs: i64,

    /// Fraud flags at which a user is banned.
    pub fraud_ban_threshold: u8,

    /// When true every balance- or reward-mutating instruction is refused.
    pub paused: bool,

    /// Platform fees earned at campaign activation plus forfeited earnings,
    /// withdrawable by the admin.
    pub platform_fees_accrued: u64,

    /// Lifetime total of pending earnings forfeited through bans.
    pub forfeited_earnings: u64,

    /// Lifetime counters.
    pub total_campaigns: u64,
    pub total_users: u64,
    pub total_payout_requests: u64,

    /// Bump seed for the RewardLedger PDA.
    pub bump: u8,

    /// Bump seed for the treasury token account PDA.
    pub treasury_bump: u8,
}

#[account] // seed [USER_SEED_PREFIX, authority]
#[derive(InitSpace)]
pub struct UserAccount {
    /// Wallet that owns this account.
    pub authority: Pubkey,

    pub status: AccountStatus,

    /// Spendable creator funds, micro-USD. Debited when a campaign is
    /// created, credited by deposits and campaign refunds.
    pub balance: u64,

    /// Lifetime rewards ever credited (pending plus paid).
    pub earnings: u64,

    /// Rewards credited but not yet paid out. Debited when a payout
    /// request is opened, refunded if it is rejected, zeroed on ban.
    pub pending_earnings: u64,

    /// Advisory reputation score, 0..=1000.
    pub reputation: u16,

    /// Fraud flags accrued across all campaigns.
    pub fraud_count: u8,

    /// Token account payouts are settled to. Default pubkey until set.
    pub payout_address: Pubkey,

    /// Lifetime payout requests; also the seed index of the next
    /// PayoutRequest PDA.
    pub payout_requests_total: u32,

    /// True while a Pending payout request exists.
    pub has_pending_payout: bool,

    pub campaigns_joined: u32,
    pub registered_at: i64,

    /// Bump seed for the UserAccount PDA.
    pub bump: u8,
}

impl UserAccount {
    pub fn is_banned(&self) -> bool {
        self.status == AccountStatus::Banned
    }

    /// Credits a verified reward to both lifetime and pending earnings.
    pub fn credit_reward(&mut self, amount: u64) -> Result<()> {
        self.earnings = self
            .earnings
            .checked_add(amount)
            .ok_or(ErrorCode::NumericOverflow)?;
        self.pending_earnings = self
            .pending_earnings
            .checked_add(amount)
            .ok_or(ErrorCode::NumericOverflow)?;
        Ok(())
    }

    /// Saturating reputation adjustment clamped to 0..=1000.
    pub fn apply_reputation_delta(&mut self, delta: i16) {
        let adjusted = (self.reputation as i32) + (delta as i32);
        self.reputation = adjusted.clamp(0, REPUTATION_MAX as i32) as u16;
    }
}

#[account] // seed [CAMPAIGN_SEED_PREFIX, creator, seed.to_le_bytes()]
#[derive(InitSpace)]
pub struct Campaign {
    /// Wallet of the funding creator.
    pub creator: Pubkey,

    /// Client-chosen discriminator allowing one creator to run many
    /// campaigns. Part of the Campaign PDA seeds.
    pub seed: u64,

    pub kind: CampaignKind,
    pub status: CampaignStatus,

    /// Total committed by the creator at creation, micro-USD. Immutable.
    pub budget: u64,

    /// Share of the budget reserved for user rewards.
    pub user_reward_pool: u64,

    /// Share of the budget earned by the platform at activation.
    pub platform_fee_amount: u64,

    /// Undistributed remainder of the reward pool. Monotonically
    /// non-increasing while the campaign runs; never negative.
    pub current_reward_pool_balance: u64,

    /// Completion target in verified units. Zero means unbounded (Spark).
    pub target_units: u64,

    /// Per-user unit cap. Zero means uncapped (Spark default).
    pub max_units_per_user: u64,

    /// Drip only: bitmask of engagement kinds each participant must
    /// complete, see `ActionKind::engagement_bit`.
    pub required_actions: u8,

    /// Verified units across all participants.
    pub total_units_verified: u64,

    /// Number of distinct participants that joined.
    pub unique_participants: u32,

    /// Unix time after which no further action verifies. Zero = open-ended.
    pub ends_at: i64,

    pub created_at: i64,

    /// Zero until activation. A campaign cancelled straight from draft
    /// never earned its platform fee, which `reclaim` refunds.
    pub activated_at: i64,

    pub completed_at: i64,

    /// Bump seed for the Campaign PDA.
    pub bump: u8,
}

impl Campaign {
    /// Splits a budget into (user reward pool, platform fee) by fee bps.
    /// The pool gets the floored share, the fee the exact remainder, so
    /// pool + fee == budget always holds.
    pub fn split_budget(budget: u64, fee_bps: u16) -> Result<(u64, u64)> {
        let pool_bps = BPS_DENOMINATOR
            .checked_sub(fee_bps)
            .ok_or(ErrorCode::InvalidFeeBps)? as u128;
        let pool = (budget as u128)
            .checked_mul(pool_bps)
            .ok_or(ErrorCode::NumericOverflow)?
            / BPS_DENOMINATOR as u128;
        let pool = pool as u64;
        let fee = budget
            .checked_sub(pool)
            .ok_or(ErrorCode::NumericOverflow)?;
        Ok((pool, fee))
    }

    /// The single reward-rate derivation. Every verification and every
    /// client-side estimate must go through this.
    pub fn reward_per_unit(&self, action: ActionKind) -> Result<u64> {
        match self.kind {
            CampaignKind::Spark => match action {
                ActionKind::Message => Ok(SPARK_MESSAGE_REWARD),
                ActionKind::Reaction => Ok(SPARK_REACTION_REWARD),
                _ => err!(ErrorCode::InvalidActionKind),
            },
            CampaignKind::BoostVolume | CampaignKind::Drip => self
                .user_reward_pool
                .checked_div(self.target_units)
                .ok_or_else(|| error!(ErrorCode::InvalidTargetUnits)),
        }
    }

    /// Whether this campaign rewards the given action kind at all.
    pub fn accepts(&self, action: ActionKind) -> bool {
        match self.kind {
            CampaignKind::Spark => {
                matches!(action, ActionKind::Message | ActionKind::Reaction)
            }
            CampaignKind::BoostVolume => matches!(action, ActionKind::TradeLoop),
            CampaignKind::Drip => self.required_actions & action.engagement_bit() != 0,
        }
    }

    pub fn has_reached_target(&self) -> bool {
        self.target_units > 0 && self.total_units_verified >= self.target_units
    }

    pub fn has_expired(&self, now: i64) -> bool {
        self.ends_at > 0 && now > self.ends_at
    }

    /// Whether one more verified unit of `action` would exceed the user's
    /// personal allowance on this campaign.
    pub fn user_cap_reached(&self, participation: &Participation, action: ActionKind) -> bool {
        match self.kind {
            CampaignKind::Spark | CampaignKind::BoostVolume => {
                self.max_units_per_user > 0
                    && participation.units_verified >= self.max_units_per_user
            }
            // Each required engagement completes exactly once.
            CampaignKind::Drip => participation.actions_done & action.engagement_bit() != 0,
        }
    }

    /// Terminal per-user status once the cap is reached, if any.
    pub fn capped_participation_status(
        &self,
        participation: &Participation,
    ) -> Option<ParticipationStatus> {
        match self.kind {
            CampaignKind::Spark => None,
            CampaignKind::BoostVolume => {
                if self.max_units_per_user > 0
                    && participation.units_verified >= self.max_units_per_user
                {
                    Some(ParticipationStatus::AwaitingPayout)
                } else {
                    None
                }
            }
            CampaignKind::Drip => {
                if participation.actions_done & self.required_actions == self.required_actions {
                    Some(ParticipationStatus::Completed)
                } else {
                    None
                }
            }
        }
    }
}

#[account] // seed [PARTICIPATION_SEED_PREFIX, campaign, user]
#[derive(InitSpace)]
pub struct Participation {
    /// Pubkey of the parent Campaign account.
    pub campaign: Pubkey,

    /// Wallet of the participant. The PDA seeds make (campaign, user)
    /// unique by construction.
    pub user: Pubkey,

    pub status: ParticipationStatus,

    /// Verified units credited to this participation.
    pub units_verified: u64,

    /// Sum of every reward verified for this participation, micro-USD.
    pub total_earned: u64,

    /// Drip only: bitmask of required engagements already completed.
    pub actions_done: u8,

    /// Fraud flags raised against this participation.
    pub fraud_flags: u8,

    /// Unix time of the last verified action, indexed by `ActionKind`.
    /// Zero means the kind was never verified.
    pub last_verified_at: [i64; ACTION_KIND_COUNT],

    pub joined_at: i64,
    pub completed_at: i64,

    /// Bump seed for the Participation PDA.
    pub bump: u8,
}

impl Participation {
    /// Seconds until the cooldown for `action` elapses; zero when clear.
    pub fn cooldown_remaining(&self, action: ActionKind, now: i64, cooldown_secs: i64) -> i64 {
        let last = self.last_verified_at[action.index()];
        if last == 0 {
            return 0;
        }
        (last + cooldown_secs - now).max(0)
    }

    /// Books one verified unit onto this participation.
    pub fn record_verified(&mut self, action: ActionKind, reward: u64, now: i64) -> Result<()> {
        self.units_verified = self
            .units_verified
            .checked_add(1)
            .ok_or(ErrorCode::NumericOverflow)?;
        self.total_earned = self
            .total_earned
            .checked_add(reward)
            .ok_or(ErrorCode::NumericOverflow)?;
        self.last_verified_at[action.index()] = now;
        self.actions_done |= action.engagement_bit();
        Ok(())
    }
}

#[account] // seed [RECEIPT_SEED_PREFIX, campaign, evidence_hash]
#[derive(InitSpace)]
pub struct ActionReceipt {
    /// Pubkey of the Campaign the evidence was submitted against.
    pub campaign: Pubkey,

    /// Wallet of the acting user.
    pub user: Pubkey,

    pub action: ActionKind,
    pub verdict: ActionVerdict,

    /// Reward credited when verified, zero when rejected.
    pub reward: u64,

    /// Hash of the external evidence (message id, tx signature, proof
    /// URL). Part of the receipt PDA seeds, making each piece of evidence
    /// processable exactly once per campaign.
    pub evidence_hash: [u8; 32],

    pub processed_at: i64,

    /// Bump seed for the ActionReceipt PDA.
    pub bump: u8,
}

#[account] // seed [PAYOUT_SEED_PREFIX, user, index.to_le_bytes()]
#[derive(InitSpace)]
pub struct PayoutRequest {
    /// Wallet of the requesting user.
    pub user: Pubkey,

    /// Position in the user's payout history, fixed at request time.
    pub index: u32,

    /// Amount moved out of pending earnings, micro-USD.
    pub amount: u64,

    pub status: PayoutStatus,

    /// Settlement token account captured when the request was opened.
    pub payout_address: Pubkey,

    pub requested_at: i64,
    pub resolved_at: i64,

    /// Bump seed for the PayoutRequest PDA.
    pub bump: u8,
}
