use anchor_lang::prelude::*;

/// Seed prefixes for PDA derivation
#[constant]
pub const LEDGER_SEED_PREFIX: &[u8] = b"ledger";

#[constant]
pub const TREASURY_SEED_PREFIX: &[u8] = b"treasury";

#[constant]
pub const USER_SEED_PREFIX: &[u8] = b"user";

#[constant]
pub const CAMPAIGN_SEED_PREFIX: &[u8] = b"campaign";

#[constant]
pub const PARTICIPATION_SEED_PREFIX: &[u8] = b"participation";

#[constant]
pub const RECEIPT_SEED_PREFIX: &[u8] = b"receipt";

#[constant]
pub const PAYOUT_SEED_PREFIX: &[u8] = b"payout";

/// All monetary amounts are micro-USD: 1 USD = 1_000_000 units.
/// This matches the base unit of a 6-decimal stablecoin mint, so treasury
/// token amounts and ledger balances share one scale.
pub const MICRO_USD_PER_USD: u64 = 1_000_000;

/// Basis-point denominator for the budget split.
pub const BPS_DENOMINATOR: u16 = 10_000;

/// Default platform cut of a campaign budget (20%).
pub const DEFAULT_PLATFORM_FEE_BPS: u16 = 2_000;

/// Fixed reward for a verified Spark chat message ($0.01).
pub const SPARK_MESSAGE_REWARD: u64 = 10_000;

/// Fixed reward for a verified Spark reaction ($0.01).
pub const SPARK_REACTION_REWARD: u64 = 10_000;

/// Default minimum payout request ($50).
pub const DEFAULT_MIN_PAYOUT_AMOUNT: u64 = 50 * MICRO_USD_PER_USD;

/// Default per-action-kind cooldown between verified actions of one user
/// on one campaign.
pub const DEFAULT_ACTION_COOLDOWN_SECS: i64 = 60;

/// Default number of fraud flags that bans a user.
pub const DEFAULT_FRAUD_BAN_THRESHOLD: u8 = 3;

/// Number of `ActionKind` variants; sizes per-kind cooldown tracking.
pub const ACTION_KIND_COUNT: usize = 8;

/// Reputation bounds and event deltas. Reputation is advisory bookkeeping,
/// never a gate on ledger operations.
pub const REPUTATION_DEFAULT: u16 = 500;
pub const REPUTATION_MAX: u16 = 1_000;
pub const REPUTATION_VERIFIED_BONUS: i16 = 1;
pub const REPUTATION_REJECTED_PENALTY: i16 = -2;
pub const REPUTATION_FRAUD_PENALTY: i16 = -50;
pub const REPUTATION_PAYOUT_BONUS: i16 = 10;
