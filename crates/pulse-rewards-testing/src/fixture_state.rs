use pulse_rewards::constants::{
    DEFAULT_ACTION_COOLDOWN_SECS, DEFAULT_FRAUD_BAN_THRESHOLD, DEFAULT_MIN_PAYOUT_AMOUNT,
    DEFAULT_PLATFORM_FEE_BPS, MICRO_USD_PER_USD,
};
use pulse_rewards::state::CampaignKind;
use pulse_rewards_sdk::AddressFinder;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signer::Signer as _;

use crate::{deterministic_keypair, FixtureStage};

/// Everything a [`crate::TestFixture`] needs to drive a ledger through its
/// setup stages: the cast of keypairs, the ledger policy and the parameters
/// of one campaign.
///
/// Keypairs are deterministic so failures reproduce with the same addresses
/// run to run. The campaign seed is random so a test can spin up a second
/// [`FixtureState`] without colliding on the campaign PDA.
pub struct FixtureState {
    pub stage: FixtureStage,
    pub address_finder: AddressFinder,

    pub admin_keypair: Keypair,
    pub operator_keypair: Keypair,
    pub creator_keypair: Keypair,
    pub participant_keypair: Keypair,
    pub mint_keypair: Keypair,

    /// Ledger policy, applied at [`FixtureStage::LedgerInitialized`].
    pub platform_fee_bps: u16,
    pub min_payout_amount: u64,
    pub action_cooldown_secs: i64,
    pub fraud_ban_threshold: u8,

    /// Campaign parameters, applied at [`FixtureStage::CampaignCreated`].
    pub campaign_seed: u64,
    pub campaign_kind: CampaignKind,
    pub campaign_budget: u64,
    pub target_units: u64,
    pub max_units_per_user: u64,
    pub required_actions: u8,
    pub ends_at: i64,
}

impl Default for FixtureState {
    /// A $100 Spark campaign under the stock ledger policy.
    fn default() -> Self {
        Self {
            stage: FixtureStage::default(),
            address_finder: AddressFinder::default(),
            admin_keypair: deterministic_keypair("pulse admin"),
            operator_keypair: deterministic_keypair("pulse operator"),
            creator_keypair: deterministic_keypair("pulse creator"),
            participant_keypair: deterministic_keypair("pulse participant"),
            mint_keypair: deterministic_keypair("pulse settlement mint"),
            platform_fee_bps: DEFAULT_PLATFORM_FEE_BPS,
            min_payout_amount: DEFAULT_MIN_PAYOUT_AMOUNT,
            action_cooldown_secs: DEFAULT_ACTION_COOLDOWN_SECS,
            fraud_ban_threshold: DEFAULT_FRAUD_BAN_THRESHOLD,
            campaign_seed: rand::random(),
            campaign_kind: CampaignKind::Spark,
            campaign_budget: 100 * MICRO_USD_PER_USD,
            target_units: 0,
            max_units_per_user: 0,
            required_actions: 0,
            ends_at: 0,
        }
    }
}

impl FixtureState {
    pub fn spark(budget: u64) -> Self {
        Self {
            campaign_kind: CampaignKind::Spark,
            campaign_budget: budget,
            ..Self::default()
        }
    }

    pub fn boost_volume(budget: u64, target_units: u64, max_units_per_user: u64) -> Self {
        Self {
            campaign_kind: CampaignKind::BoostVolume,
            campaign_budget: budget,
            target_units,
            max_units_per_user,
            ..Self::default()
        }
    }

    pub fn drip(budget: u64, target_units: u64, required_actions: u8) -> Self {
        Self {
            campaign_kind: CampaignKind::Drip,
            campaign_budget: budget,
            target_units,
            required_actions,
            ..Self::default()
        }
    }

    // Owned copies for tests that pass fixture keypairs into &mut self
    // drivers without fighting the borrow checker.

    pub fn admin(&self) -> Keypair {
        self.admin_keypair.insecure_clone()
    }

    pub fn operator(&self) -> Keypair {
        self.operator_keypair.insecure_clone()
    }

    pub fn creator(&self) -> Keypair {
        self.creator_keypair.insecure_clone()
    }

    pub fn participant(&self) -> Keypair {
        self.participant_keypair.insecure_clone()
    }

    pub fn admin_address(&self) -> Pubkey {
        self.admin_keypair.pubkey()
    }

    pub fn operator_address(&self) -> Pubkey {
        self.operator_keypair.pubkey()
    }

    pub fn creator_address(&self) -> Pubkey {
        self.creator_keypair.pubkey()
    }

    pub fn participant_address(&self) -> Pubkey {
        self.participant_keypair.pubkey()
    }

    pub fn mint_address(&self) -> Pubkey {
        self.mint_keypair.pubkey()
    }

    pub fn ledger_address(&self) -> Pubkey {
        self.address_finder.find_ledger_address().0
    }

    pub fn treasury_address(&self) -> Pubkey {
        let ledger = self.ledger_address();
        self.address_finder.find_treasury_address(&ledger).0
    }

    pub fn campaign_address(&self) -> Pubkey {
        self.address_finder
            .find_campaign_address(&self.creator_address(), self.campaign_seed)
            .0
    }

    pub fn user_account_address(&self, authority: &Pubkey) -> Pubkey {
        self.address_finder.find_user_account_address(authority).0
    }

    pub fn participation_address(&self, authority: &Pubkey) -> Pubkey {
        self.address_finder
            .find_participation_address(&self.campaign_address(), authority)
            .0
    }

    pub fn receipt_address(&self, evidence_hash: &[u8; 32]) -> Pubkey {
        self.address_finder
            .find_receipt_address(&self.campaign_address(), evidence_hash)
            .0
    }

    pub fn payout_request_address(&self, authority: &Pubkey, index: u32) -> Pubkey {
        self.address_finder
            .find_payout_request_address(authority, index)
            .0
    }
}
