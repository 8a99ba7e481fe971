use std::collections::HashMap;

use pulse_rewards::state::CampaignStatus;
use solana_pubkey::Pubkey;

use crate::TestFixture;

/// Point-in-time copy of the economic state tests care about.
///
/// Capture one before and one after a transaction that should be refused,
/// then `assert_eq!` the two to prove the failed instruction moved nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerSnapshot {
    pub treasury_token_balance: u64,
    pub platform_fees_accrued: u64,
    pub forfeited_earnings: u64,
    pub paused: bool,
    pub total_campaigns: u64,
    pub total_users: u64,
    pub total_payout_requests: u64,

    /// `None` until the fixture campaign account exists.
    pub campaign_status: Option<CampaignStatus>,
    pub campaign_pool_balance: Option<u64>,
    pub campaign_units_verified: Option<u64>,

    pub users: HashMap<Pubkey, UserSnapshot>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UserSnapshot {
    pub balance: u64,
    pub earnings: u64,
    pub pending_earnings: u64,
    pub reputation: u16,
    pub fraud_count: u8,
    pub has_pending_payout: bool,
}

impl LedgerSnapshot {
    /// Captures the ledger, the fixture campaign and every user in
    /// `tracked_users` that has a registered account.
    pub fn capture(test: &TestFixture, tracked_users: &[Pubkey]) -> Self {
        let ledger = test
            .fetch_ledger_account()
            .expect("Ledger should exist before capturing a snapshot");
        let campaign = test.fetch_campaign_account();

        let mut users = HashMap::new();
        for authority in tracked_users {
            if let Some(user) = test.fetch_user_account(authority) {
                users.insert(
                    *authority,
                    UserSnapshot {
                        balance: user.balance,
                        earnings: user.earnings,
                        pending_earnings: user.pending_earnings,
                        reputation: user.reputation,
                        fraud_count: user.fraud_count,
                        has_pending_payout: user.has_pending_payout,
                    },
                );
            }
        }

        Self {
            treasury_token_balance: test.treasury_balance(),
            platform_fees_accrued: ledger.platform_fees_accrued,
            forfeited_earnings: ledger.forfeited_earnings,
            paused: ledger.paused,
            total_campaigns: ledger.total_campaigns,
            total_users: ledger.total_users,
            total_payout_requests: ledger.total_payout_requests,
            campaign_status: campaign.as_ref().map(|c| c.status),
            campaign_pool_balance: campaign.as_ref().map(|c| c.current_reward_pool_balance),
            campaign_units_verified: campaign.as_ref().map(|c| c.total_units_verified),
            users,
        }
    }

    pub fn user(&self, authority: &Pubkey) -> &UserSnapshot {
        self.users
            .get(authority)
            .expect("User was not tracked in this snapshot")
    }
}
