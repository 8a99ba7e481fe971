use std::cmp::Ordering;

/// Setup milestones a [`crate::TestFixture`] can be driven through, in order.
///
/// Tests call `jump_to(stage)` to run every step up to and including `stage`,
/// then exercise the instruction under test by hand from there.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FixtureStage {
    /// Nothing on chain yet. Keypairs and the mint exist, no program state.
    #[default]
    Fresh,

    /// Global ledger initialized with the fixture's fee and payout policy.
    LedgerInitialized,

    /// Creator and participant both have user accounts.
    UsersRegistered,

    /// Creator's wallet holds treasury tokens and the campaign budget is
    /// deposited into their ledger balance.
    CreatorFunded,

    /// Campaign created from the fixture's campaign parameters (still Draft).
    CampaignCreated,

    /// Campaign activated. Budget escrowed, platform fee accrued.
    CampaignActivated,

    /// Participant joined the campaign.
    ParticipantJoined,
}

impl FixtureStage {
    pub fn all() -> &'static [FixtureStage] {
        &[
            FixtureStage::Fresh,
            FixtureStage::LedgerInitialized,
            FixtureStage::UsersRegistered,
            FixtureStage::CreatorFunded,
            FixtureStage::CampaignCreated,
            FixtureStage::CampaignActivated,
            FixtureStage::ParticipantJoined,
        ]
    }

    fn ord(self) -> u8 {
        match self {
            FixtureStage::Fresh => 0,
            FixtureStage::LedgerInitialized => 1,
            FixtureStage::UsersRegistered => 2,
            FixtureStage::CreatorFunded => 3,
            FixtureStage::CampaignCreated => 4,
            FixtureStage::CampaignActivated => 5,
            FixtureStage::ParticipantJoined => 6,
        }
    }
}

impl PartialOrd for FixtureStage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FixtureStage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ord().cmp(&other.ord())
    }
}
