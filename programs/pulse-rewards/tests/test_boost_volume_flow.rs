#![cfg(feature = "test-sbf")]

use pulse_rewards::constants::MICRO_USD_PER_USD;
use pulse_rewards::error::ErrorCode;
use pulse_rewards::state::{ActionKind, CampaignStatus, ParticipationStatus};
use pulse_rewards_testing::{
    demand_ledger_error, deterministic_keypair, evidence_hash, FixtureStage, FixtureState,
    TestFixture,
};
use solana_sdk::signer::Signer as _;

/// Two participants drive a 4-loop volume campaign to completion: $625
/// budget, $500 pool, $125 per loop, 2 loops per user.
#[test]
fn test_boost_volume_runs_to_completion() {
    let mut test = TestFixture::new(FixtureState {
        action_cooldown_secs: 0,
        ..FixtureState::boost_volume(625 * MICRO_USD_PER_USD, 4, 2)
    });
    test.jump_to(FixtureStage::ParticipantJoined);
    let alice = test.state.participant_address();

    let campaign = test.fetch_campaign_account().expect("Campaign should exist");
    assert_eq!(
        campaign.reward_per_unit(ActionKind::TradeLoop).unwrap(),
        125 * MICRO_USD_PER_USD
    );

    // 1. Two loops take alice to her cap
    test.try_verify_action(&alice, ActionKind::TradeLoop, &evidence_hash("alice loop 1"))
        .expect("First loop should verify");
    assert_eq!(
        test.fetch_participation_account(&alice).unwrap().status,
        ParticipationStatus::Active
    );

    test.try_verify_action(&alice, ActionKind::TradeLoop, &evidence_hash("alice loop 2"))
        .expect("Second loop should verify");

    let participation = test.fetch_participation_account(&alice).unwrap();
    assert_eq!(participation.status, ParticipationStatus::AwaitingPayout);
    assert_eq!(participation.units_verified, 2);
    assert_eq!(participation.total_earned, 250 * MICRO_USD_PER_USD);
    assert!(participation.completed_at > 0);
    assert_eq!(
        test.fetch_user_account(&alice).unwrap().pending_earnings,
        250 * MICRO_USD_PER_USD
    );

    // 2. Capping flipped her participation, which now answers for itself
    demand_ledger_error(
        test.try_verify_action(&alice, ActionKind::TradeLoop, &evidence_hash("alice loop 3")),
        ErrorCode::ParticipationNotActive as u32,
        "ParticipationNotActive",
    );

    // 3. Bob joins and burns down the other half of the target
    let bob = deterministic_keypair("bob the volume trader");
    test.airdrop(&bob.pubkey(), 1_000_000_000);
    test.try_register_user(&bob).expect("Registration should succeed");
    test.try_join_campaign(&bob).expect("Join should succeed");

    test.try_verify_action(&bob.pubkey(), ActionKind::TradeLoop, &evidence_hash("bob loop 1"))
        .expect("Third loop should verify");
    test.try_verify_action(&bob.pubkey(), ActionKind::TradeLoop, &evidence_hash("bob loop 2"))
        .expect("Fourth loop should verify");

    // 4. The final loop capped bob and completed the campaign in one go
    let campaign = test.fetch_campaign_account().unwrap();
    assert_eq!(campaign.status, CampaignStatus::Completed);
    assert_eq!(campaign.total_units_verified, 4);
    assert_eq!(campaign.current_reward_pool_balance, 0);
    assert_eq!(campaign.unique_participants, 2);
    assert!(campaign.completed_at > 0);
    assert_eq!(
        test.fetch_participation_account(&bob.pubkey()).unwrap().status,
        ParticipationStatus::AwaitingPayout
    );

    // 5. A completed campaign verifies nothing further
    demand_ledger_error(
        test.try_verify_action(&bob.pubkey(), ActionKind::TradeLoop, &evidence_hash("bob loop 3")),
        ErrorCode::CampaignNotActive as u32,
        "CampaignNotActive",
    );

    // 6. and admits nobody new
    let carol = deterministic_keypair("carol too late");
    test.airdrop(&carol.pubkey(), 1_000_000_000);
    test.try_register_user(&carol).expect("Registration should succeed");
    demand_ledger_error(
        test.try_join_campaign(&carol),
        ErrorCode::CampaignNotActive as u32,
        "CampaignNotActive",
    );

    println!("✅ 4 loops, 2 users, pool fully distributed");
}

/// Spark's per-user cap never flips the participation, so the cap error
/// itself answers, unlike BoostVolume where capping closes the participation.
#[test]
fn test_spark_cap_keeps_participation_active() {
    let mut test = TestFixture::new(FixtureState {
        action_cooldown_secs: 0,
        max_units_per_user: 2,
        ..FixtureState::spark(100 * MICRO_USD_PER_USD)
    });
    test.jump_to(FixtureStage::ParticipantJoined);
    let user = test.state.participant_address();

    test.try_verify_action(&user, ActionKind::Message, &evidence_hash("capped message 1"))
        .expect("First message should verify");
    test.try_verify_action(&user, ActionKind::Message, &evidence_hash("capped message 2"))
        .expect("Second message should verify");

    demand_ledger_error(
        test.try_verify_action(&user, ActionKind::Message, &evidence_hash("capped message 3")),
        ErrorCode::UserActionCapReached as u32,
        "UserActionCapReached",
    );

    let participation = test.fetch_participation_account(&user).unwrap();
    assert_eq!(participation.status, ParticipationStatus::Active);
    assert_eq!(participation.units_verified, 2);
}
