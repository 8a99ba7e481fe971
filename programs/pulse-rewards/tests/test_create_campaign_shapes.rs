#![cfg(feature = "test-sbf")]

use pulse_rewards::constants::MICRO_USD_PER_USD;
use pulse_rewards::error::ErrorCode;
use pulse_rewards::state::{ActionKind, CampaignKind, CampaignStatus};
use pulse_rewards_sdk::BudgetPlanner;
use pulse_rewards_testing::{demand_ledger_error, FixtureStage, FixtureState, TestFixture};
use rust_decimal::dec;

/// Walks every kind-shape validation by mutating the fixture's campaign
/// parameters between attempts. The creator stays unfunded the whole time,
/// proving shape checks fire before the balance check.
#[test]
fn test_create_campaign_rejects_bad_shapes() {
    let mut test = TestFixture::default();
    test.jump_to(FixtureStage::UsersRegistered);

    // Zero budget
    test.state.campaign_budget = 0;
    demand_ledger_error(
        test.try_create_campaign(),
        ErrorCode::InvalidBudget as u32,
        "InvalidBudget",
    );

    // Deadline already in the past
    test.state.campaign_budget = MICRO_USD_PER_USD;
    test.state.ends_at = test.current_timestamp() - 100;
    demand_ledger_error(
        test.try_create_campaign(),
        ErrorCode::InvalidSchedule as u32,
        "InvalidSchedule",
    );
    test.state.ends_at = 0;

    // Spark pays fixed rates and has no use for an engagement mask
    test.state.required_actions = ActionKind::Like.engagement_bit();
    demand_ledger_error(
        test.try_create_campaign(),
        ErrorCode::InvalidRequiredActions as u32,
        "InvalidRequiredActions",
    );
    test.state.required_actions = 0;

    // BoostVolume needs a target to divide the pool by
    test.state.campaign_kind = CampaignKind::BoostVolume;
    test.state.target_units = 0;
    demand_ledger_error(
        test.try_create_campaign(),
        ErrorCode::InvalidTargetUnits as u32,
        "InvalidTargetUnits",
    );

    // and a per-user cap between 1 and the target
    test.state.target_units = 10;
    test.state.max_units_per_user = 0;
    demand_ledger_error(
        test.try_create_campaign(),
        ErrorCode::InvalidUserCap as u32,
        "InvalidUserCap",
    );
    test.state.max_units_per_user = 11;
    demand_ledger_error(
        test.try_create_campaign(),
        ErrorCode::InvalidUserCap as u32,
        "InvalidUserCap",
    );

    // and no engagement mask
    test.state.max_units_per_user = 5;
    test.state.required_actions = ActionKind::Like.engagement_bit();
    demand_ledger_error(
        test.try_create_campaign(),
        ErrorCode::InvalidRequiredActions as u32,
        "InvalidRequiredActions",
    );
    test.state.required_actions = 0;

    // Drip needs a mask made of known engagement bits
    test.state.campaign_kind = CampaignKind::Drip;
    test.state.target_units = 4;
    test.state.max_units_per_user = 0;
    demand_ledger_error(
        test.try_create_campaign(),
        ErrorCode::InvalidRequiredActions as u32,
        "InvalidRequiredActions",
    );
    test.state.required_actions = 0b0010_0000; // one past Follow
    demand_ledger_error(
        test.try_create_campaign(),
        ErrorCode::InvalidRequiredActions as u32,
        "InvalidRequiredActions",
    );

    // and a target as well
    test.state.target_units = 0;
    test.state.required_actions =
        ActionKind::Like.engagement_bit() | ActionKind::Comment.engagement_bit();
    demand_ledger_error(
        test.try_create_campaign(),
        ErrorCode::InvalidTargetUnits as u32,
        "InvalidTargetUnits",
    );

    // Shape is fine now, but the creator never deposited a balance
    test.state.campaign_kind = CampaignKind::Spark;
    test.state.target_units = 0;
    test.state.required_actions = 0;
    demand_ledger_error(
        test.try_create_campaign(),
        ErrorCode::InsufficientBalance as u32,
        "InsufficientBalance",
    );

    println!("✅ Every malformed campaign shape was rejected");
}

#[test]
fn test_create_spark_campaign() {
    let mut test = TestFixture::default();
    test.jump_to(FixtureStage::CampaignCreated);

    let campaign = test.fetch_campaign_account().expect("Campaign should exist");
    assert_eq!(campaign.creator, test.state.creator_address());
    assert_eq!(campaign.seed, test.state.campaign_seed);
    assert_eq!(campaign.kind, CampaignKind::Spark);
    assert_eq!(campaign.status, CampaignStatus::Draft);
    assert_eq!(campaign.budget, 100 * MICRO_USD_PER_USD);
    assert_eq!(campaign.target_units, 0);
    assert_eq!(campaign.max_units_per_user, 0);
    assert_eq!(campaign.required_actions, 0);
    assert_eq!(campaign.total_units_verified, 0);
    assert_eq!(campaign.unique_participants, 0);
    assert!(campaign.created_at > 0);
    assert_eq!(campaign.activated_at, 0);

    // The on-chain split matches the client-side plan exactly.
    let planner =
        BudgetPlanner::new(test.state.platform_fee_bps).expect("Ledger fee should be plannable");
    let split = planner.split_budget(dec!(100)).expect("Split should succeed");
    assert_eq!(campaign.user_reward_pool, split.user_reward_pool_micro);
    assert_eq!(campaign.platform_fee_amount, split.platform_fee_micro);
    assert_eq!(campaign.current_reward_pool_balance, split.user_reward_pool_micro);
    assert_eq!(
        campaign.user_reward_pool + campaign.platform_fee_amount,
        campaign.budget
    );

    // The budget left the creator's spendable balance at creation.
    let creator_account = test
        .fetch_user_account(&test.state.creator_address())
        .expect("Creator account should exist");
    assert_eq!(creator_account.balance, 0);

    // No fee accrues until activation.
    let ledger = test.fetch_ledger_account().expect("Ledger should exist");
    assert_eq!(ledger.total_campaigns, 1);
    assert_eq!(ledger.platform_fees_accrued, 0);

    println!("📊 Spark campaign: {} micro-USD pool", campaign.user_reward_pool);
}

#[test]
fn test_create_boost_volume_campaign() {
    let mut test = TestFixture::new(FixtureState::boost_volume(625 * MICRO_USD_PER_USD, 10, 2));
    test.jump_to(FixtureStage::CampaignCreated);

    let campaign = test.fetch_campaign_account().expect("Campaign should exist");
    assert_eq!(campaign.kind, CampaignKind::BoostVolume);
    assert_eq!(campaign.status, CampaignStatus::Draft);
    assert_eq!(campaign.target_units, 10);
    assert_eq!(campaign.max_units_per_user, 2);
    assert_eq!(campaign.user_reward_pool, 500 * MICRO_USD_PER_USD);
    assert_eq!(campaign.platform_fee_amount, 125 * MICRO_USD_PER_USD);

    // $500 pool over 10 loops pays $50 per loop.
    assert_eq!(
        campaign.reward_per_unit(ActionKind::TradeLoop).unwrap(),
        50 * MICRO_USD_PER_USD
    );
}

#[test]
fn test_create_drip_campaign() {
    let mask = ActionKind::Like.engagement_bit() | ActionKind::Comment.engagement_bit();
    let mut test = TestFixture::new(FixtureState::drip(90 * MICRO_USD_PER_USD, 4, mask));
    test.jump_to(FixtureStage::CampaignCreated);

    let campaign = test.fetch_campaign_account().expect("Campaign should exist");
    assert_eq!(campaign.kind, CampaignKind::Drip);
    assert_eq!(campaign.required_actions, mask);

    // The per-user allowance comes from the mask, not the argument.
    assert_eq!(campaign.max_units_per_user, 2);

    assert_eq!(campaign.user_reward_pool, 72 * MICRO_USD_PER_USD);
    assert_eq!(
        campaign.reward_per_unit(ActionKind::Like).unwrap(),
        18 * MICRO_USD_PER_USD
    );
}
