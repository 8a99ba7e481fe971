#![cfg(feature = "test-sbf")]

use pulse_rewards::constants::{DEFAULT_MIN_PAYOUT_AMOUNT, MICRO_USD_PER_USD};
use pulse_rewards::error::ErrorCode;
use pulse_rewards::state::{ActionKind, PayoutStatus};
use pulse_rewards_testing::{
    demand_ledger_error, evidence_hash, FixtureStage, FixtureState, TestFixture,
};
use solana_sdk::pubkey::Pubkey;

/// A $625 volume campaign paying $50 per loop, exactly the default payout
/// minimum, so one loop funds one request.
fn payout_fixture() -> TestFixture {
    TestFixture::new(FixtureState {
        action_cooldown_secs: 0,
        ..FixtureState::boost_volume(625 * MICRO_USD_PER_USD, 10, 5)
    })
}

#[test]
fn test_payout_request_approval_and_settlement() {
    let mut test = payout_fixture();
    test.jump_to(FixtureStage::ParticipantJoined);
    let user = test.state.participant_address();
    let participant = test.state.participant();

    // 1. One verified loop banks exactly the payout minimum
    test.try_verify_action(&user, ActionKind::TradeLoop, &evidence_hash("loop 1"))
        .expect("Loop should verify");
    assert_eq!(
        test.fetch_user_account(&user).unwrap().pending_earnings,
        DEFAULT_MIN_PAYOUT_AMOUNT
    );

    // 2. Route payouts to the participant's token account
    let recipient = test.create_user_ata(&user);
    test.try_set_payout_address(&participant, recipient)
        .expect("Setting the payout address should succeed");

    // 3. Open the request
    test.try_request_payout(&participant, DEFAULT_MIN_PAYOUT_AMOUNT)
        .expect("Payout request should succeed");

    let account = test.fetch_user_account(&user).unwrap();
    assert_eq!(account.pending_earnings, 0);
    assert!(account.has_pending_payout);
    assert_eq!(account.payout_requests_total, 1);
    assert_eq!(account.reputation, 511); // 500 + 1 verify + 10 request

    let request = test
        .fetch_payout_request_account(&user, 0)
        .expect("Payout request should exist");
    assert_eq!(request.user, user);
    assert_eq!(request.index, 0);
    assert_eq!(request.amount, DEFAULT_MIN_PAYOUT_AMOUNT);
    assert_eq!(request.status, PayoutStatus::Pending);
    assert_eq!(request.payout_address, recipient);
    assert!(request.requested_at > 0);
    assert_eq!(request.resolved_at, 0);

    assert_eq!(test.fetch_ledger_account().unwrap().total_payout_requests, 1);

    // 4. Approval releases the pending flag without moving money
    test.try_update_payout_status(&user, 0, PayoutStatus::Approved)
        .expect("Approval should succeed");

    let request = test.fetch_payout_request_account(&user, 0).unwrap();
    assert_eq!(request.status, PayoutStatus::Approved);
    assert_eq!(request.resolved_at, 0); // not terminal yet
    assert!(!test.fetch_user_account(&user).unwrap().has_pending_payout);
    assert_eq!(test.get_token_account_balance(&recipient), 0);

    // 5. Completion pays out of the treasury
    let treasury_before = test.treasury_balance();
    test.try_update_payout_status(&user, 0, PayoutStatus::Completed)
        .expect("Completion should succeed");

    assert_eq!(
        test.get_token_account_balance(&recipient),
        DEFAULT_MIN_PAYOUT_AMOUNT
    );
    assert_eq!(
        test.treasury_balance(),
        treasury_before - DEFAULT_MIN_PAYOUT_AMOUNT
    );

    let request = test.fetch_payout_request_account(&user, 0).unwrap();
    assert_eq!(request.status, PayoutStatus::Completed);
    assert!(request.resolved_at > 0);

    // 6. Completed is frozen
    demand_ledger_error(
        test.try_update_payout_status(&user, 0, PayoutStatus::Rejected),
        ErrorCode::PayoutRequestTerminal as u32,
        "PayoutRequestTerminal",
    );

    println!("✅ Requested, approved and settled {} micro-USD", DEFAULT_MIN_PAYOUT_AMOUNT);
}

#[test]
fn test_payout_request_guards() {
    let mut test = payout_fixture();
    test.jump_to(FixtureStage::ParticipantJoined);
    let user = test.state.participant_address();
    let participant = test.state.participant();

    // Two loops bank twice the minimum
    test.try_verify_action(&user, ActionKind::TradeLoop, &evidence_hash("loop 1"))
        .expect("Loop should verify");
    test.try_verify_action(&user, ActionKind::TradeLoop, &evidence_hash("loop 2"))
        .expect("Loop should verify");
    assert_eq!(
        test.fetch_user_account(&user).unwrap().pending_earnings,
        2 * DEFAULT_MIN_PAYOUT_AMOUNT
    );

    // Too small, checked before anything else
    demand_ledger_error(
        test.try_request_payout(&participant, DEFAULT_MIN_PAYOUT_AMOUNT - 1),
        ErrorCode::PayoutBelowMinimum as u32,
        "PayoutBelowMinimum",
    );

    // No payout address on file yet
    demand_ledger_error(
        test.try_request_payout(&participant, DEFAULT_MIN_PAYOUT_AMOUNT),
        ErrorCode::InvalidPayoutAddress as u32,
        "InvalidPayoutAddress",
    );

    // The default pubkey cannot be an address either
    demand_ledger_error(
        test.try_set_payout_address(&participant, Pubkey::default()),
        ErrorCode::InvalidPayoutAddress as u32,
        "InvalidPayoutAddress",
    );

    let recipient = test.create_user_ata(&user);
    test.try_set_payout_address(&participant, recipient)
        .expect("Setting the payout address should succeed");

    // More than the user ever earned
    demand_ledger_error(
        test.try_request_payout(&participant, 1_000 * MICRO_USD_PER_USD),
        ErrorCode::InsufficientPendingEarnings as u32,
        "InsufficientPendingEarnings",
    );

    // First request opens; same bytes as the no-address probe, so rotate
    test.expire_blockhash();
    test.try_request_payout(&participant, DEFAULT_MIN_PAYOUT_AMOUNT)
        .expect("Payout request should succeed");

    // One open request at a time
    demand_ledger_error(
        test.try_request_payout(&participant, DEFAULT_MIN_PAYOUT_AMOUNT),
        ErrorCode::PayoutAlreadyPending as u32,
        "PayoutAlreadyPending",
    );

    // Rejection refunds the escrowed amount in full
    test.try_update_payout_status(&user, 0, PayoutStatus::Rejected)
        .expect("Rejection should succeed");

    let account = test.fetch_user_account(&user).unwrap();
    assert_eq!(account.pending_earnings, 2 * DEFAULT_MIN_PAYOUT_AMOUNT);
    assert!(!account.has_pending_payout);
    let request = test.fetch_payout_request_account(&user, 0).unwrap();
    assert_eq!(request.status, PayoutStatus::Rejected);
    assert!(request.resolved_at > 0);

    // The next request lands at the next index
    test.expire_blockhash();
    test.try_request_payout(&participant, DEFAULT_MIN_PAYOUT_AMOUNT)
        .expect("Second payout request should succeed");
    assert_eq!(
        test.fetch_payout_request_account(&user, 1).unwrap().index,
        1
    );

    test.try_update_payout_status(&user, 1, PayoutStatus::Approved)
        .expect("Approval should succeed");

    // Approved can only complete
    demand_ledger_error(
        test.try_update_payout_status(&user, 1, PayoutStatus::Rejected),
        ErrorCode::InvalidPayoutTransition as u32,
        "InvalidPayoutTransition",
    );

    // A ban forfeits what is still pending, but the approved request is
    // already escrowed and settles anyway.
    test.try_ban_user(&user).expect("Ban should succeed");
    assert_eq!(test.fetch_user_account(&user).unwrap().pending_earnings, 0);

    let treasury_before = test.treasury_balance();
    test.try_update_payout_status(&user, 1, PayoutStatus::Completed)
        .expect("Approved payout should settle despite the ban");
    assert_eq!(
        test.get_token_account_balance(&recipient),
        DEFAULT_MIN_PAYOUT_AMOUNT
    );
    assert_eq!(
        test.treasury_balance(),
        treasury_before - DEFAULT_MIN_PAYOUT_AMOUNT
    );

    // No new requests once banned
    demand_ledger_error(
        test.try_request_payout(&participant, DEFAULT_MIN_PAYOUT_AMOUNT),
        ErrorCode::UserBanned as u32,
        "UserBanned",
    );
}
