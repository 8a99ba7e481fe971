#![cfg(feature = "test-sbf")]

use pulse_rewards::constants::REPUTATION_DEFAULT;
use pulse_rewards::error::ErrorCode;
use pulse_rewards_testing::{
    demand_ledger_error, deterministic_keypair, FixtureStage, TestFixture,
};
use solana_sdk::signer::Signer as _;

#[test]
fn test_register_user() {
    let mut test = TestFixture::default();
    test.jump_to(FixtureStage::UsersRegistered);

    let participant = test
        .fetch_user_account(&test.state.participant_address())
        .expect("Participant account should exist");
    assert_eq!(participant.authority, test.state.participant_address());
    assert_eq!(participant.balance, 0);
    assert_eq!(participant.earnings, 0);
    assert_eq!(participant.pending_earnings, 0);
    assert_eq!(participant.reputation, REPUTATION_DEFAULT);
    assert_eq!(participant.fraud_count, 0);
    assert!(!participant.has_pending_payout);
    assert_eq!(participant.campaigns_joined, 0);

    let ledger = test.fetch_ledger_account().expect("Ledger should exist");
    assert_eq!(ledger.total_users, 2); // creator and participant

    // A third registration bumps the counter again.
    let newcomer = deterministic_keypair("balance_tester");
    test.airdrop(&newcomer.pubkey(), 1_000_000_000);
    test.try_register_user(&newcomer)
        .expect("Registration should succeed");
    assert_eq!(test.fetch_ledger_account().unwrap().total_users, 3);

    // Rotate the blockhash so the retry is not dropped as a duplicate.
    test.expire_blockhash();
    let result = test.try_register_user(&newcomer);
    assert!(result.is_err(), "Duplicate registration should be rejected");
}

#[test]
fn test_deposit_and_withdraw_roundtrip() {
    let mut test = TestFixture::default();
    test.jump_to(FixtureStage::UsersRegistered);

    let creator = test.state.creator();
    let creator_ata = test
        .fund_user_tokens(&creator.pubkey(), 50_000_000)
        .expect("Funding should succeed");

    // Deposit $30 of the $50 in the wallet.
    test.try_deposit_balance(&creator, 30_000_000)
        .expect("Deposit should succeed");

    let account = test.fetch_user_account(&creator.pubkey()).unwrap();
    assert_eq!(account.balance, 30_000_000);
    assert_eq!(test.treasury_balance(), 30_000_000);
    assert_eq!(test.get_token_account_balance(&creator_ata), 20_000_000);

    // Withdraw $10 back out.
    test.try_withdraw_balance(&creator, 10_000_000)
        .expect("Withdrawal should succeed");

    let account = test.fetch_user_account(&creator.pubkey()).unwrap();
    assert_eq!(account.balance, 20_000_000);
    assert_eq!(test.treasury_balance(), 20_000_000);
    assert_eq!(test.get_token_account_balance(&creator_ata), 30_000_000);

    println!("✅ Deposit and withdrawal both settled through the treasury");

    // Balance checks.
    demand_ledger_error(
        test.try_withdraw_balance(&creator, 25_000_000),
        ErrorCode::InsufficientBalance as u32,
        "InsufficientBalance",
    );
    demand_ledger_error(
        test.try_withdraw_balance(&creator, 0),
        ErrorCode::InvalidAmount as u32,
        "InvalidAmount",
    );
    demand_ledger_error(
        test.try_deposit_balance(&creator, 0),
        ErrorCode::InvalidAmount as u32,
        "InvalidAmount",
    );

    // Depositing more than the wallet holds dies inside the token program.
    let result = test.try_deposit_balance(&creator, 100_000_000);
    assert!(result.is_err(), "Deposit should fail without wallet funds");
}

#[test]
fn test_banned_users_keep_their_deposits() {
    let mut test = TestFixture::default();
    test.jump_to(FixtureStage::UsersRegistered);

    let creator = test.state.creator();
    test.fund_user_tokens(&creator.pubkey(), 30_000_000)
        .expect("Funding should succeed");
    test.try_deposit_balance(&creator, 30_000_000)
        .expect("Deposit should succeed");

    test.try_ban_user(&creator.pubkey())
        .expect("Ban should succeed");

    // A ban forfeits pending earnings only. Deposited funds stay
    // withdrawable, while new deposits and payout routing are refused.
    test.try_withdraw_balance(&creator, 5_000_000)
        .expect("A banned user can still withdraw deposited funds");
    assert_eq!(
        test.fetch_user_account(&creator.pubkey()).unwrap().balance,
        25_000_000
    );

    demand_ledger_error(
        test.try_deposit_balance(&creator, 1_000_000),
        ErrorCode::UserBanned as u32,
        "UserBanned",
    );
    let ata = test.user_token_account(&creator.pubkey());
    demand_ledger_error(
        test.try_set_payout_address(&creator, ata),
        ErrorCode::UserBanned as u32,
        "UserBanned",
    );
}
