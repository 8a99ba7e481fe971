//! LiteSVM test harness for the pulse-rewards program.
//!
//! [`TestFixture`] owns an in-process SVM with the program loaded and walks
//! it through [`FixtureStage`]s so each test starts at the interesting part
//! instead of repeating ledger and campaign setup by hand.

mod fixture_stage;
mod fixture_state;
mod ledger_snapshot;
mod test_fixture;

pub use fixture_stage::FixtureStage;
pub use fixture_state::FixtureState;
pub use ledger_snapshot::{LedgerSnapshot, UserSnapshot};
pub use test_fixture::TestFixture;

use std::fs;
use std::path::Path;

use litesvm::types::{FailedTransactionMetadata, TransactionResult};
use litesvm::LiteSVM;
use sha2::{Digest, Sha256};
use solana_instruction::error::InstructionError;
use solana_keypair::Keypair;
use solana_message::Message;
use solana_pubkey::Pubkey;
use solana_seed_derivable::SeedDerivable as _;
use solana_signer::Signer as _;
use solana_sysvar::rent::Rent;
use solana_transaction::Transaction;
use solana_transaction_error::TransactionError;
use spl_associated_token_account::get_associated_token_address;
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;
use spl_token::solana_program::program_pack::Pack as _;
use spl_token::state::Mint;

/// Loads the compiled program into the SVM from the workspace build output.
pub fn load_pulse_rewards(svm: &mut LiteSVM, program_id: Pubkey) {
    let so_path =
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../target/deploy/pulse_rewards.so");
    let program_bytes = fs::read(&so_path).unwrap_or_else(|err| {
        panic!(
            "Failed to read {}: {err}. Run `anchor build` first.",
            so_path.display()
        )
    });
    svm.add_program(program_id, &program_bytes);
}

/// Creates a new SPL mint with `payer` as its mint authority.
pub fn create_mint(
    svm: &mut LiteSVM,
    payer: &Keypair,
    mint: &Keypair,
    decimals: u8,
) -> TransactionResult {
    let rent = svm.get_sysvar::<Rent>();
    let create_account_ix = solana_system_interface::instruction::create_account(
        &payer.pubkey(),
        &mint.pubkey(),
        rent.minimum_balance(Mint::LEN),
        Mint::LEN as u64,
        &spl_token::ID,
    );
    let init_mint_ix = spl_token::instruction::initialize_mint2(
        &spl_token::ID,
        &mint.pubkey(),
        &payer.pubkey(),
        None,
        decimals,
    )
    .expect("Failed to build initialize_mint2 instruction");

    let tx = Transaction::new(
        &[payer, mint],
        Message::new(&[create_account_ix, init_mint_ix], Some(&payer.pubkey())),
        svm.latest_blockhash(),
    );
    svm.send_transaction(tx)
}

/// Creates the associated token account for `wallet`, tolerating one that
/// already exists.
pub fn create_ata(
    svm: &mut LiteSVM,
    payer: &Keypair,
    wallet: &Pubkey,
    mint: &Pubkey,
) -> TransactionResult {
    let ix = create_associated_token_account_idempotent(&payer.pubkey(), wallet, mint, &spl_token::ID);
    let tx = Transaction::new(
        &[payer],
        Message::new(&[ix], Some(&payer.pubkey())),
        svm.latest_blockhash(),
    );
    svm.send_transaction(tx)
}

/// Mints `amount` to the wallet's associated token account, creating the
/// account when missing. `mint_authority` pays and signs.
pub fn mint_to(
    svm: &mut LiteSVM,
    mint_authority: &Keypair,
    mint: &Pubkey,
    recipient_wallet: &Pubkey,
    amount: u64,
) -> TransactionResult {
    let ata = get_associated_token_address(recipient_wallet, mint);
    let create_ix = create_associated_token_account_idempotent(
        &mint_authority.pubkey(),
        recipient_wallet,
        mint,
        &spl_token::ID,
    );
    let mint_ix = spl_token::instruction::mint_to(
        &spl_token::ID,
        mint,
        &ata,
        &mint_authority.pubkey(),
        &[],
        amount,
    )
    .expect("Failed to build mint_to instruction");

    let tx = Transaction::new(
        &[mint_authority],
        Message::new(&[create_ix, mint_ix], Some(&mint_authority.pubkey())),
        svm.latest_blockhash(),
    );
    svm.send_transaction(tx)
}

/// Derives a keypair from a human-readable identifier, so fixture addresses
/// stay stable run to run.
pub fn deterministic_keypair(identifier: &str) -> Keypair {
    let seed = Sha256::digest(identifier.as_bytes());
    Keypair::from_seed(&seed).expect("SHA256 output should always be valid seed")
}

/// Hashes a human-readable evidence identifier the way an off-chain verifier
/// hashes a message id or transaction signature before submitting it.
pub fn evidence_hash(identifier: &str) -> [u8; 32] {
    Sha256::digest(identifier.as_bytes()).into()
}

/// Asserts that a transaction failed with the given program error code.
///
/// Intended use is `demand_ledger_error(result, ErrorCode::X as u32, "X")`;
/// the name only decorates the panic message. Accepts either a raw
/// [`TransactionResult`] or the `Result<(), _>` the fixture drivers return.
pub fn demand_ledger_error<T: std::fmt::Debug>(
    result: Result<T, FailedTransactionMetadata>,
    expected_code: u32,
    expected_name: &str,
) {
    match result {
        Ok(value) => panic!(
            "Expected {expected_name} ({expected_code}) but the transaction succeeded: {value:?}"
        ),
        Err(failed) => match failed.err {
            TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
                assert_eq!(
                    code, expected_code,
                    "Expected {expected_name} ({expected_code}), got custom error {code}:\n{:#?}",
                    failed.meta.logs
                );
            }
            other => panic!(
                "Expected {expected_name} ({expected_code}), got {other:?}:\n{:#?}",
                failed.meta.logs
            ),
        },
    }
}
