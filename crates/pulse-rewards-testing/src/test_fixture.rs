use {
    crate::{create_mint, load_pulse_rewards, mint_to, FixtureStage, FixtureState},
    anchor_lang::AccountDeserialize,
    litesvm::{
        types::{FailedTransactionMetadata, TransactionResult},
        LiteSVM,
    },
    litesvm_token::spl_token::solana_program::native_token::LAMPORTS_PER_SOL,
    pulse_rewards::state::{
        ActionKind, ActionReceipt, Campaign, Participation, PayoutRequest, PayoutStatus,
        RewardLedger, UserAccount,
    },
    pulse_rewards_sdk::{
        build_activate_campaign_ix, build_ban_user_ix, build_cancel_campaign_ix,
        build_create_campaign_ix, build_deposit_balance_ix, build_finalize_campaign_ix,
        build_initialize_ledger_ix, build_join_campaign_ix, build_pause_campaign_ix,
        build_reclaim_campaign_funds_ix, build_register_user_ix, build_reject_action_ix,
        build_request_payout_ix, build_resume_campaign_ix, build_set_ledger_paused_ix,
        build_set_payout_address_ix, build_update_operator_ix, build_update_payout_status_ix,
        build_verify_action_ix, build_withdraw_balance_ix, build_withdraw_platform_fees_ix,
    },
    solana_account::Account,
    solana_hash::Hash,
    solana_instruction::Instruction,
    solana_keypair::Keypair,
    solana_message::Message,
    solana_pubkey::Pubkey,
    solana_signer::Signer as _,
    solana_sysvar::clock::Clock,
    solana_transaction::Transaction,
    spl_associated_token_account::{
        get_associated_token_address, instruction::create_associated_token_account_idempotent,
    },
};

/// Decimals of the settlement mint; one token unit equals one micro-USD.
const SETTLEMENT_DECIMALS: u8 = 6;

/// Wall time the fixture boots with. Fresh SVMs can start the clock at or
/// near zero, which schedule math and receipt timestamps cannot tolerate.
const GENESIS_TIMESTAMP: i64 = 1_700_000_000;

/// In-process SVM wired up for ledger tests.
///
/// Owns the program, the cast of funded keypairs and a settlement mint.
/// `jump_to` drives setup through [`FixtureStage`]s; the `try_` drivers wrap
/// one instruction each and return the raw transaction outcome so tests can
/// assert success or a specific program error.
pub struct TestFixture {
    pub state: FixtureState,
    pub log_send_transaction_results: bool,
    pub svm: LiteSVM,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new(FixtureState::default())
    }
}

impl TestFixture {
    pub fn new(state: FixtureState) -> Self {
        let mut svm = LiteSVM::new();
        load_pulse_rewards(&mut svm, state.address_finder.program_id);

        let mut clock = svm.get_sysvar::<Clock>();
        if clock.unix_timestamp < GENESIS_TIMESTAMP {
            clock.unix_timestamp = GENESIS_TIMESTAMP;
            svm.set_sysvar::<Clock>(&clock);
        }

        let mut fixture = Self {
            state,
            log_send_transaction_results: true,
            svm,
        };

        for address in [
            fixture.state.admin_address(),
            fixture.state.operator_address(),
            fixture.state.creator_address(),
            fixture.state.participant_address(),
        ] {
            fixture.airdrop(&address, 100 * LAMPORTS_PER_SOL);
        }

        let admin = fixture.state.admin();
        let mint = fixture.state.mint_keypair.insecure_clone();
        create_mint(&mut fixture.svm, &admin, &mint, SETTLEMENT_DECIMALS)
            .expect("Failed to create the settlement mint");

        fixture
    }

    pub fn airdrop(&mut self, address: &Pubkey, lamports: u64) {
        self.svm
            .airdrop(address, lamports)
            .expect("Airdrop should succeed");
    }

    pub fn enable_send_transaction_logging(&mut self) {
        self.log_send_transaction_results = true;
    }

    pub fn disable_send_transaction_logging(&mut self) {
        self.log_send_transaction_results = false;
    }

    pub fn send_transaction(&mut self, tx: Transaction) -> TransactionResult {
        let result = self.svm.send_transaction(tx);
        if self.log_send_transaction_results {
            match &result {
                Ok(meta) => {
                    println!("✅ Transaction succeeded");
                    for log in &meta.logs {
                        println!("   {log}");
                    }
                }
                Err(failed) => {
                    println!("❌ Transaction failed: {:?}", failed.err);
                    for log in &failed.meta.logs {
                        println!("   {log}");
                    }
                }
            }
        }
        result
    }

    /// Sends one instruction signed by `signers`; the first signer pays.
    pub fn send_ix(&mut self, ix: Instruction, signers: &[&Keypair]) -> TransactionResult {
        let payer = signers[0].pubkey();
        let tx = Transaction::new(
            signers,
            Message::new(&[ix], Some(&payer)),
            self.svm.latest_blockhash(),
        );
        self.send_transaction(tx)
    }

    pub fn latest_blockhash(&self) -> Hash {
        self.svm.latest_blockhash()
    }

    /// Rotates the blockhash so a byte-identical instruction sequence makes
    /// a distinct transaction instead of being dropped as a duplicate.
    pub fn expire_blockhash(&mut self) {
        self.svm.expire_blockhash();
    }

    pub fn current_slot(&self) -> u64 {
        self.svm.get_sysvar::<Clock>().slot
    }

    pub fn warp_to_slot(&mut self, slot: u64) {
        self.svm.warp_to_slot(slot);
    }

    pub fn advance_slot_by(&mut self, slots: u64) {
        let slot = self.current_slot();
        self.warp_to_slot(slot + slots);
    }

    pub fn current_timestamp(&self) -> i64 {
        self.svm.get_sysvar::<Clock>().unix_timestamp
    }

    /// Moves the cluster clock forward. Slot is left untouched; cooldown and
    /// expiry checks read `unix_timestamp` only.
    pub fn warp_by_secs(&mut self, secs: i64) {
        let mut clock = self.svm.get_sysvar::<Clock>();
        clock.unix_timestamp += secs;
        self.svm.set_sysvar::<Clock>(&clock);
    }

    pub fn warp_to_timestamp(&mut self, unix_timestamp: i64) {
        let mut clock = self.svm.get_sysvar::<Clock>();
        clock.unix_timestamp = unix_timestamp;
        self.svm.set_sysvar::<Clock>(&clock);
    }

    // ------------------------------------------------------------------
    // Stage machine
    // ------------------------------------------------------------------

    /// Runs every setup step after the current stage, up to and including
    /// `target`. Panics on any failure; failure-path tests drive the
    /// individual `try_` methods instead.
    pub fn jump_to(&mut self, target: FixtureStage) {
        let pending: Vec<FixtureStage> = FixtureStage::all()
            .iter()
            .copied()
            .filter(|stage| {
                *stage > FixtureStage::Fresh && *stage > self.state.stage && *stage <= target
            })
            .collect();

        for stage in pending {
            self.step_to(stage);
        }
    }

    fn step_to(&mut self, stage: FixtureStage) {
        let result = match stage {
            FixtureStage::Fresh => Ok(()),
            FixtureStage::LedgerInitialized => self.try_initialize_ledger(),
            FixtureStage::UsersRegistered => {
                let creator = self.state.creator();
                let participant = self.state.participant();
                self.try_register_user(&creator)
                    .and_then(|_| self.try_register_user(&participant))
            }
            FixtureStage::CreatorFunded => {
                let creator = self.state.creator();
                let budget = self.state.campaign_budget;
                self.fund_user_tokens(&creator.pubkey(), budget)
                    .and_then(|_| self.try_deposit_balance(&creator, budget))
            }
            FixtureStage::CampaignCreated => self.try_create_campaign(),
            FixtureStage::CampaignActivated => self.try_activate_campaign(),
            FixtureStage::ParticipantJoined => {
                let participant = self.state.participant();
                self.try_join_campaign(&participant)
            }
        };

        result.unwrap_or_else(|failed| {
            panic!(
                "Failed to reach {stage:?}: {:?}\n{:#?}",
                failed.err, failed.meta.logs
            )
        });
        self.state.stage = stage;
    }

    /// Mints settlement tokens to the wallet's associated token account,
    /// creating the account when missing. Returns the token account address.
    pub fn fund_user_tokens(
        &mut self,
        wallet: &Pubkey,
        amount: u64,
    ) -> Result<Pubkey, FailedTransactionMetadata> {
        let admin = self.state.admin();
        let mint = self.state.mint_address();
        mint_to(&mut self.svm, &admin, &mint, wallet, amount)?;
        Ok(get_associated_token_address(wallet, &mint))
    }

    pub fn user_token_account(&self, wallet: &Pubkey) -> Pubkey {
        get_associated_token_address(wallet, &self.state.mint_address())
    }

    /// Creates the wallet's associated token account without funding it,
    /// for example to register it as a payout address.
    pub fn create_user_ata(&mut self, wallet: &Pubkey) -> Pubkey {
        let admin = self.state.admin();
        let mint = self.state.mint_address();
        crate::create_ata(&mut self.svm, &admin, wallet, &mint)
            .expect("Failed to create token account");
        get_associated_token_address(wallet, &mint)
    }

    // ------------------------------------------------------------------
    // Admin drivers
    // ------------------------------------------------------------------

    pub fn try_initialize_ledger(&mut self) -> Result<(), FailedTransactionMetadata> {
        let (ix, _, _) = build_initialize_ledger_ix(
            &self.state.address_finder,
            self.state.admin_address(),
            self.state.mint_address(),
            self.state.operator_address(),
            self.state.platform_fee_bps,
            self.state.min_payout_amount,
            self.state.action_cooldown_secs,
            self.state.fraud_ban_threshold,
        )
        .expect("Failed to build initialize_ledger instruction");

        let admin = self.state.admin();
        self.send_ix(ix, &[&admin])?;
        Ok(())
    }

    pub fn try_set_ledger_paused(&mut self, paused: bool) -> Result<(), FailedTransactionMetadata> {
        let (ix, _, _) =
            build_set_ledger_paused_ix(&self.state.address_finder, self.state.admin_address(), paused)
                .expect("Failed to build set_ledger_paused instruction");

        let admin = self.state.admin();
        self.send_ix(ix, &[&admin])?;
        Ok(())
    }

    pub fn try_update_operator(
        &mut self,
        new_operator: Pubkey,
    ) -> Result<(), FailedTransactionMetadata> {
        let (ix, _, _) = build_update_operator_ix(
            &self.state.address_finder,
            self.state.admin_address(),
            new_operator,
        )
        .expect("Failed to build update_operator instruction");

        let admin = self.state.admin();
        self.send_ix(ix, &[&admin])?;
        Ok(())
    }

    /// Withdraws accrued fees to the admin's associated token account,
    /// creating it on the way when missing.
    pub fn try_withdraw_platform_fees(
        &mut self,
        amount: u64,
    ) -> Result<(), FailedTransactionMetadata> {
        let admin_address = self.state.admin_address();
        let destination = self.user_token_account(&admin_address);
        let create_ix = create_associated_token_account_idempotent(
            &admin_address,
            &admin_address,
            &self.state.mint_address(),
            &spl_token::ID,
        );
        let (withdraw_ix, _, _) = build_withdraw_platform_fees_ix(
            &self.state.address_finder,
            admin_address,
            destination,
            amount,
        )
        .expect("Failed to build withdraw_platform_fees instruction");

        let admin = self.state.admin();
        let tx = Transaction::new(
            &[&admin],
            Message::new(&[create_ix, withdraw_ix], Some(&admin_address)),
            self.svm.latest_blockhash(),
        );
        self.send_transaction(tx)?;
        Ok(())
    }

    pub fn try_ban_user(&mut self, user_authority: &Pubkey) -> Result<(), FailedTransactionMetadata> {
        let (ix, _, _) = build_ban_user_ix(
            &self.state.address_finder,
            self.state.admin_address(),
            *user_authority,
        )
        .expect("Failed to build ban_user instruction");

        let admin = self.state.admin();
        self.send_ix(ix, &[&admin])?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // User drivers
    // ------------------------------------------------------------------

    pub fn try_register_user(&mut self, user: &Keypair) -> Result<(), FailedTransactionMetadata> {
        let (ix, _, _) = build_register_user_ix(&self.state.address_finder, user.pubkey())
            .expect("Failed to build register_user instruction");

        self.send_ix(ix, &[user])?;
        Ok(())
    }

    pub fn try_set_payout_address(
        &mut self,
        user: &Keypair,
        payout_address: Pubkey,
    ) -> Result<(), FailedTransactionMetadata> {
        let (ix, _, _) = build_set_payout_address_ix(
            &self.state.address_finder,
            user.pubkey(),
            payout_address,
        )
        .expect("Failed to build set_payout_address instruction");

        self.send_ix(ix, &[user])?;
        Ok(())
    }

    /// Deposits from the user's associated token account, which must already
    /// hold at least `amount`; see [`TestFixture::fund_user_tokens`].
    pub fn try_deposit_balance(
        &mut self,
        user: &Keypair,
        amount: u64,
    ) -> Result<(), FailedTransactionMetadata> {
        let source = self.user_token_account(&user.pubkey());
        let (ix, _, _) = build_deposit_balance_ix(
            &self.state.address_finder,
            user.pubkey(),
            source,
            amount,
        )
        .expect("Failed to build deposit_balance instruction");

        self.send_ix(ix, &[user])?;
        Ok(())
    }

    pub fn try_withdraw_balance(
        &mut self,
        user: &Keypair,
        amount: u64,
    ) -> Result<(), FailedTransactionMetadata> {
        let destination = self.user_token_account(&user.pubkey());
        let create_ix = create_associated_token_account_idempotent(
            &user.pubkey(),
            &user.pubkey(),
            &self.state.mint_address(),
            &spl_token::ID,
        );
        let (withdraw_ix, _, _) = build_withdraw_balance_ix(
            &self.state.address_finder,
            user.pubkey(),
            destination,
            amount,
        )
        .expect("Failed to build withdraw_balance instruction");

        let tx = Transaction::new(
            &[user],
            Message::new(&[create_ix, withdraw_ix], Some(&user.pubkey())),
            self.svm.latest_blockhash(),
        );
        self.send_transaction(tx)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Campaign drivers, all signed by the fixture creator
    // ------------------------------------------------------------------

    pub fn try_create_campaign(&mut self) -> Result<(), FailedTransactionMetadata> {
        let (ix, _, _) = build_create_campaign_ix(
            &self.state.address_finder,
            self.state.creator_address(),
            self.state.campaign_seed,
            self.state.campaign_kind,
            self.state.campaign_budget,
            self.state.target_units,
            self.state.max_units_per_user,
            self.state.required_actions,
            self.state.ends_at,
        )
        .expect("Failed to build create_campaign instruction");

        let creator = self.state.creator();
        self.send_ix(ix, &[&creator])?;
        Ok(())
    }

    pub fn try_activate_campaign(&mut self) -> Result<(), FailedTransactionMetadata> {
        let (ix, _, _) = build_activate_campaign_ix(
            &self.state.address_finder,
            self.state.creator_address(),
            self.state.campaign_seed,
        )
        .expect("Failed to build activate_campaign instruction");

        let creator = self.state.creator();
        self.send_ix(ix, &[&creator])?;
        Ok(())
    }

    pub fn try_pause_campaign(&mut self) -> Result<(), FailedTransactionMetadata> {
        let (ix, _, _) = build_pause_campaign_ix(
            &self.state.address_finder,
            self.state.creator_address(),
            self.state.campaign_seed,
        )
        .expect("Failed to build pause_campaign instruction");

        let creator = self.state.creator();
        self.send_ix(ix, &[&creator])?;
        Ok(())
    }

    pub fn try_resume_campaign(&mut self) -> Result<(), FailedTransactionMetadata> {
        let (ix, _, _) = build_resume_campaign_ix(
            &self.state.address_finder,
            self.state.creator_address(),
            self.state.campaign_seed,
        )
        .expect("Failed to build resume_campaign instruction");

        let creator = self.state.creator();
        self.send_ix(ix, &[&creator])?;
        Ok(())
    }

    pub fn try_cancel_campaign(&mut self) -> Result<(), FailedTransactionMetadata> {
        let (ix, _, _) = build_cancel_campaign_ix(
            &self.state.address_finder,
            self.state.creator_address(),
            self.state.campaign_seed,
        )
        .expect("Failed to build cancel_campaign instruction");

        let creator = self.state.creator();
        self.send_ix(ix, &[&creator])?;
        Ok(())
    }

    pub fn try_finalize_campaign(&mut self) -> Result<(), FailedTransactionMetadata> {
        let (ix, _, _) = build_finalize_campaign_ix(
            &self.state.address_finder,
            self.state.creator_address(),
            self.state.campaign_seed,
        )
        .expect("Failed to build finalize_campaign instruction");

        let creator = self.state.creator();
        self.send_ix(ix, &[&creator])?;
        Ok(())
    }

    pub fn try_reclaim_campaign_funds(&mut self) -> Result<(), FailedTransactionMetadata> {
        let (ix, _, _) = build_reclaim_campaign_funds_ix(
            &self.state.address_finder,
            self.state.creator_address(),
            self.state.campaign_seed,
        )
        .expect("Failed to build reclaim_campaign_funds instruction");

        let creator = self.state.creator();
        self.send_ix(ix, &[&creator])?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Participation and verification drivers
    // ------------------------------------------------------------------

    pub fn try_join_campaign(&mut self, user: &Keypair) -> Result<(), FailedTransactionMetadata> {
        let (ix, _, _) = build_join_campaign_ix(
            &self.state.address_finder,
            user.pubkey(),
            self.state.campaign_address(),
        )
        .expect("Failed to build join_campaign instruction");

        self.send_ix(ix, &[user])?;
        Ok(())
    }

    pub fn try_verify_action(
        &mut self,
        user_authority: &Pubkey,
        action: ActionKind,
        evidence: &[u8; 32],
    ) -> Result<(), FailedTransactionMetadata> {
        let (ix, _, _) = build_verify_action_ix(
            &self.state.address_finder,
            self.state.operator_address(),
            self.state.campaign_address(),
            *user_authority,
            action,
            *evidence,
        )
        .expect("Failed to build verify_action instruction");

        let operator = self.state.operator();
        self.send_ix(ix, &[&operator])?;
        Ok(())
    }

    pub fn try_reject_action(
        &mut self,
        user_authority: &Pubkey,
        action: ActionKind,
        evidence: &[u8; 32],
        fraud: bool,
    ) -> Result<(), FailedTransactionMetadata> {
        let (ix, _, _) = build_reject_action_ix(
            &self.state.address_finder,
            self.state.operator_address(),
            self.state.campaign_address(),
            *user_authority,
            action,
            *evidence,
            fraud,
        )
        .expect("Failed to build reject_action instruction");

        let operator = self.state.operator();
        self.send_ix(ix, &[&operator])?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Payout drivers
    // ------------------------------------------------------------------

    /// Opens a payout request at the user's next request index.
    pub fn try_request_payout(
        &mut self,
        user: &Keypair,
        amount: u64,
    ) -> Result<(), FailedTransactionMetadata> {
        let index = self
            .fetch_user_account(&user.pubkey())
            .expect("User account should exist before requesting a payout")
            .payout_requests_total;
        let (ix, _, _) = build_request_payout_ix(
            &self.state.address_finder,
            user.pubkey(),
            index,
            amount,
        )
        .expect("Failed to build request_payout instruction");

        self.send_ix(ix, &[user])?;
        Ok(())
    }

    /// Admin-side payout resolution. The recipient token account is read
    /// back off the request, matching what settlement would do.
    pub fn try_update_payout_status(
        &mut self,
        user_authority: &Pubkey,
        index: u32,
        new_status: PayoutStatus,
    ) -> Result<(), FailedTransactionMetadata> {
        let payout_request = self
            .fetch_payout_request_account(user_authority, index)
            .expect("Payout request should exist before a status update");
        let (ix, _, _) = build_update_payout_status_ix(
            &self.state.address_finder,
            self.state.admin_address(),
            *user_authority,
            index,
            payout_request.payout_address,
            new_status,
        )
        .expect("Failed to build update_payout_status instruction");

        let admin = self.state.admin();
        self.send_ix(ix, &[&admin])?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Account fetchers
    // ------------------------------------------------------------------

    pub fn fetch_account(&self, address: &Pubkey) -> Option<Account> {
        self.svm.get_account(address)
    }

    pub fn account_exists(&self, address: &Pubkey) -> bool {
        self.svm.get_account(address).is_some()
    }

    fn fetch_anchor_account<T: AccountDeserialize>(&self, address: &Pubkey) -> Option<T> {
        self.svm.get_account(address).map(|account| {
            T::try_deserialize(&mut account.data.as_slice())
                .expect("Account data should deserialize")
        })
    }

    pub fn fetch_ledger_account(&self) -> Option<RewardLedger> {
        self.fetch_anchor_account(&self.state.ledger_address())
    }

    pub fn fetch_user_account(&self, authority: &Pubkey) -> Option<UserAccount> {
        self.fetch_anchor_account(&self.state.user_account_address(authority))
    }

    pub fn fetch_campaign_account(&self) -> Option<Campaign> {
        self.fetch_anchor_account(&self.state.campaign_address())
    }

    pub fn fetch_participation_account(&self, authority: &Pubkey) -> Option<Participation> {
        self.fetch_anchor_account(&self.state.participation_address(authority))
    }

    pub fn fetch_receipt_account(&self, evidence: &[u8; 32]) -> Option<ActionReceipt> {
        self.fetch_anchor_account(&self.state.receipt_address(evidence))
    }

    pub fn fetch_payout_request_account(
        &self,
        authority: &Pubkey,
        index: u32,
    ) -> Option<PayoutRequest> {
        self.fetch_anchor_account(&self.state.payout_request_address(authority, index))
    }

    // TODO: replace this with get_token_account -> TokenAccount
    pub fn get_token_account_balance(&self, address: &Pubkey) -> u64 {
        let account = self
            .svm
            .get_account(address)
            .expect("Token account should exist");
        u64::from_le_bytes(
            account.data[64..72]
                .try_into()
                .expect("Token account data too short"),
        )
    }

    pub fn treasury_balance(&self) -> u64 {
        self.get_token_account_balance(&self.state.treasury_address())
    }
}
