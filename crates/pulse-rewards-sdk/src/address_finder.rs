use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    system_program::ID as SYSTEM_PROGRAM_ID, sysvar::rent::ID as RENT_ID,
};
use anchor_spl::{
    associated_token::ID as ASSOCIATED_TOKEN_PROGRAM_ID, token::ID as TOKEN_PROGRAM_ID,
};
use pulse_rewards::{
    CAMPAIGN_SEED_PREFIX, ID as PULSE_PROGRAM_ID, LEDGER_SEED_PREFIX, PARTICIPATION_SEED_PREFIX,
    PAYOUT_SEED_PREFIX, RECEIPT_SEED_PREFIX, TREASURY_SEED_PREFIX, USER_SEED_PREFIX,
};

pub struct AddressFinder {
    pub program_id: Pubkey,

    pub associated_token_program_id: Pubkey,
    pub rent_id: Pubkey,
    pub system_program_id: Pubkey,
    pub token_program_id: Pubkey,
}

impl AddressFinder {
    pub fn new(
        program_id: Pubkey,
        associated_token_program_id: Pubkey,
        rent_id: Pubkey,
        system_program_id: Pubkey,
        token_program_id: Pubkey,
    ) -> Self {
        Self {
            program_id,
            associated_token_program_id,
            rent_id,
            system_program_id,
            token_program_id,
        }
    }

    pub fn find_ledger_address(&self) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[LEDGER_SEED_PREFIX], &self.program_id)
    }

    pub fn find_treasury_address(&self, ledger_address: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[TREASURY_SEED_PREFIX, ledger_address.as_ref()],
            &self.program_id,
        )
    }

    pub fn find_user_account_address(&self, authority: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[USER_SEED_PREFIX, authority.as_ref()], &self.program_id)
    }

    pub fn find_campaign_address(&self, creator: &Pubkey, seed: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                CAMPAIGN_SEED_PREFIX,
                creator.as_ref(),
                seed.to_le_bytes().as_ref(),
            ],
            &self.program_id,
        )
    }

    pub fn find_participation_address(
        &self,
        campaign_address: &Pubkey,
        authority: &Pubkey,
    ) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                PARTICIPATION_SEED_PREFIX,
                campaign_address.as_ref(),
                authority.as_ref(),
            ],
            &self.program_id,
        )
    }

    pub fn find_receipt_address(
        &self,
        campaign_address: &Pubkey,
        evidence_hash: &[u8; 32],
    ) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                RECEIPT_SEED_PREFIX,
                campaign_address.as_ref(),
                evidence_hash.as_ref(),
            ],
            &self.program_id,
        )
    }

    pub fn find_payout_request_address(&self, authority: &Pubkey, index: u32) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                PAYOUT_SEED_PREFIX,
                authority.as_ref(),
                index.to_le_bytes().as_ref(),
            ],
            &self.program_id,
        )
    }
}

impl Default for AddressFinder {
    fn default() -> Self {
        Self::new(
            PULSE_PROGRAM_ID,
            ASSOCIATED_TOKEN_PROGRAM_ID,
            RENT_ID,
            SYSTEM_PROGRAM_ID,
            TOKEN_PROGRAM_ID,
        )
    }
}
