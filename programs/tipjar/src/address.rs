//! Deterministic addresses for jars and tip records.
//!
//! Every storage location the program touches is a PDA of this program id.
//! Integers are always encoded as fixed-width little-endian so that clients
//! and the on-chain seed constraints agree byte for byte.

use anchor_lang::prelude::*;

use crate::constants::{JAR_SEED, TIP_SEED};

/// Position of a tip inside a jar's address space
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TipSlot {
    pub session_id: u64,
    pub sequence: u64,
}

impl TipSlot {
    pub fn new(session_id: u64, sequence: u64) -> Self {
        Self {
            session_id,
            sequence,
        }
    }

    /// Little-endian `(session_id, sequence)` seed components
    pub fn seed_bytes(&self) -> ([u8; 8], [u8; 8]) {
        (self.session_id.to_le_bytes(), self.sequence.to_le_bytes())
    }
}

/// Jar PDA for `creator`, with its canonical bump
pub fn jar_address(creator: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[JAR_SEED, creator.as_ref()], &crate::ID)
}

/// Tip record PDA for `slot` inside `jar`, with its canonical bump
pub fn tip_address(jar: &Pubkey, slot: TipSlot) -> (Pubkey, u8) {
    let (session, sequence) = slot.seed_bytes();
    Pubkey::find_program_address(&[TIP_SEED, jar.as_ref(), &session, &sequence], &crate::ID)
}
