use anchor_lang::prelude::*;

#[event]
pub struct JarInitialized {
    pub jar: Pubkey,
    pub owner: Pubkey,
    pub session_id: u64,
    pub timestamp: i64,
}

#[event]
pub struct TipReceived {
    pub jar: Pubkey,
    pub tip_record: Pubkey,
    pub tipper: Pubkey,
    pub amount: u64,
    pub session_id: u64,
    pub sequence: u64,
    pub total_amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct JarWithdrawn {
    pub jar: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    /// Session retired by this withdrawal
    pub closed_session: u64,
    /// Tips recorded in the retired session
    pub closed_tip_count: u64,
    pub next_session: u64,
    pub timestamp: i64,
}
