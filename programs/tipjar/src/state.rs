use anchor_lang::prelude::*;

use crate::address::TipSlot;
use crate::constants::{ACCOUNT_VERSION, DISCRIMINATOR_LEN, JAR_SEED, TIP_SEED};
use crate::error::TipJarError;

/// Per-creator tip jar. Holds tipped lamports on top of its own rent reserve.
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct Jar {
    /// Layout version
    pub version: u8,
    /// The creator's wallet address - owner of this jar
    pub owner: Pubkey,
    /// Lamports received since the last withdrawal
    pub total_amount: u64,
    /// Tips received in the current session; sequence of the next tip
    pub tip_count: u64,
    /// Current address-space epoch for tip records
    pub session_id: u64,
    /// Lamports received over the jar's lifetime
    pub lifetime_total: u64,
    /// Tips received over the jar's lifetime
    pub lifetime_tips: u64,
    /// Timestamp of initialization
    pub created_at: i64,
    /// PDA bump seed
    pub bump: u8,
}

/// Immutable record of a single accepted tip
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct TipRecord {
    /// Layout version
    pub version: u8,
    /// Jar the tip was paid into
    pub jar: Pubkey,
    /// Session the tip landed in
    pub session_id: u64,
    /// Position within the session
    pub sequence: u64,
    /// Wallet that sent the tip
    pub tipper: Pubkey,
    /// Amount tipped in lamports
    pub amount: u64,
    /// Timestamp of the tip
    pub timestamp: i64,
    /// PDA bump seed
    pub bump: u8,
}

/// Read-only projection of a jar's aggregate state
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct JarSnapshot {
    pub owner: Pubkey,
    pub total_amount: u64,
    pub tip_count: u64,
    pub session_id: u64,
}

/// Returned by `send_tip`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TipReceipt {
    pub jar: JarSnapshot,
    pub tip_record: Pubkey,
    pub slot: TipSlot,
}

/// Returned by `withdraw`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawReceipt {
    pub amount: u64,
    pub closed_session: u64,
    pub jar: JarSnapshot,
}

/// Counters of a session that was just retired
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClosedSession {
    pub session_id: u64,
    pub total_amount: u64,
    pub tip_count: u64,
}

impl Jar {
    pub const SEED_PREFIX: &'static [u8] = JAR_SEED;
    pub const SPACE: usize = DISCRIMINATOR_LEN + Jar::INIT_SPACE;

    pub fn new(owner: Pubkey, session_id: u64, created_at: i64, bump: u8) -> Self {
        Self {
            version: ACCOUNT_VERSION,
            owner,
            total_amount: 0,
            tip_count: 0,
            session_id,
            lifetime_total: 0,
            lifetime_tips: 0,
            created_at,
            bump,
        }
    }

    /// First session id for a new jar. Never zero.
    pub fn initial_session(unix_timestamp: i64) -> u64 {
        u64::try_from(unix_timestamp).unwrap_or(0).max(1)
    }

    pub fn is_supported_version(&self) -> bool {
        self.version == ACCOUNT_VERSION
    }

    /// Only the creator itself may move funds out; there is no delegation
    pub fn ensure_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(self.owner, *caller, TipJarError::Unauthorized);
        Ok(())
    }

    /// Slot the next tip will be written to
    pub fn next_slot(&self) -> TipSlot {
        TipSlot::new(self.session_id, self.tip_count)
    }

    /// Accounts for one tip and returns the slot it occupies.
    ///
    /// All counters are computed before any is written, so a failure leaves
    /// the jar untouched.
    pub fn record_tip(&mut self, amount: u64) -> Result<TipSlot> {
        require!(amount > 0, TipJarError::InvalidAmount);

        let slot = self.next_slot();
        let total_amount = self
            .total_amount
            .checked_add(amount)
            .ok_or(TipJarError::ArithmeticOverflow)?;
        let tip_count = self
            .tip_count
            .checked_add(1)
            .ok_or(TipJarError::TipCountOverflow)?;
        let lifetime_total = self
            .lifetime_total
            .checked_add(amount)
            .ok_or(TipJarError::ArithmeticOverflow)?;
        let lifetime_tips = self
            .lifetime_tips
            .checked_add(1)
            .ok_or(TipJarError::ArithmeticOverflow)?;

        self.total_amount = total_amount;
        self.tip_count = tip_count;
        self.lifetime_total = lifetime_total;
        self.lifetime_tips = lifetime_tips;

        Ok(slot)
    }

    /// Retires the current session: zeroes the counters and moves to a
    /// session id that has never been used by this jar.
    pub fn close_session(&mut self) -> Result<ClosedSession> {
        let next_session = self
            .session_id
            .checked_add(1)
            .ok_or(TipJarError::SessionOverflow)?;

        let closed = ClosedSession {
            session_id: self.session_id,
            total_amount: self.total_amount,
            tip_count: self.tip_count,
        };

        self.total_amount = 0;
        self.tip_count = 0;
        self.session_id = next_session;

        Ok(closed)
    }

    pub fn snapshot(&self) -> JarSnapshot {
        JarSnapshot {
            owner: self.owner,
            total_amount: self.total_amount,
            tip_count: self.tip_count,
            session_id: self.session_id,
        }
    }
}

impl TipRecord {
    pub const SEED_PREFIX: &'static [u8] = TIP_SEED;
    pub const SPACE: usize = DISCRIMINATOR_LEN + TipRecord::INIT_SPACE;

    pub fn new(
        jar: Pubkey,
        slot: TipSlot,
        tipper: Pubkey,
        amount: u64,
        timestamp: i64,
        bump: u8,
    ) -> Self {
        Self {
            version: ACCOUNT_VERSION,
            jar,
            session_id: slot.session_id,
            sequence: slot.sequence,
            tipper,
            amount,
            timestamp,
            bump,
        }
    }

    pub fn slot(&self) -> TipSlot {
        TipSlot::new(self.session_id, self.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(err: anchor_lang::error::Error) -> u32 {
        match err {
            anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn fresh_jar() -> Jar {
        Jar::new(Pubkey::new_unique(), 42, 1_700_000_000, 255)
    }

    #[test]
    fn test_new_jar_is_empty() {
        let jar = fresh_jar();
        assert_eq!(jar.total_amount, 0);
        assert_eq!(jar.tip_count, 0);
        assert_eq!(jar.session_id, 42);
        assert!(jar.is_supported_version());
    }

    #[test]
    fn test_initial_session_is_never_zero() {
        assert_eq!(Jar::initial_session(1_700_000_000), 1_700_000_000);
        assert_eq!(Jar::initial_session(0), 1);
        assert_eq!(Jar::initial_session(-5), 1);
    }

    #[test]
    fn test_record_tip_advances_counters() {
        let mut jar = fresh_jar();

        let first = jar.record_tip(100).unwrap();
        assert_eq!(first, TipSlot::new(42, 0));
        let second = jar.record_tip(25).unwrap();
        assert_eq!(second, TipSlot::new(42, 1));

        assert_eq!(jar.total_amount, 125);
        assert_eq!(jar.tip_count, 2);
        assert_eq!(jar.lifetime_total, 125);
        assert_eq!(jar.lifetime_tips, 2);
        assert_eq!(jar.next_slot(), TipSlot::new(42, 2));
    }

    #[test]
    fn test_record_tip_rejects_zero() {
        let mut jar = fresh_jar();
        let before = jar.clone();
        let err = jar.record_tip(0).unwrap_err();
        assert_eq!(code(err), u32::from(TipJarError::InvalidAmount));
        assert_eq!(jar, before);
    }

    #[test]
    fn test_record_tip_overflow_leaves_jar_untouched() {
        let mut jar = fresh_jar();
        jar.total_amount = u64::MAX - 1;
        let before = jar.clone();
        let err = jar.record_tip(2).unwrap_err();
        assert_eq!(code(err), u32::from(TipJarError::ArithmeticOverflow));
        assert_eq!(jar, before);

        let mut jar = fresh_jar();
        jar.tip_count = u64::MAX;
        let before = jar.clone();
        let err = jar.record_tip(1).unwrap_err();
        assert_eq!(code(err), u32::from(TipJarError::TipCountOverflow));
        assert_eq!(jar, before);
    }

    #[test]
    fn test_ensure_owner() {
        let jar = fresh_jar();
        assert!(jar.ensure_owner(&jar.owner).is_ok());
        let err = jar.ensure_owner(&Pubkey::new_unique()).unwrap_err();
        assert_eq!(code(err), u32::from(TipJarError::Unauthorized));
    }

    #[test]
    fn test_close_session_resets_and_rotates() {
        let mut jar = fresh_jar();
        jar.record_tip(10).unwrap();
        jar.record_tip(20).unwrap();

        let closed = jar.close_session().unwrap();
        assert_eq!(
            closed,
            ClosedSession {
                session_id: 42,
                total_amount: 30,
                tip_count: 2,
            }
        );
        assert_eq!(jar.total_amount, 0);
        assert_eq!(jar.tip_count, 0);
        assert_eq!(jar.session_id, 43);
        // lifetime counters survive withdrawals
        assert_eq!(jar.lifetime_total, 30);
        assert_eq!(jar.lifetime_tips, 2);
    }

    #[test]
    fn test_close_session_overflow_is_reported() {
        let mut jar = fresh_jar();
        jar.session_id = u64::MAX;
        jar.record_tip(5).unwrap();
        let before = jar.clone();
        let err = jar.close_session().unwrap_err();
        assert_eq!(code(err), u32::from(TipJarError::SessionOverflow));
        assert_eq!(jar, before);
    }

    #[test]
    fn test_account_sizes_match_serialization() {
        let mut buf = Vec::new();
        fresh_jar().try_serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), Jar::SPACE);

        let record = TipRecord::new(
            Pubkey::new_unique(),
            TipSlot::new(1, 0),
            Pubkey::new_unique(),
            1,
            0,
            254,
        );
        let mut buf = Vec::new();
        record.try_serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), TipRecord::SPACE);
    }

    #[test]
    fn test_deserialize_rejects_wrong_account_type() {
        let record = TipRecord::new(
            Pubkey::new_unique(),
            TipSlot::new(1, 0),
            Pubkey::new_unique(),
            1_000,
            0,
            254,
        );
        let mut buf = Vec::new();
        record.try_serialize(&mut buf).unwrap();
        buf.resize(Jar::SPACE.max(buf.len()), 0);

        assert!(Jar::try_deserialize(&mut buf.as_slice()).is_err());
        let back = TipRecord::try_deserialize(&mut buf.as_slice()).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_deserialize_rejects_truncated_account() {
        let mut buf = Vec::new();
        fresh_jar().try_serialize(&mut buf).unwrap();
        assert!(Jar::try_deserialize(&mut &buf[..4]).is_err());
        assert!(Jar::try_deserialize(&mut &buf[..Jar::SPACE - 1]).is_err());
    }
}
