use anchor_lang::prelude::*;

/// Seed for the per-creator jar PDA: `["jar", creator]`
#[constant]
pub const JAR_SEED: &[u8] = b"jar";

/// Seed for tip record PDAs: `["tip", jar, session_id_le, sequence_le]`
#[constant]
pub const TIP_SEED: &[u8] = b"tip";

/// Layout version written into every account this program creates.
/// Bumped whenever the field layout of `Jar` or `TipRecord` changes.
pub const ACCOUNT_VERSION: u8 = 1;

/// Anchor account discriminator length
pub const DISCRIMINATOR_LEN: usize = 8;
