use anchor_lang::prelude::*;

pub mod address;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;


use instructions::*;
use state::{JarSnapshot, TipReceipt, WithdrawReceipt};

declare_id!("B2uUS9ypnv1Z3XGvxTF4iaLAazWye3ynVA5KA9KHP32w");

/// Tip Jar Program
///
/// Lets a creator collect many small tips into a program-owned jar and sweep
/// them out later:
/// - One jar per creator, derived from the creator's wallet
/// - One immutable record per tip, derived from (jar, session, sequence)
/// - Owner-only withdrawal that resets the counters and opens a new session
///
/// # Address reuse
///
/// `tip_count` restarts at zero after every withdrawal. The session id moves
/// forward at the same time, so a record address is never derived twice.
/// Record creation also refuses any slot that already holds data.
#[program]
pub mod tipjar {
    use super::*;

    /// Initialize a new jar for the signing creator
    ///
    /// Each creator can only have one jar.
    pub fn initialize_jar(ctx: Context<InitializeJar>) -> Result<JarSnapshot> {
        instructions::initialize_jar::initialize_jar(ctx)
    }

    /// Tip a jar with SOL
    ///
    /// Transfers `amount` lamports into the jar and writes a tip record at
    /// the jar's next slot. The tipper pays the record's rent.
    pub fn send_tip(ctx: Context<SendTip>, amount: u64) -> Result<TipReceipt> {
        instructions::send_tip::send_tip(ctx, amount)
    }

    /// Withdraw the jar's balance
    ///
    /// Only the jar owner can withdraw. Everything above the rent reserve
    /// is transferred.
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<WithdrawReceipt> {
        instructions::withdraw::withdraw(ctx)
    }
}
