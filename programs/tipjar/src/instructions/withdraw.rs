use anchor_lang::prelude::*;

use crate::error::TipJarError;
use crate::events::JarWithdrawn;
use crate::state::{Jar, WithdrawReceipt};
use crate::utils::withdrawable;

/// Sweeps everything above the jar's rent reserve to its owner.
///
/// Counters reset to zero and the jar moves to a fresh session, so tips
/// after this point never re-derive an address used before it.
pub fn withdraw(ctx: Context<Withdraw>) -> Result<WithdrawReceipt> {
    ctx.accounts.jar.ensure_owner(&ctx.accounts.creator.key())?;

    let jar_info = ctx.accounts.jar.to_account_info();
    let reserve = Rent::get()?.minimum_balance(jar_info.data_len());
    let amount = withdrawable(jar_info.lamports(), reserve);

    let jar = &mut ctx.accounts.jar;
    let closed = jar.close_session()?;

    // The jar is program-owned, so lamports move directly
    if amount > 0 {
        jar.sub_lamports(amount)?;
        ctx.accounts.creator.add_lamports(amount)?;
    }

    msg!(
        "Withdrew {} lamports; session {} closed after {} tips totalling {}",
        amount,
        closed.session_id,
        closed.tip_count,
        closed.total_amount
    );

    emit!(JarWithdrawn {
        jar: jar.key(),
        owner: jar.owner,
        amount,
        closed_session: closed.session_id,
        closed_tip_count: closed.tip_count,
        next_session: jar.session_id,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(WithdrawReceipt {
        amount,
        closed_session: closed.session_id,
        jar: jar.snapshot(),
    })
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// The creator withdrawing from their jar
    #[account(mut)]
    pub creator: Signer<'info>,

    /// The creator's jar
    #[account(
        mut,
        seeds = [Jar::SEED_PREFIX, jar.owner.as_ref()],
        bump = jar.bump,
        constraint = jar.is_supported_version() @ TipJarError::UnsupportedVersion,
    )]
    pub jar: Account<'info, Jar>,
}
