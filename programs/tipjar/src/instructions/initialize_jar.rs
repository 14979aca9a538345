use anchor_lang::prelude::*;

use crate::error::TipJarError;
use crate::events::JarInitialized;
use crate::state::{Jar, JarSnapshot};
use crate::utils::{create_pda_account, prepare_slot, write_account};

/// Creates the creator's jar.
///
/// One jar per creator, at `["jar", creator]`. The jar is never closed, so a
/// second call for the same creator always fails with `AlreadyExists`.
pub fn initialize_jar(ctx: Context<InitializeJar>) -> Result<JarSnapshot> {
    let jar_info = ctx.accounts.jar.to_account_info();
    let funding = prepare_slot(
        &jar_info,
        &Rent::get()?,
        Jar::SPACE,
        ctx.accounts.creator.lamports(),
        0,
        TipJarError::AlreadyExists,
    )?;

    let creator_key = ctx.accounts.creator.key();
    let bump = ctx.bumps.jar;
    let bump_seed = [bump];
    let signer_seeds: &[&[&[u8]]] = &[&[Jar::SEED_PREFIX, creator_key.as_ref(), &bump_seed]];

    create_pda_account(
        &ctx.accounts.creator.to_account_info(),
        &jar_info,
        &ctx.accounts.system_program.to_account_info(),
        Jar::SPACE,
        funding,
        signer_seeds,
    )?;

    let clock = Clock::get()?;
    let jar = Jar::new(
        creator_key,
        Jar::initial_session(clock.unix_timestamp),
        clock.unix_timestamp,
        bump,
    );
    write_account(&jar_info, &jar)?;

    msg!("Jar {} opened for {} in session {}", jar_info.key(), creator_key, jar.session_id);

    emit!(JarInitialized {
        jar: jar_info.key(),
        owner: creator_key,
        session_id: jar.session_id,
        timestamp: clock.unix_timestamp,
    });

    Ok(jar.snapshot())
}

#[derive(Accounts)]
pub struct InitializeJar<'info> {
    /// The creator opening their jar; pays its rent
    #[account(mut)]
    pub creator: Signer<'info>,

    /// The creator's jar
    /// CHECK: Address is pinned by the seeds; the handler refuses an occupied slot
    #[account(
        mut,
        seeds = [Jar::SEED_PREFIX, creator.key().as_ref()],
        bump,
    )]
    pub jar: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}
