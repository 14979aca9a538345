use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::error::TipJarError;
use crate::events::TipReceived;
use crate::state::{Jar, TipReceipt, TipRecord};
use crate::utils::{create_pda_account, prepare_slot, write_account};

/// Tips a jar with SOL and records the tip.
///
/// The record lands at `["tip", jar, session_id, tip_count]` as read from
/// the jar at execution time. A client that derived the slot from a stale
/// read fails the seeds constraint and must re-read the jar and retry.
pub fn send_tip(ctx: Context<SendTip>, amount: u64) -> Result<TipReceipt> {
    require!(amount > 0, TipJarError::InvalidAmount);

    let tip_info = ctx.accounts.tip_record.to_account_info();
    let funding = prepare_slot(
        &tip_info,
        &Rent::get()?,
        TipRecord::SPACE,
        ctx.accounts.tipper.lamports(),
        amount,
        TipJarError::AddressConflict,
    )?;

    let jar_key = ctx.accounts.jar.key();
    let tipper_key = ctx.accounts.tipper.key();
    let slot = ctx.accounts.jar.record_tip(amount)?;

    let bump = ctx.bumps.tip_record;
    let bump_seed = [bump];
    let (session_seed, sequence_seed) = slot.seed_bytes();
    let signer_seeds: &[&[&[u8]]] = &[&[
        TipRecord::SEED_PREFIX,
        jar_key.as_ref(),
        &session_seed,
        &sequence_seed,
        &bump_seed,
    ]];

    create_pda_account(
        &ctx.accounts.tipper.to_account_info(),
        &tip_info,
        &ctx.accounts.system_program.to_account_info(),
        TipRecord::SPACE,
        funding,
        signer_seeds,
    )?;

    // Transfer SOL from tipper into the jar
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.tipper.to_account_info(),
                to: ctx.accounts.jar.to_account_info(),
            },
        ),
        amount,
    )?;

    let clock = Clock::get()?;
    let record = TipRecord::new(jar_key, slot, tipper_key, amount, clock.unix_timestamp, bump);
    write_account(&tip_info, &record)?;

    let jar = &ctx.accounts.jar;
    let slot = record.slot();
    msg!(
        "Tip of {} from {} recorded at session {} seq {}",
        amount,
        tipper_key,
        slot.session_id,
        slot.sequence
    );

    emit!(TipReceived {
        jar: jar_key,
        tip_record: tip_info.key(),
        tipper: tipper_key,
        amount,
        session_id: slot.session_id,
        sequence: slot.sequence,
        total_amount: jar.total_amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(TipReceipt {
        jar: jar.snapshot(),
        tip_record: tip_info.key(),
        slot,
    })
}

#[derive(Accounts)]
pub struct SendTip<'info> {
    /// The user sending the tip; also pays rent for the tip record
    #[account(mut)]
    pub tipper: Signer<'info>,

    /// The jar receiving the tip
    #[account(
        mut,
        seeds = [Jar::SEED_PREFIX, jar.owner.as_ref()],
        bump = jar.bump,
        constraint = jar.is_supported_version() @ TipJarError::UnsupportedVersion,
    )]
    pub jar: Account<'info, Jar>,

    /// Record of this tip, at the jar's next free slot
    /// CHECK: Address is pinned by the seeds; the handler refuses an occupied slot
    #[account(
        mut,
        seeds = [
            TipRecord::SEED_PREFIX,
            jar.key().as_ref(),
            &jar.session_id.to_le_bytes(),
            &jar.tip_count.to_le_bytes()
        ],
        bump,
    )]
    pub tip_record: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}
