use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::error::TipJarError;

/// True when nothing has ever been written at `account`.
///
/// A slot that only holds lamports (someone sent dust to the address) still
/// counts as vacant.
pub fn is_vacant(account: &AccountInfo) -> bool {
    account.data_is_empty() && account.owner == &system_program::ID
}

/// Lamports still missing for `space` bytes to be rent-exempt
pub fn rent_shortfall(rent: &Rent, space: usize, current_lamports: u64) -> u64 {
    rent.minimum_balance(space).saturating_sub(current_lamports)
}

/// Rejects the operation unless `available` covers `amount` plus `rent_due`.
///
/// The payer must end up either empty or rent-exempt itself; anything in
/// between would be refused by the runtime after the fact.
pub fn ensure_can_fund(rent: &Rent, available: u64, amount: u64, rent_due: u64) -> Result<()> {
    let required = amount
        .checked_add(rent_due)
        .ok_or(TipJarError::ArithmeticOverflow)?;
    require!(available >= required, TipJarError::InsufficientFunds);

    let remaining = available - required;
    require!(
        remaining == 0 || remaining >= rent.minimum_balance(0),
        TipJarError::InsufficientFunds
    );
    Ok(())
}

/// How a vacant slot becomes a program account
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotFunding {
    /// Nothing at the address yet
    Create { lamports: u64 },
    /// Lamports already sit at the address; only the shortfall is paid
    Adopt { top_up: u64 },
}

impl SlotFunding {
    /// Lamports the payer moves into the slot
    pub fn payer_cost(&self) -> u64 {
        match *self {
            SlotFunding::Create { lamports } => lamports,
            SlotFunding::Adopt { top_up } => top_up,
        }
    }
}

/// Claims `slot` for a new account of `space` bytes.
///
/// Fails with `occupied` unless the slot is vacant, and with
/// `InsufficientFunds` unless `payer_lamports` covers `amount` plus whatever
/// rent the slot's current balance does not already cover.
pub fn prepare_slot(
    slot: &AccountInfo,
    rent: &Rent,
    space: usize,
    payer_lamports: u64,
    amount: u64,
    occupied: TipJarError,
) -> Result<SlotFunding> {
    if !is_vacant(slot) {
        return Err(occupied.into());
    }

    let current = slot.lamports();
    let rent_due = rent_shortfall(rent, space, current);
    ensure_can_fund(rent, payer_lamports, amount, rent_due)?;

    Ok(if current == 0 {
        SlotFunding::Create { lamports: rent_due }
    } else {
        SlotFunding::Adopt { top_up: rent_due }
    })
}

/// Lamports above the rent-exempt reserve
pub fn withdrawable(balance: u64, reserve: u64) -> u64 {
    balance.saturating_sub(reserve)
}

/// Creates a program-owned PDA of `space` bytes, paid by `payer`, following
/// the plan from `prepare_slot`.
///
/// An adopted slot cannot go through `create_account`: top up, allocate,
/// then assign.
pub fn create_pda_account<'info>(
    payer: &AccountInfo<'info>,
    target: &AccountInfo<'info>,
    system: &AccountInfo<'info>,
    space: usize,
    funding: SlotFunding,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let top_up = match funding {
        SlotFunding::Create { lamports } => {
            system_program::create_account(
                CpiContext::new_with_signer(
                    system.clone(),
                    system_program::CreateAccount {
                        from: payer.clone(),
                        to: target.clone(),
                    },
                    signer_seeds,
                ),
                lamports,
                space as u64,
                &crate::ID,
            )?;
            return Ok(());
        }
        SlotFunding::Adopt { top_up } => top_up,
    };

    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                system.clone(),
                system_program::Transfer {
                    from: payer.clone(),
                    to: target.clone(),
                },
            ),
            top_up,
        )?;
    }

    system_program::allocate(
        CpiContext::new_with_signer(
            system.clone(),
            system_program::Allocate {
                account_to_allocate: target.clone(),
            },
            signer_seeds,
        ),
        space as u64,
    )?;

    system_program::assign(
        CpiContext::new_with_signer(
            system.clone(),
            system_program::Assign {
                account_to_assign: target.clone(),
            },
            signer_seeds,
        ),
        &crate::ID,
    )?;

    Ok(())
}

/// Writes `value` (discriminator included) into a freshly created account
pub fn write_account<T: AccountSerialize>(target: &AccountInfo, value: &T) -> Result<()> {
    let mut data = target.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    value.try_serialize(&mut writer)
}
