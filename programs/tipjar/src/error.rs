use anchor_lang::prelude::*;

#[error_code]
pub enum TipJarError {
    #[msg("A jar already exists for this creator")]
    AlreadyExists,

    #[msg("Tip amount must be greater than zero")]
    InvalidAmount,

    #[msg("Payer cannot cover the amount plus rent for the new account")]
    InsufficientFunds,

    #[msg("Unauthorized - you are not the owner of this jar")]
    Unauthorized,

    #[msg("Tip slot is already occupied - re-read the jar and retry")]
    AddressConflict,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("Tip sequence exhausted for the current session")]
    TipCountOverflow,

    #[msg("Session identifier exhausted")]
    SessionOverflow,

    #[msg("Account layout version is not supported")]
    UnsupportedVersion,
}
