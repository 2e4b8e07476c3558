//! Custom Error Types
//!
//! This module defines all errors that the equity registry can return.
//! Each error has a unique numeric code that clients can match against.
//!
//! # Error Code Ranges
//!
//! | Range | Category |
//! |-------|----------|
//! | 0-6 | Registry errors (address, authority, existence, math, CPI) |
//! | 7-9 | Input errors (signatures, instruction data, names) |
//! | 10-14 | Account validation errors |
//! | 15-16 | Share class errors (symbol, authorized supply) |
//!
//! # Usage
//!
//! ```ignore
//! use crate::error::EquityError;
//!
//! if company.authority != *authority_info.key {
//!     return Err(EquityError::Unauthorized.into());
//! }
//! ```

use solana_program::program_error::ProgramError;
use thiserror::Error;

// =============================================================================
// ERROR ENUM
// =============================================================================

/// Errors that may be returned by the equity registry.
///
/// The numeric code is the variant's position. Never reorder variants after
/// deployment; append new ones at the end.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum EquityError {
    // =========================================================================
    // REGISTRY ERRORS (0-6)
    // =========================================================================

    /// Error 0: A supplied account is not at the address derived from its seeds.
    ///
    /// Every company, shareholder, mint and associated token account is
    /// re-derived on chain. A client passing any other address is rejected
    /// outright, never silently redirected.
    #[error("Account address does not match its derived address")]
    AddressMismatch,

    /// Error 1: The signer is not the company's recorded authority.
    #[error("Signer is not the company authority")]
    Unauthorized,

    /// Error 2: A create instruction targeted an address that already holds data.
    #[error("Account already exists")]
    AlreadyExists,

    /// Error 3: The (company, owner) pair is already registered.
    #[error("Shareholder already registered for this company")]
    DuplicateShareholder,

    /// Error 4: A counter would overflow (or underflow).
    ///
    /// Voting power and issued supply are u64 and are never wrapped.
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    /// Error 5: The account expected to hold a record is uninitialized.
    #[error("Account not found")]
    NotFound,

    /// Error 6: The system, token or associated token program rejected a call.
    #[error("External program call failed")]
    ExternalProgramFailure,

    // =========================================================================
    // INPUT ERRORS (7-9)
    // =========================================================================

    /// Error 7: An account that must sign did not.
    #[error("Required signer did not sign")]
    InvalidSigner,

    /// Error 8: Could not parse the instruction data.
    #[error("Invalid instruction")]
    InvalidInstruction,

    /// Error 9: Name is empty, longer than 32 bytes, or not UTF-8.
    ///
    /// Names double as derivation seeds, and a single seed is capped at
    /// 32 bytes by the runtime.
    #[error("Invalid name")]
    InvalidName,

    // =========================================================================
    // ACCOUNT VALIDATION ERRORS (10-14)
    // =========================================================================

    /// Error 10: Account is not owned by the expected program.
    #[error("Account has the wrong owner")]
    InvalidAccountOwner,

    /// Error 11: Account data has the wrong length for its layout.
    #[error("Invalid account data length")]
    InvalidAccountDataLength,

    /// Error 12: The account's discriminator byte names a different record type.
    #[error("Invalid account type")]
    InvalidAccountType,

    /// Error 13: The system, token or associated token program account is wrong.
    #[error("Invalid program id")]
    InvalidProgramId,

    /// Error 14: No bump seed produced an off-curve address for these seeds.
    #[error("No viable bump seed for derived address")]
    NoViableBump,

    // =========================================================================
    // SHARE CLASS ERRORS (15-16)
    // =========================================================================

    /// Error 15: Ticker symbol is not 1 to 5 uppercase ASCII letters or digits.
    #[error("Invalid symbol")]
    InvalidSymbol,

    /// Error 16: Minting would push issued supply past the authorized supply.
    #[error("Mint would exceed the authorized supply")]
    AuthorizedSupplyExceeded,
}

// =============================================================================
// CONVERSION TO PROGRAMERROR
// =============================================================================

/// Convert EquityError to ProgramError.
///
/// The error code is the enum variant's position (0-indexed), so
/// `EquityError::Unauthorized` surfaces to clients as `Custom(1)`.
impl From<EquityError> for ProgramError {
    fn from(e: EquityError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
