//! Account State Structures
//!
//! Data stored in accounts owned by this program.
//!
//! # Account Types
//!
//! | Type | Size | Discriminator |
//! |------|------|---------------|
//! | Company | 140 bytes | 1 |
//! | Shareholder | 82 bytes | 2 |
//!
//! # Serialization
//!
//! Fixed-size, deterministic layouts:
//! - Little-endian integers
//! - No padding between fields
//! - First byte is the account discriminator, checked on every load
//!
//! ```ignore
//! let company = Company::unpack_from_slice(&company_info.data.borrow())?;  // Read
//! company.pack_into_slice(&mut company_info.data.borrow_mut())?;           // Write
//! ```

// =============================================================================
// SUBMODULES
// =============================================================================

pub mod company;
pub mod shareholder;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use company::Company;
pub use shareholder::Shareholder;

use crate::error::EquityError;
use arrayref::{array_refs, mut_array_refs};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

// =============================================================================
// ACCOUNT DISCRIMINATOR
// =============================================================================

/// First byte of every account this program owns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccountType {
    /// Freshly allocated, all zeros.
    #[default]
    Uninitialized,
    Company,
    Shareholder,
}

impl AccountType {
    pub fn from_u8(value: u8) -> Result<Self, ProgramError> {
        match value {
            0 => Ok(AccountType::Uninitialized),
            1 => Ok(AccountType::Company),
            2 => Ok(AccountType::Shareholder),
            _ => Err(EquityError::InvalidAccountType.into()),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            AccountType::Uninitialized => 0,
            AccountType::Company => 1,
            AccountType::Shareholder => 2,
        }
    }
}

// =============================================================================
// PACK TRAIT
// =============================================================================

/// Packing and unpacking of account state to and from bytes.
///
/// Layouts are exact byte counts, so account size and rent are known before
/// the account is created and never change afterwards.
pub trait Pack: Sized {
    /// The fixed size in bytes when serialized.
    const LEN: usize;

    /// Deserialize from a byte slice of at least `LEN` bytes.
    ///
    /// # Panics
    /// May panic if input.len() < Self::LEN (use unpack_from_slice instead)
    fn unpack(input: &[u8]) -> Result<Self, ProgramError>;

    /// Serialize into a byte slice of at least `LEN` bytes.
    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError>;

    /// Unpack with length validation.
    fn unpack_from_slice(src: &[u8]) -> Result<Self, ProgramError> {
        if src.len() != Self::LEN {
            return Err(EquityError::InvalidAccountDataLength.into());
        }
        Self::unpack(src)
    }

    /// Pack with length validation.
    fn pack_into_slice(&self, dst: &mut [u8]) -> Result<(), ProgramError> {
        if dst.len() != Self::LEN {
            return Err(EquityError::InvalidAccountDataLength.into());
        }
        self.pack(dst)
    }
}

// =============================================================================
// COPTION - COMPACT OPTIONAL TYPE
// =============================================================================

/// A fixed-layout optional value for on-chain storage.
///
/// ```text
/// COption<Pubkey>: 36 bytes
/// [tag: 4 bytes, little-endian u32][value: 32 bytes]
///
/// Tag = 0: None (value bytes are zeros)
/// Tag = 1: Some (value bytes contain the Pubkey)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct COption<T> {
    value: Option<T>,
}

impl<T> COption<T> {
    pub fn some(value: T) -> Self {
        Self { value: Some(value) }
    }

    pub fn none() -> Self {
        Self { value: None }
    }

    pub fn is_some(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_none(&self) -> bool {
        self.value.is_none()
    }

    pub fn as_ref(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

/// Unpack a `COption<Pubkey>` from its 36-byte layout.
pub(crate) fn unpack_coption_pubkey(src: &[u8; 36]) -> Result<COption<Pubkey>, ProgramError> {
    let (tag, body) = array_refs![src, 4, 32];
    match u32::from_le_bytes(*tag) {
        0 => Ok(COption::none()),
        1 => Ok(COption::some(Pubkey::new_from_array(*body))),
        _ => Err(ProgramError::InvalidAccountData),
    }
}

/// Pack a `COption<Pubkey>` into its 36-byte layout.
pub(crate) fn pack_coption_pubkey(src: &COption<Pubkey>, dst: &mut [u8; 36]) {
    let (tag, body) = mut_array_refs![dst, 4, 32];
    match src.as_ref() {
        Some(pubkey) => {
            *tag = 1u32.to_le_bytes();
            body.copy_from_slice(pubkey.as_ref());
        }
        None => {
            *tag = 0u32.to_le_bytes();
            body.fill(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_bytes() {
        assert_eq!(AccountType::from_u8(0).unwrap(), AccountType::Uninitialized);
        assert_eq!(AccountType::from_u8(1).unwrap(), AccountType::Company);
        assert_eq!(AccountType::from_u8(2).unwrap(), AccountType::Shareholder);
        assert_eq!(
            AccountType::from_u8(3),
            Err(EquityError::InvalidAccountType.into())
        );
        assert_eq!(AccountType::Shareholder.to_u8(), 2);
    }

    #[test]
    fn test_coption_pubkey_layout() {
        let key = Pubkey::new_unique();
        let mut bytes = [0xffu8; 36];

        pack_coption_pubkey(&COption::some(key), &mut bytes);
        assert_eq!(&bytes[..4], &[1, 0, 0, 0]);
        assert_eq!(unpack_coption_pubkey(&bytes).unwrap(), COption::some(key));

        pack_coption_pubkey(&COption::none(), &mut bytes);
        assert_eq!(bytes, [0u8; 36]);
        assert!(unpack_coption_pubkey(&bytes).unwrap().is_none());
    }

    #[test]
    fn test_coption_invalid_tag() {
        let mut bytes = [0u8; 36];
        bytes[0] = 2;
        assert!(unpack_coption_pubkey(&bytes).is_err());
    }
}
