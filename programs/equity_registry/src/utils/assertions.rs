//! Assertion Helper Functions
//!
//! Common validation checks used across all processors.
//!
//! # Usage Pattern
//!
//! ```ignore
//! pub fn process(...) -> ProgramResult {
//!     // Validate everything first
//!     assert_signer(authority_info)?;
//!     assert_writable(company_info)?;
//!     assert_address(company_info, &expected_company)?;
//!
//!     // Then do the actual work
//!     ...
//! }
//! ```

use crate::error::EquityError;
use crate::state::{Company, Pack, Shareholder};
use num_traits::{CheckedAdd, CheckedSub};
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

// =============================================================================
// OWNERSHIP CHECKS
// =============================================================================

/// Assert that an account is owned by the expected program.
///
/// An attacker could create an account with company-shaped data under their
/// own program; only accounts we own are trusted.
pub fn assert_owned_by(account: &AccountInfo, owner: &Pubkey) -> ProgramResult {
    if account.owner != owner {
        Err(EquityError::InvalidAccountOwner.into())
    } else {
        Ok(())
    }
}

// =============================================================================
// SIGNER / WRITABLE CHECKS
// =============================================================================

/// Assert that an account is a signer of the transaction.
pub fn assert_signer(account: &AccountInfo) -> ProgramResult {
    if !account.is_signer {
        Err(EquityError::InvalidSigner.into())
    } else {
        Ok(())
    }
}

/// Assert that an account is writable.
pub fn assert_writable(account: &AccountInfo) -> ProgramResult {
    if !account.is_writable {
        Err(ProgramError::InvalidAccountData)
    } else {
        Ok(())
    }
}

// =============================================================================
// ADDRESS CHECKS
// =============================================================================

/// Assert that an account sits at the address derived for it.
///
/// A mismatch is fatal: the instruction never falls back to another address.
pub fn assert_address(account: &AccountInfo, expected: &Pubkey) -> ProgramResult {
    if account.key != expected {
        Err(EquityError::AddressMismatch.into())
    } else {
        Ok(())
    }
}

/// Assert that nothing has been created at this address yet.
///
/// "Has this been created" is answered by whether data already exists at the
/// deterministic address. Lamports alone do not count: anyone can transfer
/// lamports to an address before it is created.
pub fn assert_uninitialized(account: &AccountInfo, error: EquityError) -> ProgramResult {
    if !account.data_is_empty() || account.owner != &system_program::id() {
        Err(error.into())
    } else {
        Ok(())
    }
}

// =============================================================================
// SIZE CHECKS
// =============================================================================

/// Assert that an account has the expected data length.
pub fn assert_data_length(account: &AccountInfo, expected: usize) -> ProgramResult {
    if account.data_len() != expected {
        Err(EquityError::InvalidAccountDataLength.into())
    } else {
        Ok(())
    }
}

// =============================================================================
// PROGRAM ID CHECKS
// =============================================================================

pub fn assert_system_program(account: &AccountInfo) -> ProgramResult {
    if !system_program::check_id(account.key) {
        Err(EquityError::InvalidProgramId.into())
    } else {
        Ok(())
    }
}

/// Accepts Token-2022 and the classic SPL Token program.
pub fn assert_token_program(account: &AccountInfo) -> ProgramResult {
    spl_token_2022::check_spl_token_program_account(account.key)
        .map_err(|_| EquityError::InvalidProgramId.into())
}

pub fn assert_associated_token_program(account: &AccountInfo) -> ProgramResult {
    if !spl_associated_token_account::check_id(account.key) {
        Err(EquityError::InvalidProgramId.into())
    } else {
        Ok(())
    }
}

// =============================================================================
// STATE LOADING
// =============================================================================

/// Load an initialized company owned by this program.
///
/// An empty or zeroed account is `NotFound`; data of the wrong shape is
/// rejected before any field is trusted.
pub fn load_company(account: &AccountInfo, program_id: &Pubkey) -> Result<Company, ProgramError> {
    if account.data_is_empty() {
        return Err(EquityError::NotFound.into());
    }
    assert_owned_by(account, program_id)?;
    assert_data_length(account, Company::LEN)?;

    let company = Company::unpack_from_slice(&account.data.borrow())?;
    if !company.is_initialized() {
        return Err(EquityError::NotFound.into());
    }
    Ok(company)
}

/// Load an initialized shareholder record owned by this program.
pub fn load_shareholder(
    account: &AccountInfo,
    program_id: &Pubkey,
) -> Result<Shareholder, ProgramError> {
    if account.data_is_empty() {
        return Err(EquityError::NotFound.into());
    }
    assert_owned_by(account, program_id)?;
    assert_data_length(account, Shareholder::LEN)?;

    let shareholder = Shareholder::unpack_from_slice(&account.data.borrow())?;
    if !shareholder.is_initialized() {
        return Err(EquityError::NotFound.into());
    }
    Ok(shareholder)
}

// =============================================================================
// CHECKED ARITHMETIC
// =============================================================================

/// Checked addition for any counter type; overflow is an error, never a wrap.
///
/// ```ignore
/// company.total_voting_power = checked_add(company.total_voting_power, voting_power)?;
/// ```
pub fn checked_add<T: CheckedAdd>(a: T, b: T) -> Result<T, ProgramError> {
    a.checked_add(&b)
        .ok_or_else(|| EquityError::ArithmeticOverflow.into())
}

/// Checked subtraction; underflow is reported as `ArithmeticOverflow`.
pub fn checked_sub<T: CheckedSub>(a: T, b: T) -> Result<T, ProgramError> {
    a.checked_sub(&b)
        .ok_or_else(|| EquityError::ArithmeticOverflow.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_program::clock::Epoch;

    fn account<'a>(
        key: &'a Pubkey,
        owner: &'a Pubkey,
        lamports: &'a mut u64,
        data: &'a mut [u8],
        is_signer: bool,
        is_writable: bool,
    ) -> AccountInfo<'a> {
        AccountInfo::new(
            key,
            is_signer,
            is_writable,
            lamports,
            data,
            owner,
            false,
            Epoch::default(),
        )
    }

    #[test]
    fn test_checked_add_success() {
        assert_eq!(checked_add(100u64, 200).unwrap(), 300);
        assert_eq!(checked_add(u64::MAX - 1, 1).unwrap(), u64::MAX);
    }

    #[test]
    fn test_checked_add_overflow() {
        assert_eq!(
            checked_add(u64::MAX, 1),
            Err(EquityError::ArithmeticOverflow.into())
        );
        assert!(checked_add(u64::MAX, u64::MAX).is_err());
    }

    #[test]
    fn test_checked_sub() {
        assert_eq!(checked_sub(300u64, 200).unwrap(), 100);
        assert_eq!(
            checked_sub(0u64, 1),
            Err(EquityError::ArithmeticOverflow.into())
        );
    }

    #[test]
    fn test_assert_address() {
        let key = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data: [u8; 0] = [];
        let info = account(&key, &owner, &mut lamports, &mut data, false, false);

        assert!(assert_address(&info, &key).is_ok());
        assert_eq!(
            assert_address(&info, &Pubkey::new_unique()),
            Err(EquityError::AddressMismatch.into())
        );
    }

    #[test]
    fn test_assert_signer() {
        let key = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data: [u8; 0] = [];
        let info = account(&key, &owner, &mut lamports, &mut data, false, true);

        assert_eq!(assert_signer(&info), Err(EquityError::InvalidSigner.into()));
    }

    #[test]
    fn test_prefunded_system_account_counts_as_uninitialized() {
        let key = Pubkey::new_unique();
        let owner = system_program::id();
        let mut lamports = 1_000_000;
        let mut data: [u8; 0] = [];
        let info = account(&key, &owner, &mut lamports, &mut data, false, true);

        assert!(assert_uninitialized(&info, EquityError::AlreadyExists).is_ok());
    }

    #[test]
    fn test_account_with_data_is_not_uninitialized() {
        let key = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut lamports = 1_000_000;
        let mut data = [0u8; Shareholder::LEN];
        let info = account(&key, &owner, &mut lamports, &mut data, false, true);

        assert_eq!(
            assert_uninitialized(&info, EquityError::DuplicateShareholder),
            Err(EquityError::DuplicateShareholder.into())
        );
    }

    #[test]
    fn test_load_company_rejects_missing_and_foreign() {
        let key = Pubkey::new_unique();
        let program_id = Pubkey::new_unique();

        let mut lamports = 0;
        let mut empty: [u8; 0] = [];
        let info = account(&key, &program_id, &mut lamports, &mut empty, false, true);
        assert_eq!(load_company(&info, &program_id), Err(EquityError::NotFound.into()));

        let attacker = Pubkey::new_unique();
        let mut lamports = 1;
        let mut data = [0u8; Company::LEN];
        data[0] = 1;
        let info = account(&key, &attacker, &mut lamports, &mut data, false, true);
        assert_eq!(
            load_company(&info, &program_id),
            Err(EquityError::InvalidAccountOwner.into())
        );
    }

    #[test]
    fn test_load_company_zeroed_is_not_found() {
        let key = Pubkey::new_unique();
        let program_id = Pubkey::new_unique();
        let mut lamports = 1;
        let mut data = [0u8; Company::LEN];
        let info = account(&key, &program_id, &mut lamports, &mut data, false, true);

        assert_eq!(load_company(&info, &program_id), Err(EquityError::NotFound.into()));
    }

    #[test]
    fn test_program_id_checks() {
        let owner = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data: [u8; 0] = [];

        let token_2022 = spl_token_2022::id();
        let info = account(&token_2022, &owner, &mut lamports, &mut data, false, false);
        assert!(assert_token_program(&info).is_ok());
        assert_eq!(
            assert_associated_token_program(&info),
            Err(EquityError::InvalidProgramId.into())
        );
        assert_eq!(
            assert_system_program(&info),
            Err(EquityError::InvalidProgramId.into())
        );
    }
}
