//! Company Authority Validation
//!
//! Every mutating instruction after `CreateCompany` runs the same gate before
//! touching state:
//!
//! ```text
//! 1. company account is an initialized Company owned by this program
//! 2. authority_info.key == company.authority          (else Unauthorized)
//! 3. authority_info.is_signer                         (else InvalidSigner)
//! 4. company address == ["company", authority, bump]  (else AddressMismatch)
//! ```
//!
//! The stored authority is compared before the address is re-derived, so a
//! foreign signer pointed at someone else's company is reported as
//! `Unauthorized` whichever company address it passes.
//!
//! Shareholder records are checked the same way: loaded first, then their
//! address is re-created from the bump stored in the record.

use crate::error::EquityError;
use crate::pda::{create_company_address, create_shareholder_address, COMPANY_SEED};
use crate::state::{Company, Shareholder};
use crate::utils::assertions::{
    assert_address, assert_signer, assert_writable, load_company, load_shareholder,
};
use solana_program::{account_info::AccountInfo, program_error::ProgramError, pubkey::Pubkey};

/// Validate that `authority_info` controls `company_info` and return the
/// loaded company.
///
/// # Arguments
///
/// * `program_id` - Our program's ID (expected owner of the company)
/// * `authority_info` - The account claiming to be the company authority
/// * `company_info` - The company account
///
/// # Returns
///
/// * `Ok(company)` - Authority matches, has signed, and the company sits at
///   its derived address
/// * `Err(NotFound)` - No initialized company in `company_info`
/// * `Err(Unauthorized)` - Signer is not the stored authority
/// * `Err(InvalidSigner)` - Right key but didn't sign
/// * `Err(AddressMismatch)` - Company data at a non-derived address
pub fn authorize_company(
    program_id: &Pubkey,
    authority_info: &AccountInfo,
    company_info: &AccountInfo,
) -> Result<Company, ProgramError> {
    let company = load_company(company_info, program_id)?;

    if company.authority != *authority_info.key {
        return Err(EquityError::Unauthorized.into());
    }
    assert_signer(authority_info)?;

    let expected = create_company_address(authority_info.key, company.bump, program_id)?;
    assert_address(company_info, &expected)?;
    assert_writable(company_info)?;

    Ok(company)
}

/// Load the record registering `shareholder` under `company_info`.
///
/// # Arguments
///
/// * `program_id` - Our program's ID (expected owner of the record)
/// * `company_info` - An already authorized company account
/// * `record_info` - The shareholder record account
/// * `shareholder` - The shareholder wallet named by the instruction
///
/// # Returns
///
/// * `Ok(record)` - Initialized record for (company, shareholder)
/// * `Err(NotFound)` - Nothing registered at `record_info`
/// * `Err(AddressMismatch)` - Record is not at the address re-created from its
///   stored bump, or names another company or owner
pub fn load_registered_shareholder(
    program_id: &Pubkey,
    company_info: &AccountInfo,
    record_info: &AccountInfo,
    shareholder: &Pubkey,
) -> Result<Shareholder, ProgramError> {
    let record = load_shareholder(record_info, program_id)?;

    let expected =
        create_shareholder_address(company_info.key, shareholder, record.bump, program_id)?;
    assert_address(record_info, &expected)?;

    if record.company != *company_info.key || record.owner != *shareholder {
        return Err(EquityError::AddressMismatch.into());
    }
    Ok(record)
}

/// Signer seeds for the company address, which is the share mint authority.
pub fn company_signer_seeds<'a>(authority: &'a Pubkey, bump: &'a [u8; 1]) -> [&'a [u8]; 3] {
    [COMPANY_SEED, authority.as_ref(), bump]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pda::find_company_address;
    use crate::state::Pack;
    use solana_program::clock::Epoch;

    struct Fixture {
        program_id: Pubkey,
        authority: Pubkey,
        company: Pubkey,
        data: Vec<u8>,
        lamports: u64,
        signer_lamports: u64,
        signer_data: Vec<u8>,
        system: Pubkey,
    }

    impl Fixture {
        fn new() -> Self {
            let program_id = Pubkey::new_unique();
            let authority = Pubkey::new_unique();
            let (company, bump) = find_company_address(&authority, &program_id).unwrap();

            let mut data = vec![0u8; Company::LEN];
            Company::new(authority, "Acme".to_string(), *b"ACME\0", 1_000, bump)
                .pack_into_slice(&mut data)
                .unwrap();

            Self {
                program_id,
                authority,
                company,
                data,
                lamports: 1,
                signer_lamports: 1,
                signer_data: vec![],
                system: solana_program::system_program::id(),
            }
        }
    }

    #[test]
    fn test_authorize_company_accepts_recorded_authority() {
        let mut f = Fixture::new();
        let authority = f.authority;
        let company_key = f.company;
        let program_id = f.program_id;

        let authority_info = AccountInfo::new(
            &authority,
            true,
            false,
            &mut f.signer_lamports,
            &mut f.signer_data,
            &f.system,
            false,
            Epoch::default(),
        );
        let company_info = AccountInfo::new(
            &company_key,
            false,
            true,
            &mut f.lamports,
            &mut f.data,
            &program_id,
            false,
            Epoch::default(),
        );

        let company = authorize_company(&program_id, &authority_info, &company_info).unwrap();
        assert_eq!(company.authority, authority);
        assert_eq!(company.name, "Acme");
    }

    #[test]
    fn test_authorize_company_rejects_foreign_signer() {
        let mut f = Fixture::new();
        let intruder = Pubkey::new_unique();
        let company_key = f.company;
        let program_id = f.program_id;

        let intruder_info = AccountInfo::new(
            &intruder,
            true,
            false,
            &mut f.signer_lamports,
            &mut f.signer_data,
            &f.system,
            false,
            Epoch::default(),
        );
        let company_info = AccountInfo::new(
            &company_key,
            false,
            true,
            &mut f.lamports,
            &mut f.data,
            &program_id,
            false,
            Epoch::default(),
        );

        assert_eq!(
            authorize_company(&program_id, &intruder_info, &company_info),
            Err(EquityError::Unauthorized.into())
        );
    }

    #[test]
    fn test_authorize_company_requires_signature() {
        let mut f = Fixture::new();
        let authority = f.authority;
        let company_key = f.company;
        let program_id = f.program_id;

        let authority_info = AccountInfo::new(
            &authority,
            false,
            false,
            &mut f.signer_lamports,
            &mut f.signer_data,
            &f.system,
            false,
            Epoch::default(),
        );
        let company_info = AccountInfo::new(
            &company_key,
            false,
            true,
            &mut f.lamports,
            &mut f.data,
            &program_id,
            false,
            Epoch::default(),
        );

        assert_eq!(
            authorize_company(&program_id, &authority_info, &company_info),
            Err(EquityError::InvalidSigner.into())
        );
    }

    #[test]
    fn test_authorize_company_rejects_copied_record_at_other_address() {
        let mut f = Fixture::new();
        let authority = f.authority;
        let elsewhere = Pubkey::new_unique();
        let program_id = f.program_id;

        let authority_info = AccountInfo::new(
            &authority,
            true,
            false,
            &mut f.signer_lamports,
            &mut f.signer_data,
            &f.system,
            false,
            Epoch::default(),
        );
        let company_info = AccountInfo::new(
            &elsewhere,
            false,
            true,
            &mut f.lamports,
            &mut f.data,
            &program_id,
            false,
            Epoch::default(),
        );

        assert_eq!(
            authorize_company(&program_id, &authority_info, &company_info),
            Err(EquityError::AddressMismatch.into())
        );
    }

    // =========================================================================
    // SHAREHOLDER RECORD TESTS
    // =========================================================================

    fn packed_record(company: &Pubkey, owner: &Pubkey, bump: u8) -> Vec<u8> {
        let mut data = vec![0u8; Shareholder::LEN];
        Shareholder {
            account_type: crate::state::AccountType::Shareholder,
            bump,
            company: *company,
            owner: *owner,
            voting_power: 1_000,
            joined_at: 0,
        }
        .pack_into_slice(&mut data)
        .unwrap();
        data
    }

    fn check_record(
        program_id: &Pubkey,
        company: &Pubkey,
        record_key: &Pubkey,
        shareholder: &Pubkey,
        record_data: &mut [u8],
    ) -> Result<Shareholder, ProgramError> {
        let system = solana_program::system_program::id();
        let mut company_lamports = 1;
        let mut company_data: [u8; 0] = [];
        let mut record_lamports = 1;

        let company_info = AccountInfo::new(
            company,
            false,
            true,
            &mut company_lamports,
            &mut company_data,
            &system,
            false,
            Epoch::default(),
        );
        let record_info = AccountInfo::new(
            record_key,
            false,
            true,
            &mut record_lamports,
            record_data,
            program_id,
            false,
            Epoch::default(),
        );

        load_registered_shareholder(program_id, &company_info, &record_info, shareholder)
    }

    #[test]
    fn test_registered_shareholder_accepted() {
        let f = Fixture::new();
        let owner = Pubkey::new_unique();
        let (record_key, bump) =
            crate::pda::find_shareholder_address(&f.company, &owner, &f.program_id).unwrap();
        let mut data = packed_record(&f.company, &owner, bump);

        let record =
            check_record(&f.program_id, &f.company, &record_key, &owner, &mut data).unwrap();
        assert_eq!(record.owner, owner);
        assert_eq!(record.voting_power, 1_000);
    }

    #[test]
    fn test_shareholder_record_with_wrong_stored_bump_rejected() {
        let f = Fixture::new();
        let owner = Pubkey::new_unique();
        let (record_key, bump) =
            crate::pda::find_shareholder_address(&f.company, &owner, &f.program_id).unwrap();
        let mut data = packed_record(&f.company, &owner, bump.wrapping_sub(1));

        assert_eq!(
            check_record(&f.program_id, &f.company, &record_key, &owner, &mut data),
            Err(EquityError::AddressMismatch.into())
        );
    }

    #[test]
    fn test_shareholder_record_for_other_owner_rejected() {
        let f = Fixture::new();
        let owner = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let (record_key, bump) =
            crate::pda::find_shareholder_address(&f.company, &owner, &f.program_id).unwrap();
        let mut data = packed_record(&f.company, &owner, bump);

        // The record is genuine but registers `owner`, not `other`
        assert_eq!(
            check_record(&f.program_id, &f.company, &record_key, &other, &mut data),
            Err(EquityError::AddressMismatch.into())
        );
    }

    #[test]
    fn test_missing_shareholder_record_is_not_found() {
        let f = Fixture::new();
        let owner = Pubkey::new_unique();
        let (record_key, _) =
            crate::pda::find_shareholder_address(&f.company, &owner, &f.program_id).unwrap();
        let mut data: [u8; 0] = [];

        assert_eq!(
            check_record(&f.program_id, &f.company, &record_key, &owner, &mut data),
            Err(EquityError::NotFound.into())
        );
    }
}
