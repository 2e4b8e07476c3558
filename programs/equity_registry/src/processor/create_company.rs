//! CreateCompany Instruction Processor
//!
//! Creates the company record at `["company", authority]` with its share class
//! terms: ticker symbol and authorized supply.

use crate::error::EquityError;
use crate::pda::{find_company_address, validate_name, COMPANY_SEED};
use crate::state::company::{validate_symbol, SYMBOL_LEN};
use crate::state::{Company, Pack};
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
};

/// Process CreateCompany instruction
///
/// Accounts expected:
/// 0. `[signer]` Authority
/// 1. `[writable]` Company (derived from authority)
/// 2. `[writable, signer]` Payer
/// 3. `[]` System program
pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    name: String,
    symbol: [u8; SYMBOL_LEN],
    authorized_supply: u64,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    // Account 0: Authority
    let authority_info = next_account_info(account_info_iter)?;

    // Account 1: Company
    let company_info = next_account_info(account_info_iter)?;

    // Account 2: Payer
    let payer_info = next_account_info(account_info_iter)?;

    // Account 3: System program
    let system_program_info = next_account_info(account_info_iter)?;

    assert_signer(authority_info)?;
    assert_signer(payer_info)?;
    assert_writable(company_info)?;
    assert_system_program(system_program_info)?;
    validate_name(&name)?;
    validate_symbol(&symbol)?;

    let (company_key, bump) = find_company_address(authority_info.key, program_id)?;
    assert_address(company_info, &company_key)?;

    // An existing company is left exactly as it was
    assert_uninitialized(company_info, EquityError::AlreadyExists)?;

    create_pda_account(
        payer_info,
        company_info,
        system_program_info,
        Company::LEN,
        program_id,
        &[COMPANY_SEED, authority_info.key.as_ref(), &[bump]],
    )?;

    let company = Company::new(*authority_info.key, name, symbol, authorized_supply, bump);
    company.pack_into_slice(&mut company_info.data.borrow_mut())?;

    msg!(
        "Company {} ({}) created for {}, authorized supply {}",
        company_key,
        company.symbol_str(),
        authority_info.key,
        authorized_supply
    );

    Ok(())
}
