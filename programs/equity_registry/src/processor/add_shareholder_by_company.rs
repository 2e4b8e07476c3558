//! AddShareholderByCompany Instruction Processor
//!
//! Registers a shareholder under the authority's company and adds its voting
//! power to the company total.

use crate::error::EquityError;
use crate::pda::{find_shareholder_address, SHAREHOLDER_SEED};
use crate::state::{AccountType, Pack, Shareholder};
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::Clock,
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
    sysvar::Sysvar,
};

/// Process AddShareholderByCompany instruction
///
/// Accounts expected:
/// 0. `[signer]` Company authority
/// 1. `[writable]` Company
/// 2. `[writable]` Shareholder record (derived from company + shareholder)
/// 3. `[signer]` Shareholder wallet
/// 4. `[writable, signer]` Payer
/// 5. `[]` System program
pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    shareholder: Pubkey,
    voting_power: u64,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    // Account 0: Company authority
    let authority_info = next_account_info(account_info_iter)?;

    // Account 1: Company
    let company_info = next_account_info(account_info_iter)?;

    // Account 2: Shareholder record (created here)
    let record_info = next_account_info(account_info_iter)?;

    // Account 3: Shareholder wallet
    let shareholder_info = next_account_info(account_info_iter)?;

    // Account 4: Payer
    let payer_info = next_account_info(account_info_iter)?;

    // Account 5: System program
    let system_program_info = next_account_info(account_info_iter)?;

    let mut company = authorize_company(program_id, authority_info, company_info)?;

    // The named shareholder must be the wallet that co-signed
    assert_address(shareholder_info, &shareholder)?;
    assert_signer(shareholder_info)?;
    assert_signer(payer_info)?;
    assert_system_program(system_program_info)?;

    let (record_key, bump) = find_shareholder_address(company_info.key, &shareholder, program_id)?;
    assert_address(record_info, &record_key)?;
    assert_writable(record_info)?;
    assert_uninitialized(record_info, EquityError::DuplicateShareholder)?;

    // All counters are computed before anything is written
    company.total_voting_power = checked_add(company.total_voting_power, voting_power)?;
    company.shareholder_count = checked_add(company.shareholder_count, 1)?;

    create_pda_account(
        payer_info,
        record_info,
        system_program_info,
        Shareholder::LEN,
        program_id,
        &[
            SHAREHOLDER_SEED,
            company_info.key.as_ref(),
            shareholder.as_ref(),
            &[bump],
        ],
    )?;

    let record = Shareholder {
        account_type: AccountType::Shareholder,
        bump,
        company: *company_info.key,
        owner: shareholder,
        voting_power,
        joined_at: Clock::get()?.unix_timestamp,
    };
    record.pack_into_slice(&mut record_info.data.borrow_mut())?;
    company.pack_into_slice(&mut company_info.data.borrow_mut())?;

    msg!(
        "Shareholder {} added with voting power {} (company total {})",
        shareholder,
        voting_power,
        company.total_voting_power
    );

    Ok(())
}
