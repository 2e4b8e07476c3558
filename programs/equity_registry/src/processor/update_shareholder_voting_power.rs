//! UpdateShareholderVotingPower Instruction Processor
//!
//! Replaces a shareholder's voting power and moves the company total by the
//! difference. Zero is allowed and represents divestiture.

use crate::state::Pack;
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
};

/// Process UpdateShareholderVotingPower instruction
///
/// Accounts expected:
/// 0. `[signer]` Company authority
/// 1. `[writable]` Company
/// 2. `[writable]` Shareholder record
pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    shareholder: Pubkey,
    new_voting_power: u64,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    // Account 0: Company authority
    let authority_info = next_account_info(account_info_iter)?;

    // Account 1: Company
    let company_info = next_account_info(account_info_iter)?;

    // Account 2: Shareholder record
    let record_info = next_account_info(account_info_iter)?;

    let mut company = authorize_company(program_id, authority_info, company_info)?;

    let mut record =
        load_registered_shareholder(program_id, company_info, record_info, &shareholder)?;
    assert_writable(record_info)?;

    // total - old + new; either step failing leaves both accounts untouched
    let remaining = checked_sub(company.total_voting_power, record.voting_power)?;
    company.total_voting_power = checked_add(remaining, new_voting_power)?;

    msg!(
        "Voting power of {} changed from {} to {}",
        shareholder,
        record.voting_power,
        new_voting_power
    );
    record.voting_power = new_voting_power;

    record.pack_into_slice(&mut record_info.data.borrow_mut())?;
    company.pack_into_slice(&mut company_info.data.borrow_mut())?;

    Ok(())
}
