//! MintToShareholder Instruction Processor
//!
//! Mints company shares into a registered shareholder's associated token
//! account. The program only requires a valid, authorized shareholder record
//! and room under the authorized supply; how many tokens a given voting power
//! entitles a holder to is decided by the caller through `amount`.

use crate::error::EquityError;
use crate::processor::ensure_associated_account;
use crate::state::Pack;
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
};

/// Process MintToShareholder instruction
///
/// Accounts expected:
/// 0. `[signer]` Company authority
/// 1. `[writable]` Company (mint authority)
/// 2. `[]` Shareholder record
/// 3. `[]` Shareholder wallet
/// 4. `[writable]` Company share mint
/// 5. `[writable]` Shareholder associated token account
/// 6. `[writable, signer]` Payer
/// 7. `[]` System program
/// 8. `[]` Token program
/// 9. `[]` Associated token account program
pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    shareholder: Pubkey,
    amount: u64,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    // Account 0: Company authority
    let authority_info = next_account_info(account_info_iter)?;

    // Account 1: Company
    let company_info = next_account_info(account_info_iter)?;

    // Account 2: Shareholder record
    let record_info = next_account_info(account_info_iter)?;

    // Account 3: Shareholder wallet (owner of the destination)
    let shareholder_info = next_account_info(account_info_iter)?;

    // Account 4: Mint
    let mint_info = next_account_info(account_info_iter)?;

    // Account 5: Destination associated token account
    let associated_info = next_account_info(account_info_iter)?;

    // Account 6: Payer
    let payer_info = next_account_info(account_info_iter)?;

    // Accounts 7-9: System, token and ATA programs
    let system_program_info = next_account_info(account_info_iter)?;
    let token_program_info = next_account_info(account_info_iter)?;
    let associated_program_info = next_account_info(account_info_iter)?;

    let mut company = authorize_company(program_id, authority_info, company_info)?;

    // Shareholder must be registered under this company
    assert_address(shareholder_info, &shareholder)?;
    load_registered_shareholder(program_id, company_info, record_info, &shareholder)?;

    let mint_key = *company.mint.as_ref().ok_or(EquityError::NotFound)?;
    assert_address(mint_info, &mint_key)?;
    assert_writable(mint_info)?;

    company.issued_supply = company.supply_after_issue(amount)?;

    let destination = ensure_associated_account::ensure(
        payer_info,
        shareholder_info,
        mint_info,
        associated_info,
        system_program_info,
        token_program_info,
        associated_program_info,
    )?;
    assert_writable(associated_info)?;

    let bump = [company.bump];
    mint_to(
        token_program_info,
        mint_info,
        associated_info,
        company_info,
        amount,
        &company_signer_seeds(authority_info.key, &bump),
    )?;

    company.pack_into_slice(&mut company_info.data.borrow_mut())?;

    msg!(
        "Minted {} to {} (issued {} of {} authorized)",
        amount,
        destination,
        company.issued_supply,
        company.authorized_supply
    );

    Ok(())
}
