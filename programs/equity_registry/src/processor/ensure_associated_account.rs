//! EnsureAssociatedAccount Instruction Processor
//!
//! Creates the canonical (owner, mint) token account when it does not exist
//! yet and hands its address back through return data.

use crate::pda::find_associated_token_address;
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    program::set_return_data,
    program_error::ProgramError,
    pubkey::Pubkey,
};

/// Process EnsureAssociatedAccount instruction
///
/// Accounts expected:
/// 0. `[writable, signer]` Payer
/// 1. `[]` Owner
/// 2. `[]` Mint
/// 3. `[writable]` Associated token account
/// 4. `[]` System program
/// 5. `[]` Token program
/// 6. `[]` Associated token account program
pub fn process(_program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    // Account 0: Payer
    let payer_info = next_account_info(account_info_iter)?;

    // Account 1: Owner
    let owner_info = next_account_info(account_info_iter)?;

    // Account 2: Mint
    let mint_info = next_account_info(account_info_iter)?;

    // Account 3: Associated token account
    let associated_info = next_account_info(account_info_iter)?;

    // Accounts 4-6: System, token and ATA programs
    let system_program_info = next_account_info(account_info_iter)?;
    let token_program_info = next_account_info(account_info_iter)?;
    let associated_program_info = next_account_info(account_info_iter)?;

    let address = ensure(
        payer_info,
        owner_info,
        mint_info,
        associated_info,
        system_program_info,
        token_program_info,
        associated_program_info,
    )?;

    set_return_data(address.as_ref());

    Ok(())
}

/// Derive, validate and if needed create the associated token account.
///
/// Shared with `MintToShareholder`, which creates the shareholder's account
/// on first mint.
///
/// # Returns
///
/// * `Ok(address)` - The canonical (owner, mint) token account, now existing
/// * `Err(InvalidProgramId)` - A program account is not the expected program
/// * `Err(InvalidAccountOwner)` - Mint or existing account not owned by the
///   token program
/// * `Err(AddressMismatch)` - `associated_info` is not the canonical address
pub(crate) fn ensure<'a>(
    payer_info: &AccountInfo<'a>,
    owner_info: &AccountInfo<'a>,
    mint_info: &AccountInfo<'a>,
    associated_info: &AccountInfo<'a>,
    system_program_info: &AccountInfo<'a>,
    token_program_info: &AccountInfo<'a>,
    associated_program_info: &AccountInfo<'a>,
) -> Result<Pubkey, ProgramError> {
    assert_system_program(system_program_info)?;
    assert_token_program(token_program_info)?;
    assert_associated_token_program(associated_program_info)?;
    assert_owned_by(mint_info, token_program_info.key)?;

    let expected =
        find_associated_token_address(owner_info.key, mint_info.key, token_program_info.key);
    assert_address(associated_info, &expected)?;

    if associated_info.data_is_empty() {
        assert_signer(payer_info)?;
        assert_writable(associated_info)?;
        create_associated_token_account(
            payer_info,
            associated_info,
            owner_info,
            mint_info,
            system_program_info,
            token_program_info,
            associated_program_info,
        )?;
    } else {
        assert_owned_by(associated_info, token_program_info.key)?;
    }

    Ok(expected)
}
