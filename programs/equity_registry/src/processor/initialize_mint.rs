//! InitializeMint Instruction Processor
//!
//! Creates the company share mint at `["token-2022-token", authority, name]`
//! through the token program. The company address becomes mint and freeze
//! authority, so supply can only grow through `MintToShareholder`.

use crate::error::EquityError;
use crate::pda::{find_mint_address, MINT_SEED};
use crate::state::{COption, Pack};
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
};

/// Process InitializeMint instruction
///
/// Accounts expected:
/// 0. `[signer]` Company authority
/// 1. `[writable]` Company
/// 2. `[writable]` Mint (derived from authority + name)
/// 3. `[writable, signer]` Payer
/// 4. `[]` System program
/// 5. `[]` Token program
pub fn process(program_id: &Pubkey, accounts: &[AccountInfo], name: String) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    // Account 0: Company authority
    let authority_info = next_account_info(account_info_iter)?;

    // Account 1: Company (becomes mint authority)
    let company_info = next_account_info(account_info_iter)?;

    // Account 2: Mint (created here)
    let mint_info = next_account_info(account_info_iter)?;

    // Account 3: Payer
    let payer_info = next_account_info(account_info_iter)?;

    // Account 4: System program
    let system_program_info = next_account_info(account_info_iter)?;

    // Account 5: Token program
    let token_program_info = next_account_info(account_info_iter)?;

    let mut company = authorize_company(program_id, authority_info, company_info)?;

    assert_signer(payer_info)?;
    assert_system_program(system_program_info)?;
    assert_token_program(token_program_info)?;

    let (mint_key, bump) = find_mint_address(authority_info.key, &name, program_id)?;
    assert_address(mint_info, &mint_key)?;
    assert_writable(mint_info)?;

    if company.mint.is_some() {
        return Err(EquityError::AlreadyExists.into());
    }
    assert_uninitialized(mint_info, EquityError::AlreadyExists)?;

    create_mint(
        payer_info,
        mint_info,
        system_program_info,
        token_program_info,
        company_info.key,
        &[
            MINT_SEED,
            authority_info.key.as_ref(),
            name.as_bytes(),
            &[bump],
        ],
    )?;

    company.mint = COption::some(mint_key);
    company.pack_into_slice(&mut company_info.data.borrow_mut())?;

    msg!("Share mint {} initialized for company {}", mint_key, company_info.key);

    Ok(())
}
