//! Cross-Program Invocation Helpers
//!
//! Every call into another program is built as a complete instruction (target
//! program, account metas, data) and handed to the runtime. The result is
//! treated as an opaque success or failure; a rejected call is logged and
//! surfaced as `ExternalProgramFailure`.
//!
//! | Helper | Target program |
//! |--------|----------------|
//! | `create_pda_account` | System |
//! | `create_mint` | System, then Token |
//! | `create_associated_token_account` | Associated Token Account |
//! | `mint_to` | Token |

use crate::error::EquityError;
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    program_pack::Pack as TokenPack,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction,
    sysvar::Sysvar,
};

/// Decimals of every company share mint.
pub const MINT_DECIMALS: u8 = 6;

fn external(result: ProgramResult, call: &str) -> ProgramResult {
    result.map_err(|err| {
        msg!("{} rejected: {}", call, err);
        EquityError::ExternalProgramFailure.into()
    })
}

// =============================================================================
// SYSTEM PROGRAM
// =============================================================================

/// Create a rent-exempt account at a program derived address.
///
/// `create_account` fails on an address that already holds lamports, and
/// anyone can send lamports to a derived address before it exists. In that
/// case the account is topped up, allocated and assigned in three steps.
pub fn create_pda_account<'a>(
    payer: &AccountInfo<'a>,
    new_account: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    space: usize,
    owner: &Pubkey,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    let required_lamports = Rent::get()?.minimum_balance(space);

    if new_account.lamports() == 0 {
        return external(
            invoke_signed(
                &system_instruction::create_account(
                    payer.key,
                    new_account.key,
                    required_lamports,
                    space as u64,
                    owner,
                ),
                &[payer.clone(), new_account.clone(), system_program.clone()],
                &[signer_seeds],
            ),
            "create_account",
        );
    }

    let top_up = required_lamports.saturating_sub(new_account.lamports());
    if top_up > 0 {
        external(
            invoke(
                &system_instruction::transfer(payer.key, new_account.key, top_up),
                &[payer.clone(), new_account.clone(), system_program.clone()],
            ),
            "transfer",
        )?;
    }

    external(
        invoke_signed(
            &system_instruction::allocate(new_account.key, space as u64),
            &[new_account.clone(), system_program.clone()],
            &[signer_seeds],
        ),
        "allocate",
    )?;

    external(
        invoke_signed(
            &system_instruction::assign(new_account.key, owner),
            &[new_account.clone(), system_program.clone()],
            &[signer_seeds],
        ),
        "assign",
    )
}

// =============================================================================
// TOKEN PROGRAM
// =============================================================================

/// Create and initialize a mint at a derived address.
///
/// `authority` becomes both mint and freeze authority.
pub fn create_mint<'a>(
    payer: &AccountInfo<'a>,
    mint: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    token_program: &AccountInfo<'a>,
    authority: &Pubkey,
    mint_seeds: &[&[u8]],
) -> ProgramResult {
    create_pda_account(
        payer,
        mint,
        system_program,
        spl_token_2022::state::Mint::LEN,
        token_program.key,
        mint_seeds,
    )?;

    let ix = spl_token_2022::instruction::initialize_mint2(
        token_program.key,
        mint.key,
        authority,
        Some(authority),
        MINT_DECIMALS,
    )?;
    external(
        invoke(&ix, &[mint.clone(), token_program.clone()]),
        "initialize_mint2",
    )
}

/// Mint `amount` base units to `destination`, signed by a derived authority.
pub fn mint_to<'a>(
    token_program: &AccountInfo<'a>,
    mint: &AccountInfo<'a>,
    destination: &AccountInfo<'a>,
    authority: &AccountInfo<'a>,
    amount: u64,
    authority_seeds: &[&[u8]],
) -> ProgramResult {
    let ix = spl_token_2022::instruction::mint_to(
        token_program.key,
        mint.key,
        destination.key,
        authority.key,
        &[],
        amount,
    )?;
    external(
        invoke_signed(
            &ix,
            &[
                mint.clone(),
                destination.clone(),
                authority.clone(),
                token_program.clone(),
            ],
            &[authority_seeds],
        ),
        "mint_to",
    )
}

// =============================================================================
// ASSOCIATED TOKEN ACCOUNT PROGRAM
// =============================================================================

/// Create the canonical (owner, mint) token account.
pub fn create_associated_token_account<'a>(
    payer: &AccountInfo<'a>,
    associated_account: &AccountInfo<'a>,
    owner: &AccountInfo<'a>,
    mint: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    token_program: &AccountInfo<'a>,
    associated_token_program: &AccountInfo<'a>,
) -> ProgramResult {
    let ix = spl_associated_token_account::instruction::create_associated_token_account(
        payer.key,
        owner.key,
        mint.key,
        token_program.key,
    );
    external(
        invoke(
            &ix,
            &[
                payer.clone(),
                associated_account.clone(),
                owner.clone(),
                mint.clone(),
                system_program.clone(),
                token_program.clone(),
                associated_token_program.clone(),
            ],
        ),
        "create_associated_token_account",
    )
}
