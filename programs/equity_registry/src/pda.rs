//! Address Derivation
//!
//! Every persistent entity the program is responsible for lives at an address
//! computed from fixed seeds plus identity keys:
//!
//! | Entity | Seeds | Program |
//! |--------|-------|---------|
//! | Company | `["company", authority]` | this program |
//! | Shareholder | `["shareholder", company, owner]` | this program |
//! | Mint | `["token-2022-token", authority, name]` | this program |
//! | Associated token account | `[owner, token_program, mint]` | ATA program |
//!
//! The same seeds always give the same `(address, bump)`. The bump is the
//! first value from 255 downwards that pushes the hash off the ed25519 curve,
//! so no private key exists for the address and only this program can sign
//! for it.

use crate::error::EquityError;
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

// =============================================================================
// SEEDS
// =============================================================================

pub const COMPANY_SEED: &[u8] = b"company";
pub const SHAREHOLDER_SEED: &[u8] = b"shareholder";
pub const MINT_SEED: &[u8] = b"token-2022-token";

/// Longest name accepted for companies and mints (runtime per-seed limit).
pub const MAX_NAME_LEN: usize = 32;

// =============================================================================
// NAME VALIDATION
// =============================================================================

/// Check a name before it is stored or used as a seed.
pub fn validate_name(name: &str) -> Result<(), ProgramError> {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(EquityError::InvalidName.into());
    }
    Ok(())
}

// =============================================================================
// FIND (SEARCH FOR THE CANONICAL BUMP)
// =============================================================================

fn try_find(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8), ProgramError> {
    Pubkey::try_find_program_address(seeds, program_id)
        .ok_or_else(|| EquityError::NoViableBump.into())
}

/// Derive the company address for an authority.
pub fn find_company_address(
    authority: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), ProgramError> {
    try_find(&[COMPANY_SEED, authority.as_ref()], program_id)
}

/// Derive the shareholder record address for a (company, owner) pair.
pub fn find_shareholder_address(
    company: &Pubkey,
    owner: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), ProgramError> {
    try_find(
        &[SHAREHOLDER_SEED, company.as_ref(), owner.as_ref()],
        program_id,
    )
}

/// Derive the share mint address for an (authority, name) pair.
pub fn find_mint_address(
    authority: &Pubkey,
    name: &str,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), ProgramError> {
    validate_name(name)?;
    try_find(
        &[MINT_SEED, authority.as_ref(), name.as_bytes()],
        program_id,
    )
}

/// Canonical associated token account for an (owner, mint) pair.
pub fn find_associated_token_address(
    owner: &Pubkey,
    mint: &Pubkey,
    token_program_id: &Pubkey,
) -> Pubkey {
    spl_associated_token_account::get_associated_token_address_with_program_id(
        owner,
        mint,
        token_program_id,
    )
}

// =============================================================================
// CREATE (RE-DERIVE FROM A STORED BUMP)
// =============================================================================

/// Recreate the company address from its stored bump.
///
/// Fails with `AddressMismatch` when the bump does not give a valid
/// off-curve address for these seeds.
pub fn create_company_address(
    authority: &Pubkey,
    bump: u8,
    program_id: &Pubkey,
) -> Result<Pubkey, ProgramError> {
    Pubkey::create_program_address(&[COMPANY_SEED, authority.as_ref(), &[bump]], program_id)
        .map_err(|_| EquityError::AddressMismatch.into())
}

/// Recreate the shareholder address from its stored bump.
pub fn create_shareholder_address(
    company: &Pubkey,
    owner: &Pubkey,
    bump: u8,
    program_id: &Pubkey,
) -> Result<Pubkey, ProgramError> {
    Pubkey::create_program_address(
        &[SHAREHOLDER_SEED, company.as_ref(), owner.as_ref(), &[bump]],
        program_id,
    )
    .map_err(|_| EquityError::AddressMismatch.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_address_is_deterministic() {
        let program_id = Pubkey::new_unique();
        let authority = Pubkey::new_unique();

        let first = find_company_address(&authority, &program_id).unwrap();
        let second = find_company_address(&authority, &program_id).unwrap();

        assert_eq!(first, second);
        assert!(!first.0.is_on_curve());
    }

    #[test]
    fn test_company_address_matches_raw_derivation() {
        let program_id = Pubkey::new_unique();
        let authority = Pubkey::new_unique();

        let expected =
            Pubkey::find_program_address(&[b"company", authority.as_ref()], &program_id);

        assert_eq!(find_company_address(&authority, &program_id).unwrap(), expected);
    }

    #[test]
    fn test_distinct_authorities_get_distinct_companies() {
        let program_id = Pubkey::new_unique();
        let (a, _) = find_company_address(&Pubkey::new_unique(), &program_id).unwrap();
        let (b, _) = find_company_address(&Pubkey::new_unique(), &program_id).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_shareholder_address_depends_on_company_and_owner() {
        let program_id = Pubkey::new_unique();
        let company = Pubkey::new_unique();
        let owner = Pubkey::new_unique();

        let (base, _) = find_shareholder_address(&company, &owner, &program_id).unwrap();
        let (other_company, _) =
            find_shareholder_address(&Pubkey::new_unique(), &owner, &program_id).unwrap();
        let (other_owner, _) =
            find_shareholder_address(&company, &Pubkey::new_unique(), &program_id).unwrap();

        assert_ne!(base, other_company);
        assert_ne!(base, other_owner);
    }

    #[test]
    fn test_create_from_stored_bump_round_trips() {
        let program_id = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let owner = Pubkey::new_unique();

        let (company, company_bump) = find_company_address(&authority, &program_id).unwrap();
        assert_eq!(
            create_company_address(&authority, company_bump, &program_id).unwrap(),
            company
        );

        let (holder, holder_bump) =
            find_shareholder_address(&company, &owner, &program_id).unwrap();
        assert_eq!(
            create_shareholder_address(&company, &owner, holder_bump, &program_id).unwrap(),
            holder
        );
    }

    #[test]
    fn test_mint_address_seed_layout() {
        let program_id = Pubkey::new_unique();
        let authority = Pubkey::new_unique();

        let expected = Pubkey::find_program_address(
            &[b"token-2022-token", authority.as_ref(), b"TestToken"],
            &program_id,
        );

        assert_eq!(
            find_mint_address(&authority, "TestToken", &program_id).unwrap(),
            expected
        );
        assert_ne!(
            find_mint_address(&authority, "OtherToken", &program_id).unwrap().0,
            expected.0
        );
    }

    #[test]
    fn test_mint_address_rejects_bad_names() {
        let program_id = Pubkey::new_unique();
        let authority = Pubkey::new_unique();

        assert_eq!(
            find_mint_address(&authority, "", &program_id),
            Err(EquityError::InvalidName.into())
        );
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert_eq!(
            find_mint_address(&authority, &long, &program_id),
            Err(EquityError::InvalidName.into())
        );
        let max = "x".repeat(MAX_NAME_LEN);
        assert!(find_mint_address(&authority, &max, &program_id).is_ok());
    }

    #[test]
    fn test_associated_token_address_matches_ata_program_derivation() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let token_program = spl_token_2022::id();

        let (expected, _) = Pubkey::find_program_address(
            &[owner.as_ref(), token_program.as_ref(), mint.as_ref()],
            &spl_associated_token_account::id(),
        );

        assert_eq!(
            find_associated_token_address(&owner, &mint, &token_program),
            expected
        );
    }
}
