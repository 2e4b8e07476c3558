//! Instruction Types
//!
//! This module defines all instructions supported by the equity registry.
//! Each instruction has:
//! - A discriminant (first byte, identifies the instruction type)
//! - Instruction-specific data (remaining bytes)
//! - Expected accounts (documented here, built by the client helpers below)
//!
//! # Instruction Format
//!
//! ```text
//! [discriminant: u8][data: varies]
//! ```
//!
//! Names are encoded as `[len: u8][utf-8 bytes]`, symbols as 5 zero padded
//! bytes, keys as 32 raw bytes and integers little-endian. Trailing bytes are
//! rejected.
//!
//! | Value | Instruction |
//! |-------|-------------|
//! | 0 | CreateCompany |
//! | 1 | AddShareholderByCompany |
//! | 2 | InitializeMint |
//! | 3 | EnsureAssociatedAccount |
//! | 4 | MintToShareholder |
//! | 5 | UpdateShareholderVotingPower |

use crate::error::EquityError;
use crate::pda::{
    find_associated_token_address, find_company_address, find_mint_address,
    find_shareholder_address, validate_name,
};
use crate::state::company::{symbol_from_str, validate_symbol, SYMBOL_LEN};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

// =============================================================================
// EQUITY INSTRUCTION ENUM
// =============================================================================

/// All instructions supported by the equity registry.
#[derive(Clone, Debug, PartialEq)]
pub enum EquityInstruction {
    /// Create the company record for the signing authority.
    ///
    /// | # | Account | Writable | Signer | Description |
    /// |---|---------|----------|--------|-------------|
    /// | 0 | authority | | ✓ | Company authority |
    /// | 1 | company | ✓ | | `["company", authority]` |
    /// | 2 | payer | ✓ | ✓ | Funds the new account |
    /// | 3 | system_program | | | System program |
    ///
    /// ```text
    /// [0]: discriminant (0)
    /// [1]: name length (N)
    /// [2..2+N]: name bytes
    /// [2+N..7+N]: symbol
    /// [7+N..15+N]: authorized_supply (u64)
    /// ```
    CreateCompany {
        name: String,
        symbol: [u8; SYMBOL_LEN],
        authorized_supply: u64,
    },

    /// Register a shareholder under the authority's company.
    ///
    /// | # | Account | Writable | Signer | Description |
    /// |---|---------|----------|--------|-------------|
    /// | 0 | authority | | ✓ | Company authority |
    /// | 1 | company | ✓ | | `["company", authority]` |
    /// | 2 | shareholder_record | ✓ | | `["shareholder", company, shareholder]` |
    /// | 3 | shareholder | | ✓ | Shareholder wallet, co-signs its registration |
    /// | 4 | payer | ✓ | ✓ | Funds the new record |
    /// | 5 | system_program | | | System program |
    ///
    /// ```text
    /// [0]: discriminant (1)
    /// [1..33]: shareholder (Pubkey)
    /// [33..41]: voting_power (u64)
    /// ```
    AddShareholderByCompany {
        shareholder: Pubkey,
        voting_power: u64,
    },

    /// Create the company share mint, with the company address as mint and
    /// freeze authority.
    ///
    /// | # | Account | Writable | Signer | Description |
    /// |---|---------|----------|--------|-------------|
    /// | 0 | authority | | ✓ | Company authority |
    /// | 1 | company | ✓ | | `["company", authority]` |
    /// | 2 | mint | ✓ | | `["token-2022-token", authority, name]` |
    /// | 3 | payer | ✓ | ✓ | Funds the mint account |
    /// | 4 | system_program | | | System program |
    /// | 5 | token_program | | | Token-2022 or SPL Token |
    ///
    /// ```text
    /// [0]: discriminant (2)
    /// [1]: name length
    /// [2..]: name bytes
    /// ```
    InitializeMint { name: String },

    /// Create the (owner, mint) associated token account if it does not exist.
    /// The account address is returned as 32 bytes of return data.
    ///
    /// | # | Account | Writable | Signer | Description |
    /// |---|---------|----------|--------|-------------|
    /// | 0 | payer | ✓ | ✓ | Funds the token account |
    /// | 1 | owner | | | Token account owner |
    /// | 2 | mint | | | Token mint |
    /// | 3 | associated_account | ✓ | | Canonical ATA address |
    /// | 4 | system_program | | | System program |
    /// | 5 | token_program | | | Owner of the mint |
    /// | 6 | associated_token_program | | | ATA program |
    EnsureAssociatedAccount,

    /// Mint shares into a registered shareholder's associated token account.
    ///
    /// | # | Account | Writable | Signer | Description |
    /// |---|---------|----------|--------|-------------|
    /// | 0 | authority | | ✓ | Company authority |
    /// | 1 | company | ✓ | | `["company", authority]`, mint authority |
    /// | 2 | shareholder_record | | | `["shareholder", company, shareholder]` |
    /// | 3 | shareholder | | | Shareholder wallet |
    /// | 4 | mint | ✓ | | Company share mint |
    /// | 5 | associated_account | ✓ | | Shareholder's ATA, created if absent |
    /// | 6 | payer | ✓ | ✓ | Funds the ATA if created |
    /// | 7 | system_program | | | System program |
    /// | 8 | token_program | | | Owner of the mint |
    /// | 9 | associated_token_program | | | ATA program |
    ///
    /// ```text
    /// [0]: discriminant (4)
    /// [1..33]: shareholder (Pubkey)
    /// [33..41]: amount (u64)
    /// ```
    MintToShareholder { shareholder: Pubkey, amount: u64 },

    /// Replace a shareholder's voting power.
    ///
    /// | # | Account | Writable | Signer | Description |
    /// |---|---------|----------|--------|-------------|
    /// | 0 | authority | | ✓ | Company authority |
    /// | 1 | company | ✓ | | `["company", authority]` |
    /// | 2 | shareholder_record | ✓ | | `["shareholder", company, shareholder]` |
    ///
    /// ```text
    /// [0]: discriminant (5)
    /// [1..33]: shareholder (Pubkey)
    /// [33..41]: new_voting_power (u64)
    /// ```
    UpdateShareholderVotingPower {
        shareholder: Pubkey,
        new_voting_power: u64,
    },
}

// =============================================================================
// INSTRUCTION PARSING (UNPACK)
// =============================================================================

impl EquityInstruction {
    /// Parse instruction data into an EquityInstruction.
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let (&discriminant, rest) = input
            .split_first()
            .ok_or(EquityError::InvalidInstruction)?;

        let (instruction, rest) = match discriminant {
            0 => {
                let (name, rest) = unpack_name(rest)?;
                let (symbol, rest) = unpack_symbol(rest)?;
                let (authorized_supply, rest) = unpack_u64(rest)?;
                (
                    EquityInstruction::CreateCompany {
                        name,
                        symbol,
                        authorized_supply,
                    },
                    rest,
                )
            }
            1 => {
                let (shareholder, rest) = unpack_pubkey(rest)?;
                let (voting_power, rest) = unpack_u64(rest)?;
                (
                    EquityInstruction::AddShareholderByCompany {
                        shareholder,
                        voting_power,
                    },
                    rest,
                )
            }
            2 => {
                let (name, rest) = unpack_name(rest)?;
                (EquityInstruction::InitializeMint { name }, rest)
            }
            3 => (EquityInstruction::EnsureAssociatedAccount, rest),
            4 => {
                let (shareholder, rest) = unpack_pubkey(rest)?;
                let (amount, rest) = unpack_u64(rest)?;
                (
                    EquityInstruction::MintToShareholder {
                        shareholder,
                        amount,
                    },
                    rest,
                )
            }
            5 => {
                let (shareholder, rest) = unpack_pubkey(rest)?;
                let (new_voting_power, rest) = unpack_u64(rest)?;
                (
                    EquityInstruction::UpdateShareholderVotingPower {
                        shareholder,
                        new_voting_power,
                    },
                    rest,
                )
            }
            _ => return Err(EquityError::InvalidInstruction.into()),
        };

        if !rest.is_empty() {
            return Err(EquityError::InvalidInstruction.into());
        }
        Ok(instruction)
    }

    // =========================================================================
    // INSTRUCTION PACKING (for tests and clients)
    // =========================================================================

    /// Pack instruction into bytes. Inverse of `unpack()`.
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        match self {
            EquityInstruction::CreateCompany {
                name,
                symbol,
                authorized_supply,
            } => {
                buf.push(0);
                pack_name(name, &mut buf);
                buf.extend_from_slice(symbol);
                buf.extend_from_slice(&authorized_supply.to_le_bytes());
            }
            EquityInstruction::AddShareholderByCompany {
                shareholder,
                voting_power,
            } => {
                buf.push(1);
                buf.extend_from_slice(shareholder.as_ref());
                buf.extend_from_slice(&voting_power.to_le_bytes());
            }
            EquityInstruction::InitializeMint { name } => {
                buf.push(2);
                pack_name(name, &mut buf);
            }
            EquityInstruction::EnsureAssociatedAccount => {
                buf.push(3);
            }
            EquityInstruction::MintToShareholder {
                shareholder,
                amount,
            } => {
                buf.push(4);
                buf.extend_from_slice(shareholder.as_ref());
                buf.extend_from_slice(&amount.to_le_bytes());
            }
            EquityInstruction::UpdateShareholderVotingPower {
                shareholder,
                new_voting_power,
            } => {
                buf.push(5);
                buf.extend_from_slice(shareholder.as_ref());
                buf.extend_from_slice(&new_voting_power.to_le_bytes());
            }
        }

        buf
    }
}

fn unpack_pubkey(input: &[u8]) -> Result<(Pubkey, &[u8]), ProgramError> {
    if input.len() < 32 {
        return Err(EquityError::InvalidInstruction.into());
    }
    let (key, rest) = input.split_at(32);
    let key = Pubkey::new_from_array(
        key.try_into()
            .map_err(|_| EquityError::InvalidInstruction)?,
    );
    Ok((key, rest))
}

fn unpack_u64(input: &[u8]) -> Result<(u64, &[u8]), ProgramError> {
    if input.len() < 8 {
        return Err(EquityError::InvalidInstruction.into());
    }
    let (value, rest) = input.split_at(8);
    let value = u64::from_le_bytes(
        value
            .try_into()
            .map_err(|_| EquityError::InvalidInstruction)?,
    );
    Ok((value, rest))
}

/// Names are validated here so a bad name never reaches a processor.
fn unpack_name(input: &[u8]) -> Result<(String, &[u8]), ProgramError> {
    let (&len, rest) = input
        .split_first()
        .ok_or(EquityError::InvalidInstruction)?;
    let len = len as usize;
    if rest.len() < len {
        return Err(EquityError::InvalidInstruction.into());
    }
    let (name, rest) = rest.split_at(len);
    let name = std::str::from_utf8(name).map_err(|_| EquityError::InvalidName)?;
    validate_name(name)?;
    Ok((name.to_string(), rest))
}

fn unpack_symbol(input: &[u8]) -> Result<([u8; SYMBOL_LEN], &[u8]), ProgramError> {
    if input.len() < SYMBOL_LEN {
        return Err(EquityError::InvalidInstruction.into());
    }
    let (symbol, rest) = input.split_at(SYMBOL_LEN);
    let symbol: [u8; SYMBOL_LEN] = symbol
        .try_into()
        .map_err(|_| EquityError::InvalidInstruction)?;
    validate_symbol(&symbol)?;
    Ok((symbol, rest))
}

fn pack_name(name: &str, buf: &mut Vec<u8>) {
    // Over-long names are clamped by the length byte and fail validation on
    // unpack.
    buf.push(name.len().min(u8::MAX as usize) as u8);
    buf.extend_from_slice(name.as_bytes());
}

// =============================================================================
// CLIENT INSTRUCTION BUILDERS
// =============================================================================

/// Build a `CreateCompany` instruction.
///
/// # Arguments
///
/// * `name` - Company name, 1..=32 bytes
/// * `symbol` - Ticker, 1-5 uppercase ASCII letters or digits
/// * `authorized_supply` - Most base units that may ever be minted
pub fn create_company(
    program_id: &Pubkey,
    authority: &Pubkey,
    payer: &Pubkey,
    name: &str,
    symbol: &str,
    authorized_supply: u64,
) -> Result<Instruction, ProgramError> {
    validate_name(name)?;
    let symbol = symbol_from_str(symbol)?;
    let (company, _) = find_company_address(authority, program_id)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(company, false),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: EquityInstruction::CreateCompany {
            name: name.to_string(),
            symbol,
            authorized_supply,
        }
        .pack(),
    })
}

/// Build an `AddShareholderByCompany` instruction.
pub fn add_shareholder_by_company(
    program_id: &Pubkey,
    authority: &Pubkey,
    shareholder: &Pubkey,
    payer: &Pubkey,
    voting_power: u64,
) -> Result<Instruction, ProgramError> {
    let (company, _) = find_company_address(authority, program_id)?;
    let (record, _) = find_shareholder_address(&company, shareholder, program_id)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(company, false),
            AccountMeta::new(record, false),
            AccountMeta::new_readonly(*shareholder, true),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: EquityInstruction::AddShareholderByCompany {
            shareholder: *shareholder,
            voting_power,
        }
        .pack(),
    })
}

/// Build an `InitializeMint` instruction.
pub fn initialize_mint(
    program_id: &Pubkey,
    authority: &Pubkey,
    payer: &Pubkey,
    name: &str,
    token_program_id: &Pubkey,
) -> Result<Instruction, ProgramError> {
    let (company, _) = find_company_address(authority, program_id)?;
    let (mint, _) = find_mint_address(authority, name, program_id)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(company, false),
            AccountMeta::new(mint, false),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(*token_program_id, false),
        ],
        data: EquityInstruction::InitializeMint {
            name: name.to_string(),
        }
        .pack(),
    })
}

/// Build an `EnsureAssociatedAccount` instruction.
pub fn ensure_associated_account(
    program_id: &Pubkey,
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
    token_program_id: &Pubkey,
) -> Instruction {
    let associated_account = find_associated_token_address(owner, mint, token_program_id);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(associated_account, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(*token_program_id, false),
            AccountMeta::new_readonly(spl_associated_token_account::id(), false),
        ],
        data: EquityInstruction::EnsureAssociatedAccount.pack(),
    }
}

/// Build a `MintToShareholder` instruction.
pub fn mint_to_shareholder(
    program_id: &Pubkey,
    authority: &Pubkey,
    shareholder: &Pubkey,
    mint: &Pubkey,
    payer: &Pubkey,
    token_program_id: &Pubkey,
    amount: u64,
) -> Result<Instruction, ProgramError> {
    let (company, _) = find_company_address(authority, program_id)?;
    let (record, _) = find_shareholder_address(&company, shareholder, program_id)?;
    let associated_account = find_associated_token_address(shareholder, mint, token_program_id);

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(company, false),
            AccountMeta::new_readonly(record, false),
            AccountMeta::new_readonly(*shareholder, false),
            AccountMeta::new(*mint, false),
            AccountMeta::new(associated_account, false),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(*token_program_id, false),
            AccountMeta::new_readonly(spl_associated_token_account::id(), false),
        ],
        data: EquityInstruction::MintToShareholder {
            shareholder: *shareholder,
            amount,
        }
        .pack(),
    })
}

/// Build an `UpdateShareholderVotingPower` instruction.
pub fn update_shareholder_voting_power(
    program_id: &Pubkey,
    authority: &Pubkey,
    shareholder: &Pubkey,
    new_voting_power: u64,
) -> Result<Instruction, ProgramError> {
    let (company, _) = find_company_address(authority, program_id)?;
    let (record, _) = find_shareholder_address(&company, shareholder, program_id)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(company, false),
            AccountMeta::new(record, false),
        ],
        data: EquityInstruction::UpdateShareholderVotingPower {
            shareholder: *shareholder,
            new_voting_power,
        }
        .pack(),
    })
}
