//! Program Entrypoint
//!
//! The Solana runtime calls into the program here for every instruction
//! addressed to it.

// Compiled out when another program depends on this crate for CPI
#![cfg(not(feature = "no-entrypoint"))]

use crate::processor::Processor;
use solana_program::{
    account_info::AccountInfo,
    entrypoint,
    entrypoint::ProgramResult,
    pubkey::Pubkey,
};

entrypoint!(process_instruction);

/// The main entrypoint for the equity registry program.
///
/// # Arguments
///
/// * `program_id` - The public key of this program (our deployed address)
/// * `accounts` - Slice of all accounts involved in this instruction
/// * `instruction_data` - The raw bytes of instruction-specific data
///
/// If an error is returned the whole transaction is rolled back, so no
/// instruction ever leaves a partially written company or shareholder.
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    Processor::process(program_id, accounts, instruction_data)
}
