//! Instruction Processors
//!
//! This module contains the business logic for each instruction.
//! Each instruction has its own file.

pub mod add_shareholder_by_company;
pub mod create_company;
pub mod ensure_associated_account;
pub mod initialize_mint;
pub mod mint_to_shareholder;
pub mod update_shareholder_voting_power;

use crate::instruction::EquityInstruction;
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
};

/// Main processor that routes instructions to specific handlers
pub struct Processor;

impl Processor {
    /// Process an equity registry instruction
    pub fn process(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        let instruction = EquityInstruction::unpack(instruction_data)?;

        match instruction {
            EquityInstruction::CreateCompany {
                name,
                symbol,
                authorized_supply,
            } => {
                msg!("Instruction: CreateCompany");
                create_company::process(program_id, accounts, name, symbol, authorized_supply)
            }

            EquityInstruction::AddShareholderByCompany {
                shareholder,
                voting_power,
            } => {
                msg!("Instruction: AddShareholderByCompany");
                add_shareholder_by_company::process(program_id, accounts, shareholder, voting_power)
            }

            EquityInstruction::InitializeMint { name } => {
                msg!("Instruction: InitializeMint");
                initialize_mint::process(program_id, accounts, name)
            }

            EquityInstruction::EnsureAssociatedAccount => {
                msg!("Instruction: EnsureAssociatedAccount");
                ensure_associated_account::process(program_id, accounts)
            }

            EquityInstruction::MintToShareholder {
                shareholder,
                amount,
            } => {
                msg!("Instruction: MintToShareholder");
                mint_to_shareholder::process(program_id, accounts, shareholder, amount)
            }

            EquityInstruction::UpdateShareholderVotingPower {
                shareholder,
                new_voting_power,
            } => {
                msg!("Instruction: UpdateShareholderVotingPower");
                update_shareholder_voting_power::process(
                    program_id,
                    accounts,
                    shareholder,
                    new_voting_power,
                )
            }
        }
    }
}
