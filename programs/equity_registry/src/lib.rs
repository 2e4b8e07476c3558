//! # Equity Registry
//!
//! On-chain registry for tokenized company equity.
//!
//! ## Overview
//!
//! This program allows you to:
//! - Create a company record keyed to its authority
//! - Register shareholders under a company with a voting power
//! - Adjust a shareholder's voting power
//! - Create the company's share mint (the company address holds mint authority)
//! - Create associated token accounts on demand
//! - Mint shares into a registered shareholder's associated token account
//!
//! Every persistent entity lives at a program derived address. Each
//! instruction re-derives those addresses from their seeds and rejects any
//! account that does not match.
//!
//! ## Account Types
//!
//! | Account Type | Size | Address |
//! |--------------|------|---------|
//! | Company | 140 bytes | `["company", authority]` |
//! | Shareholder | 82 bytes | `["shareholder", company, owner]` |
//! | Mint (token program) | 82 bytes | `["token-2022-token", authority, name]` |
//!
//! ## Instructions
//!
//! | # | Instruction | Description |
//! |---|-------------|-------------|
//! | 0 | CreateCompany | Create the authority's company record |
//! | 1 | AddShareholderByCompany | Register a shareholder with voting power |
//! | 2 | InitializeMint | Create the company share mint |
//! | 3 | EnsureAssociatedAccount | Create an (owner, mint) token account if absent |
//! | 4 | MintToShareholder | Mint shares to a registered shareholder |
//! | 5 | UpdateShareholderVotingPower | Replace a shareholder's voting power |

// =============================================================================
// MODULE DECLARATIONS
// =============================================================================

/// Program entrypoint - where Solana calls into our program
pub mod entrypoint;

/// Custom error types with unique codes
pub mod error;

/// Instruction definitions, parsing and client builders
pub mod instruction;

/// Seeds and deterministic address derivation
pub mod pda;

/// Instruction processors (business logic)
pub mod processor;

/// Account state structures (Company, Shareholder)
pub mod state;

/// Validation, checked math and cross-program call helpers
pub mod utils;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use error::EquityError;
pub use instruction::EquityInstruction;
pub use processor::Processor;
pub use state::{AccountType, Company, Pack, Shareholder};

// =============================================================================
// PROGRAM ID
// =============================================================================

solana_program::declare_id!("2TE5kuPuKgoXoBEtDB6EhCvP5yVRJGiS2DnthZNw3oP4");
