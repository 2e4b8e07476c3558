//! Shareholder Account State
//!
//! One record per (company, owner) pair at `["shareholder", company, owner]`.
//! The `company` field is a back-reference only; the record is owned by this
//! program and written exclusively under the company authority's signature.
//!
//! # Size: 82 bytes

use crate::error::EquityError;
use crate::state::{AccountType, Pack};
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

/// Shareholder account data structure.
///
/// # Memory Layout (82 bytes total)
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────┐
/// │ Offset │ Size │ Field            │ Type                        │
/// ├────────┼──────┼──────────────────┼─────────────────────────────┤
/// │ 0      │ 1    │ account_type     │ AccountType (u8)            │
/// │ 1      │ 1    │ bump             │ u8                          │
/// │ 2      │ 32   │ company          │ Pubkey                      │
/// │ 34     │ 32   │ owner            │ Pubkey                      │
/// │ 66     │ 8    │ voting_power     │ u64                         │
/// │ 74     │ 8    │ joined_at        │ i64 (unix timestamp)        │
/// └─────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shareholder {
    pub account_type: AccountType,
    pub bump: u8,
    pub company: Pubkey,
    pub owner: Pubkey,
    /// Zero represents a divested holder; the record itself is never removed.
    pub voting_power: u64,
    pub joined_at: i64,
}

impl Shareholder {
    pub fn is_initialized(&self) -> bool {
        self.account_type == AccountType::Shareholder
    }
}

impl Pack for Shareholder {
    const LEN: usize = 82;

    fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let input = array_ref![input, 0, Shareholder::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (account_type, bump, company, owner, voting_power, joined_at) =
            array_refs![input, 1, 1, 32, 32, 8, 8];

        let account_type = AccountType::from_u8(account_type[0])?;
        if account_type == AccountType::Company {
            return Err(EquityError::InvalidAccountType.into());
        }

        Ok(Shareholder {
            account_type,
            bump: bump[0],
            company: Pubkey::new_from_array(*company),
            owner: Pubkey::new_from_array(*owner),
            voting_power: u64::from_le_bytes(*voting_power),
            joined_at: i64::from_le_bytes(*joined_at),
        })
    }

    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError> {
        let output = array_mut_ref![output, 0, Shareholder::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (account_type_dst, bump_dst, company_dst, owner_dst, voting_power_dst, joined_at_dst) =
            mut_array_refs![output, 1, 1, 32, 32, 8, 8];

        account_type_dst[0] = self.account_type.to_u8();
        bump_dst[0] = self.bump;
        company_dst.copy_from_slice(self.company.as_ref());
        owner_dst.copy_from_slice(self.owner.as_ref());
        *voting_power_dst = self.voting_power.to_le_bytes();
        *joined_at_dst = self.joined_at.to_le_bytes();

        Ok(())
    }
}
