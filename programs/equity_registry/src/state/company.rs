//! Company Account State
//!
//! One Company exists per authority, at `["company", authority]`. It holds the
//! share class terms (ticker symbol and authorized supply), the registry-wide
//! counters for its shareholders and, once `InitializeMint` has run, the
//! address of its share mint. The company address is also the mint and freeze
//! authority of that mint.
//!
//! # Size: 140 bytes

use crate::error::EquityError;
use crate::pda::MAX_NAME_LEN;
use crate::state::{pack_coption_pubkey, unpack_coption_pubkey, AccountType, COption, Pack};
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{entrypoint::ProgramResult, program_error::ProgramError, pubkey::Pubkey};

/// Width of the stored ticker symbol; shorter symbols are zero padded.
pub const SYMBOL_LEN: usize = 5;

// =============================================================================
// COMPANY STRUCTURE
// =============================================================================

/// Company account data structure.
///
/// # Memory Layout (140 bytes total)
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────┐
/// │ Offset │ Size │ Field              │ Type                      │
/// ├────────┼──────┼────────────────────┼───────────────────────────┤
/// │ 0      │ 1    │ account_type       │ AccountType (u8)          │
/// │ 1      │ 1    │ bump               │ u8                        │
/// │ 2      │ 32   │ authority          │ Pubkey                    │
/// │ 34     │ 1    │ name length        │ u8                        │
/// │ 35     │ 32   │ name               │ UTF-8, zero padded        │
/// │ 67     │ 5    │ symbol             │ ASCII, zero padded        │
/// │ 72     │ 8    │ authorized_supply  │ u64                       │
/// │ 80     │ 8    │ shareholder_count  │ u64                       │
/// │ 88     │ 8    │ total_voting_power │ u64                       │
/// │ 96     │ 8    │ issued_supply      │ u64                       │
/// │ 104    │ 36   │ mint               │ COption<Pubkey>           │
/// ├────────┼──────┼────────────────────┼───────────────────────────┤
/// │ Total  │ 140  │                    │                           │
/// └─────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Company {
    /// `Company` once created, `Uninitialized` for zeroed data.
    pub account_type: AccountType,

    /// Canonical bump of the company address, used for signer seeds.
    pub bump: u8,

    /// The only identity allowed to add or adjust shareholders and to mint.
    pub authority: Pubkey,

    /// Display name, 1..=32 bytes.
    pub name: String,

    /// Ticker symbol, e.g. `*b"ACME\0"`.
    pub symbol: [u8; SYMBOL_LEN],

    /// Ceiling on `issued_supply`, in mint base units.
    pub authorized_supply: u64,

    /// Number of shareholder records created under this company.
    pub shareholder_count: u64,

    /// Sum of every shareholder's `voting_power`.
    ///
    /// Updated in the same instruction as the shareholder record, so it is
    /// exact at the end of every successful transaction.
    pub total_voting_power: u64,

    /// Base units minted through `MintToShareholder`. Never above
    /// `authorized_supply`.
    pub issued_supply: u64,

    /// Share mint, set once by `InitializeMint`.
    pub mint: COption<Pubkey>,
}

impl Company {
    /// Build a freshly created company with zeroed counters.
    pub fn new(
        authority: Pubkey,
        name: String,
        symbol: [u8; SYMBOL_LEN],
        authorized_supply: u64,
        bump: u8,
    ) -> Self {
        Self {
            account_type: AccountType::Company,
            bump,
            authority,
            name,
            symbol,
            authorized_supply,
            shareholder_count: 0,
            total_voting_power: 0,
            issued_supply: 0,
            mint: COption::none(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.account_type == AccountType::Company
    }

    /// The symbol without its zero padding.
    pub fn symbol_str(&self) -> &str {
        let len = self
            .symbol
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(SYMBOL_LEN);
        std::str::from_utf8(&self.symbol[..len]).unwrap_or_default()
    }

    /// Issued supply after minting `amount` more.
    ///
    /// # Returns
    ///
    /// * `Ok(new_supply)` - Still within the authorized supply
    /// * `Err(ArithmeticOverflow)` - The u64 counter would wrap
    /// * `Err(AuthorizedSupplyExceeded)` - Past `authorized_supply`
    pub fn supply_after_issue(&self, amount: u64) -> Result<u64, ProgramError> {
        let issued = self
            .issued_supply
            .checked_add(amount)
            .ok_or(EquityError::ArithmeticOverflow)?;
        if issued > self.authorized_supply {
            return Err(EquityError::AuthorizedSupplyExceeded.into());
        }
        Ok(issued)
    }
}

// =============================================================================
// SYMBOL HELPERS
// =============================================================================

/// Encode a ticker such as `"ACME"` into its zero padded stored form.
pub fn symbol_from_str(symbol: &str) -> Result<[u8; SYMBOL_LEN], ProgramError> {
    let bytes = symbol.as_bytes();
    if bytes.is_empty() || bytes.len() > SYMBOL_LEN {
        return Err(EquityError::InvalidSymbol.into());
    }
    let mut out = [0u8; SYMBOL_LEN];
    out[..bytes.len()].copy_from_slice(bytes);
    validate_symbol(&out)?;
    Ok(out)
}

/// A stored symbol is 1-5 uppercase ASCII letters or digits followed only by
/// zero padding.
pub fn validate_symbol(symbol: &[u8; SYMBOL_LEN]) -> ProgramResult {
    let len = symbol.iter().position(|b| *b == 0).unwrap_or(SYMBOL_LEN);
    let (chars, padding) = symbol.split_at(len);

    if chars.is_empty()
        || !chars
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        || padding.iter().any(|b| *b != 0)
    {
        return Err(EquityError::InvalidSymbol.into());
    }
    Ok(())
}

// =============================================================================
// PACK TRAIT IMPLEMENTATION
// =============================================================================

impl Pack for Company {
    const LEN: usize = 140;

    fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let input = array_ref![input, 0, Company::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (
            account_type,
            bump,
            authority,
            name_len,
            name,
            symbol,
            authorized_supply,
            shareholder_count,
            total_voting_power,
            issued_supply,
            mint,
        ) = array_refs![input, 1, 1, 32, 1, MAX_NAME_LEN, SYMBOL_LEN, 8, 8, 8, 8, 36];

        let account_type = AccountType::from_u8(account_type[0])?;
        if account_type == AccountType::Shareholder {
            return Err(EquityError::InvalidAccountType.into());
        }

        let name_len = name_len[0] as usize;
        if name_len > MAX_NAME_LEN {
            return Err(ProgramError::InvalidAccountData);
        }
        let name = std::str::from_utf8(&name[..name_len])
            .map_err(|_| ProgramError::InvalidAccountData)?
            .to_string();

        Ok(Company {
            account_type,
            bump: bump[0],
            authority: Pubkey::new_from_array(*authority),
            name,
            symbol: *symbol,
            authorized_supply: u64::from_le_bytes(*authorized_supply),
            shareholder_count: u64::from_le_bytes(*shareholder_count),
            total_voting_power: u64::from_le_bytes(*total_voting_power),
            issued_supply: u64::from_le_bytes(*issued_supply),
            mint: unpack_coption_pubkey(mint)?,
        })
    }

    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError> {
        let name_bytes = self.name.as_bytes();
        if name_bytes.len() > MAX_NAME_LEN {
            return Err(EquityError::InvalidName.into());
        }

        let output = array_mut_ref![output, 0, Company::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (
            account_type_dst,
            bump_dst,
            authority_dst,
            name_len_dst,
            name_dst,
            symbol_dst,
            authorized_supply_dst,
            shareholder_count_dst,
            total_voting_power_dst,
            issued_supply_dst,
            mint_dst,
        ) = mut_array_refs![output, 1, 1, 32, 1, MAX_NAME_LEN, SYMBOL_LEN, 8, 8, 8, 8, 36];

        account_type_dst[0] = self.account_type.to_u8();
        bump_dst[0] = self.bump;
        authority_dst.copy_from_slice(self.authority.as_ref());
        name_len_dst[0] = name_bytes.len() as u8;
        name_dst.fill(0);
        name_dst[..name_bytes.len()].copy_from_slice(name_bytes);
        *symbol_dst = self.symbol;
        *authorized_supply_dst = self.authorized_supply.to_le_bytes();
        *shareholder_count_dst = self.shareholder_count.to_le_bytes();
        *total_voting_power_dst = self.total_voting_power.to_le_bytes();
        *issued_supply_dst = self.issued_supply.to_le_bytes();
        pack_coption_pubkey(&self.mint, mint_dst);

        Ok(())
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> Company {
        Company::new(
            Pubkey::new_unique(),
            "TestToken".to_string(),
            *b"ACME\0",
            1_000_000,
            254,
        )
    }

    #[test]
    fn test_company_layout_offsets() {
        let mint = Pubkey::new_unique();
        let mut company = acme();
        company.shareholder_count = 2;
        company.total_voting_power = 1_500;
        company.issued_supply = 7;
        company.mint = COption::some(mint);

        let mut packed = [0u8; Company::LEN];
        company.pack_into_slice(&mut packed).unwrap();

        assert_eq!(packed[0], 1);
        assert_eq!(packed[1], 254);
        assert_eq!(&packed[2..34], company.authority.as_ref());
        assert_eq!(packed[34], 9);
        assert_eq!(&packed[35..44], b"TestToken");
        assert!(packed[44..67].iter().all(|b| *b == 0));
        assert_eq!(&packed[67..72], b"ACME\0");
        assert_eq!(&packed[72..80], &1_000_000u64.to_le_bytes());
        assert_eq!(&packed[80..88], &2u64.to_le_bytes());
        assert_eq!(&packed[88..96], &1_500u64.to_le_bytes());
        assert_eq!(&packed[96..104], &7u64.to_le_bytes());
        assert_eq!(&packed[108..140], mint.as_ref());

        assert_eq!(Company::unpack_from_slice(&packed).unwrap(), company);
    }

    #[test]
    fn test_zeroed_company_is_uninitialized() {
        let company = Company::unpack_from_slice(&[0u8; Company::LEN]).unwrap();
        assert!(!company.is_initialized());
        assert!(company.mint.is_none());
        assert!(company.name.is_empty());
        assert_eq!(company.symbol_str(), "");
    }

    #[test]
    fn test_shareholder_bytes_rejected_as_company() {
        let mut packed = [0u8; Company::LEN];
        packed[0] = AccountType::Shareholder.to_u8();
        assert_eq!(
            Company::unpack(&packed),
            Err(EquityError::InvalidAccountType.into())
        );
    }

    #[test]
    fn test_company_wrong_size() {
        assert!(Company::unpack_from_slice(&[0u8; Company::LEN - 1]).is_err());
        assert!(Company::unpack_from_slice(&[0u8; Company::LEN + 1]).is_err());
    }

    #[test]
    fn test_corrupt_name_length_rejected() {
        let mut packed = [0u8; Company::LEN];
        packed[0] = 1;
        packed[34] = (MAX_NAME_LEN + 1) as u8;
        assert_eq!(
            Company::unpack(&packed),
            Err(ProgramError::InvalidAccountData)
        );
    }

    #[test]
    fn test_symbol_encoding() {
        assert_eq!(symbol_from_str("ACME").unwrap(), *b"ACME\0");
        assert_eq!(symbol_from_str("BRK5A").unwrap(), *b"BRK5A");
        assert_eq!(acme().symbol_str(), "ACME");

        for bad in ["", "TOOLONG", "acme", "AC E"] {
            assert_eq!(
                symbol_from_str(bad),
                Err(EquityError::InvalidSymbol.into())
            );
        }
        assert_eq!(
            validate_symbol(&[0u8; SYMBOL_LEN]),
            Err(EquityError::InvalidSymbol.into())
        );
        assert_eq!(
            validate_symbol(b"AC\0ME"),
            Err(EquityError::InvalidSymbol.into())
        );
    }

    #[test]
    fn test_supply_after_issue_respects_cap() {
        let mut company = acme();
        assert_eq!(company.supply_after_issue(1_000_000).unwrap(), 1_000_000);

        company.issued_supply = 999_999;
        assert_eq!(company.supply_after_issue(1).unwrap(), 1_000_000);
        assert_eq!(
            company.supply_after_issue(2),
            Err(EquityError::AuthorizedSupplyExceeded.into())
        );

        company.authorized_supply = u64::MAX;
        company.issued_supply = u64::MAX;
        assert_eq!(
            company.supply_after_issue(1),
            Err(EquityError::ArithmeticOverflow.into())
        );
    }
}
