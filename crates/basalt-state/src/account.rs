//! `AccountState` (spec.md §3) and its canonical wire encoding, used both
//! for on-disk storage and as the leaf payload fed to the trie-backed root.

use basalt_codec::{CodecError, Reader, Writer};
use basalt_types::{Hash256, UInt256};

/// The three kinds of account this chain recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccountType {
    ExternallyOwned,
    Contract,
    System,
}

impl AccountType {
    fn tag(self) -> u8 {
        match self {
            AccountType::ExternallyOwned => 0,
            AccountType::Contract => 1,
            AccountType::System => 2,
        }
    }

    fn from_tag(tag: u8) -> Result<Self, CodecError> {
        match tag {
            0 => Ok(AccountType::ExternallyOwned),
            1 => Ok(AccountType::Contract),
            2 => Ok(AccountType::System),
            other => Err(CodecError::UnknownTag { tag: other }),
        }
    }
}

/// Per-address account record (spec.md §3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountState {
    pub nonce: u64,
    pub balance: UInt256,
    pub storage_root: Hash256,
    pub code_hash: Hash256,
    pub account_type: AccountType,
    pub compliance_hash: Hash256,
}

impl AccountState {
    /// A freshly created externally-owned account with zero balance and no
    /// storage/code.
    pub fn new_externally_owned() -> Self {
        Self {
            nonce: 0,
            balance: UInt256::from_u64(0),
            storage_root: Hash256::ZERO,
            code_hash: Hash256::ZERO,
            account_type: AccountType::ExternallyOwned,
            compliance_hash: Hash256::ZERO,
        }
    }

    /// Canonical fixed-field-order encoding (spec.md §6).
    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.write_u64_le(self.nonce);
        w.write_raw(&self.balance.to_be_bytes());
        w.write_raw(self.storage_root.as_bytes());
        w.write_raw(self.code_hash.as_bytes());
        w.write_u8(self.account_type.tag());
        w.write_raw(self.compliance_hash.as_bytes());
        w.into_vec()
    }

    /// Decode from [`AccountState::encode`]'s layout.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new(bytes);
        let nonce = r.read_u64_le()?;
        let balance = UInt256::from_be_bytes(&r.read_fixed::<32>()?);
        let storage_root = Hash256(r.read_fixed::<32>()?);
        let code_hash = Hash256(r.read_fixed::<32>()?);
        let account_type = AccountType::from_tag(r.read_u8()?)?;
        let compliance_hash = Hash256(r.read_fixed::<32>()?);
        Ok(Self {
            nonce,
            balance,
            storage_root,
            code_hash,
            account_type,
            compliance_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let account = AccountState {
            nonce: 7,
            balance: UInt256::from_u64(1_000_000),
            storage_root: Hash256([9u8; 32]),
            code_hash: Hash256([3u8; 32]),
            account_type: AccountType::Contract,
            compliance_hash: Hash256([1u8; 32]),
        };
        let encoded = account.encode();
        let decoded = AccountState::decode(&encoded).unwrap();
        assert_eq!(decoded, account);
    }

    #[test]
    fn new_externally_owned_has_zero_balance() {
        let account = AccountState::new_externally_owned();
        assert_eq!(account.account_type, AccountType::ExternallyOwned);
        assert!(account.balance.is_zero());
    }

    #[test]
    fn different_accounts_encode_differently() {
        let a = AccountState::new_externally_owned();
        let mut b = AccountState::new_externally_owned();
        b.nonce = 1;
        assert_ne!(a.encode(), b.encode());
    }
}
