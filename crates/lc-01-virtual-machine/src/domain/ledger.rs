//! # Ledger State
//!
//! In-memory account table the VM reads and writes.
//!
//! The VM never mutates a caller's ledger in place while a program runs: it
//! works on a clone and swaps it in only if the whole program succeeded.

use shared_types::{Account, Address, PublicKey};
use std::collections::BTreeMap;

/// All accounts plus the address allocator.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerState {
    accounts: BTreeMap<Address, Account>,
    next_index: u64,
}

impl LedgerState {
    /// Empty ledger; the first created account receives `Address::SERVICE`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
            next_index: 1,
        }
    }

    /// Ledger holding only the funded service account.
    #[must_use]
    pub fn with_service_account(public_key: PublicKey, balance: u64) -> Self {
        let mut ledger = Self::new();
        let address = ledger.create_account(vec![public_key]);
        debug_assert_eq!(address, Address::SERVICE);
        if let Some(service) = ledger.account_mut(&address) {
            service.balance = balance;
        }
        ledger
    }

    /// Allocates the next address and stores an empty account there.
    pub fn create_account(&mut self, public_keys: Vec<PublicKey>) -> Address {
        let address = Address::from_index(self.next_index);
        self.next_index += 1;
        self.accounts
            .insert(address, Account::new(address, public_keys));
        address
    }

    /// Looks up an account.
    #[must_use]
    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }

    /// Looks up an account for writing.
    pub fn account_mut(&mut self, address: &Address) -> Option<&mut Account> {
        self.accounts.get_mut(address)
    }

    /// Returns true if `address` holds an account.
    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.accounts.contains_key(address)
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the ledger has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of all balances.
    #[must_use]
    pub fn total_supply(&self) -> u128 {
        self.accounts.values().map(|a| u128::from(a.balance)).sum()
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new()
    }
}
