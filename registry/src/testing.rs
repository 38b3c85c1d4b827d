//! Test Support
//!
//! In-memory storage and host mocks shared by unit and integration
//! tests. Kept in the library so the tests/ directory can reuse them.

use std::collections::{BTreeMap, HashMap};

use primitive_types::U256;

use dcdt_common::address::Address;

use crate::vm::{Host, RegistryStorage};

/// Deterministically ordered in-memory key/value storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RegistryStorage for MemoryStorage {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) {
        self.entries.insert(key.to_vec(), value);
    }
}

/// Host mock with a fixed random seed and configurable balances
#[derive(Debug, Clone)]
pub struct TestHost {
    pub random_seed: Vec<u8>,
    pub balances: HashMap<Address, U256>,
}

impl TestHost {
    pub fn new() -> Self {
        Self {
            random_seed: vec![0x42; 48],
            balances: HashMap::new(),
        }
    }

    pub fn with_seed(seed: Vec<u8>) -> Self {
        Self {
            random_seed: seed,
            balances: HashMap::new(),
        }
    }

    pub fn set_balance(&mut self, address: Address, value: U256) {
        self.balances.insert(address, value);
    }
}

impl Default for TestHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for TestHost {
    fn block_random_seed(&self) -> Vec<u8> {
        self.random_seed.clone()
    }

    fn balance(&self, address: &Address) -> U256 {
        self.balances.get(address).copied().unwrap_or_default()
    }
}
