//! Host ABI
//!
//! The call shape the VM host hands to the registry, the output it gets
//! back, and the dependency-injection seams for storage and the block
//! execution context. Operations never touch balances or remote shards
//! directly: everything leaves the contract as output transfers carrying
//! builtin-function call data.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use dcdt_common::address::Address;
use dcdt_common::dcdt::{
    ConfigRecord, RegistryError, RegistryResult, ReturnCode, StoredTokenRecord, TokenRecord,
    CONFIG_KEY,
};
use dcdt_common::serializer::Serializer;

use crate::flags::EnableFlags;
use crate::gas::GasSchedule;

// ========================================
// Storage and Host Traits
// ========================================

/// Key/value partition owned exclusively by the registry contract.
/// Mutations land in the host's block overlay and are committed or
/// discarded atomically with the rest of the block.
pub trait RegistryStorage {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;
    fn set(&mut self, key: &[u8], value: Vec<u8>);

    fn contains(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }
}

/// Deterministic block execution context provided by the host
pub trait Host {
    /// Random seed of the current block. Part of consensus, not
    /// node-local entropy, so identifier generation replays identically.
    fn block_random_seed(&self) -> Vec<u8>;

    /// Native balance held at the given address (used by claim)
    fn balance(&self, address: &Address) -> U256;
}

// ========================================
// Call ABI
// ========================================

/// Structured inbound call
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VmInput {
    pub caller: Address,
    /// The contract's own address for this deployment
    pub recipient: Address,
    pub call_value: U256,
    pub gas_provided: u64,
    pub function: String,
    pub args: Vec<Vec<u8>>,
}

/// Structured log entry consumed by off-chain indexers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub identifier: Vec<u8>,
    pub address: Address,
    pub topics: Vec<Vec<u8>>,
}

/// Outbound transfer or builtin-function call to another account/shard
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputTransfer {
    pub to: Address,
    pub value: U256,
    pub data: Vec<u8>,
}

impl OutputTransfer {
    /// Function name of a builtin call payload, if any
    pub fn function(&self) -> &[u8] {
        self.data.split(|b| *b == b'@').next().unwrap_or(&[])
    }

    /// Hex-decoded arguments of a builtin call payload
    pub fn call_args(&self) -> Vec<Vec<u8>> {
        self.data
            .split(|b| *b == b'@')
            .skip(1)
            .map(|part| hex::decode(part).unwrap_or_default())
            .collect()
    }
}

/// Everything the host gets back from one executed call
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VmOutput {
    pub return_code: ReturnCode,
    pub return_message: String,
    pub return_data: Vec<Vec<u8>>,
    pub logs: Vec<LogEntry>,
    pub transfers: Vec<OutputTransfer>,
}

// ========================================
// Execution Context
// ========================================

/// Mutable state of a single call: the remaining gas budget and the
/// accumulated outputs. Token records are threaded through operations by
/// value and persisted once; partial mutation is never observable.
pub struct ExecutionContext<'a, S: RegistryStorage, H: Host> {
    pub storage: &'a mut S,
    pub host: &'a H,
    pub input: &'a VmInput,
    pub flags: &'a EnableFlags,
    pub gas: &'a GasSchedule,
    pub num_shards: u8,
    gas_remaining: u64,
    pub return_data: Vec<Vec<u8>>,
    pub logs: Vec<LogEntry>,
    pub transfers: Vec<OutputTransfer>,
}

impl<'a, S: RegistryStorage, H: Host> ExecutionContext<'a, S, H> {
    pub fn new(
        storage: &'a mut S,
        host: &'a H,
        input: &'a VmInput,
        flags: &'a EnableFlags,
        gas: &'a GasSchedule,
        num_shards: u8,
    ) -> Self {
        let gas_remaining = input.gas_provided;
        Self {
            storage,
            host,
            input,
            flags,
            gas,
            num_shards,
            gas_remaining,
            return_data: Vec::new(),
            logs: Vec::new(),
            transfers: Vec::new(),
        }
    }

    /// Deduct a fixed operation cost from the remaining budget
    pub fn use_gas(&mut self, amount: u64) -> RegistryResult<()> {
        if self.gas_remaining < amount {
            return Err(RegistryError::NotEnoughGas);
        }
        self.gas_remaining -= amount;
        Ok(())
    }

    pub fn gas_remaining(&self) -> u64 {
        self.gas_remaining
    }

    /// Append a finish value to the return channel
    pub fn finish(&mut self, data: Vec<u8>) {
        self.return_data.push(data);
    }

    pub fn add_log(&mut self, identifier: &str, address: Address, topics: Vec<Vec<u8>>) {
        self.logs.push(LogEntry {
            identifier: identifier.as_bytes().to_vec(),
            address,
            topics,
        });
    }

    /// Queue a plain value transfer
    pub fn send_value(&mut self, to: Address, value: U256) {
        self.transfers.push(OutputTransfer {
            to,
            value,
            data: Vec::new(),
        });
    }

    /// Queue a builtin-function call: `function@hexarg@hexarg...`.
    /// Fire and forget; delivery is at-least-once and FIFO per sender.
    pub fn send_builtin_call(&mut self, to: Address, function: &str, args: &[&[u8]]) {
        let mut data = function.as_bytes().to_vec();
        for arg in args {
            data.push(b'@');
            data.extend_from_slice(hex::encode(arg).as_bytes());
        }
        self.transfers.push(OutputTransfer {
            to,
            value: U256::zero(),
            data,
        });
    }

    // ===== Record access =====

    pub fn token_exists(&self, token_id: &[u8]) -> bool {
        self.storage.contains(token_id)
    }

    pub fn load_token(&self, token_id: &[u8]) -> RegistryResult<TokenRecord> {
        let bytes = self
            .storage
            .get(token_id)
            .ok_or(RegistryError::TokenNotFound)?;
        Ok(StoredTokenRecord::from_bytes(&bytes)?.upgrade())
    }

    /// Persist a token record in the configured write format
    pub fn save_token(&mut self, token_id: &[u8], record: TokenRecord) {
        let stored = StoredTokenRecord::from_record(record, self.flags.current_token_format);
        self.storage.set(token_id, stored.to_bytes());
    }

    pub fn load_config(&self) -> RegistryResult<ConfigRecord> {
        let bytes = self
            .storage
            .get(CONFIG_KEY)
            .ok_or(RegistryError::TokenNotFound)?;
        Ok(ConfigRecord::from_bytes(&bytes)?)
    }

    pub fn save_config(&mut self, config: ConfigRecord) {
        self.storage.set(CONFIG_KEY, config.to_bytes());
    }

    /// Fold accumulated outputs into the final VmOutput
    pub fn into_output(self, result: RegistryResult<()>) -> VmOutput {
        match result {
            Ok(()) => VmOutput {
                return_code: ReturnCode::Ok,
                return_message: String::new(),
                return_data: self.return_data,
                logs: self.logs,
                transfers: self.transfers,
            },
            // Failed calls commit nothing: the host discards the overlay,
            // so queued outputs are dropped along with it
            Err(err) => VmOutput {
                return_code: err.return_code(),
                return_message: err.to_string(),
                return_data: Vec::new(),
                logs: Vec::new(),
                transfers: Vec::new(),
            },
        }
    }
}
