//! DCDT Token Registry Contract
//!
//! Built-in contract of the protocol, deployed at a fixed address on the
//! metachain shard. It owns the global catalog of DCDT tokens: issuance,
//! capability upgrades, per-address roles, freeze/wipe/pause enforcement
//! and the cross-shard mirroring of token-wide settings. Everything is a
//! deterministic function of (stored state, call input, configuration):
//! no clocks, no node-local entropy, no I/O beyond the injected storage
//! and host seams.

pub mod broadcast;
pub mod dispatcher;
pub mod flags;
pub mod gas;
pub mod guard;
pub mod identifier;
pub mod lifecycle;
pub mod properties;
pub mod roles_engine;
pub mod testing;
pub mod vm;

use primitive_types::U256;

use dcdt_common::address::Address;
use dcdt_common::dcdt::{
    ConfigRecord, RegistryError, RegistryInitError, RegistryResult,
};

use crate::flags::EnableFlags;
use crate::gas::GasSchedule;
use crate::vm::{ExecutionContext, Host, RegistryStorage, VmInput, VmOutput};

/// The registry contract instance: its feature flags, gas schedule, shard
/// count and the configuration it deploys with. Immutable once built;
/// per-call state lives in the [`ExecutionContext`].
pub struct TokenRegistry {
    init_config: ConfigRecord,
    flags: EnableFlags,
    gas: GasSchedule,
    num_shards: u8,
}

impl TokenRegistry {
    /// Validate the genesis parameters and build the instance. The
    /// issuing cost arrives as a decimal string straight from the
    /// chain configuration.
    pub fn new(
        config_owner: Address,
        base_issuing_cost: &str,
        min_token_name_length: u32,
        max_token_name_length: u32,
        flags: EnableFlags,
        num_shards: u8,
    ) -> Result<Self, RegistryInitError> {
        let base_issuing_cost = U256::from_dec_str(base_issuing_cost)
            .map_err(|_| RegistryInitError::InvalidBaseIssuingCost)?;
        if min_token_name_length > max_token_name_length || min_token_name_length == 0 {
            return Err(RegistryInitError::InvalidNameLengthBounds);
        }
        if num_shards == 0 {
            return Err(RegistryInitError::NoShards);
        }
        // Multi-shard creation cannot be represented in the legacy
        // stored format
        if flags.multi_shard_create && !flags.current_token_format {
            return Err(RegistryInitError::IncompatibleFlags);
        }
        Ok(Self {
            init_config: ConfigRecord {
                owner: config_owner,
                base_issuing_cost,
                min_token_name_length,
                max_token_name_length,
            },
            flags,
            gas: GasSchedule::default(),
            num_shards,
        })
    }

    pub fn set_gas_schedule(&mut self, gas: GasSchedule) {
        self.gas = gas;
    }

    pub fn flags(&self) -> &EnableFlags {
        &self.flags
    }

    /// Execute one call. Never panics and never returns Err: every
    /// failure folds into the output's return code and message.
    pub fn execute<S: RegistryStorage, H: Host>(
        &self,
        storage: &mut S,
        host: &H,
        input: &VmInput,
    ) -> VmOutput {
        log::debug!(
            "executing {} from {} with {} args",
            input.function,
            input.caller.to_hex(),
            input.args.len()
        );
        let mut ctx = ExecutionContext::new(
            storage,
            host,
            input,
            &self.flags,
            &self.gas,
            self.num_shards,
        );
        let result = if input.function == "_init" {
            self.init(&mut ctx)
        } else {
            dispatcher::dispatch(&mut ctx)
        };
        if let Err(err) = &result {
            log::debug!("call {} failed: {}", input.function, err);
        }
        ctx.into_output(result)
    }

    /// Deployment entry point: writes the configuration record. Runs
    /// exactly once, at genesis.
    fn init<S: RegistryStorage, H: Host>(
        &self,
        ctx: &mut ExecutionContext<S, H>,
    ) -> RegistryResult<()> {
        if !ctx.input.call_value.is_zero() {
            return Err(RegistryError::CallValueMustBeZero);
        }
        if ctx.load_config().is_ok() {
            return Err(RegistryError::InvalidArgument(
                "registry already initialized".into(),
            ));
        }
        ctx.save_config(self.init_config.clone());
        Ok(())
    }
}
