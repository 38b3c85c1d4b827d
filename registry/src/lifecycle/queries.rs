//! Read-Only Queries
//!
//! Reporting entry points consumed by wallets and explorers. Results go
//! out as finish values, one topic of the token's state per entry, in the
//! historical text renderings clients already parse.

use dcdt_common::dcdt::{DcdtRole, RegistryError, RegistryResult, REGISTRY_ADDRESS};
use dcdt_common::serializer::Serializer;

use crate::lifecycle::value_to_bytes;
use crate::properties::render_properties;
use crate::vm::{ExecutionContext, Host, RegistryStorage};

/// Report name, type, owner, supply totals and the full property list.
/// Args: token identifier
pub fn get_token_properties<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    let token = query_checks(ctx)?;

    ctx.finish(token.name.as_bytes().to_vec());
    ctx.finish(token.token_type.name().as_bytes().to_vec());
    ctx.finish(token.owner.to_bytes());
    ctx.finish(value_to_bytes(&token.minted_value));
    ctx.finish(value_to_bytes(&token.burnt_value));
    for property in render_properties(&token) {
        ctx.finish(property.into_bytes());
    }
    Ok(())
}

/// Report each role holder as `hexaddress:role1,role2`.
/// Args: token identifier
pub fn get_special_roles<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    let token = query_checks(ctx)?;

    for entry in &token.special_roles {
        if entry.address == REGISTRY_ADDRESS {
            continue;
        }
        let names: Vec<&str> = entry.roles.iter().map(DcdtRole::name).collect();
        let line = format!("{}:{}", entry.address.to_hex(), names.join(","));
        ctx.finish(line.into_bytes());
    }
    Ok(())
}

/// Report raw address bytes followed by that address's role names, for
/// every holder including the token-wide burn marker.
/// Args: token identifier
pub fn get_all_addresses_and_roles<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    let token = query_checks(ctx)?;

    for entry in &token.special_roles {
        ctx.finish(entry.address.to_bytes());
        for role in &entry.roles {
            ctx.finish(role.name().as_bytes().to_vec());
        }
    }
    Ok(())
}

/// Report the configuration record: owner, issuing cost, name bounds.
/// No args.
pub fn get_contract_config<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    if !ctx.input.call_value.is_zero() {
        return Err(RegistryError::CallValueMustBeZero);
    }
    ctx.use_gas(ctx.gas.dcdt_operation)?;
    if !ctx.input.args.is_empty() {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    let config = ctx.load_config()?;

    ctx.finish(config.owner.to_bytes());
    ctx.finish(value_to_bytes(&config.base_issuing_cost));
    ctx.finish(config.min_token_name_length.to_string().into_bytes());
    ctx.finish(config.max_token_name_length.to_string().into_bytes());
    Ok(())
}

fn query_checks<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<dcdt_common::dcdt::TokenRecord> {
    if !ctx.input.call_value.is_zero() {
        return Err(RegistryError::CallValueMustBeZero);
    }
    ctx.use_gas(ctx.gas.dcdt_operation)?;
    if ctx.input.args.len() != 1 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    ctx.load_token(&ctx.input.args[0])
}
