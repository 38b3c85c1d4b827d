//! Ownership & NFT-Create Operations
//!
//! Transfer of the management owner, the movement and retirement of the
//! NFT-create role and the one-way switch into multi-shard creation.

use dcdt_common::address::Address;
use dcdt_common::dcdt::{
    DcdtRole, RegistryError, RegistryResult, TokenType, BUILTIN_SET_ROLE, BUILTIN_UNSET_ROLE,
};

use crate::guard::basic_ownership_checks;
use crate::lifecycle::parse_address;
use crate::lifecycle::roles::send_role_notification;
use crate::roles_engine::validate_multi_shard_holders;
use crate::vm::{ExecutionContext, Host, RegistryStorage};

/// Hand the management owner seat to another address.
/// Args: token identifier, new owner
pub fn transfer_ownership<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    let (token_id, mut token) = basic_ownership_checks(ctx)?;
    if ctx.input.args.len() != 2 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    if !token.can_change_owner {
        return Err(RegistryError::OwnerNotChangeable);
    }
    token.owner = parse_address(&ctx.input.args[1])?;
    ctx.save_token(&token_id, token);
    Ok(())
}

/// Move the NFT-create role from its current holder to a new one.
/// Args: token identifier, current holder, new holder
pub fn transfer_nft_create_role<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    let (token_id, mut token) = basic_ownership_checks(ctx)?;
    if ctx.input.args.len() != 3 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    if token.token_type == TokenType::Fungible {
        return Err(RegistryError::InvalidTokenType);
    }
    if !token.can_transfer_nft_create_role {
        return Err(RegistryError::NftCreateRoleNotTransferable);
    }
    if token.nft_create_stopped {
        return Err(RegistryError::NftCreateStopped);
    }
    let current = parse_address(&ctx.input.args[1])?;
    let new = parse_address(&ctx.input.args[2])?;

    let holds = token
        .roles_of(&current)
        .is_some_and(|entry| entry.has_role(DcdtRole::NftCreate));
    if !holds {
        return Err(RegistryError::SpecialRoleNotFound);
    }
    // Under multi-shard creation the role may only move within its shard,
    // otherwise two holders could end up on the same shard
    if token.can_create_multi_shard && current.shard_selector() != new.shard_selector() {
        return Err(RegistryError::InvalidAddress);
    }

    remove_role(&mut token, &current, DcdtRole::NftCreate);
    match token
        .special_roles
        .iter_mut()
        .find(|entry| entry.address == new)
    {
        Some(entry) => {
            if entry.has_role(DcdtRole::NftCreate) {
                return Err(RegistryError::SpecialRoleAlreadyExists);
            }
            entry.roles.push(DcdtRole::NftCreate);
        }
        None => {
            let mut entry = dcdt_common::dcdt::RolesRecord::new(new.clone());
            entry.roles.push(DcdtRole::NftCreate);
            token.special_roles.push(entry);
        }
    }
    let multi_shard = token.can_create_multi_shard;
    ctx.save_token(&token_id, token);

    send_role_notification(
        ctx,
        &token_id,
        &current,
        BUILTIN_UNSET_ROLE,
        &[DcdtRole::NftCreate],
        multi_shard,
    );
    send_role_notification(
        ctx,
        &token_id,
        &new,
        BUILTIN_SET_ROLE,
        &[DcdtRole::NftCreate],
        multi_shard,
    );
    Ok(())
}

/// Retire NFT creation for good: every current holder loses the role and
/// no future grant is accepted.
/// Args: token identifier
pub fn stop_nft_create<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    let (token_id, mut token) = basic_ownership_checks(ctx)?;
    if ctx.input.args.len() != 1 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    if token.token_type == TokenType::Fungible {
        return Err(RegistryError::InvalidTokenType);
    }
    if token.nft_create_stopped {
        return Err(RegistryError::NftCreateStopped);
    }

    let holders: Vec<Address> = token
        .holders_of(DcdtRole::NftCreate)
        .into_iter()
        .cloned()
        .collect();
    for holder in &holders {
        remove_role(&mut token, holder, DcdtRole::NftCreate);
    }
    token.nft_create_stopped = true;
    let multi_shard = token.can_create_multi_shard;
    ctx.save_token(&token_id, token);

    for holder in &holders {
        send_role_notification(
            ctx,
            &token_id,
            holder,
            BUILTIN_UNSET_ROLE,
            &[DcdtRole::NftCreate],
            multi_shard,
        );
    }
    Ok(())
}

/// One-way switch into multi-shard NFT creation.
/// Args: token identifier
pub fn change_to_multi_shard_create<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    if !ctx.flags.multi_shard_create {
        return Err(RegistryError::FunctionNotFound);
    }
    let (token_id, mut token) = basic_ownership_checks(ctx)?;
    if ctx.input.args.len() != 1 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    if token.token_type == TokenType::Fungible {
        return Err(RegistryError::InvalidTokenType);
    }
    if !token.can_transfer_nft_create_role {
        return Err(RegistryError::NftCreateRoleNotTransferable);
    }
    if token.can_create_multi_shard {
        return Err(RegistryError::InvalidArgument(
            "token already set to multi-shard creation".into(),
        ));
    }

    token.can_create_multi_shard = true;
    validate_multi_shard_holders(&token)?;
    let holders: Vec<Address> = token
        .holders_of(DcdtRole::NftCreate)
        .into_iter()
        .cloned()
        .collect();
    ctx.save_token(&token_id, token);

    // Existing holders switch to the multi-shard wire name
    for holder in &holders {
        send_role_notification(
            ctx,
            &token_id,
            holder,
            BUILTIN_SET_ROLE,
            &[DcdtRole::NftCreate],
            true,
        );
    }
    Ok(())
}

fn remove_role(token: &mut dcdt_common::dcdt::TokenRecord, address: &Address, role: DcdtRole) {
    for entry in &mut token.special_roles {
        if &entry.address == address {
            entry.roles.retain(|held| *held != role);
        }
    }
    token.special_roles.retain(|entry| !entry.roles.is_empty());
}
