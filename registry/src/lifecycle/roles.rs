//! Special Role Operations
//!
//! Owner-driven grants and revocations of per-address roles, the global
//! burn marker and the transfer-role re-broadcast. Role changes are
//! recorded in the token record first, then mirrored to the per-shard
//! enforcement layer through builtin calls.

use dcdt_common::address::Address;
use dcdt_common::dcdt::{
    DcdtRole, RegistryError, RegistryResult, RolesRecord, BUILTIN_SET_ROLE, BUILTIN_UNSET_ROLE,
    MULTI_SHARD_CREATE_ROLE_NAME, REGISTRY_ADDRESS,
};

use crate::broadcast::{send_global_setting_to_all, GlobalSetting};
use crate::guard::basic_ownership_checks;
use crate::lifecycle::{parse_address, parse_roles};
use crate::roles_engine;
use crate::vm::{ExecutionContext, Host, RegistryStorage};

/// Tell the address's shard which roles changed. Multi-shard NFT-create
/// grants travel under their dedicated wire name.
pub(crate) fn send_role_notification<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
    token_id: &[u8],
    address: &Address,
    builtin: &str,
    roles: &[DcdtRole],
    multi_shard_create: bool,
) {
    let mut args: Vec<&[u8]> = Vec::with_capacity(roles.len() + 1);
    args.push(token_id);
    for role in roles {
        if multi_shard_create && *role == DcdtRole::NftCreate {
            args.push(MULTI_SHARD_CREATE_ROLE_NAME.as_bytes());
        } else {
            args.push(role.name().as_bytes());
        }
    }
    ctx.send_builtin_call(address.clone(), builtin, &args);
}

/// Grant roles to an address.
/// Args: token identifier, address, role names...
pub fn set_special_role<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    let (token_id, mut token) = basic_ownership_checks(ctx)?;
    if ctx.input.args.len() < 3 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    let address = parse_address(&ctx.input.args[1])?;
    let roles = parse_roles(&ctx.input.args[2..])?;
    roles_engine::validate_role_legality(&token, &roles, ctx.flags.transfer_role)?;

    let effects = roles_engine::set_roles(&mut token, &address, &roles)?;
    ctx.save_token(&token_id, token);

    if effects.transfer_role_newly_set {
        send_global_setting_to_all(ctx, &token_id, &GlobalSetting::SetLimitedTransfer);
    }
    if roles.contains(&DcdtRole::Transfer) {
        send_global_setting_to_all(
            ctx,
            &token_id,
            &GlobalSetting::AddTransferRoleAddress(address.clone()),
        );
    }
    send_role_notification(
        ctx,
        &token_id,
        &address,
        BUILTIN_SET_ROLE,
        &roles,
        effects.multi_shard_create_grant,
    );
    Ok(())
}

/// Revoke roles from an address.
/// Args: token identifier, address, role names...
pub fn unset_special_role<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    let (token_id, mut token) = basic_ownership_checks(ctx)?;
    if ctx.input.args.len() < 3 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    let address = parse_address(&ctx.input.args[1])?;
    let roles = parse_roles(&ctx.input.args[2..])?;

    let effects = roles_engine::unset_roles(&mut token, &address, &roles)?;
    ctx.save_token(&token_id, token);

    if roles.contains(&DcdtRole::Transfer) {
        send_global_setting_to_all(
            ctx,
            &token_id,
            &GlobalSetting::DeleteTransferRoleAddress(address.clone()),
        );
    }
    if effects.transfer_role_cleared {
        send_global_setting_to_all(ctx, &token_id, &GlobalSetting::UnsetLimitedTransfer);
    }
    send_role_notification(ctx, &token_id, &address, BUILTIN_UNSET_ROLE, &roles, false);
    Ok(())
}

/// Mark the token as burnable by everyone.
/// Args: token identifier
pub fn set_burn_role_globally<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    if !ctx.flags.burn_role_for_all {
        return Err(RegistryError::FunctionNotFound);
    }
    let (token_id, mut token) = basic_ownership_checks(ctx)?;
    if ctx.input.args.len() != 1 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    if burn_for_all_active(&token) {
        return Err(RegistryError::SpecialRoleAlreadyExists);
    }

    // The marker lives under the registry's own address in the record
    let mut entry = RolesRecord::new(REGISTRY_ADDRESS);
    entry.roles.push(DcdtRole::BurnForAll);
    token.special_roles.push(entry);
    ctx.save_token(&token_id, token);

    send_global_setting_to_all(ctx, &token_id, &GlobalSetting::SetBurnRoleForAll);
    Ok(())
}

/// Remove the token-wide burn grant.
/// Args: token identifier
pub fn unset_burn_role_globally<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    if !ctx.flags.burn_role_for_all {
        return Err(RegistryError::FunctionNotFound);
    }
    let (token_id, mut token) = basic_ownership_checks(ctx)?;
    if ctx.input.args.len() != 1 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    if !burn_for_all_active(&token) {
        return Err(RegistryError::SpecialRoleNotFound);
    }

    for entry in &mut token.special_roles {
        if entry.address == REGISTRY_ADDRESS {
            entry.roles.retain(|role| *role != DcdtRole::BurnForAll);
        }
    }
    token.special_roles.retain(|entry| !entry.roles.is_empty());
    ctx.save_token(&token_id, token);

    send_global_setting_to_all(ctx, &token_id, &GlobalSetting::UnsetBurnRoleForAll);
    Ok(())
}

/// Re-broadcast every transfer role holder to all shards, for shards that
/// may have missed earlier messages.
/// Args: token identifier
pub fn send_all_transfer_role_addresses<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    if !ctx.flags.transfer_role {
        return Err(RegistryError::FunctionNotFound);
    }
    let (token_id, token) = basic_ownership_checks(ctx)?;
    if ctx.input.args.len() != 1 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }

    let holders: Vec<Address> = token
        .holders_of(DcdtRole::Transfer)
        .into_iter()
        .cloned()
        .collect();
    if holders.is_empty() {
        return Err(RegistryError::NoTransferRoleAddresses);
    }
    for holder in holders {
        send_global_setting_to_all(
            ctx,
            &token_id,
            &GlobalSetting::AddTransferRoleAddress(holder),
        );
    }
    Ok(())
}

fn burn_for_all_active(token: &dcdt_common::dcdt::TokenRecord) -> bool {
    token
        .roles_of(&REGISTRY_ADDRESS)
        .is_some_and(|entry| entry.has_role(DcdtRole::BurnForAll))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::EnableFlags;
    use crate::gas::GasSchedule;
    use crate::testing::{MemoryStorage, TestHost};
    use crate::vm::VmInput;
    use dcdt_common::dcdt::{TokenRecord, TokenType};
    use dcdt_common::serializer::Serializer;
    use primitive_types::U256;

    fn owner() -> Address {
        Address::new([1u8; 32])
    }

    fn holder() -> Address {
        Address::new([3u8; 32])
    }

    fn seeded_storage(token_type: TokenType) -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        let record = TokenRecord::new(
            owner(),
            "AliceToken".to_string(),
            "ALC".to_string(),
            token_type,
        );
        storage.set(
            b"ALC-0a1b2c",
            dcdt_common::dcdt::StoredTokenRecord::from_record(record, true).to_bytes(),
        );
        storage
    }

    fn input(args: Vec<Vec<u8>>) -> VmInput {
        VmInput {
            caller: owner(),
            recipient: Address::new([2u8; 32]),
            call_value: U256::zero(),
            gas_provided: u64::MAX,
            function: "setSpecialRole".to_string(),
            args,
        }
    }

    #[test]
    fn test_set_special_role_notifies_shard() {
        let mut storage = seeded_storage(TokenType::Fungible);
        let host = TestHost::new();
        let input = input(vec![
            b"ALC-0a1b2c".to_vec(),
            holder().to_bytes(),
            b"DCDTRoleLocalMint".to_vec(),
            b"DCDTRoleLocalBurn".to_vec(),
        ]);
        let flags = EnableFlags::default();
        let gas = GasSchedule::default();
        let mut ctx = ExecutionContext::new(&mut storage, &host, &input, &flags, &gas, 3);

        set_special_role(&mut ctx).unwrap();

        let token = ctx.load_token(b"ALC-0a1b2c").unwrap();
        let entry = token.roles_of(&holder()).unwrap();
        assert_eq!(entry.roles, vec![DcdtRole::LocalMint, DcdtRole::LocalBurn]);

        let notification = ctx
            .transfers
            .iter()
            .find(|t| t.function() == b"DCDTSetRole")
            .unwrap();
        assert_eq!(notification.to, holder());
        assert_eq!(
            notification.call_args(),
            vec![
                b"ALC-0a1b2c".to_vec(),
                b"DCDTRoleLocalMint".to_vec(),
                b"DCDTRoleLocalBurn".to_vec(),
            ]
        );
    }

    #[test]
    fn test_set_transfer_role_triggers_broadcasts() {
        let mut storage = seeded_storage(TokenType::Fungible);
        let host = TestHost::new();
        let input = input(vec![
            b"ALC-0a1b2c".to_vec(),
            holder().to_bytes(),
            b"DCDTRoleTransfer".to_vec(),
        ]);
        let flags = EnableFlags::default();
        let gas = GasSchedule::default();
        let mut ctx = ExecutionContext::new(&mut storage, &host, &input, &flags, &gas, 3);

        set_special_role(&mut ctx).unwrap();

        // First holder flips the token into limited-transfer mode
        let limited: Vec<_> = ctx
            .transfers
            .iter()
            .filter(|t| t.function() == b"DCDTSetLimitedTransfer")
            .collect();
        assert_eq!(limited.len(), 3);
        let added: Vec<_> = ctx
            .transfers
            .iter()
            .filter(|t| t.function() == b"DCDTTransferRoleAddAddress")
            .collect();
        assert_eq!(added.len(), 3);
        assert_eq!(
            added[0].call_args(),
            vec![b"ALC-0a1b2c".to_vec(), holder().to_bytes()]
        );
    }

    #[test]
    fn test_set_transfer_role_rejected_when_flag_off() {
        let mut storage = seeded_storage(TokenType::Fungible);
        let host = TestHost::new();
        let input = input(vec![
            b"ALC-0a1b2c".to_vec(),
            holder().to_bytes(),
            b"DCDTRoleTransfer".to_vec(),
        ]);
        let flags = EnableFlags {
            transfer_role: false,
            ..EnableFlags::default()
        };
        let gas = GasSchedule::default();
        let mut ctx = ExecutionContext::new(&mut storage, &host, &input, &flags, &gas, 3);

        assert_eq!(
            set_special_role(&mut ctx).unwrap_err(),
            RegistryError::RoleNotAllowedForTokenType
        );
    }

    #[test]
    fn test_unset_last_transfer_role_clears_limited_transfer() {
        let mut storage = seeded_storage(TokenType::Fungible);
        let host = TestHost::new();
        let flags = EnableFlags::default();
        let gas = GasSchedule::default();

        let set_input = input(vec![
            b"ALC-0a1b2c".to_vec(),
            holder().to_bytes(),
            b"DCDTRoleTransfer".to_vec(),
        ]);
        {
            let mut ctx = ExecutionContext::new(&mut storage, &host, &set_input, &flags, &gas, 3);
            set_special_role(&mut ctx).unwrap();
        }

        let unset_input = input(vec![
            b"ALC-0a1b2c".to_vec(),
            holder().to_bytes(),
            b"DCDTRoleTransfer".to_vec(),
        ]);
        let mut ctx = ExecutionContext::new(&mut storage, &host, &unset_input, &flags, &gas, 3);
        unset_special_role(&mut ctx).unwrap();

        assert!(ctx
            .transfers
            .iter()
            .any(|t| t.function() == b"DCDTTransferRoleDeleteAddress"));
        assert!(ctx
            .transfers
            .iter()
            .any(|t| t.function() == b"DCDTUnSetLimitedTransfer"));
        let token = ctx.load_token(b"ALC-0a1b2c").unwrap();
        assert!(token.roles_of(&holder()).is_none());
    }

    #[test]
    fn test_burn_role_globally_round_trip() {
        let mut storage = seeded_storage(TokenType::Fungible);
        let host = TestHost::new();
        let flags = EnableFlags::default();
        let gas = GasSchedule::default();

        let set_input = input(vec![b"ALC-0a1b2c".to_vec()]);
        {
            let mut ctx = ExecutionContext::new(&mut storage, &host, &set_input, &flags, &gas, 3);
            set_burn_role_globally(&mut ctx).unwrap();
            let token = ctx.load_token(b"ALC-0a1b2c").unwrap();
            assert!(burn_for_all_active(&token));
            // Setting twice is an error
            assert_eq!(
                set_burn_role_globally(&mut ctx).unwrap_err(),
                RegistryError::SpecialRoleAlreadyExists
            );
        }

        let unset_input = input(vec![b"ALC-0a1b2c".to_vec()]);
        let mut ctx = ExecutionContext::new(&mut storage, &host, &unset_input, &flags, &gas, 3);
        unset_burn_role_globally(&mut ctx).unwrap();
        let token = ctx.load_token(b"ALC-0a1b2c").unwrap();
        assert!(!burn_for_all_active(&token));
        assert!(ctx
            .transfers
            .iter()
            .any(|t| t.function() == b"DCDTUnSetBurnRoleForAll"));
    }

    #[test]
    fn test_send_all_transfer_role_addresses_requires_holders() {
        let mut storage = seeded_storage(TokenType::Fungible);
        let host = TestHost::new();
        let input = input(vec![b"ALC-0a1b2c".to_vec()]);
        let flags = EnableFlags::default();
        let gas = GasSchedule::default();
        let mut ctx = ExecutionContext::new(&mut storage, &host, &input, &flags, &gas, 3);

        assert_eq!(
            send_all_transfer_role_addresses(&mut ctx).unwrap_err(),
            RegistryError::NoTransferRoleAddresses
        );
    }
}
