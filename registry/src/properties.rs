//! Property Upgrade Engine
//!
//! Applies the boolean capability set of a token from a flat list of
//! `(property name, "true"|"false")` argument pairs, both at issuance and
//! through the owner-driven controlChanges call. Every invocation emits
//! one self-describing audit log entry, even with zero arguments.

use dcdt_common::dcdt::{
    RegistryError, RegistryResult, TokenRecord, TokenType, PROPERTY_CAN_ADD_SPECIAL_ROLES,
    PROPERTY_CAN_BURN, PROPERTY_CAN_CHANGE_OWNER, PROPERTY_CAN_CREATE_MULTI_SHARD,
    PROPERTY_CAN_FREEZE, PROPERTY_CAN_MINT, PROPERTY_CAN_PAUSE,
    PROPERTY_CAN_TRANSFER_NFT_CREATE_ROLE, PROPERTY_CAN_UPGRADE, PROPERTY_CAN_WIPE,
};

use crate::vm::{ExecutionContext, Host, RegistryStorage};

/// Audit log identifier of every property change
pub const UPGRADE_PROPERTIES_LOG: &str = "upgradeProperties";

fn parse_bool(value: &[u8]) -> RegistryResult<bool> {
    match value {
        b"true" => Ok(true),
        b"false" => Ok(false),
        _ => Err(RegistryError::InvalidArgument(
            "invalid boolean value".into(),
        )),
    }
}

/// Apply an argument pair list onto the record and emit the audit log.
/// `is_create` widens what may be set: the multi-shard capability is
/// creation-only.
pub fn upgrade_properties<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
    token_id: &[u8],
    record: &mut TokenRecord,
    args: &[Vec<u8>],
    is_create: bool,
) -> RegistryResult<()> {
    if args.len() % 2 != 0 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }

    let mut seen: Vec<&[u8]> = Vec::with_capacity(args.len() / 2);
    for pair in args.chunks_exact(2) {
        let name = pair[0].as_slice();
        if seen.contains(&name) {
            return Err(RegistryError::InvalidArgument(
                "duplicate property name".into(),
            ));
        }
        seen.push(name);

        let value = parse_bool(&pair[1])?;
        apply_property(ctx, record, name, value, is_create)?;
    }

    emit_audit_log(ctx, token_id, record, args);
    Ok(())
}

fn apply_property<S: RegistryStorage, H: Host>(
    ctx: &ExecutionContext<S, H>,
    record: &mut TokenRecord,
    name: &[u8],
    value: bool,
    is_create: bool,
) -> RegistryResult<()> {
    let name = String::from_utf8_lossy(name);
    match name.as_ref() {
        PROPERTY_CAN_FREEZE => record.can_freeze = value,
        PROPERTY_CAN_WIPE => record.can_wipe = value,
        PROPERTY_CAN_PAUSE => record.can_pause = value,
        PROPERTY_CAN_CHANGE_OWNER => record.can_change_owner = value,
        PROPERTY_CAN_UPGRADE => record.upgradable = value,
        PROPERTY_CAN_ADD_SPECIAL_ROLES => record.can_add_special_roles = value,
        PROPERTY_CAN_TRANSFER_NFT_CREATE_ROLE => record.can_transfer_nft_create_role = value,
        PROPERTY_CAN_MINT => {
            if record.token_type != TokenType::Fungible {
                return Err(RegistryError::InvalidArgument(
                    "cannot set mintable on a non-fungible token".into(),
                ));
            }
            record.mintable = value;
        }
        PROPERTY_CAN_BURN => {
            if record.token_type != TokenType::Fungible {
                return Err(RegistryError::InvalidArgument(
                    "cannot set burnable on a non-fungible token".into(),
                ));
            }
            record.burnable = value;
        }
        PROPERTY_CAN_CREATE_MULTI_SHARD => {
            // Creation-only capability, for tokens with per-nonce creation
            if !is_create || !ctx.flags.multi_shard_create
                || record.token_type == TokenType::Fungible
            {
                return Err(RegistryError::InvalidArgument(
                    "canCreateMultiShard can only be set at creation time".into(),
                ));
            }
            record.can_create_multi_shard = value;
        }
        _ => return Err(RegistryError::InvalidArgument(name.into_owned())),
    }
    Ok(())
}

/// Topics: token id, zero-nonce marker, the caller's pairs verbatim, then
/// canUpgrade/canAddSpecialRoles appended when the caller omitted them so
/// the entry always describes the full resulting upgrade surface.
fn emit_audit_log<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
    token_id: &[u8],
    record: &TokenRecord,
    args: &[Vec<u8>],
) {
    let mut topics: Vec<Vec<u8>> = Vec::with_capacity(args.len() + 6);
    topics.push(token_id.to_vec());
    // Nonce zero renders as an empty big-endian encoding
    topics.push(Vec::new());
    topics.extend(args.iter().cloned());

    let mentioned = |name: &[u8]| args.chunks_exact(2).any(|pair| pair[0] == name);
    for (name, value) in [
        (PROPERTY_CAN_UPGRADE, record.upgradable),
        (PROPERTY_CAN_ADD_SPECIAL_ROLES, record.can_add_special_roles),
    ] {
        if !mentioned(name.as_bytes()) {
            topics.push(name.as_bytes().to_vec());
            topics.push(if value { b"true".to_vec() } else { b"false".to_vec() });
        }
    }

    let caller = ctx.input.caller.clone();
    ctx.add_log(UPGRADE_PROPERTIES_LOG, caller, topics);
}

/// Property list reported by getTokenProperties, `Name-true` style
pub fn render_properties(record: &TokenRecord) -> Vec<String> {
    [
        ("NumDecimals", None, Some(record.num_decimals as u64)),
        ("IsPaused", Some(record.is_paused), None),
        ("CanUpgrade", Some(record.upgradable), None),
        ("CanMint", Some(record.mintable), None),
        ("CanBurn", Some(record.burnable), None),
        ("CanChangeOwner", Some(record.can_change_owner), None),
        ("CanPause", Some(record.can_pause), None),
        ("CanFreeze", Some(record.can_freeze), None),
        ("CanWipe", Some(record.can_wipe), None),
        (
            "CanAddSpecialRoles",
            Some(record.can_add_special_roles),
            None,
        ),
        (
            "CanTransferNFTCreateRole",
            Some(record.can_transfer_nft_create_role),
            None,
        ),
        ("NFTCreateStopped", Some(record.nft_create_stopped), None),
        ("NumWiped", None, Some(record.num_wiped)),
    ]
    .into_iter()
    .map(|(name, flag, number)| match (flag, number) {
        (Some(flag), _) => format!("{}-{}", name, flag),
        (_, Some(number)) => format!("{}-{}", name, number),
        _ => unreachable!(),
    })
    .collect()
}
