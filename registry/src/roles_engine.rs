//! Role Management Engine
//!
//! Grants and revokes per-address special roles on a token record,
//! enforcing role legality per token type, the NFT-create exclusivity
//! rule, and the shard-selector distinctness required by multi-shard
//! creation. Returns [`RoleEffects`] describing which global-setting
//! broadcasts the caller must emit afterwards.

use dcdt_common::address::Address;
use dcdt_common::dcdt::{DcdtRole, RegistryError, RegistryResult, RolesRecord, TokenRecord};

/// Transitions observed while changing roles, consumed by the
/// cross-shard broadcaster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleEffects {
    /// A transfer role exists now and did not before
    pub transfer_role_newly_set: bool,
    /// The last transfer role holder was just removed
    pub transfer_role_cleared: bool,
    /// An NFT-create grant happened under multi-shard creation, so the
    /// role notification must carry the multi-shard wire name
    pub multi_shard_create_grant: bool,
}

/// Append the requested roles to the address's role set
pub fn set_roles(
    record: &mut TokenRecord,
    address: &Address,
    roles: &[DcdtRole],
) -> RegistryResult<RoleEffects> {
    if !record.can_add_special_roles {
        return Err(RegistryError::CannotAddSpecialRoles);
    }
    if roles.is_empty() {
        return Err(RegistryError::InvalidNumberOfArguments);
    }

    let had_transfer_role = !record.holders_of(DcdtRole::Transfer).is_empty();

    for role in roles {
        if *role == DcdtRole::BurnForAll {
            // Internal marker, managed through setBurnRoleGlobally only
            return Err(RegistryError::RoleNotAllowedForTokenType);
        }
        if *role == DcdtRole::NftCreate {
            if record.nft_create_stopped {
                return Err(RegistryError::NftCreateStopped);
            }
            let other_holder = record
                .holders_of(DcdtRole::NftCreate)
                .iter()
                .any(|holder| *holder != address);
            if other_holder && !record.can_create_multi_shard {
                return Err(RegistryError::NftCreateRoleAlreadyExists);
            }
        }
    }

    let position = match record
        .special_roles
        .iter()
        .position(|r| &r.address == address)
    {
        Some(position) => position,
        None => {
            record.special_roles.push(RolesRecord::new(address.clone()));
            record.special_roles.len() - 1
        }
    };
    let entry = &mut record.special_roles[position];

    for role in roles {
        if entry.roles.contains(role) {
            return Err(RegistryError::SpecialRoleAlreadyExists);
        }
        entry.roles.push(*role);
    }

    if record.can_create_multi_shard && roles.contains(&DcdtRole::NftCreate) {
        validate_multi_shard_holders(record)?;
    }

    let has_transfer_role = !record.holders_of(DcdtRole::Transfer).is_empty();
    Ok(RoleEffects {
        transfer_role_newly_set: has_transfer_role && !had_transfer_role,
        transfer_role_cleared: false,
        multi_shard_create_grant: record.can_create_multi_shard
            && roles.contains(&DcdtRole::NftCreate),
    })
}

/// Remove the named roles from the address's role set. NFT-create cannot
/// leave through this path; transfer and stop have dedicated operations.
pub fn unset_roles(
    record: &mut TokenRecord,
    address: &Address,
    roles: &[DcdtRole],
) -> RegistryResult<RoleEffects> {
    if roles.is_empty() {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    if roles.contains(&DcdtRole::NftCreate) {
        return Err(RegistryError::CannotUnsetNftCreateRole);
    }
    if roles.contains(&DcdtRole::BurnForAll) {
        // Internal marker, managed through unsetBurnRoleGlobally only
        return Err(RegistryError::RoleNotAllowedForTokenType);
    }

    let entry = record
        .special_roles
        .iter_mut()
        .find(|r| &r.address == address)
        .ok_or(RegistryError::SpecialRoleNotFound)?;

    for role in roles {
        let position = entry
            .roles
            .iter()
            .position(|held| held == role)
            .ok_or(RegistryError::SpecialRoleNotFound)?;
        entry.roles.remove(position);
    }
    // Addresses with no roles left disappear from the record entirely
    record.special_roles.retain(|r| !r.roles.is_empty());

    let transfer_role_cleared = roles.contains(&DcdtRole::Transfer)
        && record.holders_of(DcdtRole::Transfer).is_empty();
    Ok(RoleEffects {
        transfer_role_newly_set: false,
        transfer_role_cleared,
        multi_shard_create_grant: false,
    })
}

/// Every NFT-create holder must live on a distinct shard: their
/// shard-selector bytes must all differ
pub fn validate_multi_shard_holders(record: &TokenRecord) -> RegistryResult<()> {
    let holders = record.holders_of(DcdtRole::NftCreate);
    for (i, holder) in holders.iter().enumerate() {
        for other in &holders[i + 1..] {
            if holder.shard_selector() == other.shard_selector() {
                return Err(RegistryError::InvalidAddress);
            }
        }
    }
    Ok(())
}

/// Check each requested role against the token type and active flags
pub fn validate_role_legality(
    record: &TokenRecord,
    roles: &[DcdtRole],
    transfer_role_enabled: bool,
) -> RegistryResult<()> {
    for role in roles {
        if !role.is_allowed_for(record.token_type, transfer_role_enabled) {
            return Err(RegistryError::RoleNotAllowedForTokenType);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcdt_common::dcdt::{TokenType, REGISTRY_ADDRESS};

    fn address(tag: u8) -> Address {
        let mut bytes = [0u8; 32];
        bytes[0] = 7;
        bytes[31] = tag;
        Address::new(bytes)
    }

    fn nft_token() -> TokenRecord {
        TokenRecord::new(
            address(0),
            "ArtPiece".to_string(),
            "ART".to_string(),
            TokenType::NonFungible,
        )
    }

    #[test]
    fn test_set_and_unset_roundtrip() {
        let mut record = nft_token();
        let holder = address(1);
        set_roles(&mut record, &holder, &[DcdtRole::NftBurn, DcdtRole::NftAddUri]).unwrap();
        assert!(record.roles_of(&holder).unwrap().has_role(DcdtRole::NftBurn));

        unset_roles(&mut record, &holder, &[DcdtRole::NftBurn]).unwrap();
        let entry = record.roles_of(&holder).unwrap();
        assert!(!entry.has_role(DcdtRole::NftBurn));
        assert!(entry.has_role(DcdtRole::NftAddUri));

        // Removing the last role drops the whole record
        unset_roles(&mut record, &holder, &[DcdtRole::NftAddUri]).unwrap();
        assert!(record.roles_of(&holder).is_none());
    }

    #[test]
    fn test_duplicate_role_rejected() {
        let mut record = nft_token();
        let holder = address(1);
        set_roles(&mut record, &holder, &[DcdtRole::NftBurn]).unwrap();
        assert_eq!(
            set_roles(&mut record, &holder, &[DcdtRole::NftBurn]),
            Err(RegistryError::SpecialRoleAlreadyExists)
        );
        // State must be unchanged apart from the failed attempt being
        // discarded by the caller; the set itself holds one entry
        assert_eq!(
            record.roles_of(&holder).unwrap().roles,
            vec![DcdtRole::NftBurn]
        );
    }

    #[test]
    fn test_requires_can_add_special_roles() {
        let mut record = nft_token();
        record.can_add_special_roles = false;
        assert_eq!(
            set_roles(&mut record, &address(1), &[DcdtRole::NftBurn]),
            Err(RegistryError::CannotAddSpecialRoles)
        );
    }

    #[test]
    fn test_nft_create_exclusive_without_multi_shard() {
        let mut record = nft_token();
        set_roles(&mut record, &address(1), &[DcdtRole::NftCreate]).unwrap();
        assert_eq!(
            set_roles(&mut record, &address(2), &[DcdtRole::NftCreate]),
            Err(RegistryError::NftCreateRoleAlreadyExists)
        );
    }

    #[test]
    fn test_nft_create_rejected_after_stop() {
        let mut record = nft_token();
        record.nft_create_stopped = true;
        assert_eq!(
            set_roles(&mut record, &address(1), &[DcdtRole::NftCreate]),
            Err(RegistryError::NftCreateStopped)
        );
    }

    #[test]
    fn test_multi_shard_distinct_selectors() {
        let mut record = nft_token();
        record.can_create_multi_shard = true;

        let effects = set_roles(&mut record, &address(1), &[DcdtRole::NftCreate]).unwrap();
        assert!(effects.multi_shard_create_grant);
        set_roles(&mut record, &address(2), &[DcdtRole::NftCreate]).unwrap();

        // Same selector byte as an existing holder
        let mut clashing = [9u8; 32];
        clashing[31] = 1;
        assert_eq!(
            set_roles(&mut record, &Address::new(clashing), &[DcdtRole::NftCreate]),
            Err(RegistryError::InvalidAddress)
        );
    }

    #[test]
    fn test_unset_nft_create_forbidden() {
        let mut record = nft_token();
        set_roles(&mut record, &address(1), &[DcdtRole::NftCreate]).unwrap();
        assert_eq!(
            unset_roles(&mut record, &address(1), &[DcdtRole::NftCreate]),
            Err(RegistryError::CannotUnsetNftCreateRole)
        );
    }

    #[test]
    fn test_unset_missing_role_rejected() {
        let mut record = nft_token();
        assert_eq!(
            unset_roles(&mut record, &address(1), &[DcdtRole::NftBurn]),
            Err(RegistryError::SpecialRoleNotFound)
        );
        set_roles(&mut record, &address(1), &[DcdtRole::NftBurn]).unwrap();
        assert_eq!(
            unset_roles(&mut record, &address(1), &[DcdtRole::NftAddUri]),
            Err(RegistryError::SpecialRoleNotFound)
        );
    }

    #[test]
    fn test_transfer_role_transitions() {
        let mut record = nft_token();
        let effects = set_roles(&mut record, &address(1), &[DcdtRole::Transfer]).unwrap();
        assert!(effects.transfer_role_newly_set);

        // Second holder: role already globally present
        let effects = set_roles(&mut record, &address(2), &[DcdtRole::Transfer]).unwrap();
        assert!(!effects.transfer_role_newly_set);

        let effects = unset_roles(&mut record, &address(1), &[DcdtRole::Transfer]).unwrap();
        assert!(!effects.transfer_role_cleared);
        let effects = unset_roles(&mut record, &address(2), &[DcdtRole::Transfer]).unwrap();
        assert!(effects.transfer_role_cleared);
    }

    #[test]
    fn test_burn_for_all_not_grantable() {
        let mut record = nft_token();
        assert_eq!(
            set_roles(&mut record, &address(1), &[DcdtRole::BurnForAll]),
            Err(RegistryError::RoleNotAllowedForTokenType)
        );
    }

    #[test]
    fn test_burn_for_all_not_revocable() {
        let mut record = nft_token();
        let mut entry = RolesRecord::new(REGISTRY_ADDRESS);
        entry.roles.push(DcdtRole::BurnForAll);
        record.special_roles.push(entry);

        // The marker never leaves through the generic revoke path, only
        // through unsetBurnRoleGlobally with its unset broadcast
        assert_eq!(
            unset_roles(&mut record, &REGISTRY_ADDRESS, &[DcdtRole::BurnForAll]),
            Err(RegistryError::RoleNotAllowedForTokenType)
        );
        assert!(record
            .roles_of(&REGISTRY_ADDRESS)
            .unwrap()
            .has_role(DcdtRole::BurnForAll));
    }

    #[test]
    fn test_role_legality_validation() {
        let record = nft_token();
        assert!(validate_role_legality(&record, &[DcdtRole::NftBurn], false).is_ok());
        assert_eq!(
            validate_role_legality(&record, &[DcdtRole::LocalMint], false),
            Err(RegistryError::RoleNotAllowedForTokenType)
        );
        assert_eq!(
            validate_role_legality(&record, &[DcdtRole::NftAddUri], false),
            Err(RegistryError::RoleNotAllowedForTokenType)
        );
        assert!(validate_role_legality(&record, &[DcdtRole::NftAddUri], true).is_ok());
    }
}
