//! Function Dispatch
//!
//! Maps the inbound function name onto its operation. The table is the
//! enum itself, fixed at compile time: no registration step, nothing to
//! mutate at runtime, and an unknown name falls out of parsing as
//! FunctionNotFound before any state is touched.

use std::str::FromStr;

use strum::EnumString;

use dcdt_common::dcdt::{RegistryError, RegistryResult};

use crate::lifecycle::{admin, freeze_wipe, issue, ownership, pause, queries, roles, supply};
use crate::vm::{ExecutionContext, Host, RegistryStorage};

/// Every callable function, spelled exactly as it appears on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum Function {
    #[strum(serialize = "_init")]
    Init,
    #[strum(serialize = "issue")]
    Issue,
    #[strum(serialize = "issueSemiFungible")]
    IssueSemiFungible,
    #[strum(serialize = "issueNonFungible")]
    IssueNonFungible,
    #[strum(serialize = "registerMetaDCDT")]
    RegisterMetaDcdt,
    #[strum(serialize = "changeSFTToMetaDCDT")]
    ChangeSftToMetaDcdt,
    #[strum(serialize = "registerAndSetAllRoles")]
    RegisterAndSetAllRoles,
    #[strum(serialize = "mint")]
    Mint,
    #[strum(serialize = "DCDTBurn")]
    Burn,
    #[strum(serialize = "freeze")]
    Freeze,
    #[strum(serialize = "unFreeze")]
    UnFreeze,
    #[strum(serialize = "wipe")]
    Wipe,
    #[strum(serialize = "freezeSingleNFT")]
    FreezeSingleNft,
    #[strum(serialize = "unFreezeSingleNFT")]
    UnFreezeSingleNft,
    #[strum(serialize = "wipeSingleNFT")]
    WipeSingleNft,
    #[strum(serialize = "pause")]
    Pause,
    #[strum(serialize = "unPause")]
    UnPause,
    #[strum(serialize = "transferOwnership")]
    TransferOwnership,
    #[strum(serialize = "setSpecialRole")]
    SetSpecialRole,
    #[strum(serialize = "unSetSpecialRole")]
    UnSetSpecialRole,
    #[strum(serialize = "transferNFTCreateRole")]
    TransferNftCreateRole,
    #[strum(serialize = "stopNFTCreate")]
    StopNftCreate,
    #[strum(serialize = "changeToMultiShardCreate")]
    ChangeToMultiShardCreate,
    #[strum(serialize = "setBurnRoleGlobally")]
    SetBurnRoleGlobally,
    #[strum(serialize = "unsetBurnRoleGlobally")]
    UnsetBurnRoleGlobally,
    #[strum(serialize = "sendAllTransferRoleAddresses")]
    SendAllTransferRoleAddresses,
    #[strum(serialize = "claim")]
    Claim,
    #[strum(serialize = "configChange")]
    ConfigChange,
    #[strum(serialize = "controlChanges")]
    ControlChanges,
    #[strum(serialize = "getTokenProperties")]
    GetTokenProperties,
    #[strum(serialize = "getSpecialRoles")]
    GetSpecialRoles,
    #[strum(serialize = "getAllAddressesAndRoles")]
    GetAllAddressesAndRoles,
    #[strum(serialize = "getContractConfig")]
    GetContractConfig,
}

/// Resolve and run one call against the context. Init is routed by the
/// deployment path in the registry itself, never through here.
pub fn dispatch<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    let function =
        Function::from_str(&ctx.input.function).map_err(|_| RegistryError::FunctionNotFound)?;
    if !ctx.flags.registry_enabled {
        return Err(RegistryError::FunctionNotFound);
    }
    match function {
        Function::Init => Err(RegistryError::FunctionNotFound),
        Function::Issue => issue::issue(ctx),
        Function::IssueSemiFungible => issue::issue_semi_fungible(ctx),
        Function::IssueNonFungible => issue::issue_non_fungible(ctx),
        Function::RegisterMetaDcdt => issue::register_meta_dcdt(ctx),
        Function::ChangeSftToMetaDcdt => issue::change_sft_to_meta(ctx),
        Function::RegisterAndSetAllRoles => issue::register_and_set_all_roles(ctx),
        Function::Mint => supply::mint(ctx),
        Function::Burn => supply::burn(ctx),
        Function::Freeze => freeze_wipe::freeze(ctx),
        Function::UnFreeze => freeze_wipe::unfreeze(ctx),
        Function::Wipe => freeze_wipe::wipe(ctx),
        Function::FreezeSingleNft => freeze_wipe::freeze_single_nft(ctx),
        Function::UnFreezeSingleNft => freeze_wipe::unfreeze_single_nft(ctx),
        Function::WipeSingleNft => freeze_wipe::wipe_single_nft(ctx),
        Function::Pause => pause::pause(ctx),
        Function::UnPause => pause::unpause(ctx),
        Function::TransferOwnership => ownership::transfer_ownership(ctx),
        Function::SetSpecialRole => roles::set_special_role(ctx),
        Function::UnSetSpecialRole => roles::unset_special_role(ctx),
        Function::TransferNftCreateRole => ownership::transfer_nft_create_role(ctx),
        Function::StopNftCreate => ownership::stop_nft_create(ctx),
        Function::ChangeToMultiShardCreate => ownership::change_to_multi_shard_create(ctx),
        Function::SetBurnRoleGlobally => roles::set_burn_role_globally(ctx),
        Function::UnsetBurnRoleGlobally => roles::unset_burn_role_globally(ctx),
        Function::SendAllTransferRoleAddresses => roles::send_all_transfer_role_addresses(ctx),
        Function::Claim => admin::claim(ctx),
        Function::ConfigChange => admin::config_change(ctx),
        Function::ControlChanges => admin::control_changes(ctx),
        Function::GetTokenProperties => queries::get_token_properties(ctx),
        Function::GetSpecialRoles => queries::get_special_roles(ctx),
        Function::GetAllAddressesAndRoles => queries::get_all_addresses_and_roles(ctx),
        Function::GetContractConfig => queries::get_contract_config(ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_parse() {
        assert_eq!(Function::from_str("issue").unwrap(), Function::Issue);
        assert_eq!(Function::from_str("DCDTBurn").unwrap(), Function::Burn);
        assert_eq!(
            Function::from_str("registerMetaDCDT").unwrap(),
            Function::RegisterMetaDcdt
        );
        assert_eq!(
            Function::from_str("unSetSpecialRole").unwrap(),
            Function::UnSetSpecialRole
        );
        assert_eq!(Function::from_str("_init").unwrap(), Function::Init);
    }

    #[test]
    fn test_unknown_and_miscased_names_rejected() {
        assert!(Function::from_str("bogus").is_err());
        // Names are case sensitive on the wire
        assert!(Function::from_str("Issue").is_err());
        assert!(Function::from_str("dcdtburn").is_err());
    }
}
