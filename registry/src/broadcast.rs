//! Cross-Shard Settings Broadcaster
//!
//! Token balances are sharded by owner address but a token's policy is
//! global, so pause/burn/transfer restrictions must reach the system
//! account of every shard. Messages are fire-and-forget builtin calls:
//! no acknowledgement, at-least-once delivery, FIFO per sender, and the
//! registry's own record stays the source of truth.

use dcdt_common::address::Address;
use dcdt_common::dcdt::{
    BUILTIN_PAUSE, BUILTIN_SET_BURN_ROLE_FOR_ALL, BUILTIN_SET_LIMITED_TRANSFER,
    BUILTIN_TRANSFER_ROLE_ADD_ADDRESS, BUILTIN_TRANSFER_ROLE_DELETE_ADDRESS, BUILTIN_UNPAUSE,
    BUILTIN_UNSET_BURN_ROLE_FOR_ALL, BUILTIN_UNSET_LIMITED_TRANSFER,
};

use crate::vm::{ExecutionContext, Host, RegistryStorage};

/// Token-wide policy change mirrored to every shard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalSetting {
    Pause,
    Unpause,
    SetBurnRoleForAll,
    UnsetBurnRoleForAll,
    SetLimitedTransfer,
    UnsetLimitedTransfer,
    AddTransferRoleAddress(Address),
    DeleteTransferRoleAddress(Address),
}

impl GlobalSetting {
    fn builtin_name(&self) -> &'static str {
        match self {
            Self::Pause => BUILTIN_PAUSE,
            Self::Unpause => BUILTIN_UNPAUSE,
            Self::SetBurnRoleForAll => BUILTIN_SET_BURN_ROLE_FOR_ALL,
            Self::UnsetBurnRoleForAll => BUILTIN_UNSET_BURN_ROLE_FOR_ALL,
            Self::SetLimitedTransfer => BUILTIN_SET_LIMITED_TRANSFER,
            Self::UnsetLimitedTransfer => BUILTIN_UNSET_LIMITED_TRANSFER,
            Self::AddTransferRoleAddress(_) => BUILTIN_TRANSFER_ROLE_ADD_ADDRESS,
            Self::DeleteTransferRoleAddress(_) => BUILTIN_TRANSFER_ROLE_DELETE_ADDRESS,
        }
    }
}

/// Queue the setting for the system account of every shard. Idempotent
/// at the receiver, so re-broadcasting is always safe.
pub fn send_global_setting_to_all<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
    token_id: &[u8],
    setting: &GlobalSetting,
) {
    let name = setting.builtin_name();
    log::trace!(
        "broadcasting {} for token {} to {} shards",
        name,
        String::from_utf8_lossy(token_id),
        ctx.num_shards
    );
    for shard in 0..ctx.num_shards {
        let target = Address::system_account(shard);
        match setting {
            GlobalSetting::AddTransferRoleAddress(address)
            | GlobalSetting::DeleteTransferRoleAddress(address) => {
                ctx.send_builtin_call(target, name, &[token_id, address.as_bytes()]);
            }
            _ => ctx.send_builtin_call(target, name, &[token_id]),
        }
    }
}
