//! Pause Operations
//!
//! Token-wide transfer suspension. The paused bit lives on the record and
//! is mirrored to every shard's system account; the guards here are
//! strict so a double pause surfaces instead of silently re-broadcasting.

use dcdt_common::dcdt::{RegistryError, RegistryResult};

use crate::broadcast::{send_global_setting_to_all, GlobalSetting};
use crate::guard::basic_ownership_checks;
use crate::vm::{ExecutionContext, Host, RegistryStorage};

/// Suspend all transfers of the token.
/// Args: token identifier
pub fn pause<S: RegistryStorage, H: Host>(ctx: &mut ExecutionContext<S, H>) -> RegistryResult<()> {
    let (token_id, mut token) = basic_ownership_checks(ctx)?;
    if ctx.input.args.len() != 1 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    if !token.can_pause {
        return Err(RegistryError::TokenNotPausable);
    }
    if token.is_paused {
        return Err(RegistryError::TokenAlreadyPaused);
    }

    token.is_paused = true;
    ctx.save_token(&token_id, token);
    send_global_setting_to_all(ctx, &token_id, &GlobalSetting::Pause);
    Ok(())
}

/// Resume transfers of the token.
/// Args: token identifier
pub fn unpause<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    let (token_id, mut token) = basic_ownership_checks(ctx)?;
    if ctx.input.args.len() != 1 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    if !token.can_pause {
        return Err(RegistryError::TokenNotPausable);
    }
    if !token.is_paused {
        return Err(RegistryError::TokenNotPaused);
    }

    token.is_paused = false;
    ctx.save_token(&token_id, token);
    send_global_setting_to_all(ctx, &token_id, &GlobalSetting::Unpause);
    Ok(())
}
