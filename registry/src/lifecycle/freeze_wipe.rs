//! Freeze & Wipe Operations
//!
//! Owner-driven account-level enforcement. The registry itself holds no
//! balances, so every operation here resolves to a builtin call against
//! the frozen or wiped account's own shard. Single-NFT variants target
//! one nonce instead of the whole token.

use dcdt_common::address::Address;
use dcdt_common::dcdt::{
    RegistryError, RegistryResult, TokenRecord, TokenType, BUILTIN_FREEZE, BUILTIN_UNFREEZE,
    BUILTIN_WIPE,
};

use crate::guard::basic_ownership_checks;
use crate::lifecycle::{parse_address, parse_u64};
use crate::vm::{ExecutionContext, Host, RegistryStorage};

/// Freeze the token for one account.
/// Args: token identifier, address
pub fn freeze<S: RegistryStorage, H: Host>(ctx: &mut ExecutionContext<S, H>) -> RegistryResult<()> {
    let (token_id, token) = basic_ownership_checks(ctx)?;
    let target = freeze_checks(ctx, &token)?;
    ctx.send_builtin_call(target, BUILTIN_FREEZE, &[&token_id]);
    Ok(())
}

/// Lift a freeze for one account.
/// Args: token identifier, address
pub fn unfreeze<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    let (token_id, token) = basic_ownership_checks(ctx)?;
    let target = freeze_checks(ctx, &token)?;
    ctx.send_builtin_call(target, BUILTIN_UNFREEZE, &[&token_id]);
    Ok(())
}

/// Erase one account's balance of the token. Counted on the record.
/// Args: token identifier, address
pub fn wipe<S: RegistryStorage, H: Host>(ctx: &mut ExecutionContext<S, H>) -> RegistryResult<()> {
    let (token_id, mut token) = basic_ownership_checks(ctx)?;
    let target = wipe_checks(ctx, &token)?;
    token.num_wiped += 1;
    ctx.save_token(&token_id, token);
    ctx.send_builtin_call(target, BUILTIN_WIPE, &[&token_id]);
    Ok(())
}

/// Freeze a single NFT nonce for one account.
/// Args: token identifier, nonce, address
pub fn freeze_single_nft<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    let (token_id, token) = basic_ownership_checks(ctx)?;
    let (nonce, target) = single_nft_freeze_checks(ctx, &token)?;
    ctx.send_builtin_call(target, BUILTIN_FREEZE, &[&token_id, &nonce]);
    Ok(())
}

/// Lift a single-nonce freeze.
/// Args: token identifier, nonce, address
pub fn unfreeze_single_nft<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    let (token_id, token) = basic_ownership_checks(ctx)?;
    let (nonce, target) = single_nft_freeze_checks(ctx, &token)?;
    ctx.send_builtin_call(target, BUILTIN_UNFREEZE, &[&token_id, &nonce]);
    Ok(())
}

/// Erase a single NFT nonce from one account.
/// Args: token identifier, nonce, address
pub fn wipe_single_nft<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    let (token_id, mut token) = basic_ownership_checks(ctx)?;
    if ctx.input.args.len() != 3 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    if !token.can_wipe {
        return Err(RegistryError::TokenNotWipeable);
    }
    let (nonce, target) = parse_nonce_and_address(ctx, &token)?;
    token.num_wiped += 1;
    ctx.save_token(&token_id, token);
    ctx.send_builtin_call(target, BUILTIN_WIPE, &[&token_id, &nonce]);
    Ok(())
}

fn freeze_checks<S: RegistryStorage, H: Host>(
    ctx: &ExecutionContext<S, H>,
    token: &TokenRecord,
) -> RegistryResult<Address> {
    if ctx.input.args.len() != 2 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    if !token.can_freeze {
        return Err(RegistryError::TokenNotFreezable);
    }
    parse_address(&ctx.input.args[1])
}

fn wipe_checks<S: RegistryStorage, H: Host>(
    ctx: &ExecutionContext<S, H>,
    token: &TokenRecord,
) -> RegistryResult<Address> {
    if ctx.input.args.len() != 2 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    if !token.can_wipe {
        return Err(RegistryError::TokenNotWipeable);
    }
    parse_address(&ctx.input.args[1])
}

fn single_nft_freeze_checks<S: RegistryStorage, H: Host>(
    ctx: &ExecutionContext<S, H>,
    token: &TokenRecord,
) -> RegistryResult<(Vec<u8>, Address)> {
    if ctx.input.args.len() != 3 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    if !token.can_freeze {
        return Err(RegistryError::TokenNotFreezable);
    }
    parse_nonce_and_address(ctx, token)
}

/// Single-nonce args are only meaningful for tokens with per-nonce state
fn parse_nonce_and_address<S: RegistryStorage, H: Host>(
    ctx: &ExecutionContext<S, H>,
    token: &TokenRecord,
) -> RegistryResult<(Vec<u8>, Address)> {
    if token.token_type == TokenType::Fungible {
        return Err(RegistryError::InvalidTokenType);
    }
    let nonce = parse_u64(&ctx.input.args[1])?;
    if nonce == 0 {
        return Err(RegistryError::InvalidArgument("nonce must not be zero".into()));
    }
    let target = parse_address(&ctx.input.args[2])?;
    Ok((ctx.input.args[1].clone(), target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::EnableFlags;
    use crate::gas::GasSchedule;
    use crate::testing::{MemoryStorage, TestHost};
    use crate::vm::VmInput;
    use dcdt_common::dcdt::StoredTokenRecord;
    use dcdt_common::serializer::Serializer;
    use primitive_types::U256;

    fn owner() -> Address {
        Address::new([1u8; 32])
    }

    fn target() -> Address {
        Address::new([9u8; 32])
    }

    fn seeded_storage(token_type: TokenType, can_freeze: bool, can_wipe: bool) -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        let mut record = TokenRecord::new(
            owner(),
            "AliceToken".to_string(),
            "ALC".to_string(),
            token_type,
        );
        record.can_freeze = can_freeze;
        record.can_wipe = can_wipe;
        storage.set(
            b"ALC-0a1b2c",
            StoredTokenRecord::from_record(record, true).to_bytes(),
        );
        storage
    }

    fn input(function: &str, args: Vec<Vec<u8>>) -> VmInput {
        VmInput {
            caller: owner(),
            recipient: Address::new([2u8; 32]),
            call_value: U256::zero(),
            gas_provided: u64::MAX,
            function: function.to_string(),
            args,
        }
    }

    #[test]
    fn test_freeze_sends_builtin_to_target() {
        let mut storage = seeded_storage(TokenType::Fungible, true, false);
        let host = TestHost::new();
        let input = input("freeze", vec![b"ALC-0a1b2c".to_vec(), target().to_bytes()]);
        let flags = EnableFlags::default();
        let gas = GasSchedule::default();
        let mut ctx = ExecutionContext::new(&mut storage, &host, &input, &flags, &gas, 3);

        freeze(&mut ctx).unwrap();
        let call = &ctx.transfers[0];
        assert_eq!(call.to, target());
        assert_eq!(call.function(), b"DCDTFreeze");
        assert_eq!(call.call_args(), vec![b"ALC-0a1b2c".to_vec()]);
    }

    #[test]
    fn test_freeze_not_freezable() {
        let mut storage = seeded_storage(TokenType::Fungible, false, false);
        let host = TestHost::new();
        let input = input("freeze", vec![b"ALC-0a1b2c".to_vec(), target().to_bytes()]);
        let flags = EnableFlags::default();
        let gas = GasSchedule::default();
        let mut ctx = ExecutionContext::new(&mut storage, &host, &input, &flags, &gas, 3);

        assert_eq!(
            freeze(&mut ctx).unwrap_err(),
            RegistryError::TokenNotFreezable
        );
    }

    #[test]
    fn test_freeze_bad_address() {
        let mut storage = seeded_storage(TokenType::Fungible, true, false);
        let host = TestHost::new();
        let input = input("freeze", vec![b"ALC-0a1b2c".to_vec(), vec![1, 2, 3]]);
        let flags = EnableFlags::default();
        let gas = GasSchedule::default();
        let mut ctx = ExecutionContext::new(&mut storage, &host, &input, &flags, &gas, 3);

        assert_eq!(freeze(&mut ctx).unwrap_err(), RegistryError::InvalidAddress);
    }

    #[test]
    fn test_wipe_counts_on_record() {
        let mut storage = seeded_storage(TokenType::Fungible, false, true);
        let host = TestHost::new();
        let input = input("wipe", vec![b"ALC-0a1b2c".to_vec(), target().to_bytes()]);
        let flags = EnableFlags::default();
        let gas = GasSchedule::default();
        let mut ctx = ExecutionContext::new(&mut storage, &host, &input, &flags, &gas, 3);

        wipe(&mut ctx).unwrap();
        let token = ctx.load_token(b"ALC-0a1b2c").unwrap();
        assert_eq!(token.num_wiped, 1);
        assert_eq!(ctx.transfers[0].function(), b"DCDTWipe");
    }

    #[test]
    fn test_freeze_single_nft_carries_nonce() {
        let mut storage = seeded_storage(TokenType::NonFungible, true, false);
        let host = TestHost::new();
        let input = input(
            "freezeSingleNFT",
            vec![b"ALC-0a1b2c".to_vec(), vec![7], target().to_bytes()],
        );
        let flags = EnableFlags::default();
        let gas = GasSchedule::default();
        let mut ctx = ExecutionContext::new(&mut storage, &host, &input, &flags, &gas, 3);

        freeze_single_nft(&mut ctx).unwrap();
        let call = &ctx.transfers[0];
        assert_eq!(call.call_args(), vec![b"ALC-0a1b2c".to_vec(), vec![7]]);
    }

    #[test]
    fn test_single_nft_zero_nonce_rejected() {
        let mut storage = seeded_storage(TokenType::NonFungible, true, false);
        let host = TestHost::new();
        let input = input(
            "freezeSingleNFT",
            vec![b"ALC-0a1b2c".to_vec(), vec![], target().to_bytes()],
        );
        let flags = EnableFlags::default();
        let gas = GasSchedule::default();
        let mut ctx = ExecutionContext::new(&mut storage, &host, &input, &flags, &gas, 3);

        assert!(matches!(
            freeze_single_nft(&mut ctx).unwrap_err(),
            RegistryError::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_single_nft_rejects_fungible() {
        let mut storage = seeded_storage(TokenType::Fungible, true, true);
        let host = TestHost::new();
        let input = input(
            "wipeSingleNFT",
            vec![b"ALC-0a1b2c".to_vec(), vec![7], target().to_bytes()],
        );
        let flags = EnableFlags::default();
        let gas = GasSchedule::default();
        let mut ctx = ExecutionContext::new(&mut storage, &host, &input, &flags, &gas, 3);

        assert_eq!(
            wipe_single_nft(&mut ctx).unwrap_err(),
            RegistryError::InvalidTokenType
        );
    }
}
