//! Token Identifier Generator
//!
//! Derives `TICKER-xxxxxx` identifiers from a caller-chosen ticker plus a
//! pseudo-random 3-byte suffix. The suffix is hashed from the caller and
//! the block random seed, so generation replays identically on every
//! validator; collisions are resolved by a bounded increment-and-retry
//! loop instead of a central counter.

use dcdt_common::dcdt::{
    RegistryError, RegistryResult, IDENTIFIER_SUFFIX_LENGTH, MAX_IDENTIFIER_ATTEMPTS,
    MAX_TICKER_LENGTH, MIN_TICKER_LENGTH,
};

use crate::vm::{ExecutionContext, Host, RegistryStorage};

/// Ticker predicate: 3-10 uppercase alphanumeric characters
pub fn is_valid_ticker(ticker: &[u8]) -> bool {
    (MIN_TICKER_LENGTH..=MAX_TICKER_LENGTH).contains(&ticker.len())
        && ticker
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// Token name predicate: length within the configured bounds, ASCII
/// alphanumeric only
pub fn is_valid_token_name(name: &[u8], min_length: u32, max_length: u32) -> bool {
    (min_length as usize..=max_length as usize).contains(&name.len())
        && name.iter().all(|b| b.is_ascii_alphanumeric())
}

/// First 3 bytes of blake3(caller ++ seed) as an integer
fn suffix_base(caller: &[u8], seed: &[u8]) -> u32 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(caller);
    hasher.update(seed);
    let digest = hasher.finalize();
    let bytes = digest.as_bytes();
    u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]])
}

/// Derive a collision-free identifier for the given ticker, retrying up
/// to [`MAX_IDENTIFIER_ATTEMPTS`] times before giving up
pub fn generate_token_identifier<S: RegistryStorage, H: Host>(
    ctx: &ExecutionContext<S, H>,
    ticker: &[u8],
) -> RegistryResult<Vec<u8>> {
    if !is_valid_ticker(ticker) {
        return Err(RegistryError::TickerNameNotValid);
    }

    let seed = ctx.host.block_random_seed();
    let mut suffix = suffix_base(ctx.input.caller.as_bytes(), &seed);

    for _ in 0..MAX_IDENTIFIER_ATTEMPTS {
        let mut identifier = ticker.to_vec();
        identifier.push(b'-');
        identifier.extend_from_slice(format!("{:06x}", suffix & 0x00ff_ffff).as_bytes());
        debug_assert_eq!(
            identifier.len(),
            ticker.len() + 1 + IDENTIFIER_SUFFIX_LENGTH
        );

        if !ctx.token_exists(&identifier) {
            return Ok(identifier);
        }
        suffix = suffix.wrapping_add(1);
    }

    Err(RegistryError::CouldNotCreateNewTokenIdentifier)
}
