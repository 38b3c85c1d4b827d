//! Account Addresses
//!
//! Raw 32-byte account addresses. The last byte is the shard selector:
//! it alone decides which shard owns the account, so the multi-shard
//! NFT-create mechanism keys off it.

use std::{
    convert::TryInto,
    fmt::{Display, Error, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::serializer::{Reader, ReaderError, Serializer, Writer};

pub const ADDRESS_SIZE: usize = 32; // 32 bytes / 256 bits

#[derive(Eq, PartialEq, PartialOrd, Ord, Hash, Clone, Debug, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Address(bytes)
    }

    pub const fn zero() -> Self {
        Address::new([0; ADDRESS_SIZE])
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Shard selector byte (last byte of the address)
    pub fn shard_selector(&self) -> u8 {
        self.0[ADDRESS_SIZE - 1]
    }

    /// System account of the given shard. Every shard mirrors global token
    /// settings under this account.
    pub fn system_account(shard: u8) -> Self {
        let mut bytes = [0xffu8; ADDRESS_SIZE];
        bytes[ADDRESS_SIZE - 1] = shard;
        Address::new(bytes)
    }

    /// Structural validity check used before emitting enforcement calls
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ReaderError> {
        let bytes: [u8; ADDRESS_SIZE] =
            bytes.try_into().map_err(|_| ReaderError::InvalidSize)?;
        Ok(Address::new(bytes))
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| "Invalid hex string")?;
        let bytes: [u8; ADDRESS_SIZE] = bytes.try_into().map_err(|_| "Invalid address")?;
        Ok(Address::new(bytes))
    }
}

impl Serializer for Address {
    fn write(&self, writer: &mut Writer) {
        writer.write_bytes(&self.0);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Address::new(reader.read_bytes_32()?))
    }

    fn size(&self) -> usize {
        ADDRESS_SIZE
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", &self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shard_selector_is_last_byte() {
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes[ADDRESS_SIZE - 1] = 0x2a;
        assert_eq!(Address::new(bytes).shard_selector(), 0x2a);
    }

    #[test]
    fn test_system_account_per_shard() {
        let a = Address::system_account(0);
        let b = Address::system_account(1);
        assert_ne!(a, b);
        assert_eq!(a.shard_selector(), 0);
        assert_eq!(b.shard_selector(), 1);
        assert_eq!(&a.as_bytes()[..31], &[0xff; 31]);
    }

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        assert!(Address::from_slice(&[1u8; 31]).is_err());
        assert!(Address::from_slice(&[1u8; 33]).is_err());
        assert!(Address::from_slice(&[1u8; 32]).is_ok());
    }

    #[test]
    fn test_serializer_roundtrip() {
        let address = Address::new([7u8; ADDRESS_SIZE]);
        let decoded = Address::from_bytes(address.as_bytes()).unwrap();
        assert_eq!(decoded, address);
    }
}
