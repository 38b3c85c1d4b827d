//! Special Roles
//!
//! Per-address, per-token capability grants enforced by the builtin
//! transfer layer and administered by the registry.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::address::Address;
use crate::dcdt::types::TokenType;
use crate::serializer::{Reader, ReaderError, Serializer, Writer};

/// Special role grantable on a token. The strum spellings are the exact
/// on-wire names exchanged with callers and the enforcement layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr,
)]
pub enum DcdtRole {
    #[strum(serialize = "DCDTRoleLocalMint")]
    LocalMint,
    #[strum(serialize = "DCDTRoleLocalBurn")]
    LocalBurn,
    #[strum(serialize = "DCDTRoleNFTCreate")]
    NftCreate,
    #[strum(serialize = "DCDTRoleNFTBurn")]
    NftBurn,
    #[strum(serialize = "DCDTRoleNFTAddQuantity")]
    NftAddQuantity,
    #[strum(serialize = "DCDTRoleNFTUpdateAttributes")]
    NftUpdateAttributes,
    #[strum(serialize = "DCDTRoleNFTAddURI")]
    NftAddUri,
    #[strum(serialize = "DCDTRoleTransfer")]
    Transfer,
    /// Internal marker recorded under the registry address when the
    /// burn-role-for-all global setting is active. Never grantable
    /// through setSpecialRole.
    #[strum(serialize = "DCDTRoleBurnForAll")]
    BurnForAll,
}

impl DcdtRole {
    /// On-wire role name
    pub fn name(&self) -> &'static str {
        match self {
            Self::LocalMint => "DCDTRoleLocalMint",
            Self::LocalBurn => "DCDTRoleLocalBurn",
            Self::NftCreate => "DCDTRoleNFTCreate",
            Self::NftBurn => "DCDTRoleNFTBurn",
            Self::NftAddQuantity => "DCDTRoleNFTAddQuantity",
            Self::NftUpdateAttributes => "DCDTRoleNFTUpdateAttributes",
            Self::NftAddUri => "DCDTRoleNFTAddURI",
            Self::Transfer => "DCDTRoleTransfer",
            Self::BurnForAll => "DCDTRoleBurnForAll",
        }
    }

    /// Role legality per token type. The transfer role and the NFT
    /// metadata roles are gated behind the transfer-role feature flag.
    pub fn is_allowed_for(&self, token_type: TokenType, transfer_role_enabled: bool) -> bool {
        match token_type {
            TokenType::Fungible => match self {
                Self::LocalMint | Self::LocalBurn => true,
                Self::Transfer => transfer_role_enabled,
                _ => false,
            },
            TokenType::SemiFungible | TokenType::Meta => match self {
                Self::NftBurn | Self::NftAddQuantity | Self::NftCreate => true,
                Self::Transfer => transfer_role_enabled,
                _ => false,
            },
            TokenType::NonFungible => match self {
                Self::NftBurn | Self::NftCreate => true,
                Self::Transfer | Self::NftUpdateAttributes | Self::NftAddUri => {
                    transfer_role_enabled
                }
                _ => false,
            },
        }
    }
}

impl Serializer for DcdtRole {
    fn write(&self, writer: &mut Writer) {
        let v: u8 = match self {
            Self::LocalMint => 0,
            Self::LocalBurn => 1,
            Self::NftCreate => 2,
            Self::NftBurn => 3,
            Self::NftAddQuantity => 4,
            Self::NftUpdateAttributes => 5,
            Self::NftAddUri => 6,
            Self::Transfer => 7,
            Self::BurnForAll => 8,
        };
        v.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let v: u8 = reader.read()?;
        match v {
            0 => Ok(Self::LocalMint),
            1 => Ok(Self::LocalBurn),
            2 => Ok(Self::NftCreate),
            3 => Ok(Self::NftBurn),
            4 => Ok(Self::NftAddQuantity),
            5 => Ok(Self::NftUpdateAttributes),
            6 => Ok(Self::NftAddUri),
            7 => Ok(Self::Transfer),
            8 => Ok(Self::BurnForAll),
            _ => Err(ReaderError::InvalidValue),
        }
    }

    fn size(&self) -> usize {
        1
    }
}

/// Role grants of a single address, embedded in the token record.
/// One record per address; the role set holds no duplicates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolesRecord {
    pub address: Address,
    pub roles: Vec<DcdtRole>,
}

impl RolesRecord {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            roles: Vec::new(),
        }
    }

    pub fn has_role(&self, role: DcdtRole) -> bool {
        self.roles.contains(&role)
    }
}

impl Serializer for RolesRecord {
    fn write(&self, writer: &mut Writer) {
        self.address.write(writer);
        self.roles.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            address: reader.read()?,
            roles: reader.read()?,
        })
    }

    fn size(&self) -> usize {
        self.address.size() + self.roles.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_wire_names_roundtrip() {
        for role in [
            DcdtRole::LocalMint,
            DcdtRole::LocalBurn,
            DcdtRole::NftCreate,
            DcdtRole::NftBurn,
            DcdtRole::NftAddQuantity,
            DcdtRole::NftUpdateAttributes,
            DcdtRole::NftAddUri,
            DcdtRole::Transfer,
            DcdtRole::BurnForAll,
        ] {
            assert_eq!(DcdtRole::from_str(role.name()).unwrap(), role);
        }
        assert!(DcdtRole::from_str("DCDTRoleUnknown").is_err());
    }

    #[test]
    fn test_fungible_legality() {
        assert!(DcdtRole::LocalMint.is_allowed_for(TokenType::Fungible, false));
        assert!(DcdtRole::LocalBurn.is_allowed_for(TokenType::Fungible, false));
        assert!(!DcdtRole::NftCreate.is_allowed_for(TokenType::Fungible, true));
        assert!(!DcdtRole::Transfer.is_allowed_for(TokenType::Fungible, false));
        assert!(DcdtRole::Transfer.is_allowed_for(TokenType::Fungible, true));
    }

    #[test]
    fn test_non_fungible_legality() {
        assert!(DcdtRole::NftCreate.is_allowed_for(TokenType::NonFungible, false));
        assert!(DcdtRole::NftBurn.is_allowed_for(TokenType::NonFungible, false));
        assert!(!DcdtRole::NftAddQuantity.is_allowed_for(TokenType::NonFungible, true));
        assert!(!DcdtRole::NftUpdateAttributes.is_allowed_for(TokenType::NonFungible, false));
        assert!(DcdtRole::NftUpdateAttributes.is_allowed_for(TokenType::NonFungible, true));
        assert!(DcdtRole::NftAddUri.is_allowed_for(TokenType::NonFungible, true));
    }

    #[test]
    fn test_semi_fungible_legality() {
        for token_type in [TokenType::SemiFungible, TokenType::Meta] {
            assert!(DcdtRole::NftAddQuantity.is_allowed_for(token_type, false));
            assert!(DcdtRole::NftCreate.is_allowed_for(token_type, false));
            assert!(DcdtRole::NftBurn.is_allowed_for(token_type, false));
            assert!(!DcdtRole::LocalMint.is_allowed_for(token_type, false));
            assert!(!DcdtRole::NftUpdateAttributes.is_allowed_for(token_type, true));
        }
    }

    #[test]
    fn test_roles_record_roundtrip() {
        let record = RolesRecord {
            address: Address::new([3u8; 32]),
            roles: vec![DcdtRole::NftCreate, DcdtRole::NftBurn],
        };
        let decoded = RolesRecord::from_bytes(&Serializer::to_bytes(&record)).unwrap();
        assert_eq!(decoded.address, record.address);
        assert_eq!(decoded.roles, record.roles);
    }
}
