//! DCDT Token Records
//!
//! The logical token record plus its two stored wire formats. The legacy
//! format (V1) predates multi-shard NFT creation and must stay readable
//! forever; a feature flag selects which format new writes use. Decoding
//! goes through [`StoredTokenRecord`], a tagged union with an explicit
//! upgrade into the logical [`TokenRecord`].

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::dcdt::roles::{DcdtRole, RolesRecord};
use crate::serializer::{Reader, ReaderError, Serializer, Writer};

/// Kind of digital asset tracked by a token record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    Fungible,
    NonFungible,
    SemiFungible,
    Meta,
}

impl TokenType {
    /// Short type code accepted by registerAndSetAllRoles
    pub fn from_type_code(code: &[u8]) -> Option<Self> {
        match code {
            b"FNG" => Some(Self::Fungible),
            b"NFT" => Some(Self::NonFungible),
            b"SFT" => Some(Self::SemiFungible),
            b"META" => Some(Self::Meta),
            _ => None,
        }
    }

    /// Long name reported by getTokenProperties
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fungible => "FungibleDCDT",
            Self::NonFungible => "NonFungibleDCDT",
            Self::SemiFungible => "SemiFungibleDCDT",
            Self::Meta => "MetaDCDT",
        }
    }

    /// Role set granted to the owner by registerAndSetAllRoles
    pub fn all_roles(&self) -> Vec<DcdtRole> {
        match self {
            Self::Fungible => vec![DcdtRole::LocalMint, DcdtRole::LocalBurn],
            Self::NonFungible => vec![
                DcdtRole::NftCreate,
                DcdtRole::NftBurn,
                DcdtRole::NftUpdateAttributes,
                DcdtRole::NftAddUri,
            ],
            Self::SemiFungible | Self::Meta => vec![
                DcdtRole::NftCreate,
                DcdtRole::NftBurn,
                DcdtRole::NftAddQuantity,
            ],
        }
    }
}

impl Serializer for TokenType {
    fn write(&self, writer: &mut Writer) {
        let v: u8 = match self {
            Self::Fungible => 0,
            Self::NonFungible => 1,
            Self::SemiFungible => 2,
            Self::Meta => 3,
        };
        v.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let v: u8 = reader.read()?;
        match v {
            0 => Ok(Self::Fungible),
            1 => Ok(Self::NonFungible),
            2 => Ok(Self::SemiFungible),
            3 => Ok(Self::Meta),
            _ => Err(ReaderError::InvalidValue),
        }
    }

    fn size(&self) -> usize {
        1
    }
}

/// Logical token record, one per token identifier. Created once by an
/// issuance operation and never deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub owner: Address,
    pub name: String,
    pub ticker: String,
    pub token_type: TokenType,
    pub num_decimals: u32,
    // Running totals only. burnt_value may exceed minted_value: local burn
    // roles count burns this contract never minted, so no cross-check here.
    pub minted_value: U256,
    pub burnt_value: U256,
    pub burnable: bool,
    pub mintable: bool,
    pub can_pause: bool,
    pub can_freeze: bool,
    pub can_wipe: bool,
    pub upgradable: bool,
    pub can_change_owner: bool,
    pub can_add_special_roles: bool,
    pub can_transfer_nft_create_role: bool,
    pub can_create_multi_shard: bool,
    pub nft_create_stopped: bool,
    pub is_paused: bool,
    pub num_wiped: u64,
    pub special_roles: Vec<RolesRecord>,
}

impl TokenRecord {
    pub fn new(owner: Address, name: String, ticker: String, token_type: TokenType) -> Self {
        Self {
            owner,
            name,
            ticker,
            token_type,
            num_decimals: 0,
            minted_value: U256::zero(),
            burnt_value: U256::zero(),
            burnable: false,
            mintable: false,
            can_pause: false,
            can_freeze: false,
            can_wipe: false,
            // Tokens are upgradable and role-extensible unless issued otherwise
            upgradable: true,
            can_change_owner: false,
            can_add_special_roles: true,
            can_transfer_nft_create_role: false,
            can_create_multi_shard: false,
            nft_create_stopped: false,
            is_paused: false,
            num_wiped: 0,
            special_roles: Vec::new(),
        }
    }

    /// Roles record of the given address, if present
    pub fn roles_of(&self, address: &Address) -> Option<&RolesRecord> {
        self.special_roles.iter().find(|r| &r.address == address)
    }

    /// All addresses currently holding the given role, in grant order
    pub fn holders_of(&self, role: DcdtRole) -> Vec<&Address> {
        self.special_roles
            .iter()
            .filter(|r| r.has_role(role))
            .map(|r| &r.address)
            .collect()
    }
}

/// Legacy stored format, written before multi-shard NFT creation existed
#[derive(Clone, Debug)]
pub struct TokenRecordV1 {
    pub owner: Address,
    pub name: String,
    pub ticker: String,
    pub token_type: TokenType,
    pub num_decimals: u32,
    pub minted_value: U256,
    pub burnt_value: U256,
    pub burnable: bool,
    pub mintable: bool,
    pub can_pause: bool,
    pub can_freeze: bool,
    pub can_wipe: bool,
    pub upgradable: bool,
    pub can_change_owner: bool,
    pub can_add_special_roles: bool,
    pub can_transfer_nft_create_role: bool,
    pub nft_create_stopped: bool,
    pub is_paused: bool,
    pub num_wiped: u64,
    pub special_roles: Vec<RolesRecord>,
}

impl Serializer for TokenRecordV1 {
    fn write(&self, writer: &mut Writer) {
        self.owner.write(writer);
        self.name.write(writer);
        self.ticker.write(writer);
        self.token_type.write(writer);
        self.num_decimals.write(writer);
        self.minted_value.write(writer);
        self.burnt_value.write(writer);
        self.burnable.write(writer);
        self.mintable.write(writer);
        self.can_pause.write(writer);
        self.can_freeze.write(writer);
        self.can_wipe.write(writer);
        self.upgradable.write(writer);
        self.can_change_owner.write(writer);
        self.can_add_special_roles.write(writer);
        self.can_transfer_nft_create_role.write(writer);
        self.nft_create_stopped.write(writer);
        self.is_paused.write(writer);
        self.num_wiped.write(writer);
        self.special_roles.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            owner: reader.read()?,
            name: reader.read()?,
            ticker: reader.read()?,
            token_type: reader.read()?,
            num_decimals: reader.read()?,
            minted_value: reader.read()?,
            burnt_value: reader.read()?,
            burnable: reader.read()?,
            mintable: reader.read()?,
            can_pause: reader.read()?,
            can_freeze: reader.read()?,
            can_wipe: reader.read()?,
            upgradable: reader.read()?,
            can_change_owner: reader.read()?,
            can_add_special_roles: reader.read()?,
            can_transfer_nft_create_role: reader.read()?,
            nft_create_stopped: reader.read()?,
            is_paused: reader.read()?,
            num_wiped: reader.read()?,
            special_roles: reader.read()?,
        })
    }

    fn size(&self) -> usize {
        self.owner.size()
            + self.name.size()
            + self.ticker.size()
            + self.token_type.size()
            + 4 // num_decimals
            + self.minted_value.size()
            + self.burnt_value.size()
            + 13 // bool fields
            + 8 // num_wiped
            + self.special_roles.size()
    }
}

/// Current stored format; adds the multi-shard create capability
#[derive(Clone, Debug)]
pub struct TokenRecordV2 {
    pub inner: TokenRecordV1,
    pub can_create_multi_shard: bool,
}

impl Serializer for TokenRecordV2 {
    fn write(&self, writer: &mut Writer) {
        self.inner.write(writer);
        self.can_create_multi_shard.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            inner: reader.read()?,
            can_create_multi_shard: reader.read()?,
        })
    }

    fn size(&self) -> usize {
        self.inner.size() + 1
    }
}

const TOKEN_FORMAT_V1: u8 = 1;
const TOKEN_FORMAT_V2: u8 = 2;

/// Tagged union at the decode boundary. Both formats decode forever; the
/// write format is picked by the current-token-format feature flag.
#[derive(Clone, Debug)]
pub enum StoredTokenRecord {
    V1(TokenRecordV1),
    V2(TokenRecordV2),
}

impl StoredTokenRecord {
    /// Upgrade any stored format into the logical record. V1 predates
    /// multi-shard creation, so the capability defaults to off.
    pub fn upgrade(self) -> TokenRecord {
        let (v1, can_create_multi_shard) = match self {
            Self::V1(v1) => (v1, false),
            Self::V2(v2) => (v2.inner, v2.can_create_multi_shard),
        };
        TokenRecord {
            owner: v1.owner,
            name: v1.name,
            ticker: v1.ticker,
            token_type: v1.token_type,
            num_decimals: v1.num_decimals,
            minted_value: v1.minted_value,
            burnt_value: v1.burnt_value,
            burnable: v1.burnable,
            mintable: v1.mintable,
            can_pause: v1.can_pause,
            can_freeze: v1.can_freeze,
            can_wipe: v1.can_wipe,
            upgradable: v1.upgradable,
            can_change_owner: v1.can_change_owner,
            can_add_special_roles: v1.can_add_special_roles,
            can_transfer_nft_create_role: v1.can_transfer_nft_create_role,
            can_create_multi_shard,
            nft_create_stopped: v1.nft_create_stopped,
            is_paused: v1.is_paused,
            num_wiped: v1.num_wiped,
            special_roles: v1.special_roles,
        }
    }

    /// Downgrade the logical record into the requested stored format.
    /// Writing V1 silently drops the multi-shard flag, which is why the
    /// flag combination is rejected at construction time.
    pub fn from_record(record: TokenRecord, current_format: bool) -> Self {
        let v1 = TokenRecordV1 {
            owner: record.owner,
            name: record.name,
            ticker: record.ticker,
            token_type: record.token_type,
            num_decimals: record.num_decimals,
            minted_value: record.minted_value,
            burnt_value: record.burnt_value,
            burnable: record.burnable,
            mintable: record.mintable,
            can_pause: record.can_pause,
            can_freeze: record.can_freeze,
            can_wipe: record.can_wipe,
            upgradable: record.upgradable,
            can_change_owner: record.can_change_owner,
            can_add_special_roles: record.can_add_special_roles,
            can_transfer_nft_create_role: record.can_transfer_nft_create_role,
            nft_create_stopped: record.nft_create_stopped,
            is_paused: record.is_paused,
            num_wiped: record.num_wiped,
            special_roles: record.special_roles,
        };
        if current_format {
            Self::V2(TokenRecordV2 {
                inner: v1,
                can_create_multi_shard: record.can_create_multi_shard,
            })
        } else {
            Self::V1(v1)
        }
    }
}

impl Serializer for StoredTokenRecord {
    fn write(&self, writer: &mut Writer) {
        match self {
            Self::V1(v1) => {
                writer.write_u8(TOKEN_FORMAT_V1);
                v1.write(writer);
            }
            Self::V2(v2) => {
                writer.write_u8(TOKEN_FORMAT_V2);
                v2.write(writer);
            }
        }
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let tag: u8 = reader.read()?;
        match tag {
            TOKEN_FORMAT_V1 => Ok(Self::V1(reader.read()?)),
            TOKEN_FORMAT_V2 => Ok(Self::V2(reader.read()?)),
            _ => Err(ReaderError::InvalidValue),
        }
    }

    fn size(&self) -> usize {
        1 + match self {
            Self::V1(v1) => v1.size(),
            Self::V2(v2) => v2.size(),
        }
    }
}

/// Singleton contract configuration, created at init and mutated only
/// through configChange
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub owner: Address,
    pub base_issuing_cost: U256,
    pub min_token_name_length: u32,
    pub max_token_name_length: u32,
}

impl Serializer for ConfigRecord {
    fn write(&self, writer: &mut Writer) {
        self.owner.write(writer);
        self.base_issuing_cost.write(writer);
        self.min_token_name_length.write(writer);
        self.max_token_name_length.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            owner: reader.read()?,
            base_issuing_cost: reader.read()?,
            min_token_name_length: reader.read()?,
            max_token_name_length: reader.read()?,
        })
    }

    fn size(&self) -> usize {
        self.owner.size() + self.base_issuing_cost.size() + 4 + 4
    }
}
