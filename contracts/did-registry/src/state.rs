use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Maximum DID length (bytes)
    pub max_did_length: u32,
    /// Maximum claim type length (bytes)
    pub max_claim_type_length: u32,
    /// Maximum claim payload length (bytes)
    pub max_data_length: u32,
}

#[cw_serde]
pub struct DidRecord {
    /// Current owner
    pub owner: Addr,
    /// Block height at registration
    pub created_at: u64,
    /// Block height of the last ownership change
    pub updated_at: u64,
    /// Always true while registered; no deactivation path exists yet
    pub active: bool,
}

#[cw_serde]
pub struct ClaimRecord {
    pub claim_type: String,
    /// DID owner at issuance time
    pub issuer: Addr,
    pub data: String,
    /// Claim is valid while block height < expires_at
    pub expires_at: u64,
    pub revoked: bool,
}

/// Configuration
pub const CONFIG: Item<Config> = Item::new("config");

/// DID records indexed by DID string
pub const DIDS: Map<&str, DidRecord> = Map::new("dids");

/// Next claim ID per DID (absent = 0)
pub const NEXT_CLAIM_ID: Map<&str, u64> = Map::new("next_claim_id");

/// Claims indexed by (DID, claim ID)
pub const CLAIMS: Map<(&str, u64), ClaimRecord> = Map::new("claims");

/// DIDs by current owner (for queries)
pub const OWNER_DIDS: Map<(&Addr, &str), ()> = Map::new("owner_dids");
