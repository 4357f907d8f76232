use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

#[cw_serde]
pub struct InstantiateMsg {
    /// Maximum DID length in bytes (default 128)
    pub max_did_length: Option<u32>,
    /// Maximum claim type length in bytes (default 64)
    pub max_claim_type_length: Option<u32>,
    /// Maximum claim payload length in bytes (default 256)
    pub max_data_length: Option<u32>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Register a DID owned by the sender.
    ///
    /// `did` must be non-empty ASCII text within `max_did_length` bytes.
    RegisterDid { did: String },
    /// Hand a DID over to another address (owner only)
    TransferDid { did: String, new_owner: String },
    /// Attach a claim to a DID (owner only). Returns the claim ID as data.
    ///
    /// `claim_type` must be non-empty; `data` may be empty. Both are ASCII
    /// text within the configured length limits.
    ///
    /// `expires_at` is a block height and is stored as given; passing a
    /// height that has already been reached yields a claim that is never valid.
    AddClaim {
        did: String,
        claim_type: String,
        data: String,
        expires_at: u64,
    },
    /// Revoke a claim (current DID owner only)
    RevokeClaim { did: String, claim_id: u64 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Get config
    #[returns(ConfigResponse)]
    GetConfig {},

    /// Get DID record
    #[returns(DidInfoResponse)]
    GetDidInfo { did: String },

    /// Get claim by DID and claim ID
    #[returns(ClaimResponse)]
    GetClaim { did: String, claim_id: u64 },

    /// True iff the claim exists, is not revoked and has not expired
    #[returns(bool)]
    IsClaimValid { did: String, claim_id: u64 },

    /// Number of claims ever issued for a DID
    #[returns(ClaimCountResponse)]
    GetClaimCount { did: String },

    /// List claims of a DID in ID order
    #[returns(ClaimsResponse)]
    ListClaims {
        did: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    /// List DIDs currently owned by an address
    #[returns(DidsResponse)]
    ListDidsByOwner {
        owner: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

// Response types

#[cw_serde]
pub struct ConfigResponse {
    pub max_did_length: u32,
    pub max_claim_type_length: u32,
    pub max_data_length: u32,
}

#[cw_serde]
pub struct DidInfoResponse {
    pub did: String,
    pub owner: Addr,
    pub created_at: u64,
    pub updated_at: u64,
    pub active: bool,
}

#[cw_serde]
pub struct ClaimResponse {
    pub claim_id: u64,
    pub claim_type: String,
    pub issuer: Addr,
    pub data: String,
    pub expires_at: u64,
    pub revoked: bool,
}

#[cw_serde]
pub struct ClaimCountResponse {
    pub count: u64,
}

#[cw_serde]
pub struct ClaimsResponse {
    pub claims: Vec<ClaimResponse>,
}

#[cw_serde]
pub struct DidsResponse {
    pub dids: Vec<String>,
}
