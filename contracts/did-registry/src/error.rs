use cosmwasm_std::StdError;
use thiserror::Error;

/// Caller is not the current DID owner.
pub const ERR_NOT_AUTHORIZED: u32 = 100;
/// DID is already registered.
pub const ERR_DID_EXISTS: u32 = 101;
pub const ERR_DID_NOT_FOUND: u32 = 102;
pub const ERR_CLAIM_NOT_FOUND: u32 = 103;
/// Claim was revoked earlier; revocation is one-shot.
pub const ERR_ALREADY_REVOKED: u32 = 104;
pub const ERR_INVALID_INPUT: u32 = 105;

/// Registry failures. `code()` gives the stable numeric code for callers.
///
/// Query errors reach callers only as text, so the two not-found variants
/// that queries return carry their code in the message as well.
#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("DID already exists")]
    DidExists {},

    #[error("DID not found (code 102)")]
    DidNotFound {},

    #[error("Claim not found (code 103)")]
    ClaimNotFound {},

    #[error("Claim already revoked")]
    AlreadyRevoked {},

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl ContractError {
    /// Stable numeric code reported to callers. Storage and serialization
    /// failures carry no registry code.
    pub fn code(&self) -> Option<u32> {
        match self {
            ContractError::Std(_) => None,
            ContractError::Unauthorized {} => Some(ERR_NOT_AUTHORIZED),
            ContractError::DidExists {} => Some(ERR_DID_EXISTS),
            ContractError::DidNotFound {} => Some(ERR_DID_NOT_FOUND),
            ContractError::ClaimNotFound {} => Some(ERR_CLAIM_NOT_FOUND),
            ContractError::AlreadyRevoked {} => Some(ERR_ALREADY_REVOKED),
            ContractError::InvalidInput { .. } => Some(ERR_INVALID_INPUT),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ContractError::InvalidInput {
            reason: reason.into(),
        }
    }
}
