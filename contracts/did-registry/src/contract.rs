use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdResult, Storage,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use shared::{clamp_limit, is_bounded_ascii, is_live};

use crate::error::ContractError;
use crate::msg::{
    ClaimCountResponse, ClaimResponse, ClaimsResponse, ConfigResponse, DidInfoResponse,
    DidsResponse, ExecuteMsg, InstantiateMsg, QueryMsg,
};
use crate::state::{
    ClaimRecord, Config, DidRecord, CLAIMS, CONFIG, DIDS, NEXT_CLAIM_ID, OWNER_DIDS,
};

const CONTRACT_NAME: &str = "crates.io:did-registry";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_MAX_DID_LENGTH: u32 = 128;
const DEFAULT_MAX_CLAIM_TYPE_LENGTH: u32 = 64;
const DEFAULT_MAX_DATA_LENGTH: u32 = 256;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        max_did_length: msg.max_did_length.unwrap_or(DEFAULT_MAX_DID_LENGTH),
        max_claim_type_length: msg
            .max_claim_type_length
            .unwrap_or(DEFAULT_MAX_CLAIM_TYPE_LENGTH),
        max_data_length: msg.max_data_length.unwrap_or(DEFAULT_MAX_DATA_LENGTH),
    };

    if config.max_did_length == 0 || config.max_claim_type_length == 0 {
        return Err(ContractError::invalid("length limits must be non-zero"));
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("max_did_length", config.max_did_length.to_string())
        .add_attribute("max_claim_type_length", config.max_claim_type_length.to_string())
        .add_attribute("max_data_length", config.max_data_length.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RegisterDid { did } => execute_register_did(deps, env, info, did),
        ExecuteMsg::TransferDid { did, new_owner } => {
            execute_transfer_did(deps, env, info, did, new_owner)
        }
        ExecuteMsg::AddClaim {
            did,
            claim_type,
            data,
            expires_at,
        } => execute_add_claim(deps, info, did, claim_type, data, expires_at),
        ExecuteMsg::RevokeClaim { did, claim_id } => {
            execute_revoke_claim(deps, info, did, claim_id)
        }
    }
}

pub fn execute_register_did(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    did: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    validate_did(&config, &did)?;

    // A DID is never released, even after transfer
    if DIDS.has(deps.storage, &did) {
        return Err(ContractError::DidExists {});
    }

    let record = DidRecord {
        owner: info.sender.clone(),
        created_at: env.block.height,
        updated_at: env.block.height,
        active: true,
    };

    DIDS.save(deps.storage, &did, &record)?;
    OWNER_DIDS.save(deps.storage, (&info.sender, did.as_str()), &())?;

    Ok(Response::new()
        .set_data(to_json_binary(&true)?)
        .add_attribute("method", "register_did")
        .add_attribute("did", did)
        .add_attribute("owner", info.sender)
        .add_attribute("created_at", env.block.height.to_string()))
}

pub fn execute_transfer_did(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    did: String,
    new_owner: String,
) -> Result<Response, ContractError> {
    let mut record = load_owned_did(deps.storage, &did, &info.sender)?;
    let new_owner_addr = deps.api.addr_validate(&new_owner)?;

    OWNER_DIDS.remove(deps.storage, (&record.owner, did.as_str()));

    record.owner = new_owner_addr.clone();
    record.updated_at = env.block.height;

    DIDS.save(deps.storage, &did, &record)?;
    OWNER_DIDS.save(deps.storage, (&new_owner_addr, did.as_str()), &())?;

    Ok(Response::new()
        .set_data(to_json_binary(&true)?)
        .add_attribute("method", "transfer_did")
        .add_attribute("did", did)
        .add_attribute("from", info.sender)
        .add_attribute("to", new_owner_addr))
}

pub fn execute_add_claim(
    deps: DepsMut,
    info: MessageInfo,
    did: String,
    claim_type: String,
    data: String,
    expires_at: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    load_owned_did(deps.storage, &did, &info.sender)?;
    validate_claim(&config, &claim_type, &data)?;

    let claim_id = NEXT_CLAIM_ID.may_load(deps.storage, &did)?.unwrap_or_default();
    NEXT_CLAIM_ID.save(deps.storage, &did, &(claim_id + 1))?;

    let claim = ClaimRecord {
        claim_type: claim_type.clone(),
        issuer: info.sender.clone(),
        data,
        expires_at,
        revoked: false,
    };

    CLAIMS.save(deps.storage, (did.as_str(), claim_id), &claim)?;

    Ok(Response::new()
        .set_data(to_json_binary(&claim_id)?)
        .add_attribute("method", "add_claim")
        .add_attribute("did", did)
        .add_attribute("claim_id", claim_id.to_string())
        .add_attribute("claim_type", claim_type)
        .add_attribute("issuer", info.sender)
        .add_attribute("expires_at", expires_at.to_string()))
}

pub fn execute_revoke_claim(
    deps: DepsMut,
    info: MessageInfo,
    did: String,
    claim_id: u64,
) -> Result<Response, ContractError> {
    // The current owner administers every claim on the DID, including
    // those issued by previous owners
    load_owned_did(deps.storage, &did, &info.sender)?;

    CLAIMS.update(deps.storage, (did.as_str(), claim_id), |maybe_claim| {
        let mut claim = maybe_claim.ok_or(ContractError::ClaimNotFound {})?;

        if claim.revoked {
            return Err(ContractError::AlreadyRevoked {});
        }

        claim.revoked = true;
        Ok(claim)
    })?;

    Ok(Response::new()
        .set_data(to_json_binary(&true)?)
        .add_attribute("method", "revoke_claim")
        .add_attribute("did", did)
        .add_attribute("claim_id", claim_id.to_string())
        .add_attribute("revoked_by", info.sender))
}

fn load_owned_did(
    storage: &dyn Storage,
    did: &str,
    sender: &Addr,
) -> Result<DidRecord, ContractError> {
    let record = DIDS
        .may_load(storage, did)?
        .ok_or(ContractError::DidNotFound {})?;

    if sender != &record.owner {
        return Err(ContractError::Unauthorized {});
    }

    Ok(record)
}

fn validate_did(config: &Config, did: &str) -> Result<(), ContractError> {
    if did.is_empty() {
        return Err(ContractError::invalid("DID must not be empty"));
    }
    if !is_bounded_ascii(did, config.max_did_length) {
        return Err(ContractError::invalid(format!(
            "DID must be ASCII text of at most {} bytes",
            config.max_did_length
        )));
    }
    Ok(())
}

fn validate_claim(config: &Config, claim_type: &str, data: &str) -> Result<(), ContractError> {
    if claim_type.is_empty() {
        return Err(ContractError::invalid("claim type must not be empty"));
    }
    if !is_bounded_ascii(claim_type, config.max_claim_type_length) {
        return Err(ContractError::invalid(format!(
            "claim type must be ASCII text of at most {} bytes",
            config.max_claim_type_length
        )));
    }
    if !is_bounded_ascii(data, config.max_data_length) {
        return Err(ContractError::invalid(format!(
            "claim data must be ASCII text of at most {} bytes",
            config.max_data_length
        )));
    }
    Ok(())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::GetConfig {} => Ok(to_json_binary(&query_config(deps)?)?),
        QueryMsg::GetDidInfo { did } => Ok(to_json_binary(&query_did_info(deps, did)?)?),
        QueryMsg::GetClaim { did, claim_id } => {
            Ok(to_json_binary(&query_claim(deps, did, claim_id)?)?)
        }
        QueryMsg::IsClaimValid { did, claim_id } => Ok(to_json_binary(&query_is_claim_valid(
            deps, env, did, claim_id,
        ))?),
        QueryMsg::GetClaimCount { did } => Ok(to_json_binary(&query_claim_count(deps, did)?)?),
        QueryMsg::ListClaims {
            did,
            start_after,
            limit,
        } => Ok(to_json_binary(&query_list_claims(
            deps,
            did,
            start_after,
            limit,
        )?)?),
        QueryMsg::ListDidsByOwner {
            owner,
            start_after,
            limit,
        } => Ok(to_json_binary(&query_dids_by_owner(
            deps,
            owner,
            start_after,
            limit,
        )?)?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        max_did_length: config.max_did_length,
        max_claim_type_length: config.max_claim_type_length,
        max_data_length: config.max_data_length,
    })
}

fn query_did_info(deps: Deps, did: String) -> Result<DidInfoResponse, ContractError> {
    let record = DIDS
        .may_load(deps.storage, &did)?
        .ok_or(ContractError::DidNotFound {})?;

    Ok(DidInfoResponse {
        did,
        owner: record.owner,
        created_at: record.created_at,
        updated_at: record.updated_at,
        active: record.active,
    })
}

fn query_claim(deps: Deps, did: String, claim_id: u64) -> Result<ClaimResponse, ContractError> {
    let claim = CLAIMS
        .may_load(deps.storage, (did.as_str(), claim_id))?
        .ok_or(ContractError::ClaimNotFound {})?;

    Ok(claim_to_response(claim_id, claim))
}

/// Never errors: unknown keys (and unreadable records) are simply not valid.
fn query_is_claim_valid(deps: Deps, env: Env, did: String, claim_id: u64) -> bool {
    match CLAIMS.may_load(deps.storage, (did.as_str(), claim_id)) {
        Ok(Some(claim)) => !claim.revoked && is_live(env.block.height, claim.expires_at),
        _ => false,
    }
}

fn query_claim_count(deps: Deps, did: String) -> StdResult<ClaimCountResponse> {
    let count = NEXT_CLAIM_ID.may_load(deps.storage, &did)?.unwrap_or_default();
    Ok(ClaimCountResponse { count })
}

fn query_list_claims(
    deps: Deps,
    did: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<ClaimsResponse> {
    let limit = clamp_limit(limit);
    let start = start_after.map(Bound::exclusive);

    let claims = CLAIMS
        .prefix(did.as_str())
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(claim_id, claim)| claim_to_response(claim_id, claim)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(ClaimsResponse { claims })
}

fn query_dids_by_owner(
    deps: Deps,
    owner: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<DidsResponse> {
    let owner_addr = deps.api.addr_validate(&owner)?;
    let limit = clamp_limit(limit);
    let start = start_after.as_deref().map(Bound::exclusive);

    let dids = OWNER_DIDS
        .prefix(&owner_addr)
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<Vec<String>>>()?;

    Ok(DidsResponse { dids })
}

fn claim_to_response(claim_id: u64, claim: ClaimRecord) -> ClaimResponse {
    ClaimResponse {
        claim_id,
        claim_type: claim.claim_type,
        issuer: claim.issuer,
        data: claim.data,
        expires_at: claim.expires_at,
        revoked: claim.revoked,
    }
}
