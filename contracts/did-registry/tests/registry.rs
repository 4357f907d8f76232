use cosmwasm_std::{from_json, Addr, Empty};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use did_registry::contract::{execute, instantiate, query};
use did_registry::msg::{
    ClaimResponse, ClaimsResponse, DidInfoResponse, DidsResponse, ExecuteMsg, InstantiateMsg,
    QueryMsg,
};
use did_registry::ContractError;

fn registry_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query))
}

fn wallet1() -> Addr {
    Addr::unchecked("wallet1")
}

fn wallet2() -> Addr {
    Addr::unchecked("wallet2")
}

fn setup() -> (App, Addr) {
    let mut app = App::default();
    let code_id = app.store_code(registry_contract());
    let contract = app
        .instantiate_contract(
            code_id,
            Addr::unchecked("deployer"),
            &InstantiateMsg {
                max_did_length: None,
                max_claim_type_length: None,
                max_data_length: None,
            },
            &[],
            "did-registry",
            None,
        )
        .unwrap();
    (app, contract)
}

type ExecResult = Result<AppResponse, ContractError>;

/// Each call lands in its own block, like a transaction mined on its own
fn mine(app: &mut App, contract: &Addr, sender: Addr, msg: ExecuteMsg) -> ExecResult {
    app.update_block(|block| block.height += 1);
    app.execute_contract(sender, contract.clone(), &msg, &[])
        .map_err(|err| err.downcast::<ContractError>().unwrap())
}

fn register(app: &mut App, contract: &Addr, sender: Addr, did: &str) -> ExecResult {
    mine(
        app,
        contract,
        sender,
        ExecuteMsg::RegisterDid {
            did: did.to_string(),
        },
    )
}

fn add_claim(
    app: &mut App,
    contract: &Addr,
    did: &str,
    claim_type: &str,
    data: &str,
    expires_at: u64,
) -> u64 {
    let res = mine(
        app,
        contract,
        wallet1(),
        ExecuteMsg::AddClaim {
            did: did.to_string(),
            claim_type: claim_type.to_string(),
            data: data.to_string(),
            expires_at,
        },
    )
    .unwrap();
    from_json(res.data.unwrap()).unwrap()
}

#[test]
fn register_did_successfully() {
    let (mut app, contract) = setup();
    let did = "did:example:123";

    let res = register(&mut app, &contract, wallet1(), did).unwrap();
    let ok: bool = from_json(res.data.unwrap()).unwrap();
    assert!(ok);

    let err = register(&mut app, &contract, wallet1(), did).unwrap_err();
    assert_eq!(err.code(), Some(101));
}

#[test]
fn transfer_did_ownership() {
    let (mut app, contract) = setup();
    let did = "did:example:456";

    register(&mut app, &contract, wallet1(), did).unwrap();
    let created_at = app.block_info().height;

    mine(
        &mut app,
        &contract,
        wallet1(),
        ExecuteMsg::TransferDid {
            did: did.to_string(),
            new_owner: wallet2().to_string(),
        },
    )
    .unwrap();
    let transferred_at = app.block_info().height;

    // wallet1 is no longer the owner
    let err = mine(
        &mut app,
        &contract,
        wallet1(),
        ExecuteMsg::TransferDid {
            did: did.to_string(),
            new_owner: wallet1().to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(err.code(), Some(100));

    let info: DidInfoResponse = app
        .wrap()
        .query_wasm_smart(
            &contract,
            &QueryMsg::GetDidInfo {
                did: did.to_string(),
            },
        )
        .unwrap();
    assert_eq!(info.owner, wallet2());
    assert_eq!(info.created_at, created_at);
    assert_eq!(info.updated_at, transferred_at);
    assert!(info.active);

    let owned: DidsResponse = app
        .wrap()
        .query_wasm_smart(
            &contract,
            &QueryMsg::ListDidsByOwner {
                owner: wallet2().to_string(),
                start_after: None,
                limit: None,
            },
        )
        .unwrap();
    assert_eq!(owned.dids, vec![did.to_string()]);
}

#[test]
fn add_and_revoke_verification_claim() {
    let (mut app, contract) = setup();
    let did = "did:example:789";

    register(&mut app, &contract, wallet1(), did).unwrap();
    let claim_id = add_claim(
        &mut app,
        &contract,
        did,
        "email-verification",
        "user@example.com",
        5000,
    );
    assert_eq!(claim_id, 0);

    mine(
        &mut app,
        &contract,
        wallet1(),
        ExecuteMsg::RevokeClaim {
            did: did.to_string(),
            claim_id: 0,
        },
    )
    .unwrap();

    let err = mine(
        &mut app,
        &contract,
        wallet2(),
        ExecuteMsg::RevokeClaim {
            did: did.to_string(),
            claim_id: 0,
        },
    )
    .unwrap_err();
    assert_eq!(err.code(), Some(100));

    let valid: bool = app
        .wrap()
        .query_wasm_smart(
            &contract,
            &QueryMsg::IsClaimValid {
                did: did.to_string(),
                claim_id: 0,
            },
        )
        .unwrap();
    assert!(!valid);
}

#[test]
fn claim_expires_at_height() {
    let (mut app, contract) = setup();
    let did = "did:example:101";

    register(&mut app, &contract, wallet1(), did).unwrap();
    let expires_at = app.block_info().height + 3;
    add_claim(&mut app, &contract, did, "membership", "premium-member", expires_at);

    let is_valid = |app: &App| -> bool {
        app.wrap()
            .query_wasm_smart(
                &contract,
                &QueryMsg::IsClaimValid {
                    did: did.to_string(),
                    claim_id: 0,
                },
            )
            .unwrap()
    };

    assert!(is_valid(&app));
    app.update_block(|block| block.height += 1);
    assert!(is_valid(&app));
    app.update_block(|block| block.height += 1);
    assert_eq!(app.block_info().height, expires_at);
    assert!(!is_valid(&app));
}

#[test]
fn get_did_and_claim_details() {
    let (mut app, contract) = setup();
    let did = "did:example:202";

    register(&mut app, &contract, wallet1(), did).unwrap();
    add_claim(&mut app, &contract, did, "profile", "user-profile", 10_000);
    add_claim(&mut app, &contract, did, "email-verification", "user@example.com", 10_000);

    let claim: ClaimResponse = app
        .wrap()
        .query_wasm_smart(
            &contract,
            &QueryMsg::GetClaim {
                did: did.to_string(),
                claim_id: 0,
            },
        )
        .unwrap();
    assert_eq!(claim.claim_type, "profile");
    assert_eq!(claim.issuer, wallet1());
    assert_eq!(claim.data, "user-profile");
    assert!(!claim.revoked);

    let claims: ClaimsResponse = app
        .wrap()
        .query_wasm_smart(
            &contract,
            &QueryMsg::ListClaims {
                did: did.to_string(),
                start_after: None,
                limit: None,
            },
        )
        .unwrap();
    assert_eq!(claims.claims.len(), 2);
    assert_eq!(claims.claims[1].claim_id, 1);

    let err = app
        .wrap()
        .query_wasm_smart::<ClaimResponse>(
            &contract,
            &QueryMsg::GetClaim {
                did: did.to_string(),
                claim_id: 9,
            },
        )
        .unwrap_err();
    assert!(err.to_string().contains("code 103"));

    let err = app
        .wrap()
        .query_wasm_smart::<DidInfoResponse>(
            &contract,
            &QueryMsg::GetDidInfo {
                did: "did:example:missing".to_string(),
            },
        )
        .unwrap_err();
    assert!(err.to_string().contains("code 102"));
}
