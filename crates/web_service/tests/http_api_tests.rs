use std::sync::Arc;

use actix_web::{test, web, App};
use async_trait::async_trait;
use tempfile::TempDir;

use chain_client::ChainClient;
use deploy_manager::DeployManager;
use llm_client::{CompletionBackend, LlmError};
use loan_core::{Config, ZERO_ADDRESS};
use web_service::server::{app_config, AppState};

const GENERATED_SOURCE: &str = "```solidity\n\
    // SPDX-License-Identifier: MIT\n\
    pragma solidity ^0.8.0;\n\
    contract CustomMortgageLoan {\n\
        uint8 public status;\n\
    }\n\
    ```";

struct FixedCompletion(&'static str);

#[async_trait]
impl CompletionBackend for FixedCompletion {
    async fn complete(&self, _prompt: &str) -> llm_client::Result<String> {
        Ok(self.0.to_string())
    }
}

struct FailingCompletion;

#[async_trait]
impl CompletionBackend for FailingCompletion {
    async fn complete(&self, _prompt: &str) -> llm_client::Result<String> {
        Err(LlmError::Api {
            status: 503,
            body: "upstream unavailable".to_string(),
        })
    }
}

fn app_state(
    dir: &TempDir,
    llm: Arc<dyn CompletionBackend>,
    deploy_command: &str,
) -> web::Data<AppState> {
    let config = Config {
        project_dir: dir.path().to_path_buf(),
        deploy_command: Some(deploy_command.to_string()),
        ..Config::default()
    };
    web::Data::new(AppState {
        llm,
        deployer: Arc::new(DeployManager::new(dir.path(), deploy_command, 30)),
        chain: Arc::new(ChainClient::connect("http://localhost:7545").unwrap()),
        config,
    })
}

fn application_payload() -> serde_json::Value {
    serde_json::json!({
        "contractName": "MortgageLoan",
        "borrower": {
            "name": "Alice",
            "contact": {
                "phone": "+1-777-888-9999",
                "email": "alice@example.com",
                "physicalAddress": "789 Main Street, Metropolis, NY, 10001"
            }
        },
        "loanDetails": {
            "loanAmount": "500000",
            "loanType": "Refinance Loan",
            "desiredTimeline": "2026-10-15"
        }
    })
}

#[actix_web::test]
async fn health_route_reports_running() {
    let dir = TempDir::new().unwrap();
    let state = app_state(&dir, Arc::new(FixedCompletion("unused")), "true");
    let app = test::init_service(App::new().app_data(state).configure(app_config)).await;

    let req = test::TestRequest::get().uri("/test").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], "Server is running!");
}

#[actix_web::test]
async fn auto_deploy_returns_scraped_address() {
    let dir = TempDir::new().unwrap();
    let state = app_state(
        &dir,
        Arc::new(FixedCompletion(GENERATED_SOURCE)),
        "echo '> contract address:    0xAbCdEf0123456789abcdef0123456789ABCDEF01'",
    );
    let app = test::init_service(App::new().app_data(state).configure(app_config)).await;

    let req = test::TestRequest::post()
        .uri("/auto-deploy")
        .set_json(application_payload())
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body["contractAddress"],
        "0xAbCdEf0123456789abcdef0123456789ABCDEF01"
    );
    assert!(body.get("info").is_none());

    // The generated source landed on disk, fence-stripped and renamed.
    let contracts: Vec<_> = std::fs::read_dir(dir.path().join("contracts"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(contracts.len(), 1);
    let source = std::fs::read_to_string(&contracts[0]).unwrap();
    assert!(!source.contains("```"));
    assert!(source.contains("contract CustomMortgageLoan_"));

    let migrations: Vec<_> = std::fs::read_dir(dir.path().join("migrations"))
        .unwrap()
        .collect();
    assert_eq!(migrations.len(), 1);
}

#[actix_web::test]
async fn auto_deploy_without_address_returns_sentinel() {
    let dir = TempDir::new().unwrap();
    let state = app_state(
        &dir,
        Arc::new(FixedCompletion(GENERATED_SOURCE)),
        "echo 'Compiled successfully'",
    );
    let app = test::init_service(App::new().app_data(state).configure(app_config)).await;

    let req = test::TestRequest::post()
        .uri("/auto-deploy")
        .set_json(application_payload())
        .to_request();
    let response = test::call_service(&app, req).await;
    assert!(response.status().is_success());

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["contractAddress"], ZERO_ADDRESS);
    assert_eq!(
        body["info"],
        "Contract deployed but no address found in logs."
    );
}

#[actix_web::test]
async fn llm_failure_surfaces_error_envelope() {
    let dir = TempDir::new().unwrap();
    let state = app_state(&dir, Arc::new(FailingCompletion), "true");
    let app = test::init_service(App::new().app_data(state).configure(app_config)).await;

    let req = test::TestRequest::post()
        .uri("/auto-deploy")
        .set_json(application_payload())
        .to_request();
    let response = test::call_service(&app, req).await;
    assert_eq!(response.status(), 500);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Failed to generate contract"));
    assert_eq!(body["error"]["type"], "api_error");
}

#[actix_web::test]
async fn failing_deploy_tool_is_a_server_error() {
    let dir = TempDir::new().unwrap();
    let state = app_state(
        &dir,
        Arc::new(FixedCompletion(GENERATED_SOURCE)),
        "echo 'no network' >&2; exit 1",
    );
    let app = test::init_service(App::new().app_data(state).configure(app_config)).await;

    let req = test::TestRequest::post()
        .uri("/auto-deploy")
        .set_json(application_payload())
        .to_request();
    let response = test::call_service(&app, req).await;
    assert_eq!(response.status(), 500);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Failed to compile or deploy contract"));
}

#[actix_web::test]
async fn malformed_timeline_is_a_bad_request() {
    let dir = TempDir::new().unwrap();
    let state = app_state(&dir, Arc::new(FixedCompletion(GENERATED_SOURCE)), "true");
    let app = test::init_service(App::new().app_data(state).configure(app_config)).await;

    let mut payload = application_payload();
    payload["loanDetails"]["desiredTimeline"] = serde_json::json!("sometime soon");
    let req = test::TestRequest::post()
        .uri("/auto-deploy")
        .set_json(payload)
        .to_request();
    let response = test::call_service(&app, req).await;

    assert_eq!(response.status(), 400);
}

#[actix_web::test]
async fn invalid_contract_address_is_a_bad_request() {
    let dir = TempDir::new().unwrap();
    let state = app_state(&dir, Arc::new(FixedCompletion("unused")), "true");
    let app = test::init_service(App::new().app_data(state).configure(app_config)).await;

    let req = test::TestRequest::get()
        .uri("/api/contracts/not-an-address")
        .to_request();
    let response = test::call_service(&app, req).await;

    assert_eq!(response.status(), 400);
}
