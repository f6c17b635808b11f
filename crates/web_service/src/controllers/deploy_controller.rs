use actix_web::{post, web, HttpResponse};
use log::info;

use deploy_manager::DeployOutcome;
use loan_core::{build_prompt, strip_markdown_fences, LoanApplication, ZERO_ADDRESS};

use crate::dto::DeployResponse;
use crate::error::AppError;
use crate::server::AppState;

/// The full generate-and-deploy pipeline behind one POST: prompt, complete,
/// strip fences, emit artifacts, run the toolchain, scrape the address.
/// Single attempt; any failure surfaces through the one error boundary.
#[post("/auto-deploy")]
pub async fn auto_deploy(
    state: web::Data<AppState>,
    payload: web::Json<LoanApplication>,
) -> Result<HttpResponse, AppError> {
    let application = payload.into_inner();
    info!(
        "Deploy requested for borrower '{}'",
        application.borrower.name
    );

    let prompt = build_prompt(&application)?;
    let completion = state.llm.complete(&prompt).await?;
    let source = strip_markdown_fences(&completion);
    let outcome = state.deployer.deploy(&source).await?;

    let response = match outcome {
        DeployOutcome::Deployed(contract_address) => {
            info!("Contract deployed at {contract_address}");
            DeployResponse {
                contract_address,
                info: None,
            }
        }
        DeployOutcome::AddressUnknown => DeployResponse {
            contract_address: ZERO_ADDRESS.to_string(),
            info: Some("Contract deployed but no address found in logs.".to_string()),
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(auto_deploy);
}
