use actix_web::{get, web, HttpResponse};

use chain_client::ContractAddress;

use crate::dto::{
    group_by_status, BlockSummaryDto, BlocksQuery, ContractsQuery, LoanDetailDto,
};
use crate::error::AppError;
use crate::server::AppState;

// Page size the contract table renders per status group.
const DEFAULT_CONTRACTS_PER_PAGE: usize = 5;

#[get("/api/blocks")]
pub async fn list_blocks(
    state: web::Data<AppState>,
    query: web::Query<BlocksQuery>,
) -> Result<HttpResponse, AppError> {
    let depth = query.depth.unwrap_or(state.config.scan_depth);
    let blocks = state.chain.latest_blocks(depth).await?;
    let blocks: Vec<BlockSummaryDto> = blocks.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(blocks))
}

#[get("/api/contracts")]
pub async fn list_contracts(
    state: web::Data<AppState>,
    query: web::Query<ContractsQuery>,
) -> Result<HttpResponse, AppError> {
    let records = state.chain.discover_loans(state.config.scan_depth).await?;
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_CONTRACTS_PER_PAGE);
    Ok(HttpResponse::Ok().json(group_by_status(records, page, per_page)))
}

#[get("/api/contracts/{address}")]
pub async fn contract_detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let raw = path.into_inner();
    let address: ContractAddress = raw
        .parse()
        .map_err(|_| AppError::InvalidAddress(raw.clone()))?;

    let detail = state.chain.loan_detail(address).await?;
    Ok(HttpResponse::Ok().json(LoanDetailDto::from(detail)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(list_blocks)
        .service(list_contracts)
        .service(contract_detail);
}
