use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::{error, info};

use chain_client::ChainClient;
use deploy_manager::DeployManager;
use llm_client::{CompletionBackend, OpenAiClient};
use loan_core::Config;

use crate::controllers::{deploy_controller, explorer_controller, system_controller};

pub struct AppState {
    pub llm: Arc<dyn CompletionBackend>,
    pub deployer: Arc<DeployManager>,
    pub chain: Arc<ChainClient>,
    pub config: Config,
}

const DEFAULT_WORKER_COUNT: usize = 4;

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(system_controller::config)
        .configure(deploy_controller::config)
        .configure(explorer_controller::config);
}

pub async fn run(config: Config) -> Result<(), String> {
    info!("Starting web service...");

    let api_key = config
        .api_key
        .clone()
        .ok_or_else(|| "Missing LLM API key (set OPENAI_API_KEY)".to_string())?;
    let llm: Arc<dyn CompletionBackend> = Arc::new(
        OpenAiClient::new(api_key)
            .with_base_url(config.api_base.clone())
            .with_model(config.model.clone()),
    );
    let deployer = Arc::new(DeployManager::new(
        config.project_dir.clone(),
        config.resolved_deploy_command(),
        config.deploy_timeout_secs,
    ));
    let chain = Arc::new(
        ChainClient::connect(&config.rpc_url)
            .map_err(|e| format!("Failed to create chain client: {e}"))?,
    );

    let port = config.port;
    let app_state = web::Data::new(AppState {
        llm,
        deployer,
        chain,
        config,
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Cors::permissive())
            .configure(app_config)
    })
    .workers(DEFAULT_WORKER_COUNT)
    .bind(format!("127.0.0.1:{port}"))
    .map_err(|e| format!("Failed to bind server: {e}"))?
    .run();

    info!("Listening on http://127.0.0.1:{port}");

    if let Err(e) = server.await {
        error!("Web server error: {}", e);
        return Err(format!("Web server error: {e}"));
    }

    Ok(())
}
