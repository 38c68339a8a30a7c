use std::env;
use lambda_http::{run, Error};
use tracing::info;
use library_circulation::core::controller::AppState;
use library_circulation::core::repository::RepositoryStore;
use library_circulation::routes::app;
use library_circulation::utils::telemetry::setup_tracing;

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = if DEV_MODE {
        env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        // LIBRARY_STORE=memory runs without dynamodb-local
        let store = match env::var("LIBRARY_STORE").as_deref() {
            Ok("memory") => RepositoryStore::Memory,
            _ => RepositoryStore::LocalDynamoDB,
        };
        AppState::new("dev", store).await
    } else {
        AppState::new("prod", RepositoryStore::DynamoDB).await
    };
    info!(branch = state.config.branch_id.as_str(), store = ?state.store, "starting library service");

    run(app(state)).await
}
