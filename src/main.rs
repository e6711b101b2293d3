use trustscan::api::router::create_router;
use trustscan::config::AppConfig;
use trustscan::explorer::{default_networks, ExplorerClient};
use trustscan::intelligence::Narrator;
use trustscan::{metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    let http = reqwest::Client::new();
    let explorer = ExplorerClient::new(
        http.clone(),
        default_networks(),
        config.explorer_api_key.clone(),
    );
    let narrator = Narrator::new(
        http,
        config.completion_api_url.clone(),
        config.completion_api_key.clone(),
        config.completion_model.clone(),
    );

    if !config.has_completion_auth() {
        tracing::warn!("No completion API key — narration will use the local fallback");
    }

    let metrics_handle = metrics::init_metrics();

    let state = AppState {
        config,
        explorer,
        narrator,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
