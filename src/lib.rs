pub mod api;
pub mod config;
pub mod errors;
pub mod explorer;
pub mod intelligence;
pub mod metrics;
pub mod models;

use crate::config::AppConfig;
use crate::explorer::ExplorerClient;
use crate::intelligence::Narrator;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub explorer: ExplorerClient,
    pub narrator: Narrator,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
