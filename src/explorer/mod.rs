pub mod client;
pub mod networks;
pub mod types;

pub use client::{ExplorerClient, ExplorerError};
pub use networks::{approximate_usd_price, default_networks, Network};
pub use types::TokenInfo;
