pub mod classifier;
pub mod narrator;
pub mod scorer;

pub use classifier::{derive_token_transfers, unique_token_count};
pub use narrator::{AiAnalysis, Narrator};
pub use scorer::{calculate_trust_score, TrustScoreDetails};
