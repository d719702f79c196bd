pub mod game_metrics;
pub mod score_history;

pub use game_metrics::GameMetrics;
pub use score_history::{ScoreHistory, ScoreSeries};
