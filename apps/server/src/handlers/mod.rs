mod health;
mod summarize;

pub use health::{HealthResponse, health_handler, root_handler};
pub use summarize::{SummarizeRequest, summarize_handler};
