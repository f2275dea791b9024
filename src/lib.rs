pub mod config;
pub mod deserializers;
pub mod display;
pub mod error;
pub mod export;
pub mod finalize;
pub mod messages;
pub mod prompts;
pub mod response;
pub mod schema;
pub mod utils;

pub use config::Config;
pub use display::DisplayView;
pub use error::{AnalyzerError, Result};
pub use export::ExportBundle;
pub use finalize::{ProcessedAnalysis, finalize};
pub use messages::Locale;
pub use prompts::{AiTool, PromptBuilder};
pub use response::{ParseOutcome, ResponseParser, ValidationReport};

// Load env from a simple, standardized location resolution.
// Honors INSPIRATION_ENV_FILE, falls back to ./.env, and ignores a missing file.
pub fn load_env() {
    match std::env::var("INSPIRATION_ENV_FILE") {
        Ok(path) => {
            let _ = dotenvy::from_path(path);
        }
        Err(_) => {
            let _ = dotenvy::dotenv();
        }
    }
}
