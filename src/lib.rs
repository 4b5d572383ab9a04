pub mod config;
pub mod db;
pub mod export;
pub mod observability;
pub mod planner;
pub mod theme;

pub use config::Config;
pub use planner::{Export, GenerateOutcome, Planner};
pub use theme::Theme;
