pub mod config;
pub mod pipeline;
pub mod region;
pub mod template;
pub mod updater;

pub use config::Config;
pub use updater::{UpdateOutcome, Updater};
