pub mod client;
pub mod config;
pub mod controller;
pub mod dom;
pub mod endpoints;
pub mod error;
pub mod events;
pub mod grid;
pub mod i18n;
pub mod logging;
pub mod models;
pub mod page;
pub mod preview;
pub mod render;
pub mod update;

pub use client::MisterClient;
pub use config::AppConfig;
pub use controller::{JornadaController, LoadOutcome, ScoreView, SharedDocument};
pub use dom::{Document, Element};
pub use error::MisterError;
pub use events::{EventBus, PageEvent};
pub use page::{LegacyScoresPage, MisterPage, Page, PortfolioPage, ScoresPage};
pub use update::UpdateOutcome;
