pub mod config;
pub mod error;
pub mod types;

pub use config::SonjaConfig;
pub use error::{Result, SonjaError};
pub use types::{
    AgendaItem, AgendaKind, AgendaUpdate, Competitor, NewsItem, NewsPrompts, NewsTask,
    ThinkingStep,
};
