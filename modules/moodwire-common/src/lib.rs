pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, LoadMode, TableRef};
pub use error::MoodwireError;
pub use types::{RawItem, SentimentCategory, SentimentScores};
