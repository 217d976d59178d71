pub mod config;
pub mod extract;
pub mod output;
pub mod server;
pub mod verify;

pub use extract::{BirthRecord, Extraction, Extractor, HtmlDocument};
