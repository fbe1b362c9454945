// Library interface for asura_scraper
// Exposes the AsuraScans adapter and the retrieval layers it is built from

pub mod access_path;
pub mod config;
pub mod error;
pub mod helpers;
pub mod http_client;
pub mod models;
pub mod sources;

pub use error::{ScraperError, TransportError, TransportErrorKind};
pub use sources::asurascans::AsuraScans;
