//! Lumen Server: WebSocket front end for the grading core.
//!
//! Clients send JSON requests carrying an image as a `data:` URL; the server
//! grades or edits it and answers with a PNG `data:` URL.

pub mod config;
pub mod data_url;
pub mod edits;
pub mod error;
pub mod handler;
pub mod protocol;
pub mod ws_server;

pub use config::ServerConfig;
pub use error::ServerError;
pub use handler::Backend;
