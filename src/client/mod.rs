//! Headless controller for the chunking playground page.
//!
//! [`Controller`] owns a [`Page`] model of the form, the strategy catalog
//! and the last extracted text, and drives the API through [`ChunkApi`].

pub mod api;
pub mod controller;
pub mod page;
pub mod render;

pub use api::{ChunkApi, ChunkForm, ChunkReply, ChunkSummary, HttpChunkApi, SelectedFile, UploadReply};
pub use controller::{Controller, Notifier, Outcome};
pub use page::{ChunkBlock, InputKind, Page, ParamInput, StrategyOption};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}
