use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Chunk {
    pub text: String,
    /// Index of the first unit (word, sentence, paragraph or piece).
    pub start: usize,
    /// One past the last unit.
    pub end: usize,
    /// Number of units actually taken.
    pub size: usize,
    pub overlap: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChunkMeta {
    pub strategy: String,
    pub size: usize,
    pub overlap: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChunkResponse {
    pub chunks: Vec<Chunk>,
    pub meta: ChunkMeta,
}
