pub mod chunking;
pub mod pdf;
