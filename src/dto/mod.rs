pub mod chunk;
pub mod ordered_map;
pub mod strategy;
pub mod upload;
