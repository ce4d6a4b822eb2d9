pub mod extractor;
pub mod walker;
