pub mod analytics;
pub mod category;
pub mod file_set;
pub mod recommendation;
pub mod reward;
pub mod upload;
