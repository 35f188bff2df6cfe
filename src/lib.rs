pub mod analyzer;
pub mod config;
pub mod exporter;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod scrape;
pub mod utils;
