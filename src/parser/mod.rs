pub mod meli_parser;

pub use meli_parser::{MeliParser, Parser};
