// Module name avoids clashing with the `scraper` HTML crate.
pub mod fetcher;
pub mod traits;

pub use fetcher::{FetcherImpl, download_image};
pub use traits::Fetcher;
