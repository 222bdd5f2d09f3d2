pub mod config;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod stats;
pub mod window;

pub use error::FetchError;
pub use fetch::fetch;
pub use normalize::{NearEarthObject, normalize};
pub use stats::AggregateSummary;
