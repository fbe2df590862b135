pub mod config;
pub mod error;
pub mod event;
pub mod filter;

pub use config::GithubConfig;
pub use error::{BoxError, Error, ErrorKind};
pub use filter::GlobFilterSet;
