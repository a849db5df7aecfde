pub mod context;
pub mod error;
pub mod log_file;

pub use context::AppContext;
pub use error::{BuildError, DecodeError, EddyError, FetchError, Result};
