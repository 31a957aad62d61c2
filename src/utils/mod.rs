pub mod error;
pub mod format;
pub mod host;
pub mod output;

pub use error::*;
pub use output::*;
