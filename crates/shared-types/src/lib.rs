pub mod error;
pub mod config;

// Case-law domain modules
pub mod analytics;
pub mod case;
pub mod filter;
pub mod outcome;
pub mod selection;

pub use error::*;
pub use config::*;

pub use analytics::*;
pub use case::*;
pub use filter::*;
pub use outcome::*;
pub use selection::*;
