pub mod config;
pub mod draft;
pub mod due;
pub mod error;
pub mod extract;
pub mod form;
pub mod history;
pub mod io;
pub mod paths;
pub mod plan;
pub mod project;
pub mod prompt;
pub mod store;
pub mod types;

pub use error::{CommsError, Result};
