pub mod config;
pub use config::*;
pub mod parser;
pub use parser::*;
pub mod source;
pub use source::*;
