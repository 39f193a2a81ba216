mod decoder;
mod error;
mod flags;
mod record;
mod scope;

pub use decoder::*;
pub use error::*;
pub use flags::*;
pub use record::*;
pub use scope::*;

pub(crate) use decoder::decode_reader;
