use std::{io, num::ParseIntError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to read addresses from {origin}. Error: {source}")]
    SourceUnavailable {
        origin: String,
        #[source]
        source: io::Error,
    },

    #[error("Line {line}: expected 6 fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("Line {line}: error parsing address {value:?}: {reason}")]
    AddressParse {
        line: usize,
        value: String,
        reason: &'static str,
    },

    #[error("Line {line}: error parsing scope {value:?}: {source}")]
    ScopeParse {
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Line {line}: error parsing flags {value:?}: {source}")]
    FlagsParse {
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Line {line}: error parsing {field} {value:?}")]
    NumericFieldParse {
        line: usize,
        field: &'static str,
        value: String,
    },
}
