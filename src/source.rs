use crate::{parser::decode_reader, AddressRecord, DecodeOptions, ParserError};
use std::{fs::File, io::BufReader, path::Path};

/// Kernel table of configured IPv6 addresses.
pub const DEFAULT_SOURCE: &str = "/proc/net/if_inet6";

pub fn read_addresses<P: AsRef<Path>>(
    path: P,
    options: &DecodeOptions,
) -> Result<Vec<AddressRecord>, ParserError> {
    let path = path.as_ref();
    let origin = path.display().to_string();

    let f = File::open(path).map_err(|source| ParserError::SourceUnavailable {
        origin: origin.clone(),
        source,
    })?;

    decode_reader(BufReader::new(f), &origin, options)
}

/// Reads the IPv6 addresses of this host, including their flags.
pub fn system_addresses() -> Result<Vec<AddressRecord>, ParserError> {
    read_addresses(DEFAULT_SOURCE, &DecodeOptions::default())
}
