use crate::{decode_flags, AddressRecord, FlagMode, ParserError, Scope};
use serde::Deserialize;
use std::{
    borrow::Cow,
    ffi::OsString,
    io::{BufRead, Cursor},
    os::unix::ffi::OsStringExt,
};

const FIELDS: usize = 6;
const MAX_PREFIX_LENGTH: u8 = 128;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Reject unparsable interface index and prefix length fields instead
    /// of reading them as zero.
    pub strict_numeric_fields: bool,
    pub flag_mode: FlagMode,
}

/// Decodes every line of `reader`, in order.
///
/// Blank lines are skipped. The first malformed line aborts the whole
/// decode and no records are returned.
pub fn decode_all<R: BufRead>(
    reader: R,
    options: &DecodeOptions,
) -> Result<Vec<AddressRecord>, ParserError> {
    decode_reader(reader, "input", options)
}

pub fn decode_str(input: &str, options: &DecodeOptions) -> Result<Vec<AddressRecord>, ParserError> {
    decode_all(Cursor::new(input), options)
}

pub(crate) fn decode_reader<R: BufRead>(
    reader: R,
    origin: &str,
    options: &DecodeOptions,
) -> Result<Vec<AddressRecord>, ParserError> {
    let mut records = vec![];

    // Lines are raw bytes: device names need not be UTF-8.
    for (idx, line) in reader.split(b'\n').enumerate() {
        let line = line.map_err(|source| ParserError::SourceUnavailable {
            origin: origin.to_string(),
            source,
        })?;

        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        records.push(decode_line(idx + 1, &line, options)?);
    }

    Ok(records)
}

/// Decodes a single `/proc/net/if_inet6` line:
///
/// ```text
/// fe80000000000000000000000000000a 02 40 20 80 eth0
/// ```
///
/// Fields are separated by ASCII whitespace. The device name is kept
/// byte for byte. `line_no` is only used for error reporting.
pub fn decode_line<L: AsRef<[u8]>>(
    line_no: usize,
    line: L,
    options: &DecodeOptions,
) -> Result<AddressRecord, ParserError> {
    let fields = line
        .as_ref()
        .split(u8::is_ascii_whitespace)
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>();
    if fields.len() != FIELDS {
        return Err(ParserError::FieldCount {
            line: line_no,
            found: fields.len(),
        });
    }

    let address = parse_address(line_no, fields[0])?;

    let index = text(fields[1]);
    let prefix = text(fields[2]);
    let (interface_index, prefix_length) = if options.strict_numeric_fields {
        (
            parse_index_strict(line_no, &index)?,
            parse_prefix_strict(line_no, &prefix)?,
        )
    } else {
        (
            scan_hex(&index)
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(0),
            scan_hex(&prefix)
                .and_then(|v| u8::try_from(v).ok())
                .unwrap_or(0),
        )
    };

    let scope = text(fields[3]);
    let scope = u64::from_str_radix(&scope, 16).map_err(|source| ParserError::ScopeParse {
        line: line_no,
        value: scope.to_string(),
        source,
    })?;

    let flags = text(fields[4]);
    let flags = u64::from_str_radix(&flags, 16).map_err(|source| ParserError::FlagsParse {
        line: line_no,
        value: flags.to_string(),
        source,
    })?;

    Ok(AddressRecord {
        address,
        interface_index,
        prefix_length,
        scope: Scope::from_code(scope),
        flags: decode_flags(flags, options.flag_mode),
        device_name: OsString::from_vec(fields[5].to_vec()),
    })
}

// Non-UTF-8 bytes become U+FFFD, which never parses as a digit.
fn text(field: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(field)
}

fn parse_address(line_no: usize, field: &[u8]) -> Result<[u8; 16], ParserError> {
    let error = |reason| ParserError::AddressParse {
        line: line_no,
        value: text(field).into_owned(),
        reason,
    };

    if !field.iter().all(u8::is_ascii_hexdigit) {
        return Err(error("invalid hex character"));
    }
    if field.len() % 2 != 0 {
        return Err(error("odd length hex string"));
    }
    if field.len() != 32 {
        return Err(error("expected 16 bytes"));
    }

    let mut address = [0u8; 16];
    for (byte, pair) in address.iter_mut().zip(field.chunks_exact(2)) {
        *byte = hex_value(pair[0]) << 4 | hex_value(pair[1]);
    }

    Ok(address)
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

// Scans like a `%x` verb: optional sign, then the leading run of hex
// digits. No `0x` prefix is recognized, so "0x1f" reads as 0. A negative
// value does not fit the unsigned fields and yields None.
fn scan_hex(field: &str) -> Option<u64> {
    let (negative, digits) = match field.as_bytes().first() {
        Some(b'+') => (false, &field[1..]),
        Some(b'-') => (true, &field[1..]),
        _ => (false, field),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(digits.len());

    let value = u64::from_str_radix(&digits[..end], 16).ok()?;
    if negative && value != 0 {
        return None;
    }

    Some(value)
}

fn parse_hex_strict(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    u64::from_str_radix(field, 16).ok()
}

fn parse_index_strict(line_no: usize, field: &str) -> Result<u32, ParserError> {
    parse_hex_strict(field)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| ParserError::NumericFieldParse {
            line: line_no,
            field: "interface index",
            value: field.to_string(),
        })
}

fn parse_prefix_strict(line_no: usize, field: &str) -> Result<u8, ParserError> {
    parse_hex_strict(field)
        .and_then(|v| u8::try_from(v).ok())
        .filter(|v| *v <= MAX_PREFIX_LENGTH)
        .ok_or_else(|| ParserError::NumericFieldParse {
            line: line_no,
            field: "prefix length",
            value: field.to_string(),
        })
}
