//! Binary encoding and decoding for WebAssembly 1.0 modules.
//!
//! The encode path turns a [`wabi_nodes::Module`] into a WebAssembly 1.0 byte
//! stream. The decode path reads individual type descriptors (limits, tables,
//! memories, globals, function types) out of a [`DecodeWindow`].
pub(crate) mod encoder;
pub(crate) mod parser;
pub(crate) mod window;

use std::fmt::Write;

use thiserror::Error;
use wabi_nodes::SectionId;

pub use encoder::{
    encode_custom_section, encode_func_type, encode_func_type_uncached, encode_module,
    encode_name_section_data, CustomSection, Encode, Encoder, EncoderConfig, UnsupportedSections,
    MAGIC, NAME_SECTION, VERSION,
};
pub use parser::{decode_val_types, Decode};
pub use window::DecodeWindow;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input (needed {needed} more byte(s) at position {position})")]
    Expected { needed: usize, position: usize },

    #[error("malformed unsigned LEB128 at position {position}")]
    BadLeb { position: usize },

    #[error("invalid byte for {what}: {actual:#04x} != {}", one_of(.expected))]
    InvalidByte {
        what: &'static str,
        actual: u8,
        expected: &'static [u8],
    },

    #[error("invalid value type {0:#04x}")]
    BadType(u8),

    #[error("memory min must be at most 65536 pages (4GiB), got {0}")]
    MemoryMinTooLarge(u32),

    #[error("memory size minimum must not be greater than maximum ({min} > {max})")]
    MemoryMinGreaterThanMax { min: u32, max: u32 },

    #[error("memory max must be at most 65536 pages (4GiB), got {0}")]
    MemoryMaxTooLarge(u32),

    #[error("{field}: {source}")]
    Read {
        field: &'static str,
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// The innermost error, past any `Read` context.
    pub fn root(&self) -> &ParseError {
        let mut err = self;
        while let ParseError::Read { source, .. } = err {
            err = source;
        }
        err
    }
}

fn one_of(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (idx, byte) in bytes.iter().enumerate() {
        if idx > 0 {
            out.push_str(" or ");
        }
        let _ = write!(out, "{byte:#04x}");
    }
    out
}

pub(crate) trait ReadContext<T> {
    fn field(self, field: &'static str) -> Result<T, ParseError>;
}

impl<T> ReadContext<T> for Result<T, ParseError> {
    fn field(self, field: &'static str) -> Result<T, ParseError> {
        self.map_err(|source| ParseError::Read {
            field,
            source: Box::new(source),
        })
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    #[error("unsupported section kind: {0}")]
    UnsupportedSection(SectionId),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn invalid_byte_names_both_legal_values() {
        let err = ParseError::InvalidByte {
            what: "limits",
            actual: 0x02,
            expected: &[0x00, 0x01],
        };
        assert_eq!(err.to_string(), "invalid byte for limits: 0x02 != 0x00 or 0x01");
    }

    #[test]
    fn read_context_wraps_and_unwraps() {
        let err: Result<(), _> = Err(ParseError::Expected {
            needed: 1,
            position: 3,
        });
        let err = err.field("read min of limit").field("read limits").unwrap_err();

        assert_eq!(
            err.to_string(),
            "read limits: read min of limit: unexpected end of input (needed 1 more byte(s) at position 3)"
        );
        assert_eq!(
            err.root(),
            &ParseError::Expected {
                needed: 1,
                position: 3
            }
        );
    }

    #[test]
    fn unsupported_section_message() {
        assert_eq!(
            EncodeError::UnsupportedSection(SectionId::Import).to_string(),
            "unsupported section kind: import"
        );
    }
}
