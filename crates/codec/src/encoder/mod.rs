mod custom_section;
mod descriptors;
mod names;
mod types;

use log::{debug, warn};
use wabi_nodes::{Module, SectionId, Type};

use crate::EncodeError;

pub use custom_section::{encode_custom_section, CustomSection};
pub use names::encode_name_section_data;
pub use types::{encode_func_type, encode_func_type_uncached};

pub const MAGIC: [u8; 4] = *b"\0asm";
pub const VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

/// Name of the custom section carrying debug names.
pub const NAME_SECTION: &str = "name";

/// Sections the encoder can't write yet, in binary order.
const DEFERRED_SECTIONS: [SectionId; 10] = [
    SectionId::Import,
    SectionId::Function,
    SectionId::Table,
    SectionId::Memory,
    SectionId::Global,
    SectionId::Export,
    SectionId::Start,
    SectionId::Element,
    SectionId::Code,
    SectionId::Data,
];

/// Write `self` in binary format onto the end of `sink`.
pub trait Encode {
    fn encode(&self, sink: &mut Vec<u8>);
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, sink: &mut Vec<u8>) {
        self.len().encode(sink);
        for item in self {
            item.encode(sink);
        }
    }
}

impl Encode for str {
    fn encode(&self, sink: &mut Vec<u8>) {
        self.len().encode(sink);
        sink.extend_from_slice(self.as_bytes());
    }
}

impl Encode for u32 {
    fn encode(&self, sink: &mut Vec<u8>) {
        leb128::write::unsigned(sink, u64::from(*self)).expect("writing to a Vec cannot fail");
    }
}

impl Encode for usize {
    fn encode(&self, sink: &mut Vec<u8>) {
        u32::try_from(*self)
            .expect("length exceeds u32")
            .encode(sink)
    }
}

pub(crate) fn write_section(sink: &mut Vec<u8>, id: SectionId, body: &[u8]) {
    sink.push(id.as_byte());
    body.len().encode(sink);
    sink.extend_from_slice(body);
    debug!("encoded {id} section ({} bytes)", body.len());
}

/// What to do with a populated section the encoder doesn't support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedSections {
    /// Fail with [`EncodeError::UnsupportedSection`]; no bytes are produced.
    #[default]
    Reject,
    /// Leave the section out and log a warning. The output is a valid binary
    /// but no longer describes the whole module.
    Omit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    unsupported_sections: UnsupportedSections,
    type_cache: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            unsupported_sections: UnsupportedSections::Reject,
            type_cache: true,
        }
    }
}

impl EncoderConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn unsupported_sections(mut self, policy: UnsupportedSections) -> Self {
        self.unsupported_sections = policy;
        self
    }

    /// Toggle the precomputed encodings for small function types. Output is
    /// the same either way.
    pub fn type_cache(mut self, enabled: bool) -> Self {
        self.type_cache = enabled;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode `module` into a complete binary.
    ///
    /// Custom sections come first in caller order, then the type section,
    /// and the `name` section always comes last.
    pub fn encode(&self, module: &Module) -> Result<Vec<u8>, EncodeError> {
        let mut sink = Vec::with_capacity(64);
        sink.extend_from_slice(&MAGIC);
        sink.extend_from_slice(&VERSION);

        for (name, data) in &module.custom_sections {
            if name == NAME_SECTION {
                continue;
            }
            CustomSection { name, data }.encode(&mut sink);
        }

        if !module.type_section.is_empty() {
            let body = self.encode_type_section(&module.type_section);
            write_section(&mut sink, SectionId::Type, &body);
        }

        for id in DEFERRED_SECTIONS {
            if !module.has_section(id) {
                continue;
            }
            match self.config.unsupported_sections {
                UnsupportedSections::Reject => return Err(EncodeError::UnsupportedSection(id)),
                UnsupportedSections::Omit => warn!("omitting unsupported {id} section"),
            }
        }

        // The name section must come after the data section and appear at most once.
        if let Some(names) = &module.name_section {
            if module.custom_sections.contains_key(NAME_SECTION) {
                warn!("raw `name` custom section shadowed by structured name section");
            }
            let data = encode_name_section_data(names);
            CustomSection {
                name: NAME_SECTION,
                data: &data,
            }
            .encode(&mut sink);
        } else if let Some(data) = module.custom_sections.get(NAME_SECTION) {
            CustomSection {
                name: NAME_SECTION,
                data,
            }
            .encode(&mut sink);
        }

        Ok(sink)
    }

    fn encode_type_section(&self, types: &[Type]) -> Vec<u8> {
        let mut body = Vec::with_capacity(1 + types.len() * 4);
        types.len().encode(&mut body);
        for ty in types {
            if self.config.type_cache {
                body.extend_from_slice(&encode_func_type(ty));
            } else {
                body.extend_from_slice(&encode_func_type_uncached(ty));
            }
        }
        body
    }
}

/// Encode `module` with the default [`EncoderConfig`].
///
/// # Panics
///
/// Panics if a name, payload or count does not fit in a `u32`. Keeping those
/// under 4GiB is the caller's responsibility.
pub fn encode_module(module: &Module) -> Result<Vec<u8>, EncodeError> {
    Encoder::default().encode(module)
}
