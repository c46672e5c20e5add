use wabi_nodes::SectionId;

use super::{write_section, Encode};

/// A custom section holding arbitrary data.
#[derive(Clone, Copy, Debug)]
pub struct CustomSection<'a> {
    pub name: &'a str,
    pub data: &'a [u8],
}

impl Encode for CustomSection<'_> {
    fn encode(&self, sink: &mut Vec<u8>) {
        let mut body = Vec::with_capacity(self.name.len() + self.data.len() + 5);
        self.name.encode(&mut body);
        body.extend_from_slice(self.data);
        write_section(sink, SectionId::Custom, &body);
    }
}

/// Encode a complete custom section: `[0][len][name len][name][data]`.
pub fn encode_custom_section(name: &str, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    CustomSection { name, data }.encode(&mut out);
    out
}
