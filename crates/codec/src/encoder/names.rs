use wabi_nodes::{IndirectNameMap, Name, NameMap, NameSection};

use super::Encode;

enum Subsection {
    Module = 0,
    Function = 1,
    Local = 2,
}

impl Encode for Name {
    fn encode(&self, sink: &mut Vec<u8>) {
        self.0.as_str().encode(sink);
    }
}

impl Encode for NameMap {
    fn encode(&self, sink: &mut Vec<u8>) {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by_key(|(idx, _)| *idx);

        entries.len().encode(sink);
        for (idx, name) in entries {
            idx.encode(sink);
            name.encode(sink);
        }
    }
}

impl Encode for IndirectNameMap {
    fn encode(&self, sink: &mut Vec<u8>) {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by_key(|(idx, _)| *idx);

        entries.len().encode(sink);
        for (idx, names) in entries {
            idx.encode(sink);
            names.encode(sink);
        }
    }
}

fn subsection(sink: &mut Vec<u8>, id: Subsection, content: &[u8]) {
    sink.push(id as u8);
    content.len().encode(sink);
    sink.extend_from_slice(content);
}

/// Encode the payload of the `name` custom section (without the custom
/// section header). Empty subsections are left out.
pub fn encode_name_section_data(names: &NameSection) -> Vec<u8> {
    let mut out = Vec::new();
    let mut content = Vec::new();

    if let Some(module_name) = &names.module_name {
        module_name.encode(&mut content);
        subsection(&mut out, Subsection::Module, &content);
    }

    if !names.function_names.is_empty() {
        content.clear();
        names.function_names.encode(&mut content);
        subsection(&mut out, Subsection::Function, &content);
    }

    if !names.local_names.is_empty() {
        content.clear();
        names.local_names.encode(&mut content);
        subsection(&mut out, Subsection::Local, &content);
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_name_section_has_no_subsections() {
        assert!(encode_name_section_data(&NameSection::default()).is_empty());
    }

    #[test]
    fn module_name() {
        let names = NameSection {
            module_name: Some("simple".into()),
            ..Default::default()
        };

        #[rustfmt::skip]
        assert_eq!(encode_name_section_data(&names), vec![
            // subsection id, size
            0, 7,
            // name
            6, b's', b'i', b'm', b'p', b'l', b'e',
        ]);
    }

    #[test]
    fn function_names_are_sorted_by_index() {
        let mut function_names = NameMap::new();
        function_names.append(2, "b").append(0, "a");
        let names = NameSection {
            function_names,
            ..Default::default()
        };

        #[rustfmt::skip]
        assert_eq!(encode_name_section_data(&names), vec![
            1, 7,
            // count
            2,
            0, 1, b'a',
            2, 1, b'b',
        ]);
    }

    #[test]
    fn all_subsections_in_order() {
        let mut function_names = NameMap::new();
        function_names.append(0, "f");

        let mut locals = NameMap::new();
        locals.append(0, "x");
        let mut local_names = IndirectNameMap::new();
        local_names.append(0, locals);

        let names = NameSection {
            module_name: Some("m".into()),
            function_names,
            local_names,
        };

        #[rustfmt::skip]
        assert_eq!(encode_name_section_data(&names), vec![
            0, 2, 1, b'm',
            1, 4, 1, 0, 1, b'f',
            2, 6, 1, 0, 1, 0, 1, b'x',
        ]);
    }
}
