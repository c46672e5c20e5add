use wabi_nodes::{GlobalType, Limits, MemType, Mutability, TableType, ValType};

use super::Encode;

impl Encode for ValType {
    fn encode(&self, sink: &mut Vec<u8>) {
        sink.push(self.as_byte());
    }
}

impl Encode for Limits {
    fn encode(&self, sink: &mut Vec<u8>) {
        match self.max {
            None => {
                sink.push(0x00);
                self.min.encode(sink);
            }
            Some(max) => {
                sink.push(0x01);
                self.min.encode(sink);
                max.encode(sink);
            }
        }
    }
}

impl Encode for TableType {
    fn encode(&self, sink: &mut Vec<u8>) {
        sink.push(self.0.as_byte());
        self.1.encode(sink);
    }
}

impl Encode for MemType {
    fn encode(&self, sink: &mut Vec<u8>) {
        self.0.encode(sink);
    }
}

impl Encode for GlobalType {
    fn encode(&self, sink: &mut Vec<u8>) {
        self.0.encode(sink);
        sink.push(match self.1 {
            Mutability::Const => 0x00,
            Mutability::Variable => 0x01,
        });
    }
}
