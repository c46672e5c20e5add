use wabi_nodes::{GlobalType, Mutability};

use crate::{window::DecodeWindow, Decode, ParseError, ReadContext};

use super::decode_val_types;

impl Decode for GlobalType {
    fn decode(window: &mut DecodeWindow<'_>) -> Result<Self, ParseError> {
        let val_types = decode_val_types(window, 1).field("read value type")?;

        let mutability = match window.take().field("read mutability")? {
            0x00 => Mutability::Const,
            0x01 => Mutability::Variable,
            unk => {
                return Err(ParseError::InvalidByte {
                    what: "mutability",
                    actual: unk,
                    expected: &[0x00, 0x01],
                })
            }
        };

        let global_type = GlobalType(val_types[0], mutability);
        log::trace!("decoded {global_type:?}");
        Ok(global_type)
    }
}
