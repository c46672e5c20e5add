use wabi_nodes::{Limits, RefType, TableType};

use crate::{window::DecodeWindow, Decode, ParseError, ReadContext};

impl Decode for TableType {
    fn decode(window: &mut DecodeWindow<'_>) -> Result<Self, ParseError> {
        let candidate = window.take().field("read leading byte")?;
        if candidate != RefType::FuncRef.as_byte() {
            return Err(ParseError::InvalidByte {
                what: "element type",
                actual: candidate,
                expected: &[0x70],
            });
        }

        let limits = window.read::<Limits>().field("read limits")?;
        Ok(TableType(RefType::FuncRef, limits))
    }
}
