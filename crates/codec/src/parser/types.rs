use wabi_nodes::{Type, ValType};

use crate::{window::DecodeWindow, Decode, ParseError, ReadContext};

pub(crate) const FUNC_TYPE_FORM: u8 = 0x60;

impl Decode for ValType {
    fn decode(window: &mut DecodeWindow<'_>) -> Result<Self, ParseError> {
        let candidate = window.take()?;
        ValType::from_byte(candidate).ok_or(ParseError::BadType(candidate))
    }
}

/// Read exactly `count` value types, one byte each.
pub fn decode_val_types(
    window: &mut DecodeWindow<'_>,
    count: usize,
) -> Result<Box<[ValType]>, ParseError> {
    window
        .take_n(count)?
        .iter()
        .map(|&byte| ValType::from_byte(byte).ok_or(ParseError::BadType(byte)))
        .collect()
}

impl Decode for Type {
    fn decode(window: &mut DecodeWindow<'_>) -> Result<Self, ParseError> {
        let tag = window.take().field("read leading byte")?;
        if tag != FUNC_TYPE_FORM {
            return Err(ParseError::InvalidByte {
                what: "function type",
                actual: tag,
                expected: &[FUNC_TYPE_FORM],
            });
        }

        let (param_count, _) = window.read_var_u32().field("read parameter count")?;
        let params = decode_val_types(window, param_count as usize).field("read parameter types")?;

        let (result_count, _) = window.read_var_u32().field("read result count")?;
        let results = decode_val_types(window, result_count as usize).field("read result types")?;

        Ok(Type { params, results })
    }
}
