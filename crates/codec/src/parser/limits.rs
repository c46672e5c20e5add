use wabi_nodes::Limits;

use crate::{window::DecodeWindow, Decode, ParseError, ReadContext};

const MIN_ONLY: u8 = 0x00;
const MIN_MAX: u8 = 0x01;

impl Decode for Limits {
    fn decode(window: &mut DecodeWindow<'_>) -> Result<Self, ParseError> {
        let limits = match window.take().field("read leading byte")? {
            MIN_ONLY => {
                let (min, _) = window.read_var_u32().field("read min of limit")?;
                Limits { min, max: None }
            }
            MIN_MAX => {
                let (min, _) = window.read_var_u32().field("read min of limit")?;
                let (max, _) = window.read_var_u32().field("read max of limit")?;
                Limits {
                    min,
                    max: Some(max),
                }
            }
            unk => {
                return Err(ParseError::InvalidByte {
                    what: "limits",
                    actual: unk,
                    expected: &[MIN_ONLY, MIN_MAX],
                })
            }
        };

        log::trace!("decoded {limits:?}");
        Ok(limits)
    }
}
