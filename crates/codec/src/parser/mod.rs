pub(crate) mod globaltype;
pub(crate) mod limits;
pub(crate) mod memtype;
pub(crate) mod tabletype;
pub(crate) mod types;

use crate::{window::DecodeWindow, ParseError};

pub use types::decode_val_types;

/// A value that can be read off the front of a [`DecodeWindow`].
///
/// Implementations consume exactly the bytes of one encoded value. On error
/// the window position is unspecified and the value must be discarded.
pub trait Decode: Sized {
    fn decode(window: &mut DecodeWindow<'_>) -> Result<Self, ParseError>;
}

impl DecodeWindow<'_> {
    pub fn read<T: Decode>(&mut self) -> Result<T, ParseError> {
        T::decode(self)
    }
}
