use crate::ParseError;

/// A forward-only cursor over an in-memory buffer.
///
/// Every read either consumes exactly the bytes it needs or fails; the window
/// never rewinds.
#[derive(Debug, Clone)]
pub struct DecodeWindow<'a> {
    chunk: &'a [u8],
    offset: usize,
    start_pos: usize,
}

/// The longest valid unsigned LEB128 encoding of a `u32`.
const MAX_U32_LEB_BYTES: usize = 5;

impl<'a> DecodeWindow<'a> {
    pub fn new(chunk: &'a [u8]) -> Self {
        Self::with_position(chunk, 0)
    }

    /// Create a window whose reported positions start at `start_pos`, for
    /// chunks cut out of a larger stream.
    pub fn with_position(chunk: &'a [u8], start_pos: usize) -> Self {
        Self {
            chunk,
            offset: 0,
            start_pos,
        }
    }

    pub fn available(&self) -> usize {
        self.chunk.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.available() == 0
    }

    /// Offset represents the number of bytes consumed from the current chunk.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Position represents the number of bytes consumed from the entire stream.
    pub fn position(&self) -> usize {
        self.offset + self.start_pos
    }

    pub fn peek(&self) -> Result<u8, ParseError> {
        self.chunk
            .get(self.offset)
            .copied()
            .ok_or(ParseError::Expected {
                needed: 1,
                position: self.position(),
            })
    }

    pub fn take(&mut self) -> Result<u8, ParseError> {
        let next = self.peek()?;
        self.offset += 1;
        Ok(next)
    }

    pub fn take_n(&mut self, len: usize) -> Result<&'a [u8], ParseError> {
        if len > self.available() {
            return Err(ParseError::Expected {
                needed: len - self.available(),
                position: self.position(),
            });
        }

        let out = &self.chunk[self.offset..self.offset + len];
        self.offset += len;
        Ok(out)
    }

    /// Read an unsigned LEB128 `u32`, returning the value and the number of
    /// bytes it occupied.
    pub fn read_var_u32(&mut self) -> Result<(u32, usize), ParseError> {
        let start = self.position();
        let mut rest = &self.chunk[self.offset..];
        let before = rest.len();
        let result = leb128::read::unsigned(&mut rest);
        let consumed = before - rest.len();

        let value = match result {
            Ok(value) => value,
            Err(leb128::read::Error::IoError(_)) => {
                return Err(ParseError::Expected {
                    needed: 1,
                    position: start + consumed,
                })
            }
            Err(leb128::read::Error::Overflow) => {
                return Err(ParseError::BadLeb { position: start })
            }
        };

        if consumed > MAX_U32_LEB_BYTES {
            return Err(ParseError::BadLeb { position: start });
        }
        let value = u32::try_from(value).map_err(|_| ParseError::BadLeb { position: start })?;

        self.offset += consumed;
        Ok((value, consumed))
    }
}
