use wabi_nodes::{Limits, MemType, MAX_PAGES};

use crate::{window::DecodeWindow, Decode, ParseError};

impl Decode for MemType {
    fn decode(window: &mut DecodeWindow<'_>) -> Result<Self, ParseError> {
        let limits = window.read::<Limits>()?;

        if limits.min > MAX_PAGES {
            return Err(ParseError::MemoryMinTooLarge(limits.min));
        }
        if let Some(max) = limits.max {
            if max < limits.min {
                return Err(ParseError::MemoryMinGreaterThanMax {
                    min: limits.min,
                    max,
                });
            }
            if max > MAX_PAGES {
                return Err(ParseError::MemoryMaxTooLarge(max));
            }
        }

        Ok(MemType(limits))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn decode(bytes: &[u8]) -> Result<MemType, ParseError> {
        DecodeWindow::new(bytes).read::<MemType>()
    }

    #[test]
    fn accepts_full_range() -> anyhow::Result<()> {
        // 65536 = 0x80 0x80 0x04
        assert_eq!(
            decode(&[0x01, 0x00, 0x80, 0x80, 0x04])?,
            MemType(Limits::new(0, Some(65536)))
        );
        assert_eq!(
            decode(&[0x00, 0x80, 0x80, 0x04])?,
            MemType(Limits::new(65536, None))
        );
        assert_eq!(decode(&[0x01, 0x02, 0x02])?, MemType(Limits::new(2, Some(2))));
        Ok(())
    }

    #[test]
    fn rejects_min_over_max_pages() {
        // 65537 = 0x81 0x80 0x04
        assert_eq!(
            decode(&[0x00, 0x81, 0x80, 0x04]),
            Err(ParseError::MemoryMinTooLarge(65537))
        );
    }

    #[test]
    fn rejects_max_below_min() {
        assert_eq!(
            decode(&[0x01, 0x05, 0x04]),
            Err(ParseError::MemoryMinGreaterThanMax { min: 5, max: 4 })
        );
    }

    #[test]
    fn rejects_max_over_max_pages() {
        assert_eq!(
            decode(&[0x01, 0x00, 0x81, 0x80, 0x04]),
            Err(ParseError::MemoryMaxTooLarge(65537))
        );
    }

    #[test]
    fn each_rule_has_its_own_message() {
        let messages = [
            decode(&[0x00, 0x81, 0x80, 0x04]),
            decode(&[0x01, 0x05, 0x04]),
            decode(&[0x01, 0x00, 0x81, 0x80, 0x04]),
        ]
        .map(|result| result.unwrap_err().to_string());

        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }

    #[test]
    fn passes_limits_errors_through() {
        assert!(matches!(
            decode(&[0x03]),
            Err(ParseError::InvalidByte { what: "limits", .. })
        ));
    }
}
