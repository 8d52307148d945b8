use core::fmt::{Display, Formatter};
use core::str::FromStr;

use log::error;

use crate::{Result, UuidError, UuidValue};

// Folds '0'-'9', 'A'-'F' and 'a'-'f' into 0..=15. Other characters are not
// rejected; they decode to whatever their low nibble happens to be.
fn nibble(c: u8) -> u8 {
    let c = if c > b'9' { c.wrapping_sub(7) } else { c };
    c & 0x0F
}

fn hex_byte(high: u8, low: u8) -> u8 {
    (nibble(high) << 4) | nibble(low)
}

fn hex_u32(text: &[u8]) -> u32 {
    text.chunks_exact(2)
        .fold(0, |acc, pair| (acc << 8) | u32::from(hex_byte(pair[0], pair[1])))
}

impl UuidValue {
    /// Parses a textual identifier. The form is picked by the input length:
    ///
    ///   - 4 characters: 16-bit hex, `"180D"`
    ///   - 8 characters: 32-bit hex, `"0000180D"`
    ///   - 16 characters: the raw bytes of the string are copied into a
    ///     128-bit value, NOT hex decoded. This is a compatibility oddity of
    ///     the format; prefer the dashed form for 128-bit values.
    ///   - 36 characters: dashed form, `"0000180D-0000-1000-8000-00805F9B34FB"`
    ///
    /// Hex digits are case insensitive. The `0x` prefix produced by the
    /// `Display` impl for short values is not accepted.
    ///
    /// Example:
    ///
    /// ```
    /// use bt_uuid::{UuidValue, UuidError};
    ///
    /// assert_eq!(UuidValue::from_text("180D").unwrap().as_u16(), Some(0x180D));
    /// assert_eq!(UuidValue::from_text("DEADbeef").unwrap().as_u32(), Some(0xDEADBEEF));
    /// assert_eq!(
    ///     UuidValue::from_text("0000180d-0000-1000-8000-00805f9b34fb").unwrap(),
    ///     UuidValue::from_uint16(0x180D)
    /// );
    ///
    /// assert!(matches!(
    ///     UuidValue::from_text("0x180D"),
    ///     Err(UuidError::InvalidLength { len: 6, .. })
    /// ));
    /// ```
    pub fn from_text(text: &str) -> Result<UuidValue> {
        let data = text.as_bytes();
        match data.len() {
            4 => Ok(UuidValue::Uuid16(hex_u32(data) as u16)),
            8 => Ok(UuidValue::Uuid32(hex_u32(data))),
            16 => {
                let mut raw = [0u8; 16];
                raw.copy_from_slice(data);
                Ok(UuidValue::Uuid128(raw))
            }
            36 => {
                let digits = data.iter().copied().filter(|c| *c != b'-').collect::<Vec<_>>();

                let mut raw = [0u8; 16];
                for (n, pair) in digits.chunks_exact(2).take(16).enumerate() {
                    raw[15 - n] = hex_byte(pair[0], pair[1]);
                }
                Ok(UuidValue::Uuid128(raw))
            }
            len => Err(UuidError::InvalidLength {
                len,
                input: text.to_string(),
            }),
        }
    }

    /// Same as [`UuidValue::from_text`], but logs failures and returns the
    /// all-zero 128-bit value instead of an error.
    ///
    /// ```
    /// use bt_uuid::UuidValue;
    ///
    /// assert_eq!(UuidValue::from_text_lossy("180D"), UuidValue::from_uint16(0x180D));
    /// assert_eq!(UuidValue::from_text_lossy("18"), UuidValue::default());
    /// ```
    pub fn from_text_lossy(text: &str) -> UuidValue {
        match UuidValue::from_text(text) {
            Ok(value) => value,
            Err(err) => {
                error!("ERROR: {}", err);
                UuidValue::default()
            }
        }
    }
}

impl FromStr for UuidValue {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self> {
        UuidValue::from_text(s)
    }
}

impl Display for UuidValue {
    /// Short values print as `0x` followed by upper case hex. 128-bit values
    /// print in the dashed form.
    ///
    /// ```
    /// use bt_uuid::UuidValue;
    ///
    /// assert_eq!(UuidValue::from_uint16(0x180D).to_string(), "0x180D");
    /// assert_eq!(UuidValue::from_uint32(0xA).to_string(), "0x0000000A");
    /// assert_eq!(
    ///     UuidValue::from_uint16(0x180D).as_128bit().to_string(),
    ///     "0000180D-0000-1000-8000-00805F9B34FB"
    /// );
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            UuidValue::Uuid16(value) => write!(f, "0x{:02X}{:02X}", value >> 8, value & 0xFF),
            UuidValue::Uuid32(value) => write!(f, "0x{:08X}", value),
            UuidValue::Uuid128(data) => {
                for i in (0..16).rev() {
                    write!(f, "{:02X}", data[i])?;
                    if matches!(i, 6 | 8 | 10 | 12) {
                        f.write_str("-")?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::nibble;
    use crate::{UuidError, UuidValue, UuidWidth};

    #[test]
    fn nibble_folds_case() {
        for (upper, lower, expected) in [(b'A', b'a', 10), (b'C', b'c', 12), (b'F', b'f', 15)] {
            assert_eq!(nibble(upper), expected);
            assert_eq!(nibble(lower), expected);
        }
        for digit in b'0'..=b'9' {
            assert_eq!(nibble(digit), digit - b'0');
        }
    }

    #[test]
    fn short_text_forms() {
        let uuid = UuidValue::from_text("180D").unwrap();
        assert_eq!(uuid.width(), UuidWidth::Bits16);
        assert_eq!(uuid.as_u16(), Some(0x180D));
        assert_eq!(uuid.to_string(), "0x180D");

        assert_eq!(UuidValue::from_text("ffff").unwrap().as_u16(), Some(0xFFFF));
        assert_eq!(UuidValue::from_text("0000").unwrap().as_u16(), Some(0));

        let uuid = UuidValue::from_text("12345678").unwrap();
        assert_eq!(uuid.width(), UuidWidth::Bits32);
        assert_eq!(uuid.as_u32(), Some(0x12345678));
        assert_eq!(uuid.to_string(), "0x12345678");
    }

    #[test]
    fn dashed_form_matches_expansion() {
        let uuid = UuidValue::from_text("0000180d-0000-1000-8000-00805f9b34fb").unwrap();
        assert_eq!(uuid.width(), UuidWidth::Bits128);
        assert_eq!(uuid, UuidValue::from_uint16(0x180D).as_128bit());
        assert_eq!(uuid.as_bytes().unwrap()[0], 0xFB);
        assert_eq!(uuid.as_bytes().unwrap()[15], 0x00);
    }

    #[test]
    fn dashed_round_trip() {
        let text = "18EE2EF5-263D-4559-959F-4F9C429F9D11";
        let uuid = UuidValue::from_text(text).unwrap();

        assert_eq!(uuid.to_string(), text);
        assert_eq!(UuidValue::from_text(&uuid.to_string()).unwrap(), uuid);
        assert_eq!(UuidValue::from_text(&text.to_lowercase()).unwrap(), uuid);
    }

    #[test]
    fn sixteen_characters_are_copied_raw() {
        let uuid = UuidValue::from_text("0123456789abcdef").unwrap();
        assert_eq!(uuid.as_bytes(), Some(b"0123456789abcdef"));
    }

    #[test]
    fn misplaced_dashes_do_not_overrun() {
        // 34 digits after dropping the two dashes, the last pair is ignored
        let uuid = UuidValue::from_text("0000180d0000100080-0-00805f9b34fb000").unwrap();
        assert_eq!(
            uuid.as_bytes(),
            Some(&[
                0xB0, 0x4F, 0xB3, 0xF9, 0x05, 0x08, 0x00, 0x80, 0x00, 0x10, 0x00, 0x00, 0x0D, 0x18,
                0x00, 0x00,
            ])
        );

        // 6 dashes leave 15 pairs, so byte 0 is never written
        let uuid = UuidValue::from_text("--0000180d-0000-1000-8000-00805f9b34").unwrap();
        assert_eq!(
            uuid.as_bytes(),
            Some(&[
                0x00, 0x34, 0x9B, 0x5F, 0x80, 0x00, 0x00, 0x80, 0x00, 0x10, 0x00, 0x00, 0x0D, 0x18,
                0x00, 0x00,
            ])
        );

        // 36 dashes leave every byte zero
        let uuid = UuidValue::from_text(&"-".repeat(36)).unwrap();
        assert_eq!(uuid, UuidValue::default());
    }

    #[test]
    fn lossy_parse_logs_one_error_naming_the_input() {
        capture::install();

        let input = "0x2A37";
        let value = UuidValue::from_text_lossy(input);
        let lines = capture::take();

        assert_eq!(value, UuidValue::default());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("ERROR "), "{}", lines[0]);
        assert!(lines[0].contains(input), "{}", lines[0]);

        // successful parses stay quiet
        assert_eq!(UuidValue::from_text_lossy("2A37"), UuidValue::from_uint16(0x2A37));
        assert!(capture::take().is_empty());
    }

    // Records log lines per thread so concurrently running tests do not see
    // each other's output.
    mod capture {
        use std::cell::RefCell;
        use std::sync::Once;

        use log::{LevelFilter, Log, Metadata, Record};

        thread_local! {
            static LINES: RefCell<Vec<String>> = RefCell::new(Vec::new());
        }

        struct CaptureLogger;

        impl Log for CaptureLogger {
            fn enabled(&self, _metadata: &Metadata) -> bool {
                true
            }

            fn log(&self, record: &Record) {
                LINES.with(|lines| {
                    lines
                        .borrow_mut()
                        .push(format!("{} {}", record.level(), record.args()))
                });
            }

            fn flush(&self) {}
        }

        static LOGGER: CaptureLogger = CaptureLogger;
        static INSTALL: Once = Once::new();

        pub fn install() {
            INSTALL.call_once(|| {
                log::set_logger(&LOGGER).expect("no other logger in unit tests");
                log::set_max_level(LevelFilter::Trace);
            });
            take();
        }

        pub fn take() -> Vec<String> {
            LINES.with(|lines| lines.borrow_mut().drain(..).collect())
        }
    }

    #[test]
    fn prefixed_short_text_does_not_round_trip() {
        for v in [0u16, 0x180D, 0xFFFF] {
            let text = UuidValue::from_uint16(v).to_string();
            assert_eq!(
                UuidValue::from_text(&text),
                Err(UuidError::InvalidLength {
                    len: 6,
                    input: text.clone(),
                })
            );
            assert_ne!(UuidValue::from_text_lossy(&text), UuidValue::from_uint16(v));
        }

        let text = UuidValue::from_uint32(0x180D).to_string();
        assert!(UuidValue::from_text(&text).is_err());
    }

    #[test]
    fn unsupported_lengths() {
        for text in ["", "1", "18D", "180D0", "0000180d-0000-1000-8000-00805f9b34f"] {
            match UuidValue::from_text(text) {
                Err(UuidError::InvalidLength { len, input }) => {
                    assert_eq!(len, text.len());
                    assert_eq!(input, text);
                }
                other => panic!("Unexpected parse of {:?}: {:?}", text, other),
            }
            assert_eq!(UuidValue::from_text_lossy(text), UuidValue::default());
        }
    }

    #[test]
    fn from_str_parses() {
        let uuid: UuidValue = "2A37".parse().unwrap();
        assert_eq!(uuid, UuidValue::from_uint16(0x2A37));
        assert!("".parse::<UuidValue>().is_err());
    }
}
