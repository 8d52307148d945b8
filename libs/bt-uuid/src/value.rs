use core::hash::{Hash, Hasher};

use byteorder::{ByteOrder, LittleEndian};

use crate::consts::BASE_UUID;

/// Size of an identifier as used on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UuidWidth {
    Bits16,
    Bits32,
    Bits128,
}

impl UuidWidth {
    /// Number of bytes the identifier occupies. This is also the `len`
    /// tag used by the native stack struct.
    pub const fn byte_len(self) -> usize {
        match self {
            UuidWidth::Bits16 => 2,
            UuidWidth::Bits32 => 4,
            UuidWidth::Bits128 => 16,
        }
    }
}

/// A Bluetooth attribute identifier of one of the three standard widths.
///
/// 128-bit payloads are stored least significant byte first: index 0 holds
/// the last byte of the dashed text form and index 15 the first.
///
/// Equality is width aware. Values of different widths are compared through
/// [`UuidValue::as_128bit`]:
///
/// ```
/// use bt_uuid::UuidValue;
///
/// let short = UuidValue::from_uint16(0x180D);
/// assert_eq!(short, short.as_128bit());
/// assert_ne!(short, UuidValue::from_uint16(0x180E));
/// assert_eq!(short, UuidValue::from_uint32(0x180D));
/// ```
#[derive(Debug, Copy, Clone)]
pub enum UuidValue {
    Uuid16(u16),
    Uuid32(u32),
    Uuid128([u8; 16]),
}

impl Default for UuidValue {
    /// The all-zero 128-bit value. Returned by lossy parsing on failure.
    fn default() -> Self {
        UuidValue::Uuid128([0; 16])
    }
}

impl UuidValue {
    pub const fn from_uint16(value: u16) -> Self {
        UuidValue::Uuid16(value)
    }

    pub const fn from_uint32(value: u32) -> Self {
        UuidValue::Uuid32(value)
    }

    /// Creates a 128-bit value, copying `data` as is. `data` must already
    /// be in stored order (least significant byte first).
    pub const fn from_bytes_be(data: &[u8; 16]) -> Self {
        UuidValue::Uuid128(*data)
    }

    /// Creates a 128-bit value from bytes in the opposite order to the
    /// stored one (most significant byte first, as `uuid::Uuid` keeps them).
    ///
    /// Example:
    ///
    /// ```
    /// use bt_uuid::UuidValue;
    ///
    /// let mut data = [0u8; 16];
    /// data[0] = 0xAA;
    /// data[15] = 0x55;
    ///
    /// assert_eq!(
    ///     UuidValue::from_bytes_be_reversed(&data).as_bytes(),
    ///     Some(&{
    ///         let mut expected = [0u8; 16];
    ///         expected[0] = 0x55;
    ///         expected[15] = 0xAA;
    ///         expected
    ///     })
    /// );
    /// ```
    pub fn from_bytes_be_reversed(data: &[u8; 16]) -> Self {
        let mut reversed = *data;
        reversed.reverse();
        UuidValue::Uuid128(reversed)
    }

    pub const fn width(&self) -> UuidWidth {
        match self {
            UuidValue::Uuid16(_) => UuidWidth::Bits16,
            UuidValue::Uuid32(_) => UuidWidth::Bits32,
            UuidValue::Uuid128(_) => UuidWidth::Bits128,
        }
    }

    pub const fn as_u16(&self) -> Option<u16> {
        match self {
            UuidValue::Uuid16(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn as_u32(&self) -> Option<u32> {
        match self {
            UuidValue::Uuid32(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn as_bytes(&self) -> Option<&[u8; 16]> {
        match self {
            UuidValue::Uuid128(data) => Some(data),
            _ => None,
        }
    }

    /// Returns the canonical 128-bit form.
    ///
    /// Short values are written little endian into bytes 12.. of the base
    /// UUID. 128-bit values are returned unchanged.
    ///
    /// Example:
    ///
    /// ```
    /// use bt_uuid::{UuidValue, BASE_UUID};
    ///
    /// let mut expected = BASE_UUID;
    /// expected[12] = 0x0D;
    /// expected[13] = 0x18;
    ///
    /// assert_eq!(
    ///     UuidValue::from_uint16(0x180D).as_128bit().as_bytes(),
    ///     Some(&expected)
    /// );
    /// ```
    pub fn as_128bit(&self) -> UuidValue {
        UuidValue::Uuid128(self.expanded())
    }

    fn expanded(&self) -> [u8; 16] {
        let value = match *self {
            UuidValue::Uuid16(value) => u32::from(value),
            UuidValue::Uuid32(value) => value,
            UuidValue::Uuid128(data) => return data,
        };

        let mut data = BASE_UUID;
        for i in 0..self.width().byte_len() {
            data[12 + i] = ((value >> (i * 8)) & 0xFF) as u8;
        }
        data
    }

    /// Collapses a value sitting on the base UUID back to its 16-bit form.
    ///
    /// ```
    /// use bt_uuid::UuidValue;
    ///
    /// assert_eq!(UuidValue::from_uint16(0x2A37).as_128bit().try_to_u16(), Some(0x2A37));
    /// assert_eq!(UuidValue::from_uint32(0x12345678).try_to_u16(), None);
    /// assert_eq!(UuidValue::default().try_to_u16(), None);
    /// ```
    pub fn try_to_u16(&self) -> Option<u16> {
        self.try_to_u32()
            .and_then(|value| u16::try_from(value).ok())
    }

    /// Collapses a value sitting on the base UUID back to its 32-bit form.
    pub fn try_to_u32(&self) -> Option<u32> {
        let data = self.expanded();
        if data[..12] != BASE_UUID[..12] {
            return None;
        }
        Some(LittleEndian::read_u32(&data[12..]))
    }

    /// Checks if `first` immediately followed by `second` appears in the
    /// little endian byte serialization of this value.
    ///
    /// Example:
    ///
    /// ```
    /// use bt_uuid::UuidValue;
    ///
    /// let uuid = UuidValue::from_uint16(0x180D);
    /// assert!(uuid.contains(0x0D, 0x18));
    /// assert!(!uuid.contains(0x18, 0x0D));
    ///
    /// let uuid = UuidValue::from_uint32(0x11223344);
    /// assert!(uuid.contains(0x44, 0x33));
    /// assert!(uuid.contains(0x22, 0x11));
    /// assert!(!uuid.contains(0x44, 0x22));
    /// ```
    pub fn contains(&self, first: u8, second: u8) -> bool {
        let mut buffer = [0u8; 16];
        let bytes: &[u8] = match *self {
            UuidValue::Uuid16(value) => {
                LittleEndian::write_u16(&mut buffer, value);
                &buffer[..2]
            }
            UuidValue::Uuid32(value) => {
                LittleEndian::write_u32(&mut buffer, value);
                &buffer[..4]
            }
            UuidValue::Uuid128(ref data) => &data[..],
        };

        bytes
            .windows(2)
            .any(|pair| pair[0] == first && pair[1] == second)
    }
}

impl PartialEq for UuidValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (UuidValue::Uuid16(a), UuidValue::Uuid16(b)) => a == b,
            (UuidValue::Uuid32(a), UuidValue::Uuid32(b)) => a == b,
            (UuidValue::Uuid128(a), UuidValue::Uuid128(b)) => a == b,
            _ => self.expanded() == other.expanded(),
        }
    }
}

impl Eq for UuidValue {}

impl Hash for UuidValue {
    // equal values of different widths share one expansion
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.expanded().hash(state);
    }
}

impl From<uuid::Uuid> for UuidValue {
    fn from(uuid: uuid::Uuid) -> Self {
        UuidValue::from_bytes_be_reversed(uuid.as_bytes())
    }
}

impl From<UuidValue> for uuid::Uuid {
    /// Always produces the canonical 128-bit form.
    ///
    /// ```
    /// use bt_uuid::UuidValue;
    ///
    /// let uuid: uuid::Uuid = UuidValue::from_uint16(0xFFF6).into();
    /// assert_eq!(uuid, uuid::Uuid::from_u128(0x0000FFF6_0000_1000_8000_00805F9B34FB));
    /// ```
    fn from(value: UuidValue) -> Self {
        let mut data = value.expanded();
        data.reverse();
        uuid::Uuid::from_bytes(data)
    }
}
