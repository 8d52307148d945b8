use byteorder::{ByteOrder, LittleEndian};

use crate::{Result, UuidError, UuidValue};

impl UuidValue {
    /// Decodes an identifier as found in ATT and advertising PDUs, where the
    /// width is given by the field length and bytes are little endian.
    ///
    /// Example:
    ///
    /// ```
    /// use bt_uuid::{UuidValue, UuidError};
    ///
    /// assert_eq!(UuidValue::from_le_slice(&[0x0D, 0x18]).unwrap().as_u16(), Some(0x180D));
    /// assert_eq!(
    ///     UuidValue::from_le_slice(&[0x44, 0x33, 0x22, 0x11]).unwrap().as_u32(),
    ///     Some(0x11223344)
    /// );
    /// assert_eq!(UuidValue::from_le_slice(&[1, 2, 3]), Err(UuidError::InvalidWireLength(3)));
    /// ```
    pub fn from_le_slice(data: &[u8]) -> Result<UuidValue> {
        match data.len() {
            2 => Ok(UuidValue::Uuid16(LittleEndian::read_u16(data))),
            4 => Ok(UuidValue::Uuid32(LittleEndian::read_u32(data))),
            16 => {
                let mut raw = [0u8; 16];
                raw.copy_from_slice(data);
                Ok(UuidValue::from_bytes_be(&raw))
            }
            other => Err(UuidError::InvalidWireLength(other)),
        }
    }

    /// Encodes the identifier in its own width, little endian.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut buffer = vec![0; self.width().byte_len()];
        match *self {
            UuidValue::Uuid16(value) => LittleEndian::write_u16(&mut buffer, value),
            UuidValue::Uuid32(value) => LittleEndian::write_u32(&mut buffer, value),
            UuidValue::Uuid128(data) => buffer.copy_from_slice(&data),
        }
        buffer
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::{UuidError, UuidValue, UuidWidth};

    #[test]
    fn wire_bytes_keep_width() {
        let uuid = UuidValue::from_uint16(0x2A37);
        assert_eq!(uuid.to_le_bytes(), vec![0x37, 0x2A]);

        let uuid = UuidValue::from_uint32(0x0001_2A37);
        assert_eq!(uuid.to_le_bytes(), vec![0x37, 0x2A, 0x01, 0x00]);

        // 128-bit wire order is the stored order
        let uuid = UuidValue::from_text("0000180d-0000-1000-8000-00805f9b34fb").unwrap();
        let bytes = uuid.to_le_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..4], &[0xFBu8, 0x34, 0x9B, 0x5F]);

        let decoded = UuidValue::from_le_slice(&bytes).unwrap();
        assert_eq!(decoded.width(), UuidWidth::Bits128);
        assert_eq!(decoded, UuidValue::from_uint16(0x180D));
    }

    #[test]
    fn unsupported_wire_lengths() {
        for len in [0usize, 1, 3, 5, 15, 17] {
            assert_eq!(
                UuidValue::from_le_slice(&vec![0; len]),
                Err(UuidError::InvalidWireLength(len))
            );
        }
    }
}
