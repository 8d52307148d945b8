//! Mirror of the tagged identifier struct used by the native BLE stack.

use core::fmt::Debug;

use crate::{Result, UuidError, UuidValue};

pub const RAW_UUID_LEN_16: u16 = 2;
pub const RAW_UUID_LEN_32: u16 = 4;
pub const RAW_UUID_LEN_128: u16 = 16;

/// Payload of a [`RawBtUuid`]. The constructors zero fill all 16 bytes, so
/// every member is readable whatever the tag says.
#[repr(C)]
#[derive(Copy, Clone)]
pub union RawBtUuidPayload {
    pub(crate) uuid16: u16,
    pub(crate) uuid32: u32,
    pub(crate) uuid128: [u8; 16],
}

impl RawBtUuidPayload {
    pub const fn zeroed() -> Self {
        RawBtUuidPayload { uuid128: [0; 16] }
    }

    pub fn uuid16(value: u16) -> Self {
        let mut payload = Self::zeroed();
        payload.uuid16 = value;
        payload
    }

    pub fn uuid32(value: u32) -> Self {
        let mut payload = Self::zeroed();
        payload.uuid32 = value;
        payload
    }

    pub const fn uuid128(data: [u8; 16]) -> Self {
        RawBtUuidPayload { uuid128: data }
    }

    /// All 16 payload bytes, in memory order.
    pub fn as_bytes(&self) -> [u8; 16] {
        // SAFETY: payloads are only built through the zero filling
        // constructors above, so all 16 bytes are initialized
        unsafe { self.uuid128 }
    }
}

/// Tagged identifier as laid out by the stack: `len` tells which member of
/// `uuid` is valid.
#[repr(C)]
#[derive(Copy, Clone)]
pub struct RawBtUuid {
    pub len: u16,
    pub uuid: RawBtUuidPayload,
}

impl Default for RawBtUuid {
    fn default() -> Self {
        Self {
            len: 0,
            uuid: RawBtUuidPayload::zeroed(),
        }
    }
}

impl Debug for RawBtUuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match UuidValue::from_external_tagged(*self) {
            Ok(value) => f.write_fmt(format_args!("RawBtUuid({})", value)),
            Err(_) => f.write_fmt(format_args!("RawBtUuid(len={})", self.len)),
        }
    }
}

impl UuidValue {
    /// Copies the valid member of a stack identifier.
    ///
    /// Example:
    ///
    /// ```
    /// use bt_uuid::{RawBtUuid, RawBtUuidPayload, UuidValue, UuidError};
    ///
    /// let raw = RawBtUuid { len: 2, uuid: RawBtUuidPayload::uuid16(0x180D) };
    /// assert_eq!(
    ///     UuidValue::from_external_tagged(raw).unwrap().as_u16(),
    ///     Some(0x180D)
    /// );
    ///
    /// assert_eq!(
    ///     UuidValue::from_external_tagged(RawBtUuid::default()),
    ///     Err(UuidError::InvalidWidth(0))
    /// );
    /// ```
    pub fn from_external_tagged(raw: RawBtUuid) -> Result<UuidValue> {
        // SAFETY: the payload always has its 16 bytes initialized (see the
        // RawBtUuidPayload constructors) and every member is plain integers
        unsafe {
            match raw.len {
                RAW_UUID_LEN_16 => Ok(UuidValue::Uuid16(raw.uuid.uuid16)),
                RAW_UUID_LEN_32 => Ok(UuidValue::Uuid32(raw.uuid.uuid32)),
                RAW_UUID_LEN_128 => Ok(UuidValue::Uuid128(raw.uuid.uuid128)),
                other => Err(UuidError::InvalidWidth(other)),
            }
        }
    }

    pub fn to_external_tagged(&self) -> RawBtUuid {
        let uuid = match *self {
            UuidValue::Uuid16(value) => RawBtUuidPayload::uuid16(value),
            UuidValue::Uuid32(value) => RawBtUuidPayload::uuid32(value),
            UuidValue::Uuid128(data) => RawBtUuidPayload::uuid128(data),
        };

        RawBtUuid {
            len: self.width().byte_len() as u16,
            uuid,
        }
    }
}

impl TryFrom<RawBtUuid> for UuidValue {
    type Error = UuidError;

    fn try_from(raw: RawBtUuid) -> Result<Self> {
        UuidValue::from_external_tagged(raw)
    }
}

impl From<UuidValue> for RawBtUuid {
    fn from(value: UuidValue) -> Self {
        value.to_external_tagged()
    }
}
