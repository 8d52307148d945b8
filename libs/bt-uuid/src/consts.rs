/// The Bluetooth base UUID `00000000-0000-1000-8000-00805F9B34FB` in stored
/// (least significant byte first) order.
///
/// Short identifiers live in bytes 12..16.
pub const BASE_UUID: [u8; 16] = [
    0xFB, 0x34, 0x9B, 0x5F, 0x80, 0x00, 0x00, 0x80, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

pub mod services {
    use crate::UuidValue;

    pub const GENERIC_ACCESS: UuidValue = UuidValue::from_uint16(0x1800);
    pub const GENERIC_ATTRIBUTE: UuidValue = UuidValue::from_uint16(0x1801);
    pub const DEVICE_INFORMATION: UuidValue = UuidValue::from_uint16(0x180A);
    pub const HEART_RATE: UuidValue = UuidValue::from_uint16(0x180D);
    pub const BATTERY: UuidValue = UuidValue::from_uint16(0x180F);
}
