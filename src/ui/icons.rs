//! 8×8 status-bar icons, one byte per row, MSB is the leftmost pixel.

pub const ICON_SIZE: u32 = 8;

pub const USB: [u8; 8] = [
    0b0001_1000,
    0b0011_1100,
    0b0001_1000,
    0b0101_1010,
    0b0101_1010,
    0b0011_1100,
    0b0001_1000,
    0b0001_1000,
];

pub const NUMPAD: [u8; 8] = [
    0b0000_0000,
    0b1101_1011,
    0b1101_1011,
    0b0000_0000,
    0b1101_1011,
    0b1101_1011,
    0b0000_0000,
    0b1101_1011,
];

pub const BATTERY_LOW: [u8; 8] = [
    0b0000_0000,
    0b1111_1110,
    0b1000_0010,
    0b1000_0011,
    0b1100_0011,
    0b1000_0010,
    0b1111_1110,
    0b0000_0000,
];
