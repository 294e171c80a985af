//! Wire-format constants.

pub const QOI2_OP_LUMA: u8 = 0x00; /* 0xxxxxxx */
pub const QOI2_OP_INDEX: u8 = 0x80; /* 10xxxxxx */
pub const QOI2_OP_LUMA2: u8 = 0xc0; /* 110xxxxx */
pub const QOI2_OP_LUMA3: u8 = 0xe0; /* 1110xxxx */
pub const QOI2_OP_RUN: u8 = 0xf0; /* 11110xxx */
pub const QOI2_OP_RUN2: u8 = 0xf8; /* 111110xx */
pub const QOI2_OP_GRAY: u8 = 0xfc; /* 11111100 */
pub const QOI2_OP_RGB: u8 = 0xfd; /* 11111101 */
pub const QOI2_OP_A: u8 = 0xfe; /* 11111110 */
pub const QOI2_OP_END: u8 = 0xff; /* 11111111 */

pub const QOI2_MAGIC: [u8; 4] = *b"qoi2";
pub const QOI2_HEADER_SIZE: usize = 14;

/// End-of-stream marker. Doubles as padding the decoder may overread into.
pub const QOI2_PADDING: [u8; 4] = [QOI2_OP_END; 4];

/// Largest pixel count the codec accepts. Keeps the worst-case encoded size
/// (6 bytes per pixel) comfortably below 2 GiB.
pub const QOI2_PIXELS_MAX: u32 = 350_000_000;

/// Longest span a single run chunk can cover.
pub const QOI2_RUN2_MAX: u16 = 1024;
