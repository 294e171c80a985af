//! qoi2 — a lossless RGB/RGBA image codec based on QOI, with multi-resolution
//! luma-difference chunks for better compression of photographic content.
//!
//! # Format
//!
//! ## Header
//!
//! - 4-byte magic: `qoi2`
//! - u32be width: > 0
//! - u32be height: > 0
//! - u8 channels: 3 (RGB) or 4 (RGBA)
//! - u8 colorspace: 0 (sRGB with linear alpha) or 1 (all channels linear)
//!
//! width * height must stay below 350,000,000 pixels.
//!
//! Images are encoded row by row, left to right, top to bottom. The decoder
//! and encoder start with `{r: 0, g: 0, b: 0, a: 255}` as the previous pixel
//! value. An image is complete when all pixels specified by width * height
//! have been covered. The color channels are assumed to not be premultiplied
//! with the alpha channel ("un-premultiplied alpha").
//!
//! A running `array[64]` of pixel values (zero-initialized, so *not* the
//! starting previous pixel) is maintained by the encoder and decoder. Every
//! pixel en-/decoded by the `QOI_OP_LUMA` (and variants), `QOI_OP_GRAY` and
//! `QOI_OP_RGB` chunks is written to this array at a write position that
//! starts at 0 and wraps back to 0 when it reaches 64. `QOI_OP_INDEX`,
//! `QOI_OP_RUN`, `QOI_OP_RUN2` and `QOI_OP_A` do not advance the position;
//! encoder and decoder must agree on this exactly.
//!
//! ## Stream format
//!
//! ```plain
//! .- QOI_OP_LUMA -----------.
//! |         Byte[0]         |
//! |  7  6  5  4  3  2  1  0 |
//! |----+--------+-----+-----|
//! |  0 | g diff | drg | dbg |
//! `-------------------------`
//! ```
//!
//! - 1-bit tag b0
//! - 3-bit green channel difference from the previous pixel -4..3
//! - 2-bit red channel difference minus green channel difference
//! - 2-bit blue channel difference minus green channel difference
//!
//! The green channel indicates the general direction of change. The red and
//! blue differences are relative to it, stored with a bias of 1 when the
//! green difference is negative (reaching -1..2) and a bias of 2 otherwise
//! (reaching -2..1). The green difference is stored with a bias of 4.
//!
//! All channel differences here and below wrap around, so `1 - 2` is 255 and
//! `255 + 1` is 0.
//!
//! ```plain
//! .- QOI_OP_INDEX ----------.
//! |         Byte[0]         |
//! |  7  6  5  4  3  2  1  0 |
//! |-------+-----------------|
//! |  1  0 |     index       |
//! `-------------------------`
//! ```
//!
//! - 2-bit tag b10
//! - 6-bit index into the color index array: 0..63
//!
//! ```plain
//! .- QOI_OP_LUMA2 ------------------------------------.
//! |         Byte[0]         |         Byte[1]         |
//! |  7  6  5  4  3  2  1  0 |  7  6  5  4  3  2  1  0 |
//! |----------+--------------+-------------+-----------|
//! |  1  1  0 |  green diff  |   dr - dg   |  db - dg  |
//! `---------------------------------------------------`
//! ```
//!
//! - 3-bit tag b110
//! - 5-bit green channel difference from the previous pixel -16..15
//! - 4-bit red channel difference minus green channel difference -8..7
//! - 4-bit blue channel difference minus green channel difference -8..7
//!
//! Values are stored with a bias of 16 for the green channel and 8 for
//! red and blue. The alpha value remains unchanged from the previous pixel.
//!
//! ```plain
//! .- QOI_OP_LUMA3 ------------------------------------.-------------------------.
//! |         Byte[0]         |         Byte[1]         |         Byte[2]         |
//! |  7  6  5  4  3  2  1  0 |  7  6  5  4  3  2  1  0 |  7  6  5  4  3  2  1  0 |
//! |-------------+-----------+-------+-----------------+-------------------------|
//! |  1  1  1  0 |      dr - dg      |     db - dg     |        green diff       |
//! `-----------------------------------------------------------------------------`
//! ```
//!
//! - 4-bit tag b1110
//! - 6-bit red channel difference minus green channel difference -32..31
//! - 6-bit blue channel difference minus green channel difference -32..31
//! - 8-bit green channel difference from the previous pixel -128..127
//!
//! Values are stored with a bias of 128 for the green channel and 32 for
//! red and blue.
//!
//! ```plain
//! .- QOI_OP_RUN ------------.
//! |         Byte[0]         |
//! |  7  6  5  4  3  2  1  0 |
//! |----------------+--------|
//! |  1  1  1  1  0 |  run   |
//! `-------------------------`
//! ```
//!
//! - 5-bit tag b11110
//! - 3-bit run-length repeating the previous pixel: 1..8, stored with a
//!   bias of 1
//!
//! ```plain
//! .- QOI_OP_RUN2 ---------------------.
//! |         Byte[0]         | Byte[1] |
//! |  7  6  5  4  3  2  1  0 | 7 .. 0  |
//! |-------------------+-----+---------|
//! |  1  1  1  1  1  0 |      run      |
//! `-----------------------------------`
//! ```
//!
//! - 6-bit tag b111110
//! - 10-bit run-length repeating the previous pixel: 1..1024, stored with a
//!   bias of 1
//!
//! ```plain
//! .- QOI_OP_GRAY ---------------------.
//! |         Byte[0]         | Byte[1] |
//! |  7  6  5  4  3  2  1  0 | 7 .. 0  |
//! |-------------------------+---------|
//! |  1  1  1  1  1  1  0  0 |  gray   |
//! `-----------------------------------`
//! ```
//!
//! - 8-bit tag b11111100
//! - 8-bit value written to all three color channels
//!
//! ```plain
//! .- QOI_OP_RGB ------------------------------------------.
//! |         Byte[0]         | Byte[1] | Byte[2] | Byte[3] |
//! |  7  6  5  4  3  2  1  0 | 7 .. 0  | 7 .. 0  | 7 .. 0  |
//! |-------------------------+---------+---------+---------|
//! |  1  1  1  1  1  1  0  1 |   red   |  green  |  blue   |
//! `-------------------------------------------------------`
//! ```
//!
//! - 8-bit tag b11111101
//! - full red, green and blue channel values
//!
//! ```plain
//! .- QOI_OP_A ------------------------.
//! |         Byte[0]         | Byte[1] |
//! |  7  6  5  4  3  2  1  0 | 7 .. 0  |
//! |-------------------------+---------|
//! |  1  1  1  1  1  1  1  0 |  alpha  |
//! `-----------------------------------`
//! ```
//!
//! - 8-bit tag b11111110
//! - 8-bit alpha channel value
//!
//! Updates the alpha of the current pixel without emitting it; the update
//! composes with whichever chunk follows.
//!
//! ```plain
//! .- QOI_OP_END ------------.
//! |         Byte[0]         |
//! |  7  6  5  4  3  2  1  0 |
//! |-------------------------|
//! |  1  1  1  1  1  1  1  1 |
//! `-------------------------`
//! ```
//!
//! End of stream marker.
//!
//! The byte stream is padded at the end with four 0xff bytes. Since no chunk
//! carries more than 3 data bytes after its tag, with this padding it is
//! possible to check for an overrun only once per decode loop iteration.
//! These 0xff bytes also mark the end of the data stream, as an encoder
//! never produces four consecutive 0xff bytes within it.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod consts;
pub mod header;

#[cfg(feature = "alloc")]
pub mod decode;
#[cfg(feature = "alloc")]
pub mod encode;
#[cfg(feature = "alloc")]
mod pixel;

pub use header::{Channels, Colorspace, Header, HeaderError};

#[cfg(feature = "alloc")]
pub use decode::{decode_alloc, decode_header, decode_to_vec, DecodeError};
#[cfg(feature = "alloc")]
pub use encode::{encode_alloc, encode_to_vec, EncodeError};

#[cfg(feature = "std")]
pub use decode::{read_path, ReadError};
#[cfg(feature = "std")]
pub use encode::{encode_to_writer, write_path, WriteError};
