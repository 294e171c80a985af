use crate::{
    consts::*,
    header::{Channels, Header, HeaderError},
    pixel::Rgba,
};
use alloc::vec::Vec;
use snafu::{ensure, Snafu};

#[cfg(feature = "std")]
mod std_api;
#[cfg(feature = "std")]
pub use std_api::*;

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum DecodeError {
    #[snafu(display("input of {len} bytes is too short to hold a header and end marker"))]
    UnexpectedEof { len: usize },
    #[snafu(display("{source}"), context(false))]
    InvalidHeader { source: HeaderError },
}

/// Parses and validates the header without touching the chunk data.
pub fn decode_header(data: &[u8]) -> Result<Header, DecodeError> {
    let Some(raw) = data.first_chunk::<QOI2_HEADER_SIZE>() else {
        return UnexpectedEofSnafu { len: data.len() }.fail();
    };
    Ok(Header::parse(raw)?)
}

/// Decodes a qoi2 stream into raw pixels, appended to `out`.
///
/// `channels` selects the output layout; `None` keeps the layout recorded in
/// the stream header. Returns the parsed header.
///
/// Chunk data is never itself rejected: the decoder reconstructs whatever
/// the stream describes, stops at the end marker, and leaves any unreached
/// tail of the output zeroed.
pub fn decode_to_vec(
    data: &[u8],
    channels: Option<Channels>,
    out: &mut Vec<u8>,
) -> Result<Header, DecodeError> {
    ensure!(
        data.len() >= QOI2_HEADER_SIZE + QOI2_PADDING.len(),
        UnexpectedEofSnafu { len: data.len() }
    );
    let header = decode_header(data)?;

    let start = out.len();
    out.resize(start + header.decoded_size(channels), 0);
    decode_chunks(
        data,
        &mut out[start..],
        channels.unwrap_or(header.channels),
    );
    Ok(header)
}

/// Decodes a qoi2 stream into a freshly allocated pixel buffer.
pub fn decode_alloc(
    data: &[u8],
    channels: Option<Channels>,
) -> Result<(Header, Vec<u8>), DecodeError> {
    let mut out = Vec::new();
    let header = decode_to_vec(data, channels, &mut out)?;
    Ok((header, out))
}

/// The single-pass chunk walk. `pixels` is exactly the decoded image size.
///
/// `chunks_len` excludes the end padding, and is tested once per iteration.
/// No chunk reads more than 3 bytes past its tag, so the 4 padding bytes
/// absorb the worst overread a truncated final chunk can cause.
fn decode_chunks(data: &[u8], pixels: &mut [u8], channels: Channels) {
    let chunks_len = data.len() - QOI2_PADDING.len();
    let step = channels.count();

    let mut index = [Rgba::ZERO; 64];
    let mut index_pos: usize = 0;
    let mut px = Rgba::OPAQUE_BLACK;
    let mut run: u16 = 0;
    let mut p = QOI2_HEADER_SIZE;
    let mut px_pos = 0;

    macro_rules! insert {
        () => {{
            index[index_pos & 63] = px;
            index_pos += 1;
        }};
    }

    while px_pos < pixels.len() {
        if run > 0 {
            run -= 1;
        } else if p < chunks_len {
            let b1 = data[p];
            p += 1;

            match b1 {
                0x00..=0x7f => {
                    // LUMA
                    let vg = ((b1 >> 4) & 0x07).wrapping_sub(4);
                    let bias = if (vg as i8) < 0 { 1 } else { 2 };
                    px.g = px.g.wrapping_add(vg);
                    px.r = px
                        .r
                        .wrapping_add(vg)
                        .wrapping_sub(bias)
                        .wrapping_add((b1 >> 2) & 0x03);
                    px.b = px.b.wrapping_add(vg).wrapping_sub(bias).wrapping_add(b1 & 0x03);
                    insert!();
                }
                0x80..=0xbf => {
                    // INDEX
                    px = index[usize::from(b1 & 0x3f)];
                }
                0xc0..=0xdf => {
                    // LUMA2
                    let b2 = data[p];
                    p += 1;
                    let vg = (b1 & 0x1f).wrapping_sub(16);
                    px.g = px.g.wrapping_add(vg);
                    px.r = px
                        .r
                        .wrapping_add(vg)
                        .wrapping_sub(8)
                        .wrapping_add((b2 >> 4) & 0x0f);
                    px.b = px.b.wrapping_add(vg).wrapping_sub(8).wrapping_add(b2 & 0x0f);
                    insert!();
                }
                0xe0..=0xef => {
                    // LUMA3
                    let b2 = data[p];
                    let vg = data[p + 1].wrapping_sub(128);
                    p += 2;
                    px.g = px.g.wrapping_add(vg);
                    px.r = px
                        .r
                        .wrapping_add(vg)
                        .wrapping_sub(32)
                        .wrapping_add((b1 & 0x0f) << 2 | b2 >> 6);
                    px.b = px.b.wrapping_add(vg).wrapping_sub(32).wrapping_add(b2 & 0x3f);
                    insert!();
                }
                0xf0..=0xf7 => {
                    // RUN: emit once now, `run` counts the extra repeats.
                    run = u16::from(b1 & 0x07);
                }
                0xf8..=0xfb => {
                    // RUN2
                    run = u16::from(b1 & 0x03) << 8 | u16::from(data[p]);
                    p += 1;
                }
                QOI2_OP_GRAY => {
                    let v = data[p];
                    p += 1;
                    px.r = v;
                    px.g = v;
                    px.b = v;
                    insert!();
                }
                QOI2_OP_RGB => {
                    px.r = data[p];
                    px.g = data[p + 1];
                    px.b = data[p + 2];
                    p += 3;
                    insert!();
                }
                QOI2_OP_A => {
                    // Composes with the next chunk; emits nothing itself.
                    px.a = data[p];
                    p += 1;
                    continue;
                }
                _ => break, // QOI2_OP_END
            }
        }

        pixels[px_pos] = px.r;
        pixels[px_pos + 1] = px.g;
        pixels[px_pos + 2] = px.b;
        if step == 4 {
            pixels[px_pos + 3] = px.a;
        }
        px_pos += step;
    }
}
