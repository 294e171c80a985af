use crate::{
    consts::*,
    header::{Header, HeaderError},
    pixel::Rgba,
};
use alloc::vec::Vec;
use snafu::{ensure, Snafu};

#[cfg(feature = "std")]
mod std_api;
#[cfg(feature = "std")]
pub use std_api::*;

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum EncodeError {
    #[snafu(display("{source}"), context(false))]
    InvalidDescriptor { source: HeaderError },
    #[snafu(display(
        "pixel buffer of {len} bytes doesn't match a {width}x{height} image \
         with {channels} channels ({} bytes)",
        width * height * channels
    ))]
    BufferSizeMismatch {
        width: usize,
        height: usize,
        channels: usize,
        len: usize,
    },
}

/// Signed differences of a pixel against its predecessor, green-correlated:
/// `vgr` and `vgb` are the red/blue deltas with the green delta subtracted
/// out. All three wrap modulo 256 before the signed reinterpretation.
#[derive(Debug, Clone, Copy)]
struct Diff {
    vg: i8,
    vgr: i8,
    vgb: i8,
}

impl Diff {
    #[inline]
    fn between(px: Rgba, prev: Rgba) -> Self {
        let vg = px.g.wrapping_sub(prev.g) as i8;
        Self {
            vg,
            vgr: px.r.wrapping_sub(prev.r).wrapping_sub(vg as u8) as i8,
            vgb: px.b.wrapping_sub(prev.b).wrapping_sub(vg as u8) as i8,
        }
    }

    /// One-byte luma chunk. The red/blue bias depends on the sign of the
    /// green delta, which shifts the reachable window in the direction the
    /// image is already moving.
    #[inline]
    fn luma(self) -> Option<u8> {
        if matches!((self.vg, self.vgr, self.vgb), (-4..=-1, -1..=2, -1..=2)) {
            Some(
                QOI2_OP_LUMA
                    | ((self.vg + 4) as u8) << 4
                    | ((self.vgr + 1) as u8) << 2
                    | (self.vgb + 1) as u8,
            )
        } else if matches!((self.vg, self.vgr, self.vgb), (0..=3, -2..=1, -2..=1)) {
            Some(
                QOI2_OP_LUMA
                    | ((self.vg + 4) as u8) << 4
                    | ((self.vgr + 2) as u8) << 2
                    | (self.vgb + 2) as u8,
            )
        } else {
            None
        }
    }

    #[inline]
    fn luma2(self) -> Option<[u8; 2]> {
        if matches!((self.vg, self.vgr, self.vgb), (-16..=15, -8..=7, -8..=7)) {
            Some([
                QOI2_OP_LUMA2 | (self.vg + 16) as u8,
                ((self.vgr + 8) as u8) << 4 | (self.vgb + 8) as u8,
            ])
        } else {
            None
        }
    }

    #[inline]
    fn luma3(self) -> Option<[u8; 3]> {
        if matches!((self.vgr, self.vgb), (-32..=31, -32..=31)) {
            Some([
                QOI2_OP_LUMA3 | ((self.vgr + 32) as u8) >> 2,
                (((self.vgr + 32) as u8) & 3) << 6 | (self.vgb + 32) as u8,
                (self.vg as u8).wrapping_add(128),
            ])
        } else {
            None
        }
    }
}

#[inline]
fn push_run(out: &mut Vec<u8>, run: u16) {
    // Lengths are stored with a bias of 1.
    let run = run - 1;
    if run < 8 {
        out.push(QOI2_OP_RUN | run as u8);
    } else {
        out.extend_from_slice(&[QOI2_OP_RUN2 | (run >> 8) as u8, run as u8]);
    }
}

/// Encodes raw RGB or RGBA pixels into a qoi2 stream, appended to `out`.
///
/// `pixels` must hold exactly `width * height * channels` bytes, row-major,
/// top to bottom. On success `out` has gained the full stream: header,
/// chunks and the 4-byte end marker.
pub fn encode_to_vec(header: &Header, pixels: &[u8], out: &mut Vec<u8>) -> Result<(), EncodeError> {
    header.validate()?;

    let channels = header.channels.count();
    ensure!(
        pixels.len() == header.decoded_size(None),
        BufferSizeMismatchSnafu {
            width: header.width as usize,
            height: header.height as usize,
            channels,
            len: pixels.len(),
        }
    );

    out.reserve(header.encoded_size_limit());
    out.extend_from_slice(&header.to_bytes());

    let mut index = [Rgba::ZERO; 64];
    let mut lookup = [0u8; 1024];
    let mut index_pos: usize = 0;
    let mut prev = Rgba::OPAQUE_BLACK;
    let mut run: u16 = 0;
    let has_alpha = header.channels.has_alpha();

    let mut chunks = pixels.chunks_exact(channels);
    while let Some(bytes) = chunks.next() {
        let px = if has_alpha {
            Rgba::read_rgba(bytes)
        } else {
            Rgba::read_rgb(bytes)
        };

        if px == prev {
            run += 1;
            if run == QOI2_RUN2_MAX || chunks.len() == 0 {
                let biased = run - 1;
                out.extend_from_slice(&[QOI2_OP_RUN2 | (biased >> 8) as u8, biased as u8]);
                run = 0;
            }
            continue;
        }

        if run > 0 {
            push_run(out, run);
            run = 0;
        }

        let hash = px.lookup_hash();
        let slot = lookup[hash];
        if index[usize::from(slot)] == px {
            // The lookup table may be stale, so a hit only counts after the
            // full pixel comparison.
            out.push(QOI2_OP_INDEX | slot);
        } else {
            lookup[hash] = index_pos as u8;
            index[index_pos] = px;
            index_pos = (index_pos + 1) & 63;

            if px.a != prev.a {
                out.extend_from_slice(&[QOI2_OP_A, px.a]);
            }

            let diff = Diff::between(px, prev);
            if let Some(byte) = diff.luma() {
                out.push(byte);
            } else if px.is_gray() {
                out.extend_from_slice(&[QOI2_OP_GRAY, px.g]);
            } else if let Some(bytes) = diff.luma2() {
                out.extend_from_slice(&bytes);
            } else if let Some(bytes) = diff.luma3() {
                out.extend_from_slice(&bytes);
            } else {
                out.extend_from_slice(&[QOI2_OP_RGB, px.r, px.g, px.b]);
            }
        }

        prev = px;
    }

    out.extend_from_slice(&QOI2_PADDING);
    Ok(())
}

/// Encodes raw RGB or RGBA pixels into a freshly allocated qoi2 stream.
pub fn encode_alloc(header: &Header, pixels: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    encode_to_vec(header, pixels, &mut out)?;
    Ok(out)
}
