use crate::consts::{QOI2_HEADER_SIZE, QOI2_MAGIC, QOI2_PADDING, QOI2_PIXELS_MAX};
use byteorder::{BigEndian, ByteOrder};
use snafu::{ensure, Snafu};

/// Number of 8-bit channels in every pixel of an image.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    Rgb = 3,
    Rgba = 4,
}

impl Channels {
    /// Bytes per pixel.
    #[inline]
    pub const fn count(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Channels::Rgba)
    }
}

/// How the channel values are to be interpreted. Purely informative; it is
/// stored in the header but does not affect how chunks are en-/decoded.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colorspace {
    /// Gamma-scaled RGB channels and a linear alpha channel.
    Srgb = 0,
    /// All channels linear.
    Linear = 1,
}

#[derive(Debug, Snafu, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    #[snafu(display("invalid magic bytes {found:?}, expected \"qoi2\""))]
    InvalidMagic { found: [u8; 4] },
    #[snafu(display("image dimensions must be non-zero, got {width}x{height}"))]
    ZeroDimensions { width: u32, height: u32 },
    #[snafu(display("invalid channels value {value}, must be 3 or 4"))]
    InvalidChannels { value: u8 },
    #[snafu(display("invalid colorspace value {value}, must be 0 or 1"))]
    InvalidColorspace { value: u8 },
    #[snafu(display("a {width}x{height} image exceeds the 350 million pixel limit"))]
    TooManyPixels { width: u32, height: u32 },
}

/// Image descriptor stored in the 14-byte stream header.
///
/// Callers fill one in to drive encoding; decoding parses one out of the
/// stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub channels: Channels,
    pub colorspace: Colorspace,
}

impl Header {
    /// Parses and validates the fixed-size header.
    pub fn parse(raw: &[u8; QOI2_HEADER_SIZE]) -> Result<Self, HeaderError> {
        ensure!(
            raw[..4] == QOI2_MAGIC,
            InvalidMagicSnafu {
                found: [raw[0], raw[1], raw[2], raw[3]],
            }
        );

        let width = BigEndian::read_u32(&raw[4..8]);
        let height = BigEndian::read_u32(&raw[8..12]);
        let channels = match raw[12] {
            3 => Channels::Rgb,
            4 => Channels::Rgba,
            value => return InvalidChannelsSnafu { value }.fail(),
        };
        let colorspace = match raw[13] {
            0 => Colorspace::Srgb,
            1 => Colorspace::Linear,
            value => return InvalidColorspaceSnafu { value }.fail(),
        };

        let header = Header {
            width,
            height,
            channels,
            colorspace,
        };
        header.validate()?;
        Ok(header)
    }

    /// Serializes the header. The exact inverse of [`Header::parse`] for
    /// valid headers.
    pub fn to_bytes(&self) -> [u8; QOI2_HEADER_SIZE] {
        let mut raw = [0; QOI2_HEADER_SIZE];
        raw[..4].copy_from_slice(&QOI2_MAGIC);
        BigEndian::write_u32(&mut raw[4..8], self.width);
        BigEndian::write_u32(&mut raw[8..12], self.height);
        raw[12] = self.channels as u8;
        raw[13] = self.colorspace as u8;
        raw
    }

    /// Checks the dimension invariants: both non-zero, product under the
    /// pixel limit.
    pub fn validate(&self) -> Result<(), HeaderError> {
        ensure!(
            self.width != 0 && self.height != 0,
            ZeroDimensionsSnafu {
                width: self.width,
                height: self.height,
            }
        );
        ensure!(
            self.height < QOI2_PIXELS_MAX / self.width,
            TooManyPixelsSnafu {
                width: self.width,
                height: self.height,
            }
        );
        Ok(())
    }

    #[inline]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Length of the raw pixel buffer this image decodes to, in the given
    /// output layout (`None` keeps the header's own channel count).
    pub fn decoded_size(&self, channels: Option<Channels>) -> usize {
        self.pixel_count() as usize * channels.unwrap_or(self.channels).count()
    }

    /// Worst-case encoded size: every 4-channel pixel as an alpha chunk plus
    /// an RGB chunk, every 3-channel pixel as an RGB chunk.
    pub fn encoded_size_limit(&self) -> usize {
        let per_pixel = match self.channels {
            Channels::Rgb => 4,
            Channels::Rgba => 6,
        };
        QOI2_HEADER_SIZE + QOI2_PADDING.len() + self.pixel_count() as usize * per_pixel
    }
}

#[cfg(test)]
mod tests {
    use super::{Channels, Colorspace, Header, HeaderError};

    fn sample() -> Header {
        Header {
            width: 640,
            height: 480,
            channels: Channels::Rgba,
            colorspace: Colorspace::Srgb,
        }
    }

    #[test]
    fn roundtrips_through_bytes() {
        let header = sample();
        assert_eq!(Header::parse(&header.to_bytes()), Ok(header));
    }

    #[test]
    fn serializes_big_endian_fields() {
        let raw = Header {
            width: 2,
            height: 1,
            channels: Channels::Rgb,
            colorspace: Colorspace::Srgb,
        }
        .to_bytes();
        assert_eq!(
            raw,
            [0x71, 0x6f, 0x69, 0x32, 0, 0, 0, 2, 0, 0, 0, 1, 3, 0]
        );
    }

    #[test]
    fn rejects_bad_magic() {
        let mut raw = sample().to_bytes();
        raw[0] = b'Q';
        assert!(matches!(
            Header::parse(&raw),
            Err(HeaderError::InvalidMagic { .. })
        ));
    }

    #[test]
    fn rejects_zero_dimensions() {
        let mut raw = sample().to_bytes();
        raw[4..8].copy_from_slice(&[0; 4]);
        assert!(matches!(
            Header::parse(&raw),
            Err(HeaderError::ZeroDimensions { .. })
        ));
    }

    #[test]
    fn rejects_bad_channels() {
        let mut raw = sample().to_bytes();
        raw[12] = 5;
        assert_eq!(
            Header::parse(&raw),
            Err(HeaderError::InvalidChannels { value: 5 })
        );
    }

    #[test]
    fn rejects_bad_colorspace() {
        let mut raw = sample().to_bytes();
        raw[13] = 9;
        assert_eq!(
            Header::parse(&raw),
            Err(HeaderError::InvalidColorspace { value: 9 })
        );
    }

    #[test]
    fn rejects_oversized_images() {
        let header = Header {
            width: 350_000_000,
            height: 1,
            ..sample()
        };
        assert!(matches!(
            header.validate(),
            Err(HeaderError::TooManyPixels { .. })
        ));
        assert!(matches!(
            Header::parse(&header.to_bytes()),
            Err(HeaderError::TooManyPixels { .. })
        ));
    }

    #[test]
    fn size_helpers() {
        let header = Header {
            width: 10,
            height: 10,
            channels: Channels::Rgb,
            colorspace: Colorspace::Linear,
        };
        assert_eq!(header.pixel_count(), 100);
        assert_eq!(header.decoded_size(None), 300);
        assert_eq!(header.decoded_size(Some(Channels::Rgba)), 400);
        assert_eq!(header.encoded_size_limit(), 18 + 400);
    }
}
