use crate::{
    decode::{decode_alloc, DecodeError},
    header::{Channels, Header},
};
use alloc::vec::Vec;
use snafu::{ResultExt, Snafu};
use std::path::Path;

#[derive(Debug, Snafu)]
pub enum ReadError {
    #[snafu(display("{source}"), context(false))]
    Decode { source: DecodeError },
    #[snafu(display("failed to read image: {source}"))]
    ReadIo { source: std::io::Error },
}

/// Reads a qoi2 file from the file system and decodes it.
///
/// `channels` selects the output layout; `None` keeps the layout recorded in
/// the file header.
pub fn read_path<P: AsRef<Path>>(
    path: P,
    channels: Option<Channels>,
) -> Result<(Header, Vec<u8>), ReadError> {
    let data = std::fs::read(path).context(ReadIoSnafu)?;
    Ok(decode_alloc(&data, channels)?)
}
