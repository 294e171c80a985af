use crate::{
    encode::{encode_alloc, EncodeError},
    header::Header,
};
use snafu::{ResultExt, Snafu};
use std::{io::Write, path::Path};

#[derive(Debug, Snafu)]
pub enum WriteError {
    #[snafu(display("{source}"), context(false))]
    Encode { source: EncodeError },
    #[snafu(display("failed to write encoded image: {source}"))]
    WriteIo { source: std::io::Error },
}

/// Encodes an image and writes the stream through `w`.
///
/// Returns the number of bytes written.
pub fn encode_to_writer<W: Write>(
    header: &Header,
    pixels: &[u8],
    mut w: W,
) -> Result<usize, WriteError> {
    let encoded = encode_alloc(header, pixels)?;
    w.write_all(&encoded).context(WriteIoSnafu)?;
    Ok(encoded.len())
}

/// Encodes an image and writes it to the file system.
///
/// Returns the number of bytes written.
pub fn write_path<P: AsRef<Path>>(
    path: P,
    header: &Header,
    pixels: &[u8],
) -> Result<usize, WriteError> {
    let encoded = encode_alloc(header, pixels)?;
    std::fs::write(path, &encoded).context(WriteIoSnafu)?;
    Ok(encoded.len())
}
