use argh::FromArgs;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use qoi2::{Channels, Colorspace, Header};
use std::{fs::File, io::BufReader, str::FromStr};

/// qoi2 cli encoder and decoder.
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Encode(Encode),
    Decode(Decode),
    Info(Info),
}

#[derive(Debug)]
enum Format {
    Png,
    Jpg,
    Bmp,
}

impl FromStr for Format {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        #[rustfmt::skip]
        let Some(format) = s.eq_ignore_ascii_case("png").then_some(Format::Png)
               .or_else(|| s.eq_ignore_ascii_case("jpg").then_some(Format::Jpg))
               .or_else(|| s.eq_ignore_ascii_case("bmp").then_some(Format::Bmp))
        else { return Err("invalid string"); };

        Ok(format)
    }
}

impl From<Format> for ImageFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Png => ImageFormat::Png,
            Format::Jpg => ImageFormat::Jpeg,
            Format::Bmp => ImageFormat::Bmp,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli { command } = argh::from_env();

    match command {
        Command::Encode(options) => encode(options),
        Command::Decode(options) => decode(options),
        Command::Info(options) => info(options),
    }
}

/// Encodes an image as qoi2.
#[derive(FromArgs)]
#[argh(subcommand, name = "encode")]
struct Encode {
    /// input format, optional (png, jpg, bmp)
    #[argh(option)]
    format: Option<Format>,

    /// mark all channels as linear instead of sRGB
    #[argh(switch)]
    linear: bool,

    /// the input file. May be a PNG, JPG, or BMP.
    #[argh(positional)]
    input: String,
    /// the output file
    #[argh(positional)]
    output: String,
}

fn encode(options: Encode) -> Result<(), Box<dyn std::error::Error>> {
    let Encode {
        format,
        linear,
        input,
        output,
    } = options;

    let image = match format {
        Some(format) => {
            image::io::Reader::with_format(BufReader::new(File::open(&input)?), format.into())
                .decode()?
        }
        None => image::io::Reader::open(input)?
            .with_guessed_format()?
            .decode()?,
    };

    let width = image.width();
    let height = image.height();
    let colorspace = if linear {
        Colorspace::Linear
    } else {
        Colorspace::Srgb
    };

    println!("Encoding {width}x{height} image");

    let (channels, raw) = if image.color().has_alpha() {
        (Channels::Rgba, image.into_rgba8().into_raw())
    } else {
        (Channels::Rgb, image.into_rgb8().into_raw())
    };

    let header = Header {
        width,
        height,
        channels,
        colorspace,
    };

    let size = qoi2::write_path(&output, &header, &raw)?;
    println!("Written {size} bytes to `{output}`");

    Ok(())
}

/// Decodes a qoi2 image.
#[derive(FromArgs)]
#[argh(subcommand, name = "decode")]
struct Decode {
    /// output format (png, jpg, bmp)
    #[argh(option)]
    format: Format,

    /// the input file
    #[argh(positional)]
    input: String,
    /// the output file
    #[argh(positional)]
    output: String,
}

fn decode(options: Decode) -> Result<(), Box<dyn std::error::Error>> {
    let Decode {
        format,
        input,
        output,
    } = options;

    println!("Decoding `{input}`");

    let (header, pixels) = qoi2::read_path(&input, None)?;
    let Header { width, height, .. } = header;

    let image = match header.channels {
        Channels::Rgb => RgbImage::from_vec(width, height, pixels)
            .map(DynamicImage::ImageRgb8)
            .ok_or("failed to create image")?,
        Channels::Rgba => RgbaImage::from_vec(width, height, pixels)
            .map(DynamicImage::ImageRgba8)
            .ok_or("failed to create image")?,
    };

    // JPEG has no alpha channel.
    let image = match format {
        Format::Jpg => DynamicImage::ImageRgb8(image.into_rgb8()),
        _ => image,
    };

    image.save_with_format(&output, format.into())?;
    println!("Written {width}x{height} image to `{output}`");

    Ok(())
}

/// Prints the header of a qoi2 file.
#[derive(FromArgs)]
#[argh(subcommand, name = "info")]
struct Info {
    /// the input file
    #[argh(positional)]
    input: String,
}

fn info(options: Info) -> Result<(), Box<dyn std::error::Error>> {
    let Info { input } = options;

    let data = std::fs::read(&input)?;
    let header = qoi2::decode_header(&data)?;

    println!("{input}:");
    println!("  dimensions: {}x{}", header.width, header.height);
    println!("  channels:   {:?}", header.channels);
    println!("  colorspace: {:?}", header.colorspace);
    println!("  pixels:     {}", header.pixel_count());
    println!("  file size:  {} bytes", data.len());

    Ok(())
}
