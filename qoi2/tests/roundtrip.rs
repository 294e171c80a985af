use itertools::iproduct;
use qoi2::{decode_alloc, decode_header, encode_alloc, Channels, Colorspace, Header};

/// Deterministic xorshift so the "random" images are reproducible.
struct XorShift(u32);

impl XorShift {
    fn next_u8(&mut self) -> u8 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        (x >> 24) as u8
    }
}

fn header(width: u32, height: u32, channels: Channels) -> Header {
    Header {
        width,
        height,
        channels,
        colorspace: Colorspace::Srgb,
    }
}

fn noise(header: &Header, seed: u32) -> Vec<u8> {
    let mut rng = XorShift(seed);
    (0..header.decoded_size(None))
        .map(|_| rng.next_u8())
        .collect()
}

/// Smooth ramps with gentle channel drift, the content the luma chunks are
/// built for.
fn gradient(header: &Header) -> Vec<u8> {
    let alpha = header.channels.has_alpha();
    iproduct!(0..header.height, 0..header.width)
        .flat_map(|(y, x)| {
            let r = (x % 256) as u8;
            let g = ((x + y) % 256) as u8;
            let b = (y % 256) as u8;
            if alpha {
                vec![r, g, b, ((x / 7 + y / 3) % 256) as u8]
            } else {
                vec![r, g, b]
            }
        })
        .collect()
}

fn assert_roundtrip(header: &Header, pixels: &[u8]) {
    let encoded = encode_alloc(header, pixels).unwrap();

    assert!(encoded.len() <= header.encoded_size_limit());
    assert_eq!(&encoded[encoded.len() - 4..], &[0xff; 4]);
    let chunk_region = &encoded[14..encoded.len() - 4];
    assert!(
        chunk_region.windows(4).all(|w| w != [0xff; 4]),
        "end marker bytes inside the chunk region"
    );

    assert_eq!(decode_header(&encoded).unwrap(), *header);

    let (decoded_header, decoded) = decode_alloc(&encoded, None).unwrap();
    assert_eq!(decoded_header, *header);
    assert_eq!(decoded, pixels);
}

#[test]
fn roundtrips_noise_rgb() {
    for (i, (w, h)) in [(1, 1), (2, 1), (1, 2), (7, 3), (33, 17), (64, 64), (100, 1)]
        .into_iter()
        .enumerate()
    {
        let header = header(w, h, Channels::Rgb);
        assert_roundtrip(&header, &noise(&header, 0x1234_5678 + i as u32));
    }
}

#[test]
fn roundtrips_noise_rgba() {
    for (i, (w, h)) in [(1, 1), (3, 3), (17, 33), (64, 65), (1, 100)]
        .into_iter()
        .enumerate()
    {
        let header = header(w, h, Channels::Rgba);
        assert_roundtrip(&header, &noise(&header, 0x9e37_79b9 + i as u32));
    }
}

#[test]
fn roundtrips_random_256x256_rgba() {
    let header = header(256, 256, Channels::Rgba);
    assert_roundtrip(&header, &noise(&header, 42));
}

#[test]
fn roundtrips_gradients() {
    for channels in [Channels::Rgb, Channels::Rgba] {
        let header = header(200, 150, channels);
        assert_roundtrip(&header, &gradient(&header));
    }
}

#[test]
fn roundtrips_solid_images() {
    for channels in [Channels::Rgb, Channels::Rgba] {
        for (w, h) in [(1, 1), (32, 32), (1025, 1), (2048, 3)] {
            let header = header(w, h, channels);
            let pixels: Vec<u8> = [180, 90, 45, 255][..channels.count()]
                .iter()
                .copied()
                .cycle()
                .take(header.decoded_size(None))
                .collect();
            assert_roundtrip(&header, &pixels);
        }
    }
}

#[test]
fn roundtrips_sparse_alpha_changes() {
    // Mostly-opaque image with occasional translucent pixels, so alpha
    // chunks appear between long luma stretches.
    let header = header(59, 31, Channels::Rgba);
    let mut rng = XorShift(0xdead_beef);
    let mut pixels = gradient(&header);
    for px in pixels.chunks_exact_mut(4) {
        if rng.next_u8() > 240 {
            px[3] = rng.next_u8();
        } else {
            px[3] = 255;
        }
    }
    assert_roundtrip(&header, &pixels);
}

#[test]
fn roundtrips_more_than_64_distinct_colors() {
    // Forces the index ring to wrap and the slot lookup to go stale.
    let header = header(300, 2, Channels::Rgb);
    let mut pixels = Vec::with_capacity(header.decoded_size(None));
    for i in 0..header.pixel_count() {
        let v = (i * 37 % 251) as u8;
        pixels.extend_from_slice(&[v, v.wrapping_mul(3), v.wrapping_add(91)]);
    }
    // The palette repeats every 251 pixels, so index hits still occur.
    assert_roundtrip(&header, &pixels);
}

#[test]
fn rgb_decoded_as_rgba_is_opaque() {
    let header = header(45, 23, Channels::Rgb);
    let pixels = noise(&header, 7);

    let encoded = encode_alloc(&header, &pixels).unwrap();
    let (_, decoded) = decode_alloc(&encoded, Some(Channels::Rgba)).unwrap();

    assert_eq!(decoded.len(), header.decoded_size(Some(Channels::Rgba)));
    for (rgba, rgb) in decoded.chunks_exact(4).zip(pixels.chunks_exact(3)) {
        assert_eq!(&rgba[..3], rgb);
        assert_eq!(rgba[3], 255);
    }
}

#[test]
fn rgba_decoded_as_rgb_drops_alpha() {
    let header = header(23, 45, Channels::Rgba);
    let pixels = noise(&header, 11);

    let encoded = encode_alloc(&header, &pixels).unwrap();
    let (_, decoded) = decode_alloc(&encoded, Some(Channels::Rgb)).unwrap();

    assert_eq!(decoded.len(), header.decoded_size(Some(Channels::Rgb)));
    for (rgb, rgba) in decoded.chunks_exact(3).zip(pixels.chunks_exact(4)) {
        assert_eq!(rgb, &rgba[..3]);
    }
}

#[test]
fn writer_matches_the_in_memory_encoder() {
    let header = header(19, 7, Channels::Rgba);
    let pixels = noise(&header, 23);

    let mut written = Vec::new();
    let size = qoi2::encode_to_writer(&header, &pixels, &mut written).unwrap();

    assert_eq!(size, written.len());
    assert_eq!(written, encode_alloc(&header, &pixels).unwrap());
}

#[test]
fn roundtrips_through_the_file_system() {
    let header = header(31, 13, Channels::Rgb);
    let pixels = gradient(&header);

    let path = std::env::temp_dir().join("qoi2-roundtrip-test.qoi2");
    let size = qoi2::write_path(&path, &header, &pixels).unwrap();
    assert_eq!(size, std::fs::metadata(&path).unwrap().len() as usize);

    let (read_header, read_pixels) = qoi2::read_path(&path, None).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(read_header, header);
    assert_eq!(read_pixels, pixels);
}

#[test]
fn worst_case_size_bound_holds() {
    // Noise is as close to incompressible as this codec gets.
    for channels in [Channels::Rgb, Channels::Rgba] {
        let header = header(61, 67, channels);
        let encoded = encode_alloc(&header, &noise(&header, 3)).unwrap();
        let per_pixel = if channels.has_alpha() { 6 } else { 4 };
        assert!(encoded.len() <= 18 + header.pixel_count() as usize * per_pixel);
    }
}
