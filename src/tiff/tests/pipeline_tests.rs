//! Tests for the tile pipeline: predictor, compression, clipping and
//! sub-rectangle decoding

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use std::io::Cursor;

use super::test_utils::{build_cog, deflate, lzw, packbits, tiles8, GeoSpec, LevelSpec};
use crate::extractor::Region;
use crate::io::source::ByteSource;
use crate::raster::{ColorKind, GrayImage};
use crate::tiff::constants::compression;
use crate::tiff::errors::CogError;
use crate::tiff::reader::{
    decode, decode_config, decode_config_level, decode_level, decode_level_region, CogDecoder,
};

fn identity_4x4() -> Vec<u8> {
    (0u8..16).collect()
}

/// 8-bit pixels where pixel (x, y) of a `width`-wide image is x + width*y
fn gradient(width: u32, height: u32) -> Vec<u8> {
    (0..width * height).map(|i| i as u8).collect()
}

fn expect_u8(image: GrayImage) -> crate::raster::GrayBuffer<u8> {
    match image {
        GrayImage::U8(buf) => buf,
        other => panic!("expected GrayU8, got {:?}", other.kind()),
    }
}

#[test]
fn predictor_reverses_differenced_rows() {
    // Pre-differenced rows of the 4x4 identity image
    let differenced = vec![0u8, 1, 1, 1, 4, 1, 1, 1, 8, 1, 1, 1, 12, 1, 1, 1];
    let mut level = LevelSpec::gray8(4, 4, 4, 4, vec![differenced]);
    level.predictor = 2;
    let file = build_cog::<LittleEndian>(&[level], &GeoSpec::default());

    let buf = expect_u8(decode(Cursor::new(file)).unwrap());
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(buf.get(x, y), (4 * y + x) as u8);
        }
    }
}

#[test]
fn predictor_matches_unpredicted_rendition() {
    let pixels = gradient(8, 8);
    let plain = LevelSpec::gray8(8, 8, 4, 4, tiles8(&pixels, 8, 8, 4, 4));

    let mut differenced_tiles = tiles8(&pixels, 8, 8, 4, 4);
    for tile in &mut differenced_tiles {
        for row in tile.chunks_exact_mut(4) {
            for i in (1..row.len()).rev() {
                row[i] = row[i].wrapping_sub(row[i - 1]);
            }
        }
    }
    let mut predicted = LevelSpec::gray8(8, 8, 4, 4, differenced_tiles);
    predicted.predictor = 2;

    let plain_file = build_cog::<LittleEndian>(&[plain], &GeoSpec::default());
    let predicted_file = build_cog::<LittleEndian>(&[predicted], &GeoSpec::default());

    assert_eq!(
        decode(Cursor::new(plain_file)).unwrap(),
        decode(Cursor::new(predicted_file)).unwrap()
    );
}

#[test]
fn predictor_reverses_sixteen_bit_rows_in_file_byte_order() {
    // Row of u16 samples 256, 257, 258, 259 stored as differences
    let expected: Vec<u16> = vec![256, 257, 258, 259];
    let mut payload = Vec::new();
    payload.write_u16::<BigEndian>(256).unwrap();
    for _ in 0..3 {
        payload.write_u16::<BigEndian>(1).unwrap();
    }

    let mut level = LevelSpec::gray16(4, 1, 4, 1, vec![payload]);
    level.predictor = 2;
    let file = build_cog::<BigEndian>(&[level], &GeoSpec::default());

    match decode(Cursor::new(file)).unwrap() {
        GrayImage::U16(buf) => {
            for x in 0..4 {
                assert_eq!(buf.get(x, 0), expected[x as usize]);
            }
        }
        other => panic!("expected GrayU16, got {:?}", other.kind()),
    }
}

#[test]
fn two_tile_image_decodes_across_the_seam() {
    // 6x4 image split into two 4x4 tiles; pixel (x, y) = x + 6*y
    let pixels: Vec<u8> = (0..24).collect();
    let level = LevelSpec::gray8(6, 4, 4, 4, tiles8(&pixels, 6, 4, 4, 4));
    let file = build_cog::<LittleEndian>(&[level], &GeoSpec::default());

    // A rect spanning both tiles, clipped at the right edge
    let buf = expect_u8(
        decode_level_region(Cursor::new(file.clone()), 0, Region::new(2, 0, 6, 4)).unwrap(),
    );
    assert_eq!(buf.width(), 4);
    assert_eq!(buf.height(), 4);
    for y in 0..4u32 {
        for x in 0..4u32 {
            assert_eq!(buf.get(x, y), ((x + 2) + 6 * y) as u8);
        }
    }

    // A rect covered by the first tile alone
    let buf =
        expect_u8(decode_level_region(Cursor::new(file), 0, Region::new(0, 0, 4, 4)).unwrap());
    for y in 0..4u32 {
        for x in 0..4u32 {
            assert_eq!(buf.get(x, y), (x + 6 * y) as u8);
        }
    }
}

#[test]
fn sub_image_equals_crop_of_full_decode() {
    let pixels = gradient(8, 8);
    let level = LevelSpec::gray8(8, 8, 3, 3, tiles8(&pixels, 8, 8, 3, 3));
    let file = build_cog::<LittleEndian>(&[level], &GeoSpec::default());

    let full = decode(Cursor::new(file.clone())).unwrap();
    for rect in [
        Region::new(0, 0, 8, 8),
        Region::new(1, 1, 5, 6),
        Region::new(3, 4, 5, 4),
        Region::new(2, 0, 6, 4),
        Region::new(7, 7, 1, 1),
    ] {
        let sub = decode_level_region(Cursor::new(file.clone()), 0, rect).unwrap();
        assert_eq!(
            sub,
            full.crop(rect.x, rect.y, rect.width, rect.height),
            "rect {:?}",
            rect
        );
    }
}

#[test]
fn clipping_against_the_image_edge() {
    // Requested rect reaches past the image; result is the intersection
    let pixels = gradient(6, 4);
    let level = LevelSpec::gray8(6, 4, 4, 4, tiles8(&pixels, 6, 4, 4, 4));
    let file = build_cog::<LittleEndian>(&[level], &GeoSpec::default());

    let buf = expect_u8(
        decode_level_region(Cursor::new(file), 0, Region::new(4, 2, 10, 10)).unwrap(),
    );
    assert_eq!((buf.width(), buf.height()), (2, 2));
    assert_eq!(buf.get(0, 0), (4 + 6 * 2) as u8);
}

#[test]
fn rect_outside_the_image_is_rejected() {
    let level = LevelSpec::gray8(4, 4, 4, 4, vec![identity_4x4()]);
    let file = build_cog::<LittleEndian>(&[level], &GeoSpec::default());

    let err =
        decode_level_region(Cursor::new(file), 0, Region::new(10, 10, 2, 2)).unwrap_err();
    match err {
        CogError::Format(msg) => assert!(msg.contains("intersect"), "message: {}", msg),
        other => panic!("expected Format, got {}", other),
    }
}

#[test]
fn all_compressions_agree_with_uncompressed() {
    let pixels = gradient(8, 8);
    let raw_tiles = tiles8(&pixels, 8, 8, 4, 4);

    let reference_file = build_cog::<LittleEndian>(
        &[LevelSpec::gray8(8, 8, 4, 4, raw_tiles.clone())],
        &GeoSpec::default(),
    );
    let reference = decode(Cursor::new(reference_file)).unwrap();

    let codecs: [(u16, fn(&[u8]) -> Vec<u8>); 3] = [
        (compression::ADOBE_DEFLATE, |d| deflate(d)),
        (compression::LZW, |d| lzw(d)),
        (compression::PACKBITS, |d| packbits(d)),
    ];
    for (code, encode) in codecs {
        let tiles: Vec<Vec<u8>> = raw_tiles.iter().map(|t| encode(t)).collect();
        let mut level = LevelSpec::gray8(8, 8, 4, 4, tiles);
        level.compression = code;
        let file = build_cog::<LittleEndian>(&[level], &GeoSpec::default());

        assert_eq!(
            decode(Cursor::new(file)).unwrap(),
            reference,
            "compression {}",
            code
        );
    }
}

#[test]
fn unknown_compression_is_unsupported() {
    let mut level = LevelSpec::gray8(4, 4, 4, 4, vec![identity_4x4()]);
    level.compression = 34887; // LERC
    let file = build_cog::<LittleEndian>(&[level], &GeoSpec::default());

    let err = decode(Cursor::new(file)).unwrap_err();
    match err {
        CogError::Unsupported(msg) => assert!(msg.contains("34887"), "message: {}", msg),
        other => panic!("expected Unsupported, got {}", other),
    }
}

#[test]
fn big_endian_file_decodes_like_its_little_endian_twin() {
    let pixels: Vec<u16> = (0..64).map(|i| (i * 521) as u16).collect();
    let le_tiles = vec![
        super::test_utils::tile16::<LittleEndian>(&pixels, 8, 8, 8, 8, 0, 0),
    ];
    let be_tiles = vec![
        super::test_utils::tile16::<BigEndian>(&pixels, 8, 8, 8, 8, 0, 0),
    ];

    let geo = GeoSpec {
        key_directory: vec![1, 1, 0, 2, 1024, 0, 1, 1, 3072, 0, 1, 3857],
        ..GeoSpec::default()
    };

    let le_file = build_cog::<LittleEndian>(&[LevelSpec::gray16(8, 8, 8, 8, le_tiles)], &geo);
    let be_file = build_cog::<BigEndian>(&[LevelSpec::gray16(8, 8, 8, 8, be_tiles)], &geo);

    let le = CogDecoder::new(ByteSource::Buffered(le_file)).unwrap();
    let be = CogDecoder::new(ByteSource::Buffered(be_file)).unwrap();
    assert_eq!(le.geo_code().projected_cs, be.geo_code().projected_cs);

    let mut le = le;
    let mut be = be;
    assert_eq!(le.decode().unwrap(), be.decode().unwrap());
}

#[test]
fn only_intersecting_tiles_are_fetched() {
    // The second tile's payload is not a valid zlib stream, so any decode
    // that touches it fails. A rect inside the first tile must succeed.
    let pixels = gradient(6, 4);
    let tile0 = deflate(&super::test_utils::tile8(&pixels, 6, 4, 4, 4, 0, 0));
    let garbage = vec![0xFF, 0xEE, 0xDD];

    let mut level = LevelSpec::gray8(6, 4, 4, 4, vec![tile0, garbage]);
    level.compression = compression::ADOBE_DEFLATE;
    let file = build_cog::<LittleEndian>(&[level], &GeoSpec::default());

    let buf = expect_u8(
        decode_level_region(Cursor::new(file.clone()), 0, Region::new(0, 0, 4, 4)).unwrap(),
    );
    assert_eq!(buf.get(3, 3), (3 + 6 * 3) as u8);

    assert!(decode(Cursor::new(file)).is_err());
}

#[test]
fn signed_samples_decode_into_signed_buffers() {
    let mut level = LevelSpec::gray8(2, 2, 2, 2, vec![vec![0x00, 0xFF, 0x80, 0x7F]]);
    level.sample_format = 2;
    let file = build_cog::<LittleEndian>(&[level], &GeoSpec::default());

    match decode(Cursor::new(file)).unwrap() {
        GrayImage::S8(buf) => {
            assert_eq!(buf.get(0, 0), 0);
            assert_eq!(buf.get(1, 0), -1);
            assert_eq!(buf.get(0, 1), -128);
            assert_eq!(buf.get(1, 1), 127);
        }
        other => panic!("expected GrayS8, got {:?}", other.kind()),
    }
}

#[test]
fn signed_sixteen_bit_samples_honour_file_byte_order() {
    let mut payload = Vec::new();
    for v in [-1i16, -32768, 32767, 0] {
        payload.write_i16::<BigEndian>(v).unwrap();
    }
    let mut level = LevelSpec::gray16(2, 2, 2, 2, vec![payload]);
    level.sample_format = 2;
    let file = build_cog::<BigEndian>(&[level], &GeoSpec::default());

    match decode(Cursor::new(file)).unwrap() {
        GrayImage::S16(buf) => {
            assert_eq!(buf.get(0, 0), -1);
            assert_eq!(buf.get(1, 0), -32768);
            assert_eq!(buf.get(0, 1), 32767);
            assert_eq!(buf.get(1, 1), 0);
        }
        other => panic!("expected GrayS16, got {:?}", other.kind()),
    }
}

#[test]
fn truncated_tile_payload_raises_missing_pixel_data() {
    let level = LevelSpec::gray8(4, 4, 4, 4, vec![vec![0u8; 7]]);
    let file = build_cog::<LittleEndian>(&[level], &GeoSpec::default());

    let err = decode(Cursor::new(file)).unwrap_err();
    match err {
        CogError::Format(msg) => assert!(msg.contains("pixel data"), "message: {}", msg),
        other => panic!("expected Format, got {}", other),
    }
}

#[test]
fn config_reports_color_model_without_decoding() {
    let full = LevelSpec::gray8(8, 8, 4, 4, tiles8(&gradient(8, 8), 8, 8, 4, 4));
    let mut overview = LevelSpec::gray16(4, 4, 4, 4, vec![vec![0u8; 32]]);
    overview.sample_format = 2;
    let file = build_cog::<LittleEndian>(&[full, overview], &GeoSpec::default());

    let config = decode_config(Cursor::new(file.clone())).unwrap();
    assert_eq!(config.color, ColorKind::GrayU8);
    assert_eq!((config.width, config.height), (8, 8));

    let config = decode_config_level(Cursor::new(file), 1).unwrap();
    assert_eq!(config.color, ColorKind::GrayS16);
    assert_eq!((config.width, config.height), (4, 4));
}

#[test]
fn decodes_an_overview_level() {
    let full = LevelSpec::gray8(8, 8, 4, 4, tiles8(&gradient(8, 8), 8, 8, 4, 4));
    let overview = LevelSpec::gray8(4, 4, 4, 4, vec![identity_4x4()]);
    let file = build_cog::<LittleEndian>(&[full, overview], &GeoSpec::default());

    let buf = expect_u8(decode_level(Cursor::new(file), 1).unwrap());
    assert_eq!((buf.width(), buf.height()), (4, 4));
    assert_eq!(buf.get(2, 1), 6);
}
