mod common;

use std::io::Cursor;

use common::png_chunk;
use framewalk::{FormatError, Inspector, PngInspector};

#[test]
fn test_inspect_png_header_valid() {
    let png = [
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x10, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x91, 0x68, 0x36, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];
    let info = PngInspector::new().inspect(&mut Cursor::new(&png)).unwrap();
    assert_eq!(info.width, 16);
    assert_eq!(info.height, 16);
    assert_eq!(info.header_crc, 0x9091_6836);
    assert!(info.header_crc_matches());
    assert_eq!(info.total_len, png.len() as u64);
}

#[test]
fn test_inspect_png_invalid_signature() {
    let not_png = [0xFF, 0xD8, 0xFF, 0xE0];
    let err = PngInspector::new()
        .inspect(&mut Cursor::new(&not_png))
        .unwrap_err();
    assert!(err.is_not_this_format());
}

fn make_valid_ihdr() -> Vec<u8> {
    let mut ihdr_payload = Vec::new();
    ihdr_payload.extend_from_slice(&100u32.to_be_bytes());
    ihdr_payload.extend_from_slice(&100u32.to_be_bytes());
    ihdr_payload.push(8);
    ihdr_payload.push(2);
    ihdr_payload.extend_from_slice(&[0, 0, 0]);
    png_chunk(b"IHDR", &ihdr_payload)
}

#[test]
fn test_inspect_png_with_idat() {
    let sig = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    let ihdr = make_valid_ihdr();
    let idat = png_chunk(b"IDAT", &[0xAA; 100]);
    let iend = png_chunk(b"IEND", &[]);

    let mut data = Vec::new();
    data.extend_from_slice(&sig);
    data.extend_from_slice(&ihdr);
    data.extend_from_slice(&idat);
    data.extend_from_slice(&iend);

    let info = PngInspector::new().inspect(&mut Cursor::new(&data)).unwrap();
    assert_eq!(info.total_len, data.len() as u64);
    assert_eq!(info.total_len, 8 + 25 + 112 + 12);
}

#[test]
fn test_inspect_png_garbage_after_idat() {
    let sig = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    let ihdr = make_valid_ihdr();
    let idat = png_chunk(b"IDAT", &[0xBB; 100]);

    let mut data = Vec::new();
    data.extend_from_slice(&sig);
    data.extend_from_slice(&ihdr);
    data.extend_from_slice(&idat);
    data.extend_from_slice(&[0xFF; 20]);

    let result = PngInspector::new().inspect(&mut Cursor::new(&data));
    assert!(matches!(result, Err(FormatError::UnexpectedStructure(_))));
}

#[test]
fn test_inspect_png_chunk_crc_ignored() {
    let sig = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    let mut idat = png_chunk(b"IDAT", &[0x11; 40]);
    let crc_start = idat.len() - 4;
    idat[crc_start..].copy_from_slice(&[0; 4]);

    let mut data = sig.to_vec();
    data.extend(make_valid_ihdr());
    data.extend(idat);
    data.extend(png_chunk(b"IEND", &[]));

    let info = PngInspector::new().inspect(&mut Cursor::new(&data)).unwrap();
    assert_eq!(info.total_len, data.len() as u64);
}
