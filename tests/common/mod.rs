#![allow(dead_code)]

use framewalk::types::PNG_SIGNATURE;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

pub fn png_chunk(chunk_type: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 12);
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(chunk_type);
    out.extend_from_slice(data);
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    out.extend_from_slice(&hasher.finalize().to_be_bytes());
    out
}

pub fn ihdr(width: u32, height: u32, bit_depth: u8, color_type: u8) -> [u8; 13] {
    let mut data = [0u8; 13];
    data[..4].copy_from_slice(&width.to_be_bytes());
    data[4..8].copy_from_slice(&height.to_be_bytes());
    data[8] = bit_depth;
    data[9] = color_type;
    data
}

/// Signature, IHDR, the given chunks and a closing IEND.
pub fn build_png(ihdr: [u8; 13], chunks: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let mut data = PNG_SIGNATURE.to_vec();
    data.extend(png_chunk(b"IHDR", &ihdr));
    for (chunk_type, payload) in chunks {
        data.extend(png_chunk(chunk_type, payload));
    }
    data.extend(png_chunk(b"IEND", &[]));
    data
}

pub fn build_riff(form_type: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut data = b"RIFF".to_vec();
    data.extend_from_slice(&(body.len() as u32 + 4).to_le_bytes());
    data.extend_from_slice(form_type);
    data.extend_from_slice(body);
    data
}

pub fn ogg_page(sequence: u32, segment_lens: &[u8]) -> Vec<u8> {
    let mut out = b"OggS".to_vec();
    out.push(0);
    out.push(0);
    out.extend_from_slice(&0u64.to_le_bytes());
    out.extend_from_slice(&0xC0FF_EE00u32.to_le_bytes());
    out.extend_from_slice(&sequence.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.push(segment_lens.len() as u8);
    out.extend_from_slice(segment_lens);
    for &len in segment_lens {
        out.extend(std::iter::repeat_n(0x3C, usize::from(len)));
    }
    out
}

pub fn build_ogg(pages: &[&[u8]]) -> Vec<u8> {
    pages
        .iter()
        .enumerate()
        .flat_map(|(sequence, segments)| ogg_page(sequence as u32, segments))
        .collect()
}
