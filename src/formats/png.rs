use std::io::{Read, Seek};

use tracing::{debug, trace};

use super::{Inspector, read_fixed, read_magic_header, skip};
use crate::error::{FormatError, Result};
use crate::types::{ContainerKind, PNG_SIGNATURE, PngInfo};

pub const IHDR_CHUNK_TYPE: &[u8; 4] = b"IHDR";
pub const IEND_CHUNK_TYPE: &[u8; 4] = b"IEND";

/// Signature plus the IHDR record (length, type, 13 data bytes, CRC).
const HEADER_LEN: u64 = PNG_SIGNATURE.len() as u64 + 25;

/// Length, type and CRC around every chunk payload.
const CHUNK_OVERHEAD: u64 = 12;

const VALID_BIT_DEPTHS: [u8; 5] = [1, 2, 4, 8, 16];
const VALID_COLOR_TYPES: [u8; 5] = [0, 2, 3, 4, 6];

#[derive(Debug, Default, Clone, Copy)]
pub struct PngInspector;

impl PngInspector {
    #[inline]
    pub const fn new() -> Self {
        Self
    }
}

fn check_header(info: &PngInfo) -> Result<()> {
    if !VALID_BIT_DEPTHS.contains(&info.bit_depth) {
        return Err(invalid_field("bit_depth", info.bit_depth));
    }

    if !VALID_COLOR_TYPES.contains(&info.color_type) {
        return Err(invalid_field("color_type", info.color_type));
    }

    // Only rejected when both are set; a lone non-zero value passes.
    if info.compression != 0 && info.filter != 0 {
        return Err(FormatError::InvalidHeaderField {
            field: "compression/filter",
            value: format!("{}/{}", info.compression, info.filter),
        });
    }

    if info.interlace > 1 {
        return Err(invalid_field("interlace", info.interlace));
    }

    Ok(())
}

fn invalid_field(field: &'static str, value: u8) -> FormatError {
    FormatError::InvalidHeaderField {
        field,
        value: value.to_string(),
    }
}

impl Inspector for PngInspector {
    const KIND: ContainerKind = ContainerKind::Png;

    type Output = PngInfo;

    fn inspect<R: Read + Seek>(&self, reader: &mut R) -> Result<PngInfo> {
        read_magic_header::<_, 8>(reader, Self::KIND)?;

        let hdr: [u8; 25] = read_fixed(reader)?;
        if &hdr[4..8] != IHDR_CHUNK_TYPE {
            return Err(FormatError::UnexpectedStructure(format!(
                "expected IHDR chunk but got {}",
                hdr[4..8].escape_ascii()
            )));
        }

        let mut info = PngInfo {
            total_len: HEADER_LEN,
            declared_size: u32::from_be_bytes([hdr[0], hdr[1], hdr[2], hdr[3]]),
            width: u32::from_be_bytes([hdr[8], hdr[9], hdr[10], hdr[11]]),
            height: u32::from_be_bytes([hdr[12], hdr[13], hdr[14], hdr[15]]),
            bit_depth: hdr[16],
            color_type: hdr[17],
            compression: hdr[18],
            filter: hdr[19],
            interlace: hdr[20],
            header_crc: u32::from_be_bytes([hdr[21], hdr[22], hdr[23], hdr[24]]),
        };
        check_header(&info)?;

        loop {
            let preamble: [u8; 8] = read_fixed(reader)?;
            let length = u32::from_be_bytes([preamble[0], preamble[1], preamble[2], preamble[3]]);
            let chunk_type = &preamble[4..8];

            if !chunk_type.iter().all(u8::is_ascii_alphabetic) {
                return Err(FormatError::UnexpectedStructure(format!(
                    "unexpected chunk type {} at offset {}",
                    chunk_type.escape_ascii(),
                    info.total_len
                )));
            }

            let length = u64::from(length);
            info.total_len = info
                .total_len
                .checked_add(length + CHUNK_OVERHEAD)
                .ok_or_else(|| {
                    FormatError::UnexpectedStructure("PNG length overflows u64".into())
                })?;
            trace!(chunk = %chunk_type.escape_ascii(), length, "png chunk");

            // Payloads are not checked against the stream length; a chunk
            // running past the end is caught by the next preamble read.
            skip(reader, length + 4)?;

            if chunk_type == IEND_CHUNK_TYPE {
                break;
            }
        }

        debug!(
            width = info.width,
            height = info.height,
            total_len = info.total_len,
            "png inspected"
        );
        Ok(info)
    }
}
