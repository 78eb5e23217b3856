use std::io::{Read, Seek, SeekFrom};

use tracing::debug;

use super::{Inspector, read_magic_header};
use crate::error::{FormatError, Result};
use crate::types::{ContainerKind, RiffInfo};

/// Magic tag and size field sit outside the size they declare.
const PREAMBLE_LEN: u64 = 8;

/// Reads the 12-byte RIFF header. The declared size is taken as is: RIFF has
/// no independent way to cross-check it, so no chunk walk is done.
#[derive(Debug, Default, Clone, Copy)]
pub struct RiffInspector;

impl RiffInspector {
    #[inline]
    pub const fn new() -> Self {
        Self
    }
}

impl Inspector for RiffInspector {
    const KIND: ContainerKind = ContainerKind::Riff;

    type Output = RiffInfo;

    fn inspect<R: Read + Seek>(&self, reader: &mut R) -> Result<RiffInfo> {
        let start = reader.stream_position()?;
        let header: [u8; 12] = read_magic_header(reader, Self::KIND)?;
        let size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
        let form_type = &header[8..12];

        if !form_type.iter().all(u8::is_ascii_alphanumeric) {
            return Err(FormatError::InvalidHeaderField {
                field: "form_type",
                value: form_type.escape_ascii().to_string(),
            });
        }

        let total_len = u64::from(size) + PREAMBLE_LEN;
        // Sizes below 4 do not cover the form type; the cursor still follows
        // the reported length.
        let end = start.checked_add(total_len).ok_or_else(|| {
            FormatError::UnexpectedStructure("RIFF end offset overflows u64".into())
        })?;
        reader.seek(SeekFrom::Start(end))?;

        let info = RiffInfo {
            total_len,
            declared_size: size,
            meta_type: String::from_utf8_lossy(&header[..4]).into_owned(),
            form_type: String::from_utf8_lossy(form_type).into_owned(),
        };
        debug!(form_type = %info.form_type, total_len = info.total_len, "riff inspected");
        Ok(info)
    }
}
