use std::io::{Read, Seek, SeekFrom};

use tracing::{debug, trace};

use super::{Inspector, read_up_to, skip, stream_len};
use crate::error::{FormatError, Result};
use crate::types::{ContainerKind, OGG_MAGIC, OggInfo};

pub const PAGE_HEADER_LEN: usize = 27;

/// Fields of the fixed page header this inspector looks at.
#[derive(Debug, Clone, Copy)]
struct PageHeader {
    granule_position: u64,
    serial: u32,
    sequence: u32,
    segment_count: u8,
}

impl PageHeader {
    fn parse(header: &[u8; PAGE_HEADER_LEN]) -> Self {
        let mut granule = [0u8; 8];
        granule.copy_from_slice(&header[6..14]);
        Self {
            granule_position: u64::from_le_bytes(granule),
            serial: u32::from_le_bytes([header[14], header[15], header[16], header[17]]),
            sequence: u32::from_le_bytes([header[18], header[19], header[20], header[21]]),
            segment_count: header[26],
        }
    }
}

/// Walks consecutive pages of one logical Ogg stream.
///
/// The walk ends at the first page that is not an Ogg page or whose sequence
/// number does not increase. That page is left unread: the cursor is put back
/// at its first byte and the pages before it make up the result.
#[derive(Debug, Default, Clone, Copy)]
pub struct OggInspector;

impl OggInspector {
    #[inline]
    pub const fn new() -> Self {
        Self
    }
}

impl Inspector for OggInspector {
    const KIND: ContainerKind = ContainerKind::Ogg;

    type Output = OggInfo;

    fn inspect<R: Read + Seek>(&self, reader: &mut R) -> Result<OggInfo> {
        let mut total_len: u64 = 0;
        let mut pages: u64 = 0;
        // Below any u32 sequence number so the first page always passes.
        let mut last_sequence: i64 = -1;
        let mut segments = [0u8; 255];
        let end = stream_len(reader)?;

        loop {
            let offset = reader.stream_position()?;
            let mut raw = [0u8; PAGE_HEADER_LEN];
            let got = read_up_to(reader, &mut raw)?;
            let has_magic = got >= OGG_MAGIC.len() && raw[..OGG_MAGIC.len()] == OGG_MAGIC;

            if !has_magic {
                if pages == 0 {
                    return Err(FormatError::NotThisFormat {
                        expected: Self::KIND,
                    });
                }
                debug!(offset, "no further Ogg page");
                reader.seek(SeekFrom::Start(offset))?;
                break;
            }
            if got < PAGE_HEADER_LEN {
                return Err(FormatError::TruncatedStream {
                    expected: PAGE_HEADER_LEN as u64,
                    actual: got as u64,
                });
            }

            let page = PageHeader::parse(&raw);
            if i64::from(page.sequence) <= last_sequence {
                debug!(
                    offset,
                    sequence = page.sequence,
                    last_sequence,
                    "page sequence does not increase, stream ends"
                );
                reader.seek(SeekFrom::Start(offset))?;
                break;
            }
            last_sequence = i64::from(page.sequence);

            let table = &mut segments[..usize::from(page.segment_count)];
            let got = read_up_to(reader, table)?;
            if got < table.len() {
                return Err(FormatError::TruncatedStream {
                    expected: table.len() as u64,
                    actual: got as u64,
                });
            }

            let payload_len: u64 = table.iter().map(|&len| u64::from(len)).sum();
            let header_len = (PAGE_HEADER_LEN + table.len()) as u64;
            let available = end.saturating_sub(offset + header_len);
            if available < payload_len {
                return Err(FormatError::TruncatedStream {
                    expected: payload_len,
                    actual: available,
                });
            }

            let page_len = header_len + payload_len;
            total_len = total_len.checked_add(page_len).ok_or_else(|| {
                FormatError::UnexpectedStructure("Ogg length overflows u64".into())
            })?;
            pages += 1;

            trace!(
                sequence = page.sequence,
                serial = page.serial,
                granule = page.granule_position,
                payload_len,
                "ogg page"
            );

            skip(reader, payload_len)?;
        }

        debug!(pages, total_len, "ogg inspected");
        Ok(OggInfo { total_len })
    }
}
