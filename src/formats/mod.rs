//! Container inspectors and the dispatcher that picks between them.
//!
//! Every inspector consumes a `Read + Seek` cursor positioned at the start of
//! a container and walks its framing to work out how many bytes belong to it.
//! Payload bytes are skipped with relative seeks and never read.

pub mod ogg;
pub mod png;
pub mod riff;

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{FormatError, Result};
use crate::types::{ContainerKind, InspectionResult};

pub use ogg::OggInspector;
pub use png::PngInspector;
pub use riff::RiffInspector;

/// A structural inspector for one container kind.
pub trait Inspector {
    /// The kind whose signature this inspector accepts.
    const KIND: ContainerKind;

    type Output: Into<InspectionResult>;

    /// Walks the container starting at the current position of `reader`.
    ///
    /// Fails with [`FormatError::NotThisFormat`] when the signature does not
    /// match; any other failure means the signature matched but the body is
    /// malformed.
    fn inspect<R: Read + Seek>(&self, reader: &mut R) -> Result<Self::Output>;
}

/// Fills `buf` as far as the stream allows and returns the byte count read.
pub(crate) fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

pub(crate) fn read_fixed<R: Read, const N: usize>(reader: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    let got = read_up_to(reader, &mut buf)?;
    if got < N {
        return Err(FormatError::TruncatedStream {
            expected: N as u64,
            actual: got as u64,
        });
    }
    Ok(buf)
}

/// Reads an `N`-byte header whose leading bytes must equal the signature of
/// `kind`. Too few bytes to hold the signature counts as a mismatch.
pub(crate) fn read_magic_header<R: Read, const N: usize>(
    reader: &mut R,
    kind: ContainerKind,
) -> Result<[u8; N]> {
    let signature = kind.signature();
    let mut buf = [0u8; N];
    let got = read_up_to(reader, &mut buf)?;

    if got < signature.len() || &buf[..signature.len()] != signature {
        return Err(FormatError::NotThisFormat { expected: kind });
    }
    if got < N {
        return Err(FormatError::TruncatedStream {
            expected: N as u64,
            actual: got as u64,
        });
    }
    Ok(buf)
}

/// Length of the whole stream. The cursor is left where it was.
pub(crate) fn stream_len<R: Seek>(reader: &mut R) -> Result<u64> {
    let pos = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    if pos != end {
        reader.seek(SeekFrom::Start(pos))?;
    }
    Ok(end)
}

/// Moves the cursor forward by `len` bytes without reading them.
pub(crate) fn skip<R: Seek>(reader: &mut R, len: u64) -> Result<()> {
    let delta = i64::try_from(len).map_err(|_| {
        FormatError::UnexpectedStructure(format!("skip of {len} bytes exceeds seek range"))
    })?;
    reader.seek(SeekFrom::Current(delta))?;
    Ok(())
}

fn attempt<I, R>(inspector: &I, reader: &mut R, start: u64) -> Result<Option<InspectionResult>>
where
    I: Inspector,
    R: Read + Seek,
{
    match inspector.inspect(reader) {
        Ok(output) => Ok(Some(output.into())),
        Err(e) if e.is_not_this_format() => {
            trace!(kind = %I::KIND, "signature mismatch");
            reader.seek(SeekFrom::Start(start))?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Determines the container kind and inspects it.
///
/// Inspectors are tried in the order PNG, RIFF, Ogg, rewinding to the
/// starting position between attempts. Only signature mismatches fall through
/// to the next format; every other failure is returned as is.
pub fn identify_and_inspect<R: Read + Seek>(reader: &mut R) -> Result<InspectionResult> {
    let start = reader.stream_position()?;

    let found = match attempt(&PngInspector, reader, start)? {
        Some(result) => Some(result),
        None => match attempt(&RiffInspector, reader, start)? {
            Some(result) => Some(result),
            None => attempt(&OggInspector, reader, start)?,
        },
    };

    match found {
        Some(result) => {
            debug!(
                kind = %result.kind(),
                total_len = result.total_len(),
                start,
                "container inspected"
            );
            Ok(result)
        }
        None => Err(FormatError::UnrecognizedFormat),
    }
}

/// Peeks the leading bytes and reports which container kind they announce.
/// The cursor is left where it started.
pub fn identify<R: Read + Seek>(reader: &mut R) -> Result<ContainerKind> {
    let start = reader.stream_position()?;
    let mut head = [0u8; 8];
    let got = read_up_to(reader, &mut head)?;
    reader.seek(SeekFrom::Start(start))?;

    ContainerKind::ALL
        .into_iter()
        .find(|kind| head[..got].starts_with(kind.signature()))
        .ok_or(FormatError::UnrecognizedFormat)
}

/// Opens `path` and inspects the container at its start.
pub fn inspect_path(path: impl AsRef<Path>) -> Result<InspectionResult> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    debug!(path = %path.display(), "inspecting file");
    identify_and_inspect(&mut reader)
}
