//! Structural inspection of PNG, RIFF and Ogg containers.
//!
//! Given a seekable stream positioned at the start of a container, the
//! inspectors determine its kind and how many bytes it occupies by walking
//! its framing. Payload data is skipped, never decoded.

mod error;
pub mod formats;
pub mod locate;
pub mod types;

pub use error::{FormatError, LocateError, Result};
pub use formats::{
    Inspector, OggInspector, PngInspector, RiffInspector, identify, identify_and_inspect,
    inspect_path,
};
pub use locate::{Candidate, find_archive, find_archive_in, find_path_ignore_case};
pub use types::{ContainerKind, InspectionResult, OggInfo, PngInfo, RiffInfo};
