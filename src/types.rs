use serde::Serialize;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
pub const RIFF_MAGIC: [u8; 4] = *b"RIFF";
pub const OGG_MAGIC: [u8; 4] = *b"OggS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContainerKind {
    Png,
    Riff,
    Ogg,
}

impl ContainerKind {
    pub const ALL: [ContainerKind; 3] = [Self::Png, Self::Riff, Self::Ogg];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Riff => "RIFF",
            Self::Ogg => "Ogg",
        }
    }

    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Riff => "riff",
            Self::Ogg => "ogg",
        }
    }

    /// Leading bytes every stream of this kind starts with.
    #[must_use]
    pub const fn signature(&self) -> &'static [u8] {
        match self {
            Self::Png => &PNG_SIGNATURE,
            Self::Riff => &RIFF_MAGIC,
            Self::Ogg => &OGG_MAGIC,
        }
    }
}

impl std::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Header fields of a PNG stream plus its structural length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PngInfo {
    pub total_len: u64,
    /// Length field of the IHDR chunk as stored, not checked against 13.
    pub declared_size: u32,
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub compression: u8,
    pub filter: u8,
    pub interlace: u8,
    pub header_crc: u32,
}

impl PngInfo {
    /// Recomputes the IHDR CRC from the parsed fields and compares it with the
    /// stored one. Inspection never depends on this.
    pub fn header_crc_matches(&self) -> bool {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(b"IHDR");
        hasher.update(&self.width.to_be_bytes());
        hasher.update(&self.height.to_be_bytes());
        hasher.update(&[
            self.bit_depth,
            self.color_type,
            self.compression,
            self.filter,
            self.interlace,
        ]);
        hasher.finalize() == self.header_crc
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiffInfo {
    pub total_len: u64,
    pub declared_size: u32,
    pub meta_type: String,
    pub form_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OggInfo {
    pub total_len: u64,
}

/// Outcome of a successful inspection, one variant per container kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InspectionResult {
    Png(PngInfo),
    Riff(RiffInfo),
    Ogg(OggInfo),
}

impl InspectionResult {
    #[must_use]
    pub const fn kind(&self) -> ContainerKind {
        match self {
            Self::Png(_) => ContainerKind::Png,
            Self::Riff(_) => ContainerKind::Riff,
            Self::Ogg(_) => ContainerKind::Ogg,
        }
    }

    /// Bytes from the starting position that make up the whole container.
    #[must_use]
    pub const fn total_len(&self) -> u64 {
        match self {
            Self::Png(info) => info.total_len,
            Self::Riff(info) => info.total_len,
            Self::Ogg(info) => info.total_len,
        }
    }

    /// Short label for listings. RIFF reports its meta type tag.
    pub fn what(&self) -> &str {
        match self {
            Self::Riff(info) => &info.meta_type,
            other => other.kind().name(),
        }
    }

    pub fn details(&self) -> String {
        match self {
            Self::Png(info) => format!("{}x{}", info.width, info.height),
            Self::Riff(info) => info.form_type.clone(),
            Self::Ogg(_) => String::new(),
        }
    }
}

impl From<PngInfo> for InspectionResult {
    fn from(info: PngInfo) -> Self {
        Self::Png(info)
    }
}

impl From<RiffInfo> for InspectionResult {
    fn from(info: RiffInfo) -> Self {
        Self::Riff(info)
    }
}

impl From<OggInfo> for InspectionResult {
    fn from(info: OggInfo) -> Self {
        Self::Ogg(info)
    }
}
