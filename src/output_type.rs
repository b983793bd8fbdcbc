/// The supported subtitle file formats.
///
/// Each variant maps to a concrete `SegmentEncoder` implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputType {
    /// Line-oriented SubRip blocks.
    Srt,

    /// Styled Advanced SubStation Alpha script. Required for read-along highlighting.
    Ass,

    /// The segment list as a JSON array.
    Json,
}

impl OutputType {
    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputType::Srt => "srt",
            OutputType::Ass => "ass",
            OutputType::Json => "json",
        }
    }
}
