use crate::Result;
use crate::chunker::Budget;

/// How segments are reshaped before they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Split segments whose text or duration is over budget; keep the rest as they are.
    #[default]
    Whole,

    /// One subtitle per word.
    Word,

    /// Word-accurate chunks: words are grouped under the character and duration budget.
    WordGroups,

    /// Read-along: every chunk expands into one subtitle per word with a growing highlight.
    Read,
}

/// Font and colors for styled (ASS) output.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub font: String,
    pub font_size: u32,

    /// Symbolic text color, resolved through [`crate::color`].
    pub color: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font: "Arial".to_owned(),
            font_size: 36,
            color: "white".to_owned(),
        }
    }
}

/// Options that control how a track is built.
///
/// This struct represents *library-level configuration*, not CLI flags directly. The CLI maps
/// user input into this type; every budget the engine uses comes from here.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    /// Maximum characters per output subtitle (spaces included).
    pub max_chars: usize,

    /// Maximum seconds per output subtitle (or per read-along chunk).
    pub max_duration: f64,

    pub mode: Mode,

    /// Symbolic highlight color for [`Mode::Read`].
    pub highlight_color: String,

    /// Close timing gaps between consecutive subtitles. Read mode always does.
    pub close_gaps: bool,

    pub style: Style,
}

impl Opts {
    /// Character budget used by the command-line tool.
    pub const CLI_MAX_CHARS: usize = 30;

    /// Duration budget used by the command-line tool.
    pub const CLI_MAX_DURATION: f64 = 3.0;

    /// Looser character budget historically used when calling the engine as a library.
    pub const LIBRARY_MAX_CHARS: usize = 50;

    /// Looser duration budget historically used when calling the engine as a library.
    pub const LIBRARY_MAX_DURATION: f64 = 4.0;

    /// Options with the looser library budgets.
    pub fn library() -> Self {
        Self {
            max_chars: Self::LIBRARY_MAX_CHARS,
            max_duration: Self::LIBRARY_MAX_DURATION,
            ..Self::default()
        }
    }

    /// The validated character/duration budget.
    pub fn budget(&self) -> Result<Budget> {
        Budget::new(self.max_chars, self.max_duration)
    }

    /// Reject options the engine cannot honor.
    pub fn validate(&self) -> Result<()> {
        self.budget().map(|_| ())
    }
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            max_chars: Self::CLI_MAX_CHARS,
            max_duration: Self::CLI_MAX_DURATION,
            mode: Mode::default(),
            highlight_color: "yellow".to_owned(),
            close_gaps: false,
            style: Style::default(),
        }
    }
}
