//! Generation configuration: mode selection, sizing, transforms and variants.
//!
//! A [`GenerationConfig`] is a plain value that is passed by reference into
//! every generator and transform. It can be built from defaults, from a TOML
//! file ([`ConfigFile`]) and from command-line flags, in that order of
//! precedence.

use std::fmt;
use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::{Result, VizError};

/// Default block size for entropy modes, in bytes.
pub const DEFAULT_BLOCK_SIZE: usize = 256;

/// Default output width, in pixels, before zoom.
pub const DEFAULT_OUTPUT_WIDTH: usize = 512;

/// Default zoom factor applied by exporters.
pub const DEFAULT_OUTPUT_ZOOM: u32 = 2;

/// Default maximum input length accepted by the dotplot mode.
pub const DEFAULT_MAX_DOTPLOT_LEN: usize = 4096;

// =============================================================================
// Mode
// =============================================================================

/// Available generation modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Brightness of each pixel is the byte value.
    #[default]
    Grayscale,
    /// Color of each pixel is the printability class of the byte.
    Ascii,
    /// Intensity of each pixel is the entropy of its block.
    Entropy,
    /// One row per block, line length proportional to its entropy.
    EntropyHistogram,
    /// One row per byte value, line length proportional to its frequency.
    Histogram,
    /// 256x256 matrix of adjacent byte pairs.
    Bigrams,
    /// Self-similarity matrix of every pair of positions.
    Dotplot,
}

impl Mode {
    /// Name used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Grayscale => "grayscale",
            Self::Ascii => "ascii",
            Self::Entropy => "entropy",
            Self::EntropyHistogram => "entropy-histogram",
            Self::Histogram => "histogram",
            Self::Bigrams => "bigrams",
            Self::Dotplot => "dotplot",
        }
    }

    /// Long description shown by `--list-modes`.
    pub fn description(self) -> &'static str {
        match self {
            Self::Grayscale => {
                "The brightness of each pixel represents the value of each sample (00..FF)."
            }
            Self::Ascii => {
                "The color of each pixel represents the \"printability\" of each sample. \
                 Black represents a null byte (00), white represents a set byte (FF), \
                 blue represents printable characters and red represents any other value."
            }
            Self::Entropy => {
                "The intensity of each pixel represents the entropy of its block. Useful \
                 for distinguishing compressed or encrypted chunks from plain ones."
            }
            Self::EntropyHistogram => {
                "Each row represents a block, and the width of each line represents the \
                 entropy of that block."
            }
            Self::Histogram => {
                "Each row represents a byte (00..FF), and the width of each line represents \
                 the frequency of that byte relative to the most frequent one."
            }
            Self::Bigrams => {
                "The coordinates of each point are determined by a pair of adjacent samples. \
                 Useful for identifying patterns of different file formats."
            }
            Self::Dotplot => {
                "Measure self-similarity. A point (X,Y) is set if the X-th sample matches \
                 the Y-th sample."
            }
        }
    }

    /// Get all available modes.
    pub fn all() -> &'static [Self] {
        &[
            Self::Grayscale,
            Self::Ascii,
            Self::Entropy,
            Self::EntropyHistogram,
            Self::Histogram,
            Self::Bigrams,
            Self::Dotplot,
        ]
    }

    /// Whether the mode reads `block_size`.
    pub fn uses_block_size(self) -> bool {
        matches!(self, Self::Entropy | Self::EntropyHistogram)
    }

    /// Whether the mode derives its own width instead of the configured one.
    pub fn forces_width(self) -> bool {
        matches!(self, Self::Bigrams | Self::Dotplot)
    }

    /// Whether rows of the generated grid are a linear run of the input, which
    /// is what the geometric transforms assume.
    pub fn is_linear(self) -> bool {
        matches!(self, Self::Grayscale | Self::Ascii | Self::Entropy)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Transform and rendering variants
// =============================================================================

/// Geometric re-layout applied after generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Transform {
    #[default]
    None,
    /// Group linear runs into squares of the given side. Sides below 2 are a no-op.
    Squares { side: usize },
    /// Reverse odd rows.
    Zigzag,
    /// Re-order pixels along a Hilbert curve. Level 0 is a no-op.
    Hilbert { level: u32 },
}

impl Transform {
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Squares { .. } => "squares",
            Self::Zigzag => "zigzag",
            Self::Hilbert { .. } => "hilbert",
        }
    }

    /// Whether applying this transform changes anything at all.
    pub fn is_active(self) -> bool {
        match self {
            Self::None => false,
            Self::Squares { side } => side >= 2,
            Self::Zigzag => true,
            Self::Hilbert { level } => level >= 1,
        }
    }
}

/// Color scheme for the entropy mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntropyColor {
    /// Same intensity on every channel.
    #[default]
    Grayscale,
    /// Linear blue with a cubic red component.
    Heatmap,
}

/// How rows of the entropy histogram are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileStyle {
    /// Fill the row from the left edge up to the line length.
    #[default]
    Filled,
    /// Only mark the last pixel of the line.
    Point,
}

/// Output container produced by the exporter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    #[default]
    Png,
    /// Text with 24-bit ANSI background escape sequences.
    Ascii,
}

// =============================================================================
// Generation config
// =============================================================================

/// Everything a generator or transform needs to know.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    pub mode: Mode,
    /// Output width in pixels. Ignored by modes with fixed dimensions.
    pub width: usize,
    /// Bytes per entropy block.
    pub block_size: usize,
    pub transform: Transform,
    pub entropy_color: EntropyColor,
    pub profile_style: ProfileStyle,
    /// Largest input accepted by the dotplot mode.
    pub max_dotplot_len: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            width: DEFAULT_OUTPUT_WIDTH,
            block_size: DEFAULT_BLOCK_SIZE,
            transform: Transform::default(),
            entropy_color: EntropyColor::default(),
            profile_style: ProfileStyle::default(),
            max_dotplot_len: DEFAULT_MAX_DOTPLOT_LEN,
        }
    }
}

impl GenerationConfig {
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Check the parameters the selected mode depends on.
    ///
    /// Runs before any allocation. Hilbert constraints depend on the width of
    /// the generated grid and are checked by the transform itself.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 && !self.mode.forces_width() {
            return Err(VizError::ZeroWidth);
        }
        if self.mode.uses_block_size() && self.block_size <= 1 {
            return Err(VizError::BlockSizeTooSmall {
                block_size: self.block_size,
                mode: self.mode,
            });
        }
        Ok(())
    }

    /// Non-fatal remarks about parameters that will be ignored or that are
    /// unlikely to produce a useful image.
    pub fn advisories(&self) -> Vec<Advisory> {
        let mut out = Vec::new();

        if self.mode.forces_width() && self.width != DEFAULT_OUTPUT_WIDTH {
            out.push(Advisory::WidthIgnored {
                mode: self.mode,
                width: self.width,
            });
        }
        if !self.mode.uses_block_size() && self.block_size != DEFAULT_BLOCK_SIZE {
            out.push(Advisory::BlockSizeIgnored {
                mode: self.mode,
                block_size: self.block_size,
            });
        }
        if self.transform.is_active()
            && self.transform != Transform::Zigzag
            && !self.mode.is_linear()
        {
            out.push(Advisory::TransformNotRecommended {
                mode: self.mode,
                transform: self.transform.name(),
            });
        }

        out
    }
}

/// A parameter combination that is allowed but probably not intended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advisory {
    WidthIgnored { mode: Mode, width: usize },
    BlockSizeIgnored { mode: Mode, block_size: usize },
    TransformNotRecommended { mode: Mode, transform: &'static str },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WidthIgnored { mode, width } => write!(
                f,
                "The output width ({width}) will be overwritten by the current mode ({mode})"
            ),
            Self::BlockSizeIgnored { mode, block_size } => write!(
                f,
                "The current mode ({mode}) is not affected by the block size ({block_size})"
            ),
            Self::TransformNotRecommended { mode, transform } => write!(
                f,
                "The \"{transform}\" transformation is not recommended for the current mode ({mode})"
            ),
        }
    }
}

// =============================================================================
// Config file
// =============================================================================

/// Optional settings read from a TOML file. Every key is optional; missing
/// keys keep their defaults and command-line flags override present ones.
///
/// ```toml
/// mode = "entropy"
/// width = 256
/// block-size = 128
/// transform-hilbert = 3
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    pub mode: Option<Mode>,
    pub width: Option<usize>,
    pub block_size: Option<usize>,
    pub zoom: Option<u32>,
    pub output_format: Option<ExportFormat>,
    pub entropy_color: Option<EntropyColor>,
    pub profile_style: Option<ProfileStyle>,
    pub max_dotplot_len: Option<usize>,
    pub transform_squares: Option<usize>,
    #[serde(default)]
    pub transform_zigzag: bool,
    pub transform_hilbert: Option<u32>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| VizError::file(path, e))?;
        let parsed: Self = toml::from_str(&text).map_err(|e| VizError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let transforms = usize::from(parsed.transform_squares.is_some())
            + usize::from(parsed.transform_zigzag)
            + usize::from(parsed.transform_hilbert.is_some());
        if transforms > 1 {
            return Err(VizError::Config {
                path: path.to_path_buf(),
                message: "at most one transform may be selected".to_string(),
            });
        }
        if parsed.zoom == Some(0) {
            return Err(VizError::Config {
                path: path.to_path_buf(),
                message: "zoom must be greater than zero".to_string(),
            });
        }

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(parsed)
    }

    /// The transform selected by this file, if any.
    pub fn transform(&self) -> Option<Transform> {
        if let Some(side) = self.transform_squares {
            Some(Transform::Squares { side })
        } else if self.transform_zigzag {
            Some(Transform::Zigzag)
        } else {
            self.transform_hilbert.map(|level| Transform::Hilbert { level })
        }
    }

    /// Overwrite the fields of `config` that this file sets.
    pub fn apply_to(&self, config: &mut GenerationConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if let Some(transform) = self.transform() {
            config.transform = transform;
        }
        if let Some(color) = self.entropy_color {
            config.entropy_color = color;
        }
        if let Some(style) = self.profile_style {
            config.profile_style = style;
        }
        if let Some(limit) = self.max_dotplot_len {
            config.max_dotplot_len = limit;
        }
    }
}
