//! Full generation pipeline: validate, generate, transform.

use tracing::warn;

use crate::config::{GenerationConfig, Transform};
use crate::error::Result;
use crate::transform;
use crate::viz::{generate, grid_width, PixelGrid};

/// Generate the grid for `bytes` and apply the configured transform.
///
/// Every parameter, including the Hilbert level against the width the mode
/// will produce, is checked before the grid is allocated. Advisories are
/// logged, never fatal.
pub fn render(bytes: &[u8], config: &GenerationConfig) -> Result<PixelGrid> {
    config.validate()?;
    if let Transform::Hilbert { level } = config.transform {
        if level > 0 {
            transform::check_level(level, grid_width(bytes.len(), config))?;
        }
    }

    for advisory in config.advisories() {
        warn!("{advisory}");
    }

    let mut grid = generate(bytes, config)?;
    transform::apply(&mut grid, config)?;
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::error::VizError;

    #[test]
    fn test_render_applies_transform() {
        let mut config = GenerationConfig::with_mode(Mode::Grayscale);
        config.width = 2;
        config.transform = Transform::Hilbert { level: 1 };

        let grid = render(&[0, 1, 2, 3], &config).unwrap();
        let values: Vec<u8> = grid.pixels().iter().map(|p| p.r).collect();
        assert_eq!(values, vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_hilbert_checked_before_generation() {
        let mut config = GenerationConfig::with_mode(Mode::Grayscale);
        config.width = 6;
        config.transform = Transform::Hilbert { level: 2 };
        assert!(matches!(
            render(b"abcdef", &config),
            Err(VizError::HilbertWidthNotDivisible { .. })
        ));
    }

    #[test]
    fn test_dotplot_hilbert_checked_before_generation() {
        let config = GenerationConfig {
            transform: Transform::Hilbert { level: 12 },
            ..GenerationConfig::with_mode(Mode::Dotplot)
        };
        assert!(matches!(
            render(&[7u8; 3000], &config),
            Err(VizError::HilbertLevelTooLarge {
                width: 3000,
                points: 4096,
                ..
            })
        ));

        // Checked even before the dotplot size limit, which guards generation
        let config = GenerationConfig {
            max_dotplot_len: 16,
            ..config
        };
        assert!(matches!(
            render(&[7u8; 3000], &config),
            Err(VizError::HilbertLevelTooLarge { .. })
        ));
    }

    #[test]
    fn test_fixed_width_modes_use_their_own_width() {
        // Bigrams are always 256 wide, which fits level 8 exactly
        let mut config = GenerationConfig::with_mode(Mode::Bigrams);
        config.transform = Transform::Hilbert { level: 8 };
        let grid = render(b"abc", &config).unwrap();
        assert_eq!((grid.width(), grid.height()), (256, 256));

        config.transform = Transform::Hilbert { level: 9 };
        assert!(render(b"abc", &config).is_err());
    }
}
