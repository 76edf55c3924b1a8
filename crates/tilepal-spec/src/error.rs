//! Error types for palette generation inputs.

use thiserror::Error;

/// Stable error codes for palette input failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Selected asset is not an image
    InvalidInputType,
    /// E002: Sprite count is not a multiple of the animation count
    InvalidSpriteCount,
    /// E003: Computed row width is non-positive
    DegenerateChunkWidth,
    /// E004: Stride routes a sprite past the last tile
    StrideOverflow,
    /// E005: Configuration value out of range
    InvalidConfig,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInputType => "E001",
            ErrorCode::InvalidSpriteCount => "E002",
            ErrorCode::DegenerateChunkWidth => "E003",
            ErrorCode::StrideOverflow => "E004",
            ErrorCode::InvalidConfig => "E005",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation failures on user-supplied sheets and parameters.
///
/// Every variant is a precondition violation. Generation stops on the first
/// one and no assets are created for the offending input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// The selected asset is not an image.
    #[error("'{0}' is not an image; select a PNG sprite sheet")]
    InvalidInputType(String),

    /// Sprite count is zero or not a multiple of the animation count.
    #[error("sprite count {sprites} must be a non-zero multiple of the animation count {animation_count}")]
    InvalidSpriteCount {
        sprites: usize,
        animation_count: usize,
    },

    /// Sheet is too narrow to hold a single row of tiles.
    #[error(
        "sheet width {sheet_width}px holds no tile columns ({animation_count} frames x {cell_size}px per tile)"
    )]
    DegenerateChunkWidth {
        sheet_width: u32,
        animation_count: usize,
        cell_size: u32,
    },

    /// A sprite was routed to a tile index that does not exist.
    #[error(
        "stride {stride} routes sprite {sprite} to tile {tile}, but only {total_tiles} tiles exist"
    )]
    StrideOverflow {
        stride: usize,
        sprite: usize,
        tile: usize,
        total_tiles: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl PaletteError {
    /// Returns the stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PaletteError::InvalidInputType(_) => ErrorCode::InvalidInputType,
            PaletteError::InvalidSpriteCount { .. } => ErrorCode::InvalidSpriteCount,
            PaletteError::DegenerateChunkWidth { .. } => ErrorCode::DegenerateChunkWidth,
            PaletteError::StrideOverflow { .. } => ErrorCode::StrideOverflow,
            PaletteError::InvalidConfig(_) => ErrorCode::InvalidConfig,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ErrorCode::InvalidInputType.code(), "E001");
        assert_eq!(ErrorCode::InvalidSpriteCount.code(), "E002");
        assert_eq!(ErrorCode::DegenerateChunkWidth.code(), "E003");
        assert_eq!(ErrorCode::StrideOverflow.code(), "E004");
        assert_eq!(ErrorCode::InvalidConfig.code(), "E005");
    }

    #[test]
    fn test_sprite_count_message() {
        let err = PaletteError::InvalidSpriteCount {
            sprites: 8,
            animation_count: 3,
        };
        assert_eq!(err.code(), ErrorCode::InvalidSpriteCount);
        assert!(err.to_string().contains("sprite count 8"));
        assert!(err.to_string().contains("animation count 3"));
    }
}
