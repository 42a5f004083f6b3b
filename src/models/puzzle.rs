use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Finished puzzle grid, indexed `grid[row][col]`
pub type Grid = Vec<Vec<char>>;

/// Direction a word extends from its first letter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right along a row
    Horizontal,
    /// Top to bottom along a column
    Vertical,
    /// Top-left to bottom-right
    Diagonal,
}

impl Direction {
    pub const ALL: [Direction; 3] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
    ];

    /// Column and row step per letter
    pub fn step(self) -> (usize, usize) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
            Direction::Diagonal => (1, 1),
        }
    }

    /// Cell holding letter `i` of a word that starts at `(x, y)`
    pub fn offset(self, x: usize, y: usize, i: usize) -> (usize, usize) {
        let (dx, dy) = self.step();
        (x + dx * i, y + dy * i)
    }
}

/// Where a word's first letter sits and how it extends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub word: String,
    pub x: usize,
    pub y: usize,
    pub direction: Direction,
}

/// Parameters a presentation session regenerates from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PuzzleParams {
    pub height: usize,
    pub width: usize,
    #[serde(default)]
    pub words: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("height and width must be at least 1")]
    ZeroDimension,
    #[error("height and width must be at most {max}")]
    DimensionTooLarge { max: usize },
    #[error("at most {max} words are allowed")]
    TooManyWords { max: usize },
}

impl PuzzleParams {
    /// Check the params against the service limits.
    ///
    /// The generator itself accepts anything; this only guards the public API.
    pub fn validate(&self, max_dimension: usize, max_words: usize) -> Result<(), ParamsError> {
        if self.height == 0 || self.width == 0 {
            return Err(ParamsError::ZeroDimension);
        }
        if self.height > max_dimension || self.width > max_dimension {
            return Err(ParamsError::DimensionTooLarge { max: max_dimension });
        }
        if self.words.len() > max_words {
            return Err(ParamsError::TooManyWords { max: max_words });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(height: usize, width: usize, words: &[&str]) -> PuzzleParams {
        PuzzleParams {
            height,
            width,
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::Horizontal.offset(2, 3, 2), (4, 3));
        assert_eq!(Direction::Vertical.offset(2, 3, 2), (2, 5));
        assert_eq!(Direction::Diagonal.offset(2, 3, 2), (4, 5));
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        let json = serde_json::to_string(&Direction::Diagonal).unwrap();
        assert_eq!(json, "\"diagonal\"");
    }

    #[test]
    fn test_validate_accepts_limits() {
        assert_eq!(params(1, 1, &[]).validate(50, 2), Ok(()));
        assert_eq!(params(50, 50, &["A", "B"]).validate(50, 2), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_params() {
        assert_eq!(
            params(0, 5, &[]).validate(50, 10),
            Err(ParamsError::ZeroDimension)
        );
        assert_eq!(
            params(5, 51, &[]).validate(50, 10),
            Err(ParamsError::DimensionTooLarge { max: 50 })
        );
        assert_eq!(
            params(5, 5, &["A", "B", "C"]).validate(50, 2),
            Err(ParamsError::TooManyWords { max: 2 })
        );
    }

    #[test]
    fn test_params_words_default_to_empty() {
        let parsed: PuzzleParams = serde_json::from_str(r#"{"height":4,"width":6}"#).unwrap();
        assert_eq!(parsed, params(4, 6, &[]));
    }
}
