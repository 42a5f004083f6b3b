pub mod puzzle;

pub use puzzle::{Direction, Grid, ParamsError, Placement, PuzzleParams};
