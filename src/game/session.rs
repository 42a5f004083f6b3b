use crate::{
    game::GridGenerator,
    models::{Grid, PuzzleParams},
};

/// The puzzle currently shown to one client.
///
/// Regeneration only happens through explicit calls: [`PuzzleSession::new`]
/// when parameters are first established, [`PuzzleSession::update_params`]
/// when they change, and [`PuzzleSession::refresh`] on demand.
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    params: PuzzleParams,
    grid: Grid,
}

impl PuzzleSession {
    pub fn new(params: PuzzleParams) -> Self {
        let grid = Self::build(&params);
        Self { params, grid }
    }

    /// Store new params and regenerate if they differ from the current ones.
    /// Returns whether a new grid was generated.
    pub fn update_params(&mut self, params: PuzzleParams) -> bool {
        if params == self.params {
            return false;
        }
        self.params = params;
        self.refresh();
        true
    }

    /// Replace the grid with a fresh one for the same params
    pub fn refresh(&mut self) {
        self.grid = Self::build(&self.params);
    }

    pub fn params(&self) -> &PuzzleParams {
        &self.params
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    fn build(params: &PuzzleParams) -> Grid {
        GridGenerator::generate(params.height, params.width, &params.words)
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
    fn test_new_session_generates_grid() {
        let session = PuzzleSession::new(params(4, 6, &["CAT"]));
        assert_eq!(session.grid().len(), 4);
        assert!(session.grid().iter().all(|row| row.len() == 6));
    }

    #[test]
    fn test_unchanged_params_keep_grid() {
        let mut session = PuzzleSession::new(params(10, 10, &["CAT"]));
        let before = session.grid().clone();
        assert!(!session.update_params(params(10, 10, &["CAT"])));
        assert_eq!(session.grid(), &before);
    }

    #[test]
    fn test_changed_params_regenerate() {
        let mut session = PuzzleSession::new(params(5, 5, &["CAT"]));
        assert!(session.update_params(params(3, 8, &["DOG"])));
        assert_eq!(session.params(), &params(3, 8, &["DOG"]));
        assert_eq!(session.grid().len(), 3);
        assert!(session.grid().iter().all(|row| row.len() == 8));
    }

    #[test]
    fn test_refresh_keeps_params() {
        let mut session = PuzzleSession::new(params(6, 7, &["WORD"]));
        let mut changed = false;
        // Five identical 6x7 grids in a row would need every random cell to repeat
        for _ in 0..5 {
            let before = session.grid().clone();
            session.refresh();
            changed |= session.grid() != &before;
            assert_eq!(session.params(), &params(6, 7, &["WORD"]));
            assert_eq!(session.grid().len(), 6);
        }
        assert!(changed);
    }
}
