use rand::Rng;

use crate::{
    models::{Direction, Grid, Placement},
    utils::letters::{normalize_word, random_letter},
};

/// Random placements tried per word before it is dropped
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Result of the bounded placement loop for one word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed(Placement),
    Skipped,
}

/// A generated puzzle along with where each word ended up
#[derive(Debug, Clone)]
pub struct WordSearch {
    pub grid: Grid,
    /// Successful placements, in input order
    pub placed: Vec<Placement>,
    /// Uppercased words that ran out of attempts
    pub skipped: Vec<String>,
}

/// Grid under construction. `None` is the empty marker.
#[derive(Debug, Clone)]
struct LetterBuffer {
    height: usize,
    width: usize,
    cells: Vec<Vec<Option<char>>>,
}

impl LetterBuffer {
    fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![vec![None; width]; height],
        }
    }

    /// Check that `word` fits inside the grid from `(x, y)` and only crosses
    /// empty cells or cells already holding the same letter
    fn can_place_word(&self, word: &[char], x: usize, y: usize, direction: Direction) -> bool {
        let len = word.len();
        let (dx, dy) = direction.step();

        if dx == 1 && x + len > self.width {
            return false;
        }
        if dy == 1 && y + len > self.height {
            return false;
        }

        word.iter().enumerate().all(|(i, &letter)| {
            let (cx, cy) = direction.offset(x, y, i);
            match self.cells.get(cy).and_then(|row| row.get(cx)) {
                Some(None) => true,
                Some(Some(existing)) => *existing == letter,
                None => false,
            }
        })
    }

    /// Write `word` without re-checking; callers run `can_place_word` first
    fn place_word(&mut self, word: &[char], x: usize, y: usize, direction: Direction) {
        for (i, &letter) in word.iter().enumerate() {
            let (cx, cy) = direction.offset(x, y, i);
            self.cells[cy][cx] = Some(letter);
        }
    }

    fn try_place_word<R: Rng + ?Sized>(&mut self, word: &[char], rng: &mut R) -> PlacementOutcome {
        if self.height == 0 || self.width == 0 {
            return PlacementOutcome::Skipped;
        }

        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
            let x = rng.random_range(0..self.width);
            let y = rng.random_range(0..self.height);

            if self.can_place_word(word, x, y, direction) {
                self.place_word(word, x, y, direction);
                return PlacementOutcome::Placed(Placement {
                    word: word.iter().collect(),
                    x,
                    y,
                    direction,
                });
            }
        }

        PlacementOutcome::Skipped
    }

    /// Replace every empty cell with a random letter
    fn fill<R: Rng + ?Sized>(self, rng: &mut R) -> Grid {
        let mut grid = Vec::with_capacity(self.height);

        for row in self.cells {
            let mut filled = Vec::with_capacity(self.width);
            for cell in row {
                filled.push(match cell {
                    Some(letter) => letter,
                    None => random_letter(rng),
                });
            }
            grid.push(filled);
        }

        grid
    }
}

pub struct GridGenerator;

impl GridGenerator {
    /// Generate a `height` x `width` word search hiding `words`.
    ///
    /// Words that cannot be placed within [`MAX_PLACEMENT_ATTEMPTS`] tries are
    /// left out without any signal to the caller.
    pub fn generate<S: AsRef<str>>(height: usize, width: usize, words: &[S]) -> Grid {
        Self::generate_with_rng(height, width, words, &mut rand::rng()).grid
    }

    /// Generate a word search using `rng`, reporting placed and skipped words
    pub fn generate_with_rng<S, R>(
        height: usize,
        width: usize,
        words: &[S],
        rng: &mut R,
    ) -> WordSearch
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let mut buffer = LetterBuffer::new(height, width);
        let mut placed = Vec::with_capacity(words.len());
        let mut skipped = Vec::new();

        for word in words {
            let letters = normalize_word(word.as_ref());
            match buffer.try_place_word(&letters, rng) {
                PlacementOutcome::Placed(placement) => {
                    tracing::trace!(
                        "Placed {} at ({}, {}) going {:?}",
                        placement.word,
                        placement.x,
                        placement.y,
                        placement.direction
                    );
                    placed.push(placement);
                }
                PlacementOutcome::Skipped => {
                    let word: String = letters.into_iter().collect();
                    tracing::debug!(
                        "Skipped word {} after {} attempts on {}x{} grid",
                        word,
                        MAX_PLACEMENT_ATTEMPTS,
                        height,
                        width
                    );
                    skipped.push(word);
                }
            }
        }

        WordSearch {
            grid: buffer.fill(rng),
            placed,
            skipped,
        }
    }
}
