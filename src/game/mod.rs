pub mod grid;
pub mod render;
pub mod session;

pub use grid::GridGenerator;
pub use render::render_table;
pub use session::PuzzleSession;
