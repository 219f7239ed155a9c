use core::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Places the mines of a board once the first revealed cell is known.
pub trait MinefieldGenerator: Debug {
    /// Produces a layout for `difficulty` with no mine on `safe` or any of its neighbors.
    fn generate(&mut self, difficulty: &Difficulty, safe: Coord2) -> Result<MineLayout>;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationStrategy {
    /// Every candidate cell is equally likely.
    #[default]
    Uniform,
    /// Redraw up to `max_attempts` times looking for a layout where at least 30% of safe cells touch two mines or
    /// fewer, otherwise keep the first layout drawn.
    Balanced { max_attempts: u16 },
}

/// Every coordinate of `difficulty` outside the 3x3 safe zone centered on `safe`, in row-major order.
pub fn placement_candidates(difficulty: &Difficulty, safe: Coord2) -> Vec<Coord2> {
    let (width, height) = difficulty.size();
    let in_safe_zone = |(x, y): Coord2| x.abs_diff(safe.0) <= 1 && y.abs_diff(safe.1) <= 1;

    (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter(|&coords| !in_safe_zone(coords))
        .collect()
}
