use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Uniform sampling over the cells outside the safe zone, optionally biased towards easier layouts by
/// [`GenerationStrategy::Balanced`].
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    rng: SmallRng,
    strategy: GenerationStrategy,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, strategy: GenerationStrategy) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            strategy,
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(seed, GenerationStrategy::default())
    }

    fn draw(&mut self, difficulty: &Difficulty, candidates: &[Coord2]) -> Result<MineLayout> {
        let mines = usize::from(difficulty.mine_count());
        if mines > candidates.len() {
            return Err(GameError::Placement {
                mines: difficulty.mine_count(),
                available: candidates.len().try_into().unwrap_or(CellCount::MAX),
            });
        }

        let chosen: Vec<Coord2> = index::sample(&mut self.rng, candidates.len(), mines)
            .into_iter()
            .map(|i| candidates[i])
            .collect();
        MineLayout::from_mine_coords(difficulty.size(), &chosen)
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, difficulty: &Difficulty, safe: Coord2) -> Result<MineLayout> {
        let candidates = placement_candidates(difficulty, safe);

        let max_attempts = match self.strategy {
            GenerationStrategy::Uniform => return self.draw(difficulty, &candidates),
            GenerationStrategy::Balanced { max_attempts } => max_attempts.max(1),
        };

        let first = self.draw(difficulty, &candidates)?;
        if is_balanced(&first) {
            return Ok(first);
        }
        for attempt in 1..max_attempts {
            let layout = self.draw(difficulty, &candidates)?;
            if is_balanced(&layout) {
                log::debug!("Balanced layout found after {} attempts", attempt + 1);
                return Ok(layout);
            }
        }

        log::warn!(
            "No balanced layout in {} attempts, falling back to the first one",
            max_attempts
        );
        Ok(first)
    }
}

/// At least 30% of safe cells have two or fewer adjacent mines.
fn is_balanced(layout: &MineLayout) -> bool {
    let (width, height) = layout.size();
    let low_count = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter(|&coords| !layout.contains_mine(coords) && layout.adjacent_mine_count(coords) <= 2)
        .count();

    low_count * 10 >= usize::from(layout.safe_cell_count()) * 3
}
