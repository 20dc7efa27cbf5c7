use rand::Rng;

use crate::scenario::WeightedTask;

/// Discrete cumulative-weight table. One uniform draw in `[0, total)` per
/// cycle selects the first bucket whose upper bound exceeds the draw.
#[derive(Debug, Clone)]
pub struct WeightTable {
    bounds: Vec<u32>,
    total: u32,
}

impl WeightTable {
    #[must_use]
    pub fn from_tasks(tasks: &[WeightedTask]) -> Self {
        let mut bounds = Vec::with_capacity(tasks.len());
        let mut total = 0u32;
        for task in tasks {
            total += task.weight;
            bounds.push(total);
        }
        Self { bounds, total }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Index of the next task to run. A scenario with no tasks is a
    /// configuration-authoring error and panics on the empty draw range.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> usize {
        self.index_for(rng.gen_range(0..self.total))
    }

    fn index_for(&self, draw: u32) -> usize {
        self.bounds.partition_point(|&bound| bound <= draw)
    }
}
