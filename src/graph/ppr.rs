use std::collections::HashMap;

use super::store::KnowledgeGraph;

pub const PPR_DAMPING: f32 = 0.5;
pub const PPR_MAX_ITER: usize = 100;
pub const PPR_TOLERANCE: f32 = 1e-6;

impl KnowledgeGraph {
    /// Personalized PageRank biased toward `seed_weights`.
    ///
    /// Seed weights are normalized to sum to 1 (the caller must guarantee a
    /// strictly positive total). Propagation works over a sparse score map
    /// that only ever contains ids reachable from the seeds; nodes absent
    /// from the returned map have score zero. An empty seed map returns an
    /// empty result.
    pub fn personalized_page_rank(
        &self,
        seed_weights: &HashMap<String, f32>,
        damping: f32,
        max_iter: usize,
        tolerance: f32,
    ) -> HashMap<String, f32> {
        if seed_weights.is_empty() {
            return HashMap::new();
        }

        let total: f32 = seed_weights.values().sum();
        let seeds: HashMap<String, f32> = seed_weights
            .iter()
            .map(|(id, weight)| (id.clone(), weight / total))
            .collect();

        let mut scores = seeds.clone();

        for _ in 0..max_iter {
            // The working set keeps every currently scored id so the teleport
            // term reaches seeds even when no mass flows into them.
            let mut next: HashMap<String, f32> =
                scores.keys().map(|id| (id.clone(), 0.0)).collect();

            for (id, &score) in &scores {
                let neighbors = self.neighbors(id);
                if neighbors.is_empty() {
                    // Dangling node: its mass teleports back to the seed
                    // distribution.
                    for (seed_id, &seed_weight) in &seeds {
                        *next.entry(seed_id.clone()).or_insert(0.0) += score * seed_weight;
                    }
                } else {
                    // Equal split over the neighbor list. A duplicated
                    // neighbor id collects one share per occurrence.
                    let share = score / neighbors.len() as f32;
                    for neighbor in neighbors {
                        *next.entry(neighbor.clone()).or_insert(0.0) += share;
                    }
                }
            }

            for (id, score) in next.iter_mut() {
                let seed = seeds.get(id).copied().unwrap_or(0.0);
                *score = (1.0 - damping) * seed + damping * *score;
            }

            let mut max_diff = 0.0f32;
            for (id, &score) in &next {
                let prev = scores.get(id).copied().unwrap_or(0.0);
                max_diff = max_diff.max((score - prev).abs());
            }

            scores = next;

            if max_diff <= tolerance {
                break;
            }
        }

        scores
    }
}
