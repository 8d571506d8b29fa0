use crate::types::Solution;

/// Keeps the best solution seen across the runs of one configuration.
///
/// Ties keep the incumbent; only a strictly greater fitness replaces it.
#[derive(Debug, Default)]
pub struct BestSolutionTracker {
    best: Option<Solution>,
}

impl BestSolutionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `candidate` became the new best
    pub fn offer(&mut self, candidate: &Solution) -> bool {
        let improves = match &self.best {
            None => true,
            Some(current) => candidate.fitness > current.fitness,
        };
        if improves {
            self.best = Some(candidate.clone());
        }
        improves
    }

    pub fn best(&self) -> Option<&Solution> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Option<Solution> {
        self.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution(fitness: f64, tag: u32) -> Solution {
        Solution {
            representation: vec![tag],
            fitness,
            expected_return: 0.0,
            risk: 0.0,
            risk_free: 0.0,
        }
    }

    #[test]
    fn test_first_offer_seeds() {
        let mut tracker = BestSolutionTracker::new();
        assert!(tracker.best().is_none());
        assert!(tracker.offer(&solution(-3.0, 1)));
        assert_eq!(tracker.best().unwrap().fitness, -3.0);
    }

    #[test]
    fn test_only_strict_improvement_replaces() {
        let mut tracker = BestSolutionTracker::new();
        tracker.offer(&solution(1.0, 1));
        assert!(!tracker.offer(&solution(1.0, 2)));
        assert!(!tracker.offer(&solution(0.5, 3)));
        assert!(tracker.offer(&solution(1.5, 4)));
        assert_eq!(tracker.into_best().unwrap().representation, vec![4]);
    }

    #[test]
    fn test_best_fitness_never_decreases() {
        let mut tracker = BestSolutionTracker::new();
        let mut previous = f64::NEG_INFINITY;
        for (i, f) in [0.2, 0.9, 0.1, 0.9, 1.3, -1.0].iter().enumerate() {
            tracker.offer(&solution(*f, i as u32));
            let current = tracker.best().unwrap().fitness;
            assert!(current >= previous);
            previous = current;
        }
        assert_eq!(previous, 1.3);
    }
}
