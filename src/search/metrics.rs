//! Per-request search statistics

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::Difficulty;
use crate::eval::EvaluatorKind;

/// Snapshot of the most recent move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchMetrics {
    /// Nodes expanded by the tree search (0 when a shortcut answered)
    pub nodes: u64,
    /// Wall-clock time spent on the request
    pub elapsed: Duration,
    /// Configured maximum depth
    pub depth: u8,
    /// Deepest iteration that finished before the budget ran out
    pub completed_depth: u8,
    pub difficulty: Difficulty,
    pub evaluator: EvaluatorKind,
}

impl SearchMetrics {
    pub fn empty(difficulty: Difficulty, evaluator: EvaluatorKind) -> Self {
        Self {
            nodes: 0,
            elapsed: Duration::ZERO,
            depth: difficulty.max_depth(),
            completed_depth: 0,
            difficulty,
            evaluator,
        }
    }

    /// Elapsed time in milliseconds, for log lines
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Accumulates counters for one move request. Created at the start of the
/// request; `finish` produces the snapshot.
#[derive(Debug)]
pub struct MetricsCollector {
    start: Instant,
    nodes: u64,
    completed_depth: u8,
    difficulty: Difficulty,
    evaluator: EvaluatorKind,
}

impl MetricsCollector {
    pub fn start(difficulty: Difficulty, evaluator: EvaluatorKind) -> Self {
        Self {
            start: Instant::now(),
            nodes: 0,
            completed_depth: 0,
            difficulty,
            evaluator,
        }
    }

    pub fn add_nodes(&mut self, nodes: u64) {
        self.nodes += nodes;
    }

    pub fn set_completed_depth(&mut self, depth: u8) {
        self.completed_depth = depth;
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(&self) -> SearchMetrics {
        SearchMetrics {
            nodes: self.nodes,
            elapsed: self.start.elapsed(),
            depth: self.difficulty.max_depth(),
            completed_depth: self.completed_depth,
            difficulty: self.difficulty,
            evaluator: self.evaluator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_snapshot() {
        let difficulty = Difficulty::new(2).unwrap();
        let mut collector = MetricsCollector::start(difficulty, EvaluatorKind::Quick);
        collector.add_nodes(40);
        collector.add_nodes(2);
        collector.set_completed_depth(3);

        let metrics = collector.finish();
        assert_eq!(metrics.nodes, 42);
        assert_eq!(metrics.depth, 3);
        assert_eq!(metrics.completed_depth, 3);
        assert_eq!(metrics.difficulty, difficulty);
        assert_eq!(metrics.evaluator, EvaluatorKind::Quick);
    }

    #[test]
    fn test_metrics_serialize() {
        let metrics = SearchMetrics::empty(Difficulty::default(), EvaluatorKind::Comprehensive);
        let json = serde_json::to_value(metrics).unwrap();
        assert_eq!(json["nodes"], 0);
        assert_eq!(json["depth"], 4);
        assert_eq!(json["difficulty"], 3);
        assert_eq!(json["evaluator"], "comprehensive");
    }
}
