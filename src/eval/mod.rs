//! Evaluation module for 4x4x4 positions
//!
//! This module provides line-pattern scoring and the two static evaluators
//! the search can be configured with.

pub mod heuristic;
pub mod patterns;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{BoardState, Mark};
use crate::error::ConfigError;

pub use heuristic::{comprehensive_evaluate, count_double_threats, quick_evaluate};
pub use patterns::{line_score, PatternScore, QuickScore};

/// Which static evaluator the search calls at its leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorKind {
    /// Center/corner occupancy only
    Quick,
    /// Line potential, control, double threats and mobility
    #[default]
    Comprehensive,
}

impl EvaluatorKind {
    /// Score `board` from `me`'s perspective
    #[inline]
    pub fn evaluate(self, board: &BoardState, me: Mark) -> i32 {
        match self {
            EvaluatorKind::Quick => quick_evaluate(board, me),
            EvaluatorKind::Comprehensive => comprehensive_evaluate(board, me),
        }
    }
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EvaluatorKind::Quick => "quick",
            EvaluatorKind::Comprehensive => "comprehensive",
        })
    }
}

impl FromStr for EvaluatorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" | "1" => Ok(EvaluatorKind::Quick),
            "comprehensive" | "2" => Ok(EvaluatorKind::Comprehensive),
            other => Err(ConfigError::UnknownEvaluator(other.to_string())),
        }
    }
}
