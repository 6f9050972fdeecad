// ============================================================
// Layer 3 — ROUGE Score Report
// ============================================================
// Flat mapping produced by the external scorer, keyed the way
// the ROUGE-1.5.5 output is conventionally flattened:
//
//   rouge_{variant}_{statistic}        point estimate
//   rouge_{variant}_{statistic}_cb     95% interval lower bound
//   rouge_{variant}_{statistic}_ce     95% interval upper bound
//
//   variant   ∈ 1, 2, l, w_1.2, s*, su*, ...
//   statistic ∈ recall, precision, f_score

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RougeStatistic {
    FScore,
    Recall,
    Precision,
}

impl RougeStatistic {
    /// Reporting order.
    pub const ALL: [RougeStatistic; 3] = [Self::FScore, Self::Recall, Self::Precision];

    pub fn key_suffix(self) -> &'static str {
        match self {
            Self::FScore    => "f_score",
            Self::Recall    => "recall",
            Self::Precision => "precision",
        }
    }

    /// Map the `Average_X` label of a ROUGE output line.
    pub fn from_average_label(label: &str) -> Option<Self> {
        match label {
            "Average_R" => Some(Self::Recall),
            "Average_P" => Some(Self::Precision),
            "Average_F" => Some(Self::FScore),
            _ => None,
        }
    }
}

/// Key of the point estimate, e.g. `rouge_1_recall`.
pub fn metric_key(variant: &str, stat: RougeStatistic) -> String {
    format!("rouge_{}_{}", variant, stat.key_suffix())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreReport {
    scores: BTreeMap<String, f64>,
}

impl ScoreReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.scores.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.scores.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
