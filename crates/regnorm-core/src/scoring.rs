// crates/regnorm-core/src/scoring.rs

//! # Match Scorer
//!
//! Folds per-metric similarities into one confidence value along two
//! weighting axes: metrics (typo tolerance vs. word-order tolerance) and
//! approaches (raw spelling vs. stemmed morphology).

use crate::similarity::Metric;
use crate::text::{Approach, ComparisonForm, NormalizedName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-call weighting of metrics and approaches.
///
/// Weights need not sum to 1: each axis is renormalized over the weights
/// actually in use. A metric or approach missing from its map contributes
/// nothing, and so does any weight that is negative, zero or not finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    pub metric_weights: BTreeMap<Metric, f64>,
    pub approach_weights: BTreeMap<Approach, f64>,
}

impl Default for WeightConfig {
    /// `{levenshtein: 0.5, token_set: 0.5}` x `{original: 0.5, stemmed: 0.5}`.
    fn default() -> Self {
        Self {
            metric_weights: BTreeMap::from([(Metric::Levenshtein, 0.5), (Metric::TokenSet, 0.5)]),
            approach_weights: BTreeMap::from([(Approach::Original, 0.5), (Approach::Stemmed, 0.5)]),
        }
    }
}

impl WeightConfig {
    /// A configuration with both axes empty. Scores everything 0 until
    /// weights are added.
    pub fn empty() -> Self {
        Self {
            metric_weights: BTreeMap::new(),
            approach_weights: BTreeMap::new(),
        }
    }

    pub fn with_metric(mut self, metric: Metric, weight: f64) -> Self {
        self.metric_weights.insert(metric, weight);
        self
    }

    pub fn with_approach(mut self, approach: Approach, weight: f64) -> Self {
        self.approach_weights.insert(approach, weight);
        self
    }

    /// Metrics with a usable weight, in registry order.
    pub fn active_metrics(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        active(&self.metric_weights)
    }

    /// Approaches with a usable weight, in declaration order.
    pub fn active_approaches(&self) -> impl Iterator<Item = (Approach, f64)> + '_ {
        active(&self.approach_weights)
    }

    /// Usable weight of `approach`, or `None` when it does not take part.
    pub fn approach_weight(&self, approach: Approach) -> Option<f64> {
        self.approach_weights
            .get(&approach)
            .map(|&w| usable(w))
            .filter(|&w| w > 0.0)
    }

    /// `true` when at least one metric and one approach carry weight.
    pub fn is_effective(&self) -> bool {
        self.active_metrics().next().is_some() && self.active_approaches().next().is_some()
    }
}

fn active<K: Copy + Ord>(weights: &BTreeMap<K, f64>) -> impl Iterator<Item = (K, f64)> + '_ {
    weights
        .iter()
        .map(|(&k, &w)| (k, usable(w)))
        .filter(|&(_, w)| w > 0.0)
}

#[inline]
fn usable(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Weighted mean of `(value, weight)` pairs; 0 when no weight is present.
///
/// Weights are scaled by the largest one first, so finite weights of any
/// magnitude cannot overflow the sums.
fn weighted_mean(parts: impl IntoIterator<Item = (f64, f64)>) -> f64 {
    let parts: Vec<(f64, f64)> = parts.into_iter().collect();
    let max_weight = parts.iter().map(|&(_, w)| w).fold(0.0, f64::max);
    if max_weight <= 0.0 {
        return 0.0;
    }
    let (sum, total) = parts.iter().fold((0.0, 0.0), |(sum, total), &(value, weight)| {
        let weight = weight / max_weight;
        (sum + value * weight, total + weight)
    });
    let mean = sum / total;
    if mean.is_finite() {
        mean.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Score of one approach: weighted mean of the active metrics.
pub fn score_approach(input: &str, candidate: &str, weights: &WeightConfig) -> f64 {
    weighted_mean(
        weights
            .active_metrics()
            .map(|(metric, w)| (metric.score(input, candidate), w)),
    )
}

/// Final confidence of `candidate` for `input` in `[0, 100]`.
///
/// For every active approach the matching forms are compared with every
/// active metric; metric scores are averaged per approach, approach scores are
/// averaged into the result. With no active metric or no active approach the
/// result is 0.
pub fn score_candidate(
    input: &NormalizedName,
    candidate: &NormalizedName,
    weights: &WeightConfig,
) -> f64 {
    if !weights.is_effective() {
        return 0.0;
    }
    weighted_mean(input.forms().filter_map(|form| {
        let w = weights.approach_weight(form.approach)?;
        Some((score_approach(form.text, candidate.form(form.approach), weights), w))
    }))
}

/// One metric's contribution inside an approach.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricScore {
    pub metric: Metric,
    pub weight: f64,
    pub score: f64,
}

/// One approach's forms, metric scores and combined score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApproachScore {
    pub approach: Approach,
    pub weight: f64,
    pub input: String,
    pub candidate: String,
    pub metrics: Vec<MetricScore>,
    pub score: f64,
}

/// Full derivation of a [`score_candidate`] value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub approaches: Vec<ApproachScore>,
    pub total: f64,
}

/// Same computation as [`score_candidate`], keeping every intermediate value.
pub fn score_breakdown(
    input: &NormalizedName,
    candidate: &NormalizedName,
    weights: &WeightConfig,
) -> ScoreBreakdown {
    let approaches: Vec<ApproachScore> = input
        .forms()
        .filter_map(|form| Some((form, weights.approach_weight(form.approach)?)))
        .map(|(ComparisonForm { approach, text: a }, weight)| {
            let b = candidate.form(approach);
            let metrics: Vec<MetricScore> = weights
                .active_metrics()
                .map(|(metric, weight)| MetricScore {
                    metric,
                    weight,
                    score: metric.score(a, b),
                })
                .collect();
            let score = weighted_mean(metrics.iter().map(|m| (m.score, m.weight)));
            ApproachScore {
                approach,
                weight,
                input: a.to_string(),
                candidate: b.to_string(),
                metrics,
                score,
            }
        })
        .collect();

    let total = if weights.is_effective() {
        weighted_mean(approaches.iter().map(|a| (a.score, a.weight)))
    } else {
        0.0
    };
    ScoreBreakdown { approaches, total }
}
