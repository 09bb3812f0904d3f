//! Aggregate statistics over graded questions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::report::QuestionResult;

/// Totals for one question kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindStats {
    pub kind: String,
    pub questions: usize,
    pub correct: usize,
    pub awarded_points: f64,
    pub possible_points: f64,
}

/// Group graded questions by kind, sorted by kind name.
pub fn compute_kind_stats(details: &[QuestionResult]) -> Vec<KindStats> {
    let mut grouped: BTreeMap<&str, KindStats> = BTreeMap::new();

    for d in details {
        let entry = grouped.entry(d.kind.as_str()).or_insert_with(|| KindStats {
            kind: d.kind.clone(),
            questions: 0,
            correct: 0,
            awarded_points: 0.0,
            possible_points: 0.0,
        });
        entry.questions += 1;
        if d.is_correct {
            entry.correct += 1;
        }
        entry.awarded_points += d.awarded_points;
        entry.possible_points += d.points;
    }

    grouped.into_values().collect()
}
