use std::collections::HashSet;

use crate::backend::{CompareRequest, IncidentBackend, IncidentRecord};
use crate::config::SimilarityStrategy;
use crate::error::BackendResult;

/// Jaccard index of the lowercased word sets of `a` and `b`.
///
/// Characters that are neither ASCII word characters (`[A-Za-z0-9_]`) nor
/// whitespace are dropped before splitting, so "won't" and "wont" are the same
/// word and "café" reads as "caf".
pub fn jaccard(a: &str, b: &str) -> f64 {
    let a = word_set(a);
    let b = word_set(b);

    let intersection = a.intersection(&b).count();
    let union = a.union(&b).count().max(1);

    intersection as f64 / union as f64
}

fn word_set(text: &str) -> HashSet<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// The highest-scoring incident seen during a duplicate scan.
#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch {
    /// The incident that scored highest
    pub incident: IncidentRecord,
    /// Its score, clamped to `[0, 1]`
    pub score: f64,
}

/// Score `description` against every incident and keep the best.
///
/// The first incident is always recorded, and after that only a strictly
/// higher score replaces it, so ties (including all-zero scans) go to the
/// earlier incident. Returns `None` only when `incidents` is empty.
pub async fn best_match<B: IncidentBackend + ?Sized>(
    backend: &B,
    strategy: SimilarityStrategy,
    description: &str,
    incidents: Vec<IncidentRecord>,
) -> BackendResult<Option<BestMatch>> {
    let mut best: Option<BestMatch> = None;

    for incident in incidents {
        let raw = match strategy {
            SimilarityStrategy::Lexical => jaccard(description, &incident.description),
            SimilarityStrategy::Remote => {
                backend
                    .compare_descriptions(CompareRequest::new(description, &incident.description))
                    .await?
            }
        };
        let score = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };

        let replace = match &best {
            None => true,
            Some(current) => score > current.score,
        };
        if replace {
            best = Some(BestMatch { incident, score });
        }
    }

    Ok(best)
}
