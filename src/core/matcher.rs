use std::collections::HashSet;
use crate::core::scoring::{score_pair, PairScore};
use crate::models::{Candidate, CandidateId, MatchingOptions, MatchingOptionsPatch, MatchResult};

/// Matching orchestrator
///
/// Holds the default options (built-in or from configuration). Each call
/// merges the caller's overrides into a fresh effective value, so a single
/// `Matcher` can be shared freely between concurrent requests.
///
/// # Modes
/// 1. Exhaustive: every source/target pair at or above the threshold, best first
/// 2. Best match: greedy one-to-one assignment of targets, in source order
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    defaults: MatchingOptions,
}

impl Matcher {
    pub fn new(defaults: MatchingOptions) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &MatchingOptions {
        &self.defaults
    }

    /// Effective options for one call
    pub fn options_for(&self, overrides: Option<&MatchingOptionsPatch>) -> MatchingOptions {
        match overrides {
            Some(patch) => self.defaults.merge(patch),
            None => self.defaults,
        }
    }

    /// Find every source/target pairing that reaches the threshold
    ///
    /// Evaluates the full cartesian product (source-major) and returns the
    /// qualifying pairs sorted by score, highest first. Order among equal
    /// scores is not part of the contract.
    ///
    /// # Arguments
    /// * `sources` - Records to resolve
    /// * `targets` - Records to resolve against
    /// * `overrides` - Per-call options merged over the defaults
    pub fn find_matches<'a>(
        &self,
        sources: &'a [Candidate],
        targets: &'a [Candidate],
        overrides: Option<&MatchingOptionsPatch>,
    ) -> Vec<MatchResult<'a>> {
        let options = self.options_for(overrides);

        let mut matches: Vec<MatchResult<'a>> = sources
            .iter()
            .flat_map(move |source| targets.iter().map(move |target| (source, target)))
            .filter_map(|(source, target)| {
                let pair = score_pair(source, target, &options);
                (pair.score >= options.threshold).then(|| to_result(source, target, pair))
            })
            .collect();

        // Sort by score (descending)
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::debug!(
            "Exhaustive matching: {} sources x {} targets, {} pairs at or above {}",
            sources.len(),
            targets.len(),
            matches.len(),
            options.threshold
        );

        matches
    }

    /// Assign each source at most one target, greedily, in source order
    ///
    /// For every source the unassigned target with the highest score at or
    /// above the threshold is claimed; the first target seen wins ties. A
    /// claimed target id is unavailable to every later source in the call.
    ///
    /// This is not an optimal assignment: an earlier source can take a target
    /// that would have scored higher for a later one, and nothing is revisited.
    pub fn find_best_matches<'a>(
        &self,
        sources: &'a [Candidate],
        targets: &'a [Candidate],
        overrides: Option<&MatchingOptionsPatch>,
    ) -> Vec<MatchResult<'a>> {
        let options = self.options_for(overrides);

        let mut assigned: HashSet<&'a CandidateId> = HashSet::new();
        let mut matches = Vec::with_capacity(sources.len().min(targets.len()));

        for source in sources {
            let mut best: Option<(&'a Candidate, PairScore)> = None;

            for target in targets.iter().filter(|t| !assigned.contains(&t.id)) {
                let pair = score_pair(source, target, &options);
                if pair.score < options.threshold {
                    continue;
                }
                if best.map_or(true, |(_, current)| pair.score > current.score) {
                    best = Some((target, pair));
                }
            }

            match best {
                Some((target, pair)) => {
                    assigned.insert(&target.id);
                    matches.push(to_result(source, target, pair));
                }
                None => {
                    tracing::trace!("No unassigned target reaches threshold for source {}", source.id);
                }
            }
        }

        tracing::debug!(
            "Best-match assignment: {} sources x {} targets, {} assigned",
            sources.len(),
            targets.len(),
            matches.len()
        );

        matches
    }
}

fn to_result<'a>(source: &'a Candidate, target: &'a Candidate, pair: PairScore) -> MatchResult<'a> {
    MatchResult {
        source,
        target,
        score: pair.score,
        name_score: pair.name_score,
        date_score: pair.date_score,
    }
}

/// Exhaustive matching with the built-in default options
pub fn find_matches<'a>(
    sources: &'a [Candidate],
    targets: &'a [Candidate],
    options: Option<&MatchingOptionsPatch>,
) -> Vec<MatchResult<'a>> {
    Matcher::default().find_matches(sources, targets, options)
}

/// Greedy best-match assignment with the built-in default options
pub fn find_best_matches<'a>(
    sources: &'a [Candidate],
    targets: &'a [Candidate],
    options: Option<&MatchingOptionsPatch>,
) -> Vec<MatchResult<'a>> {
    Matcher::default().find_best_matches(sources, targets, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_candidate(id: i64, first: &str, last: &str, dob: Option<&str>) -> Candidate {
        let candidate = Candidate::new(id, first, last);
        match dob {
            Some(d) => candidate.with_date_of_birth(d),
            None => candidate,
        }
    }

    #[test]
    fn test_find_matches_basic() {
        let sources = vec![create_candidate(1, "Jean", "Dupont", Some("1990-01-15"))];
        let targets = vec![
            create_candidate(10, "Jean", "Dupont", Some("1990-01-15")), // Exact
            create_candidate(11, "Pierre", "Martin", Some("1985-03-02")), // Unrelated
        ];

        let results = find_matches(&sources, &targets, None);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].target.id, CandidateId::Int(10));
        assert_eq!(results[0].score, 1.0);
    }

    #[test]
    fn test_threshold_excludes_dissimilar() {
        let sources = vec![create_candidate(1, "Jean", "Dupont", None)];
        let targets = vec![create_candidate(2, "Pierre", "Martin", None)];

        assert!(find_matches(&sources, &targets, None).is_empty());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let sources = vec![create_candidate(1, "Jean", "Dupont", None)];
        let targets = vec![create_candidate(2, "Jean", "Dupont", None)];
        let patch = MatchingOptionsPatch {
            threshold: Some(0.5),
            ..Default::default()
        };

        // Score is exactly name_weight with no dates
        let results = find_matches(&sources, &targets, Some(&patch));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 0.5);
    }

    #[test]
    fn test_matches_sorted_by_score() {
        let dob = Some("2000-06-01");
        let sources = vec![create_candidate(1, "Jean", "Dupont", dob)];
        let targets = vec![
            create_candidate(10, "Jean", "Dupo", dob),   // two edits
            create_candidate(11, "Jean", "Dupont", dob), // exact
            create_candidate(12, "Jean", "Dupon", dob),  // one edit
        ];

        let results = find_matches(&sources, &targets, None);

        let ids: Vec<_> = results.iter().map(|r| r.target.id.clone()).collect();
        assert_eq!(ids, vec![CandidateId::Int(11), CandidateId::Int(12), CandidateId::Int(10)]);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_find_matches_allows_shared_targets() {
        let sources = vec![
            create_candidate(1, "Jean", "Dupont", None),
            create_candidate(2, "Jean", "Dupont", None),
        ];
        let targets = vec![create_candidate(3, "Jean", "Dupont", None)];
        let patch = MatchingOptionsPatch {
            threshold: Some(0.4),
            ..Default::default()
        };

        assert_eq!(find_matches(&sources, &targets, Some(&patch)).len(), 2);
    }

    #[test]
    fn test_best_match_uniqueness_first_source_wins() {
        let sources = vec![
            Candidate::new("s1", "Jean", "Dupont").with_date_of_birth("1990-01-15"),
            Candidate::new("s2", "Jean", "Dupont").with_date_of_birth("1990-01-15"),
        ];
        let targets = vec![Candidate::new("a", "Jean", "Dupont").with_date_of_birth("1990-01-15")];

        let results = find_best_matches(&sources, &targets, None);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source.id, CandidateId::from("s1"));
        assert_eq!(results[0].target.id, CandidateId::from("a"));
    }

    #[test]
    fn test_best_match_picks_highest_unassigned() {
        let dob = Some("1990-01-15");
        let sources = vec![create_candidate(1, "Jean", "Dupont", dob)];
        let targets = vec![
            create_candidate(10, "Jean", "Dupond", dob),
            create_candidate(11, "Jean", "Dupont", dob),
        ];

        let results = find_best_matches(&sources, &targets, None);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].target.id, CandidateId::Int(11));
    }

    #[test]
    fn test_best_match_ties_keep_first_target() {
        let dob = Some("1990-01-15");
        let sources = vec![create_candidate(1, "Jean", "Dupont", dob)];
        let targets = vec![
            create_candidate(10, "Jean", "Dupont", dob),
            create_candidate(11, "Jean", "Dupont", dob),
        ];

        let results = find_best_matches(&sources, &targets, None);
        assert_eq!(results[0].target.id, CandidateId::Int(10));
    }

    #[test]
    fn test_best_match_is_greedy() {
        let dob = Some("1990-01-15");
        let sources = vec![
            create_candidate(1, "Jean", "Dupont", dob),
            create_candidate(2, "Jean", "Dupond", dob),
        ];
        let targets = vec![create_candidate(10, "Jean", "Dupont", dob)];

        let results = find_best_matches(&sources, &targets, None);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source.id, CandidateId::Int(1));
    }

    #[test]
    fn test_best_match_earlier_source_can_take_better_target() {
        // Source 1 claims target 10 even though source 2 would score higher on it
        let dob = Some("1990-01-15");
        let sources = vec![
            create_candidate(1, "Jean", "Dupond", dob),
            create_candidate(2, "Jean", "Dupont", dob),
        ];
        let targets = vec![
            create_candidate(10, "Jean", "Dupont", dob),
            create_candidate(11, "Jean", "Dupontel", dob),
        ];

        let results = find_best_matches(&sources, &targets, None);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source.id, CandidateId::Int(1));
        assert_eq!(results[0].target.id, CandidateId::Int(10));
        assert_eq!(results[1].source.id, CandidateId::Int(2));
        assert_eq!(results[1].target.id, CandidateId::Int(11));
    }

    #[test]
    fn test_best_match_source_without_qualifying_target() {
        let dob = Some("1990-01-15");
        let sources = vec![
            create_candidate(1, "Pierre", "Martin", dob),
            create_candidate(2, "Jean", "Dupont", dob),
        ];
        let targets = vec![create_candidate(10, "Jean", "Dupont", dob)];

        let results = find_best_matches(&sources, &targets, None);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source.id, CandidateId::Int(2));
    }

    #[test]
    fn test_empty_inputs() {
        let x = vec![create_candidate(1, "Jean", "Dupont", None)];

        assert!(find_matches(&[], &[], None).is_empty());
        assert!(find_matches(&x, &[], None).is_empty());
        assert!(find_best_matches(&[], &x, None).is_empty());
        assert!(find_best_matches(&x, &[], None).is_empty());
    }

    #[test]
    fn test_matcher_defaults_used_without_overrides() {
        let matcher = Matcher::new(MatchingOptions {
            threshold: 0.4,
            ..MatchingOptions::default()
        });
        let sources = vec![create_candidate(1, "Jean", "Dupont", None)];
        let targets = vec![create_candidate(2, "Jean", "Dupont", None)];

        assert_eq!(matcher.find_matches(&sources, &targets, None).len(), 1);
        assert!(find_matches(&sources, &targets, None).is_empty());
    }

    #[test]
    fn test_overrides_merge_over_matcher_defaults() {
        let matcher = Matcher::new(MatchingOptions {
            threshold: 0.4,
            ..MatchingOptions::default()
        });
        let patch = MatchingOptionsPatch {
            name_weight: Some(1.0),
            ..Default::default()
        };

        let options = matcher.options_for(Some(&patch));
        assert_eq!(options.threshold, 0.4);
        assert_eq!(options.name_weight, 1.0);
        assert_eq!(options.date_weight, 0.5);
    }
}
