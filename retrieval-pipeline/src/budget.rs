use std::collections::HashMap;

use common::types::RetrievedChunk;
use tracing::debug;

use crate::pipeline::{RetrievalTuning, SelectionStats};

/// Picks similarity-ranked chunks under a global token budget and a per-material cap.
///
/// Candidates are walked once in the order given. A candidate is taken when its material
/// is still under the cap and its tokens fit in what is left of the budget; anything else
/// is skipped for good. The walk never reorders, so ties keep their input order.
#[derive(Debug, Clone, Copy)]
pub struct ContextBudgetAllocator {
    token_budget: usize,
    per_source_cap: usize,
}

impl ContextBudgetAllocator {
    pub const fn new(token_budget: usize, per_source_cap: usize) -> Self {
        Self {
            token_budget,
            per_source_cap,
        }
    }

    pub const fn from_tuning(tuning: &RetrievalTuning) -> Self {
        Self::new(tuning.token_budget, tuning.max_chunks_per_material)
    }

    pub fn select(&self, candidates: Vec<RetrievedChunk>) -> Vec<RetrievedChunk> {
        self.select_with_stats(candidates).0
    }

    pub fn select_with_stats(
        &self,
        candidates: Vec<RetrievedChunk>,
    ) -> (Vec<RetrievedChunk>, SelectionStats) {
        let mut stats = SelectionStats {
            token_budget: self.token_budget,
            ..SelectionStats::default()
        };
        let mut per_material: HashMap<String, usize> = HashMap::new();
        let mut selected = Vec::new();

        for candidate in candidates {
            stats.inspected = stats.inspected.saturating_add(1);

            let accepted_from_material = per_material
                .get(&candidate.material_id)
                .copied()
                .unwrap_or(0);
            if accepted_from_material >= self.per_source_cap {
                stats.skipped_due_source_cap = stats.skipped_due_source_cap.saturating_add(1);
                continue;
            }

            let tokens = candidate.effective_token_count();
            if stats.tokens_spent.saturating_add(tokens) > self.token_budget {
                stats.skipped_due_budget = stats.skipped_due_budget.saturating_add(1);
                continue;
            }

            stats.tokens_spent = stats.tokens_spent.saturating_add(tokens);
            stats.selected = stats.selected.saturating_add(1);
            per_material.insert(
                candidate.material_id.clone(),
                accepted_from_material.saturating_add(1),
            );
            selected.push(candidate);
        }

        debug!(
            inspected = stats.inspected,
            selected = stats.selected,
            tokens_spent = stats.tokens_spent,
            token_budget = stats.token_budget,
            skipped_due_budget = stats.skipped_due_budget,
            skipped_due_source_cap = stats.skipped_due_source_cap,
            "selected retrieval context"
        );

        (selected, stats)
    }
}

#[cfg(test)]
mod tests {
    use common::types::SourceType;

    use super::*;

    fn candidate(
        id: &str,
        material_id: &str,
        text: &str,
        token_count: Option<usize>,
        similarity: f32,
    ) -> RetrievedChunk {
        RetrievedChunk {
            id: id.into(),
            material_id: material_id.into(),
            material_title: format!("Doc {material_id}"),
            source_type: SourceType::Page,
            source_index: 1,
            section_title: None,
            text: text.into(),
            token_count,
            similarity,
        }
    }

    fn ids(chunks: &[RetrievedChunk]) -> Vec<&str> {
        chunks.iter().map(|chunk| chunk.id.as_str()).collect()
    }

    #[test]
    fn empty_candidates_select_nothing() {
        let (selected, stats) = ContextBudgetAllocator::new(100, 3).select_with_stats(Vec::new());
        assert!(selected.is_empty());
        assert_eq!(stats.inspected, 0);
    }

    #[test]
    fn oversized_token_counts_saturate_instead_of_overflowing() {
        let candidates = vec![
            candidate("small", "m1", "Alpha", Some(3), 0.9),
            candidate("huge", "m2", "Beta", Some(usize::MAX), 0.8),
            candidate("tail", "m3", "Gamma", Some(2), 0.7),
        ];

        let (selected, stats) =
            ContextBudgetAllocator::new(usize::MAX / 2, 5).select_with_stats(candidates);

        assert_eq!(ids(&selected), vec!["small", "tail"]);
        assert_eq!(stats.tokens_spent, 5);
        assert_eq!(stats.skipped_due_budget, 1);
        assert_eq!(stats.inspected, 3);
    }

    #[test]
    fn respects_per_material_cap() {
        let candidates = vec![
            candidate("c1", "m1", "Alpha", Some(4), 0.9),
            candidate("c2", "m1", "Beta", Some(4), 0.8),
            candidate("c3", "m1", "Gamma", Some(4), 0.7),
            candidate("c4", "m2", "Delta", Some(4), 0.6),
        ];

        let (selected, stats) = ContextBudgetAllocator::new(10, 2).select_with_stats(candidates);

        // c4 fits the cap but 4 + 4 + 4 exceeds the budget of 10.
        assert_eq!(ids(&selected), vec!["c1", "c2"]);
        assert_eq!(stats.skipped_due_source_cap, 1);
        assert_eq!(stats.skipped_due_budget, 1);
        assert_eq!(stats.tokens_spent, 8);
    }

    #[test]
    fn cap_frees_room_for_other_materials() {
        let candidates = vec![
            candidate("c1", "m1", "Alpha", Some(4), 0.9),
            candidate("c2", "m1", "Beta", Some(4), 0.8),
            candidate("c3", "m2", "Gamma", Some(4), 0.7),
        ];

        let selected = ContextBudgetAllocator::new(100, 1).select(candidates);

        assert_eq!(ids(&selected), vec!["c1", "c3"]);
    }

    #[test]
    fn skipped_candidates_do_not_stop_the_walk() {
        let candidates = vec![
            candidate("big", "m1", "Alpha", Some(50), 0.9),
            candidate("small", "m2", "Beta", Some(5), 0.8),
        ];

        let (selected, stats) = ContextBudgetAllocator::new(10, 3).select_with_stats(candidates);

        assert_eq!(ids(&selected), vec!["small"]);
        assert_eq!(stats.skipped_due_budget, 1);
    }

    #[test]
    fn greedy_walk_never_backtracks() {
        // Taking c1 blocks c2 and c3, even though c2 + c3 would pack the budget exactly.
        let candidates = vec![
            candidate("c1", "m1", "one", Some(6), 0.9),
            candidate("c2", "m2", "two", Some(5), 0.8),
            candidate("c3", "m3", "three", Some(5), 0.7),
        ];

        let (selected, stats) = ContextBudgetAllocator::new(10, 5).select_with_stats(candidates);

        assert_eq!(ids(&selected), vec!["c1"]);
        assert_eq!(stats.tokens_remaining(), 4);
    }

    #[test]
    fn budget_may_be_filled_exactly() {
        let candidates = vec![
            candidate("c1", "m1", "one", Some(6), 0.9),
            candidate("c2", "m2", "two", Some(4), 0.8),
        ];

        let (selected, stats) = ContextBudgetAllocator::new(10, 5).select_with_stats(candidates);

        assert_eq!(ids(&selected), vec!["c1", "c2"]);
        assert!(stats.budget_exhausted());
    }

    #[test]
    fn estimates_tokens_when_count_is_missing() {
        let text = "This text is long enough to exceed the budget.";
        let candidates = vec![candidate("c1", "m1", text, Some(0), 0.9)];

        let selected = ContextBudgetAllocator::new(3, 3).select(candidates);

        assert!(selected.is_empty());
    }

    #[test]
    fn keeps_input_order_for_equal_similarity() {
        let candidates = vec![
            candidate("first", "m1", "a", Some(1), 0.5),
            candidate("second", "m2", "b", Some(1), 0.5),
            candidate("third", "m3", "c", Some(1), 0.5),
        ];

        let selected = ContextBudgetAllocator::new(10, 1).select(candidates);

        assert_eq!(ids(&selected), vec!["first", "second", "third"]);
    }

    #[test]
    fn zero_cap_selects_nothing() {
        let candidates = vec![candidate("c1", "m1", "Alpha", Some(1), 0.9)];
        assert!(ContextBudgetAllocator::new(100, 0).select(candidates).is_empty());
    }

    #[test]
    fn selection_never_exceeds_budget_or_cap() {
        let candidates: Vec<RetrievedChunk> = (0..60)
            .map(|i| {
                let material = format!("m{}", i % 4);
                let text = "x".repeat(1 + (i * 7) % 41);
                let stored = if i % 3 == 0 { None } else { Some(1 + i % 9) };
                candidate(&format!("c{i}"), &material, &text, stored, 1.0)
            })
            .collect();
        let budget = 37;
        let cap = 3;

        let selected = ContextBudgetAllocator::new(budget, cap).select(candidates);

        let spent: usize = selected
            .iter()
            .map(RetrievedChunk::effective_token_count)
            .sum();
        assert!(spent <= budget);
        let mut per_material: HashMap<&str, usize> = HashMap::new();
        for chunk in &selected {
            *per_material.entry(chunk.material_id.as_str()).or_default() += 1;
        }
        assert!(per_material.values().all(|count| *count <= cap));
    }
}
