use serde::Serialize;

/// Counters describing one pass of the context budget allocator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectionStats {
    pub token_budget: usize,
    pub tokens_spent: usize,
    pub inspected: usize,
    pub selected: usize,
    pub skipped_due_budget: usize,
    pub skipped_due_source_cap: usize,
}

impl SelectionStats {
    pub const fn tokens_remaining(&self) -> usize {
        self.token_budget.saturating_sub(self.tokens_spent)
    }

    pub const fn budget_exhausted(&self) -> bool {
        self.tokens_spent >= self.token_budget
    }
}
