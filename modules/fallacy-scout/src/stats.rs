use fallacy_common::FallacyCategory;

/// Stats from one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub sources_attempted: u32,
    pub sources_failed: u32,
    pub items_fetched: u32,
    pub examples_added: u32,
    /// Indexed by `FallacyCategory::index()`.
    pub by_category: [u32; FallacyCategory::ALL.len()],
    pub corpus_size: usize,
}

impl RunStats {
    pub fn record(&mut self, category: FallacyCategory) {
        self.examples_added += 1;
        self.by_category[category.index()] += 1;
    }

    pub fn added_for(&self, category: FallacyCategory) -> u32 {
        self.by_category[category.index()]
    }

    /// True when the run produced nothing to merge.
    pub fn is_noop(&self) -> bool {
        self.examples_added == 0
    }
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Aggregation Run Complete ===")?;
        writeln!(f, "Sources attempted: {}", self.sources_attempted)?;
        writeln!(f, "Sources failed:    {}", self.sources_failed)?;
        writeln!(f, "Items fetched:     {}", self.items_fetched)?;
        writeln!(f, "Examples added:    {}", self.examples_added)?;
        writeln!(f, "\nBy category:")?;
        for category in FallacyCategory::ALL {
            writeln!(
                f,
                "  {:<20} {}",
                category.display_name(),
                self.by_category[category.index()]
            )?;
        }
        write!(f, "\nCorpus size:       {}", self.corpus_size)
    }
}
