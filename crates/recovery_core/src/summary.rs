use std::path::PathBuf;

/// Per-page image copy counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageTally {
    pub copied: usize,
    pub missing: usize,
    pub ignored: usize,
    pub failed: usize,
}

impl ImageTally {
    pub fn absorb(&mut self, other: ImageTally) {
        self.copied += other.copied;
        self.missing += other.missing;
        self.ignored += other.ignored;
        self.failed += other.failed;
    }
}

/// What happened to one `index.html` candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Recovered { post: PathBuf, images: ImageTally },
    /// Not an article page (archives, tag listings, about pages, ...).
    Skipped,
    Failed { reason: String },
}

/// Run-level counters, accumulated by the orchestrator and returned to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub candidates: usize,
    pub recovered: usize,
    pub skipped: usize,
    pub failed: usize,
    pub images: ImageTally,
    /// Files duplicated by the final bulk copy, `None` when it did not run.
    pub bulk_images_copied: Option<usize>,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &PageOutcome) {
        self.candidates += 1;
        match outcome {
            PageOutcome::Recovered { images, .. } => {
                self.recovered += 1;
                self.images.absorb(*images);
            }
            PageOutcome::Skipped => self.skipped += 1,
            PageOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_outcome_counts_as_a_candidate() {
        let mut summary = RunSummary::default();
        summary.record(&PageOutcome::Skipped);
        summary.record(&PageOutcome::Failed {
            reason: "io".into(),
        });
        summary.record(&PageOutcome::Recovered {
            post: PathBuf::from("a.md"),
            images: ImageTally {
                copied: 2,
                missing: 1,
                ..ImageTally::default()
            },
        });

        assert_eq!(summary.candidates, 3);
        assert_eq!(summary.recovered, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.images.copied, 2);
        assert_eq!(summary.images.missing, 1);
    }
}
