// Job counts by status

use crate::view::{StatusColour, WorkItem};

/// Jobs in a view tallied by their latest status.
/// `total` also includes jobs with no status or an unrecognised one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobStatusCount {
    total: usize,
    failed: usize,
    disabled: usize,
    unstable: usize,
    successful: usize,
}

impl JobStatusCount {
    /// None when the status buckets add up to more than `total`.
    pub fn new(
        total: usize,
        failed: usize,
        disabled: usize,
        unstable: usize,
        successful: usize,
    ) -> Option<Self> {
        let bucketed = failed
            .checked_add(disabled)?
            .checked_add(unstable)?
            .checked_add(successful)?;
        if bucketed > total {
            return None;
        }

        Some(JobStatusCount {
            total,
            failed,
            disabled,
            unstable,
            successful,
        })
    }

    pub fn from_items<I: WorkItem>(items: &[&I]) -> Self {
        let mut count = JobStatusCount {
            total: items.len(),
            ..Default::default()
        };

        for item in items {
            if let Some(status) = item.current_status() {
                count.add(status);
            }
        }

        count
    }

    fn add(&mut self, status: StatusColour) {
        match status {
            StatusColour::Success => self.successful += 1,
            StatusColour::Unstable => self.unstable += 1,
            StatusColour::Failed => self.failed += 1,
            StatusColour::Disabled => self.disabled += 1,
            StatusColour::Other => {}
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn disabled(&self) -> usize {
        self.disabled
    }

    pub fn unstable(&self) -> usize {
        self.unstable
    }

    pub fn successful(&self) -> usize {
        self.successful
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn has_unstable(&self) -> bool {
        self.unstable > 0
    }

    pub fn has_disabled(&self) -> bool {
        self.disabled > 0
    }

    pub fn all_ok(&self) -> bool {
        !(self.has_failures() || self.has_unstable() || self.has_disabled())
    }
}
