//! Display implementations for write and import outcomes.

use std::fmt;

use crate::repository::{ImportOutcome, WriteOutcome};

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_complete() {
            write!(
                f,
                "Intervention written with {} detail(s).",
                self.details_total
            )
        } else if self.parent_written {
            write!(
                f,
                "Partial write: intervention stored, {}/{} detail(s) written. \
                 The remaining details were not rolled back and must be re-added.",
                self.details_written, self.details_total
            )
        } else {
            write!(f, "Write failed: intervention was not stored.")
        }
    }
}

impl fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Imported {}/{} intervention(s).",
            self.written, self.attempted
        )
    }
}
