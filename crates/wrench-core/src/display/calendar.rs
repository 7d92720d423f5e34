//! Month-grid calendar view.

use std::fmt;

use jiff::civil::Date;

use crate::calendar::{month_grid, CalendarIndex};
use crate::error::Result;

/// Markdown month view over a calendar index.
///
/// Renders a Monday-first grid; each day cell shows the day number and,
/// when interventions exist for that day, their count.
pub struct MonthView<'a> {
    year: i16,
    month: i8,
    grid: Vec<Option<Date>>,
    index: &'a CalendarIndex,
}

impl<'a> MonthView<'a> {
    /// Builds the view for one month.
    ///
    /// # Errors
    ///
    /// Fails when `year`/`month` do not name a valid month.
    pub fn new(year: i16, month: i8, index: &'a CalendarIndex) -> Result<Self> {
        Ok(Self {
            year,
            month,
            grid: month_grid(year, month)?,
            index,
        })
    }
}

impl fmt::Display for MonthView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {:04}-{:02}", self.year, self.month)?;
        writeln!(f)?;
        writeln!(f, "| Mo | Tu | We | Th | Fr | Sa | Su |")?;
        writeln!(f, "|----|----|----|----|----|----|----|")?;
        for week in self.grid.chunks(7) {
            write!(f, "|")?;
            for cell in week {
                match cell {
                    Some(date) => {
                        let count = self.index.bucket(*date).len();
                        if count > 0 {
                            write!(f, " {} ({count}) |", date.day())?;
                        } else {
                            write!(f, " {} |", date.day())?;
                        }
                    }
                    None => write!(f, "    |")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
