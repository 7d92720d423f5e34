//! Display formatting for interventions, details, and calendar views.
//!
//! Domain models stay presentation-free; everything user-facing is
//! formatted here through newtype wrappers implementing
//! [`std::fmt::Display`]. All wrappers emit markdown so the CLI can
//! render rich or plain output from the same strings.
//!
//! - [`datetime`]: local time zone date/time newtype
//! - [`models`]: Display implementations for the domain models
//! - [`collections`]: wrappers for lists of interventions and details
//! - [`calendar`]: the month-grid view
//! - [`results`]: write/import outcome messages

pub mod calendar;
pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use calendar::MonthView;
pub use collections::{DetailList, InterventionList};
pub use datetime::LocalDateTime;
