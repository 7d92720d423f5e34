//! Data models for interventions and their operation details.
//!
//! This module contains the core domain models of the maintenance
//! tracker. Display implementations live in [`crate::display`] to keep
//! data structures and presentation separate.
//!
//! The status state machine accepts every transition; see
//! [`transition`] for the single point where that policy lives.

pub mod detail;
pub mod intervention;
pub mod status;


pub use detail::InterventionDetail;
pub use intervention::Intervention;
pub use status::{transition, InterventionStatus};
