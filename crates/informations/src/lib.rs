//! `fieldintel-informations` — the records domain.
//!
//! An "information" is a field observation (competitor activity, market
//! signal) tagged with a business unit. Records are created once and then
//! only ever listed; the listing predicates are built here.

pub mod filter;
pub mod record;

pub use filter::{DatePredicate, InformationFilter, ListParams};
pub use record::{Information, NewInformation};
