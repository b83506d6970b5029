//! # API Module
//!
//! Business logic and data processing on top of the record store. The
//! presentation layer consumes these modules and nothing else; the store
//! itself is never reached from outside [service::PetManagerService].
//!
//! ## Modules
//!
//! - [`service`] - The domain service: in-memory mirror, mutations, derived queries
//! - [`pet`] - Pet list/card projections
//! - [`reminder`] - Reminder bucketing for the reminders and home views

pub mod pet;
pub mod reminder;
pub mod service;
