//! Quote costing engine for cleaning services.
//!
//! This crate prices cleaning-services quotes: rostered shifts are costed
//! against award rates (Cleaning Services Award 2020, MA000022) with
//! penalty, night and overtime multipliers, subcontracted services are
//! normalised to a monthly cost, and overhead and margin percentages
//! produce the client price.
//!
//! The costing functions in [`calculation`] are pure. The [`api`] module
//! exposes them over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
