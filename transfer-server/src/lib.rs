//! Constrained transfer resolution for transit routing.
//!
//! Operator-supplied transfer rules (guaranteed connections, stay-seated
//! through-services, forbidden connections and minimum transfer times) are
//! indexed per trip pattern when the data is loaded, and queried by the
//! journey search whenever a rider changes trips.

pub mod config;
pub mod data;
pub mod domain;
pub mod timetable;
pub mod transfer;
pub mod web;
