//! Premium Leave Engine
//!
//! This crate reads employee spreadsheets exported by public-sector HR
//! departments, interprets the free-text premium-leave schedules they carry
//! and classifies every employee by how urgently their remaining leave must be
//! planned before retirement.
//!
//! The usual entry point is [`batch::process_batch`], which detects the sheet
//! format, resolves canonical fields, expands schedules into monthly
//! [`models::LeavePeriod`]s, classifies urgency and aggregates statistics.

#![warn(missing_docs)]

pub mod batch;
pub mod classification;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod schedule;
