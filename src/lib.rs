//! Workday Balance Engine
//!
//! This crate computes employee work-time balances from daily timesheet
//! records: the signed overtime or undertime of each day against its
//! contracted workload, and monthly totals with overtime split into a 50%
//! and a 100% premium tier.
//!
//! The calculation core lives in [`calculation`] and works on validated
//! [`models::DailyRecord`]s. Text parsing and formatting of `HH:MM` values
//! is in [`clock`], rule configuration in [`config`], and the HTTP surface
//! in [`api`].

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
