//! Follower snapshot catalog and comparison.
//!
//! Snapshots of an account's follower and following lists are stored as
//! JSON files named `{account}_data_{YYYYMMDDHHMM}.json`. The
//! [`store::catalog`] module finds and orders them, [`store::diff`] compares
//! two of them, and [`report`] renders the result.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod snapshot;
pub mod store;

pub use error::{Error, Result};
