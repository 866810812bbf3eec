//! Groundwater monitoring dashboard for India's DWLR network.
//!
//! Station data is synthetic: a small registry of real seed stations is
//! extended to a network-sized dataset in-process. On top of that dataset
//! the crate computes statistics, filters and exports station selections,
//! renders role-specific dashboard views, and keeps a toy local account
//! store for sign-in.

pub mod config;
pub mod dashboards;
pub mod export;
pub mod filter;
pub mod generator;
pub mod logging;
pub mod model;
pub mod session;
pub mod stations;
pub mod statistics;
