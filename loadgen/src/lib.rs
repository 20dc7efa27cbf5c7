//! Building blocks for the `loadgen` binary: scenario definitions, weighted
//! task scheduling, the simulated-user loop, and per-label statistics. The
//! binary is the intended interface; these modules are public so integration
//! tests can drive single users directly.

pub mod cli;
pub mod client;
pub mod runner;
pub mod scenario;
pub mod schedule;
pub mod statistics;
pub mod user;
