//! Unit tests for the restore handler and its building blocks.
//!
//! Hosts are replaced by recording doubles so each test can count the
//! alerts, requests and UI flag changes a submission produced.

mod config_tests;
mod display_tests;
mod mock;
