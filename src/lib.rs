//! student-signup - multi-step student registration wizard for the terminal
//!
//! The binary drives these modules; integration tests use them directly.

pub mod app;
pub mod config;
pub mod logging;
pub mod registration;
pub mod submission;
pub mod ui;
pub mod wizard;
