//! Engine test support utilities
//!
//! Shared by the engine's integration tests: logging bootstrap only, so
//! every test binary gets the same filter and output handling.

pub mod logging;
