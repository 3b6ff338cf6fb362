//! # stubcfg common library
//!
//! Configuration core for stub/track extraction jobs:
//! - Stub-window profiles and their aliases
//! - Production flags and their effective values
//! - Stage dependency resolution against upstream availability
//! - Extractor parameter block and tracking-particle cuts
//! - Job file loading and process assembly

pub mod config;
pub mod error;
pub mod flags;
pub mod params;
pub mod process;
pub mod schedule;
pub mod windows;

pub use config::JobConfig;
pub use error::{Error, Result};
pub use flags::ProductionFlags;
pub use process::ProcessConfig;
pub use schedule::{resolve, ResolvedSchedule, Stage, UpstreamAvailability};
pub use windows::{stub_windows, StubWindowProfile, StubWindows};
