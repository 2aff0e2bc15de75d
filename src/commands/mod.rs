//! CLI command implementations for scandelta operations.
//!
//! Each submodule handles one command with its configuration and
//! execution logic. Commands own all I/O (reading snapshot files,
//! writing reports); the comparison engine itself stays pure.
//!
//! Available commands:
//! - **compare**: Compare a baseline scan analysis against a follow-up
//! - **inspect**: Summarize a single scan result file
//! - **init**: Initialize a new scandelta configuration file

pub mod compare;
pub mod init;
pub mod inspect;

pub use compare::{compare_scans, CompareConfig};
pub use init::init_config;
pub use inspect::{inspect_result, InspectConfig};
