//! sdkgen - RPC client SDK stub generator
//!
//! Scans command-definition headers and writes Python, Go or C# client stubs
//! (or the extracted metadata as JSON Lines).

pub mod cli;
pub mod setup;
