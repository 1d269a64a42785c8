//! pcmwav CLI library.
//!
//! Command implementations for the `pcmwav` binary. Each command is a thin
//! wrapper over the `pcmwav` read and write entry points.

pub mod commands;
