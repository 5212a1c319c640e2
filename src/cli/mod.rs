//! CLI support for the `faceseek` binary.

pub mod commands;
