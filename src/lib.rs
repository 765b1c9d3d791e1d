//! xvdl library
//!
//! URL validation, the yt-dlp bridge and the interactive driver behind the
//! `xvdl` command.

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;
