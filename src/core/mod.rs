pub mod bootstrap;
pub mod config;
pub mod download;
pub mod extractor;
pub mod info;
pub mod quality;
pub mod url;
pub mod ytdlp;
