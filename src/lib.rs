//! Random meme generator for the terminal.
//!
//! Fetches a random meme template, lets the user overlay top/bottom captions
//! and exports the composition as `meme.png`.

pub mod capture;
pub mod clipboard;
pub mod config;
pub mod logging;
pub mod meme;
pub mod ui;
