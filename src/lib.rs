pub mod bookmarks;
pub mod cli;
pub mod commands;
pub mod utils;
