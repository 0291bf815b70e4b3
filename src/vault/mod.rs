//! Vault module - loading and saving a directory of notes

mod error;
mod loader;

pub use error::VaultError;
pub use loader::{read_markdown_directory, save_files};
