// src/file/mod.rs
use std::path::Path;

use crate::error::Result;

pub mod export;
pub mod input;
pub mod settings;

pub use input::SelectedFile;

// Core trait for file operations
pub trait FileHandler<T> {
    fn load(&self, path: &Path) -> Result<T>;
    fn save(&self, data: &T, path: &Path) -> Result<()>;
}
