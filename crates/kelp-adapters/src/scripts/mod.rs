//! Host script adapters.

mod file;

pub use file::FileScriptPatcher;
