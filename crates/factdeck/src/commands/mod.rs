pub mod completion;
pub mod config;
pub mod list;
pub mod version;
