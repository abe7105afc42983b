pub mod base;

pub use base::PageConfig;
