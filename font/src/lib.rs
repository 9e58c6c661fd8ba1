// font/src/lib.rs

#![no_std]

pub mod classic;
pub mod error;
pub mod table;

pub use error::{FontError, Result};
pub use table::{FontTable, RemoteGlyph};
