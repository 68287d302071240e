//! `navguard-core`: client session primitives shared by the guard crates.
//!
//! This crate only models *what is stored* (token, theme) and *where* it is
//! stored. It knows nothing about claims or routes.

pub mod error;
pub mod storage;
pub mod theme;
pub mod token;

pub use error::{StorageError, StorageResult};
pub use storage::{MemoryStorage, SessionStorage, THEME_KEY, TOKEN_KEY};
pub use theme::{Theme, ThemePreference};
pub use token::SessionToken;
