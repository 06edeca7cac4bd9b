//! Authentication state for the dashboard.
//!
//! This module provides:
//! - `TokenStore`: get/set/clear of the two bearer tokens, with a file-backed
//!   (`FileTokenStore`) and an in-process (`MemoryTokenStore`) implementation
//! - `Session`: the token state handed to the API client at startup
//!
//! No expiry is tracked locally. A stale access token is only discovered when
//! the server rejects a request with it.

pub mod session;
pub mod store;

pub use session::{Session, TokenPair};
pub use store::{FileTokenStore, MemoryTokenStore, TokenKind, TokenStore, TokenStoreError};
