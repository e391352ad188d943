//! `x4tools` is a small toolkit for turning EXFOR nuclear reaction data into
//! a compact SQLite database
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use x4tools_x4 as x4;

#[doc(inline)]
pub use x4tools_normalise as normalise;

#[cfg(feature = "build")]
#[cfg_attr(docsrs, doc(cfg(feature = "build")))]
#[doc(inline)]
pub use x4tools_build as build;
