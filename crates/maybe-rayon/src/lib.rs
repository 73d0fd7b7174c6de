//! A thin layer over `rayon` so that the same call sites compile with and without the
//! `concurrent` feature. Without it, every "parallel" iterator is an ordinary sequential one.

#[cfg(feature = "concurrent")]
pub mod concurrent;
#[cfg(feature = "concurrent")]
pub use concurrent::*;

#[cfg(not(feature = "concurrent"))]
pub mod sequential;
#[cfg(not(feature = "concurrent"))]
pub use sequential::*;
