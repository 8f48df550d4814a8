//! Matching module containing the two-phase engine and its component phases

pub mod core;
pub mod exact;
pub mod fuzzy;
pub mod similarity;

mod aggregate;

pub use core::*;
pub use exact::*;
pub use fuzzy::*;
pub use similarity::*;
