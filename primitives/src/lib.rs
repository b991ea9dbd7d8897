//! Shared primitives for the universal token router: asset references,
//! balance type, and the byte-level payload conventions.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod assets;
pub mod ecosystem;

pub use assets::*;
pub use ecosystem::*;
