#![cfg_attr(not(test), no_std)]

mod traits;
pub use traits::*;
