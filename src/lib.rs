// src/lib.rs

//! Workspace facade: re-exports [`regnorm_core`] so the demos can use a
//! single `regnorm_rs::prelude::*` import.

pub use regnorm_core::*;

pub mod prelude {
    pub use regnorm_core::prelude::*;
    pub use regnorm_core::{RegionError, Result};
}
