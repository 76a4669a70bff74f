//! # Empirical Path Loss Models
//!
//! `hata` provides the closed-form, log-distance propagation models used
//! for macro-cell planning: Okumura-Hata for the 150–1500 MHz band,
//! COST-231-Hata above it, and a free-space reference. All models are
//! log-linear in distance, so their inverse (maximum distance for a given
//! loss) is algebraic.

mod error;
mod model;

pub use crate::{
    error::ModelError,
    model::{Environment, ModelVariant, PathLossModel, PathLossModelBuilder},
};

/// Default base-station antenna height in meters.
pub const DEFAULT_BASE_HEIGHT_M: f64 = 30.0;

/// Default mobile antenna height in meters.
pub const DEFAULT_MOBILE_HEIGHT_M: f64 = 1.5;
