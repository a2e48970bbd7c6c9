//! Error types for dbmap

use std::path::PathBuf;

use thiserror::Error;

/// A value fell outside the domain of a formula.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("distances from the source must be positive (got {d1} and {d2})")]
    NonPositiveDistance { d1: f64, d2: f64 },

    #[error("total absorption is zero, the room never decays")]
    ZeroAbsorption,

    #[error("cannot normalize a zero-length vector")]
    ZeroLengthVector,

    #[error("volume must be positive (got {0})")]
    NonPositiveVolume(f64),

    #[error("absorption coefficients must be between 0.0 and 1.0 (got {0})")]
    AbsorptionOutOfRange(f64),

    #[error("a trace could cast up to {max_rays} rays, the limit is {limit}")]
    TooManyRays { max_rays: usize, limit: usize },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to load OBJ file {path:?}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("model {0:?} has a vertex count that is not a multiple of 3")]
    MalformedPositions(String),

    #[error("no usable triangle in {0:?}")]
    Empty(PathBuf),
}

pub type Result<T> = std::result::Result<T, DomainError>;
