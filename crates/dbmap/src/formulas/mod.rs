//! Room level aggregates: decibel arithmetic, geometry of a closed mesh and the Sabine based
//! reverberation statistics.

pub mod db;
pub mod geometric;
mod statistics;

pub use db::{
    crit_dist, db_to_color, drop_off, rt60, rt60_with, sum_levels, MAX_DISPLAY_LEVEL,
};
pub use geometric::{center, signed_volume, surface_area, triangle_area, triangle_center, volume};
pub use statistics::RoomStatistics;
