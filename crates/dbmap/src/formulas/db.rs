use crate::{
    color::Rgb,
    error::{DomainError, Result},
    material::{self, Band, MaterialTable},
    shape::Face,
};

/// Sabine constant, in s/m
const SABINE: f64 = 0.161;
/// Loudest level mapped to a color
pub const MAX_DISPLAY_LEVEL: f64 = 120.0;

/// Level change, in dB, of a spherical wave going from distance `d1` to `d2` of its source:
/// $20 \log_{10}(d_1 / d_2)$.
///
/// Moving away is negative, doubling the distance loses about 6 dB.
pub fn drop_off(d1: f64, d2: f64) -> Result<f64> {
    if d1 <= 0.0 || d2 <= 0.0 {
        return Err(DomainError::NonPositiveDistance { d1, d2 });
    }
    Ok(20.0 * f64::log10(d1 / d2))
}

/// Energetic sum of levels: $10 \log_{10} \sum 10^{L/10}$.
///
/// Only strictly positive levels count. Without any, the sum is 0 dB.
pub fn sum_levels<I: IntoIterator<Item = f64>>(levels: I) -> f64 {
    let energy: f64 = levels
        .into_iter()
        .filter(|&l| l > 0.0)
        .map(|l| f64::powf(10.0, l / 10.0))
        .sum();

    if energy > 0.0 {
        10.0 * f64::log10(energy)
    } else {
        0.0
    }
}

/// Reverberation time at 1000 Hz with the preset materials, see [rt60_with]
pub fn rt60(volume: f64, faces: &[Face]) -> Result<f64> {
    rt60_with(volume, faces, material::standard(), Band::Hz1000)
}

/// Sabine reverberation time, in seconds: $0.161 V / \sum_i S_i \alpha_i$
pub fn rt60_with(volume: f64, faces: &[Face], table: &MaterialTable, band: Band) -> Result<f64> {
    let absorption: f64 = faces
        .iter()
        .map(|f| f.surface_area * table.absorption_in(f.material, band))
        .sum();

    if absorption <= 0.0 {
        return Err(DomainError::ZeroAbsorption);
    }
    Ok(SABINE * volume / absorption)
}

/// Distance to the source where direct and reverberant fields are equally loud:
/// $0.057 \sqrt{V / RT_{60}}$
pub fn crit_dist(volume: f64, faces: &[Face]) -> Result<f64> {
    if volume <= 0.0 {
        return Err(DomainError::NonPositiveVolume(volume));
    }
    let rt60 = rt60(volume, faces)?;
    Ok(0.057 * f64::sqrt(volume / rt60))
}

/// Maps a level to a color, from cyan at 0 dB to red at 120 dB, clamping outside of that range.
pub fn db_to_color(level: f64) -> Rgb {
    let level = if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, MAX_DISPLAY_LEVEL)
    };
    let hue_degrees = (level - MAX_DISPLAY_LEVEL) * -1.5;
    Rgb::from_hsv((hue_degrees / 360.0) as f32, 1.0, 1.0)
}
