//! Acoustic materials.
//!
//! A material absorbs a fraction of the incoming sound energy, differently for each of the six
//! standard octave bands (125 Hz to 4 kHz). Materials also carry a translucent display color so
//! that a viewer can show which surface is made of what.
//!
//! Faces only store a [MaterialId]; everything else is looked up in a [MaterialTable]. The six
//! presets live in a process-wide read-only table, see [standard].

use crate::{
    color::{Rgb, Rgba},
    error::{DomainError, Result},
};

/// Index into a [MaterialTable]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaterialId(pub usize);

impl MaterialId {
    pub const HARDWOOD: Self = Self(0);
    pub const CARPET: Self = Self(1);
    pub const DRYWALL: Self = Self(2);
    pub const BRICK: Self = Self(3);
    pub const CONCRETE: Self = Self(4);
    pub const FOAM: Self = Self(5);
}

/// Standard octave bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Band {
    #[display("125 Hz")]
    Hz125,
    #[display("250 Hz")]
    Hz250,
    #[display("500 Hz")]
    Hz500,
    #[display("1000 Hz")]
    Hz1000,
    #[display("2000 Hz")]
    Hz2000,
    #[display("4000 Hz")]
    Hz4000,
}

pub const BAND_COUNT: usize = 6;

impl Band {
    pub const ALL: [Band; BAND_COUNT] = [
        Band::Hz125,
        Band::Hz250,
        Band::Hz500,
        Band::Hz1000,
        Band::Hz2000,
        Band::Hz4000,
    ];

    pub const fn hz(self) -> u32 {
        match self {
            Band::Hz125 => 125,
            Band::Hz250 => 250,
            Band::Hz500 => 500,
            Band::Hz1000 => 1000,
            Band::Hz2000 => 2000,
            Band::Hz4000 => 4000,
        }
    }

    /// Only exact band center frequencies are recognized
    pub fn from_hz(hz: u32) -> Option<Band> {
        Band::ALL.into_iter().find(|band| band.hz() == hz)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl Default for Band {
    fn default() -> Self {
        Band::Hz1000
    }
}

/// Acoustic properties of a surface material.
#[derive(Debug, Clone, PartialEq)]
pub struct AcousticMaterial {
    pub name: String,
    /// Fraction of sound energy absorbed in each of [Band::ALL] (0.0 - 1.0)
    pub absorption: [f64; BAND_COUNT],
    pub color: Rgba,
}

impl AcousticMaterial {
    pub fn new(name: impl Into<String>, absorption: [f64; BAND_COUNT], color: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            absorption,
            color: Rgb::from(color).with_alpha(0.5),
        }
    }

    pub fn absorption(&self, band: Band) -> f64 {
        self.absorption[band.index()]
    }

    /// Validates that all absorption coefficients are within [0.0, 1.0]
    pub fn validate(&self) -> Result<()> {
        match self
            .absorption
            .iter()
            .find(|a| !(0.0..=1.0).contains(*a))
        {
            Some(&a) => Err(DomainError::AbsorptionOutOfRange(a)),
            None => Ok(()),
        }
    }
}

/// Material lookup table.
///
/// Lookups never fail: unknown materials or frequencies fall back to a neutral value (no
/// absorption, transparent color, empty name).
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    materials: Vec<AcousticMaterial>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a material table pre-loaded with the presets, indices match the constants of
    /// [MaterialId]
    pub fn with_presets() -> Self {
        let presets = [
            AcousticMaterial::new(
                "Hardwood",
                [0.19, 0.23, 0.25, 0.30, 0.37, 0.42],
                [0.34, 0.26, 0.01],
            ),
            AcousticMaterial::new(
                "Carpet",
                [0.03, 0.09, 0.20, 0.54, 0.70, 0.72],
                [0.23, 0.40, 0.72],
            ),
            AcousticMaterial::new(
                "Drywall",
                [0.29, 0.10, 0.05, 0.04, 0.07, 0.09],
                [0.92, 0.89, 0.78],
            ),
            AcousticMaterial::new(
                "Brick",
                [0.05, 0.04, 0.02, 0.04, 0.05, 0.05],
                [0.63, 0.09, 0.0],
            ),
            AcousticMaterial::new(
                "Concrete",
                [0.01, 0.01, 0.01, 0.02, 0.02, 0.02],
                [0.45, 0.45, 0.45],
            ),
            AcousticMaterial::new(
                "Foam",
                [0.25, 0.50, 0.85, 0.95, 0.90, 0.90],
                [0.81, 0.77, 0.10],
            ),
        ];

        Self {
            materials: presets.into(),
        }
    }

    /// Adds a material to the table and returns its id
    pub fn add(&mut self, material: AcousticMaterial) -> Result<MaterialId> {
        material.validate()?;
        self.materials.push(material);
        Ok(MaterialId(self.materials.len() - 1))
    }

    pub fn get(&self, id: MaterialId) -> Option<&AcousticMaterial> {
        self.materials.get(id.0)
    }

    /// Finds a material by its name, ignoring case
    pub fn find(&self, name: &str) -> Option<MaterialId> {
        self.materials
            .iter()
            .position(|m| m.name.eq_ignore_ascii_case(name))
            .map(MaterialId)
    }

    /// Absorption coefficient of `id` at the frequency `hz`, 0 if either is unknown
    pub fn absorption(&self, id: MaterialId, hz: u32) -> f64 {
        match (self.get(id), Band::from_hz(hz)) {
            (Some(material), Some(band)) => material.absorption(band),
            _ => 0.0,
        }
    }

    pub fn absorption_in(&self, id: MaterialId, band: Band) -> f64 {
        self.get(id).map_or(0.0, |m| m.absorption(band))
    }

    /// Display color of `id`, transparent black if unknown
    pub fn color(&self, id: MaterialId) -> Rgba {
        self.get(id).map_or(Rgba::TRANSPARENT, |m| m.color)
    }

    /// Display name of `id`, empty if unknown
    pub fn name(&self, id: MaterialId) -> &str {
        self.get(id).map_or("", |m| m.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &AcousticMaterial)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, m)| (MaterialId(i), m))
    }
}

lazy_static::lazy_static! {
    static ref STANDARD_MATERIALS: MaterialTable = MaterialTable::with_presets();
}

/// The preset table, built once
pub fn standard() -> &'static MaterialTable {
    &STANDARD_MATERIALS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        let table = standard();
        assert_eq!(table.len(), 6);
        assert_eq!(table.name(MaterialId::CONCRETE), "Concrete");
        assert_eq!(table.name(MaterialId::FOAM), "Foam");
        assert_eq!(table.absorption(MaterialId::CONCRETE, 1000), 0.02);
        assert_eq!(table.absorption(MaterialId::CARPET, 4000), 0.72);
        assert_eq!(table.absorption(MaterialId::HARDWOOD, 125), 0.19);
        assert_eq!(table.absorption_in(MaterialId::DRYWALL, Band::Hz125), 0.29);
        assert_eq!(table.color(MaterialId::BRICK).to_array(), [0.63, 0.09, 0.0, 0.5]);
        assert_eq!(table.find("foam"), Some(MaterialId::FOAM));
        assert_eq!(MaterialId::default(), MaterialId::HARDWOOD);

        for (_, material) in table.iter() {
            assert!(material.validate().is_ok());
            assert_eq!(material.color.0[3], 0.5);
        }
    }

    #[test]
    fn unknown_lookups_fall_back() {
        let table = standard();
        assert_eq!(table.absorption(MaterialId(42), 1000), 0.0);
        assert_eq!(table.absorption(MaterialId::FOAM, 1234), 0.0);
        assert_eq!(table.absorption_in(MaterialId(42), Band::Hz500), 0.0);
        assert_eq!(table.color(MaterialId(42)), Rgba::TRANSPARENT);
        assert_eq!(table.name(MaterialId(42)), "");
        assert_eq!(table.find("unobtainium"), None);
    }

    #[test]
    fn bands() {
        assert_eq!(Band::from_hz(2000), Some(Band::Hz2000));
        assert_eq!(Band::from_hz(2001), None);
        assert_eq!(Band::default().hz(), 1000);
        assert_eq!(Band::Hz4000.to_string(), "4000 Hz");
        for band in Band::ALL {
            assert_eq!(Band::from_hz(band.hz()), Some(band));
        }
    }

    #[test]
    fn custom_materials() {
        let mut table = MaterialTable::with_presets();
        let id = table
            .add(AcousticMaterial::new(
                "Curtain",
                [0.07, 0.31, 0.49, 0.75, 0.70, 0.60],
                [0.5, 0.1, 0.1],
            ))
            .unwrap();
        assert_eq!(id, MaterialId(6));
        assert_eq!(table.absorption(id, 1000), 0.75);

        let invalid = AcousticMaterial::new("Bad", [0.1, 1.5, 0.1, 0.1, 0.1, 0.1], [0.0; 3]);
        assert_eq!(
            table.add(invalid),
            Err(DomainError::AbsorptionOutOfRange(1.5))
        );
        assert_eq!(table.len(), 7);
    }
}
