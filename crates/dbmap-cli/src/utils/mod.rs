use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use clap::ValueEnum;
use dbmap::{
    error::Result as DomainResult,
    formulas::MAX_DISPLAY_LEVEL,
    material::{self, Band, MaterialId},
    math::vec::Vec3,
    mesh::Mesh,
    reflection::EnergyModel,
    scene::examples::{shoebox, unit_cube},
    tracer::ExecutionMode,
};

/// A point given as `x,y,z`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point(pub Vec3);

impl FromStr for Point {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coords = s
            .split(',')
            .map(|c| c.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("invalid coordinates in {s:?}"))?;
        match coords[..] {
            [x, y, z] => Ok(Point(Vec3::new(x, y, z))),
            _ => bail!("expected 3 comma separated coordinates, got {s:?}"),
        }
    }
}

/// One of the standard octave bands, given in Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frequency(pub Band);

impl FromStr for Frequency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hz = s
            .trim()
            .trim_end_matches("Hz")
            .trim()
            .parse::<u32>()
            .with_context(|| format!("invalid frequency {s:?}"))?;
        Band::from_hz(hz).map(Frequency).ok_or_else(|| {
            anyhow!("{hz} Hz is not one of 125, 250, 500, 1000, 2000 or 4000 Hz")
        })
    }
}

/// A preset material, by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Material(pub MaterialId);

impl FromStr for Material {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let table = material::standard();
        table.find(s.trim()).map(Material).ok_or_else(|| {
            let names: Vec<_> = table.iter().map(|(_, m)| m.name.as_str()).collect();
            anyhow!("unknown material {s:?}, expected one of {}", names.join(", "))
        })
    }
}

/// A preset material for a single face, given as `INDEX=NAME`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceMaterial {
    pub face: usize,
    pub material: MaterialId,
}

impl FromStr for FaceMaterial {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (face, name) = s
            .split_once('=')
            .with_context(|| format!("expected INDEX=NAME, got {s:?}"))?;
        let face = face
            .trim()
            .parse()
            .with_context(|| format!("invalid face index in {s:?}"))?;
        let Material(material) = name.parse::<Material>()?;
        Ok(FaceMaterial { face, material })
    }
}

/// Source level in dB, between 0 and the loudest displayable level
pub fn parse_level(s: &str) -> anyhow::Result<f64> {
    let level: f64 = s
        .trim()
        .parse()
        .with_context(|| format!("invalid level {s:?}"))?;
    if !(0.0..=MAX_DISPLAY_LEVEL).contains(&level) {
        bail!("the level must be between 0 and {MAX_DISPLAY_LEVEL} dB, got {level}");
    }
    Ok(level)
}

/// A finite number strictly greater than zero
pub fn parse_positive(s: &str) -> anyhow::Result<f64> {
    let value: f64 = s
        .trim()
        .parse()
        .with_context(|| format!("invalid number {s:?}"))?;
    if !(value.is_finite() && value > 0.0) {
        bail!("expected a positive number, got {value}");
    }
    Ok(value)
}

#[derive(Debug, Default, Clone, Copy, ValueEnum)]
pub enum AvailableScene {
    #[default]
    /// 1 m cube
    Cube,
    /// 5 x 4 x 3 m room
    Shoebox,
}

impl AvailableScene {
    pub fn build(self, material: MaterialId) -> DomainResult<Mesh> {
        match self {
            AvailableScene::Cube => unit_cube(material),
            AvailableScene::Shoebox => shoebox(Vec3::new(5.0, 4.0, 3.0), material),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, ValueEnum)]
pub enum AvailableEnergyModel {
    #[default]
    Reference,
    Clamped,
}

impl From<AvailableEnergyModel> for EnergyModel {
    fn from(val: AvailableEnergyModel) -> Self {
        match val {
            AvailableEnergyModel::Reference => EnergyModel::Reference,
            AvailableEnergyModel::Clamped => EnergyModel::Clamped,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, ValueEnum)]
pub enum AvailableExecutionMode {
    Monothreaded,
    #[default]
    Multithreaded,
}

impl From<AvailableExecutionMode> for ExecutionMode {
    fn from(val: AvailableExecutionMode) -> Self {
        match val {
            AvailableExecutionMode::Monothreaded => ExecutionMode::Monothreaded,
            AvailableExecutionMode::Multithreaded => ExecutionMode::Multithreaded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points() {
        assert_eq!(
            "1, 2.5,-3".parse::<Point>().unwrap(),
            Point(Vec3::new(1.0, 2.5, -3.0))
        );
        assert!("1,2".parse::<Point>().is_err());
        assert!("1,2,3,4".parse::<Point>().is_err());
        assert!("1,a,3".parse::<Point>().is_err());
    }

    #[test]
    fn frequencies() {
        assert_eq!("500".parse::<Frequency>().unwrap(), Frequency(Band::Hz500));
        assert_eq!("4000 Hz".parse::<Frequency>().unwrap(), Frequency(Band::Hz4000));
        assert!("440".parse::<Frequency>().is_err());
        assert!("loud".parse::<Frequency>().is_err());
    }

    #[test]
    fn materials() {
        assert_eq!(
            "carpet".parse::<Material>().unwrap(),
            Material(MaterialId::CARPET)
        );
        let err = "glass".parse::<Material>().unwrap_err().to_string();
        assert!(err.contains("Hardwood"));
    }

    #[test]
    fn face_materials() {
        assert_eq!(
            "3=Foam".parse::<FaceMaterial>().unwrap(),
            FaceMaterial {
                face: 3,
                material: MaterialId::FOAM
            }
        );
        assert_eq!(
            " 0 = brick".parse::<FaceMaterial>().unwrap().material,
            MaterialId::BRICK
        );
        assert!("Foam".parse::<FaceMaterial>().is_err());
        assert!("-1=Foam".parse::<FaceMaterial>().is_err());
        assert!("2=glass".parse::<FaceMaterial>().is_err());
    }

    #[test]
    fn levels() {
        assert_eq!(parse_level("0").unwrap(), 0.0);
        assert_eq!(parse_level("94.5").unwrap(), 94.5);
        assert_eq!(parse_level("120").unwrap(), 120.0);
        assert!(parse_level("130").is_err());
        assert!(parse_level("-3").is_err());
        assert!(parse_level("NaN").is_err());
    }

    #[test]
    fn positive_numbers() {
        assert_eq!(parse_positive("0.5").unwrap(), 0.5);
        assert!(parse_positive("0").is_err());
        assert!(parse_positive("-1").is_err());
        assert!(parse_positive("inf").is_err());
        assert!(parse_positive("NaN").is_err());
    }

    #[test]
    fn scenes() {
        assert_eq!(AvailableScene::Cube.build(MaterialId::FOAM).unwrap().len(), 12);
        assert_eq!(AvailableScene::Shoebox.build(MaterialId::FOAM).unwrap().len(), 12);
    }
}
