mod progress;
mod runner;
mod utils;

use std::path::PathBuf;

use clap::Parser;
use runner::Runner;
use utils::{
    parse_level, parse_positive, AvailableEnergyModel, AvailableExecutionMode, AvailableScene,
    FaceMaterial, Frequency, Material, Point,
};

#[derive(Parser, Debug)]
/// Traces sound rays through a room and reports its decibel map and reverberation statistics
pub struct Args {
    /// OBJ file of the room. Without it, a built-in scene is used
    mesh: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    /// Built-in scene, when no mesh is given
    scene: AvailableScene,

    #[arg(long, default_value_t = 1.0, value_parser = parse_positive)]
    /// Uniform scale applied to the mesh
    scale: f64,

    #[arg(short, long)]
    /// Material of every face, by name (Hardwood, Carpet, Drywall, Brick, Concrete or Foam).
    /// Defaults to Hardwood
    material: Option<Material>,

    #[arg(long = "face-material", value_name = "INDEX=NAME")]
    /// Material of a single face, applied after --material. Can be repeated
    face_materials: Vec<FaceMaterial>,

    #[arg(long)]
    /// Source position as `x,y,z`, defaults to the center of the room
    source: Option<Point>,

    #[arg(short, long, default_value_t = 120.0, value_parser = parse_level)]
    /// Source level, in dB, between 0 and 120
    level: f64,

    #[arg(short, long, default_value = "1000")]
    /// Octave band, in Hz
    frequency: Frequency,

    #[arg(short, long, default_value_t = 0)]
    /// Maximum number of reflections of a ray
    reflections: u32,

    #[arg(long, default_value_t = 1000)]
    /// Rays emitted by the source
    rays: usize,

    #[arg(long, default_value_t = 100)]
    /// Scattered rays per reflection
    samples: usize,

    #[arg(long, value_enum, default_value_t)]
    energy_model: AvailableEnergyModel,

    #[arg(short, long, value_enum, default_value_t)]
    execution_mode: AvailableExecutionMode,

    #[arg(long)]
    /// Seed to use for all the random stuff, picked at random when absent.
    /// Given a seed, the trace is deterministic.
    seed: Option<u64>,

    #[arg(long, value_parser = parse_positive)]
    /// Stop the trace after this many seconds and report what was traced so far
    timeout: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    log::debug!("{args:?}");

    let runner = Runner::from_args(args)?;
    runner.run()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use dbmap::material::MaterialId;

    use super::*;

    #[test]
    fn args() {
        Args::command().debug_assert();

        let args = Args::parse_from([
            "dbmap",
            "room.obj",
            "--source",
            "1,2,3",
            "-f",
            "250",
            "-m",
            "foam",
            "--seed",
            "4",
        ]);
        assert_eq!(args.mesh, Some(PathBuf::from("room.obj")));
        assert_eq!(args.source.map(|p| p.0), Some(dbmap::math::vec::Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(args.frequency.0.hz(), 250);
        assert_eq!(args.seed, Some(4));
        assert_eq!(args.rays, 1000);
        assert_eq!(args.level, 120.0);

        assert!(Args::try_parse_from(["dbmap", "-f", "300"]).is_err());
        assert!(Args::try_parse_from(["dbmap", "--level", "130"]).is_err());
        assert!(Args::try_parse_from(["dbmap", "--timeout=-1"]).is_err());
        assert!(Args::try_parse_from(["dbmap", "--timeout", "0"]).is_err());
        assert!(Args::try_parse_from(["dbmap", "--scale=-1"]).is_err());
        assert!(Args::try_parse_from(["dbmap", "--face-material", "2"]).is_err());
    }

    #[test]
    fn face_materials() {
        let args = Args::parse_from([
            "dbmap",
            "-m",
            "brick",
            "--face-material",
            "0=Foam",
            "--face-material",
            "5=carpet",
            "--rays",
            "10",
        ]);
        let runner = Runner::from_args(args).unwrap();
        let materials: Vec<_> = runner.mesh.iter().map(|f| f.material).collect();
        assert_eq!(materials[0], MaterialId::FOAM);
        assert_eq!(materials[5], MaterialId::CARPET);
        assert_eq!(
            materials.iter().filter(|&&m| m == MaterialId::BRICK).count(),
            10
        );

        let args = Args::parse_from(["dbmap", "--face-material", "12=Foam"]);
        assert!(Runner::from_args(args).is_err());
    }

    #[test]
    fn timeout() {
        let args = Args::parse_from(["dbmap", "--timeout", "2.5", "--rays", "10"]);
        let runner = Runner::from_args(args).unwrap();
        assert_eq!(runner.timeout, Some(std::time::Duration::from_millis(2500)));
    }

    #[test]
    fn too_many_rays() {
        let args = Args::parse_from(["dbmap", "-r", "6"]);
        assert!(Runner::from_args(args).is_err());
    }

    #[test]
    fn runs_on_a_built_in_scene() {
        let args = Args::parse_from(["dbmap", "--rays", "50", "-r", "1", "--samples", "3"]);
        let runner = Runner::from_args(args).unwrap();
        assert_eq!(runner.mesh.len(), 12);
        assert_eq!(runner.config.max_rays(), 50 + 50 * 4);
        runner.run().unwrap();
    }
}
