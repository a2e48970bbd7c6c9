use std::{
    io::Write,
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use dbmap::{
    formulas::RoomStatistics,
    material,
    math::{transform::Transform, vec::Vec3},
    mesh::{FaceSelection, Mesh},
    tracer::{RayTracer, SegmentMap, TraceConfig, TraceControl},
    utils::{counter, timer::timed_scope_log},
};

use crate::{progress::Progress, utils::FaceMaterial, Args};

pub struct Runner {
    pub mesh: Mesh,
    pub source: Option<Vec3>,
    pub config: TraceConfig,
    pub timeout: Option<Duration>,
}

impl Runner {
    pub fn from_args(args: Args) -> Result<Self> {
        let face_material = args.material.map(|m| m.0).unwrap_or_default();

        let mut mesh = match &args.mesh {
            Some(path) => timed_scope_log("load mesh", || {
                dbmap::loader::load_obj(path, Transform::scaled(args.scale), face_material)
            })
            .res
            .with_context(|| format!("cannot use {path:?} as a room"))?,
            None => {
                log::info!("using the built-in {:?} scene", args.scene);
                args.scene
                    .build(face_material)
                    .context("cannot build the built-in scene")?
            }
        };
        log::info!(
            "room: {} faces of {}",
            mesh.len(),
            material::standard().name(face_material)
        );
        for &FaceMaterial { face, material: id } in &args.face_materials {
            if mesh.assign_material(FaceSelection::One(face), id) == 0 {
                bail!("cannot set the material of face {face}, the room has {} faces", mesh.len());
            }
            log::info!("face {face}: {}", material::standard().name(id));
        }

        let seed = args.seed.unwrap_or_else(rand::random);
        log::info!("seed: {seed}");

        let config = TraceConfig::builder()
            .rays(args.rays)
            .level(args.level)
            .band(args.frequency.0)
            .reflections(args.reflections)
            .samples(args.samples)
            .energy_model(args.energy_model.into())
            .seed(seed)
            .execution_mode(args.execution_mode.into())
            .build()
            .context("invalid trace parameters")?;
        let timeout = args
            .timeout
            .map(Duration::try_from_secs_f64)
            .transpose()
            .context("invalid timeout")?;

        Ok(Self {
            mesh,
            source: args.source.map(|p| p.0),
            config,
            timeout,
        })
    }

    pub fn run(self) -> Result<()> {
        let stats = timed_scope_log("room statistics", || RoomStatistics::compute(&self.mesh)).res;
        report_statistics(&stats);

        let source = self
            .source
            .or(stats.center)
            .context("no source position and no face to center it on")?;
        log::info!("source at ({:.3}, {:.3}, {:.3})", source.x, source.y, source.z);

        let mut control = TraceControl::new();
        if let Some(timeout) = self.timeout {
            control = control.with_timeout(timeout);
        }

        let tracer = RayTracer::new(&self.mesh, source, self.config.clone());
        let map = timed_scope_log("trace", || trace_with_progress(&tracer, &control)).res;
        report_trace(&map);

        counter::report_counters();
        Ok(())
    }
}

fn trace_with_progress(tracer: &RayTracer, control: &TraceControl) -> SegmentMap {
    let max = tracer.config.max_rays();
    let done = AtomicBool::new(false);

    std::thread::scope(|s| {
        s.spawn(|| {
            while !done.load(Ordering::Acquire) {
                std::thread::sleep(Duration::from_millis(300));
                let progress = Progress {
                    current: control.processed(),
                    max,
                };
                print!("\r{progress}");
                let _ = std::io::stdout().flush();
            }
            println!(
                "\r{}",
                Progress {
                    current: control.processed(),
                    max: control.processed(),
                }
            );
        });

        let map = tracer.trace_with(control);
        done.store(true, Ordering::Release);
        map
    })
}

fn report_statistics(stats: &RoomStatistics) {
    log::info!("volume: {:.3} m³", stats.volume);
    log::info!("surface area: {:.3} m²", stats.surface_area);
    match &stats.rt60 {
        Ok(rt60) => log::info!("RT60: {rt60:.3} s"),
        Err(err) => log::warn!("no RT60: {err}"),
    }
    match &stats.crit_dist {
        Ok(crit_dist) => log::info!("critical distance: {crit_dist:.3} m"),
        Err(err) => log::warn!("no critical distance: {err}"),
    }
}

fn report_trace(map: &SegmentMap) {
    if let Some(interruption) = map.interruption {
        log::warn!("trace {interruption}, the results are partial");
    }
    log::info!(
        "{} segments from {} primary rays, {} escaped",
        map.len(),
        map.primary,
        map.escaped
    );
    if let Some(max) = map.max_level() {
        log::info!("loudest arrival: {max:.3} dB");
    }
    log::info!("total level: {:.3} dB", map.sum_level());

    let mut depth = 0;
    loop {
        let count = map.by_depth(depth).count();
        if count == 0 {
            break;
        }
        let level = dbmap::formulas::sum_levels(map.by_depth(depth).map(|s| s.level));
        log::info!("  depth {depth}: {count} segments, {level:.3} dB");
        depth += 1;
    }
}
