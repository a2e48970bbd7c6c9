//! The acoustic raytracer.
//!
//! Rays leave the source, bounce around the mesh and lose level on the way: with distance
//! (inverse square law) and on every hit (absorption of the material). Each leg of a ray is
//! recorded as a colored [Segment].
//!
//! Rays are processed one reflection depth (a wave) at a time. Every ray draws its randomness
//! from an rng seeded by `(seed, depth, index in the wave)`, so the output does not depend on the
//! [ExecutionMode].

mod config;
mod control;
mod segments;

pub use config::{Emission, ExecutionMode, TraceConfig, TraceConfigBuilder};
pub use control::{Interruption, TraceControl};
pub use segments::{LineVertex, Segment, SegmentMap, VertexBuffer};

use rayon::prelude::*;

use crate::{
    formulas::{db_to_color, drop_off},
    material::{self, MaterialTable},
    math::{float::FloatAsExt, vec::Vec3},
    mesh::Mesh,
    ray::Ray,
    reflection::{BrdfReflector, Reflector},
    sampler::HemisphereSampler,
    shape::{IntersectionResult, Shape},
    utils::{
        counter::counter,
        log_once::{error_once, warn_once},
        timer::timed_scope_accumulate,
    },
    Seed,
};

/// Rays handled between two checks of the [TraceControl]
const CHUNK_SIZE: usize = 1024;

const PRIMARY_STREAM: u32 = 0;
const REFLECTION_STREAM: u32 = 1;

enum Outcome {
    Escaped,
    Hit { segment: Segment, children: Vec<Ray> },
}

pub struct RayTracer<'a> {
    pub mesh: &'a Mesh,
    pub materials: &'a MaterialTable,
    pub source: Vec3,
    pub config: TraceConfig,
    reflector: BrdfReflector,
}

impl<'a> RayTracer<'a> {
    /// A tracer using the preset materials
    pub fn new(mesh: &'a Mesh, source: Vec3, config: TraceConfig) -> Self {
        Self {
            mesh,
            materials: material::standard(),
            source,
            reflector: config.reflector(),
            config,
        }
    }

    pub fn with_materials(self, materials: &'a MaterialTable) -> Self {
        Self { materials, ..self }
    }

    pub fn trace(&self) -> SegmentMap {
        self.trace_with(&TraceControl::default())
    }

    pub fn trace_with(&self, control: &TraceControl) -> SegmentMap {
        let mut wave = self.primary_rays();
        let mut output = SegmentMap {
            primary: wave.len(),
            ..Default::default()
        };
        log::debug!(
            "tracing {} rays from {:?}, up to {} reflections",
            wave.len(),
            self.source,
            self.config.reflections
        );

        let mut depth = 0;
        'waves: while !wave.is_empty() {
            let mut next_wave = Vec::new();

            for (chunk_index, chunk) in wave.chunks(CHUNK_SIZE).enumerate() {
                if let Some(interruption) = control.interruption() {
                    log::info!("trace {interruption} at depth {depth}");
                    output.interruption = Some(interruption);
                    break 'waves;
                }

                let first_index = chunk_index * CHUNK_SIZE;
                let cast = |(i, ray): (usize, &Ray)| self.cast(ray, depth, first_index + i);
                let outcomes: Vec<Outcome> = timed_scope_accumulate!("Trace chunks", || {
                    match self.config.execution_mode {
                        ExecutionMode::Monothreaded => {
                            chunk.iter().enumerate().map(cast).collect::<Vec<_>>()
                        }
                        ExecutionMode::Multithreaded => {
                            chunk.par_iter().enumerate().map(cast).collect::<Vec<_>>()
                        }
                    }
                });

                for outcome in outcomes {
                    match outcome {
                        Outcome::Escaped => output.escaped += 1,
                        Outcome::Hit { segment, children } => {
                            output.segments.push(segment);
                            next_wave.extend(children);
                        }
                    }
                }
                output.rays_cast += chunk.len();
                control.add_processed(chunk.len());
            }

            wave = next_wave;
            depth += 1;
        }

        if output.escaped > 0 {
            warn_once!(
                "{} of {} rays escaped the room, the mesh may not be closed",
                output.escaped,
                output.rays_cast
            );
        }
        output
    }

    fn primary_rays(&self) -> Vec<Ray> {
        let level = self.config.level;
        match &self.config.emission {
            Emission::Sphere { count } => {
                let mut rng = Seed {
                    seed: self.config.seed,
                    depth: 0,
                    index: 0,
                }
                .into_rng(PRIMARY_STREAM);
                HemisphereSampler::new(*count).sphere(self.source, 0.0, level, &mut rng)
            }
            Emission::Directions(directions) => directions
                .iter()
                .filter_map(|d| match d.try_normalize() {
                    Some(d) => Some(Ray::new(self.source, d, 0.0, level)),
                    None => {
                        log::warn!("ignoring the zero length emission direction");
                        None
                    }
                })
                .collect(),
        }
    }

    /// Follows one ray to the nearest face and prepares its reflections
    fn cast(&self, ray: &Ray, depth: u32, index: usize) -> Outcome {
        counter!("Rays cast");

        let record = match self.mesh.intersection_full(ray, f64::INFINITY) {
            IntersectionResult::Intersection(record) => record,
            IntersectionResult::NoIntersection => {
                counter!("Escaped rays");
                return Outcome::Escaped;
            }
        };

        let distance = ray.distance + record.t;
        let attenuation = drop_off(f64::max(ray.distance, self.config.min_distance), distance)
            .unwrap_or_else(|err| {
                error_once!("no distance attenuation: {err}");
                0.0
            });

        let absorption = self
            .materials
            .absorption_in(record.local_info.material, self.config.band);
        let reflected_fraction = f64::max(1.0 - absorption, f64::EPSILON);
        let level = ray.level + attenuation + 10.0 * f64::log10(reflected_fraction);
        if level.into_finite().is_none() {
            error_once!("a ray reached a non finite level");
        }

        let segment = Segment {
            origin: ray.origin,
            end: record.local_info.pos,
            level,
            color: db_to_color(level),
            depth,
            face: record.local_info.face,
        };

        let children = if depth < self.config.reflections {
            let incident = Ray {
                origin: record.local_info.pos,
                direction: ray.direction,
                distance,
                level,
            };
            let mut rng = Seed {
                seed: self.config.seed,
                depth,
                index: index as u64,
            }
            .into_rng(REFLECTION_STREAM);
            let face = &self.mesh.faces[record.local_info.face];
            self.reflector.reflect(&incident, face, &mut rng).into_rays()
        } else {
            Vec::new()
        };

        Outcome::Hit { segment, children }
    }
}
