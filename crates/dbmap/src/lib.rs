pub mod color;
pub mod error;
pub mod formulas;
pub mod loader;
pub mod material;
pub mod math;
pub mod mesh;
pub mod ray;
pub mod reflection;
pub mod sampler;
pub mod scene;
pub mod shape;
pub mod tracer;
pub mod utils;

pub use rand_xoshiro::Xoshiro256StarStar as Rng;

/// Identifies the random stream of one ray of a trace
#[derive(Debug, Copy, Clone, Hash)]
#[repr(C)]
pub struct Seed {
    pub seed: u64,
    pub depth: u32,
    pub index: u64,
}

impl Seed {
    pub fn into_rng(self, local_seed: u32) -> Rng {
        let mut hasher = std::hash::DefaultHasher::new();
        std::hash::Hash::hash(&self, &mut hasher);
        std::hash::Hash::hash(&local_seed, &mut hasher);
        <Rng as rand::SeedableRng>::seed_from_u64(std::hash::Hasher::finish(&hasher))
    }
}
