use rand::prelude::*;

/// Per-particle instance data for the helix field, laid out for direct upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HelixParticle {
    pub random: f32,
    pub strand: f32,
    pub progress: f32,
}

/// Immutable attribute set for the helix field.
#[derive(Clone, Debug)]
pub struct HelixAttributes {
    pub particles: Vec<HelixParticle>,
    pub strand_count: usize,
}

impl HelixAttributes {
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Number of particles allotted to each strand (the last strand may hold fewer).
#[inline]
pub fn particles_per_strand(count: usize, strands: usize) -> usize {
    count.div_ceil(strands.max(1))
}

/// Strand id and normalized progress of particle `index`.
///
/// Depends only on `index`, `count` and `strands`, so the same particle always
/// lands at the same place along its strand.
#[inline]
pub fn strand_and_progress(index: usize, count: usize, strands: usize) -> (usize, f32) {
    let per_strand = particles_per_strand(count, strands).max(1);
    let strand = index / per_strand;
    let local = index - strand * per_strand;
    let len = strand_len(strand, count, strands);
    let progress = if len > 1 {
        local as f32 / (len - 1) as f32
    } else {
        0.0
    };
    (strand, progress)
}

/// Particles actually held by `strand`; short only for the last strand.
#[inline]
pub fn strand_len(strand: usize, count: usize, strands: usize) -> usize {
    let per_strand = particles_per_strand(count, strands);
    count.saturating_sub(strand * per_strand).min(per_strand)
}

pub fn build_helix_attributes(count: usize, strands: usize, seed: u64) -> HelixAttributes {
    let strands = strands.max(1);
    let mut rng = StdRng::seed_from_u64(seed);
    let particles = (0..count)
        .map(|i| {
            let (strand, progress) = strand_and_progress(i, count, strands);
            HelixParticle {
                random: rng.gen::<f32>(),
                strand: strand as f32,
                progress,
            }
        })
        .collect();
    HelixAttributes {
        particles,
        strand_count: strands,
    }
}

/// Uniform per-particle seeds in \[0, 1) for the morph visual.
pub fn build_random_seeds(count: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen::<f32>()).collect()
}
