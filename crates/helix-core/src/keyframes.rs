//! Precomputed particle positions at evenly spaced clip times.

use crate::constants::KEYFRAMES_PER_SECOND;
use crate::geometry::build_random_seeds;
use crate::model::SkinnedModel;

/// Per-keyframe positions and normals for the morph visual, plus its
/// per-particle seeds. Every array in `positions` / `normals` holds
/// `count * 3` floats.
#[derive(Clone, Debug)]
pub struct KeyframeSet {
    pub count: usize,
    /// Clip duration the keyframes were sampled over, in seconds.
    pub duration: f32,
    pub times: Vec<f32>,
    pub positions: Vec<Vec<f32>>,
    pub normals: Vec<Vec<f32>>,
    pub random: Vec<f32>,
}

impl KeyframeSet {
    pub fn keyframe_count(&self) -> usize {
        self.positions.len()
    }

    /// Keyframe steps per second that play the clip back at its own speed.
    pub fn steps_per_second(&self) -> f32 {
        let k = self.keyframe_count();
        if k < 2 || self.duration <= 0.0 {
            return KEYFRAMES_PER_SECOND;
        }
        (k - 1) as f32 / self.duration
    }
}

/// Clip time of keyframe `k` of `keyframes`, spanning `[0, duration]` inclusive.
#[inline]
pub fn keyframe_time(k: usize, keyframes: usize, duration: f32) -> f32 {
    if keyframes <= 1 {
        0.0
    } else {
        duration * k as f32 / (keyframes - 1) as f32
    }
}

/// Smallest fixed stride that brings `total` vertices down to at most `cap`.
/// Rounds up so the selection always reaches the end of the vertex range.
#[inline]
pub fn sample_stride(total: usize, cap: usize) -> usize {
    if cap == 0 {
        return usize::MAX;
    }
    total.div_ceil(cap).max(1)
}

/// Sample the model's first clip `keyframes` times and skin the selected
/// vertices at each time.
///
/// Returns `None` (after logging a warning) when the model has no skinned
/// mesh, no animation clip, or nothing to sample; the caller then renders no
/// morph particles. Runs once per model, never per frame.
pub fn sample_keyframes(
    model: &SkinnedModel,
    keyframes: usize,
    particle_cap: usize,
    seed: u64,
) -> Option<KeyframeSet> {
    if model.meshes.is_empty() {
        log::warn!("[model] no skinned mesh found; morph particles unavailable");
        return None;
    }
    let Some(clip) = model.clip() else {
        log::warn!("[model] no animation clip found; morph particles unavailable");
        return None;
    };
    let total = model.vertex_count();
    if total == 0 || keyframes == 0 || particle_cap == 0 {
        log::warn!("[model] nothing to sample (vertices={total}, keyframes={keyframes})");
        return None;
    }

    let stride = sample_stride(total, particle_cap);
    let mut selected: Vec<(usize, usize)> = Vec::with_capacity(particle_cap.min(total));
    let mut flat = 0usize;
    'meshes: for (mi, mesh) in model.meshes.iter().enumerate() {
        for vi in 0..mesh.vertex_count() {
            if flat % stride == 0 {
                selected.push((mi, vi));
                if selected.len() == particle_cap {
                    break 'meshes;
                }
            }
            flat += 1;
        }
    }
    let count = selected.len();

    let mut times = Vec::with_capacity(keyframes);
    let mut positions = Vec::with_capacity(keyframes);
    let mut normals = Vec::with_capacity(keyframes);
    for k in 0..keyframes {
        let t = keyframe_time(k, keyframes, clip.duration);
        let globals = model.pose_at(clip, t);
        let joint_mats: Vec<_> = model
            .meshes
            .iter()
            .map(|m| m.joint_matrices(&globals))
            .collect();

        let mut pos = Vec::with_capacity(count * 3);
        let mut nrm = Vec::with_capacity(count * 3);
        for &(mi, vi) in &selected {
            let (p, n) = model.meshes[mi].skin_vertex(vi, &joint_mats[mi]);
            pos.extend_from_slice(&p.to_array());
            nrm.extend_from_slice(&n.to_array());
        }
        times.push(t);
        positions.push(pos);
        normals.push(nrm);
    }

    log::info!(
        "[model] sampled {keyframes} keyframes x {count} particles (stride {stride}, duration {:.2}s)",
        clip.duration
    );

    Some(KeyframeSet {
        count,
        duration: clip.duration,
        times,
        positions,
        normals,
        random: build_random_seeds(count, seed),
    })
}
