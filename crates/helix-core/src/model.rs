//! Skinned, animated model data independent of any file format.
//!
//! Poses are evaluated directly at arbitrary clip times from the node rest
//! transforms and the clip's channels, so sampling never mutates shared state.

use glam::{Mat4, Quat, Vec3, Vec4};

/// Rest transform of a scene node plus its parent link.
#[derive(Clone, Debug)]
pub struct Node {
    pub parent: Option<usize>,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            parent: None,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interpolation {
    Step,
    Linear,
    /// Values are stored as `[in_tangent, value, out_tangent]` triplets per key.
    CubicSpline,
}

#[derive(Clone, Debug)]
pub enum ChannelValues {
    Translation(Vec<Vec3>),
    Rotation(Vec<Quat>),
    Scale(Vec<Vec3>),
}

#[derive(Clone, Debug)]
pub struct Channel {
    pub node: usize,
    pub times: Vec<f32>,
    pub values: ChannelValues,
    pub interpolation: Interpolation,
}

#[derive(Clone, Debug)]
pub struct AnimationClip {
    pub name: Option<String>,
    pub duration: f32,
    pub channels: Vec<Channel>,
}

/// One skinned primitive with per-vertex joint influences.
#[derive(Clone, Debug, Default)]
pub struct SkinnedMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub joints: Vec<[u16; 4]>,
    pub weights: Vec<[f32; 4]>,
    /// Node index of each skin joint.
    pub joint_nodes: Vec<usize>,
    pub inverse_bind: Vec<Mat4>,
}

impl SkinnedMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Joint matrices for the given global node transforms.
    pub fn joint_matrices(&self, globals: &[Mat4]) -> Vec<Mat4> {
        self.joint_nodes
            .iter()
            .enumerate()
            .map(|(j, &node)| {
                let global = globals.get(node).copied().unwrap_or(Mat4::IDENTITY);
                let inv = self.inverse_bind.get(j).copied().unwrap_or(Mat4::IDENTITY);
                global * inv
            })
            .collect()
    }

    /// Linear blend skinning of one vertex. Returns the deformed position and
    /// unit normal. Vertices with no usable weights keep their bind pose.
    pub fn skin_vertex(&self, vertex: usize, joint_mats: &[Mat4]) -> (Vec3, Vec3) {
        let position = self.positions[vertex];
        let normal = self.normals.get(vertex).copied().unwrap_or(Vec3::Y);
        let (Some(joints), Some(weights)) = (self.joints.get(vertex), self.weights.get(vertex))
        else {
            return (position, normal);
        };

        let mut blended = Mat4::ZERO;
        let mut total = 0.0;
        for k in 0..4 {
            let w = weights[k];
            if w <= 0.0 {
                continue;
            }
            if let Some(m) = joint_mats.get(joints[k] as usize) {
                blended += *m * w;
                total += w;
            }
        }
        if total <= f32::EPSILON {
            return (position, normal);
        }
        if (total - 1.0).abs() > 1e-4 {
            blended = blended * (1.0 / total);
        }
        let p = blended.transform_point3(position);
        let n = blended.transform_vector3(normal).normalize_or_zero();
        (p, if n == Vec3::ZERO { normal } else { n })
    }
}

#[derive(Clone, Debug, Default)]
pub struct SkinnedModel {
    pub nodes: Vec<Node>,
    pub meshes: Vec<SkinnedMesh>,
    pub clips: Vec<AnimationClip>,
}

impl SkinnedModel {
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.vertex_count()).sum()
    }

    /// The clip driving the morph: the first one, if any.
    pub fn clip(&self) -> Option<&AnimationClip> {
        self.clips.first()
    }

    /// Global transform of every node with `clip` sampled at `time_sec`.
    pub fn pose_at(&self, clip: &AnimationClip, time_sec: f32) -> Vec<Mat4> {
        let mut locals: Vec<(Vec3, Quat, Vec3)> = self
            .nodes
            .iter()
            .map(|n| (n.translation, n.rotation, n.scale))
            .collect();
        for ch in &clip.channels {
            let Some(local) = locals.get_mut(ch.node) else {
                continue;
            };
            match &ch.values {
                ChannelValues::Translation(v) => {
                    if let Some(t) = sample(&ch.times, v, ch.interpolation, time_sec) {
                        local.0 = t;
                    }
                }
                ChannelValues::Rotation(v) => {
                    if let Some(r) = sample(&ch.times, v, ch.interpolation, time_sec) {
                        local.1 = r.normalize();
                    }
                }
                ChannelValues::Scale(v) => {
                    if let Some(s) = sample(&ch.times, v, ch.interpolation, time_sec) {
                        local.2 = s;
                    }
                }
            }
        }
        let locals: Vec<Mat4> = locals
            .into_iter()
            .map(|(t, r, s)| Mat4::from_scale_rotation_translation(s, r, t))
            .collect();
        self.globals_from_locals(&locals)
    }

    fn globals_from_locals(&self, locals: &[Mat4]) -> Vec<Mat4> {
        let mut globals: Vec<Option<Mat4>> = vec![None; locals.len()];
        let mut chain = Vec::new();
        for start in 0..locals.len() {
            if globals[start].is_some() {
                continue;
            }
            // Walk up to the first resolved ancestor; bounded so a malformed
            // parent cycle cannot spin forever.
            chain.clear();
            let mut cur = Some(start);
            while let Some(i) = cur {
                if i >= locals.len() || globals[i].is_some() || chain.len() > locals.len() {
                    break;
                }
                chain.push(i);
                cur = self.nodes.get(i).and_then(|n| n.parent);
            }
            let mut acc = cur
                .and_then(|i| globals.get(i).copied().flatten())
                .unwrap_or(Mat4::IDENTITY);
            for &i in chain.iter().rev() {
                acc *= locals[i];
                globals[i] = Some(acc);
            }
        }
        globals
            .into_iter()
            .map(|g| g.unwrap_or(Mat4::IDENTITY))
            .collect()
    }
}

trait Keyed: Copy {
    fn interpolate(a: Self, b: Self, t: f32) -> Self;
    fn to_vec4(self) -> Vec4;
    fn from_vec4(v: Vec4) -> Self;
}

impl Keyed for Vec3 {
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        a.lerp(b, t)
    }
    fn to_vec4(self) -> Vec4 {
        self.extend(0.0)
    }
    fn from_vec4(v: Vec4) -> Self {
        v.truncate()
    }
}

impl Keyed for Quat {
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        a.slerp(b, t)
    }
    fn to_vec4(self) -> Vec4 {
        Vec4::from(self)
    }
    fn from_vec4(v: Vec4) -> Self {
        Quat::from_vec4(v).normalize()
    }
}

fn sample<T: Keyed>(times: &[f32], values: &[T], interp: Interpolation, t: f32) -> Option<T> {
    let stride = if interp == Interpolation::CubicSpline { 3 } else { 1 };
    let keys = times.len().min(values.len() / stride);
    if keys == 0 {
        return None;
    }
    let value = |i: usize| values[i * stride + stride / 2];

    let next = times[..keys].partition_point(|&k| k <= t);
    if next == 0 {
        return Some(value(0));
    }
    if next >= keys {
        return Some(value(keys - 1));
    }
    let (i0, i1) = (next - 1, next);
    let dt = times[i1] - times[i0];
    if dt <= 0.0 {
        return Some(value(i1));
    }
    let s = (t - times[i0]) / dt;
    Some(match interp {
        Interpolation::Step => value(i0),
        Interpolation::Linear => T::interpolate(value(i0), value(i1), s),
        Interpolation::CubicSpline => {
            let v0 = value(i0).to_vec4();
            let out0 = values[i0 * 3 + 2].to_vec4() * dt;
            let in1 = values[i1 * 3].to_vec4() * dt;
            let v1 = value(i1).to_vec4();
            let s2 = s * s;
            let s3 = s2 * s;
            let p = v0 * (2.0 * s3 - 3.0 * s2 + 1.0)
                + out0 * (s3 - 2.0 * s2 + s)
                + v1 * (-2.0 * s3 + 3.0 * s2)
                + in1 * (s3 - s2);
            T::from_vec4(p)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_sampling_clamps_outside_keys() {
        let times = [1.0, 2.0];
        let values = [Vec3::ZERO, Vec3::X * 4.0];
        assert_eq!(sample(&times, &values, Interpolation::Linear, 0.0), Some(Vec3::ZERO));
        assert_eq!(sample(&times, &values, Interpolation::Linear, 1.5), Some(Vec3::X * 2.0));
        assert_eq!(sample(&times, &values, Interpolation::Linear, 5.0), Some(Vec3::X * 4.0));
    }

    #[test]
    fn step_sampling_holds_previous_key() {
        let times = [0.0, 1.0];
        let values = [Vec3::ZERO, Vec3::ONE];
        assert_eq!(sample(&times, &values, Interpolation::Step, 0.99), Some(Vec3::ZERO));
    }

    #[test]
    fn cubic_spline_hits_key_values() {
        let times = [0.0, 1.0];
        let values = [
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::Y * 2.0,
            Vec3::ZERO,
        ];
        let mid = sample(&times, &values, Interpolation::CubicSpline, 0.5).unwrap();
        assert!((mid.y - 1.0).abs() < 1e-5);
        let end = sample(&times, &values, Interpolation::CubicSpline, 1.0).unwrap();
        assert_eq!(end, Vec3::Y * 2.0);
    }

    #[test]
    fn globals_compose_parent_first() {
        let model = SkinnedModel {
            nodes: vec![
                Node {
                    translation: Vec3::X,
                    ..Default::default()
                },
                Node {
                    parent: Some(0),
                    translation: Vec3::Y,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let clip = AnimationClip {
            name: None,
            duration: 0.0,
            channels: vec![],
        };
        let g = model.pose_at(&clip, 0.0);
        assert_eq!(g[1].transform_point3(Vec3::ZERO), Vec3::new(1.0, 1.0, 0.0));
    }
}
