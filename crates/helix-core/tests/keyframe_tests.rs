//! Host-side tests for keyframe sampling on hand-built skinned models.

use glam::{Mat4, Vec3};
use helix_core::keyframes::{keyframe_time, sample_keyframes, sample_stride};
use helix_core::model::{
    AnimationClip, Channel, ChannelValues, Interpolation, Node, SkinnedMesh, SkinnedModel,
};

const DURATION: f32 = 2.0;

/// One joint sliding 4 units along +X over the clip, with `vertices` points
/// fully bound to it.
fn sliding_model(vertices: usize) -> SkinnedModel {
    let positions: Vec<Vec3> = (0..vertices).map(|i| Vec3::new(0.0, i as f32, 0.0)).collect();
    SkinnedModel {
        nodes: vec![Node::default()],
        meshes: vec![SkinnedMesh {
            normals: vec![Vec3::Z; vertices],
            joints: vec![[0, 0, 0, 0]; vertices],
            weights: vec![[1.0, 0.0, 0.0, 0.0]; vertices],
            positions,
            joint_nodes: vec![0],
            inverse_bind: vec![Mat4::IDENTITY],
        }],
        clips: vec![AnimationClip {
            name: Some("walk".into()),
            duration: DURATION,
            channels: vec![Channel {
                node: 0,
                times: vec![0.0, DURATION],
                values: ChannelValues::Translation(vec![Vec3::ZERO, Vec3::X * 4.0]),
                interpolation: Interpolation::Linear,
            }],
        }],
    }
}

#[test]
fn thirty_keyframes_span_the_whole_clip() {
    let model = sliding_model(5);
    let set = sample_keyframes(&model, 30, 1_000, 3).unwrap();

    assert_eq!(set.positions.len(), 30);
    assert_eq!(set.normals.len(), 30);
    assert_eq!(set.times.len(), 30);
    assert_eq!(set.times[0], 0.0);
    assert_eq!(set.times[29], DURATION);
    for k in 0..30 {
        assert_eq!(set.times[k], keyframe_time(k, 30, DURATION));
        assert_eq!(set.positions[k].len(), set.count * 3);
    }

    // vertex 1 rests at (0, 1, 0) and rides the joint
    assert_eq!(&set.positions[0][3..6], &[0.0, 1.0, 0.0]);
    assert_eq!(&set.positions[29][3..6], &[4.0, 1.0, 0.0]);
    assert_eq!(&set.normals[29][3..6], &[0.0, 0.0, 1.0]);
}

#[test]
fn large_meshes_are_strided_down_to_the_cap() {
    let model = sliding_model(10);
    let set = sample_keyframes(&model, 2, 4, 3).unwrap();
    assert_eq!(set.count, 4);
    assert_eq!(set.random.len(), 4);
    // stride 3 keeps vertices 0, 3, 6, 9
    let ys: Vec<f32> = set.positions[0].chunks(3).map(|p| p[1]).collect();
    assert_eq!(ys, [0.0, 3.0, 6.0, 9.0]);
}

#[test]
fn strided_sample_reaches_the_end_of_the_mesh() {
    // just under twice the cap: a truncating stride would drop the back half
    let (total, cap) = (39, 20);
    let set = sample_keyframes(&sliding_model(total), 2, cap, 3).unwrap();
    let stride = sample_stride(total, cap);
    assert_eq!(stride, 2);
    assert!(set.count <= cap);
    let last = set.positions[0].chunks(3).map(|p| p[1]).last().unwrap();
    assert!(last as usize >= total - stride);
}

#[test]
fn playback_rate_follows_the_clip_duration() {
    let set = sample_keyframes(&sliding_model(3), 30, 10, 3).unwrap();
    assert_eq!(set.duration, DURATION);
    assert!((set.steps_per_second() - 29.0 / DURATION).abs() < 1e-5);
}

#[test]
fn no_skinned_mesh_means_no_particles() {
    let mut model = sliding_model(5);
    model.meshes.clear();
    assert!(sample_keyframes(&model, 30, 20_000, 3).is_none());
}

#[test]
fn no_clip_means_no_particles() {
    let mut model = sliding_model(5);
    model.clips.clear();
    assert!(sample_keyframes(&model, 30, 20_000, 3).is_none());
}

#[test]
fn single_keyframe_sits_at_time_zero() {
    let set = sample_keyframes(&sliding_model(3), 1, 10, 3).unwrap();
    assert_eq!(set.times, [0.0]);
}
