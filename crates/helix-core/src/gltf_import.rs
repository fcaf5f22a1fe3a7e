//! Binary glTF (GLB) import into [`SkinnedModel`].

use crate::error::ModelError;
use crate::model::{
    AnimationClip, Channel, ChannelValues, Interpolation, Node, SkinnedMesh, SkinnedModel,
};
use glam::{Mat4, Quat, Vec3};
use gltf::animation::util::ReadOutputs;
use gltf::buffer::Source;

/// Parse a GLB asset. Only buffers embedded in the binary chunk are read.
pub fn load_glb(bytes: &[u8]) -> Result<SkinnedModel, ModelError> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let blob = gltf.blob.as_deref();

    let mut buffers: Vec<&[u8]> = Vec::new();
    for buffer in gltf.buffers() {
        match (buffer.source(), blob) {
            (Source::Bin, Some(data)) => buffers.push(data),
            _ => return Err(ModelError::MissingBuffer(buffer.index())),
        }
    }
    let get = |b: gltf::Buffer| buffers.get(b.index()).copied();

    let mut nodes: Vec<Node> = gltf
        .nodes()
        .map(|n| {
            let (t, r, s) = n.transform().decomposed();
            Node {
                parent: None,
                translation: Vec3::from(t),
                rotation: Quat::from_array(r),
                scale: Vec3::from(s),
            }
        })
        .collect();
    for n in gltf.nodes() {
        for child in n.children() {
            if let Some(c) = nodes.get_mut(child.index()) {
                c.parent = Some(n.index());
            }
        }
    }

    let mut meshes = Vec::new();
    for node in gltf.nodes() {
        let (Some(mesh), Some(skin)) = (node.mesh(), node.skin()) else {
            continue;
        };
        let joint_nodes: Vec<usize> = skin.joints().map(|j| j.index()).collect();
        let inverse_bind: Vec<Mat4> = skin
            .reader(get)
            .read_inverse_bind_matrices()
            .map(|it| it.map(|m| Mat4::from_cols_array_2d(&m)).collect())
            .unwrap_or_else(|| vec![Mat4::IDENTITY; joint_nodes.len()]);

        for (pi, primitive) in mesh.primitives().enumerate() {
            let reader = primitive.reader(get);
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<Vec3> = positions.map(Vec3::from).collect();
            let (Some(joints), Some(weights)) = (reader.read_joints(0), reader.read_weights(0))
            else {
                log::debug!("[model] mesh {} primitive {pi} has no skin attributes", mesh.index());
                continue;
            };
            let joints: Vec<[u16; 4]> = joints.into_u16().collect();
            let weights: Vec<[f32; 4]> = weights.into_f32().collect();
            let normals: Vec<Vec3> = reader
                .read_normals()
                .map(|it| it.map(Vec3::from).collect())
                .unwrap_or_default();

            let expected = positions.len();
            for (attribute, found) in [
                ("JOINTS_0", joints.len()),
                ("WEIGHTS_0", weights.len()),
                ("NORMAL", if normals.is_empty() { expected } else { normals.len() }),
            ] {
                if found != expected {
                    return Err(ModelError::AttributeMismatch {
                        mesh: mesh.index(),
                        primitive: pi,
                        attribute,
                        found,
                        expected,
                    });
                }
            }

            meshes.push(SkinnedMesh {
                positions,
                normals,
                joints,
                weights,
                joint_nodes: joint_nodes.clone(),
                inverse_bind: inverse_bind.clone(),
            });
        }
    }

    let clips = gltf
        .animations()
        .map(|anim| {
            let mut duration = 0.0_f32;
            let mut channels = Vec::new();
            for ch in anim.channels() {
                let reader = ch.reader(get);
                let (Some(inputs), Some(outputs)) = (reader.read_inputs(), reader.read_outputs())
                else {
                    continue;
                };
                let times: Vec<f32> = inputs.collect();
                let values = match outputs {
                    ReadOutputs::Translations(it) => {
                        ChannelValues::Translation(it.map(Vec3::from).collect())
                    }
                    ReadOutputs::Rotations(it) => {
                        ChannelValues::Rotation(it.into_f32().map(Quat::from_array).collect())
                    }
                    ReadOutputs::Scales(it) => ChannelValues::Scale(it.map(Vec3::from).collect()),
                    ReadOutputs::MorphTargetWeights(_) => continue,
                };
                if let Some(&last) = times.last() {
                    duration = duration.max(last);
                }
                let interpolation = match ch.sampler().interpolation() {
                    gltf::animation::Interpolation::Step => Interpolation::Step,
                    gltf::animation::Interpolation::Linear => Interpolation::Linear,
                    gltf::animation::Interpolation::CubicSpline => Interpolation::CubicSpline,
                };
                channels.push(Channel {
                    node: ch.target().node().index(),
                    times,
                    values,
                    interpolation,
                });
            }
            AnimationClip {
                name: anim.name().map(str::to_string),
                duration,
                channels,
            }
        })
        .filter(|clip| !clip.channels.is_empty())
        .collect::<Vec<_>>();

    log::info!(
        "[model] loaded nodes={} skinned_meshes={} vertices={} clips={}",
        nodes.len(),
        meshes.len(),
        meshes.iter().map(|m: &SkinnedMesh| m.vertex_count()).sum::<usize>(),
        clips.len()
    );

    Ok(SkinnedModel {
        nodes,
        meshes,
        clips,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let err = load_glb(b"definitely not a model").unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }
}
