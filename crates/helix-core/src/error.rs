use thiserror::Error;

/// Failures while turning a model asset into a [`crate::model::SkinnedModel`].
///
/// A model that parses but has no skinned mesh or no animation clip is not an
/// error; it simply yields no morph particles.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to parse glTF: {0}")]
    Parse(#[from] gltf::Error),
    #[error("buffer {0} has no embedded data (only GLB binary chunks are supported)")]
    MissingBuffer(usize),
    #[error("mesh {mesh} primitive {primitive}: {attribute} has {found} entries, expected {expected}")]
    AttributeMismatch {
        mesh: usize,
        primitive: usize,
        attribute: &'static str,
        found: usize,
        expected: usize,
    },
}
