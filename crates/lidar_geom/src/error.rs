use thiserror::Error;

/// Errors raised while validating or constructing a [`crate::TriangleStore`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("vertex buffer length {len} is not a multiple of 3")]
    MalformedVertexBuffer { len: usize },

    #[error("index buffer length {len} is not a multiple of 3")]
    MalformedIndexBuffer { len: usize },

    #[error("mesh has {count} vertices, exceeding the u32 index limit")]
    TooManyVertices { count: usize },

    #[error("index {index} references vertex out of range (vertex count is {vertex_count})")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}
