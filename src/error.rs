//! Error type shared by graph construction and the C ABI.

/// Construction and input-validation failures.
///
/// The panicking constructors surface these as precondition violations; the
/// `try_*` forms and the C ABI return them.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex index {index} out of range for {num_vertices} vertices")]
    VertexOutOfRange { index: usize, num_vertices: usize },
    #[error("edge index {index} out of range for {num_edges} edges")]
    EdgeOutOfRange { index: usize, num_edges: usize },
    #[error("{what}: expected {expected} entries, got {actual}")]
    PropertyLengthMismatch { what: &'static str, expected: usize, actual: usize },
    #[error("edges are not grouped by ascending source at position {position}")]
    UnsortedEdges { position: usize },
    #[error("row start array is malformed at position {position}")]
    MalformedRowStart { position: usize },
    #[error("null pointer argument")]
    NullPointer,
    #[error("graph has no vertices")]
    EmptyGraph,
}

impl GraphError {
    /// Stable C ABI return code (0 is reserved for success).
    pub fn code(&self) -> i32 {
        match self {
            GraphError::EmptyGraph => -1,
            GraphError::VertexOutOfRange { .. } => -2,
            GraphError::NullPointer => -3,
            GraphError::MalformedRowStart { .. } => -4,
            GraphError::EdgeOutOfRange { .. } => -5,
            GraphError::PropertyLengthMismatch { .. } => -6,
            GraphError::UnsortedEdges { .. } => -7,
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
