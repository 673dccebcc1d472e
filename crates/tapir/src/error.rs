#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("edge index lists differ in length: {src} sources, {dst} targets")]
    EdgeListLengthMismatch { src: usize, dst: usize },
    #[error("edge {edge} references vertex {index}, but only {len} vertices exist")]
    EdgeIndexOutOfRange {
        edge: usize,
        index: usize,
        len: usize,
    },
    #[error("spread must be finite and positive, got {spread}")]
    InvalidSpread { spread: f64 },
    #[error("distance matrix must be square, got {rows}x{cols}")]
    NonSquareMatrix { rows: usize, cols: usize },
    #[error("distance at ({row}, {col}) must be finite and positive, got {value}")]
    InvalidDistance { row: usize, col: usize, value: f64 },
    #[error("distance matrix is not symmetric at ({row}, {col})")]
    AsymmetricMatrix { row: usize, col: usize },
    #[error("pinned vertex {index} is out of range for {len} vertices")]
    PinIndexOutOfRange { index: usize, len: usize },
    #[error("pinned vertex {index} has a non-finite position")]
    NonFinitePin { index: usize },
    #[error("invalid layout option `{name}`: {value}")]
    InvalidOption { name: &'static str, value: f64 },
    #[error("graph contains a duplicate node id: {node_id}")]
    DuplicateNode { node_id: String },
    #[error("graph contains an edge with a missing endpoint: {edge_id}")]
    MissingEndpoint { edge_id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
