#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvertError {
    #[error("matrix is not square ({rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },

    #[error("matrix is empty")]
    Empty,

    #[error("matrix contains NaN or infinite entries")]
    NonFinite,

    #[error("matrix is singular (determinant {determinant})")]
    Singular { determinant: f64 },
}
