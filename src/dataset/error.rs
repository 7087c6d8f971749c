/// Errors raised by dataset construction and reconciliation
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Variable extent does not match its dimensions
    #[error("Shape mismatch for variable {name}: expected {expected} values, found {found}")]
    ShapeMismatch {
        /// Variable name
        name: String,
        /// Values implied by the dimensions
        expected: usize,
        /// Values actually stored
        found: usize,
    },

    /// Variable spans a dimension the dataset does not define
    #[error("Variable {name} spans unknown dimension {dim}")]
    UnknownDimension {
        /// Variable name
        name: String,
        /// Missing dimension
        dim: String,
    },

    /// Text variables are per-time labels only
    #[error("Text variable {0} cannot span a depth dimension")]
    TextProfile(String),

    /// Same variable defined with different kinds or dimensions
    #[error("Incompatible definitions of variable {0} across datasets")]
    IncompatibleVariable(String),

    /// A time coordinate that alignment needs is empty
    #[error("Empty time coordinate: {0}")]
    EmptyTimeCoordinate(String),

    /// Concatenation called without inputs
    #[error("No datasets to concatenate")]
    NothingToConcatenate,

    /// Required variable is missing
    #[error("Variable not found: {0}")]
    VariableNotFound(String),
}
