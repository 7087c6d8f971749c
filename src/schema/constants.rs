/// WBTS dataset file format version - follows semantic versioning
pub const WBTS_FORMAT_VERSION: &str = "1.0.0";

/// File extension for WBTS dataset files
pub const WBTS_EXTENSION: &str = "parquet";

/// Glob pattern matching dataset files inside an instrument or merge directory
pub const DATASET_FILE_PATTERN: &str = "*.parquet";

/// Metadata key for format version in Parquet footer
pub const KEY_FORMAT_VERSION: &str = "wbts:format_version";

/// Metadata key for the ordered global attributes in Parquet footer
pub const KEY_GLOBAL_ATTRIBUTES: &str = "wbts:global_attributes";

/// Metadata key for the non-time coordinates in Parquet footer
pub const KEY_COORDINATES: &str = "wbts:coordinates";

/// Field metadata key holding the ordered attributes of one variable
pub const KEY_VARIABLE_ATTRIBUTES: &str = "wbts:attributes";

/// Field metadata key naming the depth dimension of a profile variable
pub const KEY_DIMENSION: &str = "wbts:dimension";

/// Variable attribute holding the physical unit
pub const ATTR_UNITS: &str = "units";

/// Variable attribute holding the descriptive name
pub const ATTR_LONG_NAME: &str = "long_name";
