use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Error reading from stdin: {source}")]
    ReadStdin {
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading file '{path}': {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage error at '{path}': {source}")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in input document: {source}")]
    ParseCmdInputJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid JSON for --target-json: {source}")]
    ParseTargetJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not serialize output to JSON: {source}")]
    SerializeOutput {
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not serialize collection '{key}': {source}")]
    SerializeCollection {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown salt id '{0}'")]
    UnknownSalt(String),

    #[error("No {kind} with id '{id}'")]
    RecordNotFound { kind: &'static str, id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing input data: provide --input or --phase/--system/--salts")]
    MissingInputData,
}
