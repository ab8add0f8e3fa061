/// Errors raised while setting up a row.
///
/// These are configuration problems: the host reports the row as broken and
/// never retries. Runtime oddities (missing entity, odd attributes) are not
/// errors and are handled during rendering instead.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("No entity specified.")]
    MissingEntity,
    #[error("malformed entity id `{0}`, expected `<kind>.<instance>`")]
    MalformedEntityId(String),
    #[error("Unsupported entity type: {0}")]
    UnsupportedKind(String),
    #[error("entity type `{kind}` has no `{attribute}` attribute mode")]
    UnsupportedAttribute { kind: String, attribute: String },
    #[error("invalid slider range (min {min}, max {max}, step {step})")]
    InvalidRange { min: f64, max: f64, step: f64 },
    #[error("could not parse the row configuration")]
    InvalidConfig(#[source] serde_json::Error),
}
