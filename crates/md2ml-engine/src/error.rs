use crate::io::ResolveError;
use crate::sink::SinkError;

/// Fatal conversion failure. Conversion stops at the first one.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Image resolution failed: {0}")]
    Image(#[from] ResolveError),
    #[error("Document sink failed: {0}")]
    Sink(#[from] SinkError),
}
