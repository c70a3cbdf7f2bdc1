use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("unable to open frames file {}", path.display())]
    OpenFrames { path: PathBuf, source: io::Error },
    #[error("frames file {} is not a list of sample lists", path.display())]
    ParseFrames {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unable to write mesh to {}", path.display())]
    WriteMesh { path: PathBuf, source: io::Error },
}
