use std::path::PathBuf;

/// Every way a labeling request can fail.
///
/// Validation variants are raised before the filesystem is touched. The
/// I/O variants keep the underlying [`std::io::Error`] as their source.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("filename can't be empty")]
    EmptyFilename,

    #[error("filename '{0}' must be a plain file name")]
    InvalidFilename(String),

    #[error("missing input file ({})", .0.display())]
    MissingInputFile(PathBuf),

    #[error("label can't be empty")]
    EmptyLabel,

    #[error("error writing annotation {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error moving image {} to {}: {source}", from.display(), to.display())]
    MoveFailure {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write command timeout exceeded")]
    SubmitTimeout,

    #[error("read response timeout exceeded")]
    ResponseTimeout,

    #[error("{role} path {} doesn't exist or is not a directory", path.display())]
    InvalidRoot { role: &'static str, path: PathBuf },

    #[error("image processor is not running")]
    WorkerStopped,
}
