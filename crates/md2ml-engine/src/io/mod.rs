use relative_path::RelativePath;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Image not found: {0}")]
    NotFound(PathBuf),
    #[error("Remote images are disabled: {0}")]
    RemoteDisabled(String),
}

/// Where an image referenced from markdown actually lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum ImageSource {
    Local(PathBuf),
    Remote(String),
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Local(path) => write!(f, "{}", path.display()),
            ImageSource::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// Turns an image reference from the markdown into an [`ImageSource`].
pub trait ImageResolver {
    fn resolve(&self, reference: &str) -> Result<ImageSource, ResolveError>;
}

/// Resolves image references against the filesystem.
///
/// A reference is tried as given first, then relative to the base directory.
/// `http://` and `https://` references pass through untouched unless remote
/// images are disabled.
#[derive(Debug, Clone)]
pub struct FsImageResolver {
    base_dir: PathBuf,
    allow_remote: bool,
}

impl FsImageResolver {
    /// Resolver rooted at the current directory.
    pub fn new() -> Self {
        Self::with_base_dir(".")
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            allow_remote: true,
        }
    }

    /// Resolver rooted at the directory containing `document`.
    pub fn for_document(document: &Path) -> Self {
        match document.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => Self::with_base_dir(dir),
            _ => Self::new(),
        }
    }

    pub fn allow_remote(mut self, allow: bool) -> Self {
        self.allow_remote = allow;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn is_remote(reference: &str) -> bool {
        reference.starts_with("http://") || reference.starts_with("https://")
    }
}

impl Default for FsImageResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageResolver for FsImageResolver {
    fn resolve(&self, reference: &str) -> Result<ImageSource, ResolveError> {
        if Self::is_remote(reference) {
            if !self.allow_remote {
                return Err(ResolveError::RemoteDisabled(reference.to_string()));
            }
            return Ok(ImageSource::Remote(reference.to_string()));
        }

        let as_given = Path::new(reference);
        if as_given.is_file() {
            return Ok(ImageSource::Local(as_given.to_path_buf()));
        }

        let relative = RelativePath::new(reference).to_path(&self.base_dir);
        if relative.is_file() {
            log::debug!("Resolved image {reference} to {}", relative.display());
            return Ok(ImageSource::Local(relative));
        }
        Err(ResolveError::NotFound(relative))
    }
}

/// Read a markdown file and return its content
pub fn read_markdown(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}
