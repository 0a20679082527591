//! Namespace autoloading
//!
//! Maps `::`-qualified names to `.tarn` source files on first reference.
//! An [`Autoloader`] holds an ordered list of [`NamespaceRoute`]s; each
//! route pairs a namespace prefix with an ordered list of root
//! directories. Resolution strips the prefix on a full segment boundary,
//! turns the remaining segments into a relative path, and probes the
//! route's directories in order — the first existing candidate wins.
//! A given qualified name is loaded at most once per autoloader no
//! matter how often resolution is triggered.

use crate::error::AutoloadError;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Separator between qualified-name segments
pub const SEPARATOR: &str = "::";

/// Extension of loadable source files
pub const SOURCE_EXTENSION: &str = "tarn";

/// A namespace prefix mapped to an ordered list of root directories.
#[derive(Debug, Clone)]
pub struct NamespaceRoute {
    prefix: String,
    dirs: Vec<PathBuf>,
}

impl NamespaceRoute {
    /// Create a route for `prefix`, searched across `dirs` in order.
    ///
    /// The prefix is normalized to carry no leading or trailing
    /// separator; an empty prefix matches every name.
    pub fn new<P, I, D>(prefix: P, dirs: I) -> Self
    where
        P: AsRef<str>,
        I: IntoIterator<Item = D>,
        D: Into<PathBuf>,
    {
        let trimmed = prefix
            .as_ref()
            .trim_start_matches(SEPARATOR)
            .trim_end_matches(SEPARATOR);
        Self {
            prefix: trimmed.to_string(),
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// The normalized prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The root directories, in search order
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Map a qualified name to its route-relative file path.
    ///
    /// Declines (`None`) unless the name begins with the prefix on a
    /// full segment boundary and a non-empty suffix remains. Pure: no
    /// filesystem access.
    pub fn relative_path(&self, qualified: &str) -> Option<PathBuf> {
        let suffix = if self.prefix.is_empty() {
            qualified
        } else {
            let rest = qualified.strip_prefix(&self.prefix)?;
            rest.strip_prefix(SEPARATOR)?
        };
        if suffix.is_empty() {
            return None;
        }

        // Append the extension rather than set_extension: a dot inside
        // the final segment is part of the name, not an extension.
        let mut path = PathBuf::new();
        let mut segments = suffix.split(SEPARATOR).peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{}.{}", segment, SOURCE_EXTENSION));
            }
        }
        Some(path)
    }
}

/// Filesystem collaborator: existence checks and file loads.
///
/// A seam so loading can be observed and faked in tests; [`FsLoader`] is
/// the real implementation.
pub trait SourceLoader: Send {
    /// Check whether a regular file exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Load the source file at `path`
    fn load(&self, path: &Path) -> io::Result<String>;
}

/// [`SourceLoader`] backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn load(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Result of asking the autoloader to load a qualified name.
#[derive(Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// First load: the resolved path and the file's source text
    Loaded {
        /// Path the name resolved to
        path: PathBuf,
        /// Source text of the loaded file
        source: String,
    },
    /// The name was already loaded through this autoloader
    AlreadyLoaded(PathBuf),
    /// No route resolved the name; the host's fallback applies
    Miss,
}

/// Ordered-route autoloader with load-once semantics.
pub struct Autoloader {
    routes: Vec<NamespaceRoute>,
    loader: Box<dyn SourceLoader>,
    loaded: Mutex<FxHashMap<String, PathBuf>>,
}

impl Autoloader {
    /// Create an autoloader over the real filesystem
    pub fn new() -> Self {
        Self::with_loader(Box::new(FsLoader))
    }

    /// Create an autoloader over a custom [`SourceLoader`]
    pub fn with_loader(loader: Box<dyn SourceLoader>) -> Self {
        Self {
            routes: Vec::new(),
            loader,
            loaded: Mutex::new(FxHashMap::default()),
        }
    }

    /// Append a route. Routes are consulted in registration order;
    /// the first route that resolves a name wins.
    pub fn add_route(&mut self, route: NamespaceRoute) {
        self.routes.push(route);
    }

    /// The registered routes, in consultation order
    pub fn routes(&self) -> &[NamespaceRoute] {
        &self.routes
    }

    /// Resolve a qualified name to a file path without loading it.
    ///
    /// Routes whose prefix declines the name perform no filesystem
    /// access. Returns the first existing candidate, probing each
    /// matching route's directories in order.
    pub fn resolve(&self, qualified: &str) -> Option<PathBuf> {
        for route in &self.routes {
            let Some(relative) = route.relative_path(qualified) else {
                continue;
            };
            for dir in route.dirs() {
                let candidate = dir.join(&relative);
                if self.loader.exists(&candidate) {
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// Load the file a qualified name resolves to, exactly once.
    ///
    /// Repeated calls for the same name return
    /// [`LoadOutcome::AlreadyLoaded`] without touching the filesystem.
    /// A name no route resolves is a [`LoadOutcome::Miss`], not an
    /// error; only I/O failures while reading a resolved file are
    /// errors, and those leave the name unloaded so the caller may
    /// retry.
    pub fn load(&self, qualified: &str) -> Result<LoadOutcome, AutoloadError> {
        // Lock held across resolve-and-read: concurrent loads of the
        // same name must observe at most one file read.
        let mut loaded = self.loaded.lock();
        if let Some(path) = loaded.get(qualified) {
            return Ok(LoadOutcome::AlreadyLoaded(path.clone()));
        }

        let Some(path) = self.resolve(qualified) else {
            return Ok(LoadOutcome::Miss);
        };

        let source = self.loader.load(&path)?;
        loaded.insert(qualified.to_string(), path.clone());
        Ok(LoadOutcome::Loaded { path, source })
    }

    /// Check whether a qualified name has been loaded
    pub fn is_loaded(&self, qualified: &str) -> bool {
        self.loaded.lock().contains_key(qualified)
    }
}

impl Default for Autoloader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Autoloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Autoloader")
            .field("routes", &self.routes)
            .field("loaded", &self.loaded.lock().len())
            .finish()
    }
}
