use std::fmt;
use std::io;

use compact_str::CompactString;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    UnknownElement,
    /// Appending would make an element its own ancestor.
    HierarchyRequest,
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::UnknownElement => write!(f, "unknown element"),
            DomError::HierarchyRequest => {
                write!(f, "cannot append an element into its own subtree")
            }
        }
    }
}

impl std::error::Error for DomError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    UnknownView,
    /// A view cannot be adopted by itself or by one of its descendants.
    Cycle,
    Dom(DomError),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::UnknownView => write!(f, "unknown view id"),
            TreeError::Cycle => write!(f, "cannot adopt a view into its own subtree"),
            TreeError::Dom(e) => write!(f, "dom: {}", e),
        }
    }
}

impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TreeError::Dom(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DomError> for TreeError {
    fn from(e: DomError) -> Self {
        TreeError::Dom(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    NoSubview { segment: CompactString },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::NoSubview { segment } => write!(f, "No subview named `{}`", segment),
        }
    }
}

impl std::error::Error for PathError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    ModuleNotFound { module: CompactString },
    NoSubview { name: CompactString },
    /// The slot was overwritten while its module was loading.
    Superseded { name: CompactString },
    Tree(TreeError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::ModuleNotFound { module } => write!(f, "failed to load module `{}`", module),
            LoadError::NoSubview { name } => write!(f, "No subview called: {}", name),
            LoadError::Superseded { name } => {
                write!(f, "subview `{}` was replaced while loading", name)
            }
            LoadError::Tree(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Tree(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TreeError> for LoadError {
    fn from(e: TreeError) -> Self {
        LoadError::Tree(e)
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "invalid settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}
