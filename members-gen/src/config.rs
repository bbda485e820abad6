// Generation settings shared by the CLI and build scripts.

use crate::error::GenError;
use std::path::PathBuf;

pub const DEFAULT_MAX_ARITY: usize = 64;

/// Largest arity the three-digit binding names can encode.
pub const ARITY_LIMIT: usize = 999;

pub const DEFAULT_REFLECT_PATH: &str = "crate::reflect";
pub const DEFAULT_VISITOR_PATH: &str = "super::members_visitor";

pub const DEFAULT_VISIT_OUT: &str = "members_visitor.rs";
pub const DEFAULT_TIE_OUT: &str = "members_tie.rs";

/// Upper bound `N` of the generated arity range `1..=N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxArity(usize);

impl MaxArity {
    pub fn new(value: i64) -> Result<Self, GenError> {
        if value < 1 || value > ARITY_LIMIT as i64 {
            return Err(GenError::InvalidMaxArity {
                value,
                max: ARITY_LIMIT,
            });
        }
        Ok(Self(value as usize))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for MaxArity {
    fn default() -> Self {
        Self(DEFAULT_MAX_ARITY)
    }
}

/// Where the artifacts go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// One file per mode.
    Separate { visit: PathBuf, tie: PathBuf },
    /// Visit and tie tables in one file.
    Combined(PathBuf),
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Separate {
            visit: PathBuf::from(DEFAULT_VISIT_OUT),
            tie: PathBuf::from(DEFAULT_TIE_OUT),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub max_arity: MaxArity,
    /// Module that defines the `Decompose` trait.
    pub reflect_path: String,
    /// Module holding the visit artifact, as seen from the tie artifact.
    pub visitor_path: String,
    pub layout: Layout,
}

impl GeneratorConfig {
    pub fn new(max_arity: i64) -> Result<Self, GenError> {
        Ok(Self {
            max_arity: MaxArity::new(max_arity)?,
            ..Self::default()
        })
    }

    pub fn with_reflect_path(mut self, path: &str) -> Result<Self, GenError> {
        self.reflect_path = checked_path(path)?;
        Ok(self)
    }

    pub fn with_visitor_path(mut self, path: &str) -> Result<Self, GenError> {
        self.visitor_path = checked_path(path)?;
        Ok(self)
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn n(&self) -> usize {
        self.max_arity.get()
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_arity: MaxArity::default(),
            reflect_path: DEFAULT_REFLECT_PATH.to_string(),
            visitor_path: DEFAULT_VISITOR_PATH.to_string(),
            layout: Layout::default(),
        }
    }
}

// Accepts `a::b::c`, including the `crate`, `self` and `super` keywords.
fn checked_path(path: &str) -> Result<String, GenError> {
    let path = path.trim();
    let valid = !path.is_empty()
        && path.split("::").all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(c) if c == '_' || c.is_ascii_alphabetic() => {
                    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
                }
                _ => false,
            }
        });
    if valid {
        Ok(path.to_string())
    } else {
        Err(GenError::InvalidPath(path.to_string()))
    }
}
