//! Target (namespace, method) pairs the resolver looks for.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::constants::{DEFAULT_METHODS, DEFAULT_NAMESPACES, DOTTED_TARGET_RE};

/// Error raised while building a [`TargetSpec`] from user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// The string is not a dotted identifier chain with at least two segments
    #[error("invalid target `{0}`: expected a dotted name such as `console.log`")]
    Invalid(String),
}

/// One `namespace.method` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Target {
    /// Dotted namespace, e.g. `window.console`
    pub namespace: String,
    /// Invoked method name, e.g. `log`
    pub method: String,
}

impl Target {
    /// Create a target from its two parts
    #[must_use]
    pub fn new(namespace: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            method: method.into(),
        }
    }

    /// Parse `window.console.warn` into (`window.console`, `warn`).
    ///
    /// # Errors
    /// Returns [`TargetError::Invalid`] when `dotted` is not an identifier chain
    /// of at least two segments.
    pub fn parse(dotted: &str) -> Result<Self, TargetError> {
        let dotted = dotted.trim();
        if !DOTTED_TARGET_RE().is_match(dotted) {
            return Err(TargetError::Invalid(dotted.to_owned()));
        }
        match dotted.rsplit_once('.') {
            Some((namespace, method)) => Ok(Self::new(namespace, method)),
            None => Err(TargetError::Invalid(dotted.to_owned())),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.method)
    }
}

/// Ordered set of targets with constant-time membership checks.
#[derive(Debug, Clone)]
pub struct TargetSpec {
    ordered: Vec<Target>,
    by_namespace: FxHashMap<String, FxHashSet<String>>,
}

impl TargetSpec {
    /// Empty spec; matches nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            ordered: Vec::new(),
            by_namespace: FxHashMap::default(),
        }
    }

    /// Every namespace paired with every method, namespaces outermost.
    #[must_use]
    pub fn cross<N, M>(namespaces: &[N], methods: &[M]) -> Self
    where
        N: AsRef<str>,
        M: AsRef<str>,
    {
        let mut spec = Self::empty();
        for namespace in namespaces {
            for method in methods {
                spec.insert(Target::new(namespace.as_ref(), method.as_ref()));
            }
        }
        spec
    }

    /// Legacy mode: the default `console`/`window.console` namespaces with
    /// caller-chosen method names.
    #[must_use]
    pub fn from_methods<M: AsRef<str>>(methods: &[M]) -> Self {
        Self::cross(DEFAULT_NAMESPACES, methods)
    }

    /// Build a spec from dotted strings such as `console.debug`.
    ///
    /// # Errors
    /// Returns the first invalid entry.
    pub fn parse_list<S: AsRef<str>>(dotted: &[S]) -> Result<Self, TargetError> {
        let mut spec = Self::empty();
        for entry in dotted {
            spec.insert(Target::parse(entry.as_ref())?);
        }
        Ok(spec)
    }

    /// Add a target. Returns `false` if it was already present.
    pub fn insert(&mut self, target: Target) -> bool {
        let fresh = self
            .by_namespace
            .entry(target.namespace.clone())
            .or_default()
            .insert(target.method.clone());
        if fresh {
            self.ordered.push(target);
        }
        fresh
    }

    /// Whether `namespace.method` is targeted.
    #[must_use]
    pub fn contains(&self, namespace: &str, method: &str) -> bool {
        self.by_namespace
            .get(namespace)
            .is_some_and(|methods| methods.contains(method))
    }

    /// Targets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.ordered.iter()
    }

    /// Number of distinct targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether no target is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self::cross(DEFAULT_NAMESPACES, DEFAULT_METHODS)
    }
}

impl FromIterator<Target> for TargetSpec {
    fn from_iter<I: IntoIterator<Item = Target>>(iter: I) -> Self {
        let mut spec = Self::empty();
        for target in iter {
            spec.insert(target);
        }
        spec
    }
}
