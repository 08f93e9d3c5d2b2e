//! Rendered artifacts and the registry that collects them during a run.

use crate::codegen::kinds::Dialect;
use crate::error::ContentError;
use crate::template::TemplateStandard;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One rendered artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    pub kind: TemplateStandard,
    pub name: String,
    pub text: String,
    pub path: PathBuf,
}

impl Content {
    pub fn new(
        kind: TemplateStandard,
        name: impl Into<String>,
        text: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            text: text.into(),
            path: path.into(),
        }
    }

    /// BLAKE3 digest of the rendered text, hex encoded.
    pub fn digest(&self) -> String {
        hex::encode(blake3::hash(self.text.as_bytes()).as_bytes())
    }

    /// Package the artifact was placed in, recovered from its path.
    pub fn package(&self, dialect: Dialect) -> Option<String> {
        let root = if self.kind.is_test() {
            dialect.test_root()
        } else {
            dialect.source_root()
        };
        let relative = self.path.strip_prefix(Path::new(root)).ok()?;
        let segments: Vec<_> = relative
            .parent()?
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        (!segments.is_empty()).then(|| segments.join("."))
    }

    /// Fully qualified class name for source artifacts.
    pub fn qualified_name(&self, dialect: Dialect) -> Option<String> {
        self.package(dialect)
            .map(|package| format!("{}.{}", package, self.name))
    }
}

/// Ordered content registry, unique by (kind, name)
#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    items: Vec<Content>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an artifact. A second artifact with the same kind and name is rejected.
    pub fn add(&mut self, content: Content) -> Result<(), ContentError> {
        if self.find(content.kind, &content.name).is_some() {
            return Err(ContentError::DuplicateContent {
                kind: content.kind,
                name: content.name,
            });
        }
        self.items.push(content);
        Ok(())
    }

    /// Register a batch of artifacts, or none of them if any would collide
    /// with a registered artifact or with another in the batch.
    pub fn add_all(&mut self, batch: Vec<Content>) -> Result<(), ContentError> {
        for (index, content) in batch.iter().enumerate() {
            let repeated = batch[..index]
                .iter()
                .any(|c| c.kind == content.kind && c.name == content.name);
            if repeated || self.find(content.kind, &content.name).is_some() {
                return Err(ContentError::DuplicateContent {
                    kind: content.kind,
                    name: content.name.clone(),
                });
            }
        }
        self.items.extend(batch);
        Ok(())
    }

    pub fn find(&self, kind: TemplateStandard, name: &str) -> Option<&Content> {
        self.items
            .iter()
            .find(|c| c.kind == kind && c.name == name)
    }

    pub fn of_kind(&self, kind: TemplateStandard) -> impl Iterator<Item = &Content> + '_ {
        self.items.iter().filter(move |c| c.kind == kind)
    }

    pub fn contains_kind(&self, kind: TemplateStandard) -> bool {
        self.of_kind(kind).next().is_some()
    }

    /// Package of the first artifact of `kind`, if any was generated.
    pub fn find_package(&self, kind: TemplateStandard, dialect: Dialect) -> Option<String> {
        self.of_kind(kind).find_map(|c| c.package(dialect))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Content> + '_ {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Content> {
        self.items
    }
}
