//! Process-wide immutable registries.

use crate::label::LabelTaxonomy;
use crate::template::TemplateStandard;
use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

/// Label taxonomy plus the template standards the engine can produce
///
/// Built once and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub taxonomy: LabelTaxonomy,
    pub standards: BTreeSet<TemplateStandard>,
}

impl Catalog {
    pub fn standard() -> Self {
        Self {
            taxonomy: LabelTaxonomy::standard(),
            standards: TemplateStandard::ALL.into_iter().collect(),
        }
    }

    /// The process-wide standard catalog.
    pub fn shared() -> Arc<Catalog> {
        static SHARED: OnceLock<Arc<Catalog>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Catalog::standard())).clone()
    }

    pub fn supports(&self, standard: TemplateStandard) -> bool {
        self.standards.contains(&standard)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
