/// Loader for the curated schemes document.
///
/// Expected shape:
/// ```json
/// { "metadata": { ... }, "schemes": { "housing": [ {title, description, link, keywords} ] } }
/// ```
///
/// The catalog is read once at startup and never mutated. Loading is two-level:
/// - a missing or unparseable document yields an empty catalog (logged, never fatal)
/// - inside a readable document, each record is validated on its own; malformed records
///   are skipped with a warning so one bad entry cannot hide the rest
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::model::{Category, SchemeRecord};

static URI_SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("valid regex"));

#[derive(Debug, Clone, Default)]
pub struct SchemeCatalog {
    categories: Vec<Category>,
    metadata: Value,
}

/// Top-level document. `schemes` stays untyped so records can be validated one by one.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    metadata: Value,
    schemes: Map<String, Value>,
}

impl SchemeCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the catalog at `path`, degrading to an empty catalog on any document-level
    /// failure.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => {
                info!(
                    path = %path.display(),
                    categories = catalog.category_count(),
                    schemes = catalog.total_schemes(),
                    "loaded schemes catalog"
                );
                catalog
            }
            Err(e) => {
                error!(error = %e, "schemes catalog unavailable, starting with an empty catalog");
                Self::empty()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, AppError> {
        let document: CatalogDocument = serde_json::from_str(content)?;
        let mut categories = Vec::with_capacity(document.schemes.len());

        for (name, entries) in document.schemes {
            let Value::Array(entries) = entries else {
                warn!(category = %name, "category is not a list of schemes, skipping");
                continue;
            };

            let mut seen_titles: HashSet<String> = HashSet::new();
            let mut schemes = Vec::with_capacity(entries.len());
            for (index, entry) in entries.into_iter().enumerate() {
                match validate_record(entry) {
                    Ok(record) => {
                        if !seen_titles.insert(record.title.to_lowercase()) {
                            warn!(
                                category = %name,
                                index,
                                title = %record.title,
                                "duplicate scheme title in category, skipping"
                            );
                            continue;
                        }
                        schemes.push(record);
                    }
                    Err(reason) => {
                        warn!(category = %name, index, reason, "malformed scheme record, skipping");
                    }
                }
            }

            categories.push(Category { name, schemes });
        }

        Ok(Self {
            categories,
            metadata: document.metadata,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn total_schemes(&self) -> usize {
        self.categories.iter().map(|c| c.schemes.len()).sum()
    }

    pub fn metadata(&self) -> &Value {
        &self.metadata
    }

    pub fn is_empty(&self) -> bool {
        self.total_schemes() == 0
    }

    /// All records with their category names, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemeRecord)> {
        self.categories
            .iter()
            .flat_map(|c| c.schemes.iter().map(move |s| (c.name.as_str(), s)))
    }
}

fn validate_record(entry: Value) -> Result<SchemeRecord, String> {
    let record: SchemeRecord = serde_json::from_value(entry).map_err(|e| e.to_string())?;
    if record.title.trim().is_empty() {
        return Err("empty title".to_string());
    }
    if !URI_SCHEME_RE.is_match(&record.link) {
        return Err(format!("link '{}' does not start with a URI scheme", record.link));
    }
    Ok(record)
}
