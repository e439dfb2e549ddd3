//! Template repository boundary
//!
//! [`TemplateRepository`] is the catalog's view of the template backend.
//! [`InMemoryTemplateRepository`] keeps templates in insertion order behind a
//! lock and can be loaded from JSON or YAML catalog files.

use crate::error::{CatalogError, PersistenceError};
use crate::filter::CatalogFilterState;
use async_trait::async_trait;
use calc_template::{CalculationTemplate, TemplateId};
use chrono::Utc;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::path::Path;

/// Backend access for catalog templates
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Fetch one template
    ///
    /// # Errors
    /// `CatalogError::NotFound` when the id does not resolve.
    async fn get_template(&self, id: &TemplateId) -> Result<CalculationTemplate, CatalogError>;

    /// List templates for a catalog view
    ///
    /// Implementations may narrow the result with any subset of `filters`;
    /// the filter engine applies the full filter afterwards.
    async fn list_templates(
        &self,
        filters: &CatalogFilterState,
    ) -> Result<Vec<CalculationTemplate>, CatalogError>;

    /// Flip the favorite flag, returning the new value
    async fn toggle_favorite(&self, id: &TemplateId) -> Result<bool, PersistenceError>;

    /// Count one completed calculation, returning the new usage count
    async fn record_usage(&self, id: &TemplateId) -> Result<u64, PersistenceError>;
}

/// File format of a catalog document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl CatalogFormat {
    /// Guess from a file extension; anything but `.yaml`/`.yml` is JSON
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Process-local template store
#[derive(Debug, Default)]
pub struct InMemoryTemplateRepository {
    templates: RwLock<IndexMap<TemplateId, CalculationTemplate>>,
}

impl InMemoryTemplateRepository {
    /// Create empty repository
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from templates, checking each schema and id uniqueness
    ///
    /// # Errors
    /// The first invalid or duplicate template.
    pub fn from_templates(
        templates: impl IntoIterator<Item = CalculationTemplate>,
    ) -> Result<Self, CatalogError> {
        let repo = Self::new();
        for template in templates {
            repo.insert(template)?;
        }
        Ok(repo)
    }

    /// Parse a catalog document: a list of templates
    ///
    /// # Errors
    /// Parse failures and invalid templates.
    pub fn from_source(source: &str, format: CatalogFormat) -> Result<Self, CatalogError> {
        let templates: Vec<CalculationTemplate> = match format {
            CatalogFormat::Json => {
                serde_json::from_str(source).map_err(|e| CatalogError::Parse(e.to_string()))?
            }
            CatalogFormat::Yaml => {
                serde_yaml::from_str(source).map_err(|e| CatalogError::Parse(e.to_string()))?
            }
        };
        Self::from_templates(templates)
    }

    /// Load a catalog file; format follows the extension
    ///
    /// # Errors
    /// IO, parse and schema failures.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let source =
            std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;
        let repo = Self::from_source(&source, CatalogFormat::from_path(path))?;
        tracing::info!(path = %path.display(), templates = repo.len(), "catalog loaded");
        Ok(repo)
    }

    /// Add a template
    ///
    /// # Errors
    /// Schema violations and duplicate ids.
    pub fn insert(&self, template: CalculationTemplate) -> Result<(), CatalogError> {
        template
            .check_schema()
            .map_err(|source| CatalogError::InvalidTemplate {
                id: template.id.clone(),
                source,
            })?;

        let mut guard = self.templates.write();
        if guard.contains_key(&template.id) {
            return Err(CatalogError::DuplicateId(template.id));
        }
        guard.insert(template.id.clone(), template);
        Ok(())
    }

    /// Snapshot of every template, in insertion order
    #[must_use]
    pub fn all(&self) -> Vec<CalculationTemplate> {
        self.templates.read().values().cloned().collect()
    }

    /// Number of stored templates
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.read().len()
    }

    /// Whether the repository is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.read().is_empty()
    }
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn get_template(&self, id: &TemplateId) -> Result<CalculationTemplate, CatalogError> {
        self.templates
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    async fn list_templates(
        &self,
        filters: &CatalogFilterState,
    ) -> Result<Vec<CalculationTemplate>, CatalogError> {
        let guard = self.templates.read();
        Ok(guard
            .values()
            .filter(|t| filters.category.as_ref().map_or(true, |c| *c == t.category))
            .filter(|t| {
                filters
                    .subcategory
                    .as_ref()
                    .map_or(true, |s| t.subcategory.as_ref() == Some(s))
            })
            .cloned()
            .collect())
    }

    async fn toggle_favorite(&self, id: &TemplateId) -> Result<bool, PersistenceError> {
        let mut guard = self.templates.write();
        let template = guard
            .get_mut(id)
            .ok_or_else(|| PersistenceError::UnknownTemplate(id.clone()))?;
        template.is_favorite = !template.is_favorite;
        Ok(template.is_favorite)
    }

    async fn record_usage(&self, id: &TemplateId) -> Result<u64, PersistenceError> {
        let mut guard = self.templates.write();
        let template = guard
            .get_mut(id)
            .ok_or_else(|| PersistenceError::UnknownTemplate(id.clone()))?;
        Ok(template.record_usage(Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_template::TemplateParameter;

    fn sample() -> InMemoryTemplateRepository {
        InMemoryTemplateRepository::from_templates([
            CalculationTemplate::new("a", "A", "electrical").with_subcategory("lv"),
            CalculationTemplate::new("b", "B", "structural"),
            CalculationTemplate::new("c", "C", "electrical").with_subcategory("mv"),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn get_and_not_found() {
        let repo = sample();
        assert_eq!(repo.get_template(&"b".into()).await.unwrap().name, "B");
        assert!(matches!(
            repo.get_template(&"zz".into()).await,
            Err(CatalogError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_keeps_order_and_narrows_by_category() {
        let repo = sample();
        let all = repo.list_templates(&CatalogFilterState::unfiltered()).await.unwrap();
        let ids: Vec<_> = all.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let f = CatalogFilterState::unfiltered().with_category("electrical").with_subcategory("mv");
        let some = repo.list_templates(&f).await.unwrap();
        assert_eq!(some.len(), 1);
        assert_eq!(some[0].id.as_str(), "c");
    }

    #[tokio::test]
    async fn toggle_and_usage() {
        let repo = sample();
        assert!(repo.toggle_favorite(&"a".into()).await.unwrap());
        assert!(!repo.toggle_favorite(&"a".into()).await.unwrap());
        assert_eq!(repo.record_usage(&"a".into()).await.unwrap(), 1);
        assert_eq!(repo.record_usage(&"a".into()).await.unwrap(), 2);
        assert_eq!(
            repo.toggle_favorite(&"zz".into()).await,
            Err(PersistenceError::UnknownTemplate("zz".into()))
        );
    }

    #[test]
    fn rejects_duplicates_and_bad_schemas() {
        let repo = sample();
        assert!(matches!(
            repo.insert(CalculationTemplate::new("a", "Again", "x")),
            Err(CatalogError::DuplicateId(_))
        ));
        let bad = CalculationTemplate::new("d", "D", "x")
            .with_parameter(TemplateParameter::select("m", "M", Vec::<String>::new()));
        assert!(matches!(repo.insert(bad), Err(CatalogError::InvalidTemplate { .. })));
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn parses_yaml_catalog() {
        let yaml = r#"
- id: wind-01
  name: Carga de viento
  category: structural
  isVerified: true
  parameters:
    - name: speed
      label: Velocidad
      type: number
      required: true
      min: 0
      unit: m/s
"#;
        let repo = InMemoryTemplateRepository::from_source(yaml, CatalogFormat::Yaml).unwrap();
        assert_eq!(repo.len(), 1);
        assert!(repo.all()[0].is_verified);
    }

    #[test]
    fn parse_errors_surface() {
        assert!(matches!(
            InMemoryTemplateRepository::from_source("{not json", CatalogFormat::Json),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"[{"id":"x","name":"X","category":"c"}]"#).unwrap();
        let repo = InMemoryTemplateRepository::from_path(&path).unwrap();
        assert_eq!(repo.len(), 1);

        let missing = dir.path().join("missing.yml");
        assert!(matches!(
            InMemoryTemplateRepository::from_path(&missing),
            Err(CatalogError::Io { .. })
        ));
        assert_eq!(CatalogFormat::from_path(&missing), CatalogFormat::Yaml);
    }
}
