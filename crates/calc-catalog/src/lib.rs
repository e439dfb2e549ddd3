//! Calc Catalog
//!
//! Search, filtering and sorting of calculation templates, plus the
//! repository boundary the catalog reads from.
//!
//! # Overview
//!
//! - **TemplateFilterEngine**: pure filter + stable sort over a collection
//! - **CatalogFilterState**: search term, category, difficulty, flags, sort
//! - **TemplateRepository**: async backend trait; [`InMemoryTemplateRepository`]
//!   loads JSON/YAML catalog files
//! - **Catalog**: one catalog view (filters + fetched templates + cache)
//!
//! # Example
//!
//! ```rust
//! use calc_catalog::{CatalogFilterState, SortBy, TemplateFilterEngine};
//! use calc_template::CalculationTemplate;
//!
//! let templates = vec![
//!     CalculationTemplate::new("a", "Análisis sísmico", "structural").verified(),
//!     CalculationTemplate::new("b", "Carga de viento", "structural").verified(),
//! ];
//!
//! let filter = CatalogFilterState::default()
//!     .with_search("sismic")
//!     .with_sort(SortBy::Name);
//! let found = TemplateFilterEngine::new().apply(&templates, &filter);
//! assert_eq!(found.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod fold;
pub mod repository;

// Re-exports
pub use cache::TemplateCache;
pub use catalog::Catalog;
pub use config::CatalogConfig;
pub use error::{CatalogError, PersistenceError, RecoveryAction};
pub use filter::{compare_names, CatalogFilterState, SortBy, TemplateFilterEngine};
pub use fold::fold_text;
pub use repository::{CatalogFormat, InMemoryTemplateRepository, TemplateRepository};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for catalog views
    pub use crate::{
        Catalog, CatalogConfig, CatalogError, CatalogFilterState, InMemoryTemplateRepository,
        SortBy, TemplateFilterEngine, TemplateRepository,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
