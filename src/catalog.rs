//! Endpoint catalog - named collections of endpoint descriptors
//!
//! The built-in collections are embedded at compile time. User collections are
//! `*.yaml` files in the data directory and are appended after them.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::CatalogError;
use crate::models::{Collection, EndpointDescriptor};

const BUILTIN_CATALOG: &str = include_str!("../catalog/default.yaml");

/// Result of resolving a slug
#[derive(Debug, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a EndpointDescriptor),
    /// Unknown slug; navigate to this default slug instead
    Redirect(&'a str),
}

#[derive(Clone, Debug)]
pub struct Catalog {
    collections: Vec<Collection>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate slugs and empty catalogs
    pub fn new(collections: Vec<Collection>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for endpoint in collections.iter().flat_map(|c| c.endpoints.iter()) {
            if !seen.insert(endpoint.slug.as_str()) {
                return Err(CatalogError::DuplicateSlug(endpoint.slug.clone()));
            }
        }
        if seen.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Catalog { collections })
    }

    /// The catalog shipped with the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(parse_collections(BUILTIN_CATALOG, "builtin")?)
    }

    /// Built-in collections followed by every `*.yaml` file in `dir`
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let mut collections = parse_collections(BUILTIN_CATALOG, "builtin")?;

        if dir.is_dir() {
            let mut paths: Vec<_> = fs::read_dir(dir)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| {
                    matches!(
                        p.extension().and_then(|e| e.to_str()),
                        Some("yaml") | Some("yml")
                    )
                })
                .collect();
            paths.sort();

            for path in paths {
                let content = fs::read_to_string(&path)?;
                let name = path.display().to_string();
                let mut parsed = parse_collections(&content, &name)?;
                tracing::info!(file = %name, collections = parsed.len(), "Loaded user collections");
                collections.append(&mut parsed);
            }
        }

        Self::new(collections)
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Every descriptor, in collection order
    pub fn flat(&self) -> impl Iterator<Item = &EndpointDescriptor> {
        self.collections.iter().flat_map(|c| c.endpoints.iter())
    }

    pub fn len(&self) -> usize {
        self.flat().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<&EndpointDescriptor> {
        self.flat().nth(index)
    }

    pub fn find(&self, slug: &str) -> Option<&EndpointDescriptor> {
        self.flat().find(|e| e.slug == slug)
    }

    pub fn position(&self, slug: &str) -> Option<usize> {
        self.flat().position(|e| e.slug == slug)
    }

    /// Slug of the view used when a lookup misses
    pub fn default_slug(&self) -> &str {
        self.flat().next().map(|e| e.slug.as_str()).unwrap_or_default()
    }

    pub fn lookup(&self, slug: &str) -> Lookup<'_> {
        match self.find(slug) {
            Some(endpoint) => Lookup::Found(endpoint),
            None => Lookup::Redirect(self.default_slug()),
        }
    }
}

/// A file holds either a list of collections or a single collection
fn parse_collections(content: &str, source_name: &str) -> Result<Vec<Collection>, CatalogError> {
    let parse_error = |error| CatalogError::Parse {
        source_name: source_name.to_string(),
        error,
    };

    let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;
    if value.is_sequence() {
        serde_yaml::from_value(value).map_err(parse_error)
    } else {
        serde_yaml::from_value::<Collection>(value)
            .map(|c| vec![c])
            .map_err(parse_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HttpMethod, ParamLocation};
    use tempfile::tempdir;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.len() >= 5);
        assert_eq!(catalog.default_slug(), "get-profile");

        let email = catalog.find("validate-email").unwrap();
        assert_eq!(email.method, HttpMethod::GET);
        assert_eq!(email.params[0].location, ParamLocation::Path);
    }

    #[test]
    fn test_lookup_redirects_unknown_slug() {
        let catalog = Catalog::builtin().unwrap();
        assert!(matches!(catalog.lookup("lookup-ip"), Lookup::Found(e) if e.slug == "lookup-ip"));
        assert_eq!(catalog.lookup("no-such-endpoint"), Lookup::Redirect("get-profile"));
    }

    #[test]
    fn test_duplicate_slugs_rejected() {
        let yaml = r#"
name: Dupes
endpoints:
  - slug: a
    method: GET
    url: /a
  - slug: a
    method: POST
    url: /a
"#;
        let collections = parse_collections(yaml, "dupes").unwrap();
        assert!(matches!(
            Catalog::new(collections),
            Err(CatalogError::DuplicateSlug(s)) if s == "a"
        ));
    }

    #[test]
    fn test_invalid_location_is_a_parse_error() {
        let yaml = r#"
name: Bad
endpoints:
  - slug: bad
    method: GET
    url: /bad
    params:
      - key: x
        location: cookie
"#;
        assert!(matches!(
            parse_collections(yaml, "bad.yaml"),
            Err(CatalogError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_appends_user_collections() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("extra.yaml"),
            "name: Extra\nendpoints:\n  - slug: ping\n    method: GET\n    url: https://example.com/ping\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.collections().last().unwrap().name, "Extra");
        assert_eq!(catalog.position("ping"), Some(catalog.len() - 1));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }
}
