//! Product table and the name lookup built over it.

use ahash::AHashMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// One catalog row.
///
/// `name` is the lookup key. `fields` holds every column of the source row,
/// the name column included, in source order; it is what gets serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    #[serde(skip_serializing)]
    pub name: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Product {
    pub fn new(name: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// A product whose only field is its name.
    pub fn named(name_column: &str, name: impl Into<String>) -> Self {
        let name = name.into();
        let mut fields = Map::new();
        fields.insert(name_column.to_string(), Value::String(name.clone()));
        Self { name, fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Immutable product table with an exact-match name index.
///
/// Positions are identities: product `i` is row and column `i` of the
/// similarity matrix. When a name occurs more than once, the first
/// occurrence is the one the index resolves to.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: AHashMap<String, usize>,
    duplicate_names: usize,
    unnamed: usize,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        let mut index = AHashMap::with_capacity(products.len());
        let mut duplicate_names = 0;
        let mut unnamed = 0;

        for (position, product) in products.iter().enumerate() {
            if product.name.is_empty() {
                unnamed += 1;
                continue;
            }
            if index.contains_key(&product.name) {
                duplicate_names += 1;
                continue;
            }
            index.insert(product.name.clone(), position);
        }

        Self {
            products,
            index,
            duplicate_names,
            unnamed,
        }
    }

    /// Exact, case-sensitive lookup.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[inline]
    pub fn row_at(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of distinct names the index can resolve.
    pub fn indexed_names(&self) -> usize {
        self.index.len()
    }

    /// Rows skipped by the index because an earlier row had the same name.
    pub fn duplicate_names(&self) -> usize {
        self.duplicate_names
    }

    /// Rows with an empty name; they keep their position but cannot be queried.
    pub fn unnamed(&self) -> usize {
        self.unnamed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(names: &[&str]) -> Catalog {
        Catalog::new(
            names
                .iter()
                .map(|n| Product::named("product_name", *n))
                .collect(),
        )
    }

    #[test]
    fn test_lookup_is_exact() {
        let catalog = catalog(&["Green Tea", "Black Tea"]);
        assert_eq!(catalog.lookup("Green Tea"), Some(0));
        assert_eq!(catalog.lookup("Black Tea"), Some(1));
        assert_eq!(catalog.lookup("green tea"), None);
        assert_eq!(catalog.lookup("Green Tea "), None);
        assert_eq!(catalog.lookup(""), None);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let catalog = catalog(&["A", "B", "A", "A"]);
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.lookup("A"), Some(0));
        assert_eq!(catalog.indexed_names(), 2);
        assert_eq!(catalog.duplicate_names(), 2);
    }

    #[test]
    fn test_unnamed_rows_keep_position() {
        let catalog = catalog(&["A", "", "C"]);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.unnamed(), 1);
        assert_eq!(catalog.lookup("C"), Some(2));
        assert!(catalog.row_at(1).is_some());
        assert!(catalog.row_at(3).is_none());
    }

    #[test]
    fn test_product_serializes_fields_only() {
        let mut fields = Map::new();
        fields.insert("product_name".into(), Value::from("Kettle"));
        fields.insert("price".into(), Value::from(24.5));
        let product = Product::new("Kettle", fields);

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json, serde_json::json!({"product_name": "Kettle", "price": 24.5}));
    }
}
