// CSV product catalog loading
use prodsim_core::{Catalog, Error, Product, Result};
use serde_json::{Map, Number, Value};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub const DEFAULT_NAME_COLUMN: &str = "product_name";

/// Reads a product table from CSV, one product per data row.
///
/// Row order is kept, so row `i` lines up with row `i` of the similarity
/// matrix. Every column is carried into the product's fields.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    name_column: String,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_COLUMN)
    }
}

impl CatalogLoader {
    pub fn new(name_column: impl Into<String>) -> Self {
        Self {
            name_column: name_column.into(),
        }
    }

    pub fn name_column(&self) -> &str {
        &self.name_column
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Catalog> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| open_error(path, e))?;
        self.read(file, path)
    }

    /// Parse CSV from any reader. `path` is only used in error messages.
    pub fn read<R: Read>(&self, reader: R, path: &Path) -> Result<Catalog> {
        let malformed = |message: String| Error::MalformedCatalog {
            path: path.to_path_buf(),
            message,
        };

        let mut reader = csv::Reader::from_reader(reader);
        let headers = unique_headers(
            reader
                .headers()
                .map_err(|e| malformed(format!("failed to read header row: {e}")))?,
        );

        let name_position = headers
            .iter()
            .position(|h| *h == self.name_column)
            .ok_or_else(|| Error::MissingColumn {
                path: path.to_path_buf(),
                column: self.name_column.clone(),
            })?;

        let mut products = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| malformed(format!("row {}: {e}", row + 1)))?;

            let mut fields = Map::with_capacity(headers.len());
            let mut name = String::new();
            for (position, (header, raw)) in headers.iter().zip(record.iter()).enumerate() {
                if position == name_position {
                    name = raw.to_string();
                    fields.insert(header.clone(), Value::String(name.clone()));
                } else {
                    fields.insert(header.clone(), cell_value(raw));
                }
            }
            products.push(Product::new(name, fields));
        }

        Ok(Catalog::new(products))
    }
}

/// Repeated column names get `.1`, `.2`, ... suffixes so no cell is dropped.
/// The first occurrence keeps its name.
fn unique_headers(headers: &csv::StringRecord) -> Vec<String> {
    let mut seen = HashSet::with_capacity(headers.len());
    headers
        .iter()
        .map(|header| {
            let mut name = header.to_string();
            let mut suffix = 1;
            while seen.contains(&name) {
                name = format!("{header}.{suffix}");
                suffix += 1;
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}

/// Type a CSV cell the way a dataframe record would carry it.
fn cell_value(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::from(i);
    }
    if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(raw.to_string())
}

pub(crate) fn open_error(path: &Path, e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::NotFound {
        Error::MissingArtifact(path.to_path_buf())
    } else {
        Error::Io {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(csv: &str) -> Result<Catalog> {
        CatalogLoader::default().read(csv.as_bytes(), Path::new("products.csv"))
    }

    #[test]
    fn test_reads_rows_in_order() {
        let catalog = parse("product_name,brand,price\nKettle,Acme,24.5\nToaster,Acme,31\nMug,,\n").unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.lookup("Toaster"), Some(1));

        let mug = catalog.row_at(2).unwrap();
        assert_eq!(mug.name, "Mug");
        assert_eq!(mug.get("brand"), Some(&Value::Null));

        let toaster = catalog.row_at(1).unwrap();
        assert_eq!(toaster.get("price"), Some(&Value::from(31)));
        assert_eq!(catalog.row_at(0).unwrap().get("price"), Some(&Value::from(24.5)));
    }

    #[test]
    fn test_name_column_stays_text() {
        let catalog = parse("id,product_name\n7,1984\n").unwrap();
        let product = catalog.row_at(0).unwrap();
        assert_eq!(product.get("product_name"), Some(&Value::from("1984")));
        assert_eq!(product.get("id"), Some(&Value::from(7)));
        assert_eq!(catalog.lookup("1984"), Some(0));
    }

    #[test]
    fn test_field_order_preserved() {
        let catalog = parse("zeta,product_name,alpha\n1,X,2\n").unwrap();
        let keys: Vec<&str> = catalog.row_at(0).unwrap().fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "product_name", "alpha"]);
    }

    #[test]
    fn test_repeated_headers_keep_every_cell() {
        let catalog = parse("product_name,tag,tag,tag.1\nKettle,a,b,c\n").unwrap();
        let kettle = catalog.row_at(0).unwrap();
        let keys: Vec<&str> = kettle.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["product_name", "tag", "tag.1", "tag.1.1"]);
        assert_eq!(kettle.get("tag"), Some(&Value::from("a")));
        assert_eq!(kettle.get("tag.1"), Some(&Value::from("b")));
        assert_eq!(kettle.get("tag.1.1"), Some(&Value::from("c")));
    }

    #[test]
    fn test_repeated_name_column_uses_first() {
        let catalog = parse("product_name,product_name\nKettle,Mug\n").unwrap();
        assert_eq!(catalog.lookup("Kettle"), Some(0));
        assert_eq!(catalog.lookup("Mug"), None);
        assert_eq!(catalog.row_at(0).unwrap().get("product_name.1"), Some(&Value::from("Mug")));
    }

    #[test]
    fn test_quoted_names() {
        let catalog = parse("product_name,category\n\"Tea, green\",drinks\n").unwrap();
        assert_eq!(catalog.lookup("Tea, green"), Some(0));
    }

    #[test]
    fn test_missing_name_column() {
        let err = parse("title,price\nKettle,3\n").unwrap_err();
        assert!(matches!(err, Error::MissingColumn { ref column, .. } if column == "product_name"));
    }

    #[test]
    fn test_custom_name_column() {
        let catalog = CatalogLoader::new("title")
            .read("title,price\nKettle,3\n".as_bytes(), Path::new("x.csv"))
            .unwrap();
        assert_eq!(catalog.lookup("Kettle"), Some(0));
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let err = parse("product_name,price\nKettle,3\nMug\n").unwrap_err();
        assert!(matches!(err, Error::MalformedCatalog { .. }));
    }

    #[test]
    fn test_non_finite_cells_stay_text() {
        let catalog = parse("product_name,rating\nA,NaN\nB,inf\n").unwrap();
        assert_eq!(catalog.row_at(0).unwrap().get("rating"), Some(&Value::from("NaN")));
        assert_eq!(catalog.row_at(1).unwrap().get("rating"), Some(&Value::from("inf")));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "product_name,price").unwrap();
        writeln!(file, "Kettle,3").unwrap();

        let catalog = CatalogLoader::default().load(&path).unwrap();
        assert_eq!(catalog.len(), 1);

        let err = CatalogLoader::default().load(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, Error::MissingArtifact(_)));
    }
}
