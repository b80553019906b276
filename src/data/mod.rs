//! Restaurant data snapshot: menu, FAQ, branches, hours and about text.
//!
//! A [`RestaurantData`] is read once from a directory of JSON documents and
//! then treated as frozen. Consumers share it behind an `Arc`; a refresh
//! builds a new snapshot and swaps the `Arc` rather than mutating in place.

pub mod error;
pub mod model;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

pub use error::{DataError, DataResult};
pub use model::{
    About, Addon, Branch, Catalog, Category, FaqEntry, Flavour, HoursEntry, MenuItem, Variant,
    Weekday, format_price,
};

use model::lenient_records;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "DINEBOT_DATA_DIR";

/// Directories probed, in order, when no data directory is configured.
pub const DEFAULT_DATA_DIRS: [&str; 2] = ["data", "Data"];

const DEFAULT_RESTAURANT: &str = "Restaurant";
const DEFAULT_CURRENCY: &str = "PKR";

/// Immutable view of everything the assistant knows about the restaurant.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantData {
    pub restaurant_name: String,
    pub currency: String,
    pub catalog: Catalog,
    pub faqs: Vec<FaqEntry>,
    pub branches: Vec<Branch>,
    pub hours: Vec<HoursEntry>,
    pub about: About,
}

impl Default for RestaurantData {
    fn default() -> Self {
        Self {
            restaurant_name: DEFAULT_RESTAURANT.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            catalog: Catalog::default(),
            faqs: Vec::new(),
            branches: Vec::new(),
            hours: Vec::new(),
            about: About::default(),
        }
    }
}

impl RestaurantData {
    /// Load a snapshot from `dir`.
    ///
    /// `menu.json` and `faq.json` are required; `about.json`, `branches.json`
    /// and `hours.json` may be absent.
    pub fn load(dir: &Path) -> DataResult<Self> {
        let menu = read_json(&dir.join("menu.json"))?;
        let faq = read_json(&dir.join("faq.json"))?;
        let about = read_optional_json(&dir.join("about.json"))?;
        let branches = read_optional_json(&dir.join("branches.json"))?;
        let hours = read_optional_json(&dir.join("hours.json"))?;

        let data = Self::from_documents(&menu, &faq, about.as_ref(), branches.as_ref(), hours.as_ref());
        tracing::info!(
            dir = %dir.display(),
            restaurant = %data.restaurant_name,
            categories = data.catalog.categories().len(),
            items = data.catalog.item_count(),
            faqs = data.faqs.len(),
            branches = data.branches.len(),
            "loaded restaurant data"
        );
        Ok(data)
    }

    /// Build a snapshot from already-parsed documents.
    pub fn from_documents(
        menu: &Value,
        faq: &Value,
        about: Option<&Value>,
        branches: Option<&Value>,
        hours: Option<&Value>,
    ) -> Self {
        // Either `{restaurant, currency, menu: {...}}` or a bare category map.
        let (restaurant_name, currency, categories) = match menu.get("menu") {
            Some(categories) => (
                text_field(menu, "restaurant").unwrap_or(DEFAULT_RESTAURANT),
                text_field(menu, "currency").unwrap_or(DEFAULT_CURRENCY),
                categories,
            ),
            None => (DEFAULT_RESTAURANT, DEFAULT_CURRENCY, menu),
        };

        Self {
            restaurant_name: restaurant_name.to_string(),
            currency: currency.to_string(),
            catalog: Catalog::from_json(categories),
            faqs: records(Some(faq), "faqs", "faq entry"),
            branches: records(branches, "branches", "branch"),
            hours: records(hours, "hours", "hours entry"),
            about: about
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .unwrap_or_default(),
        }
    }

    /// Resolve the data directory: explicit path, then the environment, then
    /// the default probe list relative to the working directory.
    pub fn discover(explicit: Option<&Path>) -> DataResult<PathBuf> {
        if let Some(dir) = explicit {
            return Ok(dir.to_path_buf());
        }
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        DEFAULT_DATA_DIRS
            .iter()
            .map(PathBuf::from)
            .find(|dir| dir.join("menu.json").is_file())
            .ok_or_else(|| DataError::NoDataDir {
                tried: DEFAULT_DATA_DIRS.join(", "),
            })
    }

    /// [`discover`](Self::discover) then [`load`](Self::load).
    pub fn open(explicit: Option<&Path>) -> DataResult<Self> {
        Self::load(&Self::discover(explicit)?)
    }
}

fn text_field<'v>(value: &'v Value, key: &str) -> Option<&'v str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Records under `key`, or the document itself when it is a bare array.
fn records<T: serde::de::DeserializeOwned>(doc: Option<&Value>, key: &str, what: &str) -> Vec<T> {
    match doc {
        Some(list @ Value::Array(_)) => lenient_records(list, what),
        Some(doc) => doc
            .get(key)
            .map(|list| lenient_records(list, what))
            .unwrap_or_default(),
        None => Vec::new(),
    }
}

fn read_json(path: &Path) -> DataResult<Value> {
    let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DataError::Json {
        path: path.display().to_string(),
        source,
    })
}

fn read_optional_json(path: &Path) -> DataResult<Option<Value>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "optional data file absent");
        return Ok(None);
    }
    read_json(path).map(Some)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn wrapped_menu_reads_name_and_currency() {
        let data = RestaurantData::from_documents(
            &json!({
                "restaurant": "Speedy Bites",
                "currency": "USD",
                "menu": {"burgers": [{"name": "Zinger Burger"}]},
            }),
            &json!({"faqs": []}),
            None,
            None,
            None,
        );
        assert_eq!(data.restaurant_name, "Speedy Bites");
        assert_eq!(data.currency, "USD");
        assert_eq!(data.catalog.item_count(), 1);
    }

    #[test]
    fn bare_menu_uses_defaults() {
        let data = RestaurantData::from_documents(
            &json!({"burgers": [{"name": "Zinger Burger"}]}),
            &json!({"faqs": []}),
            None,
            None,
            None,
        );
        assert_eq!(data.restaurant_name, "Restaurant");
        assert_eq!(data.currency, "PKR");
        assert_eq!(data.catalog.item_count(), 1);
    }

    #[test]
    fn malformed_faqs_and_branches_are_skipped() {
        let data = RestaurantData::from_documents(
            &json!({}),
            &json!({"faqs": [
                {"question": "Is your meat halal?", "answer": "Yes."},
                {"question": "No answer"},
                {"answer": "No question"},
                17,
            ]}),
            None,
            Some(&json!({"branches": [{"name": "Main", "phone": 4211}, "bad"]})),
            Some(&json!([{"branch_name": "Main", "regular": {"monday": "9-5"}}])),
        );
        assert_eq!(data.faqs.len(), 1);
        assert_eq!(data.branches.len(), 1);
        assert_eq!(data.branches[0].phone.as_deref(), Some("4211"));
        assert_eq!(data.hours.len(), 1);
        assert!(data.about.is_empty());
    }

    #[test]
    fn missing_required_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RestaurantData::load(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn optional_files_may_be_absent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("menu.json"), r#"{"menu": {}}"#).unwrap();
        std::fs::write(dir.path().join("faq.json"), r#"{"faqs": []}"#).unwrap();
        let data = RestaurantData::load(dir.path()).unwrap();
        assert!(data.catalog.is_empty());
        assert!(data.branches.is_empty());
        assert!(data.hours.is_empty());
    }

    #[test]
    fn invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("menu.json"), "{ nope").unwrap();
        std::fs::write(dir.path().join("faq.json"), r#"{"faqs": []}"#).unwrap();
        let err = RestaurantData::load(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::Json { .. }));
    }

    #[test]
    fn explicit_dir_wins_discovery() {
        let dir = Path::new("/somewhere/else");
        assert_eq!(RestaurantData::discover(Some(dir)).unwrap(), dir);
    }
}
