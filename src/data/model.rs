//! Restaurant records: catalog, FAQ, branches, opening hours, about.
//!
//! Deserialization is lenient at record granularity. A malformed record
//! (missing `name`/`question`, wrong field type) is dropped and its siblings
//! are kept; optional fields of the wrong type read as absent.

use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Lenient field helpers ───────────────────────────────────────────────

/// Parse each element of an array on its own, dropping the ones that fail.
pub(crate) fn lenient_records<T: DeserializeOwned>(value: &Value, what: &str) -> Vec<T> {
    let Some(elements) = value.as_array() else {
        return Vec::new();
    };
    elements
        .iter()
        .filter_map(|element| match T::deserialize(element) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(record = what, "skipping malformed record: {e}");
                None
            }
        })
        .collect()
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_records(&value, std::any::type_name::<T>()))
}

/// Strings, numbers and booleans read as text; anything else as absent.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Non-negative numbers only.
fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(deserializer)?
        .as_f64()
        .filter(|p| p.is_finite() && *p >= 0.0))
}

fn lenient_strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => values
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Format a price without a trailing `.0` for whole amounts.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 && price.abs() < 1e15 {
        format!("{}", price as i64)
    } else {
        format!("{price}")
    }
}

// ── Catalog ─────────────────────────────────────────────────────────────

/// A size option with its price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub size: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlavourRepr {
    Named { name: String },
    Bare(String),
}

/// A flavour, written either as `{"name": ...}` or as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FlavourRepr")]
pub struct Flavour {
    pub name: String,
}

impl From<FlavourRepr> for Flavour {
    fn from(repr: FlavourRepr) -> Self {
        match repr {
            FlavourRepr::Named { name } | FlavourRepr::Bare(name) => Self { name },
        }
    }
}

/// An optional extra with its surcharge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addon {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
}

/// One dish. `name` is the canonical, unique display key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub variants: Vec<Variant>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub flavours: Vec<Flavour>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub addons: Vec<Addon>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub base_price: Option<f64>,
}

impl MenuItem {
    /// A bare item with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            variants: Vec::new(),
            flavours: Vec::new(),
            addons: Vec::new(),
            base_price: None,
        }
    }

    /// Prices of all variants that have one, in listing order.
    pub fn variant_prices(&self) -> Vec<f64> {
        self.variants.iter().filter_map(|v| v.price).collect()
    }

    /// Lowest variant price, falling back to the base price.
    pub fn starting_price(&self) -> Option<f64> {
        self.variant_prices()
            .into_iter()
            .reduce(f64::min)
            .or(self.base_price)
    }
}

/// A named, ordered group of menu items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub name: String,
    pub items: Vec<MenuItem>,
}

/// Menu categories in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Build from a `{category: [item, ...]}` JSON object.
    ///
    /// Non-array categories and malformed or unnamed items are skipped.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        let categories = object
            .iter()
            .filter(|(_, items)| items.is_array())
            .map(|(name, items)| Category {
                name: name.clone(),
                items: lenient_records::<MenuItem>(items, "menu item")
                    .into_iter()
                    .filter(|item| !item.name.trim().is_empty())
                    .collect(),
            })
            .collect();
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Every item, category by category.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Look an item up by its exact name.
    pub fn get(&self, name: &str) -> Option<&MenuItem> {
        self.items().find(|item| item.name == name)
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_json(&Value::deserialize(deserializer)?))
    }
}

// ── FAQ, branches, hours, about ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
}

/// Days of the week in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Lower-case key used in `hours.json`.
    pub fn key(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

/// Opening hours of one branch. `regular` maps weekday keys to free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub regular: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub special_notes: Option<String>,
}

impl HoursEntry {
    pub fn hours_on(&self, day: Weekday) -> Option<&str> {
        self.regular.get(day.key()).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct About {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mission: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub vision: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub values: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub founded: Option<String>,
}

impl About {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn catalog_keeps_document_order() {
        let catalog = Catalog::from_json(&json!({
            "pizzas": [{"name": "Margherita"}],
            "burgers": [{"name": "Zinger Burger"}],
            "appetizers": [{"name": "Fries"}],
        }));
        let names: Vec<_> = catalog.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["pizzas", "burgers", "appetizers"]);
        assert_eq!(catalog.item_count(), 3);
    }

    #[test]
    fn malformed_items_are_skipped() {
        let catalog = Catalog::from_json(&json!({
            "burgers": [
                {"name": "Zinger Burger"},
                {"description": "no name"},
                {"name": 42},
                {"name": "   "},
                "not an object",
                {"name": "Beef Burger", "variants": "oops", "base_price": -3},
            ],
            "notes": "not a list",
        }));
        let names: Vec<_> = catalog.items().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Zinger Burger", "Beef Burger"]);
        assert_eq!(catalog.categories().len(), 1);

        let beef = catalog.get("Beef Burger").unwrap();
        assert!(beef.variants.is_empty());
        assert_eq!(beef.base_price, None);
    }

    #[test]
    fn flavours_accept_both_shapes() {
        let item: MenuItem = serde_json::from_value(json!({
            "name": "Wings",
            "flavours": [{"name": "Hot & Spicy"}, "BBQ", 7, {"label": "x"}],
        }))
        .unwrap();
        let names: Vec<_> = item.flavours.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Hot & Spicy", "BBQ"]);
    }

    #[test]
    fn variants_need_a_size() {
        let item: MenuItem = serde_json::from_value(json!({
            "name": "Pizza",
            "variants": [
                {"size": "Small", "price": 800},
                {"price": 1200},
                {"size": "Large", "price": -1},
            ],
        }))
        .unwrap();
        assert_eq!(item.variants.len(), 2);
        assert_eq!(item.variants[1].price, None);
        assert_eq!(item.starting_price(), Some(800.0));
    }

    #[test]
    fn starting_price_falls_back_to_base() {
        let mut item = MenuItem::named("Fries");
        item.base_price = Some(250.0);
        assert_eq!(item.starting_price(), Some(250.0));
    }

    #[test]
    fn about_reads_numbers_as_text() {
        let about: About = serde_json::from_value(json!({
            "name": "Speedy Bites",
            "founded": 2015,
            "values": ["Quality", 3, "Speed"],
        }))
        .unwrap();
        assert_eq!(about.founded.as_deref(), Some("2015"));
        assert_eq!(about.values, ["Quality", "Speed"]);
        assert!(About::default().is_empty());
    }

    #[test]
    fn hours_lookup_by_weekday() {
        let entry: HoursEntry = serde_json::from_value(json!({
            "branch_name": "Main",
            "regular": {"monday": "11am - 11pm", "sunday": "1pm - 12am"},
        }))
        .unwrap();
        assert_eq!(entry.hours_on(Weekday::Monday), Some("11am - 11pm"));
        assert_eq!(entry.hours_on(Weekday::Tuesday), None);
    }

    #[test]
    fn prices_format_without_trailing_zero() {
        assert_eq!(format_price(450.0), "450");
        assert_eq!(format_price(4.5), "4.5");
    }
}
