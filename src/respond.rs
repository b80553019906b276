//! Reply rendering: turns a classified message into chat text.
//!
//! Rendering reads the [`RestaurantData`] snapshot only. Every section has a
//! fixed "unavailable" message for when its data is empty, and the fallback
//! text covers `unknown`.

use std::fmt::Write as _;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::data::{Catalog, MenuItem, RestaurantData, Weekday, format_price};
use crate::nlu::{Intent, resolve_faq, search_menu};

/// Reply for messages no intent claims.
pub const FALLBACK: &str =
    "Sorry, I didn't understand that. I can help with menu, timings, branches, or FAQs. 😊";

/// Reply when a FAQ-style question matches no entry.
pub const FAQ_NO_ANSWER: &str = "Sorry, I don't have an answer for that. You can ask about \
     delivery, vegetarian options, halal food, or our services.";

const MENU_UNAVAILABLE: &str = "Sorry, the menu is currently unavailable.";
const BRANCHES_UNAVAILABLE: &str = "Sorry, branch information is not available.";
const HOURS_UNAVAILABLE: &str = "Sorry, opening hours are not available.";
const FAQ_UNAVAILABLE: &str = "Sorry, I don't have FAQ information available.";
const ABOUT_UNAVAILABLE: &str = "Sorry, restaurant information is not available.";

/// Substrings that ask for the whole menu rather than one dish.
const FULL_MENU_PHRASES: [&str; 7] = [
    "full menu",
    "all menu",
    "complete menu",
    "entire menu",
    "show all",
    "all dishes",
    "all items",
];

/// Items listed when a menu question names no dish.
const POPULAR_ITEM_COUNT: usize = 4;

/// `{name}` is replaced with the restaurant name.
const GREETINGS: [&str; 3] = [
    "Hi! 👋 Welcome to {name}! How can I help you today?",
    "Hello! Welcome to {name}! 🍽️ What would you like?",
    "Hey there! 👋 Welcome to {name}! What can I do for you?",
];

const FAREWELLS: [&str; 3] = [
    "Bye! Have a great day!",
    "See you soon!",
    "Thanks for visiting {name}!",
];

/// Quick-action buttons keyed by trigger substrings, checked in order.
const QUICK_ACTIONS: &[(&[&str], &[&str])] = &[
    (
        &["hi", "hello", "hey", "greet", "start"],
        &["View Menu", "Our Branches", "Opening Hours"],
    ),
    (
        &["menu", "dish", "food", "order", "burger", "pizza"],
        &["Full Menu", "Our Branches", "Order Online"],
    ),
    (
        &["branch", "location", "address", "where"],
        &["View Menu", "Opening Hours", "Contact"],
    ),
    (
        &["open", "hour", "timing", "close", "time"],
        &["View Menu", "Our Branches"],
    ),
];

/// Buttons to offer alongside a reply to `message`.
///
/// Triggers are plain substrings of the lower-cased message; the first group
/// with any hit wins.
pub fn suggested_actions(message: &str) -> Vec<String> {
    let lowered = message.to_lowercase();
    QUICK_ACTIONS
        .iter()
        .find(|(triggers, _)| triggers.iter().any(|t| lowered.contains(t)))
        .map(|(_, actions)| actions.iter().map(|a| a.to_string()).collect())
        .unwrap_or_default()
}

/// Renders replies against one data snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Responder<'d> {
    data: &'d RestaurantData,
}

impl<'d> Responder<'d> {
    pub fn new(data: &'d RestaurantData) -> Self {
        Self { data }
    }

    /// Reply text for `message` already classified as `intent`.
    pub fn render<R: Rng + ?Sized>(&self, intent: Intent, message: &str, rng: &mut R) -> String {
        match intent {
            Intent::Greeting => self.pick(&GREETINGS, rng),
            Intent::Farewell => self.pick(&FAREWELLS, rng),
            Intent::MenuQuery => self.menu(message),
            Intent::BranchQuery => self.branches(),
            Intent::HoursQuery => self.hours(),
            Intent::FaqQuery => self.faq(message),
            Intent::About => self.about(),
            Intent::Unknown => FALLBACK.to_string(),
        }
    }

    fn pick<R: Rng + ?Sized>(&self, templates: &[&str], rng: &mut R) -> String {
        templates
            .choose(rng)
            .map(|t| t.replace("{name}", &self.data.restaurant_name))
            .unwrap_or_default()
    }

    // ── Menu ────────────────────────────────────────────────────────────

    fn menu(&self, message: &str) -> String {
        let catalog = &self.data.catalog;
        if catalog.is_empty() {
            return MENU_UNAVAILABLE.to_string();
        }

        let lowered = message.trim().to_lowercase();
        if FULL_MENU_PHRASES.iter().any(|p| lowered.contains(p)) {
            return self.full_menu(catalog);
        }
        match search_menu(message, catalog) {
            Some(item) => self.item_card(item),
            None => self.popular_items(catalog),
        }
    }

    fn full_menu(&self, catalog: &Catalog) -> String {
        let currency = &self.data.currency;
        let mut out = String::from("🍽️ **OUR FULL MENU**\n\n");
        for category in catalog.categories().iter().filter(|c| !c.items.is_empty()) {
            let title = category.name.to_uppercase().replace('_', " ");
            let _ = writeln!(out, "📋 **{title}** ({} items)", category.items.len());
            let _ = writeln!(out, "{}", "─".repeat(45));
            for (n, item) in category.items.iter().enumerate() {
                let _ = write!(out, "{}. {}", n + 1, item.name);
                if let Some(range) = price_range(item) {
                    let _ = write!(out, " — {range} {currency}");
                }
                out.push('\n');
            }
            out.push('\n');
        }
        out.push_str("💡 Ask me about any dish for details or order now!\n");
        out
    }

    fn item_card(&self, item: &MenuItem) -> String {
        let currency = &self.data.currency;
        let mut out = format!("🍽️ **{}**\n{}\n\n", item.name, "━".repeat(30));

        if let Some(description) = &item.description {
            let _ = write!(out, "📝 {description}\n\n");
        }

        let priced: Vec<_> = item
            .variants
            .iter()
            .filter_map(|v| v.price.map(|p| (v.size.as_str(), p)))
            .collect();
        if !priced.is_empty() {
            out.push_str("💰 **Prices:**\n");
            for (size, price) in priced {
                let _ = writeln!(out, "  • {size}: {} {currency}", format_price(price));
            }
            out.push('\n');
        } else if let Some(price) = item.base_price {
            let _ = write!(out, "💰 **Price:** {} {currency}\n\n", format_price(price));
        }

        if !item.flavours.is_empty() {
            let names: Vec<_> = item.flavours.iter().map(|f| f.name.as_str()).collect();
            let _ = write!(out, "🌶️ **Flavours:** {}\n\n", names.join(", "));
        }

        let addons: Vec<_> = item
            .addons
            .iter()
            .filter_map(|a| a.price.map(|p| (a.name.as_str(), p)))
            .collect();
        if !addons.is_empty() {
            out.push_str("➕ **Addons:**\n");
            for (name, price) in addons {
                let _ = writeln!(out, "  • {name} — +{} {currency}", format_price(price));
            }
        }

        out.trim().to_string()
    }

    fn popular_items(&self, catalog: &Catalog) -> String {
        let currency = &self.data.currency;
        let mut out = String::from("🍽️ **Popular Items:**\n\n");
        for item in catalog.items().take(POPULAR_ITEM_COUNT) {
            let _ = write!(out, "• {}", item.name);
            if let Some(from) = item.variant_prices().into_iter().reduce(f64::min) {
                let _ = write!(out, " — {} {currency}+", format_price(from));
            } else if let Some(price) = item.base_price.filter(|_| item.variants.is_empty()) {
                let _ = write!(out, " — {} {currency}", format_price(price));
            }
            out.push('\n');
        }
        out.push_str("\n💬 Say **'full menu'** to see everything!\n");
        out
    }

    // ── Branches, hours, FAQ, about ─────────────────────────────────────

    fn branches(&self) -> String {
        if self.data.branches.is_empty() {
            return BRANCHES_UNAVAILABLE.to_string();
        }
        let mut out = String::from("📍 **OUR BRANCHES:**\n\n");
        for branch in &self.data.branches {
            let _ = write!(out, "**{}**", branch.name.as_deref().unwrap_or("Unknown"));
            if let Some(city) = &branch.city {
                let _ = write!(out, " ({city})");
            }
            out.push('\n');
            let _ = writeln!(out, "📍 {}", branch.address.as_deref().unwrap_or("Not available"));
            let _ = write!(out, "📞 {}\n\n", branch.phone.as_deref().unwrap_or("Not available"));
        }
        out.trim().to_string()
    }

    fn hours(&self) -> String {
        if self.data.hours.is_empty() {
            return HOURS_UNAVAILABLE.to_string();
        }
        let mut out = String::from("🕐 **OPENING HOURS:**\n\n");
        for entry in &self.data.hours {
            let _ = writeln!(out, "**{}**", entry.branch_name.as_deref().unwrap_or("Branch"));
            let _ = writeln!(out, "{}", "─".repeat(40));
            for day in Weekday::ALL {
                if let Some(hours) = entry.hours_on(day) {
                    let _ = writeln!(out, "{}: {hours}", day.title());
                }
            }
            if let Some(notes) = &entry.special_notes {
                let _ = write!(out, "\nℹ️ {notes}\n");
            }
            out.push('\n');
        }
        out.trim().to_string()
    }

    fn faq(&self, message: &str) -> String {
        if self.data.faqs.is_empty() {
            return FAQ_UNAVAILABLE.to_string();
        }
        resolve_faq(message, &self.data.faqs)
            .unwrap_or(FAQ_NO_ANSWER)
            .to_string()
    }

    fn about(&self) -> String {
        let about = &self.data.about;
        if about.is_empty() {
            return ABOUT_UNAVAILABLE.to_string();
        }
        let name = about.name.as_deref().unwrap_or(&self.data.restaurant_name);
        let mut out = format!("**{name}**\n\n");
        if let Some(description) = &about.description {
            let _ = write!(out, "{description}\n\n");
        }
        if let Some(mission) = &about.mission {
            let _ = write!(out, "🎯 **Mission:** {mission}\n\n");
        }
        if let Some(vision) = &about.vision {
            let _ = write!(out, "🔭 **Vision:** {vision}\n\n");
        }
        if !about.values.is_empty() {
            let _ = write!(out, "💎 **Values:** {}\n\n", about.values.join(", "));
        }
        if let Some(founded) = &about.founded {
            let _ = write!(out, "📅 **Founded:** {founded}\n\n");
        }
        out.trim().to_string()
    }
}

/// `"min"` or `"min-max"` over variant prices, else the base price.
fn price_range(item: &MenuItem) -> Option<String> {
    let prices = item.variant_prices();
    if prices.is_empty() {
        return item
            .base_price
            .filter(|_| item.variants.is_empty())
            .map(format_price);
    }
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(if prices.len() == 1 {
        format_price(min)
    } else {
        format!("{}-{}", format_price(min), format_price(max))
    })
}
