//! Built-in keyword rules.

use serde::{Deserialize, Serialize};

use crate::models::category::Category;

/// A category and the lower-case keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    /// Create a rule. Keywords are lower-cased; duplicates are dropped.
    pub fn new<I, S>(category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().to_lowercase();
            if !keyword.is_empty() && !unique.contains(&keyword) {
                unique.push(keyword);
            }
        }
        Self {
            category,
            keywords: unique,
        }
    }

    /// True if any keyword occurs in the (already lower-cased) text.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

const FOOD: &[&str] = &[
    "coffee", "mcdonald", "kfc", "restaurant", "food", "grocery", "supermarket", "cafe",
];
const TRANSPORT: &[&str] = &[
    "shell", "gas", "petrol", "metro", "bus", "uber", "transport", "fuel", "taxi",
];
const ENTERTAINMENT: &[&str] = &["cine", "movie", "netflix", "entertain", "concert", "game"];
const UTILITIES: &[&str] = &["rent", "electric", "water", "internet", "bill", "wifi"];
const SHOPPING: &[&str] = &["mall", "clothes", "amazon", "store", "shop"];

/// The built-in rules in priority order.
pub fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(Category::Food, FOOD),
        CategoryRule::new(Category::Transport, TRANSPORT),
        CategoryRule::new(Category::Entertainment, ENTERTAINMENT),
        CategoryRule::new(Category::Utilities, UTILITIES),
        CategoryRule::new(Category::Shopping, SHOPPING),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule_order() {
        let order: Vec<Category> = default_rules().iter().map(|r| r.category).collect();
        assert_eq!(
            order,
            [
                Category::Food,
                Category::Transport,
                Category::Entertainment,
                Category::Utilities,
                Category::Shopping,
            ]
        );
    }

    #[test]
    fn test_rule_keywords_normalized() {
        let rule = CategoryRule::new(Category::Food, ["Bakery", "bakery", ""]);
        assert_eq!(rule.keywords, ["bakery"]);
        assert!(rule.matches("village bakery"));
        assert!(!rule.matches("Village Bakery"));
    }
}
