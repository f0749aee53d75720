//! Groups expense-like records by category label.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::expenses_model::Expense;

/// Anything carrying a category label and an amount.
pub trait CategorizedAmount {
    fn category_label(&self) -> &str;
    fn amount(&self) -> Decimal;
}

impl CategorizedAmount for Expense {
    fn category_label(&self) -> &str {
        self.category.as_str()
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl CategorizedAmount for (String, Decimal) {
    fn category_label(&self) -> &str {
        &self.0
    }

    fn amount(&self) -> Decimal {
        self.1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
}

/// Per-category totals and counts, remembering first-encountered order.
#[derive(Debug, Clone, Default)]
pub struct CategoryAggregation {
    entries: Vec<CategoryTotal>,
    index: HashMap<String, usize>,
}

impl CategoryAggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<'a, T, I>(records: I) -> Self
    where
        T: CategorizedAmount + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut aggregation = Self::new();
        for record in records {
            aggregation.add(record.category_label(), record.amount());
        }
        aggregation
    }

    pub fn add(&mut self, category: &str, amount: Decimal) {
        match self.index.get(category) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.total += amount;
                entry.count += 1;
            }
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push(CategoryTotal {
                    category: category.to_string(),
                    total: amount,
                    count: 1,
                });
            }
        }
    }

    /// Folds `other` into `self`. Categories new to `self` are appended in `other`'s order.
    pub fn merge(&mut self, other: CategoryAggregation) {
        for entry in other.entries {
            match self.index.get(&entry.category) {
                Some(&i) => {
                    let existing = &mut self.entries[i];
                    existing.total += entry.total;
                    existing.count += entry.count;
                }
                None => {
                    self.index
                        .insert(entry.category.clone(), self.entries.len());
                    self.entries.push(entry);
                }
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<&CategoryTotal> {
        self.index.get(category).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every category total.
    pub fn grand_total(&self) -> Decimal {
        self.entries.iter().map(|e| e.total).sum()
    }

    pub fn record_count(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Categories in the order they were first seen.
    pub fn in_encounter_order(&self) -> &[CategoryTotal] {
        &self.entries
    }

    /// Categories by total, descending; ties keep first-encountered order.
    pub fn sorted_by_total(&self) -> Vec<CategoryTotal> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.total.cmp(&a.total));
        sorted
    }

    pub fn into_entries(self) -> Vec<CategoryTotal> {
        self.entries
    }
}

/// Groups expenses by category label.
pub fn aggregate_by_category(expenses: &[Expense]) -> CategoryAggregation {
    CategoryAggregation::from_records(expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn records(items: &[(&str, Decimal)]) -> Vec<(String, Decimal)> {
        items.iter().map(|(c, a)| (c.to_string(), *a)).collect()
    }

    #[test]
    fn test_groups_and_counts_by_category() {
        let input = records(&[
            ("Food", dec!(1500)),
            ("Food", dec!(2500)),
            ("Transport", dec!(800)),
        ]);

        let aggregation = CategoryAggregation::from_records(&input);

        assert_eq!(aggregation.len(), 2);
        let food = aggregation.get("Food").unwrap();
        assert_eq!(food.total, dec!(4000));
        assert_eq!(food.count, 2);
        let transport = aggregation.get("Transport").unwrap();
        assert_eq!(transport.total, dec!(800));
        assert_eq!(transport.count, 1);
        assert_eq!(aggregation.grand_total(), dec!(4800));
        assert_eq!(aggregation.record_count(), 3);
    }

    #[test]
    fn test_empty_input_gives_empty_aggregation() {
        let aggregation = CategoryAggregation::from_records::<(String, Decimal), _>(&[]);
        assert!(aggregation.is_empty());
        assert_eq!(aggregation.grand_total(), Decimal::ZERO);
        assert!(aggregation.sorted_by_total().is_empty());
    }

    #[test]
    fn test_unknown_and_empty_labels_keep_their_own_bucket() {
        let input = records(&[
            ("Rent", dec!(100)),
            ("", dec!(5)),
            ("Other", dec!(7)),
            ("Rent", dec!(50)),
        ]);

        let aggregation = CategoryAggregation::from_records(&input);

        assert_eq!(aggregation.get("Rent").unwrap().total, dec!(150));
        assert_eq!(aggregation.get("").unwrap().total, dec!(5));
        assert_eq!(aggregation.get("Other").unwrap().total, dec!(7));
    }

    #[test]
    fn test_sorted_by_total_is_stable_on_ties() {
        let input = records(&[
            ("Books", dec!(300)),
            ("Data", dec!(500)),
            ("Hangout", dec!(300)),
            ("Food", dec!(900)),
        ]);

        let sorted: Vec<String> = CategoryAggregation::from_records(&input)
            .sorted_by_total()
            .into_iter()
            .map(|c| c.category)
            .collect();

        assert_eq!(sorted, vec!["Food", "Data", "Books", "Hangout"]);
    }

    #[test]
    fn test_encounter_order_is_preserved() {
        let input = records(&[("Data", dec!(1)), ("Food", dec!(9)), ("Data", dec!(1))]);
        let aggregation = CategoryAggregation::from_records(&input);
        let order: Vec<&str> = aggregation
            .in_encounter_order()
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(order, vec!["Data", "Food"]);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let first = records(&[("Food", dec!(10)), ("Transport", dec!(3))]);
        let second = records(&[("Food", dec!(5)), ("Books", dec!(2))]);

        let mut merged = CategoryAggregation::from_records(&first);
        merged.merge(CategoryAggregation::from_records(&second));

        let all: Vec<_> = first.iter().chain(second.iter()).cloned().collect();
        let direct = CategoryAggregation::from_records(&all);

        assert_eq!(merged.in_encounter_order(), direct.in_encounter_order());
    }
}
