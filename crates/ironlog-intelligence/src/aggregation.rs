// ABOUTME: Small aggregation primitives shared by the recap calculators
// ABOUTME: Guarded percent change and a tally that remembers first-encounter order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

/// Rounded percentage change from `previous` to `current`
///
/// 100 when `previous` is 0 and `current` is positive, 0 when both are 0.
#[must_use]
pub fn percent_change(current: f64, previous: f64) -> i64 {
    if previous > 0.0 {
        (((current - previous) / previous) * 100.0).round() as i64
    } else if current > 0.0 {
        100
    } else {
        0
    }
}

/// Rounded `part / whole` percentage, 0 for an empty whole
#[must_use]
pub fn completion_rate(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Keyed accumulator preserving the order keys were first seen
#[derive(Debug, Clone)]
pub struct OrderedTally<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedTally<V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<V: Default> OrderedTally<V> {
    /// Accumulator for `key`, inserted with `V::default()` on first sight
    pub fn entry(&mut self, key: &str) -> &mut V {
        let position = match self.index.get(key) {
            Some(position) => *position,
            None => {
                self.entries.push((key.to_owned(), V::default()));
                let position = self.entries.len() - 1;
                self.index.insert(key.to_owned(), position);
                position
            }
        };
        &mut self.entries[position].1
    }
}

impl<V> OrderedTally<V> {
    /// Entries in first-encounter order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consume into first-encounter ordered pairs
    #[must_use]
    pub fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_change_guards() {
        assert_eq!(percent_change(0.0, 0.0), 0);
        assert_eq!(percent_change(500.0, 0.0), 100);
        assert_eq!(percent_change(150.0, 100.0), 50);
        assert_eq!(percent_change(50.0, 100.0), -50);
        assert_eq!(percent_change(1.0, 3.0), -67);
    }

    #[test]
    fn test_completion_rate_rounds() {
        assert_eq!(completion_rate(1, 2), 50);
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(3, 0), 0);
    }

    #[test]
    fn test_tally_keeps_first_encounter_order() {
        let mut tally: OrderedTally<u32> = OrderedTally::default();
        *tally.entry("squat") += 1;
        *tally.entry("bench") += 1;
        *tally.entry("squat") += 1;
        let keys: Vec<_> = tally.iter().map(|(k, v)| (k.to_owned(), *v)).collect();
        assert_eq!(keys, vec![("squat".to_owned(), 2), ("bench".to_owned(), 1)]);
        assert_eq!(tally.len(), 2);
    }
}
