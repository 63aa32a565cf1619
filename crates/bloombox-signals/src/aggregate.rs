//! Frequency aggregation: merge weighted emissions into per-signal totals.

use crate::color::normalize_color;
use crate::emission::{SignalKind, WeightedEmission};
use crate::font::normalize_font_name;
use std::collections::HashMap;
use tracing::trace;

/// Signal → accumulated weight, remembering first-seen order.
///
/// Equality compares contents only; two maps built from the same emissions in
/// different orders are equal.
#[derive(Debug, Clone, Default)]
pub struct FrequencyMap {
    entries: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` to `signal`, creating the entry if absent.
    pub fn add(&mut self, signal: &str, weight: u32) {
        match self.index.get(signal) {
            Some(&i) => {
                let total = &mut self.entries[i].1;
                *total = total.saturating_add(weight);
            }
            None => {
                self.index.insert(signal.to_string(), self.entries.len());
                self.entries.push((signal.to_string(), weight));
            }
        }
    }

    pub fn get(&self, signal: &str) -> Option<u32> {
        self.index.get(signal).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(s, w)| (s.as_str(), *w))
    }
}

impl PartialEq for FrequencyMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(s, w)| other.get(s) == Some(w))
    }
}

impl Eq for FrequencyMap {}

impl<'a> FromIterator<(&'a str, u32)> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, u32)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (signal, weight) in iter {
            map.add(signal, weight);
        }
        map
    }
}

/// Per-family frequency maps for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub colors: FrequencyMap,
    pub fonts: FrequencyMap,
}

/// Normalize every emission and sum weights per signal.
///
/// Colors are keyed by canonical `#RRGGBB`, fonts by their trimmed,
/// quote-stripped name. Emissions that fail to normalize or carry no weight
/// are dropped.
pub fn aggregate(emissions: &[WeightedEmission]) -> Aggregate {
    let mut result = Aggregate::default();
    let mut dropped = 0usize;

    for emission in emissions {
        if emission.weight == 0 {
            dropped += 1;
            continue;
        }
        match emission.kind {
            SignalKind::Color => match normalize_color(&emission.value) {
                Some(hex) => result.colors.add(&hex.to_string(), emission.weight),
                None => dropped += 1,
            },
            SignalKind::Font => match normalize_font_name(&emission.value) {
                Some(name) => result.fonts.add(&name, emission.weight),
                None => dropped += 1,
            },
        }
    }

    trace!(
        total = emissions.len(),
        dropped,
        colors = result.colors.len(),
        fonts = result.fonts.len(),
        "aggregated emissions"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emission::SourceKind;

    fn color(value: &str, weight: u32) -> WeightedEmission {
        WeightedEmission::color(value, weight, SourceKind::StyleBlock)
    }

    #[test]
    fn test_weights_sum_exactly() {
        let agg = aggregate(&[color("#112233", 7), color("rgb(17, 34, 51)", 5)]);
        assert_eq!(agg.colors.len(), 1);
        assert_eq!(agg.colors.get("#112233"), Some(12));
    }

    #[test]
    fn test_order_invariance() {
        let emissions = vec![
            color("#abc", 3),
            color("red", 2),
            WeightedEmission::font("'Lato'", 6, SourceKind::FontStackPrimary),
            color("#AABBCC", 4),
            color("transparent", 9),
            WeightedEmission::font("Lato", 1, SourceKind::FontStackFallback),
            color("#ff0000", 1),
        ];
        let forward = aggregate(&emissions);

        let mut reversed = emissions.clone();
        reversed.reverse();
        let backward = aggregate(&reversed);

        let mut rotated = emissions.clone();
        rotated.rotate_left(3);
        let shifted = aggregate(&rotated);

        assert_eq!(forward, backward);
        assert_eq!(forward, shifted);
        assert_eq!(forward.colors.get("#AABBCC"), Some(7));
        assert_eq!(forward.colors.get("#FF0000"), Some(3));
        assert_eq!(forward.fonts.get("Lato"), Some(7));
    }

    #[test]
    fn test_unparseable_signals_dropped() {
        let agg = aggregate(&[
            color("var(--brand)", 15),
            color("currentColor", 2),
            color("#112233", 0),
            WeightedEmission::font("  ", 6, SourceKind::FontStackPrimary),
        ]);
        assert!(agg.colors.is_empty());
        assert!(agg.fonts.is_empty());
    }

    #[test]
    fn test_first_seen_order_kept() {
        let map: FrequencyMap = [("b", 1), ("a", 1), ("b", 1)].into_iter().collect();
        let order: Vec<_> = map.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec!["b", "a"]);
    }
}
