//! Ranking, validity filtering, and primary/secondary categorization.

use crate::aggregate::FrequencyMap;
use crate::color::{normalize_color, HexColor};
use crate::config::FontDefaults;
use crate::font::is_brand_font;
use serde::{Deserialize, Serialize};

/// Colors at or below this average brightness are near-black.
pub const MIN_BRIGHTNESS: u32 = 20;
/// Colors at or above this average brightness are near-white.
pub const MAX_BRIGHTNESS: u32 = 240;
/// This many top-ranked colors survive the brightness filter unconditionally.
pub const DOMINANT_COLORS: usize = 2;

/// One signal with its accumulated weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedSignal {
    pub value: String,
    pub weight: u32,
}

/// Signals ordered by descending weight, ties in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedSignalList(Vec<RankedSignal>);

impl RankedSignalList {
    pub fn as_slice(&self) -> &[RankedSignal] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedSignal> {
        self.0.iter()
    }

    /// Signal values only, in rank order.
    pub fn values(&self) -> Vec<&str> {
        self.0.iter().map(|s| s.value.as_str()).collect()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|s| s.value == value)
    }

    fn retain(self, mut keep: impl FnMut(usize, &RankedSignal) -> bool) -> Self {
        Self(
            self.0
                .into_iter()
                .enumerate()
                .filter(|(i, s)| keep(*i, s))
                .map(|(_, s)| s)
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a RankedSignalList {
    type Item = &'a RankedSignal;
    type IntoIter = std::slice::Iter<'a, RankedSignal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Sort a frequency map by descending weight.
///
/// The sort is stable over the map's first-seen order, so ties are
/// reproducible.
pub fn rank(map: &FrequencyMap) -> RankedSignalList {
    let mut signals: Vec<RankedSignal> = map
        .iter()
        .map(|(value, weight)| RankedSignal {
            value: value.to_string(),
            weight,
        })
        .collect();
    signals.sort_by(|a, b| b.weight.cmp(&a.weight));
    RankedSignalList(signals)
}

/// Rank colors and drop near-black and near-white entries.
///
/// The two most frequent colors are kept whatever their brightness: a
/// dominant black or white is a real brand color.
pub fn rank_colors(map: &FrequencyMap) -> RankedSignalList {
    rank(map).retain(|i, signal| {
        if i < DOMINANT_COLORS {
            return true;
        }
        match normalize_color(&signal.value) {
            Some(color) => {
                // Compare sums so a 20.33 average is not truncated to 20.
                let sum = color.channel_sum();
                sum > MIN_BRIGHTNESS * 3 && sum < MAX_BRIGHTNESS * 3
            }
            None => false,
        }
    })
}

/// Rank fonts and drop generic keywords, system fallbacks and bare numbers.
pub fn rank_fonts(map: &FrequencyMap) -> RankedSignalList {
    rank(map).retain(|_, signal| is_brand_font(&signal.value))
}

/// Colors split into brand buckets of at most two entries each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedColors {
    pub primary: Vec<RankedSignal>,
    pub secondary: Vec<RankedSignal>,
}

/// The page's headline and body fonts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedFonts {
    pub primary: String,
    pub secondary: String,
}

/// Split ranked colors into primary and secondary buckets.
///
/// With at least two non-neutral colors, both buckets prefer them and the
/// secondary bucket is topped up with one black and/or one white if needed.
/// A neutral-dominated palette falls back to plain rank order. Never fails:
/// short input gives short buckets.
pub fn categorize_colors(list: &RankedSignalList) -> CategorizedColors {
    let is_neutral = |s: &RankedSignal| {
        normalize_color(&s.value)
            .map(|c| c.is_neutral())
            .unwrap_or(false)
    };
    let non_neutral: Vec<&RankedSignal> = list.iter().filter(|s| !is_neutral(*s)).collect();

    if non_neutral.len() < 2 {
        let all = list.as_slice();
        return CategorizedColors {
            primary: all.iter().take(2).cloned().collect(),
            secondary: all.iter().skip(2).take(2).cloned().collect(),
        };
    }

    let primary: Vec<RankedSignal> = non_neutral.iter().take(2).map(|s| (*s).clone()).collect();
    let mut secondary: Vec<RankedSignal> = non_neutral
        .iter()
        .skip(2)
        .take(2)
        .map(|s| (*s).clone())
        .collect();

    if secondary.len() < 2 {
        let black = HexColor::BLACK.to_string();
        let white = HexColor::WHITE.to_string();
        let neutrals = list
            .iter()
            .filter(|s| s.value == black || s.value == white);
        for neutral in neutrals {
            if secondary.len() >= 2 {
                break;
            }
            secondary.push(neutral.clone());
        }
    }

    CategorizedColors { primary, secondary }
}

/// Pick the two top fonts, filling gaps from `defaults`.
pub fn categorize_fonts(list: &RankedSignalList, defaults: &FontDefaults) -> CategorizedFonts {
    let mut values = list.iter().map(|s| s.value.clone());
    CategorizedFonts {
        primary: values.next().unwrap_or_else(|| defaults.primary.clone()),
        secondary: values.next().unwrap_or_else(|| defaults.secondary.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, u32)]) -> FrequencyMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_rank_descending_with_stable_ties() {
        let ranked = rank(&map(&[("#111111", 2), ("#222222", 5), ("#333333", 2)]));
        assert_eq!(ranked.values(), vec!["#222222", "#111111", "#333333"]);
    }

    #[test]
    fn test_empty_input() {
        let ranked = rank(&FrequencyMap::new());
        assert!(ranked.is_empty());
        assert!(rank_colors(&FrequencyMap::new()).is_empty());

        let cats = categorize_colors(&ranked);
        assert!(cats.primary.is_empty());
        assert!(cats.secondary.is_empty());

        let fonts = categorize_fonts(&ranked, &FontDefaults::default());
        assert_eq!(fonts.primary, "Inter");
        assert_eq!(fonts.secondary, "Open Sans");
    }

    #[test]
    fn test_dominant_black_retained() {
        let ranked = rank_colors(&map(&[
            ("#000000", 50),
            ("#0A66C2", 10),
            ("#050505", 5),
            ("#FAFAFA", 4),
            ("#FF6600", 3),
        ]));
        assert_eq!(ranked.values(), vec!["#000000", "#0A66C2", "#FF6600"]);
    }

    #[test]
    fn test_second_place_white_retained() {
        let ranked = rank_colors(&map(&[("#0A66C2", 20), ("#FFFFFF", 10), ("#F5F5F5", 9)]));
        assert_eq!(ranked.values(), vec!["#0A66C2", "#FFFFFF"]);
    }

    #[test]
    fn test_brightness_threshold_is_exact() {
        let ranked = rank_colors(&map(&[
            ("#AA0000", 9),
            ("#00AA00", 8),
            ("#141415", 5),
            ("#141414", 4),
            ("#EFEFF0", 3),
            ("#F0F0F0", 2),
        ]));
        assert_eq!(ranked.values(), vec!["#AA0000", "#00AA00", "#141415", "#EFEFF0"]);
    }

    #[test]
    fn test_font_keywords_rejected_even_when_heavy() {
        let ranked = rank_fonts(&map(&[
            ("sans-serif", 10_000),
            ("13px", 500),
            ("Helvetica", 400),
            ("Brandon Grotesque", 3),
        ]));
        assert_eq!(ranked.values(), vec!["Brandon Grotesque"]);
    }

    #[test]
    fn test_categorize_prefers_non_neutral() {
        let ranked = rank(&map(&[
            ("#FFFFFF", 40),
            ("#112233", 30),
            ("#000000", 25),
            ("#FF6600", 20),
            ("#00AA88", 10),
        ]));
        let cats = categorize_colors(&ranked);
        let primary: Vec<_> = cats.primary.iter().map(|s| s.value.as_str()).collect();
        let secondary: Vec<_> = cats.secondary.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(primary, vec!["#112233", "#FF6600"]);
        assert_eq!(secondary, vec!["#00AA88", "#FFFFFF"]);
    }

    #[test]
    fn test_categorize_neutral_dominated() {
        let ranked = rank(&map(&[("#000000", 40), ("#FFFFFF", 30), ("#112233", 5)]));
        let cats = categorize_colors(&ranked);
        let primary: Vec<_> = cats.primary.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(primary, vec!["#000000", "#FFFFFF"]);
        assert_eq!(cats.secondary.len(), 1);
        assert_eq!(cats.secondary[0].value, "#112233");
    }

    #[test]
    fn test_categorize_single_color() {
        let ranked = rank(&map(&[("#112233", 5)]));
        let cats = categorize_colors(&ranked);
        assert_eq!(cats.primary.len(), 1);
        assert!(cats.secondary.is_empty());
    }

    #[test]
    fn test_categorize_fonts_partial() {
        let ranked = rank(&map(&[("Lato", 9)]));
        let defaults = FontDefaults::default();
        let fonts = categorize_fonts(&ranked, &defaults);
        assert_eq!(fonts.primary, "Lato");
        assert_eq!(fonts.secondary, defaults.secondary);
    }
}
