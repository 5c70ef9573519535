//! Fortune Views
//!
//! Groups parsed entries per category for presentation.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::types::{FortuneEntry, FortuneType, PeriodValue};

/// All results of one category, keyed by period in first-seen order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FortuneView {
    pub fortune: FortuneType,
    #[serde(serialize_with = "serialize_contents")]
    pub contents: Vec<(PeriodValue, String)>,
}

impl FortuneView {
    pub fn new(fortune: FortuneType) -> Self {
        Self {
            fortune,
            contents: Vec::new(),
        }
    }

    /// Result text for a period, if present
    pub fn get(&self, period: PeriodValue) -> Option<&str> {
        self.contents
            .iter()
            .find(|(p, _)| *p == period)
            .map(|(_, text)| text.as_str())
    }

    pub fn periods(&self) -> impl Iterator<Item = PeriodValue> + '_ {
        self.contents.iter().map(|(p, _)| *p)
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Insert unless the period is already present
    fn insert_first(&mut self, period: PeriodValue, text: &str) {
        if self.get(period).is_none() {
            self.contents.push((period, text.to_string()));
        }
    }
}

fn serialize_contents<S>(contents: &[(PeriodValue, String)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(contents.len()))?;
    for (period, text) in contents {
        map.serialize_entry(period, text)?;
    }
    map.end()
}

/// Group entries by category
///
/// Categories and periods keep first-seen order. When a (category, period)
/// pair repeats, the first text wins.
pub fn group_views(entries: &[FortuneEntry]) -> Vec<FortuneView> {
    let mut views: Vec<FortuneView> = Vec::new();

    for entry in entries {
        let index = match views.iter().position(|v| v.fortune == entry.fortune) {
            Some(index) => index,
            None => {
                views.push(FortuneView::new(entry.fortune));
                views.len() - 1
            }
        };
        views[index].insert_first(entry.period_value, &entry.result);
    }

    views
}

/// Expand views back into entries, category by category
pub fn flatten_views(views: &[FortuneView]) -> Vec<FortuneEntry> {
    views
        .iter()
        .flat_map(|view| {
            view.contents
                .iter()
                .map(move |(period, text)| FortuneEntry::new(view.fortune, *period, text.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(fortune: FortuneType, period: PeriodValue, text: &str) -> FortuneEntry {
        FortuneEntry::new(fortune, period, text)
    }

    #[test]
    fn test_group_first_seen_and_first_wins() {
        let entries = vec![
            entry(FortuneType::Love, PeriodValue::January, "a"),
            entry(FortuneType::Health, PeriodValue::February, "b"),
            entry(FortuneType::Love, PeriodValue::January, "c"),
            entry(FortuneType::Love, PeriodValue::February, "d"),
        ];

        let views = group_views(&entries);

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].fortune, FortuneType::Love);
        assert_eq!(views[1].fortune, FortuneType::Health);
        assert_eq!(
            views[0].contents,
            vec![
                (PeriodValue::January, "a".to_string()),
                (PeriodValue::February, "d".to_string()),
            ]
        );
        assert_eq!(views[1].get(PeriodValue::February), Some("b"));
        assert_eq!(views[1].get(PeriodValue::January), None);
    }

    #[test]
    fn test_group_empty() {
        assert!(group_views(&[]).is_empty());
    }

    #[test]
    fn test_flatten_round_trip_without_duplicates() {
        let entries = vec![
            entry(FortuneType::Money, PeriodValue::Q1, "x"),
            entry(FortuneType::Money, PeriodValue::Q2, "y"),
            entry(FortuneType::Study, PeriodValue::Q1, "z"),
        ];
        assert_eq!(flatten_views(&group_views(&entries)), entries);
    }

    #[test]
    fn test_serialize_contents_as_ordered_map() {
        let views = group_views(&[
            entry(FortuneType::Love, PeriodValue::March, "m"),
            entry(FortuneType::Love, PeriodValue::January, "j"),
        ]);
        let json = serde_json::to_string(&views[0]).unwrap();
        assert_eq!(
            json,
            r#"{"fortune":"love","contents":{"march":"m","january":"j"}}"#
        );
    }

    fn arb_entry() -> impl Strategy<Value = FortuneEntry> {
        (0..FortuneType::ALL.len(), 0..PeriodValue::ALL.len(), "[a-z]{1,4}").prop_map(
            |(f, p, text)| FortuneEntry::new(FortuneType::ALL[f], PeriodValue::ALL[p], text),
        )
    }

    proptest! {
        #[test]
        fn prop_grouping_keeps_first_occurrence(entries in proptest::collection::vec(arb_entry(), 0..40)) {
            let views = group_views(&entries);

            for view in &views {
                for (period, text) in &view.contents {
                    let first = entries
                        .iter()
                        .find(|e| e.fortune == view.fortune && e.period_value == *period)
                        .map(|e| e.result.as_str());
                    prop_assert_eq!(first, Some(text.as_str()));
                }
            }

            let mut seen: Vec<FortuneType> = Vec::new();
            for e in &entries {
                if !seen.contains(&e.fortune) {
                    seen.push(e.fortune);
                }
            }
            let order: Vec<FortuneType> = views.iter().map(|v| v.fortune).collect();
            prop_assert_eq!(order, seen);
        }
    }
}
