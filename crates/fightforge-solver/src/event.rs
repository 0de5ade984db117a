//! Events streamed from a running search.
//!
//! A run emits zero or more [`SearchEvent::Progress`] events with strictly
//! increasing percentages, then exactly one terminal event. Nothing follows
//! the terminal event.
//!
//! On the wire the events keep the message shapes consumers already parse:
//!
//! | event       | JSON                                      |
//! |-------------|-------------------------------------------|
//! | `Progress`  | `{"progress": 42}`                        |
//! | `Done`      | `{"done": true, "results": [...], ...}`   |
//! | `Failed`    | `{"done": true, "error": "..."}`          |
//! | `Cancelled` | `{"done": true, "cancelled": true}`       |

use fightforge_core::Candidate;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Final results of a completed search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Selected builds, in presentation order.
    pub results: Vec<Candidate>,
    /// Builds that passed the budget filter.
    pub retained: u64,
    /// Combinations in the searched space.
    pub processed: u64,
}

/// One message from a search run.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Share of combinations processed, 0 to 100.
    Progress { percent: u8 },
    /// The search completed.
    Done(SearchOutcome),
    /// The search could not run, e.g. the price feed was unreachable.
    Failed { error: String },
    /// The search was cancelled before completing.
    Cancelled,
}

impl SearchEvent {
    /// Whether this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SearchEvent::Progress { .. })
    }

    /// Progress percentage, for progress events.
    pub fn percent(&self) -> Option<u8> {
        match *self {
            SearchEvent::Progress { percent } => Some(percent),
            _ => None,
        }
    }
}

impl Serialize for SearchEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SearchEvent::Progress { percent } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("progress", percent)?;
                map.end()
            }
            SearchEvent::Done(outcome) => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("done", &true)?;
                map.serialize_entry("results", &outcome.results)?;
                map.serialize_entry("retained", &outcome.retained)?;
                map.serialize_entry("processed", &outcome.processed)?;
                map.end()
            }
            SearchEvent::Failed { error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("done", &true)?;
                map.serialize_entry("error", error)?;
                map.end()
            }
            SearchEvent::Cancelled => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("done", &true)?;
                map.serialize_entry("cancelled", &true)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fightforge_core::SkillLevels;
    use serde_json::json;

    #[test]
    fn test_progress_shape() {
        let value = serde_json::to_value(SearchEvent::Progress { percent: 42 }).unwrap();
        assert_eq!(value, json!({"progress": 42}));
    }

    #[test]
    fn test_done_shape() {
        let event = SearchEvent::Done(SearchOutcome {
            results: vec![Candidate {
                levels: SkillLevels::zero(),
                point_cost: 0,
                daily_damage: 2310.0,
                daily_cost: None,
            }],
            retained: 1,
            processed: 11,
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["done"], json!(true));
        assert_eq!(value["results"][0]["dailyDamage"], json!(2310.0));
        assert_eq!(value["results"][0]["levels"], json!([0, 0, 0, 0, 0, 0, 0, 0]));
        assert_eq!(value["retained"], json!(1));
    }

    #[test]
    fn test_terminal_events() {
        assert!(!SearchEvent::Progress { percent: 100 }.is_terminal());
        assert!(SearchEvent::Cancelled.is_terminal());
        assert!(SearchEvent::Failed {
            error: "boom".into()
        }
        .is_terminal());
        assert_eq!(
            serde_json::to_value(SearchEvent::Cancelled).unwrap(),
            json!({"done": true, "cancelled": true})
        );
    }
}
