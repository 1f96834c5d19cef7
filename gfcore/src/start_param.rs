//! Startup deep-link parameter parsing.
//!
//! The bot hands the Mini App one opaque start parameter. Two prefixes are
//! recognized: `donate_<collectionId>` jumps straight into a collection's
//! detail view, `santa_<gameId>` joins a Secret Santa game. The id is the
//! segment between the first and second underscore.

/// The parsed startup parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartParam {
    /// Open a collection's detail view directly.
    Donate(String),
    /// Join the given Secret Santa game, then show the Santa view.
    SantaJoin(String),
    /// Absent or unrecognized; the app starts on the default view.
    None,
}

impl StartParam {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return StartParam::None;
        };
        if let Some(rest) = raw.strip_prefix("donate_") {
            StartParam::Donate(first_segment(rest))
        } else if let Some(rest) = raw.strip_prefix("santa_") {
            StartParam::SantaJoin(first_segment(rest))
        } else {
            StartParam::None
        }
    }
}

fn first_segment(rest: &str) -> String {
    rest.split('_').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn donate_prefix_extracts_collection_id() {
        assert_eq!(
            StartParam::parse(Some("donate_42")),
            StartParam::Donate("42".to_string())
        );
    }

    #[test]
    fn santa_prefix_extracts_game_id() {
        assert_eq!(
            StartParam::parse(Some("santa_7")),
            StartParam::SantaJoin("7".to_string())
        );
    }

    #[test]
    fn id_is_the_segment_before_the_next_underscore() {
        assert_eq!(
            StartParam::parse(Some("donate_42_extra")),
            StartParam::Donate("42".to_string())
        );
    }

    #[test]
    fn absent_or_unknown_is_none() {
        assert_eq!(StartParam::parse(None), StartParam::None);
        assert_eq!(StartParam::parse(Some("")), StartParam::None);
        assert_eq!(StartParam::parse(Some("ref_123")), StartParam::None);
    }
}
