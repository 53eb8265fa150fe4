//! Study data model: decks, cards and imported rows.
//!
//! These types describe the shape of the data only. Scheduling, import and
//! storage are not implemented yet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// A deck of flashcards (a problem set).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub user_id: UserId,
    pub name: String,
}

/// Review state of one flashcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub user_id: UserId,
    pub deck_id: String,
    pub next_review_date: DateTime<Utc>,
    /// Current review interval in days.
    pub interval: u32,
    /// Multiplier applied to the interval; higher means easier.
    pub ease_factor: f64,
}

/// One row of card data imported from a CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvCardData {
    /// Question number.
    pub id: String,
    pub importance: String,
    /// Question text (front of the card).
    pub front: String,
    /// Answer text (back of the card).
    pub back: String,
    /// Tags or commentary.
    pub tags: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_card_uses_camel_case_fields() {
        let card = Card {
            id: "c1".to_string(),
            user_id: UserId::new("u1"),
            deck_id: "d1".to_string(),
            next_review_date: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
            interval: 3,
            ease_factor: 2.5,
        };

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["deckId"], "d1");
        assert_eq!(json["easeFactor"], 2.5);
        assert_eq!(json["nextReviewDate"], "2026-01-02T03:04:05Z");
    }

    #[test]
    fn test_deck_from_json() {
        let deck: Deck =
            serde_json::from_str(r#"{"id":"d1","userId":"u1","name":"Consolidation"}"#).unwrap();
        assert_eq!(deck.user_id.as_str(), "u1");
        assert_eq!(deck.name, "Consolidation");
    }
}
