//! Import request and extracted-record types shared across the pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Difficulty, GameType, PlayTime, SaleCondition};

/// An administrator's request to import a catalog page.
///
/// Immutable once accepted; the placement flags are carried through the
/// pipeline untouched and applied at upsert time.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRequest {
    /// Third-party catalog page URL; the upsert key for the record.
    pub url: String,
    #[serde(default)]
    pub is_coming_soon: bool,
    #[serde(default)]
    pub is_for_sale: bool,
    pub sale_price: Option<Decimal>,
    pub sale_condition: Option<SaleCondition>,
    #[serde(default)]
    pub is_expansion: bool,
    /// Public id of the parent game when importing an expansion.
    pub parent_game_id: Option<Uuid>,
    pub location_room: Option<String>,
    pub location_shelf: Option<String>,
}

/// A structured record produced by the extraction service, after enum
/// coercion and player-count normalization.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedGame {
    pub title: String,
    pub description: Option<String>,
    pub difficulty: Difficulty,
    pub play_time: PlayTime,
    pub game_type: GameType,
    pub min_players: Option<i32>,
    pub max_players: Option<i32>,
    pub suggested_age: Option<String>,
    /// Free-text mechanic names, deduplicated case-insensitively.
    pub mechanics: Vec<String>,
    pub publisher: Option<String>,
    pub main_image: Option<String>,
    pub gameplay_images: Vec<String>,
    /// External source URL reported by the extractor, if any.
    pub bgg_url: Option<String>,
}

impl ExtractedGame {
    /// Clamps player counts to at least 1 and swaps an inverted min/max pair
    /// so the `min <= max` invariant always holds on the way out.
    pub fn normalize_players(&mut self) {
        self.min_players = self.min_players.map(|n| n.max(1));
        self.max_players = self.max_players.map(|n| n.max(1));
        if let (Some(min), Some(max)) = (self.min_players, self.max_players) {
            if min > max {
                self.min_players = Some(max);
                self.max_players = Some(min);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_game() -> ExtractedGame {
        ExtractedGame {
            title: "Wingspan".to_string(),
            description: None,
            difficulty: Difficulty::MediumLight,
            play_time: PlayTime::OneToTwoHours,
            game_type: GameType::Strategy,
            min_players: None,
            max_players: None,
            suggested_age: None,
            mechanics: vec![],
            publisher: None,
            main_image: None,
            gameplay_images: vec![],
            bgg_url: None,
        }
    }

    #[test]
    fn normalize_players_clamps_to_one() {
        let mut game = base_game();
        game.min_players = Some(0);
        game.max_players = Some(-3);
        game.normalize_players();
        assert_eq!(game.min_players, Some(1));
        assert_eq!(game.max_players, Some(1));
    }

    #[test]
    fn normalize_players_swaps_inverted_range() {
        let mut game = base_game();
        game.min_players = Some(5);
        game.max_players = Some(2);
        game.normalize_players();
        assert_eq!(game.min_players, Some(2));
        assert_eq!(game.max_players, Some(5));
    }

    #[test]
    fn import_request_deserializes_with_defaults() {
        let request: ImportRequest =
            serde_json::from_str(r#"{"url":"https://boardgamegeek.com/boardgame/266192/wingspan"}"#)
                .expect("deserialize minimal request");
        assert!(!request.is_coming_soon);
        assert!(!request.is_for_sale);
        assert!(request.sale_price.is_none());
        assert!(request.parent_game_id.is_none());
    }

    #[test]
    fn import_request_accepts_sale_fields() {
        let request: ImportRequest = serde_json::from_str(
            r#"{"url":"https://example.com/item/1/x","is_for_sale":true,"sale_price":"35.00","sale_condition":"Like New"}"#,
        )
        .expect("deserialize sale request");
        assert!(request.is_for_sale);
        assert_eq!(request.sale_condition, Some(SaleCondition::LikeNew));
    }
}
