//! The function-call contract declared to the completion service.

use meepledb_core::{Difficulty, GameType, PlayTime};
use serde_json::json;

/// Name of the single tool the model is forced to call.
pub(crate) const TOOL_NAME: &str = "record_game";

pub(crate) const TOOL_DESCRIPTION: &str =
    "Record the structured catalog fields for the board game described in the page content.";

/// JSON schema for the tool parameters.
///
/// The closed-set fields enumerate their literals so the service rejects
/// out-of-set values before they ever reach us; `title` is the only
/// required field.
pub(crate) fn extraction_parameters() -> serde_json::Value {
    let difficulties: Vec<&str> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();
    let play_times: Vec<&str> = PlayTime::ALL.iter().map(|p| p.as_str()).collect();
    let game_types: Vec<&str> = GameType::ALL.iter().map(|g| g.as_str()).collect();

    json!({
        "type": "object",
        "properties": {
            "title": {
                "type": "string",
                "description": "The game's title, exactly as the page names it."
            },
            "description": {
                "type": "string",
                "description": "Long-form description of the game, in markdown."
            },
            "difficulty": { "type": "string", "enum": difficulties },
            "play_time": { "type": "string", "enum": play_times },
            "game_type": { "type": "string", "enum": game_types },
            "min_players": { "type": "integer", "minimum": 1 },
            "max_players": { "type": "integer", "minimum": 1 },
            "suggested_age": {
                "type": "string",
                "description": "Suggested minimum age, e.g. \"10+\"."
            },
            "mechanics": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Gameplay mechanic names, e.g. \"Engine Building\"."
            },
            "publisher": { "type": "string" },
            "main_image": {
                "type": "string",
                "description": "Box-art image URL, selected verbatim from the candidate list."
            },
            "gameplay_images": {
                "type": "array",
                "items": { "type": "string" },
                "maxItems": 2,
                "description": "Gameplay/component photo URLs, selected verbatim from the candidate list."
            },
            "bgg_url": {
                "type": "string",
                "description": "Canonical catalog page URL for the game, if stated."
            }
        },
        "required": ["title"]
    })
}
