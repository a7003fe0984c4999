//! Closed-set catalog enums.
//!
//! Each enum serializes as its display literal (the exact string stored in
//! the database and declared in the extraction schema). Values outside the
//! set never round-trip: parsing coerces to the documented default instead,
//! so an enum-typed column can only ever hold one of the listed literals.

use serde::{Deserialize, Serialize};

/// Game weight on the five-step scale used by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "1 - Light")]
    Light,
    #[serde(rename = "2 - Medium Light")]
    MediumLight,
    #[default]
    #[serde(rename = "3 - Medium")]
    Medium,
    #[serde(rename = "4 - Medium Heavy")]
    MediumHeavy,
    #[serde(rename = "5 - Heavy")]
    Heavy,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Light,
        Difficulty::MediumLight,
        Difficulty::Medium,
        Difficulty::MediumHeavy,
        Difficulty::Heavy,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Light => "1 - Light",
            Difficulty::MediumLight => "2 - Medium Light",
            Difficulty::Medium => "3 - Medium",
            Difficulty::MediumHeavy => "4 - Medium Heavy",
            Difficulty::Heavy => "5 - Heavy",
        }
    }

    /// Parses an exact literal, or `None` for anything outside the set.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }

    /// Coerces a raw extracted value to the closed set, defaulting missing
    /// or out-of-set values to `3 - Medium`.
    #[must_use]
    pub fn parse_or_default(s: Option<&str>) -> Self {
        s.and_then(Self::parse).unwrap_or_default()
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typical session length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayTime {
    #[serde(rename = "Under 30 minutes")]
    Under30,
    #[serde(rename = "30-60 minutes")]
    HalfToFullHour,
    #[default]
    #[serde(rename = "1-2 hours")]
    OneToTwoHours,
    #[serde(rename = "2-4 hours")]
    TwoToFourHours,
    #[serde(rename = "4+ hours")]
    FourPlusHours,
}

impl PlayTime {
    pub const ALL: [PlayTime; 5] = [
        PlayTime::Under30,
        PlayTime::HalfToFullHour,
        PlayTime::OneToTwoHours,
        PlayTime::TwoToFourHours,
        PlayTime::FourPlusHours,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PlayTime::Under30 => "Under 30 minutes",
            PlayTime::HalfToFullHour => "30-60 minutes",
            PlayTime::OneToTwoHours => "1-2 hours",
            PlayTime::TwoToFourHours => "2-4 hours",
            PlayTime::FourPlusHours => "4+ hours",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    #[must_use]
    pub fn parse_or_default(s: Option<&str>) -> Self {
        s.and_then(Self::parse).unwrap_or_default()
    }
}

impl std::fmt::Display for PlayTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameType {
    #[default]
    #[serde(rename = "Strategy")]
    Strategy,
    #[serde(rename = "Family")]
    Family,
    #[serde(rename = "Party")]
    Party,
    #[serde(rename = "Cooperative")]
    Cooperative,
    #[serde(rename = "Card Game")]
    CardGame,
    #[serde(rename = "Dice Game")]
    DiceGame,
    #[serde(rename = "War Game")]
    WarGame,
    #[serde(rename = "Abstract")]
    Abstract,
}

impl GameType {
    pub const ALL: [GameType; 8] = [
        GameType::Strategy,
        GameType::Family,
        GameType::Party,
        GameType::Cooperative,
        GameType::CardGame,
        GameType::DiceGame,
        GameType::WarGame,
        GameType::Abstract,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GameType::Strategy => "Strategy",
            GameType::Family => "Family",
            GameType::Party => "Party",
            GameType::Cooperative => "Cooperative",
            GameType::CardGame => "Card Game",
            GameType::DiceGame => "Dice Game",
            GameType::WarGame => "War Game",
            GameType::Abstract => "Abstract",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == s)
    }

    #[must_use]
    pub fn parse_or_default(s: Option<&str>) -> Self {
        s.and_then(Self::parse).unwrap_or_default()
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical condition for copies listed for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleCondition {
    #[serde(rename = "New")]
    New,
    #[serde(rename = "Like New")]
    LikeNew,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Fair")]
    Fair,
    #[serde(rename = "Poor")]
    Poor,
}

impl SaleCondition {
    pub const ALL: [SaleCondition; 5] = [
        SaleCondition::New,
        SaleCondition::LikeNew,
        SaleCondition::Good,
        SaleCondition::Fair,
        SaleCondition::Poor,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SaleCondition::New => "New",
            SaleCondition::LikeNew => "Like New",
            SaleCondition::Good => "Good",
            SaleCondition::Fair => "Fair",
            SaleCondition::Poor => "Poor",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for SaleCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_exact_literals() {
        assert_eq!(
            Difficulty::parse("2 - Medium Light"),
            Some(Difficulty::MediumLight)
        );
        assert_eq!(Difficulty::parse("5 - Heavy"), Some(Difficulty::Heavy));
    }

    #[test]
    fn difficulty_rejects_near_misses() {
        assert_eq!(Difficulty::parse("Medium"), None);
        assert_eq!(Difficulty::parse("2 - medium light"), None);
        assert_eq!(Difficulty::parse(""), None);
    }

    #[test]
    fn difficulty_out_of_set_defaults_to_medium() {
        assert_eq!(
            Difficulty::parse_or_default(Some("ultra hard")),
            Difficulty::Medium
        );
        assert_eq!(Difficulty::parse_or_default(None), Difficulty::Medium);
    }

    #[test]
    fn play_time_defaults_to_one_to_two_hours() {
        assert_eq!(
            PlayTime::parse_or_default(Some("all day")),
            PlayTime::OneToTwoHours
        );
        assert_eq!(
            PlayTime::parse_or_default(Some("30-60 minutes")),
            PlayTime::HalfToFullHour
        );
    }

    #[test]
    fn game_type_round_trips_through_serde() {
        let json = serde_json::to_string(&GameType::CardGame).expect("serialize");
        assert_eq!(json, "\"Card Game\"");
        let back: GameType = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, GameType::CardGame);
    }

    #[test]
    fn sale_condition_display_matches_literal() {
        assert_eq!(SaleCondition::LikeNew.to_string(), "Like New");
    }
}
