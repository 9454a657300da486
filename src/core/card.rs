//! Card identity and runtime face state.
//!
//! A `Card` carries the static face data stamped onto it at generation
//! (pair name, flavor, suit, color) plus a single mutable `FaceState`.
//!
//! ## Invariants
//!
//! - `color` is fully determined by `suit` (hearts/diamonds are red,
//!   clubs/spades are black) and is fixed at construction. The field is
//!   private so it cannot drift from the suit.
//! - Exactly two cards in a deck share each `name`; the pair also shares
//!   flavor, suit, and color.
//! - Face state is tri-state: `Matched` implies the card was revealed,
//!   so the impossible "matched but face-down" combination cannot be
//!   represented.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// French playing-card suits.
///
/// A suit is drawn once per pair at generation and never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits, in a fixed order for uniform draws.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// The color implied by this suit.
    ///
    /// Hearts and diamonds are red, clubs and spades are black.
    #[must_use]
    pub const fn color(self) -> CardColor {
        match self {
            Suit::Hearts | Suit::Diamonds => CardColor::Red,
            Suit::Clubs | Suit::Spades => CardColor::Black,
        }
    }
}

/// Card color, derived from the suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardColor {
    Red,
    Black,
}

/// Face-art family for a card template.
///
/// Presentation layers map flavors to asset sets; the engine only
/// carries the tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flavor {
    Beasts,
    Blossoms,
    Gems,
    Runes,
    Tides,
    Embers,
}

/// The three states a card face moves through.
///
/// `FaceDown -> FaceUp` on a flip, then either back to `FaceDown` after
/// a mismatch window or forward to `Matched` (terminal for the card).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceState {
    FaceDown,
    FaceUp,
    Matched,
}

impl FaceState {
    /// Is this card available to flip?
    #[must_use]
    pub const fn is_face_down(self) -> bool {
        matches!(self, FaceState::FaceDown)
    }

    /// Has this card been permanently matched?
    #[must_use]
    pub const fn is_matched(self) -> bool {
        matches!(self, FaceState::Matched)
    }
}

/// A card in a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique ID within the session.
    pub id: CardId,

    /// Pair key: exactly two cards in a deck share this name.
    pub name: String,

    /// Face-art family, shared by both members of the pair.
    pub flavor: Flavor,

    /// Suit, drawn at generation and fixed.
    pub suit: Suit,

    /// Color derived from the suit at construction.
    color: CardColor,

    /// Current face state.
    pub face: FaceState,
}

impl Card {
    /// Create a face-down card. Color is derived from the suit.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, flavor: Flavor, suit: Suit) -> Self {
        Self {
            id,
            name: name.into(),
            flavor,
            suit,
            color: suit.color(),
            face: FaceState::FaceDown,
        }
    }

    /// The card's color.
    #[must_use]
    pub fn color(&self) -> CardColor {
        self.color
    }

    /// Do these two cards form a pair?
    #[must_use]
    pub fn matches(&self, other: &Card) -> bool {
        self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "Card(7)");
    }

    #[test]
    fn test_suit_color_mapping() {
        assert_eq!(Suit::Hearts.color(), CardColor::Red);
        assert_eq!(Suit::Diamonds.color(), CardColor::Red);
        assert_eq!(Suit::Clubs.color(), CardColor::Black);
        assert_eq!(Suit::Spades.color(), CardColor::Black);
    }

    #[test]
    fn test_card_new_derives_color() {
        let card = Card::new(CardId::new(0), "fox", Flavor::Beasts, Suit::Hearts);

        assert_eq!(card.color(), CardColor::Red);
        assert_eq!(card.face, FaceState::FaceDown);

        let card = Card::new(CardId::new(1), "opal", Flavor::Gems, Suit::Spades);
        assert_eq!(card.color(), CardColor::Black);
    }

    #[test]
    fn test_card_matches_by_name() {
        let a = Card::new(CardId::new(0), "fox", Flavor::Beasts, Suit::Hearts);
        let b = Card::new(CardId::new(1), "fox", Flavor::Beasts, Suit::Hearts);
        let c = Card::new(CardId::new(2), "owl", Flavor::Beasts, Suit::Clubs);

        assert!(a.matches(&b));
        assert!(!a.matches(&c));
    }

    #[test]
    fn test_face_state_predicates() {
        assert!(FaceState::FaceDown.is_face_down());
        assert!(!FaceState::FaceUp.is_face_down());
        assert!(FaceState::Matched.is_matched());
        assert!(!FaceState::FaceUp.is_matched());
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::new(CardId::new(3), "lotus", Flavor::Blossoms, Suit::Diamonds);

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
        assert_eq!(deserialized.color(), CardColor::Red);
    }
}
