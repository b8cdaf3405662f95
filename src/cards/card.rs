//! Card kinds and static card descriptors.
//!
//! `CardKind` is the identity of a card: piles hold `CardKind` values and
//! two cards are the same card iff their kinds match. The `Card` descriptor
//! holds the unchanging data for a kind (cost, coin value, victory points,
//! help text) and lives in the [`Catalog`](super::Catalog). A descriptor is
//! never an owned unit; ownership is always tracked by the piles.

use serde::{Deserialize, Serialize};

/// Every card kind in the game: 3 treasures, 5 victory/curse kinds, and the
/// 24 kingdom action cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardKind {
    Copper,
    Silver,
    Gold,
    Estate,
    Duchy,
    Province,
    Gardens,
    Curse,
    Adventurer,
    Bureaucrat,
    Cellar,
    Chancellor,
    Chapel,
    CouncilRoom,
    Feast,
    Festival,
    Laboratory,
    Library,
    Market,
    Militia,
    Mine,
    Moat,
    Moneylender,
    Remodel,
    Smithy,
    Spy,
    Thief,
    ThroneRoom,
    Village,
    Witch,
    Woodcutter,
    Workshop,
}

impl CardKind {
    /// All card kinds, in catalog order.
    pub const ALL: [CardKind; 32] = [
        CardKind::Copper,
        CardKind::Silver,
        CardKind::Gold,
        CardKind::Estate,
        CardKind::Duchy,
        CardKind::Province,
        CardKind::Gardens,
        CardKind::Curse,
        CardKind::Adventurer,
        CardKind::Bureaucrat,
        CardKind::Cellar,
        CardKind::Chancellor,
        CardKind::Chapel,
        CardKind::CouncilRoom,
        CardKind::Feast,
        CardKind::Festival,
        CardKind::Laboratory,
        CardKind::Library,
        CardKind::Market,
        CardKind::Militia,
        CardKind::Mine,
        CardKind::Moat,
        CardKind::Moneylender,
        CardKind::Remodel,
        CardKind::Smithy,
        CardKind::Spy,
        CardKind::Thief,
        CardKind::ThroneRoom,
        CardKind::Village,
        CardKind::Witch,
        CardKind::Woodcutter,
        CardKind::Workshop,
    ];

    /// Canonical (user-facing, lowercase) name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardKind::Copper => "copper",
            CardKind::Silver => "silver",
            CardKind::Gold => "gold",
            CardKind::Estate => "estate",
            CardKind::Duchy => "duchy",
            CardKind::Province => "province",
            CardKind::Gardens => "gardens",
            CardKind::Curse => "curse",
            CardKind::Adventurer => "adventurer",
            CardKind::Bureaucrat => "bureaucrat",
            CardKind::Cellar => "cellar",
            CardKind::Chancellor => "chancellor",
            CardKind::Chapel => "chapel",
            CardKind::CouncilRoom => "council room",
            CardKind::Feast => "feast",
            CardKind::Festival => "festival",
            CardKind::Laboratory => "laboratory",
            CardKind::Library => "library",
            CardKind::Market => "market",
            CardKind::Militia => "militia",
            CardKind::Mine => "mine",
            CardKind::Moat => "moat",
            CardKind::Moneylender => "moneylender",
            CardKind::Remodel => "remodel",
            CardKind::Smithy => "smithy",
            CardKind::Spy => "spy",
            CardKind::Thief => "thief",
            CardKind::ThroneRoom => "throne room",
            CardKind::Village => "village",
            CardKind::Witch => "witch",
            CardKind::Woodcutter => "woodcutter",
            CardKind::Workshop => "workshop",
        }
    }

    /// Basic cards are the always-present treasure/victory/curse piles.
    /// Empty basic piles never count toward the three-pile game-over rule
    /// (Gardens is a kingdom card, not a basic one).
    #[must_use]
    pub const fn is_basic(self) -> bool {
        matches!(
            self,
            CardKind::Copper
                | CardKind::Silver
                | CardKind::Gold
                | CardKind::Estate
                | CardKind::Duchy
                | CardKind::Province
                | CardKind::Curse
        )
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Static card descriptor.
///
/// Immutable after catalog construction; a single descriptor per kind is
/// shared by every lookup. Equality is by kind.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    /// Which card this describes.
    pub kind: CardKind,
    /// Formatted label with the shortcut parenthesized, e.g. `(wo)odcutter`.
    pub display_name: &'static str,
    /// Short input token, e.g. `wo`.
    pub shortcut: &'static str,
    /// Purchase cost in coins.
    pub cost: u32,
    /// Treasure value when counted as spend.
    pub coin_value: u32,
    /// Whether this card can be played during the action phase.
    pub is_action: bool,
    /// Fixed victory points. Negative for Curse. For Gardens this is the
    /// per-10-cards multiplier, not a fixed value.
    pub victory_points: i32,
    /// One-line rules text.
    pub help_text: &'static str,
}

impl Card {
    /// Whether this card is worth coin when spent.
    #[must_use]
    pub fn is_treasure(&self) -> bool {
        self.coin_value > 0
    }

    /// Whether this card carries victory points (positive or negative).
    /// Used by Bureaucrat's forced reveal.
    #[must_use]
    pub fn is_victory(&self) -> bool {
        self.victory_points != 0
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Card {}
