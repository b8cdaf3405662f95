//! Card catalog: the immutable registry of card definitions.
//!
//! The catalog maps every [`CardKind`] to its [`Card`] descriptor and
//! resolves user input tokens (canonical name or shortcut) back to kinds.
//! It is built once at setup and never mutated afterwards; ownership of
//! physical cards is tracked by piles, never by the catalog.

use rustc_hash::FxHashMap;

use super::card::{Card, CardKind};

/// Registry of card descriptors with token lookup.
#[derive(Clone, Debug)]
pub struct Catalog {
    cards: FxHashMap<CardKind, Card>,
    tokens: FxHashMap<&'static str, CardKind>,
}

impl Catalog {
    /// Build the standard catalog of all 32 card kinds.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self {
            cards: FxHashMap::default(),
            tokens: FxHashMap::default(),
        };

        // name, shortcut, cost, coin, action, vp, help
        catalog.register(Card {
            kind: CardKind::Copper,
            display_name: "(c)opper",
            shortcut: "c",
            cost: 0,
            coin_value: 1,
            is_action: false,
            victory_points: 0,
            help_text: "1 coin.",
        });
        catalog.register(Card {
            kind: CardKind::Silver,
            display_name: "(s)ilver",
            shortcut: "s",
            cost: 3,
            coin_value: 2,
            is_action: false,
            victory_points: 0,
            help_text: "2 coins.",
        });
        catalog.register(Card {
            kind: CardKind::Gold,
            display_name: "(g)old",
            shortcut: "g",
            cost: 6,
            coin_value: 3,
            is_action: false,
            victory_points: 0,
            help_text: "3 coins.",
        });
        catalog.register(Card {
            kind: CardKind::Estate,
            display_name: "(e)state",
            shortcut: "e",
            cost: 2,
            coin_value: 0,
            is_action: false,
            victory_points: 1,
            help_text: "+1 victory point.",
        });
        catalog.register(Card {
            kind: CardKind::Duchy,
            display_name: "(d)uchy",
            shortcut: "d",
            cost: 5,
            coin_value: 0,
            is_action: false,
            victory_points: 3,
            help_text: "+3 victory points.",
        });
        catalog.register(Card {
            kind: CardKind::Province,
            display_name: "(p)rovince",
            shortcut: "p",
            cost: 8,
            coin_value: 0,
            is_action: false,
            victory_points: 6,
            help_text: "+6 victory points.",
        });
        catalog.register(Card {
            kind: CardKind::Gardens,
            display_name: "(ga)rdens",
            shortcut: "ga",
            cost: 4,
            coin_value: 0,
            is_action: false,
            victory_points: 1,
            help_text: "+1 victory point per 10 cards in your deck.",
        });
        catalog.register(Card {
            kind: CardKind::Curse,
            display_name: "(cu)rse",
            shortcut: "cu",
            cost: 0,
            coin_value: 0,
            is_action: false,
            victory_points: -1,
            help_text: "-1 victory point.",
        });
        catalog.register(Card {
            kind: CardKind::Adventurer,
            display_name: "(a)dventurer",
            shortcut: "a",
            cost: 6,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "Reveal cards from your deck until you reveal 2 treasure cards. \
                        Put those treasure cards into your hand and discard the other \
                        revealed cards.",
        });
        catalog.register(Card {
            kind: CardKind::Bureaucrat,
            display_name: "(b)ureaucrat",
            shortcut: "b",
            cost: 4,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "Gain a silver on top of your deck. Each other player reveals a \
                        victory card from their hand and puts it on top of their deck.",
        });
        catalog.register(Card {
            kind: CardKind::Cellar,
            display_name: "(ce)llar",
            shortcut: "ce",
            cost: 2,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "+1 action. Discard any number of cards / +1 card per discard.",
        });
        catalog.register(Card {
            kind: CardKind::Chancellor,
            display_name: "(ch)ancellor",
            shortcut: "ch",
            cost: 3,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "+2 spend. You may immediately put your deck into your discard pile.",
        });
        catalog.register(Card {
            kind: CardKind::Chapel,
            display_name: "(cha)pel",
            shortcut: "cha",
            cost: 2,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "Trash up to 4 cards.",
        });
        catalog.register(Card {
            kind: CardKind::CouncilRoom,
            display_name: "(co)uncil room",
            shortcut: "co",
            cost: 5,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "+4 cards. +1 buy. Each other player draws a card.",
        });
        catalog.register(Card {
            kind: CardKind::Feast,
            display_name: "(fe)ast",
            shortcut: "fe",
            cost: 4,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "Trash this card. Gain a card costing up to 5 coins.",
        });
        catalog.register(Card {
            kind: CardKind::Festival,
            display_name: "(f)estival",
            shortcut: "f",
            cost: 5,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "+2 actions. +1 buy. +2 spend.",
        });
        catalog.register(Card {
            kind: CardKind::Laboratory,
            display_name: "(l)aboratory",
            shortcut: "l",
            cost: 5,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "+2 cards. +1 action.",
        });
        catalog.register(Card {
            kind: CardKind::Library,
            display_name: "(li)brary",
            shortcut: "li",
            cost: 5,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "Draw until you have 7 cards in hand. You may discard any action \
                        cards as you draw them.",
        });
        catalog.register(Card {
            kind: CardKind::Market,
            display_name: "(ma)rket",
            shortcut: "ma",
            cost: 5,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "+1 card +1 action +1 buy +1 spend",
        });
        catalog.register(Card {
            kind: CardKind::Militia,
            display_name: "(m)ilitia",
            shortcut: "m",
            cost: 4,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "+2 spend. Each other player discards down to 3 cards.",
        });
        catalog.register(Card {
            kind: CardKind::Mine,
            display_name: "(mi)ne",
            shortcut: "mi",
            cost: 5,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "Trash a copper/silver, gain a silver/gold in hand.",
        });
        catalog.register(Card {
            kind: CardKind::Moat,
            display_name: "(mo)at",
            shortcut: "mo",
            cost: 2,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "+2 cards. Defend against other player attacks.",
        });
        catalog.register(Card {
            kind: CardKind::Moneylender,
            display_name: "(mon)eylender",
            shortcut: "mon",
            cost: 4,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "Trash a copper in hand. If you do, +3 spend.",
        });
        catalog.register(Card {
            kind: CardKind::Remodel,
            display_name: "(r)emodel",
            shortcut: "r",
            cost: 4,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "Trash a card in hand. Gain a card worth up to 2 more coins.",
        });
        catalog.register(Card {
            kind: CardKind::Smithy,
            display_name: "(sm)ithy",
            shortcut: "sm",
            cost: 4,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "+3 cards.",
        });
        catalog.register(Card {
            kind: CardKind::Spy,
            display_name: "(sp)y",
            shortcut: "sp",
            cost: 4,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "+1 card. +1 action. Each player (including you) reveals the top \
                        card of his deck and either discards it or puts it back, your \
                        choice.",
        });
        catalog.register(Card {
            kind: CardKind::Thief,
            display_name: "(t)hief",
            shortcut: "t",
            cost: 4,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "Each player reveals the top 2 cards from his deck. If they reveal \
                        any treasure cards, they trash 1 that you choose. You may gain any \
                        or all of these trashed cards. They discard the other revealed \
                        cards.",
        });
        catalog.register(Card {
            kind: CardKind::ThroneRoom,
            display_name: "(th)rone room",
            shortcut: "th",
            cost: 4,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "Choose an action card in your hand. Play it twice.",
        });
        catalog.register(Card {
            kind: CardKind::Village,
            display_name: "(v)illage",
            shortcut: "v",
            cost: 3,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "+1 card. +2 actions.",
        });
        catalog.register(Card {
            kind: CardKind::Witch,
            display_name: "(wi)tch",
            shortcut: "wi",
            cost: 5,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "+2 cards. Each other player takes a curse card.",
        });
        catalog.register(Card {
            kind: CardKind::Woodcutter,
            display_name: "(wo)odcutter",
            shortcut: "wo",
            cost: 3,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "+1 buy. +2 spend.",
        });
        catalog.register(Card {
            kind: CardKind::Workshop,
            display_name: "(w)orkshop",
            shortcut: "w",
            cost: 3,
            coin_value: 0,
            is_action: true,
            victory_points: 0,
            help_text: "Gain a card costing up to 4.",
        });

        catalog
    }

    /// Register a card descriptor.
    ///
    /// Panics if the kind or either of its tokens is already registered.
    fn register(&mut self, card: Card) {
        let kind = card.kind;
        if self.cards.contains_key(&kind) {
            panic!("card {kind} already registered");
        }
        if self.tokens.insert(kind.name(), kind).is_some() {
            panic!("token {:?} already registered", kind.name());
        }
        if card.shortcut != kind.name() && self.tokens.insert(card.shortcut, kind).is_some() {
            panic!("shortcut {:?} already registered", card.shortcut);
        }
        self.cards.insert(kind, card);
    }

    /// Get the descriptor for a kind.
    #[must_use]
    pub fn get(&self, kind: CardKind) -> &Card {
        &self.cards[&kind]
    }

    /// Resolve an input token (canonical name or shortcut) to a kind.
    #[must_use]
    pub fn lookup(&self, token: &str) -> Option<CardKind> {
        self.tokens.get(token.trim()).copied()
    }

    /// Iterate over all descriptors.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Help text per card, `(kind, help)` pairs sorted by cost then name.
    /// Data for the caller's help menu.
    #[must_use]
    pub fn help_entries(&self) -> Vec<(CardKind, &'static str)> {
        let mut entries: Vec<_> = self.cards.values().collect();
        entries.sort_by_key(|c| (c.cost, c.kind.name()));
        entries.iter().map(|c| (c.kind, c.help_text)).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
