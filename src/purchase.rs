//! The purchase procedure, shared by the buy phase and "gain a card"
//! effects.
//!
//! [`try_purchase`] validates and executes a single attempt; [`purchase`]
//! wraps it in a prompt/re-offer loop. Free gains (Workshop, Feast,
//! Remodel) ignore the player's coin and consume neither a buy nor the
//! remaining actions.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::cards::{Catalog, CardKind};
use crate::core::Player;
use crate::prompter::Prompter;
use crate::supply::Supply;

/// Where a gained card lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GainDestination {
    /// The normal case: bought and gained cards go to the discard pile.
    Discard,
    /// Straight into hand (Mine's upgraded treasure).
    Hand,
}

/// Why a single purchase attempt failed. All three are recoverable by
/// re-prompting.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseError {
    /// Not sold in this game, or the pile is empty.
    #[error("card is not available")]
    NotAvailable,
    /// Cost exceeds the ceiling for this transaction.
    #[error("card is too expensive for this transaction")]
    TooExpensive,
    /// Cost exceeds the player's spendable coin.
    #[error("not enough coin")]
    InsufficientFunds,
}

/// Outcome of an interactive purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseResult {
    /// The player bought/gained this card.
    Purchased(CardKind),
    /// No purchase was made.
    Declined,
}

/// The kinds this player could be offered right now: non-empty piles
/// within the applicable ceiling (their coin unless the purchase is
/// free), Curse excluded. Data for the caller's shop display and for
/// prompting.
#[must_use]
pub fn offerable(
    supply: &Supply,
    catalog: &Catalog,
    player: &Player,
    max_spend: u32,
    free: bool,
) -> Vec<CardKind> {
    let ceiling = if free {
        max_spend
    } else {
        max_spend.min(player.spendable_coin(catalog))
    };
    supply.offerable(catalog, ceiling)
}

/// Validate and execute one purchase attempt.
///
/// On success the card has been dealt from its supply pile into
/// `destination`; unless `free`, the player's buy is consumed, their
/// actions are over, and the cost has been paid.
pub fn try_purchase(
    supply: &mut Supply,
    catalog: &Catalog,
    player: &mut Player,
    kind: CardKind,
    destination: GainDestination,
    max_spend: u32,
    free: bool,
) -> Result<CardKind, PurchaseError> {
    if !supply.is_available(kind) {
        return Err(PurchaseError::NotAvailable);
    }

    let cost = catalog.get(kind).cost;
    if cost > max_spend {
        return Err(PurchaseError::TooExpensive);
    }
    if !free && cost > player.spendable_coin(catalog) {
        return Err(PurchaseError::InsufficientFunds);
    }

    let card = supply.deal(kind).map_err(|_| PurchaseError::NotAvailable)?;
    match destination {
        GainDestination::Discard => player.discard.add(card),
        GainDestination::Hand => player.hand.add(card),
    }

    if !free {
        player.buys_remaining = player.buys_remaining.saturating_sub(1);
        player.actions_remaining = 0;
        pay(player, catalog, cost);
    }

    debug!(player = %player.name, card = %kind, cost, free, "purchase completed");
    Ok(card)
}

/// Deduct `cost`, bonus coin first, then hand treasure in Gold, Silver,
/// Copper order. Spent treasure moves to the discard pile. A treasure is
/// only taken while its full value fits the remainder; if a remainder
/// survives that pass, the smallest treasure still in hand covers it
/// (overpayment, no change given).
fn pay(player: &mut Player, catalog: &Catalog, cost: u32) {
    let mut remainder = cost;

    if remainder >= player.bonus_coin {
        remainder -= player.bonus_coin;
        player.bonus_coin = 0;
    } else {
        player.bonus_coin -= remainder;
        remainder = 0;
    }

    const SPEND_ORDER: [CardKind; 3] = [CardKind::Gold, CardKind::Silver, CardKind::Copper];

    for denom in SPEND_ORDER {
        let value = catalog.get(denom).coin_value;
        while remainder >= value && player.hand.contains(denom) {
            let _ = player.hand.remove(denom);
            player.discard.add(denom);
            remainder -= value;
        }
    }

    if remainder > 0 {
        for denom in SPEND_ORDER.iter().rev() {
            if player.hand.contains(*denom) {
                let _ = player.hand.remove(*denom);
                player.discard.add(*denom);
                remainder = 0;
                break;
            }
        }
    }
    debug_assert_eq!(remainder, 0, "purchase allowed without coverage");
}

/// Interactive purchase: prompt, validate, re-offer on recoverable
/// failures.
///
/// Quitting the prompt declines. An unknown name or an unavailable or
/// over-ceiling card re-prompts; insufficient funds ends the procedure
/// with [`PurchaseResult::Declined`].
pub fn purchase(
    supply: &mut Supply,
    catalog: &Catalog,
    player: &mut Player,
    destination: GainDestination,
    max_spend: u32,
    free: bool,
    prompter: &mut dyn Prompter,
) -> PurchaseResult {
    loop {
        let Some(token) = prompter.choose_card_name("Name of card to buy (q to quit)") else {
            return PurchaseResult::Declined;
        };

        let Some(kind) = catalog.lookup(&token) else {
            continue; // unknown name, re-offer
        };

        match try_purchase(supply, catalog, player, kind, destination, max_spend, free) {
            Ok(card) => return PurchaseResult::Purchased(card),
            Err(PurchaseError::NotAvailable | PurchaseError::TooExpensive) => continue,
            Err(PurchaseError::InsufficientFunds) => return PurchaseResult::Declined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompter::{Reply, ScriptedPrompter};

    fn setup() -> (Supply, Catalog, Player) {
        let mut supply = Supply::standard(2);
        supply
            .set_kingdom_cards(&[
                CardKind::Moat,
                CardKind::Cellar,
                CardKind::Village,
                CardKind::Woodcutter,
                CardKind::Workshop,
                CardKind::Militia,
                CardKind::Smithy,
                CardKind::Remodel,
                CardKind::Market,
                CardKind::Mine,
            ])
            .unwrap();
        let mut player = Player::new("buyer");
        player.buys_remaining = 1;
        player.actions_remaining = 1;
        (supply, Catalog::standard(), player)
    }

    #[test]
    fn test_buy_province_with_exact_treasure() {
        let (mut supply, catalog, mut player) = setup();
        player.hand.add(CardKind::Gold);
        player.hand.add(CardKind::Silver);
        for _ in 0..3 {
            player.hand.add(CardKind::Copper);
        }

        let bought = try_purchase(
            &mut supply,
            &catalog,
            &mut player,
            CardKind::Province,
            GainDestination::Discard,
            8,
            false,
        )
        .unwrap();

        assert_eq!(bought, CardKind::Province);
        // All 5 treasures spent, moved hand -> discard.
        assert!(player.hand.is_empty());
        assert_eq!(player.discard.count(CardKind::Gold), 1);
        assert_eq!(player.discard.count(CardKind::Silver), 1);
        assert_eq!(player.discard.count(CardKind::Copper), 3);
        assert_eq!(player.discard.count(CardKind::Province), 1);
        assert_eq!(player.buys_remaining, 0);
        assert_eq!(player.actions_remaining, 0);
        assert_eq!(supply.count(CardKind::Province), 7);
    }

    #[test]
    fn test_bonus_coin_spent_first() {
        let (mut supply, catalog, mut player) = setup();
        player.bonus_coin = 2;
        player.hand.add(CardKind::Copper);

        try_purchase(
            &mut supply,
            &catalog,
            &mut player,
            CardKind::Village,
            GainDestination::Discard,
            8,
            false,
        )
        .unwrap();

        assert_eq!(player.bonus_coin, 0);
        // Bonus covered 2 of the 3; one copper covers the rest.
        assert!(player.hand.is_empty());
        assert_eq!(player.discard.count(CardKind::Copper), 1);
    }

    #[test]
    fn test_greedy_payment_skips_oversized_then_overpays() {
        let (mut supply, catalog, mut player) = setup();
        // Cost 2 with only a gold in hand: affordability passes (3 >= 2),
        // the fit pass takes nothing, the cover step spends the gold.
        player.hand.add(CardKind::Gold);

        try_purchase(
            &mut supply,
            &catalog,
            &mut player,
            CardKind::Moat,
            GainDestination::Discard,
            8,
            false,
        )
        .unwrap();

        assert!(player.hand.is_empty());
        assert_eq!(player.discard.count(CardKind::Gold), 1);
    }

    #[test]
    fn test_insufficient_funds() {
        let (mut supply, catalog, mut player) = setup();
        player.hand.add(CardKind::Copper);

        let err = try_purchase(
            &mut supply,
            &catalog,
            &mut player,
            CardKind::Province,
            GainDestination::Discard,
            8,
            false,
        )
        .unwrap_err();

        assert_eq!(err, PurchaseError::InsufficientFunds);
        // Nothing changed: supply intact, coin kept, buy not consumed.
        assert_eq!(supply.count(CardKind::Province), 8);
        assert_eq!(player.hand.count(CardKind::Copper), 1);
        assert_eq!(player.buys_remaining, 1);
    }

    #[test]
    fn test_free_gain_respects_ceiling_only() {
        let (mut supply, catalog, mut player) = setup();
        // No coin at all; Workshop-style gain up to 4.
        assert_eq!(player.spendable_coin(&catalog), 0);

        let gained = try_purchase(
            &mut supply,
            &catalog,
            &mut player,
            CardKind::Smithy,
            GainDestination::Discard,
            4,
            true,
        )
        .unwrap();

        assert_eq!(gained, CardKind::Smithy);
        assert_eq!(player.buys_remaining, 1); // no buy consumed
        assert_eq!(player.actions_remaining, 1); // actions untouched

        let err = try_purchase(
            &mut supply,
            &catalog,
            &mut player,
            CardKind::Market,
            GainDestination::Discard,
            4,
            true,
        )
        .unwrap_err();
        assert_eq!(err, PurchaseError::TooExpensive);
    }

    #[test]
    fn test_not_available() {
        let (mut supply, catalog, mut player) = setup();
        player.hand.add(CardKind::Gold);

        let err = try_purchase(
            &mut supply,
            &catalog,
            &mut player,
            CardKind::Witch, // not in this kingdom
            GainDestination::Discard,
            8,
            false,
        )
        .unwrap_err();
        assert_eq!(err, PurchaseError::NotAvailable);
    }

    #[test]
    fn test_offerable_uses_spend_unless_free() {
        let (supply, catalog, mut player) = setup();
        player.hand.add(CardKind::Copper);
        player.hand.add(CardKind::Copper);

        let offered = offerable(&supply, &catalog, &player, 8, false);
        assert!(offered.contains(&CardKind::Moat)); // cost 2
        assert!(!offered.contains(&CardKind::Village)); // cost 3 > 2 coin

        let free_offered = offerable(&supply, &catalog, &player, 5, true);
        assert!(free_offered.contains(&CardKind::Market)); // cost 5, coin ignored
    }

    #[test]
    fn test_interactive_purchase_reprompts_then_buys() {
        let (mut supply, catalog, mut player) = setup();
        player.hand.add(CardKind::Silver);
        player.hand.add(CardKind::Copper);
        assert_eq!(player.spendable_coin(&catalog), 3);

        let mut prompter = ScriptedPrompter::with_replies([
            Reply::Name("xyzzy".into()),  // unknown: re-offer
            Reply::Name("witch".into()),  // not in game: re-offer
            Reply::Name("market".into()), // cost 5 > ceiling 4: re-offer
            Reply::Name("v".into()),      // village by shortcut, cost 3
        ]);

        let result = purchase(
            &mut supply,
            &catalog,
            &mut player,
            GainDestination::Discard,
            4,
            false,
            &mut prompter,
        );

        assert_eq!(result, PurchaseResult::Purchased(CardKind::Village));
        assert_eq!(player.discard.count(CardKind::Village), 1);
        // Both treasures covered the cost exactly.
        assert!(player.hand.is_empty());
        assert_eq!(player.discard.count(CardKind::Silver), 1);
        assert_eq!(player.discard.count(CardKind::Copper), 1);
    }

    #[test]
    fn test_interactive_purchase_quit_declines() {
        let (mut supply, catalog, mut player) = setup();
        let mut prompter = ScriptedPrompter::with_replies([Reply::Quit]);

        let result = purchase(
            &mut supply,
            &catalog,
            &mut player,
            GainDestination::Discard,
            8,
            false,
            &mut prompter,
        );

        assert_eq!(result, PurchaseResult::Declined);
    }

    #[test]
    fn test_interactive_purchase_insufficient_funds_declines() {
        let (mut supply, catalog, mut player) = setup();
        player.hand.add(CardKind::Copper);

        let mut prompter = ScriptedPrompter::with_replies([Reply::Name("province".into())]);

        let result = purchase(
            &mut supply,
            &catalog,
            &mut player,
            GainDestination::Discard,
            8,
            false,
            &mut prompter,
        );

        assert_eq!(result, PurchaseResult::Declined);
        assert_eq!(supply.count(CardKind::Province), 8);
    }
}
