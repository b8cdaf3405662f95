//! Per-card effect procedures and deferred-attack application.
//!
//! [`resolve`] executes the effect of an action card for the acting
//! player. A `Canceled` or `Illegal` result means nothing irreversible
//! happened and the game loop rolls the play back (card returned to hand,
//! no action consumed). Attacks that defer to the victims' turns are
//! queued here and applied by [`apply_attack`] when the game loop reaches
//! each victim.

use smallvec::SmallVec;
use tracing::debug;

use crate::cards::{Catalog, CardKind};
use crate::core::{GameRng, Player, PlayerId};
use crate::prompter::Prompter;
use crate::purchase::{offerable, purchase, GainDestination, PurchaseResult};
use crate::supply::Supply;

use super::context::EffectContext;
use super::{EffectOutcome, EffectResult};

/// Resolve the effect of playing `kind`.
///
/// Non-action kinds have no play effect and report `Illegal`.
pub fn resolve(kind: CardKind, ctx: &mut EffectContext<'_>) -> EffectResult {
    match kind {
        CardKind::Moat => {
            draw(ctx, 2);
            Ok(())
        }
        CardKind::Smithy => {
            draw(ctx, 3);
            Ok(())
        }
        CardKind::Village => {
            grant(ctx, 2, 0, 0);
            draw(ctx, 1);
            Ok(())
        }
        CardKind::Laboratory => {
            grant(ctx, 1, 0, 0);
            draw(ctx, 2);
            Ok(())
        }
        CardKind::Market => {
            grant(ctx, 1, 1, 1);
            draw(ctx, 1);
            Ok(())
        }
        CardKind::Woodcutter => {
            grant(ctx, 0, 1, 2);
            Ok(())
        }
        CardKind::Festival => {
            grant(ctx, 2, 1, 2);
            Ok(())
        }
        CardKind::Cellar => cellar(ctx),
        CardKind::Chapel => chapel(ctx),
        CardKind::Chancellor => chancellor(ctx),
        CardKind::Workshop => gain_up_to(ctx, 4, None),
        CardKind::Feast => gain_up_to(ctx, 5, Some(CardKind::Feast)),
        CardKind::Remodel => remodel(ctx),
        CardKind::Mine => mine(ctx),
        CardKind::Moneylender => moneylender(ctx),
        CardKind::Adventurer => adventurer(ctx),
        CardKind::Library => library(ctx),
        CardKind::ThroneRoom => throne_room(ctx),
        CardKind::Bureaucrat => bureaucrat(ctx),
        CardKind::Militia => militia(ctx),
        CardKind::Witch => witch(ctx),
        CardKind::CouncilRoom => council_room(ctx),
        CardKind::Spy => spy(ctx),
        CardKind::Thief => thief(ctx),
        _ => Err(EffectOutcome::Illegal),
    }
}

/// Draw `n` cards for the acting player, reshuffling as needed.
fn draw(ctx: &mut EffectContext<'_>, n: usize) {
    let acting = ctx.acting.index();
    ctx.players[acting].draw_to_hand(n, ctx.rng);
}

/// Fixed resource grants.
fn grant(ctx: &mut EffectContext<'_>, actions: u32, buys: u32, coin: u32) {
    let player = ctx.acting_player();
    player.actions_remaining += actions;
    player.buys_remaining += buys;
    player.bonus_coin += coin;
}

/// Prompt the acting player for a card in their hand, re-prompting on
/// unknown names and cards they do not hold. `None` means they quit.
fn choose_card_in_hand(ctx: &mut EffectContext<'_>, prompt: &str) -> Option<CardKind> {
    let acting = ctx.acting.index();
    loop {
        let token = ctx.prompter.choose_card_name(prompt)?;
        let Some(kind) = ctx.catalog.lookup(&token) else {
            continue;
        };
        if ctx.players[acting].hand.contains(kind) {
            return Some(kind);
        }
    }
}

fn has_moat(player: &Player) -> bool {
    player.hand.contains(CardKind::Moat)
}

/// Cellar: +1 action, discard any number, draw that many replacements.
/// Nothing discarded means nothing happened: the +1 action is undone and
/// the play cancels.
fn cellar(ctx: &mut EffectContext<'_>) -> EffectResult {
    let acting = ctx.acting.index();
    ctx.players[acting].actions_remaining += 1;

    let mut discarded = 0;
    while let Some(kind) = choose_card_in_hand(ctx, "Card name to discard (q to quit)") {
        let player = &mut ctx.players[acting];
        let _ = player.hand.remove(kind);
        player.discard.add(kind);
        discarded += 1;
    }

    if discarded == 0 {
        ctx.players[acting].actions_remaining -= 1;
        return Err(EffectOutcome::Canceled);
    }

    ctx.players[acting].draw_to_hand(discarded, ctx.rng);
    Ok(())
}

/// Chapel: trash up to 4 cards from hand. Zero trashes cancels.
fn chapel(ctx: &mut EffectContext<'_>) -> EffectResult {
    let acting = ctx.acting.index();
    let mut trashed = 0;

    while trashed < 4 {
        let Some(kind) = choose_card_in_hand(ctx, "Select a card to trash (q to quit)") else {
            break;
        };
        let _ = ctx.players[acting].hand.remove(kind);
        trashed += 1;
    }

    if trashed == 0 {
        return Err(EffectOutcome::Canceled);
    }
    Ok(())
}

/// Chancellor: +2 spend, optionally dump the whole deck into discard.
fn chancellor(ctx: &mut EffectContext<'_>) -> EffectResult {
    grant(ctx, 0, 0, 2);

    if ctx.prompter.confirm("Discard the remainder of your deck? (y/n)") {
        let player = &mut ctx.players[ctx.acting.index()];
        let mut deck = std::mem::take(&mut player.deck);
        player.discard.append_all(&mut deck);
    }
    Ok(())
}

/// Workshop and Feast: a free gain with a cost ceiling, into discard.
/// Declining cancels. Feast trashes itself from in-play on success.
fn gain_up_to(
    ctx: &mut EffectContext<'_>,
    ceiling: u32,
    trash_self: Option<CardKind>,
) -> EffectResult {
    let acting = ctx.acting.index();
    let result = purchase(
        ctx.supply,
        ctx.catalog,
        &mut ctx.players[acting],
        GainDestination::Discard,
        ceiling,
        true,
        ctx.prompter,
    );

    match result {
        PurchaseResult::Purchased(_) => {
            if let Some(kind) = trash_self {
                // Trashed for good; the clean-up never sees it. A Throne
                // Room replay may find it already gone.
                let _ = ctx.players[acting].in_play.remove(kind);
            }
            Ok(())
        }
        PurchaseResult::Declined => Err(EffectOutcome::Canceled),
    }
}

/// Remodel: trash a card from hand (quitting cancels), then gain a card
/// costing up to 2 more. The trash cannot be undone, so the gain prompt
/// repeats until a purchase succeeds.
fn remodel(ctx: &mut EffectContext<'_>) -> EffectResult {
    let acting = ctx.acting.index();

    let Some(trash) = choose_card_in_hand(ctx, "Select a card to trash") else {
        return Err(EffectOutcome::Canceled);
    };
    let _ = ctx.players[acting].hand.remove(trash);

    let ceiling = ctx.catalog.get(trash).cost + 2;
    loop {
        // If nothing at this ceiling is left in the supply there is
        // nothing to gain; the trash stands.
        if offerable(ctx.supply, ctx.catalog, &ctx.players[acting], ceiling, true).is_empty() {
            return Ok(());
        }
        let result = purchase(
            ctx.supply,
            ctx.catalog,
            &mut ctx.players[acting],
            GainDestination::Discard,
            ceiling,
            true,
            ctx.prompter,
        );
        if let PurchaseResult::Purchased(_) = result {
            return Ok(());
        }
    }
}

/// Mine: trash a Copper for a Silver in hand, or a Silver for a Gold.
/// No Copper or Silver in hand is `Illegal`; quitting the prompt cancels.
/// An empty Silver/Gold pile means the upgrade is silently skipped.
fn mine(ctx: &mut EffectContext<'_>) -> EffectResult {
    let acting = ctx.acting.index();
    let hand = &ctx.players[acting].hand;
    if !hand.contains(CardKind::Copper) && !hand.contains(CardKind::Silver) {
        return Err(EffectOutcome::Illegal);
    }

    let trashed = loop {
        let Some(token) = ctx.prompter.choose_card_name("Select a card to trash") else {
            return Err(EffectOutcome::Canceled);
        };
        match ctx.catalog.lookup(&token) {
            Some(kind @ (CardKind::Copper | CardKind::Silver))
                if ctx.players[acting].hand.contains(kind) =>
            {
                break kind;
            }
            _ => continue,
        }
    };

    let _ = ctx.players[acting].hand.remove(trashed);
    let upgrade = match trashed {
        CardKind::Copper => CardKind::Silver,
        _ => CardKind::Gold,
    };
    if let Ok(card) = ctx.supply.deal(upgrade) {
        ctx.players[acting].hand.add(card);
    }
    Ok(())
}

/// Moneylender: trash a Copper for +3 spend, or `Illegal` without one.
fn moneylender(ctx: &mut EffectContext<'_>) -> EffectResult {
    let player = ctx.acting_player();
    if !player.hand.contains(CardKind::Copper) {
        return Err(EffectOutcome::Illegal);
    }
    let _ = player.hand.remove(CardKind::Copper);
    player.bonus_coin += 3;
    Ok(())
}

/// Adventurer: reveal from the deck until two treasures are found;
/// treasures go to hand, everything else to discard. Running out of
/// cards ends the reveal early.
fn adventurer(ctx: &mut EffectContext<'_>) -> EffectResult {
    let acting = ctx.acting.index();
    let mut treasures = 0;

    while treasures < 2 {
        let Some(card) = ctx.players[acting].draw_from_deck(ctx.rng) else {
            break;
        };
        if ctx.catalog.get(card).is_treasure() {
            ctx.players[acting].hand.add(card);
            treasures += 1;
        } else {
            ctx.players[acting].discard.add(card);
        }
    }
    Ok(())
}

/// Library: draw until the hand holds 7 cards; drawn action cards may be
/// discarded instead of kept.
fn library(ctx: &mut EffectContext<'_>) -> EffectResult {
    let acting = ctx.acting.index();

    while ctx.players[acting].hand.len() < 7 {
        let Some(card) = ctx.players[acting].draw_from_deck(ctx.rng) else {
            break;
        };
        let keep = if ctx.catalog.get(card).is_action {
            ctx.prompter
                .confirm(&format!("Drew {card}. Keep it? (y/n)"))
        } else {
            true
        };
        if keep {
            ctx.players[acting].hand.add(card);
        } else {
            ctx.players[acting].discard.add(card);
        }
    }
    Ok(())
}

/// Throne Room: the next action card played resolves twice. Grants +1
/// action so the engine's uniform decrement nets to zero.
fn throne_room(ctx: &mut EffectContext<'_>) -> EffectResult {
    ctx.turn.begin_throne_chain();
    ctx.acting_player().actions_remaining += 1;
    Ok(())
}

/// Bureaucrat: a Silver from the supply onto the acting player's deck
/// (silently nothing if the pile is out), and a deferred attack on
/// everyone else.
fn bureaucrat(ctx: &mut EffectContext<'_>) -> EffectResult {
    let acting = ctx.acting.index();
    if let Ok(card) = ctx.supply.deal(CardKind::Silver) {
        ctx.players[acting].deck.push_front(card);
    }
    ctx.turn.enqueue_attack(CardKind::Bureaucrat, ctx.acting);
    Ok(())
}

/// Militia: +2 spend and a deferred attack forcing discards.
fn militia(ctx: &mut EffectContext<'_>) -> EffectResult {
    grant(ctx, 0, 0, 2);
    ctx.turn.enqueue_attack(CardKind::Militia, ctx.acting);
    Ok(())
}

/// Witch: +2 cards and a deferred Curse for every other player.
fn witch(ctx: &mut EffectContext<'_>) -> EffectResult {
    draw(ctx, 2);
    ctx.turn.enqueue_attack(CardKind::Witch, ctx.acting);
    Ok(())
}

/// Council Room: +4 cards, +1 buy; every other player draws one at the
/// start of their next turn.
fn council_room(ctx: &mut EffectContext<'_>) -> EffectResult {
    draw(ctx, 4);
    grant(ctx, 0, 1, 0);
    ctx.turn.enqueue_attack(CardKind::CouncilRoom, ctx.acting);
    Ok(())
}

/// Spy: +1 card, +1 action; every player (the spy included) reveals
/// their top deck card and the spy decides whether it is discarded or
/// put back. Opponents holding a Moat are skipped; a player with no
/// cards left reveals nothing.
fn spy(ctx: &mut EffectContext<'_>) -> EffectResult {
    draw(ctx, 1);
    grant(ctx, 1, 0, 0);

    for target in PlayerId::all(ctx.player_count()) {
        let is_self = target == ctx.acting;
        let idx = target.index();

        if !is_self && has_moat(&ctx.players[idx]) {
            debug!(victim = %ctx.players[idx].name, "spy deflected by moat");
            continue;
        }

        let Some(card) = ctx.players[idx].draw_from_deck(ctx.rng) else {
            continue;
        };

        let prompt = if is_self {
            format!("Your next card is {card}. (d)iscard it or (p)ut it back?")
        } else {
            format!(
                "The top card of {}'s deck is {card}. (d)iscard it or (p)ut it back?",
                ctx.players[idx].name
            )
        };
        if ctx.prompter.confirm(&prompt) {
            ctx.players[idx].discard.add(card);
        } else {
            ctx.players[idx].deck.push_front(card);
        }
    }
    Ok(())
}

/// Thief: every other player without a Moat reveals their top two cards.
/// Revealed treasure can be trashed at the thief's direction; trashed
/// treasure is then offered to the thief to steal. Reveals with no
/// treasure go back on the deck untouched.
fn thief(ctx: &mut EffectContext<'_>) -> EffectResult {
    let mut stealable: Vec<CardKind> = Vec::new();

    for target in ctx.opponents().collect::<Vec<_>>() {
        let idx = target.index();
        if has_moat(&ctx.players[idx]) {
            debug!(victim = %ctx.players[idx].name, "thief deflected by moat");
            continue;
        }

        let mut reveal: SmallVec<[CardKind; 2]> = SmallVec::new();
        for _ in 0..2 {
            match ctx.players[idx].draw_from_deck(ctx.rng) {
                Some(card) => reveal.push(card),
                None => break,
            }
        }
        if reveal.is_empty() {
            continue;
        }

        let treasures: SmallVec<[CardKind; 2]> = reveal
            .iter()
            .copied()
            .filter(|&c| ctx.catalog.get(c).is_treasure())
            .collect();

        match treasures.len() {
            0 => {
                // Nothing to take: the cards go back exactly as revealed.
                for card in reveal.iter().rev() {
                    ctx.players[idx].deck.push_front(*card);
                }
            }
            1 => {
                let treasure = treasures[0];
                let trash_it = ctx
                    .prompter
                    .confirm(&format!("Trash the revealed {treasure}? (y/n)"));
                if trash_it {
                    stealable.push(treasure);
                } else {
                    ctx.players[idx].discard.add(treasure);
                }
                for card in reveal.iter().filter(|&&c| c != treasure) {
                    ctx.players[idx].discard.add(*card);
                }
            }
            _ => {
                let chosen = ctx
                    .prompter
                    .choose_from("Which treasure should be trashed?", &treasures);
                match chosen {
                    Some(kind) => {
                        stealable.push(kind);
                        // Discard the other revealed card.
                        let pos = reveal.iter().position(|&c| c == kind).unwrap_or(0);
                        for (i, card) in reveal.iter().enumerate() {
                            if i != pos {
                                ctx.players[idx].discard.add(*card);
                            }
                        }
                    }
                    None => {
                        for card in &reveal {
                            ctx.players[idx].discard.add(*card);
                        }
                    }
                }
            }
        }
    }

    let acting = ctx.acting.index();
    for card in stealable {
        if ctx
            .prompter
            .confirm(&format!("Steal the trashed {card}? (y/n)"))
        {
            ctx.players[acting].discard.add(card);
        }
        // Declined cards stay trashed: gone from the game.
    }
    Ok(())
}

/// Apply one queued attack against `victim` at the start of their turn.
pub fn apply_attack(
    card: CardKind,
    victim: PlayerId,
    players: &mut [Player],
    supply: &mut Supply,
    catalog: &Catalog,
    rng: &mut GameRng,
    prompter: &mut dyn Prompter,
) {
    let idx = victim.index();
    debug!(card = %card, victim = %players[idx].name, "resolving pending attack");

    match card {
        CardKind::Militia => {
            if has_moat(&players[idx]) {
                return;
            }
            let mut discarded = 0;
            while discarded < 2 && !players[idx].hand.is_empty() {
                let Some(token) = prompter.choose_card_name("Card name to discard") else {
                    break;
                };
                let Some(kind) = catalog.lookup(&token) else {
                    continue;
                };
                if players[idx].hand.contains(kind) {
                    let _ = players[idx].hand.remove(kind);
                    players[idx].discard.add(kind);
                    discarded += 1;
                }
            }
        }
        CardKind::Bureaucrat => {
            if has_moat(&players[idx]) {
                return;
            }
            let victim_player = &mut players[idx];
            let vp_card = victim_player
                .hand
                .iter()
                .find(|&c| catalog.get(c).is_victory());
            if let Some(kind) = vp_card {
                let _ = victim_player.hand.remove(kind);
                victim_player.deck.push_front(kind);
            }
        }
        CardKind::Witch => {
            if has_moat(&players[idx]) {
                return;
            }
            // Curse pile empty: the victim is simply unaffected.
            if let Ok(curse) = supply.deal(CardKind::Curse) {
                players[idx].discard.add(curse);
            }
        }
        CardKind::CouncilRoom => {
            // A draw is a gift; no Moat check.
            players[idx].draw_to_hand(1, rng);
        }
        _ => debug_assert!(false, "non-deferred card {card} in attack queue"),
    }
}
