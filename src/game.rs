//! The game: setup, the turn state machine, and end-of-game scoring.
//!
//! A turn runs `StartOfTurn -> ActionPhase <-> BuyPhase -> CleanUp`. Action
//! plays and buys may interleave; in practice a completed buy zeroes the
//! action count, so buying ends action play. Everything the embedding
//! layer needs to render (hands, counters, pile counts, standings) is
//! exposed as plain data; the engine produces no text beyond prompt
//! strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::cards::{Catalog, CardKind};
use crate::core::{GameRng, Player, PlayerId, SetupError};
use crate::effects::{apply_attack, resolve, EffectContext, EffectOutcome};
use crate::pile::Pile;
use crate::prompter::Prompter;
use crate::purchase::{purchase, GainDestination, PurchaseResult};
use crate::supply::Supply;
use crate::turn::TurnState;

/// Maximum players at the table.
pub const MAX_PLAYERS: usize = 4;
/// Spending ceiling for the buy phase (the cost of a Province).
pub const BUY_CEILING: u32 = 8;

/// Where the current turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for [`Game::start_turn`].
    StartOfTurn,
    /// Action cards may be played; buying is also allowed and moves the
    /// turn into the buy phase.
    ActionPhase,
    /// A buy has been offered. Actions may still be played while
    /// `actions_remaining` allows; a completed buy zeroes it.
    BuyPhase,
    /// An end condition has been met; no further turns.
    GameOver,
}

/// Why an action card could not be played.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayError {
    /// Playing actions is not legal in the current phase.
    #[error("actions cannot be played in this phase")]
    WrongPhase,
    /// No actions left this turn.
    #[error("no actions remaining")]
    NoActionsRemaining,
    /// The token matched no card name or shortcut.
    #[error("unknown card `{0}`")]
    UnknownCard(String),
    /// The card is known but not in the player's hand.
    #[error("{0} is not in hand")]
    NotInHand(CardKind),
    /// The card has no action effect (treasure or victory card).
    #[error("{0} is not an action card")]
    NotAnAction(CardKind),
    /// The effect did not resolve; the card is back in hand and no action
    /// was consumed.
    #[error("effect did not resolve")]
    Refused(EffectOutcome),
}

/// One player's line in the final standings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub name: String,
    pub victory_points: i32,
    pub hands_played: u32,
}

/// Render-ready view of one player's turn position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player: PlayerId,
    pub name: String,
    pub hand: Vec<CardKind>,
    pub actions_remaining: u32,
    pub buys_remaining: u32,
    pub spendable_coin: u32,
}

/// A full game in progress.
#[derive(Debug)]
pub struct Game {
    players: Vec<Player>,
    supply: Supply,
    catalog: Catalog,
    turn: TurnState,
    rng: GameRng,
    current: usize,
    phase: Phase,
}

impl Game {
    /// Set up a game: validate the table, install the kingdom, deal every
    /// player 7 Copper and 3 Estate, shuffle, and draw opening hands.
    ///
    /// `kingdom` is ten card tokens (canonical names or shortcuts).
    pub fn new(names: &[&str], kingdom: &[&str], seed: u64) -> Result<Self, SetupError> {
        if names.is_empty() || names.len() > MAX_PLAYERS {
            return Err(SetupError::InvalidPlayerCount(names.len()));
        }

        let catalog = Catalog::standard();
        let mut kinds = Vec::with_capacity(kingdom.len());
        for token in kingdom {
            let kind = catalog
                .lookup(token)
                .ok_or_else(|| SetupError::UnknownCard((*token).to_string()))?;
            kinds.push(kind);
        }

        let mut supply = Supply::standard(names.len());
        supply.set_kingdom_cards(&kinds)?;

        let mut rng = GameRng::new(seed);
        let mut players = Vec::with_capacity(names.len());
        for name in names {
            let mut player = Player::new(*name);
            player.deck.append_all(&mut Pile::of(CardKind::Copper, 7));
            player.deck.append_all(&mut Pile::of(CardKind::Estate, 3));
            player.deck.shuffle(&mut rng);
            player.draw_to_hand(5, &mut rng);
            players.push(player);
        }

        info!(players = players.len(), seed, "game set up");
        Ok(Self {
            players,
            supply,
            catalog,
            turn: TurnState::new(),
            rng,
            current: 0,
            phase: Phase::StartOfTurn,
        })
    }

    /// Begin the current player's turn: check the end conditions, reset
    /// the turn counters, and apply every pending attack that has not yet
    /// come full circle. The prompter answers for the turn's player (the
    /// attack victim).
    pub fn start_turn(&mut self, prompter: &mut dyn Prompter) -> Phase {
        if self.is_over() {
            info!("game over");
            self.phase = Phase::GameOver;
            return self.phase;
        }

        let id = self.current_player_id();
        let player = &mut self.players[self.current];
        player.reset_turn_counters();
        player.hands_played += 1;
        debug!(player = %player.name, hand = player.hand.len(), "turn started");

        for attack in self.turn.attacks_against(id) {
            apply_attack(
                attack.card,
                id,
                &mut self.players,
                &mut self.supply,
                &self.catalog,
                &mut self.rng,
                prompter,
            );
        }

        self.phase = Phase::ActionPhase;
        self.phase
    }

    /// Play an action card from the current player's hand.
    ///
    /// On success the card sits in the in-play area and one action has
    /// been consumed. A [`PlayError::Refused`] play was rolled back: card
    /// returned to hand, action count untouched.
    pub fn play_action(
        &mut self,
        token: &str,
        prompter: &mut dyn Prompter,
    ) -> Result<CardKind, PlayError> {
        if !matches!(self.phase, Phase::ActionPhase | Phase::BuyPhase) {
            return Err(PlayError::WrongPhase);
        }
        let idx = self.current;
        if self.players[idx].actions_remaining == 0 {
            return Err(PlayError::NoActionsRemaining);
        }

        let kind = self
            .catalog
            .lookup(token)
            .ok_or_else(|| PlayError::UnknownCard(token.trim().to_string()))?;
        if !self.players[idx].hand.contains(kind) {
            return Err(PlayError::NotInHand(kind));
        }
        if !self.catalog.get(kind).is_action {
            return Err(PlayError::NotAnAction(kind));
        }

        // Any action card other than another Throne Room stops the chain
        // from growing; from here on a resolved play owes its re-play.
        if kind != CardKind::ThroneRoom {
            self.turn.break_chain();
        }

        let _ = self.players[idx].hand.remove(kind);
        self.players[idx].in_play.add(kind);

        let outcome = resolve(
            kind,
            &mut EffectContext {
                acting: self.current_player_id(),
                players: &mut self.players,
                supply: &mut self.supply,
                catalog: &self.catalog,
                turn: &mut self.turn,
                rng: &mut self.rng,
                prompter,
            },
        );

        match outcome {
            Ok(()) => {
                let player = &mut self.players[idx];
                player.actions_remaining = player.actions_remaining.saturating_sub(1);
                debug!(player = %player.name, card = %kind, "action played");

                if self.turn.owes_replay() {
                    self.turn.consume_replay();
                    debug!(card = %kind, "throne room re-play");
                    // The re-play is free and its outcome is not acted on.
                    let _ = resolve(
                        kind,
                        &mut EffectContext {
                            acting: self.current_player_id(),
                            players: &mut self.players,
                            supply: &mut self.supply,
                            catalog: &self.catalog,
                            turn: &mut self.turn,
                            rng: &mut self.rng,
                            prompter,
                        },
                    );
                }
                Ok(kind)
            }
            Err(outcome) => {
                let player = &mut self.players[idx];
                let _ = player.in_play.remove(kind);
                player.hand.add(kind);
                Err(PlayError::Refused(outcome))
            }
        }
    }

    /// Run one interactive buy for the current player, spending up to
    /// [`BUY_CEILING`]. Marks the buy phase; a completed purchase also
    /// zeroes the action count. With no buys left this is a no-op
    /// `Declined`.
    pub fn buy(&mut self, prompter: &mut dyn Prompter) -> PurchaseResult {
        if !matches!(self.phase, Phase::ActionPhase | Phase::BuyPhase) {
            return PurchaseResult::Declined;
        }
        self.phase = Phase::BuyPhase;

        if self.players[self.current].buys_remaining == 0 {
            return PurchaseResult::Declined;
        }
        purchase(
            &mut self.supply,
            &self.catalog,
            &mut self.players[self.current],
            GainDestination::Discard,
            BUY_CEILING,
            false,
            prompter,
        )
    }

    /// Clean up: everything in play and in hand goes to the discard pile,
    /// chain state clears, five cards are drawn, and the next player is
    /// up.
    pub fn end_turn(&mut self) {
        let player = &mut self.players[self.current];
        player.discard.append_all(&mut player.in_play);
        player.discard.append_all(&mut player.hand);
        self.turn.clear_chain();
        self.players[self.current].draw_to_hand(5, &mut self.rng);

        self.current = (self.current + 1) % self.players.len();
        self.phase = Phase::StartOfTurn;
    }

    /// Whether an end condition has been met: the Province pile is empty,
    /// or at least three kingdom piles are.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.supply.province_empty() || self.supply.empty_kingdom_piles().len() >= 3
    }

    /// Final (or interim) scores, ranked best first.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = PlayerId::all(self.players.len())
            .map(|id| {
                let player = &self.players[id.index()];
                Standing {
                    player: id,
                    name: player.name.clone(),
                    victory_points: player.total_victory_points(&self.catalog),
                    hands_played: player.hands_played,
                }
            })
            .collect();
        standings.sort_by_key(|s| std::cmp::Reverse(s.victory_points));
        standings
    }

    /// Render-ready view of one player.
    #[must_use]
    pub fn player_summary(&self, id: PlayerId) -> PlayerSummary {
        let player = &self.players[id.index()];
        PlayerSummary {
            player: id,
            name: player.name.clone(),
            hand: player.hand.iter().collect(),
            actions_remaining: player.actions_remaining,
            buys_remaining: player.buys_remaining,
            spendable_coin: player.spendable_coin(&self.catalog),
        }
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        PlayerId::new(self.current as u8)
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// All players in seating order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The shared supply.
    #[must_use]
    pub fn supply(&self) -> &Supply {
        &self.supply
    }

    /// Card definitions (names, costs, help text).
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current phase of the turn state machine.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Attack queue and Throne Room chain state.
    #[must_use]
    pub fn turn_state(&self) -> &TurnState {
        &self.turn
    }
}
