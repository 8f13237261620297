// A GameSession owns both connections of one paired game and drives it through
// the protocol: both players ask for a game, each is dealt half the deck, then
// 26 rounds are played where both cards must arrive before the round is scored.
// Any violation by either player kills the whole game.

use std::collections::HashSet;
use strum_macros::Display;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::cards::{compare_cards, deal, Card, Hand, HAND_SIZE};
use crate::protocol::{Connection, Message, Outcome, ProtocolError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Seat {
    #[strum(serialize = "p1")]
    P1,
    #[strum(serialize = "p2")]
    P2,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("protocol violation from {seat}: {source}")]
    Protocol {
        seat: Seat,
        #[source]
        source: ProtocolError,
    },
    #[error("{seat} played {card}, which is not in their hand")]
    CardNotInHand { seat: Seat, card: Card },
    #[error("{seat} played {card} a second time")]
    CardReplayed { seat: Seat, card: Card },
}

impl GameError {
    pub fn seat(&self) -> Seat {
        match self {
            GameError::Protocol { seat, .. }
            | GameError::CardNotInHand { seat, .. }
            | GameError::CardReplayed { seat, .. } => *seat,
        }
    }

    /// True when the game died because a channel failed rather than a bad message.
    pub fn is_transport(&self) -> bool {
        matches!(self, GameError::Protocol { source, .. } if source.is_transport())
    }
}

fn violation(seat: Seat) -> impl Fn(ProtocolError) -> GameError {
    move |source| GameError::Protocol { seat, source }
}

/// The two connections of a game, in the order they were accepted.
pub struct Pairing<S> {
    pub p1: Connection<S>,
    pub p2: Connection<S>,
}

impl<S> Pairing<S> {
    pub fn new(p1: Connection<S>, p2: Connection<S>) -> Self {
        Self { p1, p2 }
    }
}

/// Round results seen from the server's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub p1_wins: u32,
    pub p2_wins: u32,
    pub draws: u32,
}

#[derive(Debug)]
pub enum GameOutcome {
    Complete,
    Killed(GameError),
}

#[derive(Debug)]
pub struct GameReport {
    pub id: Uuid,
    pub rounds_played: usize,
    pub tally: Tally,
    pub outcome: GameOutcome,
}

impl GameReport {
    pub fn is_complete(&self) -> bool {
        matches!(self.outcome, GameOutcome::Complete)
    }
}

/// A player's dealt hand and the cards already submitted from it.
#[derive(Debug)]
struct Ledger {
    seat: Seat,
    hand: Hand,
    played: HashSet<Card>,
}

impl Ledger {
    fn new(seat: Seat, hand: Hand) -> Self {
        Self {
            seat,
            hand,
            played: HashSet::with_capacity(HAND_SIZE),
        }
    }

    fn check(&self, card: Card) -> Result<(), GameError> {
        if !self.hand.contains(card) {
            return Err(GameError::CardNotInHand {
                seat: self.seat,
                card,
            });
        }
        if self.played.contains(&card) {
            return Err(GameError::CardReplayed {
                seat: self.seat,
                card,
            });
        }
        Ok(())
    }

    fn record(&mut self, card: Card) {
        self.played.insert(card);
    }
}

enum Phase {
    AwaitWantGame,
    Dealt,
    Playing { round: usize, p1: Ledger, p2: Ledger },
    Complete,
}

pub struct GameSession<S> {
    id: Uuid,
    p1: Connection<S>,
    p2: Connection<S>,
    rounds_played: usize,
    tally: Tally,
}

impl<S> GameSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(pairing: Pairing<S>) -> Self {
        Self {
            id: Uuid::new_v4(),
            p1: pairing.p1,
            p2: pairing.p2,
            rounds_played: 0,
            tally: Tally::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Plays the game to completion or until the first violation, then closes
    /// both connections.
    #[instrument(skip_all, fields(game_id = %self.id))]
    pub async fn run(mut self) -> GameReport {
        info!(p1 = %self.p1.peer(), p2 = %self.p2.peer(), "Game started");

        let mut phase = Phase::AwaitWantGame;
        let outcome = loop {
            let next = match phase {
                Phase::AwaitWantGame => self.await_want_game().await,
                Phase::Dealt => self.send_hands().await,
                Phase::Playing { round, p1, p2 } => self.play_round(round, p1, p2).await,
                Phase::Complete => break GameOutcome::Complete,
            };
            match next {
                Ok(next) => phase = next,
                Err(e) => {
                    warn!(
                        error = %e,
                        rounds_played = self.rounds_played,
                        "Killing game"
                    );
                    break GameOutcome::Killed(e);
                }
            }
        };

        let GameSession {
            id,
            p1,
            p2,
            rounds_played,
            tally,
        } = self;
        tokio::join!(p1.close(), p2.close());

        if matches!(outcome, GameOutcome::Complete) {
            info!(
                p1_wins = tally.p1_wins,
                p2_wins = tally.p2_wins,
                draws = tally.draws,
                "Game complete"
            );
        }

        GameReport {
            id,
            rounds_played,
            tally,
            outcome,
        }
    }

    async fn await_want_game(&mut self) -> Result<Phase, GameError> {
        self.p1
            .recv_want_game()
            .await
            .map_err(violation(Seat::P1))?;
        self.p2
            .recv_want_game()
            .await
            .map_err(violation(Seat::P2))?;
        debug!("Both players want a game");
        Ok(Phase::Dealt)
    }

    async fn send_hands(&mut self) -> Result<Phase, GameError> {
        let (hand1, hand2) = deal(&mut rand::rng());

        self.p1
            .send(&Message::GameStart(hand1.clone()))
            .await
            .map_err(|e| violation(Seat::P1)(e.into()))?;
        self.p2
            .send(&Message::GameStart(hand2.clone()))
            .await
            .map_err(|e| violation(Seat::P2)(e.into()))?;
        debug!("Hands dealt");

        Ok(Phase::Playing {
            round: 0,
            p1: Ledger::new(Seat::P1, hand1),
            p2: Ledger::new(Seat::P2, hand2),
        })
    }

    async fn play_round(
        &mut self,
        round: usize,
        mut ledger1: Ledger,
        mut ledger2: Ledger,
    ) -> Result<Phase, GameError> {
        // Both cards must be in hand before either is checked or scored
        let card1 = self
            .p1
            .recv_play_card()
            .await
            .map_err(violation(Seat::P1))?;
        let card2 = self
            .p2
            .recv_play_card()
            .await
            .map_err(violation(Seat::P2))?;

        ledger1.check(card1)?;
        ledger2.check(card2)?;
        ledger1.record(card1);
        ledger2.record(card2);

        let outcome1 = Outcome::from_ordering(compare_cards(card1, card2));
        match outcome1 {
            Outcome::Win => self.tally.p1_wins += 1,
            Outcome::Lose => self.tally.p2_wins += 1,
            Outcome::Draw => self.tally.draws += 1,
        }
        debug!(round, %card1, %card2, result = %outcome1, "Round scored");

        self.p1
            .send(&Message::PlayResult(outcome1))
            .await
            .map_err(|e| violation(Seat::P1)(e.into()))?;
        self.p2
            .send(&Message::PlayResult(outcome1.opposite()))
            .await
            .map_err(|e| violation(Seat::P2)(e.into()))?;
        self.rounds_played += 1;

        if round + 1 == HAND_SIZE {
            Ok(Phase::Complete)
        } else {
            Ok(Phase::Playing {
                round: round + 1,
                p1: ledger1,
                p2: ledger2,
            })
        }
    }
}
