//! Session state machine.
//!
//! `GameSession` is the synchronous core of a game: it owns the phase, the
//! dealt cards, the elapsed time, the pending first pick and the
//! `processing` guard. It has no timers of its own. The async
//! `GameEngine` drives it by calling the transitions below when its delayed
//! actions fire.
//!
//! ## Turn resolution
//!
//! A pair attempt is split in two so a delay can sit between them:
//!
//! 1. `begin_selection` flips the card. For a second pick it also sets
//!    `processing` and clears the pending pick before returning.
//! 2. `resolve_pair` either matches both cards or hides both, then clears
//!    `processing`.
//!
//! While `processing` is set every `begin_selection` is rejected.

use std::time::Duration;

use im::Vector;

use super::phase::GamePhase;
use super::snapshot::{CardView, GameSnapshot};
use crate::cards::{validate_deck, Card};

/// Why a pick was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// Not in the `Playing` phase.
    NotPlaying,
    /// A pair is being resolved.
    Processing,
    /// No card at that index.
    OutOfBounds,
    /// Card already paired off.
    Matched,
    /// Card already showing.
    FaceUp,
}

/// Result of `GameSession::begin_selection`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// No state changed.
    Ignored(IgnoreReason),
    /// Card flipped and recorded as the first pick.
    First,
    /// Card flipped as the second pick; resolution is pending.
    Second {
        first: usize,
        second: usize,
        is_match: bool,
    },
}

/// Result of `GameSession::resolve_pair`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Both cards paired off. `completed` when it was the last pair.
    Matched { completed: bool },
    /// Both cards turned back down.
    Mismatched,
}

/// One game's authoritative state.
#[derive(Clone, Debug, Default)]
pub struct GameSession {
    phase: GamePhase,
    cards: Vector<Card>,
    elapsed: Duration,
    first_selection: Option<usize>,
    processing: bool,
    andys_mode: bool,
}

impl GameSession {
    /// An empty session in the `Start` phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session on `cards` in the `Preview` phase with every card
    /// face up.
    #[must_use]
    pub fn deal(cards: Vec<Card>, andys_mode: bool) -> Self {
        debug_assert!(validate_deck(&cards).is_ok(), "dealt an unpaired deck");

        let cards = cards
            .into_iter()
            .map(|mut card| {
                card.reveal();
                card
            })
            .collect();

        Self {
            phase: GamePhase::Preview,
            cards,
            elapsed: Duration::ZERO,
            first_selection: None,
            processing: false,
            andys_mode,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn first_selection(&self) -> Option<usize> {
        self.first_selection
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    #[must_use]
    pub fn andys_mode(&self) -> bool {
        self.andys_mode
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|card| card.is_matched()).count() / 2
    }

    /// Every card paired off (and the deck is not empty).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(Card::is_matched)
    }

    // === Transitions ===

    /// `Preview -> Playing`: turn every card face down.
    ///
    /// Returns `false` without changes from any other phase.
    pub fn end_preview(&mut self) -> bool {
        if self.phase != GamePhase::Preview {
            return false;
        }
        for card in self.cards.iter_mut() {
            card.hide();
        }
        self.elapsed = Duration::ZERO;
        self.phase = GamePhase::Playing;
        true
    }

    /// Flip the card at `index` if the player may pick it.
    pub fn begin_selection(&mut self, index: usize) -> Selection {
        if let Err(reason) = self.check_selectable(index) {
            return Selection::Ignored(reason);
        }

        if let Some(card) = self.cards.get_mut(index) {
            card.reveal();
        }

        match self.first_selection.take() {
            None => {
                self.first_selection = Some(index);
                Selection::First
            }
            Some(first) => {
                self.processing = true;
                let is_match = match (self.cards.get(first), self.cards.get(index)) {
                    (Some(a), Some(b)) => a.pairs_with(b),
                    _ => false,
                };
                Selection::Second {
                    first,
                    second: index,
                    is_match,
                }
            }
        }
    }

    /// Settle the pair opened by the last `Selection::Second`.
    pub fn resolve_pair(&mut self, first: usize, second: usize, is_match: bool) -> Resolution {
        for index in [first, second] {
            if let Some(card) = self.cards.get_mut(index) {
                if is_match {
                    card.mark_matched();
                } else {
                    card.hide();
                }
            }
        }
        self.processing = false;

        if is_match {
            Resolution::Matched {
                completed: self.is_complete(),
            }
        } else {
            Resolution::Mismatched
        }
    }

    /// Record elapsed play time.
    ///
    /// Only applies while playing with pairs still open; returns whether
    /// the clock should keep running.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if self.phase != GamePhase::Playing || self.is_complete() {
            return false;
        }
        self.elapsed = elapsed;
        true
    }

    /// `Playing -> Finished`, once every pair is found.
    pub fn finish(&mut self) -> bool {
        if self.phase != GamePhase::Playing || !self.is_complete() {
            return false;
        }
        self.phase = GamePhase::Finished;
        true
    }

    /// Build the read-only view of this session.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            cards: self.cards.iter().map(CardView::from).collect(),
            elapsed: self.elapsed,
            matched_pairs: self.matched_pairs(),
            pair_count: self.pair_count(),
            andys_mode: self.andys_mode,
            processing: self.processing,
        }
    }

    fn check_selectable(&self, index: usize) -> Result<(), IgnoreReason> {
        if self.phase != GamePhase::Playing {
            return Err(IgnoreReason::NotPlaying);
        }
        if self.processing {
            return Err(IgnoreReason::Processing);
        }
        let card = self.cards.get(index).ok_or(IgnoreReason::OutOfBounds)?;
        if card.is_matched() {
            return Err(IgnoreReason::Matched);
        }
        if card.is_face_up() {
            return Err(IgnoreReason::FaceUp);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Language, VocabularyItem};
    use crate::core::{CardId, MatchKey};

    /// Cards laid out `[X, Y, X, Y]`.
    fn xyxy() -> Vec<Card> {
        let x = VocabularyItem::new("X", "Ex", "Equis");
        let y = VocabularyItem::new("Y", "Why", "Ye");
        let kx = MatchKey::new(0);
        let ky = MatchKey::new(1);
        let (x_en, x_es) = CardId::pair(kx);
        let (y_en, y_es) = CardId::pair(ky);
        vec![
            Card::new(x_en, kx, Language::English, &x),
            Card::new(y_en, ky, Language::English, &y),
            Card::new(x_es, kx, Language::Spanish, &x),
            Card::new(y_es, ky, Language::Spanish, &y),
        ]
    }

    fn playing() -> GameSession {
        let mut session = GameSession::deal(xyxy(), false);
        assert!(session.end_preview());
        session
    }

    fn assert_matched_implies_face_up(session: &GameSession) {
        for card in session.cards() {
            assert!(!card.is_matched() || card.is_face_up());
        }
    }

    #[test]
    fn test_new_session_is_start() {
        let session = GameSession::new();
        assert_eq!(session.phase(), GamePhase::Start);
        assert_eq!(session.pair_count(), 0);
        assert!(!session.is_complete());
    }

    #[test]
    fn test_deal_starts_preview_face_up() {
        let session = GameSession::deal(xyxy(), true);
        assert_eq!(session.phase(), GamePhase::Preview);
        assert!(session.cards().iter().all(Card::is_face_up));
        assert_eq!(session.pair_count(), 2);
        assert_eq!(session.elapsed(), Duration::ZERO);
        assert_eq!(session.first_selection(), None);
        assert!(!session.is_processing());
        assert!(session.andys_mode());
    }

    #[test]
    fn test_end_preview_hides_all() {
        let session = playing();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert!(session.cards().iter().all(|c| !c.is_face_up()));
    }

    #[test]
    fn test_end_preview_only_from_preview() {
        let mut session = playing();
        assert!(!session.end_preview());
        assert!(!GameSession::new().end_preview());
    }

    #[test]
    fn test_select_ignored_outside_playing() {
        let mut session = GameSession::deal(xyxy(), false);
        assert_eq!(
            session.begin_selection(0),
            Selection::Ignored(IgnoreReason::NotPlaying)
        );
    }

    #[test]
    fn test_first_pick() {
        let mut session = playing();
        assert_eq!(session.begin_selection(0), Selection::First);
        assert!(session.card(0).unwrap().is_face_up());
        assert_eq!(session.first_selection(), Some(0));
        assert!(!session.is_processing());
    }

    #[test]
    fn test_matching_pair() {
        let mut session = playing();
        session.begin_selection(0);

        let selection = session.begin_selection(2);
        assert_eq!(
            selection,
            Selection::Second {
                first: 0,
                second: 2,
                is_match: true
            }
        );
        assert!(session.is_processing());
        assert_eq!(session.first_selection(), None);

        let resolution = session.resolve_pair(0, 2, true);
        assert_eq!(resolution, Resolution::Matched { completed: false });
        assert!(session.card(0).unwrap().is_matched());
        assert!(session.card(2).unwrap().is_matched());
        assert!(session.card(0).unwrap().is_face_up());
        assert!(!session.is_processing());
        assert_eq!(session.matched_pairs(), 1);
    }

    #[test]
    fn test_mismatched_pair() {
        let mut session = playing();
        session.begin_selection(0);

        assert_eq!(
            session.begin_selection(1),
            Selection::Second {
                first: 0,
                second: 1,
                is_match: false
            }
        );
        assert_eq!(session.resolve_pair(0, 1, false), Resolution::Mismatched);

        assert!(!session.card(0).unwrap().is_face_up());
        assert!(!session.card(1).unwrap().is_face_up());
        assert!(!session.card(0).unwrap().is_matched());
        assert!(!session.is_processing());
    }

    #[test]
    fn test_third_pick_rejected_while_processing() {
        let mut session = playing();
        session.begin_selection(0);
        session.begin_selection(1);

        let before = session.snapshot();
        assert_eq!(
            session.begin_selection(3),
            Selection::Ignored(IgnoreReason::Processing)
        );
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_noop_picks_leave_state_unchanged() {
        let mut session = playing();
        session.begin_selection(0);
        session.begin_selection(2);
        session.resolve_pair(0, 2, true);
        session.begin_selection(1);

        let before = session.snapshot();
        assert_eq!(
            session.begin_selection(99),
            Selection::Ignored(IgnoreReason::OutOfBounds)
        );
        assert_eq!(
            session.begin_selection(0),
            Selection::Ignored(IgnoreReason::Matched)
        );
        assert_eq!(
            session.begin_selection(1),
            Selection::Ignored(IgnoreReason::FaceUp)
        );
        assert_eq!(session.snapshot(), before);
        assert_eq!(session.first_selection(), Some(1));
    }

    #[test]
    fn test_last_match_completes_and_finishes() {
        let mut session = playing();
        session.begin_selection(0);
        session.begin_selection(2);
        session.resolve_pair(0, 2, true);
        assert!(!session.finish());

        session.begin_selection(1);
        session.begin_selection(3);
        assert_eq!(
            session.resolve_pair(1, 3, true),
            Resolution::Matched { completed: true }
        );
        assert!(session.is_complete());
        assert_eq!(session.phase(), GamePhase::Playing);

        assert!(session.finish());
        assert_eq!(session.phase(), GamePhase::Finished);
        assert_matched_implies_face_up(&session);
    }

    #[test]
    fn test_tick_only_while_open() {
        let mut session = GameSession::deal(xyxy(), false);
        assert!(!session.tick(Duration::from_secs(1)));
        assert_eq!(session.elapsed(), Duration::ZERO);

        session.end_preview();
        assert!(session.tick(Duration::from_millis(1500)));
        assert_eq!(session.elapsed(), Duration::from_millis(1500));

        for (a, b) in [(0, 2), (1, 3)] {
            session.begin_selection(a);
            session.begin_selection(b);
            session.resolve_pair(a, b, true);
        }
        assert!(!session.tick(Duration::from_secs(9)));
        assert_eq!(session.elapsed(), Duration::from_millis(1500));

        session.finish();
        assert!(!session.tick(Duration::from_secs(10)));
        assert_eq!(session.elapsed(), Duration::from_millis(1500));
    }

    #[test]
    fn test_snapshot_hides_nothing_but_key() {
        let session = GameSession::deal(xyxy(), false);
        let snapshot = session.snapshot();

        assert_eq!(snapshot.phase, GamePhase::Preview);
        assert_eq!(snapshot.cards.len(), 4);
        assert_eq!(snapshot.cards[0].label, "Ex");
        assert_eq!(snapshot.cards[2].label, "Equis");
        assert_eq!(snapshot.pair_count, 2);
        assert_eq!(snapshot.matched_pairs, 0);
    }
}
