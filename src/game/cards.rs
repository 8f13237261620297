use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, FromRepr};
use thiserror::Error;

/// Number of distinct cards in a deck.
pub const DECK_SIZE: usize = 52;
/// Number of cards dealt to each player.
pub const HAND_SIZE: usize = 26;
const RANKS: u8 = 13;

/// Suit of a card, derived as `value / 13`. Only used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, FromRepr)]
#[repr(u8)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Suit::Clubs => "C",
                Suit::Diamonds => "D",
                Suit::Hearts => "H",
                Suit::Spades => "S",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("card value {0} is outside 0..52")]
pub struct InvalidCard(pub u8);

/// A card encoded as a single byte in `0..52`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    pub fn new(value: u8) -> Result<Self, InvalidCard> {
        if usize::from(value) < DECK_SIZE {
            Ok(Self(value))
        } else {
            Err(InvalidCard(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Rank in `0..13`; the only attribute used when comparing cards.
    pub fn rank(self) -> u8 {
        self.0 % RANKS
    }

    pub fn suit(self) -> Suit {
        // value < 52 so the quotient is always a valid suit
        Suit::from_repr(self.0 / RANKS).unwrap_or(Suit::Spades)
    }

    pub fn all_cards() -> Vec<Card> {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::iter() {
            for rank in 0..RANKS {
                cards.push(Card(suit as u8 * RANKS + rank));
            }
        }
        cards
    }
}

impl TryFrom<u8> for Card {
    type Error = InvalidCard;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Card::new(value)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const FACES: &[u8; 13] = b"23456789TJQKA";
        write!(f, "{}{}", FACES[self.rank() as usize] as char, self.suit())
    }
}

/// Compares two cards by rank alone.
pub fn compare_cards(first: Card, second: Card) -> Ordering {
    first.rank().cmp(&second.rank())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandError {
    #[error("hand must hold 26 cards, got {0}")]
    WrongSize(usize),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
}

/// The 26 cards dealt to one player, in deal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() != HAND_SIZE {
            return Err(HandError::WrongSize(cards.len()));
        }

        let mut seen = HashSet::with_capacity(HAND_SIZE);
        for card in &cards {
            if !seen.insert(*card) {
                return Err(HandError::DuplicateCard(*card));
            }
        }

        Ok(Self { cards })
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }
}

/// Shuffles a full deck and splits it into two hands.
pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> (Hand, Hand) {
    let mut cards = Card::all_cards();
    cards.shuffle(rng);
    let second = cards.split_off(HAND_SIZE);

    // A shuffled deck is always 52 unique cards, so both halves are valid hands
    (Hand { cards }, Hand { cards: second })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_card_range() {
        assert!(Card::new(0).is_ok());
        assert!(Card::new(51).is_ok());
        assert_eq!(Card::new(52), Err(InvalidCard(52)));
        assert_eq!(Card::try_from(255u8), Err(InvalidCard(255)));
    }

    #[rstest]
    #[case(5, 44, Ordering::Equal)]
    #[case(10, 2, Ordering::Greater)]
    #[case(2, 10, Ordering::Less)]
    #[case(12, 13, Ordering::Greater)] // ace of clubs beats two of diamonds
    #[case(0, 39, Ordering::Equal)]
    fn test_compare_cards(#[case] first: u8, #[case] second: u8, #[case] expected: Ordering) {
        let first = Card::new(first).unwrap();
        let second = Card::new(second).unwrap();
        assert_eq!(compare_cards(first, second), expected);
    }

    #[test]
    fn test_compare_is_antisymmetric() {
        for a in Card::all_cards() {
            assert_eq!(compare_cards(a, a), Ordering::Equal);
            for b in Card::all_cards() {
                assert_eq!(compare_cards(a, b), compare_cards(b, a).reverse());
                assert_eq!(compare_cards(a, b), (a.value() % 13).cmp(&(b.value() % 13)));
            }
        }
    }

    #[test]
    fn test_card_display() {
        assert_eq!(Card::new(0).unwrap().to_string(), "2C");
        assert_eq!(Card::new(12).unwrap().to_string(), "AC");
        assert_eq!(Card::new(21).unwrap().to_string(), "TD");
        assert_eq!(Card::new(51).unwrap().to_string(), "AS");
    }

    #[test]
    fn test_all_cards_unique() {
        let cards = Card::all_cards();
        assert_eq!(cards.len(), DECK_SIZE);
        let values: HashSet<u8> = cards.iter().map(|c| c.value()).collect();
        assert_eq!(values, (0..52).collect());
    }

    #[test]
    fn test_deal_partitions_deck() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let (first, second) = deal(&mut rng);
            assert_eq!(first.cards().len(), HAND_SIZE);
            assert_eq!(second.cards().len(), HAND_SIZE);

            let first_set: HashSet<Card> = first.iter().collect();
            let second_set: HashSet<Card> = second.iter().collect();
            assert_eq!(first_set.len(), HAND_SIZE);
            assert!(first_set.is_disjoint(&second_set));

            let union: HashSet<u8> = first_set
                .union(&second_set)
                .map(|card| card.value())
                .collect();
            assert_eq!(union, (0..52).collect());
        }
    }

    #[test]
    fn test_hand_validation() {
        let cards: Vec<Card> = (0..26).map(|v| Card::new(v).unwrap()).collect();
        assert!(Hand::new(cards.clone()).is_ok());

        assert_eq!(
            Hand::new(cards[..25].to_vec()),
            Err(HandError::WrongSize(25))
        );

        let mut duplicated = cards;
        duplicated[25] = Card::new(3).unwrap();
        assert_eq!(
            Hand::new(duplicated),
            Err(HandError::DuplicateCard(Card::new(3).unwrap()))
        );
    }
}
