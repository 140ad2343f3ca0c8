use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyConfig;
use super::error::GameError;
use super::state::{Card, CardStatus, Token};

/// Ordered cards of one session; every token occupies exactly two cards.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Builds a board from an explicit token layout, checking the pairing invariant.
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, GameError> {
        let cards = tokens
            .into_iter()
            .enumerate()
            .map(|(index, token)| Card::new(index, token))
            .collect();
        let board = Board { cards };
        board.verify_pairs()?;
        Ok(board)
    }

    pub fn verify_pairs(&self) -> Result<(), GameError> {
        let mut counts: HashMap<Token, usize> = HashMap::new();
        for card in &self.cards {
            *counts.entry(card.token).or_default() += 1;
        }
        let mut bad: Vec<(Token, usize)> = counts.into_iter().filter(|&(_, n)| n != 2).collect();
        bad.sort();
        match bad.first() {
            Some(&(token, occurrences)) => Err(GameError::MalformedBoard { token, occurrences }),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.cards.iter().map(|card| card.token)
    }

    pub fn count_with_status(&self, status: CardStatus) -> usize {
        self.cards.iter().filter(|card| card.status == status).count()
    }

    /// Indices of the two cards holding `token`.
    pub fn positions_of(&self, token: Token) -> Vec<usize> {
        self.cards
            .iter()
            .filter(|card| card.token == token)
            .map(|card| card.index)
            .collect()
    }

    pub(crate) fn set_status(&mut self, index: usize, status: CardStatus) {
        if let Some(card) = self.cards.get_mut(index) {
            card.status = status;
        }
    }
}

/// Deals `config.token_count` pairs in a uniformly random order drawn from `rng`.
pub fn generate<R: Rng + ?Sized>(config: &DifficultyConfig, rng: &mut R) -> Result<Board, GameError> {
    config.validate()?;
    let mut values = Vec::with_capacity(config.board_size());
    for token in 0..config.token_count {
        let token = Token(token as u16);
        values.push(token);
        values.push(token);
    }

    values.shuffle(rng);

    Board::from_tokens(values)
}
