use crate::card::CardId;
use crate::rng::GameRng;

/// Hard cap on cards in hand, matching the largest hand any effect chain
/// can build up
pub const MAX_HAND_SIZE: usize = 15;

/// Cards of the shuffled deck kept available to draw effects beyond the
/// opening hand
pub const MAX_EXTRAS_SIZE: usize = 15;

/// Maximum configurable deck size
pub const MAX_DECK_SIZE: usize = 60;

/// Opening hand plus anything drawn into it by effects. Tracks a u64
/// presence mask alongside per-card counts so membership is O(1) while
/// combinations can still require multiple copies of one card.
///
/// Invariant: bit `i` of the mask is set iff `counts[i] > 0`.
///
/// Copy on purpose: the reachability search clones the hand at every
/// branch, and a flat 70-odd byte struct makes that a memcpy.
#[derive(Debug, Clone, Copy)]
pub struct Hand {
    presence_mask: u64,
    counts: [u8; 64],
    size: u8,
}

impl Hand {
    pub fn new() -> Self {
        Hand {
            presence_mask: 0,
            counts: [0; 64],
            size: 0,
        }
    }

    /// Add one copy of a card. A hand already at capacity drops the card,
    /// mirroring the table rule that you cannot hold more than
    /// [`MAX_HAND_SIZE`] cards. Returns whether the card was kept.
    pub fn add(&mut self, card: CardId) -> bool {
        if (self.size as usize) >= MAX_HAND_SIZE {
            return false;
        }
        self.presence_mask |= card.mask_bit();
        self.counts[card.index()] += 1;
        self.size += 1;
        true
    }

    /// Remove one copy of a card, clearing its mask bit when the last copy
    /// leaves. Returns false if the card was not in hand.
    pub fn remove(&mut self, card: CardId) -> bool {
        let idx = card.index();
        if self.counts[idx] == 0 {
            return false;
        }
        self.counts[idx] -= 1;
        self.size -= 1;
        if self.counts[idx] == 0 {
            self.presence_mask &= !card.mask_bit();
        }
        true
    }

    pub fn contains(&self, card: CardId) -> bool {
        self.presence_mask & card.mask_bit() != 0
    }

    pub fn count(&self, card: CardId) -> u8 {
        self.counts[card.index()]
    }

    pub fn presence_mask(&self) -> u64 {
        self.presence_mask
    }

    pub fn len(&self) -> usize {
        self.size as usize
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

/// The slice of the shuffled deck past the opening hand, in preserved draw
/// order. Effects consume it from two ends: tail draws ("draw from the
/// top") and fixed-size blocks from the head ("excavate the top N").
///
/// Copy for the same reason as [`Hand`].
#[derive(Debug, Clone, Copy)]
pub struct ExtrasPool {
    cards: [CardId; MAX_EXTRAS_SIZE],
    size: u8,
}

impl ExtrasPool {
    pub fn new() -> Self {
        ExtrasPool {
            cards: [CardId::from_raw(0); MAX_EXTRAS_SIZE],
            size: 0,
        }
    }

    /// Append a card; pool at capacity drops it
    pub fn push(&mut self, card: CardId) -> bool {
        if (self.size as usize) >= MAX_EXTRAS_SIZE {
            return false;
        }
        self.cards[self.size as usize] = card;
        self.size += 1;
        true
    }

    /// Draw from the tail of the pool (the next card a plain draw effect
    /// would see)
    pub fn draw_top(&mut self) -> Option<CardId> {
        if self.size == 0 {
            return None;
        }
        self.size -= 1;
        Some(self.cards[self.size as usize])
    }

    /// Consume the first `block` cards, keeping the one at offset `pick`
    /// and discarding the rest. The remainder of the pool shifts left.
    ///
    /// Caller must ensure `pick < block <= len()`.
    pub fn pick_from_block(&mut self, block: usize, pick: usize) -> CardId {
        debug_assert!(pick < block && block <= self.len());
        let picked = self.cards[pick];
        let len = self.len();
        self.cards.copy_within(block..len, 0);
        self.size -= block as u8;
        picked
    }

    pub fn get(&self, index: usize) -> Option<CardId> {
        if index < self.len() {
            Some(self.cards[index])
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.size as usize
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn cards(&self) -> &[CardId] {
        &self.cards[..self.len()]
    }
}

impl Default for ExtrasPool {
    fn default() -> Self {
        Self::new()
    }
}

/// The deck as a fixed-length sequence of card ids. One buffer lives for
/// the whole run; each trial reshuffles its prefix in place before dealing.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<CardId>,
}

impl Deck {
    pub fn from_cards(cards: Vec<CardId>) -> Self {
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    /// Deal one trial: partially shuffle the first `hand_size + extras`
    /// positions, then split them into an opening hand and an extras pool
    /// with draw order preserved.
    pub fn deal(&mut self, rng: &mut GameRng, hand_size: usize, extras: usize) -> (Hand, ExtrasPool) {
        let prefix = hand_size + extras;
        rng.shuffle_prefix(&mut self.cards, prefix);

        let mut hand = Hand::new();
        for &card in self.cards.iter().take(hand_size.min(self.cards.len())) {
            hand.add(card);
        }

        let mut pool = ExtrasPool::new();
        for &card in self.cards.iter().skip(hand_size).take(extras) {
            pool.push(card);
        }

        (hand, pool)
    }
}
