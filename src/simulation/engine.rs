use crate::card::CardId;
use crate::game::{EffectKind, EffectSet, ExtrasPool, Hand, TriggerIds};
use crate::simulation::combos::PossibilityCatalog;

/// Depth-first search over chains of draw effects.
///
/// A state is (hand, extras pool, eligible effects). The engine answers
/// whether the hand already matches a combination, or some sequence of
/// eligible effects reaches one before the pool runs dry. Every effect
/// shrinks the pool by at least one card, so recursion depth is bounded by
/// the initial pool size and the search always terminates. Branch order
/// only affects how soon the first success short-circuits, never the
/// answer.
pub struct ReachabilityEngine<'a> {
    combos: &'a PossibilityCatalog,
    triggers: &'a TriggerIds,
}

impl<'a> ReachabilityEngine<'a> {
    pub fn new(combos: &'a PossibilityCatalog, triggers: &'a TriggerIds) -> Self {
        ReachabilityEngine { combos, triggers }
    }

    /// True iff any reachable hand matches a combination
    pub fn search(&self, hand: &Hand, pool: &ExtrasPool, effects: EffectSet) -> bool {
        if self.combos.matches(hand) {
            return true;
        }

        for kind in EffectKind::ALL {
            if !effects.contains(kind) {
                continue;
            }
            let Some(trigger) = self.triggers.get(kind) else {
                continue;
            };
            if !hand.contains(trigger) || pool.len() < kind.pool_cost() {
                continue;
            }

            let next = effects.after_use(kind);
            let hit = match kind {
                EffectKind::Desires | EffectKind::Extravagance => {
                    self.draw_two(hand, pool, next)
                }
                EffectKind::Upstart => self.upstart(trigger, hand, pool, next),
                EffectKind::Prosperity => self.pick_from_top(6, hand, pool, next),
                EffectKind::Duality => self.pick_from_top(3, hand, pool, next),
            };
            if hit {
                return true;
            }
        }

        false
    }

    /// Desires / Extravagance: draw two cards off the top of the pool
    fn draw_two(&self, hand: &Hand, pool: &ExtrasPool, effects: EffectSet) -> bool {
        let mut hand = *hand;
        let mut pool = *pool;
        for _ in 0..2 {
            if let Some(card) = pool.draw_top() {
                hand.add(card);
            }
        }
        self.search(&hand, &pool, effects)
    }

    /// Upstart: trade its own trigger card for the top card of the pool.
    /// Stays eligible, so chains as long as fresh Upstarts keep arriving.
    fn upstart(
        &self,
        trigger: CardId,
        hand: &Hand,
        pool: &ExtrasPool,
        effects: EffectSet,
    ) -> bool {
        let mut hand = *hand;
        let mut pool = *pool;
        hand.remove(trigger);
        if let Some(card) = pool.draw_top() {
            hand.add(card);
        }
        self.search(&hand, &pool, effects)
    }

    /// Prosperity / Duality: look at the first `block` pool cards, branch
    /// on keeping each one, discard the rest of the block
    fn pick_from_top(
        &self,
        block: usize,
        hand: &Hand,
        pool: &ExtrasPool,
        effects: EffectSet,
    ) -> bool {
        for pick in 0..block {
            let mut hand = *hand;
            let mut pool = *pool;
            let card = pool.pick_from_block(block, pick);
            hand.add(card);
            if self.search(&hand, &pool, effects) {
                return true;
            }
        }
        false
    }
}
