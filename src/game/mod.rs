pub mod effects;
pub mod zones;

pub use effects::{EffectKind, EffectSet, TriggerIds};
pub use zones::{Deck, ExtrasPool, Hand, MAX_DECK_SIZE, MAX_EXTRAS_SIZE, MAX_HAND_SIZE};
