use crate::card::{CardCatalog, CardId};

/// The five supplementary draw effects. Each is keyed to a trigger card
/// that must be in hand for the effect to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Desires,
    Extravagance,
    Prosperity,
    Upstart,
    Duality,
}

impl EffectKind {
    pub const ALL: [EffectKind; 5] = [
        EffectKind::Desires,
        EffectKind::Extravagance,
        EffectKind::Prosperity,
        EffectKind::Upstart,
        EffectKind::Duality,
    ];

    /// Card name the effect is keyed to in deck and combo files
    pub fn trigger_name(self) -> &'static str {
        match self {
            EffectKind::Desires => "Desires",
            EffectKind::Extravagance => "Extravagance",
            EffectKind::Prosperity => "Prosperity",
            EffectKind::Upstart => "Upstart",
            EffectKind::Duality => "Duality",
        }
    }

    /// Minimum extras-pool size required to fire
    pub fn pool_cost(self) -> usize {
        match self {
            EffectKind::Desires => 2,
            EffectKind::Extravagance => 2,
            EffectKind::Prosperity => 6,
            EffectKind::Upstart => 1,
            EffectKind::Duality => 3,
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

const DESIRES: u8 = 1 << EffectKind::Desires as u8;
const EXTRAVAGANCE: u8 = 1 << EffectKind::Extravagance as u8;
const PROSPERITY: u8 = 1 << EffectKind::Prosperity as u8;
const UPSTART: u8 = 1 << EffectKind::Upstart as u8;
const DUALITY: u8 = 1 << EffectKind::Duality as u8;

/// Effects that stay eligible after each kind fires, intersected with
/// whatever was still eligible coming in. The asymmetry is the game's:
/// Upstart keeps itself eligible and may chain, the other four are
/// single-use per line of play, and Prosperity additionally locks out
/// Upstart.
const RETAIN_AFTER_USE: [u8; 5] = [
    UPSTART | DUALITY,              // after Desires
    UPSTART | DUALITY,              // after Extravagance
    DUALITY,                        // after Prosperity
    DESIRES | UPSTART | DUALITY,    // after Upstart
    DESIRES | UPSTART | PROSPERITY, // after Duality
];

/// Which effects remain eligible to fire on the current line of play.
/// Threaded through the reachability search instead of five ad-hoc flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectSet(u8);

impl EffectSet {
    pub const fn all() -> Self {
        EffectSet(DESIRES | EXTRAVAGANCE | PROSPERITY | UPSTART | DUALITY)
    }

    pub const fn none() -> Self {
        EffectSet(0)
    }

    pub fn contains(self, kind: EffectKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Eligibility for the branch spawned by firing `kind`
    pub fn after_use(self, kind: EffectKind) -> EffectSet {
        EffectSet(self.0 & RETAIN_AFTER_USE[kind as usize])
    }

    /// Remove one effect without firing it (test and setup convenience)
    pub fn without(self, kind: EffectKind) -> EffectSet {
        EffectSet(self.0 & !kind.bit())
    }
}

/// Card ids of the five trigger cards, resolved against the catalog once at
/// startup. A trigger that could not be registered (catalog full) is None
/// and its effect never fires.
#[derive(Debug, Clone, Copy)]
pub struct TriggerIds {
    ids: [Option<CardId>; 5],
}

impl TriggerIds {
    /// Register all five trigger names, warning about any that get dropped
    pub fn register(catalog: &mut CardCatalog) -> Self {
        let mut ids = [None; 5];
        for kind in EffectKind::ALL {
            match catalog.get_or_create(kind.trigger_name()) {
                Ok(id) => ids[kind as usize] = Some(id),
                Err(e) => eprintln!("Warning: {}", e),
            }
        }
        TriggerIds { ids }
    }

    pub fn get(&self, kind: EffectKind) -> Option<CardId> {
        self.ids[kind as usize]
    }
}
