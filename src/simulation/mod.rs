pub mod combos;
pub mod config;
pub mod deck;
pub mod driver;
pub mod engine;

pub use combos::{parse_combos, parse_combos_file, ComboError, Possibility, PossibilityCatalog};
pub use config::{ConfigError, SimConfig};
pub use deck::{build_deck, parse_deck_file, DeckBuild, DeckError, FILLER_CARD};
pub use driver::{TrialReport, TrialRunner};
pub use engine::ReachabilityEngine;
