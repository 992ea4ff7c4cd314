use crate::card::{CardCatalog, CardId};
use crate::game::Hand;
use thiserror::Error;

/// Cap on requirements per combination
pub const MAX_CONDITIONS: usize = 20;

/// Cap on combinations in a catalog
pub const MAX_POSSIBILITIES: usize = 20;

#[derive(Error, Debug)]
pub enum ComboError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// One per-card minimum-count requirement
#[derive(Debug, Clone, Copy)]
pub struct Requirement {
    pub card: CardId,
    pub min_count: u8,
}

/// A winning combination: every requirement must hold at once.
/// The OR of the required cards' mask bits is precomputed so hands missing
/// any required card are rejected with one mask compare.
#[derive(Debug, Clone)]
pub struct Possibility {
    requirements: Vec<Requirement>,
    required_mask: u64,
}

impl Possibility {
    pub fn new(requirements: Vec<Requirement>) -> Self {
        let required_mask = requirements
            .iter()
            .fold(0u64, |mask, req| mask | req.card.mask_bit());
        Possibility {
            requirements,
            required_mask,
        }
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn satisfied_by(&self, hand: &Hand) -> bool {
        if hand.presence_mask() & self.required_mask != self.required_mask {
            return false;
        }
        self.requirements
            .iter()
            .all(|req| hand.count(req.card) >= req.min_count)
    }
}

/// All configured winning combinations. A hand wins if any one is
/// satisfied.
#[derive(Debug, Clone, Default)]
pub struct PossibilityCatalog {
    possibilities: Vec<Possibility>,
}

impl PossibilityCatalog {
    pub fn new() -> Self {
        PossibilityCatalog {
            possibilities: Vec::new(),
        }
    }

    /// Add a combination; returns false (and warns) once the catalog is full
    pub fn push(&mut self, possibility: Possibility) -> bool {
        if self.possibilities.len() >= MAX_POSSIBILITIES {
            eprintln!(
                "Warning: too many combinations (limit {}), dropping one",
                MAX_POSSIBILITIES
            );
            return false;
        }
        self.possibilities.push(possibility);
        true
    }

    /// Short-circuit OR across all combinations
    pub fn matches(&self, hand: &Hand) -> bool {
        self.possibilities.iter().any(|p| p.satisfied_by(hand))
    }

    pub fn len(&self) -> usize {
        self.possibilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.possibilities.is_empty()
    }

    pub fn possibilities(&self) -> &[Possibility] {
        &self.possibilities
    }
}

/// Parse a combos file: one combination per line, `<name> <min_count>`
/// pairs, `#` comments and blank lines skipped.
pub fn parse_combos_file(
    path: &str,
    catalog: &mut CardCatalog,
) -> Result<PossibilityCatalog, ComboError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_combos(&content, catalog))
}

/// Parse combination rules from text. Malformed lines (trailing name
/// without a count, or a count that is not a number) are warned about and
/// discarded; remaining lines still parse.
pub fn parse_combos(content: &str, catalog: &mut CardCatalog) -> PossibilityCatalog {
    let mut possibilities = PossibilityCatalog::new();

    'lines: for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut requirements = Vec::new();
        let mut tokens = trimmed.split_whitespace();

        while let Some(name) = tokens.next() {
            let Some(count_str) = tokens.next() else {
                eprintln!(
                    "Warning: line {}: missing count for card '{}', line discarded",
                    line_num + 1,
                    name
                );
                continue 'lines;
            };

            let Ok(min_count) = count_str.parse::<u8>() else {
                eprintln!(
                    "Warning: line {}: '{}' is not a valid count, line discarded",
                    line_num + 1,
                    count_str
                );
                continue 'lines;
            };

            if requirements.len() >= MAX_CONDITIONS {
                eprintln!(
                    "Warning: line {}: more than {} requirements, extras ignored",
                    line_num + 1,
                    MAX_CONDITIONS
                );
                break;
            }

            let card = match catalog.get_or_create(name) {
                Ok(id) => id,
                Err(e) => {
                    // A combination with an unregistrable card can never be
                    // checked faithfully, so the whole line goes.
                    eprintln!("Warning: line {}: {}, line discarded", line_num + 1, e);
                    continue 'lines;
                }
            };

            requirements.push(Requirement { card, min_count });
        }

        if !requirements.is_empty() {
            possibilities.push(Possibility::new(requirements));
        }
    }

    possibilities
}
