use crate::card::{CardCatalog, CardId, CatalogError};
use crate::game::Deck;
use thiserror::Error;

/// Name of the padding card used to fill a deck out to its configured size
pub const FILLER_CARD: &str = "blank";

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("'{token}' is not a valid copy count for card '{name}'")]
    InvalidCount { name: String, token: String },
    #[error("deck list ends with card '{name}' missing its copy count")]
    MissingCount { name: String },
    #[error("cannot register filler card: {0}")]
    FillerUnavailable(#[from] CatalogError),
}

/// Parse a deck list: whitespace-separated `<name> <copies>` pairs.
/// Newlines carry no meaning and repeated names accumulate copies.
pub fn parse_deck_file(path: &str) -> Result<Vec<(String, usize)>, DeckError> {
    let content = std::fs::read_to_string(path)?;
    parse_deck_list(&content)
}

pub fn parse_deck_list(content: &str) -> Result<Vec<(String, usize)>, DeckError> {
    let mut entries = Vec::new();
    let mut tokens = content.split_whitespace();

    while let Some(name) = tokens.next() {
        let count_token = tokens.next().ok_or_else(|| DeckError::MissingCount {
            name: name.to_string(),
        })?;
        let copies = count_token
            .parse::<usize>()
            .map_err(|_| DeckError::InvalidCount {
                name: name.to_string(),
                token: count_token.to_string(),
            })?;
        entries.push((name.to_string(), copies));
    }

    Ok(entries)
}

/// Result of building a deck, with overflow surfaced instead of silently
/// dropped
#[derive(Debug)]
pub struct DeckBuild {
    pub deck: Deck,
    /// Copies listed past the configured deck size and left out
    pub truncated: usize,
}

/// Build a fixed-size deck from parsed entries. Copies beyond `deck_size`
/// are truncated (counted, not fatal); unresolvable names are warned about
/// and skipped; the remainder is padded with the filler card.
///
/// Fails only when the filler itself cannot be registered, which takes a
/// catalog that is already full before any deck entry is seen.
pub fn build_deck(
    entries: &[(String, usize)],
    deck_size: usize,
    catalog: &mut CardCatalog,
) -> Result<DeckBuild, DeckError> {
    // Register the filler first so a crowded catalog cannot leave the deck
    // short of padding.
    let filler = catalog.get_or_create(FILLER_CARD)?;

    let mut cards: Vec<CardId> = Vec::with_capacity(deck_size);
    let mut truncated = 0usize;

    for (name, copies) in entries {
        let id = match catalog.get_or_create(name) {
            Ok(id) => id,
            Err(e) => {
                eprintln!("Warning: {}", e);
                continue;
            }
        };

        let room = deck_size.saturating_sub(cards.len());
        let kept = (*copies).min(room);
        truncated += copies - kept;
        cards.extend(std::iter::repeat(id).take(kept));
    }

    cards.resize(deck_size, filler);

    Ok(DeckBuild {
        deck: Deck::from_cards(cards),
        truncated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs_across_lines() {
        let entries = parse_deck_list("Ash 3 Maxx 2\nCalled 1\n").unwrap();
        assert_eq!(
            entries,
            vec![
                ("Ash".to_string(), 3),
                ("Maxx".to_string(), 2),
                ("Called".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_parse_missing_count_is_an_error() {
        let err = parse_deck_list("Ash 3 Maxx").unwrap_err();
        assert!(matches!(err, DeckError::MissingCount { name } if name == "Maxx"));
    }

    #[test]
    fn test_parse_bad_count_is_an_error() {
        let err = parse_deck_list("Ash three").unwrap_err();
        assert!(matches!(err, DeckError::InvalidCount { .. }));
    }

    #[test]
    fn test_build_pads_with_filler() {
        let mut catalog = CardCatalog::new();
        let entries = vec![("X".to_string(), 3)];
        let build = build_deck(&entries, 40, &mut catalog).expect("deck should build");

        assert_eq!(build.deck.len(), 40);
        assert_eq!(build.truncated, 0);

        let x = catalog.lookup("X").unwrap();
        let filler = catalog.lookup(FILLER_CARD).unwrap();
        let x_count = build.deck.cards().iter().filter(|&&c| c == x).count();
        let filler_count = build.deck.cards().iter().filter(|&&c| c == filler).count();
        assert_eq!(x_count, 3);
        assert_eq!(filler_count, 37);
    }

    #[test]
    fn test_build_truncates_overflow() {
        let mut catalog = CardCatalog::new();
        let entries = vec![("A".to_string(), 8), ("B".to_string(), 5)];
        let build = build_deck(&entries, 10, &mut catalog).expect("deck should build");

        assert_eq!(build.deck.len(), 10);
        assert_eq!(build.truncated, 3);
    }

    #[test]
    fn test_repeated_names_accumulate() {
        let mut catalog = CardCatalog::new();
        let entries = parse_deck_list("A 2 A 3").unwrap();
        let build = build_deck(&entries, 10, &mut catalog).expect("deck should build");

        let a = catalog.lookup("A").unwrap();
        let a_count = build.deck.cards().iter().filter(|&&c| c == a).count();
        assert_eq!(a_count, 5);
    }

    #[test]
    fn test_full_catalog_fails_instead_of_panicking() {
        let mut catalog = CardCatalog::with_capacity(1);
        catalog.get_or_create("Occupant").unwrap();

        let entries = vec![("A".to_string(), 2)];
        let err = build_deck(&entries, 6, &mut catalog).unwrap_err();
        assert!(matches!(err, DeckError::FillerUnavailable(_)));
    }

    #[test]
    fn test_unresolvable_name_is_skipped() {
        // Capacity 2: filler takes one slot, "A" the other, "B" is dropped
        let mut catalog = CardCatalog::with_capacity(2);
        let entries = vec![("A".to_string(), 2), ("B".to_string(), 2)];
        let build = build_deck(&entries, 6, &mut catalog).expect("deck should build");

        assert_eq!(build.deck.len(), 6);
        let a = catalog.lookup("A").unwrap();
        let filler = catalog.lookup(FILLER_CARD).unwrap();
        assert_eq!(build.deck.cards().iter().filter(|&&c| c == a).count(), 2);
        assert_eq!(build.deck.cards().iter().filter(|&&c| c == filler).count(), 4);
    }
}
