use std::collections::HashMap;
use thiserror::Error;

/// Default cap on unique card names. Presence masks are u64, so the hard
/// ceiling is 64 regardless of configuration.
pub const MAX_UNIQUE_CARDS: usize = 60;

/// Small stable integer id assigned to each unique card name.
/// Ids index directly into per-card count arrays and presence-mask bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(u8);

impl CardId {
    pub(crate) const fn from_raw(raw: u8) -> Self {
        CardId(raw)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The presence-mask bit for this card
    pub fn mask_bit(self) -> u64 {
        1u64 << self.0
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("too many unique cards (limit {capacity}), dropping '{name}'")]
    CapacityExceeded { name: String, capacity: usize },
}

/// Interner mapping card names to stable ids. Built once during setup and
/// treated as immutable for the rest of the run.
#[derive(Debug, Clone)]
pub struct CardCatalog {
    ids: HashMap<String, CardId>,
    names: Vec<String>,
    capacity: usize,
}

impl CardCatalog {
    pub fn new() -> Self {
        Self::with_capacity(MAX_UNIQUE_CARDS)
    }

    /// Create a catalog holding at most `capacity` unique names.
    /// Clamped to 64 so every id fits a u64 presence mask.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(64);
        CardCatalog {
            ids: HashMap::with_capacity(capacity),
            names: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Return the id for `name`, allocating the next id on first sight.
    /// Fails without allocating once the catalog is full; callers drop the
    /// offending deck entry or requirement and keep going.
    pub fn get_or_create(&mut self, name: &str) -> Result<CardId, CatalogError> {
        if let Some(&id) = self.ids.get(name) {
            return Ok(id);
        }

        if self.names.len() >= self.capacity {
            return Err(CatalogError::CapacityExceeded {
                name: name.to_string(),
                capacity: self.capacity,
            });
        }

        let id = CardId(self.names.len() as u8);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        Ok(id)
    }

    /// Look up a name without allocating an id
    pub fn lookup(&self, name: &str) -> Option<CardId> {
        self.ids.get(name).copied()
    }

    /// Name for an id previously returned by this catalog
    pub fn name(&self, id: CardId) -> &str {
        &self.names[id.index()]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for CardCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable() {
        let mut catalog = CardCatalog::new();
        let a = catalog.get_or_create("Ash Blossom").unwrap();
        let b = catalog.get_or_create("Maxx C").unwrap();
        assert_ne!(a, b);
        assert_eq!(catalog.get_or_create("Ash Blossom").unwrap(), a);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_name_round_trip() {
        let mut catalog = CardCatalog::new();
        let id = catalog.get_or_create("Upstart").unwrap();
        assert_eq!(catalog.name(id), "Upstart");
        assert_eq!(catalog.lookup("Upstart"), Some(id));
        assert_eq!(catalog.lookup("Unknown"), None);
    }

    #[test]
    fn test_capacity_exceeded_is_non_fatal() {
        let mut catalog = CardCatalog::with_capacity(2);
        catalog.get_or_create("A").unwrap();
        catalog.get_or_create("B").unwrap();

        let err = catalog.get_or_create("C").unwrap_err();
        assert!(matches!(err, CatalogError::CapacityExceeded { .. }));

        // Existing names still resolve after a failed insert
        assert!(catalog.get_or_create("A").is_ok());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_capacity_clamped_to_mask_width() {
        let mut catalog = CardCatalog::with_capacity(200);
        for i in 0..64 {
            catalog.get_or_create(&format!("card-{i}")).unwrap();
        }
        assert!(catalog.get_or_create("one-too-many").is_err());
    }

    #[test]
    fn test_mask_bits_are_distinct() {
        let mut catalog = CardCatalog::new();
        let a = catalog.get_or_create("A").unwrap();
        let b = catalog.get_or_create("B").unwrap();
        assert_eq!(a.mask_bit() & b.mask_bit(), 0);
    }
}
