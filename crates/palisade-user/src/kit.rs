//! Kits: predefined loadouts a fighter can select.
//!
//! The core only knows a kit's identity and whether it summons a
//! companion; item contents and granting live on the host side.

use palisade_types::CompanionKind;

/// A selectable loadout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kit {
    id: String,
    display_name: String,
    /// Set for kits that summon an allied entity bound to the player
    /// (despawned again when the owner leaves).
    companion: Option<CompanionKind>,
}

impl Kit {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            companion: None,
        }
    }

    pub fn with_companion(mut self, kind: CompanionKind) -> Self {
        self.companion = Some(kind);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn companion(&self) -> Option<CompanionKind> {
        self.companion
    }
}

/// The known kits and which one new fighters start with.
#[derive(Debug, Clone)]
pub struct KitRegistry {
    kits: Vec<Kit>,
    default_index: usize,
}

impl KitRegistry {
    /// Builds a registry from `kits`; the first entry is the default.
    pub fn new(kits: Vec<Kit>) -> Self {
        assert!(!kits.is_empty(), "at least one kit is required");
        Self {
            kits,
            default_index: 0,
        }
    }

    pub fn default_kit(&self) -> &Kit {
        &self.kits[self.default_index]
    }

    pub fn by_id(&self, id: &str) -> Option<&Kit> {
        self.kits.iter().find(|k| k.id() == id)
    }

    pub fn kits(&self) -> &[Kit] {
        &self.kits
    }
}

impl Default for KitRegistry {
    /// The stock roster: knight (default), archer, golem friend, wolf
    /// pack. Matches the loadouts the host ships out of the box.
    fn default() -> Self {
        Self::new(vec![
            Kit::new("knight", "Knight"),
            Kit::new("archer", "Archer"),
            Kit::new("golem_friend", "Golem Friend").with_companion(CompanionKind::IronGolem),
            Kit::new("wolf_pack", "Wolf Pack").with_companion(CompanionKind::Wolf),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_default_kit_is_knight() {
        let kits = KitRegistry::default();
        assert_eq!(kits.default_kit().id(), "knight");
        assert_eq!(kits.default_kit().companion(), None);
    }

    #[test]
    fn test_by_id_finds_companion_kits() {
        let kits = KitRegistry::default();
        let golem = kits.by_id("golem_friend").expect("kit should exist");
        assert_eq!(golem.companion(), Some(CompanionKind::IronGolem));
    }

    #[test]
    fn test_by_id_unknown_returns_none() {
        let kits = KitRegistry::default();
        assert!(kits.by_id("wizard").is_none());
    }

    #[test]
    #[should_panic(expected = "at least one kit")]
    fn test_empty_registry_panics() {
        KitRegistry::new(Vec::new());
    }
}
