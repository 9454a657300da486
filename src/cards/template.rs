//! Card templates - static face data.
//!
//! A `CardTemplate` holds the immutable identity a pair of cards is
//! stamped from: the pair key (`name`) and the face-art family
//! (`flavor`). Suit and color are not part of the template; they are
//! drawn per pair at generation.
//!
//! The `TemplatePool` is the registry the board generator samples from.
//! A difficulty is only valid against a pool with at least as many
//! templates as it has pairs.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::Flavor;

/// Static face data for one pair of cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Pair key; unique within a pool.
    pub name: String,

    /// Face-art family.
    pub flavor: Flavor,
}

impl CardTemplate {
    /// Create a new template.
    #[must_use]
    pub fn new(name: impl Into<String>, flavor: Flavor) -> Self {
        Self {
            name: name.into(),
            flavor,
        }
    }
}

/// Pool of candidate templates for board generation.
///
/// ## Example
///
/// ```
/// use flipmatch::cards::{CardTemplate, TemplatePool};
/// use flipmatch::core::Flavor;
///
/// let mut pool = TemplatePool::new();
/// pool.register(CardTemplate::new("fox", Flavor::Beasts));
/// pool.register(CardTemplate::new("owl", Flavor::Beasts));
///
/// assert_eq!(pool.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TemplatePool {
    templates: Vec<CardTemplate>,
    by_name: FxHashMap<String, usize>,
}

impl TemplatePool {
    /// Create a new empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template.
    ///
    /// Panics if a template with the same name already exists; pair
    /// keys must be unique or the two-cards-per-name invariant breaks.
    pub fn register(&mut self, template: CardTemplate) {
        if self.by_name.contains_key(&template.name) {
            panic!("Template '{}' already registered", template.name);
        }
        self.by_name
            .insert(template.name.clone(), self.templates.len());
        self.templates.push(template);
    }

    /// Number of templates in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Is the pool empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The templates in registration order, for indexed uniform draws.
    #[must_use]
    pub fn templates(&self) -> &[CardTemplate] {
        &self.templates
    }

    /// Look up a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CardTemplate> {
        self.by_name.get(name).map(|&i| &self.templates[i])
    }

    /// The built-in pool: 18 templates, three per flavor.
    ///
    /// Large enough for every preset difficulty (`hard` needs 15).
    #[must_use]
    pub fn default_pool() -> Self {
        let mut pool = Self::new();
        for (name, flavor) in [
            ("fox", Flavor::Beasts),
            ("owl", Flavor::Beasts),
            ("wolf", Flavor::Beasts),
            ("lotus", Flavor::Blossoms),
            ("iris", Flavor::Blossoms),
            ("poppy", Flavor::Blossoms),
            ("opal", Flavor::Gems),
            ("topaz", Flavor::Gems),
            ("garnet", Flavor::Gems),
            ("fehu", Flavor::Runes),
            ("uruz", Flavor::Runes),
            ("ansuz", Flavor::Runes),
            ("coral", Flavor::Tides),
            ("pearl", Flavor::Tides),
            ("kelp", Flavor::Tides),
            ("cinder", Flavor::Embers),
            ("flare", Flavor::Embers),
            ("ash", Flavor::Embers),
        ] {
            pool.register(CardTemplate::new(name, flavor));
        }
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut pool = TemplatePool::new();
        assert!(pool.is_empty());

        pool.register(CardTemplate::new("fox", Flavor::Beasts));
        pool.register(CardTemplate::new("opal", Flavor::Gems));

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get("fox").unwrap().flavor, Flavor::Beasts);
        assert!(pool.get("bear").is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_name_panics() {
        let mut pool = TemplatePool::new();
        pool.register(CardTemplate::new("fox", Flavor::Beasts));
        pool.register(CardTemplate::new("fox", Flavor::Gems));
    }

    #[test]
    fn test_default_pool() {
        let pool = TemplatePool::default_pool();

        assert_eq!(pool.len(), 18);

        // Names are unique by construction; spot-check a few
        assert!(pool.get("fox").is_some());
        assert!(pool.get("ansuz").is_some());
        assert!(pool.get("ash").is_some());
    }

    #[test]
    fn test_registration_order_is_stable() {
        let pool = TemplatePool::default_pool();
        assert_eq!(pool.templates()[0].name, "fox");
        assert_eq!(pool.templates()[17].name, "ash");
    }
}
