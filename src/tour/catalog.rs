//! Tour Catalog
//!
//! The read-only catalog of tours available to the engine. The catalog is
//! built once at startup, from code-defined tours and/or tours compiled out
//! of the declarative source, and never mutated afterwards.

use std::collections::HashMap;

use log::{debug, warn};

use crate::tour::model::TourDefinition;

/// Immutable catalog of tour definitions, looked up by id.
///
/// Registration order is preserved: [`TourCatalog::list`] returns tours in
/// the order they were supplied, which for loaded tours is document order.
/// Supplying a second definition with an id already present replaces the
/// earlier one in place, so loaded tours can override built-in fallbacks
/// without disturbing the ordering. Definitions with no steps are dropped
/// at registration time; every catalogued tour has a step 0.
#[derive(Debug, Clone, Default)]
pub struct TourCatalog {
    tours: Vec<TourDefinition>,
    index: HashMap<String, usize>,
}

impl TourCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a sequence of definitions.
    ///
    /// # Example
    ///
    /// ```
    /// use tourguide::tour::{TourCatalog, TourDefinition, TourStep};
    ///
    /// let tour = TourDefinition::new("quick_tour")
    ///     .with_step(TourStep::new("welcome", "Welcome to the portal."));
    /// let catalog = TourCatalog::from_definitions(vec![tour]);
    ///
    /// assert!(catalog.get("quick_tour").is_some());
    /// ```
    pub fn from_definitions(definitions: Vec<TourDefinition>) -> Self {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.insert(definition);
        }
        catalog
    }

    /// Gets a tour by id.
    pub fn get(&self, id: &str) -> Option<&TourDefinition> {
        self.index.get(id).and_then(|&i| self.tours.get(i))
    }

    /// Returns true if the catalog contains a tour with the given id.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Returns all tours in registration order.
    pub fn list(&self) -> &[TourDefinition] {
        &self.tours
    }

    /// Returns the tour ids in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.tours.iter().map(|t| t.id.as_str()).collect()
    }

    /// Returns the number of tours in the catalog.
    pub fn len(&self) -> usize {
        self.tours.len()
    }

    /// Returns true if the catalog holds no tours.
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    // Population happens only while the catalog is being built, so this
    // stays private to the constructor path.
    fn insert(&mut self, definition: TourDefinition) {
        if definition.is_empty() {
            warn!("Ignoring tour '{}': it has no steps", definition.id);
            return;
        }
        match self.index.get(&definition.id) {
            Some(&i) => {
                debug!("Tour '{}' re-registered, replacing earlier definition", definition.id);
                self.tours[i] = definition;
            }
            None => {
                self.index.insert(definition.id.clone(), self.tours.len());
                self.tours.push(definition);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tour::model::TourStep;

    fn sample_tour(id: &str) -> TourDefinition {
        TourDefinition::new(id)
            .with_step(TourStep::new("welcome", "Welcome."))
            .with_step(TourStep::new("finish", "All done."))
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = TourCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.get("quick_tour").is_none());
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = TourCatalog::from_definitions(vec![
            sample_tour("quick_tour"),
            sample_tour("appointment_booking_tour"),
        ]);

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("quick_tour"));
        assert_eq!(catalog.get("appointment_booking_tour").unwrap().len(), 2);
        assert!(catalog.get("unknown").is_none());
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let catalog = TourCatalog::from_definitions(vec![
            sample_tour("c"),
            sample_tour("a"),
            sample_tour("b"),
        ]);

        assert_eq!(catalog.ids(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_stepless_tour_is_ignored() {
        let catalog = TourCatalog::from_definitions(vec![
            sample_tour("quick_tour"),
            TourDefinition::new("hollow_tour"),
        ]);

        assert_eq!(catalog.len(), 1);
        assert!(!catalog.contains("hollow_tour"));
    }

    #[test]
    fn test_reregistration_replaces_in_place() {
        let replacement = TourDefinition::new("a")
            .with_step(TourStep::new("only", "Replacement step."));

        let catalog = TourCatalog::from_definitions(vec![
            sample_tour("a"),
            sample_tour("b"),
            replacement,
        ]);

        // Still two tours, "a" still first, but with the new steps
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.ids(), vec!["a", "b"]);
        assert_eq!(catalog.get("a").unwrap().len(), 1);
        assert_eq!(catalog.get("a").unwrap().steps[0].id, "only");
    }
}
