use crate::dataset::DatasetSelector;
use crate::place::{Place, PlaceId};

/// The full place list of the active dataset.
///
/// The list is only ever replaced as a whole, so readers never observe a
/// half-loaded dataset.
#[derive(Debug, Default)]
pub struct PlaceStore {
    selector: Option<DatasetSelector>,
    places: Vec<Place>,
}

impl PlaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a freshly parsed dataset, dropping the previous one.
    pub fn replace(&mut self, selector: DatasetSelector, places: Vec<Place>) {
        self.selector = Some(selector);
        self.places = places;
    }

    /// Dataset the current places came from, `None` before the first load.
    pub fn selector(&self) -> Option<&DatasetSelector> {
        self.selector.as_ref()
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn get(&self, id: PlaceId) -> Option<&Place> {
        self.places.get(id.0 as usize).filter(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}
