use foundation::geo::LatLng;
use places::{Place, PlaceId};

/// Text of the single entry shown when nothing matches the filters.
pub const NO_RESULTS: &str = "No results found.";

/// One row of the sidebar list.
///
/// Rows carry their own place id and coordinates, so activating a row never
/// depends on its index or on any state shared between rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub place: PlaceId,
    pub label: String,
    pub position: LatLng,
}

impl ListEntry {
    pub fn for_place(place: &Place) -> Self {
        Self {
            place: place.id,
            label: place.name.clone(),
            position: place.position,
        }
    }
}

/// What the campus map needs from the sidebar list widget.
pub trait PlaceListView {
    /// Replaces the whole list content with `entries`, in order.
    fn show_entries(&mut self, entries: &[ListEntry]);
    /// Replaces the whole list content with a single placeholder row.
    fn show_placeholder(&mut self, message: &str);
}

/// Keeps the sidebar list in step with the visible places.
#[derive(Debug, Clone, Default)]
pub struct ListLayer {
    entries: Vec<ListEntry>,
}

impl ListLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, view: &mut impl PlaceListView, visible: &[&Place]) {
        self.entries = visible.iter().map(|p| ListEntry::for_place(p)).collect();
        if self.entries.is_empty() {
            view.show_placeholder(NO_RESULTS);
        } else {
            view.show_entries(&self.entries);
        }
    }

    pub fn entry(&self, place: PlaceId) -> Option<&ListEntry> {
        self.entries.iter().find(|e| e.place == place)
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::{ListEntry, ListLayer, NO_RESULTS, PlaceListView};
    use foundation::geo::LatLng;
    use places::{Place, PlaceId};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default)]
    struct RecordingList {
        rows: Vec<String>,
        placeholder: bool,
        renders: usize,
    }

    impl PlaceListView for RecordingList {
        fn show_entries(&mut self, entries: &[ListEntry]) {
            self.rows = entries.iter().map(|e| e.label.clone()).collect();
            self.placeholder = false;
            self.renders += 1;
        }

        fn show_placeholder(&mut self, message: &str) {
            self.rows = vec![message.to_string()];
            self.placeholder = true;
            self.renders += 1;
        }
    }

    fn campus() -> Vec<Place> {
        vec![
            Place::new(PlaceId(0), "Library", "academic", LatLng::new(4.97, 7.76)),
            Place::new(PlaceId(1), "Hostel A", "hostel", LatLng::new(4.971, 7.757)),
        ]
    }

    #[test]
    fn rows_follow_visible_order() {
        let places = campus();
        let mut view = RecordingList::default();
        let mut layer = ListLayer::new();
        layer.render(&mut view, &[&places[1], &places[0]]);
        assert_eq!(view.rows, vec!["Hostel A", "Library"]);
        assert_eq!(
            layer.entry(PlaceId(1)).map(|e| e.position),
            Some(LatLng::new(4.971, 7.757))
        );
    }

    #[test]
    fn empty_subset_shows_single_placeholder() {
        let places = campus();
        let mut view = RecordingList::default();
        let mut layer = ListLayer::new();
        layer.render(&mut view, &[&places[0]]);
        layer.render(&mut view, &[]);
        assert!(view.placeholder);
        assert_eq!(view.rows, vec![NO_RESULTS]);
        assert!(layer.entries().is_empty());
        assert!(layer.entry(PlaceId(0)).is_none());
    }

    #[test]
    fn rendering_twice_replaces_instead_of_appending() {
        let places = campus();
        let visible: Vec<&Place> = places.iter().collect();
        let mut view = RecordingList::default();
        let mut layer = ListLayer::new();
        layer.render(&mut view, &visible);
        layer.render(&mut view, &visible);
        assert_eq!(view.rows, vec!["Library", "Hostel A"]);
        assert_eq!(view.renders, 2);
    }
}
