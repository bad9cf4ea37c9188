use foundation::geo::LatLng;
use foundation::handles::Handle;
use places::{Place, PlaceId};

use crate::layer::{Layer, LayerId, PLACES_LAYER};
use crate::symbology::Symbology;

/// Marker handed out by a [`MapSurface`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MarkerId(pub Handle);

/// "Open in external maps" action bound to one marker.
///
/// The URL is built from that marker's own coordinates when the marker is
/// created, so a click can never pick up another marker's position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalMapLink {
    pub label: String,
    pub url: String,
}

impl ExternalMapLink {
    pub fn google_maps(position: LatLng) -> Self {
        Self {
            label: "Open in Google Maps".to_string(),
            url: format!("https://www.google.com/maps?q={},{}", position.lat, position.lng),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub link: Option<ExternalMapLink>,
}

impl Popup {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn for_place(place: &Place) -> Self {
        Self {
            title: place.name.clone(),
            subtitle: Some(place.category.clone()),
            description: place.description.clone(),
            image: place.image.clone(),
            link: Some(ExternalMapLink::google_maps(place.position)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: LatLng,
    /// Icon color; `None` keeps the map's default icon.
    pub color: Option<String>,
    pub popup: Popup,
}

/// What the campus map needs from the mapping library.
pub trait MapSurface {
    fn add_marker(&mut self, layer: LayerId, spec: MarkerSpec) -> MarkerId;
    /// Removing an unknown or already removed marker is a no-op.
    fn remove_marker(&mut self, marker: MarkerId);
    fn open_popup(&mut self, marker: MarkerId);
    fn set_view(&mut self, center: LatLng, zoom: u8);
    /// Animated variant of [`MapSurface::set_view`].
    fn fly_to(&mut self, center: LatLng, zoom: u8);
}

/// Keeps one map marker per visible place.
///
/// Every render tears down the markers of the previous render and creates
/// fresh ones, so the marker set always mirrors the last rendered subset.
#[derive(Debug, Clone)]
pub struct MarkersLayer {
    id: LayerId,
    symbology: Symbology,
    markers: Vec<(PlaceId, MarkerId)>,
}

impl MarkersLayer {
    pub fn new(symbology: Symbology) -> Self {
        Self {
            id: PLACES_LAYER,
            symbology,
            markers: Vec::new(),
        }
    }

    pub fn render(&mut self, map: &mut impl MapSurface, visible: &[&Place]) {
        self.clear(map);
        self.markers.reserve(visible.len());
        for place in visible {
            let marker = map.add_marker(self.id, self.marker_spec(place));
            self.markers.push((place.id, marker));
        }
    }

    pub fn clear(&mut self, map: &mut impl MapSurface) {
        for (_, marker) in self.markers.drain(..) {
            map.remove_marker(marker);
        }
    }

    pub fn marker_spec(&self, place: &Place) -> MarkerSpec {
        MarkerSpec {
            position: place.position,
            color: Some(self.symbology.style_for(&place.category).color.clone()),
            popup: Popup::for_place(place),
        }
    }

    /// Marker currently shown for `place`, if it is part of the last render.
    pub fn marker_for(&self, place: PlaceId) -> Option<MarkerId> {
        self.markers
            .iter()
            .find(|(p, _)| *p == place)
            .map(|(_, m)| *m)
    }

    pub fn markers(&self) -> &[(PlaceId, MarkerId)] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl Layer for MarkersLayer {
    fn id(&self) -> LayerId {
        self.id
    }
}
