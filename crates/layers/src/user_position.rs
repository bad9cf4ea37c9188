use foundation::geo::LatLng;

use crate::layer::{Layer, LayerId, USER_POSITION_LAYER};
use crate::objects::{MapSurface, MarkerId, MarkerSpec, Popup};

pub const YOU_ARE_HERE: &str = "📍 You are here!";

/// Single slot holding the "you are here" marker.
///
/// Placing a new position always removes the previous marker first, so at
/// most one user-position marker exists on the map.
#[derive(Debug, Clone)]
pub struct UserPositionSlot {
    id: LayerId,
    current: Option<(MarkerId, LatLng)>,
}

impl Default for UserPositionSlot {
    fn default() -> Self {
        Self {
            id: USER_POSITION_LAYER,
            current: None,
        }
    }
}

impl UserPositionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the user at `at`, replacing any earlier marker, and opens its popup.
    pub fn place(&mut self, map: &mut impl MapSurface, at: LatLng) -> MarkerId {
        self.clear(map);
        let marker = map.add_marker(
            self.id,
            MarkerSpec {
                position: at,
                color: None,
                popup: Popup::titled(YOU_ARE_HERE),
            },
        );
        map.open_popup(marker);
        self.current = Some((marker, at));
        marker
    }

    pub fn clear(&mut self, map: &mut impl MapSurface) {
        if let Some((marker, _)) = self.current.take() {
            map.remove_marker(marker);
        }
    }

    pub fn position(&self) -> Option<LatLng> {
        self.current.map(|(_, at)| at)
    }

    pub fn marker(&self) -> Option<MarkerId> {
        self.current.map(|(m, _)| m)
    }
}

impl Layer for UserPositionSlot {
    fn id(&self) -> LayerId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::{UserPositionSlot, YOU_ARE_HERE};
    use crate::layer::{Layer, PLACES_LAYER, USER_POSITION_LAYER};
    use crate::objects::testing::RecordingMap;
    use crate::objects::{MapSurface, MarkerSpec, Popup};
    use foundation::geo::LatLng;

    #[test]
    fn repeated_placement_keeps_exactly_one_marker() {
        let mut map = RecordingMap::default();
        let mut slot = UserPositionSlot::new();
        for lat in [4.970, 4.971, 4.972] {
            slot.place(&mut map, LatLng::new(lat, 7.76));
        }
        let markers = map.in_layer(USER_POSITION_LAYER);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].position, LatLng::new(4.972, 7.76));
        assert_eq!(markers[0].popup.title, YOU_ARE_HERE);
        assert_eq!(slot.position(), Some(LatLng::new(4.972, 7.76)));
        assert_eq!(map.open_popups.last().copied(), slot.marker());
    }

    #[test]
    fn clear_only_touches_its_own_marker() {
        let mut map = RecordingMap::default();
        map.add_marker(
            PLACES_LAYER,
            MarkerSpec {
                position: LatLng::new(4.97, 7.76),
                color: None,
                popup: Popup::titled("Library"),
            },
        );
        let mut slot = UserPositionSlot::new();
        assert_eq!(slot.id(), USER_POSITION_LAYER);
        slot.place(&mut map, LatLng::new(4.9, 7.7));
        slot.clear(&mut map);
        slot.clear(&mut map);

        assert!(map.in_layer(USER_POSITION_LAYER).is_empty());
        assert_eq!(map.in_layer(PLACES_LAYER).len(), 1);
        assert!(slot.position().is_none());
    }
}
