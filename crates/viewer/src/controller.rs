//! The campus map controller.
//!
//! `CampusMap` owns every piece of viewer state and reacts to the page's
//! events: campus switches, filter changes, list activations and locate-me
//! requests. The map widget, the sidebar list and the notification area are
//! reached only through the [`MapSurface`], [`PlaceListView`] and
//! [`Notifier`] traits, so the whole flow runs (and is tested) without a
//! browser. Asynchronous work (dataset fetches, geolocation) is started by
//! the caller from the request objects returned here and reported back via
//! [`CampusMap::complete_load`] and [`CampusMap::finish_locate`].

use foundation::geo::LatLng;
use layers::labels::{ListLayer, PlaceListView};
use layers::objects::{MapSurface, MarkersLayer};
use layers::query::{self, CategoryFilter, PlaceQuery};
use layers::user_position::UserPositionSlot;
use places::{DataLoader, LoadError, LoadOutcome, LoadRequest, LoadTicket, Place, PlaceId, PlaceStore};
use runtime::event_bus::Notifier;
use tracing::{debug, info, warn};

use crate::config::{GeolocationOptions, ViewerConfig};
use crate::locate::{GeoError, LocateState, Locator};

pub const LOAD_FAILED: &str = "Unable to load locations.";

pub struct CampusMap<M, L, N> {
    config: ViewerConfig,
    map: M,
    list: L,
    notifier: N,
    store: PlaceStore,
    loader: DataLoader,
    query: PlaceQuery,
    markers: MarkersLayer,
    entries: ListLayer,
    user: UserPositionSlot,
    locator: Locator,
}

impl<M: MapSurface, L: PlaceListView, N: Notifier> CampusMap<M, L, N> {
    /// Centers `map` on the configured start view. Nothing is loaded yet; call
    /// [`CampusMap::load_default`] and perform the returned request.
    pub fn new(config: ViewerConfig, mut map: M, list: L, notifier: N) -> Self {
        map.set_view(config.center, config.zoom);
        Self {
            loader: DataLoader::new(config.datasets.clone()),
            markers: MarkersLayer::new(config.symbology.clone()),
            config,
            map,
            list,
            notifier,
            store: PlaceStore::new(),
            query: PlaceQuery::new(),
            entries: ListLayer::new(),
            user: UserPositionSlot::new(),
            locator: Locator::new(),
        }
    }

    /// Dispatches the configured default dataset.
    pub fn load_default(&mut self) -> Option<LoadRequest> {
        let id = self.config.default_dataset.clone();
        self.dispatch(&id)
    }

    /// Campus selector changed: dispatches the new dataset and tells the user.
    ///
    /// The current places stay on screen until the new dataset arrives.
    pub fn switch_dataset(&mut self, id: &str) -> Option<LoadRequest> {
        let request = self.dispatch(id)?;
        self.notifier
            .success(&format!("Switched to {}", request.label));
        Some(request)
    }

    fn dispatch(&mut self, id: &str) -> Option<LoadRequest> {
        match self.loader.dispatch(id) {
            Ok(request) => Some(request),
            Err(err) => {
                warn!(error = %err, "dataset switch rejected");
                self.notifier.error(&format!("Unknown campus: {id}"));
                None
            }
        }
    }

    /// Reports the fetched body (or fetch error) for a dispatched request.
    ///
    /// A current, successful response replaces the place list and re-applies
    /// the active filters; a stale response is ignored.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        body: Result<String, LoadError>,
    ) -> LoadOutcome {
        let outcome = self.loader.complete(&mut self.store, ticket, body);
        match &outcome {
            LoadOutcome::Applied { .. } => self.refresh(),
            LoadOutcome::Failed(_) => self.notifier.error(LOAD_FAILED),
            LoadOutcome::Stale => {}
        }
        outcome
    }

    /// Category control changed; the search term is kept.
    pub fn set_category(&mut self, value: &str) {
        self.query.set_category(CategoryFilter::parse(value));
        self.refresh();
    }

    /// Search box changed; the category is kept.
    pub fn set_search(&mut self, term: &str) {
        self.query.set_search(term);
        self.refresh();
    }

    pub fn visible(&self) -> Vec<&Place> {
        query::visible(self.store.places(), &self.query)
    }

    /// Re-renders markers and list from the current places and filters.
    pub fn refresh(&mut self) {
        let visible = query::visible(self.store.places(), &self.query);
        self.markers.render(&mut self.map, &visible);
        self.entries.render(&mut self.list, &visible);
        debug!(visible = visible.len(), total = self.store.len(), "rendered places");
    }

    /// A sidebar row was activated: center on that place and open its popup.
    ///
    /// Returns `false` if `place` is not in the current list.
    pub fn focus_place(&mut self, place: PlaceId) -> bool {
        let Some(position) = self.entries.entry(place).map(|e| e.position) else {
            debug!(place = place.0, "ignoring activation of unlisted place");
            return false;
        };
        self.map.set_view(position, self.config.focus_zoom);
        if let Some(marker) = self.markers.marker_for(place) {
            self.map.open_popup(marker);
        }
        true
    }

    /// Locate-me pressed.
    ///
    /// Returns the options for the geolocation request the caller must
    /// start, or `None` while an earlier request is still in flight.
    pub fn begin_locate(&mut self) -> Option<GeolocationOptions> {
        if !self.locator.begin() {
            debug!("locate already in progress");
            return None;
        }
        Some(self.config.geolocation)
    }

    /// Reports the outcome of the request started by [`CampusMap::begin_locate`].
    pub fn finish_locate(&mut self, result: Result<LatLng, GeoError>) {
        if !self.locator.finish() {
            debug!("ignoring geolocation result without a pending request");
            return;
        }

        let result = result.and_then(|at| {
            if at.is_valid() {
                Ok(at)
            } else {
                Err(GeoError::PositionUnavailable)
            }
        });
        match result {
            Ok(at) => {
                self.user.place(&mut self.map, at);
                self.map.fly_to(at, self.config.focus_zoom);
                info!(lat = at.lat, lng = at.lng, "user located");
            }
            Err(err) => {
                warn!(error = %err, "geolocation failed");
                self.notifier.error(err.user_message());
            }
        }
    }

    pub fn locate_state(&self) -> LocateState {
        self.locator.state()
    }

    pub fn user_position(&self) -> Option<LatLng> {
        self.user.position()
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn store(&self) -> &PlaceStore {
        &self.store
    }

    pub fn entries(&self) -> &ListLayer {
        &self.entries
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
