use std::path::Path;

use runtime::ticket::{Ticket, Tickets};
use tracing::{debug, error, info, warn};

use crate::dataset::{DatasetSelector, DatasetSource, find_source};
use crate::schema::{ParsedDataset, parse_places};
use crate::store::PlaceStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    UnknownDataset(String),
    Network(String),
    Status { url: String, status: u16 },
    Parse(String),
    Io(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::UnknownDataset(id) => write!(f, "unknown dataset: {id}"),
            LoadError::Network(msg) => write!(f, "dataset request failed: {msg}"),
            LoadError::Status { url, status } => write!(f, "GET {url} returned HTTP {status}"),
            LoadError::Parse(msg) => write!(f, "dataset is not valid: {msg}"),
            LoadError::Io(msg) => write!(f, "dataset read failed: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Ticket attached to every dataset request at dispatch time.
pub type LoadTicket = Ticket<DatasetSelector>;

/// A dataset fetch the caller must perform and report back through
/// [`DataLoader::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub url: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The store now holds the requested dataset.
    Applied {
        selector: DatasetSelector,
        places: usize,
        skipped: usize,
    },
    /// A newer request was dispatched; the response was discarded.
    Stale,
    /// The fetch or parse failed; the store is unchanged.
    Failed(LoadError),
}

/// Dispatches dataset loads and applies their responses last-load-wins.
///
/// The loader never performs I/O itself: `dispatch` hands out a
/// [`LoadRequest`], the caller fetches `url` however its environment allows,
/// and hands the body back to `complete` together with the ticket.
#[derive(Debug)]
pub struct DataLoader {
    sources: Vec<DatasetSource>,
    tickets: Tickets<DatasetSelector>,
}

impl DataLoader {
    pub fn new(sources: Vec<DatasetSource>) -> Self {
        Self {
            sources,
            tickets: Tickets::new(),
        }
    }

    /// Starts a load of dataset `id`, superseding any load still in flight.
    pub fn dispatch(&mut self, id: &str) -> Result<LoadRequest, LoadError> {
        let source =
            find_source(&self.sources, id).ok_or_else(|| LoadError::UnknownDataset(id.to_string()))?;
        let ticket = self.tickets.issue(source.id.clone());
        debug!(dataset = %source.id, seq = ticket.seq(), url = %source.url, "dispatching dataset load");
        Ok(LoadRequest {
            ticket,
            url: source.url.clone(),
            label: source.label.clone(),
        })
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.tickets.is_current(ticket)
    }

    /// The most recently dispatched ticket, if any.
    pub fn pending(&self) -> Option<&LoadTicket> {
        self.tickets.latest()
    }

    /// Applies a fetched response to `store`.
    ///
    /// Responses for superseded tickets are dropped whether they succeeded or
    /// failed. A failed current response leaves `store` untouched.
    pub fn complete(
        &mut self,
        store: &mut PlaceStore,
        ticket: &LoadTicket,
        body: Result<String, LoadError>,
    ) -> LoadOutcome {
        if !self.tickets.is_current(ticket) {
            debug!(dataset = %ticket.key(), seq = ticket.seq(), "discarding stale dataset response");
            return LoadOutcome::Stale;
        }

        let parsed = match body.and_then(|b| parse_places(&b)) {
            Ok(parsed) => parsed,
            Err(err) => {
                error!(dataset = %ticket.key(), error = %err, "error loading locations");
                return LoadOutcome::Failed(err);
            }
        };

        let places = parsed.places.len();
        let skipped = parsed.skipped.len();
        if skipped > 0 {
            warn!(dataset = %ticket.key(), skipped, "dataset contained unusable records");
        }
        store.replace(ticket.key().clone(), parsed.places);
        info!(dataset = %ticket.key(), places, "dataset loaded");

        LoadOutcome::Applied {
            selector: ticket.key().clone(),
            places,
            skipped,
        }
    }
}

/// Reads and parses a dataset file from disk.
pub fn load_file(path: impl AsRef<Path>) -> Result<ParsedDataset, LoadError> {
    let path = path.as_ref();
    let payload = std::fs::read_to_string(path)
        .map_err(|e| LoadError::Io(format!("{}: {e}", path.display())))?;
    parse_places(&payload)
}

#[cfg(test)]
mod tests {
    use super::{DataLoader, LoadError, LoadOutcome, load_file};
    use crate::dataset::DatasetSource;
    use crate::store::PlaceStore;

    const MAIN: &str = r#"[
        {"name": "Library", "category": "academic", "lat": 4.97, "lng": 7.76},
        {"name": "Hostel A", "category": "hostel", "lat": 4.971, "lng": 7.757}
    ]"#;
    const OBIO: &str = r#"[{"name": "Gate", "category": "facility", "lat": 5.01, "lng": 7.83}]"#;

    fn loader() -> DataLoader {
        DataLoader::new(vec![
            DatasetSource::new("main", "Main Campus", "data/locations.json"),
            DatasetSource::new("obioakpa", "Obio Akpa Campus", "data/locations_obioakpa.json"),
        ])
    }

    fn names(store: &PlaceStore) -> Vec<&str> {
        store.places().iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn dispatch_resolves_url_and_label() {
        let mut loader = loader();
        let req = loader.dispatch("obioakpa").unwrap();
        assert_eq!(req.url, "data/locations_obioakpa.json");
        assert_eq!(req.label, "Obio Akpa Campus");
        assert_eq!(req.ticket.key().as_str(), "obioakpa");
        assert_eq!(loader.pending(), Some(&req.ticket));
    }

    #[test]
    fn unknown_dataset_is_rejected() {
        let mut loader = loader();
        assert_eq!(
            loader.dispatch("moon"),
            Err(LoadError::UnknownDataset("moon".to_string()))
        );
        assert!(loader.pending().is_none());
    }

    #[test]
    fn older_response_arriving_last_is_discarded() {
        let mut loader = loader();
        let mut store = PlaceStore::new();

        let a = loader.dispatch("main").unwrap();
        let b = loader.dispatch("obioakpa").unwrap();

        let outcome_b = loader.complete(&mut store, &b.ticket, Ok(OBIO.to_string()));
        assert!(matches!(outcome_b, LoadOutcome::Applied { places: 1, .. }));

        let outcome_a = loader.complete(&mut store, &a.ticket, Ok(MAIN.to_string()));
        assert_eq!(outcome_a, LoadOutcome::Stale);

        assert_eq!(names(&store), vec!["Gate"]);
        assert_eq!(store.selector().map(|s| s.as_str()), Some("obioakpa"));
    }

    #[test]
    fn older_response_arriving_first_is_discarded_too() {
        let mut loader = loader();
        let mut store = PlaceStore::new();

        let a = loader.dispatch("main").unwrap();
        let b = loader.dispatch("obioakpa").unwrap();

        assert_eq!(
            loader.complete(&mut store, &a.ticket, Ok(MAIN.to_string())),
            LoadOutcome::Stale
        );
        assert!(store.is_empty());

        loader.complete(&mut store, &b.ticket, Ok(OBIO.to_string()));
        assert_eq!(names(&store), vec!["Gate"]);
    }

    #[test]
    fn failure_keeps_previous_data() {
        let mut loader = loader();
        let mut store = PlaceStore::new();

        let first = loader.dispatch("main").unwrap();
        loader.complete(&mut store, &first.ticket, Ok(MAIN.to_string()));

        let second = loader.dispatch("obioakpa").unwrap();
        let outcome = loader.complete(
            &mut store,
            &second.ticket,
            Err(LoadError::Network("offline".to_string())),
        );
        assert_eq!(
            outcome,
            LoadOutcome::Failed(LoadError::Network("offline".to_string()))
        );
        assert_eq!(names(&store), vec!["Library", "Hostel A"]);

        let third = loader.dispatch("obioakpa").unwrap();
        let outcome = loader.complete(&mut store, &third.ticket, Ok("{".to_string()));
        assert!(matches!(outcome, LoadOutcome::Failed(LoadError::Parse(_))));
        assert_eq!(store.selector().map(|s| s.as_str()), Some("main"));
    }

    #[test]
    fn bundled_datasets_parse_cleanly() {
        let assets = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../apps/viewer_web/assets/data");
        for file in ["locations.json", "locations_obioakpa.json"] {
            let parsed = load_file(assets.join(file)).expect("load dataset");
            assert!(!parsed.places.is_empty(), "{file} is empty");
            assert!(parsed.skipped.is_empty(), "{file}: {:?}", parsed.skipped);
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_file("/definitely/not/here.json"),
            Err(LoadError::Io(_))
        ));
    }
}
