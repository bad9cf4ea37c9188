/// Why a geolocation request produced no position.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeoError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    /// The environment has no geolocation service at all.
    Unsupported,
}

impl GeoError {
    /// Maps a W3C `GeolocationPositionError.code`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeoError::PermissionDenied,
            3 => GeoError::Timeout,
            _ => GeoError::PositionUnavailable,
        }
    }

    /// Message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            GeoError::Unsupported => "Geolocation not supported by your browser.",
            _ => "Unable to get your location.",
        }
    }
}

impl std::fmt::Display for GeoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoError::PermissionDenied => write!(f, "geolocation permission denied"),
            GeoError::PositionUnavailable => write!(f, "position unavailable"),
            GeoError::Timeout => write!(f, "geolocation timed out"),
            GeoError::Unsupported => write!(f, "geolocation unsupported"),
        }
    }
}

impl std::error::Error for GeoError {}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LocateState {
    #[default]
    Idle,
    Locating,
}

/// Idle → Locating → Idle, one request at a time.
#[derive(Debug, Default)]
pub struct Locator {
    state: LocateState,
}

impl Locator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LocateState {
        self.state
    }

    /// Enters `Locating`. Returns `false` if a request is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.state == LocateState::Locating {
            return false;
        }
        self.state = LocateState::Locating;
        true
    }

    /// Returns to `Idle`. Returns `false` if no request was in flight.
    pub fn finish(&mut self) -> bool {
        std::mem::take(&mut self.state) == LocateState::Locating
    }
}
