use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees (WGS84).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a coordinate only if it lies on the globe.
    pub fn checked(lat: f64, lng: f64) -> Option<Self> {
        let p = Self::new(lat, lng);
        p.is_valid().then_some(p)
    }

    /// Finite, latitude in [-90, 90] and longitude in [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::LatLng;

    #[test]
    fn checked_rejects_out_of_range_and_nan() {
        assert!(LatLng::checked(4.97, 7.76).is_some());
        assert!(LatLng::checked(91.0, 0.0).is_none());
        assert!(LatLng::checked(0.0, -180.5).is_none());
        assert!(LatLng::checked(f64::NAN, 0.0).is_none());
        assert!(LatLng::checked(0.0, f64::INFINITY).is_none());
    }

    #[test]
    fn display_is_comma_separated() {
        assert_eq!(LatLng::new(4.97, 7.76).to_string(), "4.97,7.76");
    }

    #[test]
    fn serde_uses_named_fields() {
        let p: LatLng = serde_json::from_str(r#"{"lat":4.970411,"lng":7.756878}"#).unwrap();
        assert_eq!(p, LatLng::new(4.970411, 7.756878));
    }
}
