use foundation::geo::LatLng;

/// Position of a place within the dataset it was loaded from.
///
/// Ids are only meaningful within one load; a dataset switch reassigns them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaceId(pub u32);

/// One point of interest on the campus map.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub category: String,
    pub position: LatLng,
    pub description: Option<String>,
    /// Image URL shown in the marker popup.
    pub image: Option<String>,
}

impl Place {
    pub fn new(
        id: PlaceId,
        name: impl Into<String>,
        category: impl Into<String>,
        position: LatLng,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            position,
            description: None,
            image: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}
