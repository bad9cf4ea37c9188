use places::Place;

/// Control value that selects every category.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parses a category control value; `"all"` and `""` select everything.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_CATEGORIES) {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

/// The two independent filter controls of the sidebar.
///
/// Each setter only touches its own field, so changing the category keeps the
/// last search term and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceQuery {
    category: CategoryFilter,
    /// Lowercased; surrounding whitespace is part of the term.
    search: String,
}

impl PlaceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_lowercase();
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_unfiltered(&self) -> bool {
        self.category == CategoryFilter::All && self.search.is_empty()
    }
}

fn category_allows(filter: &CategoryFilter, place: &Place) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Only(category) => place.category == *category,
    }
}

fn search_allows(needle: &str, place: &Place) -> bool {
    if needle.is_empty() {
        return true;
    }
    if place.name.to_lowercase().contains(needle) {
        return true;
    }
    place
        .description
        .as_ref()
        .is_some_and(|d| d.to_lowercase().contains(needle))
}

/// Places passing both filters, in dataset order.
///
/// The result is a subsequence of `places`; an empty vector is the
/// "no results" state.
pub fn visible<'a>(places: &'a [Place], query: &PlaceQuery) -> Vec<&'a Place> {
    places
        .iter()
        .filter(|p| category_allows(&query.category, p))
        .filter(|p| search_allows(&query.search, p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{CategoryFilter, PlaceQuery, visible};
    use foundation::geo::LatLng;
    use places::{Place, PlaceId};
    use pretty_assertions::assert_eq;

    fn campus() -> Vec<Place> {
        vec![
            Place::new(PlaceId(0), "Library", "academic", LatLng::new(4.97, 7.76)),
            Place::new(PlaceId(1), "Hostel A", "hostel", LatLng::new(4.971, 7.757)),
            Place::new(PlaceId(2), "Health Centre", "facility", LatLng::new(4.969, 7.76))
                .with_description("Clinic near the library road"),
            Place::new(PlaceId(3), "Engineering", "academic", LatLng::new(4.972, 7.758)),
        ]
    }

    fn names(places: &[&Place]) -> Vec<String> {
        places.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn unfiltered_query_keeps_everything_in_order() {
        let places = campus();
        let query = PlaceQuery::new();
        assert!(query.is_unfiltered());
        assert_eq!(
            names(&visible(&places, &query)),
            vec!["Library", "Hostel A", "Health Centre", "Engineering"]
        );
    }

    #[test]
    fn category_is_exact_match() {
        let places = campus();
        let mut query = PlaceQuery::new();
        query.set_category(CategoryFilter::parse("academic"));
        assert_eq!(names(&visible(&places, &query)), vec!["Library", "Engineering"]);

        query.set_category(CategoryFilter::parse("Academic"));
        assert!(visible(&places, &query).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_description() {
        let places = campus();
        let mut query = PlaceQuery::new();
        query.set_search("LIB");
        assert_eq!(query.search(), "lib");
        assert_eq!(names(&visible(&places, &query)), vec!["Library", "Health Centre"]);
    }

    #[test]
    fn whitespace_is_matched_literally() {
        let places = campus();
        let mut query = PlaceQuery::new();
        query.set_search(" ");
        assert!(!query.is_unfiltered());
        assert_eq!(names(&visible(&places, &query)), vec!["Hostel A", "Health Centre"]);

        query.set_search(" lib");
        assert_eq!(names(&visible(&places, &query)), vec!["Health Centre"]);
    }

    #[test]
    fn filters_compose_and_survive_each_other() {
        let places = campus();
        let mut query = PlaceQuery::new();
        query.set_search("lib");
        query.set_category(CategoryFilter::parse("academic"));
        assert_eq!(names(&visible(&places, &query)), vec!["Library"]);

        // Changing the category keeps the search term.
        query.set_category(CategoryFilter::parse("facility"));
        assert_eq!(query.search(), "lib");
        assert_eq!(names(&visible(&places, &query)), vec!["Health Centre"]);

        // Clearing the search keeps the category.
        query.set_search("");
        assert_eq!(query.category(), &CategoryFilter::Only("facility".to_string()));
        assert_eq!(names(&visible(&places, &query)), vec!["Health Centre"]);
    }

    #[test]
    fn no_match_is_an_empty_vec() {
        let places = campus();
        let mut query = PlaceQuery::new();
        query.set_search("observatory");
        assert!(visible(&places, &query).is_empty());
        assert!(visible(&[], &PlaceQuery::new()).is_empty());
    }

    #[test]
    fn result_is_an_ordered_subsequence() {
        let places = campus();
        for category in ["all", "academic", "hostel", "facility", "lecture"] {
            for term in ["", "a", "e", "lib", "zzz"] {
                let mut query = PlaceQuery::new();
                query.set_category(CategoryFilter::parse(category));
                query.set_search(term);
                let ids: Vec<u32> = visible(&places, &query).iter().map(|p| p.id.0).collect();
                assert!(ids.windows(2).all(|w| w[0] < w[1]), "{category}/{term}: {ids:?}");
            }
        }
    }

    #[test]
    fn parse_all_sentinel() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("hostel"),
            CategoryFilter::Only("hostel".to_string())
        );
    }
}
