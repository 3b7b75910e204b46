use super::common::ScriptedMapProvider;
use crate::workflows::dispatch::domain::Coordinates;
use crate::workflows::dispatch::geo::MapProvider;

fn provider() -> Box<dyn MapProvider> {
    Box::new(ScriptedMapProvider::with_known_places())
}

#[test]
fn reverse_geocode_returns_display_fields_for_known_positions() {
    let provider = provider();
    let place = provider
        .reverse_geocode(Coordinates {
            latitude: 12.9716,
            longitude: 77.5946,
        })
        .expect("provider reachable")
        .expect("position known");

    assert_eq!(place.address.as_deref(), Some("Majestic, Bengaluru"));
    assert!(place.position.is_some());
}

#[test]
fn reverse_geocode_of_an_unknown_position_is_not_an_error() {
    let provider = provider();
    let place = provider
        .reverse_geocode(Coordinates {
            latitude: 0.0,
            longitude: 0.0,
        })
        .expect("provider reachable");

    assert!(place.is_none());
}

#[test]
fn search_filters_the_provider_index() {
    let provider = provider();
    let results = provider.search("mysuru").expect("provider reachable");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].address.as_deref(), Some("Mysuru Palace Road"));
}

#[test]
fn markers_attach_to_a_created_map() {
    let provider = provider();
    let center = Coordinates {
        latitude: 12.9716,
        longitude: 77.5946,
    };

    let map = provider.create_map(center).expect("map created");
    let marker = provider
        .place_marker(&map, center)
        .expect("marker placed");

    assert!(marker.0.starts_with(&map.0));
}
