use anyhow::Result;
use coffee_filter::core::Geocoder;
use coffee_filter::{NominatimGeocoder, PhotonAutocomplete};
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_geocode_returns_first_result() -> Result<()> {
    let server = MockServer::start_async().await;
    let search_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("q", "1624 Grand Blvd, Kansas City")
                .query_param("format", "json")
                .query_param("limit", "1")
                .header("user-agent", "CoffeeFilter/1.0");
            then.status(200).json_body(json!([
                {"lat": "39.0935", "lon": "-94.5826", "display_name": "Grand Blvd"},
                {"lat": "0", "lon": "0", "display_name": "elsewhere"}
            ]));
        })
        .await;

    let geocoder = NominatimGeocoder::new(server.base_url());
    let coordinates = geocoder
        .geocode("1624 Grand Blvd, Kansas City")
        .await?
        .expect("coordinates");

    search_mock.assert_async().await;
    assert_eq!(coordinates.latitude, 39.0935);
    assert_eq!(coordinates.longitude, -94.5826);
    Ok(())
}

#[tokio::test]
async fn test_geocode_without_match_is_none() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search").query_param("q", "nowhere");
            then.status(200).json_body(json!([]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search").query_param("q", "busy");
            then.status(503);
        })
        .await;

    let geocoder = NominatimGeocoder::new(server.base_url());
    assert_eq!(geocoder.geocode("nowhere").await?, None);
    assert_eq!(geocoder.geocode("busy").await?, None);
    Ok(())
}

#[tokio::test]
async fn test_suggestions_swap_geojson_coordinates() -> Result<()> {
    let server = MockServer::start_async().await;
    let photon_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/")
                .query_param("q", "1624 McGee")
                .query_param("limit", "5");
            then.status(200).json_body(json!({
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [-94.5826, 39.0935]},
                        "properties": {
                            "housenumber": "1624",
                            "street": "McGee Street",
                            "city": "Kansas City",
                            "state": "Missouri",
                            "postcode": "64108"
                        }
                    },
                    {
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [-94.6, 39.1]},
                        "properties": {"name": "McGee Plaza"}
                    }
                ]
            }));
        })
        .await;

    let autocomplete = PhotonAutocomplete::new(server.base_url());
    let candidates = autocomplete.suggest("1624 McGee").await?;

    photon_mock.assert_async().await;
    assert_eq!(candidates.len(), 2);
    assert_eq!(
        candidates[0].label,
        "1624 McGee Street, Kansas City, Missouri, 64108"
    );
    assert_eq!(candidates[0].coordinates.latitude, 39.0935);
    assert_eq!(candidates[0].coordinates.longitude, -94.5826);
    assert_eq!(candidates[1].label, "McGee Plaza");
    Ok(())
}

#[tokio::test]
async fn test_short_query_makes_no_request() -> Result<()> {
    let server = MockServer::start_async().await;
    let photon_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/");
            then.status(200).json_body(json!({"features": []}));
        })
        .await;

    let autocomplete = PhotonAutocomplete::new(server.base_url());
    assert!(autocomplete.suggest("KC").await?.is_empty());
    assert_eq!(photon_mock.hits_async().await, 0);
    Ok(())
}
