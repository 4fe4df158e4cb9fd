use anyhow::Result;
use coffee_filter::domain::model::{Coordinates, PLACEHOLDER_IMAGE};
use coffee_filter::{
    CoffeeFilterClient, CoffeeFilterError, CoffeeShopUpdate, Day, DayHours, MemoryTokenStore,
    NewCoffeeShop, WeeklySchedule,
};
use httpmock::prelude::*;
use serde_json::json;

fn shop_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "address": "1624 Grand Blvd, Kansas City, MO",
        "latitude": 39.0935,
        "longitude": -94.5826,
        "image": "https://images.example.com/shop.jpg",
        "accessibility": true,
        "has_wifi": true,
        "description": "Roastery and cafe",
        "machine": "La Marzocco Linea PB",
        "weekly_hours": {
            "monday": {"open": "7am", "close": "6pm"},
            "saturday": {"open": "8:00", "close": "14:00"}
        },
        "pour_over": false,
        "website": "example.com",
        "instagram": null,
        "starred": true
    })
}

#[tokio::test]
async fn test_list_shops_parses_backend_payload() -> Result<()> {
    let server = MockServer::start_async().await;
    let mut second = shop_json(2, "Corner Cup");
    second["image"] = json!(null);
    second["weekly_hours"] = json!(null);
    second.as_object_mut().unwrap().remove("starred");

    let list_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/coffee-shops");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([shop_json(1, "Messenger"), second]));
        })
        .await;

    let client = CoffeeFilterClient::new(server.url("/api/v1"), MemoryTokenStore::new());
    let shops = client.list_shops().await?;

    list_mock.assert_async().await;
    assert_eq!(shops.len(), 2);

    let first = &shops[0];
    assert_eq!(first.id, 1);
    assert_eq!(first.name, "Messenger");
    assert!(first.has_wifi);
    assert!(first.starred);
    assert_eq!(first.website.as_deref(), Some("example.com"));
    assert_eq!(first.instagram, None);
    assert_eq!(
        first.weekly_hours.get(Day::Saturday),
        Some(&DayHours::new("8:00", "14:00"))
    );

    let second = &shops[1];
    assert_eq!(second.image, PLACEHOLDER_IMAGE);
    assert!(second.weekly_hours.is_empty());
    assert!(!second.starred);
    Ok(())
}

#[tokio::test]
async fn test_get_shop_surfaces_server_detail() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/coffee-shops/42");
            then.status(404)
                .json_body(json!({"detail": "Coffee shop not found"}));
        })
        .await;

    let client = CoffeeFilterClient::new(server.base_url(), MemoryTokenStore::new());
    let err = client.get_shop(42).await.unwrap_err();

    mock.assert_async().await;
    match err {
        CoffeeFilterError::ApiError { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Coffee shop not found");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_failure_without_detail_uses_status_text() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/coffee-shops");
            then.status(500).body("boom");
        })
        .await;

    let client = CoffeeFilterClient::new(server.base_url(), MemoryTokenStore::new());
    let err = client.list_shops().await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to fetch coffee shops: Internal Server Error"
    );
    Ok(())
}

#[tokio::test]
async fn test_create_shop_sends_bearer_and_omits_coordinates() -> Result<()> {
    let server = MockServer::start_async().await;
    let mut shop = NewCoffeeShop::new("Oddly Correct", "3940 Main St, Kansas City, MO");
    shop.has_wifi = true;
    shop.weekly_hours =
        WeeklySchedule::new().with_day(Day::Tuesday, DayHours::new("7am", "3pm"));

    let create_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/coffee-shops")
                .header("Authorization", "Bearer admin-token")
                .json_body(json!({
                    "name": "Oddly Correct",
                    "address": "3940 Main St, Kansas City, MO",
                    "image": PLACEHOLDER_IMAGE,
                    "accessibility": false,
                    "has_wifi": true,
                    "description": "",
                    "machine": "",
                    "weekly_hours": {"tuesday": {"open": "7am", "close": "3pm"}},
                    "pour_over": false
                }));
            then.status(201).json_body(shop_json(7, "Oddly Correct"));
        })
        .await;

    let client = CoffeeFilterClient::new(
        server.base_url(),
        MemoryTokenStore::with_token("admin-token"),
    );
    let created = client.create_shop(&shop).await?;

    create_mock.assert_async().await;
    assert_eq!(created.id, 7);
    Ok(())
}

#[tokio::test]
async fn test_create_shop_error_carries_detail() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/coffee-shops");
            then.status(400).json_body(json!({
                "detail": "Could not geocode address: nowhere. Please provide latitude and longitude manually."
            }));
        })
        .await;

    let client = CoffeeFilterClient::new(server.base_url(), MemoryTokenStore::with_token("t"));
    let err = client
        .create_shop(&NewCoffeeShop::new("Ghost", "nowhere"))
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("Could not geocode address: nowhere"));
    assert_eq!(err.exit_code(), 2);
    Ok(())
}

#[tokio::test]
async fn test_update_sends_only_changed_fields() -> Result<()> {
    let server = MockServer::start_async().await;
    let update_mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/coffee-shops/3")
                .header("Authorization", "Bearer t")
                .json_body(json!({
                    "starred": true,
                    "weekly_hours": {"sunday": {"open": "9am", "close": "1pm"}}
                }));
            then.status(200).json_body(shop_json(3, "Thou Mayest"));
        })
        .await;

    let update = CoffeeShopUpdate {
        starred: Some(true),
        weekly_hours: Some(WeeklySchedule::new().with_day(Day::Sunday, DayHours::new("9am", "1pm"))),
        ..Default::default()
    };

    let client = CoffeeFilterClient::new(server.base_url(), MemoryTokenStore::with_token("t"));
    let updated = client.update_shop(3, &update).await?;

    update_mock.assert_async().await;
    assert_eq!(updated.name, "Thou Mayest");
    Ok(())
}

#[tokio::test]
async fn test_delete_requires_matching_token() -> Result<()> {
    let server = MockServer::start_async().await;
    let delete_mock = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/coffee-shops/5")
                .header("Authorization", "Bearer admin-token");
            then.status(204);
        })
        .await;

    let signed_in = CoffeeFilterClient::new(
        server.base_url(),
        MemoryTokenStore::with_token("admin-token"),
    );
    signed_in.delete_shop(5).await?;
    delete_mock.assert_async().await;

    // Without a token the request carries no Authorization header and matches nothing.
    let anonymous = CoffeeFilterClient::new(server.base_url(), MemoryTokenStore::new());
    assert!(anonymous.delete_shop(5).await.is_err());
    assert_eq!(delete_mock.hits_async().await, 1);
    Ok(())
}

#[tokio::test]
async fn test_search_by_location_passes_query() -> Result<()> {
    let server = MockServer::start_async().await;
    let search_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/coffee-shops/search/by-location")
                .query_param("latitude", "39.1")
                .query_param("longitude", "-94.58")
                .query_param_exists("radius");
            then.status(200).json_body(json!([shop_json(1, "Messenger")]));
        })
        .await;

    let client = CoffeeFilterClient::new(server.base_url(), MemoryTokenStore::new());
    let shops = client
        .search_by_location(
            Coordinates {
                latitude: 39.1,
                longitude: -94.58,
            },
            5.0,
        )
        .await?;

    search_mock.assert_async().await;
    assert_eq!(shops.len(), 1);
    Ok(())
}
