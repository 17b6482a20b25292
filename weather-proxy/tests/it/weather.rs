use crate::helper::*;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::time::{Duration, Instant};
use weather_proxy::{
    App,
    settings::Environment,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

#[tokio::test]
async fn test_paris_is_normalized() {
    let helper = TestHelper::spawn().await;

    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"main":{"temp":18.2,"humidity":60},"wind":{"speed":3.1},"weather":[{"description":"clear sky"}],"name":"Paris"}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&helper.upstream)
        .await;

    let response = helper.get("/api/weather/Paris").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({
            "temperature": 18.2,
            "humidity": 60,
            "windSpeed": 3.1,
            "weather": "clear sky",
            "location": "Paris"
        })
    );
}

#[tokio::test]
async fn test_upstream_numbers_are_echoed_unchanged() {
    let helper = TestHelper::spawn().await;

    Mock::given(method("GET"))
        .and(query_param("q", "Bergen"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"main":{"temp":18,"humidity":60.5},"wind":{"speed":3},"weather":[{"description":"mist"}],"name":"Bergen"}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&helper.upstream)
        .await;

    let response = helper.get("/api/weather/Bergen").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.text().await.unwrap(),
        r#"{"temperature":18,"humidity":60.5,"windSpeed":3,"weather":"mist","location":"Bergen"}"#
    );
}

#[tokio::test]
async fn test_extra_upstream_fields_are_dropped() {
    let helper = TestHelper::spawn().await;

    Mock::given(method("GET"))
        .and(query_param("q", "Oslo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(upstream_body("Oslo", -3.5, 87, 6.2, "light snow")),
        )
        .mount(&helper.upstream)
        .await;

    let response = helper.get("/api/weather/Oslo").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({
            "temperature": -3.5,
            "humidity": 87,
            "windSpeed": 6.2,
            "weather": "light snow",
            "location": "Oslo"
        })
    );
}

#[tokio::test]
async fn test_encoded_location_is_decoded_before_forwarding() {
    let helper = TestHelper::spawn().await;

    Mock::given(method("GET"))
        .and(query_param("q", "New York"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(upstream_body("New York", 22.0, 40, 5.0, "few clouds")),
        )
        .expect(1)
        .mount(&helper.upstream)
        .await;

    let response = helper.get("/api/weather/New%20York").await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_empty_location_queries_london() {
    let helper = TestHelper::spawn().await;

    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .and(query_param("q", "London,uk"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(upstream_body("London", 11.0, 81, 4.6, "light rain")),
        )
        .expect(2)
        .mount(&helper.upstream)
        .await;

    for route in ["/api/weather/", "/api/weather"] {
        let response = helper.get(route).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["location"], "London");
    }
}

#[tokio::test]
async fn test_upstream_error_status_is_not_leaked() {
    let helper = TestHelper::spawn().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string(format!(
            r#"{{"cod":401, "message": "Invalid API key {API_KEY}. Please see https://openweathermap.org/faq#error401"}}"#
        )))
        .mount(&helper.upstream)
        .await;

    let response = helper.get("/api/weather/Paris").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text().await.unwrap();
    assert!(!body.contains(API_KEY));
    assert!(!body.contains("Invalid API key"));
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), fetch_error());
}

#[tokio::test]
async fn test_any_non_success_status_is_a_500() {
    let helper = TestHelper::spawn().await;

    for (place, status) in [("Nowhere", 404), ("Busy", 429), ("Broken", 502), ("Moved", 301)] {
        Mock::given(method("GET"))
            .and(query_param("q", place))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream failure"))
            .mount(&helper.upstream)
            .await;

        let response = helper.get(&format!("/api/weather/{place}")).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{status}");
        assert_eq!(response.json::<Value>().await.unwrap(), fetch_error());
    }
}

#[tokio::test]
async fn test_missing_weather_entry_is_a_500() {
    let helper = TestHelper::spawn().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "main": {"temp": 18.2, "humidity": 60},
            "wind": {"speed": 3.1},
            "weather": [],
            "name": "Paris"
        })))
        .mount(&helper.upstream)
        .await;

    let response = helper.get("/api/weather/Paris").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>().await.unwrap(), fetch_error());
}

#[tokio::test]
async fn test_non_json_success_body_is_a_500() {
    let helper = TestHelper::spawn().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&helper.upstream)
        .await;

    let response = helper.get("/api/weather/Paris").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>().await.unwrap(), fetch_error());
}

#[tokio::test]
async fn test_upstream_timeout_is_a_500() {
    let helper = TestHelper::spawn_with_timeout(Duration::from_millis(300)).await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(upstream_body("Paris", 18.2, 60, 3.1, "clear sky"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&helper.upstream)
        .await;

    let started = Instant::now();
    let response = helper.get("/api/weather/Paris").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>().await.unwrap(), fetch_error());
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_unreachable_upstream_is_a_500() {
    let upstream = MockServer::start().await;
    let mut settings = test_settings(&upstream, Duration::from_secs(2));
    settings.upstream_url = "http://127.0.0.1:1/data/2.5/weather".into();
    drop(upstream);

    let app = App::build(&settings).await.unwrap();
    let address = format!("http://127.0.0.1:{}", app.port());
    tokio::spawn(async { app.run().await.unwrap() });

    let response = reqwest::get(format!("{address}/api/weather/Paris")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>().await.unwrap(), fetch_error());
}

#[tokio::test]
async fn test_cross_origin_requests_are_allowed() {
    let helper = TestHelper::spawn().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(upstream_body("Paris", 18.2, 60, 3.1, "clear sky")),
        )
        .mount(&helper.upstream)
        .await;

    let response = helper.get_with_origin("/api/weather/Paris", "http://localhost:5173").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn test_production_requires_api_key() {
    let upstream = MockServer::start().await;
    let mut settings = test_settings(&upstream, Duration::from_secs(5));
    settings.environment = Environment::Production;
    settings.api_key = None;

    let err = App::build(&settings).await.err().unwrap();

    assert!(err.to_string().contains("API_KEY"));
}

#[tokio::test]
async fn test_development_serves_without_api_key() {
    let upstream = MockServer::start().await;
    let mut settings = test_settings(&upstream, Duration::from_secs(5));
    settings.api_key = Some(String::new());

    Mock::given(method("GET"))
        .and(query_param("appid", ""))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = App::build(&settings).await.unwrap();
    let address = format!("http://127.0.0.1:{}", app.port());
    tokio::spawn(async { app.run().await.unwrap() });

    let response = reqwest::get(format!("{address}/api/weather/Paris")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>().await.unwrap(), fetch_error());
}
