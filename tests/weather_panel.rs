mod common;

use std::sync::Arc;

use common::{CURRENT_CLEAR, FakeWeather, day};
use wellnessCalendar::clients::weather_client::{OpenWeatherClient, WeatherEndpoint};
use wellnessCalendar::service::weather_service::{MISSING_KEY_MESSAGE, WeatherService};

fn service(fake: &Arc<FakeWeather>) -> WeatherService {
    WeatherService::new(Some(fake.clone()), "Martinsville,IN,US")
}

#[tokio::test]
async fn today_shows_current_conditions() {
    let fake = Arc::new(FakeWeather::ok(CURRENT_CLEAR, "{}"));
    let report = service(&fake).report_for("1/15/26", day(2026, 1, 15)).await;

    assert!(report.contains("72°F"), "{report}");
    assert!(report.contains("Clear sky"), "{report}");
    assert!(report.contains("(Today)"), "{report}");
    assert!(report.contains("Martinsville,IN,US"), "{report}");
    assert_eq!(*fake.endpoints.lock().unwrap(), vec![WeatherEndpoint::Current]);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let fake = Arc::new(FakeWeather::failing(401));
    let report = service(&fake).report_for("1/15/26", day(2026, 1, 15)).await;

    assert!(report.contains("Could not fetch weather"), "{report}");
    assert!(report.contains("401"), "{report}");
}

#[tokio::test]
async fn far_future_day_skips_the_network() {
    let fake = Arc::new(FakeWeather::ok(CURRENT_CLEAR, "{}"));
    let report = service(&fake).report_for("1/25/26", day(2026, 1, 15)).await;

    assert!(report.contains("Forecast only available"), "{report}");
    assert!(report.contains("10 days away"), "{report}");
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn past_day_skips_the_network() {
    let fake = Arc::new(FakeWeather::ok(CURRENT_CLEAR, "{}"));
    let report = service(&fake).report_for("1/14/26", day(2026, 1, 15)).await;

    assert!(report.contains("This date has passed"), "{report}");
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn forecast_uses_the_day_range_and_the_noon_entry() {
    let forecast = r#"{"list":[
        {"dt_txt":"2026-01-16 21:00:00","main":{"temp":40.0,"humidity":80},"weather":[{"description":"light rain"}]},
        {"dt_txt":"2026-01-17 09:00:00","main":{"temp":35.0,"humidity":70},"weather":[{"description":"mist"}]},
        {"dt_txt":"2026-01-17 12:00:00","main":{"temp":48.2,"feels_like":45.0,"humidity":55},"weather":[{"description":"scattered clouds"}],"wind":{"speed":7.3}},
        {"dt_txt":"2026-01-17 15:00:00","main":{"temp":51.0,"humidity":50},"weather":[{"description":"broken clouds"}]},
        {"dt_txt":"2026-01-18 12:00:00","main":{"temp":60.0,"humidity":50},"weather":[{"description":"overcast clouds"}]}
    ]}"#;
    let fake = Arc::new(FakeWeather::ok("{}", forecast));
    let report = service(&fake).report_for("1/17/26", day(2026, 1, 15)).await;

    assert!(report.contains("High: 51°F / Low: 35°F"), "{report}");
    assert!(report.contains("Around noon: 48°F (feels like 45°F)"), "{report}");
    assert!(report.contains("Scattered clouds"), "{report}");
    assert!(report.contains("(2 days from now)"), "{report}");
    assert_eq!(*fake.endpoints.lock().unwrap(), vec![WeatherEndpoint::Forecast]);
}

#[tokio::test]
async fn forecast_without_entries_for_the_day() {
    let fake = Arc::new(FakeWeather::ok("{}", r#"{"list":[]}"#));
    let report = service(&fake).report_for("1/16/26", day(2026, 1, 15)).await;

    assert!(report.contains("No forecast available"), "{report}");
}

#[tokio::test]
async fn malformed_body_becomes_an_error_message() {
    let fake = Arc::new(FakeWeather::ok("not json", "{}"));
    let report = service(&fake).report_for("1/15/26", day(2026, 1, 15)).await;

    assert!(report.starts_with("Error:"), "{report}");
}

#[tokio::test]
async fn missing_key_is_explained() {
    let service = WeatherService::new(None, "Martinsville,IN,US");
    let report = service.report_for("1/15/26", day(2026, 1, 15)).await;

    assert_eq!(report, MISSING_KEY_MESSAGE);
}

#[tokio::test]
async fn tomorrow_is_one_day_from_now() {
    let forecast = r#"{"list":[
        {"dt_txt":"2026-01-16 12:00:00","main":{"temp":41.0,"humidity":60},"weather":[{"description":"light snow"}]}
    ]}"#;
    let fake = Arc::new(FakeWeather::ok("{}", forecast));
    let report = service(&fake).report_for("1/16/26", day(2026, 1, 15)).await;

    assert!(report.contains("(1 day from now)"), "{report}");
    assert!(report.contains("High: 41°F / Low: 41°F"), "{report}");
    assert!(report.contains("Light snow"), "{report}");
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let client = OpenWeatherClient::new("http://127.0.0.1:1", "Martinsville,IN,US", "key").unwrap();
    let service = WeatherService::new(Some(Arc::new(client)), "Martinsville,IN,US");
    let report = service.report_for("1/15/26", day(2026, 1, 15)).await;

    assert!(report.starts_with("Network error:\n"), "{report}");
}
