//! Tests for the country lookup tools against a mocked REST endpoint.

use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cicerone::tools::country::{
    get_capital_tool, get_language_tool, get_population_tool, CountryApi,
};
use cicerone::tools::ToolArguments;

fn pakistan_record() -> serde_json::Value {
    serde_json::json!([{
        "name": { "common": "Pakistan" },
        "capital": ["Islamabad"],
        "languages": { "eng": "English", "urd": "Urdu" },
        "population": 220892340u64,
    }])
}

async fn mock_api(server: &MockServer) -> CountryApi {
    CountryApi::new().with_base_url(server.uri())
}

fn args(country: &str) -> ToolArguments {
    ToolArguments::new(serde_json::json!({ "country": country }))
}

#[tokio::test]
async fn capital_is_formatted_as_sentence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/name/pakistan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pakistan_record()))
        .mount(&server)
        .await;

    let tool = get_capital_tool(&mock_api(&server).await);
    let result = tool.execute(&args("pakistan")).await.unwrap();

    assert_eq!(result, serde_json::json!("The capital of Pakistan is Islamabad."));
}

#[tokio::test]
async fn languages_are_joined_with_commas() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/name/pakistan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pakistan_record()))
        .mount(&server)
        .await;

    let tool = get_language_tool(&mock_api(&server).await);
    let result = tool.execute(&args("pakistan")).await.unwrap();

    assert_eq!(
        result,
        serde_json::json!("The main language(s) of Pakistan are: English, Urdu.")
    );
}

#[tokio::test]
async fn population_uses_thousands_separators() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/name/pakistan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pakistan_record()))
        .mount(&server)
        .await;

    let tool = get_population_tool(&mock_api(&server).await);
    let result = tool.execute(&args("pakistan")).await.unwrap();

    assert_eq!(
        result,
        serde_json::json!("The population of Pakistan is approximately 220,892,340.")
    );
}

#[tokio::test]
async fn multi_word_country_names_are_path_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/name/new%20zealand"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "capital": ["Wellington"],
        }])))
        .mount(&server)
        .await;

    let tool = get_capital_tool(&mock_api(&server).await);
    let result = tool.execute(&args("new zealand")).await.unwrap();

    assert_eq!(
        result,
        serde_json::json!("The capital of New Zealand is Wellington.")
    );
}

#[tokio::test]
async fn not_found_becomes_marker_text_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let tool = get_capital_tool(&mock_api(&server).await);
    let result = tool.execute(&args("atlantis")).await.unwrap();

    let text = result.as_str().unwrap();
    assert!(text.starts_with("❌ Could not fetch capital:"), "got: {text}");
}

#[tokio::test]
async fn empty_result_array_becomes_marker_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let tool = get_language_tool(&mock_api(&server).await);
    let result = tool.execute(&args("nowhere")).await.unwrap();

    let text = result.as_str().unwrap();
    assert!(text.starts_with("❌ Could not fetch language:"), "got: {text}");
}

#[tokio::test]
async fn missing_field_becomes_marker_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "name": { "common": "Testland" }
        }])))
        .mount(&server)
        .await;

    let tool = get_population_tool(&mock_api(&server).await);
    let result = tool.execute(&args("testland")).await.unwrap();

    let text = result.as_str().unwrap();
    assert!(
        text.starts_with("❌ Could not fetch population:"),
        "got: {text}"
    );
}

#[tokio::test]
async fn slow_lookup_times_out_into_marker_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(pakistan_record())
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let api = CountryApi::new()
        .with_base_url(server.uri())
        .with_timeout(std::time::Duration::from_millis(50));
    let tool = get_capital_tool(&api);
    let result = tool.execute(&args("pakistan")).await.unwrap();

    let text = result.as_str().unwrap();
    assert!(text.starts_with("❌ Could not fetch capital:"), "got: {text}");
}

#[tokio::test]
async fn missing_country_argument_is_an_invalid_argument_error() {
    let server = MockServer::start().await;
    let tool = get_capital_tool(&mock_api(&server).await);

    let result = tool.execute(&ToolArguments::new(serde_json::json!({}))).await;

    assert!(matches!(
        result,
        Err(cicerone::error::CiceroneError::InvalidArgument(_))
    ));
}
