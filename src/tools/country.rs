//! Country lookup tools backed by the REST Countries API.
//!
//! Provides three tools (`get_capital`, `get_language`, `get_population`)
//! that fetch live data for a country name and format a natural-language
//! sentence. Lookup failures are folded into the tool's text output with a
//! `❌` marker instead of failing the turn, so the model (and ultimately
//! the user) sees them as ordinary results.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::error::CiceroneError;
use crate::provider::http::{client_with_timeout, shared_client, status_to_error};
use crate::tools::tool::{FunctionTool, Tool};
use crate::tools::types::ToolParameters;

/// Default REST Countries endpoint.
pub const DEFAULT_API_BASE: &str = "https://restcountries.com/v3.1";

/// Client for the REST Countries API.
///
/// Every lookup is a fresh round trip; there is no caching. The shared
/// HTTP client supplies the uniform request timeout.
#[derive(Debug, Clone)]
pub struct CountryApi {
    base_url: String,
    client: reqwest::Client,
}

impl Default for CountryApi {
    fn default() -> Self {
        Self::new()
    }
}

impl CountryApi {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            client: shared_client().clone(),
        }
    }

    /// Point lookups at a different endpoint (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the HTTP client with one using the given request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = client_with_timeout(timeout);
        self
    }

    /// Fetch the first record for a country name.
    ///
    /// The name is pushed as a single path segment, so spaces and
    /// non-ASCII characters are percent-encoded rather than sent raw.
    async fn fetch(&self, country: &str) -> Result<serde_json::Value, CiceroneError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| CiceroneError::Configuration(format!("bad country API base: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| {
                CiceroneError::Configuration("country API base cannot hold path segments".into())
            })?
            .push("name")
            .push(country);

        let resp = self.client.get(url).send().await?;
        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body));
        }

        let data: serde_json::Value = resp.json().await?;
        data.get(0)
            .cloned()
            .ok_or_else(|| lookup_error("no country matched the given name"))
    }

    /// Capital sentence: `The capital of Pakistan is Islamabad.`
    pub async fn capital(&self, country: &str) -> Result<String, CiceroneError> {
        let record = self.fetch(country).await?;
        let capital = record["capital"][0]
            .as_str()
            .ok_or_else(|| lookup_error("missing capital in response"))?
            .to_string();
        Ok(format!(
            "The capital of {} is {capital}.",
            title_case(country)
        ))
    }

    /// Languages sentence: `The main language(s) of Canada are: English, French.`
    pub async fn languages(&self, country: &str) -> Result<String, CiceroneError> {
        let record = self.fetch(country).await?;
        let languages = record["languages"]
            .as_object()
            .ok_or_else(|| lookup_error("missing languages in response"))?
            .values()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if languages.is_empty() {
            return Err(lookup_error("missing languages in response"));
        }
        Ok(format!(
            "The main language(s) of {} are: {languages}.",
            title_case(country)
        ))
    }

    /// Population sentence: `The population of Pakistan is approximately 220,892,340.`
    pub async fn population(&self, country: &str) -> Result<String, CiceroneError> {
        let record = self.fetch(country).await?;
        let population = record["population"]
            .as_u64()
            .ok_or_else(|| lookup_error("missing population in response"))?;
        Ok(format!(
            "The population of {} is approximately {}.",
            title_case(country),
            format_thousands(population)
        ))
    }
}

fn lookup_error(message: impl Into<String>) -> CiceroneError {
    CiceroneError::ToolExecution {
        tool_name: "restcountries".into(),
        message: message.into(),
    }
}

/// Fold a lookup failure into user-visible tool output.
///
/// One marker format for every country tool; the failure is a normal tool
/// result, never a turn fault.
fn failure_text(kind: &str, err: &CiceroneError) -> String {
    format!("❌ Could not fetch {kind}: {err}")
}

/// Title-case each whitespace-separated word.
pub(crate) fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Group digits with commas: 220892340 → "220,892,340".
pub(crate) fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn country_parameters() -> ToolParameters {
    ToolParameters::object()
        .string("country", "The country name to look up", true)
        .build()
}

/// Create the `get_capital` tool.
pub fn get_capital_tool(api: &CountryApi) -> Arc<dyn Tool> {
    let api = api.clone();
    Arc::new(FunctionTool::new(
        "get_capital",
        "Returns the capital of the given country",
        country_parameters(),
        move |args| {
            let api = api.clone();
            async move {
                let country = args.get_str("country")?.to_string();
                let text = match api.capital(&country).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(%country, error = %e, "capital lookup failed");
                        failure_text("capital", &e)
                    }
                };
                Ok(serde_json::Value::String(text))
            }
        },
    ))
}

/// Create the `get_language` tool.
pub fn get_language_tool(api: &CountryApi) -> Arc<dyn Tool> {
    let api = api.clone();
    Arc::new(FunctionTool::new(
        "get_language",
        "Returns the main language(s) of the given country",
        country_parameters(),
        move |args| {
            let api = api.clone();
            async move {
                let country = args.get_str("country")?.to_string();
                let text = match api.languages(&country).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(%country, error = %e, "language lookup failed");
                        failure_text("language", &e)
                    }
                };
                Ok(serde_json::Value::String(text))
            }
        },
    ))
}

/// Create the `get_population` tool.
pub fn get_population_tool(api: &CountryApi) -> Arc<dyn Tool> {
    let api = api.clone();
    Arc::new(FunctionTool::new(
        "get_population",
        "Returns the population of the given country",
        country_parameters(),
        move |args| {
            let api = api.clone();
            async move {
                let country = args.get_str("country")?.to_string();
                let text = match api.population(&country).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(%country, error = %e, "population lookup failed");
                        failure_text("population", &e)
                    }
                };
                Ok(serde_json::Value::String(text))
            }
        },
    ))
}

/// All three country tools for one API endpoint.
pub fn all_country_tools(api: &CountryApi) -> Vec<Arc<dyn Tool>> {
    vec![
        get_capital_tool(api),
        get_language_tool(api),
        get_population_tool(api),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(220_892_340), "220,892,340");
    }

    #[test]
    fn title_case_handles_multiword_names() {
        assert_eq!(title_case("pakistan"), "Pakistan");
        assert_eq!(title_case("new zealand"), "New Zealand");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn all_country_tools_have_expected_names() {
        let tools = all_country_tools(&CountryApi::new());
        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["get_capital", "get_language", "get_population"]);
    }
}
