//! `google_search` tool: Google results through the SerpAPI search endpoint.
//!
//! # Parameters
//!
//! | Name | Type | Required | Description |
//! |------|------|:---:|-------------|
//! | `query` | string | Yes | The search query |
//! | `num_results` | integer | No | Results to return, 1-10 (default 5) |
//!
//! # Errors
//!
//! | Condition | Error |
//! |-----------|-------|
//! | HTTP 401, or body `error` mentioning "Invalid API key" | `Authentication` |
//! | HTTP 429 | `RateLimited` |
//! | Any other HTTP error, body `error`, transport or parse failure | `Execution` |

use super::super::ConfigurationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use toolkit_domain::tool::schema::{
    FieldSpec, FieldType, InputSchema, OutputSchema, ParamSpec, ParamType,
};
use toolkit_domain::{Tool, ToolError};
use tracing::debug;

/// Canonical tool name.
pub const GOOGLE_SEARCH: &str = "google_search";

/// SerpAPI search endpoint.
pub const SERPAPI_ENDPOINT: &str = "https://serpapi.com/search";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleSearchInput {
    pub query: String,
    pub num_results: usize,
}

/// A single search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    /// 1-indexed rank within the returned results
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoogleSearchOutput {
    pub results: Vec<SearchResult>,
    pub total_results: u64,
}

/// Search Google and return the top organic results.
#[derive(Debug, Clone)]
pub struct GoogleSearchTool {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GoogleSearchTool {
    /// Fails if `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigurationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigurationError::MissingApiKey {
                var: "SERPAPI_API_KEY".to_string(),
                hint: "https://serpapi.com/".to_string(),
            });
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ConfigurationError::HttpClient(e.to_string()))?;
        Ok(Self {
            client,
            api_key,
            endpoint: SERPAPI_ENDPOINT.to_string(),
        })
    }

    /// Read the API key from the environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self, ConfigurationError> {
        let key = std::env::var(var).unwrap_or_default();
        Self::new(key).map_err(|e| match e {
            ConfigurationError::MissingApiKey { hint, .. } => ConfigurationError::MissingApiKey {
                var: var.to_string(),
                hint,
            },
            other => other,
        })
    }

    /// Override the search endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Tool for GoogleSearchTool {
    type Input = GoogleSearchInput;
    type Output = GoogleSearchOutput;

    fn name(&self) -> &str {
        GOOGLE_SEARCH
    }

    fn description(&self) -> &str {
        "Search Google for information. Returns the top search results with titles, URLs, \
         and snippets. Use this when you need to find current information, research topics, \
         or look up facts online."
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .with_param(
                ParamSpec::new("query", "The search query to execute", ParamType::String)
                    .required(),
            )
            .with_param(
                ParamSpec::new(
                    "num_results",
                    "Number of results to return (1-10)",
                    ParamType::Integer,
                )
                .with_default(5)
                .with_range(1.0, 10.0),
            )
    }

    fn output_schema(&self) -> OutputSchema {
        OutputSchema::new()
            .with_field(FieldSpec::new(
                "results",
                "List of search results",
                FieldType::array_of(FieldType::Object(vec![
                    FieldSpec::new("title", "Title of the search result", FieldType::String),
                    FieldSpec::new("url", "URL of the search result", FieldType::String),
                    FieldSpec::new(
                        "snippet",
                        "Brief description/snippet from the result",
                        FieldType::String,
                    ),
                    FieldSpec::new(
                        "position",
                        "Position in search results (1-indexed)",
                        FieldType::Integer,
                    ),
                ])),
            ))
            .with_field(FieldSpec::new(
                "total_results",
                "Approximate total number of results found",
                FieldType::Integer,
            ))
    }

    async fn execute(&self, input: GoogleSearchInput) -> Result<GoogleSearchOutput, ToolError> {
        debug!("google_search: query={:?} num={}", input.query, input.num_results);

        let num = input.num_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", input.query.as_str()),
                ("num", num.as_str()),
                ("api_key", self.api_key.as_str()),
                ("engine", "google"),
            ])
            .send()
            .await
            .map_err(|e| ToolError::execution(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(status.as_u16(), status.canonical_reason()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ToolError::execution(format!("Failed to parse response: {}", e)))?;

        parse_search_response(&body, input.num_results)
    }
}

/// Map a non-success HTTP status to a tool error.
pub(crate) fn error_for_status(status: u16, reason: Option<&str>) -> ToolError {
    match status {
        429 => ToolError::rate_limited("SerpAPI rate limit exceeded").with_status(status),
        401 => ToolError::authentication("Invalid SerpAPI key").with_status(status),
        _ => ToolError::execution(format!(
            "HTTP error: {} {}",
            status,
            reason.unwrap_or("Unknown")
        ))
        .with_status(status),
    }
}

/// Turn a SerpAPI response body into the tool output.
pub(crate) fn parse_search_response(
    body: &Value,
    num_results: usize,
) -> Result<GoogleSearchOutput, ToolError> {
    if let Some(error) = body.get("error") {
        let message = error.as_str().map_or_else(|| error.to_string(), str::to_string);
        return Err(if message.contains("Invalid API key") {
            ToolError::authentication(format!("Invalid SerpAPI key: {}", message))
        } else {
            ToolError::execution(format!("SerpAPI error: {}", message))
        });
    }

    let results = body
        .get("organic_results")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .take(num_results)
                .enumerate()
                .map(|(idx, item)| SearchResult {
                    title: string_field(item, "title"),
                    url: string_field(item, "link"),
                    snippet: string_field(item, "snippet"),
                    position: idx + 1,
                })
                .collect()
        })
        .unwrap_or_default();

    let total_results = parse_total_results(
        body.get("search_information")
            .and_then(|info| info.get("total_results")),
    )?;

    Ok(GoogleSearchOutput {
        results,
        total_results,
    })
}

fn string_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// `total_results` arrives as a number or as a string like `"1,234,000"`.
fn parse_total_results(value: Option<&Value>) -> Result<u64, ToolError> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| invalid_total(n)),
        Some(Value::String(s)) => s
            .replace(',', "")
            .trim()
            .parse::<u64>()
            .map_err(|_| invalid_total(s)),
        Some(other) => Err(invalid_total(other)),
    }
}

fn invalid_total(value: impl std::fmt::Display) -> ToolError {
    ToolError::execution(format!(
        "Failed to parse response: invalid total_results {}",
        value
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolkit_domain::{DynTool, ErrorCategory, SchemaProtocol};

    fn sample_body() -> Value {
        json!({
            "search_information": {"total_results": "1,234,000"},
            "organic_results": [
                {"title": "Acme Corp", "link": "https://acme.example", "snippet": "Anvils."},
                {"title": "Acme News", "link": "https://news.example/acme"},
                {"title": "Third", "link": "https://third.example", "snippet": "..."}
            ]
        })
    }

    #[test]
    fn test_parse_takes_first_n_with_positions() {
        let output = parse_search_response(&sample_body(), 2).unwrap();
        assert_eq!(output.total_results, 1_234_000);
        assert_eq!(output.results.len(), 2);
        assert_eq!(
            output.results[0],
            SearchResult {
                title: "Acme Corp".to_string(),
                url: "https://acme.example".to_string(),
                snippet: "Anvils.".to_string(),
                position: 1,
            }
        );
        assert_eq!(output.results[1].position, 2);
        assert_eq!(output.results[1].snippet, "");
    }

    #[test]
    fn test_parse_numeric_total_and_missing_results() {
        let output =
            parse_search_response(&json!({"search_information": {"total_results": 42}}), 5)
                .unwrap();
        assert_eq!(output.total_results, 42);
        assert!(output.results.is_empty());

        let output = parse_search_response(&json!({}), 5).unwrap();
        assert_eq!(output.total_results, 0);
    }

    #[test]
    fn test_parse_invalid_total_is_execution_error() {
        let err = parse_search_response(
            &json!({"search_information": {"total_results": "about a lot"}}),
            5,
        )
        .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Execution);
    }

    #[test]
    fn test_body_error_mapping() {
        let err = parse_search_response(&json!({"error": "Invalid API key. Check it."}), 5)
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Authentication);

        let err = parse_search_response(&json!({"error": "Google hasn't returned any results"}), 5)
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Execution);
        assert!(err.message().starts_with("SerpAPI error:"));
    }

    #[test]
    fn test_status_mapping() {
        let err = error_for_status(429, Some("Too Many Requests"));
        assert_eq!(err.category(), ErrorCategory::RateLimited);
        assert_eq!(err.status(), Some(429));

        let err = error_for_status(401, Some("Unauthorized"));
        assert_eq!(err.category(), ErrorCategory::Authentication);

        let err = error_for_status(503, Some("Service Unavailable"));
        assert_eq!(err.category(), ErrorCategory::Execution);
        assert_eq!(err.message(), "HTTP error: 503 Service Unavailable");
    }

    #[test]
    fn test_missing_api_key() {
        let err = GoogleSearchTool::new("  ").unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingApiKey { .. }));

        let err = GoogleSearchTool::from_env("TOOLKIT_TEST_UNSET_SERPAPI_KEY").unwrap_err();
        assert!(err.to_string().contains("TOOLKIT_TEST_UNSET_SERPAPI_KEY"));
    }

    #[test]
    fn test_output_conforms_to_schema() {
        let tool = GoogleSearchTool::new("test-key").unwrap();
        let output = parse_search_response(&sample_body(), 3).unwrap();
        let value = serde_json::to_value(output).unwrap();
        assert!(tool.output_schema().check(&value).is_ok());
    }

    #[test]
    fn test_call_schema() {
        let tool = GoogleSearchTool::new("test-key").unwrap();
        let schema = tool.to_call_schema(SchemaProtocol::FunctionCalling);
        let params = &schema["function"]["parameters"];
        assert_eq!(params["required"], json!(["query"]));
        assert_eq!(params["properties"]["num_results"]["minimum"], json!(1));
        assert_eq!(params["properties"]["num_results"]["maximum"], json!(10));
        assert_eq!(params["properties"]["num_results"]["default"], json!(5));
    }

    #[tokio::test]
    async fn test_invalid_input_rejected_before_request() {
        let tool = GoogleSearchTool::new("test-key")
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/unreachable");
        let args = json!({"query": "acme", "num_results": 0});
        let err = tool.invoke(args.as_object().unwrap()).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.message().contains("num_results: "), "{}", err.message());
    }
}
