//! web_fetch tool: Fetch a URL as cleaned text or raw HTML

use super::super::ConfigurationError;
use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use scraper::{Html, Node, Selector};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use toolkit_domain::tool::schema::{
    FieldSpec, FieldType, InputSchema, OutputSchema, ParamSpec, ParamType,
};
use toolkit_domain::{Tool, ToolError};
use tracing::debug;

/// Tool name constant
pub const WEB_FETCH: &str = "web_fetch";

/// Default User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; agent-toolkit/0.1.0; +https://github.com/agent-toolkit/agent-toolkit)";

/// Maximum response body size (5 MB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Tags whose entire subtree is dropped in text mode
const SKIP_TAGS: [&str; 7] = ["script", "style", "nav", "footer", "header", "noscript", "svg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    Text,
    Html,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebFetchInput {
    pub url: String,
    pub mode: FetchMode,
    /// Seconds
    pub timeout: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebFetchOutput {
    /// Final URL after redirects
    pub url: String,
    pub content: String,
    pub mode: FetchMode,
    pub title: Option<String>,
}

/// Fetch web page content as cleaned text or raw HTML.
#[derive(Debug, Clone)]
pub struct WebFetchTool {
    client: reqwest::Client,
    user_agent: String,
    max_body_bytes: usize,
}

impl WebFetchTool {
    pub fn new() -> Result<Self, ConfigurationError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| ConfigurationError::HttpClient(e.to_string()))?;
        Ok(Self {
            client,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        })
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_max_body_bytes(mut self, max: usize) -> Self {
        self.max_body_bytes = max;
        self
    }
}

#[async_trait]
impl Tool for WebFetchTool {
    type Input = WebFetchInput;
    type Output = WebFetchOutput;

    fn name(&self) -> &str {
        WEB_FETCH
    }

    fn description(&self) -> &str {
        "Fetch content from a URL. Returns either cleaned readable text or raw HTML. \
         Use 'text' mode for reading and analysis, 'html' mode when you need the full page \
         structure. Automatically handles redirects and common web formats."
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .with_param(ParamSpec::new("url", "The URL to fetch", ParamType::String).required())
            .with_param(
                ParamSpec::new(
                    "mode",
                    "Output mode: 'text' for cleaned readable text, 'html' for raw HTML",
                    ParamType::String,
                )
                .with_default("text")
                .with_allowed(["text", "html"]),
            )
            .with_param(
                ParamSpec::new(
                    "timeout",
                    "Request timeout in seconds (5-120)",
                    ParamType::Integer,
                )
                .with_default(30)
                .with_range(5.0, 120.0),
            )
    }

    fn output_schema(&self) -> OutputSchema {
        OutputSchema::new()
            .with_field(FieldSpec::new(
                "url",
                "The fetched URL (may differ from input due to redirects)",
                FieldType::String,
            ))
            .with_field(FieldSpec::new(
                "content",
                "Page content (cleaned text or raw HTML)",
                FieldType::String,
            ))
            .with_field(FieldSpec::new(
                "mode",
                "Mode used: 'text' or 'html'",
                FieldType::String,
            ))
            .with_field(
                FieldSpec::new("title", "Page title if available", FieldType::String).nullable(),
            )
    }

    async fn execute(&self, input: WebFetchInput) -> Result<WebFetchOutput, ToolError> {
        debug!("web_fetch: url={} mode={:?}", input.url, input.mode);

        let mut response = self
            .client
            .get(&input.url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .timeout(Duration::from_secs(input.timeout))
            .send()
            .await
            .map_err(|e| ToolError::execution(format!("Failed to fetch {}: {}", input.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::execution(format!(
                "HTTP error fetching {}: {}",
                input.url,
                status.as_u16()
            ))
            .with_status(status.as_u16()));
        }

        let final_url = response.url().to_string();

        if let Some(length) = response.content_length()
            && length > self.max_body_bytes as u64
        {
            return Err(too_large(length as usize, self.max_body_bytes));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let mut body = BoundedBody::new(self.max_body_bytes);
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            ToolError::execution(format!("Failed to read response body: {}", e))
        })? {
            body.push(&chunk)?;
        }

        let html = decode_body(&body.into_bytes(), content_type.as_deref());
        Ok(extract_page(&final_url, &html, input.mode))
    }
}

/// Response body accumulator that fails as soon as the limit is crossed.
struct BoundedBody {
    bytes: Vec<u8>,
    max: usize,
}

impl BoundedBody {
    fn new(max: usize) -> Self {
        Self {
            bytes: Vec::new(),
            max,
        }
    }

    fn push(&mut self, chunk: &[u8]) -> Result<(), ToolError> {
        let size = self.bytes.len() + chunk.len();
        if size > self.max {
            return Err(too_large(size, self.max));
        }
        self.bytes.extend_from_slice(chunk);
        Ok(())
    }

    fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Decode with the `Content-Type` charset, falling back to UTF-8.
///
/// A byte-order mark overrides the declared charset.
fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

fn charset_label(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

fn too_large(size: usize, max: usize) -> ToolError {
    ToolError::execution(format!(
        "Response too large: {} bytes (max: {} bytes)",
        size, max
    ))
}

/// Build the tool output from a fetched document.
pub(crate) fn extract_page(url: &str, html: &str, mode: FetchMode) -> WebFetchOutput {
    let document = Html::parse_document(html);
    let content = match mode {
        FetchMode::Html => html.to_string(),
        FetchMode::Text => document_text(&document),
    };
    WebFetchOutput {
        url: url.to_string(),
        content,
        mode,
        title: extract_title(&document),
    }
}

/// Trimmed `<title>` text; `None` if absent or blank.
pub(crate) fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let title = document
        .select(&selector)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    (!title.is_empty()).then_some(title)
}

/// Readable text: one line per text node, trimmed, blank lines dropped.
fn document_text(document: &Html) -> String {
    let mut parts = Vec::new();

    // Explicit stack so nesting depth is bounded by the heap, not the call stack
    let mut stack = vec![*document.root_element()];
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => parts.push(text.to_string()),
            Node::Element(element) if SKIP_TAGS.contains(&element.name()) => {}
            Node::Element(_) => stack.extend(node.children().rev()),
            _ => {}
        }
    }

    parts
        .iter()
        .flat_map(|part| part.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolkit_domain::{DynTool, ErrorCategory};

    const PAGE: &str = r#"
        <html>
          <head><title>  Acme Corp | Home  </title><style>.x { color: red; }</style></head>
          <body>
            <header>Site header</header>
            <nav><a href="/">Home</a></nav>
            <h1>Acme Corp</h1>
            <p>
               We make anvils.
            </p>
            <script>var tracking = 1;</script>
            <p>Founded in 1949.</p>
            <footer>Copyright</footer>
          </body>
        </html>
    "#;

    fn text_of(html: &str) -> String {
        document_text(&Html::parse_document(html))
    }

    #[test]
    fn test_text_drops_boilerplate_subtrees() {
        let text = text_of(PAGE);
        assert!(text.contains("Acme Corp\nWe make anvils.\nFounded in 1949."));
        assert!(!text.contains("Site header"));
        assert!(!text.lines().any(|line| line == "Home"));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("Copyright"));
    }

    #[test]
    fn test_text_has_no_blank_or_padded_lines() {
        let text = text_of(PAGE);
        for line in text.lines() {
            assert!(!line.trim().is_empty());
            assert_eq!(line, line.trim());
        }
    }

    #[test]
    fn test_text_empty() {
        assert!(text_of("").is_empty());
    }

    #[test]
    fn test_text_of_deeply_nested_document() {
        let depth = 20_000;
        let html = format!("{}deep{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let output = extract_page("u", &html, FetchMode::Text);
        assert_eq!(output.content, "deep");
    }

    #[test]
    fn test_text_keeps_document_order_around_skipped_tags() {
        let text = text_of("<body><p>one</p><nav><p>menu</p></nav><div><p>two</p></div>three</body>");
        assert_eq!(text, "one\ntwo\nthree");
    }

    #[test]
    fn test_bounded_body_accepts_chunks_up_to_limit() {
        let mut body = BoundedBody::new(8);
        body.push(b"abcd").unwrap();
        body.push(b"efgh").unwrap();
        assert_eq!(body.into_bytes(), b"abcdefgh");
    }

    #[test]
    fn test_bounded_body_rejects_chunk_past_limit() {
        let mut body = BoundedBody::new(8);
        body.push(b"abcdef").unwrap();
        let err = body.push(b"ghi").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Execution);
        assert_eq!(err.message(), "Response too large: 9 bytes (max: 8 bytes)");
    }

    #[test]
    fn test_decode_body_uses_declared_charset() {
        // "Café" in windows-1252
        let bytes = b"<p>Caf\xe9</p>";
        assert_eq!(
            decode_body(bytes, Some("text/html; charset=windows-1252")),
            "<p>Caf\u{e9}</p>"
        );
        assert_eq!(
            decode_body(bytes, Some("text/html; Charset=\"ISO-8859-1\"")),
            "<p>Caf\u{e9}</p>"
        );
    }

    #[test]
    fn test_decode_body_defaults_to_utf8() {
        let bytes = "<p>Caf\u{e9}</p>".as_bytes();
        assert_eq!(decode_body(bytes, None), "<p>Caf\u{e9}</p>");
        assert_eq!(decode_body(bytes, Some("text/html")), "<p>Caf\u{e9}</p>");
        assert_eq!(decode_body(bytes, Some("text/html; charset=bogus")), "<p>Caf\u{e9}</p>");
        // Invalid UTF-8 is replaced, not rejected
        assert_eq!(decode_body(b"a\xffb", None), "a\u{fffd}b");
    }

    #[test]
    fn test_extract_page_text_mode() {
        let output = extract_page("https://acme.example/", PAGE, FetchMode::Text);
        assert_eq!(output.url, "https://acme.example/");
        assert_eq!(output.title.as_deref(), Some("Acme Corp | Home"));
        assert_eq!(output.mode, FetchMode::Text);
        assert!(output.content.contains("We make anvils."));
    }

    #[test]
    fn test_extract_page_html_mode_returns_markup() {
        let output = extract_page("https://acme.example/", PAGE, FetchMode::Html);
        assert_eq!(output.content, PAGE);
        assert!(output.content.contains("<script>"));
    }

    #[test]
    fn test_title_missing_or_blank() {
        let output = extract_page("u", "<html><body><p>x</p></body></html>", FetchMode::Text);
        assert_eq!(output.title, None);
        let output = extract_page("u", "<html><head><title>  </title></head></html>", FetchMode::Text);
        assert_eq!(output.title, None);
    }

    #[test]
    fn test_output_conforms_to_schema() {
        let tool = WebFetchTool::new().unwrap();
        for mode in [FetchMode::Text, FetchMode::Html] {
            let output = extract_page("https://acme.example/", PAGE, mode);
            let value = serde_json::to_value(output).unwrap();
            assert!(tool.output_schema().check(&value).is_ok());
        }
        let untitled = serde_json::to_value(extract_page("u", "<p>x</p>", FetchMode::Text)).unwrap();
        assert!(untitled["title"].is_null());
        assert!(tool.output_schema().check(&untitled).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_mode_and_timeout_rejected() {
        let tool = WebFetchTool::new().unwrap();
        let args = json!({"url": "http://127.0.0.1:9/", "mode": "pdf", "timeout": 1});
        let err = tool.invoke(args.as_object().unwrap()).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        let message = err.message();
        assert!(message.contains("mode: "), "{}", message);
        assert!(message.contains("timeout: "), "{}", message);
    }
}
