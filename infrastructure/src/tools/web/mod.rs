//! **Web Tools**: `google_search` and `web_fetch`
//!
//! # Tools
//!
//! | Tool | Description | Key Dependency |
//! |------|-----------|----------------|
//! | `google_search` | Google results via SerpAPI (API key required) | `reqwest` |
//! | `web_fetch` | Fetch a URL as cleaned text or raw HTML | `reqwest` + `scraper` |
//!
//! Both implement [`Tool`](toolkit_domain::Tool): the HTTP work lives in
//! `execute`, while response parsing is kept in pure functions so it can be
//! tested without network access.

mod fetch;
mod search;

pub use fetch::{
    DEFAULT_MAX_BODY_BYTES, DEFAULT_USER_AGENT, FetchMode, WEB_FETCH, WebFetchInput,
    WebFetchOutput, WebFetchTool,
};
pub use search::{
    GOOGLE_SEARCH, GoogleSearchInput, GoogleSearchOutput, GoogleSearchTool, SERPAPI_ENDPOINT,
    SearchResult,
};
