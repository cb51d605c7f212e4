use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use reqwest::{Client, Url};

use crate::crawler::PageFetcher;

const LISTINGS_URL: &str = "https://selectumproperty.com/realestates";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36 Edg/137.0.0.0";

/// HTTP collaborator for the listings site. The `rsc` header and the
/// `language=ru` cookie make the server render the Russian-locale payload
/// the normalizer expects.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> anyhow::Result<Self> {
        let url: Url = LISTINGS_URL.parse()?;
        let jar = Arc::new(Jar::default());
        jar.add_cookie_str("language=ru", &url);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("ru,en;q=0.9"));
        headers.insert(REFERER, HeaderValue::from_static(LISTINGS_URL));
        headers.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));
        headers.insert(HeaderName::from_static("rsc"), HeaderValue::from_static("1"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .cookie_provider(jar)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, page: u32) -> anyhow::Result<String> {
        let res = self
            .client
            .get(LISTINGS_URL)
            .query(&[("page", page)])
            .send()
            .await?;
        Ok(res.text().await?)
    }
}
