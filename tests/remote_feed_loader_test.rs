use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use imagefeed::api::{HttpClient, HttpResponse, RemoteFeedLoader};
use imagefeed::error::{FeedError, Result};
use serde_json::json;
use url::Url;

/// Scripted HTTP client recording every requested URL.
struct HttpClientStub {
    requests: Mutex<Vec<Url>>,
    responses: Mutex<Vec<Result<HttpResponse>>>,
}

impl HttpClientStub {
    fn new(responses: Vec<Result<HttpResponse>>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(responses),
        })
    }

    fn requested_urls(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for HttpClientStub {
    async fn get(&self, url: &Url) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(url.clone());
        self.responses.lock().unwrap().remove(0)
    }
}

fn feed_url() -> Url {
    Url::parse("https://example.com/v1/feed").unwrap()
}

fn ok_response(body: serde_json::Value) -> Result<HttpResponse> {
    Ok(HttpResponse {
        status: 200,
        body: body.to_string().into_bytes(),
    })
}

#[tokio::test]
async fn load_requests_the_configured_url_once() {
    let client = HttpClientStub::new(vec![ok_response(json!({ "items": [] }))]);
    let loader = RemoteFeedLoader::new(feed_url(), client.clone());

    loader.load().await.unwrap();

    assert_eq!(client.requested_urls(), vec![feed_url()]);
}

#[tokio::test]
async fn load_delivers_connectivity_error_on_client_error() {
    let client = HttpClientStub::new(vec![Err(FeedError::Connectivity)]);
    let loader = RemoteFeedLoader::new(feed_url(), client);

    let result = loader.load().await;

    assert!(matches!(result, Err(FeedError::Connectivity)));
}

#[tokio::test]
async fn load_delivers_invalid_data_on_non_200_response() {
    let client = HttpClientStub::new(vec![Ok(HttpResponse {
        status: 404,
        body: json!({ "items": [] }).to_string().into_bytes(),
    })]);
    let loader = RemoteFeedLoader::new(feed_url(), client);

    let result = loader.load().await;

    assert!(matches!(result, Err(FeedError::InvalidData)));
}

#[tokio::test]
async fn load_delivers_invalid_data_on_malformed_body() {
    let client = HttpClientStub::new(vec![Ok(HttpResponse {
        status: 200,
        body: b"definitely not json".to_vec(),
    })]);
    let loader = RemoteFeedLoader::new(feed_url(), client);

    let result = loader.load().await;

    assert!(matches!(result, Err(FeedError::InvalidData)));
}

#[tokio::test]
async fn load_delivers_empty_feed_on_200_with_no_items() {
    let client = HttpClientStub::new(vec![ok_response(json!({ "items": [] }))]);
    let loader = RemoteFeedLoader::new(feed_url(), client);

    let images = loader.load().await.unwrap();

    assert!(images.is_empty());
}

#[tokio::test]
async fn load_delivers_images_in_payload_order() {
    let client = HttpClientStub::new(vec![ok_response(json!({
        "items": [
            {
                "id": "6a0b4a2e-5d8c-4f4f-9b39-0a0b4a2e5d8c",
                "description": "first",
                "location": "somewhere",
                "image": "https://a-url.com/first"
            },
            {
                "id": "9c2f1d40-7e61-4c3a-8f11-3d9c2f1d4070",
                "image": "https://a-url.com/second"
            }
        ]
    }))]);
    let loader = RemoteFeedLoader::new(feed_url(), client);

    let images = loader.load().await.unwrap();

    assert_eq!(images.len(), 2);
    assert_eq!(
        images[0].id.to_string(),
        "6a0b4a2e-5d8c-4f4f-9b39-0a0b4a2e5d8c"
    );
    assert_eq!(images[0].description.as_deref(), Some("first"));
    assert_eq!(images[0].location.as_deref(), Some("somewhere"));
    assert_eq!(images[0].url.as_str(), "https://a-url.com/first");
    assert_eq!(
        images[1].id.to_string(),
        "9c2f1d40-7e61-4c3a-8f11-3d9c2f1d4070"
    );
    assert_eq!(images[1].description, None);
    assert_eq!(images[1].location, None);
    assert_eq!(images[1].url.as_str(), "https://a-url.com/second");
}
