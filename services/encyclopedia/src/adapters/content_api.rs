//! services/encyclopedia/src/adapters/content_api.rs
//!
//! This module contains the adapter for the public hadith collection API.
//! It implements the `ContentService` port from the `core` crate.

use async_trait::async_trait;
use hadith_core::domain::{BookSummary, Hadith};
use hadith_core::ports::{ContentService, PortError, PortResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ContentService` over the hadith REST API.
#[derive(Clone)]
pub struct ContentApiAdapter {
    client: Client,
    base_url: String,
}

impl ContentApiAdapter {
    /// Creates a new `ContentApiAdapter`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> PortResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(PortError::NotFound(url)),
            status => {
                return Err(PortError::Unexpected(format!(
                    "GET {} returned {}",
                    url, status
                )))
            }
        }

        let envelope = response
            .json::<Envelope<T>>()
            .await
            .map_err(|e| PortError::Unexpected(format!("Malformed response from {}: {}", url, e)))?;
        Ok(envelope.data)
    }
}

//=========================================================================================
// Wire Records
//=========================================================================================

/// Every response of the API is wrapped as `{ code, message, data, error }`.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct BookRecord {
    id: String,
    name: String,
    available: u32,
}
impl BookRecord {
    fn to_domain(self) -> BookSummary {
        BookSummary {
            id: self.id,
            name: self.name,
            available: self.available,
        }
    }
}

/// `id` is the translated text, not an identifier.
#[derive(Deserialize)]
struct HadithRecord {
    number: u32,
    arab: String,
    id: String,
}
impl HadithRecord {
    fn to_domain(self, book_id: &str, book_name: &str) -> Hadith {
        Hadith::new(book_id, book_name, self.number, self.arab, self.id)
    }
}

#[derive(Deserialize)]
struct SingleHadithRecord {
    id: String,
    name: String,
    contents: HadithRecord,
}

#[derive(Deserialize)]
struct RangeRecord {
    id: String,
    name: String,
    hadiths: Vec<HadithRecord>,
}

//=========================================================================================
// `ContentService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ContentService for ContentApiAdapter {
    async fn list_books(&self) -> PortResult<Vec<BookSummary>> {
        let records: Vec<BookRecord> = self.fetch("/books").await?;
        Ok(records.into_iter().map(BookRecord::to_domain).collect())
    }

    async fn get_hadith(&self, book_id: &str, number: u32) -> Option<Hadith> {
        let path = format!("/books/{}/{}", book_id, number);
        match self.fetch::<SingleHadithRecord>(&path).await {
            Ok(record) => Some(record.contents.to_domain(&record.id, &record.name)),
            Err(PortError::NotFound(_)) => {
                debug!("Hadith {}-{} does not exist", book_id, number);
                None
            }
            Err(e) => {
                error!("Failed to fetch hadith {}-{}: {}", book_id, number, e);
                None
            }
        }
    }

    async fn get_range(&self, book_id: &str, start: u32, end: u32) -> PortResult<Vec<Hadith>> {
        let path = format!("/books/{}?range={}-{}", book_id, start, end);
        let record: RangeRecord = self.fetch(&path).await?;
        let (id, name) = (record.id, record.name);
        Ok(record
            .hadiths
            .into_iter()
            .map(|h| h.to_domain(&id, &name))
            .collect())
    }
}
