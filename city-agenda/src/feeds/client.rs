//! HTTP client for the Barcelona open-data feeds.

use std::time::Instant;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::domain::{Event, EventCatalog, ParkingLot, Station};

use super::convert::{convert_all, convert_event, convert_parking, convert_station};
use super::error::FeedError;
use super::types::{EventDto, ListingDocument, ParkingDto, StationsDocument};

/// Default URL of the Bicing station-status feed.
pub const DEFAULT_STATIONS_URL: &str = "http://wservice.viabicing.cat/getstations.php?v=1";

/// Default URL of the parking lot listing.
pub const DEFAULT_PARKINGS_URL: &str = "http://www.bcn.cat/tercerlloc/Aparcaments.xml";

/// Default URL of the cultural agenda.
pub const DEFAULT_EVENTS_URL: &str = "http://www.bcn.cat/tercerlloc/agenda_cultural.xml";

/// Configuration for the feed client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub stations_url: String,
    pub parkings_url: String,
    pub events_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Set a custom stations URL.
    pub fn with_stations_url(mut self, url: impl Into<String>) -> Self {
        self.stations_url = url.into();
        self
    }

    /// Set a custom parking lots URL.
    pub fn with_parkings_url(mut self, url: impl Into<String>) -> Self {
        self.parkings_url = url.into();
        self
    }

    /// Set a custom agenda URL.
    pub fn with_events_url(mut self, url: impl Into<String>) -> Self {
        self.events_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            stations_url: DEFAULT_STATIONS_URL.to_string(),
            parkings_url: DEFAULT_PARKINGS_URL.to_string(),
            events_url: DEFAULT_EVENTS_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Everything one run needs, loaded once.
#[derive(Debug, Clone, Default)]
pub struct Feeds {
    pub stations: Vec<Station>,
    pub parkings: Vec<ParkingLot>,
    pub events: EventCatalog,
}

/// Client for the three open-data feeds.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    config: FeedConfig,
}

impl FeedClient {
    /// Create a new feed client.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Fetch and decode a document.
    async fn fetch_document<D: DeserializeOwned>(
        &self,
        feed: &'static str,
        url: &str,
    ) -> Result<D, FeedError> {
        let started = Instant::now();
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                feed,
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        debug!(
            feed,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "downloaded feed"
        );

        quick_xml::de::from_str(&body).map_err(|e| FeedError::Xml {
            feed,
            message: e.to_string(),
        })
    }

    /// Fetch every Bicing station.
    pub async fn fetch_stations(&self) -> Result<Vec<Station>, FeedError> {
        let doc: StationsDocument = self
            .fetch_document("stations", &self.config.stations_url)
            .await?;
        let stations = convert_all("stations", doc.stations, convert_station);
        info!(count = stations.len(), "loaded stations");
        Ok(stations)
    }

    /// Fetch every parking lot.
    pub async fn fetch_parkings(&self) -> Result<Vec<ParkingLot>, FeedError> {
        let doc: ListingDocument<ParkingDto> = self
            .fetch_document("parkings", &self.config.parkings_url)
            .await?;
        let lots = convert_all("parkings", doc.into_items(), convert_parking);
        info!(count = lots.len(), "loaded parking lots");
        Ok(lots)
    }

    /// Fetch the agenda, deduplicated.
    pub async fn fetch_events(&self) -> Result<EventCatalog, FeedError> {
        let doc: ListingDocument<EventDto> = self
            .fetch_document("events", &self.config.events_url)
            .await?;
        let events: Vec<Event> = convert_all("events", doc.into_items(), convert_event);
        let fetched = events.len();
        let catalog = EventCatalog::new(events);
        info!(
            count = catalog.len(),
            duplicates = fetched - catalog.len(),
            "loaded events"
        );
        Ok(catalog)
    }

    /// Fetch all three feeds concurrently. Any failure fails the whole load.
    pub async fn fetch_all(&self) -> Result<Feeds, FeedError> {
        let (stations, parkings, events) = tokio::try_join!(
            self.fetch_stations(),
            self.fetch_parkings(),
            self.fetch_events()
        )?;

        Ok(Feeds {
            stations,
            parkings,
            events,
        })
    }
}
