//! Open-data XML DTOs.
//!
//! These types map directly onto the feed documents. Every leaf is an
//! optional string because the feeds omit or empty fields freely; parsing
//! and validation happen in [`super::convert`].

use serde::Deserialize;

/// Root of the Bicing station-status document.
#[derive(Debug, Clone, Deserialize)]
pub struct StationsDocument {
    /// When the feed was generated (Unix seconds).
    pub updatetime: Option<String>,

    #[serde(rename = "station", default)]
    pub stations: Vec<StationDto>,
}

/// One `<station>` element.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    pub id: Option<String>,

    /// `BIKE` or `BIKE-ELECTRIC`.
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub lat: Option<String>,
    pub long: Option<String>,
    pub street: Option<String>,
    pub street_number: Option<String>,

    /// `OPN` or `CLS`.
    pub status: Option<String>,

    pub slots: Option<String>,
    pub bikes: Option<String>,
}

/// Root of the city's "tercer lloc" listings (parking lots, agenda).
///
/// Rows live under `search/queryresponse/list/list_items/row/item`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingDocument<I> {
    pub search: Search<I>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search<I> {
    pub queryresponse: QueryResponse<I>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse<I> {
    pub list: List<I>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct List<I> {
    pub list_items: ListItems<I>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListItems<I> {
    #[serde(rename = "row", default = "Vec::new")]
    pub rows: Vec<Row<I>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Row<I> {
    pub item: I,
}

impl<I> ListingDocument<I> {
    /// The items of every row, in document order.
    pub fn into_items(self) -> impl Iterator<Item = I> {
        self.search
            .queryresponse
            .list
            .list_items
            .rows
            .into_iter()
            .map(|row| row.item)
    }
}

/// A parking lot row item.
#[derive(Debug, Clone, Deserialize)]
pub struct ParkingDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    /// Latitude.
    pub gmapx: Option<String>,
    /// Longitude.
    pub gmapy: Option<String>,
}

/// An agenda row item.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDto {
    pub name: Option<String>,
    /// The venue.
    pub institutionname: Option<String>,
    pub address: Option<String>,
    pub district: Option<String>,
    pub gmapx: Option<String>,
    pub gmapy: Option<String>,
    /// `dd/mm/yyyy`.
    pub begindate: Option<String>,
    /// `dd/mm/yyyy`.
    pub enddate: Option<String>,
    pub interestinfo: Option<InterestInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterestInfo {
    #[serde(default)]
    pub item: Vec<InterestItem>,
}

/// A labelled piece of practical information, e.g. `Preu` / `Gratuït`.
#[derive(Debug, Clone, Deserialize)]
pub struct InterestItem {
    pub label: Option<String>,
    pub interinfo: Option<String>,
}
