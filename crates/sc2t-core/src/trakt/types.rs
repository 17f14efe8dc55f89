//! Wire models for the list service.

use serde::{Deserialize, Serialize};

use crate::config::Privacy;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListIds {
    pub trakt: u64,
    #[serde(default)]
    pub slug: Option<String>,
}

/// A list owned by the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteList {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub ids: ListIds,
}

impl RemoteList {
    pub fn id(&self) -> u64 {
        self.ids.trakt
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewList<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub privacy: Privacy,
}

#[derive(Debug, Serialize)]
pub(crate) struct DescriptionPatch<'a> {
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShowTitle<'a> {
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShowItems<'a> {
    pub shows: Vec<ShowTitle<'a>>,
}

impl<'a> ShowItems<'a> {
    pub fn from_titles(titles: &'a [String]) -> Self {
        Self {
            shows: titles
                .iter()
                .map(|t| ShowTitle { title: t.trim() })
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ShowCount {
    #[serde(default)]
    pub shows: u64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NotFound {
    #[serde(default)]
    pub shows: Vec<serde_json::Value>,
}

/// Body of a successful items-add response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AddItemsResponse {
    #[serde(default)]
    pub added: ShowCount,
    #[serde(default)]
    pub existing: ShowCount,
    #[serde(default)]
    pub not_found: NotFound,
}

/// What the service reported after adding shows.
///
/// Counts are `None` when the response body could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddedItems {
    pub submitted: usize,
    pub added: Option<u64>,
    pub existing: Option<u64>,
    pub not_found: Vec<String>,
}

impl AddedItems {
    pub(crate) fn from_response(submitted: usize, resp: AddItemsResponse) -> Self {
        let not_found = resp
            .not_found
            .shows
            .iter()
            .filter_map(|v| v.get("title").and_then(|t| t.as_str()).map(str::to_string))
            .collect();
        Self {
            submitted,
            added: Some(resp.added.shows),
            existing: Some(resp.existing.shows),
            not_found,
        }
    }
}
