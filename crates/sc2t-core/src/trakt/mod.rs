//! Client for the remote list service (Trakt REST API, `users/me/lists`).

mod error;
mod sync;
mod types;

pub use error::ApiError;
pub use sync::{find_list_by_name, sync_list, ListAction, SyncMode, SyncOutcome, SyncStage};
pub use types::{AddedItems, ListIds, RemoteList};

use serde::Serialize;

use crate::config::{Privacy, TraktConfig};
use crate::http::{HttpRequest, HttpResponse, Method, Transport};
use types::{AddItemsResponse, DescriptionPatch, NewList, ShowItems};

/// Authenticated client for the caller's lists.
pub struct TraktClient<T> {
    transport: T,
    base_url: String,
    client_id: String,
    access_token: String,
    api_version: String,
    privacy: Privacy,
    footer: String,
}

impl<T: Transport> TraktClient<T> {
    pub fn new(transport: T, cfg: &TraktConfig) -> Self {
        Self {
            transport,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            client_id: cfg.client_id.clone(),
            access_token: cfg.access_token.clone(),
            api_version: cfg.api_version.clone(),
            privacy: cfg.privacy,
            footer: cfg.description_footer.clone(),
        }
    }

    /// Footer appended to every composed list description.
    pub fn footer(&self) -> &str {
        &self.footer
    }

    fn lists_url(&self) -> String {
        format!("{}/users/me/lists", self.base_url)
    }

    fn request(&self, method: Method, url: String) -> HttpRequest {
        HttpRequest::new(method, url)
            .header("Content-Type", "application/json")
            .header("trakt-api-key", self.client_id.as_str())
            .header("trakt-api-version", self.api_version.as_str())
            .header("Authorization", format!("Bearer {}", self.access_token))
    }

    fn json_request<B: Serialize>(
        &self,
        method: Method,
        url: String,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        Ok(self.request(method, url).body(serde_json::to_vec(body)?))
    }

    /// Execute `req` and require exactly `expected` as the response status.
    fn send(&self, req: &HttpRequest, expected: u32) -> Result<HttpResponse, ApiError> {
        let resp = self.transport.execute(req).map_err(ApiError::Transport)?;
        if resp.status != expected {
            return Err(ApiError::Status {
                status: resp.status,
                body: resp.text(),
            });
        }
        Ok(resp)
    }

    /// `GET /users/me/lists` (expects 200).
    pub fn lists(&self) -> Result<Vec<RemoteList>, ApiError> {
        let resp = self.send(&self.request(Method::Get, self.lists_url()), 200)?;
        Ok(serde_json::from_slice(&resp.body)?)
    }

    /// `POST /users/me/lists` (expects 201). Returns the created list.
    pub fn create_list(&self, name: &str, description: &str) -> Result<RemoteList, ApiError> {
        let body = NewList {
            name,
            description,
            privacy: self.privacy,
        };
        let req = self.json_request(Method::Post, self.lists_url(), &body)?;
        let resp = self.send(&req, 201)?;
        Ok(serde_json::from_slice(&resp.body)?)
    }

    /// `PUT /users/me/lists/{id}` with only the description (expects 200).
    pub fn update_description(&self, id: u64, description: &str) -> Result<(), ApiError> {
        let url = format!("{}/{}", self.lists_url(), id);
        let req = self.json_request(Method::Put, url, &DescriptionPatch { description })?;
        self.send(&req, 200)?;
        Ok(())
    }

    /// `POST /users/me/lists/{id}/items` with every title as a show (expects 201).
    ///
    /// An unreadable success body is not an error; the counts are left unset.
    pub fn add_shows(&self, id: u64, titles: &[String]) -> Result<AddedItems, ApiError> {
        let url = format!("{}/{}/items", self.lists_url(), id);
        let req = self.json_request(Method::Post, url, &ShowItems::from_titles(titles))?;
        let resp = self.send(&req, 201)?;
        match serde_json::from_slice::<AddItemsResponse>(&resp.body) {
            Ok(parsed) => Ok(AddedItems::from_response(titles.len(), parsed)),
            Err(e) => {
                tracing::debug!("unreadable items-add response: {}", e);
                Ok(AddedItems {
                    submitted: titles.len(),
                    ..AddedItems::default()
                })
            }
        }
    }
}
