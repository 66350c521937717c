//! Remote document-store endpoints and response parsing
//!
//! The store speaks PostgREST conventions: one `grievances` table, row
//! filters in the query string, and the anon key sent both as `apikey`
//! and as a bearer token.

use portal_core::{Grievance, NewGrievance, NotifyKind};
use uuid::Uuid;

use crate::http::{HttpRequest, HttpResponse, NetError};
use crate::relay::RelayRequest;

/// Builds authenticated requests against one store deployment
#[derive(Clone, Debug)]
pub struct StoreClient {
    base_url: String,
    api_key: String,
}

impl StoreClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/grievances", self.base_url)
    }

    fn row_url(&self, id: Uuid) -> String {
        format!("{}?id=eq.{}", self.table_url(), id)
    }

    fn authed(&self, request: HttpRequest) -> HttpRequest {
        request
            .with_header("apikey", &self.api_key)
            .with_bearer(&self.api_key)
    }

    /// Fetch all grievances, newest first
    pub fn list_grievances(&self) -> HttpRequest {
        let url = format!("{}?select=*&order=created_at.desc", self.table_url());
        self.authed(HttpRequest::get(url))
    }

    /// Insert one row. The store fills in id and timestamps.
    pub fn insert_grievance(&self, grievance: &NewGrievance) -> Result<HttpRequest, NetError> {
        let request = HttpRequest::post(self.table_url())
            .with_json_body(&[grievance])?
            .with_header("Prefer", "return=minimal");
        Ok(self.authed(request))
    }

    /// Flip the completed flag on one row
    pub fn set_completed(&self, id: Uuid, completed: bool) -> Result<HttpRequest, NetError> {
        let request = HttpRequest::patch(self.row_url(id))
            .with_json_body(&serde_json::json!({ "completed": completed }))?;
        Ok(self.authed(request))
    }

    /// Remove one row
    pub fn delete_grievance(&self, id: Uuid) -> HttpRequest {
        self.authed(HttpRequest::delete(self.row_url(id)))
    }

    /// Forward a notification through the relay endpoint.
    ///
    /// The relay is mounted behind the deployment's functions path; the
    /// binary itself serves `/` and leaves routing to the platform.
    pub fn notify_request(
        &self,
        user_id: &str,
        kind: NotifyKind,
        title: &str,
        description: &str,
    ) -> Result<HttpRequest, NetError> {
        let url = format!("{}/functions/v1/notify-relay", self.base_url);
        let body = RelayRequest {
            user_id: user_id.to_string(),
            kind,
            title: title.to_string(),
            description: description.to_string(),
        };
        let request = HttpRequest::post(url).with_json_body(&body)?;
        Ok(self.authed(request))
    }

    /// Decode a list response, refusing non-success statuses
    pub fn parse_list(response: &HttpResponse) -> Result<Vec<Grievance>, NetError> {
        if !response.is_success() {
            return Err(NetError::Status(response.status));
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}
