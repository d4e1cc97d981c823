// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! PostHog feature flag management API client implementation.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, trace};

use crate::error::{FlagsError, Result};
use crate::types::{
	ApiResponse, ErrorDetail, ErrorEnvelope, FeatureFlag, ListEnvelope, Pagination,
	SingleEnvelope,
};

const DEFAULT_BASE_URL: &str = "https://app.posthog.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the PostHog feature flag management API.
///
/// Holds the credentials for one project and issues one request per
/// operation (`delete_feature` issues two, sequentially). The client is
/// stateless between calls apart from the held credentials and the
/// underlying connection pool, so cloning is cheap and clones can be used
/// from separate tasks freely.
#[derive(Debug, Clone)]
pub struct PosthogFlagsClient {
	http_client: Client,
	api_key: String,
	project_id: String,
	base_url: String,
}

#[derive(Debug, Serialize)]
struct CreateFlagBody {
	name: String,
	key: String,
	deleted: bool,
	active: bool,
}

#[derive(Debug, Serialize)]
struct SoftDeleteBody {
	deleted: bool,
}

/// Raw shape of the upstream list response.
#[derive(Debug, Deserialize)]
struct ListResponseBody {
	results: Vec<FeatureFlag>,
	next: Option<String>,
	previous: Option<String>,
}

/// Raw shape of the upstream error body. All fields are optional; PostHog
/// omits them for some failure classes.
#[derive(Debug, Default, Deserialize)]
struct ErrorResponseBody {
	detail: Option<String>,
	code: Option<String>,
	#[serde(rename = "type")]
	kind: Option<String>,
}

impl PosthogFlagsClient {
	/// Creates a new client for the given project.
	///
	/// Credentials are not validated here; an invalid API key or project id
	/// surfaces as an error envelope on the first request.
	pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
		let http_client = gate_common_http::builder()
			.timeout(REQUEST_TIMEOUT)
			.build()
			.expect("Failed to create HTTP client");

		Self {
			http_client,
			api_key: api_key.into(),
			project_id: project_id.into(),
			base_url: DEFAULT_BASE_URL.to_string(),
		}
	}

	/// Sets a custom base URL for the API (useful for testing).
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Returns the API key this client authenticates with.
	pub fn api_key(&self) -> &str {
		&self.api_key
	}

	/// Returns the project identifier this client operates on.
	pub fn project_id(&self) -> &str {
		&self.project_id
	}

	/// Lists the feature flags of the project.
	///
	/// Returns the first page of the upstream listing: `data` mirrors the
	/// upstream `results` array and `pagination` mirrors the `next` and
	/// `previous` cursors verbatim. A non-2xx reply comes back as an
	/// [`ApiResponse::Failure`] value.
	#[instrument(skip(self), fields(project_id = %self.project_id))]
	pub async fn list_features(&self) -> Result<ApiResponse<ListEnvelope>> {
		let url = self.collection_url();
		debug!(url = %url, "listing feature flags");

		let response = self
			.http_client
			.get(&url)
			.bearer_auth(&self.api_key)
			.send()
			.await
			.map_err(|e| {
				error!(error = %e, "network error during flag listing");
				FlagsError::Network(e)
			})?;

		self.map_list_response(response).await
	}

	/// Creates a feature flag.
	///
	/// The management API's `key` field carries the machine name and its
	/// `name` field carries the human description, so `name` here becomes
	/// the upstream `key` and `description` becomes the upstream `name`.
	/// The argument order is deliberate; callers pass the machine name
	/// first. Pass `deleted` and `active` as `false` unless the flag should
	/// start in a non-default state.
	#[instrument(skip(self, description))]
	pub async fn create_feature(
		&self,
		name: &str,
		description: &str,
		deleted: bool,
		active: bool,
	) -> Result<ApiResponse<SingleEnvelope>> {
		let url = self.collection_url();
		let payload = CreateFlagBody {
			name: description.to_string(),
			key: name.to_string(),
			deleted,
			active,
		};

		debug!(url = %url, key = %name, "creating feature flag");

		let response = self
			.http_client
			.post(&url)
			.bearer_auth(&self.api_key)
			.json(&payload)
			.send()
			.await
			.map_err(|e| {
				error!(error = %e, "network error during flag creation");
				FlagsError::Network(e)
			})?;

		self.map_single_response(response).await
	}

	/// Looks up a flag by its `key`, returning the raw upstream flag.
	///
	/// Scans only the first page of the listing; flags beyond the first
	/// page are not found. Returns `None` when no listed flag matches.
	///
	/// A non-2xx reply to the underlying listing is a hard
	/// [`FlagsError::ListingFailed`] here, since there is no envelope to
	/// hand back.
	#[instrument(skip(self))]
	pub async fn fetch_feature(&self, key: &str) -> Result<Option<FeatureFlag>> {
		let listing = match self.list_features().await? {
			ApiResponse::Success(listing) => listing,
			ApiResponse::Failure(envelope) => {
				let status = envelope.status().unwrap_or_default();
				error!(status = status, "flag listing failed during lookup");
				return Err(FlagsError::ListingFailed { status, envelope });
			}
		};

		Ok(listing.data.into_iter().find(|flag| flag.key == key))
	}

	/// Soft-deletes the flag with the given `key`.
	///
	/// Looks the flag up first; a lookup miss is a hard
	/// [`FlagsError::NotFound`] and no PATCH is issued. On a hit, PATCHes
	/// the flag resource with `{"deleted": true}` and returns the mapped
	/// envelope. An already-deleted flag that still appears in the listing
	/// is PATCHed again without special-casing.
	#[instrument(skip(self))]
	pub async fn delete_feature(&self, key: &str) -> Result<ApiResponse<SingleEnvelope>> {
		let Some(flag) = self.fetch_feature(key).await? else {
			error!(key = %key, "feature flag not found");
			return Err(FlagsError::NotFound {
				key: key.to_string(),
			});
		};

		let url = format!("{}/{}", self.collection_url(), flag.id);
		debug!(url = %url, id = flag.id, "soft-deleting feature flag");

		let response = self
			.http_client
			.patch(&url)
			.bearer_auth(&self.api_key)
			.json(&SoftDeleteBody { deleted: true })
			.send()
			.await
			.map_err(|e| {
				error!(error = %e, "network error during flag deletion");
				FlagsError::Network(e)
			})?;

		self.map_single_response(response).await
	}

	fn collection_url(&self) -> String {
		format!(
			"{}/api/projects/{}/feature_flags",
			self.base_url, self.project_id
		)
	}

	async fn map_single_response(
		&self,
		response: Response,
	) -> Result<ApiResponse<SingleEnvelope>> {
		let status = response.status();
		let body = self.read_body(response).await?;

		if !is_success_status(status) {
			return Ok(ApiResponse::Failure(map_error_response(status, &body)));
		}

		debug!(status = %status, "request successful");
		trace!(body = %body, "response body");

		let data: FeatureFlag = serde_json::from_str(&body).map_err(|e| {
			error!(error = %e, "failed to parse flag body");
			FlagsError::InvalidResponse(format!("JSON parse error: {e}"))
		})?;

		Ok(ApiResponse::Success(SingleEnvelope { data }))
	}

	async fn map_list_response(&self, response: Response) -> Result<ApiResponse<ListEnvelope>> {
		let status = response.status();
		let body = self.read_body(response).await?;

		if !is_success_status(status) {
			return Ok(ApiResponse::Failure(map_error_response(status, &body)));
		}

		debug!(status = %status, "request successful");
		trace!(body = %body, "response body");

		let decoded: ListResponseBody = serde_json::from_str(&body).map_err(|e| {
			error!(error = %e, "failed to parse flag listing");
			FlagsError::InvalidResponse(format!("JSON parse error: {e}"))
		})?;

		Ok(ApiResponse::Success(ListEnvelope {
			data: decoded.results,
			pagination: Pagination {
				next: decoded.next,
				previous: decoded.previous,
			},
		}))
	}

	async fn read_body(&self, response: Response) -> Result<String> {
		response.text().await.map_err(|e| {
			error!(error = %e, "failed to read response body");
			FlagsError::Network(e)
		})
	}
}

// The upstream replies 200 for reads and updates, 201 for creates. Other
// 2xx codes are not part of the management API's contract and fall through
// to the error path.
fn is_success_status(status: StatusCode) -> bool {
	matches!(status.as_u16(), 200 | 201)
}

fn map_error_response(status: StatusCode, body: &str) -> ErrorEnvelope {
	debug!(status = %status, body = %body, "request failed");

	// Failure bodies that are not JSON objects still map to an envelope;
	// every field other than the status then reads as absent.
	let decoded: ErrorResponseBody = serde_json::from_str(body).unwrap_or_default();

	ErrorEnvelope {
		errors: vec![ErrorDetail {
			status: status.as_u16(),
			detail: decoded.detail,
			code: decoded.code,
			kind: decoded.kind,
		}],
	}
}
