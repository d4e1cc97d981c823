// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Envelope and wire types for the PostHog feature flag management API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A feature flag as stored by the PostHog management API.
///
/// The flag is owned by the upstream service. This type carries the fields
/// the client inspects (`id` for addressing, `key` for lookup) and preserves
/// every other upstream field verbatim in `extra`, so envelopes remain
/// pass-throughs of the upstream body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFlag {
	/// Opaque upstream identifier; addresses the flag resource for updates.
	pub id: u64,
	/// Stable machine name for the flag.
	pub key: String,
	/// Human-readable description shown in the PostHog UI.
	pub name: Option<String>,
	/// Soft-delete marker.
	#[serde(default)]
	pub deleted: bool,
	/// Whether the flag is currently served.
	#[serde(default)]
	pub active: bool,
	/// Remaining upstream fields, passed through untouched.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Pagination cursors mirrored verbatim from the upstream list response.
///
/// The cursors are opaque URLs minted by PostHog; they are never parsed or
/// reconstructed on this side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
	/// Cursor for the next page, if any.
	pub next: Option<String>,
	/// Cursor for the previous page, if any.
	pub previous: Option<String>,
}

/// Success envelope for single-resource operations (create, soft-delete).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleEnvelope {
	/// The upstream flag body, verbatim.
	pub data: FeatureFlag,
}

/// Success envelope for the list operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEnvelope {
	/// The upstream `results` array, verbatim.
	pub data: Vec<FeatureFlag>,
	/// The upstream `next`/`previous` cursors, verbatim.
	pub pagination: Pagination,
}

/// One entry of an error envelope.
///
/// `detail`, `code`, and `type` are read from the upstream error body and
/// are each absent when the upstream omits them; `status` is the HTTP status
/// code of the failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
	/// HTTP status code of the failed response.
	pub status: u16,
	/// Human-readable message from the upstream error body.
	pub detail: Option<String>,
	/// Machine-readable error code from the upstream error body.
	pub code: Option<String>,
	/// Upstream error category.
	#[serde(rename = "type")]
	pub kind: Option<String>,
}

/// Error envelope returned for any non-2xx upstream response.
///
/// Exactly one entry is produced per failed call; the upstream error shape
/// is not assumed to carry multiple errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
	/// The error entries. Always length one for responses mapped by this
	/// client.
	pub errors: Vec<ErrorDetail>,
}

impl ErrorEnvelope {
	/// Returns the status code of the first (and only) error entry.
	pub fn status(&self) -> Option<u16> {
		self.errors.first().map(|e| e.status)
	}
}

/// Outcome of one API call: a success envelope or the upstream's error
/// envelope.
///
/// Callers branch on the variant to determine the outcome; a non-2xx reply
/// is a `Failure` value, never an `Err`. Serialization is untagged, so the
/// JSON form is exactly one of the canonical envelope shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
	/// The upstream accepted the request (HTTP 200 or 201).
	Success(T),
	/// The upstream rejected the request with a non-2xx status.
	Failure(ErrorEnvelope),
}

impl<T> ApiResponse<T> {
	/// Returns `true` for the `Success` variant.
	pub fn is_success(&self) -> bool {
		matches!(self, ApiResponse::Success(_))
	}

	/// Consumes the response, returning the success envelope if present.
	pub fn success(self) -> Option<T> {
		match self {
			ApiResponse::Success(inner) => Some(inner),
			ApiResponse::Failure(_) => None,
		}
	}

	/// Consumes the response, returning the error envelope if present.
	pub fn failure(self) -> Option<ErrorEnvelope> {
		match self {
			ApiResponse::Success(_) => None,
			ApiResponse::Failure(envelope) => Some(envelope),
		}
	}
}
