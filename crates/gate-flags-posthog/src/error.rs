// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the PostHog feature flag management client.

use thiserror::Error;

use crate::types::ErrorEnvelope;

/// Errors that can occur when interacting with the PostHog management API.
///
/// Ordinary non-2xx replies are not represented here; those come back as
/// [`ApiResponse::Failure`](crate::types::ApiResponse::Failure) values. This
/// enum covers the exceptional channel only.
#[derive(Debug, Error)]
pub enum FlagsError {
	/// Network-level error during HTTP communication.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// The response body could not be decoded as the expected JSON shape.
	#[error("Invalid response from PostHog: {0}")]
	InvalidResponse(String),

	/// No flag with the given key exists on the first page of the listing.
	///
	/// Raised by `delete_feature` when the lookup step misses; no PATCH is
	/// issued in that case.
	#[error("Feature flag {key:?} not found")]
	NotFound {
		/// The key that failed to match any listed flag.
		key: String,
	},

	/// A flag lookup needed the listing, and the listing came back non-2xx.
	#[error("Flag listing failed with status {status}")]
	ListingFailed {
		/// HTTP status code of the failed listing.
		status: u16,
		/// The mapped upstream error envelope.
		envelope: ErrorEnvelope,
	},
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, FlagsError>;
