// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! PostHog feature flag management API client for Gate.
//!
//! This crate provides a typed Rust client for the PostHog feature flag
//! management REST API. It lists, creates, fetches, and soft-deletes flags
//! in a single project, mapping every upstream response into one of three
//! canonical envelope shapes: a single-resource envelope, a list envelope
//! with pagination cursors, or an error envelope.
//!
//! Non-2xx replies are ordinary values, not errors: each operation returns
//! `Ok(ApiResponse::Failure(..))` carrying the upstream error detail. The
//! `Err` channel is reserved for transport failures, undecodable bodies, and
//! the hard not-found condition raised by [`PosthogFlagsClient::delete_feature`].
//!
//! # Example
//!
//! ```ignore
//! use gate_flags_posthog::{ApiResponse, PosthogFlagsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PosthogFlagsClient::new("phx_xxx", "12345");
//!
//!     match client.list_features().await? {
//!         ApiResponse::Success(listing) => {
//!             for flag in &listing.data {
//!                 println!("{} (active: {})", flag.key, flag.active);
//!             }
//!         }
//!         ApiResponse::Failure(envelope) => {
//!             eprintln!("listing rejected: {:?}", envelope.errors);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::PosthogFlagsClient;
pub use error::{FlagsError, Result};
pub use types::{
	ApiResponse, ErrorDetail, ErrorEnvelope, FeatureFlag, ListEnvelope, Pagination,
	SingleEnvelope,
};
