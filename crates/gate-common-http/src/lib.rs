// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Gate.
//!
//! This crate provides a pre-configured HTTP client with a consistent
//! User-Agent header for all outbound API traffic.

mod client;

pub use client::{
	builder, builder_with_user_agent, new_client, new_client_with_timeout,
	new_client_with_user_agent, user_agent,
};
