// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! NTPv4 header types and wire codec.
//!
//! This crate provides the 48-byte NTPv4 packet header (RFC 5905 Section 7.3)
//! as a named-field struct, with slice-based and `byteorder`-based encoders and
//! decoders, plus the conversions between Unix time and NTP timestamps that the
//! `fakentp` server needs to fabricate its clock.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

/// Error types for buffer-based NTP packet parsing and serialization.
pub mod error;

/// NTP protocol types, constants and field offsets (RFC 5905).
pub mod protocol;

/// Unix time conversion utilities for NTP timestamps.
pub mod unix_time;
