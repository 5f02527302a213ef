//! Core OAuth 2.0 string types.
//!
//! Types come in borrowed/owned pairs ([`ClientId`] / [`ClientIdBuf`])
//! following the same pattern as [`str`] / [`String`].
mod client_id;

pub use client_id::*;

/// Returns `true` if the byte is a VSCHAR (visible ASCII character plus
/// space), i.e. in the range `0x20..=0x7E`.
const fn is_vschar(c: u8) -> bool {
	c >= 0x20 && c <= 0x7e
}
