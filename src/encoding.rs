//! Dual interpretation of credentials sent through HTTP Basic.
//!
//! [RFC 6749 Section 2.3.1](https://datatracker.ietf.org/doc/html/rfc6749#section-2.3.1)
//! asks clients to `application/x-www-form-urlencoded` encode the identifier
//! and secret before putting them in the Basic header. Many clients skip
//! that step, so a literal `+` may either be a space or a plus sign. Both
//! readings are tried, the decoded one first.
use std::{borrow::Cow, future::Future};

use percent_encoding::percent_decode_str;

/// Decodes `value` like a URL query component: `+` becomes a space, then
/// `%XX` escapes are resolved. Malformed escapes are kept literally.
///
/// Returns `None` if the decoded bytes are not valid UTF-8.
pub fn query_unescape(value: &str) -> Option<Cow<'_, str>> {
	if !value.contains(['+', '%']) {
		return Some(Cow::Borrowed(value));
	}

	let spaced = value.replace('+', " ");
	let decoded = percent_decode_str(&spaced).decode_utf8().ok()?;
	Some(Cow::Owned(decoded.into_owned()))
}

/// Failure of one interpretation attempt.
pub trait Fallback {
	/// Whether the other interpretation may still be tried after this
	/// failure.
	///
	/// Failures that say nothing about the candidate itself (a broken
	/// backend) return `false` and end the attempt.
	fn allows_fallback(&self) -> bool;
}

/// Runs `attempt` with the percent-decoded form of `value`, then with the
/// raw `value`.
///
/// The raw form is only tried when the decoded attempt failed with an error
/// that [allows fallback](Fallback::allows_fallback) and decoding actually
/// changed the value. If `value` cannot be decoded, only the raw form is
/// tried. The error of the last attempt is returned.
pub async fn try_both_encodings<T, E, F, Fut>(value: &str, mut attempt: F) -> Result<T, E>
where
	E: Fallback,
	F: FnMut(String) -> Fut,
	Fut: Future<Output = Result<T, E>>,
{
	if let Some(decoded) = query_unescape(value) {
		let unchanged = decoded == value;

		match attempt(decoded.into_owned()).await {
			Ok(found) => return Ok(found),
			Err(e) if unchanged || !e.allows_fallback() => return Err(e),
			Err(_) => (),
		}
	}

	attempt(value.to_owned()).await
}
