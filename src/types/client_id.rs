use str_newtype::StrNewType;

use super::is_vschar;

/// An OAuth 2.0 client identifier (borrowed).
///
/// Client identifiers are issued to registered clients by the authorization
/// server, as defined in
/// [RFC 6749 Section 2.2](https://datatracker.ietf.org/doc/html/rfc6749#section-2.2).
///
/// Identifiers extracted from a token request are only looked up in the
/// [`Store`](crate::storage::Store) once they pass this grammar, so a
/// percent-decoded candidate containing control characters never reaches
/// the storage layer.
///
/// # Grammar
///
/// ```abnf
/// client_id = *VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(
	serde,
	owned(ClientIdBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash))
)]
pub struct ClientId(str);

impl ClientId {
	/// Validates that the given string is a well-formed client identifier.
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	/// Validates that the given byte slice is a well-formed client identifier.
	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		let mut i = 0;

		while i < bytes.len() {
			if !is_vschar(bytes[i]) {
				return false;
			}

			i += 1
		}

		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decoded_identifiers_with_spaces_are_valid() {
		// `f+oo` percent-decodes to `f oo`, which must still be looked up.
		assert!(ClientId::new("f oo").is_ok());
		assert!(ClientId::new("f+oo").is_ok());
	}

	#[test]
	fn empty_identifier_is_valid() {
		// `Basic Og==` carries an empty identifier; grammar is `*VSCHAR`.
		assert!(ClientId::new("").is_ok());
	}

	#[test]
	fn decoded_control_chars_are_rejected() {
		// `%0A` and `%7F` decode to bytes outside VSCHAR.
		assert!(ClientId::new("abc\ndef").is_err());
		assert!(ClientId::new("abc\x7f").is_err());
		assert!(ClientId::new("\x00").is_err());
	}

	#[test]
	fn non_ascii_identifier_is_rejected() {
		assert!(ClientId::new("clïent").is_err());
	}

	#[test]
	fn owned_identifier() {
		let id = ClientIdBuf::new("my-client".to_owned()).unwrap();
		assert_eq!(id.as_str(), "my-client");
		assert!(ClientIdBuf::new("bad\x00".to_owned()).is_err());
	}
}
