//! Store-assigned entity identifiers.
//!
//! Identifiers are UUIDs. Parsing is an explicit, fallible step performed by
//! adapters before any store access, so a malformed identifier is reported
//! separately from a well-formed identifier with no matching document.

use std::fmt;

use uuid::Uuid;

/// Raised when a string cannot be parsed into an entity identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} id must be a valid UUID, got {value:?}")]
pub struct MalformedIdError {
    kind: &'static str,
    value: String,
}

impl MalformedIdError {
    /// The rejected input.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

macro_rules! define_uuid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Uuid);

        impl $name {
            /// Parse an identifier from its textual form.
            pub fn parse(raw: &str) -> Result<Self, MalformedIdError> {
                // Surrounding whitespace is never part of an identifier.
                if raw.trim() != raw {
                    return Err(MalformedIdError { kind: $kind, value: raw.to_owned() });
                }
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| MalformedIdError { kind: $kind, value: raw.to_owned() })
            }

            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an identifier read back from the store.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = MalformedIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_uuid_id! {
    /// Identifier of a blog document.
    BlogId, "blog"
}

define_uuid_id! {
    /// Identifier of a user document.
    UserId, "user"
}

#[cfg(test)]
mod tests {
    //! Regression coverage for identifier parsing.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("panko")]
    #[case("")]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    #[case("3fa85f64-5717-4562-b3fc")]
    fn parse_rejects_malformed_input(#[case] raw: &str) {
        let err = BlogId::parse(raw).expect_err("malformed id");
        assert_eq!(err.value(), raw);
    }

    #[rstest]
    fn parse_accepts_uuid_text() {
        let id = UserId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    fn error_message_names_entity_kind() {
        let err = UserId::parse("nope").expect_err("malformed id");
        assert!(err.to_string().starts_with("user id"));
    }
}
