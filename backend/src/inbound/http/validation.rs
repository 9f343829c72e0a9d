//! Shared request parsing helpers for inbound HTTP adapters.
//!
//! Identifiers are parsed here, before any port is called, so a malformed id
//! never reaches the store.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use tracing::debug;

use crate::domain::{BlogId, Error};

/// Message returned when a JSON body cannot be decoded.
pub const MALFORMED_BODY_MESSAGE: &str = "malformed request body";

/// Parse a blog id taken from the request path.
pub(crate) fn parse_blog_id(raw: &str) -> Result<BlogId, Error> {
    BlogId::parse(raw).map_err(|err| {
        debug!(value = err.value(), "malformed blog id");
        Error::malformed_id(err.to_string())
    })
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    Error::invalid_request(MALFORMED_BODY_MESSAGE).into()
}

/// JSON extractor configuration reporting decode failures as `{"error": ...}`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("panko")]
    #[case("")]
    #[case("5a3d5da59070081a82a3445")]
    fn malformed_blog_ids_are_malformed_id_errors(#[case] raw: &str) {
        let err = parse_blog_id(raw).expect_err("malformed");
        assert_eq!(err.code(), ErrorCode::MalformedId);
    }

    #[rstest]
    fn well_formed_blog_id_parses() {
        let id = BlogId::random();
        assert_eq!(parse_blog_id(&id.to_string()).expect("valid"), id);
    }
}
