use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use tracing::debug;

use shared_models::auth::JwtClaims;
use shared_models::error::AppError;

/// Reads the claims of a bearer token without checking its signature.
///
/// The backend remains the authority on validity; this only lets the client
/// notice an expired session before making a request with it.
pub fn decode_claims(token: &str) -> Result<JwtClaims, AppError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(AppError::Session("Invalid token format".to_string()));
    }

    let claims_bytes = URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| {
            debug!("Failed to decode claims: {}", e);
            AppError::Session("Invalid claims encoding".to_string())
        })?;

    serde_json::from_slice(&claims_bytes).map_err(|e| {
        debug!("Failed to parse claims: {}", e);
        AppError::Session("Invalid claims format".to_string())
    })
}

/// Opaque or undecodable tokens are never reported as expired.
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    match decode_claims(token) {
        Ok(claims) => match claims.expires_at() {
            Some(exp) => exp <= now,
            None => false,
        },
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{JwtTestUtils, TestUser};
    use assert_matches::assert_matches;

    #[test]
    fn test_decode_valid_token() {
        let user = TestUser::patient("amine");
        let token = JwtTestUtils::create_test_token(&user, "secret", Some(1));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "amine");
        assert!(claims.exp.is_some());
        assert!(!is_expired(&token, Utc::now()));
    }

    #[test]
    fn test_expired_token() {
        let user = TestUser::patient("amine");
        let token = JwtTestUtils::create_expired_token(&user, "secret");
        assert!(is_expired(&token, Utc::now()));
    }

    #[test]
    fn test_malformed_token() {
        let token = JwtTestUtils::create_malformed_token();
        assert_matches!(decode_claims(&token), Err(AppError::Session(_)));
        assert!(!is_expired(&token, Utc::now()));
        assert_matches!(decode_claims("opaque"), Err(AppError::Session(_)));
    }
}
