//! Unit tests for reset-token handling.

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    use crate::auth::{RESET_PURPOSE, ResetClaims};
    use crate::jwt::{JwtError, ResetTokenService};
    use crate::types::AccountId;

    const SECRET: &str = "test-secret-key-for-testing";

    fn create_test_service() -> ResetTokenService {
        ResetTokenService::new(SECRET, 600)
    }

    #[test]
    fn test_claims_new_sets_correct_fields() {
        let expires_at = Utc::now() + Duration::minutes(10);
        let claims = ResetClaims::new(AccountId::new(3), "alice", 77, expires_at);

        assert_eq!(claims.account_id(), AccountId::new(3));
        assert_eq!(claims.username(), "alice");
        assert_eq!(claims.version(), 77);
        assert_eq!(claims.purpose, RESET_PURPOSE);
        assert!(claims.iat <= Utc::now().timestamp());
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_issue_and_validate() {
        let service = create_test_service();
        let token = service.issue(AccountId::new(1), "alice", 5).unwrap();
        assert!(!token.is_empty());

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.account_id(), AccountId::new(1));
        assert_eq!(claims.username(), "alice");
        assert_eq!(claims.version(), 5);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_test_service();
        // Well past the default 60s validation leeway.
        let token = service
            .issue_expiring_at(AccountId::new(1), "alice", 5, Utc::now() - Duration::hours(1))
            .unwrap();

        assert!(matches!(service.validate(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let other = ResetTokenService::new("another-secret", 600);
        let token = other.issue(AccountId::new(1), "alice", 5).unwrap();

        let result = create_test_service().validate(&token);
        assert!(matches!(result, Err(JwtError::DecodingError(_))));
    }

    #[test]
    fn test_token_with_other_purpose_rejected() {
        let mut claims =
            ResetClaims::new(AccountId::new(1), "alice", 5, Utc::now() + Duration::minutes(5));
        claims.purpose = "session".to_string();
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = create_test_service().validate(&token);
        assert!(matches!(result, Err(JwtError::Invalid)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let result = create_test_service().validate("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_expiry_is_capped_at_one_day() {
        let service = ResetTokenService::new(SECRET, u64::MAX);
        assert_eq!(service.expires_in_secs(), 86_400);
    }
}
