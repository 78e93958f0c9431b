//! Unit tests for token service

use chrono::Utc;
use jsonwebtoken::Algorithm;

use crate::domain::entities::account::UserRole;
use crate::domain::entities::token::{Claims, TokenType};
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

fn create_test_service() -> TokenService {
    let config = TokenServiceConfig {
        jwt_secret: "test-secret-key-for-testing".to_string(),
        ..Default::default()
    };
    TokenService::new(config).expect("Failed to create token service")
}

fn token_error(result: Result<Claims, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(e)) => e,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[test]
fn test_access_token_round_trip() {
    let service = create_test_service();
    let token = service
        .create_access_token("mung@dogcat.kr", UserRole::User)
        .unwrap();

    let claims = service.validate_token(&token, TokenType::Access).unwrap();
    assert_eq!(claims.sub, "mung@dogcat.kr");
    assert_eq!(claims.role, UserRole::User);
    assert_eq!(claims.iss, "withdogandcat");
    assert!(claims.is_access());
    assert_eq!(claims.exp - claims.iat, 15 * 60);
}

#[test]
fn test_refresh_token_carries_returned_jti() {
    let service = create_test_service();
    let issued = service
        .create_refresh_token("mung@dogcat.kr", UserRole::Admin)
        .unwrap();

    assert_eq!(issued.expires_in, 7 * 24 * 60 * 60);

    let claims = service
        .validate_token(&issued.token, TokenType::Refresh)
        .unwrap();
    assert_eq!(claims.jti, issued.jti);
    assert_eq!(claims.role, UserRole::Admin);
    assert!(claims.is_refresh());
}

#[test]
fn test_each_refresh_token_gets_fresh_jti() {
    let service = create_test_service();
    let first = service.create_refresh_token("a@dogcat.kr", UserRole::User).unwrap();
    let second = service.create_refresh_token("a@dogcat.kr", UserRole::User).unwrap();

    assert_ne!(first.jti, second.jti);
    assert_ne!(first.token, second.token);
}

#[test]
fn test_access_token_rejected_as_refresh() {
    let service = create_test_service();
    let token = service
        .create_access_token("mung@dogcat.kr", UserRole::User)
        .unwrap();

    let err = token_error(service.validate_token(&token, TokenType::Refresh));
    assert_eq!(
        err,
        TokenError::WrongTokenType {
            expected: TokenType::Refresh,
            actual: TokenType::Access,
        }
    );
}

#[test]
fn test_refresh_token_rejected_as_access() {
    let service = create_test_service();
    let issued = service
        .create_refresh_token("mung@dogcat.kr", UserRole::User)
        .unwrap();

    let err = token_error(service.validate_token(&issued.token, TokenType::Access));
    assert!(matches!(err, TokenError::WrongTokenType { .. }));
}

#[test]
fn test_expired_token() {
    let service = create_test_service();
    let mut claims = Claims::new("mung@dogcat.kr", UserRole::User, TokenType::Refresh, "withdogandcat", 60);
    claims.iat = Utc::now().timestamp() - 7200;
    claims.nbf = claims.iat;
    claims.exp = Utc::now().timestamp() - 3600;
    let token = service.encode_claims(&claims).unwrap();

    let err = token_error(service.validate_token(&token, TokenType::Refresh));
    assert_eq!(err, TokenError::TokenExpired);
}

#[test]
fn test_leeway_accepts_recently_expired_token() {
    let config = TokenServiceConfig {
        jwt_secret: "test-secret-key-for-testing".to_string(),
        leeway_seconds: 120,
        ..Default::default()
    };
    let service = TokenService::new(config).unwrap();

    let mut claims = Claims::new("mung@dogcat.kr", UserRole::User, TokenType::Access, "withdogandcat", 60);
    claims.exp = Utc::now().timestamp() - 30;
    let token = service.encode_claims(&claims).unwrap();

    assert!(service.validate_token(&token, TokenType::Access).is_ok());
}

#[test]
fn test_not_yet_valid_token() {
    let service = create_test_service();
    let mut claims = Claims::new("mung@dogcat.kr", UserRole::User, TokenType::Access, "withdogandcat", 7200);
    claims.nbf = Utc::now().timestamp() + 3600;
    let token = service.encode_claims(&claims).unwrap();

    let err = token_error(service.validate_token(&token, TokenType::Access));
    assert_eq!(err, TokenError::TokenNotYetValid);
}

#[test]
fn test_wrong_issuer() {
    let service = create_test_service();
    let claims = Claims::new("mung@dogcat.kr", UserRole::User, TokenType::Access, "someone-else", 60);
    let token = service.encode_claims(&claims).unwrap();

    let err = token_error(service.validate_token(&token, TokenType::Access));
    assert_eq!(err, TokenError::InvalidClaims);
}

#[test]
fn test_wrong_secret_fails_validation() {
    let service = create_test_service();
    let other = TokenService::new(TokenServiceConfig {
        jwt_secret: "different-secret".to_string(),
        ..Default::default()
    })
    .unwrap();

    let token = other
        .create_access_token("mung@dogcat.kr", UserRole::User)
        .unwrap();
    let err = token_error(service.validate_token(&token, TokenType::Access));
    assert_eq!(err, TokenError::InvalidSignature);
}

#[test]
fn test_tampered_signature_fails_at_every_position() {
    let service = create_test_service();
    let issued = service
        .create_refresh_token("mung@dogcat.kr", UserRole::User)
        .unwrap();

    let signature_start = issued.token.rfind('.').unwrap() + 1;
    for position in signature_start..issued.token.len() {
        let mut bytes = issued.token.clone().into_bytes();
        bytes[position] = if bytes[position] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(
            service.validate_token(&tampered, TokenType::Refresh).is_err(),
            "tampering at byte {} was accepted",
            position
        );
    }
}

#[test]
fn test_tampered_payload_fails() {
    let service = create_test_service();
    let token = service
        .create_access_token("mung@dogcat.kr", UserRole::User)
        .unwrap();
    let forged = service
        .create_access_token("admin@dogcat.kr", UserRole::Admin)
        .unwrap();

    // Splice the forged payload under the original signature
    let parts: Vec<&str> = token.split('.').collect();
    let forged_parts: Vec<&str> = forged.split('.').collect();
    let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

    let err = token_error(service.validate_token(&spliced, TokenType::Access));
    assert_eq!(err, TokenError::InvalidSignature);
}

#[test]
fn test_garbage_token() {
    let service = create_test_service();
    let err = token_error(service.validate_token("not-a-valid-token", TokenType::Access));
    assert_eq!(err, TokenError::InvalidTokenFormat);
}

#[test]
fn test_rejects_empty_secret() {
    let result = TokenService::new(TokenServiceConfig {
        jwt_secret: String::new(),
        ..Default::default()
    });
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[test]
fn test_rejects_asymmetric_algorithm() {
    let result = TokenService::new(TokenServiceConfig {
        algorithm: Algorithm::RS256,
        ..Default::default()
    });
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[test]
fn test_config_from_shared_jwt_config() {
    let jwt = wdc_shared::config::JwtConfig {
        algorithm: "hs512".to_string(),
        ..wdc_shared::config::JwtConfig::new("secret").with_access_expiry_minutes(5)
    };
    let config = TokenServiceConfig::from_jwt_config(&jwt).unwrap();

    assert_eq!(config.algorithm, Algorithm::HS512);
    assert_eq!(config.access_token_ttl_seconds, 300);
    assert_eq!(config.jwt_secret, "secret");

    let bad = wdc_shared::config::JwtConfig {
        algorithm: "RS256".to_string(),
        ..Default::default()
    };
    assert!(TokenServiceConfig::from_jwt_config(&bad).is_err());
}
