//! HS256 token issue and verification

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use super::Claims;
use crate::config::Settings;

/// Issues and verifies symmetric-key JWTs
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    expire_minutes: i64,
}

impl TokenService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            encoding: EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
            issuer: settings.jwt_issuer.clone(),
            audience: settings.jwt_audience.clone(),
            expire_minutes: settings.jwt_expire_minutes,
        }
    }

    pub fn issue(
        &self,
        user_id: Uuid,
        email: &str,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            aud: self.audience.clone(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.expire_minutes)).timestamp(),
            jti: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        decode::<Claims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    fn settings(secret: &str) -> Settings {
        Settings {
            env: Environment::Dev,
            server_addr: String::new(),
            database_url: String::new(),
            database_max_connections: 1,
            cors_allow_origins: Vec::new(),
            jwt_secret: secret.to_string(),
            jwt_issuer: "todotasks-backend".to_string(),
            jwt_audience: "todotasks-api".to_string(),
            jwt_expire_minutes: 60,
            admin_email: String::new(),
            admin_password: String::new(),
        }
    }

    #[test]
    fn issued_token_verifies() {
        let service = TokenService::new(&settings("test-secret"));
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id, "admin@test.com", "Admin").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "admin@test.com");
        assert_eq!(claims.role, "Admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_key_is_rejected() {
        let issuer = TokenService::new(&settings("secret-a"));
        let verifier = TokenService::new(&settings("secret-b"));

        let token = issuer.issue(Uuid::new_v4(), "admin@test.com", "Admin").unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = TokenService::new(&settings("test-secret"));
        assert!(service.verify("not-a-jwt").is_err());
    }
}
