use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rocket::http::{CookieJar, Status};
use rocket::outcome::Outcome;
use rocket::request::{self, FromRequest, Request};
use serde::{Deserialize, Serialize};

use super::util::date_time_as_unix_seconds;
use crate::config::Config;
use crate::resp::problem::Problem;

pub static AUTH_COOKIE_NAME: &str = "session_token";

/// Claims of a session token issued by the identity provider.
///
/// The API only checks that staff are signed in; there are no roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffToken {
    #[serde(with = "date_time_as_unix_seconds")]
    iat: DateTime<Utc>,
    #[serde(with = "date_time_as_unix_seconds")]
    exp: DateTime<Utc>,
    /// Provider user id.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl StaffToken {
    pub fn new(sub: impl ToString, email: Option<String>) -> StaffToken {
        let now = Utc::now();
        StaffToken {
            iat: now,
            exp: now + Duration::hours(12),
            sub: sub.to_string(),
            email,
        }
    }

    /// Placeholder identity used when no secret is configured.
    fn anonymous() -> StaffToken {
        StaffToken::new("anonymous", None)
    }

    pub fn encode_jwt(&self, secret: impl AsRef<[u8]>) -> Result<String, jsonwebtoken::errors::Error> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, &self, &EncodingKey::from_secret(secret.as_ref()))
    }
}

pub fn auth_problem(detail: impl ToString) -> Problem {
    Problem::new(Status::Unauthorized, "Unable to authorize user.")
        .detail(detail)
        .clone()
}

fn bearer_token(req: &Request<'_>) -> Option<String> {
    req.headers()
        .get_one("Authorization")
        .and_then(|it| it.strip_prefix("Bearer "))
        .map(|it| it.trim().to_string())
}

fn cookie_token(cookies: &CookieJar<'_>) -> Option<String> {
    cookies.get(AUTH_COOKIE_NAME).map(|it| it.value().to_owned())
}

pub fn extract_claims(token: Option<String>, secret: impl AsRef<[u8]>) -> Result<StaffToken, Problem> {
    let token = token.ok_or_else(|| auth_problem("No session token."))?;

    match decode::<StaffToken>(
        &token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    {
        Ok(it) => {
            tracing::debug!("decoded session token for user: {}", it.sub);
            Ok(it)
        }
        Err(e) => {
            tracing::debug!("rejected session token: {}", e);
            Err(auth_problem("Session token was malformed or expired."))
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for StaffToken {
    type Error = Problem;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let secret = match req.rocket().state::<Config>().and_then(|c| c.jwt_secret.as_ref()) {
            Some(secret) => secret,
            None => return Outcome::Success(StaffToken::anonymous()),
        };

        tracing::trace!("extracting session token from request");
        let token = bearer_token(req).or_else(|| cookie_token(req.cookies()));
        match extract_claims(token, secret) {
            Ok(claims) => Outcome::Success(claims),
            Err(e) => Outcome::Error((Status::Unauthorized, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::SubsecRound;

    #[test]
    fn token_round_trips_with_shared_secret() {
        let token = StaffToken::new("uid-1", Some("staff@example.com".to_string()));
        let mut expected = token.clone();
        expected.iat = expected.iat.trunc_subsecs(0);
        expected.exp = expected.exp.trunc_subsecs(0);

        let jwt = token.encode_jwt("secret").expect("encoding should work");
        let decoded = extract_claims(Some(jwt), "secret").expect("valid token");

        assert_eq!(decoded, expected);
    }

    #[test]
    fn token_with_other_secret_is_rejected() {
        let jwt = StaffToken::new("uid-1", None)
            .encode_jwt("secret")
            .expect("encoding should work");

        let problem = extract_claims(Some(jwt), "other").expect_err("wrong secret");
        assert_eq!(problem.status, Status::Unauthorized);
        assert!(extract_claims(None, "secret").is_err());
    }
}
