//! Credential cookie contract shared by the login service and the gateway.

use chrono::Duration;
use cookie::time;
use cookie::Cookie;

/// Cookie carrying the access token.
///
/// HTTP-only, secure, root path, max-age equal to the token lifetime.
pub fn auth_cookie(name: &str, token: &str, ttl: Duration) -> Cookie<'static> {
    Cookie::build((name.to_string(), token.to_string()))
        .http_only(true)
        .secure(true)
        .path("/")
        .max_age(time::Duration::seconds(ttl.num_seconds()))
        .build()
}

/// Cookie that overwrites the access token with an empty, already expired value.
pub fn removal_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), String::new()))
        .http_only(true)
        .secure(true)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}
