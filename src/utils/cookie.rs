// ============================================================================
// COOKIE - Espejo del token en `document.cookie`
// ============================================================================

use crate::utils::constants::TOKEN_COOKIE_NAME;

const EPOCH_EXPIRES: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// `token=<valor>; path=/; SameSite=Lax`
pub fn token_cookie(token: &str) -> String {
    format!("{}={}; path=/; SameSite=Lax", TOKEN_COOKIE_NAME, token)
}

/// Cookie vacía que expira en epoch
pub fn expired_token_cookie() -> String {
    format!("{}=; path=/; expires={}; SameSite=Lax", TOKEN_COOKIE_NAME, EPOCH_EXPIRES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_cookie_matches_wire_format() {
        assert_eq!(token_cookie("abc123"), "token=abc123; path=/; SameSite=Lax");
    }

    #[test]
    fn expired_cookie_points_to_epoch() {
        assert_eq!(
            expired_token_cookie(),
            "token=; path=/; expires=Thu, 01 Jan 1970 00:00:00 GMT; SameSite=Lax"
        );
    }
}
