/// Site settings and privilege thresholds
///
/// Both are small per-install lookup tables keyed by name.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE site_settings (name VARCHAR(255) PRIMARY KEY, value TEXT);
/// CREATE TABLE privileges (name VARCHAR(255) PRIMARY KEY, threshold BIGINT NOT NULL);
/// ```

use sqlx::PgPool;

/// Reputation granted per up-vote on an answer
pub const ANSWER_UP_VOTE_REP: &str = "AnswerUpVoteRep";

/// Reputation granted per down-vote on an answer (normally negative)
pub const ANSWER_DOWN_VOTE_REP: &str = "AnswerDownVoteRep";

/// Site settings lookup
pub struct Setting;

impl Setting {
    /// Reads the raw value of a setting
    ///
    /// # Returns
    ///
    /// The stored text, or `None` if the setting is missing or NULL
    pub async fn get(pool: &PgPool, name: &str) -> Result<Option<String>, sqlx::Error> {
        let value: Option<(Option<String>,)> =
            sqlx::query_as("SELECT value FROM site_settings WHERE name = $1")
                .bind(name)
                .fetch_optional(pool)
                .await?;

        Ok(value.and_then(|(v,)| v))
    }
}

/// Parses a setting value as an integer
///
/// Reads an optional sign and the leading run of digits, ignoring leading
/// whitespace and anything after the digits. Missing or non-numeric values
/// are 0.
///
/// ```
/// use askbase_shared::models::setting::parse_integer_setting;
///
/// assert_eq!(parse_integer_setting(Some("10")), 10);
/// assert_eq!(parse_integer_setting(Some(" -2")), -2);
/// assert_eq!(parse_integer_setting(Some("7 points")), 7);
/// assert_eq!(parse_integer_setting(Some("lots")), 0);
/// assert_eq!(parse_integer_setting(None), 0);
/// ```
pub fn parse_integer_setting(value: Option<&str>) -> i64 {
    let Some(value) = value else {
        return 0;
    };

    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };

    match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => 0,
    }
}

/// Privilege thresholds
pub struct Privilege;

impl Privilege {
    /// Reputation needed to hold the named privilege
    ///
    /// # Returns
    ///
    /// The threshold, or `None` if no privilege has this name
    pub async fn threshold(pool: &PgPool, name: &str) -> Result<Option<i64>, sqlx::Error> {
        let threshold: Option<(i64,)> =
            sqlx::query_as("SELECT threshold FROM privileges WHERE name = $1")
                .bind(name)
                .fetch_optional(pool)
                .await?;

        Ok(threshold.map(|(t,)| t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_setting() {
        assert_eq!(parse_integer_setting(Some("10")), 10);
        assert_eq!(parse_integer_setting(Some("-2")), -2);
        assert_eq!(parse_integer_setting(Some("+5")), 5);
        assert_eq!(parse_integer_setting(Some("  15")), 15);
        assert_eq!(parse_integer_setting(Some("7abc")), 7);
        assert_eq!(parse_integer_setting(Some("3.9")), 3);
    }

    #[test]
    fn test_parse_integer_setting_defaults_to_zero() {
        assert_eq!(parse_integer_setting(None), 0);
        assert_eq!(parse_integer_setting(Some("")), 0);
        assert_eq!(parse_integer_setting(Some("abc")), 0);
        assert_eq!(parse_integer_setting(Some("-")), 0);
        assert_eq!(parse_integer_setting(Some("99999999999999999999999")), 0);
    }
}
