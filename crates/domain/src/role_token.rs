//! Conversion between [`RoleMatrix`] and persisted role tokens.
//!
//! A token has the form `ROLE_<CATEGORY>_<ACTION>_<LEVELCODE>`. Denied cells
//! are never emitted: the absence of a token is the encoding of `Denied`.

use std::fmt::{Display, Formatter};

use pandatur_core::{AppError, AppResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::matrix::{PermissionKey, RoleMatrix};
use crate::vocabulary::Level;

const TOKEN_PREFIX: &str = "ROLE_";
const MAX_ENCODING_DEPTH: usize = 4;

/// Persisted string form of one non-denied matrix cell.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleToken(String);

impl RoleToken {
    /// Builds the token for one matrix cell.
    #[must_use]
    pub fn new(key: PermissionKey, level: Level) -> Self {
        Self(format!("{TOKEN_PREFIX}{key}_{}", level.code()))
    }

    /// Parses a raw token into its key and level.
    pub fn parse(raw: &str) -> Result<(PermissionKey, Level), TokenRejection> {
        let body = raw
            .trim()
            .strip_prefix(TOKEN_PREFIX)
            .ok_or(TokenRejection::MissingPrefix)?;
        let (key, code) = body
            .rsplit_once('_')
            .ok_or(TokenRejection::MissingLevelCode)?;
        let level =
            Level::from_code(code).ok_or_else(|| TokenRejection::UnknownLevelCode(code.to_owned()))?;
        let key = key
            .parse::<PermissionKey>()
            .map_err(|_| TokenRejection::UnknownKey(key.to_owned()))?;

        Ok((key, level))
    }

    /// Returns the token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RoleToken {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

impl From<RoleToken> for String {
    fn from(value: RoleToken) -> Self {
        value.0
    }
}

/// Reason a raw token contributed nothing to a decoded matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenRejection {
    /// Token does not start with `ROLE_`.
    MissingPrefix,
    /// Token has no `_`-separated trailing segment.
    MissingLevelCode,
    /// Trailing segment is not a known level code.
    UnknownLevelCode(String),
    /// Remaining segments are not a known `<CATEGORY>_<ACTION>` pair.
    UnknownKey(String),
}

impl Display for TokenRejection {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPrefix => formatter.write_str("missing ROLE_ prefix"),
            Self::MissingLevelCode => formatter.write_str("missing level code"),
            Self::UnknownLevelCode(code) => write!(formatter, "unknown level code '{code}'"),
            Self::UnknownKey(key) => write!(formatter, "unknown permission key '{key}'"),
        }
    }
}

/// Raw token dropped during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedToken {
    /// Token exactly as received.
    pub token: String,
    /// Why the token was dropped.
    pub reason: TokenRejection,
}

/// Decoded matrix plus the tokens that were dropped on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Matrix built from every recognized token.
    pub matrix: RoleMatrix,
    /// Tokens that contributed nothing.
    pub rejected: Vec<RejectedToken>,
}

/// Encodes every non-denied cell as a token, in vocabulary order.
#[must_use]
pub fn encode(matrix: &RoleMatrix) -> Vec<RoleToken> {
    matrix
        .iter()
        .filter(|(_, level)| *level != Level::Denied)
        .map(|(key, level)| RoleToken::new(key, level))
        .collect()
}

/// Decodes tokens into a matrix, silently dropping unrecognized ones.
#[must_use]
pub fn decode<I, S>(tokens: I) -> RoleMatrix
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    decode_with_report(tokens).matrix
}

/// Decodes tokens into a matrix and lists every dropped token.
///
/// When several tokens target the same key, the last one wins.
#[must_use]
pub fn decode_with_report<I, S>(tokens: I) -> DecodeReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = DecodeReport::default();

    for token in tokens {
        let token = token.as_ref();
        match RoleToken::parse(token) {
            Ok((key, level)) => {
                report.matrix.set(key, Some(level));
            }
            Err(reason) => report.rejected.push(RejectedToken {
                token: token.to_owned(),
                reason,
            }),
        }
    }

    report
}

/// Decodes the persisted text form of a roles field.
///
/// Accepts a JSON array, a JSON string holding a JSON array (any nesting up to
/// a small depth) and yields an empty matrix for anything unparseable.
#[must_use]
pub fn decode_json(raw: &str) -> RoleMatrix {
    decode(RolesPayload::Encoded(raw.to_owned()).into_tokens())
}

/// Roles field as it arrives over the wire.
///
/// Different endpoints return either a token array or a JSON-encoded string
/// of that array. The payload is normalized once with
/// [`RolesPayload::into_tokens`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RolesPayload {
    /// Already-parsed token array.
    Tokens(Vec<String>),
    /// JSON text encoding the array, possibly encoded more than once.
    Encoded(String),
    /// Null, missing or any other JSON shape.
    #[default]
    Missing,
}

impl RolesPayload {
    /// Builds a payload from an arbitrary JSON value.
    ///
    /// Non-string array items are skipped.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Tokens(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(token) => Some(token),
                        _ => None,
                    })
                    .collect(),
            ),
            Value::String(encoded) => Self::Encoded(encoded),
            _ => Self::Missing,
        }
    }

    /// Normalizes the payload into raw tokens.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when an encoded payload is not valid
    /// JSON or is nested too deeply.
    pub fn try_into_tokens(self) -> AppResult<Vec<String>> {
        match self {
            Self::Tokens(tokens) => Ok(tokens),
            Self::Missing => Ok(Vec::new()),
            Self::Encoded(encoded) => parse_encoded(encoded.as_str(), 0),
        }
    }

    /// Normalizes the payload into raw tokens. Parse failures yield no tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<String> {
        self.try_into_tokens().unwrap_or_default()
    }
}

impl From<Vec<RoleToken>> for RolesPayload {
    fn from(value: Vec<RoleToken>) -> Self {
        Self::Tokens(value.into_iter().map(String::from).collect())
    }
}

impl<'de> Deserialize<'de> for RolesPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::from_value(Value::deserialize(deserializer)?))
    }
}

fn parse_encoded(encoded: &str, depth: usize) -> AppResult<Vec<String>> {
    if encoded.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value = serde_json::from_str::<Value>(encoded)
        .map_err(|error| {
            AppError::Validation(format!("roles payload is not valid JSON: {error}"))
        })?;

    match RolesPayload::from_value(value) {
        RolesPayload::Tokens(tokens) => Ok(tokens),
        RolesPayload::Encoded(inner) if depth + 1 < MAX_ENCODING_DEPTH => {
            parse_encoded(inner.as_str(), depth + 1)
        }
        RolesPayload::Encoded(_) => Err(AppError::Validation(format!(
            "roles payload is encoded more than {MAX_ENCODING_DEPTH} times"
        ))),
        RolesPayload::Missing => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests;
