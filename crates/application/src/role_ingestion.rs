use pandatur_core::AppResult;
use pandatur_domain::{RoleMatrix, RolesPayload, decode_with_report};
use tracing::warn;

/// Normalizes a stored roles payload into a matrix.
///
/// Nothing here fails: unparseable payloads and unrecognized tokens contribute
/// nothing to the matrix and are logged so vocabulary drift between clients
/// and the server stays visible. `source` names the boundary in the logs.
pub fn ingest_roles(payload: RolesPayload, source: &str) -> RoleMatrix {
    let tokens = match payload.try_into_tokens() {
        Ok(tokens) => tokens,
        Err(error) => {
            warn!(source, %error, "discarding unparseable roles payload");
            Vec::new()
        }
    };

    decode_logged(&tokens, source)
}

/// Normalizes a roles payload submitted for a write.
///
/// Unrecognized tokens are dropped as in [`ingest_roles`], but a payload that
/// cannot be parsed at all is rejected so stored roles stay untouched.
pub(crate) fn parse_role_input(payload: RolesPayload, source: &str) -> AppResult<RoleMatrix> {
    let tokens = payload.try_into_tokens()?;
    Ok(decode_logged(&tokens, source))
}

fn decode_logged(tokens: &[String], source: &str) -> RoleMatrix {
    let report = decode_with_report(tokens);
    for rejected in &report.rejected {
        warn!(
            source,
            token = %rejected.token,
            reason = %rejected.reason,
            "dropping unrecognized role token"
        );
    }

    report.matrix
}
