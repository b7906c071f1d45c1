use pandatur_core::AppError;
use proptest::prelude::*;

use crate::matrix::{PermissionKey, RoleMatrix};
use crate::vocabulary::{Action, Category, Level};

use super::{
    RoleToken, RolesPayload, TokenRejection, decode, decode_json, decode_with_report, encode,
};

fn granted_matrix() -> impl Strategy<Value = RoleMatrix> {
    proptest::collection::vec(
        (
            0..Category::all().len(),
            0..Action::all().len(),
            1..Level::all().len(),
        ),
        0..40,
    )
    .prop_map(|cells| {
        cells
            .into_iter()
            .map(|(category, action, level)| {
                (
                    PermissionKey::new(Category::all()[category], Action::all()[action]),
                    Level::all()[level],
                )
            })
            .collect::<RoleMatrix>()
    })
}

proptest! {
    #[test]
    fn decode_restores_encoded_matrix(matrix in granted_matrix()) {
        prop_assert_eq!(decode(encode(&matrix).iter().map(RoleToken::as_str)), matrix);
    }

    #[test]
    fn encoded_tokens_embed_vocabulary_keys(matrix in granted_matrix()) {
        for token in encode(&matrix) {
            let segments: Vec<&str> = token.as_str().split('_').collect();
            prop_assert!(segments.len() >= 4);
            prop_assert_eq!(segments[0], "ROLE");

            let key = segments[1..segments.len() - 1].join("_");
            let parsed = key.parse::<PermissionKey>();
            prop_assert!(parsed.is_ok());
            prop_assert_eq!(parsed.map(|value| value.to_string()).unwrap_or_default(), key);
        }
    }
}

#[test]
fn empty_token_list_denies_every_key() {
    let matrix = decode(Vec::<String>::new());

    for key in PermissionKey::all() {
        assert_eq!(matrix.level(key), Level::Denied);
    }
    assert!(matrix.is_empty());
}

#[test]
fn encode_skips_denied_cells() {
    let matrix = RoleMatrix::from_iter([
        (PermissionKey::new(Category::Users, Action::View), Level::Denied),
        (PermissionKey::new(Category::Leads, Action::Edit), Level::Team),
    ]);

    let tokens: Vec<String> = encode(&matrix).into_iter().map(String::from).collect();

    assert_eq!(tokens, vec!["ROLE_LEADS_EDIT_TEAM".to_owned()]);
}

#[test]
fn encode_follows_vocabulary_order_not_insertion_order() {
    let mut matrix = RoleMatrix::new();
    matrix.set(
        PermissionKey::new(Category::Logs, Action::View),
        Some(Level::Allowed),
    );
    matrix.set(
        PermissionKey::new(Category::Users, Action::Delete),
        Some(Level::Allowed),
    );
    matrix.set(
        PermissionKey::new(Category::Users, Action::View),
        Some(Level::IfResponsible),
    );

    let tokens: Vec<String> = encode(&matrix).into_iter().map(String::from).collect();

    assert_eq!(
        tokens,
        vec![
            "ROLE_USERS_VIEW_IFRESPONSIBLE".to_owned(),
            "ROLE_USERS_DELETE_ALLOWED".to_owned(),
            "ROLE_LOGS_VIEW_ALLOWED".to_owned(),
        ]
    );
}

#[test]
fn decode_reports_unrecognized_tokens() {
    let report = decode_with_report([
        "ROLE_USERS_VIEW_ALLOWED",
        "ROLE_USERS_EDIT_SUPERUSER",
        "ROLE_INVOICES_VIEW_TEAM",
        "USERS_VIEW_TEAM",
        "ROLE_",
    ]);

    assert_eq!(
        report
            .matrix
            .level_for(Category::Users, Action::View),
        Level::Allowed
    );
    assert_eq!(report.matrix.len(), 1);
    assert_eq!(
        report
            .rejected
            .iter()
            .map(|rejected| rejected.reason.clone())
            .collect::<Vec<_>>(),
        vec![
            TokenRejection::UnknownLevelCode("SUPERUSER".to_owned()),
            TokenRejection::UnknownKey("INVOICES_VIEW".to_owned()),
            TokenRejection::MissingPrefix,
            TokenRejection::MissingLevelCode,
        ]
    );
}

#[test]
fn decode_keeps_explicit_denied_tokens() {
    let matrix = decode(["ROLE_CHAT_VIEW_DENIED"]);

    assert_eq!(
        matrix.get(PermissionKey::new(Category::Chat, Action::View)),
        Some(Level::Denied)
    );
}

#[test]
fn double_encoded_roles_decode_like_plain_array() {
    let plain = decode(["ROLE_USERS_VIEW_ALLOWED"]);

    assert_eq!(decode_json(r#""[\"ROLE_USERS_VIEW_ALLOWED\"]""#), plain);
    assert_eq!(decode_json(r#"["ROLE_USERS_VIEW_ALLOWED"]"#), plain);
}

#[test]
fn unparseable_roles_text_yields_empty_matrix() {
    assert!(decode_json("[ROLE_USERS_VIEW_ALLOWED").is_empty());
    assert!(decode_json("").is_empty());
    assert!(decode_json("null").is_empty());
    assert!(decode_json("42").is_empty());
}

#[test]
fn payload_deserializes_from_array_or_string() -> Result<(), serde_json::Error> {
    let from_array: RolesPayload = serde_json::from_str(r#"["ROLE_SALES_VIEW_TEAM", 7]"#)?;
    let from_string: RolesPayload =
        serde_json::from_str(r#""[\"ROLE_SALES_VIEW_TEAM\"]""#)?;
    let from_null: RolesPayload = serde_json::from_str("null")?;

    assert_eq!(
        from_array.into_tokens(),
        vec!["ROLE_SALES_VIEW_TEAM".to_owned()]
    );
    assert_eq!(
        from_string.into_tokens(),
        vec!["ROLE_SALES_VIEW_TEAM".to_owned()]
    );
    assert!(from_null.into_tokens().is_empty());
    Ok(())
}

#[test]
fn payload_reports_invalid_json() {
    let result = RolesPayload::Encoded("{not json".to_owned()).try_into_tokens();
    assert!(matches!(result, Err(AppError::Validation(_))));
}
