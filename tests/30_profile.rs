use serde_json::{json, Value};

use jobbox::profile::merge::merge;
use jobbox::profile::{CompanyProfile, StudentProfile};

/// Every leaf of `value` must be populated: no nulls anywhere in the tree.
fn assert_no_null_leaves(value: &Value, path: &str) {
    match value {
        Value::Null => panic!("null leaf at {path}"),
        Value::Object(map) => {
            for (k, v) in map {
                assert_no_null_leaves(v, &format!("{path}.{k}"));
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                assert_no_null_leaves(v, &format!("{path}[{i}]"));
            }
        }
        _ => {}
    }
}

fn assert_same_keys(expected: &Value, actual: &Value, path: &str) {
    let (Value::Object(expected), Value::Object(actual)) = (expected, actual) else {
        return;
    };
    let expected_keys: Vec<_> = expected.keys().collect();
    let actual_keys: Vec<_> = actual.keys().collect();
    assert_eq!(expected_keys, actual_keys, "key mismatch at {path}");
    for (k, v) in expected {
        assert_same_keys(v, &actual[k], &format!("{path}.{k}"));
    }
}

#[test]
fn merge_is_total_for_every_kind_of_partial_input() {
    let shape = StudentProfile::default_shape();
    let partials = [
        None,
        Some(json!({})),
        Some(json!({"fullName": "Asha"})),
        Some(json!({"skills": ["Go"], "socialLinks": {"github": "gh"}})),
        Some(json!({"education": [], "projects": [], "languages": null})),
        Some(json!({"unknownKey": "dropped", "fullName": null})),
    ];

    for partial in &partials {
        let merged = merge(&shape, partial.as_ref());
        assert_same_keys(&shape, &merged, "$");
        assert_no_null_leaves(&merged, "$");
    }
}

#[test]
fn merge_never_discards_present_server_values() {
    let shape = CompanyProfile::default_shape();
    let server = json!({
        "companyName": "Acme",
        "foundedYear": "1999",
        "mainServices": ["hiring", "training"],
        "headquarters": {"address": "1 Main St"},
        "companyInfo": {"type": "Private", "stockSymbols": {"bse": "ACME"}},
    });

    let merged = merge(&shape, Some(&server));
    assert_eq!(merged["companyName"], json!("Acme"));
    assert_eq!(merged["foundedYear"], json!("1999"));
    assert_eq!(merged["mainServices"], json!(["hiring", "training"]));
    assert_eq!(merged["headquarters"]["address"], json!("1 Main St"));
    assert_eq!(merged["headquarters"]["pinCode"], json!(""));
    assert_eq!(merged["companyInfo"]["type"], json!("Private"));
    assert_eq!(merged["companyInfo"]["parentCompany"], json!(""));
    assert_eq!(merged["companyInfo"]["stockSymbols"]["bse"], json!("ACME"));
    assert_eq!(merged["companyInfo"]["stockSymbols"]["nse"], json!(""));
}

#[test]
fn sparse_server_profile_fills_in_with_template_rows() {
    // The classic fresh-account case: the server only knows a skill list.
    let profile = StudentProfile::merged(Some(&json!({"skills": ["Go"]}))).unwrap();

    assert_eq!(profile.full_name, "");
    assert_eq!(profile.skills, vec!["Go".to_string()]);
    // One blank education and project row so an edit form has something
    // to render.
    assert_eq!(profile.education.len(), 1);
    assert_eq!(profile.education[0].degree, "");
    assert_eq!(profile.projects.len(), 1);
    assert_eq!(profile.social_links.linkedin, "");
    assert_eq!(profile.languages, Vec::<String>::new());
}

#[test]
fn absent_profile_merges_to_pure_defaults() {
    let student = StudentProfile::merged(None).unwrap();
    assert_eq!(student.education.len(), 1);
    assert_eq!(student.skills, Vec::<String>::new());

    let company = CompanyProfile::merged(None).unwrap();
    assert_eq!(company.company_name, "");
    assert_eq!(company.headquarters.address, "");
}

#[test]
fn server_sent_empty_sequences_survive_verbatim() {
    let profile =
        StudentProfile::merged(Some(&json!({"education": [], "projects": []}))).unwrap();
    assert!(profile.education.is_empty());
    assert!(profile.projects.is_empty());
}

#[test]
fn server_keys_outside_the_variant_are_dropped() {
    let merged = merge(
        &CompanyProfile::default_shape(),
        Some(&json!({"notAField": true, "logo": "l.png"})),
    );
    assert!(merged.get("notAField").is_none());
    assert_eq!(merged["logo"], json!("l.png"));
}

#[test]
fn merged_document_round_trips_through_the_save_payload() {
    // Save is identity: what the edit state holds is exactly what goes
    // back to the server.
    let server = json!({"fullName": "Asha", "skills": ["Go", "Rust"]});
    let profile = StudentProfile::merged(Some(&server)).unwrap();
    let payload = serde_json::to_value(&profile).unwrap();

    assert_eq!(payload["fullName"], json!("Asha"));
    assert_eq!(payload["skills"], json!(["Go", "Rust"]));
    assert_same_keys(&StudentProfile::default_shape(), &payload, "$");
}
