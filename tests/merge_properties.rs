//! Merge invariants checked over a spread of inputs.

use rest_endpoint::{merge, merge_parameters, Endpoint, Parameters, Route};
use serde_json::{json, Value};

fn params(value: Value) -> Parameters {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

fn inputs() -> Vec<Parameters> {
    vec![
        params(json!({})),
        params(json!({"headers": {"Accept": "text/html"}})),
        params(json!({"headers": {"X-Mixed-Case": "1", "AUTHORIZATION": "token a"}})),
        params(json!({"headers": {"accept": "b", "Accept": "c"}})),
        params(json!({"mediaType": {"previews": ["squirrel-girl-preview", "squirrel-girl"]}})),
        params(json!({"mediaType": {"format": "diff"}, "baseUrl": "https://ghe.local/api/v3"})),
        params(json!({"request": {"timeout": 5}, "labels": ["x", "y"]})),
    ]
}

fn endpoint() -> Endpoint {
    Endpoint::builtin()
        .unwrap()
        .with_defaults(&params(json!({"mediaType": {"previews": ["jean-grey-preview"]}})))
        .unwrap()
}

#[test]
fn test_header_keys_always_lowercase() {
    let endpoint = endpoint();
    for input in inputs() {
        let merged = endpoint.merge("GET /user", Some(&input));
        let headers = merged["headers"].as_object().unwrap();
        for key in headers.keys() {
            assert_eq!(key, &key.to_lowercase(), "input {:?}", input);
        }
    }
}

#[test]
fn test_previews_unique_and_unsuffixed() {
    let endpoint = endpoint();
    for input in inputs() {
        let merged = endpoint.merge("GET /user", Some(&input));
        let previews = merged["mediaType"]["previews"].as_array().unwrap();

        for (i, preview) in previews.iter().enumerate() {
            let name = preview.as_str().unwrap();
            assert!(!name.ends_with("-preview"), "{} in {:?}", name, input);
            assert!(!previews[i + 1..].contains(preview), "duplicate {}", name);
        }
        assert_eq!(previews[0], "jean-grey");
    }
}

#[test]
fn test_merge_is_idempotent() {
    let endpoint = endpoint();
    for input in inputs() {
        let once = endpoint.merge("GET /user", Some(&input));
        let twice = merge_parameters(Some(&once), Parameters::new());
        assert_eq!(twice, once);
    }
}

#[test]
fn test_inputs_untouched() {
    let endpoint = endpoint();
    let defaults_before = endpoint.defaults().clone();

    for input in inputs() {
        let route = Route::Endpoint(input.clone());
        let _ = merge(Some(endpoint.defaults()), Some(&route), None);
        assert_eq!(route, Route::Endpoint(input));
    }

    assert_eq!(endpoint.defaults(), &defaults_before);
}

#[test]
fn test_call_parameters_win_over_defaults() {
    let endpoint = endpoint();
    let merged = endpoint.merge(
        "PATCH /user",
        Some(&params(json!({
            "baseUrl": "https://ghe.local/api/v3",
            "mediaType": {"format": "raw"}
        }))),
    );

    assert_eq!(merged["method"], "PATCH");
    assert_eq!(merged["baseUrl"], "https://ghe.local/api/v3");
    assert_eq!(merged["mediaType"]["format"], "raw");
}
