use arbor_json::{parse, parse_status, Arena, ParseOptions, Status, Value, ValueKind};
use rstest::rstest;
use serde_json::{json, Value as Json};

fn parse_json(input: &str) -> Json {
    let arena = Arena::new();
    parse(&arena, input)
        .unwrap_or_else(|err| panic!("parse of {input:?} failed: {err}"))
        .to_json()
}

#[rstest]
#[case("{}", ValueKind::Object)]
#[case("[]", ValueKind::Array)]
#[case("true", ValueKind::True)]
#[case("false", ValueKind::False)]
#[case("null", ValueKind::Null)]
#[case("1024", ValueKind::Int)]
#[case("-1024", ValueKind::Int)]
#[case("+1024", ValueKind::Int)]
#[case("1024.1", ValueKind::Float)]
#[case("-1024.1", ValueKind::Float)]
#[case("+1024.1", ValueKind::Float)]
#[case("'erhan'", ValueKind::String)]
#[case("\"erhan\"", ValueKind::String)]
#[case("{'erhan': 1}", ValueKind::Object)]
#[case("  \n [ ]\r\n", ValueKind::Array)]
fn accepts_root_documents(#[case] input: &str, #[case] kind: ValueKind) {
    let arena = Arena::new();
    let (value, status) = parse_status(&arena, Some(input.as_bytes()));
    assert_eq!(status, Status::Success);
    assert_eq!(value.map(|value| value.kind()), Some(kind));
}

#[rstest]
#[case("[true, false, null]", json!([true, false, null]))]
#[case("['erhan', \"baris\"]", json!(["erhan", "baris"]))]
#[case("['erhan', [], [true], ['']]", json!(["erhan", [], [true], [""]]))]
#[case("['erhan', \"baris\", false]", json!(["erhan", "baris", false]))]
#[case("[  true   ,false \r\n,\r\n1,1.2]", json!([true, false, 1, 1.2]))]
#[case("[[1],1]", json!([[1], 1]))]
#[case("{'a': {'b': [1, {'c': null}]}}", json!({"a": {"b": [1, {"c": null}]}}))]
#[case("{\"k\": 'v', 'n': -3e2}", json!({"k": "v", "n": -300.0}))]
#[case("{'empty': {}, 'list': []}", json!({"empty": {}, "list": []}))]
fn builds_expected_tree(#[case] input: &str, #[case] expected: Json) {
    assert_eq!(parse_json(input), expected);
}

#[rstest]
fn parses_nested_menu_document() {
    let input = "{\"menu\": {\n\
                 \x20 \"id\": \"file\",\n\
                 \x20 \"value\": \"File\",\n\
                 \x20 \"popup\": {\n\
                 \x20   \"menuitem\": [\n\
                 \x20     {\"value\": \"New\", \"onclick\": \"CreateNewDoc()\"},\n\
                 \x20     {\"value\": \"Open\", \"onclick\": \"OpenDoc()\"},\n\
                 \x20     {\"value\": \"Close\", \"onclick\": \"CloseDoc()\"}\n\
                 \x20   ]\n\
                 \x20 }\n\
                 }}";
    assert_eq!(
        parse_json(input),
        json!({"menu": {
            "id": "file",
            "value": "File",
            "popup": {
                "menuitem": [
                    {"value": "New", "onclick": "CreateNewDoc()"},
                    {"value": "Open", "onclick": "OpenDoc()"},
                    {"value": "Close", "onclick": "CloseDoc()"}
                ]
            }
        }})
    );
}

#[rstest]
fn numeric_fidelity() {
    let arena = Arena::new();
    let value = parse(&arena, "[1,2,3,4]").unwrap();
    let items: Vec<Value<'_>> = value.as_array().unwrap().iter().copied().collect();
    assert_eq!(
        items,
        vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]
    );

    let value = parse(&arena, "[1.2]").unwrap();
    assert_eq!(value.as_array().unwrap().get(0), Some(&Value::Float(1.2)));
}

#[rstest]
fn escaped_quotes_are_kept_raw() {
    let arena = Arena::new();
    let value = parse(&arena, r#"["say \"hi\"", 'it\'s', 'a\nb']"#).unwrap();
    let items: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|item| item.as_str())
        .collect();
    assert_eq!(items, vec![r#"say \"hi\""#, r"it\'s", r"a\nb"]);
}

#[rstest]
fn strict_mode_accepts_plain_json() {
    let arena = Arena::new();
    let options = ParseOptions::new().with_strict(true);
    let value =
        arbor_json::parse_with_options(&arena, r#"{"a": [1, -2.5, "x", true]}"#, &options)
            .unwrap();
    assert_eq!(value.to_json(), json!({"a": [1, -2.5, "x", true]}));
}
