use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use ustache::{Template, ToValue, Value, compile, to_value};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(ToValue)]
struct Order {
    id: u64,
    #[value("customer")]
    customer_name: String,
    #[value(rename = "when")]
    placed_on: NaiveDate,
    total: Decimal,
    lines: Vec<Line>,
    note: Option<String>,
    #[value(ignore)]
    #[allow(dead_code)]
    secret: String,
    r#type: &'static str,
}

#[derive(ToValue)]
struct Line {
    sku: String,
    qty: u32,
}

#[test]
fn test_derive_to_value_keys() {
    init_logger();
    let line = Line {
        sku: "A-1".to_string(),
        qty: 2,
    };
    match line.to_value() {
        Value::Map(map) => {
            assert_eq!(map.get("sku"), Some(&Value::Str("A-1".to_string())));
            assert_eq!(map.get("qty"), Some(&Value::U32(2)));
            assert_eq!(map.len(), 2);
        }
        other => panic!("Expected Map, got {:?}", other),
    }
}

#[test]
fn test_render_derived_context() {
    init_logger();
    let order = Order {
        id: 7,
        customer_name: "Amy".to_string(),
        placed_on: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        total: Decimal::from_str("12.50").unwrap(),
        lines: vec![
            Line {
                sku: "A-1".to_string(),
                qty: 2,
            },
            Line {
                sku: "B-2".to_string(),
                qty: 0,
            },
        ],
        note: None,
        secret: "hidden".to_string(),
        r#type: "web",
    };

    let tpl = compile(
        "#{{id}} {{customer}} {{when}} {{total}} {{type}}\
         {{#lines}}|{{sku}}x{{qty}}{{^qty}}none{{/qty}}{{/lines}}\
         {{^note}}|no note{{/note}}[{{secret}}]",
    )
    .unwrap();

    assert_eq!(
        tpl.render(&order, None),
        "#7 Amy 2024-03-09 12.50 web|A-1x2|B-2xnone|no note[]"
    );
}

#[derive(Serialize)]
struct Team {
    name: String,
    members: Vec<Member>,
    tags: Vec<&'static str>,
    lead: Option<Member>,
}

#[derive(Serialize)]
struct Member {
    handle: String,
    active: bool,
}

#[test]
fn test_render_serde_context() {
    init_logger();
    let team = Team {
        name: "core".to_string(),
        members: vec![
            Member {
                handle: "ann".to_string(),
                active: true,
            },
            Member {
                handle: "bob".to_string(),
                active: false,
            },
        ],
        tags: vec!["rust", "templates"],
        lead: None,
    };
    let ctx = to_value(&team).unwrap();

    let tpl: Template = "{{name}}:{{#members}} {{handle}}{{#active}}*{{/active}}{{/members}} \
                         [{{tags}}] {{#tags}}<{{.}}>{{/tags}}{{^lead}} no lead{{/lead}}"
        .parse()
        .unwrap();

    assert_eq!(
        tpl.render(&ctx, None),
        "core: ann* bob [rust,templates] <rust><templates> no lead"
    );
}

#[test]
fn test_dotted_path_into_serde_struct() {
    init_logger();
    let team = Team {
        name: "core".to_string(),
        members: vec![Member {
            handle: "ann".to_string(),
            active: true,
        }],
        tags: vec![],
        lead: Some(Member {
            handle: "zed".to_string(),
            active: true,
        }),
    };
    let ctx = to_value(&team).unwrap();
    let tpl = compile("{{lead.handle}}/{{members.0.handle}}/{{members.1.handle}}").unwrap();

    assert_eq!(tpl.render(&ctx, None), "zed/ann/");
}
