use ustache::{PartialCache, Partials, RenderOptions, ToValue, Value, compile};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn map(pairs: Vec<(&str, Value)>) -> Value {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn partials(pairs: &[(&str, &str)]) -> Partials {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_partial_expansion() {
    init_logger();
    let tpl = compile("{{> greet}}!").unwrap();
    let p = partials(&[("greet", "Hi {{name}}")]);

    let ctx = map(vec![("name", "Amy".to_value())]);
    assert_eq!(tpl.render(&ctx, Some(&p)), "Hi Amy!");
}

#[test]
fn test_missing_partials_render_nothing() {
    init_logger();
    let tpl = compile("[{{>greet}}]").unwrap();
    let ctx = map(vec![("name", "Amy".to_value())]);

    assert_eq!(tpl.render(&ctx, None), "[]");
    assert_eq!(tpl.render(&ctx, Some(&partials(&[]))), "[]");
    assert_eq!(tpl.render(&ctx, Some(&partials(&[("greet", "")]))), "[]");
}

#[test]
fn test_partial_name_is_not_a_path() {
    init_logger();
    let tpl = compile("{{>a.b}}").unwrap();
    let p = partials(&[("a.b", "flat")]);
    assert_eq!(tpl.render(&(), Some(&p)), "flat");
}

#[test]
fn test_partial_sees_section_context() {
    init_logger();
    let tpl = compile("{{#users}}{{>row}}{{/users}}").unwrap();
    let p = partials(&[("row", "<{{name}}>")]);
    let ctx = map(vec![(
        "users",
        Value::List(vec![
            map(vec![("name", "a".to_value())]),
            map(vec![("name", "b".to_value())]),
        ]),
    )]);

    assert_eq!(tpl.render(&ctx, Some(&p)), "<a><b>");
}

#[test]
fn test_partials_reference_partials() {
    init_logger();
    let tpl = compile("{{>page}}").unwrap();
    let p = partials(&[("page", "<{{>header}}>"), ("header", "{{title}}")]);
    let ctx = map(vec![("title", "Home".to_value())]);

    assert_eq!(tpl.render(&ctx, Some(&p)), "<Home>");
}

#[test]
fn test_recursive_partial_terminates_on_data() {
    init_logger();
    let tpl = compile("{{>node}}").unwrap();
    let p = partials(&[("node", "{{name}}({{#kids}}{{>node}}{{/kids}})")]);
    let ctx = map(vec![
        ("name", "root".to_value()),
        (
            "kids",
            Value::List(vec![
                map(vec![("name", "a".to_value())]),
                map(vec![
                    ("name", "b".to_value()),
                    ("kids", Value::List(vec![map(vec![("name", "c".to_value())])])),
                ]),
            ]),
        ),
    ]);

    assert_eq!(tpl.render(&ctx, Some(&p)), "root(a()b(c()))");
}

#[test]
fn test_unbounded_recursion_is_cut_at_depth_limit() {
    init_logger();
    let tpl = compile("{{>me}}").unwrap();
    let p = partials(&[("me", ".{{>me}}")]);
    let options = RenderOptions::new().partials(&p).max_partial_depth(5);

    assert_eq!(tpl.render_with(&(), &options), ".....");
}

#[test]
fn test_malformed_partial_renders_nothing() {
    init_logger();
    let tpl = compile("a{{>bad}}b").unwrap();
    let p = partials(&[("bad", "{{#x}}{{/y}}")]);
    assert_eq!(tpl.render(&(), Some(&p)), "ab");
}

#[test]
fn test_cached_partials_follow_source_changes() {
    init_logger();
    let tpl = compile("{{>greet}}").unwrap();
    let cache = PartialCache::new();
    let ctx = map(vec![("name", "Amy".to_value())]);

    let first = partials(&[("greet", "Hi {{name}}")]);
    let options = RenderOptions::new().partials(&first).cache(&cache);
    assert_eq!(tpl.render_with(&ctx, &options), "Hi Amy");

    let second = partials(&[("greet", "Bye {{name}}")]);
    let options = RenderOptions::new().partials(&second).cache(&cache);
    assert_eq!(tpl.render_with(&ctx, &options), "Bye Amy");
    assert_eq!(cache.len(), 1);
}
