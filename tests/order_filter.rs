use jsonrule::{compile_predicate, CompileError, Record, RuleCompiler, Schema};
use rust_decimal::Decimal;
use serde_json::{json, Value as Json};

struct Context {
    id: i32,
    description: String,
}

struct Customer {
    name: String,
    vip: bool,
}

struct OrderData {
    context: Context,
    customer: Option<Customer>,
    total: Decimal,
}

impl Record for Context {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new("Context")
            .int32("Id", |c| c.id)
            .string("Description", |c| c.description.as_str())
    }
}

impl Record for Customer {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new("Customer")
            .string("Name", |c| c.name.as_str())
            .bool("Vip", |c| c.vip)
    }
}

impl Record for OrderData {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new("OrderData")
            .nested("Context", |o| Some(&o.context))
            .nested("Customer", |o| o.customer.as_ref())
            .decimal("Total", |o| o.total)
    }
}

fn order(id: i32, description: &str, customer: Option<&str>, total: &str) -> OrderData {
    OrderData {
        context: Context {
            id,
            description: description.into(),
        },
        customer: customer.map(|name| Customer {
            name: name.into(),
            vip: name.ends_with('!'),
        }),
        total: total.parse().unwrap(),
    }
}

fn orders() -> Vec<OrderData> {
    vec![
        order(123_456, "Description1", Some("John Smith"), "10.50"),
        order(123_456, "Description", Some("Johnny Cash!"), "99.99"),
        order(654_321, "Description", Some("John Doe"), "5"),
        order(123_456, "Description2", Some("Jane Roe"), "120.00"),
        order(123_456, "Description", None, "0.01"),
    ]
}

fn predicate(attribute: &str, operator: &str, value_type: &str, values: Json) -> Json {
    json!({
        "$type": "predicate",
        "attribute": attribute,
        "operator": operator,
        "value": { "valueType": value_type, "values": values }
    })
}

fn matching_ids(rule: &Json, records: &[OrderData]) -> Vec<usize> {
    let predicate = compile_predicate::<OrderData>(rule).unwrap();
    records
        .iter()
        .enumerate()
        .filter(|(_, o)| predicate.test(o))
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn contains_on_nested_id() {
    let records = vec![
        order(123_456, "a", None, "1"),
        order(654_321, "b", None, "1"),
    ];
    let rule = predicate("Context.Id", "contains", "Int32", json!([123_456, 432_156]));
    assert_eq!(matching_ids(&rule, &records), [0]);
}

#[test]
fn and_with_negated_equality() {
    let rule = json!({
        "$type": "and",
        "statements": [
            predicate("Context.Id", "contains", "Int32", json!([123_456, 432_156])),
            {
                "$type": "and",
                "statements": [
                    {
                        "$type": "not",
                        "statement": predicate("Context.Description", "equals", "String", json!(["Description"]))
                    }
                ]
            }
        ]
    });
    assert_eq!(matching_ids(&rule, &orders()), [0, 3]);
}

#[test]
fn equality_and_prefix_across_nested_records() {
    let rule = json!({
        "$type": "and",
        "statements": [
            predicate("Context.Id", "equals", "Int32", json!([123_456])),
            predicate("Customer.Name", "startswith", "String", json!(["John"]))
        ]
    });
    assert_eq!(matching_ids(&rule, &orders()), [0, 1]);
}

#[test]
fn absent_customer_never_matches_and_negation_does() {
    let rule = predicate("Customer.Vip", "equals", "Bool", json!([false]));
    assert_eq!(matching_ids(&rule, &orders()), [0, 2, 3]);

    let negated = json!({ "$type": "not", "statement": rule });
    assert_eq!(matching_ids(&negated, &orders()), [1, 4]);
}

#[test]
fn decimal_threshold() {
    let rule = predicate("Total", "greaterThan", "Decimal", json!([10.5]));
    assert_eq!(matching_ids(&rule, &orders()), [1, 3]);

    let mixed_case = predicate("Total", "GreaterThan", "decimal", json!([1e2]));
    assert_eq!(matching_ids(&mixed_case, &orders()), [3]);
}

#[test]
fn decimal_literal_keeps_full_precision() {
    let records = vec![
        order(1, "a", None, "1.00000000000000005"),
        order(2, "b", None, "1.00000000000000011"),
    ];
    let predicate = RuleCompiler::<OrderData>::new()
        .predicate_from_str(
            r#"{"$type":"predicate","attribute":"Total","operator":"greaterThan",
                "value":{"valueType":"Decimal","values":[1.0000000000000001]}}"#,
        )
        .unwrap();
    assert_eq!(
        predicate.to_string(),
        "Predicate(Total greaterthan [1.0000000000000001])"
    );
    let matched: Vec<i32> = predicate
        .filter(&records)
        .iter()
        .map(|o| o.context.id)
        .collect();
    assert_eq!(matched, [2]);
}

#[test]
fn or_of_alternatives() {
    let rule = json!({
        "type": "OR",
        "statements": [
            predicate("Context.Id", "equals", "Int32", json!([654_321])),
            predicate("Context.Description", "equals", "String", json!(["Description2"]))
        ]
    });
    assert_eq!(matching_ids(&rule, &orders()), [2, 3]);
}

#[test]
fn unknown_statement_type() {
    let rule = json!({ "$type": "xor", "statements": [] });
    let err = compile_predicate::<OrderData>(&rule).unwrap_err();
    assert!(
        matches!(err, CompileError::UnsupportedStatementType { ref tag } if tag == "xor"),
        "unexpected error: {err}"
    );
}

#[test]
fn unknown_nested_attribute() {
    let rule = predicate("Context.Missing", "equals", "Int32", json!([1]));
    let err = compile_predicate::<OrderData>(&rule).unwrap_err();
    assert!(matches!(
        err,
        CompileError::UnknownAttribute { ref segment, ref record, .. }
            if segment == "Missing" && record == "Context"
    ));
}

#[test]
fn structural_form_renders_and_evaluates() {
    let rule = json!({
        "$type": "and",
        "statements": [
            predicate("Context.Id", "contains", "Int32", json!([123_456])),
            { "$type": "not", "statement": predicate("Customer.Name", "startswith", "String", json!(["Jane"])) }
        ]
    });
    let expr = RuleCompiler::<OrderData>::new()
        .compile_expression(&rule)
        .unwrap();
    assert_eq!(
        expr.to_string(),
        "((Context.Id contains [123456]) AND (NOT (Customer.Name startswith [\"Jane\"])))"
    );
    let matched: Vec<usize> = orders()
        .iter()
        .enumerate()
        .filter(|(_, o)| expr.evaluate(o))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(matched, [0, 1, 4]);
}

#[test]
fn predicate_from_file() {
    let path = std::env::temp_dir().join(format!("jsonrule-order-{}.json", std::process::id()));
    let rule = predicate("Customer.Name", "equals", "String", json!(["Jane Roe"]));
    std::fs::write(&path, rule.to_string()).unwrap();

    let predicate = RuleCompiler::<OrderData>::new()
        .predicate_from_file(&path)
        .unwrap();
    std::fs::remove_file(&path).unwrap();

    let all = orders();
    assert_eq!(predicate.filter(&all).len(), 1);
}
