use jsonrule::{Record, RuleCompiler, Schema};
use rust_decimal::Decimal;

struct Context {
    id: i32,
    description: String,
}

struct Customer {
    name: String,
}

struct Order {
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
        Schema::<Self>::new("Customer").string("Name", |c| c.name.as_str())
    }
}

impl Record for Order {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new("Order")
            .nested("Context", |o| Some(&o.context))
            .nested("Customer", |o| o.customer.as_ref())
            .decimal("Total", |o| o.total)
    }
}

const RULE: &str = r#"{
    "$type": "and",
    "statements": [
        {
            "$type": "predicate",
            "attribute": "Context.Id",
            "operator": "contains",
            "value": { "valueType": "Int32", "values": [123456, 432156] }
        },
        {
            "$type": "not",
            "statement": {
                "$type": "predicate",
                "attribute": "Customer.Name",
                "operator": "startsWith",
                "value": { "valueType": "String", "values": ["Jane"] }
            }
        }
    ]
}"#;

fn order(id: i32, description: &str, customer: Option<&str>, total: Decimal) -> Order {
    Order {
        context: Context {
            id,
            description: description.to_owned(),
        },
        customer: customer.map(|name| Customer {
            name: name.to_owned(),
        }),
        total,
    }
}

fn main() {
    let predicate = RuleCompiler::<Order>::new()
        .predicate_from_str(RULE)
        .expect("failed to compile rule");

    println!("{predicate}");

    let orders = [
        order(123_456, "first", Some("John Smith"), Decimal::new(1050, 2)),
        order(654_321, "second", Some("John Doe"), Decimal::new(500, 2)),
        order(432_156, "third", Some("Jane Roe"), Decimal::new(12_000, 2)),
        order(123_456, "fourth", None, Decimal::new(1, 2)),
    ];

    for matched in orders.iter().filter(predicate.as_fn()) {
        println!(
            "matched {} ({}) total {}",
            matched.context.id, matched.context.description, matched.total
        );
    }

    let report = predicate.test_detailed(&orders[2]);
    println!("{report}");
}
