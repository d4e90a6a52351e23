use std::sync::Arc;
use std::thread;

use jsonrule::{attribute, LiteralSet, Predicate, Record, RuleCompiler, RuleNode, Schema};

struct Session {
    age: i32,
    status: String,
    banned: bool,
}

impl Record for Session {
    fn schema() -> Schema<Self> {
        Schema::<Self>::new("Session")
            .int32("Age", |s| s.age)
            .string("Status", |s| s.status.as_str())
            .bool("Banned", |s| s.banned)
    }
}

fn session(age: i32, status: &str, banned: bool) -> Session {
    Session {
        age,
        status: status.into(),
        banned,
    }
}

fn can_proceed() -> Predicate<Session> {
    let rule = RuleNode::all([
        attribute("Age").greater_than(17),
        attribute("Status").contains(LiteralSet::string(["active", "trial"])),
        !attribute("Banned").equals(true),
    ]);
    RuleCompiler::new().predicate_for(&rule).unwrap()
}

#[test]
fn evaluate_across_threads() {
    let predicate = Arc::new(can_proceed());

    let mut handles = vec![];

    // Thread 1: adult, active, not banned -> match
    let p = Arc::clone(&predicate);
    handles.push(thread::spawn(move || p.test(&session(25, "active", false))));

    // Thread 2: banned -> no match
    let p = Arc::clone(&predicate);
    handles.push(thread::spawn(move || p.test(&session(30, "active", true))));

    // Thread 3: underage -> no match
    let p = Arc::clone(&predicate);
    handles.push(thread::spawn(move || p.test(&session(15, "trial", false))));

    // Thread 4: inactive -> no match
    let p = Arc::clone(&predicate);
    handles.push(thread::spawn(move || p.test(&session(40, "inactive", false))));

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, [true, false, false, false]);
}

#[test]
fn cloned_predicates_filter_shared_records() {
    let records: Arc<Vec<Session>> = Arc::new(
        (0..1_000)
            .map(|i| {
                let status = if i % 3 == 0 { "inactive" } else { "active" };
                session(i % 60, status, i % 7 == 0)
            })
            .collect(),
    );
    let shared = can_proceed();
    let expected = shared.filter(records.iter()).len();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let predicate = shared.clone();
            let records = Arc::clone(&records);
            thread::spawn(move || predicate.filter(records.iter()).len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
