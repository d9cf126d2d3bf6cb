//! Comprehensive tests for the deep freeze traversal

use permafrost::*;

/// A nested mixed graph: `{ a: [[[], [{}]]], o: { o1: { o2: { o3: [] } } } }`
fn graph_fixture() -> ObjectRef {
    let leaf = ObjectRef::new(); // {}
    let a00 = ObjectRef::array(vec![]); // []
    let a01 = ObjectRef::array(vec![Value::Object(leaf)]); // [{}]
    let a0 = ObjectRef::array(vec![Value::Object(a00), Value::Object(a01)]);
    let a = ObjectRef::array(vec![Value::Object(a0)]);

    let o3 = ObjectRef::array(vec![]);
    let o2 = ObjectRef::new().with("o3", Value::Object(o3));
    let o1 = ObjectRef::new().with("o2", Value::Object(o2));
    let o = ObjectRef::new().with("o1", Value::Object(o1));

    ObjectRef::new()
        .with("a", Value::Object(a))
        .with("o", Value::Object(o))
}

fn expect_object(value: Option<Value>) -> ObjectRef {
    value
        .expect("member should exist")
        .as_object()
        .expect("member should be an object")
        .clone()
}

// ═══════════════════════════════════════════════════════════════════
// Primitive Pass-Through
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_null_passes_through() {
    assert_eq!(deep_freeze(&Value::Null), Value::Null);
}

#[test]
fn test_bool_passes_through() {
    assert_eq!(deep_freeze(&Value::Bool(true)), Value::Bool(true));
    assert_eq!(deep_freeze(&Value::Bool(false)), Value::Bool(false));
}

#[test]
fn test_int_passes_through() {
    assert_eq!(deep_freeze(&Value::Int(123)), Value::Int(123));
}

#[test]
fn test_float_passes_through() {
    assert_eq!(deep_freeze(&Value::Float(1.5)), Value::Float(1.5));
}

#[test]
fn test_bigint_passes_through() {
    let huge = i128::from(i64::MAX) * 2;
    assert_eq!(deep_freeze(&Value::BigInt(huge)), Value::BigInt(huge));
}

#[test]
fn test_symbol_passes_through() {
    let symbol = Symbol::new();
    assert_eq!(deep_freeze(&Value::Symbol(symbol)), Value::Symbol(symbol));
}

#[test]
fn test_string_passes_through() {
    assert_eq!(deep_freeze(&Value::string("string")), Value::string("string"));
}

#[test]
fn test_native_fn_passes_through() {
    let native = NativeFn::new("noop", |_| Ok(Value::Null));
    let value = Value::NativeFn(native);
    assert_eq!(deep_freeze(&value), value);
}

#[test]
fn test_primitives_are_vacuously_deeply_frozen() {
    assert!(is_deeply_frozen(&Value::Null));
    assert!(is_deeply_frozen(&Value::Int(0)));
    assert!(is_deeply_frozen(&Value::string("s")));
}

// ═══════════════════════════════════════════════════════════════════
// Objects
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_preserves_object_identity() {
    let root = graph_fixture();
    let frozen = deep_freeze(&Value::Object(root.clone()));
    assert!(frozen
        .as_object()
        .expect("result should be an object")
        .ptr_eq(&root));
}

#[test]
fn test_preserves_object_structure() {
    let root = graph_fixture();
    let snapshot = graph_fixture(); // isomorphic, built identically

    deep_freeze(&Value::Object(root.clone()));

    assert!(Value::Object(root).deep_eq(&Value::Object(snapshot)));
}

#[test]
fn test_freezes_the_root() {
    let root = graph_fixture();
    deep_freeze(&Value::Object(root.clone()));
    assert!(root.is_frozen());
}

#[test]
fn test_recursively_freezes_members() {
    let root = graph_fixture();
    deep_freeze(&Value::Object(root.clone()));

    let a = expect_object(root.get_own("a"));
    assert!(a.is_frozen());

    let a0 = expect_object(a.get_index(0));
    assert!(a0.is_frozen());

    let a00 = expect_object(a0.get_index(0));
    assert!(a00.is_frozen());
    assert!(a00.is_empty());

    let a01 = expect_object(a0.get_index(1));
    assert!(a01.is_frozen());

    let leaf = expect_object(a01.get_index(0));
    assert!(leaf.is_frozen());
    assert!(leaf.is_empty());

    let o = expect_object(root.get_own("o"));
    let o1 = expect_object(o.get_own("o1"));
    let o2 = expect_object(o1.get_own("o2"));
    let o3 = expect_object(o2.get_own("o3"));
    assert!(o.is_frozen());
    assert!(o1.is_frozen());
    assert!(o2.is_frozen());
    assert!(o3.is_frozen());

    assert!(is_deeply_frozen(&Value::Object(root)));
}

#[test]
fn test_is_deeply_frozen_detects_unfrozen_members() {
    let child = ObjectRef::new();
    let root = ObjectRef::new().with("child", Value::Object(child.clone()));

    assert!(!is_deeply_frozen(&Value::Object(root.clone())));

    root.freeze(); // shallow only
    assert!(!is_deeply_frozen(&Value::Object(root.clone())));

    child.freeze();
    assert!(is_deeply_frozen(&Value::Object(root)));
}

// ═══════════════════════════════════════════════════════════════════
// Function Objects
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_freezes_a_function_object() {
    let function = ObjectRef::function(NativeFn::new("build", |_| Ok(Value::Null)));
    deep_freeze(&Value::Object(function.clone()));
    assert!(function.is_frozen());
}

#[test]
fn test_freezes_the_attached_template() {
    let function = ObjectRef::function(NativeFn::new("build", |_| Ok(Value::Null)));
    deep_freeze(&Value::Object(function.clone()));

    let template = expect_object(function.get_own("prototype"));
    assert!(template.is_frozen());

    // the constructor back-link is a cycle through the template
    let constructor = expect_object(template.get_own("constructor"));
    assert!(constructor.ptr_eq(&function));
}

#[test]
fn test_frozen_function_is_still_callable() {
    let function = ObjectRef::function(NativeFn::new("forty_two", |_| Ok(Value::Int(42))));
    deep_freeze(&Value::Object(function.clone()));
    assert_eq!(
        function.call(&[]).expect("call should succeed"),
        Value::Int(42)
    );
}

// ═══════════════════════════════════════════════════════════════════
// Hidden and Symbol-Keyed Members
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_freezes_a_non_enumerable_member() {
    let hidden = ObjectRef::new();
    let object = ObjectRef::new();
    object
        .define("prop", Value::Object(hidden.clone()), false)
        .expect("define should succeed");
    assert!(object.keys().is_empty());

    deep_freeze(&Value::Object(object));
    assert!(hidden.is_frozen());
}

#[test]
fn test_freezes_a_symbol_keyed_member() {
    let target = ObjectRef::new();
    let key = Symbol::new();
    let object = ObjectRef::new();
    object
        .set(key, Value::Object(target.clone()))
        .expect("set should succeed");

    deep_freeze(&Value::Object(object));
    assert!(target.is_frozen());
}

// ═══════════════════════════════════════════════════════════════════
// Pre-Frozen Input
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_freezes_members_of_an_already_frozen_object() {
    let prop = ObjectRef::new();
    let object = ObjectRef::new().with("prop", Value::Object(prop.clone()));
    object.freeze(); // shallow, before the traversal

    deep_freeze(&Value::Object(object.clone()));

    assert!(object.is_frozen());
    assert!(prop.is_frozen());
}

#[test]
fn test_refreezing_is_a_noop() {
    let root = graph_fixture();
    let snapshot = graph_fixture();

    let once = deep_freeze(&Value::Object(root.clone()));
    let twice = deep_freeze(&once);

    assert!(twice.as_object().expect("still an object").ptr_eq(&root));
    assert!(is_deeply_frozen(&twice));
    assert!(twice.deep_eq(&Value::Object(snapshot)));
}

// ═══════════════════════════════════════════════════════════════════
// Cycles and Aliasing
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_mutual_cycle_freezes_both_from_first() {
    let object1 = ObjectRef::new();
    let object2 = ObjectRef::new();
    object1
        .set("prop", Value::Object(object2.clone()))
        .expect("set should succeed");
    object2
        .set("prop", Value::Object(object1.clone()))
        .expect("set should succeed");

    deep_freeze(&Value::Object(object1.clone()));

    assert!(object1.is_frozen());
    assert!(object2.is_frozen());
}

#[test]
fn test_mutual_cycle_freezes_both_from_second() {
    let object1 = ObjectRef::new();
    let object2 = ObjectRef::new();
    object1
        .set("prop", Value::Object(object2.clone()))
        .expect("set should succeed");
    object2
        .set("prop", Value::Object(object1.clone()))
        .expect("set should succeed");

    deep_freeze(&Value::Object(object2.clone()));

    assert!(object1.is_frozen());
    assert!(object2.is_frozen());
}

#[test]
fn test_aliased_member_is_visited_once() {
    let shared = ObjectRef::new();
    let root = ObjectRef::new()
        .with("left", Value::Object(shared.clone()))
        .with("right", Value::Object(shared.clone()));

    let mut visited = VisitedSet::new();
    deep_freeze_with(&Value::Object(root.clone()), &mut visited);

    assert!(shared.is_frozen());
    assert_eq!(visited.len(), 2); // root and shared, nothing twice
}

#[test]
fn test_deep_chain_freezes_every_link() {
    let root = ObjectRef::new();
    let mut nodes = vec![root.clone()];
    let mut current = root.clone();
    for _ in 0..256 {
        let next = ObjectRef::new();
        current
            .set("child", Value::Object(next.clone()))
            .expect("set should succeed");
        nodes.push(next.clone());
        current = next;
    }

    deep_freeze(&Value::Object(root));

    assert!(nodes.iter().all(ObjectRef::is_frozen));
}

// ═══════════════════════════════════════════════════════════════════
// Inherited Members
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_does_not_freeze_inherited_members() {
    let proto_member = ObjectRef::new();
    let helper = ObjectRef::function(NativeFn::new("describe", |_| Ok(Value::Null)));
    let template = ObjectRef::new()
        .with("protoProp", Value::Object(proto_member.clone()))
        .with("describe", Value::Object(helper.clone()));

    let own_member = ObjectRef::new();
    let instance = ObjectRef::with_prototype(template.clone());
    instance
        .set("ownProp", Value::Object(own_member.clone()))
        .expect("set should succeed");

    deep_freeze(&Value::Object(instance.clone()));

    // own members are frozen
    assert!(instance.is_frozen());
    assert!(own_member.is_frozen());

    // inherited members are not
    assert!(!template.is_frozen());
    assert!(!proto_member.is_frozen());
    assert!(!helper.is_frozen());

    // and they are still reachable (and mutable) through the chain
    let inherited = expect_object(instance.get("protoProp"));
    assert!(inherited.set("still", Value::Bool(true)).is_ok());
}

// ═══════════════════════════════════════════════════════════════════
// Composing with an External Visited Set
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_externally_seeded_identity_is_skipped() {
    let skipped = ObjectRef::new();
    let frozen = ObjectRef::new();
    let root = ObjectRef::new()
        .with("skipped", Value::Object(skipped.clone()))
        .with("frozen", Value::Object(frozen.clone()));

    let mut visited = VisitedSet::new();
    visited.insert(skipped.id());

    deep_freeze_with(&Value::Object(root.clone()), &mut visited);

    assert!(root.is_frozen());
    assert!(frozen.is_frozen());
    assert!(!skipped.is_frozen());
}

#[test]
fn test_visited_set_is_shared_across_passes() {
    let shared = ObjectRef::new();
    let first = ObjectRef::new().with("shared", Value::Object(shared.clone()));
    let second = ObjectRef::new().with("shared", Value::Object(shared.clone()));

    let mut visited = VisitedSet::new();
    deep_freeze_with(&Value::Object(first.clone()), &mut visited);
    let after_first = visited.len();
    deep_freeze_with(&Value::Object(second.clone()), &mut visited);

    assert_eq!(after_first, 2);
    assert_eq!(visited.len(), 3); // the shared object was not re-processed
    assert!(first.is_frozen());
    assert!(second.is_frozen());
    assert!(shared.is_frozen());
}

// ═══════════════════════════════════════════════════════════════════
// Observable Immutability
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_frozen_graph_rejects_mutation_everywhere() {
    let root = graph_fixture();
    deep_freeze(&Value::Object(root.clone()));

    assert!(matches!(
        root.set("new", Value::Int(1)),
        Err(ObjectError::Frozen { .. })
    ));

    let a = expect_object(root.get_own("a"));
    assert!(matches!(a.push(Value::Int(1)), Err(ObjectError::Frozen { .. })));

    let o = expect_object(root.get_own("o"));
    assert!(matches!(
        o.delete("o1"),
        Err(ObjectError::Frozen { .. })
    ));
    assert!(matches!(
        o.set_prototype(Some(ObjectRef::new())),
        Err(ObjectError::FrozenPrototype)
    ));

    // reads are unaffected
    assert!(root.get_own("a").is_some());
}
