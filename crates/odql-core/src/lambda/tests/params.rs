use crate::{error::QueryError, lambda::ParameterMap};

#[test]
fn rebinding_same_value_is_a_no_op() {
    let mut params = ParameterMap::new();
    params.insert("param_0", "red").expect("first bind");
    params.insert("param_0", "red").expect("same value rebind");

    assert_eq!(params.len(), 1);
}

#[test]
fn rebinding_different_value_conflicts() {
    let mut params = ParameterMap::new();
    params.insert("param_0", "red").expect("first bind");

    let err = params
        .insert("param_0", "blue")
        .expect_err("conflicting rebind should fail");

    assert_eq!(
        err,
        QueryError::ParameterConflict {
            name: "param_0".into()
        }
    );
}

#[test]
fn extend_from_keeps_binding_order() {
    let mut params: ParameterMap = [("b", "2"), ("a", "1")].into_iter().collect();
    let other: ParameterMap = [("c", "3")].into_iter().collect();

    params.extend_from(&other).expect("disjoint merge");

    assert_eq!(params.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
}

#[test]
fn serializes_as_ordered_object() {
    let params: ParameterMap = [("param_1", "x"), ("param_0", "%y%")].into_iter().collect();

    let json = serde_json::to_string(&params).expect("serialize");

    assert_eq!(json, r#"{"param_1":"x","param_0":"%y%"}"#);
}
