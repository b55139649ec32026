use crate::runtime::{Runtime, ValueRef, error::ErrorStatus};

fn ints(rt: &mut Runtime, values: &[i64]) -> Vec<ValueRef> {
    values.iter().map(|v| rt.int(*v).unwrap()).collect()
}

#[test]
fn cons_prepends_and_keeps_tail() {
    let mut rt = Runtime::new();
    let items = ints(&mut rt, &[2, 3]);
    let tail = rt.list_from_values(&items).unwrap();
    let head = rt.int(1).unwrap();

    let list = rt.list_cons(head, tail).unwrap();

    assert_eq!(rt.list_len(list).unwrap(), 1 + rt.list_len(tail).unwrap());
    let first = rt.list_head(list).unwrap();
    assert_eq!(first, head);

    let rest = rt.list_tail(list).unwrap();
    let rest_items = rt.list_items(rest, "test").unwrap().to_vec();
    let tail_items = rt.list_items(tail, "test").unwrap().to_vec();
    assert_eq!(rest_items.len(), tail_items.len());
    for (a, b) in rest_items.iter().zip(&tail_items) {
        assert!(rt.equals(*a, *b).unwrap());
    }
}

#[test]
fn cons_does_not_share_tail_structure() {
    let mut rt = Runtime::new();
    let tail = rt.list_empty().unwrap();
    let head = rt.int(1).unwrap();
    let list = rt.list_cons(head, tail).unwrap();

    assert_ne!(list, tail);
    rt.release(tail).unwrap();
    assert_eq!(rt.list_len(list).unwrap(), 1);
}

#[test]
fn cons_onto_non_list_is_type_mismatch() {
    let mut rt = Runtime::new();
    let head = rt.int(1).unwrap();
    let not_list = rt.int(2).unwrap();
    let live = rt.live_count();

    let err = rt.list_cons(head, not_list).unwrap_err();
    assert_eq!(err.status(), ErrorStatus::TypeMismatch);
    assert_eq!(rt.live_count(), live);
}

#[test]
fn head_of_empty_is_invalid_call() {
    let mut rt = Runtime::new();
    let empty = rt.list_empty().unwrap();
    let err = rt.list_head(empty).unwrap_err();
    assert_eq!(err.status(), ErrorStatus::InvalidFunctionCall);
}

#[test]
fn tail_of_empty_is_empty() {
    let mut rt = Runtime::new();
    let empty = rt.list_empty().unwrap();
    let tail = rt.list_tail(empty).unwrap();
    assert_ne!(tail, empty);
    let is_empty = rt.list_is_empty(tail).unwrap();
    assert!(rt.as_bool(is_empty).unwrap());
}

#[test]
fn length_and_emptiness_as_values() {
    let mut rt = Runtime::new();
    let items = ints(&mut rt, &[1, 2, 3]);
    let list = rt.list_from_values(&items).unwrap();

    let len = rt.list_length(list).unwrap();
    let empty = rt.list_is_empty(list).unwrap();
    assert_eq!(rt.as_int(len).unwrap(), 3);
    assert!(!rt.as_bool(empty).unwrap());
}

#[test]
fn list_releases_elements_on_teardown() {
    let mut rt = Runtime::new();
    let items = ints(&mut rt, &[1, 2, 3]);
    let list = rt.list_from_values(&items).unwrap();
    rt.release_all(&items).unwrap();

    let head = rt.list_head(list).unwrap();
    rt.release(list).unwrap();
    assert!(rt.is_live(head));
    assert!(!rt.is_live(items[1]));
    rt.release(head).unwrap();
    assert_eq!(rt.live_count(), 0);
}
