use std::{cell::RefCell, rc::Rc};

use collection_observer::*;
use proptest::prelude::*;

type Log = Rc<RefCell<Vec<(ActionKind, Option<usize>, u8)>>>;

fn logged_list(items: &[u8]) -> (ObservableList<u8>, Log) {
    let log = Log::default();
    let mut list: ObservableList<u8> = items.iter().copied().collect();
    let l = log.clone();
    list.set_listener(move |e| {
        l.borrow_mut()
            .push((e.action(), e.index(), *e.element()))
    });
    (list, log)
}

#[derive(Debug, Clone)]
enum Op {
    Add(u8),
    InsertAt(usize, u8),
    AddAll(Vec<u8>),
    RemoveAt(usize),
    Remove(u8),
    ReplaceAt(usize, u8),
    Move(usize, usize),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::Add),
        (any::<usize>(), any::<u8>()).prop_map(|(i, v)| Op::InsertAt(i, v)),
        prop::collection::vec(any::<u8>(), 0..4).prop_map(Op::AddAll),
        any::<usize>().prop_map(Op::RemoveAt),
        any::<u8>().prop_map(Op::Remove),
        (any::<usize>(), any::<u8>()).prop_map(|(i, v)| Op::ReplaceAt(i, v)),
        (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Move(a, b)),
        Just(Op::Clear),
    ]
}

fn apply(list: &mut ObservableList<u8>, op: &Op) {
    let len = list.len();
    match op {
        Op::Add(v) => {
            list.add(*v);
        }
        Op::InsertAt(i, v) => list.insert_at(i % (len + 1), *v),
        Op::AddAll(vs) => {
            list.add_all(vs.iter().copied());
        }
        Op::RemoveAt(i) if len > 0 => {
            list.remove_at(i % len);
        }
        Op::Remove(v) => {
            list.remove(v);
        }
        Op::ReplaceAt(i, v) if len > 0 => {
            list.replace_at(i % len, *v);
        }
        Op::Move(a, b) if len > 0 => {
            let value = list[a % len];
            list.move_element(&value, b % len).unwrap();
        }
        Op::Clear => list.clear(),
        _ => {}
    }
}

proptest! {
    #[test]
    fn add_minus_remove_events_equals_len(ops in prop::collection::vec(op(), 0..40)) {
        let (mut list, log) = logged_list(&[]);
        for op in &ops {
            apply(&mut list, op);
        }
        let log = log.borrow();
        let adds = log.iter().filter(|(a, _, _)| a.is_add()).count();
        let removes = log.iter().filter(|(a, _, _)| a.is_remove()).count();
        prop_assert_eq!(adds - removes, list.len());
    }

    #[test]
    fn remove_at_event_count(items in prop::collection::vec(any::<u8>(), 1..20), i in any::<usize>()) {
        let (mut list, log) = logged_list(&items);
        let n = items.len();
        let i = i % n;
        list.remove_at(i);
        let log = log.borrow();
        prop_assert_eq!(log.len(), 1 + (n - 1 - i));
        prop_assert_eq!(log[0], (ActionKind::Remove, Some(i), items[i]));
        for (k, &(action, index, element)) in log.iter().enumerate().skip(1) {
            prop_assert_eq!(action, ActionKind::Update);
            prop_assert_eq!(index, Some(i + k - 1));
            prop_assert_eq!(element, list[i + k - 1]);
        }
    }

    #[test]
    fn remove_event_count(items in prop::collection::vec(any::<u8>(), 1..20), i in any::<usize>()) {
        let (mut list, log) = logged_list(&items);
        let n = items.len();
        let value = items[i % n];
        let i = list.index_of(&value).unwrap();
        prop_assert_eq!(list.remove(&value), Some(value));
        let log = log.borrow();
        prop_assert_eq!(log.len(), 1 + (n - 1 - i));
        prop_assert_eq!(log[0], (ActionKind::Remove, Some(i), value));
        for (k, &(action, index, element)) in log.iter().enumerate().skip(1) {
            prop_assert_eq!(action, ActionKind::Update);
            prop_assert_eq!(index, Some(i + k - 1));
            prop_assert_eq!(element, list[i + k - 1]);
        }
    }

    #[test]
    fn move_element_event_count(items in prop::collection::vec(any::<u8>(), 1..20), from in any::<usize>(), to in any::<usize>()) {
        let (mut list, log) = logged_list(&items);
        let n = items.len();
        let value = items[from % n];
        let i = list.index_of(&value).unwrap();
        let j = to % n;
        list.move_element(&value, j).unwrap();
        let log = log.borrow();
        let expected = if i == j { 0 } else { i.abs_diff(j) + 1 };
        prop_assert_eq!(log.len(), expected);
        prop_assert!(log.iter().all(|(a, index, e)| *a == ActionKind::Update && list[index.unwrap()] == *e));
        prop_assert_eq!(list.len(), n);
        prop_assert_eq!(list[j], value);
    }

    #[test]
    fn add_all_preserves_order(start in prop::collection::vec(any::<u8>(), 0..10), values in prop::collection::vec(any::<u8>(), 0..10)) {
        let (mut list, log) = logged_list(&start);
        list.add_all(values.clone());
        let log = log.borrow();
        let expected: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(k, &v)| (ActionKind::AddAll, Some(start.len() + k), v))
            .collect();
        prop_assert_eq!(&*log, &expected);
    }
}
