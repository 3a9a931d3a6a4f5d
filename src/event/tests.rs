use assert_call::{call, CallRecorder};
use rstest::rstest;

use super::*;

#[rstest]
#[case(ActionKind::Add, ActionCategory::Add)]
#[case(ActionKind::AddAll, ActionCategory::Add)]
#[case(ActionKind::SetInsert, ActionCategory::Add)]
#[case(ActionKind::Remove, ActionCategory::Remove)]
#[case(ActionKind::RemoveAll, ActionCategory::Remove)]
#[case(ActionKind::Clear, ActionCategory::Remove)]
#[case(ActionKind::SetRemoved, ActionCategory::Remove)]
#[case(ActionKind::Update, ActionCategory::Update)]
fn category(#[case] action: ActionKind, #[case] expected: ActionCategory) {
    assert_eq!(action.category(), expected);
    assert_eq!(action.is_add(), expected == ActionCategory::Add);
    assert_eq!(action.is_remove(), expected == ActionCategory::Remove);
    assert_eq!(action.is_update(), expected == ActionCategory::Update);
}

#[test]
fn display() {
    let a = "a";
    assert_eq!(
        ChangeEvent::new(ActionKind::Add, &a, Some(0)).to_string(),
        "Add@0(a)"
    );
    assert_eq!(
        ChangeEvent::new(ActionKind::SetRemoved, &a, None).to_string(),
        "SetRemoved(a)"
    );
    assert_eq!(ActionCategory::Update.to_string(), "Update");
}

#[test]
fn transpose() {
    let some = Some(5);
    let event = ChangeEvent::new(ActionKind::Remove, &some, Some(2)).transpose();
    assert_eq!(event, Some(ChangeEvent::new(ActionKind::Remove, &5, Some(2))));

    let none: Option<i32> = None;
    assert_eq!(
        ChangeEvent::new(ActionKind::Remove, &none, Some(2)).transpose(),
        None
    );
}

#[test]
fn skip_none_filters_absent_elements() {
    let mut cr = CallRecorder::new();
    let mut listener = skip_none(|e: &ChangeEvent<'_, i32>| call!("{e}"));
    listener(&ChangeEvent::new(ActionKind::Add, &None, Some(0)));
    cr.verify(());
    listener(&ChangeEvent::new(ActionKind::Add, &Some(1), Some(1)));
    cr.verify("Add@1(1)");
}

#[test]
fn serialize() {
    let value = 10;
    let event = ChangeEvent::new(ActionKind::SetInsert, &value, Some(3));
    assert_eq!(
        serde_json::to_string(&event).unwrap(),
        r#"{"action":"SetInsert","element":10,"index":3}"#
    );
    let kind: ActionKind = serde_json::from_str(r#""RemoveAll""#).unwrap();
    assert_eq!(kind, ActionKind::RemoveAll);
}
