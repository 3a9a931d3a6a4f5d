use std::thread;

use assert_call::{call, CallRecorder};

use super::*;

#[test]
fn raise_in_priority_order() {
    let mut cr = CallRecorder::new();
    let handler = EventHandler::new();
    handler.add(|_, e: &mut EventParam| call!("default {e}"));
    handler.add_with_priority(|_, e: &mut EventParam| call!("high {e}"), 10);
    handler.add_with_priority(|_, e: &mut EventParam| call!("low {e}"), -5);
    handler.add(|_, e: &mut EventParam| call!("default2 {e}"));

    assert!(handler.raise(&mut EventParam::new("click")));
    cr.verify(["high click", "default click", "default2 click", "low click"]);
}

#[test]
fn stop_propagation_skips_remaining_listeners() {
    let mut cr = CallRecorder::new();
    let handler = EventHandler::new();
    handler.add_with_priority(
        |_, e: &mut EventParam| {
            call!("first");
            e.stop_propagation();
        },
        1,
    );
    handler.add(|_, _: &mut EventParam| call!("second"));

    let mut event = EventParam::default();
    assert!(!handler.raise(&mut event));
    assert!(!event.is_propagated());
    cr.verify("first");

    assert!(!handler.raise(&mut event));
    cr.verify(());
}

#[test]
fn set_priority_reorders() {
    let mut cr = CallRecorder::new();
    let handler = EventHandler::new();
    handler.add(|_, _: &mut EventParam| call!("a"));
    let b = handler.add(|_, _: &mut EventParam| call!("b"));
    handler.set_priority(b, 5).unwrap();
    handler.raise(&mut EventParam::default());
    cr.verify(["b", "a"]);

    assert!(handler.remove(b));
    assert!(!handler.contains(b));
    assert_eq!(
        handler.set_priority(b, 1),
        Err(CollectionError::UnknownListener)
    );
    assert!(!handler.remove(b));
}

#[test]
fn raise_from_passes_sender() {
    let mut cr = CallRecorder::new();
    let handler = EventHandler::new();
    handler.add(|sender, _: &mut EventParam| {
        call!("{:?}", sender.and_then(|s| s.downcast_ref::<u32>()))
    });
    handler.raise_from(Some(&7u32 as &dyn Any), &mut EventParam::default());
    handler.raise(&mut EventParam::default());
    cr.verify(["Some(7)", "None"]);
}

#[test]
fn subscription_removes_listener_on_drop() {
    let mut cr = CallRecorder::new();
    let handler = EventHandler::new();
    let s = handler.subscribe(|_, _: &mut EventParam| call!("s"));
    assert_eq!(handler.len(), 1);
    handler.raise(&mut EventParam::default());
    cr.verify("s");

    drop(s);
    assert!(handler.is_empty());
    handler.raise(&mut EventParam::default());
    cr.verify(());
}

#[test]
fn listener_can_register_listeners() {
    let mut cr = CallRecorder::new();
    let handler = EventHandler::new();
    let h = handler.clone();
    handler.add(move |_, _: &mut EventParam| {
        call!("outer");
        h.add(|_, _: &mut EventParam| call!("inner"));
    });
    handler.raise(&mut EventParam::default());
    cr.verify("outer");
    assert_eq!(handler.len(), 2);
}

#[test]
fn shared_between_threads() {
    let handler = EventHandler::<EventParam>::new();
    let threads: Vec<_> = (0..4)
        .map(|_| {
            let handler = handler.clone();
            thread::spawn(move || {
                handler.add(|_, _| {});
            })
        })
        .collect();
    for t in threads {
        t.join().unwrap();
    }
    assert_eq!(handler.len(), 4);
    assert!(handler.raise(&mut EventParam::new("done")));
}
