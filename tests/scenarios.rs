//! End-to-end behaviour of stateful objects.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use stateworks::{
    container, Event, HookMode, Method, Stateful, StateContainer, StatefulConfig, StatefulError,
    Value, ENTER_HOOK, LEAVE_HOOK,
};

fn status_of(container: &StateContainer) -> String {
    container
        .get("status")
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default()
}

#[test]
fn chained_states_swap_methods() {
    let stateful = Stateful::create(|_, _, enter| {
        let enter_baz = enter.clone();
        let enter_bar = enter.clone();
        let enter_foo = enter.clone();

        let state_baz = container! {
            "foo" => Method::new(move |_, _| {
                enter_baz.enter(StateContainer::new())?;
                Ok("baz.foo".into())
            }),
        };
        let state_bar = container! {
            "foo" => Method::new(move |_, _| {
                enter_bar.enter(&state_baz)?;
                Ok("bar.foo".into())
            }),
        };
        let state_foo = container! {
            "foo" => Method::new(move |_, _| {
                enter_foo.enter(&state_bar)?;
                Ok("foo.foo".into())
            }),
        };

        Some(state_foo.into())
    })
    .unwrap();

    assert_eq!(stateful.call("foo", vec![]).unwrap(), Value::from("foo.foo"));
    assert_eq!(stateful.call("foo", vec![]).unwrap(), Value::from("bar.foo"));
    assert_eq!(stateful.call("foo", vec![]).unwrap(), Value::from("baz.foo"));
    assert!(stateful.get("foo").is_undefined());
}

#[test]
fn common_properties_survive_transitions() {
    let stateful = Stateful::create(|_, common, enter| {
        common.extend(vec![("hello", 42), ("shared", 33)]);

        let enter_final = enter.clone();
        let state2 = container! {
            "foo" => Method::new(move |this, _| {
                this.set("hello", "bye");
                enter_final.enter(StateContainer::new())?;
                Ok(Value::Undefined)
            }),
        };
        let enter_second = enter.clone();
        let state1 = container! {
            "foo" => Method::new(move |this, _| {
                this.set("hello", "world");
                enter_second.enter(&state2)?;
                Ok(Value::Undefined)
            }),
        };

        Some(state1.into())
    })
    .unwrap();

    assert_eq!(stateful.get("hello"), Value::from(42));
    assert_eq!(stateful.get("shared"), Value::from(33));

    stateful.call("foo", vec![]).unwrap();
    assert_eq!(stateful.get("hello"), Value::from("world"));
    assert_eq!(stateful.get("shared"), Value::from(33));

    stateful.call("foo", vec![]).unwrap();
    assert_eq!(stateful.get("hello"), Value::from("bye"));
    assert_eq!(stateful.get("shared"), Value::from(33));
}

#[test]
fn transition_handler_counts_each_enter() {
    let count = Rc::new(Cell::new(0));

    let stateful = Stateful::builder()
        .state(
            "first",
            container! {
                "next" => Method::new(|this, _| {
                    this.enter("second")?;
                    Ok(Value::Undefined)
                }),
            },
        )
        .state(
            "second",
            container! {
                "next" => Method::new(|this, _| {
                    this.enter("final")?;
                    Ok(Value::Undefined)
                }),
            },
        )
        .state(
            "final",
            container! {
                "next" => Method::new(|_, _| Ok(Value::Undefined)),
            },
        )
        .default_state("first")
        .hook_mode(HookMode::Handler)
        .build()
        .unwrap();

    let counter = Rc::clone(&count);
    stateful
        .set_transition_handler(move |_, _| counter.set(counter.get() + 1))
        .unwrap();

    stateful.call("next", vec![]).unwrap();
    stateful.call("next", vec![]).unwrap();
    assert_eq!(count.get(), 2);
    assert_eq!(stateful.state_name().as_deref(), Some("final"));

    stateful.call("next", vec![]).unwrap();
    stateful.call("next", vec![]).unwrap();
    assert_eq!(count.get(), 2);
}

#[test]
fn events_fire_around_pointer_swap() {
    let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let idle = container! { "status" => "idle" };
    let busy = container! { "status" => "busy" };

    let config = StatefulConfig {
        hook_mode: HookMode::Events,
        ..StatefulConfig::default()
    };
    let stateful =
        Stateful::create_with(config, None, |_, _, _| Some(idle.clone().into())).unwrap();

    let leave_log = Rc::clone(&log);
    stateful
        .on(Event::Leave, move |this, outgoing| {
            leave_log.borrow_mut().push(format!(
                "leave {} (current {})",
                status_of(outgoing),
                status_of(&this.state()),
            ));
        })
        .unwrap();
    let enter_log = Rc::clone(&log);
    stateful
        .on(Event::Enter, move |this, incoming| {
            enter_log.borrow_mut().push(format!(
                "enter {} (current {})",
                status_of(incoming),
                status_of(&this.state()),
            ));
        })
        .unwrap();

    stateful.enter(&busy).unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "leave idle (current idle)".to_string(),
            "enter busy (current busy)".to_string(),
        ]
    );
}

#[test]
fn handler_runs_before_swap() {
    let observed = Rc::new(RefCell::new(None));

    let stateful = Stateful::builder()
        .state("a", container! { "tag" => "a" })
        .state("b", container! { "tag" => "b" })
        .initial("a")
        .hook_mode(HookMode::Handler)
        .build()
        .unwrap();

    let slot = Rc::clone(&observed);
    stateful
        .set_transition_handler(move |this, info| {
            *slot.borrow_mut() = Some((
                info.from_name.clone(),
                info.to_name.clone(),
                this.get("tag"),
            ));
        })
        .unwrap();

    stateful.enter("b").unwrap();

    assert_eq!(
        observed.borrow().clone(),
        Some((Some("a".to_string()), Some("b".to_string()), Value::from("a")))
    );
}

#[test]
fn invalid_transition_keeps_current_state() {
    let stateful = Stateful::builder()
        .state("idle", container! { "status" => "idle" })
        .initial("idle")
        .build()
        .unwrap();

    let err = stateful.call("missing", vec![]).unwrap_err();
    assert!(matches!(err, StatefulError::NotCallable { .. }));

    assert_eq!(
        stateful.enter("nowhere"),
        Err(StatefulError::invalid_state("nowhere"))
    );
    assert_eq!(stateful.get("status"), Value::from("idle"));
}

#[test]
fn state_raises_invalid_operation() {
    let stateful = Stateful::builder()
        .state(
            "locked",
            container! {
                "open" => Method::new(|this, _| Err(this.invalid_operation("open"))),
                "unlock" => Method::new(|this, _| {
                    this.enter("unlocked")?;
                    Ok(Value::Undefined)
                }),
            },
        )
        .state(
            "unlocked",
            container! {
                "open" => Method::new(|_, _| Ok("opened".into())),
            },
        )
        .initial("locked")
        .build()
        .unwrap();

    assert_eq!(
        stateful.call("open", vec![]),
        Err(StatefulError::invalid_operation("open", "locked"))
    );
    stateful.call("unlock", vec![]).unwrap();
    assert_eq!(stateful.call("open", vec![]).unwrap(), Value::from("opened"));
}

#[test]
fn state_method_enters_while_running() {
    let parking = container! { "parked" => true };
    let hops = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hops);

    let stateful = Stateful::from_state(container! {
        LEAVE_HOOK => Method::new(move |_, _| {
            counter.set(counter.get() + 1);
            Ok(Value::Undefined)
        }),
    })
    .unwrap();

    let redirect = parking.clone();
    stateful.define(
        "redirect",
        Method::new(move |this, _| {
            this.enter(&redirect)?;
            Ok(Value::Undefined)
        }),
    );

    stateful.call("redirect", vec![]).unwrap();

    assert_eq!(hops.get(), 1);
    assert!(stateful.state().ptr_eq(&parking));
    assert_eq!(stateful.history().len(), 2);
}

#[test]
fn enter_hook_redirects_to_another_state() {
    let landing = container! { "tag" => "b" };

    let stateful = Stateful::builder()
        .state("idle", container! { "tag" => "idle" })
        .state(
            "a",
            container! {
                ENTER_HOOK => Method::new(|this, _| {
                    this.enter("b")?;
                    Ok(Value::Undefined)
                }),
                "tag" => "a",
            },
        )
        .state("b", landing.clone())
        .initial("idle")
        .build()
        .unwrap();

    stateful.enter("a").unwrap();

    assert!(stateful.state().ptr_eq(&landing));
    assert_eq!(stateful.state_name().as_deref(), Some("b"));
    assert_eq!(stateful.get("tag"), Value::from("b"));
    assert_eq!(stateful.history().len(), 3);
}

#[test]
fn enter_listener_reenters() {
    let stateful = Stateful::builder()
        .state("a", container! { "tag" => "a" })
        .state("b", container! { "tag" => "b" })
        .state("c", container! { "tag" => "c" })
        .initial("a")
        .hook_mode(HookMode::Events)
        .on(Event::Enter, |this, _| {
            if this.state_name().as_deref() == Some("b") {
                this.enter("c").unwrap();
            }
        })
        .build()
        .unwrap();

    stateful.enter("b").unwrap();

    assert_eq!(stateful.state_name().as_deref(), Some("c"));
    assert_eq!(stateful.get("tag"), Value::from("c"));
    assert_eq!(stateful.history().len(), 3);
}

#[test]
fn handler_enters_before_outer_swap() {
    let calls = Rc::new(Cell::new(0));
    let redirected = Rc::new(Cell::new(false));
    let counter = Rc::clone(&calls);
    let once = Rc::clone(&redirected);

    let stateful = Stateful::builder()
        .state("a", container! { "tag" => "a" })
        .state("b", container! { "tag" => "b" })
        .state("c", container! { "tag" => "c" })
        .initial("a")
        .hook_mode(HookMode::Handler)
        .transition_handler(move |this, info| {
            counter.set(counter.get() + 1);
            if info.to_name.as_deref() == Some("b") && !once.replace(true) {
                this.enter("c").unwrap();
            }
        })
        .build()
        .unwrap();

    stateful.enter("b").unwrap();

    // The handler runs before the swap, so the outer transition lands last.
    assert_eq!(stateful.state_name().as_deref(), Some("b"));
    assert!(redirected.get());
    assert_eq!(calls.get(), 3);

    let history = stateful.history();
    assert_eq!(history.len(), 3);
    let path: Vec<Option<&str>> = history
        .get_path()
        .iter()
        .map(|s| s.name.as_deref())
        .collect();
    assert_eq!(path, vec![None, Some("a"), Some("c"), Some("b")]);
}
