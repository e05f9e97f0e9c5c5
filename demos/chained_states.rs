//! Chained Anonymous States
//!
//! This example walks an object through three anonymous states, each of
//! which answers `foo()` differently and then hands over to the next one.
//!
//! Key concepts:
//! - States are plain containers of methods
//! - The transition primitive captured by state methods
//! - A final empty state in which `foo` is simply undefined
//!
//! Run with: cargo run --example chained_states

use stateworks::{container, Method, Stateful, StateContainer, StatefulError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), StatefulError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Chained States Example ===\n");

    let stateful = Stateful::create(|_, _, enter| {
        let (to_end, to_baz, to_bar) = (enter.clone(), enter.clone(), enter.clone());

        let baz = container! {
            "foo" => Method::new(move |_, _| {
                to_end.enter(StateContainer::new())?;
                Ok("baz.foo".into())
            }),
        };
        let bar = container! {
            "foo" => Method::new(move |_, _| {
                to_baz.enter(&baz)?;
                Ok("bar.foo".into())
            }),
        };
        let foo = container! {
            "foo" => Method::new(move |_, _| {
                to_bar.enter(&bar)?;
                Ok("foo.foo".into())
            }),
        };

        Some(foo.into())
    })?;

    for _ in 0..3 {
        let answer = stateful.call("foo", vec![])?;
        println!("foo() -> {:?}", answer.as_str().unwrap_or_default());
    }
    println!("foo is now undefined: {}", stateful.get("foo").is_undefined());

    println!("\nPath taken:");
    for state in stateful.history().get_path() {
        println!("  {}", state);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
