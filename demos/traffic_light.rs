//! Traffic Light
//!
//! This example demonstrates named states, a default state providing shared
//! behaviour, and event listeners reacting to every transition.
//!
//! Key concepts:
//! - Named states registered through the builder
//! - A default state answering keys the current state lacks
//! - `Event::Leave` / `Event::Enter` listeners
//!
//! Run with: RUST_LOG=stateworks=debug cargo run --example traffic_light

use stateworks::{container, Event, HookMode, Method, Stateful, Value};
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn advance_to(next: &'static str) -> Method {
    Method::new(move |this, _| {
        this.enter(next)?;
        Ok(Value::Undefined)
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Traffic Light Example ===\n");

    let light = Stateful::builder()
        .state(
            "any",
            container! {
                "describe" => Method::new(|this, _| {
                    let color = this.get("color");
                    Ok(format!("light is {}", color.as_str().unwrap_or("dark")).into())
                }),
            },
        )
        .state("red", container! { "color" => "red", "next" => advance_to("green") })
        .state("green", container! { "color" => "green", "next" => advance_to("yellow") })
        .state("yellow", container! { "color" => "yellow", "next" => advance_to("red") })
        .default_state("any")
        .initial("red")
        .hook_mode(HookMode::Events)
        .on(Event::Leave, |this, _| {
            println!("  leaving {}", this.state_label());
        })
        .on(Event::Enter, |this, _| {
            println!("  entered {}", this.state_label());
        })
        .build()?;

    for _ in 0..4 {
        let description = light.call("describe", vec![])?;
        println!("{}", description.as_str().unwrap_or_default());
        light.call("next", vec![])?;
    }

    println!("\nTransitions recorded: {}", light.history().len());
    println!("\n=== Example Complete ===");
    Ok(())
}
