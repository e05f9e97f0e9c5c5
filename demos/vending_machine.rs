//! Vending Machine
//!
//! This example wraps a stateful object inside a caller-defined type, which
//! forwards to it instead of inheriting from it.
//!
//! Key concepts:
//! - Composition: `VendingMachine` holds a `Stateful`
//! - Common properties (`stock`, `credit`) shared by every state
//! - `InvalidOperation` raised deliberately by a state
//! - Property hooks (`on_state_enter`)
//!
//! Run with: cargo run --example vending_machine

use stateworks::{container, BuildError, Method, Stateful, StatefulError, Value, ENTER_HOOK};
use std::error::Error;
use tracing_subscriber::EnvFilter;

struct VendingMachine {
    object: Stateful,
}

impl VendingMachine {
    fn new(stock: i64) -> Result<Self, BuildError> {
        let object = Stateful::builder()
            .state(
                "idle",
                container! {
                    "insert_coin" => Method::new(|this, _| {
                        let credit = this.get("credit").as_i64().unwrap_or(0);
                        this.set("credit", credit + 1);
                        this.enter("paid")?;
                        Ok(Value::Undefined)
                    }),
                    "vend" => Method::new(|this, _| Err(this.invalid_operation("vend"))),
                },
            )
            .state(
                "paid",
                container! {
                    ENTER_HOOK => Method::new(|_, _| {
                        println!("  (coin accepted)");
                        Ok(Value::Undefined)
                    }),
                    "insert_coin" => Method::new(|this, _| {
                        Err(this.invalid_operation("insert_coin"))
                    }),
                    "vend" => Method::new(|this, _| {
                        let stock = this.get("stock").as_i64().unwrap_or(0);
                        let credit = this.get("credit").as_i64().unwrap_or(0);
                        this.set("stock", stock - 1);
                        this.set("credit", credit - 1);
                        this.enter(if stock > 1 { "idle" } else { "sold_out" })?;
                        Ok("snack".into())
                    }),
                },
            )
            .state(
                "sold_out",
                container! {
                    "insert_coin" => Method::new(|this, _| {
                        Err(this.invalid_operation("insert_coin"))
                    }),
                    "vend" => Method::new(|this, _| Err(this.invalid_operation("vend"))),
                },
            )
            .common("stock", stock)
            .common("credit", 0)
            .initial(if stock > 0 { "idle" } else { "sold_out" })
            .build()?;
        Ok(Self { object })
    }

    fn insert_coin(&self) -> Result<(), StatefulError> {
        self.object.call("insert_coin", vec![]).map(|_| ())
    }

    fn vend(&self) -> Result<String, StatefulError> {
        let item = self.object.call("vend", vec![])?;
        Ok(item.as_str().unwrap_or_default().to_string())
    }

    fn status(&self) -> String {
        format!(
            "state={} stock={}",
            self.object.state_label(),
            self.object.get("stock").as_i64().unwrap_or(0)
        )
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Vending Machine Example ===\n");

    let machine = VendingMachine::new(2)?;
    println!("{}", machine.status());

    if let Err(err) = machine.vend() {
        println!("vend without coin: {}", err);
    }

    for _ in 0..2 {
        machine.insert_coin()?;
        println!("vended a {}", machine.vend()?);
        println!("{}", machine.status());
    }

    if let Err(err) = machine.insert_coin() {
        println!("insert after sell-out: {}", err);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
