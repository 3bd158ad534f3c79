//! Complete counter application demonstrating stand-ins and bindings together
//!
//! Run with: RUST_LOG=debug cargo run --example counter_app

use immutable_instance::{transitions, wrap, Binding};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
struct CounterState {
    count: i32,
    step: i32,
    history: Vec<i32>,
}

impl CounterState {
    fn new() -> Self {
        Self {
            count: 0,
            step: 1,
            history: vec![0],
        }
    }

    fn moved_by(&self, delta: i32) -> Self {
        let count = self.count + delta;
        let mut history = self.history.clone();
        history.push(count);
        Self {
            count,
            step: self.step,
            history,
        }
    }

    fn increment(&self) -> Self {
        self.moved_by(self.step)
    }

    fn decrement(&self) -> Self {
        self.moved_by(-self.step)
    }

    fn with_step(&self, step: i32) -> Self {
        Self {
            step,
            ..self.clone()
        }
    }

    fn reset(&self) -> Self {
        self.moved_by(-self.count)
    }

    fn is_even(&self) -> bool {
        self.count % 2 == 0
    }
}

transitions! {
    trait CounterStateTransitions for CounterState {
        fn increment(&self) -> Self;
        fn decrement(&self) -> Self;
        fn with_step(&self, step: i32) -> Self;
        fn reset(&self) -> Self;
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Complete Counter Application ===\n");

    println!("1. Wrapping a single counter");
    let counter = wrap(CounterState::new(), |next| {
        println!("   [Changed] Count: {}", next.count);
    });
    let result = counter.increment().increment().increment();
    println!(
        "   Original count: {} | Final count: {}",
        counter.count, result.count
    );

    println!("\n2. Initializing counter with Binding");
    let state = Binding::named("counter", CounterState::new());

    let _subscription = state.subscribe(|s| {
        println!("   [State] Count: {}, Step: {}", s.count, s.step);
    });

    let print_state = || {
        let view = state.view();
        println!(
            "   Count: {} | Even: {} | Generation: {}",
            view.count,
            view.is_even(),
            state.generation()
        );
    };

    println!("\n3. Initial state:");
    print_state();

    println!("\n4. Incrementing...");
    state.view().increment().increment().increment();
    print_state();

    println!("\n5. Changing step size to 5 and incrementing");
    state.view().with_step(5).increment();
    print_state();

    println!("\n6. Decrementing...");
    state.view().decrement().decrement();
    print_state();

    println!("\n7. History:");
    state.read(|s| println!("   {:?}", s.history));

    println!("\n8. Resetting...");
    state.view().reset();
    print_state();

    println!("\n9. Final history:");
    state.read(|s| println!("   {:?}", s.history));

    println!("\n✓ Counter application complete!");
}
