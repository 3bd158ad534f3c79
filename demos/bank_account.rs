//! Fallible transitions and generation-checked updates
//!
//! Run with: RUST_LOG=debug cargo run --example bank_account

use immutable_instance::{transitions, Binding, BindingError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum AccountError {
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: u64, requested: u64 },
}

#[derive(Clone, Debug)]
struct Account {
    balance: u64,
}

impl Account {
    fn deposit(&self, amount: u64) -> Self {
        Self {
            balance: self.balance + amount,
        }
    }

    fn withdraw(&self, amount: u64) -> Result<Self, AccountError> {
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        Ok(Self {
            balance: self.balance - amount,
        })
    }
}

transitions! {
    trait AccountTransitions for Account {
        fn deposit(&self, amount: u64) -> Self;
        fn withdraw(&self, amount: u64) -> Result<Self, AccountError>;
    }
}

fn main() -> Result<(), BindingError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let account = Binding::named("account", Account { balance: 0 });

    if let Err(err) = account.view().deposit(100).withdraw(30).and_then(|a| a.withdraw(500)) {
        println!("Chain stopped: {err}");
    }
    println!(
        "Balance: {} after {} changes",
        account.current().balance,
        account.generation()
    );

    let seen = account.generation();
    account.view().deposit(1);
    match account.set_if(seen, Account { balance: 0 }) {
        Ok(generation) => println!("Reset at generation {generation}"),
        Err(err) => println!("Reset skipped: {err}"),
    }

    let generation = account.set_if(account.generation(), Account { balance: 0 })?;
    println!("Reset at generation {generation}");
    Ok(())
}
