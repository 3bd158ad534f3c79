//! A todo list driven through a binding
//!
//! Run with: cargo run --example todo_list

use immutable_instance::{transitions, Binding, StandIn};

#[derive(Clone, Debug, Default)]
struct TodoList {
    items: Vec<String>,
}

impl TodoList {
    fn add_item(&self, item: &str) -> Self {
        let mut items = self.items.clone();
        items.push(item.to_string());
        Self { items }
    }

    fn remove_item(&self, index: usize) -> Self {
        let mut items = self.items.clone();
        if index < items.len() {
            items.remove(index);
        }
        Self { items }
    }

    fn get_count(&self) -> usize {
        self.items.len()
    }
}

transitions! {
    trait TodoListTransitions for TodoList {
        fn add_item(&self, item: &str) -> Self;
        fn remove_item(&self, index: usize) -> Self;
    }
}

fn main() {
    let todos = Binding::named("todos", TodoList::default());

    let first = todos.view();
    println!("Same view before any change: {}", StandIn::ptr_eq(&first, &todos.view()));

    todos
        .view()
        .add_item("buy milk")
        .add_item("write report")
        .add_item("call mom");
    println!("After adding: {:?} ({} items)", todos.view().items, todos.view().get_count());

    todos.view().remove_item(1);
    println!("After removing: {:?}", todos.view().items);

    println!("Same view after a change: {}", StandIn::ptr_eq(&first, &todos.view()));
    println!("Stale view still sees: {:?}", first.items);
    println!("Generation: {}", todos.generation());
}
