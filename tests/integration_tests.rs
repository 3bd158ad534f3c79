//! Integration tests for immutable-instance

use immutable_instance::{transitions, wrap, Binding, StandIn};
use proptest::prelude::*;
use rstest::rstest;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

#[derive(Clone, Debug, PartialEq)]
struct Counter {
    count: i64,
}

#[derive(Debug, PartialEq)]
enum CounterError {
    Overdrawn { count: i64, amount: i64 },
}

impl Counter {
    fn new(count: i64) -> Self {
        Self { count }
    }

    fn increment(&self) -> Self {
        Self::new(self.count + 1)
    }

    fn decrement(&self) -> Self {
        Self::new(self.count - 1)
    }

    fn add(&self, value: i64) -> Self {
        Self::new(self.count + value)
    }

    fn withdraw(&self, amount: i64) -> Result<Self, CounterError> {
        if amount > self.count {
            return Err(CounterError::Overdrawn {
                count: self.count,
                amount,
            });
        }
        Ok(Self::new(self.count - amount))
    }

    fn get_value(&self) -> i64 {
        self.count
    }

    fn describe(&self) -> String {
        format!("count={}", self.count)
    }
}

transitions! {
    trait CounterTransitions for Counter {
        fn increment(&self) -> Self;
        fn decrement(&self) -> Self;
        fn add(&self, value: i64) -> Self;
        fn withdraw(&self, amount: i64) -> Result<Self, CounterError>;
    }
}

#[derive(Clone, Debug, PartialEq)]
struct ItemList {
    items: Vec<char>,
}

impl ItemList {
    fn add_item(&self, item: char) -> Self {
        let mut items = self.items.clone();
        items.push(item);
        Self { items }
    }
}

transitions! {
    trait ItemListTransitions for ItemList {
        fn add_item(&self, item: char) -> Self;
    }
}

fn recording<T: Send + Sync + 'static>(target: T) -> (StandIn<T>, Arc<Mutex<Vec<Arc<T>>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    let stand_in = wrap(target, move |next| seen_clone.lock().unwrap().push(next));
    (stand_in, seen)
}

#[test]
fn increment_notifies_once() {
    let (counter, seen) = recording(Counter::new(0));

    counter.increment();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].count, 1);
}

#[test]
fn chain_notifies_per_call() {
    let (counter, seen) = recording(Counter::new(0));

    let result = counter.increment().increment().add(5);

    assert_eq!(seen.lock().unwrap().len(), 3);
    assert_eq!(result.get_value(), 7);
}

#[test]
fn list_chain_preserves_order() {
    let (list, seen) = recording(ItemList { items: vec![] });

    let result = list.add_item('a').add_item('b');

    assert_eq!(seen.lock().unwrap().len(), 2);
    assert_eq!(result.items, vec!['a', 'b']);
}

#[test]
fn accessor_never_notifies() {
    let (counter, seen) = recording(Counter::new(5));

    assert_eq!(counter.get_value(), 5);
    assert_eq!(counter.describe(), "count=5");
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn sequential_calls_on_one_stand_in() {
    let (counter, seen) = recording(Counter::new(10));

    counter.increment();
    counter.decrement();
    counter.add(3);

    let counts: Vec<i64> = seen.lock().unwrap().iter().map(|c| c.count).collect();
    assert_eq!(counts, vec![11, 9, 13]);
    assert_eq!(counter.count, 10);
}

#[test]
fn notified_instance_is_the_returned_instance() {
    let (counter, seen) = recording(Counter::new(0));

    let next = counter.add(2);

    assert!(Arc::ptr_eq(&seen.lock().unwrap()[0], StandIn::target(&next)));
}

#[test]
fn field_reads_come_from_current_instance() {
    let (counter, seen) = recording(Counter::new(1));

    let next = counter.add(4);

    assert_eq!(counter.count, 1);
    assert_eq!(next.count, 5);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[rstest]
#[case(5, 3, Ok(2))]
#[case(5, 5, Ok(0))]
#[case(2, 3, Err(CounterError::Overdrawn { count: 2, amount: 3 }))]
fn withdraw_matches_unwrapped_behavior(
    #[case] start: i64,
    #[case] amount: i64,
    #[case] expected: Result<i64, CounterError>,
) {
    let (counter, seen) = recording(Counter::new(start));

    let direct = Counter::new(start).withdraw(amount).map(|c| c.count);
    let wrapped = counter.withdraw(amount).map(|c| c.count);

    assert_eq!(wrapped, expected);
    assert_eq!(wrapped, direct);
    let expected_calls = usize::from(expected.is_ok());
    assert_eq!(seen.lock().unwrap().len(), expected_calls);
}

#[test]
fn failure_breaks_chain_but_earlier_stand_in_survives() {
    let (counter, seen) = recording(Counter::new(1));

    let step = counter.add(1);
    let failed = step.withdraw(10).and_then(|c| c.withdraw(1));

    assert!(failed.is_err());
    assert_eq!(seen.lock().unwrap().len(), 1);

    let resumed = step.withdraw(2).unwrap();
    assert_eq!(resumed.count, 0);
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn panicking_operation_propagates_without_notification() {
    let (counter, seen) = recording(Counter::new(0));

    let result = catch_unwind(AssertUnwindSafe(|| {
        StandIn::apply(&counter, |c| {
            assert!(c.count > 0, "counter must be positive");
            c.increment()
        })
    }));

    assert!(result.is_err());
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn binding_tracks_chained_calls() {
    let counter = Binding::new(Counter::new(0));
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();

    let _subscription = counter.subscribe(move |_| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
    });

    let view = counter.view();
    view.increment().increment().add(5);

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(counter.view().get_value(), 7);
    assert_eq!(counter.generation(), 3);
    assert!(!StandIn::ptr_eq(&view, &counter.view()));
}

#[test]
fn binding_notifier_drives_external_stand_in() {
    let counter = Binding::new(Counter::new(0));
    let external = StandIn::from_shared(Arc::new(Counter::new(100)), counter.notifier());

    external.decrement();

    assert_eq!(counter.current().count, 99);
    assert_eq!(counter.generation(), 1);
}

proptest! {
    #[test]
    fn chain_count_matches_calls(start in -1000i64..1000, steps in prop::collection::vec(-50i64..50, 0..20)) {
        let (counter, seen) = recording(Counter::new(start));

        let last = steps
            .iter()
            .fold(counter, |stand_in, step| stand_in.add(*step));

        let seen = seen.lock().unwrap();
        prop_assert_eq!(seen.len(), steps.len());

        let mut expected = start;
        for (notified, step) in seen.iter().zip(&steps) {
            expected += step;
            prop_assert_eq!(notified.count, expected);
        }
        prop_assert_eq!(last.count, expected);
    }

    #[test]
    fn failed_withdraw_never_notifies(start in 0i64..100, extra in 1i64..100) {
        let (counter, seen) = recording(Counter::new(start));

        let err = counter.withdraw(start + extra).unwrap_err();

        prop_assert_eq!(err, CounterError::Overdrawn { count: start, amount: start + extra });
        prop_assert!(seen.lock().unwrap().is_empty());
    }
}
