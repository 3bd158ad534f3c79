/// Declare the state-changing operations of a type.
///
/// Generates a trait with one method per declared operation and implements
/// it for [`StandIn`](crate::StandIn) of that type. Each generated method
/// forwards to the type's own inherent method of the same name and goes
/// through [`StandIn::apply`](crate::StandIn::apply) (for `-> Self`) or
/// [`StandIn::try_apply`](crate::StandIn::try_apply) (for
/// `-> Result<Self, E>`), so the caller gets a stand-in for the new
/// instance back and can keep chaining.
///
/// Operations that are not declared still reach the wrapped value through
/// `Deref`, untouched.
///
/// # Examples
///
/// ```
/// use immutable_instance::{transitions, wrap};
/// use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
///
/// #[derive(Debug)]
/// struct Counter {
///     count: i64,
/// }
///
/// impl Counter {
///     fn increment(&self) -> Self {
///         Counter { count: self.count + 1 }
///     }
///
///     fn add(&self, value: i64) -> Self {
///         Counter { count: self.count + value }
///     }
///
///     fn get_value(&self) -> i64 {
///         self.count
///     }
/// }
///
/// transitions! {
///     trait CounterTransitions for Counter {
///         fn increment(&self) -> Self;
///         fn add(&self, value: i64) -> Self;
///     }
/// }
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let calls_clone = calls.clone();
/// let counter = wrap(Counter { count: 0 }, move |_| {
///     calls_clone.fetch_add(1, Ordering::SeqCst);
/// });
///
/// let result = counter.increment().increment().add(5);
///
/// assert_eq!(result.get_value(), 7);
/// assert_eq!(calls.load(Ordering::SeqCst), 3);
/// ```
#[macro_export]
macro_rules! transitions {
    (
        @munch
        meta: [$($meta:tt)*],
        vis: [$vis:vis],
        name: $name:ident,
        target: [$target:ty],
        decls: [$($decls:tt)*],
        impls: [$($impls:tt)*],
        rest: [
            $(#[$m:meta])*
            fn $method:ident(&self $(, $arg:ident : $argty:ty)*) -> Self;
            $($rest:tt)*
        ]
    ) => {
        $crate::transitions! {
            @munch
            meta: [$($meta)*],
            vis: [$vis],
            name: $name,
            target: [$target],
            decls: [
                $($decls)*
                $(#[$m])*
                fn $method(&self $(, $arg: $argty)*) -> $crate::StandIn<$target>;
            ],
            impls: [
                $($impls)*
                fn $method(&self $(, $arg: $argty)*) -> $crate::StandIn<$target> {
                    $crate::StandIn::apply(self, move |target| <$target>::$method(target $(, $arg)*))
                }
            ],
            rest: [$($rest)*]
        }
    };

    (
        @munch
        meta: [$($meta:tt)*],
        vis: [$vis:vis],
        name: $name:ident,
        target: [$target:ty],
        decls: [$($decls:tt)*],
        impls: [$($impls:tt)*],
        rest: [
            $(#[$m:meta])*
            fn $method:ident(&self $(, $arg:ident : $argty:ty)*) -> Result<Self, $err:ty>;
            $($rest:tt)*
        ]
    ) => {
        $crate::transitions! {
            @munch
            meta: [$($meta)*],
            vis: [$vis],
            name: $name,
            target: [$target],
            decls: [
                $($decls)*
                $(#[$m])*
                fn $method(&self $(, $arg: $argty)*)
                    -> ::core::result::Result<$crate::StandIn<$target>, $err>;
            ],
            impls: [
                $($impls)*
                fn $method(&self $(, $arg: $argty)*)
                    -> ::core::result::Result<$crate::StandIn<$target>, $err>
                {
                    $crate::StandIn::try_apply(self, move |target| <$target>::$method(target $(, $arg)*))
                }
            ],
            rest: [$($rest)*]
        }
    };

    (
        @munch
        meta: [$($meta:tt)*],
        vis: [$vis:vis],
        name: $name:ident,
        target: [$target:ty],
        decls: [$($decls:tt)*],
        impls: [$($impls:tt)*],
        rest: []
    ) => {
        $($meta)*
        $vis trait $name {
            $($decls)*
        }

        impl $name for $crate::StandIn<$target> {
            $($impls)*
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis trait $name:ident for $target:ty {
            $($body:tt)*
        }
    ) => {
        $crate::transitions! {
            @munch
            meta: [$(#[$meta])*],
            vis: [$vis],
            name: $name,
            target: [$target],
            decls: [],
            impls: [],
            rest: [$($body)*]
        }
    };
}
