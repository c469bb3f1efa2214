//! Function shapes that may fail with a declared error type.
//!
//! Every trait here is an alias over the matching closure signature returning
//! `Result<_, E>`, so any closure or fn item with that signature can be passed
//! wherever a shim is expected. `E` is the declared failure family: the only
//! fault a shim is allowed to report as a value. Panics stay outside of it.
use std::cmp::Ordering;

/// Declares a shim trait with a blanket implementation for closures of the
/// same signature. `once` shims consume themselves, `mut` shims can be called
/// repeatedly, the way iterator adapters call them.
macro_rules! declared_shim {
    ($(#[$meta:meta])* once $name:ident<$($param:ident),*>, $method:ident($($arg:ident: $arg_ty:ty),*) -> $ret:ty) => {
        $(#[$meta])*
        pub trait $name<$($param,)* E>: FnOnce($($arg_ty),*) -> Result<$ret, E> {
            fn $method(self, $($arg: $arg_ty),*) -> Result<$ret, E>
            where
                Self: Sized,
            {
                self($($arg),*)
            }
        }

        impl<F, $($param,)* E> $name<$($param,)* E> for F where F: FnOnce($($arg_ty),*) -> Result<$ret, E> {}
    };
    ($(#[$meta:meta])* mut $name:ident<$($param:ident),*>, $method:ident($($arg:ident: $arg_ty:ty),*) -> $ret:ty) => {
        $(#[$meta])*
        pub trait $name<$($param,)* E>: FnMut($($arg_ty),*) -> Result<$ret, E> {
            fn $method(&mut self, $($arg: $arg_ty),*) -> Result<$ret, E> {
                (*self)($($arg),*)
            }
        }

        impl<F, $($param,)* E> $name<$($param,)* E> for F where F: FnMut($($arg_ty),*) -> Result<$ret, E> {}
    };
}

declared_shim!(
    /// Produces a single value.
    once Supplier<T>, get() -> T
);

declared_shim!(
    /// Runs a side effect once.
    once Runnable<>, run() -> ()
);

declared_shim!(
    /// Maps one argument to a result.
    mut Function<A, R>, apply(a: A) -> R
);

declared_shim!(
    /// Maps two arguments to a result.
    mut BiFunction<A, B, R>, apply(a: A, b: B) -> R
);

declared_shim!(
    /// Folds two values of the same type into one.
    mut BinaryOperator<T>, apply(left: T, right: T) -> T
);

declared_shim!(
    /// Consumes a value for its side effect.
    mut Consumer<A>, accept(a: A) -> ()
);

declared_shim!(
    /// Tests a borrowed value.
    mut Predicate<A>, test(a: &A) -> bool
);

declared_shim!(
    /// Orders two borrowed values.
    mut Comparator<A>, compare(left: &A, right: &A) -> Ordering
);
