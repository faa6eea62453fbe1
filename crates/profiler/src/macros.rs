// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Declaration macros for instrumented scopes

/// Strip closure frames from a type name so the enclosing function remains
#[doc(hidden)]
pub fn clean_function_name(name: &'static str) -> &'static str {
    let mut name = name;
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}

/// Fully qualified path of the enclosing function
///
/// # Example
///
/// ```rust
/// fn parse() -> &'static str {
///     scoped_profiler::function_name!()
/// }
///
/// assert!(parse().ends_with("::parse"));
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        let name = type_name_of(f);
        $crate::clean_function_name(&name[..name.len() - 3])
    }};
}

/// Start measuring the current scope
///
/// Evaluates to a [`ScopedGuard`](crate::ScopedGuard) that must be bound to a
/// named variable; `let _ = ...` drops it immediately. The site captures
/// `file!()` and `line!()` of the invocation. Without a label, the enclosing
/// function's fully qualified path is used.
///
/// # Example
///
/// ```rust
/// use scoped_profiler::{Profiler, profile_scope};
///
/// fn fibb(profiler: &Profiler, n: u32) -> u64 {
///     let _guard = profile_scope!(profiler);
///     if n < 2 { 1 } else { fibb(profiler, n - 1) + fibb(profiler, n - 2) }
/// }
///
/// let profiler = Profiler::new();
/// {
///     let mut guard = profile_scope!(&profiler, "fibb");
///     fibb(&profiler, 5);
///     guard.stop();
/// }
/// assert_eq!(profiler.len(), 2);
/// ```
#[macro_export]
macro_rules! profile_scope {
    ($profiler:expr) => {
        $crate::profile_scope!($profiler, $crate::function_name!())
    };
    ($profiler:expr, $label:expr) => {
        $profiler.enter_site($crate::Site::new(
            ::core::file!(),
            ::core::line!(),
            $label,
        ))
    };
}
