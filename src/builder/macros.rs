//! Macros for ergonomic container construction.

/// Build a [`StateContainer`](crate::StateContainer) from `key => value`
/// pairs. Values may be anything convertible into a
/// [`Value`](crate::Value), including [`Method`](crate::Method)s.
///
/// # Example
///
/// ```
/// use stateworks::{container, Method, Value};
///
/// let idle = container! {
///     "status" => "idle",
///     "retries" => 3,
///     "poke" => Method::new(|_, _| Ok(Value::from("ouch"))),
/// };
///
/// assert_eq!(idle.keys(), vec!["status", "retries", "poke"]);
/// ```
#[macro_export]
macro_rules! container {
    () => {
        $crate::StateContainer::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let container = $crate::StateContainer::new();
        $(
            container.insert($key, $value);
        )+
        container
    }};
}
