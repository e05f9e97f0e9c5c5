//! Dynamic property values stored in state containers.
//!
//! A property is either plain data (a JSON value), a method, or the
//! transition primitive itself when it is injected as a leading argument.

use crate::stateful::{Stateful, StatefulError, Transition};
use std::fmt;
use std::rc::Rc;

/// Result returned by every method invoked through a [`Stateful`] handle.
pub type MethodResult = Result<Value, StatefulError>;

type MethodFn = dyn Fn(&Stateful, Vec<Value>) -> MethodResult;

/// Callable property.
///
/// The receiver handle is always passed as the first parameter, so code
/// inside a state reaches its own properties through the same resolution
/// chain as outside callers.
///
/// # Example
///
/// ```rust
/// use stateworks::{container, Method, Stateful, Value};
///
/// let idle = container! {
///     "greet" => Method::new(|this, _args| {
///         let name = this.get("name");
///         Ok(format!("hello {}", name.as_str().unwrap_or("stranger")).into())
///     }),
/// };
///
/// let object = Stateful::from_state(idle).unwrap();
/// object.common().set("name", "ada");
/// assert_eq!(object.call("greet", vec![]).unwrap(), Value::from("hello ada"));
/// ```
#[derive(Clone)]
pub struct Method(Rc<MethodFn>);

impl Method {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Stateful, Vec<Value>) -> MethodResult + 'static,
    {
        Method(Rc::new(f))
    }

    pub(crate) fn invoke(&self, this: &Stateful, args: Vec<Value>) -> MethodResult {
        (self.0)(this, args)
    }

    /// Identity comparison; two methods are equal only if they share a closure.
    pub fn ptr_eq(&self, other: &Method) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Method(..)")
    }
}

/// A property value as seen through a container or a handle.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Absent or soft-deleted. Distinct from JSON `null`.
    #[default]
    Undefined,
    Data(serde_json::Value),
    Method(Method),
    Transition(Transition),
}

impl Value {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Method(_))
    }

    pub fn as_data(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Data(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_data().and_then(serde_json::Value::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_data().and_then(serde_json::Value::as_i64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_data().and_then(serde_json::Value::as_bool)
    }

    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Value::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn as_transition(&self) -> Option<&Transition> {
        match self {
            Value::Transition(transition) => Some(transition),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Data(a), Value::Data(b)) => a == b,
            (Value::Method(a), Value::Method(b)) => a.ptr_eq(b),
            (Value::Transition(a), Value::Transition(b)) => a.same_target(b),
            _ => false,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::Data(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Data(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Data(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Data(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Data(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Data(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Data(value.into())
    }
}

/// JSON has no NaN or infinity, so non-finite floats become
/// [`Value::Undefined`] rather than a silent `null`.
impl From<f64> for Value {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map_or(Value::Undefined, |number| Value::Data(number.into()))
    }
}

impl From<Method> for Value {
    fn from(method: Method) -> Self {
        Value::Method(method)
    }
}

impl From<Transition> for Value {
    fn from(transition: Transition) -> Self {
        Value::Transition(transition)
    }
}
