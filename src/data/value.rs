use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Dynamic data a template is rendered against.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Str(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    F32(f32),
    F64(f64),
    /// Date without time zone
    Date(NaiveDate),

    /// Time without date
    Time(NaiveTime),

    /// Date and time without time zone
    DateTime(NaiveDateTime),

    /// Date and time in UTC
    DateTimeUtc(DateTime<Utc>),

    /// Arbitrary-precision decimal number
    Decimal(Decimal),

    /// Ordered list of values (e.g. arrays, tuples)
    List(Vec<Value>),

    /// Key-value map (e.g. structs, JSON objects)
    Map(HashMap<String, Value>),

    /// Computed value, evaluated on lookup with the current context as receiver
    Lambda(Lambda),
}

/// 零参数的计算值：渲染时以当前上下文为接收者求值
#[derive(Clone)]
pub struct Lambda(Arc<dyn Fn(&Value) -> Value + Send + Sync>);

impl Lambda {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, receiver: &Value) -> Value {
        (self.0)(receiver)
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Lambda")
    }
}

impl PartialEq for Lambda {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Value {
    /// Wraps a closure as a computed value.
    pub fn lambda<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Value::Lambda(Lambda::new(f))
    }

    /// Returns `true` for values that make a section skip and an interpolation print nothing:
    /// null, `false`, the empty string, numeric zero (and NaN), empty lists and empty maps.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !*b,
            Value::Str(s) => s.is_empty(),
            Value::I8(n) => *n == 0,
            Value::I16(n) => *n == 0,
            Value::I32(n) => *n == 0,
            Value::I64(n) => *n == 0,
            Value::I128(n) => *n == 0,
            Value::U8(n) => *n == 0,
            Value::U16(n) => *n == 0,
            Value::U32(n) => *n == 0,
            Value::U64(n) => *n == 0,
            Value::U128(n) => *n == 0,
            Value::F32(n) => *n == 0.0 || n.is_nan(),
            Value::F64(n) => *n == 0.0 || n.is_nan(),
            Value::Decimal(d) => d.is_zero(),
            Value::List(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::Char(_)
            | Value::Date(_)
            | Value::Time(_)
            | Value::DateTime(_)
            | Value::DateTimeUtc(_)
            | Value::Lambda(_) => false,
        }
    }

    /// Lists and maps can serve as a rendering context; scalars cannot.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::List(_) | Value::Map(_))
    }

    /// Single-key lookup. Maps are indexed by key, lists by decimal position; every other
    /// value has no keys and always misses.
    pub fn lookup_key(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            Value::List(items) => key
                .parse::<usize>()
                .ok()
                .filter(|i| i.to_string() == key)
                .and_then(|i| items.get(i)),
            _ => None,
        }
    }
}

/// Text form used by interpolation tags.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null | Value::Map(_) | Value::Lambda(_) => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{}", c),
            Value::Str(s) => f.write_str(s),
            Value::I8(n) => write!(f, "{}", n),
            Value::I16(n) => write!(f, "{}", n),
            Value::I32(n) => write!(f, "{}", n),
            Value::I64(n) => write!(f, "{}", n),
            Value::I128(n) => write!(f, "{}", n),
            Value::U8(n) => write!(f, "{}", n),
            Value::U16(n) => write!(f, "{}", n),
            Value::U32(n) => write!(f, "{}", n),
            Value::U64(n) => write!(f, "{}", n),
            Value::U128(n) => write!(f, "{}", n),
            Value::F32(n) => write_float(f, *n, *n as f64),
            Value::F64(n) => write_float(f, *n, *n),
            Value::Date(d) => write!(f, "{}", d),
            Value::Time(t) => write!(f, "{}", t),
            Value::DateTime(dt) => write!(f, "{}", dt),
            Value::DateTimeUtc(dt) => write!(f, "{}", dt),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

/// Floats print in their shortest form; non-finite values print as `NaN` / `Infinity`, and
/// magnitudes of `1e21` and above (or below `1e-6`) switch to exponent form such as `1e+21`.
fn write_float<T: fmt::Display + fmt::LowerExp>(
    f: &mut fmt::Formatter<'_>,
    n: T,
    wide: f64,
) -> fmt::Result {
    if wide.is_nan() {
        return f.write_str("NaN");
    }
    if wide.is_infinite() {
        return f.write_str(if wide > 0.0 { "Infinity" } else { "-Infinity" });
    }

    let abs = wide.abs();
    if abs >= 1e21 || (abs != 0.0 && abs < 1e-6) {
        let exp = format!("{:e}", n);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(f, "{}e+{}", mantissa, power)
            }
            _ => f.write_str(&exp),
        }
    } else {
        write!(f, "{}", n)
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().collect())
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

/// 任何能转换为 Value 的类型
pub trait ToValue {
    fn to_value(&self) -> Value;
}

// --- 基础类型的宏实现 ---
macro_rules! impl_to_value_primitive {
    ($rust_type:ty, $variant:ident) => {
        impl ToValue for $rust_type {
            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }
        }
    };
}

impl_to_value_primitive!(bool, Bool);
impl_to_value_primitive!(char, Char);
impl_to_value_primitive!(String, Str);
impl_to_value_primitive!(i8, I8);
impl_to_value_primitive!(i16, I16);
impl_to_value_primitive!(i32, I32);
impl_to_value_primitive!(i64, I64);
impl_to_value_primitive!(i128, I128);
impl_to_value_primitive!(u8, U8);
impl_to_value_primitive!(u16, U16);
impl_to_value_primitive!(u32, U32);
impl_to_value_primitive!(u64, U64);
impl_to_value_primitive!(u128, U128);
impl_to_value_primitive!(f32, F32);
impl_to_value_primitive!(f64, F64);
impl_to_value_primitive!(NaiveDate, Date);
impl_to_value_primitive!(NaiveTime, Time);
impl_to_value_primitive!(NaiveDateTime, DateTime);
impl_to_value_primitive!(DateTime<Utc>, DateTimeUtc);
impl_to_value_primitive!(Decimal, Decimal);
impl_to_value_primitive!(Lambda, Lambda);

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl ToValue for usize {
    fn to_value(&self) -> Value {
        Value::U64(*self as u64)
    }
}

impl ToValue for isize {
    fn to_value(&self) -> Value {
        Value::I64(*self as i64)
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for () {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

// Blanket implementation for references
impl<T> ToValue for &T
where
    T: ToValue + ?Sized,
{
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(|v| v.to_value()).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for HashMap<String, T> {
    fn to_value(&self) -> Value {
        self.iter().map(|(k, v)| (k.clone(), v.to_value())).collect()
    }
}

impl<T: ToValue> ToValue for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        self.iter().map(|(k, v)| (k.clone(), v.to_value())).collect()
    }
}
