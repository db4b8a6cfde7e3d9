//! Define the tagged value model that every other dyncheck component exchanges.
//!
//! A [`Value`] is one of the dynamic values a loosely typed scripting language can produce. Associative
//! collections follow “ordered array” semantics: keys are ints or strings, insertion order is preserved, and
//! inserting an existing key replaces its value in place.
//!
//! ## Notes
//! - `==` on [`Value`] means **strict** equality (see [`crate::equality::strict_equal`]). Use
//!   [`crate::equality::loose_equal`] for the coercing comparison.
//! - Truthiness ([`Value::as_bool`]) is total: every value coerces to a boolean without failing.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::equality::strict_equal;

/// Identify the variant of a [`Value`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    Null,
    Bool,
    Int,
    Float,
    String,
    List,
    Map,
    Object,
}

impl Tag {
    /// Return the user-facing type name for this tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Null => "null",
            Tag::Bool => "bool",
            Tag::Int => "int",
            Tag::Float => "float",
            Tag::String => "string",
            Tag::List => "list",
            Tag::Map => "map",
            Tag::Object => "object",
        }
    }

    /// Whether values with this tag take part in numeric comparison.
    pub fn is_numeric(self) -> bool {
        matches!(self, Tag::Int | Tag::Float)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of an associative collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapKey {
    Int(i64),
    Str(String),
}

impl MapKey {
    /// Build a key from a string, normalizing canonical decimal integers to [`MapKey::Int`].
    ///
    /// ## Notes
    /// - `"7"` and `"-3"` become int keys; `"07"`, `"+7"`, `"-0"` and `" 7"` stay string keys.
    /// - Integers that do not fit `i64` stay string keys.
    pub fn from_string(key: impl Into<String>) -> Self {
        let key = key.into();
        match canonical_int_key(&key) {
            Some(n) => MapKey::Int(n),
            None => MapKey::Str(key),
        }
    }

    /// Return the key as a standalone [`Value`].
    pub fn to_value(&self) -> Value {
        match self {
            MapKey::Int(n) => Value::Int(*n),
            MapKey::Str(s) => Value::String(s.clone()),
        }
    }

    pub fn is_str(&self) -> bool {
        matches!(self, MapKey::Str(_))
    }
}

fn canonical_int_key(key: &str) -> Option<i64> {
    let digits = key.strip_prefix('-').unwrap_or(key);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if key == "-0" {
        return None;
    }
    key.parse::<i64>().ok()
}

impl From<i64> for MapKey {
    fn from(n: i64) -> Self {
        MapKey::Int(n)
    }
}

impl From<i32> for MapKey {
    fn from(n: i32) -> Self {
        MapKey::Int(i64::from(n))
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        MapKey::from_string(s)
    }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self {
        MapKey::from_string(s)
    }
}

/// Opaque object identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Reference to an object instance. Identity is the [`ObjectId`]; the class name is for display only.
#[derive(Debug, Clone)]
pub struct ObjectRef {
    id: ObjectId,
    class: Arc<str>,
}

impl ObjectRef {
    /// Allocate a fresh identity for an instance of `class`.
    pub fn new(class: impl Into<Arc<str>>) -> Self {
        let id = ObjectId(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed));
        Self { id, class: class.into() }
    }

    /// Rebuild a reference with a known identity (e.g. when a loader maps external handles).
    pub fn with_id(id: ObjectId, class: impl Into<Arc<str>>) -> Self {
        Self { id, class: class.into() }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    /// Whether both references point at the same instance.
    pub fn same_instance(&self, other: &ObjectRef) -> bool {
        self.id == other.id
    }
}

/// A dynamic value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    /// Ordered associative collection; keys are unique.
    Map(Vec<(MapKey, Value)>),
    Object(ObjectRef),
}

impl Value {
    /// Return the tag of this value.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Null => Tag::Null,
            Value::Bool(_) => Tag::Bool,
            Value::Int(_) => Tag::Int,
            Value::Float(_) => Tag::Float,
            Value::String(_) => Tag::String,
            Value::List(_) => Tag::List,
            Value::Map(_) => Tag::Map,
            Value::Object(_) => Tag::Object,
        }
    }

    /// Return the user-facing type name (`"int"`, `"string"`, ...).
    pub fn type_name(&self) -> &'static str {
        self.tag().as_str()
    }

    /// Coerce this value to a boolean (truthiness).
    ///
    /// ## Rules
    /// - `Null` → `false`; `Bool` → itself.
    /// - `Int`/`Float` → `false` iff zero (`NaN` is truthy, `-0.0` is falsy).
    /// - `String` → `false` iff empty or exactly `"0"`.
    /// - `List`/`Map` → `false` iff empty.
    /// - `Object` → always `true`.
    ///
    /// ## Examples
    /// ```rust
    /// use dyncheck_core::Value;
    ///
    /// assert!(!Value::from("0").as_bool());
    /// assert!(Value::from("0.0").as_bool());
    /// assert!(!Value::list(Vec::new()).as_bool());
    /// ```
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !(s.is_empty() || s == "0"),
            Value::List(items) => !items.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
            Value::Object(_) => true,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_numeric(&self) -> bool {
        self.tag().is_numeric()
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(MapKey, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Number of elements for collections, `None` for scalars.
    pub fn count(&self) -> Option<usize> {
        match self {
            Value::List(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Build a [`Value::List`].
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Build a [`Value::Map`]; later duplicates of a key replace the earlier value in place.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<MapKey>,
        V: Into<Value>,
    {
        let mut out: Vec<(MapKey, Value)> = Vec::new();
        for (k, v) in entries {
            insert_entry(&mut out, k.into(), v.into());
        }
        Value::Map(out)
    }

    /// Build an associative array, producing a [`Value::List`] when the keys are exactly `0..n` in order.
    ///
    /// ## Examples
    /// ```rust
    /// use dyncheck_core::{Tag, Value};
    ///
    /// assert_eq!(Value::array([(0, 1), (1, 2)]).tag(), Tag::List);
    /// assert_eq!(Value::array([(1, 1), (0, 2)]).tag(), Tag::Map);
    /// ```
    pub fn array<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<MapKey>,
        V: Into<Value>,
    {
        match Value::map(entries) {
            Value::Map(entries) if is_packed(&entries) => {
                Value::List(entries.into_iter().map(|(_, v)| v).collect())
            }
            other => other,
        }
    }

    /// Build a fresh object reference of the given class.
    pub fn object(class: impl Into<Arc<str>>) -> Self {
        Value::Object(ObjectRef::new(class))
    }

    /// Look up a key in a map (or an int index in a list).
    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        match (self, key) {
            (Value::Map(entries), key) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            (Value::List(items), MapKey::Int(i)) => usize::try_from(*i).ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Iterate `(key, value)` pairs of a collection; lists yield their indices as int keys.
    pub fn entries(&self) -> Vec<(MapKey, &Value)> {
        match self {
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (MapKey::Int(i as i64), v))
                .collect(),
            Value::Map(entries) => entries.iter().map(|(k, v)| (k.clone(), v)).collect(),
            _ => Vec::new(),
        }
    }
}

/// Insert or replace `key` in an ordered entry list.
pub fn insert_entry(entries: &mut Vec<(MapKey, Value)>, key: MapKey, value: Value) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => entries.push((key, value)),
    }
}

fn is_packed(entries: &[(MapKey, Value)]) -> bool {
    entries
        .iter()
        .enumerate()
        .all(|(i, (k, _))| *k == MapKey::Int(i as i64))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        strict_equal(self, other)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_table() {
        let falsy = [
            Value::Null,
            Value::Bool(false),
            Value::Int(0),
            Value::Float(0.0),
            Value::Float(-0.0),
            Value::from(""),
            Value::from("0"),
            Value::list(Vec::new()),
            Value::map(Vec::<(MapKey, Value)>::new()),
        ];
        for v in &falsy {
            assert!(!v.as_bool(), "{v:?} should be falsy");
        }

        let truthy = [
            Value::Bool(true),
            Value::Int(-1),
            Value::Float(0.1),
            Value::Float(f64::NAN),
            Value::from("00"),
            Value::from("0.0"),
            Value::from(" "),
            Value::list([Value::Null]),
            Value::map([("x", 0)]),
            Value::object("Foo"),
        ];
        for v in &truthy {
            assert!(v.as_bool(), "{v:?} should be truthy");
        }
    }

    #[test]
    fn map_keys_normalize_integer_strings() {
        assert_eq!(MapKey::from_string("7"), MapKey::Int(7));
        assert_eq!(MapKey::from_string("-3"), MapKey::Int(-3));
        assert_eq!(MapKey::from_string("0"), MapKey::Int(0));
        assert_eq!(MapKey::from_string("07"), MapKey::Str("07".into()));
        assert_eq!(MapKey::from_string("-0"), MapKey::Str("-0".into()));
        assert_eq!(MapKey::from_string("+7"), MapKey::Str("+7".into()));
        assert_eq!(MapKey::from_string("x"), MapKey::Str("x".into()));
        assert_eq!(
            MapKey::from_string("99999999999999999999"),
            MapKey::Str("99999999999999999999".into())
        );
    }

    #[test]
    fn map_insert_replaces_in_place() {
        let v = Value::map([("a", 1), ("b", 2), ("a", 3)]);
        let entries = v.as_map().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, MapKey::Str("a".into()));
        assert_eq!(entries[0].1, Value::Int(3));
    }

    #[test]
    fn array_detects_packed_keys() {
        assert_eq!(Value::array([(0, "a"), (1, "b")]).tag(), Tag::List);
        assert_eq!(Value::array([("0", "a"), ("1", "b")]).tag(), Tag::List);
        assert_eq!(Value::array([(1, "a")]).tag(), Tag::Map);
        assert_eq!(Value::array(Vec::<(i64, Value)>::new()).tag(), Tag::List);
    }

    #[test]
    fn objects_have_distinct_identities() {
        let a = ObjectRef::new("Foo");
        let b = ObjectRef::new("Foo");
        assert!(!a.same_instance(&b));
        assert!(a.same_instance(&a.clone()));
        assert_eq!(a.class(), "Foo");
    }

    #[test]
    fn get_works_for_lists_and_maps() {
        let list = Value::list([Value::from(10), Value::from(20)]);
        assert_eq!(list.get(&MapKey::Int(1)), Some(&Value::Int(20)));
        assert_eq!(list.get(&MapKey::Int(-1)), None);

        let map = Value::map([("x", 4)]);
        assert_eq!(map.get(&MapKey::from("x")), Some(&Value::Int(4)));
        assert_eq!(map.get(&MapKey::from("y")), None);
    }

    #[test]
    fn option_conversion() {
        assert!(Value::from(None::<i64>).is_null());
        assert_eq!(Value::from(Some(3)), Value::Int(3));
    }
}
