/// Build a [`Value`](crate::Value) from a JSON-like literal.
///
/// Object keys must be string literals; field order in the literal is the
/// order the fields encode in.
///
/// ```rust
/// use toon_codec::toon;
///
/// let user = toon!({
///     "name": "Alice",
///     "age": 30,
///     "tags": ["rust", "llm"]
/// });
/// assert_eq!(toon_codec::encode(&user), "name: Alice\nage: 30\ntags[2]: rust,llm");
/// ```
#[macro_export]
macro_rules! toon {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    (- $lit:literal) => {
        $crate::to_value(&(-$lit)).unwrap_or($crate::Value::Null)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($tt:tt)* ]) => {{
        let mut elements = Vec::new();
        $crate::__toon_array!(elements; $($tt)*);
        $crate::Value::Array(elements)
    }};

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($tt:tt)* }) => {{
        let mut object = $crate::Map::new();
        $crate::__toon_object!(object; $($tt)*);
        $crate::Value::Object(object)
    }};

    // Fallback for expressions: numbers, strings, and anything Serialize.
    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}

/// Internal muncher for [`toon!`] array bodies; not part of the public API.
#[doc(hidden)]
#[macro_export]
macro_rules! __toon_array {
    ($elements:ident; ) => {};
    ($elements:ident; - $lit:literal) => {
        $elements.push($crate::toon!(- $lit));
    };
    ($elements:ident; - $lit:literal, $($rest:tt)*) => {
        $elements.push($crate::toon!(- $lit));
        $crate::__toon_array!($elements; $($rest)*);
    };
    ($elements:ident; $elem:tt) => {
        $elements.push($crate::toon!($elem));
    };
    ($elements:ident; $elem:tt, $($rest:tt)*) => {
        $elements.push($crate::toon!($elem));
        $crate::__toon_array!($elements; $($rest)*);
    };
}

/// Internal muncher for [`toon!`] object bodies; not part of the public API.
#[doc(hidden)]
#[macro_export]
macro_rules! __toon_object {
    ($object:ident; ) => {};
    ($object:ident; $key:literal : - $lit:literal) => {
        $object.insert($key.to_string(), $crate::toon!(- $lit));
    };
    ($object:ident; $key:literal : - $lit:literal, $($rest:tt)*) => {
        $object.insert($key.to_string(), $crate::toon!(- $lit));
        $crate::__toon_object!($object; $($rest)*);
    };
    ($object:ident; $key:literal : $value:tt) => {
        $object.insert($key.to_string(), $crate::toon!($value));
    };
    ($object:ident; $key:literal : $value:tt, $($rest:tt)*) => {
        $object.insert($key.to_string(), $crate::toon!($value));
        $crate::__toon_object!($object; $($rest)*);
    };
}
