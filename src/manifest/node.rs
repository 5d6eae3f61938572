//! Defaulting accessors over the manifest tree.
//!
//! Every scalar read in the manifest goes through [`Node`]: a missing key,
//! a `null`, or a value of the wrong shape resolves to the caller's default
//! instead of failing, so one bad field never blocks its siblings.

use serde_json::Value;

use crate::util::{Color, NamedEnum, Quat, Vec3, Vec4};

/// A possibly-absent position in the manifest tree.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Node<'a>(Option<&'a Value>);

impl<'a> Node<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self(Some(value))
    }

    /// Child by key. Absent if this node is absent or not an object.
    pub fn get(&self, key: &str) -> Node<'a> {
        Node(self.0.and_then(|v| v.get(key)))
    }

    /// Present and not `null`.
    pub fn exists(&self) -> bool {
        !matches!(self.0, None | Some(Value::Null))
    }

    pub fn value(&self) -> Option<&'a Value> {
        self.0
    }

    pub fn as_object(&self) -> Option<&'a serde_json::Map<String, Value>> {
        self.0.and_then(Value::as_object)
    }

    pub fn as_array(&self) -> Option<&'a Vec<Value>> {
        self.0.and_then(Value::as_array)
    }

    /// Array elements, empty when absent or not an array.
    pub fn items(&self) -> impl Iterator<Item = Node<'a>> {
        self.as_array().into_iter().flatten().map(Node::new)
    }

    pub fn f64(&self) -> Option<f64> {
        self.0.and_then(Value::as_f64)
    }

    pub fn f32_or(&self, default: f32) -> f32 {
        self.f64().map(|v| v as f32).unwrap_or(default)
    }

    /// Integral value; floats with no fractional part are accepted.
    pub fn i64(&self) -> Option<i64> {
        let v = self.0?;
        v.as_i64().or_else(|| {
            v.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        })
    }

    pub fn i64_or(&self, default: i64) -> i64 {
        self.i64().unwrap_or(default)
    }

    pub fn i32_or(&self, default: i32) -> i32 {
        self.i64().and_then(|v| i32::try_from(v).ok()).unwrap_or(default)
    }

    pub fn bool_or(&self, default: bool) -> bool {
        self.0.and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn str(&self) -> Option<&'a str> {
        self.0.and_then(Value::as_str)
    }

    pub fn string_or(&self, default: &str) -> String {
        self.str().unwrap_or(default).to_string()
    }

    /// Enum stored by name, falling back to the enum's designated member.
    pub fn named<T: NamedEnum>(&self) -> T {
        T::parse_or_fallback(self.str())
    }

    /// Fixed-arity float array. Any element that is not a number is `None`.
    pub fn floats<const N: usize>(&self) -> Option<[Option<f32>; N]> {
        let items = self.as_array()?;
        if items.len() != N {
            return None;
        }
        Some(std::array::from_fn(|i| items[i].as_f64().map(|v| v as f32)))
    }

    /// Fixed-arity float array with every element present.
    pub fn floats_exact<const N: usize>(&self) -> Option<[f32; N]> {
        let v = self.floats::<N>()?;
        if v.iter().all(Option::is_some) {
            Some(v.map(|x| x.unwrap_or_default()))
        } else {
            None
        }
    }

    pub fn vec3_or(&self, default: Vec3) -> Vec3 {
        self.floats_exact::<3>().map(Vec3::from_array).unwrap_or(default)
    }

    pub fn vec4_or(&self, default: Vec4) -> Vec4 {
        self.floats_exact::<4>().map(Vec4::from_array).unwrap_or(default)
    }

    /// Quaternion stored as `[x, y, z, w]`.
    pub fn quat_or(&self, default: Quat) -> Quat {
        self.floats_exact::<4>().map(Quat::from_array).unwrap_or(default)
    }

    pub fn color_or(&self, default: Color) -> Color {
        self.floats_exact::<3>().map(Color::from).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_defaults() {
        let v = json!({ "A": 2.5, "B": null, "C": "text", "D": true, "E": 3.0, "F": 3.5 });
        let n = Node::new(&v);
        assert_eq!(n.get("A").f32_or(0.0), 2.5);
        assert_eq!(n.get("B").f32_or(7.0), 7.0);
        assert_eq!(n.get("Missing").f32_or(7.0), 7.0);
        assert_eq!(n.get("C").f32_or(7.0), 7.0);
        assert!(n.get("D").bool_or(false));
        assert!(n.get("C").bool_or(true));
        assert_eq!(n.get("E").i32_or(0), 3);
        assert_eq!(n.get("F").i32_or(-1), -1);
        assert_eq!(n.get("C").string_or("x"), "text");
        assert_eq!(n.get("A").string_or("x"), "x");
        assert!(!n.get("B").exists());
        assert!(n.get("A").exists());
    }

    #[test]
    fn test_nested_absent() {
        let v = json!({ "A": 1 });
        let n = Node::new(&v);
        assert!(!n.get("X").get("Y").get("Z").exists());
        assert_eq!(n.get("A").get("B").i64_or(9), 9);
        assert_eq!(n.get("X").items().count(), 0);
    }

    #[test]
    fn test_arrays() {
        let v = json!({ "V": [1, 2.5, 3], "Short": [1, 2], "Holes": [1, null, 3] });
        let n = Node::new(&v);
        assert_eq!(n.get("V").vec3_or(Vec3::ZERO), Vec3::new(1.0, 2.5, 3.0));
        assert_eq!(n.get("Short").vec3_or(Vec3::ONE), Vec3::ONE);
        assert_eq!(n.get("Holes").vec3_or(Vec3::ONE), Vec3::ONE);
        assert_eq!(n.get("Holes").floats::<3>(), Some([Some(1.0), None, Some(3.0)]));
    }
}
