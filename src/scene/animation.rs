//! Layer animation: timeline parameters and keyframe channels.

use crate::util::named_enum;
use super::Transform;

/// Interpolation toward the next key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Interpolation {
    /// Step; also the fallback for unrecognized names.
    #[default]
    None,
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

named_enum!(Interpolation, fallback = None, [None, Linear, EaseIn, EaseOut, EaseInOut]);

/// A time-tagged value.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe<T> {
    /// Time in timeline units.
    pub time: i64,
    pub value: T,
    pub interpolation: Interpolation,
}

impl<T> Keyframe<T> {
    pub fn new(time: i64, value: T, interpolation: Interpolation) -> Self {
        Self { time, value, interpolation }
    }
}

/// The four independently-timed channels of a layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keyframes {
    pub visibility: Vec<Keyframe<bool>>,
    pub offset: Vec<Keyframe<i32>>,
    pub opacity: Vec<Keyframe<f32>>,
    pub transform: Vec<Keyframe<Transform>>,
}

impl Keyframes {
    pub fn is_empty(&self) -> bool {
        self.visibility.is_empty()
            && self.offset.is_empty()
            && self.opacity.is_empty()
            && self.transform.is_empty()
    }
}

/// Animation block of a layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Animation {
    pub duration: f32,
    /// Whether this layer drives the master timeline.
    pub timeline: bool,
    pub start_offset: f32,
    pub max_repeat_count: f32,
    pub keys: Keyframes,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::NamedEnum;

    #[test]
    fn test_interpolation_fallback() {
        assert_eq!(Interpolation::parse_or_fallback(Some("Linear")), Interpolation::Linear);
        assert_eq!(Interpolation::parse_or_fallback(Some("Bezier")), Interpolation::None);
        assert_eq!(Interpolation::parse_or_fallback(Some("linear")), Interpolation::None);
        assert_eq!(Interpolation::parse_or_fallback(None), Interpolation::None);
        assert_eq!(Interpolation::EaseInOut.name(), "EaseInOut");
    }

    #[test]
    fn test_keyframes_empty() {
        let mut keys = Keyframes::default();
        assert!(keys.is_empty());
        keys.offset.push(Keyframe::new(0, 0, Interpolation::None));
        assert!(!keys.is_empty());
    }
}
