//! Textual enum names with a designated fallback member.

/// An enum that is stored by name in the manifest.
///
/// Unknown or missing names never fail: they resolve to [`NamedEnum::FALLBACK`].
pub trait NamedEnum: Sized + Copy {
    /// Member used when the stored name is absent or unrecognized.
    const FALLBACK: Self;

    /// Look up a member by its exact stored name.
    fn from_name(name: &str) -> Option<Self>;

    /// Stored name of this member.
    fn name(&self) -> &'static str;

    /// Parse with fallback.
    fn parse_or_fallback(name: Option<&str>) -> Self {
        name.and_then(Self::from_name).unwrap_or(Self::FALLBACK)
    }
}

/// Implement [`NamedEnum`] for a fieldless enum whose stored names are the
/// variant identifiers.
macro_rules! named_enum {
    ($ty:ident, fallback = $fallback:ident, [$($variant:ident),+ $(,)?]) => {
        impl $crate::util::NamedEnum for $ty {
            const FALLBACK: Self = $ty::$fallback;

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($variant) => Some($ty::$variant),)+
                    _ => None,
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    $($ty::$variant => stringify!($variant),)+
                }
            }
        }
    };
}

pub(crate) use named_enum;
