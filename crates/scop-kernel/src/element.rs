use std::fmt;

/// Signed integer widths a matrix can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer (the C `int` of the reference kernel).
    I32,
    /// 64-bit signed integer.
    I64,
}

impl ElementKind {
    /// Returns the size in bytes of a single element.
    pub fn size_in_bytes(&self) -> usize {
        match self {
            ElementKind::I16 => 2,
            ElementKind::I32 => 4,
            ElementKind::I64 => 8,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::I16 => write!(f, "i16"),
            ElementKind::I32 => write!(f, "i32"),
            ElementKind::I64 => write!(f, "i64"),
        }
    }
}

/// Integer element stored in a [`Matrix`](crate::Matrix).
///
/// Arithmetic is two's-complement wrapping in every build profile, so a
/// product that overflows the chosen width yields the same bits whichever
/// kernel computed it.
pub trait Element:
    Copy + Default + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    const ZERO: Self;
    const ONE: Self;
    const KIND: ElementKind;
    /// Largest value of the type, widened to `i64`.
    const MAX_I64: i64;

    /// Returns `self + a * b`, wrapping on overflow.
    fn mul_add(self, a: Self, b: Self) -> Self;

    /// Truncates an `i64` to this width.
    fn from_i64_wrapping(v: i64) -> Self;
}

macro_rules! impl_element {
    ($t:ty, $kind:expr) => {
        impl Element for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const KIND: ElementKind = $kind;
            const MAX_I64: i64 = <$t>::MAX as i64;

            #[inline(always)]
            fn mul_add(self, a: Self, b: Self) -> Self {
                self.wrapping_add(a.wrapping_mul(b))
            }

            #[inline(always)]
            fn from_i64_wrapping(v: i64) -> Self {
                v as $t
            }
        }
    };
}

impl_element!(i16, ElementKind::I16);
impl_element!(i32, ElementKind::I32);
impl_element!(i64, ElementKind::I64);
