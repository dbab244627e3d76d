/// A strategy to produce samples for coordinates outside the image.
///
/// A filter asks the policy to map every coordinate it reads along one axis.
/// The policy returns the index of the source sample to read, or `None` when
/// the sample should be taken from [`BorderPolicy::border_value`] instead.
///
/// Implementations must return `Some(i)` for any in-range `i`, and any
/// returned index must be smaller than `len`.
pub trait BorderPolicy: Sync {
    /// Map the coordinate `i` into `[0, len)`.
    ///
    /// # Arguments
    ///
    /// * `i` - The (possibly out-of-range) coordinate.
    /// * `len` - The valid length of the dimension, at least 1.
    fn map_index(&self, i: isize, len: usize) -> Option<usize>;

    /// The sample value used when [`BorderPolicy::map_index`] returns `None`.
    fn border_value(&self) -> u8 {
        0
    }
}

/// Border handling modes for the filtering operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderType {
    /// Replicate the value of the nearest border pixel.
    ///
    /// Example: ...d c b a | a a a a...
    #[default]
    Replicate,

    /// Fill all out-of-bounds pixels with a constant value.
    ///
    /// Example: ...d c b a | v v v v...
    Constant(u8),

    /// Reflect the image across the border, including the border pixel.
    ///
    /// Example: ...d c b a | a b c d...
    Reflect,

    /// Reflect the image across the border, excluding the border pixel.
    ///
    /// Example: ...d c b a | b c d e...
    Reflect101,

    /// Wrap the image around periodically.
    ///
    /// Example: ...d c b a | w x y z...
    Wrap,
}

#[inline]
fn reflect_index(i: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let r = i.rem_euclid(period) as usize;
    if r < len {
        r
    } else {
        2 * len - 1 - r
    }
}

#[inline]
fn reflect101_index(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = (2 * len - 2) as isize;
    let r = i.rem_euclid(period) as usize;
    if r < len {
        r
    } else {
        2 * len - 2 - r
    }
}

impl BorderPolicy for BorderType {
    #[inline]
    fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        match self {
            BorderType::Replicate => Some(i.clamp(0, len as isize - 1) as usize),
            BorderType::Constant(_) => (i >= 0 && (i as usize) < len).then_some(i as usize),
            BorderType::Reflect => Some(reflect_index(i, len)),
            BorderType::Reflect101 => Some(reflect101_index(i, len)),
            BorderType::Wrap => Some(i.rem_euclid(len as isize) as usize),
        }
    }

    fn border_value(&self) -> u8 {
        match self {
            BorderType::Constant(v) => *v,
            _ => 0,
        }
    }
}
