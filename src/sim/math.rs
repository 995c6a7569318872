//! Ordered-sequence extremum helpers and integer vector products.

use glam::IVec2;

use super::SimError;

/// Minimum of a sequence and the first index attaining it.
///
/// Ties resolve to the earliest occurrence. An empty sequence is an error.
pub fn argmin<T: PartialOrd + Copy>(values: &[T]) -> Result<(T, usize), SimError> {
    let mut iter = values.iter().copied().enumerate();
    let (_, mut min) = iter.next().ok_or(SimError::EmptySequence)?;
    let mut index = 0;
    for (i, value) in iter {
        if value < min {
            min = value;
            index = i;
        }
    }
    Ok((min, index))
}

/// Maximum of a sequence and the first index attaining it.
///
/// Ties resolve to the earliest occurrence. An empty sequence is an error.
pub fn argmax<T: PartialOrd + Copy>(values: &[T]) -> Result<(T, usize), SimError> {
    let mut iter = values.iter().copied().enumerate();
    let (_, mut max) = iter.next().ok_or(SimError::EmptySequence)?;
    let mut index = 0;
    for (i, value) in iter {
        if value > max {
            max = value;
            index = i;
        }
    }
    Ok((max, index))
}

/// Cross product of two 2-D integer vectors.
#[inline]
pub fn cross(a: IVec2, b: IVec2) -> i32 {
    a.x * b.y - b.x * a.y
}

/// Dot product of two 2-D integer vectors.
#[inline]
pub fn dot(a: IVec2, b: IVec2) -> i32 {
    a.x * b.x + a.y * b.y
}
