// src/index/range.rs
use super::{Index, IndexDelta};
use crate::error::{LogDataError, Result};
use std::cmp::Ordering;
use std::fmt;

/// Closed `[start, end]` span of one index kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexRange {
    start: Index,
    end: Index,
}

impl IndexRange {
    pub fn new(start: Index, end: Index) -> Result<Self> {
        if start.compare(&end)? == Ordering::Greater {
            return Err(LogDataError::InvalidArgument(format!(
                "range start {} is after end {}",
                start, end
            )));
        }
        Ok(IndexRange { start, end })
    }

    pub fn start(&self) -> &Index {
        &self.start
    }

    pub fn end(&self) -> &Index {
        &self.end
    }

    pub fn contains(&self, index: &Index) -> Result<bool> {
        Ok(self.start.compare(index)? != Ordering::Greater
            && index.compare(&self.end)? != Ordering::Greater)
    }

    pub fn span(&self) -> Result<IndexDelta> {
        self.end.subtract(&self.start)
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Report every adjacent pair of indices that is not continuous.
///
/// Each gap is returned as the range spanned by the two indices around it,
/// lower bound first, so out-of-order input still yields valid ranges.
pub fn find_gaps<'a, I>(indices: I) -> Result<Vec<IndexRange>>
where
    I: IntoIterator<Item = &'a Index>,
{
    let mut gaps = Vec::new();
    let mut previous: Option<&Index> = None;

    for current in indices {
        if let Some(prev) = previous {
            if !prev.is_continuous_with(current)? {
                let low = Index::min_of(*prev, *current)?;
                let high = Index::max_of(*prev, *current)?;
                gaps.push(IndexRange::new(low, high)?);
            }
        }
        previous = Some(current);
    }

    Ok(gaps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DepthUnit;

    fn m(value: f64) -> Index {
        Index::depth(value, DepthUnit::Meter)
    }

    #[test]
    fn test_range_validation() {
        assert!(IndexRange::new(m(0.0), m(10.0)).is_ok());
        assert!(IndexRange::new(m(5.0), m(5.0)).is_ok());
        assert!(matches!(
            IndexRange::new(m(10.0), m(0.0)),
            Err(LogDataError::InvalidArgument(_))
        ));
        assert!(matches!(
            IndexRange::new(m(0.0), Index::depth(10.0, DepthUnit::Feet)),
            Err(LogDataError::IncompatibleUnit { .. })
        ));
    }

    #[test]
    fn test_contains_and_span() {
        let range = IndexRange::new(m(0.0), m(10.0)).unwrap();
        assert!(range.contains(&m(0.0)).unwrap());
        assert!(range.contains(&m(10.0)).unwrap());
        assert!(!range.contains(&m(10.5)).unwrap());
        assert_eq!(range.span().unwrap().magnitude(), 10.0);
        assert_eq!(range.to_string(), "[0, 10]");
    }

    #[test]
    fn test_find_gaps() {
        let indices = vec![m(0.0), m(0.05), m(0.1), m(1.0), m(1.05), m(3.0)];
        let gaps = find_gaps(&indices).unwrap();
        assert_eq!(gaps.len(), 2);
        assert_eq!(*gaps[0].start(), m(0.1));
        assert_eq!(*gaps[0].end(), m(1.0));
        assert_eq!(*gaps[1].start(), m(1.05));
        assert_eq!(*gaps[1].end(), m(3.0));

        assert!(find_gaps(&Vec::<Index>::new()).unwrap().is_empty());
    }

    #[test]
    fn test_find_gaps_descending() {
        let indices = vec![m(5.0), m(4.95), m(2.0)];
        let gaps = find_gaps(&indices).unwrap();
        assert_eq!(gaps.len(), 1);
        assert_eq!(*gaps[0].start(), m(2.0));
        assert_eq!(*gaps[0].end(), m(4.95));
    }
}
