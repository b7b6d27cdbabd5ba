/// Where the parts of a split ended up relative to the splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitLocation {
    /// Only a minus part exists.
    Minus,
    /// Only a plus part exists.
    Plus,
    /// The splitter cut the object into a minus and a plus part.
    Both,
    /// No part exists, e.g. the object lies on the splitter.
    Neither,
}

/// The result of splitting an object by a hyperplane.
#[derive(Debug, Clone, PartialEq)]
pub struct Split<T> {
    minus: Option<T>,
    plus: Option<T>,
}

impl<T> Split<T> {
    #[must_use]
    pub fn new(minus: Option<T>, plus: Option<T>) -> Self {
        Self { minus, plus }
    }

    /// Returns the part on the minus side, if any.
    #[must_use]
    pub fn minus(&self) -> Option<&T> {
        self.minus.as_ref()
    }

    /// Returns the part on the plus side, if any.
    #[must_use]
    pub fn plus(&self) -> Option<&T> {
        self.plus.as_ref()
    }

    #[must_use]
    pub fn into_parts(self) -> (Option<T>, Option<T>) {
        (self.minus, self.plus)
    }

    #[must_use]
    pub fn location(&self) -> SplitLocation {
        match (&self.minus, &self.plus) {
            (Some(_), Some(_)) => SplitLocation::Both,
            (Some(_), None) => SplitLocation::Minus,
            (None, Some(_)) => SplitLocation::Plus,
            (None, None) => SplitLocation::Neither,
        }
    }

    /// Converts both parts with `f`.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Split<U> {
        Split {
            minus: self.minus.map(&mut f),
            plus: self.plus.map(&mut f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_follows_parts() {
        assert_eq!(Split::new(Some(1), Some(2)).location(), SplitLocation::Both);
        assert_eq!(Split::new(Some(1), None).location(), SplitLocation::Minus);
        assert_eq!(Split::<i32>::new(None, Some(2)).location(), SplitLocation::Plus);
        assert_eq!(Split::<i32>::new(None, None).location(), SplitLocation::Neither);
    }

    #[test]
    fn map_converts_both_sides() {
        let split = Split::new(Some(1), Some(2)).map(|v| v * 10);
        assert_eq!(split.into_parts(), (Some(10), Some(20)));
    }
}
