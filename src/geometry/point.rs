//! Data and operations on 2D integer points.
//!
//! A [`Point`] is a plain value: two `i32` coordinates with structural equality
//! and hashing. Its text form is `(x,y)`, which is the format used by the point
//! and edge-list files in [`crate::io`].
//!
//! Distances are computed in `f64`. Every `i32` converts to `f64` exactly, so
//! coordinate differences are exact and the only rounding happens in the final
//! square root.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while parsing a [`Point`] from its `(x,y)` text form.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum PointParseError {
    /// The input was empty after trimming.
    #[error("Cannot parse a point from an empty string")]
    Empty,
    /// The input did not start with `(`.
    #[error("Point text does not start with '(': {text:?}")]
    MissingOpenParen {
        /// The offending input.
        text: String,
    },
    /// The input did not end with `)`.
    #[error("Point text does not end with ')': {text:?}")]
    MissingCloseParen {
        /// The offending input.
        text: String,
    },
    /// The text between the parentheses did not hold exactly two fields.
    #[error("{found} fields found, 2 expected")]
    FieldCount {
        /// Number of comma-separated fields found.
        found: usize,
    },
    /// One of the fields was not a valid `i32`.
    #[error("Invalid {field} coordinate {value:?}: {source}")]
    InvalidCoordinate {
        /// Which coordinate failed (`"x"` or `"y"`).
        field: &'static str,
        /// The text of the field.
        value: String,
        /// The underlying integer parse error.
        #[source]
        source: ParseIntError,
    },
}

// =============================================================================
// POINT STRUCT DEFINITION
// =============================================================================

/// A point in the plane with integer coordinates.
///
/// Points are immutable once created; the fields are private and exposed
/// through [`Point::x`] and [`Point::y`].
///
/// # Examples
///
/// ```rust
/// use knn_graph::geometry::point::Point;
///
/// let p = Point::new(3, 4);
/// assert_eq!(p.to_string(), "(3,4)");
/// assert_eq!(p.distance_to(&Point::new(0, 0)), 5.0);
/// assert_eq!("( 3 , 4 )".parse::<Point>().unwrap(), p);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    x: i32,
    y: i32,
}

// =============================================================================
// PUBLIC API
// =============================================================================

impl Point {
    /// Creates a point from its coordinates.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The x coordinate.
    #[inline]
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// The y coordinate.
    #[inline]
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Euclidean distance between `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use knn_graph::geometry::point::Point;
    ///
    /// let a = Point::new(1, 1);
    /// let b = Point::new(4, 5);
    /// assert_eq!(a.distance_to(&b), 5.0);
    /// assert_eq!(b.distance_to(&a), 5.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }

    /// Absolute difference of the x coordinates.
    ///
    /// Because points are searched in x order, this is the lower bound the
    /// neighbor search prunes with.
    #[inline]
    #[must_use]
    pub fn x_distance_to(&self, other: &Self) -> f64 {
        (f64::from(other.x) - f64::from(self.x)).abs()
    }

    /// Manhattan (L1) distance between `self` and `other`.
    ///
    /// Computed in `i64` so it cannot overflow for any pair of `i32` points.
    #[inline]
    #[must_use]
    pub fn manhattan_distance(&self, other: &Self) -> i64 {
        (i64::from(other.x) - i64::from(self.x)).abs()
            + (i64::from(other.y) - i64::from(self.y)).abs()
    }
}

// =============================================================================
// STANDARD TRAIT IMPLEMENTATIONS
// =============================================================================

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = PointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(PointParseError::Empty);
        }
        let Some(rest) = text.strip_prefix('(') else {
            return Err(PointParseError::MissingOpenParen {
                text: text.to_string(),
            });
        };
        let Some(inner) = rest.strip_suffix(')') else {
            return Err(PointParseError::MissingCloseParen {
                text: text.to_string(),
            });
        };

        let compact: String = inner.chars().filter(|c| !c.is_whitespace()).collect();
        let fields: Vec<&str> = compact.split(',').collect();
        let [x, y] = fields.as_slice() else {
            return Err(PointParseError::FieldCount {
                found: fields.len(),
            });
        };

        Ok(Self::new(parse_coordinate("x", x)?, parse_coordinate("y", y)?))
    }
}

fn parse_coordinate(field: &'static str, value: &str) -> Result<i32, PointParseError> {
    value
        .parse::<i32>()
        .map_err(|source| PointParseError::InvalidCoordinate {
            field,
            value: value.to_string(),
            source,
        })
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (i32, i32) {
    #[inline]
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

// =============================================================================
// TESTS
// =============================================================================
