//! Attribute filters for querying close approaches.
//!
//! An [`AttributeFilter`] is a unary predicate over a close approach: it
//! extracts one [`Attribute`] from the approach (or its linked NEO) and
//! compares it against a reference value with a [`Comparison`]. Filters are
//! combined conjunctively by [`NeoDatabase::query`].
//!
//! [`FilterCriteria`] holds the optional user-facing criteria and compiles
//! them into a filter list. [`limit`] caps a result stream without
//! buffering it.
//!
//! [`NeoDatabase::query`]: crate::core::database::NeoDatabase::query

use std::fmt;
use std::iter::FusedIterator;

use chrono::NaiveDate;

use crate::core::database::ApproachView;
use crate::util::error::{missing_attribute, NeoError, Result};

/// Binary comparison applied as `attribute OP reference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    LessEqual,
    GreaterEqual,
}

impl Comparison {
    /// Evaluate `lhs OP rhs`. Unordered values (NaN) satisfy nothing.
    pub fn apply<T: PartialOrd + ?Sized>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            Comparison::Equal => lhs == rhs,
            Comparison::LessEqual => lhs <= rhs,
            Comparison::GreaterEqual => lhs >= rhs,
        }
    }

    /// Operator symbol used in log output.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Equal => "==",
            Comparison::LessEqual => "<=",
            Comparison::GreaterEqual => ">=",
        }
    }
}

/// The attribute a filter extracts from an approach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Calendar date of the approach time, time-of-day stripped.
    Date,
    /// Nominal approach distance in au.
    Distance,
    /// Relative approach velocity in km/s.
    Velocity,
    /// Diameter of the linked NEO in km.
    Diameter,
    /// Hazard flag of the linked NEO.
    Hazardous,
}

impl Attribute {
    /// Display name, e.g. `"Diameter"`.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Date => "Date",
            Attribute::Distance => "Distance",
            Attribute::Velocity => "Velocity",
            Attribute::Diameter => "Diameter",
            Attribute::Hazardous => "Hazardous",
        }
    }

    /// Whether `value` has the kind this attribute extracts.
    fn accepts(self, value: &FilterValue) -> bool {
        matches!(
            (self, value),
            (Attribute::Date, FilterValue::Date(_))
                | (
                    Attribute::Distance | Attribute::Velocity | Attribute::Diameter,
                    FilterValue::Float(_)
                )
                | (Attribute::Hazardous, FilterValue::Flag(_))
        )
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A comparable value: either extracted from an approach or captured as a
/// filter's reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterValue {
    Date(NaiveDate),
    Float(f64),
    Flag(bool),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Date(d) => write!(f, "{d}"),
            FilterValue::Float(v) => write!(f, "{v}"),
            FilterValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// A predicate `attribute(approach) OP value` over close approaches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeFilter {
    attribute: Attribute,
    comparison: Comparison,
    value: FilterValue,
}

impl AttributeFilter {
    /// Build a filter from its parts.
    ///
    /// # Errors
    /// Returns [`NeoError::UnsupportedCriterion`] if `value` is not the kind
    /// of value `attribute` extracts (e.g. a date for a diameter filter).
    pub fn new(attribute: Attribute, comparison: Comparison, value: FilterValue) -> Result<Self> {
        if !attribute.accepts(&value) {
            return Err(NeoError::UnsupportedCriterion {
                attribute: attribute.name().to_owned(),
                value: format!("{value:?}"),
            });
        }
        Ok(Self {
            attribute,
            comparison,
            value,
        })
    }

    /// Exact-date or date-bound filter on the approach's calendar date.
    pub fn date(comparison: Comparison, date: NaiveDate) -> Self {
        Self {
            attribute: Attribute::Date,
            comparison,
            value: FilterValue::Date(date),
        }
    }

    /// Filter on the nominal approach distance in au.
    pub fn distance(comparison: Comparison, au: f64) -> Self {
        Self {
            attribute: Attribute::Distance,
            comparison,
            value: FilterValue::Float(au),
        }
    }

    /// Filter on the relative approach velocity in km/s.
    pub fn velocity(comparison: Comparison, km_s: f64) -> Self {
        Self {
            attribute: Attribute::Velocity,
            comparison,
            value: FilterValue::Float(km_s),
        }
    }

    /// Filter on the linked NEO's diameter in km.
    pub fn diameter(comparison: Comparison, km: f64) -> Self {
        Self {
            attribute: Attribute::Diameter,
            comparison,
            value: FilterValue::Float(km),
        }
    }

    /// Filter on the linked NEO's hazard flag.
    pub fn hazardous(comparison: Comparison, hazardous: bool) -> Self {
        Self {
            attribute: Attribute::Hazardous,
            comparison,
            value: FilterValue::Flag(hazardous),
        }
    }

    /// Pull this filter's attribute out of `view`.
    fn extract(&self, view: &ApproachView<'_>) -> Result<FilterValue> {
        match self.attribute {
            Attribute::Date => view
                .time
                .map(|t| FilterValue::Date(t.date_naive()))
                .ok_or_else(|| missing_attribute(&view.designation, "approach time")),
            Attribute::Distance => Ok(FilterValue::Float(view.distance)),
            Attribute::Velocity => Ok(FilterValue::Float(view.velocity)),
            Attribute::Diameter => view
                .neo()
                .map(|neo| FilterValue::Float(neo.diameter))
                .ok_or_else(|| missing_attribute(&view.designation, "linked NEO diameter")),
            Attribute::Hazardous => view
                .neo()
                .map(|neo| FilterValue::Flag(neo.hazardous))
                .ok_or_else(|| missing_attribute(&view.designation, "linked NEO hazard flag")),
        }
    }

    /// Test `view` against this filter.
    ///
    /// # Errors
    /// [`NeoError::MissingAttribute`] if the attribute cannot be extracted
    /// (no linked NEO, null time); [`NeoError::UnsupportedCriterion`] if the
    /// extracted and reference values cannot be compared.
    pub fn evaluate(&self, view: &ApproachView<'_>) -> Result<bool> {
        let op = self.comparison;
        match (self.extract(view)?, self.value) {
            (FilterValue::Date(actual), FilterValue::Date(reference)) => {
                Ok(op.apply(&actual, &reference))
            }
            (FilterValue::Float(actual), FilterValue::Float(reference)) => {
                Ok(op.apply(&actual, &reference))
            }
            (FilterValue::Flag(actual), FilterValue::Flag(reference)) => {
                Ok(op.apply(&actual, &reference))
            }
            _ => Err(NeoError::UnsupportedCriterion {
                attribute: self.attribute.name().to_owned(),
                value: format!("{:?}", self.value),
            }),
        }
    }
}

impl fmt::Display for AttributeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}Filter(op={}, value={})",
            self.attribute,
            self.comparison.symbol(),
            self.value
        )
    }
}

/// User-specified query criteria.
///
/// Every field is optional and `None` means "unspecified". A present value
/// is always honoured, including `Some(0.0)` and `hazardous: Some(false)`
/// (only non-hazardous NEOs).
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Exact approach date.
    pub date: Option<NaiveDate>,
    /// Approach on or after this date.
    pub start_date: Option<NaiveDate>,
    /// Approach on or before this date.
    pub end_date: Option<NaiveDate>,
    /// Minimum nominal approach distance in au.
    pub distance_min: Option<f64>,
    /// Maximum nominal approach distance in au.
    pub distance_max: Option<f64>,
    /// Minimum relative velocity in km/s.
    pub velocity_min: Option<f64>,
    /// Maximum relative velocity in km/s.
    pub velocity_max: Option<f64>,
    /// Minimum NEO diameter in km.
    pub diameter_min: Option<f64>,
    /// Maximum NEO diameter in km.
    pub diameter_max: Option<f64>,
    /// Required hazard flag of the NEO.
    pub hazardous: Option<bool>,
}

impl FilterCriteria {
    /// Compile the specified criteria into a conjunctive filter list.
    ///
    /// Contradictory criteria (e.g. an exact date outside a start/end range)
    /// are not rejected; they simply match nothing.
    pub fn create_filters(&self) -> Vec<AttributeFilter> {
        use Comparison::{Equal, GreaterEqual, LessEqual};

        let mut filters = Vec::new();
        if let Some(date) = self.date {
            filters.push(AttributeFilter::date(Equal, date));
        }
        if let Some(date) = self.start_date {
            filters.push(AttributeFilter::date(GreaterEqual, date));
        }
        if let Some(date) = self.end_date {
            filters.push(AttributeFilter::date(LessEqual, date));
        }
        if let Some(au) = self.distance_min {
            filters.push(AttributeFilter::distance(GreaterEqual, au));
        }
        if let Some(au) = self.distance_max {
            filters.push(AttributeFilter::distance(LessEqual, au));
        }
        if let Some(km_s) = self.velocity_min {
            filters.push(AttributeFilter::velocity(GreaterEqual, km_s));
        }
        if let Some(km_s) = self.velocity_max {
            filters.push(AttributeFilter::velocity(LessEqual, km_s));
        }
        if let Some(km) = self.diameter_min {
            filters.push(AttributeFilter::diameter(GreaterEqual, km));
        }
        if let Some(km) = self.diameter_max {
            filters.push(AttributeFilter::diameter(LessEqual, km));
        }
        if let Some(flag) = self.hazardous {
            filters.push(AttributeFilter::hazardous(Equal, flag));
        }

        for filter in &filters {
            tracing::debug!("Filter: {filter}");
        }
        filters
    }

    /// Returns `true` if no criterion is specified.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Combine with `overrides`, whose specified fields take precedence.
    pub fn merged_with(&self, overrides: &FilterCriteria) -> FilterCriteria {
        FilterCriteria {
            date: overrides.date.or(self.date),
            start_date: overrides.start_date.or(self.start_date),
            end_date: overrides.end_date.or(self.end_date),
            distance_min: overrides.distance_min.or(self.distance_min),
            distance_max: overrides.distance_max.or(self.distance_max),
            velocity_min: overrides.velocity_min.or(self.velocity_min),
            velocity_max: overrides.velocity_max.or(self.velocity_max),
            diameter_min: overrides.diameter_min.or(self.diameter_min),
            diameter_max: overrides.diameter_max.or(self.diameter_max),
            hazardous: overrides.hazardous.or(self.hazardous),
        }
    }
}

/// Yield at most `n` items from `iter`, lazily.
///
/// `None` or `Some(0)` leaves the stream unlimited.
pub fn limit<I: IntoIterator>(iter: I, n: Option<usize>) -> Limit<I::IntoIter> {
    Limit {
        inner: iter.into_iter(),
        remaining: n.filter(|&n| n > 0),
    }
}

/// Iterator returned by [`limit`].
#[derive(Debug, Clone)]
pub struct Limit<I> {
    inner: I,
    remaining: Option<usize>,
}

impl<I: Iterator> Iterator for Limit<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        match self.remaining.as_mut() {
            None => self.inner.next(),
            Some(0) => None,
            Some(n) => {
                *n -= 1;
                self.inner.next()
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.inner.size_hint();
        match self.remaining {
            None => (lo, hi),
            Some(n) => (lo.min(n), Some(hi.map_or(n, |hi| hi.min(n)))),
        }
    }
}

impl<I: FusedIterator> FusedIterator for Limit<I> {}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
