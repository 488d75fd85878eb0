//! Device name filters
//!
//! Bulk listing consults a [`DeviceFilter`] for every candidate name. The
//! enumerator only asks the two questions the trait exposes, so any allow or
//! deny scheme can be plugged in. [`RegexFilter`] covers the usual
//! include/exclude pattern pair; [`NoopFilter`] lets everything through.
//!
//! ```
//! use netclass::{DeviceFilter, RegexFilter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let filter = RegexFilter::new(Some("^(eth|en)"), Some("^veth"))?;
//! assert!(!filter.ignored("eth0"));
//! assert!(filter.ignored("lo"));
//! assert!(filter.ignored("veth1234"));
//! # Ok(())
//! # }
//! ```

use crate::error::{NetClassError, Result};
use regex::Regex;

/// Name-based predicate applied during bulk device listing
pub trait DeviceFilter {
    /// True if `name` must be left out of the results
    fn ignored(&self, name: &str) -> bool;

    /// True if no restriction is configured
    fn has_no_filters(&self) -> bool;
}

impl<T: DeviceFilter + ?Sized> DeviceFilter for &T {
    fn ignored(&self, name: &str) -> bool {
        (**self).ignored(name)
    }

    fn has_no_filters(&self) -> bool {
        (**self).has_no_filters()
    }
}

impl<T: DeviceFilter + ?Sized> DeviceFilter for Box<T> {
    fn ignored(&self, name: &str) -> bool {
        (**self).ignored(name)
    }

    fn has_no_filters(&self) -> bool {
        (**self).has_no_filters()
    }
}

/// Filter that ignores nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFilter;

impl DeviceFilter for NoopFilter {
    fn ignored(&self, _name: &str) -> bool {
        false
    }

    fn has_no_filters(&self) -> bool {
        true
    }
}

/// Include/exclude regular expression filter
///
/// A name is ignored when it matches the exclude pattern, or when an include
/// pattern is set and the name does not match it.
#[derive(Debug, Clone, Default)]
pub struct RegexFilter {
    include: Option<Regex>,
    exclude: Option<Regex>,
}

impl RegexFilter {
    /// Build from optional include and exclude patterns
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Result<Self> {
        Ok(Self {
            include: include.map(compile).transpose()?,
            exclude: exclude.map(compile).transpose()?,
        })
    }

    /// Only names matching `pattern` pass
    pub fn allow(pattern: &str) -> Result<Self> {
        Self::new(Some(pattern), None)
    }

    /// Names matching `pattern` are dropped
    pub fn deny(pattern: &str) -> Result<Self> {
        Self::new(None, Some(pattern))
    }

    /// Build from already compiled expressions
    pub fn from_regexes(include: Option<Regex>, exclude: Option<Regex>) -> Self {
        Self { include, exclude }
    }

    /// The include pattern, if any
    pub fn include(&self) -> Option<&Regex> {
        self.include.as_ref()
    }

    /// The exclude pattern, if any
    pub fn exclude(&self) -> Option<&Regex> {
        self.exclude.as_ref()
    }
}

impl DeviceFilter for RegexFilter {
    fn ignored(&self, name: &str) -> bool {
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(name) {
                return true;
            }
        }
        match &self.include {
            Some(include) => !include.is_match(name),
            None => false,
        }
    }

    fn has_no_filters(&self) -> bool {
        self.include.is_none() && self.exclude.is_none()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| NetClassError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_filter() {
        let filter = NoopFilter;
        assert!(filter.has_no_filters());
        assert!(!filter.ignored("eth0"));
        assert!(!filter.ignored(""));
    }

    #[test]
    fn test_allow_only() {
        let filter = RegexFilter::allow("^eth0$").unwrap();
        assert!(!filter.has_no_filters());
        assert!(!filter.ignored("eth0"));
        assert!(filter.ignored("eth01"));
        assert!(filter.ignored("lo"));
    }

    #[test]
    fn test_deny_only() {
        let filter = RegexFilter::deny("^ppp").unwrap();
        assert!(!filter.has_no_filters());
        assert!(filter.ignored("ppp0"));
        assert!(!filter.ignored("eth0"));
    }

    #[test]
    fn test_deny_wins_over_allow() {
        let filter = RegexFilter::new(Some("^eth"), Some("^eth1$")).unwrap();
        assert!(!filter.ignored("eth0"));
        assert!(filter.ignored("eth1"));
        assert!(filter.ignored("wlan0"));
    }

    #[test]
    fn test_empty_regex_filter_has_no_filters() {
        let filter = RegexFilter::new(None, None).unwrap();
        assert!(filter.has_no_filters());
        assert!(!filter.ignored("anything"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = RegexFilter::allow("(eth").unwrap_err();
        assert!(matches!(err, NetClassError::InvalidPattern { pattern, .. } if pattern == "(eth"));
    }

    #[test]
    fn test_trait_object() {
        let filters: Vec<Box<dyn DeviceFilter>> = vec![
            Box::new(NoopFilter),
            Box::new(RegexFilter::deny("^lo$").unwrap()),
        ];
        let ignored: Vec<bool> = filters.iter().map(|f| f.ignored("lo")).collect();
        assert_eq!(ignored, vec![false, true]);
    }
}
