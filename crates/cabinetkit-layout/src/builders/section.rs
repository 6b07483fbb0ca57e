//! Vertical partitions
//!
//! Section widths are given as absolute millimetres or as percentages of the
//! width left once the partitions themselves are taken out. Percentages that
//! add up to 100 split that width exactly, the last section absorbing the
//! rounding. Absolute widths are used as given and any percentages share
//! what they leave over.

use cabinetkit_core::{Context, LayoutError, LayoutResult, PanelPlacement};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use super::{BuildOutput, Carcass};
use crate::distribute::{available_between, proportional_split};
use crate::session::BuildSession;

/// How far percentages may stray from 100 and still count as a full split.
const PERCENT_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SectionToken", into = "SectionToken")]
pub enum SectionSpec {
    Percent(f64),
    Absolute(f64),
}

impl SectionSpec {
    pub fn percent(value: f64) -> Self {
        Self::Percent(value)
    }

    pub fn absolute(width: f64) -> Self {
        Self::Absolute(width)
    }

    /// `count` sections of equal share.
    pub fn equal(count: usize) -> Vec<Self> {
        if count == 0 {
            return Vec::new();
        }
        vec![Self::Percent(100.0 / count as f64); count]
    }
}

impl fmt::Display for SectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(p) => write!(f, "{}%", p),
            Self::Absolute(w) => write!(f, "{}", w),
        }
    }
}

impl FromStr for SectionSpec {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = |reason: &str| LayoutError::InvalidSection {
            spec: s.to_string(),
            reason: reason.to_string(),
        };

        let (number, percent) = match trimmed.strip_suffix('%') {
            Some(number) => (number.trim(), true),
            None => (trimmed, false),
        };
        let value: f64 = number.parse().map_err(|_| invalid("not a number"))?;
        if !(value > 0.0) {
            return Err(invalid("must be > 0"));
        }

        Ok(if percent {
            Self::Percent(value)
        } else {
            Self::Absolute(value)
        })
    }
}

/// Serialized form: a number of millimetres or a `"NN%"` string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SectionToken {
    Width(f64),
    Text(String),
}

impl TryFrom<SectionToken> for SectionSpec {
    type Error = LayoutError;

    fn try_from(token: SectionToken) -> Result<Self, Self::Error> {
        match token {
            SectionToken::Width(w) => SectionSpec::from_str(&w.to_string()),
            SectionToken::Text(text) => text.parse(),
        }
    }
}

impl From<SectionSpec> for SectionToken {
    fn from(spec: SectionSpec) -> Self {
        match spec {
            SectionSpec::Absolute(w) => SectionToken::Width(w),
            SectionSpec::Percent(_) => SectionToken::Text(spec.to_string()),
        }
    }
}

/// Resolve section widths inside an interior of `inner_width`.
pub fn resolve_sections(specs: &[SectionSpec], inner_width: f64, thickness: f64) -> Vec<f64> {
    if specs.is_empty() {
        return Vec::new();
    }

    let available = available_between(inner_width, specs.len(), thickness);
    let absolute: f64 = specs
        .iter()
        .filter_map(|s| match s {
            SectionSpec::Absolute(w) => Some(*w),
            SectionSpec::Percent(_) => None,
        })
        .sum();
    let percents: Vec<f64> = specs
        .iter()
        .filter_map(|s| match s {
            SectionSpec::Percent(p) => Some(*p),
            SectionSpec::Absolute(_) => None,
        })
        .collect();

    let mut shares = percent_widths(&percents, available - absolute).into_iter();
    specs
        .iter()
        .map(|spec| match spec {
            SectionSpec::Absolute(w) => *w,
            SectionSpec::Percent(_) => shares.next().unwrap_or(0.0),
        })
        .collect()
}

fn percent_widths(percents: &[f64], base: f64) -> Vec<f64> {
    if percents.is_empty() {
        return Vec::new();
    }
    let total: f64 = percents.iter().sum();
    if (total - 100.0).abs() <= PERCENT_TOLERANCE {
        return proportional_split(percents, base);
    }

    warn!(
        "Section percentages add up to {}%, widths will not fill {}mm",
        total, base
    );
    percents
        .iter()
        .map(|p| (base * p / 100.0).round())
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct SectionBuilder {
    specs: Vec<SectionSpec>,
}

impl SectionBuilder {
    pub fn new(specs: Vec<SectionSpec>) -> Self {
        Self { specs }
    }

    pub fn resolve(&self, carcass: &Carcass) -> Vec<f64> {
        resolve_sections(&self.specs, carcass.inner_width(), carcass.thickness)
    }

    /// Place the partitions between sections.
    pub fn build(
        &self,
        carcass: &Carcass,
        ctx: &Context,
        session: &mut BuildSession<'_>,
    ) -> LayoutResult<BuildOutput> {
        let mut out = BuildOutput::new();
        let widths = self.resolve(carcass);
        if widths.len() < 2 {
            return Ok(out);
        }

        let t = carcass.thickness;
        let height = carcass.interior_height();
        let depth = carcass.inner_depth();
        let z = ctx.z() + carcass.interior_base();
        let mut x = ctx.x() + t;

        for (i, width) in widths[..widths.len() - 1].iter().enumerate() {
            x += width;
            let name = format!("Partition {}", i + 1);
            let panel = PanelPlacement::side(name.clone(), Point3::new(x, ctx.y(), z), height, depth, t);
            session.place(ctx.parent(), &panel);
            out.cut_items.push(carcass.panel_cut(name, height, depth));
            x += t;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::testing::carcass;
    use crate::support::Support;
    use cabinetkit_core::RecordingSink;
    use cabinetkit_settings::BuildConfig;

    #[test]
    fn test_three_equal_sections() {
        let widths = resolve_sections(&SectionSpec::equal(3), 746.0, 18.0);
        assert_eq!(widths, vec![237.0, 237.0, 236.0]);
    }

    #[test]
    fn test_percent_tokens() {
        let specs: Vec<SectionSpec> = ["30%", "70%"].iter().map(|s| s.parse().unwrap()).collect();
        let widths = resolve_sections(&specs, 764.0, 18.0);
        assert_eq!(widths, vec![224.0, 522.0]);
    }

    #[test]
    fn test_mixed_specs_share_leftover() {
        let specs = [
            SectionSpec::absolute(300.0),
            SectionSpec::percent(50.0),
            SectionSpec::percent(50.0),
        ];
        let widths = resolve_sections(&specs, 764.0, 18.0);
        // 764 - 36 = 728, 728 - 300 = 428
        assert_eq!(widths, vec![300.0, 214.0, 214.0]);
    }

    #[test]
    fn test_incomplete_percentages_are_independent() {
        let specs = [SectionSpec::percent(25.0), SectionSpec::percent(25.0)];
        let widths = resolve_sections(&specs, 764.0, 18.0);
        assert_eq!(widths, vec![187.0, 187.0]);
    }

    #[test]
    fn test_parse_errors() {
        assert!("abc%".parse::<SectionSpec>().is_err());
        assert!("-5".parse::<SectionSpec>().is_err());
        assert_eq!("400".parse::<SectionSpec>().unwrap(), SectionSpec::Absolute(400.0));
    }

    #[test]
    fn test_serde_tokens() {
        let specs: Vec<SectionSpec> = serde_json::from_str(r#"["40%", 300]"#).unwrap();
        assert_eq!(specs, vec![SectionSpec::Percent(40.0), SectionSpec::Absolute(300.0)]);
        assert_eq!(serde_json::to_string(&specs).unwrap(), r#"["40%",300.0]"#);
    }

    #[test]
    fn test_partitions_between_sections() {
        let c = carcass(Support::legs(100.0));
        let builder = SectionBuilder::new(SectionSpec::equal(3));
        let mut sink = RecordingSink::new();
        let config = BuildConfig::default();
        let mut session = BuildSession::new(&mut sink, &config);
        let out = builder.build(&c, &Context::new(), &mut session).unwrap();
        drop(session);

        assert_eq!(out.cut_items.len(), 2);
        assert_eq!(out.cut_items[0].name, "Partition 1");
        assert_eq!(out.cut_items[0].length(), 396.0);
        assert_eq!(out.cut_items[0].width(), 314.0);

        // 764 - 36 = 728 split as 243/243/242
        let first = sink.panels_labelled("Partition 1")[0];
        assert_eq!(first.placement.origin, Point3::new(18.0 + 243.0, 0.0, 118.0));
        let second = sink.panels_labelled("Partition 2")[0];
        assert_eq!(second.placement.origin.x, 18.0 + 243.0 + 18.0 + 243.0);
    }
}
