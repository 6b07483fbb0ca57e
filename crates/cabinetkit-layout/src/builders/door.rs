//! Front swing doors
//!
//! Doors share the outer width less one facade gap per door and are as tall
//! as the sides less one gap. A single door hinges left, a pair hinges
//! left/right and larger sets alternate.

use cabinetkit_core::{Context, LayoutResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BuildOutput, Carcass};
use crate::component::Component;
use crate::distribute::even_split;
use crate::parts::{Door, DoorParams, DoorStyle, HingeSide};
use crate::session::BuildSession;

fn default_count() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorsSpec {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default)]
    pub style: DoorStyle,
    /// Catalog key of slab facades; the configured facade sheet when unset.
    #[serde(default)]
    pub material: Option<String>,
}

impl DoorsSpec {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            style: DoorStyle::Slab,
            material: None,
        }
    }

    pub fn with_style(mut self, style: DoorStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_material(mut self, key: impl Into<String>) -> Self {
        self.material = Some(key.into());
        self
    }
}

impl Default for DoorsSpec {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Hinge side of door `index` in a set of `count`.
pub fn hinge_for(index: usize, count: usize) -> HingeSide {
    match count {
        1 => HingeSide::Left,
        2 if index == 0 => HingeSide::Left,
        2 => HingeSide::Right,
        _ if index % 2 == 0 => HingeSide::Left,
        _ => HingeSide::Right,
    }
}

#[derive(Debug, Clone)]
pub struct DoorBuilder {
    spec: DoorsSpec,
}

impl DoorBuilder {
    pub fn new(spec: DoorsSpec) -> Self {
        Self { spec }
    }

    pub fn build(
        &self,
        carcass: &Carcass,
        ctx: &Context,
        session: &mut BuildSession<'_>,
    ) -> LayoutResult<BuildOutput> {
        let mut out = BuildOutput::new();
        let count = self.spec.count;
        if count == 0 {
            return Ok(out);
        }

        let config = session.config();
        let gap = config.facade_gap;
        let facade_height = carcass.side_height() - gap;
        let widths = even_split(carcass.width - count as f64 * gap, count);
        let z = carcass.support.side_start_z() + gap / 2.0;
        let mut x = gap / 2.0;

        for (i, width) in widths.iter().enumerate() {
            let mut params = DoorParams::new(
                format!("{} door {}", carcass.name, i + 1),
                *width,
                facade_height,
                hinge_for(i, count),
                config,
            );
            params.style = self.spec.style;
            if let Some(material) = &self.spec.material {
                params.facade_material = material.clone();
            }

            let mut door = Door::new(params, session.catalog())?;
            door.build(&ctx.offset(x, 0.0, z), session)?;
            out.cut_items.extend(door.all_cut_items());
            out.hardware_items.extend(door.all_hardware_items());
            out.doors.push(door);

            x += width + gap;
        }

        debug!("Built {} doors in '{}'", count, carcass.name);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::testing::carcass;
    use crate::parts::FrameOptions;
    use crate::support::Support;
    use cabinetkit_core::RecordingSink;
    use cabinetkit_settings::BuildConfig;

    fn build(spec: DoorsSpec, carcass: &Carcass) -> BuildOutput {
        let mut sink = RecordingSink::new();
        let config = BuildConfig::default();
        let mut session = BuildSession::new(&mut sink, &config);
        DoorBuilder::new(spec)
            .build(carcass, &Context::new(), &mut session)
            .unwrap()
    }

    #[test]
    fn test_hinge_assignment() {
        assert_eq!(hinge_for(0, 1), HingeSide::Left);
        assert_eq!(hinge_for(0, 2), HingeSide::Left);
        assert_eq!(hinge_for(1, 2), HingeSide::Right);
        let three: Vec<_> = (0..3).map(|i| hinge_for(i, 3)).collect();
        assert_eq!(three, vec![HingeSide::Left, HingeSide::Right, HingeSide::Left]);
    }

    #[test]
    fn test_single_door_size() {
        let mut c = carcass(Support::Flush);
        c.width = 600.0;
        c.height = 700.0;
        let out = build(DoorsSpec::new(1), &c);

        assert_eq!(out.doors.len(), 1);
        assert_eq!(out.doors[0].facade_width(), 597.0);
        assert_eq!(out.doors[0].facade_height(), 697.0);
    }

    #[test]
    fn test_pair_splits_width() {
        let c = carcass(Support::Flush);
        let out = build(DoorsSpec::new(2), &c);

        let widths: Vec<f64> = out.doors.iter().map(|d| d.facade_width()).collect();
        assert_eq!(widths, vec![397.0, 397.0]);
        assert_eq!(out.doors[1].hinge(), HingeSide::Right);
        let x = out.doors[1].base().context().map(|ctx| ctx.x());
        assert_eq!(x, Some(1.5 + 397.0 + 3.0));
    }

    #[test]
    fn test_doors_on_legs_start_above_legs() {
        let mut c = carcass(Support::legs(100.0));
        c.width = 600.0;
        c.height = 700.0;
        let out = build(DoorsSpec::new(1), &c);

        assert_eq!(out.doors[0].facade_width(), 597.0);
        assert_eq!(out.doors[0].facade_height(), 597.0);
        let z = out.doors[0].base().context().map(|ctx| ctx.z());
        assert_eq!(z, Some(101.5));
    }

    #[test]
    fn test_frame_style() {
        let c = carcass(Support::Flush);
        let out = build(DoorsSpec::new(2).with_style(DoorStyle::Frame(FrameOptions::default())), &c);
        assert!(out.doors.iter().all(|d| d.is_frame()));
        assert_eq!(out.cut_items.len(), 10);
    }

    #[test]
    fn test_custom_material() {
        let c = carcass(Support::Flush);
        let out = build(DoorsSpec::new(1).with_material("mdf_19"), &c);
        assert_eq!(out.cut_items[0].material, "MDF");
        assert_eq!(out.cut_items[0].thickness, 19.0);
    }
}
