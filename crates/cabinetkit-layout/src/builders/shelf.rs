//! Horizontal shelves
//!
//! Shelf heights are configured once per assembly. With sections, each
//! height is repeated in every section, sized to that section.

use cabinetkit_core::{Context, HardwareItem, HardwareKind, PanelPlacement};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use super::{BuildOutput, Carcass};
use crate::session::BuildSession;

/// Shelf support pins per shelf.
pub const SUPPORTS_PER_SHELF: u32 = 4;

fn default_adjustable() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShelfSpec {
    /// Height above the top face of the bottom support level.
    pub z: f64,
    #[serde(default = "default_adjustable")]
    pub adjustable: bool,
}

impl ShelfSpec {
    pub fn at(z: f64) -> Self {
        Self {
            z,
            adjustable: true,
        }
    }

    pub fn fixed(z: f64) -> Self {
        Self {
            z,
            adjustable: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShelfBuilder {
    shelves: Vec<ShelfSpec>,
}

impl ShelfBuilder {
    pub fn new(shelves: Vec<ShelfSpec>) -> Self {
        Self { shelves }
    }

    pub fn build(
        &self,
        carcass: &Carcass,
        ctx: &Context,
        section_widths: &[f64],
        session: &mut BuildSession<'_>,
    ) -> BuildOutput {
        let mut out = BuildOutput::new();
        if self.shelves.is_empty() {
            return out;
        }

        let t = carcass.thickness;
        let full_width = [carcass.inner_width()];
        let sections = if section_widths.is_empty() {
            &full_width[..]
        } else {
            section_widths
        };

        let mut x = ctx.x() + t;
        for (section, width) in sections.iter().enumerate() {
            for (n, shelf) in self.shelves.iter().enumerate() {
                let name = format!("Shelf {}-{}", section + 1, n + 1);
                let z = ctx.z() + carcass.support.bottom_z() + shelf.z;
                let panel = PanelPlacement::horizontal(
                    name.clone(),
                    Point3::new(x, ctx.y(), z),
                    *width,
                    carcass.inner_depth(),
                    t,
                );
                session.place(ctx.parent(), &panel);
                out.cut_items
                    .push(carcass.panel_cut(name, width.round(), carcass.inner_depth()));
                out.hardware_items.push(
                    HardwareItem::new(HardwareKind::ShelfSupport, SUPPORTS_PER_SHELF)
                        .owned_by(carcass.name.clone())
                        .with_spec("adjustable", shelf.adjustable),
                );
            }
            x += width + t;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::testing::carcass;
    use crate::support::Support;
    use cabinetkit_core::RecordingSink;
    use cabinetkit_settings::BuildConfig;

    fn build(builder: &ShelfBuilder, sections: &[f64]) -> (BuildOutput, RecordingSink) {
        let c = carcass(Support::plinth(80.0));
        let mut sink = RecordingSink::new();
        let config = BuildConfig::default();
        let mut session = BuildSession::new(&mut sink, &config);
        let out = builder.build(&c, &Context::new(), sections, &mut session);
        drop(session);
        (out, sink)
    }

    #[test]
    fn test_full_width_shelves() {
        let builder = ShelfBuilder::new(vec![ShelfSpec::at(150.0), ShelfSpec::at(300.0)]);
        let (out, sink) = build(&builder, &[]);

        assert_eq!(out.cut_items.len(), 2);
        assert_eq!(out.cut_items[1].name, "Shelf 1-2");
        assert_eq!(out.cut_items[1].length(), 764.0);

        let shelf = sink.panels_labelled("Shelf 1-1")[0];
        assert_eq!(shelf.placement.origin, Point3::new(18.0, 0.0, 230.0));
    }

    #[test]
    fn test_shelves_repeat_per_section() {
        let builder = ShelfBuilder::new(vec![ShelfSpec::at(150.0)]);
        let (out, sink) = build(&builder, &[373.0, 373.0]);

        let names: Vec<_> = out.cut_items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Shelf 1-1", "Shelf 2-1"]);
        assert_eq!(out.cut_items[0].length(), 396.0);
        assert_eq!(out.cut_items[0].width(), 373.0);

        let second = sink.panels_labelled("Shelf 2-1")[0];
        assert_eq!(second.placement.origin.x, 18.0 + 373.0 + 18.0);
    }

    #[test]
    fn test_four_supports_per_shelf() {
        let builder = ShelfBuilder::new(vec![ShelfSpec::at(100.0), ShelfSpec::fixed(200.0)]);
        let (out, _) = build(&builder, &[200.0, 200.0, 200.0]);

        assert_eq!(out.hardware_items.len(), 6);
        assert!(out.hardware_items.iter().all(|h| h.quantity == 4));
        assert_eq!(out.hardware_items[1].spec("adjustable"), Some("false"));
    }
}
