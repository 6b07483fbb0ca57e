//! Single drawer column
//!
//! Drawers stack from the top face of the bottom panel with no gap between
//! them; the visual reveal comes only from the facade gap taken off each
//! facade height. Facades span the full outer width less one gap so they
//! cover the sides.

use cabinetkit_core::{Context, LayoutResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BuildOutput, Carcass, SkipPart};
use crate::component::Component;
use crate::parts::{Drawer, DrawerParams, SlideKind};
use crate::session::BuildSession;

/// Per-drawer settings; unset fields fall back to the build config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerOptions {
    pub slide: SlideKind,
    pub soft_close: Option<bool>,
    pub draw_slides: bool,
    pub back_gap: Option<f64>,
    /// Catalog key of the facade sheet.
    pub facade_material: Option<String>,
}

impl DrawerOptions {
    pub(crate) fn apply(&self, params: &mut DrawerParams) {
        params.slide = self.slide;
        params.draw_slides = self.draw_slides;
        if let Some(soft_close) = self.soft_close {
            params.soft_close = soft_close;
        }
        if let Some(back_gap) = self.back_gap {
            params.back_gap = back_gap;
        }
        if let Some(material) = &self.facade_material {
            params.facade_material = material.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawerSpec {
    pub height: f64,
    /// Explicit height above the interior base; stacked when absent.
    #[serde(default)]
    pub z_offset: Option<f64>,
}

impl DrawerSpec {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            z_offset: None,
        }
    }

    pub fn at(height: f64, z_offset: f64) -> Self {
        Self {
            height,
            z_offset: Some(z_offset),
        }
    }
}

/// How the drawers of one column are configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawerStack {
    /// Explicit heights, bottom up.
    Heights(Vec<DrawerSpec>),
    /// Bottom edges above the interior base; the last drawer fills the rest.
    Positions(Vec<f64>),
}

impl Default for DrawerStack {
    fn default() -> Self {
        Self::Heights(Vec::new())
    }
}

impl DrawerStack {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Heights(specs) => specs.is_empty(),
            Self::Positions(positions) => positions.is_empty(),
        }
    }

    /// Heights and offsets for an interior of `interior_height`.
    pub fn resolve(&self, interior_height: f64) -> Vec<DrawerSpec> {
        match self {
            Self::Heights(specs) => specs.clone(),
            Self::Positions(positions) => positions
                .iter()
                .enumerate()
                .map(|(i, &pos)| {
                    let next = positions.get(i + 1).copied().unwrap_or(interior_height);
                    DrawerSpec::at(next - pos, pos)
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawerBuilder {
    stack: DrawerStack,
    options: DrawerOptions,
}

impl DrawerBuilder {
    pub fn new(stack: DrawerStack, options: DrawerOptions) -> Self {
        Self { stack, options }
    }

    /// Base height of drawer `index` above the interior base.
    fn z_offset(specs: &[DrawerSpec], index: usize) -> f64 {
        specs[index]
            .z_offset
            .unwrap_or_else(|| specs[..index].iter().map(|s| s.height).sum())
    }

    pub fn build(
        &self,
        carcass: &Carcass,
        ctx: &Context,
        session: &mut BuildSession<'_>,
    ) -> LayoutResult<BuildOutput> {
        let mut out = BuildOutput::new();
        let specs = self.stack.resolve(carcass.interior_height());
        if specs.is_empty() {
            return Ok(out);
        }

        let config = session.config();
        let gap = config.facade_gap;
        let t = carcass.thickness;
        let start_z = if carcass.has_part(SkipPart::Bottom) {
            carcass.support.bottom_z() + t
        } else {
            carcass.support.bottom_z()
        };

        for (i, spec) in specs.iter().enumerate() {
            let mut params = DrawerParams::new(
                format!("{} drawer {}", carcass.name, i + 1),
                spec.height,
                carcass.inner_width(),
                carcass.inner_depth(),
                config,
            );
            self.options.apply(&mut params);
            params.facade_width = Some(carcass.width - gap);
            params.facade_x_offset = t - gap / 2.0;

            let mut drawer = Drawer::new(params, session.catalog())?;
            let drawer_ctx = ctx.offset(t, 0.0, start_z + Self::z_offset(&specs, i));
            drawer.build(&drawer_ctx, session)?;

            out.cut_items.extend(drawer.all_cut_items());
            out.hardware_items.extend(drawer.all_hardware_items());
            out.drawers.push(drawer);
        }

        debug!("Built {} drawers in '{}'", out.drawers.len(), carcass.name);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::testing::carcass;
    use crate::session::OpenableKind;
    use crate::support::Support;
    use cabinetkit_core::{HardwareKind, RecordingSink};
    use cabinetkit_settings::BuildConfig;

    fn build(builder: &DrawerBuilder, carcass: &Carcass) -> (BuildOutput, RecordingSink, usize) {
        let mut sink = RecordingSink::new();
        let config = BuildConfig::default();
        let mut session = BuildSession::new(&mut sink, &config);
        let out = builder.build(carcass, &Context::new(), &mut session).unwrap();
        let registered = session.registry().count_of(OpenableKind::Drawer);
        drop(session);
        (out, sink, registered)
    }

    #[test]
    fn test_positions_resolve_to_heights() {
        let stack = DrawerStack::Positions(vec![0.0, 150.0, 300.0]);
        let specs = stack.resolve(414.0);
        assert_eq!(specs[0], DrawerSpec::at(150.0, 0.0));
        assert_eq!(specs[1], DrawerSpec::at(150.0, 150.0));
        assert_eq!(specs[2], DrawerSpec::at(114.0, 300.0));
    }

    #[test]
    fn test_drawers_stack_without_gaps() {
        let c = carcass(Support::legs(100.0));
        let builder = DrawerBuilder::new(
            DrawerStack::Heights(vec![DrawerSpec::new(150.0), DrawerSpec::new(164.0)]),
            DrawerOptions::default(),
        );
        let (out, sink, registered) = build(&builder, &c);

        assert_eq!(out.drawers.len(), 2);
        assert_eq!(registered, 2);
        assert_eq!(out.drawers[1].name(), "Cabinet drawer 2");

        let z: Vec<f64> = out
            .drawers
            .iter()
            .map(|d| d.base().context().map(|ctx| ctx.z()).unwrap_or_default())
            .collect();
        assert_eq!(z, vec![118.0, 268.0]);

        // facade covers the sides, leaving half a gap at each edge
        let facade = sink.panels_labelled("Drawer facade")[0];
        assert_eq!(facade.placement.origin.x, 1.5);
        assert_eq!(facade.placement.extent.x, 797.0);
        assert_eq!(out.drawers[0].facade_height(), 147.0);
    }

    #[test]
    fn test_one_slide_entry_per_drawer() {
        let c = carcass(Support::Flush);
        let builder = DrawerBuilder::new(
            DrawerStack::Heights(vec![DrawerSpec::new(140.0); 3]),
            DrawerOptions {
                soft_close: Some(false),
                ..DrawerOptions::default()
            },
        );
        let (out, _, _) = build(&builder, &c);

        let slides: Vec<_> = out
            .hardware_items
            .iter()
            .filter(|h| h.kind == HardwareKind::Slide)
            .collect();
        assert_eq!(slides.len(), 3);
        assert_eq!(slides[0].name, "Ball-bearing slides");
    }

    #[test]
    fn test_skipped_bottom_lowers_start() {
        let mut c = carcass(Support::plinth(80.0));
        c.skip.insert(SkipPart::Bottom);
        let builder = DrawerBuilder::new(
            DrawerStack::Heights(vec![DrawerSpec::new(150.0)]),
            DrawerOptions::default(),
        );
        let (out, _, _) = build(&builder, &c);
        let z = out.drawers[0].base().context().map(|ctx| ctx.z());
        assert_eq!(z, Some(80.0));
    }

    #[test]
    fn test_explicit_offset() {
        let c = carcass(Support::Flush);
        let builder = DrawerBuilder::new(
            DrawerStack::Heights(vec![DrawerSpec::new(150.0), DrawerSpec::at(150.0, 250.0)]),
            DrawerOptions::default(),
        );
        let (out, _, _) = build(&builder, &c);
        let z = out.drawers[1].base().context().map(|ctx| ctx.z());
        assert_eq!(z, Some(268.0));
    }
}
