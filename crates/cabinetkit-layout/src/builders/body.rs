//! Outer shell: sides, bottom, top, back and stretcher rails

use cabinetkit_core::{Context, CutItem, PanelPlacement};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BuildOutput, Carcass, SkipPart};
use crate::session::BuildSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StretcherMode {
    /// Rails lie flat in the top plane.
    #[default]
    Standard,
    /// Rails stand on edge, leaving room for a sink bowl.
    Sink,
}

/// Two rails in place of a solid top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stretchers {
    pub mode: StretcherMode,
    pub width: f64,
}

#[derive(Debug, Clone, Default)]
pub struct BodyBuilder {
    stretchers: Option<Stretchers>,
}

impl BodyBuilder {
    pub fn new(stretchers: Option<Stretchers>) -> Self {
        Self { stretchers }
    }

    pub fn build(
        &self,
        carcass: &Carcass,
        ctx: &Context,
        session: &mut BuildSession<'_>,
    ) -> BuildOutput {
        let mut out = BuildOutput::new();
        let parent = ctx.parent();
        let (ox, oy, oz) = (ctx.x(), ctx.y(), ctx.z());
        let t = carcass.thickness;
        let side_z = oz + carcass.support.side_start_z();
        let side_h = carcass.side_height();
        let inner_w = carcass.inner_width();
        let inner_d = carcass.inner_depth();

        let mut parts: Vec<(PanelPlacement, CutItem)> = Vec::new();

        if carcass.has_part(SkipPart::LeftSide) {
            parts.push((
                PanelPlacement::side("Left side", Point3::new(ox, oy, side_z), side_h, inner_d, t),
                carcass.panel_cut("Left side", side_h, inner_d),
            ));
        }

        if carcass.has_part(SkipPart::RightSide) {
            parts.push((
                PanelPlacement::side(
                    "Right side",
                    Point3::new(ox + carcass.width - t, oy, side_z),
                    side_h,
                    inner_d,
                    t,
                ),
                carcass.panel_cut("Right side", side_h, inner_d),
            ));
        }

        if carcass.has_part(SkipPart::Bottom) {
            parts.push((
                PanelPlacement::horizontal(
                    "Bottom",
                    Point3::new(ox + t, oy, oz + carcass.support.bottom_z()),
                    inner_w,
                    inner_d,
                    t,
                ),
                carcass.panel_cut("Bottom", inner_w, inner_d),
            ));
        }

        if carcass.has_part(SkipPart::Top) {
            parts.push((
                PanelPlacement::horizontal(
                    "Top",
                    Point3::new(ox + t, oy, side_z + side_h - t),
                    inner_w,
                    inner_d,
                    t,
                ),
                carcass.panel_cut("Top", inner_w, inner_d),
            ));
        }

        if let Some(stretchers) = self.stretchers {
            let sw = stretchers.width;
            let top_z = side_z + side_h;
            let x = ox + t;
            let (front, back) = match stretchers.mode {
                StretcherMode::Standard => (
                    PanelPlacement::horizontal("Front rail", Point3::new(x, oy, top_z - t), inner_w, sw, t),
                    PanelPlacement::horizontal(
                        "Back rail",
                        Point3::new(x, oy + inner_d - sw, top_z - t),
                        inner_w,
                        sw,
                        t,
                    ),
                ),
                StretcherMode::Sink => (
                    PanelPlacement::horizontal("Front rail", Point3::new(x, oy, top_z - sw), inner_w, t, sw),
                    PanelPlacement::horizontal(
                        "Back rail",
                        Point3::new(x, oy + inner_d - t, top_z - sw),
                        inner_w,
                        t,
                        sw,
                    ),
                ),
            };
            parts.push((front, carcass.panel_cut("Front rail", inner_w, sw)));
            parts.push((back, carcass.panel_cut("Back rail", inner_w, sw)));
        }

        if carcass.has_part(SkipPart::Back) {
            let bt = carcass.back_thickness;
            parts.push((
                PanelPlacement::back("Back", Point3::new(ox, oy + inner_d, side_z), carcass.width, side_h, bt),
                CutItem::new("Back", side_h, carcass.width, bt, carcass.back_material.clone())
                    .owned_by(carcass.name.clone()),
            ));
        }

        for (panel, cut) in parts {
            session.place(parent, &panel);
            out.cut_items.push(cut);
        }

        debug!(
            "Body of '{}': {} panels, side height {}",
            carcass.name,
            out.cut_items.len(),
            side_h
        );
        out
    }
}
