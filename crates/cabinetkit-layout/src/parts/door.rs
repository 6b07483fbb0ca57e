//! Swing doors
//!
//! A slab door is a single facade panel. A frame door is a solid-wood frame
//! of two stiles and two rails holding a plywood panel in a groove; every
//! frame member is drawn as a body plus the two lips either side of the
//! groove.
//!
//! Doors pivot about the vertical axis through their hinge edge.

use cabinetkit_core::{
    ensure_positive, materials::PLYWOOD, materials::SOLID_WOOD, Context, CutItem, EdgeBanding,
    GroupHandle, LayoutResult, MaterialCatalog, PanelPlacement,
};
use cabinetkit_settings::BuildConfig;
use nalgebra::{Isometry3, Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::component::{Component, ComponentBase, Openable};
use crate::session::{BuildSession, OpenableKind};

/// Opening angle used when `open` is called without one.
pub const DEFAULT_OPEN_ANGLE: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HingeSide {
    #[default]
    Left,
    Right,
}

impl fmt::Display for HingeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Frame door proportions, in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameOptions {
    /// Width of each stile and rail.
    pub frame_width: f64,
    /// Defaults to the configured frame thickness.
    pub frame_thickness: Option<f64>,
    pub tenon: f64,
    /// Clearance between the panel edge and the groove bottom.
    pub panel_gap: f64,
    pub panel_thickness: f64,
    /// Defaults to the tenon length.
    pub groove_depth: Option<f64>,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            frame_width: 50.0,
            frame_thickness: None,
            tenon: 10.0,
            panel_gap: 2.0,
            panel_thickness: 6.0,
            groove_depth: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DoorStyle {
    #[default]
    Slab,
    Frame(FrameOptions),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoorParams {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub hinge: HingeSide,
    pub style: DoorStyle,
    /// Catalog key of a slab facade.
    pub facade_material: String,
    pub frame_thickness: f64,
    pub facade_edge: f64,
}

impl DoorParams {
    pub fn new(
        name: impl Into<String>,
        width: f64,
        height: f64,
        hinge: HingeSide,
        config: &BuildConfig,
    ) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            hinge,
            style: DoorStyle::Slab,
            facade_material: config.materials.facade.clone(),
            frame_thickness: config.frame_thickness,
            facade_edge: config.edge_banding.visible,
        }
    }
}

/// Resolved frame dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frame {
    width: f64,
    thickness: f64,
    tenon: f64,
    panel_gap: f64,
    panel_thickness: f64,
    groove_depth: f64,
}

impl Frame {
    /// How far the panel reaches into each groove.
    fn panel_insertion(&self) -> f64 {
        self.groove_depth - self.panel_gap
    }

    fn groove_offset(&self) -> f64 {
        (self.thickness - self.panel_thickness) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Construction {
    Slab { thickness: f64, material: String },
    Frame(Frame),
}

#[derive(Debug, Clone)]
pub struct Door {
    base: ComponentBase,
    hinge: HingeSide,
    construction: Construction,
    facade_edge: f64,
    pivot: Option<Point3<f64>>,
    open_angle: f64,
}

impl Door {
    /// Size a door. Frame doors fail when the frame leaves no opening.
    pub fn new(params: DoorParams, catalog: &MaterialCatalog) -> LayoutResult<Self> {
        ensure_positive(&params.name, "facade width", params.width)?;
        ensure_positive(&params.name, "facade height", params.height)?;

        let construction = match params.style {
            DoorStyle::Slab => {
                let material = catalog.lookup(&params.facade_material);
                Construction::Slab {
                    thickness: material.thickness,
                    material: material.name.clone(),
                }
            }
            DoorStyle::Frame(options) => {
                let frame = Frame {
                    width: options.frame_width,
                    thickness: options.frame_thickness.unwrap_or(params.frame_thickness),
                    tenon: options.tenon,
                    panel_gap: options.panel_gap,
                    panel_thickness: options.panel_thickness,
                    groove_depth: options.groove_depth.unwrap_or(options.tenon),
                };
                ensure_positive(&params.name, "frame thickness", frame.thickness)?;
                ensure_positive(
                    &params.name,
                    "frame opening width",
                    params.width - 2.0 * frame.width,
                )?;
                ensure_positive(
                    &params.name,
                    "frame opening height",
                    params.height - 2.0 * frame.width,
                )?;
                Construction::Frame(frame)
            }
        };

        let thickness = match &construction {
            Construction::Slab { thickness, .. } => *thickness,
            Construction::Frame(frame) => frame.thickness,
        };

        Ok(Self {
            base: ComponentBase::new(params.name, params.width, params.height, thickness),
            hinge: params.hinge,
            construction,
            facade_edge: params.facade_edge,
            pivot: None,
            open_angle: 0.0,
        })
    }

    pub fn hinge(&self) -> HingeSide {
        self.hinge
    }

    pub fn is_frame(&self) -> bool {
        matches!(self.construction, Construction::Frame(_))
    }

    pub fn facade_width(&self) -> f64 {
        self.base.width
    }

    pub fn facade_height(&self) -> f64 {
        self.base.height
    }

    pub fn facade_thickness(&self) -> f64 {
        self.base.depth
    }

    /// Hinge-edge point the door rotates about, known once built.
    pub fn pivot(&self) -> Option<Point3<f64>> {
        self.pivot
    }

    pub fn open_angle(&self) -> f64 {
        self.open_angle
    }

    /// Frame opening width, `None` for slab doors.
    pub fn inner_opening_width(&self) -> Option<f64> {
        self.frame().map(|f| self.base.width - 2.0 * f.width)
    }

    pub fn inner_opening_height(&self) -> Option<f64> {
        self.frame().map(|f| self.base.height - 2.0 * f.width)
    }

    pub fn panel_width(&self) -> Option<f64> {
        let frame = self.frame()?;
        self.inner_opening_width()
            .map(|w| w + 2.0 * frame.panel_insertion())
    }

    pub fn panel_height(&self) -> Option<f64> {
        let frame = self.frame()?;
        self.inner_opening_height()
            .map(|h| h + 2.0 * frame.panel_insertion())
    }

    /// Rail length including both tenons.
    pub fn rail_length(&self) -> Option<f64> {
        let frame = self.frame()?;
        self.inner_opening_width().map(|w| w + 2.0 * frame.tenon)
    }

    fn frame(&self) -> Option<&Frame> {
        match &self.construction {
            Construction::Frame(frame) => Some(frame),
            Construction::Slab { .. } => None,
        }
    }

    fn build_slab(
        &mut self,
        origin: Point3<f64>,
        thickness: f64,
        material: String,
        parent: Option<GroupHandle>,
        session: &mut BuildSession<'_>,
    ) {
        let (w, h) = (self.base.width, self.base.height);
        let panel = PanelPlacement::back("Facade", origin, w, h, thickness);
        session.place(parent, &panel);
        self.base.add_cut(
            CutItem::new("Facade", w, h, thickness, material)
                .with_edges(EdgeBanding::all(self.facade_edge)),
        );
    }

    fn build_frame(
        &mut self,
        origin: Point3<f64>,
        frame: Frame,
        parent: Option<GroupHandle>,
        session: &mut BuildSession<'_>,
    ) {
        let (ox, oy, oz) = (origin.x, origin.y, origin.z);
        let (dw, dh) = (self.base.width, self.base.height);
        let fw = frame.width;
        let ft = frame.thickness;
        let gd = frame.groove_depth;
        let gw = frame.panel_thickness;
        let go = frame.groove_offset();
        let pi = frame.panel_insertion();
        let body = fw - gd;
        let inner_w = dw - 2.0 * fw;
        let back_lip_y = oy + go + gw;

        let sx = ox + dw - fw;
        let top_z = oz + dh - fw;
        let members = [
            // left stile, groove on its right face
            PanelPlacement::side("Frame stile", Point3::new(ox, oy, oz), dh, ft, body),
            PanelPlacement::side("Frame stile lip", Point3::new(ox + body, oy, oz), dh, go, gd),
            PanelPlacement::side("Frame stile lip", Point3::new(ox + body, back_lip_y, oz), dh, go, gd),
            // right stile, groove on its left face
            PanelPlacement::side("Frame stile", Point3::new(sx + gd, oy, oz), dh, ft, body),
            PanelPlacement::side("Frame stile lip", Point3::new(sx, oy, oz), dh, go, gd),
            PanelPlacement::side("Frame stile lip", Point3::new(sx, back_lip_y, oz), dh, go, gd),
            // bottom rail, groove on top
            PanelPlacement::horizontal("Frame rail", Point3::new(ox + fw, oy, oz), inner_w, ft, body),
            PanelPlacement::horizontal(
                "Frame rail lip",
                Point3::new(ox + fw, oy, oz + body),
                inner_w,
                go,
                gd,
            ),
            PanelPlacement::horizontal(
                "Frame rail lip",
                Point3::new(ox + fw, back_lip_y, oz + body),
                inner_w,
                go,
                gd,
            ),
            // top rail, groove underneath
            PanelPlacement::horizontal(
                "Frame rail",
                Point3::new(ox + fw, oy, top_z + gd),
                inner_w,
                ft,
                body,
            ),
            PanelPlacement::horizontal("Frame rail lip", Point3::new(ox + fw, oy, top_z), inner_w, go, gd),
            PanelPlacement::horizontal(
                "Frame rail lip",
                Point3::new(ox + fw, back_lip_y, top_z),
                inner_w,
                go,
                gd,
            ),
        ];
        for member in &members {
            session.place(parent, member);
        }

        let pw = inner_w + 2.0 * pi;
        let ph = (dh - 2.0 * fw) + 2.0 * pi;
        let panel = PanelPlacement::back(
            "Frame panel",
            Point3::new(ox + fw - pi, oy + go, oz + fw - pi),
            pw,
            ph,
            gw,
        );
        session.place(parent, &panel);

        let rail_length = inner_w + 2.0 * frame.tenon;
        for _ in 0..2 {
            self.base
                .add_cut(CutItem::new("Frame stile", dh, fw, ft, SOLID_WOOD));
        }
        for _ in 0..2 {
            self.base
                .add_cut(CutItem::new("Frame rail", rail_length, fw, ft, SOLID_WOOD));
        }
        self.base
            .add_cut(CutItem::new("Frame panel", pw, ph, gw, PLYWOOD));
    }
}

impl Component for Door {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn build_geometry(&mut self, ctx: &Context, session: &mut BuildSession<'_>) -> LayoutResult<()> {
        // The facade sits in front of the context origin.
        let origin = Point3::new(ctx.x(), ctx.y() - self.base.depth, ctx.z());
        match self.construction.clone() {
            Construction::Slab {
                thickness,
                material,
            } => self.build_slab(origin, thickness, material, ctx.parent(), session),
            Construction::Frame(frame) => self.build_frame(origin, frame, ctx.parent(), session),
        }

        let pivot_x = match self.hinge {
            HingeSide::Left => ctx.x(),
            HingeSide::Right => ctx.x() + self.base.width,
        };
        self.pivot = Some(Point3::new(pivot_x, ctx.y(), ctx.z()));

        if let Some(group) = self.base.group() {
            session
                .registry_mut()
                .register(group, &self.base.name, OpenableKind::Door);
        }
        Ok(())
    }
}

impl Openable for Door {
    fn kind(&self) -> OpenableKind {
        OpenableKind::Door
    }

    /// Swing open by `angle` degrees, 90 by default.
    fn open(&mut self, angle: Option<f64>) {
        let target = angle.unwrap_or(DEFAULT_OPEN_ANGLE);
        if target != self.open_angle {
            debug!("Door '{}' swung to {}°", self.base.name, target);
            self.open_angle = target;
        }
    }

    fn close(&mut self) {
        self.open_angle = 0.0;
    }

    fn is_open(&self) -> bool {
        self.open_angle != 0.0
    }

    /// Rotation about the hinge axis; both hinge sides swing towards -Y.
    fn transform(&self) -> Isometry3<f64> {
        let radians = self.open_angle.to_radians();
        let signed = match self.hinge {
            HingeSide::Left => -radians,
            HingeSide::Right => radians,
        };
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), signed);
        let pivot = self.pivot.unwrap_or_else(Point3::origin);
        Isometry3::rotation_wrt_point(rotation, pivot)
    }

    fn group(&self) -> Option<GroupHandle> {
        self.base.group()
    }
}
