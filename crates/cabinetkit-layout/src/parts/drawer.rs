//! Drawer: box, slides and facade
//!
//! Given a nominal height `H` and an opening of width `W` and depth `D`:
//!
//! - the slide is the longest standard length that fits `D - 50`;
//! - the box is `W - 2·slide thickness` wide, `slide length - back gap` deep
//!   and `H - slide height - facade gap` high;
//! - the facade is `W` by `H - facade gap` unless a row layout supplies its
//!   size, and is shifted by the facade offsets to cover the carcass.

use cabinetkit_core::{
    ensure_positive, Context, CutItem, EdgeBanding, GroupHandle, LayoutResult, MaterialCatalog,
    PanelPlacement,
};
use cabinetkit_settings::BuildConfig;
use nalgebra::{Isometry3, Point3, Vector3};
use tracing::debug;

use crate::component::{Component, ComponentBase, Openable};
use crate::parts::drawer_box::DrawerBox;
use crate::parts::slide::{Slide, SlideKind};
use crate::session::{BuildSession, OpenableKind};

/// Visual width of a drawn slide body.
const SLIDE_BODY_WIDTH: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DrawerParams {
    pub name: String,
    pub height: f64,
    /// Width of the opening the drawer runs in.
    pub cabinet_width: f64,
    /// Depth available for the slides.
    pub cabinet_depth: f64,
    pub slide: SlideKind,
    pub soft_close: bool,
    /// Emit simplified slide bodies as geometry.
    pub draw_slides: bool,
    pub facade_gap: f64,
    pub back_gap: f64,
    pub facade_material: String,
    pub box_material: String,
    pub bottom_material: String,
    pub facade_width: Option<f64>,
    pub facade_height: Option<f64>,
    /// How far the facade reaches left of the box opening.
    pub facade_x_offset: f64,
    /// How far the facade reaches below the box opening.
    pub facade_z_offset: f64,
    pub facade_edge: f64,
}

impl DrawerParams {
    /// Parameters with every default taken from `config`.
    pub fn new(
        name: impl Into<String>,
        height: f64,
        cabinet_width: f64,
        cabinet_depth: f64,
        config: &BuildConfig,
    ) -> Self {
        Self {
            name: name.into(),
            height,
            cabinet_width,
            cabinet_depth,
            slide: SlideKind::default(),
            soft_close: config.soft_close,
            draw_slides: false,
            facade_gap: config.facade_gap,
            back_gap: config.drawer_back_gap,
            facade_material: config.materials.facade.clone(),
            box_material: config.materials.drawer_box.clone(),
            bottom_material: config.materials.drawer_bottom.clone(),
            facade_width: None,
            facade_height: None,
            facade_x_offset: 0.0,
            facade_z_offset: 0.0,
            facade_edge: config.edge_banding.visible,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Drawer {
    base: ComponentBase,
    slide: Slide,
    drawer_box: DrawerBox,
    draw_slides: bool,
    facade_width: f64,
    facade_height: f64,
    facade_thickness: f64,
    facade_material: String,
    facade_x_offset: f64,
    facade_z_offset: f64,
    facade_edge: f64,
    open_position: f64,
}

impl Drawer {
    /// Size a drawer. Fails on any non-positive box or facade dimension.
    pub fn new(params: DrawerParams, catalog: &MaterialCatalog) -> LayoutResult<Self> {
        let slide = Slide::for_depth(params.slide, params.cabinet_depth, params.soft_close);
        let facade = catalog.lookup(&params.facade_material);

        let box_width = params.cabinet_width - slide.width_reduction();
        let box_depth = slide.length - params.back_gap;
        let box_height = params.height - slide.height - params.facade_gap;

        let facade_width = params.facade_width.unwrap_or(params.cabinet_width);
        let facade_height = params
            .facade_height
            .unwrap_or(params.height - params.facade_gap);
        ensure_positive(&params.name, "facade width", facade_width)?;
        ensure_positive(&params.name, "facade height", facade_height)?;
        ensure_positive(&params.name, "box width", box_width)?;
        ensure_positive(&params.name, "box depth", box_depth)?;
        ensure_positive(&params.name, "box height", box_height)?;

        let drawer_box = DrawerBox::new(
            format!("{} box", params.name),
            box_width,
            box_height,
            box_depth,
            catalog.lookup(&params.box_material),
            catalog.lookup(&params.bottom_material),
        )?;

        Ok(Self {
            base: ComponentBase::new(
                params.name,
                params.cabinet_width,
                params.height,
                params.cabinet_depth,
            ),
            slide,
            drawer_box,
            draw_slides: params.draw_slides,
            facade_width,
            facade_height,
            facade_thickness: facade.thickness,
            facade_material: facade.name.clone(),
            facade_x_offset: params.facade_x_offset,
            facade_z_offset: params.facade_z_offset,
            facade_edge: params.facade_edge,
            open_position: 0.0,
        })
    }

    pub fn slide(&self) -> &Slide {
        &self.slide
    }

    pub fn drawer_box(&self) -> &DrawerBox {
        &self.drawer_box
    }

    pub fn box_height(&self) -> f64 {
        self.drawer_box.base().height
    }

    pub fn facade_width(&self) -> f64 {
        self.facade_width
    }

    pub fn facade_height(&self) -> f64 {
        self.facade_height
    }

    pub fn facade_thickness(&self) -> f64 {
        self.facade_thickness
    }

    pub fn facade_offsets(&self) -> (f64, f64) {
        (self.facade_x_offset, self.facade_z_offset)
    }

    /// How far the drawer is pulled out.
    pub fn open_position(&self) -> f64 {
        self.open_position
    }

    fn build_facade(&mut self, ctx: &Context, session: &mut BuildSession<'_>) {
        let origin = Point3::new(
            ctx.x() - self.facade_x_offset,
            ctx.y() - self.facade_thickness,
            ctx.z() - self.facade_z_offset,
        );
        let panel = PanelPlacement::back(
            "Drawer facade",
            origin,
            self.facade_width,
            self.facade_height,
            self.facade_thickness,
        );
        session.place(ctx.parent(), &panel);

        self.base.add_cut(
            CutItem::new(
                "Drawer facade",
                self.facade_width,
                self.facade_height,
                self.facade_thickness,
                self.facade_material.clone(),
            )
            .with_edges(EdgeBanding::all(self.facade_edge)),
        );
    }

    fn build_slides(&self, ctx: &Context, session: &mut BuildSession<'_>) {
        for x in [ctx.x(), ctx.x() + self.base.width - self.slide.thickness] {
            let body = PanelPlacement::side(
                "Slide",
                Point3::new(x, ctx.y(), ctx.z()),
                self.slide.height,
                self.slide.length,
                SLIDE_BODY_WIDTH,
            );
            session.place(ctx.parent(), &body);
        }
    }
}

impl Component for Drawer {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn build_geometry(&mut self, ctx: &Context, session: &mut BuildSession<'_>) -> LayoutResult<()> {
        // Facade first so it sits directly in the drawer group ahead of the box.
        self.build_facade(ctx, session);

        if self.draw_slides {
            self.build_slides(ctx, session);
        }

        let hardware = self.slide.hardware_item(&self.base.name);
        self.base.add_hardware(hardware);

        if let Some(group) = self.base.group() {
            session
                .registry_mut()
                .register(group, &self.base.name, OpenableKind::Drawer);
        }
        Ok(())
    }

    fn children(&self) -> Vec<&dyn Component> {
        vec![&self.drawer_box]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Component> {
        vec![&mut self.drawer_box]
    }

    fn build_children(&mut self, ctx: &Context, session: &mut BuildSession<'_>) -> LayoutResult<()> {
        let box_ctx = ctx.offset(self.slide.thickness, 0.0, self.slide.height);
        self.drawer_box.build(&box_ctx, session)?;
        Ok(())
    }
}

impl Openable for Drawer {
    fn kind(&self) -> OpenableKind {
        OpenableKind::Drawer
    }

    /// Pull out by `amount` mm, the full slide length by default.
    fn open(&mut self, amount: Option<f64>) {
        let target = amount.unwrap_or(self.slide.length).max(0.0);
        if target != self.open_position {
            debug!("Drawer '{}' moved to {}mm", self.base.name, target);
            self.open_position = target;
        }
    }

    fn close(&mut self) {
        self.open_position = 0.0;
    }

    fn is_open(&self) -> bool {
        self.open_position > 0.0
    }

    fn transform(&self) -> Isometry3<f64> {
        Isometry3::translation(0.0, -self.open_position, 0.0)
    }

    fn group(&self) -> Option<GroupHandle> {
        self.base.group()
    }
}

impl Drawer {
    /// Translation applied to the drawer group when open.
    pub fn open_offset(&self) -> Vector3<f64> {
        self.transform().translation.vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabinetkit_core::{HardwareKind, RecordingSink};

    fn drawer(height: f64, width: f64, depth: f64) -> LayoutResult<Drawer> {
        let config = BuildConfig::default();
        let mut params = DrawerParams::new("Base drawer 1", height, width, depth, &config);
        params.soft_close = false;
        Drawer::new(params, &config.material_catalog())
    }

    #[test]
    fn test_sizing() {
        let d = drawer(150.0, 764.0, 400.0).unwrap();
        assert_eq!(d.slide().length, 350.0);
        assert_eq!(d.box_height(), 112.0);
        assert_eq!(d.drawer_box().base().width, 738.0);
        assert_eq!(d.drawer_box().base().depth, 330.0);
        assert_eq!(d.facade_width(), 764.0);
        assert_eq!(d.facade_height(), 147.0);
        assert_eq!(d.facade_thickness(), 16.0);
    }

    #[test]
    fn test_explicit_facade() {
        let config = BuildConfig::default();
        let mut params = DrawerParams::new("Row drawer", 140.0, 364.0, 396.0, &config);
        params.facade_width = Some(394.0);
        params.facade_height = Some(137.0);
        params.facade_x_offset = 16.5;
        let d = Drawer::new(params, &config.material_catalog()).unwrap();

        assert_eq!(d.box_height(), 102.0);
        assert_eq!(d.facade_width(), 394.0);
        assert_eq!(d.facade_height(), 137.0);
        assert_eq!(d.facade_offsets(), (16.5, 0.0));
    }

    #[test]
    fn test_degenerate_drawer_fails_fast() {
        assert!(drawer(30.0, 764.0, 400.0).is_err());
        assert!(drawer(150.0, 20.0, 400.0).is_err());
    }

    #[test]
    fn test_build_records_and_registry() {
        let mut d = drawer(150.0, 764.0, 400.0).unwrap();
        let mut sink = RecordingSink::new();
        let config = BuildConfig::default();
        let registry = {
            let mut session = BuildSession::new(&mut sink, &config);
            d.build(&Context::at(18.0, 0.0, 118.0), &mut session).unwrap();
            session.into_registry()
        };

        let group = d.base().group().unwrap();
        assert_eq!(registry.get(group).map(|e| e.kind), Some(OpenableKind::Drawer));

        let facade = sink.panels_labelled("Drawer facade")[0];
        assert_eq!(facade.placement.origin, Point3::new(18.0, -16.0, 118.0));

        let front = sink.panels_labelled("Drawer box front")[0];
        assert_eq!(front.placement.origin, Point3::new(18.0 + 13.0 + 10.0, 0.0, 118.0 + 35.0));

        let items = d.all_cut_items();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0].name, "Drawer facade");
        assert_eq!(items[0].owner.as_deref(), Some("Base drawer 1"));
        assert_eq!(items[1].owner.as_deref(), Some("Base drawer 1 box"));

        let hw = d.all_hardware_items();
        assert_eq!(hw.len(), 1);
        assert_eq!(hw[0].kind, HardwareKind::Slide);
    }

    #[test]
    fn test_open_close() {
        let mut d = drawer(150.0, 764.0, 400.0).unwrap();
        assert!(!d.is_open());

        d.open(None);
        assert!(d.is_open());
        assert_eq!(d.open_position(), 350.0);
        assert_eq!(d.open_offset(), Vector3::new(0.0, -350.0, 0.0));

        d.open(Some(120.0));
        assert_eq!(d.open_position(), 120.0);

        d.toggle();
        assert!(!d.is_open());
        assert_eq!(d.transform(), Isometry3::identity());
    }

    #[test]
    fn test_drawn_slides() {
        let config = BuildConfig::default();
        let mut params = DrawerParams::new("Drawer", 150.0, 764.0, 400.0, &config);
        params.draw_slides = true;
        let mut d = Drawer::new(params, &config.material_catalog()).unwrap();

        let mut sink = RecordingSink::new();
        let mut session = BuildSession::new(&mut sink, &config);
        d.build(&Context::new(), &mut session).unwrap();
        drop(session);

        let slides = sink.panels_labelled("Slide");
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1].placement.origin.x, 764.0 - 13.0);
    }
}
