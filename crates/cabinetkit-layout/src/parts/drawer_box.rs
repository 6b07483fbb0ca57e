//! Drawer box: the carcass of a drawer without facade or slides.

use cabinetkit_core::{ensure_positive, Context, CutItem, LayoutResult, Material, PanelPlacement};
use nalgebra::Point3;

use crate::component::{Component, ComponentBase};
use crate::session::BuildSession;

#[derive(Debug, Clone)]
pub struct DrawerBox {
    base: ComponentBase,
    wall: Material,
    bottom: Material,
}

impl DrawerBox {
    /// Box with outer `width`, `height` and `depth`.
    ///
    /// Fails when the walls leave no room inside.
    pub fn new(
        name: impl Into<String>,
        width: f64,
        height: f64,
        depth: f64,
        wall: &Material,
        bottom: &Material,
    ) -> LayoutResult<Self> {
        let name = name.into();
        ensure_positive(&name, "box height", height)?;
        ensure_positive(&name, "box inner width", width - 2.0 * wall.thickness)?;
        ensure_positive(&name, "box inner depth", depth - 2.0 * wall.thickness)?;

        Ok(Self {
            base: ComponentBase::new(name, width, height, depth),
            wall: wall.clone(),
            bottom: bottom.clone(),
        })
    }

    pub fn wall_thickness(&self) -> f64 {
        self.wall.thickness
    }

    pub fn bottom_thickness(&self) -> f64 {
        self.bottom.thickness
    }

    pub fn inner_width(&self) -> f64 {
        self.base.width - 2.0 * self.wall.thickness
    }

    pub fn inner_depth(&self) -> f64 {
        self.base.depth - 2.0 * self.wall.thickness
    }

    pub fn inner_height(&self) -> f64 {
        self.base.height - self.bottom.thickness
    }
}

impl Component for DrawerBox {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn build_geometry(&mut self, ctx: &Context, session: &mut BuildSession<'_>) -> LayoutResult<()> {
        let (ox, oy, oz) = (ctx.x(), ctx.y(), ctx.z());
        let (w, h, d) = (self.base.width, self.base.height, self.base.depth);
        let t = self.wall.thickness;
        let inner_w = self.inner_width();
        let inner_d = self.inner_depth();
        let parent = ctx.parent();

        let walls = [
            (
                PanelPlacement::side("Drawer box left side", Point3::new(ox, oy, oz), h, d, t),
                d,
            ),
            (
                PanelPlacement::side("Drawer box right side", Point3::new(ox + w - t, oy, oz), h, d, t),
                d,
            ),
            (
                PanelPlacement::back("Drawer box front", Point3::new(ox + t, oy, oz), inner_w, h, t),
                inner_w,
            ),
            (
                PanelPlacement::back(
                    "Drawer box back",
                    Point3::new(ox + t, oy + d - t, oz),
                    inner_w,
                    h,
                    t,
                ),
                inner_w,
            ),
        ];
        for (panel, length) in walls {
            session.place(parent, &panel);
            self.base
                .add_cut(CutItem::new(panel.label.clone(), length, h, t, self.wall.name.clone()));
        }

        let bottom = PanelPlacement::horizontal(
            "Drawer box bottom",
            Point3::new(ox + t, oy + t, oz),
            inner_w,
            inner_d,
            self.bottom.thickness,
        );
        session.place(parent, &bottom);
        self.base.add_cut(CutItem::new(
            "Drawer box bottom",
            inner_w,
            inner_d,
            self.bottom.thickness,
            self.bottom.name.clone(),
        ));

        Ok(())
    }
}
