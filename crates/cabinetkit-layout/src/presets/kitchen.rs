//! Kitchen: a lower row on the floor, a worktop over it and an upper row on
//! the wall
//!
//! Upper cabinets are shallower than lower ones; their backs line up with
//! the lower backs. Lower cabinets take the row's default support when they
//! are added and may override it afterwards.

use cabinetkit_core::{Context, CutItem, GroupHandle, HardwareItem, LayoutError, LayoutResult};
use cabinetkit_settings::BuildConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cabinet::{Cabinet, CabinetSpec};
use crate::component::{Component, ComponentBase, Openable};
use crate::parts::countertop::{DEFAULT_OVERHANG, DEFAULT_THICKNESS};
use crate::parts::{Countertop, Drawer};
use crate::session::BuildSession;

pub const LOWER_DEPTH: f64 = 560.0;
pub const LOWER_HEIGHT: f64 = 720.0;
pub const UPPER_DEPTH: f64 = 300.0;
pub const UPPER_HEIGHT: f64 = 600.0;
pub const UPPER_Z: f64 = 1400.0;

/// Support given to every lower cabinet as it is added.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RowSupport {
    Plinth { height: f64 },
    Legs { height: f64 },
}

impl RowSupport {
    fn apply(self, cabinet: Cabinet) -> Cabinet {
        match self {
            Self::Plinth { height } => cabinet.plinth(height),
            Self::Legs { height } => cabinet.legs(height),
        }
    }
}

fn default_ct_thickness() -> f64 {
    DEFAULT_THICKNESS
}

fn default_overhang() -> f64 {
    DEFAULT_OVERHANG
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountertopSpec {
    #[serde(default = "default_ct_thickness")]
    pub thickness: f64,
    #[serde(default = "default_overhang")]
    pub overhang: f64,
    /// Lower depth plus overhang when absent.
    #[serde(default)]
    pub depth: Option<f64>,
}

impl Default for CountertopSpec {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_THICKNESS,
            overhang: DEFAULT_OVERHANG,
            depth: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Kitchen {
    base: ComponentBase,
    lower: Vec<Cabinet>,
    upper: Vec<Cabinet>,
    lower_depth: f64,
    lower_height: f64,
    upper_depth: f64,
    upper_height: f64,
    upper_z: f64,
    lower_support: Option<RowSupport>,
    countertop: Option<CountertopSpec>,
    built_countertop: Option<Countertop>,
}

impl Kitchen {
    pub fn new(name: impl Into<String>) -> Self {
        let mut kitchen = Self {
            base: ComponentBase::new(name, 0.0, 0.0, 0.0),
            lower: Vec::new(),
            upper: Vec::new(),
            lower_depth: LOWER_DEPTH,
            lower_height: LOWER_HEIGHT,
            upper_depth: UPPER_DEPTH,
            upper_height: UPPER_HEIGHT,
            upper_z: UPPER_Z,
            lower_support: None,
            countertop: None,
            built_countertop: None,
        };
        kitchen.update_dimensions();
        kitchen
    }

    /// Depth and height of cabinets added to the lower row from here on.
    pub fn lower_row(mut self, depth: f64, height: f64) -> Self {
        self.lower_depth = depth;
        self.lower_height = height;
        self.update_dimensions();
        self
    }

    /// Depth, height and mounting height of the upper row.
    pub fn upper_row(mut self, depth: f64, height: f64, at: f64) -> Self {
        self.upper_depth = depth;
        self.upper_height = height;
        self.upper_z = at;
        self.update_dimensions();
        self
    }

    pub fn plinth(mut self, height: f64) -> Self {
        self.lower_support = Some(RowSupport::Plinth { height });
        self
    }

    pub fn legs(mut self, height: f64) -> Self {
        self.lower_support = Some(RowSupport::Legs { height });
        self
    }

    pub fn lower_cabinet(mut self, width: f64, configure: impl FnOnce(Cabinet) -> Cabinet) -> Self {
        let mut cabinet = Cabinet::new(width, self.lower_height, self.lower_depth);
        if let Some(support) = self.lower_support {
            cabinet = support.apply(cabinet);
        }
        self.lower.push(configure(cabinet));
        self.update_dimensions();
        self
    }

    pub fn upper_cabinet(mut self, width: f64, configure: impl FnOnce(Cabinet) -> Cabinet) -> Self {
        let cabinet = Cabinet::new(width, self.upper_height, self.upper_depth);
        self.upper.push(configure(cabinet));
        self.update_dimensions();
        self
    }

    pub fn countertop(mut self, spec: CountertopSpec) -> Self {
        self.countertop = Some(spec);
        self.update_dimensions();
        self
    }

    pub fn lower_cabinets(&self) -> &[Cabinet] {
        &self.lower
    }

    pub fn upper_cabinets(&self) -> &[Cabinet] {
        &self.upper
    }

    /// The worktop as built, if any.
    pub fn built_countertop(&self) -> Option<&Countertop> {
        self.built_countertop.as_ref()
    }

    fn lower_top(&self) -> Option<f64> {
        self.lower
            .iter()
            .map(|c| c.base().height)
            .reduce(f64::max)
    }

    /// Clear wall between the worktop and the upper row.
    pub fn backsplash_gap(&self) -> Option<f64> {
        if self.upper.is_empty() {
            return None;
        }
        let lower_top = self.lower_top()?;
        let countertop = self.countertop?;
        Some(self.upper_z - lower_top - countertop.thickness)
    }

    fn update_dimensions(&mut self) {
        let row_width = |row: &[Cabinet]| row.iter().map(|c| c.base().width).sum::<f64>();
        self.base.width = row_width(&self.lower).max(row_width(&self.upper));

        let worktop = self.countertop.map(|c| c.thickness).unwrap_or(0.0);
        let lower = self.lower_top().map(|h| h + worktop).unwrap_or(0.0);
        let upper = if self.upper.is_empty() {
            0.0
        } else {
            self.upper_z + self.upper_height
        };
        self.base.height = lower.max(upper);
        self.base.depth = self.lower_depth.max(self.upper_depth);
    }

    fn cabinets(&self) -> impl Iterator<Item = &Cabinet> {
        self.lower.iter().chain(self.upper.iter())
    }

    fn cabinets_mut(&mut self) -> impl Iterator<Item = &mut Cabinet> {
        self.lower.iter_mut().chain(self.upper.iter_mut())
    }

    pub fn all_drawers(&self) -> Vec<&Drawer> {
        self.cabinets().flat_map(|c| c.built_drawers()).collect()
    }

    pub fn open_all_drawers(&mut self, amount: Option<f64>) {
        for cabinet in self.cabinets_mut() {
            cabinet.open_all_drawers(amount);
        }
        debug!("Opened {} drawers", self.all_drawers().len());
    }

    pub fn close_all_drawers(&mut self) {
        for cabinet in self.cabinets_mut() {
            cabinet.close_all_drawers();
        }
        debug!("Closed {} drawers", self.all_drawers().len());
    }

    pub fn openable_mut(&mut self, group: GroupHandle) -> Option<&mut dyn Openable> {
        self.cabinets_mut().find_map(|c| c.openable_mut(group))
    }

    fn build_lower_row(&mut self, ctx: &Context, session: &mut BuildSession<'_>) -> LayoutResult<()> {
        let mut x = 0.0;
        for cabinet in &mut self.lower {
            cabinet.build(&ctx.offset(x, 0.0, 0.0), session)?;
            x += cabinet.base().width;
        }
        Ok(())
    }

    fn build_countertop(&mut self, ctx: &Context, session: &mut BuildSession<'_>) {
        let (Some(spec), Some(lower_top)) = (self.countertop, self.lower_top()) else {
            return;
        };
        let width = self.lower.iter().map(|c| c.base().width).sum();
        let depth = spec.depth.unwrap_or(self.lower_depth + spec.overhang);
        let countertop = Countertop::new(width, depth)
            .with_thickness(spec.thickness)
            .with_overhang(spec.overhang);

        let panel = countertop.placement(ctx.x(), ctx.y(), ctx.z() + lower_top);
        session.place(ctx.parent(), &panel);
        let front_edge = session.config().edge_banding.front;
        let item = countertop.cut_item(&self.base.name, front_edge);
        self.base.add_cut(item);
        self.built_countertop = Some(countertop);
        debug!("Worktop {}×{}×{} at z {}", width, depth, spec.thickness, lower_top);
    }

    fn build_upper_row(&mut self, ctx: &Context, session: &mut BuildSession<'_>) -> LayoutResult<()> {
        let dy = self.lower_depth - self.upper_depth;
        let mut x = 0.0;
        for cabinet in &mut self.upper {
            cabinet.build(&ctx.offset(x, dy, self.upper_z), session)?;
            x += cabinet.base().width;
        }
        Ok(())
    }

    pub fn from_spec(spec: &KitchenSpec, config: &BuildConfig) -> Self {
        let mut kitchen = Kitchen::new(spec.name.clone())
            .lower_row(spec.lower.depth, spec.lower.height);
        kitchen.lower_support = spec.lower.support;
        for cabinet in &spec.lower.cabinets {
            let mut cabinet_spec = cabinet.clone();
            cabinet_spec.height = kitchen.lower_height;
            cabinet_spec.depth = Some(kitchen.lower_depth);
            let mut built = Cabinet::from_spec(&cabinet_spec, config);
            if cabinet_spec.support.is_none() {
                if let Some(support) = kitchen.lower_support {
                    built = support.apply(built);
                }
            }
            kitchen.lower.push(built);
        }
        if let Some(upper) = &spec.upper {
            kitchen = kitchen.upper_row(upper.depth, upper.height, upper.at);
            for cabinet in &upper.cabinets {
                let mut cabinet_spec = cabinet.clone();
                cabinet_spec.height = upper.height;
                cabinet_spec.depth = Some(upper.depth);
                kitchen.upper.push(Cabinet::from_spec(&cabinet_spec, config));
            }
        }
        kitchen.countertop = spec.countertop;
        kitchen.update_dimensions();
        kitchen
    }
}

impl Component for Kitchen {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn build_geometry(&mut self, ctx: &Context, session: &mut BuildSession<'_>) -> LayoutResult<()> {
        session.registry_mut().clear();
        info!(
            "Building kitchen '{}': {} lower, {} upper cabinets",
            self.base.name,
            self.lower.len(),
            self.upper.len()
        );

        self.build_lower_row(ctx, session)?;
        self.build_countertop(ctx, session);
        self.build_upper_row(ctx, session)?;
        self.update_dimensions();

        if let Some(gap) = self.backsplash_gap() {
            debug!("Backsplash gap of '{}': {}", self.base.name, gap);
        }
        Ok(())
    }

    /// Rows are built in [`Component::build_geometry`] so the worktop lands
    /// between them.
    fn build_children(&mut self, _ctx: &Context, _session: &mut BuildSession<'_>) -> LayoutResult<()> {
        Ok(())
    }

    fn children(&self) -> Vec<&dyn Component> {
        self.cabinets().map(|c| c as &dyn Component).collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Component> {
        self.cabinets_mut().map(|c| c as &mut dyn Component).collect()
    }

    /// Cabinet parts first, the worktop last.
    fn all_cut_items(&self) -> Vec<CutItem> {
        let mut items: Vec<CutItem> = self.cabinets().flat_map(|c| c.all_cut_items()).collect();
        items.extend(self.base.cut_items().iter().cloned());
        items
    }

    fn all_hardware_items(&self) -> Vec<HardwareItem> {
        let mut items: Vec<HardwareItem> =
            self.cabinets().flat_map(|c| c.all_hardware_items()).collect();
        items.extend(self.base.hardware_items().iter().cloned());
        items
    }

    fn validate(&self) -> Vec<LayoutError> {
        if self.lower.is_empty() && self.upper.is_empty() {
            return vec![LayoutError::MissingConfiguration(format!(
                "kitchen '{}' has no cabinets",
                self.base.name
            ))];
        }
        let mut errors = self.base.validate();
        for cabinet in self.cabinets() {
            errors.extend(cabinet.validate());
        }
        errors
    }
}

fn default_name() -> String {
    "Kitchen".to_string()
}

fn default_lower_depth() -> f64 {
    LOWER_DEPTH
}

fn default_lower_height() -> f64 {
    LOWER_HEIGHT
}

fn default_upper_depth() -> f64 {
    UPPER_DEPTH
}

fn default_upper_height() -> f64 {
    UPPER_HEIGHT
}

fn default_upper_z() -> f64 {
    UPPER_Z
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowerRowSpec {
    #[serde(default = "default_lower_depth")]
    pub depth: f64,
    #[serde(default = "default_lower_height")]
    pub height: f64,
    #[serde(default)]
    pub support: Option<RowSupport>,
    pub cabinets: Vec<CabinetSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpperRowSpec {
    #[serde(default = "default_upper_depth")]
    pub depth: f64,
    #[serde(default = "default_upper_height")]
    pub height: f64,
    #[serde(default = "default_upper_z")]
    pub at: f64,
    pub cabinets: Vec<CabinetSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenSpec {
    #[serde(default = "default_name")]
    pub name: String,
    pub lower: LowerRowSpec,
    #[serde(default)]
    pub upper: Option<UpperRowSpec>,
    #[serde(default)]
    pub countertop: Option<CountertopSpec>,
}
