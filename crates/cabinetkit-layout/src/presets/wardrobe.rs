//! Built-in wardrobe: columns side by side

use cabinetkit_core::{Context, GroupHandle, LayoutError, LayoutResult};
use cabinetkit_settings::BuildConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cabinet::DEFAULT_THICKNESS;
use crate::column::{Column, ColumnSpec};
use crate::component::{Component, ComponentBase, Openable};
use crate::parts::Drawer;
use crate::session::BuildSession;

pub const DEFAULT_DEPTH: f64 = 400.0;

#[derive(Debug, Clone)]
pub struct Wardrobe {
    base: ComponentBase,
    thickness: f64,
    columns: Vec<Column>,
}

impl Wardrobe {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_depth(name, DEFAULT_DEPTH)
    }

    pub fn with_depth(name: impl Into<String>, depth: f64) -> Self {
        Self {
            base: ComponentBase::new(name, 0.0, 0.0, depth),
            thickness: DEFAULT_THICKNESS,
            columns: Vec::new(),
        }
    }

    pub fn thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Next column to the right, configured by `configure`.
    pub fn column(mut self, width: f64, configure: impl FnOnce(Column) -> Column) -> Self {
        let column = Column::new(width, self.base.depth)
            .at_x(self.base.width)
            .thickness(self.thickness);
        self.push(configure(column));
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn all_drawers(&self) -> Vec<&Drawer> {
        self.columns
            .iter()
            .flat_map(|c| c.modules())
            .flat_map(|m| m.built_drawers())
            .collect()
    }

    pub fn open_all_drawers(&mut self, amount: Option<f64>) {
        for column in &mut self.columns {
            for module in column.modules_mut() {
                module.open_all_drawers(amount);
            }
        }
    }

    pub fn close_all_drawers(&mut self) {
        for column in &mut self.columns {
            for module in column.modules_mut() {
                module.close_all_drawers();
            }
        }
    }

    pub fn openable_mut(&mut self, group: GroupHandle) -> Option<&mut dyn Openable> {
        self.columns
            .iter_mut()
            .flat_map(|c| c.modules_mut().iter_mut())
            .find_map(|m| m.openable_mut(group))
    }

    fn push(&mut self, column: Column) {
        self.base.width += column.base().width;
        self.base.height = self.base.height.max(column.base().height);
        self.columns.push(column);
    }

    pub fn from_spec(spec: &WardrobeSpec, config: &BuildConfig) -> Self {
        let depth = spec.depth.unwrap_or(DEFAULT_DEPTH);
        let thickness = spec.thickness.unwrap_or(config.material_thickness);
        let mut wardrobe = Wardrobe::with_depth(spec.name.clone(), depth).thickness(thickness);
        for column in &spec.columns {
            let column =
                Column::from_spec(column, depth, thickness, config).at_x(wardrobe.base.width);
            wardrobe.push(column);
        }
        wardrobe
    }
}

impl Component for Wardrobe {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn build_geometry(&mut self, _ctx: &Context, _session: &mut BuildSession<'_>) -> LayoutResult<()> {
        info!(
            "Building wardrobe '{}' {}×{}×{} with {} columns",
            self.base.name,
            self.base.width,
            self.base.height,
            self.base.depth,
            self.columns.len()
        );
        Ok(())
    }

    fn children(&self) -> Vec<&dyn Component> {
        self.columns.iter().map(|c| c as &dyn Component).collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Component> {
        self.columns
            .iter_mut()
            .map(|c| c as &mut dyn Component)
            .collect()
    }

    fn validate(&self) -> Vec<LayoutError> {
        if self.columns.is_empty() {
            return vec![LayoutError::MissingConfiguration(format!(
                "wardrobe '{}' has no columns",
                self.base.name
            ))];
        }
        let mut errors = self.base.validate();
        for column in &self.columns {
            errors.extend(column.validate());
        }
        errors
    }
}

fn default_name() -> String {
    "Wardrobe".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardrobeSpec {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub depth: Option<f64>,
    #[serde(default)]
    pub thickness: Option<f64>,
    pub columns: Vec<ColumnSpec>,
}
