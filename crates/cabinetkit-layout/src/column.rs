//! Vertical stack of cabinets
//!
//! Modules are placed bottom up; each starts where the previous one ends.
//! The column is as deep as its deepest module.

use cabinetkit_core::{Context, LayoutError, LayoutResult};
use serde::{Deserialize, Serialize};

use crate::cabinet::{Cabinet, CabinetSpec, DEFAULT_THICKNESS};
use crate::component::{Component, ComponentBase};
use crate::session::BuildSession;
use cabinetkit_settings::BuildConfig;

#[derive(Debug, Clone)]
pub struct Column {
    base: ComponentBase,
    x_offset: f64,
    thickness: f64,
    modules: Vec<Cabinet>,
}

impl Column {
    /// Empty column; height grows as modules are added.
    pub fn new(width: f64, depth: f64) -> Self {
        Self {
            base: ComponentBase::new("Column", width, 0.0, depth),
            x_offset: 0.0,
            thickness: DEFAULT_THICKNESS,
            modules: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.base.name = name.into();
        self
    }

    pub fn at_x(mut self, x: f64) -> Self {
        self.x_offset = x;
        self
    }

    /// Panel thickness of modules created from here on.
    pub fn thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn add_module(mut self, module: Cabinet) -> Self {
        self.push(module);
        self
    }

    /// Column-wide cabinet of `height`, configured by `configure`.
    pub fn cabinet(self, height: f64, configure: impl FnOnce(Cabinet) -> Cabinet) -> Self {
        let cabinet = configure(self.module(height));
        self.add_module(cabinet)
    }

    /// Top storage module with an optional shelf.
    pub fn top(self, height: f64, shelf: Option<f64>) -> Self {
        let mut cabinet = self.module(height).named("Top module");
        if let Some(z) = shelf {
            cabinet = cabinet.shelf(z);
        }
        self.add_module(cabinet)
    }

    pub fn x_offset(&self) -> f64 {
        self.x_offset
    }

    pub fn modules(&self) -> &[Cabinet] {
        &self.modules
    }

    pub fn modules_mut(&mut self) -> &mut [Cabinet] {
        &mut self.modules
    }

    fn module(&self, height: f64) -> Cabinet {
        Cabinet::new(self.base.width, height, self.base.depth).thickness(self.thickness)
    }

    fn push(&mut self, module: Cabinet) {
        self.base.height += module.base().height;
        self.base.depth = self.base.depth.max(module.base().depth);
        self.modules.push(module);
    }

    /// Column of `depth` whose modules default to panels of `thickness`.
    pub fn from_spec(spec: &ColumnSpec, depth: f64, thickness: f64, config: &BuildConfig) -> Self {
        let mut column = Column::new(spec.width, depth).thickness(thickness);
        if let Some(name) = &spec.name {
            column = column.named(name.clone());
        }
        for module in &spec.modules {
            let mut module = module.clone();
            module.width = spec.width;
            module.depth = module.depth.or(Some(depth));
            module.thickness = module.thickness.or(Some(thickness));
            column.push(Cabinet::from_spec(&module, config));
        }
        column
    }
}

impl Component for Column {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn children(&self) -> Vec<&dyn Component> {
        self.modules.iter().map(|m| m as &dyn Component).collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Component> {
        self.modules
            .iter_mut()
            .map(|m| m as &mut dyn Component)
            .collect()
    }

    fn build_children(&mut self, ctx: &Context, session: &mut BuildSession<'_>) -> LayoutResult<()> {
        let mut z = 0.0;
        for module in &mut self.modules {
            module.build(&ctx.offset(self.x_offset, 0.0, z), session)?;
            z += module.base().height;
        }
        Ok(())
    }

    fn validate(&self) -> Vec<LayoutError> {
        let mut errors = Vec::new();
        if self.modules.is_empty() {
            errors.push(LayoutError::MissingConfiguration(format!(
                "column '{}' has no modules",
                self.base.name
            )));
        } else {
            errors.extend(self.base.validate());
        }
        for module in &self.modules {
            errors.extend(module.validate());
        }
        errors
    }
}

/// Serialized column; module widths follow the column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    #[serde(default)]
    pub name: Option<String>,
    pub width: f64,
    pub modules: Vec<CabinetSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabinetkit_core::RecordingSink;

    #[test]
    fn test_modules_stack_by_height() {
        let mut column = Column::new(600.0, 450.0)
            .at_x(1000.0)
            .cabinet(800.0, |c| c.named("Lower").doors(1))
            .top(400.0, Some(200.0));

        assert_eq!(column.base().height, 1200.0);
        assert_eq!(column.modules()[1].name(), "Top module");

        let mut sink = RecordingSink::new();
        let config = BuildConfig::default();
        let mut session = BuildSession::new(&mut sink, &config);
        column.build(&Context::new(), &mut session).unwrap();
        drop(session);

        let origins: Vec<(f64, f64)> = column
            .modules()
            .iter()
            .map(|m| {
                let ctx = m.base().context().cloned().unwrap_or_default();
                (ctx.x(), ctx.z())
            })
            .collect();
        assert_eq!(origins, vec![(1000.0, 0.0), (1000.0, 800.0)]);

        let names: Vec<String> = column.all_cut_items().into_iter().map(|i| i.name).collect();
        assert!(names.contains(&"Facade".to_string()));
        assert!(names.contains(&"Shelf 1-1".to_string()));
    }

    #[test]
    fn test_depth_is_deepest_module() {
        let column = Column::new(600.0, 300.0).add_module(Cabinet::new(600.0, 400.0, 560.0));
        assert_eq!(column.base().depth, 560.0);
    }

    #[test]
    fn test_empty_column_is_invalid() {
        let column = Column::new(600.0, 400.0);
        assert!(matches!(
            column.validate().as_slice(),
            [LayoutError::MissingConfiguration(_)]
        ));
    }
}
