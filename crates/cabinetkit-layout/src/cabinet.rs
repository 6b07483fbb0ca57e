//! Cabinet assembly
//!
//! A cabinet is configured by chaining feature calls and then built once.
//! Building runs the feature builders in a fixed order: support, body,
//! sections, shelves, drawers, drawer rows, doors. The support decides where
//! the interior starts for everything after it.

use cabinetkit_core::{Context, GroupHandle, LayoutError, LayoutResult, MaterialCatalog};
use cabinetkit_settings::BuildConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{info, warn};

pub use crate::builders::Envelope;

use crate::builders::{
    resolve_sections, stacked_rows_height, BodyBuilder, BuildOutput, Carcass, DoorBuilder,
    DoorsSpec, DrawerBuilder, DrawerOptions, DrawerRowBuilder, DrawerRowSpec, DrawerSpec,
    DrawerStack, SectionBuilder, SectionSpec, ShelfBuilder, ShelfSpec, SkipPart, StretcherMode,
    Stretchers,
};
use crate::component::{Component, ComponentBase, Openable};
use crate::parts::{Door, Drawer};
use crate::session::BuildSession;
use crate::support::{leg_count_for_width, Support};

pub const DEFAULT_THICKNESS: f64 = 18.0;
pub const DEFAULT_BACK_THICKNESS: f64 = 4.0;

/// Slack allowed when checking that features fit the interior.
const FIT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct Cabinet {
    base: ComponentBase,
    thickness: f64,
    back_thickness: f64,
    support: Support,
    skip: BTreeSet<SkipPart>,
    stretchers: Option<StretcherMode>,
    stretcher_width: Option<f64>,
    shelves: Vec<ShelfSpec>,
    sections: Vec<SectionSpec>,
    drawers: DrawerStack,
    drawer_options: DrawerOptions,
    drawer_rows: Vec<DrawerRowSpec>,
    doors: Option<DoorsSpec>,
    built_drawers: Vec<Drawer>,
    built_doors: Vec<Door>,
}

impl Cabinet {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            base: ComponentBase::new("Cabinet", width, height, depth),
            thickness: DEFAULT_THICKNESS,
            back_thickness: DEFAULT_BACK_THICKNESS,
            support: Support::Flush,
            skip: BTreeSet::new(),
            stretchers: None,
            stretcher_width: None,
            shelves: Vec::new(),
            sections: Vec::new(),
            drawers: DrawerStack::default(),
            drawer_options: DrawerOptions::default(),
            drawer_rows: Vec::new(),
            doors: None,
            built_drawers: Vec::new(),
            built_doors: Vec::new(),
        }
    }

    /// Cabinet whose panel thicknesses come from `config`.
    pub fn with_config(width: f64, height: f64, depth: f64, config: &BuildConfig) -> Self {
        Self::new(width, height, depth)
            .thickness(config.material_thickness)
            .back_thickness(config.back_thickness)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.base.name = name.into();
        self
    }

    pub fn thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn back_thickness(mut self, thickness: f64) -> Self {
        self.back_thickness = thickness;
        self
    }

    // Shelves and sections

    pub fn shelf(mut self, z: f64) -> Self {
        self.shelves.push(ShelfSpec::at(z));
        self
    }

    pub fn fixed_shelf(mut self, z: f64) -> Self {
        self.shelves.push(ShelfSpec::fixed(z));
        self
    }

    pub fn shelves(mut self, positions: &[f64]) -> Self {
        self.shelves.extend(positions.iter().copied().map(ShelfSpec::at));
        self
    }

    pub fn sections(mut self, specs: &[SectionSpec]) -> Self {
        self.sections = specs.to_vec();
        self
    }

    pub fn equal_sections(mut self, count: usize) -> Self {
        self.sections = SectionSpec::equal(count);
        self
    }

    // Support

    pub fn support(mut self, support: Support) -> Self {
        self.support = support;
        self
    }

    pub fn plinth(self, height: f64) -> Self {
        self.support(Support::plinth(height))
    }

    pub fn plinth_with_front(self, height: f64) -> Self {
        self.support(Support::plinth_with_front(height))
    }

    /// Adjustable legs, six on cabinets wider than 800 and four otherwise.
    pub fn legs(self, height: f64) -> Self {
        let count = leg_count_for_width(self.base.width);
        self.legs_with(height, count, true)
    }

    pub fn legs_with(self, height: f64, count: u32, adjustable: bool) -> Self {
        self.support(Support::Legs {
            height,
            count,
            adjustable,
        })
    }

    pub fn flush(self) -> Self {
        self.support(Support::Flush)
    }

    // Shell

    pub fn skip(mut self, part: SkipPart) -> Self {
        self.skip.insert(part);
        self
    }

    /// Skip parts by token; unknown tokens are logged and ignored.
    pub fn skip_tokens(mut self, tokens: &[&str]) -> Self {
        for token in tokens {
            match token.parse::<SkipPart>() {
                Ok(part) => {
                    self.skip.insert(part);
                }
                Err(_) => warn!("Unknown part '{}' in skip list of '{}'", token, self.base.name),
            }
        }
        self
    }

    pub fn no_back(self) -> Self {
        self.skip(SkipPart::Back)
    }

    /// Rails of the configured width in place of the top.
    pub fn stretchers(mut self, mode: StretcherMode) -> Self {
        self.stretchers = Some(mode);
        self
    }

    pub fn stretchers_with_width(mut self, mode: StretcherMode, width: f64) -> Self {
        self.stretchers = Some(mode);
        self.stretcher_width = Some(width);
        self
    }

    // Drawers

    pub fn drawer(mut self, height: f64) -> Self {
        match &mut self.drawers {
            DrawerStack::Heights(specs) => specs.push(DrawerSpec::new(height)),
            DrawerStack::Positions(_) => {
                self.drawers = DrawerStack::Heights(vec![DrawerSpec::new(height)]);
            }
        }
        self
    }

    pub fn drawers(mut self, count: usize, height: f64) -> Self {
        for _ in 0..count {
            self = self.drawer(height);
        }
        self
    }

    /// Drawers whose bottoms sit at `positions` above the interior base.
    pub fn drawers_at(mut self, positions: &[f64]) -> Self {
        self.drawers = DrawerStack::Positions(positions.to_vec());
        self
    }

    pub fn drawer_stack(mut self, stack: DrawerStack) -> Self {
        self.drawers = stack;
        self
    }

    pub fn drawer_options(mut self, options: DrawerOptions) -> Self {
        self.drawer_options = options;
        self
    }

    pub fn drawer_row(mut self, row: DrawerRowSpec) -> Self {
        self.drawer_rows.push(row);
        self
    }

    // Doors

    pub fn door(self) -> Self {
        self.doors(1)
    }

    pub fn doors(self, count: usize) -> Self {
        self.doors_with(DoorsSpec::new(count))
    }

    pub fn doors_with(mut self, spec: DoorsSpec) -> Self {
        self.doors = Some(spec);
        self
    }

    // Queries

    pub fn support_strategy(&self) -> Support {
        self.support
    }

    pub fn panel_thickness(&self) -> f64 {
        self.thickness
    }

    pub fn skipped(&self) -> &BTreeSet<SkipPart> {
        &self.skip
    }

    /// True when a solid top panel will be built.
    pub fn has_solid_top(&self) -> bool {
        !self.skip.contains(&SkipPart::Top) && self.stretchers.is_none()
    }

    pub fn envelope(&self) -> Envelope {
        Envelope::resolve(
            self.base.width,
            self.base.height,
            self.base.depth,
            self.thickness,
            self.back_thickness,
            &self.support,
        )
    }

    /// Section widths this cabinet resolves to.
    pub fn section_widths(&self) -> Vec<f64> {
        resolve_sections(&self.sections, self.envelope().inner_width, self.thickness)
    }

    pub fn built_drawers(&self) -> &[Drawer] {
        &self.built_drawers
    }

    pub fn built_doors(&self) -> &[Door] {
        &self.built_doors
    }

    /// The drawer or door built into `group`.
    pub fn openable_mut(&mut self, group: GroupHandle) -> Option<&mut dyn Openable> {
        let owned_by = |g: Option<GroupHandle>| g == Some(group);
        if let Some(i) = self.built_drawers.iter().position(|d| owned_by(d.base().group())) {
            return Some(&mut self.built_drawers[i]);
        }
        let i = self.built_doors.iter().position(|d| owned_by(d.base().group()))?;
        Some(&mut self.built_doors[i])
    }

    pub fn open_all_drawers(&mut self, amount: Option<f64>) {
        for drawer in &mut self.built_drawers {
            drawer.open(amount);
        }
    }

    pub fn close_all_drawers(&mut self) {
        for drawer in &mut self.built_drawers {
            drawer.close();
        }
    }

    pub fn open_all_doors(&mut self, angle: Option<f64>) {
        for door in &mut self.built_doors {
            door.open(angle);
        }
    }

    pub fn close_all_doors(&mut self) {
        for door in &mut self.built_doors {
            door.close();
        }
    }

    fn carcass(&self, config: &BuildConfig, catalog: &MaterialCatalog) -> Carcass {
        let mut skip = self.skip.clone();
        if self.stretchers.is_some() {
            skip.insert(SkipPart::Top);
        }
        Carcass {
            name: self.base.name.clone(),
            width: self.base.width,
            height: self.base.height,
            depth: self.base.depth,
            thickness: self.thickness,
            back_thickness: self.back_thickness,
            support: self.support,
            skip,
            material: catalog.lookup(&config.materials.carcass).name.clone(),
            back_material: catalog.lookup(&config.materials.back).name.clone(),
            front_edge: config.edge_banding.front,
        }
    }

    fn build_support(&self, carcass: &Carcass, ctx: &Context, session: &mut BuildSession<'_>) -> BuildOutput {
        let mut out = BuildOutput::new();
        let inset = session.config().plinth_inset;
        if let Some(panel) = self
            .support
            .geometry(ctx.position(), carcass.width, carcass.thickness, inset)
        {
            session.place(ctx.parent(), &panel);
        }
        out.cut_items = self.support.cut_items(
            &carcass.name,
            carcass.width,
            carcass.thickness,
            &carcass.material,
            carcass.front_edge,
        );
        out.hardware_items = self.support.hardware(&carcass.name);
        out
    }

    fn absorb(&mut self, out: BuildOutput) {
        self.base.add_cuts(out.cut_items);
        self.base.add_hardware_items(out.hardware_items);
        self.built_drawers.extend(out.drawers);
        self.built_doors.extend(out.doors);
    }
}

impl Component for Cabinet {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn build_geometry(&mut self, ctx: &Context, session: &mut BuildSession<'_>) -> LayoutResult<()> {
        let config = session.config();
        let carcass = self.carcass(config, session.catalog());
        info!(
            "Building cabinet '{}' {}×{}×{} on {}",
            carcass.name, carcass.width, carcass.height, carcass.depth, carcass.support
        );

        let mut out = self.build_support(&carcass, ctx, session);

        let stretchers = self.stretchers.map(|mode| Stretchers {
            mode,
            width: self.stretcher_width.unwrap_or(config.stretcher_width),
        });
        out.merge(BodyBuilder::new(stretchers).build(&carcass, ctx, session));

        let sections = SectionBuilder::new(self.sections.clone());
        let section_widths = sections.resolve(&carcass);
        out.merge(sections.build(&carcass, ctx, session)?);

        out.merge(ShelfBuilder::new(self.shelves.clone()).build(&carcass, ctx, &section_widths, session));

        let drawers = DrawerBuilder::new(self.drawers.clone(), self.drawer_options.clone());
        out.merge(drawers.build(&carcass, ctx, session)?);

        out.merge(DrawerRowBuilder::new(self.drawer_rows.clone()).build(&carcass, ctx, session)?);

        if let Some(spec) = &self.doors {
            out.merge(DoorBuilder::new(spec.clone()).build(&carcass, ctx, session)?);
        }

        self.absorb(out);
        Ok(())
    }

    fn validate(&self) -> Vec<LayoutError> {
        let mut errors = self.base.validate();
        let name = &self.base.name;
        let envelope = self.envelope();

        if !(self.thickness > 0.0) {
            errors.push(LayoutError::invalid_dimensions(
                name,
                format!("panel thickness must be > 0, got {}", self.thickness),
            ));
        }
        if !(envelope.inner_width > 0.0) {
            errors.push(LayoutError::invalid_dimensions(
                name,
                format!("inner width must be > 0, got {}", envelope.inner_width),
            ));
        }
        if !(envelope.inner_depth > 0.0) {
            errors.push(LayoutError::invalid_dimensions(
                name,
                format!("inner depth must be > 0, got {}", envelope.inner_depth),
            ));
        }
        if envelope.interior_height < 0.0 {
            errors.push(LayoutError::invalid_dimensions(
                name,
                format!("interior height is negative ({})", envelope.interior_height),
            ));
        }

        let stack_top = self
            .drawers
            .resolve(envelope.interior_height)
            .iter()
            .scan(0.0, |stacked: &mut f64, spec| {
                let base = spec.z_offset.unwrap_or(*stacked);
                *stacked += spec.height;
                Some(base + spec.height)
            })
            .fold(0.0, f64::max);
        if stack_top > envelope.interior_height + FIT_TOLERANCE {
            errors.push(LayoutError::invalid_dimensions(
                name,
                format!(
                    "drawers reach {} but the interior is {} high",
                    stack_top, envelope.interior_height
                ),
            ));
        }

        if !self.sections.is_empty() {
            let widths = self.section_widths();
            let used = widths.iter().sum::<f64>() + widths.len().saturating_sub(1) as f64 * self.thickness;
            if used > envelope.inner_width + FIT_TOLERANCE {
                errors.push(LayoutError::InvalidSection {
                    spec: self
                        .sections
                        .iter()
                        .map(|s| s.to_string())
                        .collect::<Vec<_>>()
                        .join(", "),
                    reason: format!("sections need {} but the interior is {} wide", used, envelope.inner_width),
                });
            }
        }

        let rows_height =
            stacked_rows_height(&self.drawer_rows, self.thickness, self.has_solid_top());
        if rows_height > envelope.interior_height + FIT_TOLERANCE {
            errors.push(LayoutError::invalid_dimensions(
                name,
                format!(
                    "drawer rows need {} but the interior is {} high",
                    rows_height, envelope.interior_height
                ),
            ));
        }
        for (i, row) in self.drawer_rows.iter().enumerate() {
            if row.column_count() == 0 {
                errors.push(LayoutError::MissingConfiguration(format!(
                    "drawer row {} of '{}' has no columns",
                    i + 1,
                    name
                )));
            }
        }

        if let Some(doors) = &self.doors {
            if doors.count == 0 {
                errors.push(LayoutError::MissingConfiguration(format!(
                    "door set of '{}' has no doors",
                    name
                )));
            }
        }

        errors
    }
}

fn default_name() -> String {
    "Cabinet".to_string()
}

/// Rails requested in a serialized design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StretcherSpec {
    #[serde(default)]
    pub mode: StretcherMode,
    #[serde(default)]
    pub width: Option<f64>,
}

/// Serialized cabinet description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CabinetSpec {
    #[serde(default = "default_name")]
    pub name: String,
    /// Filled in by the enclosing column when the cabinet is a module.
    #[serde(default)]
    pub width: f64,
    /// Filled in by the enclosing row when the cabinet is in a kitchen.
    #[serde(default)]
    pub height: f64,
    /// Configured default depth when absent.
    #[serde(default)]
    pub depth: Option<f64>,
    #[serde(default)]
    pub thickness: Option<f64>,
    #[serde(default)]
    pub back_thickness: Option<f64>,
    /// Flush, or the row default inside a kitchen, when absent.
    #[serde(default)]
    pub support: Option<Support>,
    /// Part tokens such as `"back"` or `"left_side"`.
    #[serde(default)]
    pub skip: Vec<String>,
    #[serde(default)]
    pub stretchers: Option<StretcherSpec>,
    #[serde(default)]
    pub shelves: Vec<ShelfSpec>,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
    #[serde(default)]
    pub drawers: Option<DrawerStack>,
    #[serde(default)]
    pub drawer_options: DrawerOptions,
    #[serde(default)]
    pub drawer_rows: Vec<DrawerRowSpec>,
    #[serde(default)]
    pub doors: Option<DoorsSpec>,
}

impl Cabinet {
    pub fn from_spec(spec: &CabinetSpec, config: &BuildConfig) -> Self {
        let mut cabinet = Cabinet::new(spec.width, spec.height, spec.depth.unwrap_or(config.depth))
            .named(spec.name.clone())
            .thickness(spec.thickness.unwrap_or(config.material_thickness))
            .back_thickness(spec.back_thickness.unwrap_or(config.back_thickness));
        if let Some(support) = spec.support {
            cabinet = cabinet.support(support);
        }

        let tokens: Vec<&str> = spec.skip.iter().map(String::as_str).collect();
        cabinet = cabinet
            .skip_tokens(&tokens)
            .sections(&spec.sections)
            .drawer_options(spec.drawer_options.clone());
        cabinet.shelves = spec.shelves.clone();
        cabinet.drawer_rows = spec.drawer_rows.clone();
        cabinet.doors = spec.doors.clone();

        if let Some(stack) = &spec.drawers {
            cabinet = cabinet.drawer_stack(stack.clone());
        }
        if let Some(stretchers) = spec.stretchers {
            cabinet.stretchers = Some(stretchers.mode);
            cabinet.stretcher_width = stretchers.width;
        }
        cabinet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::RowColumns;
    use cabinetkit_core::{HardwareKind, RecordingSink};

    fn build(cabinet: &mut Cabinet) -> RecordingSink {
        let mut sink = RecordingSink::new();
        let config = BuildConfig::default();
        let mut session = BuildSession::new(&mut sink, &config);
        cabinet.build(&Context::new(), &mut session).unwrap();
        drop(session);
        sink
    }

    fn names(cabinet: &Cabinet) -> Vec<String> {
        cabinet.all_cut_items().into_iter().map(|i| i.name).collect()
    }

    #[test]
    fn test_envelope_per_support() {
        let legs = Cabinet::new(800.0, 450.0, 400.0).legs(100.0).envelope();
        assert_eq!(legs.side_height, 350.0);
        assert_eq!(legs.interior_height, 314.0);

        let plinth = Cabinet::new(800.0, 450.0, 400.0).plinth(80.0).envelope();
        assert_eq!(plinth.side_height, 450.0);
        assert_eq!(plinth.interior_height, 334.0);

        let flush = Cabinet::new(800.0, 450.0, 400.0).envelope();
        assert_eq!(flush.interior_height, 414.0);
        assert_eq!(flush.inner_width, 764.0);
        assert_eq!(flush.inner_depth, 396.0);
    }

    #[test]
    fn test_envelope_matches_carcass() {
        let config = BuildConfig::default();
        let catalog = config.material_catalog();
        for cabinet in [
            Cabinet::new(800.0, 450.0, 400.0).legs(100.0),
            Cabinet::new(600.0, 720.0, 560.0).plinth_with_front(80.0).thickness(16.0),
            Cabinet::new(800.0, 720.0, 560.0).stretchers(StretcherMode::Sink),
        ] {
            let carcass = cabinet.carcass(&config, &catalog);
            assert_eq!(cabinet.envelope(), carcass.envelope());
            assert_eq!(cabinet.envelope().interior_height, carcass.interior_height());
        }
    }

    #[test]
    fn test_leg_count_follows_width() {
        let narrow = Cabinet::new(800.0, 720.0, 560.0).legs(100.0);
        assert!(matches!(narrow.support_strategy(), Support::Legs { count: 4, .. }));
        let wide = Cabinet::new(900.0, 720.0, 560.0).legs(100.0);
        assert!(matches!(wide.support_strategy(), Support::Legs { count: 6, .. }));
    }

    #[test]
    fn test_skip_tokens_ignore_unknown() {
        let cabinet = Cabinet::new(600.0, 700.0, 400.0).skip_tokens(&["back", "lid", "top"]);
        assert_eq!(cabinet.skipped().len(), 2);
        assert!(!cabinet.has_solid_top());
    }

    #[test]
    fn test_build_order_of_records() {
        let mut cabinet = Cabinet::new(800.0, 720.0, 400.0)
            .named("Base")
            .plinth_with_front(100.0)
            .equal_sections(2)
            .shelf(200.0)
            .doors(2);
        build(&mut cabinet);

        let names = names(&cabinet);
        assert_eq!(names[0], "Plinth");
        assert_eq!(names[1], "Left side");
        assert!(names.contains(&"Partition 1".to_string()));
        assert!(names.contains(&"Shelf 2-1".to_string()));
        assert_eq!(names.last().map(String::as_str), Some("Facade"));
        assert_eq!(cabinet.built_doors().len(), 2);
    }

    #[test]
    fn test_legs_hardware() {
        let mut cabinet = Cabinet::new(1000.0, 720.0, 560.0).legs(100.0);
        build(&mut cabinet);
        let legs: Vec<_> = cabinet
            .all_hardware_items()
            .into_iter()
            .filter(|h| h.kind == HardwareKind::Leg)
            .collect();
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].quantity, 6);
    }

    #[test]
    fn test_stretchers_replace_top() {
        let mut cabinet = Cabinet::new(600.0, 720.0, 560.0).stretchers(StretcherMode::Sink);
        build(&mut cabinet);
        let names = names(&cabinet);
        assert!(!names.contains(&"Top".to_string()));
        assert!(names.contains(&"Front rail".to_string()));
        assert!(names.contains(&"Back rail".to_string()));
    }

    #[test]
    fn test_openable_lookup_and_toggle() {
        let mut cabinet = Cabinet::new(600.0, 720.0, 560.0).drawers(3, 200.0);
        build(&mut cabinet);
        assert_eq!(cabinet.built_drawers().len(), 3);

        let group = cabinet.built_drawers()[1].base().group().unwrap();
        let part = cabinet.openable_mut(group).unwrap();
        part.toggle();
        assert!(part.is_open());
        assert!(cabinet.built_drawers()[1].is_open());
        assert!(!cabinet.built_drawers()[0].is_open());

        cabinet.open_all_drawers(None);
        assert!(cabinet.built_drawers().iter().all(|d| d.is_open()));
        cabinet.close_all_drawers();
        assert!(cabinet.built_drawers().iter().all(|d| !d.is_open()));

        assert!(cabinet.openable_mut(GroupHandle::new()).is_none());
    }

    #[test]
    fn test_validation() {
        assert!(Cabinet::new(600.0, 720.0, 560.0).drawers(3, 200.0).is_valid());

        let too_many = Cabinet::new(600.0, 720.0, 560.0).drawers(4, 200.0);
        assert_eq!(too_many.validate().len(), 1);

        let too_wide = Cabinet::new(600.0, 720.0, 560.0)
            .sections(&[SectionSpec::absolute(400.0), SectionSpec::absolute(400.0)]);
        assert!(matches!(
            too_wide.validate().as_slice(),
            [LayoutError::InvalidSection { .. }]
        ));

        let empty_row = Cabinet::new(600.0, 720.0, 560.0).drawer_row(DrawerRowSpec {
            height: 200.0,
            columns: RowColumns::Count(0),
            options: DrawerOptions::default(),
        });
        assert!(!empty_row.is_valid());

        let flat = Cabinet::new(600.0, 30.0, 560.0);
        assert!(!flat.is_valid());
    }

    #[test]
    fn test_validation_counts_row_shelves() {
        // 414 interior: 200 + 200 rows fit, but not with the shelf between them
        let overflowing = Cabinet::new(800.0, 450.0, 400.0)
            .drawer_row(DrawerRowSpec::count(200.0, 1))
            .drawer_row(DrawerRowSpec::count(200.0, 2));
        assert!(matches!(
            overflowing.validate().as_slice(),
            [LayoutError::InvalidDimensions { .. }]
        ));

        let fitting = Cabinet::new(800.0, 450.0, 400.0)
            .drawer_row(DrawerRowSpec::count(200.0, 1))
            .drawer_row(DrawerRowSpec::count(190.0, 2));
        assert!(fitting.is_valid());

        // Rails leave no top, so the partitioned last row gets a shelf too
        let railed = Cabinet::new(800.0, 450.0, 400.0)
            .stretchers(StretcherMode::Standard)
            .drawer_row(DrawerRowSpec::count(200.0, 1))
            .drawer_row(DrawerRowSpec::count(180.0, 2));
        assert!(!railed.is_valid());
    }

    #[test]
    fn test_from_spec() {
        let json = r#"{
            "name": "Sink",
            "width": 800,
            "height": 820,
            "support": { "type": "legs", "height": 100 },
            "skip": ["back", "nonsense"],
            "stretchers": { "mode": "sink" },
            "sections": ["50%", "50%"],
            "drawers": { "positions": [0, 200] },
            "doors": { "count": 2 }
        }"#;
        let spec: CabinetSpec = serde_json::from_str(json).unwrap();
        let config = BuildConfig::default();
        let cabinet = Cabinet::from_spec(&spec, &config);

        assert_eq!(cabinet.name(), "Sink");
        assert_eq!(cabinet.base().depth, 400.0);
        assert_eq!(cabinet.panel_thickness(), 18.0);
        assert_eq!(cabinet.skipped().len(), 1);
        assert!(!cabinet.has_solid_top());
        assert_eq!(cabinet.section_widths(), vec![373.0, 373.0]);
        assert_eq!(cabinet.envelope().side_height, 720.0);
    }
}
