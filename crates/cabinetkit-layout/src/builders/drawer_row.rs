//! Rows of side-by-side drawers
//!
//! Columns in a row are separated by vertical partitions. A shelf goes
//! between two rows only when one of them has partitions to land on, and
//! above the last row when the assembly has no solid top and that row is
//! partitioned.
//!
//! Boxes tile the interior edge to edge. Facades form a second grid over the
//! same outer envelope with a uniform reveal: each facade is stretched over
//! the partitions and shelves behind it, and the x/z offsets handed to each
//! drawer line the two grids up.

use cabinetkit_core::{Context, LayoutError, LayoutResult, PanelPlacement};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BuildOutput, Carcass, DrawerOptions, SkipPart};
use crate::component::Component;
use crate::distribute::{available_between, even_split, proportional_split};
use crate::parts::{Drawer, DrawerParams};
use crate::session::BuildSession;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowColumns {
    /// Equal columns filling the interior width.
    Count(usize),
    /// Explicit column widths.
    Widths(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerRowSpec {
    pub height: f64,
    pub columns: RowColumns,
    #[serde(default)]
    pub options: DrawerOptions,
}

impl DrawerRowSpec {
    pub fn count(height: f64, count: usize) -> Self {
        Self {
            height,
            columns: RowColumns::Count(count),
            options: DrawerOptions::default(),
        }
    }

    pub fn widths(height: f64, widths: Vec<f64>) -> Self {
        Self {
            height,
            columns: RowColumns::Widths(widths),
            options: DrawerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DrawerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn column_count(&self) -> usize {
        match &self.columns {
            RowColumns::Count(n) => *n,
            RowColumns::Widths(widths) => widths.len(),
        }
    }

    /// Column widths inside `inner_width` with partitions of `thickness`.
    pub fn column_widths(&self, inner_width: f64, thickness: f64) -> Vec<f64> {
        match &self.columns {
            RowColumns::Count(n) => even_split(available_between(inner_width, *n, thickness), *n),
            RowColumns::Widths(widths) => widths.clone(),
        }
    }
}

/// Shelves a stack of rows needs.
#[derive(Debug, Clone, PartialEq)]
struct RowShelves {
    /// One flag per gap between consecutive rows.
    between: Vec<bool>,
    /// Shelf above the last row.
    top: bool,
}

impl RowShelves {
    fn plan(rows: &[DrawerRowSpec], has_top: bool) -> Self {
        let partitions: Vec<usize> = rows
            .iter()
            .map(|r| r.column_count().saturating_sub(1))
            .collect();
        let between = partitions.windows(2).map(|w| w[0] > 0 || w[1] > 0).collect();
        let top = !has_top && partitions.last().is_some_and(|&p| p > 0);
        Self { between, top }
    }

    fn count(&self) -> usize {
        self.between.iter().filter(|&&s| s).count() + usize::from(self.top)
    }
}

/// Height the rows occupy once stacked, shelves included.
pub fn stacked_rows_height(rows: &[DrawerRowSpec], thickness: f64, has_top: bool) -> f64 {
    let shelves = RowShelves::plan(rows, has_top).count() as f64;
    rows.iter().map(|r| r.height).sum::<f64>() + shelves * thickness
}

#[derive(Debug, Clone, Default)]
pub struct DrawerRowBuilder {
    rows: Vec<DrawerRowSpec>,
}

impl DrawerRowBuilder {
    pub fn new(rows: Vec<DrawerRowSpec>) -> Self {
        Self { rows }
    }

    pub fn build(
        &self,
        carcass: &Carcass,
        ctx: &Context,
        session: &mut BuildSession<'_>,
    ) -> LayoutResult<BuildOutput> {
        let mut out = BuildOutput::new();
        if self.rows.is_empty() {
            return Ok(out);
        }

        let config = session.config();
        let gap = config.facade_gap;
        let t = carcass.thickness;
        let inner_w = carcass.inner_width();
        let inner_d = carcass.inner_depth();
        let num_rows = self.rows.len();

        let mut columns = Vec::with_capacity(num_rows);
        for (i, row) in self.rows.iter().enumerate() {
            if row.column_count() == 0 {
                return Err(LayoutError::MissingConfiguration(format!(
                    "drawer row {} of '{}' has no columns",
                    i + 1,
                    carcass.name
                )));
            }
            columns.push(row.column_widths(inner_w, t));
        }

        let RowShelves {
            between: shelf_between,
            top: top_shelf,
        } = RowShelves::plan(&self.rows, carcass.has_part(SkipPart::Top));

        // Facades cover the rows and the shelves between them, not the one on top.
        let row_heights: Vec<f64> = self.rows.iter().map(|r| r.height).collect();
        let shelves = shelf_between.iter().filter(|&&s| s).count() as f64;
        let total_height = row_heights.iter().sum::<f64>() + shelves * t;
        let facade_heights = proportional_split(&row_heights, total_height - num_rows as f64 * gap);

        let mut facade_z_offsets = Vec::with_capacity(num_rows);
        let mut box_z = 0.0;
        let mut facade_z = 0.0;
        for i in 0..num_rows {
            facade_z_offsets.push(box_z - facade_z);
            facade_z += facade_heights[i] + gap;
            box_z += row_heights[i];
            if i < num_rows - 1 && shelf_between[i] {
                box_z += t;
            }
        }

        let start_z = if carcass.has_part(SkipPart::Bottom) {
            carcass.interior_base()
        } else {
            carcass.support.bottom_z()
        };
        let parent = ctx.parent();
        let mut current_z = 0.0;

        for (row_i, row) in self.rows.iter().enumerate() {
            let widths = &columns[row_i];
            let count = widths.len();
            let facade_widths = proportional_split(widths, carcass.width - count as f64 * gap);

            let mut facade_x_offsets = Vec::with_capacity(count);
            let mut box_x = t;
            let mut facade_x = gap / 2.0;
            for (col, width) in widths.iter().enumerate() {
                facade_x_offsets.push(box_x - facade_x);
                box_x += width;
                facade_x += facade_widths[col];
                if col < count - 1 {
                    box_x += t;
                    facade_x += gap;
                }
            }

            let mut current_x = 0.0;
            for (col, width) in widths.iter().enumerate() {
                let mut params = DrawerParams::new(
                    format!("{} drawer {}-{}", carcass.name, row_i + 1, col + 1),
                    row.height,
                    *width,
                    inner_d,
                    config,
                );
                row.options.apply(&mut params);
                params.facade_width = Some(facade_widths[col]);
                params.facade_height = Some(facade_heights[row_i]);
                params.facade_x_offset = facade_x_offsets[col];
                params.facade_z_offset = facade_z_offsets[row_i];

                let mut drawer = Drawer::new(params, session.catalog())?;
                let drawer_ctx = ctx.offset(t + current_x, 0.0, start_z + current_z);
                drawer.build(&drawer_ctx, session)?;
                out.cut_items.extend(drawer.all_cut_items());
                out.hardware_items.extend(drawer.all_hardware_items());
                out.drawers.push(drawer);

                current_x += width;

                if col < count - 1 {
                    let name = format!("Drawer partition {}-{}", row_i + 1, col + 1);
                    let panel = PanelPlacement::side(
                        name.clone(),
                        Point3::new(ctx.x() + t + current_x, ctx.y(), ctx.z() + start_z + current_z),
                        row.height,
                        inner_d,
                        t,
                    );
                    session.place(parent, &panel);
                    out.cut_items.push(carcass.panel_cut(name, row.height, inner_d));
                    current_x += t;
                }
            }

            current_z += row.height;

            let needs_shelf = if row_i < num_rows - 1 {
                shelf_between[row_i]
            } else {
                top_shelf
            };
            if needs_shelf {
                let name = format!("Drawer shelf {}", row_i + 1);
                let panel = PanelPlacement::horizontal(
                    name.clone(),
                    Point3::new(ctx.x() + t, ctx.y(), ctx.z() + start_z + current_z),
                    inner_w,
                    inner_d,
                    t,
                );
                session.place(parent, &panel);
                out.cut_items.push(carcass.panel_cut(name, inner_w, inner_d));
                current_z += t;
            }
        }

        debug!(
            "Built {} drawer rows ({} drawers) in '{}'",
            num_rows,
            out.drawers.len(),
            carcass.name
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::testing::carcass;
    use crate::support::Support;
    use cabinetkit_core::RecordingSink;
    use cabinetkit_settings::BuildConfig;

    fn build(rows: Vec<DrawerRowSpec>, carcass: &Carcass) -> LayoutResult<(BuildOutput, RecordingSink)> {
        let mut sink = RecordingSink::new();
        let config = BuildConfig::default();
        let mut session = BuildSession::new(&mut sink, &config);
        let out = DrawerRowBuilder::new(rows).build(carcass, &Context::new(), &mut session)?;
        drop(session);
        Ok((out, sink))
    }

    fn named<'a>(out: &'a BuildOutput, prefix: &str) -> Vec<&'a str> {
        out.cut_items
            .iter()
            .filter(|i| i.name.starts_with(prefix))
            .map(|i| i.name.as_str())
            .collect()
    }

    #[test]
    fn test_partitions_per_row() {
        let c = carcass(Support::Flush);
        let (out, _) = build(
            vec![DrawerRowSpec::count(150.0, 1), DrawerRowSpec::count(150.0, 3)],
            &c,
        )
        .unwrap();

        assert_eq!(
            named(&out, "Drawer partition"),
            vec!["Drawer partition 2-1", "Drawer partition 2-2"]
        );
        assert_eq!(named(&out, "Drawer shelf"), vec!["Drawer shelf 1"]);
        assert_eq!(out.drawers.len(), 4);
    }

    #[test]
    fn test_no_shelf_between_single_columns() {
        let c = carcass(Support::Flush);
        let (out, _) = build(
            vec![DrawerRowSpec::count(150.0, 1), DrawerRowSpec::count(150.0, 1)],
            &c,
        )
        .unwrap();
        assert!(named(&out, "Drawer shelf").is_empty());
        assert!(named(&out, "Drawer partition").is_empty());
    }

    #[test]
    fn test_facade_grid() {
        let c = carcass(Support::Flush);
        let (out, sink) = build(
            vec![DrawerRowSpec::count(150.0, 1), DrawerRowSpec::count(150.0, 3)],
            &c,
        )
        .unwrap();

        // 300 + 18 shelf - 2 gaps
        let heights: Vec<f64> = out.drawers.iter().map(|d| d.facade_height()).collect();
        assert_eq!(heights, vec![156.0, 156.0, 156.0, 156.0]);

        // 728 split 242/242/244, facades share 800 - 3·3
        let widths: Vec<f64> = out.drawers[1..].iter().map(|d| d.facade_width()).collect();
        assert_eq!(widths, vec![263.0, 263.0, 265.0]);
        assert_eq!(widths.iter().sum::<f64>() + 9.0, 800.0);

        let offsets: Vec<(f64, f64)> = out.drawers[1..].iter().map(|d| d.facade_offsets()).collect();
        assert_eq!(offsets, vec![(16.5, 9.0), (10.5, 9.0), (4.5, 9.0)]);

        let shelf = sink.panels_labelled("Drawer shelf 1")[0];
        assert_eq!(shelf.placement.origin.z, 18.0 + 150.0);
        let partition = sink.panels_labelled("Drawer partition 2-1")[0];
        assert_eq!(partition.placement.origin, Point3::new(18.0 + 242.0, 0.0, 186.0));
    }

    #[test]
    fn test_shelf_above_last_row_without_top() {
        let mut c = carcass(Support::Flush);
        c.skip.insert(SkipPart::Top);
        let (out, _) = build(vec![DrawerRowSpec::count(150.0, 2)], &c).unwrap();
        assert_eq!(named(&out, "Drawer shelf"), vec!["Drawer shelf 1"]);
    }

    #[test]
    fn test_stacked_height_counts_shelves() {
        let rows = vec![DrawerRowSpec::count(200.0, 1), DrawerRowSpec::count(200.0, 2)];
        assert_eq!(stacked_rows_height(&rows, 18.0, true), 418.0);
        // Shelf over the partitioned last row when there is no top
        assert_eq!(stacked_rows_height(&rows, 18.0, false), 436.0);

        let single = vec![DrawerRowSpec::count(200.0, 1), DrawerRowSpec::count(150.0, 1)];
        assert_eq!(stacked_rows_height(&single, 18.0, false), 350.0);
        assert_eq!(stacked_rows_height(&[], 18.0, true), 0.0);
    }

    #[test]
    fn test_stacked_height_matches_built_partitions() {
        let c = carcass(Support::Flush);
        let rows = vec![DrawerRowSpec::count(200.0, 1), DrawerRowSpec::count(200.0, 2)];
        let (_, sink) = build(rows.clone(), &c).unwrap();

        let partition = sink.panels_labelled("Drawer partition 2-1")[0];
        let reach = partition.placement.origin.z + 200.0;
        assert_eq!(reach, c.interior_base() + stacked_rows_height(&rows, 18.0, true));
        assert!(reach > c.interior_base() + c.interior_height());
    }

    #[test]
    fn test_explicit_widths() {
        let c = carcass(Support::Flush);
        let (out, _) = build(vec![DrawerRowSpec::widths(150.0, vec![300.0, 446.0])], &c).unwrap();
        assert_eq!(out.drawers[0].base().width, 300.0);
        assert_eq!(out.drawers[1].base().width, 446.0);
        assert_eq!(out.drawers[1].base().context().map(|ctx| ctx.x()), Some(18.0 + 300.0 + 18.0));
    }

    #[test]
    fn test_zero_columns_is_an_error() {
        let c = carcass(Support::Flush);
        let err = build(vec![DrawerRowSpec::count(150.0, 0)], &c).err();
        assert!(matches!(err, Some(LayoutError::MissingConfiguration(_))));
    }
}
