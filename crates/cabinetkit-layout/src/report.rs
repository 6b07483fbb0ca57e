//! Grouped cut and hardware lists
//!
//! Both lists keep groups in the order their first member was seen.

use cabinetkit_core::{CutGroupKey, CutItem, HardwareGroupKey, HardwareItem, HardwareKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::component::Component;

/// Identical panels tallied under one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutGroup {
    pub item: CutItem,
    pub quantity: u32,
}

impl CutGroup {
    /// Area of every panel in the group, in m².
    pub fn area(&self) -> f64 {
        self.item.area() * f64::from(self.quantity)
    }

    pub fn edge_length(&self) -> f64 {
        self.item.edge_length() * f64::from(self.quantity)
    }
}

/// Panels cut from one sheet material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSummary {
    pub material: String,
    pub thickness: f64,
    pub parts: u32,
    /// m²
    pub area: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CutList {
    groups: Vec<CutGroup>,
}

impl CutList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: impl IntoIterator<Item = CutItem>) -> Self {
        let mut list = Self::new();
        list.add(items);
        list
    }

    pub fn from_component(component: &dyn Component) -> Self {
        Self::from_items(component.all_cut_items())
    }

    pub fn add(&mut self, items: impl IntoIterator<Item = CutItem>) {
        let mut index: HashMap<CutGroupKey, usize> = self
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.item.group_key(), i))
            .collect();

        for item in items {
            let key = item.group_key();
            match index.get(&key) {
                Some(&i) => self.groups[i].quantity += item.quantity,
                None => {
                    index.insert(key, self.groups.len());
                    let quantity = item.quantity;
                    self.groups.push(CutGroup { item, quantity });
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn groups(&self) -> &[CutGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of panels, counting duplicates.
    pub fn part_count(&self) -> u32 {
        self.groups.iter().map(|g| g.quantity).sum()
    }

    /// Part count and area per material and thickness, in first-seen order.
    pub fn by_material(&self) -> Vec<MaterialSummary> {
        let mut summaries: Vec<MaterialSummary> = Vec::new();
        for group in &self.groups {
            let item = &group.item;
            let existing = summaries
                .iter_mut()
                .find(|s| s.material == item.material && s.thickness == item.thickness);
            match existing {
                Some(summary) => {
                    summary.parts += group.quantity;
                    summary.area += group.area();
                }
                None => summaries.push(MaterialSummary {
                    material: item.material.clone(),
                    thickness: item.thickness,
                    parts: group.quantity,
                    area: group.area(),
                }),
            }
        }
        summaries
    }

    pub fn total_area(&self) -> f64 {
        self.groups.iter().map(CutGroup::area).sum()
    }

    /// Banded edge over all panels, in metres.
    pub fn total_edge_length(&self) -> f64 {
        self.groups.iter().map(CutGroup::edge_length).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareGroup {
    pub item: HardwareItem,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardwareList {
    groups: Vec<HardwareGroup>,
}

impl HardwareList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: impl IntoIterator<Item = HardwareItem>) -> Self {
        let mut list = Self::new();
        list.add(items);
        list
    }

    pub fn from_component(component: &dyn Component) -> Self {
        Self::from_items(component.all_hardware_items())
    }

    pub fn add(&mut self, items: impl IntoIterator<Item = HardwareItem>) {
        let mut index: HashMap<HardwareGroupKey, usize> = self
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.item.group_key(), i))
            .collect();

        for item in items {
            let key = item.group_key();
            match index.get(&key) {
                Some(&i) => self.groups[i].quantity += item.quantity,
                None => {
                    index.insert(key, self.groups.len());
                    let quantity = item.quantity;
                    self.groups.push(HardwareGroup { item, quantity });
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn groups(&self) -> &[HardwareGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn totals_by_kind(&self) -> BTreeMap<HardwareKind, u32> {
        let mut totals = BTreeMap::new();
        for group in &self.groups {
            *totals.entry(group.item.kind).or_insert(0) += group.quantity;
        }
        totals
    }

    pub fn total_of(&self, kind: HardwareKind) -> u32 {
        self.groups
            .iter()
            .filter(|g| g.item.kind == kind)
            .map(|g| g.quantity)
            .sum()
    }
}

/// Both lists for one built component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub cut_list: CutList,
    pub materials: Vec<MaterialSummary>,
    pub total_edge_length: f64,
    pub hardware: HardwareList,
    pub hardware_totals: BTreeMap<HardwareKind, u32>,
}

impl Report {
    pub fn from_component(component: &dyn Component) -> Self {
        let base = component.base();
        let cut_list = CutList::from_component(component);
        let hardware = HardwareList::from_component(component);
        Self {
            name: base.name.clone(),
            width: base.width,
            height: base.height,
            depth: base.depth,
            materials: cut_list.by_material(),
            total_edge_length: cut_list.total_edge_length(),
            hardware_totals: hardware.totals_by_kind(),
            cut_list,
            hardware,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabinetkit_core::EdgeBanding;

    fn panel(name: &str, l: f64, w: f64, material: &str) -> CutItem {
        CutItem::new(name, l, w, 18.0, material).owned_by("Base")
    }

    #[test]
    fn test_identical_panels_are_tallied() {
        let list = CutList::from_items(vec![
            panel("Side", 720.0, 560.0, "Chipboard"),
            panel("Bottom", 564.0, 556.0, "Chipboard"),
            panel("Side", 560.0, 720.0, "Chipboard"),
        ]);

        assert_eq!(list.groups().len(), 2);
        assert_eq!(list.groups()[0].item.name, "Side");
        assert_eq!(list.groups()[0].quantity, 2);
        assert_eq!(list.part_count(), 3);
    }

    #[test]
    fn test_owner_separates_groups() {
        let list = CutList::from_items(vec![
            panel("Side", 720.0, 560.0, "Chipboard"),
            panel("Side", 720.0, 560.0, "Chipboard").owned_by("Tall"),
        ]);
        assert_eq!(list.groups().len(), 2);
    }

    #[test]
    fn test_material_summary_and_edges() {
        let list = CutList::from_items(vec![
            panel("Side", 1000.0, 500.0, "Chipboard").with_edges(EdgeBanding::front_only(2.0)),
            panel("Side", 1000.0, 500.0, "Chipboard").with_edges(EdgeBanding::front_only(2.0)),
            CutItem::new("Back", 1000.0, 1000.0, 4.0, "Hardboard"),
        ]);

        let summary = list.by_material();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].material, "Chipboard");
        assert_eq!(summary[0].parts, 2);
        assert!((summary[0].area - 1.0).abs() < 1e-9);
        assert_eq!(summary[1].thickness, 4.0);
        assert!((list.total_edge_length() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_hardware_sums_quantities() {
        let list = HardwareList::from_items(vec![
            HardwareItem::new(HardwareKind::ShelfSupport, 4).owned_by("A"),
            HardwareItem::new(HardwareKind::Leg, 4).named("Adjustable leg 100mm"),
            HardwareItem::new(HardwareKind::ShelfSupport, 4).owned_by("B"),
            HardwareItem::new(HardwareKind::Leg, 6).named("Adjustable leg 100mm"),
        ]);

        assert_eq!(list.groups().len(), 2);
        assert_eq!(list.groups()[0].quantity, 8);
        assert_eq!(list.total_of(HardwareKind::Leg), 10);
        assert_eq!(list.totals_by_kind().get(&HardwareKind::ShelfSupport), Some(&8));
    }

    #[test]
    fn test_specs_split_groups() {
        let list = HardwareList::from_items(vec![
            HardwareItem::new(HardwareKind::Slide, 1).with_spec("length", 350),
            HardwareItem::new(HardwareKind::Slide, 1).with_spec("length", 400),
        ]);
        assert_eq!(list.groups().len(), 2);
        assert_eq!(list.total_of(HardwareKind::Slide), 2);
    }
}
