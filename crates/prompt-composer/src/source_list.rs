//! Source List
//!
//! The grouped, static collection of draggable items with per-group
//! expand/collapse state.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::component::Component;
use crate::config::{GroupDescriptor, HostConfig};
use crate::error::ComposeResult;
use crate::lifecycle::{ComponentState, Lifecycle};
use crate::model::{DragPayload, ItemDescriptor};
use crate::surface::{GroupContent, GroupView, ItemView, SourceListView, SurfaceRef};

const COMPONENT: &str = "SourceList";

pub struct SourceList {
    lifecycle: Lifecycle,
    groups: Vec<GroupDescriptor>,
    /// Expanded flag per group label
    group_states: BTreeMap<String, bool>,
    surface: Option<SurfaceRef>,
}

impl Default for SourceList {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceList {
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::new(COMPONENT),
            groups: Vec::new(),
            group_states: BTreeMap::new(),
            surface: None,
        }
    }

    pub fn groups(&self) -> &[GroupDescriptor] {
        &self.groups
    }

    pub fn is_expanded(&self, label: &str) -> Option<bool> {
        self.group_states.get(label).copied()
    }

    /// Flip a group and redraw. Returns the new state, `None` for an unknown
    /// label.
    pub fn toggle_group(&mut self, label: &str) -> Option<bool> {
        let expanded = self.group_states.get_mut(label)?;
        *expanded = !*expanded;
        let expanded = *expanded;
        tracing::info!(
            component = COMPONENT,
            group = label,
            "toggled group {}",
            if expanded { "expanded" } else { "collapsed" }
        );

        if let Some(surface) = &self.surface {
            surface.draw_source_list(self.view());
        }
        Some(expanded)
    }

    pub fn item(&self, group_index: usize, item_index: usize) -> Option<&ItemDescriptor> {
        self.groups.get(group_index)?.buttons.get(item_index)
    }

    /// Snapshot an item for a drag session
    pub fn payload_for(&self, group_index: usize, item_index: usize) -> Option<DragPayload> {
        let item = self.item(group_index, item_index)?;
        let offset: usize = self.groups[..group_index]
            .iter()
            .map(|g| g.buttons.len())
            .sum();
        Some(DragPayload::new(item, offset + item_index))
    }

    /// View model reflecting the current group states
    pub fn view(&self) -> SourceListView {
        if self.groups.is_empty() {
            return SourceListView::Empty;
        }

        let groups = self
            .groups
            .iter()
            .enumerate()
            .map(|(group_index, group)| {
                let expanded = self
                    .group_states
                    .get(&group.group_label)
                    .copied()
                    .unwrap_or(group.default_expanded);

                let content = if !expanded {
                    GroupContent::Collapsed
                } else if group.buttons.is_empty() {
                    GroupContent::NoItems
                } else {
                    GroupContent::Items(
                        group
                            .buttons
                            .iter()
                            .enumerate()
                            .map(|(item_index, item)| ItemView {
                                label: item.label.clone(),
                                group_index,
                                item_index,
                            })
                            .collect(),
                    )
                };

                GroupView {
                    label: group.group_label.clone(),
                    icon: group.group_icon.clone(),
                    expanded,
                    content,
                }
            })
            .collect();

        SourceListView::Groups(groups)
    }
}

#[async_trait(?Send)]
impl Component for SourceList {
    fn name(&self) -> &'static str {
        COMPONENT
    }

    fn state(&self) -> ComponentState {
        self.lifecycle.state()
    }

    async fn initialize(&mut self, config: &HostConfig) -> ComposeResult<()> {
        self.lifecycle.transition(ComponentState::Initializing)?;

        self.groups = config.button_groups.clone();
        self.group_states = self
            .groups
            .iter()
            .map(|g| (g.group_label.clone(), g.default_expanded))
            .collect();

        tracing::info!(component = COMPONENT, groups = self.groups.len(), "initialized");
        self.lifecycle.transition(ComponentState::Ready)
    }

    fn render(&mut self, surface: &SurfaceRef) -> ComposeResult<()> {
        self.lifecycle.transition(ComponentState::Rendered)?;
        self.surface = Some(surface.clone());
        let view = self.view();
        if view == SourceListView::Empty {
            tracing::warn!(component = COMPONENT, "no button groups configured, showing placeholder");
        }
        surface.draw_source_list(view);
        Ok(())
    }

    fn destroy(&mut self) {
        if self.lifecycle.state() == ComponentState::Destroyed {
            return;
        }
        self.surface = None;
        self.groups.clear();
        self.group_states.clear();
        let _ = self.lifecycle.transition(ComponentState::Destroyed);
        tracing::info!(component = COMPONENT, "destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{block_on, cars_config, RecordingSurface};
    use serde_json::json;

    fn ready_list(config: &HostConfig) -> SourceList {
        let mut list = SourceList::new();
        block_on(list.initialize(config)).unwrap();
        list
    }

    #[test]
    fn test_initialize_reads_default_states() {
        let config = HostConfig::from_value(&json!({
            "buttonGroups": [
                { "groupLabel": "Cars", "buttons": [{ "label": "Audi" }] },
                { "groupLabel": "Fruit", "defaultExpanded": false, "buttons": [] }
            ]
        }));
        let list = ready_list(&config);

        assert_eq!(list.state(), ComponentState::Ready);
        assert_eq!(list.is_expanded("Cars"), Some(true));
        assert_eq!(list.is_expanded("Fruit"), Some(false));
        assert_eq!(list.is_expanded("Boats"), None);
    }

    #[test]
    fn test_group_icon_markup_is_kept_verbatim() {
        let markup = r#"<svg viewBox="0 0 16 16"><path d="M2 2h12v12H2z"/></svg>"#;
        let config = HostConfig::from_value(&json!({
            "buttonGroups": [{ "groupLabel": "Cars", "groupIcon": markup, "buttons": [] }]
        }));
        let mut list = ready_list(&config);
        let surface = RecordingSurface::new();
        list.render(&surface.handle()).unwrap();

        let SourceListView::Groups(groups) = surface.last_source_list().unwrap() else {
            panic!("expected groups");
        };
        assert_eq!(groups[0].icon.as_deref(), Some(markup));
    }

    #[test]
    fn test_render_reflects_group_states() {
        let config = HostConfig::from_value(&json!({
            "buttonGroups": [
                { "groupLabel": "Cars", "groupIcon": "<svg/>", "buttons": [{ "label": "Audi" }, { "label": "BMW" }] },
                { "groupLabel": "Empty" },
                { "groupLabel": "Fruit", "defaultExpanded": false, "buttons": [{ "label": "Apple" }] }
            ]
        }));
        let mut list = ready_list(&config);
        let surface = RecordingSurface::new();
        list.render(&surface.handle()).unwrap();

        let SourceListView::Groups(groups) = surface.last_source_list().unwrap() else {
            panic!("expected groups");
        };
        assert_eq!(groups[0].icon.as_deref(), Some("<svg/>"));
        match &groups[0].content {
            GroupContent::Items(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[1].label, "BMW");
                assert_eq!((items[1].group_index, items[1].item_index), (0, 1));
            }
            other => panic!("unexpected content {:?}", other),
        }
        assert_eq!(groups[1].content, GroupContent::NoItems);
        assert_eq!(groups[2].content, GroupContent::Collapsed);
    }

    #[test]
    fn test_toggle_flips_and_redraws() {
        let mut list = ready_list(&cars_config());
        let surface = RecordingSurface::new();
        list.render(&surface.handle()).unwrap();
        assert_eq!(surface.source_list_draws(), 1);

        assert_eq!(list.toggle_group("Cars"), Some(false));
        assert_eq!(surface.source_list_draws(), 2);
        let SourceListView::Groups(groups) = surface.last_source_list().unwrap() else {
            panic!("expected groups");
        };
        assert_eq!(groups[0].content, GroupContent::Collapsed);

        assert_eq!(list.toggle_group("Cars"), Some(true));
        assert_eq!(list.toggle_group("Nope"), None);
        assert_eq!(surface.source_list_draws(), 3);
    }

    #[test]
    fn test_toggle_before_render_only_flips() {
        let mut list = ready_list(&cars_config());
        assert_eq!(list.toggle_group("Cars"), Some(false));
        assert_eq!(list.is_expanded("Cars"), Some(false));
    }

    #[test]
    fn test_empty_config_renders_placeholder() {
        let mut list = ready_list(&HostConfig::from_value(&json!({ "buttonGroups": "broken" })));
        let surface = RecordingSurface::new();
        list.render(&surface.handle()).unwrap();
        assert_eq!(surface.last_source_list(), Some(SourceListView::Empty));
    }

    #[test]
    fn test_payload_uses_flat_index() {
        let config = HostConfig::from_value(&json!({
            "buttonGroups": [
                { "groupLabel": "Cars", "buttons": [{ "label": "Audi" }, { "label": "BMW" }] },
                { "groupLabel": "Fruit", "buttons": [{ "label": "Apple", "paramName": "P_Fruit" }] }
            ]
        }));
        let list = ready_list(&config);

        let payload = list.payload_for(1, 0).unwrap();
        assert_eq!(payload.key(), "Apple");
        assert_eq!(payload.source_index, 2);
        assert_eq!(payload.item.group_label, "Fruit");
        assert!(list.payload_for(1, 1).is_none());
        assert!(list.payload_for(5, 0).is_none());
    }

    #[test]
    fn test_render_before_initialize_is_rejected() {
        let mut list = SourceList::new();
        let surface = RecordingSurface::new();
        assert!(list.render(&surface.handle()).is_err());
        assert_eq!(surface.source_list_draws(), 0);
    }

    #[test]
    fn test_destroy_twice() {
        let mut list = ready_list(&cars_config());
        list.destroy();
        list.destroy();
        assert_eq!(list.state(), ComponentState::Destroyed);
        assert!(list.groups().is_empty());
    }
}
