use serde::Serialize;
use tracing::{debug, info};

use crate::config::StyleConfig;
use crate::join::{original_style, JoinedMap, RegionViewModel};
use crate::map::FeatureId;
use crate::session::{Effect, Filter};
use crate::style::RegionStyle;

/// Interaction state of one region. `FilteredOut` wins over `Highlighted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionState {
    #[default]
    Normal,
    Highlighted,
    FilteredOut,
}

/// Interactive state of a joined map: current filter, per-region style and state,
/// side-panel content and draw order.
///
/// All transitions run to completion and return the effects the renderer must apply.
/// The resting style of every region is kept on its view model, so a highlight or a
/// filter can always be undone exactly.
#[derive(Debug, Clone)]
pub struct Session {
    map: JoinedMap,
    config: StyleConfig,
    filter: Filter,
    states: Vec<RegionState>,
    styles: Vec<RegionStyle>,
    draw_order: Vec<FeatureId>,
    panel: String,
    hovered: Option<FeatureId>,
}

impl Session {
    /// Start a session showing every region in its resting style.
    pub fn new(map: JoinedMap, config: StyleConfig) -> Self {
        let mut session = Self {
            map: JoinedMap::default(),
            panel: config.panel_placeholder.clone(),
            config,
            filter: Filter::All,
            states: Vec::new(),
            styles: Vec::new(),
            draw_order: Vec::new(),
            hovered: None,
        };
        session.install(map);
        session
    }

    /// Swap in the result of a newer load. The current filter is re-applied to the new
    /// regions; hover state and draw order start over.
    pub fn replace(&mut self, map: JoinedMap) -> Vec<Effect> {
        info!(regions = map.len(), filter = %self.filter, "replacing session data");
        self.install(map);
        let mut effects = self.apply_filter();
        effects.extend(
            self.map.regions().iter()
                .filter(|region| !region.matched)
                .map(|region| Effect::SetStyle { id: region.id, style: region.original_style }),
        );
        effects.push(Effect::SidePanel { content: self.panel.clone() });
        effects
    }

    /// Effects that draw the whole current state from scratch.
    pub fn snapshot(&self) -> Vec<Effect> {
        let mut effects = self.draw_order.iter()
            .map(|&id| Effect::SetStyle { id, style: self.styles[id.index()] })
            .collect::<Vec<_>>();
        effects.push(Effect::SidePanel { content: self.panel.clone() });
        effects
    }

    /// Select a party filter. Every matched region gets a freshly computed resting style,
    /// shown when its winner passes the filter and hidden (transparent fill) otherwise.
    pub fn set_filter(&mut self, filter: Filter) -> Vec<Effect> {
        debug!(filter = %filter, "filter changed");
        self.filter = filter;
        self.apply_filter()
    }

    /// Pointer entered a region: highlight it, raise it and show its popup in the side
    /// panel. Ignored for unmatched regions and regions hidden by the filter.
    pub fn hover_enter(&mut self, id: FeatureId) -> Vec<Effect> {
        let Some(region) = self.active_region(id) else { return Vec::new() };
        if !self.filter.admits(&region.winner) { return Vec::new() }

        let style = self.config.highlight(region.original_style);
        let content = region.popup.clone().unwrap_or_default();

        self.set(id, RegionState::Highlighted, style);
        self.bring_to_front(id);
        self.panel = content.clone();
        self.hovered = Some(id);

        vec![
            Effect::SetStyle { id, style },
            Effect::BringToFront { id },
            Effect::SidePanel { content },
        ]
    }

    /// Pointer left a region: restore its resting style if the filter still admits it,
    /// keep it hidden otherwise, and reset the side panel.
    pub fn hover_exit(&mut self, id: FeatureId) -> Vec<Effect> {
        let Some(region) = self.active_region(id) else { return Vec::new() };

        let (state, style) = if self.filter.admits(&region.winner) {
            (RegionState::Normal, region.original_style)
        } else {
            (RegionState::FilteredOut, region.original_style.hidden())
        };

        self.set(id, state, style);
        self.panel = self.config.panel_placeholder.clone();
        if self.hovered == Some(id) {
            self.hovered = None;
        }

        vec![
            Effect::SetStyle { id, style },
            Effect::SidePanel { content: self.panel.clone() },
        ]
    }

    /// Region clicked: frame the viewport on it. No style change.
    pub fn click(&self, id: FeatureId) -> Vec<Effect> {
        match self.map.get(id).and_then(|region| region.extent) {
            Some(extent) => vec![Effect::FitBounds { extent }],
            None => {
                debug!(feature = %id, "click on a feature without extent");
                Vec::new()
            }
        }
    }

    #[inline] pub fn map(&self) -> &JoinedMap { &self.map }

    #[inline] pub fn config(&self) -> &StyleConfig { &self.config }

    #[inline] pub fn filter(&self) -> &Filter { &self.filter }

    /// Current side-panel content.
    #[inline] pub fn panel(&self) -> &str { &self.panel }

    /// Region under the pointer, if it is highlighted.
    #[inline] pub fn hovered(&self) -> Option<FeatureId> { self.hovered }

    pub fn region(&self, id: FeatureId) -> Option<&RegionViewModel> { self.map.get(id) }

    /// Style currently applied to a region.
    pub fn style(&self, id: FeatureId) -> Option<RegionStyle> { self.styles.get(id.index()).copied() }

    pub fn state(&self, id: FeatureId) -> Option<RegionState> { self.states.get(id.index()).copied() }

    /// Regions in paint order, bottom first.
    pub fn draw_order(&self) -> &[FeatureId] { &self.draw_order }

    fn install(&mut self, map: JoinedMap) {
        self.states = vec![RegionState::Normal; map.len()];
        self.styles = map.regions().iter().map(|region| region.original_style).collect();
        self.draw_order = map.regions().iter().map(|region| region.id).collect();
        self.panel = self.config.panel_placeholder.clone();
        self.hovered = None;
        self.map = map;
    }

    fn apply_filter(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        let mut visible = 0usize;

        for i in 0..self.map.len() {
            let id = FeatureId(i as u32);
            let region = &mut self.map.regions_mut()[i];
            if !region.matched { continue }

            region.original_style = original_style(&region.winner, region.winner_percentage, &self.config);
            let (state, style) = if self.filter.admits(&region.winner) {
                visible += 1;
                (RegionState::Normal, region.original_style)
            } else {
                (RegionState::FilteredOut, region.original_style.hidden())
            };

            self.set(id, state, style);
            effects.push(Effect::SetStyle { id, style });
        }

        // Re-styling drops any highlight.
        self.hovered = None;
        debug!(filter = %self.filter, visible, "filter applied");
        effects
    }

    /// A matched region, or `None` (logged) for unknown handles and unmatched features.
    fn active_region(&self, id: FeatureId) -> Option<&RegionViewModel> {
        match self.map.get(id) {
            Some(region) if region.matched => Some(region),
            Some(_) => None,
            None => {
                debug!(feature = %id, "event for unknown feature");
                None
            }
        }
    }

    fn set(&mut self, id: FeatureId, state: RegionState, style: RegionStyle) {
        self.states[id.index()] = state;
        self.styles[id.index()] = style;
    }

    fn bring_to_front(&mut self, id: FeatureId) {
        if let Some(pos) = self.draw_order.iter().position(|&other| other == id) {
            self.draw_order.remove(pos);
            self.draw_order.push(id);
        }
    }
}
