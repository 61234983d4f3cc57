// Displaced points
//
// Top-level driver. Turns a set of point features into a render-ready set in
// which co-located features are spread on rings around their centroid.
//
// Lifecycle:
// - EMPTY: after construction and after `clear()`
// - POPULATED: after a successful `refresh()`
//
// Every refresh builds a brand new `Snapshot` through `place_groups` (a pure
// function, public as `build_snapshot`) and swaps it in. Nothing from an earlier refresh survives.

use std::fmt;

use crate::config::DisplacementConfig;
use crate::diagnostics::{DiagnosticEvent, DiagnosticHook};
use crate::error::{ConfigurationError, DisplaceError, InputError};
use crate::feature::Feature;
use crate::grouping::{DistanceGrouper, Grouper};
use crate::output::{Snapshot, connector, ring_marker};
use crate::placement::PlacementStrategy;
use crate::viewport::{Resolution, Viewport};

/// Compute the displaced feature set for `features` at `resolution`.
///
/// Single-member groups pass through untouched; every larger group is laid
/// out by `strategy`. Fails on an invalid `cfg` and on any group the grouper
/// returns with a non-point member or a non-finite centroid.
pub fn build_snapshot<G: Grouper + ?Sized>(
    features: &[Feature],
    grouper: &G,
    strategy: &dyn PlacementStrategy,
    cfg: &DisplacementConfig,
    resolution: Resolution,
    hook: Option<&dyn DiagnosticHook>,
) -> Result<Snapshot, DisplaceError> {
    cfg.validate()?;
    Ok(place_groups(features, grouper, strategy, cfg, resolution, hook)?)
}

/// [`build_snapshot`] for an already validated configuration.
fn place_groups<G: Grouper + ?Sized>(
    features: &[Feature],
    grouper: &G,
    strategy: &dyn PlacementStrategy,
    cfg: &DisplacementConfig,
    resolution: Resolution,
    hook: Option<&dyn DiagnosticHook>,
) -> Result<Snapshot, InputError> {
    let tolerance = resolution.to_map_units(cfg.distance);
    if !tolerance.is_finite() {
        return Err(InputError::InvalidResolution(resolution.get()));
    }

    let groups = grouper.group(features, tolerance)?;
    let clearances = cfg.clearances();

    let mut snapshot = Snapshot::default();

    for group in &groups {
        // Grouper output is untrusted
        for member in &group.members {
            member.coordinate()?;
        }

        if group.is_single() {
            snapshot.singles.extend(group.members.iter().map(|f| (*f).clone()));
            continue;
        }

        if !group.centroid.is_finite() {
            return Err(InputError::NonFiniteCentroid { x: group.centroid.x, y: group.centroid.y });
        }

        let placement = strategy.place(group.centroid, clearances, &group.members, resolution)?;

        snapshot.rings.push(ring_marker(
            placement.ring_coordinate,
            placement.ring_radius,
            group.len(),
        ));

        for (member, &position) in group.members.iter().zip(&placement.displaced) {
            if cfg.connectors {
                snapshot.connectors.push(connector(group.centroid, member, position));
            }
            snapshot.displaced.push(member.moved_to(position));
        }

        if let Some(hook) = hook {
            hook.on_event(&DiagnosticEvent::GroupPlaced {
                members: group.len(),
                ring_radius: placement.ring_radius,
            });
        }
    }

    if let Some(hook) = hook {
        hook.on_event(&DiagnosticEvent::Refreshed {
            groups: groups.len(),
            displaced: snapshot.displaced.len(),
            singles: snapshot.singles.len(),
            resolution: resolution.get(),
        });
    }

    Ok(snapshot)
}

/// One-shot displacement with the default grouper, for callers that do not
/// keep a layer around.
pub fn displace(
    features: &[Feature],
    cfg: &DisplacementConfig,
    resolution: f64,
) -> Result<Vec<Feature>, DisplaceError> {
    let mut layer = DisplacedPoints::new(cfg.clone())?;
    layer.refresh(features, &resolution)?;
    Ok(layer.all_features())
}

/// Point displacement over a grouping collaborator.
pub struct DisplacedPoints<G = DistanceGrouper> {
    config: DisplacementConfig,
    strategy: Box<dyn PlacementStrategy>,
    grouper: G,
    hook: Option<Box<dyn DiagnosticHook>>,
    snapshot: Snapshot,
}

impl DisplacedPoints<DistanceGrouper> {
    /// Create a layer grouping with [`DistanceGrouper`].
    pub fn new(config: DisplacementConfig) -> Result<Self, ConfigurationError> {
        Self::with_grouper(config, DistanceGrouper)
    }
}

impl<G: Grouper> DisplacedPoints<G> {
    /// Create a layer with a custom grouping collaborator.
    /// Fails if the configuration is invalid.
    pub fn with_grouper(config: DisplacementConfig, grouper: G) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            strategy: config.placement_method.strategy(),
            config,
            grouper,
            hook: None,
            snapshot: Snapshot::default(),
        })
    }

    /// Attach a diagnostic hook.
    pub fn with_hook(mut self, hook: impl DiagnosticHook + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    pub fn set_hook(&mut self, hook: Option<Box<dyn DiagnosticHook>>) {
        self.hook = hook;
    }

    pub fn config(&self) -> &DisplacementConfig {
        &self.config
    }

    /// Replace the configuration. The published output is cleared since it
    /// was computed under the old one. On error nothing changes.
    pub fn set_config(&mut self, config: DisplacementConfig) -> Result<(), ConfigurationError> {
        config.validate()?;
        self.strategy = config.placement_method.strategy();
        self.config = config;
        self.clear();
        Ok(())
    }

    pub fn strategy(&self) -> &dyn PlacementStrategy {
        self.strategy.as_ref()
    }

    /// Drop all published output. Safe to call in any state.
    pub fn clear(&mut self) {
        self.snapshot = Snapshot::default();
        if let Some(hook) = &self.hook {
            hook.on_event(&DiagnosticEvent::Cleared);
        }
    }

    /// Recompute the output for `features` at the viewport's current resolution.
    ///
    /// The resolution is read once, up front. On error the layer is left empty.
    pub fn refresh<V: Viewport + ?Sized>(
        &mut self,
        features: &[Feature],
        viewport: &V,
    ) -> Result<&Snapshot, InputError> {
        let raw_resolution = viewport.resolution();
        self.clear();

        let resolution = Resolution::new(raw_resolution)?;
        let snapshot = place_groups(
            features,
            &self.grouper,
            self.strategy.as_ref(),
            &self.config,
            resolution,
            self.hook.as_deref(),
        )?;

        self.snapshot = snapshot;
        Ok(&self.snapshot)
    }

    /// Published features in draw order: connectors, rings, singles, displaced.
    pub fn all_features(&self) -> Vec<Feature> {
        self.snapshot.all_features()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}

impl<G: fmt::Debug> fmt::Debug for DisplacedPoints<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplacedPoints")
            .field("config", &self.config)
            .field("strategy", &self.strategy)
            .field("grouper", &self.grouper)
            .field("hook", &self.hook.is_some())
            .field("snapshot", &self.snapshot)
            .finish()
    }
}
