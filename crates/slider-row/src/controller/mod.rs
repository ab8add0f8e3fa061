//! Kind-specific controllers and the per-row binding around them.
//!
//! An [`EntityController`] is a stateless strategy for one entity kind: it
//! knows which attribute holds the value, the range, how to encode a write and
//! what "off" looks like. A [`Controller`] binds one of those to an entity id,
//! the row's range overrides and the latest state snapshot.

mod climate;
mod cover;
mod fan;
mod humidifier;
mod light;
mod media_player;
mod number;
mod range;
mod registry;
mod select;
mod switch;

use std::sync::LazyLock;

pub use range::{Range, RangeOverride};
pub use registry::{EntityKind, resolve};

use crate::command::ServiceCall;
use crate::config::RowConfig;
use crate::entity::{EntityId, StateSnapshot};
use crate::error::ConfigError;

/// Kind-specific translation between a state snapshot and a slider value.
pub trait EntityController: std::fmt::Debug {
    fn kind(&self) -> EntityKind;

    /// The kind's range, possibly derived from the snapshot's attributes.
    fn range(&self, state: &StateSnapshot) -> Range;

    /// Decode the raw value. `None` when the attribute is absent or unusable;
    /// the caller clamps and falls back, so this never has to.
    fn decode(&self, state: &StateSnapshot) -> Option<f64>;

    /// Encode an already clamped and quantized value into a write request.
    fn encode(&self, entity: &EntityId, value: f64, state: &StateSnapshot) -> ServiceCall;

    /// The state token that means "off" for this kind, if the kind has one.
    fn off_state(&self) -> Option<&'static str> {
        Some("off")
    }

    fn has_slider(&self) -> bool {
        true
    }

    fn has_toggle(&self) -> bool {
        true
    }

    /// Human-facing text for `value`. `None` shows the raw state token.
    fn format(&self, value: f64, range: &Range, state: &StateSnapshot) -> Option<String>;
}

static NO_STATE: LazyLock<StateSnapshot> = LazyLock::new(|| StateSnapshot::new(""));

/// One row's controller: a kind strategy bound to an entity and its state.
///
/// Created when the row is configured; [`Controller::bind`] refreshes the
/// snapshot on every render pass without rebuilding anything.
#[derive(Debug)]
pub struct Controller {
    entity: EntityId,
    strategy: Box<dyn EntityController>,
    overrides: RangeOverride,
    snapshot: Option<StateSnapshot>,
    /// Value requested by the user, shown until a new snapshot arrives.
    optimistic: Option<f64>,
}

impl Controller {
    pub fn new(
        entity: EntityId,
        strategy: Box<dyn EntityController>,
        overrides: RangeOverride,
    ) -> Self {
        Self {
            entity,
            strategy,
            overrides,
            snapshot: None,
            optimistic: None,
        }
    }

    /// Resolve the configured entity's kind and build its controller.
    pub fn from_config(config: &RowConfig) -> Result<Self, ConfigError> {
        let entity = EntityId::parse(config.entity()?)?;
        let (kind, factory) = resolve(entity.kind())?;
        let strategy = factory(kind, config.attribute.as_deref())?;
        let overrides = RangeOverride::new(config.min, config.max, config.step)?;
        tracing::debug!(entity = %entity, ?kind, "resolved controller");
        Ok(Self::new(entity, strategy, overrides))
    }

    /// Point the controller at the latest snapshot (or none, if the entity
    /// vanished). A snapshot that differs from the bound one supersedes any
    /// optimistic value.
    pub fn bind(&mut self, snapshot: Option<StateSnapshot>) {
        if self.snapshot != snapshot {
            self.optimistic = None;
        }
        self.snapshot = snapshot;
    }

    pub fn snapshot(&self) -> Option<&StateSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn entity(&self) -> &EntityId {
        &self.entity
    }

    pub fn kind(&self) -> EntityKind {
        self.strategy.kind()
    }

    fn state(&self) -> &StateSnapshot {
        self.snapshot.as_ref().unwrap_or(&NO_STATE)
    }

    pub fn range(&self) -> Range {
        self.overrides.apply(self.strategy.range(self.state()))
    }

    /// The reported (or optimistically requested) value, clamped and
    /// step-aligned. `None` when the snapshot carries nothing usable.
    pub fn decoded(&self) -> Option<f64> {
        let range = self.range();
        self.optimistic
            .or_else(|| self.strategy.decode(self.state()))
            .map(|value| range.quantize(value))
    }

    /// The slider position: always inside the range, falling back to `min`
    /// when nothing usable is reported.
    pub fn value(&self) -> f64 {
        self.decoded().unwrap_or_else(|| self.range().min)
    }

    /// Build the write for a requested value. The value is clamped and
    /// quantized first; nothing is sent from here.
    pub fn set_value(&self, value: f64) -> ServiceCall {
        let value = self.range().quantize(value);
        self.strategy.encode(&self.entity, value, self.state())
    }

    pub(crate) fn set_optimistic(&mut self, value: f64) {
        self.optimistic = Some(self.range().quantize(value));
    }

    pub fn is_off(&self) -> bool {
        self.strategy
            .off_state()
            .is_some_and(|off| self.state().state == off)
    }

    pub fn has_slider(&self) -> bool {
        self.strategy.has_slider()
    }

    pub fn has_toggle(&self) -> bool {
        self.strategy.has_toggle()
    }

    /// The value label. Without a usable value the state token is shown.
    pub fn display_text(&self) -> String {
        let state = self.state();
        self.decoded()
            .and_then(|value| self.strategy.format(value, &self.range(), state))
            .unwrap_or_else(|| state.state.clone())
    }

    /// The write a toggle tap produces: `turn_on` when off, else `turn_off`.
    pub fn toggle_command(&self) -> Option<ServiceCall> {
        if !self.has_toggle() {
            return None;
        }
        let service = if self.is_off() { "turn_on" } else { "turn_off" };
        Some(ServiceCall::new(self.kind().domain(), service, &self.entity))
    }
}
