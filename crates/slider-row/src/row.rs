use crate::command::ServiceCall;
use crate::config::RowConfig;
use crate::controller::Controller;
use crate::coupling::CouplingRules;
use crate::entity::StateSnapshot;
use crate::error::ConfigError;
use crate::localize::Localizer;
use crate::memory::{KeyValueStore, VisibilityMemory};
use crate::presenter::{self, RowPresenter};
use crate::render::RowView;

/// One slider row: owns the config, the controller, the last layout width and
/// the row's handle on the shared visibility memory.
///
/// Everything happens synchronously inside a render pass; writes are handed
/// back to the host to dispatch and never awaited.
pub struct SliderRow<S> {
    config: RowConfig,
    controller: Controller,
    presenter: RowPresenter,
    memory: VisibilityMemory<S>,
    /// Last stable layout width; `None` until the first real measurement.
    width: Option<f64>,
}

impl<S: KeyValueStore> SliderRow<S> {
    /// Validate the config and build the controller. Fails before any render
    /// when the entity is missing or of an unsupported kind.
    pub fn new(config: RowConfig, store: S) -> Result<Self, ConfigError> {
        let controller = Controller::from_config(&config)?;
        let presenter = RowPresenter::new(coupling_rules(&config));
        Ok(Self {
            config,
            controller,
            presenter,
            memory: VisibilityMemory::new(store),
            width: None,
        })
    }

    /// Replace the config. The controller is rebuilt; on error the row keeps
    /// its previous config.
    pub fn set_config(&mut self, config: RowConfig) -> Result<(), ConfigError> {
        self.controller = Controller::from_config(&config)?;
        self.presenter = RowPresenter::new(coupling_rules(&config));
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &RowConfig {
        &self.config
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn memory(&self) -> &VisibilityMemory<S> {
        &self.memory
    }

    /// Record the parent's width after a layout pass. A zero width before the
    /// first real measurement means layout has not settled and is ignored.
    pub fn resized(&mut self, width: f64) {
        if self.width.is_none() && width <= 0.0 {
            tracing::trace!("ignoring width reading before layout settled");
            return;
        }
        self.width = Some(width);
    }

    pub fn hide_by_width(&self) -> bool {
        presenter::hide_by_width(&self.config, self.width)
    }

    /// Bind the current snapshot (if the entity exists) and build the view.
    pub fn render(
        &mut self,
        snapshot: Option<StateSnapshot>,
        localizer: &dyn Localizer,
    ) -> RowView {
        self.controller.bind(snapshot);
        self.presenter.present(
            &self.controller,
            &self.config,
            self.width,
            &mut self.memory,
            localizer,
        )
    }

    /// The user released the slider at `value`. Returns the write to dispatch,
    /// or `None` when there is nothing to change.
    pub fn slider_changed(&mut self, value: f64) -> Option<ServiceCall> {
        let snapshot = self.controller.snapshot()?;
        if snapshot.is_unavailable() {
            return None;
        }
        let requested = self.controller.range().quantize(value);
        if self.controller.decoded() == Some(requested) {
            tracing::debug!(entity = %self.controller.entity(), value = requested, "skipping no-op write");
            return None;
        }
        let call = self.controller.set_value(requested);
        self.controller.set_optimistic(requested);
        tracing::debug!(
            entity = %self.controller.entity(),
            value = requested,
            domain = %call.domain,
            service = %call.service,
            "slider write"
        );
        Some(call)
    }

    /// The user tapped the toggle.
    pub fn toggle(&self) -> Option<ServiceCall> {
        let snapshot = self.controller.snapshot()?;
        if snapshot.is_unavailable() {
            return None;
        }
        self.controller.toggle_command()
    }
}

fn coupling_rules(config: &RowConfig) -> CouplingRules {
    match &config.coupling {
        Some(rules) => CouplingRules::new(rules.clone()),
        None => CouplingRules::default(),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::controller::EntityKind;
    use crate::localize::EnglishLocalizer;
    use crate::memory::InMemoryStore;
    use crate::render::RowContent;

    fn row(config: serde_json::Value) -> SliderRow<InMemoryStore> {
        SliderRow::new(serde_json::from_value(config).unwrap(), InMemoryStore::new()).unwrap()
    }

    fn content(view: RowView) -> RowContent {
        view.content().cloned().expect("row content")
    }

    fn light(brightness: u64) -> Option<StateSnapshot> {
        Some(StateSnapshot::new("on").with_attribute("brightness", brightness))
    }

    #[test]
    fn test_unsupported_kind_fails_at_setup() {
        let config = RowConfig::from_json(r#"{"entity": "foo.bar"}"#).unwrap();
        let result = SliderRow::new(config, InMemoryStore::new());
        assert!(matches!(result, Err(ConfigError::UnsupportedKind(ref k)) if k == "foo"));
    }

    #[test]
    fn test_missing_entity_fails_at_setup() {
        let result = SliderRow::new(RowConfig::default(), InMemoryStore::new());
        assert!(matches!(result, Err(ConfigError::MissingEntity)));
    }

    #[test]
    fn test_not_found_heals_without_reconstruction() {
        let mut row = row(json!({"entity": "light.kitchen"}));
        let view = row.render(None, &EnglishLocalizer);
        assert!(matches!(view, RowView::EntityNotFound { .. }));

        let view = row.render(light(128), &EnglishLocalizer);
        assert_eq!(content(view).slider.map(|s| s.value), Some(128.0));
    }

    #[test]
    fn test_resize_hides_value() {
        let mut row = row(json!({"entity": "light.kitchen"}));
        assert!(content(row.render(light(10), &EnglishLocalizer)).state.is_some());

        row.resized(300.0);
        assert!(row.hide_by_width());
        assert!(content(row.render(light(10), &EnglishLocalizer)).state.is_none());

        row.resized(600.0);
        assert!(content(row.render(light(10), &EnglishLocalizer)).state.is_some());
    }

    #[test]
    fn test_zero_width_before_layout_is_ignored() {
        let mut row = row(json!({"entity": "light.kitchen"}));
        row.resized(0.0);
        assert!(!row.hide_by_width());
        row.resized(500.0);
        // Once measured, a collapsed row really is narrow.
        row.resized(0.0);
        assert!(row.hide_by_width());
    }

    #[test]
    fn test_slider_write_is_optimistic_until_confirmed() {
        let mut row = row(json!({"entity": "light.kitchen"}));
        row.render(light(100), &EnglishLocalizer);

        let call = row.slider_changed(200.4).expect("write");
        assert_eq!(call.get("brightness"), Some(&json!(200)));

        // Re-render with the stale snapshot: the requested value sticks.
        let view = row.render(light(100), &EnglishLocalizer);
        assert_eq!(content(view).slider.map(|s| s.value), Some(200.0));

        // The write was rejected upstream: truth wins on the next snapshot.
        let view = row.render(light(99), &EnglishLocalizer);
        assert_eq!(content(view).slider.map(|s| s.value), Some(99.0));
    }

    #[test]
    fn test_no_op_write_is_skipped() {
        let mut row = row(json!({"entity": "light.kitchen"}));
        row.render(light(128), &EnglishLocalizer);
        assert!(row.slider_changed(128.0).is_none());
        assert!(row.slider_changed(127.8).is_none());
        assert!(row.slider_changed(129.0).is_some());
    }

    #[test]
    fn test_write_without_reported_value_is_sent() {
        let mut hall = row(json!({"entity": "light.hall"}));
        let view = hall.render(Some(StateSnapshot::new("on")), &EnglishLocalizer);
        assert_eq!(content(view).state.as_deref(), Some("on"));
        let call = hall.slider_changed(0.0).expect("turn_off");
        assert_eq!(call.service, "turn_off");

        let mut cover = row(json!({"entity": "cover.garage_door"}));
        cover.render(Some(StateSnapshot::new("open")), &EnglishLocalizer);
        let call = cover.slider_changed(0.0).expect("position write");
        assert_eq!(call.get("position"), Some(&json!(0)));
    }

    #[test]
    fn test_no_writes_without_usable_state() {
        let mut row = row(json!({"entity": "light.kitchen", "toggle": true}));
        assert!(row.slider_changed(10.0).is_none());
        assert!(row.toggle().is_none());
        row.render(Some(StateSnapshot::new("unavailable")), &EnglishLocalizer);
        assert!(row.slider_changed(10.0).is_none());
        assert!(row.toggle().is_none());
    }

    #[test]
    fn test_toggle() {
        let mut row = row(json!({"entity": "fan.attic", "toggle": true}));
        row.render(Some(StateSnapshot::new("off")), &EnglishLocalizer);
        let call = row.toggle().unwrap();
        assert_eq!((call.domain.as_str(), call.service.as_str()), ("fan", "turn_on"));
    }

    #[test]
    fn test_set_config_rebuilds_controller() {
        let mut row = row(json!({"entity": "light.kitchen"}));
        row.set_config(serde_json::from_value(json!({"entity": "fan.attic"})).unwrap())
            .unwrap();
        assert_eq!(row.controller().kind(), EntityKind::Fan);

        let bad = serde_json::from_value(json!({"entity": "foo.bar"})).unwrap();
        assert!(row.set_config(bad).is_err());
        assert_eq!(row.config().entity().unwrap(), "fan.attic");
    }

    #[test]
    fn test_rows_share_memory_through_store() {
        let shared = Rc::new(RefCell::new(InMemoryStore::new()));
        let mut window = SliderRow::new(
            RowConfig::from_json(r#"{"entity": "cover.window_5"}"#).unwrap(),
            Rc::clone(&shared),
        )
        .unwrap();
        let mut shutter = SliderRow::new(
            RowConfig::from_json(r#"{"entity": "cover.shutter_5"}"#).unwrap(),
            Rc::clone(&shared),
        )
        .unwrap();
        let shutter_state =
            || Some(StateSnapshot::new("open").with_attribute("current_position", 30));

        assert!(content(shutter.render(shutter_state(), &EnglishLocalizer)).slider.is_some());

        window.render(Some(StateSnapshot::new("open")), &EnglishLocalizer);
        assert!(content(shutter.render(shutter_state(), &EnglishLocalizer)).slider.is_none());

        window.render(Some(StateSnapshot::new("closed")), &EnglishLocalizer);
        assert!(content(shutter.render(shutter_state(), &EnglishLocalizer)).slider.is_some());
        assert!(window.memory().recall("cover.window_5").is_none());
    }

    #[test]
    fn test_custom_coupling_from_config() {
        let shared = Rc::new(RefCell::new(InMemoryStore::new()));
        let rules = json!([
            {"rule": "track", "prefix": "input_boolean.vent_", "state": "on"},
            {"rule": "group", "prefix": "cover.garage", "scan_prefix": "input_boolean.vent_"}
        ]);
        let mut vent = SliderRow::new(
            serde_json::from_value(json!({"entity": "input_boolean.vent_1", "coupling": rules}))
                .unwrap(),
            Rc::clone(&shared),
        )
        .unwrap();
        let mut garage = SliderRow::new(
            serde_json::from_value(json!({"entity": "cover.garage", "coupling": rules})).unwrap(),
            Rc::clone(&shared),
        )
        .unwrap();
        let garage_state =
            || Some(StateSnapshot::new("open").with_attribute("current_position", 100));

        vent.render(Some(StateSnapshot::new("on")), &EnglishLocalizer);
        assert_eq!(shared.borrow().get("input_boolean.vent_1").as_deref(), Some("on"));
        assert!(content(garage.render(garage_state(), &EnglishLocalizer)).slider.is_none());

        vent.render(Some(StateSnapshot::new("off")), &EnglishLocalizer);
        assert!(content(garage.render(garage_state(), &EnglishLocalizer)).slider.is_some());
    }
}
