//! Turns a bound controller plus the row config into a [`RowView`].

use crate::config::RowConfig;
use crate::controller::Controller;
use crate::coupling::CouplingRules;
use crate::localize::{self, Localizer};
use crate::memory::{KeyValueStore, VisibilityMemory};
use crate::render::{RowContent, RowView, SliderView, ToggleView};

/// Widths (px) at or below which the value label is dropped by default.
pub const FULL_ROW_HIDE_WIDTH: f64 = 180.0;
pub const INLINE_HIDE_WIDTH: f64 = 335.0;

/// Whether the row is too narrow for the value label. `None` means the
/// layout has not been measured yet, which never hides anything.
pub fn hide_by_width(config: &RowConfig, width: Option<f64>) -> bool {
    let threshold = if config.full_row {
        FULL_ROW_HIDE_WIDTH
    } else {
        INLINE_HIDE_WIDTH
    };
    width.is_some_and(|width| width <= threshold)
}

/// The three independent show/hide decisions of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub slider: bool,
    pub toggle: bool,
    pub value: bool,
}

impl Visibility {
    /// Precedence for the value label: a toggle always wins, then an explicit
    /// `hide_state: false`, then `hide_state: true` or lack of width, and
    /// hiding while off comes last.
    pub fn compute(
        controller: &Controller,
        config: &RowConfig,
        hide_by_width: bool,
        coupled_hide: bool,
    ) -> Self {
        let unavailable = controller.snapshot().is_none_or(|s| s.is_unavailable());
        let off_hidden = controller.is_off() && config.hide_when_off;

        let slider = !unavailable && controller.has_slider() && !off_hidden && !coupled_hide;
        let toggle = config.toggle && controller.has_toggle();
        let value = if toggle {
            false
        } else if config.hide_state == Some(false) {
            true
        } else if config.hide_state == Some(true) || hide_by_width {
            false
        } else {
            !off_hidden
        };
        Self {
            slider,
            toggle,
            value,
        }
    }
}

/// Presents rows; owns the coupling table the rows are judged by.
#[derive(Debug, Clone, Default)]
pub struct RowPresenter {
    rules: CouplingRules,
}

impl RowPresenter {
    pub fn new(rules: CouplingRules) -> Self {
        Self { rules }
    }

    /// Build the view for one render pass.
    ///
    /// Besides computing the view this keeps the visibility memory current:
    /// tracked entities record or clear their own entry before any coupled
    /// lookups happen.
    pub fn present<S: KeyValueStore>(
        &self,
        controller: &Controller,
        config: &RowConfig,
        width: Option<f64>,
        memory: &mut VisibilityMemory<S>,
        localizer: &dyn Localizer,
    ) -> RowView {
        let entity = controller.entity();
        let Some(snapshot) = controller.snapshot() else {
            return RowView::entity_not_found(
                localizer.localize(localize::ENTITY_NOT_FOUND, &[("entity", entity.as_str())]),
            );
        };

        self.rules.observe(memory, entity, &snapshot.state);
        let coupled_hide = self.rules.hides_slider(memory, entity);
        let visibility =
            Visibility::compute(controller, config, hide_by_width(config, width), coupled_hide);

        if config.full_row && config.hide_when_off && controller.is_off() {
            return RowView::Empty;
        }

        let slider = visibility.slider.then(|| {
            let range = controller.range();
            SliderView {
                min: range.min,
                max: range.max,
                step: range.step,
                value: controller.value(),
                full_width: config.full_row || config.grow,
                dir: localizer.direction(),
            }
        });
        let toggle = visibility.toggle.then(|| ToggleView {
            on: !controller.is_off(),
        });
        let state = visibility.value.then(|| {
            if snapshot.is_unavailable() {
                localizer.localize(localize::STATE_UNAVAILABLE, &[])
            } else {
                controller.display_text()
            }
        });

        RowView::row(
            !config.full_row,
            RowContent {
                slider,
                toggle,
                state,
            },
        )
    }
}
