use crate::core::session::SharedSession;
use crate::core::time::{epoch_ms, Clock};
use crate::error::DashboardError;
use crate::renderer::traits::Surface;
use crate::systems::scene::{render_frame, FrameInput, SceneParameters};
use crate::systems::theme::{PreferenceStore, Theme, ThemeController, ThemeTarget};

/// What one animation cycle produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub theme: Theme,
    /// `None` when there was no surface or it had no area.
    pub scene: Option<SceneParameters>,
    pub time_ms: f64,
}

/// The per-refresh work: one theme evaluation and one sky frame, both read
/// from the same clock sample and session state.
pub struct SkyApp<C, P, T>
where
    C: Clock,
    P: PreferenceStore,
    T: ThemeTarget,
{
    clock: C,
    session: SharedSession,
    theme: ThemeController<P, T>,
}

impl<C, P, T> SkyApp<C, P, T>
where
    C: Clock,
    P: PreferenceStore,
    T: ThemeTarget,
{
    pub fn new(clock: C, session: SharedSession, prefs: P, target: T) -> Self {
        Self {
            clock,
            session,
            theme: ThemeController::new(prefs, target),
        }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Run one cycle. A missing surface skips drawing but still applies the theme.
    pub fn frame(&self, surface: Option<&mut dyn Surface>) -> FrameReport {
        let now = self.clock.now();
        let session = self.session.borrow();
        let input = FrameInput {
            now,
            sun_times: session.sun_times(),
            condition: session.condition(),
        };

        let theme = self.theme.refresh(&now, input.sun_times, input.condition);
        let scene = match surface {
            Some(surface) => render_frame(surface, &input),
            None => {
                log::trace!("sky frame skipped: no surface");
                None
            }
        };

        FrameReport {
            theme,
            scene,
            time_ms: epoch_ms(&now),
        }
    }

    /// Flip the persisted manual-dark flag and re-apply the theme right away.
    pub fn toggle_dark(&self) -> Result<Theme, DashboardError> {
        let now = self.clock.now();
        let session = self.session.borrow();
        self.theme
            .toggle(&now, session.sun_times(), session.condition())
    }

    pub fn manual_dark(&self) -> bool {
        self.theme.manual_dark()
    }
}
