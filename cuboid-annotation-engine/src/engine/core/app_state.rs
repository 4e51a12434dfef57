use bevy::prelude::*;

use constants::render_settings::LOAD_SETTLE_SECS;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Dataset request outstanding; cloud-dependent operations are gated off.
    #[default]
    Loading,
    Running,
}

/// Progress of the initial dataset load, consumed by the loading overlay.
#[derive(Resource)]
pub struct LoadingProgress {
    /// Fraction in [0, 1], advanced at the granularity the asset server reports.
    pub fraction: f32,
    pub failed: bool,
    /// Set once the store and its default colouring are installed in the scene.
    pub installed: bool,
    /// Settling delays before and after the load so the overlay does not pop.
    pub lead_in: Timer,
    pub settle: Timer,
}

impl Default for LoadingProgress {
    fn default() -> Self {
        Self {
            fraction: 0.0,
            failed: false,
            installed: false,
            lead_in: Timer::from_seconds(LOAD_SETTLE_SECS, TimerMode::Once),
            settle: Timer::from_seconds(LOAD_SETTLE_SECS, TimerMode::Once),
        }
    }
}

/// Transition to Running once the cloud is installed and the settle delay passed
pub fn transition_to_running(
    time: Res<Time>,
    mut progress: ResMut<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !progress.installed {
        return;
    }

    progress.settle.tick(time.delta());
    if progress.settle.just_finished() {
        println!("→ Point cloud ready, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
