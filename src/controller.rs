use crate::constants::*;
use crate::intro::{IntroSequencer, IntroState};
use crate::track::{Axis, Point, TrackLayout, index_for};

/// Which tracks the hosting layout mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackAxes {
    Horizontal,
    Vertical,
    Dual,
}

/// Everything variant-specific is switchable here: the axis set, the intro
/// sequence and the scroll scrub.
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    pub axes: TrackAxes,
    pub has_intro: bool,
    pub has_scroll_scrub: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self { axes: TrackAxes::Dual, has_intro: true, has_scroll_scrub: true }
    }
}

/// An in-flight drag. While one is held, move/release events are observed
/// globally (not just over the track); dropping it — on release or on
/// controller teardown — is what ends that observation, so a session can
/// never outlive its controller.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    track: Axis,
}

/// What the presentation layer should put on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayAsset {
    Frame(usize),
    Off,
}

/// Read-only view of the controller state, published after every change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub active_frame: usize,
    pub is_off: bool,
    pub is_dragging: bool,
    pub is_intro_playing: bool,
    pub show_hint: bool,
    /// Position of the visual slider handle, in percent of the track.
    pub slider_position: f32,
    pub display: DisplayAsset,
}

/// The scrubber / light-toggle state machine. Owns the current frame index
/// and maps pointer and scroll input onto it; everything here is synchronous
/// and infallible, with time injected through `tick`.
pub struct ScrubController {
    config: ControllerConfig,
    frame_count: usize,
    layout: TrackLayout,
    active_frame: usize,
    is_off: bool,
    drag: Option<DragSession>,
    intro: IntroSequencer,
    show_hint: bool,
    hint_timer: f32,
}

impl ScrubController {
    /// `frame_count` must be at least 2 (enforced by `FrameSet`).
    pub fn new(frame_count: usize, config: ControllerConfig) -> Self {
        let frame_count = frame_count.max(2);
        let mut intro = IntroSequencer::new(frame_count);
        if config.has_intro {
            intro.start();
        }
        Self {
            config,
            frame_count,
            layout: TrackLayout::default(),
            active_frame: 0,
            is_off: false,
            drag: None,
            intro,
            show_hint: false,
            hint_timer: 0.0,
        }
    }

    /// Update the mounted track geometry. Tracks the configuration does not
    /// recognize are dropped, so a `Horizontal`-only controller never reacts
    /// to a stray vertical track. An empty layout is fine: handlers then
    /// no-op until geometry comes back (expected transient during layout
    /// changes, not an error).
    pub fn set_tracks(&mut self, layout: TrackLayout) {
        self.layout = match self.config.axes {
            TrackAxes::Horizontal => TrackLayout { horizontal: layout.horizontal, vertical: None },
            TrackAxes::Vertical => TrackLayout { horizontal: None, vertical: layout.vertical },
            TrackAxes::Dual => layout,
        };
    }

    /// Press (pointer-down or touch-start). Starts a drag session if the
    /// press lands on a mounted track, and maps the press coordinate right
    /// away so a bare tap repositions the frame.
    pub fn press(&mut self, p: Point) {
        if self.is_off || self.intro.is_playing() {
            return;
        }
        let Some(axis) = self.layout.hit(p) else {
            return;
        };
        self.show_hint = false;
        self.drag = Some(DragSession { track: axis });
        self.apply_track(axis, p);
    }

    /// Move during a drag. `None` stands for malformed input (e.g. a touch
    /// event with no touch point) and is treated as no movement.
    pub fn drag_move(&mut self, p: Option<Point>) {
        let Some(session) = self.drag else {
            return;
        };
        let Some(p) = p else {
            return;
        };
        match self.layout.route(session.track, p, TRACK_ROUTE_MARGIN) {
            Some(axis) => {
                self.drag = Some(DragSession { track: axis });
                self.apply_track(axis, p);
            }
            // Track unmounted mid-drag: keep the session, skip the mapping.
            None => {}
        }
    }

    /// Release (pointer-up or touch-end), observed globally.
    pub fn release(&mut self) {
        self.drag = None;
    }

    /// Scroll-linked scrub: maps the page scroll offset against a fixed
    /// window at the top of the viewport. Passive observer; drag wins while
    /// one is held.
    pub fn scroll(&mut self, scroll_y: f32, viewport_height: f32) {
        if !self.config.has_scroll_scrub
            || self.is_off
            || self.intro.is_playing()
            || self.drag.is_some()
        {
            return;
        }
        let window = SCROLL_WINDOW_RATIO * viewport_height;
        if window <= 0.0 {
            return;
        }
        let t = (scroll_y / window).clamp(0.0, 1.0);
        self.active_frame = index_for(t, self.frame_count);
    }

    /// Flip the lamp off/on. The frame index is preserved so toggling back
    /// on resumes where the scrub left off. Ignored while the intro plays.
    pub fn toggle_light(&mut self) {
        if self.intro.is_playing() {
            return;
        }
        self.is_off = !self.is_off;
    }

    /// Advance time-driven behavior (intro steps, hint countdown).
    pub fn tick(&mut self, dt: f32) {
        let was_playing = self.intro.is_playing();
        if let Some(frame) = self.intro.tick(dt) {
            self.active_frame = frame;
        }
        if was_playing && self.intro.state() == IntroState::Done {
            self.show_hint = true;
            self.hint_timer = 0.0;
            // Countdown starts on the next tick so the hint stays up for the
            // full duration.
            return;
        }

        if self.show_hint {
            self.hint_timer += dt;
            if self.hint_timer >= HINT_DURATION {
                self.show_hint = false;
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        let display = if self.is_off {
            DisplayAsset::Off
        } else {
            DisplayAsset::Frame(self.active_frame)
        };
        Snapshot {
            active_frame: self.active_frame,
            is_off: self.is_off,
            is_dragging: self.drag.is_some(),
            is_intro_playing: self.intro.is_playing(),
            show_hint: self.show_hint,
            slider_position: self.active_frame as f32 / (self.frame_count - 1) as f32 * 100.0,
            display,
        }
    }

    fn apply_track(&mut self, axis: Axis, p: Point) {
        if let Some(track) = self.layout.get(axis) {
            if let Some(idx) = track.map_to_index(p, self.frame_count) {
                self.active_frame = idx;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Track;

    const N: usize = 8;

    fn layout() -> TrackLayout {
        TrackLayout {
            horizontal: Some(Track::new(Axis::Horizontal, 100.0, 700.0, 700.0, 48.0)),
            vertical: Some(Track::new(Axis::Vertical, 100.0, 500.0, 1100.0, 48.0)),
        }
    }

    fn no_intro() -> ControllerConfig {
        ControllerConfig { has_intro: false, ..ControllerConfig::default() }
    }

    fn controller(config: ControllerConfig) -> ScrubController {
        let mut c = ScrubController::new(N, config);
        c.set_tracks(layout());
        c
    }

    fn on_track(offset: f32) -> Point {
        Point::new(100.0 + offset, 720.0)
    }

    fn finish_intro(c: &mut ScrubController) {
        c.tick(INTRO_START_DELAY);
        while c.snapshot().is_intro_playing {
            c.tick(INTRO_STEP_INTERVAL);
        }
    }

    #[test]
    fn tap_repositions_exactly_once() {
        let mut c = controller(no_intro());
        c.press(on_track(350.0));
        assert!(c.is_dragging());
        c.release();
        let snap = c.snapshot();
        assert!(!snap.is_dragging);
        assert_eq!(snap.active_frame, 4); // round(0.5 * 7)
        assert_eq!(snap.display, DisplayAsset::Frame(4));
    }

    #[test]
    fn drag_follows_moves_globally() {
        let mut c = controller(no_intro());
        c.press(on_track(0.0));
        assert_eq!(c.snapshot().active_frame, 0);
        // Pointer leaves the track rectangle; the drag still follows
        c.drag_move(Some(Point::new(800.0, 10.0)));
        assert_eq!(c.snapshot().active_frame, 7);
        c.release();
        // After release, moves are ignored
        c.drag_move(Some(on_track(0.0)));
        assert_eq!(c.snapshot().active_frame, 7);
    }

    #[test]
    fn move_without_a_point_is_no_movement() {
        let mut c = controller(no_intro());
        c.press(on_track(700.0));
        c.drag_move(None);
        assert_eq!(c.snapshot().active_frame, 7);
        assert!(c.is_dragging());
    }

    #[test]
    fn press_off_the_track_is_ignored() {
        let mut c = controller(no_intro());
        c.press(Point::new(100.0, 100.0));
        assert!(!c.is_dragging());
        assert_eq!(c.snapshot().active_frame, 0);
    }

    #[test]
    fn track_unmount_mid_drag_keeps_the_session_sane() {
        let mut c = controller(ControllerConfig {
            axes: TrackAxes::Horizontal,
            ..no_intro()
        });
        c.press(on_track(350.0));
        c.set_tracks(TrackLayout::default());
        c.drag_move(Some(on_track(700.0)));
        // Unmeasurable track: state unchanged, session still open
        assert_eq!(c.snapshot().active_frame, 4);
        assert!(c.is_dragging());
        c.release();
        assert!(!c.is_dragging());
    }

    #[test]
    fn drag_routes_to_the_vertical_track_by_proximity() {
        let mut c = controller(no_intro());
        c.press(on_track(0.0));
        // Pointer crosses into the vertical track's band: y drives now.
        c.drag_move(Some(Point::new(1110.0, 600.0)));
        assert_eq!(c.snapshot().active_frame, 7); // (600-100)/500 = 1.0
    }

    #[test]
    fn toggle_preserves_the_frame_and_restores_the_asset() {
        let mut c = controller(no_intro());
        c.press(on_track(300.0));
        c.release();
        assert_eq!(c.snapshot().active_frame, 3);

        c.toggle_light();
        let snap = c.snapshot();
        assert!(snap.is_off);
        assert_eq!(snap.display, DisplayAsset::Off);
        assert_eq!(snap.active_frame, 3);

        c.toggle_light();
        let snap = c.snapshot();
        assert!(!snap.is_off);
        assert_eq!(snap.display, DisplayAsset::Frame(3));
    }

    #[test]
    fn presses_are_ignored_while_off() {
        let mut c = controller(no_intro());
        c.toggle_light();
        c.press(on_track(700.0));
        assert!(!c.is_dragging());
        assert_eq!(c.snapshot().active_frame, 0);
    }

    #[test]
    fn presses_are_ignored_during_the_intro() {
        let mut c = controller(ControllerConfig::default());
        assert!(c.snapshot().is_intro_playing);
        c.press(on_track(700.0));
        assert!(!c.is_dragging());
        assert_eq!(c.snapshot().active_frame, 0);
    }

    #[test]
    fn intro_walks_to_the_far_extreme_then_shows_the_hint() {
        let mut c = controller(ControllerConfig::default());
        c.tick(INTRO_START_DELAY);
        for expected in 1..N {
            assert!(c.snapshot().is_intro_playing);
            c.tick(INTRO_STEP_INTERVAL);
            assert_eq!(c.snapshot().active_frame, expected);
        }
        let snap = c.snapshot();
        assert!(!snap.is_intro_playing);
        assert!(snap.show_hint);
        assert_eq!(snap.active_frame, N - 1);
        assert!((snap.slider_position - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn hint_auto_hides_after_its_duration() {
        let mut c = controller(ControllerConfig::default());
        finish_intro(&mut c);
        assert!(c.snapshot().show_hint);
        c.tick(HINT_DURATION - 0.01);
        assert!(c.snapshot().show_hint);
        c.tick(0.01);
        assert!(!c.snapshot().show_hint);
    }

    #[test]
    fn first_press_clears_the_hint_early() {
        let mut c = controller(ControllerConfig::default());
        finish_intro(&mut c);
        assert!(c.snapshot().show_hint);
        c.press(on_track(0.0));
        assert!(!c.snapshot().show_hint);
        c.release();
    }

    #[test]
    fn scroll_maps_against_the_viewport_window() {
        let mut c = controller(no_intro());
        // Window end = 0.14 * 1000 = 140; scroll_y 70 is the midpoint.
        c.scroll(70.0, 1000.0);
        assert_eq!(c.snapshot().active_frame, 4); // same rounding as drag
        c.scroll(0.0, 1000.0);
        assert_eq!(c.snapshot().active_frame, 0);
        c.scroll(500.0, 1000.0);
        assert_eq!(c.snapshot().active_frame, 7); // clamped past the window
    }

    #[test]
    fn scroll_yields_to_drag_off_and_intro() {
        let mut c = controller(no_intro());
        c.press(on_track(0.0));
        c.scroll(140.0, 1000.0);
        assert_eq!(c.snapshot().active_frame, 0); // drag wins
        c.release();

        c.toggle_light();
        c.scroll(140.0, 1000.0);
        assert_eq!(c.snapshot().active_frame, 0); // off disables scrubbing
        c.toggle_light();

        let mut c = controller(ControllerConfig::default());
        c.scroll(140.0, 1000.0);
        assert_eq!(c.snapshot().active_frame, 0); // intro wins
    }

    #[test]
    fn scroll_can_be_configured_out() {
        let mut c = controller(ControllerConfig {
            has_scroll_scrub: false,
            ..no_intro()
        });
        c.scroll(140.0, 1000.0);
        assert_eq!(c.snapshot().active_frame, 0);
    }

    #[test]
    fn toggle_is_ignored_during_the_intro() {
        let mut c = controller(ControllerConfig::default());
        c.toggle_light();
        assert!(!c.snapshot().is_off);
        finish_intro(&mut c);
        c.toggle_light();
        assert!(c.snapshot().is_off);
    }

    #[test]
    fn axis_config_filters_unrecognized_tracks() {
        let mut c = controller(ControllerConfig {
            axes: TrackAxes::Vertical,
            ..no_intro()
        });
        // Press on the horizontal track: not mounted for this config
        c.press(on_track(350.0));
        assert!(!c.is_dragging());
        // Press on the vertical track works
        c.press(Point::new(1110.0, 350.0));
        assert!(c.is_dragging());
        assert_eq!(c.snapshot().active_frame, 4); // (350-100)/500 = 0.5
    }
}
