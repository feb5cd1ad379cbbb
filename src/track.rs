#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// On-screen draggable region whose extent defines the continuous-to-discrete
/// mapping domain. `start`/`length` run along the track's own axis,
/// `cross_start`/`cross_length` along the perpendicular one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub axis: Axis,
    pub start: f32,
    pub length: f32,
    pub cross_start: f32,
    pub cross_length: f32,
}

impl Track {
    pub fn new(axis: Axis, start: f32, length: f32, cross_start: f32, cross_length: f32) -> Self {
        Self { axis, start, length, cross_start, cross_length }
    }

    fn primary(&self, p: Point) -> f32 {
        match self.axis {
            Axis::Horizontal => p.x,
            Axis::Vertical => p.y,
        }
    }

    fn cross(&self, p: Point) -> f32 {
        match self.axis {
            Axis::Horizontal => p.y,
            Axis::Vertical => p.x,
        }
    }

    /// Whether the point lies inside the track's rectangle. Used for press
    /// hit-testing only; drag moves are observed globally.
    pub fn contains(&self, p: Point) -> bool {
        let pr = self.primary(p);
        let cr = self.cross(p);
        pr >= self.start
            && pr <= self.start + self.length
            && cr >= self.cross_start
            && cr <= self.cross_start + self.cross_length
    }

    /// Whether the point's cross-axis coordinate sits inside the track's
    /// cross-axis band, widened by `margin` on both sides.
    pub fn cross_contains(&self, p: Point, margin: f32) -> bool {
        let cr = self.cross(p);
        cr >= self.cross_start - margin && cr <= self.cross_start + self.cross_length + margin
    }

    /// Map a pointer position to a frame index. The offset along the track is
    /// normalized to [0,1] (clamped, so over-dragging past either end pins to
    /// the nearest extreme) and rounded to the nearest of `frame_count`
    /// indices. Returns None when the track is not measurable.
    pub fn map_to_index(&self, p: Point, frame_count: usize) -> Option<usize> {
        if self.length <= 0.0 || frame_count == 0 {
            return None;
        }
        let offset = self.primary(p) - self.start;
        let t = (offset / self.length).clamp(0.0, 1.0);
        Some(index_for(t, frame_count))
    }
}

/// The one rounding rule for the whole crate, used by drag and scroll alike:
/// round half away from zero (`f32::round`), so t = 0.5 over 8 frames lands
/// on index 4.
pub fn index_for(t: f32, frame_count: usize) -> usize {
    if frame_count == 0 {
        return 0;
    }
    let idx = (t.clamp(0.0, 1.0) * (frame_count - 1) as f32).round() as usize;
    idx.min(frame_count - 1)
}

/// The tracks currently mounted. Both can be present at once (the narrow
/// layout mounts the horizontal track, the wide layout adds the vertical
/// one), so drag routing has to keep them from fighting each other.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackLayout {
    pub horizontal: Option<Track>,
    pub vertical: Option<Track>,
}

impl TrackLayout {
    pub fn get(&self, axis: Axis) -> Option<&Track> {
        match axis {
            Axis::Horizontal => self.horizontal.as_ref(),
            Axis::Vertical => self.vertical.as_ref(),
        }
    }

    /// Which track a press landed on, if any. Horizontal wins a (degenerate)
    /// overlap since it is the track mounted in every layout.
    pub fn hit(&self, p: Point) -> Option<Axis> {
        if self.horizontal.is_some_and(|t| t.contains(p)) {
            return Some(Axis::Horizontal);
        }
        if self.vertical.is_some_and(|t| t.contains(p)) {
            return Some(Axis::Vertical);
        }
        None
    }

    /// Route a drag move. The session stays on `current` unless the pointer
    /// sits inside the other track's cross-axis band (± margin), in which
    /// case the move defects to that track. If the current track unmounted
    /// mid-drag and the other is not a candidate, there is nothing to drive
    /// and the move is dropped.
    pub fn route(&self, current: Axis, p: Point, margin: f32) -> Option<Axis> {
        let other = current.other();
        if self.get(other).is_some_and(|t| t.cross_contains(p, margin)) {
            return Some(other);
        }
        if self.get(current).is_some() {
            return Some(current);
        }
        None
    }
}
