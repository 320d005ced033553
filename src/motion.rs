//! Pointer-proximity letter animation.
//!
//! Everything in here is plain math over glyph positions and time, so it runs
//! (and is tested) without a DOM. The view layer in `app::welcome` feeds it
//! layout measurements and event timestamps and writes the sampled styles back
//! to the glyph elements.

use std::f64::consts::TAU;

/// Controls how quickly intensity decays with distance (px²).
const FALLOFF: f64 = 6000.0;
/// Intensity above which a glyph switches to the highlight color and glow.
pub const HIGHLIGHT_THRESHOLD: f64 = 0.4;

const LIFT_PX: f64 = 20.0;
const TILT_RANGE_PX: f64 = 500.0;
const MAX_ROTATION_DEG: f64 = 25.0;
const MAX_SKEW_DEG: f64 = 20.0;
const MAX_SCALE_GAIN: f64 = 0.5;

const HIGHLIGHT_COLOR: &str = "#faf6f5ff";
const HIGHLIGHT_SHADOW: &str = "0 0 20px #f7f6f680";

const NBSP: char = '\u{00A0}';

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontWeights {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Subtitle,
}

impl TextRole {
    pub const fn weights(self) -> FontWeights {
        match self {
            TextRole::Subtitle => FontWeights {
                min: 100.0,
                max: 400.0,
                default: 500.0,
            },
            TextRole::Title => FontWeights {
                min: 400.0,
                max: 900.0,
                default: 600.0,
            },
        }
    }
}

/// Splits `text` into one glyph per character. Literal spaces become
/// non-breaking spaces so inline-block spans keep their width.
pub fn glyph_chars(text: &str) -> Vec<char> {
    text.chars()
        .map(|c| if c == ' ' { NBSP } else { c })
        .collect()
}

/// Horizontal center of an element relative to its container's left edge.
pub fn center_offset(container_left: f64, left: f64, width: f64) -> f64 {
    left - container_left + width / 2.0
}

/// Gaussian falloff of pointer influence. 1.0 at the glyph center, never
/// reaches zero.
pub fn intensity(distance: f64) -> f64 {
    (-(distance * distance) / FALLOFF).exp()
}

pub fn weight(weights: FontWeights, intensity: f64) -> f64 {
    weights.min + (weights.max - weights.min) * intensity
}

pub fn blur(intensity: f64) -> f64 {
    ((1.0 - intensity) * 2.0 - 1.0).max(0.0)
}

/// Strict step: exactly at the threshold a glyph is not highlighted.
pub fn is_highlighted(intensity: f64) -> bool {
    intensity > HIGHLIGHT_THRESHOLD
}

/// The animatable visual state of a single glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphStyle {
    pub weight: f64,
    pub y: f64,
    pub rotation: f64,
    pub scale: f64,
    pub skew_x: f64,
    pub blur: f64,
    pub highlight: bool,
}

impl GlyphStyle {
    /// Resting state for `role`: default weight, no transform, no effects.
    pub fn rest(role: TextRole) -> Self {
        Self::at_weight(role.weights().default)
    }

    pub fn at_weight(weight: f64) -> Self {
        Self {
            weight,
            y: 0.0,
            rotation: 0.0,
            scale: 1.0,
            skew_x: 0.0,
            blur: 0.0,
            highlight: false,
        }
    }

    /// Target style for a glyph whose center is `distance` px left of the
    /// pointer (negative when the pointer is left of the glyph).
    pub fn from_distance(role: TextRole, distance: f64) -> Self {
        let intensity = intensity(distance);
        let tilt = distance / TILT_RANGE_PX * intensity;
        Self {
            weight: weight(role.weights(), intensity),
            y: -LIFT_PX * intensity,
            rotation: tilt * MAX_ROTATION_DEG,
            scale: 1.0 + MAX_SCALE_GAIN * intensity,
            skew_x: -tilt * MAX_SKEW_DEG,
            blur: blur(intensity),
            highlight: is_highlighted(intensity),
        }
    }

    /// Numeric fields are interpolated; `highlight` is discrete and flips to
    /// the target's as soon as the animation makes progress.
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self {
            weight: mix(self.weight, to.weight),
            y: mix(self.y, to.y),
            rotation: mix(self.rotation, to.rotation),
            scale: mix(self.scale, to.scale),
            skew_x: mix(self.skew_x, to.skew_x),
            blur: mix(self.blur, to.blur),
            highlight: if t > 0.0 { to.highlight } else { self.highlight },
        }
    }

    /// Inline style for the glyph's span.
    pub fn css(&self) -> String {
        let (color, shadow) = if self.highlight {
            (HIGHLIGHT_COLOR, HIGHLIGHT_SHADOW)
        } else {
            ("inherit", "none")
        };
        format!(
            "display: inline-block; font-weight: {:.0}; transform: translateY({:.3}px) rotate({:.3}deg) scale({:.4}) skewX({:.3}deg); filter: blur({:.3}px); color: {color}; text-shadow: {shadow};",
            self.weight.max(1.0),
            self.y,
            self.rotation,
            self.scale,
            self.skew_x,
            // elastic overshoot can dip below zero
            self.blur.max(0.0),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// `1 - (1 - t)^(power + 1)`; `PowerOut(2)` is a cubic ease-out.
    PowerOut(i32),
    /// Decaying sine that overshoots the target before settling.
    ElasticOut { amplitude: f64, period: f64 },
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::PowerOut(power) => 1.0 - (1.0 - t).powi(power + 1),
            Easing::ElasticOut { amplitude, period } => {
                if t <= 0.0 || t >= 1.0 {
                    return t;
                }
                let amplitude = amplitude.max(1.0);
                let shift = period / TAU * (1.0 / amplitude).asin();
                amplitude * 2f64.powf(-10.0 * t) * ((t - shift) * TAU / period).sin() + 1.0
            }
        }
    }
}

/// Timing of one animation, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration: f64,
    pub delay: f64,
    pub easing: Easing,
}

pub const HOVER_TRANSITION: Transition = Transition {
    duration: 0.25,
    delay: 0.0,
    easing: Easing::PowerOut(2),
};

pub const SETTLE_TRANSITION: Transition = Transition {
    duration: 0.6,
    delay: 0.0,
    easing: Easing::ElasticOut {
        amplitude: 1.0,
        period: 0.5,
    },
};

/// Extra settle delay per glyph index, in seconds.
pub const SETTLE_STAGGER: f64 = 0.02;

impl Transition {
    pub fn delayed(self, delay: f64) -> Self {
        Self { delay, ..self }
    }
}

/// An in-flight animation between two glyph styles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: GlyphStyle,
    to: GlyphStyle,
    start: f64,
    duration: f64,
    easing: Easing,
}

impl Tween {
    /// A tween that is already finished at `style`.
    pub fn still(style: GlyphStyle) -> Self {
        Self {
            from: style,
            to: style,
            start: f64::NEG_INFINITY,
            duration: 0.0,
            easing: Easing::Linear,
        }
    }

    pub fn new(from: GlyphStyle, to: GlyphStyle, now: f64, transition: Transition) -> Self {
        Self {
            from,
            to,
            start: now + transition.delay,
            duration: transition.duration,
            easing: transition.easing,
        }
    }

    pub fn target(&self) -> GlyphStyle {
        self.to
    }

    pub fn sample(&self, now: f64) -> GlyphStyle {
        if now < self.start {
            return self.from;
        }
        if self.is_finished(now) {
            return self.to;
        }
        let progress = (now - self.start) / self.duration;
        self.from.interpolate(&self.to, self.easing.apply(progress))
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.start + self.duration
    }

    /// Replace this tween with one heading to `to`, starting from wherever the
    /// current one is at `now`.
    pub fn retarget(&mut self, to: GlyphStyle, now: f64, transition: Transition) {
        *self = Tween::new(self.sample(now), to, now, transition);
    }
}

/// Hover state for one block of text: one tween per glyph.
///
/// Pointer events retarget glyph tweens; the renderer pulls sampled styles
/// with [`TextHover::frame`]. After [`TextHover::detach`] every event is
/// ignored.
#[derive(Debug, Clone)]
pub struct TextHover {
    role: TextRole,
    glyphs: Vec<Tween>,
    attached: bool,
    flushed: bool,
}

impl TextHover {
    pub fn new(role: TextRole, glyph_count: usize, base_weight: f64) -> Self {
        Self {
            role,
            glyphs: vec![Tween::still(GlyphStyle::at_weight(base_weight)); glyph_count],
            attached: false,
            flushed: true,
        }
    }

    pub fn role(&self) -> TextRole {
        self.role
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// `centers` holds each glyph's center relative to the container, or
    /// `None` for a glyph with no element to measure. Extra or missing entries
    /// are ignored.
    pub fn pointer_move(&mut self, pointer_x: f64, centers: &[Option<f64>], now: f64) {
        if !self.attached {
            return;
        }
        let role = self.role;
        for (tween, center) in self.glyphs.iter_mut().zip(centers) {
            if let Some(center) = center {
                let target = GlyphStyle::from_distance(role, pointer_x - center);
                tween.retarget(target, now, HOVER_TRANSITION);
            }
        }
        self.flushed = false;
    }

    pub fn pointer_leave(&mut self, now: f64) {
        if !self.attached {
            return;
        }
        let rest = GlyphStyle::rest(self.role);
        for (i, tween) in self.glyphs.iter_mut().enumerate() {
            let transition = SETTLE_TRANSITION.delayed(i as f64 * SETTLE_STAGGER);
            tween.retarget(rest, now, transition);
        }
        self.flushed = false;
    }

    pub fn style_at(&self, index: usize, now: f64) -> Option<GlyphStyle> {
        self.glyphs.get(index).map(|t| t.sample(now))
    }

    pub fn target(&self, index: usize) -> Option<GlyphStyle> {
        self.glyphs.get(index).map(Tween::target)
    }

    pub fn is_settled(&self, now: f64) -> bool {
        self.glyphs.iter().all(|t| t.is_finished(now))
    }

    /// Styles to render at `now`, or `None` once everything has settled and
    /// the final styles were already handed out.
    pub fn frame(&mut self, now: f64) -> Option<Vec<GlyphStyle>> {
        if self.flushed {
            return None;
        }
        if self.is_settled(now) {
            self.flushed = true;
        }
        Some(self.glyphs.iter().map(|t| t.sample(now)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn attached(role: TextRole, count: usize) -> TextHover {
        let mut hover = TextHover::new(role, count, 400.0);
        hover.attach();
        hover
    }

    fn assert_rest(style: GlyphStyle, role: TextRole) {
        assert_eq!(style, GlyphStyle::rest(role));
        assert_eq!(style.weight, role.weights().default);
        assert_eq!(style.scale, 1.0);
        assert!(!style.highlight);
    }

    #[test]
    fn test_intensity_shape() {
        assert_eq!(intensity(0.0), 1.0);
        let mut prev = 1.0;
        for d in 1..400 {
            let d = d as f64;
            let i = intensity(d);
            assert!(i > 0.0 && i < 1.0);
            assert!(i < prev, "intensity must strictly decrease at {d}");
            assert_eq!(i, intensity(-d));
            prev = i;
        }
    }

    #[test]
    fn test_weight_bounds_per_role() {
        for role in [TextRole::Title, TextRole::Subtitle] {
            let w = role.weights();
            assert_eq!(weight(w, 0.0), w.min);
            assert_eq!(weight(w, 1.0), w.max);
            let mut prev = weight(w, 0.0);
            for step in 1..=100 {
                let next = weight(w, step as f64 / 100.0);
                assert!(next >= prev);
                prev = next;
            }
        }
    }

    #[test]
    fn test_blur_curve() {
        assert_eq!(blur(1.0), 0.0);
        assert_eq!(blur(0.5), 0.0);
        assert_eq!(blur(0.75), 0.0);
        assert_eq!(blur(0.0), 1.0);
        assert!(blur(0.49) > 0.0);
        assert!(blur(0.1) > blur(0.3));
    }

    #[test]
    fn test_highlight_is_a_strict_step() {
        assert!(!is_highlighted(0.4));
        assert!(is_highlighted(0.40001));
        assert!(!is_highlighted(0.0));
        assert!(is_highlighted(1.0));
    }

    #[test]
    fn test_pointer_on_glyph_center() {
        for role in [TextRole::Title, TextRole::Subtitle] {
            let style = GlyphStyle::from_distance(role, 0.0);
            assert_eq!(style.weight, role.weights().max);
            assert_eq!(style.blur, 0.0);
            assert_eq!(style.y, -20.0);
            assert_eq!(style.scale, 1.5);
            assert_eq!(style.rotation, 0.0);
            assert!(style.highlight);
        }
    }

    #[test]
    fn test_pointer_far_from_glyph() {
        let i = intensity(300.0);
        assert!((i - (-15f64).exp()).abs() < EPS);
        let style = GlyphStyle::from_distance(TextRole::Title, 300.0);
        assert!((style.weight - 400.0).abs() < 1e-3);
        assert!((style.blur - 1.0).abs() < 1e-3);
        assert!(!style.highlight);
    }

    #[test]
    fn test_tilt_direction_follows_distance_sign() {
        let right = GlyphStyle::from_distance(TextRole::Title, 40.0);
        let left = GlyphStyle::from_distance(TextRole::Title, -40.0);
        assert!(right.rotation > 0.0 && right.skew_x < 0.0);
        assert!(left.rotation < 0.0 && left.skew_x > 0.0);
        assert!((right.rotation + left.rotation).abs() < EPS);
    }

    #[test]
    fn test_glyph_chars_substitutes_spaces() {
        let glyphs = glyph_chars("Hi, I'm");
        assert_eq!(glyphs.len(), 7);
        assert_eq!(glyphs[3], '\u{00A0}');
        assert!(!glyphs.contains(&' '));
        assert!(glyph_chars("").is_empty());
    }

    #[test]
    fn test_center_offset() {
        assert_eq!(center_offset(100.0, 130.0, 20.0), 40.0);
        assert_eq!(center_offset(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_easing_endpoints() {
        let elastic = SETTLE_TRANSITION.easing;
        for easing in [Easing::Linear, Easing::PowerOut(2), elastic] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
        assert!((Easing::PowerOut(2).apply(0.5) - 0.875).abs() < EPS);
        // overshoots before settling
        assert!((1..100).any(|s| elastic.apply(s as f64 / 100.0) > 1.0));
    }

    #[test]
    fn test_tween_sampling() {
        let from = GlyphStyle::at_weight(100.0);
        let to = GlyphStyle::at_weight(300.0);
        let tween = Tween::new(from, to, 1.0, HOVER_TRANSITION.delayed(0.5));
        assert_eq!(tween.sample(1.2), from);
        let mid = tween.sample(1.625);
        assert!(mid.weight > 100.0 && mid.weight < 300.0);
        assert!(!tween.is_finished(1.7));
        assert!(tween.is_finished(1.75));
        assert_eq!(tween.sample(10.0), to);
    }

    #[test]
    fn test_pointer_move_targets_each_glyph() {
        let mut hover = attached(TextRole::Subtitle, 3);
        hover.pointer_move(50.0, &[Some(10.0), Some(50.0), Some(90.0)], 0.0);
        let center = hover.target(1).unwrap();
        assert_eq!(center.weight, 400.0);
        assert!(center.highlight);
        let left = hover.target(0).unwrap();
        let right = hover.target(2).unwrap();
        assert!((left.weight - right.weight).abs() < EPS);
        assert!(left.rotation > 0.0 && right.rotation < 0.0);
        assert_eq!(hover.style_at(1, 0.25), Some(center));
    }

    #[test]
    fn test_unmeasured_glyphs_keep_their_animation() {
        let mut hover = attached(TextRole::Title, 2);
        hover.pointer_move(0.0, &[None, Some(0.0)], 0.0);
        assert_eq!(hover.target(0), Some(GlyphStyle::at_weight(400.0)));
        assert_eq!(hover.target(1).unwrap().weight, 900.0);
    }

    #[test]
    fn test_rapid_moves_retarget_not_queue() {
        let mut hover = attached(TextRole::Title, 1);
        hover.pointer_move(0.0, &[Some(0.0)], 0.0);
        hover.pointer_move(120.0, &[Some(0.0)], 0.05);
        hover.pointer_move(30.0, &[Some(0.0)], 0.1);
        let latest = GlyphStyle::from_distance(TextRole::Title, 30.0);
        assert_eq!(hover.target(0), Some(latest));
        assert!(!hover.is_settled(0.3));
        assert!(hover.is_settled(0.36));
        assert_eq!(hover.style_at(0, 0.36), Some(latest));
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let mut hover = attached(TextRole::Title, 1);
        hover.pointer_move(0.0, &[Some(0.0)], 0.0);
        let midway = hover.style_at(0, 0.1).unwrap();
        hover.pointer_move(300.0, &[Some(0.0)], 0.1);
        assert_eq!(hover.style_at(0, 0.1), Some(midway));
    }

    #[test]
    fn test_pointer_leave_restores_rest() {
        let role = TextRole::Subtitle;
        let mut hover = attached(role, 4);
        hover.pointer_move(12.0, &[Some(0.0), Some(10.0), Some(20.0), Some(30.0)], 0.0);
        hover.pointer_leave(0.1);
        for i in 0..4 {
            assert_rest(hover.target(i).unwrap(), role);
        }
        let end = 0.1 + 0.6 + 3.0 * SETTLE_STAGGER;
        assert!(!hover.is_settled(end - 0.001));
        assert!(hover.is_settled(end + 0.001));
        for i in 0..4 {
            assert_rest(hover.style_at(i, end + 0.001).unwrap(), role);
        }
    }

    #[test]
    fn test_pointer_leave_is_staggered_by_index() {
        let mut hover = attached(TextRole::Title, 3);
        hover.pointer_move(0.0, &[Some(0.0), Some(0.0), Some(0.0)], 0.0);
        let lifted = hover.style_at(2, 1.0).unwrap();
        hover.pointer_leave(1.0);
        // the third glyph has not started settling yet
        assert_eq!(hover.style_at(2, 1.03), Some(lifted));
        assert_ne!(hover.style_at(0, 1.03), Some(lifted));
    }

    #[test]
    fn test_detached_ignores_events() {
        let mut hover = attached(TextRole::Title, 2);
        hover.pointer_move(0.0, &[Some(0.0), Some(10.0)], 0.0);
        let before = (hover.target(0), hover.target(1));
        hover.detach();
        hover.pointer_move(500.0, &[Some(0.0), Some(10.0)], 0.1);
        hover.pointer_leave(0.2);
        assert_eq!((hover.target(0), hover.target(1)), before);
        assert!(!hover.is_attached());
    }

    #[test]
    fn test_new_hover_ignores_events_until_attached() {
        let mut hover = TextHover::new(TextRole::Title, 1, 400.0);
        hover.pointer_move(0.0, &[Some(0.0)], 0.0);
        assert_eq!(hover.target(0), Some(GlyphStyle::at_weight(400.0)));
        assert_eq!(hover.frame(0.0), None);
    }

    #[test]
    fn test_frame_flushes_once_after_settling() {
        let mut hover = attached(TextRole::Title, 2);
        assert_eq!(hover.frame(0.0), None);
        hover.pointer_move(0.0, &[Some(0.0), Some(20.0)], 0.0);
        assert!(hover.frame(0.1).is_some());
        let last = hover.frame(1.0).expect("final frame");
        assert_eq!(last[0], GlyphStyle::from_distance(TextRole::Title, 0.0));
        assert_eq!(hover.frame(1.1), None);
    }

    #[test]
    fn test_frame_restarts_after_new_event() {
        let mut hover = attached(TextRole::Subtitle, 1);
        hover.pointer_move(0.0, &[Some(0.0)], 0.0);
        assert!(hover.frame(1.0).is_some());
        assert_eq!(hover.frame(1.1), None);

        hover.pointer_leave(2.0);
        assert!(hover.frame(2.1).is_some());
        let last = hover.frame(3.0).expect("settled frame");
        assert_eq!(last[0], GlyphStyle::rest(TextRole::Subtitle));
        assert_eq!(hover.frame(3.1), None);
    }

    #[test]
    fn test_pointer_past_text_end_dims_instead_of_resting() {
        // pointer still inside the block container, well to the right of the text
        let role = TextRole::Title;
        let centers = [Some(20.0), Some(60.0), Some(100.0)];
        let mut hover = attached(role, 3);
        hover.pointer_move(60.0, &centers, 0.0);
        hover.pointer_move(400.0, &centers, 0.1);
        for i in 0..3 {
            let style = hover.style_at(i, 1.0).unwrap();
            assert_ne!(style, GlyphStyle::rest(role));
            assert!((style.weight - role.weights().min).abs() < 1e-3);
            assert!(style.blur > 0.99);
            assert!(!style.highlight);
        }
    }

    #[test]
    fn test_css_reflects_highlight() {
        let lit = GlyphStyle::from_distance(TextRole::Title, 0.0).css();
        assert!(lit.contains("color: #faf6f5ff"));
        assert!(lit.contains("text-shadow: 0 0 20px #f7f6f680"));
        assert!(lit.contains("font-weight: 900"));
        let rest = GlyphStyle::rest(TextRole::Title).css();
        assert!(rest.contains("color: inherit"));
        assert!(rest.contains("text-shadow: none"));
        assert!(rest.contains("blur(0.000px)"));
    }
}
