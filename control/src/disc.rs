//! Validation of discs against a color and size rule.
//!
//! Detection of circles in a picture and classification of their color are
//! done elsewhere. This module takes the detected circles with their colors,
//! drops those touching borders of the frame, measures them, and decides
//! whether each of them and the frame as a whole are valid.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::log;

/// Maximum number of discs evaluated in a single frame.
pub const MAX_DISCS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Red,
    Green,
    Blue,
    Unknown,
}

impl Color {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Unknown => "unknown",
        }
    }
}

/// Circle detected in a frame, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Dimensions of the frame and the margin circles must keep from its borders.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for Frame {
    fn default() -> Self {
        Self::for_size_rule(&SizeRule::PIXELS)
    }
}

impl Frame {
    /// Camera frame of 640x480 with the margin used by the given size rule.
    #[must_use]
    pub fn for_size_rule(size: &SizeRule) -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            margin: size.edge_margin(),
        }
    }

    /// Whether the whole circle lies inside the frame, not touching the margin.
    #[must_use]
    pub fn contains(&self, circle: &Circle) -> bool {
        circle.x - circle.radius >= self.margin
            && circle.y - circle.radius >= self.margin
            && circle.x + circle.radius <= self.width - self.margin
            && circle.y + circle.radius <= self.height - self.margin
    }
}

/// Allowed range of disc diameters, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SizeRule {
    /// Diameter measured directly in pixels.
    Pixels { min: f32, max: f32 },
    /// Diameter converted to whole millimetres. With non-positive
    /// `mm_per_pixel` the camera is considered uncalibrated and any size
    /// passes.
    Millimetres { mm_per_pixel: f32, min: i32, max: i32 },
}

impl SizeRule {
    pub const PIXELS: Self = Self::Pixels {
        min: 69.0,
        max: 71.0,
    };

    pub const UNCALIBRATED_MILLIMETRES: Self = Self::Millimetres {
        mm_per_pixel: 0.0,
        min: 20,
        max: 30,
    };

    /// Distance circles must keep from the frame borders.
    ///
    /// Millimetre measurement needs a bit more of the disc's surroundings.
    #[must_use]
    pub fn edge_margin(&self) -> f32 {
        match self {
            Self::Pixels { .. } => 10.0,
            Self::Millimetres { .. } => 12.0,
        }
    }

    /// Diameter in whole millimetres, if the rule is calibrated for that.
    ///
    /// Halfway values are rounded away from zero.
    #[must_use]
    pub fn millimetres(&self, diameter_px: f32) -> Option<i32> {
        match *self {
            Self::Millimetres { mm_per_pixel, .. } if mm_per_pixel > 0.0 => {
                Some(libm::roundf(diameter_px * mm_per_pixel) as i32)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn accepts(&self, diameter_px: f32) -> bool {
        match *self {
            Self::Pixels { min, max } => diameter_px >= min && diameter_px <= max,
            Self::Millimetres { min, max, .. } => self
                .millimetres(diameter_px)
                .map_or(true, |mm| mm >= min && mm <= max),
        }
    }
}

/// Rule a disc must pass to be valid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rule {
    pub allowed: &'static [Color],
    pub size: SizeRule,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            allowed: &[Color::Green, Color::Blue],
            size: SizeRule::PIXELS,
        }
    }
}

/// Reason of a disc being invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Defect {
    Color,
    /// Diameter in pixels out of range.
    PixelSize,
    /// Diameter in millimetres out of range.
    Size,
}

impl Defect {
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Defect::Color => "INVALID: color",
            Defect::PixelSize => "INVALID: size(px)",
            Defect::Size => "INVALID: size",
        }
    }
}

/// Measured and evaluated disc.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Disc {
    pub circle: Circle,
    pub color: Color,
    pub diameter_px: f32,
    pub diameter_mm: Option<i32>,
    pub defect: Option<Defect>,
}

impl Disc {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.defect.is_none()
    }

    /// Short description of the disc, e.g. `green  25 mm`.
    ///
    /// Pixel diameters are rounded half to even.
    #[must_use]
    pub fn label(&self) -> String<24> {
        let mut label = String::new();
        // The capacity fits the longest color name and any diameter.
        let _ = match self.diameter_mm {
            Some(mm) => write!(label, "{}  {} mm", self.color.name(), mm),
            None => write!(
                label,
                "{}  {} px",
                self.color.name(),
                libm::rintf(self.diameter_px) as i32
            ),
        };
        label
    }
}

/// Verdict over all discs of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    /// There is no disc to evaluate.
    Waiting,
    Valid,
    Invalid,
}

impl Verdict {
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Verdict::Waiting => "waiting...",
            Verdict::Valid => "valid",
            Verdict::Invalid => "invalid",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    /// Discs sorted from the top of the frame to the bottom.
    pub discs: Vec<Disc, MAX_DISCS>,
    pub verdict: Verdict,
}

impl Inspection {
    #[must_use]
    pub fn invalid_count(&self) -> usize {
        self.discs.iter().filter(|d| !d.is_valid()).count()
    }
}

/// Measure a single disc and check it against the rule.
///
/// Discs of unknown color are not considered to be discs at all and `None` is
/// returned for them.
#[must_use]
pub fn inspect(circle: Circle, color: Color, rule: &Rule) -> Option<Disc> {
    if color == Color::Unknown {
        return None;
    }

    let diameter_px = 2.0 * circle.radius;
    let color_ok = rule.allowed.contains(&color);
    let size_ok = rule.size.accepts(diameter_px);

    let defect = if !color_ok {
        Some(Defect::Color)
    } else if !size_ok {
        match rule.size {
            SizeRule::Pixels { .. } => Some(Defect::PixelSize),
            SizeRule::Millimetres { .. } => Some(Defect::Size),
        }
    } else {
        None
    };

    Some(Disc {
        circle,
        color,
        diameter_px,
        diameter_mm: rule.size.millimetres(diameter_px),
        defect,
    })
}

/// Evaluate all circles detected in a frame.
pub fn inspect_frame(
    frame: &Frame,
    candidates: impl IntoIterator<Item = (Circle, Color)>,
    rule: &Rule,
) -> Inspection {
    let mut discs: Vec<Disc, MAX_DISCS> = Vec::new();

    for (circle, color) in candidates {
        if !frame.contains(&circle) {
            continue;
        }
        if let Some(disc) = inspect(circle, color, rule) {
            if discs.push(disc).is_err() {
                log::debug!("Too many discs in a frame, ignoring the rest");
                break;
            }
        }
    }

    discs.sort_unstable_by(|a, b| a.circle.y.total_cmp(&b.circle.y));

    let verdict = if discs.is_empty() {
        Verdict::Waiting
    } else if discs.iter().all(Disc::is_valid) {
        Verdict::Valid
    } else {
        Verdict::Invalid
    };

    Inspection { discs, verdict }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(x: f32, y: f32, radius: f32) -> Circle {
        Circle { x, y, radius }
    }

    #[test]
    fn when_circle_touches_margin_it_is_outside_of_frame() {
        let frame = Frame::default();
        assert!(frame.contains(&circle(100.0, 100.0, 35.0)));
        assert!(!frame.contains(&circle(40.0, 100.0, 35.0)));
        assert!(!frame.contains(&circle(100.0, 460.0, 35.0)));
        assert!(!frame.contains(&circle(600.0, 100.0, 35.0)));
        assert!(frame.contains(&circle(47.0, 47.0, 35.0)));
    }

    #[test]
    fn when_color_is_unknown_it_is_not_a_disc() {
        assert_eq!(
            inspect(circle(100.0, 100.0, 35.0), Color::Unknown, &Rule::default()),
            None
        );
    }

    #[test]
    fn when_color_and_size_pass_the_disc_is_valid() {
        let disc = inspect(circle(100.0, 100.0, 35.0), Color::Green, &Rule::default()).unwrap();
        assert!(disc.is_valid());
        assert_relative_eq!(disc.diameter_px, 70.0);
        assert_eq!(disc.diameter_mm, None);
        assert_eq!(disc.label().as_str(), "green  70 px");
    }

    #[test]
    fn when_color_is_not_allowed_it_is_reported_before_size() {
        let disc = inspect(circle(100.0, 100.0, 10.0), Color::Red, &Rule::default()).unwrap();
        assert_eq!(disc.defect, Some(Defect::Color));
        assert_eq!(Defect::Color.tag(), "INVALID: color");
    }

    #[test]
    fn when_pixel_size_is_out_of_range_the_disc_is_invalid() {
        let rule = Rule::default();
        let small = inspect(circle(100.0, 100.0, 34.0), Color::Blue, &rule).unwrap();
        let large = inspect(circle(100.0, 100.0, 36.0), Color::Blue, &rule).unwrap();
        let edge = inspect(circle(100.0, 100.0, 35.5), Color::Blue, &rule).unwrap();
        assert_eq!(small.defect, Some(Defect::PixelSize));
        assert_eq!(large.defect, Some(Defect::PixelSize));
        assert_eq!(Defect::PixelSize.tag(), "INVALID: size(px)");
        assert!(edge.is_valid());
    }

    #[test]
    fn when_size_rule_changes_the_frame_margin_follows() {
        let pixels = Frame::for_size_rule(&SizeRule::PIXELS);
        let millimetres = Frame::for_size_rule(&SizeRule::UNCALIBRATED_MILLIMETRES);
        assert_eq!(Frame::default(), pixels);
        assert_relative_eq!(pixels.margin, 10.0);
        assert_relative_eq!(millimetres.margin, 12.0);

        // 11 px away from the left border.
        let close = circle(46.0, 100.0, 35.0);
        assert!(pixels.contains(&close));
        assert!(!millimetres.contains(&close));
    }

    #[test]
    fn when_pixel_diameter_is_halfway_label_rounds_to_even() {
        let rule = Rule::default();
        let lower = inspect(circle(100.0, 100.0, 35.25), Color::Green, &rule).unwrap();
        let upper = inspect(circle(100.0, 100.0, 34.75), Color::Green, &rule).unwrap();
        assert_eq!(lower.label().as_str(), "green  70 px");
        assert_eq!(upper.label().as_str(), "green  70 px");
    }

    #[test]
    fn when_calibrated_in_millimetres_diameter_is_rounded() {
        let rule = Rule {
            size: SizeRule::Millimetres {
                mm_per_pixel: 0.12,
                min: 20,
                max: 30,
            },
            ..Rule::default()
        };
        // 2 * 104 px * 0.12 = 24.96 mm
        let disc = inspect(circle(200.0, 200.0, 104.0), Color::Green, &rule).unwrap();
        assert_eq!(disc.diameter_mm, Some(25));
        assert!(disc.is_valid());
        assert_eq!(disc.label().as_str(), "green  25 mm");

        // 2 * 150 px * 0.12 = 36 mm
        let disc = inspect(circle(200.0, 200.0, 150.0), Color::Green, &rule).unwrap();
        assert_eq!(disc.defect, Some(Defect::Size));
        assert_eq!(Defect::Size.tag(), "INVALID: size");

        // 2 * 85.625 px * 0.12 = 20.55 mm
        let disc = inspect(circle(200.0, 200.0, 85.625), Color::Green, &rule).unwrap();
        assert_eq!(disc.diameter_mm, Some(21));
    }

    #[test]
    fn when_millimetres_are_not_calibrated_size_always_passes() {
        let rule = Rule {
            size: SizeRule::UNCALIBRATED_MILLIMETRES,
            ..Rule::default()
        };
        let disc = inspect(circle(200.0, 200.0, 5.0), Color::Blue, &rule).unwrap();
        assert!(disc.is_valid());
        assert_eq!(disc.diameter_mm, None);
    }

    #[test]
    fn when_frame_has_no_discs_it_is_waiting() {
        let inspection = inspect_frame(
            &Frame::default(),
            [
                (circle(300.0, 200.0, 35.0), Color::Unknown),
                (circle(5.0, 5.0, 35.0), Color::Green),
            ],
            &Rule::default(),
        );
        assert!(inspection.discs.is_empty());
        assert_eq!(inspection.verdict, Verdict::Waiting);
        assert_eq!(inspection.verdict.text(), "waiting...");
    }

    #[test]
    fn when_any_disc_is_invalid_the_frame_is_invalid() {
        let inspection = inspect_frame(
            &Frame::default(),
            [
                (circle(300.0, 300.0, 35.0), Color::Green),
                (circle(300.0, 100.0, 35.0), Color::Red),
            ],
            &Rule::default(),
        );
        assert_eq!(inspection.verdict, Verdict::Invalid);
        assert_eq!(inspection.invalid_count(), 1);
    }

    #[test]
    fn when_all_discs_are_valid_the_frame_is_valid() {
        let inspection = inspect_frame(
            &Frame::default(),
            [
                (circle(300.0, 300.0, 35.0), Color::Green),
                (circle(100.0, 100.0, 35.0), Color::Blue),
            ],
            &Rule::default(),
        );
        assert_eq!(inspection.verdict, Verdict::Valid);
        assert_eq!(inspection.verdict.text(), "valid");
    }

    #[test]
    fn discs_are_sorted_from_top_to_bottom() {
        let inspection = inspect_frame(
            &Frame::default(),
            [
                (circle(100.0, 400.0, 35.0), Color::Green),
                (circle(300.0, 100.0, 35.0), Color::Blue),
                (circle(500.0, 250.0, 35.0), Color::Red),
            ],
            &Rule::default(),
        );
        let colors: std::vec::Vec<Color> = inspection.discs.iter().map(|d| d.color).collect();
        assert_eq!(colors, [Color::Blue, Color::Red, Color::Green]);
    }
}
