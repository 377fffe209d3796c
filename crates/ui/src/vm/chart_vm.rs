use std::f64::consts::{FRAC_PI_2, TAU};

const CENTER: f64 = 100.0;
const RADIUS: f64 = 80.0;

/// One sector of the score donut, ready to drop into an `svg path`.
#[derive(Clone, Debug, PartialEq)]
pub struct DonutSlice {
    pub path: String,
    pub class: &'static str,
}

/// Sector paths for the correct/wrong/unanswered breakdown, clockwise from
/// twelve o'clock. Zero-count categories produce no slice; an empty attempt
/// produces no chart.
#[must_use]
pub fn donut_slices(correct: u32, wrong: u32, unanswered: u32) -> Vec<DonutSlice> {
    let total = correct + wrong + unanswered;
    if total == 0 {
        return Vec::new();
    }

    let categories = [
        (correct, "chart-slice chart-slice--correct"),
        (wrong, "chart-slice chart-slice--wrong"),
        (unanswered, "chart-slice chart-slice--unanswered"),
    ];

    let mut slices = Vec::new();
    let mut cursor = 0.0_f64;
    for (count, class) in categories {
        if count == 0 {
            continue;
        }
        let span = f64::from(count) / f64::from(total);
        // An arc whose endpoints coincide renders as nothing; pull a full
        // circle's end fractionally short instead.
        let end = if span >= 1.0 {
            cursor + 0.9999
        } else {
            cursor + span
        };
        slices.push(DonutSlice {
            path: sector_path(CENTER, CENTER, RADIUS, cursor, end),
            class,
        });
        cursor += span;
    }
    slices
}

/// Pie sector from `start` to `end`, both as fractions of a full turn
/// measured clockwise from twelve o'clock.
#[must_use]
pub fn sector_path(cx: f64, cy: f64, r: f64, start: f64, end: f64) -> String {
    let (sx, sy) = point_at(cx, cy, r, start);
    let (ex, ey) = point_at(cx, cy, r, end);
    let large_arc = i32::from(end - start > 0.5);
    format!("M {cx:.2} {cy:.2} L {sx:.2} {sy:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {ex:.2} {ey:.2} Z")
}

fn point_at(cx: f64, cy: f64, r: f64, fraction: f64) -> (f64, f64) {
    let angle = fraction * TAU - FRAC_PI_2;
    (cx + r * angle.cos(), cy + r * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_skip_empty_categories() {
        let slices = donut_slices(3, 0, 1);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].class, "chart-slice chart-slice--correct");
        assert_eq!(slices[1].class, "chart-slice chart-slice--unanswered");
    }

    #[test]
    fn empty_attempt_has_no_chart() {
        assert!(donut_slices(0, 0, 0).is_empty());
    }

    #[test]
    fn majority_slice_sets_the_large_arc_flag() {
        let slices = donut_slices(3, 1, 0);
        assert!(slices[0].path.contains("A 80.00 80.00 0 1 1"));
        assert!(slices[1].path.contains("A 80.00 80.00 0 0 1"));
    }

    #[test]
    fn all_correct_still_draws_a_visible_slice() {
        let slices = donut_slices(30, 0, 0);
        assert_eq!(slices.len(), 1);
        // Endpoints must not coincide or the arc vanishes.
        let path = &slices[0].path;
        let start = "L 100.00 20.00";
        assert!(path.contains(start));
        assert!(!path.ends_with("100.00 20.00 Z"));
    }

    #[test]
    fn quarter_sector_lands_on_three_oclock() {
        let path = sector_path(100.0, 100.0, 80.0, 0.0, 0.25);
        assert!(path.starts_with("M 100.00 100.00 L 100.00 20.00"));
        assert!(path.contains("180.00 100.00"));
    }
}
