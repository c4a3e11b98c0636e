//! Text rendering of clearance results.

use clap::ValueEnum;
use drillpoint_clearance::{AngleOutput, AngleResult};
use std::fmt::Write;

/// Output language for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Lang {
    /// English
    #[default]
    En,
    /// Bulgarian
    Bg,
}

impl Lang {
    fn no_real_solution(self) -> &'static str {
        match self {
            Lang::En => "No real solution",
            Lang::Bg => "Няма реално решение",
        }
    }

    fn in_range(self) -> &'static str {
        match self {
            Lang::En => "OK",
            Lang::Bg => "ДОБРЕ",
        }
    }

    fn out_of_range(self) -> &'static str {
        match self {
            Lang::En => "OUTSIDE",
            Lang::Bg => "ВЪН",
        }
    }
}

/// Accepted clearance band in degrees, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn contains(&self, alpha: f64) -> bool {
        alpha >= self.min && alpha <= self.max
    }
}

/// Render one line per point, then the shared offset.
///
/// ```text
/// alpha 1 = 15.3660°  [OK]
/// alpha 2 = No real solution
/// h = 35.3806
/// ```
pub fn render_text(output: &AngleOutput, lang: Lang, range: Option<Range>) -> String {
    let mut out = String::new();
    for (i, result) in output.results().iter().enumerate() {
        let _ = writeln!(out, "alpha {} = {}", i + 1, render_angle(result, lang, range));
    }
    if let Some(h) = output.h() {
        let _ = writeln!(out, "h = {h:.4}");
    }
    out
}

fn render_angle(result: &AngleResult, lang: Lang, range: Option<Range>) -> String {
    if !result.has_real_solution() {
        return lang.no_real_solution().to_string();
    }
    let alpha = result.alpha_degrees;
    match range {
        Some(r) => {
            let label = if r.contains(alpha) {
                lang.in_range()
            } else {
                lang.out_of_range()
            };
            format!("{alpha:.4}°  [{label}]")
        }
        None => format!("{alpha:.4}°"),
    }
}
