use log::info;

use crate::error::{GenerateError, NormalizationWarning};
use crate::parser::RawSchedule;
use crate::render::{render_svg, BellSchedule, RenderOptions, SvgDocument, DEFAULT_TITLE};
use crate::schedule::{compose_grid, normalize, ScheduleGrid, TieBreakPolicy, DEFAULT_FREE_PERIOD_NAME};

/// Everything a generation request can configure
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    pub title: String,
    /// Shown on X-Day in place of Foundations; empty disables the swap
    pub free_period_name: String,
    pub exact_dimensions: bool,
    pub bell_schedule: BellSchedule,
    pub policy: TieBreakPolicy,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            free_period_name: DEFAULT_FREE_PERIOD_NAME.to_string(),
            exact_dimensions: true,
            bell_schedule: BellSchedule::default(),
            policy: TieBreakPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedSchedule {
    pub grid: ScheduleGrid,
    pub svg: SvgDocument,
    pub warnings: Vec<NormalizationWarning>,
}

/// Runs the full pipeline: normalize, resolve, lay out, substitute and
/// render. The same input always yields the same document.
pub fn generate_schedule(raw: &RawSchedule, options: &GenerateOptions) -> Result<GeneratedSchedule, GenerateError> {
    let normalized = normalize(raw)?;
    let grid = compose_grid(&normalized.assignments, &options.policy, options.free_period_name.trim());

    let render_options = RenderOptions {
        title: options.title.clone(),
        bell_schedule: options.bell_schedule.clone(),
        exact_dimensions: options.exact_dimensions,
    };
    let svg = render_svg(&grid, &render_options)?;

    info!(
        "Generated '{}' ({} warnings, {} bytes)",
        options.title,
        normalized.warnings.len(),
        svg.as_str().len()
    );

    Ok(GeneratedSchedule {
        grid,
        svg,
        warnings: normalized.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::schedule::Day;

    fn raw_with(periods: u8) -> RawSchedule {
        let mut raw = RawSchedule::new();
        for n in 1..=periods {
            raw.push_entry(&n.to_string(), &format!("Class {}", n), "", "");
        }
        raw
    }

    #[test]
    fn generates_full_schedule() {
        let generated = generate_schedule(&raw_with(8), &GenerateOptions::default()).unwrap();
        assert!(generated.warnings.is_empty());
        assert_eq!(generated.grid.column(Day::XDay).cells.len(), 8);
        assert!(generated.svg.as_str().contains(">Class 8</text>"));
    }

    #[test]
    fn validation_failure_stops_before_rendering() {
        let err = generate_schedule(&raw_with(5), &GenerateOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Validation(ValidationError::TooManyEmptyPeriods { count: 3, .. })
        ));
    }

    #[test]
    fn free_period_name_is_trimmed() {
        let mut raw = raw_with(8);
        raw.insert_raw("3", serde_json::json!({"name": ["Foundations"]}));
        let options = GenerateOptions {
            free_period_name: "  Free Block ".to_string(),
            ..Default::default()
        };

        let generated = generate_schedule(&raw, &options).unwrap();
        let cell = generated.grid.cell(Day::XDay, 2).unwrap();
        assert_eq!(cell.resolved.primary.name, "Free Block");
    }
}
