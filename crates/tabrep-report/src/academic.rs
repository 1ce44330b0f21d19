//! Academic report: one row per student with attendance, grades, risk and
//! cohort participation.
//!
//! The three sources (students, sessions, grades) are all-or-nothing: if any
//! file is missing the run is skipped with a diagnostic and nothing is
//! written.
//!
//! Each student's cohort is the latest (`max`) grade level and period seen
//! across that student's sessions. Students with sessions in several periods
//! are counted against the latest one only.

use std::collections::BTreeSet;
use std::path::PathBuf;

use polars::prelude::*;
use tracing::{debug, info, info_span, warn};

use tabrep_ingest::{DelimitedOptions, read_delimited};
use tabrep_model::columns::{academic_report, grade, session, student};
use tabrep_model::{Diagnostic, ReportSettings, SourceFiles};
use tabrep_transform::{
    SourceFrame, column_names, fill_nulls_with_zero, fill_or_add_i64, has_column, left_join_on,
    order_columns, pivot_wide_mean, with_period_column, with_ratio_column,
};

use crate::error::Result;
use crate::output::write_report_csv;

/// The three loaded academic sources.
#[derive(Debug, Clone)]
pub struct AcademicSources {
    pub students: SourceFrame,
    pub sessions: SourceFrame,
    pub grades: SourceFrame,
}

/// Everything an academic report run produced.
#[derive(Debug, Clone, Default)]
pub struct AcademicReportOutcome {
    /// `None` when the run was skipped for missing sources.
    pub sources: Option<AcademicSources>,
    pub report: Option<DataFrame>,
    pub output_path: Option<PathBuf>,
    /// Subject-area columns as named in the report, sorted by area.
    pub subject_columns: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Sources among the academic triple that do not exist.
pub fn missing_academic_sources(files: &SourceFiles) -> Vec<PathBuf> {
    files
        .academic_sources()
        .into_iter()
        .filter(|path| !path.exists())
        .collect()
}

pub fn load_academic_sources(files: &SourceFiles) -> Result<AcademicSources> {
    let plain = DelimitedOptions::default();
    let students_path = files.students();
    let sessions_path = files.sessions();
    let grades_path = files.grades();

    let students = read_delimited(&students_path, &plain)?;
    let sessions = read_delimited(&sessions_path, &plain.with_parse_dates(true))?;
    let grades = read_delimited(&grades_path, &plain)?;
    info!(
        students = students.height(),
        sessions = sessions.height(),
        grades = grades.height(),
        "loaded academic sources"
    );
    Ok(AcademicSources {
        students: SourceFrame::from_file("Students", students_path, students),
        sessions: SourceFrame::from_file("Sessions", sessions_path, sessions),
        grades: SourceFrame::from_file("Grades", grades_path, grades),
    })
}

/// Attended sessions per student: count and total minutes.
pub fn attendance_summary(sessions: &DataFrame) -> PolarsResult<DataFrame> {
    sessions
        .clone()
        .lazy()
        .filter(col(session::ATTENDED).cast(DataType::Int64).eq(lit(1)))
        .group_by_stable([col(session::STUDENT_ID)])
        .agg([
            col(session::SESSION_ID)
                .count()
                .alias(academic_report::SESSIONS_ATTENDED),
            col(session::DURATION_MINUTES)
                .sum()
                .alias(academic_report::TOTAL_MINUTES),
        ])
        .collect()
}

/// Mean score per student and subject area, one column per area.
pub fn subject_averages(grades: &DataFrame) -> PolarsResult<DataFrame> {
    pivot_wide_mean(grades, grade::STUDENT_ID, grade::SUBJECT_AREA, grade::SCORE)
}

/// Mean of every grade row per student, regardless of subject area.
pub fn global_averages(grades: &DataFrame) -> PolarsResult<DataFrame> {
    grades
        .clone()
        .lazy()
        .group_by_stable([col(grade::STUDENT_ID)])
        .agg([col(grade::SCORE)
            .cast(DataType::Float64)
            .mean()
            .alias(academic_report::GLOBAL_AVERAGE)])
        .collect()
}

/// Merges global averages onto students and derives the `risk` flag.
///
/// Missing absences take `settings.default_absences`. A student without
/// grades has a null average, which never triggers the average rule.
pub fn flag_risk(
    students: &DataFrame,
    averages: &DataFrame,
    settings: &ReportSettings,
) -> PolarsResult<DataFrame> {
    let merged = left_join_on(students, averages, &[student::STUDENT_ID])?;
    let merged = fill_or_add_i64(merged, student::ABSENCES, settings.default_absences)?;
    let below_average = col(academic_report::GLOBAL_AVERAGE)
        .lt(lit(settings.min_average))
        .fill_null(lit(false));
    merged
        .lazy()
        .with_column(
            col(student::ABSENCES)
                .gt(lit(settings.absence_limit))
                .or(below_average)
                .alias(academic_report::RISK),
        )
        .collect()
}

/// Sessions with a `grade_level` column, taken from the student table when
/// the session source does not carry one.
pub fn sessions_with_grade_level(
    sessions: &DataFrame,
    students: &DataFrame,
) -> PolarsResult<DataFrame> {
    if has_column(sessions, session::GRADE_LEVEL) {
        return Ok(sessions.clone());
    }
    let levels = students.select([student::STUDENT_ID, student::GRADE_LEVEL])?;
    left_join_on(sessions, &levels, &[session::STUDENT_ID])
}

/// Adds the quarter `period` of each session date.
pub fn session_periods(sessions: &DataFrame) -> PolarsResult<DataFrame> {
    with_period_column(sessions, session::DATE, academic_report::PERIOD)
}

/// Distinct sessions per (grade level, period) cohort.
pub fn cohort_totals(sessions: &DataFrame) -> PolarsResult<DataFrame> {
    sessions
        .clone()
        .lazy()
        .group_by_stable([col(session::GRADE_LEVEL), col(academic_report::PERIOD)])
        .agg([col(session::SESSION_ID)
            .n_unique()
            .alias(academic_report::SESSIONS_TOTAL_GROUP)])
        .select([
            col(session::GRADE_LEVEL).alias(academic_report::COHORT_GRADE_LEVEL),
            col(academic_report::PERIOD),
            col(academic_report::SESSIONS_TOTAL_GROUP),
        ])
        .collect()
}

/// Each student's representative cohort: the max grade level and max period
/// over that student's sessions.
pub fn student_cohorts(sessions: &DataFrame) -> PolarsResult<DataFrame> {
    sessions
        .clone()
        .lazy()
        .group_by_stable([col(session::STUDENT_ID)])
        .agg([
            col(session::GRADE_LEVEL)
                .max()
                .alias(academic_report::COHORT_GRADE_LEVEL),
            col(academic_report::PERIOD)
                .max()
                .alias(academic_report::PERIOD),
        ])
        .collect()
}

/// Renames pivoted subject columns that would replace a column in `reserved`.
///
/// A clashing area becomes `{area}_score`, numbered when that is taken too.
/// The `student_id` key is left alone.
pub fn separate_subject_columns(
    mut subjects: DataFrame,
    reserved: &[String],
) -> PolarsResult<DataFrame> {
    let mut taken: BTreeSet<String> = reserved.iter().cloned().collect();
    for name in column_names(&subjects) {
        if name == grade::STUDENT_ID {
            continue;
        }
        if !taken.contains(&name) {
            taken.insert(name);
            continue;
        }
        let base = format!("{name}_{}", grade::SCORE);
        let mut renamed = base.clone();
        let mut counter = 2;
        while taken.contains(&renamed) || has_column(&subjects, &renamed) {
            renamed = format!("{base}_{counter}");
            counter += 1;
        }
        debug!(subject = %name, column = %renamed, "subject area renamed to avoid a clash");
        subjects.rename(&name, renamed.as_str().into())?;
        taken.insert(renamed);
    }
    Ok(subjects)
}

/// Builds the academic report from already-loaded tables.
pub fn assemble_academic_report(
    students: &DataFrame,
    sessions: &DataFrame,
    grades: &DataFrame,
    settings: &ReportSettings,
) -> Result<DataFrame> {
    assemble_with_subjects(students, sessions, grades, settings).map(|(report, _)| report)
}

/// The report plus the names its subject-area columns ended up with.
fn assemble_with_subjects(
    students: &DataFrame,
    sessions: &DataFrame,
    grades: &DataFrame,
    settings: &ReportSettings,
) -> Result<(DataFrame, Vec<String>)> {
    let attendance = attendance_summary(sessions)?;
    let flagged = flag_risk(students, &global_averages(grades)?, settings)?;

    let sessions = session_periods(&sessions_with_grade_level(sessions, students)?)?;
    let totals = cohort_totals(&sessions)?;
    let cohorts = student_cohorts(&sessions)?;

    let mut reserved = column_names(&flagged);
    for frame in [&attendance, &cohorts, &totals] {
        reserved.extend(column_names(frame));
    }
    reserved.push(academic_report::PARTICIPATION_INDEX.to_string());
    let subjects = separate_subject_columns(subject_averages(grades)?, &reserved)?;
    let subject_columns: Vec<String> = column_names(&subjects)
        .into_iter()
        .filter(|name| name != grade::STUDENT_ID)
        .collect();
    debug!(
        cohorts = totals.height(),
        subject_columns = subject_columns.len(),
        "derived academic aggregates"
    );

    let mut report = left_join_on(&flagged, &attendance, &[student::STUDENT_ID])?;
    report = left_join_on(&report, &subjects, &[student::STUDENT_ID])?;
    report = left_join_on(&report, &cohorts, &[student::STUDENT_ID])?;
    report = left_join_on(
        &report,
        &totals,
        &[academic_report::COHORT_GRADE_LEVEL, academic_report::PERIOD],
    )?;
    report = fill_nulls_with_zero(report, &[academic_report::SESSIONS_ATTENDED])?;
    report = with_ratio_column(
        &report,
        academic_report::SESSIONS_ATTENDED,
        academic_report::SESSIONS_TOTAL_GROUP,
        academic_report::PARTICIPATION_INDEX,
    )?;
    let report = order_columns(&report, &academic_report::LEADING)?;
    Ok((report, subject_columns))
}

/// Runs the academic pipeline end to end under `settings.base_dir`.
pub fn run_academic_report(settings: &ReportSettings) -> Result<AcademicReportOutcome> {
    settings.validate()?;
    let files = settings.files();
    let span = info_span!("academic_report", base_dir = %files.base_dir().display());
    let _guard = span.enter();

    let missing = missing_academic_sources(&files);
    if !missing.is_empty() {
        let names: Vec<String> = missing
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        warn!(missing = %names.join(", "), "academic report skipped");
        let mut diagnostics: Vec<Diagnostic> =
            missing.into_iter().map(Diagnostic::missing_source).collect();
        diagnostics.push(Diagnostic::report_skipped(format!(
            "academic report needs students, sessions and grades in {}; missing {}",
            files.base_dir().display(),
            names.join(", ")
        )));
        return Ok(AcademicReportOutcome {
            diagnostics,
            ..AcademicReportOutcome::default()
        });
    }

    let sources = load_academic_sources(&files)?;
    let (mut report, subject_columns) = assemble_with_subjects(
        &sources.students.data,
        &sources.sessions.data,
        &sources.grades.data,
        settings,
    )?;
    let path = files.academic_report();
    write_report_csv(&mut report, &path)?;
    info!(students = report.height(), "academic report complete");

    Ok(AcademicReportOutcome {
        sources: Some(sources),
        report: Some(report),
        output_path: Some(path),
        subject_columns,
        diagnostics: Vec::new(),
    })
}
