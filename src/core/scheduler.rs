// scheduler.rs - Comparison job planning and fault-isolated execution

use crate::data::layout::WorkspaceLayout;
use crate::output::annotate::{annotate_file, result_header};
use crate::output::ensure_parent_dir;
use crate::tools::traits::Aligner;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

/// Selector keyword meaning "every available reference"
pub const ALL_REFERENCES: &str = "all";

/// Which reference indices take part in a comparison run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceSelector {
    All,
    Named(String),
}

impl FromStr for ReferenceSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(
                "Reference database name must not be empty (use a name or 'all')".to_string(),
            );
        }
        if s.eq_ignore_ascii_case(ALL_REFERENCES) {
            Ok(ReferenceSelector::All)
        } else {
            Ok(ReferenceSelector::Named(s.to_string()))
        }
    }
}

impl Display for ReferenceSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceSelector::All => write!(f, "{}", ALL_REFERENCES),
            ReferenceSelector::Named(name) => write!(f, "{}", name),
        }
    }
}

/// One aligner invocation: a reference index against a query file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonJob {
    pub reference: String,
    pub query: String,
    pub index_path: PathBuf,
    pub query_path: PathBuf,
    pub output_path: PathBuf,
}

impl ComparisonJob {
    pub fn new(layout: &WorkspaceLayout, reference: &str, query: &str) -> Self {
        Self {
            reference: reference.to_string(),
            query: query.to_string(),
            index_path: layout.index_path(reference),
            query_path: layout.query_path(query),
            output_path: layout.result_path(reference, query),
        }
    }
}

/// Build the job list for `selector`.
///
/// `All` yields the full product `indices × queries` (self-comparisons included);
/// a named reference missing from `indices` is an error and no job is planned.
pub fn plan_jobs(
    selector: &ReferenceSelector,
    indices: &BTreeSet<String>,
    queries: &BTreeSet<String>,
    layout: &WorkspaceLayout,
) -> Result<Vec<ComparisonJob>, String> {
    let references: Vec<&String> = match selector {
        ReferenceSelector::All => indices.iter().collect(),
        ReferenceSelector::Named(name) => {
            let found = indices.get(name).ok_or_else(|| {
                format!(
                    "Reference database {}.dmnd not found in {}",
                    name,
                    layout.indices.display()
                )
            })?;
            vec![found]
        }
    };

    Ok(references
        .into_iter()
        .flat_map(|reference| {
            queries
                .iter()
                .map(move |query| ComparisonJob::new(layout, reference, query))
        })
        .collect())
}

/// Outcome of one job; `Ok(true)` when the header was added,
/// `Ok(false)` when it was already present
#[derive(Debug)]
pub struct JobOutcome {
    pub job: ComparisonJob,
    pub result: Result<bool, String>,
}

/// Outcomes of a whole batch, in job order
#[derive(Debug, Default)]
pub struct ScheduleReport {
    pub outcomes: Vec<JobOutcome>,
}

impl ScheduleReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&ComparisonJob, &str)> {
        self.outcomes.iter().filter_map(|o| match &o.result {
            Err(e) => Some((&o.job, e.as_str())),
            Ok(_) => None,
        })
    }
}

/// Run one job: create its directory, invoke the aligner, annotate the output
pub fn run_job(job: &ComparisonJob, aligner: &dyn Aligner) -> Result<bool, String> {
    ensure_parent_dir(&job.output_path)?;
    aligner.align(&job.index_path, &job.query_path, &job.output_path)?;
    if !job.output_path.is_file() {
        return Err(format!(
            "{} produced no output file at {}",
            aligner.name(),
            job.output_path.display()
        ));
    }
    annotate_file(&job.output_path, &result_header())
}

/// Run every job in order. A failing job is recorded and the batch continues.
pub fn run_jobs(jobs: &[ComparisonJob], aligner: &dyn Aligner) -> ScheduleReport {
    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} jobs ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut report = ScheduleReport::default();
    for job in jobs {
        pb.set_message(format!("{} vs {}", job.reference, job.query));
        let result = run_job(job, aligner);
        match &result {
            Ok(_) => pb.println(format!(
                "✅ Comparison completed for {} vs {}. Results saved in {}",
                job.reference,
                job.query,
                job.output_path.display()
            )),
            Err(e) => pb.println(format!(
                "❌ Error during analysis of {} and {}: {}",
                job.reference, job.query, e
            )),
        }
        report.outcomes.push(JobOutcome {
            job: job.clone(),
            result,
        });
        pb.inc(1);
    }
    pb.finish_with_message(format!(
        "{} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    ));

    report
}
