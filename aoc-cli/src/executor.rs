//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Set on the first part solved from each parse
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Shared, read-only state every worker needs
struct ExecutionContext {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    context: ExecutionContext,
    thread_pool: rayon::ThreadPool,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            context: ExecutionContext {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Input store the executor reads from
    pub fn inputs(&self) -> &InputStore {
        &self.context.inputs
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let ctx = &self.context;
        ctx.registry
            .storage()
            .iter_info()
            .filter(|info| ctx.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| ctx.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(ctx.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let ctx = &self.context;

        match ctx.parallelize_by {
            ParallelizeBy::Sequential => work_items
                .iter()
                .map(|work| run_work(work, &tx, ctx).err())
                .fold(None, ArcExecutorError::merge)
                .map_or(Ok(()), Err),
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.thread_pool.install(|| {
                    by_year
                        .into_par_iter()
                        .map(|items| {
                            items
                                .iter()
                                .map(|work| run_work(work, &tx, ctx).err())
                                .fold(None, ArcExecutorError::merge)
                        })
                        .reduce(|| None, ArcExecutorError::merge)
                        .map_or(Ok(()), Err)
                })
            }
            // Part differs from Day inside run_work
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                work_items
                    .par_iter()
                    .map(|work| run_work(work, &tx, ctx).err())
                    .reduce(|| None, ArcExecutorError::merge)
                    .map_or(Ok(()), Err)
            }),
        }
    }
}

/// Restrict a solver's parts to the part filter
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if (1..=max_parts).contains(&p) => p..=p,
        #[allow(clippy::reversed_empty_ranges)]
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Send the same failure for every part of a work item
fn send_failure(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    error: ArcExecutorError,
) -> Result<(), ArcExecutorError> {
    for part in work.parts.clone() {
        send(tx, SolverResult::failed(work.year, work.day, part, error.clone()))?;
    }
    Ok(())
}

/// Load the input and solve every requested part of one work item.
///
/// Input and parse failures become error results; only a closed channel
/// is returned as an error.
fn run_work(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    ctx: &ExecutionContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match ctx.inputs.get(year, day) {
        Ok(input) => input,
        Err(e) => {
            warn!("{e}");
            return send_failure(work, tx, ExecutorError::from(e).into());
        }
    };

    if ctx.parallelize_by == ParallelizeBy::Part {
        let results: Vec<SolverResult> = work
            .parts
            .clone()
            .into_par_iter()
            .map(|part| match ctx.registry.create_solver(year, day, &input) {
                Ok(mut solver) => solve_part(&mut *solver, part, true),
                Err(e) => SolverResult::failed(year, day, part, solver_error(e)),
            })
            .collect();
        return results.into_iter().try_for_each(|result| send(tx, result));
    }

    let mut solver = match ctx.registry.create_solver(year, day, &input) {
        Ok(solver) => solver,
        Err(e) => {
            warn!("{year}/{day:02}: {e}");
            return send_failure(work, tx, solver_error(e));
        }
    };

    let first = *work.parts.start();
    for part in work.parts.clone() {
        send(tx, solve_part(&mut *solver, part, part == first))?;
    }
    Ok(())
}

fn solver_error(e: SolverError) -> ArcExecutorError {
    ExecutorError::Solver(e).into()
}

/// Solve a single part on an already parsed solver
fn solve_part(solver: &mut dyn DynSolver, part: u8, report_parse: bool) -> SolverResult {
    let (year, day) = (solver.year(), solver.day());
    debug!(year, day, part, "solving");

    let parse_duration = report_parse.then(|| solver.parse_duration());
    match solver.solve(part) {
        Ok(result) => SolverResult {
            year,
            day,
            part,
            solve_duration: result.duration(),
            answer: Ok(result.answer),
            parse_duration,
        },
        Err(e) => SolverResult {
            parse_duration,
            ..SolverResult::failed(year, day, part, solver_error(e.into()))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverRegistryBuilder};
    use tempfile::TempDir;

    fn config(dir: &TempDir, parallelize_by: ParallelizeBy) -> Config {
        Config {
            year_filter: Some(2024),
            day_filter: Some(11),
            part_filter: None,
            tags: Vec::new(),
            input_dir: dir.path().to_path_buf(),
            thread_count: 2,
            parallelize_by,
            log_level: "warn".to_string(),
            quiet: true,
        }
    }

    fn executor(config: &Config) -> Executor {
        let registry = SolverRegistryBuilder::new()
            .register_solver::<aoc_2024::year_2024::day_11::Solver>(2024, 11)
            .unwrap()
            .build();
        Executor::new(registry, config).unwrap()
    }

    fn write_input(dir: &TempDir, day: u8, content: &str) {
        let year_dir = dir.path().join("2024");
        std::fs::create_dir_all(&year_dir).unwrap();
        std::fs::write(year_dir.join(format!("input{day:02}.txt")), content).unwrap();
    }

    fn run(executor: &Executor) -> (Result<(), ArcExecutorError>, Vec<SolverResult>) {
        let (tx, rx) = std::sync::mpsc::channel();
        let outcome = executor.execute(tx);
        (outcome, rx.into_iter().collect())
    }

    #[test]
    fn test_filter_parts() {
        assert_eq!(filter_parts(None, 2), 1..=2);
        assert_eq!(filter_parts(Some(2), 2), 2..=2);
        assert!(filter_parts(Some(3), 2).is_empty());
        assert!(filter_parts(Some(0), 2).is_empty());
    }

    #[test]
    fn test_collect_work_items_respects_filters() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir, ParallelizeBy::Day);
        config.part_filter = Some(2);
        let items = executor(&config).collect_work_items();
        assert_eq!(items.len(), 1);
        assert_eq!((items[0].year, items[0].day), (2024, 11));
        assert_eq!(items[0].parts, 2..=2);

        config.day_filter = Some(12);
        assert!(executor(&config).collect_work_items().is_empty());
    }

    #[test]
    fn test_every_mode_solves_example() {
        for mode in [
            ParallelizeBy::Sequential,
            ParallelizeBy::Year,
            ParallelizeBy::Day,
            ParallelizeBy::Part,
        ] {
            let dir = TempDir::new().unwrap();
            write_input(&dir, 11, "125 17\n");
            let (outcome, mut results) = run(&executor(&config(&dir, mode)));
            assert!(outcome.is_ok(), "{mode:?}");

            results.sort_by_key(|r| r.part);
            let answers: Vec<_> = results
                .iter()
                .map(|r| r.answer.as_ref().unwrap().as_str())
                .collect();
            assert_eq!(answers, ["55312", "65601038650482"], "{mode:?}");
            assert!(results[0].parse_duration.is_some());
        }
    }

    #[test]
    fn test_shared_parse_reported_once() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 11, "125 17\n");
        let (_, results) = run(&executor(&config(&dir, ParallelizeBy::Sequential)));
        assert!(results[0].parse_duration.is_some());
        assert!(results[1].parse_duration.is_none());
    }

    #[test]
    fn test_missing_input_becomes_error_results() {
        let dir = TempDir::new().unwrap();
        let (outcome, results) = run(&executor(&config(&dir, ParallelizeBy::Day)));
        assert!(outcome.is_ok());
        assert_eq!(results.len(), 2);
        for result in &results {
            let err = result.answer.as_ref().unwrap_err();
            assert!(matches!(
                err.inner(),
                ExecutorError::Input(InputError::Missing { .. })
            ));
        }
    }

    /// Rejects every input
    struct Rejecting;

    impl AocParser for Rejecting {
        type SharedData<'a> = ();

        fn parse<'a>(_input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            Err(ParseError::InvalidFormat("rejected".to_string()))
        }
    }

    impl Solver for Rejecting {
        const PARTS: u8 = 2;

        fn solve_part(_shared: &mut (), part: u8) -> Result<String, SolveError> {
            Err(SolveError::PartNotImplemented(part))
        }
    }

    #[test]
    fn test_unparsable_input_becomes_error_results() {
        for mode in [ParallelizeBy::Day, ParallelizeBy::Part] {
            let dir = TempDir::new().unwrap();
            write_input(&dir, 12, "anything\n");
            let mut config = config(&dir, mode);
            config.day_filter = Some(12);
            let registry = SolverRegistryBuilder::new()
                .register_solver::<Rejecting>(2024, 12)
                .unwrap()
                .build();

            let (outcome, results) = run(&Executor::new(registry, &config).unwrap());
            assert!(outcome.is_ok(), "{mode:?}");
            assert_eq!(results.len(), 2, "{mode:?}");
            assert!(results.iter().all(|r| matches!(
                r.answer.as_ref().map_err(|e| e.inner()),
                Err(ExecutorError::Solver(SolverError::ParseError(_)))
            )));
        }
    }

    #[test]
    fn test_overflowing_stone_becomes_error_results() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 11, "10000000000000001\n");
        let (outcome, results) = run(&executor(&config(&dir, ParallelizeBy::Day)));
        assert!(outcome.is_ok());
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| matches!(
            r.answer.as_ref().map_err(|e| e.inner()),
            Err(ExecutorError::Solver(SolverError::SolveError(SolveError::SolveFailed(_))))
        )));
    }

    #[test]
    fn test_closed_channel_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 11, "0\n");
        let executor = executor(&config(&dir, ParallelizeBy::Sequential));
        let (tx, rx) = std::sync::mpsc::channel();
        drop(rx);
        let err = executor.execute(tx).unwrap_err();
        assert!(matches!(err.inner(), ExecutorError::ChannelSend));
    }
}
