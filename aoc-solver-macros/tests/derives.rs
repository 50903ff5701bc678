use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError, Solver,
    SolverExt, SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 3, tags = ["macro-test", "sums"])]
struct Sums;

#[derive(Debug, Default)]
struct SumsData {
    values: Vec<u64>,
    total: Option<u64>,
}

impl AocParser for Sums {
    type SharedData<'a> = SumsData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let values = input
            .split_whitespace()
            .map(|f| f.parse().map_err(|_| ParseError::InvalidFormat(f.to_string())))
            .collect::<Result<_, _>>()?;
        Ok(SumsData { values, total: None })
    }
}

impl PartSolver<1> for Sums {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = shared.values.iter().sum::<u64>();
        shared.total = Some(total);
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Sums {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // part 2 reuses the total from part 1 when it already ran
        let total = match shared.total {
            Some(total) => total,
            None => shared.values.iter().sum(),
        };
        Ok((total * 2).to_string())
    }
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 1)]
struct Single;

impl AocParser for Single {
    type SharedData<'a> = &'a str;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input.trim())
    }
}

impl PartSolver<1> for Single {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.to_uppercase())
    }
}

#[test]
fn test_parts_constant_matches_attribute() {
    assert_eq!(<Sums as Solver>::PARTS, 2);
    assert_eq!(<Single as Solver>::PARTS, 1);
}

#[test]
fn test_dispatch_reaches_each_part() {
    let mut shared = Sums::parse("1 2 3").unwrap();
    assert_eq!(Sums::solve_part(&mut shared, 1).unwrap(), "6");
    assert_eq!(Sums::solve_part(&mut shared, 2).unwrap(), "12");
    assert_eq!(shared.total, Some(6));
}

#[test]
fn test_dispatch_outside_declared_parts() {
    let mut shared = Sums::parse("1").unwrap();
    assert!(matches!(
        Sums::solve_part(&mut shared, 3),
        Err(SolveError::PartNotImplemented(3))
    ));
    assert!(matches!(
        Sums::solve_part_checked_range(&mut shared, 3),
        Err(SolveError::PartOutOfRange(3))
    ));
}

#[test]
fn test_borrowed_shared_data() {
    let mut shared = Single::parse("  abc \n").unwrap();
    assert_eq!(Single::solve_part(&mut shared, 1).unwrap(), "ABC");
}

#[test]
fn test_auto_register_submits_plugin() {
    let plugin = aoc_solver::inventory::iter::<aoc_solver::SolverPlugin>()
        .find(|p| p.year == 2017 && p.day == 3)
        .expect("plugin for 2017/3 should be submitted");
    assert_eq!(plugin.tags, &["macro-test", "sums"]);
    assert_eq!(plugin.solver.parts(), 2);

    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|p| p.tags.contains(&"macro-test"))
        .unwrap()
        .build();
    assert_eq!(registry.storage().len(), 1);

    let mut solver = registry.create_solver(2017, 3, "4 5").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "9");
    assert_eq!(solver.solve(2).unwrap().answer, "18");
}
