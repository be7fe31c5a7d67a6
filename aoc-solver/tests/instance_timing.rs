use aoc_solver::{
    AocParser, AocSolver, DynSolver, ParseError, PartSolver, SolveError, SolverInstance,
};

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Counter;

impl AocParser for Counter {
    type SharedData<'a> = (Vec<&'a str>, u32);

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok((input.split_whitespace().collect(), 0))
    }
}

impl PartSolver<1> for Counter {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.1 += 1;
        Ok(shared.0.len().to_string())
    }
}

impl PartSolver<2> for Counter {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.1 += 1;
        Ok(shared.1.to_string())
    }
}

#[test]
fn test_instance_reuses_parsed_data_across_parts() {
    let mut instance = SolverInstance::<Counter>::new(2022, 2, "a b c").unwrap();
    assert_eq!(instance.solve(1).unwrap().answer, "3");
    assert_eq!(instance.solve(2).unwrap().answer, "2");
    assert_eq!(instance.shared().1, 2);
}

#[test]
fn test_instance_metadata_and_timing() {
    let mut instance = SolverInstance::<Counter>::new(2022, 2, "x").unwrap();
    assert_eq!(instance.year(), 2022);
    assert_eq!(instance.day(), 2);
    assert_eq!(instance.parts(), 2);
    assert!(instance.parse_duration() >= chrono::TimeDelta::zero());

    let parse = instance.parse_timing();
    assert!(parse.start <= parse.end);

    let result = instance.solve(1).unwrap();
    assert_eq!(result.part, 1);
    assert!(result.duration() >= chrono::TimeDelta::zero());
    assert!(matches!(instance.solve(3), Err(SolveError::PartOutOfRange(3))));
}

#[test]
fn test_out_of_range_part_leaves_data_untouched() {
    let mut instance = SolverInstance::<Counter>::new(2022, 2, "x y").unwrap();
    assert!(matches!(instance.solve(0), Err(SolveError::PartOutOfRange(0))));
    assert_eq!(instance.shared().1, 0);
}
