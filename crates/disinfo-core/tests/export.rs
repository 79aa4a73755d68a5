//! Export tests against real files.

use std::fs;

use disinfo_core::output::{export_run, write_agent_csv, write_step_csv};
use disinfo_core::{CancelToken, Simulation, SimulationConfig, State, StopReason};
use disinfo_types::RunSummary;

fn finished_run(agents: usize, steps: usize) -> Simulation {
    let mut config = SimulationConfig::default();
    config.population.agents = agents;
    config.population.initial_believing = 3;
    config.simulation.stop_when_recovered = false;
    let mut sim = Simulation::new(config.to_setup().unwrap(), 17).unwrap();
    sim.run(steps, &CancelToken::new());
    sim
}

#[test]
fn test_step_csv_has_one_row_per_step() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counts.csv");
    let sim = finished_run(40, 8);

    write_step_csv(&path, sim.history()).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Step,SUSCEPTIBLE,EXPOSED,INFECTED,DOUBTFUL,RECOVERED");
    assert_eq!(lines.len(), 9);
    for (i, line) in lines[1..].iter().enumerate() {
        let fields: Vec<usize> = line.split(',').map(|f| f.parse().unwrap()).collect();
        assert_eq!(fields[0], i + 1);
        assert_eq!(fields[1..].iter().sum::<usize>(), 40);
    }
}

#[test]
fn test_agent_csv_is_sorted_by_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agents.csv");
    let sim = finished_run(25, 5);

    // Current order is shuffled; the export must not be
    write_agent_csv(&path, sim.engine().agents()).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "ID,AgeGroup,SexGroup,EducationGroup,SocialPlatform,State");
    assert_eq!(lines.len(), 26);
    for (i, line) in lines[1..].iter().enumerate() {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[0], i.to_string());
        assert!(State::ALL.iter().any(|s| s.name() == fields[5]));
    }
}

#[test]
fn test_export_run_writes_summary() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("run");
    let sim = finished_run(30, 6);
    let summary = sim.summary(StopReason::StepLimit);

    let paths = export_run(&out, sim.history(), sim.engine().agents(), &summary).unwrap();
    assert!(paths.step_counts.exists());
    assert!(paths.agents.exists());

    let json = fs::read_to_string(&paths.summary).unwrap();
    let parsed: RunSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, summary);
    assert_eq!(parsed.steps, 6);
    assert_eq!(parsed.population.agents, 30);
}

#[test]
fn test_export_into_file_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("taken");
    fs::write(&blocker, "not a directory").unwrap();
    let sim = finished_run(5, 1);
    let summary = sim.summary(StopReason::StepLimit);

    let result = export_run(&blocker, sim.history(), sim.engine().agents(), &summary);
    assert!(result.is_err());
}
