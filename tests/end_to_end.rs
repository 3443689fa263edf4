use sched_sim::{
    PolicyKind, ProcessSpec, SimConfig, SimEvent, TextReport, Termination, simulate,
    sim::Turnaround,
};

fn arrived(at: u64, name: &str) -> SimEvent {
    SimEvent::Arrived { at, name: name.into() }
}

fn selected(at: u64, name: &str, remaining: u64) -> SimEvent {
    SimEvent::Selected { at, name: name.into(), remaining }
}

fn finished(at: u64, name: &str) -> SimEvent {
    SimEvent::Finished { at, name: name.into() }
}

fn two_process_config(policy: PolicyKind) -> SimConfig {
    SimConfig::new(
        vec![ProcessSpec::new("P1", 0, 5), ProcessSpec::new("P2", 2, 3)],
        policy,
        10,
    )
}

fn assert_stats(config: &SimConfig, name: &str, wait: u64, turnaround: u64) {
    let trace = simulate(config).unwrap();
    let stats = trace.summary.get(name).unwrap();
    assert_eq!(stats.wait, wait, "{name} wait");
    assert_eq!(stats.turnaround, Turnaround::Completed(turnaround), "{name} turnaround");
}

#[test]
fn fcfs_two_processes() {
    let config = two_process_config(PolicyKind::Fcfs);
    let trace = simulate(&config).unwrap();

    assert_eq!(
        trace.events,
        vec![
            arrived(0, "P1"),
            selected(0, "P1", 5),
            arrived(2, "P2"),
            finished(5, "P1"),
            selected(5, "P2", 3),
            finished(8, "P2"),
        ]
    );
    assert_eq!(trace.summary.termination, Termination::FinishedAt(8));
    assert_stats(&config, "P1", 0, 5);
    assert_stats(&config, "P2", 3, 6);
}

#[test]
fn sjf_tie_keeps_earlier_process() {
    let fcfs = simulate(&two_process_config(PolicyKind::Fcfs)).unwrap();
    let sjf = simulate(&two_process_config(PolicyKind::Sjf)).unwrap();

    // P2's burst of 3 ties P1's remaining 3 at tick 2; input order keeps P1
    assert_eq!(sjf.events, fcfs.events);
    assert_eq!(sjf.summary, fcfs.summary);
}

#[test]
fn round_robin_alternates_by_quantum() {
    let config = SimConfig::new(
        vec![ProcessSpec::new("P1", 0, 4), ProcessSpec::new("P2", 0, 4)],
        PolicyKind::RoundRobin { quantum: 2 },
        10,
    );
    let trace = simulate(&config).unwrap();

    assert_eq!(
        trace.events,
        vec![
            arrived(0, "P1"),
            arrived(0, "P2"),
            selected(0, "P1", 4),
            selected(2, "P2", 4),
            selected(4, "P1", 2),
            finished(6, "P1"),
            selected(6, "P2", 2),
            finished(8, "P2"),
        ]
    );
    assert_eq!(trace.summary.termination, Termination::FinishedAt(8));
    assert_stats(&config, "P1", 2, 6);
    assert_stats(&config, "P2", 4, 8);
}

#[test]
fn round_robin_cycles_through_three() {
    let config = SimConfig::new(
        vec![
            ProcessSpec::new("A", 0, 3),
            ProcessSpec::new("B", 0, 3),
            ProcessSpec::new("C", 1, 3),
        ],
        PolicyKind::RoundRobin { quantum: 1 },
        20,
    );
    let trace = simulate(&config).unwrap();

    let order: Vec<&str> = trace
        .events
        .iter()
        .filter_map(|e| match e {
            SimEvent::Selected { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(order, ["A", "B", "C", "A", "B", "C", "A", "B", "C"]);
    assert_eq!(trace.summary.termination, Termination::FinishedAt(9));
}

#[test]
fn sjf_switches_to_shorter_arrival() {
    let config = SimConfig::new(
        vec![ProcessSpec::new("long", 0, 10), ProcessSpec::new("short", 3, 2)],
        PolicyKind::Sjf,
        30,
    );
    let trace = simulate(&config).unwrap();

    assert!(trace.events.contains(&selected(3, "short", 2)));
    assert!(trace.events.contains(&selected(5, "long", 7)));
    assert_stats(&config, "short", 0, 2);
    assert_stats(&config, "long", 2, 12);
}

#[test]
fn empty_workload_idles_for_whole_run() {
    let config = SimConfig::new(vec![], PolicyKind::Sjf, 5);
    let trace = simulate(&config).unwrap();

    let expected: Vec<SimEvent> = (0..5).map(|at| SimEvent::Idle { at }).collect();
    assert_eq!(trace.events, expected);
    assert!(trace.summary.processes.is_empty());
}

#[test]
fn parsed_file_renders_report() {
    let config: SimConfig = "\
processcount 2
runfor 10
use fcfs
process name P1 arrival 0 burst 5
process name P2 arrival 2 burst 3
end
"
    .parse()
    .unwrap();

    let mut report = TextReport::new(&config);
    sched_sim::run(&config, &mut report).unwrap();

    assert_eq!(
        report.as_str(),
        "\
2 processes
Using First-Come-First-Served

Time 0: P1 arrived
Time 0: P1 selected (burst 5)
Time 2: P2 arrived
Time 5: P1 finished
Time 5: P2 selected (burst 3)
Time 8: P2 finished
Finished at time 8

P1 wait 0 turnaround 5
P2 wait 3 turnaround 6

Average wait 1.50 turnaround 5.50
"
    );
}

#[test]
fn duplicate_names_rejected() {
    let config = SimConfig::new(
        vec![ProcessSpec::new("P1", 0, 1), ProcessSpec::new("P1", 1, 1)],
        PolicyKind::Fcfs,
        5,
    );
    assert!(simulate(&config).is_err());
}
