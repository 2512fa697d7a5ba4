//! Property tests for the simulation pipeline.
//!
//! # Invariants
//! - The timeline tiles `[0, makespan)` and gives every process exactly its burst.
//! - No process runs before it arrives.
//! - `waiting = turnaround - burst >= 0` and `response <= waiting`.
//! - Identical requests yield identical responses.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use cpu_sched::models::{ProcessSpec, TimeQuantum};
use cpu_sched::scheduler::audit_timeline;
use cpu_sched::{
    simulate, AlgorithmConfig, ProcessInput, SimulationRequest, SimulationService,
    WorkloadGenerator,
};

fn algorithm_strategy() -> impl Strategy<Value = AlgorithmConfig> {
    prop_oneof![
        Just(AlgorithmConfig::Fcfs),
        any::<bool>().prop_map(|preemptive| AlgorithmConfig::Sjf { preemptive }),
        any::<bool>().prop_map(|preemptive| AlgorithmConfig::Priority { preemptive }),
        (1i64..6).prop_map(|q| AlgorithmConfig::RoundRobin {
            quantum: TimeQuantum::new(q).unwrap(),
        }),
    ]
}

fn rows_strategy() -> impl Strategy<Value = Vec<(i64, i64, i64)>> {
    proptest::collection::vec((0i64..20, 1i64..10, 1i64..5), 1..12)
}

fn build_request(algorithm: AlgorithmConfig, rows: &[(i64, i64, i64)]) -> SimulationRequest {
    let processes = rows
        .iter()
        .enumerate()
        .map(|(i, &(arrival, burst, priority))| {
            let row = ProcessInput::new(format!("P{}", i + 1), arrival, burst);
            if algorithm.requires_priority() {
                row.with_priority(priority)
            } else {
                row
            }
        })
        .collect();
    let request = SimulationRequest::new(algorithm.name())
        .with_preemptive(algorithm.is_preemptive())
        .with_processes(processes);
    match algorithm {
        AlgorithmConfig::RoundRobin { quantum } => request.with_time_quantum(quantum.get()),
        _ => request,
    }
}

fn specs(request: &SimulationRequest) -> Vec<ProcessSpec> {
    request
        .processes
        .iter()
        .map(|p| {
            let spec = ProcessSpec::new(p.id.clone(), p.arrival_time, p.burst_time);
            match p.priority {
                Some(priority) => spec.with_priority(priority),
                None => spec,
            }
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_timeline_is_contiguous_and_complete(algorithm in algorithm_strategy(), rows in rows_strategy()) {
        let request = build_request(algorithm, &rows);
        let response = simulate(&request).unwrap();
        let timeline = &response.timeline;

        prop_assert!(audit_timeline(timeline, &specs(&request)).is_ok());
        prop_assert_eq!(timeline.segments().first().map(|s| s.start_time), Some(0));
        for pair in timeline.segments().windows(2) {
            prop_assert_eq!(pair[0].end_time, pair[1].start_time);
            prop_assert!(pair[0].owner != pair[1].owner);
        }

        let max_completion = response.processes.iter().map(|p| p.completion_time).max();
        prop_assert_eq!(Some(timeline.makespan()), max_completion);
        prop_assert_eq!(timeline.busy_time() + timeline.idle_time(), timeline.makespan());
    }

    #[test]
    fn test_per_process_identities(algorithm in algorithm_strategy(), rows in rows_strategy()) {
        let response = simulate(&build_request(algorithm, &rows)).unwrap();
        prop_assert_eq!(response.processes.len(), rows.len());

        for (i, p) in response.processes.iter().enumerate() {
            prop_assert_eq!(&p.id, &format!("P{}", i + 1));
            prop_assert_eq!(p.turnaround_time, p.completion_time - p.arrival_time);
            prop_assert_eq!(p.waiting_time, p.turnaround_time - p.burst_time);
            prop_assert!(p.waiting_time >= 0);
            prop_assert!(p.response_time >= 0);
            prop_assert!(p.response_time <= p.waiting_time);
            prop_assert_eq!(p.priority.is_some(), algorithm.requires_priority());
        }

        let n = rows.len() as f64;
        let total_waiting: i64 = response.processes.iter().map(|p| p.waiting_time).sum();
        prop_assert!((response.average_waiting_time - total_waiting as f64 / n).abs() < 1e-10);
    }

    #[test]
    fn test_non_preemptive_runs_each_process_once(rows in rows_strategy(), pick in 0usize..3) {
        let algorithm = [
            AlgorithmConfig::Fcfs,
            AlgorithmConfig::Sjf { preemptive: false },
            AlgorithmConfig::Priority { preemptive: false },
        ][pick];
        let response = simulate(&build_request(algorithm, &rows)).unwrap();
        for p in &response.processes {
            prop_assert_eq!(response.timeline.segments_for(&p.id).count(), 1);
            prop_assert_eq!(p.response_time, p.waiting_time);
        }
    }

    #[test]
    fn test_fcfs_completes_in_arrival_order(rows in rows_strategy()) {
        let response = simulate(&build_request(AlgorithmConfig::Fcfs, &rows)).unwrap();
        let mut order: Vec<usize> = (0..rows.len()).collect();
        order.sort_by_key(|&i| (rows[i].0, i));
        let completions: Vec<i64> = order
            .iter()
            .map(|&i| response.processes[i].completion_time)
            .collect();
        prop_assert!(completions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_simulation_is_deterministic(algorithm in algorithm_strategy(), rows in rows_strategy()) {
        let request = build_request(algorithm, &rows);
        let service = SimulationService::new();
        prop_assert_eq!(service.simulate(&request).unwrap(), service.simulate(&request).unwrap());
    }
}

#[test]
fn test_seeded_workloads_simulate_cleanly() {
    let generator = WorkloadGenerator::new(20)
        .with_max_arrival(30)
        .with_max_burst(8);
    let algorithms = [
        AlgorithmConfig::Fcfs,
        AlgorithmConfig::Sjf { preemptive: false },
        AlgorithmConfig::Sjf { preemptive: true },
        AlgorithmConfig::Priority { preemptive: false },
        AlgorithmConfig::Priority { preemptive: true },
        AlgorithmConfig::RoundRobin {
            quantum: TimeQuantum::new(3).unwrap(),
        },
    ];

    for seed in 0..16u64 {
        for algorithm in algorithms {
            let request = generator.request(algorithm, &mut SmallRng::seed_from_u64(seed));
            let again = generator.request(algorithm, &mut SmallRng::seed_from_u64(seed));
            assert_eq!(request, again);

            let outcome = SimulationService::new().run(&request).unwrap();
            assert!(audit_timeline(&outcome.timeline, outcome.workload.processes()).is_ok());
            assert_eq!(outcome.metrics.processes.len(), 20);
        }
    }
}

#[test]
fn test_simultaneous_arrivals_keep_input_order() {
    // Equal keys at the same arrival: every algorithm dispatches in input order
    let rows: Vec<(i64, i64, i64)> = vec![(0, 3, 2); 4];
    let owners = |algorithm: AlgorithmConfig| -> Vec<String> {
        simulate(&build_request(algorithm, &rows))
            .unwrap()
            .timeline
            .segments()
            .iter()
            .map(|s| s.owner.to_string())
            .collect()
    };

    let algorithms = [
        AlgorithmConfig::Fcfs,
        AlgorithmConfig::Sjf { preemptive: true },
        AlgorithmConfig::Priority { preemptive: true },
    ];
    for algorithm in algorithms {
        assert_eq!(owners(algorithm), vec!["P1", "P2", "P3", "P4"], "{algorithm}");
    }

    // Quantum below the burst: the FIFO queue rotates in input order twice
    let rr = AlgorithmConfig::RoundRobin {
        quantum: TimeQuantum::new(2).unwrap(),
    };
    assert_eq!(
        owners(rr),
        vec!["P1", "P2", "P3", "P4", "P1", "P2", "P3", "P4"]
    );
    let response = simulate(&build_request(rr, &rows)).unwrap();
    let completions: Vec<i64> = response.processes.iter().map(|p| p.completion_time).collect();
    assert_eq!(completions, vec![9, 10, 11, 12]);
}

#[test]
fn test_response_wire_shape() {
    let request = SimulationRequest::new("FCFS").with_processes(vec![
        ProcessInput::new("P1", 2, 2),
        ProcessInput::new("P2", 0, 1),
    ]);
    let value = serde_json::to_value(simulate(&request).unwrap()).unwrap();

    let expected = serde_json::json!({
        "timeline": [
            { "processId": "P2", "startTime": 0, "endTime": 1 },
            { "processId": "IDLE", "startTime": 1, "endTime": 2 },
            { "processId": "P1", "startTime": 2, "endTime": 4 }
        ],
        "processes": [
            {
                "id": "P1", "arrivalTime": 2, "burstTime": 2,
                "waitingTime": 0, "turnaroundTime": 2, "responseTime": 0,
                "completionTime": 4
            },
            {
                "id": "P2", "arrivalTime": 0, "burstTime": 1,
                "waitingTime": 0, "turnaroundTime": 1, "responseTime": 0,
                "completionTime": 1
            }
        ],
        "averageWaitingTime": 0.0,
        "averageTurnaroundTime": 1.5,
        "averageResponseTime": 0.0
    });
    assert_eq!(value, expected);
}

#[test]
fn test_request_accepts_camel_case_json() {
    let raw = r#"{
        "algorithm": "Priority",
        "isPreemptive": true,
        "processes": [
            { "id": " P1 ", "arrivalTime": 0, "burstTime": 4, "priority": 3 },
            { "id": "P2", "arrivalTime": 1, "burstTime": 2, "priority": 1 }
        ]
    }"#;
    let request: SimulationRequest = serde_json::from_str(raw).unwrap();
    let response = simulate(&request).unwrap();
    assert_eq!(response.processes[0].id, "P1");
    assert_eq!(response.processes[1].completion_time, 3);
    assert_eq!(response.processes[0].completion_time, 6);
}
