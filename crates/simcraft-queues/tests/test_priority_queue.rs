mod common;

use std::cell::RefCell;
use std::rc::Rc;

use rstest::rstest;

use common::{assert_float_eq, check_invariants};
use simcraft_queues::{Identity, PriorityQueue, QueueConfig, SimulationClock};

#[derive(Clone, Debug, PartialEq)]
struct Job {
    id: u32,
    priority: f64,
}

impl Identity for Job {}

fn job(id: u32, priority: f64) -> Job {
    Job { id, priority }
}

fn job_queue(clock: &SimulationClock, capacity: usize) -> PriorityQueue<Job> {
    PriorityQueue::new(clock.clone(), capacity).with_priority_fn(|job: &Job| job.priority)
}

fn drain_ids(queue: &mut PriorityQueue<Job>) -> Vec<u32> {
    let mut ids = Vec::new();
    while let Some(job) = queue.dequeue() {
        ids.push(job.id);
    }
    ids
}

#[test]
fn test_dequeue_by_priority_then_insertion_order() {
    let clock = SimulationClock::new();
    let mut queue = job_queue(&clock, 0);
    for (id, priority) in [(1, 5.), (2, 1.), (3, 5.), (4, 3.)] {
        assert!(queue.enqueue(job(id, priority)));
        clock.advance(1.);
    }
    assert_eq!(queue.peek().map(|job| job.id), Some(2));
    assert_eq!(drain_ids(&mut queue), vec![2, 4, 1, 3]);
    assert_eq!(queue.stats().exits(), 4);
}

#[rstest]
#[case(vec![1., 2., 3., 4.], vec![0, 1, 2, 3])]
#[case(vec![4., 3., 2., 1.], vec![3, 2, 1, 0])]
#[case(vec![0., 0., 0., 0.], vec![0, 1, 2, 3])]
#[case(vec![2., -1., 2., -1.], vec![1, 3, 0, 2])]
#[case(vec![1.5, f64::INFINITY, f64::NEG_INFINITY, 1.5], vec![2, 0, 3, 1])]
fn test_priority_ordering_law(#[case] priorities: Vec<f64>, #[case] expected: Vec<u32>) {
    let clock = SimulationClock::new();
    let mut queue = job_queue(&clock, 0);
    for (id, priority) in priorities.into_iter().enumerate() {
        queue.enqueue(job(id as u32, priority));
    }
    assert_eq!(drain_ids(&mut queue), expected);
}

#[test]
fn test_default_priority_behaves_as_fifo() {
    let clock = SimulationClock::new();
    let mut queue = PriorityQueue::new(clock, 0);
    for i in 0..10 {
        queue.enqueue(i);
    }
    let order: Vec<_> = std::iter::from_fn(|| queue.dequeue()).collect();
    assert_eq!(order, (0..10).collect::<Vec<_>>());
}

#[test]
fn test_explicit_priority_overrides_priority_fn() {
    let clock = SimulationClock::new();
    let mut queue = job_queue(&clock, 0);
    queue.enqueue(job(1, 1.));
    queue.enqueue_with_priority(job(2, 10.), 0.);
    assert_eq!(queue.priority_of(&job(2, 10.)), Some(0.));
    assert_eq!(drain_ids(&mut queue), vec![2, 1]);
}

#[test]
fn test_bounded_priority_queue() {
    let clock = SimulationClock::new();
    let mut queue = job_queue(&clock, 2);
    assert!(queue.enqueue(job(1, 3.)));
    assert!(queue.enqueue(job(2, 2.)));
    assert!(queue.is_full());
    assert!(!queue.enqueue(job(3, 1.)));
    assert!(!queue.enqueue_with_priority(job(3, 1.), 0.));
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.stats().entries(), 2);
    check_invariants(queue.stats(), queue.len(), 2);
    assert_eq!(drain_ids(&mut queue), vec![2, 1]);
}

#[test]
fn test_wait_time_and_occupancy() {
    let clock = SimulationClock::new();
    let mut queue = job_queue(&clock, 0);
    queue.enqueue(job(1, 2.));
    queue.enqueue(job(2, 1.));
    clock.set_time(5.);
    assert_eq!(queue.dequeue().map(|job| job.id), Some(2));
    assert_float_eq(queue.stats().area(), 10., 1e-12);
    assert_float_eq(queue.stats().average_length(), 2., 1e-12);
    clock.set_time(10.);
    queue.dequeue();
    assert_float_eq(queue.stats().average_wait(), 7.5, 1e-12);
    assert_eq!(queue.stats().max_length(), 2);
}

#[test]
fn test_remove_restores_heap_order() {
    let clock = SimulationClock::new();
    let mut queue = job_queue(&clock, 0);
    for (id, priority) in [(1, 4.), (2, 1.), (3, 6.), (4, 2.), (5, 5.), (6, 3.)] {
        queue.enqueue(job(id, priority));
    }
    clock.set_time(2.);
    assert!(queue.remove(&job(2, 1.)));
    assert!(queue.remove(&job(5, 5.)));
    assert!(!queue.remove(&job(5, 5.)));
    assert!(!queue.remove(&job(7, 0.)));
    check_invariants(queue.stats(), queue.len(), 0);
    assert_float_eq(queue.stats().total_wait_time(), 4., 1e-12);
    assert_eq!(drain_ids(&mut queue), vec![4, 6, 1, 3]);
}

#[test]
fn test_remove_picks_identical_item_first() {
    let clock = SimulationClock::new();
    let mut queue = PriorityQueue::new(clock.clone(), 0).with_priority_fn(|job: &Rc<Job>| job.priority);
    let first = Rc::new(job(1, 1.));
    let second = Rc::new(job(1, 1.));
    queue.enqueue(first.clone());
    clock.set_time(1.);
    queue.enqueue(second.clone());
    clock.set_time(3.);

    assert!(queue.remove(&second));
    assert!(Rc::ptr_eq(queue.peek().unwrap(), &first));
    assert_float_eq(queue.stats().total_wait_time(), 2., 1e-12);
}

#[test]
fn test_remove_picks_highest_priority_among_equal_items() {
    let clock = SimulationClock::new();
    let mut queue = PriorityQueue::new(clock, 0);
    queue.enqueue_with_priority("task", 5.);
    queue.enqueue_with_priority("task", 1.);
    queue.enqueue_with_priority("other", 3.);
    assert!(queue.remove(&"task"));
    assert_eq!(queue.priority_of(&"task"), Some(5.));
    assert_eq!(queue.dequeue(), Some("other"));
}

#[test]
fn test_optional_items() {
    let clock = SimulationClock::new();
    let mut queue = PriorityQueue::new(clock, 0)
        .with_priority_fn(|job: &Option<Job>| job.as_ref().map_or(f64::INFINITY, |job| job.priority));
    queue.enqueue(Some(job(1, 2.)));
    queue.enqueue(None);
    queue.enqueue(Some(job(2, 1.)));

    assert_eq!(queue.priority_of(&None), Some(f64::INFINITY));
    assert!(queue.update_priority(&None, 0.));
    assert!(queue.remove(&Some(job(2, 1.))));
    assert_eq!(queue.dequeue(), Some(None));
    assert_eq!(queue.dequeue(), Some(Some(job(1, 2.))));
    assert!(queue.is_empty());
}

#[test]
fn test_update_priority_of_missing_item() {
    let clock = SimulationClock::new();
    let mut queue = job_queue(&clock, 0);
    queue.enqueue(job(1, 2.));
    queue.enqueue(job(2, 1.));
    assert!(!queue.update_priority(&job(3, 1.), 0.));
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.stats().entries(), 2);
    assert_eq!(drain_ids(&mut queue), vec![2, 1]);
}

#[test]
fn test_update_priority_keeps_entry_time() {
    let clock = SimulationClock::new();
    let mut queue = job_queue(&clock, 0);
    queue.enqueue(job(1, 5.));
    clock.set_time(2.);
    queue.enqueue(job(2, 3.));
    clock.set_time(4.);
    assert!(queue.update_priority(&job(1, 5.), 1.));
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.stats().entries(), 2);
    assert_eq!(queue.stats().exits(), 0);
    assert_eq!(queue.priority_of(&job(1, 5.)), Some(1.));

    clock.set_time(10.);
    assert_eq!(queue.dequeue().map(|job| job.id), Some(1));
    assert_float_eq(queue.stats().total_wait_time(), 10., 1e-12);
}

#[test]
fn test_update_priority_goes_after_equal_priorities() {
    let clock = SimulationClock::new();
    let mut queue = job_queue(&clock, 0);
    queue.enqueue(job(1, 1.));
    queue.enqueue(job(2, 2.));
    queue.enqueue(job(3, 2.));
    assert!(queue.update_priority(&job(1, 1.), 2.));
    assert_eq!(drain_ids(&mut queue), vec![2, 3, 1]);
}

#[test]
fn test_callbacks() {
    let clock = SimulationClock::new();
    let mut queue = job_queue(&clock, 0);
    let events = Rc::new(RefCell::new(Vec::new()));
    let enqueued = events.clone();
    queue.on_enqueue(move |job: &Job| enqueued.borrow_mut().push(format!("+{}", job.id)));
    let dequeued = events.clone();
    queue.on_dequeue(move |job: &Job| dequeued.borrow_mut().push(format!("-{}", job.id)));

    queue.enqueue(job(1, 2.));
    queue.enqueue(job(2, 1.));
    queue.update_priority(&job(1, 2.), 0.);
    queue.dequeue();
    queue.remove(&job(2, 1.));
    assert_eq!(*events.borrow(), vec!["+1", "+2", "-1"]);
}

#[test]
fn test_reset_stats() {
    let clock = SimulationClock::new();
    let mut queue = job_queue(&clock, 0);
    queue.enqueue(job(1, 1.));
    queue.enqueue(job(2, 1.));
    queue.enqueue(job(3, 1.));
    clock.set_time(1.);
    queue.dequeue();
    queue.reset_stats();
    assert_eq!(queue.stats().entries(), 0);
    assert_eq!(queue.stats().exits(), 0);
    assert_eq!(queue.stats().current_length(), 2);
    assert_eq!(queue.stats().max_length(), 2);
}

#[test]
fn test_interleaved_operations_keep_invariants() {
    let clock = SimulationClock::new();
    let mut queue = job_queue(&clock, 8);
    let mut max_seen = 0;
    for step in 0..200u32 {
        clock.advance(0.25);
        match step % 7 {
            0 | 1 | 3 | 5 => {
                queue.enqueue(job(step, ((step * 37) % 11) as f64));
            }
            2 => {
                queue.dequeue();
            }
            4 => {
                let target = job(step - 3, (((step - 3) * 37) % 11) as f64);
                queue.update_priority(&target, (step % 4) as f64);
            }
            _ => {
                let target = job(step - 1, (((step - 1) * 37) % 11) as f64);
                queue.remove(&target);
            }
        }
        max_seen = max_seen.max(queue.len());
        check_invariants(queue.stats(), queue.len(), 8);
        assert!(queue.stats().max_length() >= max_seen);
    }
    let mut last = f64::NEG_INFINITY;
    while let Some(next) = queue.peek().cloned() {
        let priority = queue.priority_of(&next).unwrap();
        assert!(priority >= last);
        last = priority;
        queue.dequeue();
    }
    assert!(queue.is_empty());
    check_invariants(queue.stats(), 0, 8);
}

#[test]
fn test_display_and_config() {
    let clock = SimulationClock::new();
    let config = QueueConfig::from_yaml_str("name: triage\ncapacity: 3\ndefault_priority: 2.5\n").unwrap();
    let mut queue = PriorityQueue::from_config(clock, &config);
    queue.enqueue("patient");
    assert_eq!(queue.priority_of(&"patient"), Some(2.5));
    assert_eq!(queue.to_string(), "PriorityQueue(name=\"triage\", length=1, capacity=3)");

    let unnamed: PriorityQueue<u8> = PriorityQueue::new(SimulationClock::new(), 0);
    assert!(unnamed.name().starts_with("PriorityQueue_"));
}
