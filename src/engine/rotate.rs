use std::collections::VecDeque;

use crate::model::{LINE_IDS, SENTINEL, Schedule};

/// Rotate the schedule one step: line 1 hands its leading movable value down
/// the cascade, every later line passes its own head one line earlier, and
/// line 1's value wraps around to the back of line 6. Sentinel slots stay
/// put and are skipped when values are dealt back out.
///
/// Pure — the input is untouched and the rotated copy is returned. Input is
/// assumed validated; a missing line is skipped rather than an error.
pub fn rotate(schedule: &Schedule) -> Schedule {
    let mut queues: Vec<VecDeque<String>> = LINE_IDS
        .iter()
        .map(|id| {
            schedule
                .line(*id)
                .map(|line| line.movable_values())
                .unwrap_or_default()
        })
        .collect();

    // The whole cascade is keyed off line 1 having something to give. A
    // line 1 of only sentinels means nothing moves anywhere this round.
    if let Some(carry) = queues[0].pop_front() {
        for i in 0..queues.len() - 1 {
            if let Some(head) = queues[i + 1].pop_front() {
                queues[i].push_back(head);
            }
        }
        let last = queues.len() - 1;
        queues[last].push_back(carry);
    }

    let mut rotated = schedule.clone();
    for (queue, id) in queues.iter_mut().zip(LINE_IDS) {
        let Some(line) = rotated.line_mut(id) else {
            continue;
        };
        for value in line.values_mut() {
            if *value != SENTINEL {
                // A drained queue leaves the remaining slots' old values in
                // place rather than erroring.
                if let Some(next) = queue.pop_front() {
                    *value = next;
                }
            }
        }
    }
    rotated
}
