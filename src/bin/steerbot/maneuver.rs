use crate::app::maneuver_task;
use systick_monotonic::fugit::Duration;

pub fn maneuver_task(mut cx: maneuver_task::Context) {
    match cx.local.sequencer.step(&mut cx.shared.vehicle) {
        Ok(hold_ms) => {
            maneuver_task::spawn_after(Duration::<u64, 1, 1000>::millis(hold_ms as u64)).unwrap();
        }
        // not re-spawned, the car keeps its last maneuver
        Err(e) => log::error!("maneuver refused ({:?}), sequencer halted", e),
    }
}
