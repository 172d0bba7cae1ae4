use crate::app::stabilizer_task;
use steerbot::tasks::stabilizer;
use systick_monotonic::fugit::Duration;

pub fn stabilizer_task(mut cx: stabilizer_task::Context) {
    let period_ms = stabilizer::tick(&mut cx.shared.vehicle, cx.local.stabilizer_delay);
    stabilizer_task::spawn_after(Duration::<u64, 1, 1000>::millis(period_ms as u64)).unwrap();
}
