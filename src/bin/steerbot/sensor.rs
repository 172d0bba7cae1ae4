use crate::app::sensor_task;
use systick_monotonic::fugit::Duration;

pub fn sensor_task(mut cx: sensor_task::Context) {
    let task = &mut *cx.local.sensor_state;
    match task.step(&mut cx.shared.ins, cx.local.sensor_delay) {
        Some(0) => {
            sensor_task::spawn().unwrap();
        }
        Some(period_ms) => {
            sensor_task::spawn_after(Duration::<u64, 1, 1000>::millis(period_ms as u64)).unwrap();
        }
        // not re-spawned, the sensor subsystem stays down
        None => {}
    }
}
