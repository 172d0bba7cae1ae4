/// Contract violations reported by the actuation layer.
///
/// Out-of-range inputs are never clamped, they are handed back to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlError {
    // power or direction outside [-1, 1] (or NaN)
    InvalidArgument,
    // unknown maneuver pattern or unusable maneuver program.
    // Also a steering range outside (0, 1]
    InvalidConfiguration,
}

// true if `value` is a valid normalized power/direction
pub(crate) fn in_unit_range(value: f32) -> bool {
    (-1.0..=1.0).contains(&value)
}

pub(crate) fn check_unit_range(value: f32) -> Result<f32, ControlError> {
    if in_unit_range(value) {
        Ok(value)
    } else {
        Err(ControlError::InvalidArgument)
    }
}
