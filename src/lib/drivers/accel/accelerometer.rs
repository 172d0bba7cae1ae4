/// Tri-axis accelerometer as seen by the navigation code.
pub trait Accelerometer {
    type Error;

    // true once a new sample is waiting to be read
    fn is_data_ready(&mut self) -> Result<bool, Self::Error>;

    // raw (x, y, z) sample in sensor counts
    fn read_xyz(&mut self) -> Result<[i16; 3], Self::Error>;
}

impl<A: Accelerometer + ?Sized> Accelerometer for &mut A {
    type Error = A::Error;

    fn is_data_ready(&mut self) -> Result<bool, Self::Error> {
        (**self).is_data_ready()
    }

    fn read_xyz(&mut self) -> Result<[i16; 3], Self::Error> {
        (**self).read_xyz()
    }
}
