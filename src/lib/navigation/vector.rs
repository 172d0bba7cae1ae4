use core::ops::{Add, AddAssign, Mul, Sub};

use num_traits::{Num, NumCast};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3<ItemT> {
    pub x: ItemT,
    pub y: ItemT,
    pub z: ItemT,
}

impl<ItemT> Vector3<ItemT>
where
    ItemT: Num + NumCast + Copy,
{
    pub const fn new(x: ItemT, y: ItemT, z: ItemT) -> Vector3<ItemT> {
        Vector3 { x, y, z }
    }

    pub fn zero() -> Vector3<ItemT> {
        Vector3::new(ItemT::zero(), ItemT::zero(), ItemT::zero())
    }

    // raw sensor counts scaled into physical units
    pub fn from_raw(raw: [i16; 3], scale: ItemT) -> Vector3<ItemT> {
        let cast = |v: i16| <ItemT as NumCast>::from(v).unwrap_or_else(ItemT::zero);
        Vector3::new(cast(raw[0]) * scale, cast(raw[1]) * scale, cast(raw[2]) * scale)
    }

    pub fn to_array(self) -> [ItemT; 3] {
        [self.x, self.y, self.z]
    }
}

impl<ItemT: Num + Copy> Add for Vector3<ItemT> {
    type Output = Vector3<ItemT>;

    fn add(self, rhs: Self) -> Self::Output {
        Vector3 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl<ItemT: Num + Copy> AddAssign for Vector3<ItemT> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<ItemT: Num + Copy> Sub for Vector3<ItemT> {
    type Output = Vector3<ItemT>;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector3 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl<ItemT: Num + Copy> Mul<ItemT> for Vector3<ItemT> {
    type Output = Vector3<ItemT>;

    fn mul(self, rhs: ItemT) -> Self::Output {
        Vector3 {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

// Offset subtracted from every scaled sample, z == 0 doubles as "not calibrated"
pub type CalibrationVector = Vector3<f64>;
// m/s^2
pub type AccelerationVector = Vector3<f64>;
// m/s
pub type VelocityVector = Vector3<f64>;
// m
pub type DistanceVector = Vector3<f64>;
