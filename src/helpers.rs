use num_traits::Float;

pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + t * (b - a)
}
