use num::complex::Complex;
use ultraviolet::Vec2x8;
use wide::f32x8;

pub type C<T> = Complex<T>;

/// Eight complex numbers, real parts in `x` and imaginary parts in `y`.
pub type C8 = Vec2x8;

pub fn c(re: f32, im: f32) -> C<f32> {
    Complex::new(re, im)
}

pub fn c8(re: f32x8, im: f32x8) -> C8 {
    Vec2x8::new(re, im)
}

pub fn c8_from_arrays(re: [f32; 8], im: [f32; 8]) -> C8 {
    c8(f32x8::new(re), f32x8::new(im))
}
