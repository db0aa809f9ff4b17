#![allow(missing_docs)]
#![allow(unexpected_cfgs)]

pub use error_chain::bail;
use error_chain::error_chain;

error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }

    foreign_links {
        Encode(image::ImageError);
        Io(std::io::Error);
        Conversion(std::num::TryFromIntError);
    }

    errors {
        InvalidConfig(detail: String) {
            description("invalid render configuration")
            display("invalid render configuration: {}", detail)
        }
        Allocation(bytes: usize) {
            description("output buffer allocation failed")
            display("could not allocate a {} byte output buffer", bytes)
        }
        RasterMismatch(expected: (usize, usize), found: (usize, usize)) {
            description("raster does not match the image spec")
            display("raster is {}x{}, renderer expects {}x{}", found.0, found.1, expected.0, expected.1)
        }
    }
}
