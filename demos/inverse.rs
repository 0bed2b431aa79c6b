//! Inverts a matrix through a cache cell. Logs at debug level, so cache hits and misses are
//! visible next to the printed results.

use matcache::{cache_solve, CacheMatrix, InvertError};
use nalgebra::DMatrix;

fn main() -> Result<(), InvertError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut cell = CacheMatrix::new(DMatrix::from_row_slice(2, 2, &[4.0, 7.0, 2.0, 6.0]));

    let first = cache_solve(&mut cell)?;
    println!("inverse:{first}");

    let second = cache_solve(&mut cell)?;
    assert_eq!(first, second);

    cell.set_source(DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]));
    match cache_solve(&mut cell) {
        Ok(inverse) => println!("inverse:{inverse}"),
        Err(err) => println!("could not invert: {err}"),
    }

    cell.set_source(DMatrix::from_diagonal_element(3, 3, 2.0));
    let third = cache_solve(&mut cell)?;
    println!("inverse:{third}");

    Ok(())
}
